//! Shared types for the table reservation client
//!
//! Wire models, error codes, auth DTOs and the reservation lifecycle
//! authority used by every front end.

pub mod client;
pub mod error;
pub mod lifecycle;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ErrorCode;
pub use lifecycle::{Action, LifecycleError, RuleViolation};
pub use models::{DiningTable, Principal, Reservation, ReservationStatus, Role};
