//! Reserve Client - table reservation client
//!
//! Talks to the reservation backend over GraphQL and to its auth service
//! over REST. Every status move and edit is checked by the lifecycle
//! authority in `shared` before it is sent.

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod desk;
pub mod error;
pub mod graphql;
pub mod logger;
pub mod notice;
pub mod session;

pub use auth::AuthClient;
pub use client::ReserveClient;
pub use config::ClientConfig;
pub use desk::{ReservationDesk, ReservationRow};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use graphql::{GraphqlBackend, ReservationBackend};
pub use notice::{Notice, NoticeLevel, Operation};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};

// Re-export shared types for convenience
pub use shared::{Action, DiningTable, ErrorCode, Principal, Reservation, ReservationStatus, Role};
