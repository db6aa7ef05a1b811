//! Data models
//!
//! Wire shapes of the GraphQL backend plus the persisted session principal.
//! All IDs are backend-issued strings.

pub mod dining_table;
pub mod principal;
pub mod reservation;

// Re-exports
pub use dining_table::*;
pub use principal::*;
pub use reservation::*;
