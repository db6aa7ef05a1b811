//! Unified error codes for the reservation client
//!
//! Layer-specific error enums (`LifecycleError` here, `ClientError` in the
//! client crate) each expose a `code()` returning an [`ErrorCode`] so front
//! ends localize by number.

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
