//! Reservation lifecycle authority
//!
//! Decides which status moves and edits a principal may perform, and checks
//! the input rules that guard bookings and the table inventory. Everything
//! here is pure; callers perform I/O only after these checks pass.

mod error;
pub mod rules;
mod transitions;

pub use error::{LifecycleError, LifecycleResult, RuleViolation};
pub use transitions::{
    Action, available_actions, can_edit, can_transition, check_edit, check_transition,
    permitted_targets,
};
