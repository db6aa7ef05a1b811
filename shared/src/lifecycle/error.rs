use chrono::NaiveDate;
use thiserror::Error;

use crate::error::ErrorCode;
use crate::models::{ReservationStatus, Role};

/// Client-side constraint violations, raised before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Party size {size} must be between {min} and {max}")]
    PartySizeOutOfRange { size: u32, min: u32, max: u32 },

    #[error("Reservation date {date} must be on or after {earliest}")]
    BookingDateTooEarly { date: NaiveDate, earliest: NaiveDate },

    #[error("Seat count {seats} must be between {min} and {max}")]
    SeatCountOutOfRange { seats: u32, min: u32, max: u32 },

    #[error("A table with {0} seats already exists")]
    SeatCountTaken(u32),

    #[error("Seat count may not drop from {current} to {requested}")]
    SeatCountDecrease { current: u32, requested: u32 },

    #[error("No tables available")]
    NoTablesAvailable,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid input: {0}")]
    InvalidField(String),
}

impl RuleViolation {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PartySizeOutOfRange { .. } => ErrorCode::PartySizeOutOfRange,
            Self::BookingDateTooEarly { .. } => ErrorCode::BookingDateTooEarly,
            Self::SeatCountOutOfRange { .. } => ErrorCode::SeatCountOutOfRange,
            Self::SeatCountTaken(_) => ErrorCode::SeatCountTaken,
            Self::SeatCountDecrease { .. } => ErrorCode::SeatCountDecrease,
            Self::NoTablesAvailable => ErrorCode::NoTablesAvailable,
            Self::PasswordMismatch => ErrorCode::PasswordMismatch,
            Self::InvalidField(_) => ErrorCode::RequiredField,
        }
    }
}

impl From<validator::ValidationErrors> for RuleViolation {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidField(errors.to_string())
    }
}

/// Lifecycle authority errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Another role could make this move, the acting one may not
    #[error("Role {role} may not move a reservation from {from} to {to}")]
    Unauthorized {
        role: Role,
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// No role may make this move
    #[error("Cannot move a reservation from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Role {0} may not edit reservations")]
    EditForbidden(Role),

    #[error("A {0} reservation can no longer be edited")]
    NotEditable(ReservationStatus),

    #[error("Role {required} required, signed in as {actual}")]
    RoleRequired { required: Role, actual: Role },

    #[error(transparent)]
    Validation(#[from] RuleViolation),
}

impl LifecycleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized { .. } | Self::EditForbidden(_) => ErrorCode::PermissionDenied,
            Self::InvalidTransition { from, .. } if from.is_terminal() => {
                ErrorCode::ReservationTerminal
            }
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::NotEditable(_) => ErrorCode::ReservationNotEditable,
            Self::RoleRequired { .. } => ErrorCode::RoleRequired,
            Self::Validation(v) => v.code(),
        }
    }

    /// Role forbids the action (as opposed to state or input)
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::EditForbidden(_) | Self::RoleRequired { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
