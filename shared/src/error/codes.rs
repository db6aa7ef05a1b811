//! Unified error codes for the reservation client
//!
//! Error codes are organized by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Reservation errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire so front ends can localize by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Login requires a verification code
    VerificationRequired = 1008,
    /// Password and confirmation differ
    PasswordMismatch = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Status transition not allowed from the current status
    InvalidTransition = 4002,
    /// Reservation is cancelled or completed
    ReservationTerminal = 4003,
    /// Reservation can no longer be edited
    ReservationNotEditable = 4004,
    /// Party size outside the table's bounds
    PartySizeOutOfRange = 4005,
    /// Requested date is not after today
    BookingDateTooEarly = 4006,
    /// A submission for this reservation is still in flight
    SubmissionInFlight = 4007,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Seat count outside the allowed range
    SeatCountOutOfRange = 7002,
    /// A table with this seat count already exists
    SeatCountTaken = 7003,
    /// Seat count may not be lowered
    SeatCountDecrease = 7004,
    /// No table is available for booking
    NoTablesAvailable = 7005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network failure or non-success HTTP status
    NetworkError = 9002,
    /// Backend reported an error message
    BackendError = 9003,
    /// Backend response could not be interpreted
    InvalidResponse = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1008 => Ok(ErrorCode::VerificationRequired),
            1009 => Ok(ErrorCode::PasswordMismatch),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::ReservationTerminal),
            4004 => Ok(ErrorCode::ReservationNotEditable),
            4005 => Ok(ErrorCode::PartySizeOutOfRange),
            4006 => Ok(ErrorCode::BookingDateTooEarly),
            4007 => Ok(ErrorCode::SubmissionInFlight),

            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::SeatCountOutOfRange),
            7003 => Ok(ErrorCode::SeatCountTaken),
            7004 => Ok(ErrorCode::SeatCountDecrease),
            7005 => Ok(ErrorCode::NoTablesAvailable),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::BackendError),
            9004 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
