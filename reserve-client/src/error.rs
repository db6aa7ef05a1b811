//! Client error types

use shared::{ErrorCode, LifecycleError, RuleViolation};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No signed-in principal; nothing was dispatched
    #[error("Authentication required")]
    Unauthenticated,

    /// Rejected locally by the lifecycle authority (role, state or input)
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Login must be retried with a verification code
    #[error("Verification code required: {0}")]
    VerificationRequired(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Backend answered with an error message (GraphQL `errors`, REST body)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Another mutation on the same reservation has not settled yet
    #[error("Reservation {0} has a submission in flight")]
    Busy(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status without a usable error body
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// What went wrong, in terms a front end reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Unauthorized,
    InvalidTransition,
    Validation,
    VerificationRequired,
    Busy,
    Transport,
    Backend,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Lifecycle(e) if e.is_unauthorized() => ErrorKind::Unauthorized,
            Self::Lifecycle(e) if e.is_validation() => ErrorKind::Validation,
            Self::Lifecycle(_) => ErrorKind::InvalidTransition,
            Self::VerificationRequired(_) => ErrorKind::VerificationRequired,
            Self::Busy(_) => ErrorKind::Busy,
            Self::InvalidCredentials(_)
            | Self::Backend(_)
            | Self::ReservationNotFound(_)
            | Self::TableNotFound(_) => ErrorKind::Backend,
            Self::Http(_)
            | Self::Status { .. }
            | Self::InvalidResponse(_)
            | Self::Serialization(_)
            | Self::Storage(_) => ErrorKind::Transport,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthenticated => ErrorCode::NotAuthenticated,
            Self::Lifecycle(e) => e.code(),
            Self::VerificationRequired(_) => ErrorCode::VerificationRequired,
            Self::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            Self::Backend(_) => ErrorCode::BackendError,
            Self::Busy(_) => ErrorCode::SubmissionInFlight,
            Self::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::Http(_) | Self::Status { .. } => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
            Self::Storage(_) => ErrorCode::InternalError,
        }
    }
}

impl From<RuleViolation> for ClientError {
    fn from(violation: RuleViolation) -> Self {
        Self::Lifecycle(LifecycleError::Validation(violation))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ReservationStatus, Role};

    #[test]
    fn test_lifecycle_kinds() {
        let unauthorized = ClientError::from(LifecycleError::Unauthorized {
            role: Role::User,
            from: ReservationStatus::Requested,
            to: ReservationStatus::Approved,
        });
        assert_eq!(unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(unauthorized.code(), ErrorCode::PermissionDenied);

        let terminal = ClientError::from(LifecycleError::InvalidTransition {
            from: ReservationStatus::Completed,
            to: ReservationStatus::Cancelled,
        });
        assert_eq!(terminal.kind(), ErrorKind::InvalidTransition);
        assert_eq!(terminal.code(), ErrorCode::ReservationTerminal);

        let invalid = ClientError::from(RuleViolation::NoTablesAvailable);
        assert_eq!(invalid.kind(), ErrorKind::Validation);
        assert_eq!(invalid.code(), ErrorCode::NoTablesAvailable);
    }

    #[test]
    fn test_transport_kinds() {
        let err = ClientError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.code(), ErrorCode::NetworkError);
        assert_eq!(ClientError::InvalidResponse("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(ClientError::Backend("x".into()).kind(), ErrorKind::Backend);
        let missing = ClientError::ReservationNotFound("r9".into());
        assert_eq!(missing.kind(), ErrorKind::Backend);
        assert_eq!(missing.code(), ErrorCode::ReservationNotFound);
        assert_eq!(ClientError::TableNotFound("t9".into()).code(), ErrorCode::TableNotFound);
        assert_eq!(ClientError::Busy("r1".into()).code(), ErrorCode::SubmissionInFlight);
    }
}
