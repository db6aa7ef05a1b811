//! Auth service DTOs
//!
//! Request/response types of the REST auth service (`/auth/login`,
//! `/auth/register`).

use serde::{Deserialize, Serialize};

use crate::models::{Principal, Role};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_code: Option<String>,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub access_token: String,
    /// Missing role falls back to the least privileged one
    #[serde(default)]
    pub role: Role,
}

impl LoginResponse {
    pub fn into_principal(self) -> Principal {
        Principal {
            id: self.id,
            name: self.username,
            role: self.role,
            access_token: self.access_token,
        }
    }
}

/// Register request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Register response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `message` is a string, or a list of strings for field validation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(m) => Some(m.as_str()),
            Self::Many(ms) => ms.first().map(String::as_str),
        }
    }
}

/// Auth service failure payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthErrorResponse {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Structured login failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// A verification code must accompany the next attempt
    VerificationRequired,
    /// Wrong username/password (or code)
    InvalidCredentials,
    /// Anything else the service reported
    Other,
}

/// Marker the auth service puts in its verification prompts
const VERIFICATION_MARKER: &str = "验证码";

impl AuthErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(ErrorMessage::first)
    }

    /// Classify the failure once, here, so callers match on a kind
    pub fn kind(&self) -> AuthFailureKind {
        let error = self.error.as_deref().unwrap_or_default();
        if error.eq_ignore_ascii_case("VerificationRequired")
            || self
                .message()
                .is_some_and(|m| {
                    m.contains(VERIFICATION_MARKER)
                        || m.to_lowercase().contains("verification code")
                })
        {
            return AuthFailureKind::VerificationRequired;
        }
        if self.status_code == Some(401) || error.eq_ignore_ascii_case("Unauthorized") {
            return AuthFailureKind::InvalidCredentials;
        }
        AuthFailureKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> AuthErrorResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_login_request_omits_missing_code() {
        let req = LoginRequest {
            username: "alice".into(),
            password: "pw".into(),
            verify_code: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "username": "alice", "password": "pw" })
        );
    }

    #[test]
    fn test_login_response_defaults_role() {
        let resp: LoginResponse =
            serde_json::from_value(json!({ "id": "u1", "username": "alice", "accessToken": "t" }))
                .unwrap();
        let principal = resp.into_principal();
        assert_eq!(principal.role, Role::User);
        assert_eq!(principal.name, "alice");
    }

    #[test]
    fn test_kind_verification_from_message() {
        let err = payload(json!({
            "message": "请输入验证码",
            "error": "Bad Request",
            "statusCode": 400
        }));
        assert_eq!(err.kind(), AuthFailureKind::VerificationRequired);
    }

    #[test]
    fn test_kind_verification_from_error_field() {
        let err = payload(json!({ "message": "code needed", "error": "VerificationRequired" }));
        assert_eq!(err.kind(), AuthFailureKind::VerificationRequired);
    }

    #[test]
    fn test_kind_invalid_credentials() {
        let err = payload(json!({
            "message": "用户名或密码错误",
            "error": "Unauthorized",
            "statusCode": 401
        }));
        assert_eq!(err.kind(), AuthFailureKind::InvalidCredentials);
    }

    #[test]
    fn test_message_list_takes_first() {
        let err = payload(json!({
            "message": ["username too short", "password too short"],
            "statusCode": 400
        }));
        assert_eq!(err.message(), Some("username too short"));
        assert_eq!(err.kind(), AuthFailureKind::Other);
    }
}
