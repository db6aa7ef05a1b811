//! Principal Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actor role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer
    #[default]
    User,
    /// Operator
    Staff,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "staff" => Ok(Self::Staff),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

/// Signed-in actor, persisted as the session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub access_token: String,
}

impl Principal {
    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_value(Role::Staff).unwrap(), json!("staff"));
        let role: Role = serde_json::from_value(json!("user")).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("STAFF".parse(), Ok(Role::Staff));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_principal_record_format() {
        let principal = Principal {
            id: "u1".into(),
            name: "alice".into(),
            role: Role::User,
            access_token: "tok".into(),
        };
        assert_eq!(
            serde_json::to_value(&principal).unwrap(),
            json!({ "id": "u1", "name": "alice", "role": "user", "accessToken": "tok" })
        );
        assert!(!principal.is_staff());
        assert!(Principal { role: Role::Staff, ..principal }.is_staff());
    }
}
