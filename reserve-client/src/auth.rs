//! REST auth collaborator (`/auth/login`, `/auth/register`)

use reqwest::Client;
use shared::Principal;
use shared::Role;
use shared::client::{
    AuthErrorResponse, AuthFailureKind, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use shared::lifecycle::rules;

use crate::{ClientConfig, ClientError, ClientResult, SessionContext};

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    login_url: String,
    register_url: String,
}

impl AuthClient {
    pub fn new(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            login_url: config.auth_url("login"),
            register_url: config.auth_url("register"),
        }
    }

    /// Login and persist the principal into `session`
    ///
    /// A failure asking for a verification code comes back as
    /// [`ClientError::VerificationRequired`]; retry with `verify_code` set.
    pub async fn login(
        &self,
        session: &SessionContext,
        username: &str,
        password: &str,
        verify_code: Option<&str>,
    ) -> ClientResult<Principal> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            verify_code: verify_code.map(str::to_string),
        };

        let response = self.client.post(&self.login_url).json(&request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(login_failure(status.as_u16(), &text));
        }

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("login: {e}")))?;
        let principal = login.into_principal();
        session.sign_in(principal.clone())?;

        tracing::info!(user = %principal.name, role = %principal.role, "Signed in");
        Ok(principal)
    }

    /// Register a new account; the password must be typed twice
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
        role: Role,
    ) -> ClientResult<RegisterResponse> {
        rules::check_password_confirmation(password, confirmation)?;

        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role,
        };

        let response = self
            .client
            .post(&self.register_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<AuthErrorResponse>(&text) {
                Ok(body) => match body.message() {
                    Some(message) => ClientError::Backend(message.to_string()),
                    None => ClientError::Status {
                        status: status.as_u16(),
                        body: text,
                    },
                },
                Err(_) => ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        let registered: RegisterResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("register: {e}")))?;
        tracing::info!(user = %registered.username, role = %role, "Registered");
        Ok(registered)
    }

    /// Drop the persisted session; nothing is sent
    pub fn logout(&self, session: &SessionContext) -> ClientResult<()> {
        let name = session.principal().map(|p| p.name);
        session.sign_out()?;
        if let Some(name) = name {
            tracing::info!(user = %name, "Signed out");
        }
        Ok(())
    }
}

fn login_failure(status: u16, text: &str) -> ClientError {
    let Ok(body) = serde_json::from_str::<AuthErrorResponse>(text) else {
        return ClientError::Status {
            status,
            body: text.to_string(),
        };
    };
    let message = body.message().unwrap_or_default().to_string();
    match body.kind() {
        AuthFailureKind::VerificationRequired => ClientError::VerificationRequired(message),
        AuthFailureKind::InvalidCredentials => ClientError::InvalidCredentials(message),
        AuthFailureKind::Other if message.is_empty() => ClientError::Status {
            status,
            body: text.to_string(),
        },
        AuthFailureKind::Other => ClientError::Backend(message),
    }
}
