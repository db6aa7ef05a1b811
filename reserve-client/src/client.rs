//! Reserve client facade
//!
//! Wires one HTTP client, the session context, the auth collaborator and the
//! reservation desk together from a [`ClientConfig`].

use std::sync::Arc;

use shared::client::RegisterResponse;
use shared::{Principal, Role};

use crate::auth::AuthClient;
use crate::desk::ReservationDesk;
use crate::graphql::GraphqlBackend;
use crate::session::{FileSessionStore, SessionStore};
use crate::{ClientConfig, ClientResult, SessionContext};

pub struct ReserveClient {
    session: Arc<SessionContext>,
    auth: AuthClient,
    desk: ReservationDesk<GraphqlBackend>,
}

impl ReserveClient {
    /// Client whose session persists in `config.session_file`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let store = Arc::new(FileSessionStore::new(&config.session_file));
        Self::with_session_store(config, store)
    }

    /// Client restoring its session from `store`
    pub fn with_session_store(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let session = Arc::new(SessionContext::restore(store)?);
        let auth = AuthClient::new(http.clone(), &config);
        let backend = GraphqlBackend::from_config(http, &config);
        let desk = ReservationDesk::new(backend, session.clone(), config.list_stale_time());

        Ok(Self {
            session,
            auth,
            desk,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn desk(&self) -> &ReservationDesk<GraphqlBackend> {
        &self.desk
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        verify_code: Option<&str>,
    ) -> ClientResult<Principal> {
        let principal = self
            .auth
            .login(&self.session, username, password, verify_code)
            .await?;
        self.desk.invalidate();
        Ok(principal)
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
        role: Role,
    ) -> ClientResult<RegisterResponse> {
        self.auth.register(username, password, confirmation, role).await
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.auth.logout(&self.session)?;
        self.desk.invalidate();
        Ok(())
    }
}
