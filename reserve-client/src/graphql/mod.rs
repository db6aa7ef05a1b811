//! GraphQL collaborator for reservations and tables
//!
//! [`ReservationBackend`] is the seam the desk talks through; [`GraphqlBackend`]
//! implements it over HTTP. Every call reads the bearer credential from the
//! [`SessionContext`] first and fails with `Unauthenticated` before anything
//! is sent when there is none.

pub mod queries;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::Role;
use shared::models::{
    DiningTable, NewReservation, Reservation, ReservationFilter, ReservationUpdate, TableInfo,
};

use crate::{ClientConfig, ClientError, ClientResult, SessionContext};
use queries::Document;

/// Remote operations on reservations and tables
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    /// Staff see every reservation, users their own
    async fn list_reservations(
        &self,
        session: &SessionContext,
        role: Role,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>>;

    async fn get_reservation(
        &self,
        session: &SessionContext,
        id: &str,
    ) -> ClientResult<Reservation>;

    async fn update_reservation(
        &self,
        session: &SessionContext,
        update: &ReservationUpdate,
    ) -> ClientResult<Reservation>;

    async fn add_reservation(
        &self,
        session: &SessionContext,
        reservation: &NewReservation,
    ) -> ClientResult<Reservation>;

    async fn list_tables(&self, session: &SessionContext) -> ClientResult<Vec<DiningTable>>;

    async fn add_table(
        &self,
        session: &SessionContext,
        info: TableInfo,
    ) -> ClientResult<DiningTable>;

    async fn update_table(
        &self,
        session: &SessionContext,
        id: &str,
        info: TableInfo,
    ) -> ClientResult<DiningTable>;
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Option<GraphqlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

impl GraphqlError {
    fn is_unauthenticated(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|e| e.code.as_deref())
            .is_some_and(|code| code == "UNAUTHENTICATED")
    }
}

/// GraphQL-over-HTTP backend
#[derive(Debug, Clone)]
pub struct GraphqlBackend {
    client: Client,
    endpoint: String,
}

impl GraphqlBackend {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(client: Client, config: &ClientConfig) -> Self {
        Self::new(client, config.graphql_url())
    }

    /// POST one document and pull `doc.field` out of `data`
    async fn execute<V, T>(
        &self,
        session: &SessionContext,
        doc: Document,
        variables: V,
    ) -> ClientResult<T>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let field = doc.field;
        self.execute_optional(session, doc, variables)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {field} data")))
    }

    /// Like [`execute`](Self::execute), but a `null` field is `None`
    ///
    /// Single-entity queries answer `null` for an unknown id. A field absent
    /// from `data` is still an invalid response.
    async fn execute_optional<V, T>(
        &self,
        session: &SessionContext,
        doc: Document,
        variables: V,
    ) -> ClientResult<Option<T>>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let token = session.credential()?;
        let body = GraphqlRequest {
            query: &doc.query,
            variables,
        };

        tracing::debug!(field = doc.field, "GraphQL request");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthenticated),
                _ => Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        let payload: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if let Some(first) = payload.errors.as_ref().and_then(|errors| errors.first()) {
            if first.is_unauthenticated() {
                return Err(ClientError::Unauthenticated);
            }
            return Err(ClientError::Backend(first.message.clone()));
        }

        let value = payload
            .data
            .and_then(|mut data| data.get_mut(doc.field).map(Value::take))
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", doc.field)))?;
        if value.is_null() {
            return Ok(None);
        }

        serde_json::from_value(value).map(Some).map_err(Into::into)
    }
}

#[async_trait]
impl ReservationBackend for GraphqlBackend {
    async fn list_reservations(
        &self,
        session: &SessionContext,
        role: Role,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>> {
        let doc = match role {
            Role::Staff => queries::reservations(),
            Role::User => queries::reservations_by_current_user(),
        };
        self.execute(session, doc, filter).await
    }

    async fn get_reservation(
        &self,
        session: &SessionContext,
        id: &str,
    ) -> ClientResult<Reservation> {
        self.execute_optional(session, queries::reservation_info(), json!({ "id": id }))
            .await?
            .ok_or_else(|| ClientError::ReservationNotFound(id.to_string()))
    }

    async fn update_reservation(
        &self,
        session: &SessionContext,
        update: &ReservationUpdate,
    ) -> ClientResult<Reservation> {
        self.execute_optional(
            session,
            queries::update_reservation_info(),
            json!({ "data": update }),
        )
        .await?
        .ok_or_else(|| ClientError::ReservationNotFound(update.id.clone()))
    }

    async fn add_reservation(
        &self,
        session: &SessionContext,
        reservation: &NewReservation,
    ) -> ClientResult<Reservation> {
        self.execute(session, queries::add_reservation_info(), json!({ "data": reservation }))
            .await
    }

    async fn list_tables(&self, session: &SessionContext) -> ClientResult<Vec<DiningTable>> {
        self.execute(session, queries::tables(), json!({})).await
    }

    async fn add_table(
        &self,
        session: &SessionContext,
        info: TableInfo,
    ) -> ClientResult<DiningTable> {
        self.execute(session, queries::add_table_info(), json!({ "data": info }))
            .await
    }

    async fn update_table(
        &self,
        session: &SessionContext,
        id: &str,
        info: TableInfo,
    ) -> ClientResult<DiningTable> {
        self.execute_optional(
            session,
            queries::update_table_info(),
            json!({ "id": id, "data": info }),
        )
        .await?
        .ok_or_else(|| ClientError::TableNotFound(id.to_string()))
    }
}
