//! GraphQL collaborator against a mock backend

use std::sync::Arc;

use reserve_client::{
    ClientConfig, ClientError, ErrorCode, ErrorKind, MemorySessionStore, Notice, Operation,
    Principal, ReservationStatus, ReserveClient, Role,
};
use serde_json::{Value, json};
use shared::models::ReservationFilter;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ReserveClient {
    let config = ClientConfig::new(server.uri()).with_timeout(5);
    ReserveClient::with_session_store(config, Arc::new(MemorySessionStore::new())).unwrap()
}

fn signed_in(server: &MockServer, role: Role) -> ReserveClient {
    let client = client(server);
    client
        .session()
        .sign_in(Principal {
            id: "u1".into(),
            name: "alice".into(),
            role,
            access_token: "tok".into(),
        })
        .unwrap();
    client
}

fn reservation(id: &str, status: u8) -> Value {
    json!({
        "id": id,
        "createdAt": "2026-10-01T08:00:00.000Z",
        "updatedAt": "2026-10-01T08:00:00.000Z",
        "contactId": "c1",
        "tableId": "t1",
        "date": "2026-10-20",
        "numberOfPeople": 4,
        "status": status,
        "contact": { "name": "Alice", "phone": "13800000000" },
        "table": { "seats": 6 }
    })
}

fn data(field: &str, value: Value) -> ResponseTemplate {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), value);
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

#[tokio::test]
async fn staff_list_uses_all_reservations_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("query Reservations("))
        .and(body_partial_json(json!({ "variables": { "status": 1 } })))
        .respond_with(data("reservations", json!([reservation("r1", 1), reservation("r2", 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::Staff);
    let filter = ReservationFilter::default().with_status(ReservationStatus::Requested);
    let list = client.desk().reservations(&filter).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].id, "r2");
    assert_eq!(list[0].table.seats, 6);

    // served from cache within the stale time
    let again = client.desk().reservations(&filter).await.unwrap();
    assert_eq!(list, again);
}

#[tokio::test]
async fn user_list_uses_own_reservations_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("reservationsByCurrentUser"))
        .respond_with(data("reservationsByCurrentUser", json!([reservation("r1", 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let rows = client.desk().rows(&ReservationFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].offers(reserve_client::Action::Edit));
}

#[tokio::test]
async fn graphql_errors_surface_first_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "预订不存在" }, { "message": "second" }]
        })))
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client.desk().reservation("missing").await.unwrap_err();
    assert!(matches!(&err, ClientError::Backend(m) if m == "预订不存在"));
    assert_eq!(Notice::from_error(Operation::ShowReservation, &err).message, "预订不存在");
}

#[tokio::test]
async fn null_reservation_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query ReservationInfo"))
        .respond_with(data("reservationInfo", Value::Null))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateReservationInfo"))
        .respond_with(data("updateReservationInfo", reservation("r9", 3)))
        .expect(0)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client.desk().reservation("r9").await.unwrap_err();
    assert!(matches!(&err, ClientError::ReservationNotFound(id) if id == "r9"));
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert_eq!(err.code(), ErrorCode::ReservationNotFound);
    assert_eq!(Notice::from_error(Operation::ShowReservation, &err).message, "未找到预订信息");

    let err = client
        .desk()
        .transition_by_id("r9", ReservationStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ReservationNotFound(_)));
}

#[tokio::test]
async fn missing_field_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client.desk().reservation("r1").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn null_table_update_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Tables"))
        .respond_with(data("tables", json!([{ "id": "t1", "seats": 4 }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateTableInfo"))
        .respond_with(data("updateTableInfo", Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::Staff);
    let err = client.desk().update_table("t1", 6).await.unwrap_err();
    assert!(matches!(&err, ClientError::TableNotFound(id) if id == "t1"));
    assert_eq!(Notice::from_error(Operation::UpdateTable, &err).message, "未找到餐桌信息");
}

#[tokio::test]
async fn unauthenticated_graphql_error_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Unauthorized", "extensions": { "code": "UNAUTHENTICATED" } }]
        })))
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client.desk().tables().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn http_failures_are_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::Staff);
    let err = client.desk().tables().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 502, .. }));
    let notice = Notice::from_error(Operation::ListTables, &err);
    assert_eq!(notice.message, "获取餐桌信息失败");
}

#[tokio::test]
async fn http_401_means_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client
        .desk()
        .reservations(&ReservationFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
}

#[tokio::test]
async fn no_credential_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data("reservations", json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .desk()
        .reservations(&ReservationFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);

    let err = client
        .desk()
        .transition_by_id("r1", ReservationStatus::Cancelled)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert!(Notice::from_error(Operation::UpdateStatus, &err).redirect_to_login);
}

#[tokio::test]
async fn staff_approve_sends_one_status_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query ReservationInfo"))
        .and(body_partial_json(json!({ "variables": { "id": "r2" } })))
        .respond_with(data("reservationInfo", reservation("r2", 1)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateReservationInfo"))
        .and(body_partial_json(
            json!({ "variables": { "data": { "id": "r2", "status": 2 } } }),
        ))
        .respond_with(data("updateReservationInfo", reservation("r2", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::Staff);
    let updated = client
        .desk()
        .transition_by_id("r2", ReservationStatus::Approved)
        .await
        .unwrap();
    assert_eq!(updated.status, ReservationStatus::Approved);
}

#[tokio::test]
async fn user_approve_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query ReservationInfo"))
        .respond_with(data("reservationInfo", reservation("r3", 1)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateReservationInfo"))
        .respond_with(data("updateReservationInfo", reservation("r3", 2)))
        .expect(0)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::User);
    let err = client
        .desk()
        .transition_by_id("r3", ReservationStatus::Approved)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(
        Notice::from_error(Operation::UpdateStatus, &err).message,
        "无权执行此操作"
    );
}

#[tokio::test]
async fn add_table_posts_seat_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Tables"))
        .respond_with(data("tables", json!([{ "id": "t1", "seats": 4 }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation AddTableInfo"))
        .and(body_partial_json(json!({ "variables": { "data": { "seats": 6 } } })))
        .respond_with(data("addTableInfo", json!({ "id": "t2", "seats": 6 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server, Role::Staff);
    let err = client.desk().add_table(4).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let table = client.desk().add_table(6).await.unwrap();
    assert_eq!(table.id, "t2");
}
