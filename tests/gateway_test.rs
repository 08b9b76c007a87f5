//! Gateway wire-contract tests using wiremock.
//!
//! These tests verify that SheetClient issues the four CRUD calls with the
//! methods, paths and bodies the spreadsheet service expects, and that the
//! network actor reports results back as NetworkResponses.

use std::time::Duration;

use sheetview_tui::{GatewayError, NetworkActor, NetworkCommand, NetworkResponse, Operation, Row, SheetClient};
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SheetClient {
    SheetClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn sheet_rows() -> serde_json::Value {
    serde_json::json!([
        {"ID": "1", "Avatar_Name": "Ava", "Performance_Score": "10"},
        {"ID": "2", "Avatar_Name": "Bea", "Performance_Score": "15"}
    ])
}

#[tokio::test]
async fn test_list_rows_parses_sheet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_rows()))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client_for(&server).list_rows().await.unwrap();

    assert_eq!(
        rows,
        vec![Row::new("1", "Ava", "10"), Row::new("2", "Bea", "15")]
    );
}

#[tokio::test]
async fn test_create_posts_single_element_data_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(serde_json::json!({
            "data": [{"ID": "3", "Avatar_Name": "Cy", "Performance_Score": "7"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"created": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .create_row(&Row::new("3", "Cy", "7"))
        .await
        .unwrap();

    assert_eq!(ack["created"], 1);
}

#[tokio::test]
async fn test_update_patches_row_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/ID/1"))
        .and(body_json(serde_json::json!({
            "data": {"ID": "1", "Avatar_Name": "Ava", "Performance_Score": "20"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"updated": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .update_row("1", &Row::new("1", "Ava", "20"))
        .await;

    assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
}

#[tokio::test]
async fn test_delete_addresses_row_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/ID/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"deleted": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).delete_row("42").await;

    assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/ID/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_row("404").await.unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_list_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_rows().await.unwrap_err();

    assert!(matches!(err, GatewayError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_network_actor_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sheet_rows()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/ID/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(NetworkActor::new(client_for(&server), resp_tx).run(cmd_rx));

    cmd_tx.send(NetworkCommand::ListRows { id: 1 }).unwrap();
    let loaded = resp_rx.recv().await.unwrap();
    assert_eq!(
        loaded,
        NetworkResponse::RowsLoaded {
            id: 1,
            rows: vec![Row::new("1", "Ava", "10"), Row::new("2", "Bea", "15")],
        }
    );

    cmd_tx
        .send(NetworkCommand::UpdateRow {
            id: 2,
            key: String::from("1"),
            row: Row::new("1", "Ava", "20"),
        })
        .unwrap();
    match resp_rx.recv().await.unwrap() {
        NetworkResponse::Failed { id, op, message } => {
            assert_eq!(id, 2);
            assert_eq!(op, Operation::Update);
            assert!(message.contains("500"), "message was {}", message);
        }
        other => panic!("Expected failure, got {:?}", other),
    }

    cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("network actor did not stop")
        .unwrap();
}
