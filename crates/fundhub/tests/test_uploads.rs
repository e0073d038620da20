//! Multipart uploads and binary exports against a mock backend

mod common;

use assert_matches::assert_matches;
use fundhub::types::NavExportParams;
use fundhub::{Error, ErrorKind, FilePart, UploadOptions, UploadPayload};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn monthly_sheets() -> UploadPayload {
    UploadPayload::from_files([
        FilePart::new("jan.xlsx", b"jan-rows".to_vec()),
        FilePart::new("feb.xlsx", b"feb-rows".to_vec()),
        FilePart::new("mar.xlsx", b"mar-rows".to_vec()),
    ])
}

#[tokio::test]
async fn test_position_upload_sends_every_file_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/position/upload"))
        .and(query_param("override_existing", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("upload_result")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, notifier) = common::recording_client(&mock_server);

    let result = client
        .positions()
        .upload(monthly_sheets(), &UploadOptions::overriding())
        .await
        .unwrap();

    assert_eq!(result["success"], true);
    assert_eq!(result["data"]["success_count"], 42);
    assert!(notifier.notifications().is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let content_type = request
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {}",
        content_type
    );

    let body = String::from_utf8_lossy(&request.body);
    assert_eq!(body.matches(r#"name="files""#).count(), 3);

    let jan = body.find(r#"filename="jan.xlsx""#).unwrap();
    let feb = body.find(r#"filename="feb.xlsx""#).unwrap();
    let mar = body.find(r#"filename="mar.xlsx""#).unwrap();
    assert!(jan < feb && feb < mar);
    assert!(body.contains("feb-rows"));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_upload_without_override_sends_no_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/transaction/upload"))
        .and(query_param_is_missing("override_existing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _notifier) = common::recording_client(&mock_server);

    client
        .transactions()
        .upload(monthly_sheets(), &UploadOptions::default())
        .await
        .unwrap();

    mock_server.verify().await;
}

#[tokio::test]
async fn test_empty_upload_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (client, notifier) = common::recording_client(&mock_server);

    let result = client.nav().upload(UploadPayload::new()).await;

    assert_matches!(result, Err(Error::InvalidRequest(_)));
    assert!(notifier.notifications().is_empty());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_upload_failure_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/strategy/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Missing column: fund_code" })),
        )
        .mount(&mock_server)
        .await;

    let (client, notifier) = common::recording_client(&mock_server);

    let error = client
        .strategies()
        .upload(UploadPayload::from_files([FilePart::new("strategies.xlsx", b"x".to_vec())]))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::Validation));
    assert_eq!(notifier.messages(), vec!["Missing column: fund_code".to_string()]);
}

#[tokio::test]
async fn test_export_returns_raw_bytes() {
    let mock_server = MockServer::start().await;
    let workbook = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];

    Mock::given(method("GET"))
        .and(path("/api/nav/export"))
        .and(query_param("fund_code", "SX1234"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    workbook.clone(),
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )
                .insert_header("content-disposition", r#"attachment; filename="nav_SX1234.xlsx""#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _notifier) = common::recording_client(&mock_server);

    let params = NavExportParams {
        fund_code: Some("SX1234".to_string()),
        ..Default::default()
    };
    let blob = client.nav().export(&params).await.unwrap();

    assert!(blob.is_success());
    assert_eq!(blob.body().as_ref(), workbook.as_slice());
    assert_eq!(blob.suggested_filename(), Some("nav_SX1234.xlsx".to_string()));
    assert!(blob.error_envelope().is_none());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_failed_export_is_returned_unclassified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/strategy/export"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": { "error": "no rows" } })),
        )
        .mount(&mock_server)
        .await;

    let (client, notifier) = common::recording_client(&mock_server);

    let blob = client.strategies().export(&Default::default()).await.unwrap();

    assert_eq!(blob.status().as_u16(), 404);
    assert!(blob.text().contains("no rows"));
    assert!(notifier.notifications().is_empty());

    let envelope = blob.error_envelope().unwrap();
    assert_eq!(envelope.kind(), ErrorKind::NotFound);
    assert_eq!(envelope.message(), "no rows");
    // Classifying on demand still does not notify.
    assert!(notifier.notifications().is_empty());
}
