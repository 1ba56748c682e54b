use issuethread_client::{HttpTokenExchange, TokenExchange, TransportConfig};
use issuethread_types::ThreadError;
use mockito::Matcher;
use serde_json::json;

fn exchange(server: &mockito::ServerGuard) -> HttpTokenExchange {
    HttpTokenExchange::new(&TransportConfig::new().with_exchange_url(server.url())).unwrap()
}

#[tokio::test]
async fn test_exchange_returns_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({
            "code": "abc123",
            "client_id": "cid",
            "client_secret": "secret",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"gho_token","token_type":"bearer","scope":"repo"}"#)
        .create_async()
        .await;

    let token = exchange(&server)
        .exchange("abc123", "cid", "secret")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(token, "gho_token");
}

#[tokio::test]
async fn test_provider_error_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#,
        )
        .create_async()
        .await;

    let err = exchange(&server)
        .exchange("stale", "cid", "secret")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ThreadError::Exchange("The code passed is incorrect or expired.".to_string())
    );
}

#[tokio::test]
async fn test_server_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(502)
        .with_body("upstream down")
        .create_async()
        .await;

    let err = exchange(&server)
        .exchange("abc123", "cid", "secret")
        .await
        .unwrap_err();

    match err {
        ThreadError::Exchange(msg) => assert!(msg.contains("upstream down")),
        other => panic!("unexpected error: {:?}", other),
    }
}
