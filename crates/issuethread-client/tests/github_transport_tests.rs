use std::sync::Arc;

use issuethread_client::{GithubTransport, Transport, TransportConfig};
use issuethread_persist::{IdentityStore, MemoryIdentityCache};
use issuethread_types::ThreadError;
use mockito::Matcher;
use serde_json::json;

fn transport(base: &str, token: Option<&str>) -> GithubTransport {
    let store = IdentityStore::new(Arc::new(MemoryIdentityCache::new()));
    if let Some(token) = token {
        store.set_access_token(token).unwrap();
    }
    GithubTransport::builder()
        .identity(store)
        .config(TransportConfig::new().with_api_base(base))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/a/b/issues")
        .match_header("authorization", "Bearer t0k3n")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("creator".into(), "a".into()),
            Matcher::UrlEncoded("labels".into(), "https://example.com/post".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"[{"id":1,"number":2,"comments_url":"x"}]"#)
        .create_async()
        .await;

    let t = transport(&server.url(), Some("t0k3n"));
    let value = t
        .get(
            "/repos/a/b/issues",
            &[
                ("creator", "a".to_string()),
                ("labels", "https://example.com/post".to_string()),
            ],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(value[0]["number"], json!(2));
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_authorization() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"login":"octocat"}"#)
        .create_async()
        .await;

    let t = transport(&server.url(), None);
    t.get("/user", &[]).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/a/b/issues/2/comments")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "3".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    // base points nowhere; the absolute comments URL must be used as-is
    let t = transport("http://127.0.0.1:9", None);
    let url = format!("{}/repos/a/b/issues/2/comments", server.url());
    let value = t
        .get(&url, &[("page", "3".to_string()), ("per_page", "30".to_string())])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_markdown_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/markdown")
        .match_body(Matcher::Json(json!({"text": "**hi**", "mode": "gfm"})))
        .with_status(200)
        .with_header("content-type", "text/html;charset=utf-8")
        .with_body("<p><strong>hi</strong></p>")
        .create_async()
        .await;

    let t = transport(&server.url(), None);
    let value = t
        .post("/markdown", json!({"text": "**hi**", "mode": "gfm"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(value.as_str(), Some("<p><strong>hi</strong></p>"));
}

#[tokio::test]
async fn test_delete_no_content_is_null() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/reactions/42")
        .with_status(204)
        .create_async()
        .await;

    let t = transport(&server.url(), Some("t0k3n"));
    let value = t.delete("/reactions/42").await.unwrap();

    mock.assert_async().await;
    assert!(value.is_null());
}

#[tokio::test]
async fn test_error_status_maps_to_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/a/b/issues")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#)
        .create_async()
        .await;

    let t = transport(&server.url(), None);
    let err = t.get("/repos/a/b/issues", &[]).await.unwrap_err();

    assert_eq!(
        err,
        ThreadError::Transport {
            status: Some(404),
            message: "Not Found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let t = transport("http://127.0.0.1:9", None);
    let err = t.get("/user", &[]).await.unwrap_err();
    assert!(matches!(err, ThreadError::Transport { status: None, .. }));
}
