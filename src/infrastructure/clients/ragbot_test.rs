use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::RagBot;
use crate::domain::models::QuestionAnsweringClient;

impl RagBot {
    fn with_url(url: String) -> RagBot {
        return RagBot {
            url,
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!({"status": "Server is running"}).to_string())
        .create_async()
        .await;

    let client = RagBot::with_url(server.url());
    let res = client.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_on_unexpected_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!({"status": "Starting"}).to_string())
        .create_async()
        .await;

    let client = RagBot::with_url(server.url());
    let res = client.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/").with_status(500).create_async().await;

    let client = RagBot::with_url(server.url());
    let res = client.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_asks_questions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ask")
        .match_body(Matcher::Json(json!({"query": "What locations do you cover?"})))
        .with_status(200)
        .with_body(json!({"reply": "Dubai Marina and Creek Harbour"}).to_string())
        .create_async()
        .await;

    let client = RagBot::with_url(server.url());
    let res = client.ask("What locations do you cover?").await?;

    mock.assert_async().await;
    assert_eq!(
        res.response_text,
        Some("Dubai Marina and Creek Harbour".to_string())
    );
    assert_eq!(res.engine_label, None);

    return Ok(());
}

#[tokio::test]
async fn it_unwraps_encoded_bodies() -> Result<()> {
    let inner = json!({"reply": "Yes, three tours"}).to_string();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ask")
        .with_status(200)
        .with_body(json!({"body": inner}).to_string())
        .create_async()
        .await;

    let client = RagBot::with_url(server.url());
    let res = client.ask("Any virtual tours?").await?;

    mock.assert_async().await;
    assert_eq!(res.response_text, Some("Yes, three tours".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ask")
        .with_status(404)
        .create_async()
        .await;

    let client = RagBot::with_url(server.url());
    let res = client.ask("Hello").await;

    mock.assert_async().await;
    assert_eq!(res.unwrap_err().to_string(), "HTTP error! status: 404");
}
