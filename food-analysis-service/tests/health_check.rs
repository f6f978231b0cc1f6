mod common;

use common::TestApp;
use serde_json::Value;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "food-analysis-service");
}

#[tokio::test]
async fn index_serves_static_page() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.expect("body should be text");
    assert!(body.contains("Leitor de Comida"));
}
