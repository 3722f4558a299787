// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{response::Html, routing::get, Router};
use recipes_to_notes::application::use_cases::recipe_to_note::RecipeToNote;
use recipes_to_notes::config::settings::NotionSettings;
use recipes_to_notes::engines::reqwest_engine::{ReqwestScraper, DEFAULT_USER_AGENT};
use recipes_to_notes::infrastructure::llm::openai::OpenAiProvider;
use recipes_to_notes::infrastructure::notes::notion::NotionNotesApp;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECIPE_PAGE: &str = r#"<html><head><title>Pasta</title></head>
<body>
  <nav>Home | Recipes</nav>
  <h1>Pasta</h1>
  <ul><li>200 g pasta</li><li>salt</li></ul>
  <p>Boil water, add pasta, 10 minutes.</p>
  <script>track();</script>
</body></html>"#;

async fn start_recipe_site() -> String {
    let app = Router::new().route("/pasta", get(|| async { Html(RECIPE_PAGE) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_openai() -> MockServer {
    let server = MockServer::start().await;
    let content = json!({
        "name": "Pasta",
        "ingredients": ["200 g pasta", "salt"],
        "instructions": ["boil water", "add pasta"],
        "cooking_time_temperature": "10 minutes"
    })
    .to_string();
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Boil water, add pasta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn start_notion() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "object": "database", "id": "db-1", "title": [{ "plain_text": "Recipes" }] }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-1" })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_recipe_page_is_saved_to_notion() {
    let site = start_recipe_site().await;
    let openai = start_openai().await;
    let notion = start_notion().await;

    let scraper = ReqwestScraper::new(Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap();
    let provider =
        OpenAiProvider::with_base_url("test-key", "gpt-4o-mini", &openai.uri(), Duration::from_secs(5))
            .unwrap();
    let notes_app = NotionNotesApp::connect(&NotionSettings {
        token: Some("secret-token".to_string()),
        database_name: "Recipes".to_string(),
        language: "en".to_string(),
        api_base_url: notion.uri(),
        timeout_secs: 5,
    })
    .await
    .unwrap();

    let mut pipeline = RecipeToNote::new(Arc::new(scraper), &provider, Arc::new(notes_app));
    let url = format!("{}/pasta", site);
    pipeline.url(url.clone());
    let enriched = pipeline.run().await.unwrap();

    assert_eq!(enriched.domain, site.trim_start_matches("http://"));

    let requests = notion.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/v1/pages")
        .unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(
        body["properties"]["Name"]["title"][0]["text"]["content"],
        "Pasta"
    );
    assert_eq!(body["properties"]["Recipe URL"]["url"], url.as_str());
    assert!(body.get("cover").is_none());
    // ingredients (3) + time (2) + instructions (3)
    assert_eq!(body["children"].as_array().unwrap().len(), 8);
}
