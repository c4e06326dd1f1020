use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pet_namer_rs::{web, CompletionClient, NameChain, PetNameError, Result};
use reqwest::StatusCode;

#[derive(Default)]
struct RecordingClient {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("1. Shadow\n2. Onyx\n3. <Midnight>".to_string())
    }
}

struct UnreachableProvider;

#[async_trait]
impl CompletionClient for UnreachableProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(PetNameError::Authentication("Incorrect API key provided".to_string()))
    }
}

async fn spawn_form(client: Arc<dyn CompletionClient>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = web::router(NameChain::new(client));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_get_renders_empty_form() {
    let addr = spawn_form(Arc::new(RecordingClient::default())).await;

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Pet Name Generator"));
    assert!(html.contains(r#"name="animal_type""#));
    assert!(html.contains(r#"name="pet_color""#));
    assert!(html.contains("Generate Name"));
}

#[tokio::test]
async fn test_submit_shows_names() {
    let client = Arc::new(RecordingClient::default());
    let addr = spawn_form(client.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .form(&[("animal_type", "dog"), ("pet_color", "Black")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("1. Shadow\n2. Onyx\n3. &lt;Midnight&gt;"));
    assert!(html.contains(r#"value="dog""#));
    assert!(html.contains(r#"value="Black""#));

    assert_eq!(
        client.prompts.lock().unwrap().as_slice(),
        ["I have a dog and I want a name for it. Its Black in color. Suggest me five cool names for my pet."]
    );
}

#[tokio::test]
async fn test_empty_color_still_calls_model() {
    let client = Arc::new(RecordingClient::default());
    let addr = spawn_form(client.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .form(&[("animal_type", "cat"), ("pet_color", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        client.prompts.lock().unwrap().as_slice(),
        ["I have a cat and I want a name for it. Its  in color. Suggest me five cool names for my pet."]
    );
}

#[tokio::test]
async fn test_missing_fields_are_empty_strings() {
    let client = Arc::new(RecordingClient::default());
    let addr = spawn_form(client.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(client.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_provider_failure_renders_error() {
    let addr = spawn_form(Arc::new(UnreachableProvider)).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .form(&[("animal_type", "cat"), ("pet_color", "Brown")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let html = response.text().await.unwrap();
    assert!(html.contains("Authentication failed: Incorrect API key provided"));
    assert!(html.contains(r#"value="cat""#));
}
