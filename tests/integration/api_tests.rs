//! HTTP tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Title that does not clash with earlier runs
fn unique(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4())
}

async fn post(client: &Client, path: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

/// Create an author, a language and a genre, returning their ids
async fn create_references(client: &Client) -> (i64, i64, i64) {
    let author: Value = post(
        client,
        "/admin/authors",
        json!({"first_name": "Jane", "last_name": "Doe", "date_of_birth": "1950-01-01"}),
    )
    .await
    .json()
    .await
    .expect("Failed to parse author");
    let language: Value = post(client, "/admin/languages", json!({"name": "English"}))
        .await
        .json()
        .await
        .expect("Failed to parse language");
    let genre: Value = post(client, "/admin/genres", json!({"name": "Fiction"}))
        .await
        .json()
        .await
        .expect("Failed to parse genre");

    (
        author["id"].as_i64().expect("No author id"),
        language["id"].as_i64().expect("No language id"),
        genre["id"].as_i64().expect("No genre id"),
    )
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/v1/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/v1/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_admin_index() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let models: Vec<_> = body
        .as_array()
        .expect("Index is not a list")
        .iter()
        .filter_map(|entry| entry["model"].as_str())
        .collect();
    assert_eq!(models, ["authors", "books", "book-instances", "genres", "languages"]);
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();
    let (author_id, language_id, genre_id) = create_references(&client).await;
    let title = unique("Sample");

    let response = post(
        &client,
        "/admin/books",
        json!({
            "title": title,
            "summary": "A sample book",
            "isbn": "9780000000000",
            "author_id": author_id,
            "language_id": language_id,
            "genres": [genre_id]
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("No book id");

    // Same title again
    let response = post(
        &client,
        "/admin/books",
        json!({
            "title": title,
            "summary": "Another summary",
            "isbn": "9780000000001",
            "author_id": author_id,
            "language_id": language_id,
            "genres": [genre_id]
        }),
    )
    .await;
    assert_eq!(response.status(), 409);

    // Add a copy through the inline formset
    let response = client
        .put(format!("{}/admin/books/{}", BASE_URL, book_id))
        .json(&json!({"instances": [{"imprint": "Penguin, 1999", "status": "a"}]}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let form: Value = client
        .get(format!("{}/admin/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse change form");
    assert_eq!(form["url"], format!("/admin/books/{}", book_id));
    let rows = form["inlines"][0]["rows"].as_array().expect("No inline rows");
    assert_eq!(rows.len(), 1);
    let copy_id = rows[0]["id"].as_str().expect("No copy id").to_string();

    let response = client
        .delete(format!("{}/admin/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The copy survives its book
    let form: Value = client
        .get(format!("{}/admin/book-instances/{}", BASE_URL, copy_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse change form");
    assert_eq!(form["fieldsets"][0]["rows"][0][0]["value"], Value::Null);
}

#[tokio::test]
#[ignore]
async fn test_book_without_genre_rejected() {
    let client = Client::new();
    let (author_id, language_id, _) = create_references(&client).await;

    let response = post(
        &client,
        "/admin/books",
        json!({
            "title": unique("No genre"),
            "summary": "A sample book",
            "isbn": "9780000000000",
            "author_id": author_id,
            "language_id": language_id,
            "genres": []
        }),
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_status_rejected() {
    let client = Client::new();

    let response = post(&client, "/admin/book-instances", json!({"imprint": "Penguin", "status": "x"})).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_book_instance_filters() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/book-instances?status=o&due_back=past_7_days", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["per_page"], 100);
    assert_eq!(body["filters"][0]["name"], "status");
    for row in body["rows"].as_array().expect("No rows") {
        assert_eq!(row["values"]["status"], "On loan");
    }
}
