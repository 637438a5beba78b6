//! Integration tests for the cafe JSON API.
//!
//! These tests require a running server (cargo run -p cafe-server).
//! Each test uses a unique cafe name so runs do not collide.

use cafe_integration_tests::{api_key, base_url};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use uuid::Uuid;

fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4())
}

/// Test helper: add a cafe and return its ID by searching its unique location.
async fn add_cafe(client: &Client, name: &str, location: &str) -> i64 {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/add"))
        .form(&[
            ("name", name),
            ("map_url", "https://maps.example/test"),
            ("img_url", "https://img.example/test.jpg"),
            ("location", location),
            ("seats", "10-20"),
            ("has_toilet", "yes"),
            ("has_wifi", "no"),
            ("has_sockets", "1"),
            ("can_take_calls", "False"),
            ("coffee_price", "£2.50"),
        ])
        .send()
        .await
        .expect("Failed to add cafe");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{base_url}/search"))
        .query(&[("loc", location)])
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");

    body["cafe"][0]["id"].as_i64().expect("Added cafe not found")
}

/// Test helper: delete a cafe with the configured key.
async fn delete_cafe(client: &Client, id: i64) -> Value {
    let base_url = base_url();
    client
        .delete(format!("{base_url}/report-closed/{id}"))
        .form(&[("api_key", api_key())])
        .send()
        .await
        .expect("Failed to delete cafe")
        .json()
        .await
        .expect("Failed to parse delete response")
}

#[tokio::test]
#[ignore = "Requires running cafe server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running cafe server"]
async fn test_add_search_update_delete_lifecycle() {
    let client = client();
    let base_url = base_url();
    let name = unique_name("Lifecycle Cafe");
    let location = unique_name("Test Town");

    let id = add_cafe(&client, &name, &location).await;

    // Coerced flags round-trip through search
    let body: Value = client
        .get(format!("{base_url}/search"))
        .query(&[("loc", location.as_str())])
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    let cafe = &body["cafe"][0];
    assert_eq!(cafe["name"], name.as_str());
    assert_eq!(cafe["has_toilet"], true);
    assert_eq!(cafe["has_wifi"], false);
    assert_eq!(cafe["has_sockets"], true);
    assert_eq!(cafe["can_take_calls"], false);

    // Update price
    let resp = client
        .patch(format!("{base_url}/update-price/{id}"))
        .form(&[("new_price", "£3.00")])
        .send()
        .await
        .expect("Failed to update price");
    assert_eq!(resp.status(), StatusCode::OK);

    // Delete, then delete again
    let body = delete_cafe(&client, id).await;
    assert!(body["response"].is_string());

    let body = delete_cafe(&client, id).await;
    assert!(body["error"]["Not Found"].is_string());
}

#[tokio::test]
#[ignore = "Requires running cafe server"]
async fn test_wrong_api_key_does_not_delete() {
    let client = client();
    let base_url = base_url();
    let location = unique_name("Keyed Town");
    let id = add_cafe(&client, &unique_name("Keyed Cafe"), &location).await;

    let resp = client
        .delete(format!("{base_url}/report-closed/{id}"))
        .form(&[("api_key", "definitely-wrong")])
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    // Still there
    let body: Value = client
        .get(format!("{base_url}/search"))
        .query(&[("loc", location.as_str())])
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse search response");
    assert_eq!(body["cafe"][0]["id"], id);

    delete_cafe(&client, id).await;
}

#[tokio::test]
#[ignore = "Requires running cafe server"]
async fn test_update_price_unknown_id_is_404() {
    let resp = client()
        .patch(format!("{}/update-price/{}", base_url(), i64::MAX))
        .form(&[("new_price", "£1.00")])
        .send()
        .await
        .expect("Failed to update price");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
