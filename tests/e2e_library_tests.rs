//! End-to-end tests for the personal library endpoints

mod common;

use common::{TestClient, TestServer, OTHER_USER, TEST_USER};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn names(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|e| e["gameName"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_add_game_applies_defaults() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;

    let response = client.add_game(json!({ "gameName": "  Hades  " })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let entry: Value = response.json().await.unwrap();
    assert_eq!(entry["gameName"], "Hades");
    assert_eq!(entry["status"], "Wishlist");
    assert_eq!(entry["platform"], "Steam");
    assert_eq!(entry["progressPercent"], 0);
    assert!(entry["priority"].is_null());
    assert!(entry["steamId"].is_null());
    assert_eq!(entry["username"], TEST_USER);
}

#[tokio::test]
async fn test_add_game_validation() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;

    let response = client.add_game(json!({ "gameName": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Game name is required");

    client.add_game_named("Celeste").await;
    let response = client.add_game(json!({ "gameName": "Celeste" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Game already in your library");
}

#[tokio::test]
async fn test_same_game_in_two_libraries() {
    let server = TestServer::spawn().await;
    let alice = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;
    let bob = TestClient::authenticated(server.base_url.clone(), OTHER_USER).await;

    let alice_id = alice.add_game_named("Celeste").await;
    bob.add_game_named("Celeste").await;

    // Bob can't see Alice's entry
    let response = bob.get_library_entry(alice_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Game not found in library");

    let library: Value = bob.get_library().await.json().await.unwrap();
    assert_eq!(names(&library), vec!["Celeste"]);
}

#[tokio::test]
async fn test_filter_and_sort() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;

    for (name, status, progress, priority) in [
        ("Celeste", "Playing", 40, Some(2)),
        ("Axiom Verge", "Completed", 100, None),
        ("Braid", "Playing", 70, Some(1)),
    ] {
        let response = client
            .add_game(json!({
                "gameName": name,
                "status": status,
                "progressPercent": progress,
                "priority": priority,
            }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Newest first by default
    let library: Value = client.get_library().await.json().await.unwrap();
    assert_eq!(names(&library), vec!["Braid", "Axiom Verge", "Celeste"]);

    let library: Value = client
        .get_library_with_query("sort=title")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(names(&library), vec!["Axiom Verge", "Braid", "Celeste"]);

    let library: Value = client
        .get_library_with_query("sort=progress")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(names(&library), vec!["Axiom Verge", "Braid", "Celeste"]);

    // Games without priority go last
    let library: Value = client
        .get_library_with_query("sort=priority")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(names(&library), vec!["Braid", "Celeste", "Axiom Verge"]);

    let library: Value = client
        .get_library_with_query("status=Playing&sort=title")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(names(&library), vec!["Braid", "Celeste"]);

    let response = client.get_library_with_query("status=Abandoned").await;
    assert_eq!(response.status(), StatusCode::OK);
    let library: Value = response.json().await.unwrap();
    assert!(library.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_count_by_status() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;

    for (name, status) in [
        ("Celeste", "Playing"),
        ("Braid", "Playing"),
        ("Fez", "On Hold"),
        ("Limbo", "Dropped"),
        ("Inside", "Completed"),
        ("Tunic", "Wishlist"),
    ] {
        let response = client
            .add_game(json!({ "gameName": name, "status": status }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = client.get_library_stats().await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["total"], 6);
    assert_eq!(stats["playing"], 2);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["onHold"], 1);
    assert_eq!(stats["dropped"], 1);
    assert_eq!(stats["wishlist"], 1);
}

#[tokio::test]
async fn test_update_game() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;
    let id = client.add_game_named("Celeste").await;

    let response = client
        .update_game(id, json!({ "status": "Playing", "priority": 3 }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry: Value = response.json().await.unwrap();
    assert_eq!(entry["status"], "Playing");
    assert_eq!(entry["priority"], 3);

    // Completing without a progress value fills it in
    let entry: Value = client
        .update_game(id, json!({ "status": "Completed" }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(entry["status"], "Completed");
    assert_eq!(entry["progressPercent"], 100);

    // Explicit null clears, absent fields stay
    let entry: Value = client
        .update_game(id, json!({ "priority": null }))
        .await
        .json()
        .await
        .unwrap();
    assert!(entry["priority"].is_null());
    assert_eq!(entry["status"], "Completed");

    let response = client.update_game(9999, json!({ "status": "Playing" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_game_removes_its_journal() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;
    let id = client.add_game_named("Celeste").await;

    for hours in [1.5, 2.0] {
        let response = client
            .add_journal_entry(json!({ "libraryId": id, "hoursPlayed": hours }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = client.delete_game(id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Deleted Celeste and 2 journal entries");

    let response = client.get_library_entry(id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.delete_game(id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone(), TEST_USER).await;

    let response = client
        .client
        .get(format!("{}/api/library/abc", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid ID");
}
