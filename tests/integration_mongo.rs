#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::todo,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    missing_debug_implementations,
    clippy::clone_on_ref_ptr,
    clippy::items_after_statements,
    unreachable_pub,
    clippy::print_stdout
)]
//! Runs against a real MongoDB. Set `MONGODB_URL` and run with `--ignored`.
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use users_server::storage::UserStore;
use users_server::storage::mongo::MongoUserStore;

mod common;

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_round_trip_through_mongodb() {
    let config = common::get_test_config();
    let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::connect(&config.database).await.unwrap());
    users_server::check_store_at_startup(Arc::clone(&store), config.database.connect_timeout()).await.unwrap();

    let app = common::TestApp::spawn_with_store(store, config).await;

    let created = app.create_user("alice", "p1").await;
    let id = created["id"].as_str().unwrap();

    let resp = app.client.get(format!("{}/users/{}", app.server_url, id)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);

    let resp = app.client.get(format!("{}/users/000000000000000000000000", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let listed: Vec<Value> =
        app.client.get(format!("{}/users", app.server_url)).send().await.unwrap().json().await.unwrap();
    assert!(listed.contains(&created));
}
