mod common;

use coin_toss::coin::ScriptedCoin;
use coin_toss::runner::Pacing;
use coin_toss::{AppState, MemoryStore};
use common::TestServer;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Five paced flips take about 400ms with these delays.
async fn paced_server() -> TestServer {
    let pacing = Pacing {
        enabled: true,
        threshold: 20,
        show: Duration::from_millis(40),
        settle: Duration::from_millis(40),
    };
    let state = AppState::load(
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedCoin::split(3, 2)),
        pacing,
    )
    .await;
    TestServer::in_process(state).await
}

async fn wait_for(server: &TestServer, client: &Client, flipping: bool) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while server.state(client).await.is_flipping != flipping {
        assert!(Instant::now() < deadline, "is_flipping never became {flipping}");
        sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn http_reset_during_flip_is_a_conflict() {
    let server = paced_server().await;
    let client = Client::new();
    server
        .post_ok(&client, "/api/guess", json!({ "side": "heads" }))
        .await;

    let flip = {
        let client = client.clone();
        let url = server.url("/api/flip");
        tokio::spawn(async move { client.post(url).json(&json!({ "times": 5 })).send().await })
    };
    wait_for(&server, &client, true).await;

    let response = server.post(&client, "/api/reset", json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        response.text().await.unwrap(),
        "A flip is in progress; reset when it finishes."
    );

    let finished = flip.await.unwrap().unwrap();
    assert!(finished.status().is_success());
    let snapshot = server.state(&client).await;
    assert_eq!((snapshot.heads, snapshot.tails, snapshot.total), (3, 2, 5));
    assert_eq!(snapshot.guess.as_deref(), Some("heads"));
}

#[tokio::test]
async fn http_flip_finishes_after_client_hangs_up() {
    let server = paced_server().await;
    let client = Client::new();
    server
        .post_ok(&client, "/api/guess", json!({ "side": "tails" }))
        .await;

    let impatient = Client::builder()
        .timeout(Duration::from_millis(60))
        .build()
        .unwrap();
    let cut_off = impatient
        .post(server.url("/api/flip"))
        .json(&json!({ "times": 5 }))
        .send()
        .await;
    assert!(cut_off.is_err(), "paced flip answered before the timeout");

    wait_for(&server, &client, false).await;
    let snapshot = server.state(&client).await;
    assert_eq!(snapshot.total, 5);
    assert_eq!(snapshot.correct, 2);

    let reset = server.post_ok(&client, "/api/reset", json!({})).await;
    assert_eq!(reset.total, 0);
}
