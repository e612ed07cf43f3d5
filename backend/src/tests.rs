use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use rocket::routes;

use shared::models::{Team, VoteSnapshot};
use shared::ErrorResponse;

use crate::channel::SnapshotPublisher;
use crate::error::AppError;
use crate::routes::{all_options, cast_vote, AppState};
use crate::store::CounterStore;

/// In-memory double for the Redis store. `fetch_add` gives the same
/// no-lost-updates guarantee the real store gets from HINCRBY.
#[derive(Default)]
struct MemoryCounterStore {
    pradhan: AtomicI64,
    banrakas: AtomicI64,
}

impl MemoryCounterStore {
    fn cell(&self, team: Team) -> &AtomicI64 {
        match team {
            Team::Pradhan => &self.pradhan,
            Team::Banrakas => &self.banrakas,
        }
    }
}

#[rocket::async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, team: Team) -> Result<(), AppError> {
        self.cell(team).fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn snapshot(&self) -> Result<VoteSnapshot, AppError> {
        Ok(VoteSnapshot {
            pradhan: self.pradhan.load(Ordering::SeqCst),
            banrakas: self.banrakas.load(Ordering::SeqCst),
        })
    }
}

struct FailingStore;

#[rocket::async_trait]
impl CounterStore for FailingStore {
    async fn increment(&self, _team: Team) -> Result<(), AppError> {
        Err(AppError::Store(redis::RedisError::from(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store down"),
        )))
    }

    async fn snapshot(&self) -> Result<VoteSnapshot, AppError> {
        Err(AppError::Store(redis::RedisError::from(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store down"),
        )))
    }
}

#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<VoteSnapshot>>,
}

impl RecordingPublisher {
    fn published(&self) -> Vec<VoteSnapshot> {
        self.published.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl SnapshotPublisher for RecordingPublisher {
    async fn publish(&self, snapshot: &VoteSnapshot) -> Result<(), AppError> {
        self.published.lock().unwrap().push(*snapshot);
        Ok(())
    }
}

struct FailingPublisher;

#[rocket::async_trait]
impl SnapshotPublisher for FailingPublisher {
    async fn publish(&self, _snapshot: &VoteSnapshot) -> Result<(), AppError> {
        Err(AppError::Publish("channel unreachable".into()))
    }
}

fn harness() -> (Arc<MemoryCounterStore>, Arc<RecordingPublisher>, rocket::Rocket<rocket::Build>) {
    let store = Arc::new(MemoryCounterStore::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let rocket = rocket::build()
        .manage(AppState::with_publisher(store.clone(), publisher.clone()))
        .mount("/api", routes![cast_vote, all_options]);

    (store, publisher, rocket)
}

async fn vote<'c>(client: &'c Client, body: &str) -> rocket::local::asynchronous::LocalResponse<'c> {
    client
        .post("/api/vote")
        .header(ContentType::JSON)
        .header(Header::new("x-forwarded-for", "203.0.113.7"))
        .body(body.to_string())
        .dispatch()
        .await
}

#[rocket::async_test]
async fn test_first_vote_returns_one_zero() {
    let (_store, publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    let response = vote(&client, r#"{"team":"pradhan"}"#).await;
    assert_eq!(response.status(), Status::Ok);

    let snapshot = response.into_json::<VoteSnapshot>().await.unwrap();
    assert_eq!(snapshot, VoteSnapshot { pradhan: 1, banrakas: 0 });

    // The broadcast carries the same snapshot the voter received.
    assert_eq!(publisher.published(), vec![snapshot]);
}

#[rocket::async_test]
async fn test_invalid_team_is_rejected_without_side_effects() {
    let (store, publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    let response = vote(&client, r#"{"team":"sachiv"}"#).await;
    assert_eq!(response.status(), Status::BadRequest);

    let body = response.into_json::<ErrorResponse>().await.unwrap();
    assert_eq!(body.error, "Invalid team");

    assert_eq!(store.snapshot().await.unwrap(), VoteSnapshot::default());
    assert!(publisher.published().is_empty());
}

#[rocket::async_test]
async fn test_query_only_reads_without_mutating() {
    let (store, publisher, rocket) = harness();
    store.increment(Team::Banrakas).await.unwrap();
    let client = Client::untracked(rocket).await.unwrap();

    // Absent team and empty-string team are both query-only.
    for body in ["{}", r#"{"team":""}"#] {
        let response = vote(&client, body).await;
        assert_eq!(response.status(), Status::Ok);
        let snapshot = response.into_json::<VoteSnapshot>().await.unwrap();
        assert_eq!(snapshot, VoteSnapshot { pradhan: 0, banrakas: 1 });
    }

    assert!(publisher.published().is_empty());
}

#[rocket::async_test]
async fn test_malformed_body_is_a_server_error() {
    let (store, publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    // Not-JSON bodies belong to the generic catch-all, not the
    // invalid-team rejection.
    let response = vote(&client, "{not json").await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body = response.into_json::<ErrorResponse>().await.unwrap();
    assert_eq!(body.error, "Server error");

    assert_eq!(store.snapshot().await.unwrap(), VoteSnapshot::default());
    assert!(publisher.published().is_empty());
}

#[rocket::async_test]
async fn test_vote_without_content_type_still_counts() {
    let (store, _publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    let response = client
        .post("/api/vote")
        .body(r#"{"team":"pradhan"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(store.snapshot().await.unwrap().pradhan, 1);
}

#[rocket::async_test]
async fn test_sequential_votes_each_count() {
    let (store, _publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    for _ in 0..5 {
        let response = vote(&client, r#"{"team":"banrakas"}"#).await;
        assert_eq!(response.status(), Status::Ok);
    }

    assert_eq!(store.snapshot().await.unwrap().banrakas, 5);
}

#[rocket::async_test]
async fn test_concurrent_votes_lose_no_updates() {
    let (store, _publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    let requests = (0..16).map(|_| vote(&client, r#"{"team":"banrakas"}"#));
    for response in join_all(requests).await {
        assert_eq!(response.status(), Status::Ok);
    }

    assert_eq!(store.snapshot().await.unwrap().banrakas, 16);
}

#[rocket::async_test]
async fn test_each_vote_broadcasts_its_own_snapshot() {
    let (_store, publisher, rocket) = harness();
    let client = Client::untracked(rocket).await.unwrap();

    let first = vote(&client, r#"{"team":"pradhan"}"#).await;
    let first = first.into_json::<VoteSnapshot>().await.unwrap();
    let second = vote(&client, r#"{"team":"banrakas"}"#).await;
    let second = second.into_json::<VoteSnapshot>().await.unwrap();

    assert_eq!(publisher.published(), vec![first, second]);
}

#[rocket::async_test]
async fn test_publish_failure_does_not_fail_the_vote() {
    let store = Arc::new(MemoryCounterStore::default());
    let rocket = rocket::build()
        .manage(AppState::with_publisher(store.clone(), Arc::new(FailingPublisher)))
        .mount("/api", routes![cast_vote]);
    let client = Client::untracked(rocket).await.unwrap();

    let response = vote(&client, r#"{"team":"pradhan"}"#).await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(store.snapshot().await.unwrap().pradhan, 1);
}

#[rocket::async_test]
async fn test_store_failure_maps_to_server_error() {
    let rocket = rocket::build()
        .manage(AppState::new(Arc::new(FailingStore)))
        .mount("/api", routes![cast_vote]);
    let client = Client::untracked(rocket).await.unwrap();

    let response = vote(&client, r#"{"team":"pradhan"}"#).await;
    assert_eq!(response.status(), Status::InternalServerError);

    let body = response.into_json::<ErrorResponse>().await.unwrap();
    assert_eq!(body.error, "Server error");
}
