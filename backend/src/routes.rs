use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{post, State};
use std::sync::Arc;
use tracing::{debug, error};

use shared::models::{VoteRequest, VoteSnapshot};
use shared::ClientInfo;

use crate::channel::SnapshotPublisher;
use crate::error::AppError;
use crate::store::CounterStore;

pub struct AppState {
    pub store: Arc<dyn CounterStore>,
    pub publisher: Option<Arc<dyn SnapshotPublisher>>,
}

impl AppState {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            store,
            publisher: None,
        }
    }

    pub fn with_publisher(
        store: Arc<dyn CounterStore>,
        publisher: Arc<dyn SnapshotPublisher>,
    ) -> Self {
        Self {
            store,
            publisher: Some(publisher),
        }
    }
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

/// The single endpoint. With a team: validate, increment, read back,
/// broadcast, respond. Without one: just read back and respond.
#[post("/vote", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: Result<Json<VoteRequest>, rocket::serde::json::Error<'_>>,
    client: ClientInfo,
) -> Result<Json<VoteSnapshot>, AppError> {
    // A body that is not JSON at all falls under the generic server error,
    // not the invalid-team rejection.
    let request = match request {
        Ok(request) => request.into_inner(),
        Err(e) => {
            debug!(client = %client.addr, "unreadable vote body: {e:?}");
            return Err(AppError::MalformedBody);
        }
    };
    debug!(team = ?request.team, client = %client.addr, "vote request");

    let team = match request.team() {
        Ok(team) => team,
        Err(unknown) => {
            debug!(%unknown, "rejected vote");
            return Err(AppError::InvalidTeam);
        }
    };

    if let Some(team) = team {
        state.store.increment(team).await.map_err(|e| {
            error!("failed to record vote for {team}: {e}");
            e
        })?;
        debug!(%team, "vote recorded");
    }

    let snapshot = state.store.snapshot().await.map_err(|e| {
        error!("failed to read counters: {e}");
        e
    })?;

    // The increment is already committed, so a failed broadcast only gets
    // logged; the voter still receives a success.
    if team.is_some() {
        if let Some(publisher) = &state.publisher {
            if let Err(e) = publisher.publish(&snapshot).await {
                error!("failed to broadcast snapshot: {e}");
            }
        }
    }

    Ok(Json(snapshot))
}
