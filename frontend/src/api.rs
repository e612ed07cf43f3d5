use std::future::Future;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::models::{Team, VoteRequest, VoteSnapshot};
use shared::ErrorResponse;

use crate::config::CONFIG;

pub const FETCH_ATTEMPTS: u32 = 3;
pub const FETCH_RETRY_DELAY_MS: u32 = 2_000;

fn vote_url() -> String {
    format!("{}/vote", CONFIG.api_base_url)
}

/// Query-only call: reads the current snapshot without casting a vote.
pub async fn fetch_snapshot() -> Result<VoteSnapshot, String> {
    send(&VoteRequest::query_only()).await
}

/// The channel never replays missed events, so the initial load and the
/// degraded path poll with a bounded fixed-delay retry loop.
pub async fn fetch_snapshot_with_retries() -> Result<VoteSnapshot, String> {
    retry(FETCH_ATTEMPTS, fetch_snapshot, || {
        TimeoutFuture::new(FETCH_RETRY_DELAY_MS)
    })
    .await
}

/// Runs `op` up to `attempts` times with a fixed delay between failures,
/// returning the last error once every attempt has failed.
async fn retry<T, Op, Fut, Delay, DelayFut>(
    attempts: u32,
    mut op: Op,
    delay: Delay,
) -> Result<T, String>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
    Delay: Fn() -> DelayFut,
    DelayFut: Future<Output = ()>,
{
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                last_error = error;
                if attempt < attempts {
                    delay().await;
                }
            }
        }
    }

    Err(last_error)
}

pub async fn submit_vote(team: Team) -> Result<VoteSnapshot, String> {
    send(&VoteRequest::for_team(team)).await
}

async fn send(request: &VoteRequest) -> Result<VoteSnapshot, String> {
    let response = Request::post(&vote_url())
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        response
            .json::<VoteSnapshot>()
            .await
            .map_err(|_| "Failed to parse vote counts".to_string())
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("HTTP error: {}", response.status()));
        Err(error)
    }
}
