use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shared::models::{Team, VoteSnapshot};

use crate::error::AppError;

/// Redis hash holding both counters.
pub const VOTES_KEY: &str = "votes";

/// Seam over the counter store so the routes can be exercised against an
/// in-memory double.
#[rocket::async_trait]
pub trait CounterStore: Send + Sync {
    /// Adds one vote for `team`. Must be a single atomic operation at the
    /// store; a read-modify-write here would drop concurrent votes.
    async fn increment(&self, team: Team) -> Result<(), AppError>;

    /// Reads both counters. The two reads are not required to be atomic with
    /// each other or with any in-flight increment.
    async fn snapshot(&self) -> Result<VoteSnapshot, AppError>;
}

pub struct RedisCounterStore {
    connection: ConnectionManager,
}

impl RedisCounterStore {
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;

        Ok(Self { connection })
    }
}

#[rocket::async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, team: Team) -> Result<(), AppError> {
        let mut connection = self.connection.clone();
        let _: i64 = connection.hincr(VOTES_KEY, team.as_str(), 1).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<VoteSnapshot, AppError> {
        let mut connection = self.connection.clone();
        // Missing fields read as nil until the first HINCRBY creates them.
        let pradhan: Option<i64> = connection.hget(VOTES_KEY, Team::Pradhan.as_str()).await?;
        let banrakas: Option<i64> = connection.hget(VOTES_KEY, Team::Banrakas.as_str()).await?;

        Ok(VoteSnapshot {
            pradhan: pradhan.unwrap_or(0),
            banrakas: banrakas.unwrap_or(0),
        })
    }
}
