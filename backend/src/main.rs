use backend::{
    catchers::{bad_request, internal_error, not_found},
    channel::PusherPublisher,
    config::Config,
    cors::Cors,
    routes::{all_options, cast_vote, AppState},
    store::RedisCounterStore,
};
use rocket::{catchers, routes};
use std::sync::Arc;
use tracing::{info, warn};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("🚀 Starting team vote server");

    let config = Config::load();

    let store = RedisCounterStore::connect(&config.redis_url).await?;
    info!("📦 Connected to counter store at {}", config.redis_url);

    let state = match config.pusher {
        Some(pusher) => {
            info!(cluster = %pusher.cluster, "📡 Broadcasting snapshots on Pusher");
            AppState::with_publisher(Arc::new(store), Arc::new(PusherPublisher::new(pusher)))
        }
        None => {
            warn!("Pusher configuration missing - snapshots will not be broadcast");
            AppState::new(Arc::new(store))
        }
    };

    let _ = rocket::build()
        .attach(Cors)
        .manage(state)
        .mount("/api", routes![cast_vote, all_options])
        .register("/", catchers![bad_request, not_found, internal_error])
        .launch()
        .await?;

    Ok(())
}
