use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::Parser;
use rand::Rng;
use reqwest::Client;
use shared::models::{Team, VoteRequest};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info};

/// Synthetic vote traffic with a ramp-up / sustain / ramp-down profile.
#[derive(Parser, Debug)]
#[command(name = "loadgen", about = "Drives synthetic vote traffic at the vote endpoint")]
struct Args {
    /// Vote endpoint to exercise.
    #[arg(long, default_value = "http://localhost:3001/api/vote")]
    url: String,

    /// Peak number of concurrent virtual users.
    #[arg(long, default_value_t = 10_000)]
    users: u64,

    /// Ramp-up (and ramp-down) duration in seconds.
    #[arg(long, default_value_t = 120)]
    ramp_secs: u64,

    /// Sustained full-load duration in seconds.
    #[arg(long, default_value_t = 360)]
    sustain_secs: u64,

    /// Highest acceptable error rate.
    #[arg(long, default_value_t = 0.01)]
    max_error_rate: f64,

    /// Highest acceptable 95th-percentile latency in milliseconds.
    #[arg(long, default_value_t = 500)]
    max_p95_ms: u64,
}

#[derive(Default)]
struct Metrics {
    requests: AtomicU64,
    failures: AtomicU64,
    latencies_us: Mutex<Vec<u64>>,
}

impl Metrics {
    fn record(&self, latency: Duration, ok: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        if let Ok(mut latencies) = self.latencies_us.lock() {
            latencies.push(latency.as_micros() as u64);
        }
    }

    fn error_rate(&self) -> f64 {
        let requests = self.requests.load(Ordering::Relaxed);
        if requests == 0 {
            return 0.0;
        }
        self.failures.load(Ordering::Relaxed) as f64 / requests as f64
    }
}

/// Nearest-rank percentile over a sorted sample, in the sample's unit.
fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

/// Target concurrency at `elapsed`: linear ramps around a sustained plateau,
/// mirroring the original staged profile.
fn target_users(elapsed: Duration, users: u64, ramp: Duration, sustain: Duration) -> u64 {
    let t = elapsed.as_secs_f64();
    let ramp_s = ramp.as_secs_f64();
    let sustain_s = sustain.as_secs_f64();

    if t < ramp_s {
        (users as f64 * t / ramp_s) as u64
    } else if t < ramp_s + sustain_s {
        users
    } else if t < ramp_s + sustain_s + ramp_s {
        let remaining = ramp_s + sustain_s + ramp_s - t;
        (users as f64 * remaining / ramp_s) as u64
    } else {
        0
    }
}

async fn virtual_user(
    vu: u64,
    url: String,
    client: Client,
    metrics: Arc<Metrics>,
    target: watch::Receiver<u64>,
) {
    let mut iteration: u64 = 0;

    loop {
        if *target.borrow() <= vu {
            break;
        }
        iteration += 1;

        let team = Team::ALL[rand::thread_rng().gen_range(0..Team::ALL.len())];
        let started = Instant::now();
        let result = client
            .post(&url)
            // Pseudo-unique address per user/iteration, as the server logs it.
            .header("x-forwarded-for", format!("{vu}.{iteration}"))
            .json(&VoteRequest::for_team(team))
            .send()
            .await;

        let ok = matches!(&result, Ok(response) if response.status().is_success());
        metrics.record(started.elapsed(), ok);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let ramp = Duration::from_secs(args.ramp_secs);
    let sustain = Duration::from_secs(args.sustain_secs);
    let total = ramp + sustain + ramp;

    info!(
        url = %args.url,
        users = args.users,
        "starting load profile: {}s ramp-up, {}s sustain, {}s ramp-down",
        args.ramp_secs, args.sustain_secs, args.ramp_secs
    );

    let metrics = Arc::new(Metrics::default());
    let client = Client::new();
    let (target_tx, target_rx) = watch::channel(0u64);
    let started = Instant::now();
    let mut spawned: u64 = 0;
    let mut handles = Vec::new();

    while started.elapsed() < total {
        let target = target_users(started.elapsed(), args.users, ramp, sustain);
        let _ = target_tx.send(target);

        while spawned < target {
            handles.push(tokio::spawn(virtual_user(
                spawned,
                args.url.clone(),
                client.clone(),
                metrics.clone(),
                target_rx.clone(),
            )));
            spawned += 1;
        }

        sleep(Duration::from_secs(1)).await;
    }

    let _ = target_tx.send(0);
    for handle in handles {
        let _ = handle.await;
    }

    let requests = metrics.requests.load(Ordering::Relaxed);
    let error_rate = metrics.error_rate();
    let mut latencies = metrics
        .latencies_us
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default();
    latencies.sort_unstable();

    let p50 = percentile(&latencies, 50.0) / 1_000;
    let p95 = percentile(&latencies, 95.0) / 1_000;
    let p99 = percentile(&latencies, 99.0) / 1_000;

    info!(requests, "error rate: {:.4}, p50: {p50}ms, p95: {p95}ms, p99: {p99}ms", error_rate);

    let mut failed = false;
    if error_rate >= args.max_error_rate {
        error!("threshold failed: error rate {error_rate:.4} >= {}", args.max_error_rate);
        failed = true;
    }
    if p95 >= args.max_p95_ms {
        error!("threshold failed: p95 {p95}ms >= {}ms", args.max_p95_ms);
        failed = true;
    }

    if failed {
        std::process::exit(1);
    }
}
