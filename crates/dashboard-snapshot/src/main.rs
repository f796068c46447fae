//! dashboard-snapshot: derive every dashboard panel from JSON inputs.
//!
//! Reads an events array plus optional predictions and narratives arrays and
//! prints the derived snapshot as pretty JSON on stdout.
//!
//! Usage:
//!   cargo run -p dashboard-snapshot -- --events events.json
//!   cargo run -p dashboard-snapshot -- --events events.json --predictions preds.json --sort urgency
//!   cargo run -p dashboard-snapshot -- --events events.json --narratives narratives.json --top 3
//!   cargo run -p dashboard-snapshot -- --schema

use anyhow::{Context, Result};
use chrono::Utc;

mod config;
mod schema;
mod snapshot;

use config::SnapshotConfig;
use schema::SnapshotApiDoc;
use snapshot::{DashboardSnapshot, SnapshotInputs};
use utoipa::OpenApi;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    // Logs go to stderr so stdout stays valid JSON
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--schema") {
        let rendered = SnapshotApiDoc::openapi()
            .to_pretty_json()
            .context("failed to render schema")?;
        println!("{rendered}");
        return Ok(());
    }

    let config = SnapshotConfig::from_env()?.with_args(&args)?;
    tracing::info!(
        events = %config.events_path.display(),
        sort = %config.sort_mode,
        top = config.top_movers,
        "building dashboard snapshot"
    );

    let inputs = SnapshotInputs::load(&config)?;
    let snapshot = DashboardSnapshot::derive(&inputs, &config, Utc::now());

    let rendered = serde_json::to_string_pretty(&snapshot).context("failed to render snapshot")?;
    println!("{rendered}");

    Ok(())
}
