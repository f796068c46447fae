use anyhow::{Context, Result};
use event_feed::{SortMode, DEFAULT_TOP_MOVERS};
use std::env;
use std::path::PathBuf;

/// Input locations and presentation knobs for one snapshot run
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotConfig {
    pub events_path: PathBuf,
    pub predictions_path: Option<PathBuf>,
    pub narratives_path: Option<PathBuf>,
    pub sort_mode: SortMode,
    pub top_movers: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("events.json"),
            predictions_path: None,
            narratives_path: None,
            sort_mode: SortMode::default(),
            top_movers: DEFAULT_TOP_MOVERS,
        }
    }
}

/// Value following `name`, e.g. `--top 3`
fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
}

impl SnapshotConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            events_path: env::var("SENTINEL_EVENTS_PATH")
                .unwrap_or_else(|_| "events.json".to_string())
                .into(),
            predictions_path: env::var("SENTINEL_PREDICTIONS_PATH").ok().map(PathBuf::from),
            narratives_path: env::var("SENTINEL_NARRATIVES_PATH").ok().map(PathBuf::from),
            sort_mode: env::var("SENTINEL_SORT_MODE")
                .unwrap_or_else(|_| "timestamp".to_string())
                .parse::<SortMode>()
                .context("invalid SENTINEL_SORT_MODE")?,
            top_movers: env::var("SENTINEL_TOP_MOVERS")
                .unwrap_or_else(|_| DEFAULT_TOP_MOVERS.to_string())
                .parse::<usize>()
                .context("invalid SENTINEL_TOP_MOVERS")?,
        };

        Ok(config)
    }

    /// Command-line flags take precedence over the environment
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        if let Some(path) = flag_value(args, "--events") {
            self.events_path = PathBuf::from(path);
        }
        if let Some(path) = flag_value(args, "--predictions") {
            self.predictions_path = Some(PathBuf::from(path));
        }
        if let Some(path) = flag_value(args, "--narratives") {
            self.narratives_path = Some(PathBuf::from(path));
        }
        if let Some(mode) = flag_value(args, "--sort") {
            self.sort_mode = mode.parse::<SortMode>().context("invalid --sort")?;
        }
        if let Some(n) = flag_value(args, "--top") {
            self.top_movers = n.parse::<usize>().context("invalid --top")?;
        }

        Ok(self)
    }
}
