use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub const DEFAULT_MAX_EDGES: u64 = 1_000_000;
pub const MAX_EDGES_RANGE: (u64, u64) = (1, 100_000_000);

pub const DEFAULT_DEBOUNCE_SEC: u64 = 5;
pub const DEBOUNCE_RANGE: (u64, u64) = (0, 3600); // 1 hour

/// Validated host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: Option<PathBuf>,
    pub max_edges: usize,
    /// `*` or a comma-separated course list.
    pub courses: String,
    pub auto_reload: bool,
    pub reload_debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: None,
            max_edges: DEFAULT_MAX_EDGES as usize,
            courses: "*".to_string(),
            auto_reload: true,
            reload_debounce: Duration::from_secs(DEFAULT_DEBOUNCE_SEC),
        }
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let max_edges = check_range("max_edges", cli.max_edges, MAX_EDGES_RANGE)?;
        let debounce = check_range(
            "reload_debounce_sec",
            cli.reload_debounce_sec,
            DEBOUNCE_RANGE,
        )?;

        Ok(Self {
            data: cli.data.clone(),
            max_edges: max_edges as usize,
            courses: cli.courses.clone(),
            auto_reload: cli.auto_reload,
            reload_debounce: Duration::from_secs(debounce),
        })
    }
}

fn check_range(name: &'static str, value: u64, (min, max): (u64, u64)) -> Result<u64> {
    if value < min || value > max {
        return Err(CliError::SettingOutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
