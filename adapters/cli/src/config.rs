use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use typer_core::{Money, RewardSchedule};
use typer_system_items::WorkerTuning;
use typer_world::{LevelConfig, MarkerPolicy};

/// Simulation settings read from an optional TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) round: RoundSection,
    pub(crate) worker: WorkerSection,
    pub(crate) simulation: SimulationSection,
}

/// `[round]` table: level construction and word supply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RoundSection {
    pub(crate) seed: u64,
    pub(crate) pool_size: usize,
    pub(crate) starting_currency: u64,
    pub(crate) reward_per_character: u64,
    pub(crate) marker_policy: MarkerPolicy,
}

impl Default for RoundSection {
    fn default() -> Self {
        Self {
            seed: 0x7e7e_2024,
            pool_size: 12,
            starting_currency: 0,
            reward_per_character: 10,
            marker_policy: MarkerPolicy::Clear,
        }
    }
}

/// `[worker]` table: goroutine timing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorkerSection {
    pub(crate) base_wait_ms: u64,
    pub(crate) jitter_range_ms: i64,
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            base_wait_ms: 1000,
            jitter_range_ms: 500,
        }
    }
}

/// `[simulation]` table: headless run length and autopilot pacing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationSection {
    pub(crate) frames: u32,
    pub(crate) frame_ms: u64,
    pub(crate) typing_interval_frames: u32,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            frames: 3_600,
            frame_ms: 16,
            typing_interval_frames: 12,
        }
    }
}

impl Config {
    /// Loads the file at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config from {}", path.display()))
    }

    /// Parses TOML contents; missing tables and keys take their defaults.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Level construction parameters.
    pub(crate) fn level_config(&self) -> LevelConfig {
        LevelConfig::new(
            self.round.seed,
            Money::new(self.round.starting_currency),
            RewardSchedule::new(Money::new(self.round.reward_per_character)),
            self.round.marker_policy,
        )
    }

    /// Worker timing; a negative jitter range is clamped to zero.
    pub(crate) fn worker_tuning(&self) -> WorkerTuning {
        let jitter_ms = u64::try_from(self.worker.jitter_range_ms).unwrap_or_else(|_| {
            warn!(
                "jitter_range_ms {} is negative; using 0",
                self.worker.jitter_range_ms
            );
            0
        });
        WorkerTuning::new(
            Duration::from_millis(self.worker.base_wait_ms),
            Duration::from_millis(jitter_ms),
        )
    }

    /// Simulated time that elapses per frame.
    pub(crate) fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.simulation.frame_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.worker_tuning(), WorkerTuning::default());
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = Config::parse(
            r#"
            [round]
            seed = 99
            marker_policy = "retain"

            [worker]
            base_wait_ms = 250
            "#,
        )
        .expect("partial config parses");

        assert_eq!(config.round.seed, 99);
        assert_eq!(config.round.marker_policy, MarkerPolicy::Retain);
        assert_eq!(config.round.pool_size, RoundSection::default().pool_size);
        assert_eq!(
            config.worker_tuning(),
            WorkerTuning::new(Duration::from_millis(250), Duration::from_millis(500))
        );
    }

    #[test]
    fn negative_jitter_is_clamped_to_zero() {
        let config = Config::parse("[worker]\njitter_range_ms = -40\n").expect("parses");
        assert_eq!(config.worker_tuning().jitter_range(), Duration::ZERO);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Config::parse("[round]\nspeed = 3\n").expect_err("unknown key");
        assert!(format!("{error:#}").contains("speed"));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Config::load(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file");
        assert!(error.to_string().contains("/definitely/not/here.toml"));
    }
}
