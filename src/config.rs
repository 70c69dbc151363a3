//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field carries a default, so a partial file (or none at all)
//! still yields a runnable demo.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Pacing and sizing of the simulation loop.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub detection_pause_ms: u64,
    pub remediation_pause_ms: u64,
    pub auto_restart_pause_ms: u64,
    pub series_window: usize,
    /// Lower bound (inclusive) of the per-cycle counter increment.
    pub increment_min: f64,
    /// Upper bound (exclusive) of the per-cycle counter increment.
    pub increment_max: f64,
    pub notification_capacity: usize,
    /// Enable auto mode at startup.
    pub auto_start: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            detection_pause_ms: 1000,
            remediation_pause_ms: 1500,
            auto_restart_pause_ms: 1000,
            series_window: 15,
            increment_min: 0.5,
            increment_max: 1.5,
            notification_capacity: 50,
            auto_start: false,
        }
    }
}

impl SimulationConfig {
    pub fn detection_pause(&self) -> Duration {
        Duration::from_millis(self.detection_pause_ms)
    }

    pub fn remediation_pause(&self) -> Duration {
        Duration::from_millis(self.remediation_pause_ms)
    }

    pub fn auto_restart_pause(&self) -> Duration {
        Duration::from_millis(self.auto_restart_pause_ms)
    }

    /// Same sizing, no pauses. Used by tests.
    pub fn instant() -> Self {
        Self {
            detection_pause_ms: 0,
            remediation_pause_ms: 0,
            auto_restart_pause_ms: 0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.series_window == 0 {
            bail!("simulation.series_window must be at least 1");
        }
        if !(sim.increment_min >= 0.0 && sim.increment_min < sim.increment_max) {
            bail!(
                "simulation increment range [{}, {}) is invalid",
                sim.increment_min,
                sim.increment_max
            );
        }
        Ok(())
    }
}
