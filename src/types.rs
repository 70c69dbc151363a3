//! Shared types for the AUMVION simulator.
//!
//! These types form the data model used across the catalog, session,
//! engine, and dashboard modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// Threat category. Drives which defense playbook the analyst picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatCategory {
    #[serde(rename = "Web Attack")]
    WebAttack,
    #[serde(rename = "Network Attack")]
    NetworkAttack,
    #[serde(rename = "Advanced Attack")]
    AdvancedAttack,
    #[serde(rename = "Social Engineering")]
    SocialEngineering,
    #[serde(rename = "Internal Threat")]
    InternalThreat,
    #[serde(rename = "Malware Attack")]
    MalwareAttack,
}

impl ThreatCategory {
    pub const ALL: &'static [ThreatCategory] = &[
        ThreatCategory::WebAttack,
        ThreatCategory::NetworkAttack,
        ThreatCategory::AdvancedAttack,
        ThreatCategory::SocialEngineering,
        ThreatCategory::InternalThreat,
        ThreatCategory::MalwareAttack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatCategory::WebAttack => "Web Attack",
            ThreatCategory::NetworkAttack => "Network Attack",
            ThreatCategory::AdvancedAttack => "Advanced Attack",
            ThreatCategory::SocialEngineering => "Social Engineering",
            ThreatCategory::InternalThreat => "Internal Threat",
            ThreatCategory::MalwareAttack => "Malware Attack",
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated threat from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threat {
    pub name: &'static str,
    pub category: ThreatCategory,
    pub description: &'static str,
}

impl fmt::Display for Threat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// A city the simulated attacks "originate" from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One resolved incident in the threat & defense ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
    pub threat: String,
    pub location: String,
    pub defense_strategy: String,
    /// Rounded to two decimals, as displayed.
    pub healing_time_secs: f64,
    /// Eight hex characters followed by `...`.
    pub hash: String,
}

impl LedgerEntry {
    /// Column headings of the ledger table, in display order.
    pub const COLUMNS: [&'static str; 6] = [
        "Time",
        "Threat",
        "Location",
        "Defense Strategy",
        "Healing Time (s)",
        "Hash",
    ];
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} from {} healed in {:.2}s ({})",
            self.time, self.threat, self.location, self.healing_time_secs, self.hash
        )
    }
}

/// One point of the live threat monitor chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterPoint {
    pub timestamp: DateTime<Utc>,
    pub count: f64,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Stage of a cycle a notification was raised at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Alert,
    Defending,
    Healed,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Alert => write!(f, "🟥"),
            NotificationLevel::Defending => write!(f, "🟨"),
            NotificationLevel::Healed => write!(f, "🟩"),
        }
    }
}

/// A transient dashboard message ("toast").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: DateTime<Utc>,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }

    pub fn detected(threat: &Threat, location: &Location) -> Self {
        Self::new(
            NotificationLevel::Alert,
            format!("ALERT! {} detected from {}!", threat.name, location.name),
        )
    }

    pub fn defending() -> Self {
        Self::new(NotificationLevel::Defending, "AUMVION AI is Defending...")
    }

    pub fn healed(healing_time_secs: f64) -> Self {
        Self::new(
            NotificationLevel::Healed,
            format!("System Healed! Recovery Time: {healing_time_secs:.2}s"),
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.message)
    }
}

// ---------------------------------------------------------------------------
// Map & metrics
// ---------------------------------------------------------------------------

/// What the threat map is centred on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// City name when focused on a threat, `None` for the default view.
    pub label: Option<String>,
}

impl MapView {
    /// Country-wide view shown before any threat has been simulated.
    pub fn india() -> Self {
        Self {
            latitude: 20.5937,
            longitude: 78.9629,
            zoom: 4,
            label: None,
        }
    }

    pub fn focus(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            zoom: 6,
            label: Some(location.name.to_string()),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::india()
    }
}

/// The two summary tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// "Threats Automated".
    pub resolved_count: usize,
    /// "Avg. Time to Recovery", seconds.
    pub mean_time_to_recovery_secs: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Rejections of the user-facing control actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("Auto mode is active; disable it before launching a manual attack")]
    AutoModeActive,

    #[error("An attack simulation is already in progress")]
    AttackInProgress,
}

impl ControlError {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ControlError::AutoModeActive => "auto_mode_active",
            ControlError::AttackInProgress => "attack_in_progress",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
