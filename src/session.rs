//! In-memory session state and the two control actions.
//!
//! `SessionState` is plain data mutated synchronously. `Session` wraps it
//! for sharing between the simulator task and the dashboard handlers and
//! carries the wake-up signal the controls use to start a cycle.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tokio::sync::{Notify, RwLock};
use tracing::info;

use crate::config::SimulationConfig;
use crate::engine::metrics::calculate_metrics;
use crate::types::{
    ControlError, CounterPoint, LedgerEntry, Location, MapView, Metrics, Notification,
};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionState {
    pub ledger: Vec<LedgerEntry>,
    pub attack_in_progress: bool,
    pub auto_mode: bool,
    pub attack_counts: VecDeque<CounterPoint>,
    pub current_attack_count: f64,
    pub map: MapView,
    pub notifications: VecDeque<Notification>,
    pub cycles_started: u64,
    /// Set while the simulator is between detection and ledger append.
    pub cycle_running: bool,
    series_window: usize,
    notification_capacity: usize,
}

impl SessionState {
    pub fn new(series_window: usize, notification_capacity: usize) -> Self {
        Self {
            ledger: Vec::new(),
            attack_in_progress: false,
            auto_mode: false,
            attack_counts: VecDeque::with_capacity(series_window),
            current_attack_count: 0.0,
            map: MapView::india(),
            notifications: VecDeque::with_capacity(notification_capacity),
            cycles_started: 0,
            cycle_running: false,
            series_window,
            notification_capacity,
        }
    }

    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self::new(cfg.series_window, cfg.notification_capacity)
    }

    // -- Controls --

    /// Request a single manual cycle.
    pub fn launch_manual(&mut self) -> Result<(), ControlError> {
        if self.auto_mode {
            return Err(ControlError::AutoModeActive);
        }
        if self.attack_in_progress || self.cycle_running {
            return Err(ControlError::AttackInProgress);
        }
        self.attack_in_progress = true;
        Ok(())
    }

    /// Turn auto mode on and request a cycle immediately.
    pub fn enable_auto(&mut self) {
        self.auto_mode = true;
        self.attack_in_progress = true;
    }

    /// Turn auto mode off. A cycle already running still completes.
    pub fn disable_auto(&mut self) {
        self.auto_mode = false;
        self.attack_in_progress = false;
    }

    // -- Simulation bookkeeping --

    /// Mark a cycle as started and return its 1-based number.
    pub fn begin_cycle(&mut self) -> u64 {
        self.cycle_running = true;
        self.cycles_started += 1;
        self.cycles_started
    }

    /// Add `increment` to the running counter and push a chart point,
    /// keeping only the most recent `series_window` points.
    pub fn record_attack(&mut self, increment: f64, at: DateTime<Utc>) -> CounterPoint {
        self.current_attack_count += increment;
        if self.current_attack_count < 0.0 {
            self.current_attack_count = 0.0;
        }

        let point = CounterPoint {
            timestamp: at,
            count: self.current_attack_count,
        };
        self.attack_counts.push_back(point);
        while self.attack_counts.len() > self.series_window {
            self.attack_counts.pop_front();
        }
        point
    }

    pub fn focus_map(&mut self, location: &Location) {
        self.map = MapView::focus(location);
    }

    pub fn notify(&mut self, notification: Notification) {
        info!(level = ?notification.level, text = %notification.message, "Notification");
        self.notifications.push_back(notification);
        while self.notifications.len() > self.notification_capacity {
            self.notifications.pop_front();
        }
    }

    pub fn append_ledger(&mut self, entry: LedgerEntry) {
        self.ledger.push(entry);
    }

    /// Decide what happens after a cycle: keep going in auto mode,
    /// otherwise clear the in-progress flag. Returns whether to continue.
    pub fn finish_cycle(&mut self) -> bool {
        self.cycle_running = false;
        if self.auto_mode {
            true
        } else {
            self.attack_in_progress = false;
            false
        }
    }

    pub fn metrics(&self) -> Metrics {
        calculate_metrics(&self.ledger)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Shared session
// ---------------------------------------------------------------------------

/// Session state shared by the simulator task and the dashboard.
pub struct Session {
    pub state: RwLock<SessionState>,
    wake: Notify,
}

impl Session {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: RwLock::new(state),
            wake: Notify::new(),
        }
    }

    pub async fn launch_manual(&self) -> Result<(), ControlError> {
        self.state.write().await.launch_manual()?;
        info!("Manual attack launched");
        self.wake.notify_one();
        Ok(())
    }

    pub async fn set_auto_mode(&self, enabled: bool) {
        {
            let mut state = self.state.write().await;
            if enabled {
                state.enable_auto();
            } else {
                state.disable_auto();
            }
        }
        info!(enabled, "Auto mode toggled");
        if enabled {
            self.wake.notify_one();
        }
    }

    /// Wait until a control action asks for a cycle.
    pub async fn wait_for_request(&self) {
        self.wake.notified().await;
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}
