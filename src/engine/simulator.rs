//! Simulation loop.
//!
//! One cycle: pick a threat and a city, bump the attack counter, raise an
//! alert, wait out the "detection", ask the analyst for a defense, wait
//! out the "remediation", then append the result to the ledger. Cycles
//! repeat while auto mode is on.
//!
//! The simulator is the only actor that runs cycles. The session lock is
//! never held across a pause or an analyst call.

use anyhow::Result;
use chrono::{Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::analyst::DefenseAnalyst;
use crate::catalog;
use crate::config::SimulationConfig;
use crate::session::Session;
use crate::types::{LedgerEntry, Notification};

pub struct Simulator {
    session: Arc<Session>,
    analyst: Box<dyn DefenseAnalyst>,
    config: SimulationConfig,
    rng: StdRng,
}

impl Simulator {
    pub fn new(
        session: Arc<Session>,
        analyst: Box<dyn DefenseAnalyst>,
        config: SimulationConfig,
    ) -> Self {
        Self::with_rng(session, analyst, config, StdRng::from_entropy())
    }

    /// Deterministic simulator for tests and replays.
    pub fn with_seed(
        session: Arc<Session>,
        analyst: Box<dyn DefenseAnalyst>,
        config: SimulationConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(session, analyst, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        session: Arc<Session>,
        analyst: Box<dyn DefenseAnalyst>,
        config: SimulationConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            session,
            analyst,
            config,
            rng,
        }
    }

    /// Serve cycle requests until the task is dropped.
    pub async fn run(mut self) {
        info!("Simulator ready, waiting for attack requests");
        loop {
            self.run_pending().await;
            self.session.wait_for_request().await;
        }
    }

    /// Run cycles while the in-progress flag is set. Returns the number of
    /// ledger entries appended.
    ///
    /// In auto mode this only returns once auto mode is switched off.
    pub async fn run_pending(&mut self) -> usize {
        let mut completed = 0;

        loop {
            if !self.session.state.read().await.attack_in_progress {
                break;
            }

            match self.run_cycle().await {
                Ok(entry) => {
                    completed += 1;
                    info!(
                        threat = %entry.threat,
                        location = %entry.location,
                        healing_secs = entry.healing_time_secs,
                        hash = %entry.hash,
                        "Cycle complete"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Cycle failed, continuing");
                }
            }

            let keep_going = self.session.state.write().await.finish_cycle();
            if !keep_going {
                debug!(completed, "Auto mode off, simulator idle");
                break;
            }

            tokio::time::sleep(self.config.auto_restart_pause()).await;
        }

        completed
    }

    /// Execute exactly one detect → analyse → heal cycle.
    pub async fn run_cycle(&mut self) -> Result<LedgerEntry> {
        let location = catalog::random_location(&mut self.rng);
        let threat = catalog::random_threat(&mut self.rng);
        let increment = self
            .rng
            .gen_range(self.config.increment_min..self.config.increment_max);

        let cycle = {
            let mut state = self.session.state.write().await;
            let cycle = state.begin_cycle();
            let point = state.record_attack(increment, Utc::now());
            state.notify(Notification::detected(threat, location));
            state.focus_map(location);
            debug!(cycle, count = point.count, increment, "Attack counter updated");
            cycle
        };

        info!(
            cycle,
            threat = threat.name,
            category = %threat.category,
            location = location.name,
            "Threat detected"
        );

        tokio::time::sleep(self.config.detection_pause()).await;

        let started = Instant::now();
        let defense_strategy = self.analyst.analyse(threat).await?;
        self.session.state.write().await.notify(Notification::defending());

        tokio::time::sleep(self.config.remediation_pause()).await;

        let healing_time_secs = round_hundredths(started.elapsed().as_secs_f64());

        let now = Local::now();
        let entry = LedgerEntry {
            time: now.format("%H:%M:%S").to_string(),
            threat: threat.name.to_string(),
            location: location.name.to_string(),
            defense_strategy,
            healing_time_secs,
            hash: short_hash(&now.format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
        };

        {
            let mut state = self.session.state.write().await;
            state.notify(Notification::healed(healing_time_secs));
            state.append_ledger(entry.clone());
        }

        Ok(entry)
    }
}

/// First eight hex characters of the SHA-256 of `input`, then `...`.
pub fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let prefix: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
    format!("{prefix}...")
}

fn round_hundredths(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
