//! Performance metrics over the ledger.

use crate::types::{LedgerEntry, Metrics};

/// Count resolved threats and average their healing time.
///
/// The mean is 0 for an empty ledger.
pub fn calculate_metrics(ledger: &[LedgerEntry]) -> Metrics {
    let resolved_count = ledger.len();
    let total: f64 = ledger.iter().map(|e| e.healing_time_secs).sum();
    let mean_time_to_recovery_secs = if resolved_count > 0 {
        total / resolved_count as f64
    } else {
        0.0
    };

    Metrics {
        resolved_count,
        mean_time_to_recovery_secs,
    }
}
