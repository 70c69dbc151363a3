//! Defense analysis.
//!
//! Defines the `DefenseAnalyst` trait. The simulator hands every detected
//! threat to an analyst and records whatever defense text comes back.

pub mod playbook;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Threat;

/// Abstraction over whatever produces the "Defense Strategy" column.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefenseAnalyst: Send + Sync {
    /// Produce the defense narrative for a detected threat.
    async fn analyse(&self, threat: &Threat) -> Result<String>;

    /// Analyst identifier for logging.
    fn name(&self) -> &str;
}
