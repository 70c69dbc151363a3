//! Canned playbook analyst.
//!
//! Two categories get a fixed response. Every other category gets a
//! templated sentence built from the category and the first clause of
//! the threat description.

use anyhow::Result;
use async_trait::async_trait;

use super::DefenseAnalyst;
use crate::types::{Threat, ThreatCategory};

pub const ADVANCED_ATTACK_DEFENSE: &str = "AI Heuristic Analysis initiated. Automated code and binary diversification deployed to neutralize the exploit.";

pub const NETWORK_ATTACK_DEFENSE: &str = "Autonomous traffic shaping and network isolation activated. Geo-blocking of source IPs and a clean instance redeployed.";

/// Build the defense text for a threat.
pub fn playbook_defense(threat: &Threat) -> String {
    match threat.category {
        ThreatCategory::AdvancedAttack => ADVANCED_ATTACK_DEFENSE.to_string(),
        ThreatCategory::NetworkAttack => NETWORK_ATTACK_DEFENSE.to_string(),
        category => {
            let first_clause = threat.description.split('.').next().unwrap_or_default();
            format!(
                "Based on behavioral patterns, the AI platform has identified a {category} threat. \
                 A playbook was autonomously executed. Defense: {first_clause}."
            )
        }
    }
}

/// Deterministic analyst backed by [`playbook_defense`].
#[derive(Debug, Default, Clone)]
pub struct PlaybookAnalyst;

impl PlaybookAnalyst {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DefenseAnalyst for PlaybookAnalyst {
    async fn analyse(&self, threat: &Threat) -> Result<String> {
        Ok(playbook_defense(threat))
    }

    fn name(&self) -> &str {
        "playbook"
    }
}
