//! Fixed threat and location catalogs.
//!
//! Both tables are immutable and drawn from uniformly: no weighting and
//! no exclusion of repeats between cycles.

use rand::Rng;

use crate::types::{Location, Threat, ThreatCategory};

pub static THREATS: [Threat; 6] = [
    Threat {
        name: "SQL Injection",
        category: ThreatCategory::WebAttack,
        description: "Attacker tried to manipulate a database query.",
    },
    Threat {
        name: "DDoS Attack",
        category: ThreatCategory::NetworkAttack,
        description: "Massive traffic flood to overwhelm the server.",
    },
    Threat {
        name: "Zero-Day Exploit",
        category: ThreatCategory::AdvancedAttack,
        description: "Attack using a previously unknown software vulnerability.",
    },
    Threat {
        name: "Phishing",
        category: ThreatCategory::SocialEngineering,
        description: "User targeted with a fraudulent email.",
    },
    Threat {
        name: "Insider Threat",
        category: ThreatCategory::InternalThreat,
        description: "Malicious activity from within the organization.",
    },
    Threat {
        name: "Ransomware",
        category: ThreatCategory::MalwareAttack,
        description: "Encrypted system files demanding a ransom.",
    },
];

/// Major Indian cities.
pub static LOCATIONS: [Location; 6] = [
    Location { name: "Mumbai", latitude: 19.0760, longitude: 72.8777 },
    Location { name: "Delhi", latitude: 28.7041, longitude: 77.1025 },
    Location { name: "Bangalore", latitude: 12.9716, longitude: 77.5946 },
    Location { name: "Hyderabad", latitude: 17.3850, longitude: 78.4867 },
    Location { name: "Chennai", latitude: 13.0827, longitude: 80.2707 },
    Location { name: "Kolkata", latitude: 22.5726, longitude: 88.3639 },
];

/// Draw a threat uniformly at random.
pub fn random_threat<R: Rng + ?Sized>(rng: &mut R) -> &'static Threat {
    &THREATS[rng.gen_range(0..THREATS.len())]
}

/// Draw a location uniformly at random.
pub fn random_location<R: Rng + ?Sized>(rng: &mut R) -> &'static Location {
    &LOCATIONS[rng.gen_range(0..LOCATIONS.len())]
}

pub fn find_threat(name: &str) -> Option<&'static Threat> {
    THREATS.iter().find(|t| t.name == name)
}

pub fn find_location(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.name == name)
}
