//! AUMVION — simulated self-healing security platform.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! starts the dashboard, and runs the simulation loop until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use aumvion::analyst::playbook::PlaybookAnalyst;
use aumvion::analyst::DefenseAnalyst;
use aumvion::config;
use aumvion::dashboard;
use aumvion::engine::simulator::Simulator;
use aumvion::session::{Session, SessionState};

const BANNER: &str = r#"
    _   _   _ __  __ __     _____ ___  _   _
   / \ | | | |  \/  |\ \   / /_ _/ _ \| \ | |
  / _ \| | | | |\/| | \ \ / / | | | | |  \| |
 / ___ \ |_| | |  | |  \ V /  | | |_| | |\  |
/_/   \_\___/|_|  |_|   \_/  |___\___/|_| \_|

  The Unhackable Ecosystem
  Autonomous, Self-Healing Security Platform (simulation)
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = config::AppConfig::load_or_default("config.toml")?;

    println!("{BANNER}");
    info!(
        detection_pause_ms = cfg.simulation.detection_pause_ms,
        remediation_pause_ms = cfg.simulation.remediation_pause_ms,
        series_window = cfg.simulation.series_window,
        dashboard = cfg.dashboard.enabled,
        "AUMVION starting up"
    );

    let session = Arc::new(Session::new(SessionState::from_config(&cfg.simulation)));

    if cfg.dashboard.enabled {
        dashboard::spawn_dashboard(session.clone(), cfg.dashboard.port).await?;
    }

    if cfg.simulation.auto_start || !cfg.dashboard.enabled {
        session.set_auto_mode(true).await;
    }

    let analyst = PlaybookAnalyst::new();
    info!(analyst = analyst.name(), "Defense analyst ready");
    let simulator = Simulator::new(session.clone(), Box::new(analyst), cfg.simulation.clone());

    tokio::select! {
        _ = simulator.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received.");
        }
    }

    let metrics = session.state.read().await.metrics();
    info!(
        threats_automated = metrics.resolved_count,
        mean_recovery = format!("{:.2}s", metrics.mean_time_to_recovery_secs),
        "AUMVION shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aumvion=info"));

    let json_logging = std::env::var("AUMVION_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
