//! BAKURA — Baccarat betting-progression tracker
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the session and either serves the dashboard until Ctrl+C or, with
//! the dashboard disabled, replays outcome text from stdin.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use bakura::config;
use bakura::dashboard::{self, DashboardState};
use bakura::engine::{parse_outcomes, Session};
use bakura::strategy::{DAlembertProgression, MetaAdvisor};

const BANNER: &str = r#"
 ____    _    _  ___   _ ____      _
| __ )  / \  | |/ / | | |  _ \    / \
|  _ \ / _ \ | ' /| | | | |_) |  / _ \
| |_) / ___ \| . \| |_| |  _ <  / ___ \
|____/_/   \_\_|\_\\___/|_| \_\/_/   \_\

  Star 2.0 progression tracker
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("BAKURA_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = config::AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        unit = %cfg.session.unit,
        bettors = cfg.session.roster.len(),
        dashboard = cfg.dashboard.enabled,
        "BAKURA starting up"
    );

    let session = Session::new(cfg.session_config()?)?;
    let advisor = MetaAdvisor::new(cfg.meta_config());

    if !cfg.dashboard.enabled {
        return replay_stdin(session, &advisor).await;
    }

    let dalembert = DAlembertProgression::new(cfg.dalembert.unit)?;
    let state = Arc::new(DashboardState::new(session, dalembert, advisor));

    dashboard::serve(state, cfg.dashboard.port, shutdown_signal()).await?;

    info!("BAKURA shut down cleanly.");
    Ok(())
}

/// Feed every stdin line through the session and print the final table.
async fn replay_stdin(mut session: Session, advisor: &MetaAdvisor) -> Result<()> {
    info!("Dashboard disabled, reading outcomes from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        line_no += 1;
        match parse_outcomes(&line) {
            Ok(outcomes) => session.add_hands(&outcomes),
            Err(e) => warn!(line = line_no, error = %e, "Skipping line"),
        }
    }

    let snapshot = session.snapshot();
    println!("{snapshot}");
    if let Some(s) = advisor.suggest(&snapshot.bettors) {
        println!("Suggestion: fade {} -> {} ${:.2}", s.against, s.side, s.stake);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bakura=info"));

    let json_logging = std::env::var("BAKURA_LOG_JSON").is_ok();

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
