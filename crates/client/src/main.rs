//! NewQuiz terminal client.
//!
//! Composition root: reads configuration, installs logging, assembles the
//! runtime from bundled content and local repositories, then hands control
//! to the line-based front end.

mod app;
mod config;
mod content;
mod logging;

use std::sync::Arc;

use anyhow::Result;

use quiz_core::{UserProfile, XpConfig};
use quiz_runtime::{FileResultLog, InMemoryMazeRepo, InMemoryProfileRepo, Runtime};

use app::TerminalApp;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!(
        hard_mode = config.settings.hard_mode,
        row_limit = ?config.settings.row_limit,
        countdown_ms = ?config.settings.word_countdown_ms,
        "starting NewQuiz"
    );

    let xp_config = XpConfig::default();
    let mut builder = Runtime::builder()
        .content(content::content_source()?)
        .settings(config.settings.clone())
        .profiles(Arc::new(InMemoryProfileRepo::with_profile(UserProfile::new(
            "local", &xp_config,
        ))))
        .maze(Arc::new(InMemoryMazeRepo::new(content::maze_track()?)));

    if let Some(path) = &config.results_file {
        let log = FileResultLog::open_or_create(path)?;
        tracing::info!("recording results to {}", log.path().display());
        builder = builder.results(Arc::new(log));
    }

    let runtime = builder.build().await?;
    TerminalApp::new(runtime).run().await?;

    tracing::info!("client shutdown complete");
    Ok(())
}
