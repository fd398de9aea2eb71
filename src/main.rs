//! Cardiowise terminal application.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiowise::adapters::sanitize::SanitizingMakeWriter;
use cardiowise::tui::App;
use cardiowise::Config;

fn main() -> Result<()> {
    let (config, config_warnings) = Config::from_env_with_warnings();

    // Logging to the terminal would corrupt the alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let use_file = config.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!use_file)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!("Starting Cardiowise...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Cardiowise shutdown complete.");
    Ok(())
}
