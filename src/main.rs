use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use avatar_dash::api::{RecordFetcher, RecordSource};
use avatar_dash::app::{App, TerminalGuard};
use avatar_dash::config::Settings;
use avatar_dash::logging;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file to read instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint returning the paged user list
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&path)
        .with_context(|| format!("Could not load settings from {}", path.display()))?;
    if let Some(url) = cli.base_url.as_deref() {
        settings.override_base_url(url).context("Invalid --base-url")?;
    }

    // Flushes the log file on drop
    let _log_guard = logging::init(&settings.log)?;
    info!(base_url = %settings.api.base_url, "Starting avatar dashboard");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Could not start the async runtime")?;
    let _enter = runtime.enter();

    let source: Arc<dyn RecordSource> = Arc::new(RecordFetcher::new(&settings.fetcher_config())?);
    let mut app = App::new(source, settings.ui.user_name.clone(), settings.ui.tick_rate());

    let mut terminal = TerminalGuard::enter()?;
    app.run(terminal.terminal())
}
