use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quaywatch::app;

#[derive(Parser)]
#[command(name = "quaywatch", version, about = "Terminal dashboard for a remote container fleet")]
struct Cli {
    /// Base URL of the container fleet API
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Auto-refresh interval in minutes (clamped to 1..=120)
    #[arg(long, default_value_t = 5)]
    refresh_minutes: i64,

    /// Start with auto-refresh disarmed (a single fetch still runs at startup)
    #[arg(long)]
    no_auto_refresh: bool,

    /// Write tracing output to this file; without it, logging is off so the
    /// terminal UI stays clean
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let _log_guard = cli.log_file.as_deref().map(init_tracing);

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&should_quit))?;
    }

    let options = app::Options {
        api_url: cli.api_url,
        refresh_minutes: cli.refresh_minutes,
        auto_refresh: !cli.no_auto_refresh,
    };
    app::run(options, should_quit)
}

/// File-backed tracing. The returned guard must live until exit so buffered
/// lines flush.
fn init_tracing(path: &Path) -> WorkerGuard {
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path.file_name().unwrap_or_else(|| "quaywatch.log".as_ref());
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();
    guard
}
