mod event_loop;
mod input;
mod render;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::api::{ApiClient, ApiError};
use crate::fleet::FleetMonitor;
use crate::model::AppView;
use crate::scheduler::RefreshScheduler;
use crate::view::Presenter;

/// Deployment-time options resolved by the CLI layer.
pub struct Options {
    pub api_url: String,
    pub refresh_minutes: i64,
    pub auto_refresh: bool,
}

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Main application state: the session monitor, the polling policy, and
/// which view is on screen.
pub struct App {
    pub monitor: FleetMonitor,
    pub scheduler: RefreshScheduler,
    pub view: AppView,
}

impl App {
    pub fn new(rt: Arc<tokio::runtime::Runtime>, options: &Options) -> Result<Self, ApiError> {
        let client = Arc::new(ApiClient::new(&options.api_url)?);
        let monitor = FleetMonitor::new(client, rt);
        let scheduler = RefreshScheduler::new(options.refresh_minutes, options.auto_refresh);
        Ok(Self {
            monitor,
            scheduler,
            view: AppView::Summary,
        })
    }

    /// Return to the summary view. Selection persists for reuse; any open
    /// log session is closed so its fetch cannot outlive the pane.
    pub fn back(&mut self) {
        self.view = AppView::Summary;
        self.monitor.dismiss_notice();
        self.monitor.logs.close();
    }
}

/// Run the application. Sets up terminal, runs the main loop, restores
/// terminal on exit.
pub fn run(options: Options, should_quit: Arc<AtomicBool>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;

    let rt = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .build()
            .expect("Failed to create tokio runtime"),
    );

    let mut app = match App::new(Arc::clone(&rt), &options) {
        Ok(app) => app,
        Err(err) => {
            restore_terminal();
            return Err(io::Error::other(err.to_string()));
        }
    };

    // an armed scheduler owes the first fetch; otherwise fetch once now
    if !app.scheduler.is_enabled() {
        app.monitor.begin_refresh();
    }

    let mut needs_render = true;

    loop {
        if should_quit.load(Ordering::Relaxed) {
            break;
        }

        if app.process_tick(Instant::now()) {
            needs_render = true;
        }
        if app.poll_fetches() {
            needs_render = true;
        }

        if needs_render {
            if Presenter::render_size_guard()? {
                needs_render = false;
                if crossterm::event::poll(Duration::from_millis(100))? {
                    let _ = crossterm::event::read()?;
                }
                continue;
            }
            render::render(&mut app)?;
            needs_render = false;
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key_event) => {
                    match input::handle_key(&mut app, key_event) {
                        Some(input::InputResult::Quit) => break,
                        Some(input::InputResult::Consumed) => needs_render = true,
                        None => {}
                    }
                }
                crossterm::event::Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }

    restore_terminal();
    Ok(())
}
