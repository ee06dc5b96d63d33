//! newsdesk - the daily news digest in your terminal
//!
//! Loads the latest news snapshot (from the one-hour cache or the backend)
//! and shows the audio summary and headline links.

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use newsdesk::app::{App, AppAction};
use newsdesk::cache::{FileStore, KeyValueStore};
use newsdesk::cli::{Cli, StartupConfig};
use newsdesk::data::{NewsClient, NewsSource};
use newsdesk::loader::{spawn_load, LoadState, NewsLoader};
use newsdesk::{logging, opener, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_news_page(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Loads once and prints the page to stdout
///
/// Exits with status 1 when the news could not be loaded.
async fn run_print<S, F>(loader: NewsLoader<S, F>)
where
    S: KeyValueStore,
    F: NewsSource,
{
    let state = loader.load().await;
    print!(
        "{}",
        ui::render_plain(state.snapshot(), Local::now().date_naive())
    );

    if let LoadState::Failed(reason) = state {
        eprintln!("newsdesk: could not load news: {}", reason);
        process::exit(1);
    }
}

/// Runs the terminal UI; the load happens in a background task
async fn run_tui<S, F>(loader: NewsLoader<S, F>) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore + 'static,
    F: NewsSource + 'static,
{
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    let (load_task, mut rx) = spawn_load(loader);

    loop {
        if let Ok(state) = rx.try_recv() {
            app.apply_load(state);
        }

        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(AppAction::Open(url)) = app.handle_key(key) {
                        opener::open_and_log(&url);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    if !load_task.is_finished() {
        info!("quitting with news load in flight, cancelling");
        load_task.abort();
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("newsdesk: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!(
            "newsdesk: logging disabled, cannot open {}: {}",
            config.log_file.display(),
            e
        );
    }
    info!(base_url = %config.base_url, cache_dir = %config.cache_dir.display(), "starting");

    let loader = NewsLoader::new(
        FileStore::with_dir(config.cache_dir.clone()),
        NewsClient::new(config.base_url.clone()),
    );

    if config.print {
        run_print(loader).await;
        return Ok(());
    }

    run_tui(loader).await
}
