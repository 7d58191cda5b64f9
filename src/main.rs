//! # Tabmenu CLI Entry Point
//!
//! This is the main entry point for the tabmenu TUI application.
//!
//! ## Overview
//!
//! Tabmenu shows a row of tabs, each owning a small menu. Selecting a tab
//! opens its menu (selecting it again hides the menu); selecting a menu item
//! simulates an API call to that item's endpoint, shows it as pending, and
//! after a fixed delay shows whether the call succeeded or failed.
//!
//! ## Usage
//!
//! ```bash
//! # Use ~/.config/tabmenu/config.json, or built-in defaults
//! tabmenu
//!
//! # Use a specific config file
//! tabmenu --config ./menus.json
//!
//! # Faster, always-failing calls
//! tabmenu --delay-ms 200 --failure-rate 1.0
//!
//! # Print the validated configuration and generated menus, then exit
//! tabmenu --debug
//! ```
//!
//! ## Key Bindings
//!
//! - `←`/`→`, `h`/`l` - Move the tab cursor
//! - `1`-`9` - Select a tab by position
//! - `Enter`/`Space` - Select the tab under the cursor, or call the menu item
//! - `↑`/`↓`, `k`/`j` - Move the menu cursor
//! - `Tab` - Switch focus between tab bar and menu
//! - `?` - Toggle help
//! - `q`/`Esc` - Quit

use tabmenu::config::{Config, Settings};
use tabmenu::menu::{
    CallResult, OutcomeSampler, SeededSampler, SelectionController, ThreadRngSampler,
};
use tabmenu::ui::{self, keys, App};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Tabmenu - a tabbed menu that simulates API calls
#[derive(Parser, Debug)]
#[command(name = "tabmenu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A tabbed menu TUI that simulates API calls", long_about = None)]
struct Args {
    /// Path to a JSON config file (default: ~/.config/tabmenu/config.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the simulated call delay, in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    delay_ms: Option<i64>,

    /// Override the probability (0.0 - 1.0) that a simulated call fails
    #[arg(long, value_name = "P", allow_negative_numbers = true)]
    failure_rate: Option<f64>,

    /// Cancel the outstanding call when a new one is issued
    #[arg(long)]
    cancel_stale: bool,

    /// Seed the outcome generator for reproducible runs
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is busy drawing the UI)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the validated configuration and generated menus, then exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Install a file-backed tracing subscriber, if a log file was requested.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tabmenu=info".parse()?),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Resolve the configuration from file and command-line overrides.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut config = if let Some(path) = &args.config {
        let canonical_path = path
            .canonicalize()
            .with_context(|| format!("Failed to access config file: {}", path.display()))?;
        Config::load_from(&canonical_path)?
    } else {
        Config::load().context("Failed to load configuration")?
    };

    if let Some(delay_ms) = args.delay_ms {
        config.simulated_delay_ms = delay_ms;
    }
    if let Some(failure_rate) = args.failure_rate {
        config.failure_probability = failure_rate;
    }
    if args.cancel_stale {
        config.cancel_stale_calls = true;
    }

    config.validate().context("Invalid configuration")
}

async fn run_application(args: Args) -> Result<()> {
    init_logging(args.log_file.as_deref())?;

    let settings = load_settings(&args)?;
    info!(
        tabs = settings.tabs.len(),
        delay_ms = settings.delay_ms(),
        failure_probability = settings.failure_probability,
        "configuration loaded"
    );

    // Debug mode: print configuration and generated menus, then exit
    if args.debug {
        print_debug(&settings);
        return Ok(());
    }

    if settings.tabs.is_empty() {
        warn!("no tabs configured, starting with an empty tab bar");
    }

    let sampler: Arc<dyn OutcomeSampler> = match args.seed {
        Some(seed) => Arc::new(SeededSampler::new(seed)),
        None => Arc::new(ThreadRngSampler),
    };
    let (controller, mut results) = SelectionController::from_settings(&settings, sampler);
    let mut app = App::new(controller);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut results, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

fn print_debug(settings: &Settings) {
    println!("=== Configuration ===");
    println!("  Simulated delay: {}ms", settings.delay_ms());
    println!("  Failure probability: {}", settings.failure_probability);
    println!("  Cancel stale calls: {}", settings.cancel_stale_calls);
    println!("\n=== Tabs ===");
    for tab in &settings.tabs {
        println!("  {} ({} items)", tab.id, tab.item_count);
        for item in tab.menu_items() {
            println!("    {:<16} {}", item.label, item.endpoint);
        }
    }
    println!("\nTotal: {} tabs", settings.tabs.len());
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Apply every simulated call result that has arrived since the last frame.
fn drain_call_results(app: &mut App, results: &mut UnboundedReceiver<CallResult>) -> usize {
    let mut applied = 0;
    while let Ok(result) = results.try_recv() {
        app.resolve_call(&result);
        applied += 1;
    }
    applied
}

/// Apply a single terminal event to the app.
fn handle_event(app: &mut App, event: &Event) {
    if let Event::Key(key) = event {
        if let Some(action) = keys::action_for_key(*key, app.show_help) {
            app.apply(action);
        }
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    results: &mut UnboundedReceiver<CallResult>,
    event_reader: &mut dyn EventReader,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        drain_call_results(app, results);

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Poll faster while a call is pending so its result shows promptly
        let poll_timeout = if app.display.is_call_pending() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if let Some(event) = event_reader.read_event(poll_timeout)? {
            handle_event(app, &event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
