//! Creature team builder TUI.
//!
//! A vim-style terminal interface for building teams of three creatures
//! looked up on PokeAPI.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! printf 'pikachu\ncharmander\nbulbasaur\n#history\n' | cargo run -p roster -- --headless
//! ```

mod app;
mod board;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use roster_core::{CreatureFetcher, RosterSession, SessionConfig};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use app::{App, LookupDone};
use events::{handle_event, EventResult};
use ui::render::render;

/// Parsed command line options.
#[derive(Debug, Default)]
struct Options {
    headless: bool,
    help: bool,
    log_file: Option<PathBuf>,
    api_base: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => options.headless = true,
            "-h" | "--help" => options.help = true,
            "--log" => {
                let path = iter.next().ok_or("--log needs a file path")?;
                options.log_file = Some(PathBuf::from(path));
            }
            "--api" => {
                let url = iter.next().ok_or("--api needs a base URL")?;
                options.api_base = Some(url.clone());
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(options)
}

/// Install the tracing subscriber.
///
/// Headless mode logs to stderr. The TUI owns the terminal, so it only logs
/// when given a file.
fn init_logging(options: &Options) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roster=info,roster_core=info,pokeapi=info"));

    let installed = if let Some(path) = &options.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .try_init()
    } else if options.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        return Ok(());
    };

    // Keep running without logs; the roster does not depend on them
    if let Err(e) = installed {
        eprintln!("Logging disabled: {e}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            print_help();
            std::process::exit(2);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }

    init_logging(&options)?;

    let mut config = SessionConfig::new();
    if let Some(url) = &options.api_base {
        config = config.with_api_base(url.clone());
    }

    if options.headless {
        return headless::run_headless(config).await.map_err(|e| e.into());
    }

    let session = RosterSession::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    // Lookups run on their own tasks and report back here
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<LookupDone>();

    loop {
        // Apply every lookup that settled since the last frame
        while let Ok(done) = done_rx.try_recv() {
            app.finish_lookup(done);
        }

        terminal.draw(|f| render(f, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            app.tick();
            continue;
        }

        let ev = event::read()?;
        match handle_event(&mut app, ev) {
            EventResult::Quit => return Ok(()),
            EventResult::AddCreature(name) => {
                if let Some(pending) = app.begin_lookup(&name) {
                    let fetcher = app.fetcher();
                    let done_tx = done_tx.clone();
                    tokio::spawn(async move {
                        let result = fetcher.fetch(pending.name()).await;
                        // The receiver only goes away when the app is exiting
                        let _ = done_tx.send(LookupDone { pending, result });
                    });
                }
            }
            EventResult::NeedsRedraw | EventResult::Continue => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Roster - build teams of three creatures from PokeAPI");
    println!();
    println!("USAGE:");
    println!("  roster [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run in headless mode (text-only, no TUI)");
    println!("  --log <PATH>     Write logs to a file (TUI mode logs nowhere otherwise)");
    println!("  --api <URL>      API root, e.g. http://localhost:8000/api/v2");
    println!();
    println!("ENVIRONMENT:");
    println!("  POKEAPI_BASE_URL  API root used when --api is not given");
    println!("  RUST_LOG          Log filter (default: roster=info)");
    println!();
    println!("EXAMPLES:");
    println!("  roster                                   # Interactive TUI mode");
    println!("  roster --headless                        # Read names from stdin");
    println!("  roster --log roster.log                  # TUI with logging");
}
