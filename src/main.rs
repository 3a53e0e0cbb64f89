//! WeatherFlow - Current weather and a five-day forecast in the terminal
//!
//! Runs an interactive TUI by default, or prints a single lookup with `--once`.

use std::io::{self, Write};
use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use weatherflow::app::App;
use weatherflow::cache::{
    CacheManager, FileRecentSearchStore, MemoryRecentSearchStore, RecentSearchStore,
};
use weatherflow::cli::{Cli, CliError, StartupConfig};
use weatherflow::data::OpenWeatherClient;
use weatherflow::logging::{self, LogTarget, LOG_FILE_NAME};
use weatherflow::orchestrator::WeatherOrchestrator;
use weatherflow::ui::{self, TextPresenter};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

fn open_store(cache: Option<CacheManager>) -> Box<dyn RecentSearchStore + Send> {
    match cache {
        Some(cache) => Box::new(FileRecentSearchStore::new(cache)),
        None => {
            tracing::warn!("no cache directory; recent searches will not be saved");
            Box::new(MemoryRecentSearchStore::new())
        }
    }
}

/// Prints one lookup and exits non-zero on failure
async fn run_once(
    mut orchestrator: WeatherOrchestrator,
    config: &StartupConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let request = config
        .startup_lookup(orchestrator.last_query())
        .ok_or(CliError::NothingToLookUp)?;

    let mut presenter = TextPresenter::new();
    orchestrator.run(&request, &mut presenter).await;

    if presenter.failed {
        eprint!("{}", presenter.output);
        return Ok(ExitCode::FAILURE);
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(presenter.output.as_bytes())?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

async fn run_tui(
    mut orchestrator: WeatherOrchestrator,
    config: StartupConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(orchestrator.recent_searches(), config.location);

    if let Some(request) = config.startup_lookup(orchestrator.last_query()) {
        app.request_lookup(request);
    }

    // Main event loop
    loop {
        app.tick(Instant::now());

        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Run one queued lookup; the loading frame is already on screen
        if let Some(request) = app.take_pending_lookup() {
            orchestrator.run(&request, &mut app).await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };

    let cache = CacheManager::new();
    let log_target = match (&cache, config.once) {
        (_, true) => LogTarget::Stderr,
        (Some(cache), false) => LogTarget::File(cache.dir().join(LOG_FILE_NAME)),
        (None, false) => LogTarget::Disabled,
    };
    if let Err(err) = logging::init(&log_target) {
        eprintln!("Warning: could not open log file: {}", err);
    }

    let provider = match OpenWeatherClient::new(config.api_key.clone()) {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        credentials_valid = config.credentials_valid,
        "starting weatherflow"
    );
    let orchestrator = WeatherOrchestrator::new(
        Box::new(provider),
        open_store(cache),
        config.credentials_valid,
    );

    let result = if config.once {
        run_once(orchestrator, &config).await
    } else {
        run_tui(orchestrator, config).await.map(|()| ExitCode::SUCCESS)
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
