//! Curator TUI - compound curation console
//!
//! Terminal front end for the compound editor: one tab per compound, a
//! detail panel with the structure preview, and a dropdown for quick
//! selection.

mod app;
mod cli;
mod keybindings;
mod mode;
mod views;
mod widgets;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use curator_core::{Backend, CuratorConfig, CuratorError, Dispatcher, HttpBackend};
use curator_domain::PageState;

use app::App;
use cli::Cli;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CURATOR_LOG";

/// How long to wait for a key before checking for completions
const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let config = load_config(&cli)?;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.backend)?);
    let page = initial_page(&cli, backend.as_ref()).await?;

    let (dispatcher, completions) = Dispatcher::from_config(backend.clone(), &config);
    let mut app = App::new(page, config, dispatcher, completions);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app, backend.as_ref()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Log to a file: the terminal belongs to the UI
fn init_logging(path: Option<PathBuf>) -> io::Result<()> {
    let path = match path {
        Some(path) => path,
        None => {
            let dir = dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("curator");
            fs::create_dir_all(&dir)?;
            dir.join("curator.log")
        }
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<CuratorConfig, CuratorError> {
    let path = cli.config.clone().or_else(CuratorConfig::default_path);
    let mut config = match path {
        Some(path) if path.exists() => CuratorConfig::load(&path)?,
        _ => CuratorConfig::default(),
    };
    config = config.with_env_overrides();
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn initial_page(cli: &Cli, backend: &dyn Backend) -> Result<PageState, CuratorError> {
    if let Some(path) = &cli.page {
        let json = fs::read_to_string(path).map_err(curator_core::ConfigError::from)?;
        return Ok(PageState::from_json(&json).map_err(curator_core::ConfigError::from)?);
    }
    let location = cli.location.as_deref().unwrap_or("/");
    Ok(backend.load_page(location).await?)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    backend: &dyn Backend,
) -> io::Result<()> {
    loop {
        app.drain_completions();
        app.fit_width(terminal.size()?.width);
        terminal.draw(|f| app.render(f))?;

        if let Some(location) = app.take_navigation() {
            match backend.load_page(&location).await {
                Ok(page) => app.load_page(page),
                Err(error) => {
                    tracing::warn!(%location, %error, "could not load page");
                    app.show_notice(curator_core::Notice::ServerUnreachable);
                }
            }
            continue;
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}
