mod audio;
mod cli;
mod commands;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use audio::AudioLauncher;
use cli::{Cli, Command};
use config::{AppConfig, ConfigLoader};
use controller::AppController;
use model::{AppModel, QuranClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing::info!(base_url = %config.api.base_url, "=== Mushaf Client Starting ===");

    let client = QuranClient::from_config(&config.api)?;

    match cli.command {
        Some(Command::Chapters) => commands::run_chapters(&client).await,
        Some(Command::Verse { chapter, verse, reciter }) => {
            commands::run_verse(&client, &chapter, verse, reciter.as_deref(), &config.ui.default_reciter).await
        }
        None => run_tui(client, &config).await,
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if let Some(base) = &cli.api_base {
        config.api.base_url = base.clone();
    }

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

async fn run_tui(client: QuranClient, config: &AppConfig) -> Result<()> {
    let mut app_model = AppModel::with_default_reciter(&config.ui.default_reciter);
    app_model.set_client(client);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), AudioLauncher::from_config(&config.audio));

    // Catalog loads in the background; the form stays disabled until it lands
    controller.spawn_load_catalog();

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Mushaf Client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (ui_state, content_state, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
