mod app;
mod clipboard;
mod config;
mod controller;
mod events;
mod generator;
mod models;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter, Registry,
};

use app::{Action, App};
use controller::PendingGeneration;
use events::AppEvent;
use generator::{MockGenerator, NoteGenerator, OllamaGenerator};
use models::{AppConfig, GeneratorBackend};

/// Log to a file; stdout belongs to the terminal UI.
fn init_logging() -> Result<()> {
    let log_path = config::get_log_path()?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "quickstudy=info".into()))
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();

    Ok(())
}

fn build_generator(config: &AppConfig) -> Result<Arc<dyn NoteGenerator>> {
    Ok(match config.generator.backend {
        GeneratorBackend::Mock => Arc::new(MockGenerator),
        GeneratorBackend::Ollama => Arc::new(OllamaGenerator::from_config(&config.generator)?),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = init_logging() {
        eprintln!("Logging disabled: {err:#}");
    }

    let config = config::load_config().unwrap_or_else(|err| {
        tracing::warn!("Failed to load config: {err:#}");
        tracing::warn!("Using default configuration");
        AppConfig::default()
    });
    let generator = build_generator(&config)?;
    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let res = run_app(&mut terminal, &mut app, &generator, &tx, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Application error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn spawn_generation(
    generator: &Arc<dyn NoteGenerator>,
    pending: PendingGeneration,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let generator = Arc::clone(generator);
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let outcome = pending.run(generator.as_ref()).await;
        // The receiver only goes away when the app is shutting down
        let _ = tx.send(AppEvent::GenerationFinished(outcome));
    });
}

fn perform(
    app: &mut App,
    action: Action,
    generator: &Arc<dyn NoteGenerator>,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    match action {
        Action::None => {}
        Action::Generate(pending) => {
            spawn_generation(generator, pending, event_tx);
        }
        Action::Copy(text) => match clipboard::copy_text(&text) {
            Ok(()) => app.status = Some("Notes copied to clipboard!".to_string()),
            Err(err) => {
                tracing::warn!("Clipboard copy failed: {err:#}");
                app.status = Some(format!("Copy failed: {err}"));
            }
        },
    }
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::GenerationFinished(outcome) => app.finish_generation(outcome),
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    generator: &Arc<dyn NoteGenerator>,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let initial = app.activate();
    perform(app, initial, generator, event_tx);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        while let Ok(app_event) = event_rx.try_recv() {
            handle_app_event(app, app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = app.handle_key(key.code, key.modifiers);
                    perform(app, action, generator, event_tx);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
