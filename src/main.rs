//! Terminal viewer for JSON graph documents served over HTTP.
//!
//! Pick a folder, a file and a layout in the toolbar; the graph is drawn on
//! an in-memory canvas, shown with half-blocks, and can be saved as PNG.
//! Run with `--write-config` to dump the effective configuration.

mod app;
mod config;
mod core;
mod renderers;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    load_runtime::{spawn_command, LoadUpdate},
    loader::{GraphSource, HttpSource},
    orchestrator::{Command, Orchestrator, Panel},
    state::AppState,
};
use crate::core::debounce::Debouncer;
use crate::renderers::RendererRegistry;
use crate::ui::{
    canvas_view::CanvasView, info_panel::InfoPanel, layout::AppLayout, spinner::LoadingIndicator,
    theme::Theme, toolbar::Toolbar,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal viewer for JSON graph files")]
struct Cli {
    /// Base URL of the graph file server (overrides the config file).
    #[arg(long)]
    server: Option<String>,

    /// Resize debounce window in milliseconds.
    #[arg(long = "debounce-ms")]
    debounce_ms: Option<u64>,

    /// Directory screenshots are written to.
    #[arg(long = "screenshot-dir")]
    screenshot_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

/// Spawn every command as a background load.
fn dispatch(
    commands: Vec<Command>,
    state: &mut AppState,
    debouncer: &mut Debouncer,
    source: &Arc<dyn GraphSource>,
    tx: &mpsc::UnboundedSender<LoadUpdate>,
) {
    handler::supersede_resize(debouncer, &commands);
    for command in commands {
        state.in_flight += 1;
        spawn_command(Arc::clone(source), tx.clone(), command);
    }
}

fn apply_update(state: &mut AppState, update: LoadUpdate) -> Vec<Command> {
    state.in_flight = state.in_flight.saturating_sub(1);
    match update {
        LoadUpdate::Folders(result) => state.orchestrator.apply_folder_list(result),
        LoadUpdate::Files { ticket, result } => state.orchestrator.apply_file_list(ticket, result),
        LoadUpdate::Document {
            ticket,
            layout_key,
            result,
        } => {
            let outcome = state.orchestrator.apply_document(ticket, &layout_key, result);
            tracing::debug!(ticket, layout_key = %layout_key, ?outcome, "document applied");
            Vec::new()
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(server) = cli.server {
        user_config.server_url = server;
    }
    if let Some(ms) = cli.debounce_ms {
        user_config.resize_debounce_ms = ms.clamp(50, 5000);
    }
    if let Some(dir) = cli.screenshot_dir {
        user_config.screenshot_dir = dir;
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let http = HttpSource::new(user_config.server_url.clone());
    tracing::info!(server = http.base_url(), "using graph server");
    let source: Arc<dyn GraphSource> = Arc::new(http);

    let registry = RendererRegistry::builtin();
    if registry.is_empty() {
        tracing::warn!("no renderers registered");
    } else {
        tracing::info!(renderers = registry.len(), "renderers registered");
    }

    let mut debouncer = Debouncer::new(Duration::from_millis(user_config.resize_debounce_ms));
    let mut state = AppState::new(Orchestrator::new(registry), user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut screen = Rect::new(0, 0, size.width, size.height);
    let canvas_area = AppLayout::from_area(screen).canvas_area();
    state.orchestrator.set_viewport(canvas_area.width, canvas_area.height);

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadUpdate>();

    let startup = state.orchestrator.start();
    dispatch(startup, &mut state, &mut debouncer, &source, &load_tx);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            screen = frame.area();
            let layout = AppLayout::from_area(screen);

            frame.render_widget(
                Toolbar {
                    selection: state.orchestrator.selection(),
                    focus: state.focus,
                },
                layout.toolbar_area,
            );

            match state.orchestrator.panel() {
                Panel::Hidden => {}
                Panel::Canvas => {
                    let block = Block::default()
                        .title(format!(" {} ", state.orchestrator.selection().file.label()))
                        .title_style(Theme::title_style())
                        .borders(Borders::ALL)
                        .border_style(Theme::border_style());
                    frame.render_widget(block, layout.main_area);
                    if let Some(canvas) = state.orchestrator.canvas() {
                        frame.render_widget(CanvasView { canvas }, layout.canvas_area());
                    }
                }
                Panel::Info => {
                    frame.render_widget(
                        InfoPanel {
                            alert: state.orchestrator.alert(),
                            config: &state.config,
                        },
                        layout.main_area,
                    );
                }
            }

            let hint = state.config.status_bar_hint();
            let status_text = state
                .status_message
                .as_deref()
                .or(state.orchestrator.last_error())
                .unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
            frame.render_widget(
                LoadingIndicator {
                    visible: state.is_loading(),
                    tick: state.tick,
                },
                layout.status_area,
            );
        })?;

        let resize_deadline = debouncer
            .deadline()
            .unwrap_or_else(|| Instant::now() + debouncer.window());

        tokio::select! {
            Some(event) = events.recv() => {
                let commands = match event {
                    AppEvent::Key(k) => {
                        state.status_message = None;
                        handler::handle_key(&mut state, k)
                    }
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, screen),
                    AppEvent::Resize(w, h) => {
                        handler::handle_resize(&mut state, &mut debouncer, w, h, Instant::now());
                        Vec::new()
                    }
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                        Vec::new()
                    }
                };
                dispatch(commands, &mut state, &mut debouncer, &source, &load_tx);
            }

            Some(update) = load_rx.recv() => {
                let commands = apply_update(&mut state, update);
                dispatch(commands, &mut state, &mut debouncer, &source, &load_tx);
            }

            _ = tokio::time::sleep_until(resize_deadline), if debouncer.is_pending() => {
                let commands =
                    handler::handle_resize_settled(&mut state, &mut debouncer, Instant::now());
                dispatch(commands, &mut state, &mut debouncer, &source, &load_tx);
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
