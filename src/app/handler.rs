//! Input handling.  Maps key/mouse events to orchestrator calls.
//!
//! Handlers return the load commands produced by the cascade; the event
//! loop spawns them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::time::Instant;

use crate::config::Action;
use crate::core::debounce::Debouncer;
use crate::core::selection::Field;
use crate::ui::layout::AppLayout;
use crate::ui::toolbar::{ToolbarGeometry, ToolbarHit};

use super::orchestrator::Command;
use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Command> {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Vec::new();
    }

    let Some(action) = state.config.match_key(key) else {
        return Vec::new();
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
            Vec::new()
        }
        Action::FocusNext => {
            state.cycle_focus(1);
            Vec::new()
        }
        Action::FocusPrev => {
            state.cycle_focus(-1);
            Vec::new()
        }
        Action::SelectPrev => step_focused(state, -1),
        Action::SelectNext => step_focused(state, 1),
        Action::ToggleInfo => {
            state.orchestrator.toggle_info();
            Vec::new()
        }
        Action::Screenshot => {
            take_screenshot(state);
            Vec::new()
        }
    }
}

/// Process a mouse event.  `area` is the full terminal area the layout was
/// computed from.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, area: Rect) -> Vec<Command> {
    let layout = AppLayout::from_area(area);
    let geometry = ToolbarGeometry::compute(layout.toolbar_area, state.orchestrator.selection());
    let hit = geometry.hit(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match hit {
            Some(ToolbarHit::Field(field)) if state.focus == field => cycle_option(state, field),
            Some(ToolbarHit::Field(field)) => {
                state.focus = field;
                Vec::new()
            }
            Some(ToolbarHit::Info) => {
                state.orchestrator.toggle_info();
                Vec::new()
            }
            Some(ToolbarHit::Screenshot) => {
                take_screenshot(state);
                Vec::new()
            }
            None => Vec::new(),
        },
        MouseEventKind::ScrollUp => scroll(state, hit, -1),
        MouseEventKind::ScrollDown => scroll(state, hit, 1),
        _ => Vec::new(),
    }
}

/// Terminal resized to `cols` × `rows`.  The viewport follows immediately;
/// the re-render waits until the burst settles.
pub fn handle_resize(
    state: &mut AppState,
    debouncer: &mut Debouncer,
    cols: u16,
    rows: u16,
    now: Instant,
) {
    let canvas_area = AppLayout::from_area(Rect::new(0, 0, cols, rows)).canvas_area();
    state.orchestrator.set_viewport(canvas_area.width, canvas_area.height);
    debouncer.trigger(now);
}

/// Resize deadline reached.  Yields at most one render per settled burst.
pub fn handle_resize_settled(
    state: &mut AppState,
    debouncer: &mut Debouncer,
    now: Instant,
) -> Vec<Command> {
    if debouncer.fire(now) {
        state.orchestrator.load_file_and_render().into_iter().collect()
    } else {
        Vec::new()
    }
}

/// A document request already uses the current viewport, so it replaces any
/// pending resize render.
pub fn supersede_resize(debouncer: &mut Debouncer, commands: &[Command]) {
    if commands
        .iter()
        .any(|c| matches!(c, Command::FetchDocument { .. }))
    {
        debouncer.cancel();
    }
}

/// Scrolling over a selector changes it directly; anywhere else changes the
/// focused one.
fn scroll(state: &mut AppState, hit: Option<ToolbarHit>, delta: isize) -> Vec<Command> {
    if let Some(ToolbarHit::Field(field)) = hit {
        state.focus = field;
    }
    step_focused(state, delta)
}

/// Clicking an already focused selector advances it, wrapping at the end.
fn cycle_option(state: &mut AppState, field: Field) -> Vec<Command> {
    let sel = state.orchestrator.selection().get(field);
    let len = sel.options().len();
    if len == 0 {
        return Vec::new();
    }
    let next = sel.selected_index().map_or(0, |i| (i + 1) % len);
    state.orchestrator.select(field, next)
}

fn step_focused(state: &mut AppState, delta: isize) -> Vec<Command> {
    let field = state.focus;
    state.orchestrator.step(field, delta)
}

fn take_screenshot(state: &mut AppState) {
    let dir = state.config.screenshot_dir.clone();
    state.status_message = Some(match state.orchestrator.screenshot(&dir) {
        Ok(path) => format!("Saved {}", path.display()),
        Err(e) => format!("Screenshot failed: {e:#}"),
    });
}
