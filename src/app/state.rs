//! Central application state.
//!
//! The orchestrator holds the selection/render model; this struct adds the
//! purely presentational bits (focus, status line, spinner) around it.

use crate::config::AppConfig;
use crate::core::selection::Field;

use super::orchestrator::Orchestrator;

/// Top-level application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
    /// Selectable that receives option up/down.
    pub focus: Field,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Transient message for the status bar (screenshot path, errors).
    pub status_message: Option<String>,
    /// Requests spawned but not yet applied.
    pub in_flight: usize,
    /// Monotonic tick counter (drives the spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, config: AppConfig) -> Self {
        Self {
            orchestrator,
            focus: Field::File,
            config,
            should_quit: false,
            status_message: None,
            in_flight: 0,
            tick: 0,
        }
    }

    /// Selectables that can take focus, in toolbar order.
    pub fn focusable(&self) -> Vec<Field> {
        let selection = self.orchestrator.selection();
        Field::ALL
            .iter()
            .copied()
            .filter(|&f| !selection.get(f).hidden)
            .collect()
    }

    /// Move focus by `delta` selectables, wrapping around.
    pub fn cycle_focus(&mut self, delta: isize) {
        let fields = self.focusable();
        if fields.is_empty() {
            return;
        }
        let current = fields.iter().position(|&f| f == self.focus).unwrap_or(0) as isize;
        let len = fields.len() as isize;
        self.focus = fields[(current + delta).rem_euclid(len) as usize];
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::RendererRegistry;

    #[test]
    fn focus_skips_hidden_folder() {
        let mut state = AppState::new(
            Orchestrator::new(RendererRegistry::builtin()),
            AppConfig::default(),
        );
        state.orchestrator.apply_folder_list(Ok(vec!["only".into()]));
        assert_eq!(state.focusable(), [Field::File, Field::Layout]);

        state.cycle_focus(1);
        assert_eq!(state.focus, Field::Layout);
        state.cycle_focus(1);
        assert_eq!(state.focus, Field::File);
        state.cycle_focus(-1);
        assert_eq!(state.focus, Field::Layout);
    }
}
