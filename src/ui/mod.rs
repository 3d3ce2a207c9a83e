//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the orchestrator's state and turns it into cells on the
//! terminal.  No network I/O happens here.

pub mod canvas_view;
pub mod info_panel;
pub mod layout;
pub mod spinner;
pub mod theme;
pub mod toolbar;
