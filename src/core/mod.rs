//! Core model – selections, graph documents, the canvas, and timing helpers.
//!
//! Nothing here touches the terminal: no ratatui or crossterm.  The canvas
//! and PNG export sit on `image`, and the debouncer uses `tokio::time`.

pub mod canvas;
pub mod debounce;
pub mod graph;
pub mod screenshot;
pub mod selection;
