//! Application orchestration: the selection cascade, background loads and
//! input handling.

pub mod event;
pub mod handler;
pub mod load_runtime;
pub mod loader;
pub mod orchestrator;
pub mod state;
