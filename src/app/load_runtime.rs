//! Background load jobs so the event loop never waits on the network.
//!
//! Each [`Command`] runs on its own tokio task and reports back through the
//! channel.  Nothing is cancelled; staleness is decided by the orchestrator
//! when the update is applied.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::loader::{GraphSource, LoadError};
use super::orchestrator::Command;
use crate::core::graph::JsonGraph;

#[derive(Debug)]
pub enum LoadUpdate {
    Folders(Result<Vec<String>, LoadError>),
    Files {
        ticket: u64,
        result: Result<Vec<String>, LoadError>,
    },
    Document {
        ticket: u64,
        layout_key: String,
        result: Result<JsonGraph, LoadError>,
    },
}

pub fn spawn_command(
    source: Arc<dyn GraphSource>,
    tx: mpsc::UnboundedSender<LoadUpdate>,
    command: Command,
) {
    tokio::spawn(async move {
        let update = match command {
            Command::FetchFolders => LoadUpdate::Folders(source.folder_list().await),
            Command::FetchFiles { ticket, folder } => LoadUpdate::Files {
                ticket,
                result: source.file_list(&folder).await,
            },
            Command::FetchDocument {
                ticket,
                path,
                layout_key,
            } => LoadUpdate::Document {
                ticket,
                layout_key,
                result: source.load_json(&path).await,
            },
        };
        // Receiver gone means the app is shutting down.
        let _ = tx.send(update);
    });
}
