//! Selection → load → render state machine.
//!
//! The orchestrator owns the [`SelectionState`], the renderer registry and
//! the current canvas.  It never performs I/O: every operation that needs
//! data returns a [`Command`], and the event loop feeds the results back
//! through the `apply_*` methods.
//!
//! File-list and document requests carry a ticket.  Only the result for the
//! most recently issued ticket of each kind is applied, so a slow earlier
//! load can never overwrite the render of a newer selection.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use super::loader::LoadError;
use crate::core::canvas::Canvas;
use crate::core::graph::JsonGraph;
use crate::core::screenshot;
use crate::core::selection::{default_folder_index, normalize_folder, Field, SelectionState};
use crate::renderers::RendererRegistry;

/// A data request for the load runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchFolders,
    FetchFiles {
        ticket: u64,
        folder: String,
    },
    FetchDocument {
        ticket: u64,
        path: String,
        layout_key: String,
    },
}

/// What occupies the main area.  Canvas and info panel are mutually
/// exclusive; nothing is shown until the folder list resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Hidden,
    Canvas,
    Info,
}

/// Result of applying a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// A newer render was dispatched after this one; result dropped.
    Stale,
    Failed,
}

pub struct Orchestrator {
    selection: SelectionState,
    registry: RendererRegistry,
    panel: Panel,
    /// Folder-list failure message, shown in the info panel.
    alert: Option<String>,
    canvas: Option<Canvas>,
    /// Main-area size in terminal cells; new canvases are sized from it.
    viewport: (u16, u16),
    files_ticket: u64,
    render_ticket: u64,
    /// Last non-fatal load failure, for the status bar.
    last_error: Option<String>,
}

impl Orchestrator {
    pub fn new(registry: RendererRegistry) -> Self {
        Self {
            selection: SelectionState::default(),
            registry,
            panel: Panel::default(),
            alert: None,
            canvas: None,
            viewport: (80, 24),
            files_ticket: 0,
            render_ticket: 0,
            last_error: None,
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.viewport = (cols.max(1), rows.max(1));
    }

    // ── startup ─────────────────────────────────────────────────

    /// Fill the layout selectable from the registry and request folders.
    pub fn start(&mut self) -> Vec<Command> {
        self.init_layout_options();
        vec![self.load_folders()]
    }

    fn init_layout_options(&mut self) {
        let keys = self.registry.keys();
        let labels = self.registry.labels();
        self.selection.layout.set_options(&keys, Some(&labels));
    }

    pub fn load_folders(&mut self) -> Command {
        Command::FetchFolders
    }

    /// Folder list resolved.  Populates folders, applies the default
    /// heuristic, and cascades into exactly one file-list load.
    pub fn apply_folder_list(&mut self, result: Result<Vec<String>, LoadError>) -> Vec<Command> {
        let folders = match result {
            Ok(folders) => folders,
            Err(e) => {
                tracing::warn!("folder list failed: {e}");
                self.alert = Some(e.to_string());
                self.panel = Panel::Info;
                return Vec::new();
            }
        };

        tracing::info!(count = folders.len(), "folder list loaded");
        self.alert = None;
        self.panel = Panel::Canvas;
        self.selection.folder.set_options(&folders, None);
        self.selection.folder.hidden = folders.len() == 1;

        match default_folder_index(&folders) {
            None => Vec::new(),
            Some(index) => {
                self.selection.folder.select_index(index);
                self.on_change(Field::Folder)
            }
        }
    }

    // ── files ───────────────────────────────────────────────────

    pub fn load_file_names(&mut self) -> Command {
        self.files_ticket += 1;
        Command::FetchFiles {
            ticket: self.files_ticket,
            folder: normalize_folder(self.selection.folder()),
        }
    }

    /// File list resolved.  Populates files and always re-renders.
    pub fn apply_file_list(
        &mut self,
        ticket: u64,
        result: Result<Vec<String>, LoadError>,
    ) -> Vec<Command> {
        if ticket != self.files_ticket {
            tracing::debug!(ticket, current = self.files_ticket, "dropping stale file list");
            return Vec::new();
        }
        match result {
            Ok(files) => {
                self.selection.file.set_options(&files, None);
                self.load_file_and_render().into_iter().collect()
            }
            Err(e) => {
                tracing::warn!("file list failed: {e}");
                self.last_error = Some(format!("file list: {e}"));
                Vec::new()
            }
        }
    }

    // ── render ──────────────────────────────────────────────────

    /// Request the selected document for the selected renderer.  An empty
    /// file or layout means there is nothing to do yet.
    pub fn load_file_and_render(&mut self) -> Option<Command> {
        let file = self.selection.file();
        if file.is_empty() {
            return None;
        }
        let layout_key = self.selection.layout_key();
        if layout_key.is_empty() {
            return None;
        }
        if self.registry.get(layout_key).is_none() {
            tracing::warn!(layout_key, "no renderer registered");
            return None;
        }

        let command = Command::FetchDocument {
            ticket: self.render_ticket + 1,
            path: self.selection.document_path(),
            layout_key: layout_key.to_string(),
        };
        self.render_ticket += 1;
        tracing::debug!(?command, "dispatch render");
        Some(command)
    }

    /// Document resolved.  Runs the renderer once on a fresh canvas; on any
    /// failure the previous canvas stays in place.
    pub fn apply_document(
        &mut self,
        ticket: u64,
        layout_key: &str,
        result: Result<JsonGraph, LoadError>,
    ) -> RenderOutcome {
        if ticket != self.render_ticket {
            tracing::debug!(ticket, current = self.render_ticket, "dropping stale document");
            return RenderOutcome::Stale;
        }
        let graph = match result {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!("document load failed: {e}");
                self.last_error = Some(format!("load: {e}"));
                return RenderOutcome::Failed;
            }
        };
        let Some(renderer) = self.registry.get(layout_key) else {
            return RenderOutcome::Failed;
        };

        let (cols, rows) = self.viewport;
        let mut canvas = Canvas::for_viewport(cols, rows);
        renderer.render(&graph, &mut canvas);
        self.canvas = Some(canvas);
        self.last_error = None;
        RenderOutcome::Rendered
    }

    // ── user events ─────────────────────────────────────────────

    /// Select option `index` of `field`; fires the change cascade when the
    /// value actually changed.
    pub fn select(&mut self, field: Field, index: usize) -> Vec<Command> {
        if self.selection.get_mut(field).select_index(index) {
            self.on_change(field)
        } else {
            Vec::new()
        }
    }

    /// Move the selection of `field` by `delta` options.
    pub fn step(&mut self, field: Field, delta: isize) -> Vec<Command> {
        if self.selection.get_mut(field).step(delta) {
            self.on_change(field)
        } else {
            Vec::new()
        }
    }

    /// Change event for `field`.  Folder reloads files; file and layout
    /// re-render.
    pub fn on_change(&mut self, field: Field) -> Vec<Command> {
        match field {
            Field::Folder => vec![self.load_file_names()],
            Field::File | Field::Layout => self.load_file_and_render().into_iter().collect(),
        }
    }

    pub fn toggle_info(&mut self) {
        self.panel = match self.panel {
            Panel::Canvas => Panel::Info,
            Panel::Hidden | Panel::Info => Panel::Canvas,
        };
    }

    /// Save the current canvas as `<file>.png` in `dir`.
    pub fn screenshot(&self, dir: &Path) -> Result<PathBuf> {
        let Some(canvas) = self.canvas.as_ref() else {
            bail!("nothing rendered yet");
        };
        let path = screenshot::export_png(canvas, dir, self.selection.file())?;
        tracing::info!(path = %path.display(), "screenshot written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::renderers::Renderer;

    /// Records every document it is asked to draw.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<JsonGraph>>>);

    impl Recorder {
        fn calls(&self) -> Vec<JsonGraph> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Renderer for Recorder {
        fn name(&self) -> Option<&str> {
            Some("Recorder")
        }

        fn render(&self, graph: &JsonGraph, _canvas: &mut Canvas) {
            self.0.lock().unwrap().push(graph.clone());
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn orchestrator_with(keys: &[&str]) -> (Orchestrator, Recorder) {
        let recorder = Recorder::default();
        let mut registry = RendererRegistry::new();
        for key in keys {
            registry.register(*key, Box::new(recorder.clone()));
        }
        let mut orch = Orchestrator::new(registry);
        assert_eq!(orch.start(), [Command::FetchFolders]);
        (orch, recorder)
    }

    fn fetch_files(commands: &[Command]) -> Vec<(u64, String)> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::FetchFiles { ticket, folder } => Some((*ticket, folder.clone())),
                _ => None,
            })
            .collect()
    }

    /// Drive the folder + file cascade and return the document command.
    fn load_to_document(orch: &mut Orchestrator, folder: &str, files: &[&str]) -> Command {
        let cmds = orch.apply_folder_list(Ok(strings(&[folder])));
        let (ticket, _) = fetch_files(&cmds)[0].clone();
        let cmds = orch.apply_file_list(ticket, Ok(strings(files)));
        assert_eq!(cmds.len(), 1);
        cmds[0].clone()
    }

    #[test]
    fn start_populates_layouts_from_registry() {
        let (orch, _) = orchestrator_with(&["force", "tree"]);
        let layout = &orch.selection().layout;
        assert_eq!(layout.options().len(), 2);
        assert_eq!(orch.selection().layout_key(), "force");
        assert_eq!(orch.panel(), Panel::Hidden);
    }

    #[test]
    fn single_folder_hides_selector_and_loads_files() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        let cmds = orch.apply_folder_list(Ok(strings(&["only"])));
        assert!(orch.selection().folder.hidden);
        assert_eq!(fetch_files(&cmds), [(1, "only/".to_string())]);
        assert_eq!(orch.panel(), Panel::Canvas);
    }

    #[test]
    fn examples_folder_is_default() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        let cmds = orch.apply_folder_list(Ok(strings(&["a", "x/examples", "examples/2"])));
        assert_eq!(orch.selection().folder(), "x/examples");
        assert!(!orch.selection().folder.hidden);
        assert_eq!(fetch_files(&cmds), [(1, "x/examples/".to_string())]);
    }

    #[test]
    fn first_folder_is_default_without_examples() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        let cmds = orch.apply_folder_list(Ok(strings(&["a/", "b"])));
        assert_eq!(orch.selection().folder(), "a/");
        assert_eq!(fetch_files(&cmds), [(1, "a/".to_string())]);
    }

    #[test]
    fn empty_folder_list_loads_nothing() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        assert!(orch.apply_folder_list(Ok(Vec::new())).is_empty());
        assert_eq!(orch.selection().folder(), "");
        assert!(orch.canvas().is_none());
    }

    #[test]
    fn folder_failure_shows_alert_and_stops() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        let cmds = orch.apply_folder_list(Err(LoadError::Server));
        assert!(cmds.is_empty());
        assert_eq!(orch.panel(), Panel::Info);
        assert!(orch.alert().is_some());
    }

    #[test]
    fn empty_file_is_a_noop() {
        let (mut orch, recorder) = orchestrator_with(&["force"]);
        orch.apply_folder_list(Ok(strings(&["data"])));
        assert_eq!(orch.load_file_and_render(), None);
        let cmds = orch.apply_file_list(1, Ok(Vec::new()));
        assert!(cmds.is_empty());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn empty_layout_is_a_noop() {
        let (mut orch, _) = orchestrator_with(&[]);
        let cmds = orch.apply_folder_list(Ok(strings(&["data"])));
        let (ticket, _) = fetch_files(&cmds)[0].clone();
        assert!(orch.apply_file_list(ticket, Ok(strings(&["g.json"]))).is_empty());
    }

    #[test]
    fn document_reaches_selected_renderer_once() {
        let (mut orch, recorder) = orchestrator_with(&["force"]);
        let cmd = load_to_document(&mut orch, "data", &["g.json"]);
        let Command::FetchDocument { ticket, path, layout_key } = cmd else {
            panic!("expected a document request");
        };
        assert_eq!(path, "data/g.json");
        assert_eq!(layout_key, "force");

        let doc = JsonGraph(json!({"nodes": ["a"]}));
        let outcome = orch.apply_document(ticket, &layout_key, Ok(doc.clone()));
        assert_eq!(outcome, RenderOutcome::Rendered);
        assert_eq!(recorder.calls(), [doc]);
        assert!(orch.canvas().is_some());
    }

    #[test]
    fn renderer_is_chosen_by_layout_key() {
        let force = Recorder::default();
        let tree = Recorder::default();
        let mut registry = RendererRegistry::new();
        registry.register("force", Box::new(force.clone()));
        registry.register("tree", Box::new(tree.clone()));
        let mut orch = Orchestrator::new(registry);
        orch.start();
        load_to_document(&mut orch, "data", &["g.json"]);

        let cmds = orch.select(Field::Layout, 1);
        let Some(Command::FetchDocument { ticket, layout_key, .. }) = cmds.first().cloned() else {
            panic!("layout change should re-render");
        };
        orch.apply_document(ticket, &layout_key, Ok(JsonGraph(json!({}))));
        assert!(force.calls().is_empty());
        assert_eq!(tree.calls().len(), 1);
    }

    #[test]
    fn stale_document_is_dropped() {
        let (mut orch, recorder) = orchestrator_with(&["force"]);
        let first = load_to_document(&mut orch, "data", &["a.json", "b.json"]);
        let second = orch.select(Field::File, 1);
        assert_eq!(second.len(), 1);

        let Command::FetchDocument { ticket, layout_key, .. } = first else {
            panic!("expected a document request");
        };
        let outcome = orch.apply_document(ticket, &layout_key, Ok(JsonGraph(json!({}))));
        assert_eq!(outcome, RenderOutcome::Stale);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn stale_file_list_is_dropped() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        orch.apply_folder_list(Ok(strings(&["a", "b"])));
        let newer = orch.select(Field::Folder, 1);
        assert_eq!(fetch_files(&newer), [(2, "b/".to_string())]);

        assert!(orch.apply_file_list(1, Ok(strings(&["old.json"]))).is_empty());
        assert!(orch.selection().file.is_empty());
    }

    #[test]
    fn failed_document_keeps_previous_canvas() {
        let (mut orch, recorder) = orchestrator_with(&["force"]);
        let Command::FetchDocument { ticket, layout_key, .. } =
            load_to_document(&mut orch, "data", &["a.json", "b.json"])
        else {
            panic!("expected a document request");
        };
        orch.apply_document(ticket, &layout_key, Ok(JsonGraph(json!({}))));

        let Some(Command::FetchDocument { ticket, layout_key, .. }) =
            orch.select(Field::File, 1).first().cloned()
        else {
            panic!("file change should re-render");
        };
        let failure = Err(LoadError::Decode("bad".into()));
        let outcome = orch.apply_document(ticket, &layout_key, failure);
        assert_eq!(outcome, RenderOutcome::Failed);
        assert!(orch.canvas().is_some());
        assert!(orch.last_error().is_some());
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn failed_file_list_does_not_render() {
        let (mut orch, recorder) = orchestrator_with(&["force"]);
        orch.apply_folder_list(Ok(strings(&["data"])));
        let cmds = orch.apply_file_list(1, Err(LoadError::Server));
        assert!(cmds.is_empty());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn reselecting_same_value_fires_nothing() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        orch.apply_folder_list(Ok(strings(&["a", "b"])));
        assert!(orch.select(Field::Folder, 0).is_empty());
        assert!(orch.step(Field::Folder, -1).is_empty());
        assert_eq!(fetch_files(&orch.step(Field::Folder, 1)).len(), 1);
    }

    #[test]
    fn info_toggles_against_canvas() {
        let (mut orch, _) = orchestrator_with(&["force"]);
        orch.apply_folder_list(Ok(strings(&["data"])));
        assert_eq!(orch.panel(), Panel::Canvas);
        orch.toggle_info();
        assert_eq!(orch.panel(), Panel::Info);
        orch.toggle_info();
        assert_eq!(orch.panel(), Panel::Canvas);
    }

    #[test]
    fn screenshot_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let (mut orch, _) = orchestrator_with(&["force"]);
        assert!(orch.screenshot(dir.path()).is_err());

        let Command::FetchDocument { ticket, layout_key, .. } =
            load_to_document(&mut orch, "data", &["trace.json"])
        else {
            panic!("expected a document request");
        };
        orch.apply_document(ticket, &layout_key, Ok(JsonGraph(json!({}))));
        let path = orch.screenshot(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("trace.png"));
    }
}
