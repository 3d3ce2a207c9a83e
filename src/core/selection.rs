//! Selection model: the three selectables (folder, file, layout) and the
//! pure helpers that decide what they contain and what is selected.
//!
//! This is the state the orchestrator owns.  The UI only reads it; every
//! mutation goes through the orchestrator so cascades stay consistent.

// ───────────────────────────────────────── options ───────────

/// One entry of a selectable: the raw value and what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Build one option per item.  The label is `labels[i]` when present and
/// non-empty, otherwise the item with a trailing `.json` stripped.
pub fn populate_options(items: &[String], labels: Option<&[String]>) -> Vec<SelectOption> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = labels
                .and_then(|l| l.get(i))
                .filter(|l| !l.is_empty())
                .cloned()
                .unwrap_or_else(|| item.strip_suffix(".json").unwrap_or(item).to_string());
            SelectOption {
                value: item.clone(),
                label,
            }
        })
        .collect()
}

// ───────────────────────────────────────── selectable ────────

/// Which selectable an event or focus refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Folder,
    File,
    Layout,
}

impl Field {
    pub const ALL: &[Field] = &[Field::Folder, Field::File, Field::Layout];

    pub fn label(self) -> &'static str {
        match self {
            Field::Folder => "Folder",
            Field::File => "File",
            Field::Layout => "Layout",
        }
    }
}

/// An ordered option list with at most one current option.
///
/// Replacing the options behaves like a native `<select>`: the first option
/// becomes current, or nothing when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct Selectable {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    /// Hidden selectables keep their value; they are just not drawn.
    pub hidden: bool,
}

impl Selectable {
    pub fn set_options(&mut self, items: &[String], labels: Option<&[String]>) {
        self.options = populate_options(items, labels);
        self.selected = if self.options.is_empty() { None } else { Some(0) };
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Current raw value, or `""` when nothing is selected.
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    /// Current display label, or `""` when nothing is selected.
    pub fn label(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.label.as_str())
            .unwrap_or("")
    }

    /// Select by index.  Returns `true` when the current value changed.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.options.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Move the selection by `delta`, clamped to the option range.
    pub fn step(&mut self, delta: isize) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let last = self.options.len() as isize - 1;
        let next = (current + delta).clamp(0, last) as usize;
        self.select_index(next)
    }
}

// ───────────────────────────────────────── state ─────────────

/// Folder, file and layout selections.  Created empty at startup.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub folder: Selectable,
    pub file: Selectable,
    pub layout: Selectable,
}

impl SelectionState {
    pub fn get(&self, field: Field) -> &Selectable {
        match field {
            Field::Folder => &self.folder,
            Field::File => &self.file,
            Field::Layout => &self.layout,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut Selectable {
        match field {
            Field::Folder => &mut self.folder,
            Field::File => &mut self.file,
            Field::Layout => &mut self.layout,
        }
    }

    pub fn folder(&self) -> &str {
        self.folder.value()
    }

    pub fn file(&self) -> &str {
        self.file.value()
    }

    pub fn layout_key(&self) -> &str {
        self.layout.value()
    }

    /// Path of the selected document on the server (`folder/` + file).
    pub fn document_path(&self) -> String {
        format!("{}{}", normalize_folder(self.folder()), self.file())
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Append a trailing `/` unless the folder already ends with one.
pub fn normalize_folder(folder: &str) -> String {
    if folder.ends_with('/') {
        folder.to_string()
    } else {
        format!("{folder}/")
    }
}

/// Index of the folder to select after the folder list arrives.
///
/// `None` for an empty list.  With several folders, the first path
/// containing `"examples"` wins, else the first folder.
pub fn default_folder_index(folders: &[String]) -> Option<usize> {
    if folders.is_empty() {
        return None;
    }
    Some(
        folders
            .iter()
            .position(|path| path.contains("examples"))
            .unwrap_or(0),
    )
}

/// File name for a screenshot of `file`: the last path component up to
/// `.json`, plus `.png`.  Slashes and backslashes both separate components,
/// so the name never leaves the screenshot directory.  `None` when nothing is left.
pub fn screenshot_name(file: &str) -> Option<String> {
    let base = file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file);
    let stem = base.split(".json").next().unwrap_or(base);
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn json_suffix_is_stripped_from_labels() {
        let opts = populate_options(&strings(&["a.json", "b.json"]), None);
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        let values: Vec<_> = opts.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
        assert_eq!(values, ["a.json", "b.json"]);
    }

    #[test]
    fn missing_labels_fall_back_to_item() {
        let labels = strings(&["Label1"]);
        let opts = populate_options(&strings(&["x", "y"]), Some(&labels));
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Label1", "y"]);
    }

    #[test]
    fn empty_label_falls_back_to_item() {
        let labels = strings(&["", "Second"]);
        let opts = populate_options(&strings(&["one.json", "two.json"]), Some(&labels));
        assert_eq!(opts[0].label, "one");
        assert_eq!(opts[1].label, "Second");
    }

    #[test]
    fn only_trailing_json_is_stripped() {
        let opts = populate_options(&strings(&["a.json.bak", "json.txt"]), None);
        assert_eq!(opts[0].label, "a.json.bak");
        assert_eq!(opts[1].label, "json.txt");
    }

    #[test]
    fn set_options_selects_first_like_a_native_select() {
        let mut sel = Selectable::default();
        assert_eq!(sel.value(), "");
        sel.set_options(&strings(&["a", "b"]), None);
        assert_eq!(sel.selected_index(), Some(0));
        assert_eq!(sel.value(), "a");
        sel.set_options(&[], None);
        assert_eq!(sel.selected_index(), None);
        assert_eq!(sel.value(), "");
    }

    #[test]
    fn select_reports_changes_only() {
        let mut sel = Selectable::default();
        sel.set_options(&strings(&["a", "b", "c"]), None);
        assert!(!sel.select_index(0));
        assert!(sel.select_index(2));
        assert!(!sel.select_index(7));
        assert!(!sel.step(1));
        assert!(sel.step(-5));
        assert_eq!(sel.value(), "a");
    }

    #[test]
    fn folder_is_normalized_once() {
        assert_eq!(normalize_folder("data"), "data/");
        assert_eq!(normalize_folder("data/"), "data/");
        assert_eq!(normalize_folder(""), "/");
    }

    #[test]
    fn document_path_joins_folder_and_file() {
        let mut state = SelectionState::default();
        state.folder.set_options(&strings(&["data"]), None);
        state.file.set_options(&strings(&["g.json"]), None);
        assert_eq!(state.document_path(), "data/g.json");
    }

    #[test]
    fn default_folder_prefers_examples() {
        assert_eq!(default_folder_index(&[]), None);
        assert_eq!(default_folder_index(&strings(&["only"])), Some(0));
        assert_eq!(
            default_folder_index(&strings(&["a", "x/examples/1", "examples"])),
            Some(1)
        );
        assert_eq!(default_folder_index(&strings(&["a", "b"])), Some(0));
    }

    #[test]
    fn screenshot_name_replaces_extension() {
        assert_eq!(screenshot_name("trace.json").as_deref(), Some("trace.png"));
        assert_eq!(screenshot_name("plain").as_deref(), Some("plain.png"));
    }

    #[test]
    fn screenshot_name_keeps_only_last_component() {
        assert_eq!(screenshot_name("sub/g.json").as_deref(), Some("g.png"));
        assert_eq!(screenshot_name("../up.json").as_deref(), Some("up.png"));
        assert_eq!(screenshot_name("/abs/x.json").as_deref(), Some("x.png"));
        assert_eq!(screenshot_name("win\\dir\\w.json").as_deref(), Some("w.png"));
        assert_eq!(screenshot_name("dir/"), None);
        assert_eq!(screenshot_name(".json"), None);
    }
}
