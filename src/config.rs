//! User configuration: server URL, debounce window, screenshot location and
//! keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/graph-view/config.toml` (default `~/.config/graph-view/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    FocusNext,
    FocusPrev,
    SelectPrev,
    SelectNext,
    ToggleInfo,
    Screenshot,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the info panel).
    pub const ALL: &[Action] = &[
        Action::FocusNext,
        Action::FocusPrev,
        Action::SelectPrev,
        Action::SelectNext,
        Action::ToggleInfo,
        Action::Screenshot,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::FocusNext => "Next Selector",
            Action::FocusPrev => "Previous Selector",
            Action::SelectPrev => "Previous Option",
            Action::SelectNext => "Next Option",
            Action::ToggleInfo => "Toggle Info",
            Action::Screenshot => "Save Screenshot",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::FocusNext => "focus_next",
            Action::FocusPrev => "focus_prev",
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::ToggleInfo => "toggle_info",
            Action::Screenshot => "screenshot",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Shift+BackTab"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+BackTab"`, `"Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Tab"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the original case for single characters.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Base URL of the graph server.
    pub server_url: String,
    /// Quiescence window before a resize triggers a re-render.
    pub resize_debounce_ms: u64,
    /// Where screenshots are written.
    pub screenshot_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            resize_debounce_ms: DEFAULT_DEBOUNCE_MS,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(
            FocusNext,
            vec![KeyBind::new(Tab, n), KeyBind::new(Right, n), KeyBind::new(Char('l'), n)],
        );
        m.insert(
            FocusPrev,
            vec![KeyBind::new(BackTab, shift), KeyBind::new(Left, n), KeyBind::new(Char('h'), n)],
        );
        m.insert(SelectPrev, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(SelectNext, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ToggleInfo, vec![KeyBind::new(Char('i'), n)]);
        m.insert(Screenshot, vec![KeyBind::new(Char('s'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: selector | {}/{}: option | {}: info | {}: screenshot | {}: quit",
            self.short_binding(Action::FocusNext),
            self.short_binding(Action::SelectPrev),
            self.short_binding(Action::SelectNext),
            self.short_binding(Action::ToggleInfo),
            self.short_binding(Action::Screenshot),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), "unreadable config: {e}");
                }
                Self::default()
            }
        }
    }

    /// Persist to the default location and return the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "server_url" => {
                    if !value.is_empty() {
                        config.server_url = value.to_string();
                    }
                    continue;
                }
                "resize_debounce_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.resize_debounce_ms = v.clamp(50, 5000);
                    }
                    continue;
                }
                "screenshot_dir" => {
                    if !value.is_empty() {
                        config.screenshot_dir = PathBuf::from(value);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# graph-view configuration".to_string(),
            String::new(),
            format!("server_url = \"{}\"", self.server_url),
            format!("resize_debounce_ms = {}", self.resize_debounce_ms),
            format!("screenshot_dir = \"{}\"", self.screenshot_dir.display()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/graph-view/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("graph-view").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_expected_keys() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::FocusNext));
        assert_eq!(
            c.match_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::FocusPrev)
        );
        assert_eq!(
            c.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::SelectNext)
        );
        assert_eq!(
            c.match_key(key(KeyCode::Char('s'), KeyModifiers::NONE)),
            Some(Action::Screenshot)
        );
        assert_eq!(c.match_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn parses_settings_and_bindings() {
        let c = AppConfig::parse_config(
            "# comment\n\
             [general]\n\
             server_url = \"http://viz:8080\"\n\
             resize_debounce_ms = 10\n\
             screenshot_dir = shots\n\
             screenshot = Ctrl+p, F5\n\
             bogus = x\n",
        );
        assert_eq!(c.server_url, "http://viz:8080");
        assert_eq!(c.resize_debounce_ms, 50);
        assert_eq!(c.screenshot_dir, PathBuf::from("shots"));
        assert_eq!(
            c.bindings[&Action::Screenshot],
            [
                KeyBind::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(5), KeyModifiers::NONE),
            ]
        );
        // Untouched actions keep their defaults.
        assert_eq!(c.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let c = AppConfig::parse_config("resize_debounce_ms = soon\nquit = Hyper+q\n");
        assert_eq!(c.resize_debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(c.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut c = AppConfig::default();
        c.server_url = "http://example.test".into();
        c.resize_debounce_ms = 750;
        c.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.server_url, "http://example.test");
        assert_eq!(loaded.resize_debounce_ms, 750);
        assert_eq!(loaded.bindings, c.bindings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(c.server_url, DEFAULT_SERVER_URL);
    }
}
