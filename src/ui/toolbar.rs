//! One-line toolbar: the folder/file/layout selectors plus the info and
//! screenshot buttons.
//!
//! Geometry is computed separately from drawing so the mouse handler can
//! hit-test with exactly the rectangles that were rendered.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::selection::{Field, SelectionState, Selectable};

use super::theme::Theme;

const INFO_LABEL: &str = "[info]";
const SCREENSHOT_LABEL: &str = "[png]";
/// Longest value shown before truncation.
const MAX_VALUE_CHARS: usize = 32;

/// What a toolbar click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarHit {
    Field(Field),
    Info,
    Screenshot,
}

#[derive(Debug, Clone, Default)]
pub struct ToolbarGeometry {
    pub fields: Vec<(Field, Rect)>,
    pub info_button: Rect,
    pub screenshot_button: Rect,
}

impl ToolbarGeometry {
    pub fn compute(area: Rect, selection: &SelectionState) -> Self {
        let mut geometry = Self::default();
        let right = area.x + area.width;

        let shot_w = SCREENSHOT_LABEL.len() as u16;
        let info_w = INFO_LABEL.len() as u16;
        geometry.screenshot_button = Rect::new(
            right.saturating_sub(shot_w),
            area.y,
            shot_w.min(area.width),
            1,
        );
        geometry.info_button = Rect::new(
            right.saturating_sub(shot_w + 1 + info_w),
            area.y,
            info_w.min(area.width),
            1,
        );
        let limit = geometry.info_button.x.saturating_sub(1);

        let mut x = area.x;
        for &field in Field::ALL {
            let sel = selection.get(field);
            if sel.hidden {
                continue;
            }
            let text_width = display_width(&segment_text(field, sel)) as u16;
            let width = text_width.min(limit.saturating_sub(x));
            if width == 0 {
                break;
            }
            geometry.fields.push((field, Rect::new(x, area.y, width, 1)));
            x += width + 1;
        }

        geometry
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<ToolbarHit> {
        let inside = |r: Rect| r.width > 0 && col >= r.x && col < r.x + r.width && row == r.y;
        if inside(self.info_button) {
            return Some(ToolbarHit::Info);
        }
        if inside(self.screenshot_button) {
            return Some(ToolbarHit::Screenshot);
        }
        self.fields
            .iter()
            .find(|(_, r)| inside(*r))
            .map(|(f, _)| ToolbarHit::Field(*f))
    }
}

/// Text of one selector segment, e.g. `" File: trace ▾ 2/5 "`.
fn segment_text(field: Field, sel: &Selectable) -> String {
    let value = if sel.is_empty() {
        "—".to_string()
    } else {
        truncate(sel.label(), MAX_VALUE_CHARS)
    };
    let position = match sel.selected_index() {
        Some(i) => format!(" {}/{}", i + 1, sel.options().len()),
        None => String::new(),
    };
    format!(" {}: {} ▾{} ", field.label(), value, position)
}

/// Terminal columns taken by `text`; wide (e.g. CJK) characters count twice.
fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ───────────────────────────────────────── widget ────────────

pub struct Toolbar<'a> {
    pub selection: &'a SelectionState,
    pub focus: Field,
}

impl<'a> Widget for Toolbar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::toolbar_style());
        let geometry = ToolbarGeometry::compute(area, self.selection);

        for (field, rect) in &geometry.fields {
            let sel = self.selection.get(*field);
            let text = segment_text(*field, sel);
            let line = if *field == self.focus {
                Line::from(Span::styled(text, Theme::focused_field_style()))
            } else {
                let label = format!(" {}:", field.label());
                let rest = text[label.len()..].to_string();
                Line::from(vec![
                    Span::styled(label, Theme::field_label_style()),
                    Span::styled(rest, Theme::field_value_style()),
                ])
            };
            buf.set_line(rect.x, rect.y, &line, rect.width);
        }

        for (rect, label) in [
            (geometry.info_button, INFO_LABEL),
            (geometry.screenshot_button, SCREENSHOT_LABEL),
        ] {
            if rect.width > 0 {
                buf.set_line(
                    rect.x,
                    rect.y,
                    &Line::from(Span::styled(label, Theme::button_style())),
                    rect.width,
                );
            }
        }
    }
}
