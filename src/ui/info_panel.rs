//! Info panel, shown instead of the canvas.  Carries the folder-list alert
//! when the server could not be reached, plus connection details and the
//! current key bindings.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};

use super::theme::Theme;

pub struct InfoPanel<'a> {
    pub alert: Option<&'a str>,
    pub config: &'a AppConfig,
}

impl<'a> InfoPanel<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        if let Some(alert) = self.alert {
            lines.push(Line::from(Span::styled(
                "Could not load the folder list.",
                Theme::alert_style(),
            )));
            lines.push(Line::from(Span::styled(alert.to_string(), Theme::alert_style())));
            lines.push(Line::raw(""));
        }

        lines.push(Line::raw(
            "Pick a folder, a JSON graph file and a layout in the toolbar; \
             the graph is drawn on the canvas.",
        ));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Server      ", Theme::field_label_style()),
            Span::raw(self.config.server_url.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Screenshots ", Theme::field_label_style()),
            Span::raw(self.config.screenshot_dir.display().to_string()),
        ]));
        lines.push(Line::raw(""));

        for &action in Action::ALL {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<20}", action.label()), Style::default()),
                Span::styled(self.config.display_bindings(action), Theme::button_style()),
            ]));
        }

        lines
    }
}

impl<'a> Widget for InfoPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.alert.is_some() {
            Theme::alert_style()
        } else {
            Theme::border_style()
        };
        let block = Block::default()
            .title(" Info ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(border);

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn alert_comes_first() {
        let config = AppConfig::default();
        let panel = InfoPanel {
            alert: Some("connection refused"),
            config: &config,
        };
        let lines = panel.lines();
        assert!(text(&lines[..2]).contains("connection refused"));
    }

    #[test]
    fn lists_every_action() {
        let config = AppConfig::default();
        let all = text(&InfoPanel { alert: None, config: &config }.lines());
        for action in Action::ALL {
            assert!(all.contains(action.label()));
        }
        assert!(all.contains(&config.server_url));
    }
}
