//! Shows a [`Canvas`] in the terminal with `▀` half-blocks and overlays the
//! canvas labels as text.

use image::imageops::FilterType;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use crate::core::canvas::Canvas;

use super::theme::Theme;

pub struct CanvasView<'a> {
    pub canvas: &'a Canvas,
}

/// Scaled size `(w, h)` in pixels that fits `area` (1 px per column, 2 px
/// per row) while preserving the canvas aspect ratio.
fn fit_size(canvas: &Canvas, area: Rect) -> (u32, u32) {
    let max_px_w = area.width as f64;
    let max_px_h = area.height as f64 * 2.0;
    let src_w = canvas.width() as f64;
    let src_h = canvas.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h);
    (
        (src_w * scale).round().max(1.0) as u32,
        (src_h * scale).round().max(1.0) as u32,
    )
}

impl<'a> Widget for CanvasView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (fit_w, fit_h) = fit_size(self.canvas, area);
        let rgba = image::imageops::resize(self.canvas.image(), fit_w, fit_h, FilterType::Triangle);
        let (iw, ih) = (rgba.width(), rgba.height());
        let col_offset = area.width.saturating_sub(iw as u16) / 2;

        for row in 0..area.height {
            let yt = row as u32 * 2;
            let yb = yt + 1;
            if yt >= ih {
                break;
            }
            for col in 0..iw.min(area.width as u32) {
                let t = rgba.get_pixel(col, yt);
                let fg = Color::Rgb(t[0], t[1], t[2]);
                let bg = if yb < ih {
                    let b = rgba.get_pixel(col, yb);
                    Color::Rgb(b[0], b[1], b[2])
                } else {
                    Color::Reset
                };
                if let Some(cell) =
                    buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row))
                {
                    cell.set_char('▀').set_fg(fg).set_bg(bg);
                }
            }
        }

        // Labels: map pixel anchors onto the scaled grid.
        let sx = iw as f64 / self.canvas.width() as f64;
        let sy = ih as f64 / self.canvas.height() as f64 / 2.0;
        let right = area.x + col_offset + iw.min(area.width as u32) as u16;
        for label in self.canvas.labels() {
            let col = area.x + col_offset + (label.x as f64 * sx) as u16;
            let row = area.y + (label.y as f64 * sy) as u16;
            if col >= right || row >= area.y + area.height {
                continue;
            }
            buf.set_stringn(
                col,
                row,
                &label.text,
                (right - col) as usize,
                Theme::node_label_style(),
            );
        }
    }
}
