//! Pixel surface that renderers draw onto.
//!
//! Backed by an `image::RgbaImage` so the same pixels feed the half-block
//! terminal view and the PNG screenshot export.  Text is not rasterised;
//! renderers attach labels at pixel anchors and the terminal view overlays
//! them.

use image::{Rgba, RgbaImage};

/// Pixels per half-block cell in each direction.  Gives exports a usable
/// resolution while the terminal view downsamples.
pub const PIXELS_PER_CELL: u32 = 4;

pub const BACKGROUND: Rgba<u8> = Rgba([24, 26, 33, 255]);

/// A text label anchored at a pixel position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub x: u32,
    pub y: u32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    labels: Vec<Label>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            labels: Vec::new(),
        }
    }

    /// Canvas sized for a terminal area of `cols` × `rows` cells.  Each cell
    /// shows two vertical pixels, so the aspect matches the half-block view.
    pub fn for_viewport(cols: u16, rows: u16) -> Self {
        Self::new(
            cols as u32 * PIXELS_PER_CELL,
            rows as u32 * 2 * PIXELS_PER_CELL,
        )
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
        self.labels.clear();
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Bresenham line; pixels outside the surface are clipped.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Rgba<u8>) {
        let (cx, cy) = center;
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn add_label(&mut self, x: i32, y: i32, text: impl Into<String>) {
        let x = x.clamp(0, self.width() as i32 - 1) as u32;
        let y = y.clamp(0, self.height() as i32 - 1) as u32;
        self.labels.push(Label {
            x,
            y,
            text: text.into(),
        });
    }
}
