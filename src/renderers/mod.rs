//! Renderer plugins and the registry that names them.
//!
//! A renderer consumes a [`JsonGraph`] and draws onto a [`Canvas`].  The
//! orchestrator only enumerates the registry (to fill the layout selectable)
//! and looks renderers up by key.

pub mod circular;
pub mod grid;
pub mod layered;

use image::Rgba;

use crate::core::canvas::{Canvas, BACKGROUND};
use crate::core::graph::{GraphView, JsonGraph};

/// A pluggable layout algorithm.
pub trait Renderer: Send + Sync {
    /// Display name for the layout selectable.  `None` falls back to the key.
    fn name(&self) -> Option<&str> {
        None
    }

    fn render(&self, graph: &JsonGraph, canvas: &mut Canvas);
}

// ───────────────────────────────────────── registry ──────────

/// Ordered key → renderer map.  Registration order is display order.
#[derive(Default)]
pub struct RendererRegistry {
    entries: Vec<(String, Box<dyn Renderer>)>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The renderers shipped with the viewer.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("circular", Box::new(circular::CircularRenderer));
        registry.register("grid", Box::new(grid::GridRenderer));
        registry.register("layered", Box::new(layered::LayeredRenderer));
        registry
    }

    /// Add a renderer.  Re-registering a key replaces it in place.
    pub fn register(&mut self, key: impl Into<String>, renderer: Box<dyn Renderer>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = renderer,
            None => self.entries.push((key, renderer)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&dyn Renderer> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, r)| r.as_ref())
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Display labels in key order (`name()` or the key itself).
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, r)| r.name().unwrap_or(k).to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ───────────────────────────────────────── drawing ───────────

const EDGE_COLOR: Rgba<u8> = Rgba([110, 118, 140, 255]);
const NODE_COLOR: Rgba<u8> = Rgba([86, 182, 194, 255]);

/// Draw `view` with node `positions` given in unit coordinates (0..=1 on
/// both axes).  Shared by every built-in renderer.
pub(crate) fn draw_view(view: &GraphView, positions: &[(f32, f32)], canvas: &mut Canvas) {
    canvas.clear(BACKGROUND);
    if view.is_empty() {
        return;
    }

    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let margin = 0.08;
    let to_px = |(x, y): (f32, f32)| -> (i32, i32) {
        let px = (margin + x * (1.0 - 2.0 * margin)) * w;
        let py = (margin + y * (1.0 - 2.0 * margin)) * h;
        (px.round() as i32, py.round() as i32)
    };

    for &(a, b) in &view.edges {
        if let (Some(&pa), Some(&pb)) = (positions.get(a), positions.get(b)) {
            canvas.draw_line(to_px(pa), to_px(pb), EDGE_COLOR);
        }
    }

    let radius = (w.min(h) / (view.nodes.len() as f32).sqrt() / 10.0).clamp(2.0, 12.0) as i32;
    for (id, &pos) in view.nodes.iter().zip(positions) {
        let (x, y) = to_px(pos);
        canvas.fill_circle((x, y), radius, NODE_COLOR);
        canvas.add_label(x + radius + 1, y, id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Renderer for Named {
        fn name(&self) -> Option<&str> {
            Some(self.0)
        }

        fn render(&self, _graph: &JsonGraph, _canvas: &mut Canvas) {}
    }

    struct Unnamed;

    impl Renderer for Unnamed {
        fn render(&self, _graph: &JsonGraph, _canvas: &mut Canvas) {}
    }

    #[test]
    fn labels_fall_back_to_keys() {
        let mut r = RendererRegistry::new();
        r.register("force", Box::new(Named("Force directed")));
        r.register("raw", Box::new(Unnamed));
        assert_eq!(r.keys(), ["force", "raw"]);
        assert_eq!(r.labels(), ["Force directed", "raw"]);
    }

    #[test]
    fn reregistering_keeps_position() {
        let mut r = RendererRegistry::new();
        r.register("a", Box::new(Unnamed));
        r.register("b", Box::new(Unnamed));
        r.register("a", Box::new(Named("A")));
        assert_eq!(r.keys(), ["a", "b"]);
        assert_eq!(r.get("a").and_then(|x| x.name()), Some("A"));
        assert!(r.get("missing").is_none());
    }

    #[test]
    fn builtin_order_is_stable() {
        let r = RendererRegistry::builtin();
        assert_eq!(r.keys(), ["circular", "grid", "layered"]);
        assert_eq!(r.labels(), ["Circular", "Grid", "Layered"]);
    }
}
