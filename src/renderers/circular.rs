//! Nodes evenly spaced on a circle, in document order.

use std::f32::consts::TAU;

use super::{draw_view, Renderer};
use crate::core::canvas::Canvas;
use crate::core::graph::{GraphView, JsonGraph};

pub struct CircularRenderer;

pub(crate) fn positions(count: usize) -> Vec<(f32, f32)> {
    if count == 1 {
        return vec![(0.5, 0.5)];
    }
    (0..count)
        .map(|i| {
            // Start at 12 o'clock.
            let angle = TAU * i as f32 / count as f32 - TAU / 4.0;
            (0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect()
}

impl Renderer for CircularRenderer {
    fn name(&self) -> Option<&str> {
        Some("Circular")
    }

    fn render(&self, graph: &JsonGraph, canvas: &mut Canvas) {
        let view = GraphView::from_json(graph);
        draw_view(&view, &positions(view.nodes.len()), canvas);
    }
}
