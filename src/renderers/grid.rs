//! Nodes laid out row by row on a near-square grid.

use super::{draw_view, Renderer};
use crate::core::canvas::Canvas;
use crate::core::graph::{GraphView, JsonGraph};

pub struct GridRenderer;

pub(crate) fn positions(count: usize) -> Vec<(f32, f32)> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let step = |n: usize, i: usize| {
        if n <= 1 {
            0.5
        } else {
            i as f32 / (n - 1) as f32
        }
    };
    (0..count)
        .map(|i| (step(cols, i % cols), step(rows, i / cols)))
        .collect()
}

impl Renderer for GridRenderer {
    fn name(&self) -> Option<&str> {
        Some("Grid")
    }

    fn render(&self, graph: &JsonGraph, canvas: &mut Canvas) {
        let view = GraphView::from_json(graph);
        draw_view(&view, &positions(view.nodes.len()), canvas);
    }
}
