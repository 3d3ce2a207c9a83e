//! Longest-path layering, layers left to right.
//!
//! Nodes are ordered by reverse DFS post-order (roots in document order).
//! Edges pointing backwards in that order close a cycle and are ignored
//! for layering, so every graph gets a layout.

use super::{draw_view, Renderer};
use crate::core::canvas::Canvas;
use crate::core::graph::{GraphView, JsonGraph};

pub struct LayeredRenderer;

/// Layer index per node.
pub(crate) fn layers(view: &GraphView) -> Vec<usize> {
    let n = view.nodes.len();
    let mut adj = vec![Vec::new(); n];
    for &(a, b) in &view.edges {
        if a != b {
            adj[a].push(b);
        }
    }

    let order = reverse_postorder(&adj);
    let mut rank = vec![0usize; n];
    for (pos, &node) in order.iter().enumerate() {
        rank[node] = pos;
    }

    let mut layer = vec![0usize; n];
    for &u in &order {
        for &v in &adj[u] {
            if rank[v] > rank[u] {
                layer[v] = layer[v].max(layer[u] + 1);
            }
        }
    }
    layer
}

fn reverse_postorder(adj: &[Vec<usize>]) -> Vec<usize> {
    let n = adj.len();
    let mut visited = vec![false; n];
    let mut post = Vec::with_capacity(n);

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![(root, 0usize)];
        while let Some(top) = stack.last_mut() {
            let node = top.0;
            if let Some(&child) = adj[node].get(top.1) {
                top.1 += 1;
                if !visited[child] {
                    visited[child] = true;
                    stack.push((child, 0));
                }
            } else {
                post.push(node);
                stack.pop();
            }
        }
    }

    post.reverse();
    post
}

pub(crate) fn positions(view: &GraphView) -> Vec<(f32, f32)> {
    let layer = layers(view);
    let depth = layer.iter().copied().max().unwrap_or(0);

    let mut per_layer = vec![0usize; depth + 1];
    for &l in &layer {
        per_layer[l] += 1;
    }

    let mut seen = vec![0usize; depth + 1];
    layer
        .iter()
        .map(|&l| {
            let slot = seen[l];
            seen[l] += 1;
            let x = if depth == 0 { 0.5 } else { l as f32 / depth as f32 };
            let y = if per_layer[l] <= 1 {
                0.5
            } else {
                slot as f32 / (per_layer[l] - 1) as f32
            };
            (x, y)
        })
        .collect()
}

impl Renderer for LayeredRenderer {
    fn name(&self) -> Option<&str> {
        Some("Layered")
    }

    fn render(&self, graph: &JsonGraph, canvas: &mut Canvas) {
        let view = GraphView::from_json(graph);
        draw_view(&view, &positions(&view), canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize, edges: &[(usize, usize)]) -> GraphView {
        GraphView {
            nodes: (0..n).map(|i| i.to_string()).collect(),
            edges: edges.to_vec(),
        }
    }

    #[test]
    fn chain_gets_one_layer_per_node() {
        assert_eq!(layers(&view(3, &[(0, 1), (1, 2)])), [0, 1, 2]);
    }

    #[test]
    fn longest_path_wins() {
        // 0 → 1 → 2 and a shortcut 0 → 2.
        assert_eq!(layers(&view(3, &[(0, 2), (0, 1), (1, 2)])), [0, 1, 2]);
    }

    #[test]
    fn cycles_do_not_loop() {
        assert_eq!(layers(&view(2, &[(0, 1), (1, 0), (1, 1)])), [0, 1]);
    }

    #[test]
    fn isolated_nodes_share_first_layer() {
        let p = positions(&view(2, &[]));
        assert_eq!(p, [(0.5, 0.0), (0.5, 1.0)]);
    }
}
