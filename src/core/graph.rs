//! Graph documents fetched from the server.
//!
//! [`JsonGraph`] is the opaque parsed document handed to renderers.
//! [`GraphView`] is a tolerant node/edge extraction that the built-in
//! renderers share; a renderer is free to ignore it and read the JSON itself.

use std::collections::HashMap;

use serde_json::Value;

// ───────────────────────────────────────── document ──────────

/// A parsed JSON graph document.  Lives for one load/render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonGraph(pub Value);

impl JsonGraph {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for JsonGraph {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ───────────────────────────────────────── view ──────────────

/// Node/edge lists extracted from a [`JsonGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphView {
    /// Node ids in document order.
    pub nodes: Vec<String>,
    /// Edges as `(source, target)` indices into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

const NODE_KEYS: &[&str] = &["nodes", "vertices", "instances"];
const EDGE_KEYS: &[&str] = &["edges", "links", "connections"];
const ID_KEYS: &[&str] = &["id", "name", "label"];

impl GraphView {
    pub fn from_json(graph: &JsonGraph) -> Self {
        let mut view = GraphView::default();
        let mut index: HashMap<String, usize> = HashMap::new();

        if let Some(nodes) = first_array(graph.value(), NODE_KEYS) {
            for (i, node) in nodes.iter().enumerate() {
                let id = node_id(node).unwrap_or_else(|| i.to_string());
                view.intern(&mut index, id);
            }
        }

        if let Some(edges) = first_array(graph.value(), EDGE_KEYS) {
            for edge in edges {
                let Some((src, dst)) = edge_endpoints(edge) else {
                    continue;
                };
                let a = view.resolve(&mut index, src);
                let b = view.resolve(&mut index, dst);
                view.edges.push((a, b));
            }
        }

        view
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn intern(&mut self, index: &mut HashMap<String, usize>, id: String) -> usize {
        if let Some(&i) = index.get(&id) {
            return i;
        }
        let i = self.nodes.len();
        index.insert(id.clone(), i);
        self.nodes.push(id);
        i
    }

    /// Numeric endpoints address nodes by position when in range; everything
    /// else is looked up (or added) by id.
    fn resolve(&mut self, index: &mut HashMap<String, usize>, endpoint: &Value) -> usize {
        if let Some(n) = endpoint.as_u64() {
            let n = n as usize;
            if n < self.nodes.len() {
                return n;
            }
        }
        let id = scalar_to_string(endpoint).unwrap_or_default();
        self.intern(index, id)
    }
}

// ───────────────────────────────────────── helpers ───────────

fn first_array<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|k| value.get(k).and_then(Value::as_array))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn node_id(node: &Value) -> Option<String> {
    if let Some(id) = scalar_to_string(node) {
        return Some(id);
    }
    ID_KEYS
        .iter()
        .find_map(|k| node.get(k).and_then(scalar_to_string))
}

fn edge_endpoints(edge: &Value) -> Option<(&Value, &Value)> {
    if let Some(pair) = edge.as_array() {
        return match pair.as_slice() {
            [a, b, ..] => Some((a, b)),
            _ => None,
        };
    }
    let src = edge.get("source").or_else(|| edge.get("from"))?;
    let dst = edge.get("target").or_else(|| edge.get("to"))?;
    Some((src, dst))
}
