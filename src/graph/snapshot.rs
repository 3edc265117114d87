//! In-memory snapshot of the rendered protein network
//!
//! The rendering library (Cytoscape.js on the TypeScript side) owns the live
//! graph. Before any analysis pass, the UI hands us the current node/edge
//! state and we hold it here as an immutable snapshot backed by petgraph.
//! All derived results (components, highlight flags) are computed against
//! one snapshot and never mutate it.

// Use petgraph from rustworkx-core to ensure version compatibility
use rustworkx_core::petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use rustworkx_core::petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

// =============================================================================
// Types
// =============================================================================

/// A protein node as rendered by the UI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkNode {
    /// Stable element id (Cytoscape node id)
    pub id: String,
    /// Display label; whitespace-separated protein tokens
    pub label: String,
    /// Node type/category from the upstream data source ("protein", "complex", ...)
    pub kind: String,
}

impl NetworkNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: kind.into(),
        }
    }
}

/// Edge category used for matched/unmatched ratio filtering
///
/// The upstream comparison pipeline tags every interaction edge with one of
/// four categories; anything else degrades to `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeCategory {
    MatchedPrediction,
    MatchedReference,
    Prediction,
    Reference,
    Unknown,
}

impl EdgeCategory {
    /// Lenient parse from the upstream string tag
    pub fn parse(raw: &str) -> Self {
        match raw {
            "matched_prediction" => EdgeCategory::MatchedPrediction,
            "matched_reference" => EdgeCategory::MatchedReference,
            "prediction" => EdgeCategory::Prediction,
            "reference" => EdgeCategory::Reference,
            _ => EdgeCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCategory::MatchedPrediction => "matched_prediction",
            EdgeCategory::MatchedReference => "matched_reference",
            EdgeCategory::Prediction => "prediction",
            EdgeCategory::Reference => "reference",
            EdgeCategory::Unknown => "unknown",
        }
    }
}

/// An interaction edge between two proteins
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkEdge {
    /// Stable element id (Cytoscape edge id)
    pub id: String,
    pub source: String,
    pub target: String,
    pub category: EdgeCategory,
}

impl NetworkEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        category: EdgeCategory,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            category,
        }
    }
}

// =============================================================================
// NetworkSnapshot
// =============================================================================

/// The immutable network state for one analysis pass
///
/// Uses an undirected graph (UnGraph) because protein interaction edges have
/// no meaningful direction for connectivity purposes:
/// - Nodes are NetworkNode (proteins/complexes)
/// - Edges are NetworkEdge (interactions with a comparison category)
pub struct NetworkSnapshot {
    /// The underlying petgraph structure
    graph: UnGraph<NetworkNode, NetworkEdge>,
    /// Fast lookup: node ID → petgraph NodeIndex
    id_to_index: HashMap<String, NodeIndex>,
    /// Edges rejected at load because an endpoint id was unknown
    dropped_edges: usize,
}

impl Default for NetworkSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkSnapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            id_to_index: HashMap::new(),
            dropped_edges: 0,
        }
    }

    /// Build a snapshot from plain node/edge lists
    ///
    /// Edges referencing unknown node ids are silently dropped (the count is
    /// available via `dropped_edge_count` for boundary diagnostics). Duplicate
    /// node ids keep the first occurrence.
    pub fn from_parts(nodes: Vec<NetworkNode>, edges: Vec<NetworkEdge>) -> Self {
        let mut snapshot = Self::new();
        for node in nodes {
            snapshot.ensure_node(node);
        }
        for edge in edges {
            if snapshot.add_edge(edge).is_none() {
                snapshot.dropped_edges += 1;
            }
        }
        snapshot
    }

    /// Add a node or get the existing node's index
    pub fn ensure_node(&mut self, node: NetworkNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&node.id) {
            return idx;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_index.insert(id, idx);
        idx
    }

    /// Add an edge between two existing nodes
    ///
    /// Returns None if either endpoint id is unknown.
    pub fn add_edge(&mut self, edge: NetworkEdge) -> Option<EdgeIndex> {
        let source_idx = *self.id_to_index.get(&edge.source)?;
        let target_idx = *self.id_to_index.get(&edge.target)?;

        Some(self.graph.add_edge(source_idx, target_idx, edge))
    }

    /// Find a node by ID
    pub fn get_node(&self, id: &str) -> Option<&NetworkNode> {
        let idx = self.id_to_index.get(id)?;
        self.graph.node_weight(*idx)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &NetworkNode> {
        self.graph.node_weights()
    }

    /// Iterate over all edges
    pub fn edges(&self) -> impl Iterator<Item = &NetworkEdge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Edges rejected at load time because an endpoint id was unknown
    pub fn dropped_edge_count(&self) -> usize {
        self.dropped_edges
    }

    // =========================================================================
    // Traversal substrate
    // =========================================================================

    /// Build the undirected adjacency map used by every traversal
    ///
    /// Every node id appears as a key (isolated nodes map to an empty list).
    /// Neighbor lists are lexicographically sorted and deduplicated, and the
    /// BTreeMap iterates keys in lexicographic order, which is what makes
    /// component id assignment reproducible across calls.
    pub fn sorted_adjacency(&self) -> BTreeMap<String, Vec<String>> {
        let mut adjacency: BTreeMap<String, Vec<String>> = self
            .nodes()
            .map(|node| (node.id.clone(), Vec::new()))
            .collect();

        for edge_ref in self.graph.edge_references() {
            let (Some(source), Some(target)) = (
                self.graph.node_weight(edge_ref.source()),
                self.graph.node_weight(edge_ref.target()),
            ) else {
                continue;
            };

            if let Some(list) = adjacency.get_mut(&source.id) {
                list.push(target.id.clone());
            }
            if source.id != target.id {
                if let Some(list) = adjacency.get_mut(&target.id) {
                    list.push(source.id.clone());
                }
            }
        }

        for list in adjacency.values_mut() {
            list.sort();
            list.dedup();
        }

        adjacency
    }

    /// Count connected components via rustworkx-core
    ///
    /// Used by tests as an independent cross-check against the deterministic
    /// partition in `analysis::components`.
    pub fn component_count(&self) -> usize {
        use rustworkx_core::connectivity::number_connected_components;

        if self.graph.node_count() == 0 {
            return 0;
        }

        number_connected_components(&self.graph)
    }

    /// Order-insensitive fingerprint of everything analysis depends on:
    /// node ids, labels, and edge endpoints/categories.
    pub fn fingerprint(&self) -> u64 {
        let mut node_keys: Vec<(&str, &str)> = self
            .nodes()
            .map(|n| (n.id.as_str(), n.label.as_str()))
            .collect();
        node_keys.sort();

        let mut edge_keys: Vec<(&str, &str, &'static str)> = self
            .edges()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.category.as_str()))
            .collect();
        edge_keys.sort();

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        node_keys.hash(&mut hasher);
        edge_keys.hash(&mut hasher);
        hasher.finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
