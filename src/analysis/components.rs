//! Deterministic connected-component partition
//!
//! Component ids must be stable across recomputes on an unchanged network:
//! the UI shows cross-references like "this protein also appears in
//! component #7", so the assignment cannot depend on the rendering engine's
//! internal element order. Seeds are taken in lexicographic node-id order
//! and ids are handed out sequentially from 0.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::graph::NetworkSnapshot;

use super::traversal::bfs_collect;

/// The component partition of one snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentPartition {
    /// Total map: every node id in the snapshot → its component id
    pub node_to_component: HashMap<String, usize>,
    /// Inverse map; member lists are lexicographically sorted
    pub component_to_nodes: BTreeMap<usize, Vec<String>>,
}

impl ComponentPartition {
    pub fn component_count(&self) -> usize {
        self.component_to_nodes.len()
    }

    /// Members of one component (sorted), empty slice if the id is unknown
    pub fn members(&self, component_id: usize) -> &[String] {
        self.component_to_nodes
            .get(&component_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn component_of(&self, node_id: &str) -> Option<usize> {
        self.node_to_component.get(node_id).copied()
    }
}

/// Compute the deterministic component partition of a snapshot
///
/// Every node lands in exactly one component; isolated nodes become
/// singletons. An empty snapshot yields empty maps. Never fails.
pub fn compute_components(snapshot: &NetworkSnapshot) -> ComponentPartition {
    let adjacency = snapshot.sorted_adjacency();

    let mut partition = ComponentPartition::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut next_id = 0usize;

    // BTreeMap keys iterate in lexicographic order; the smallest unvisited
    // id always seeds the next component.
    for node_id in adjacency.keys() {
        let mut members = bfs_collect(&adjacency, node_id, &mut visited);
        if members.is_empty() {
            continue;
        }

        members.sort();
        for member in &members {
            partition.node_to_component.insert(member.clone(), next_id);
        }
        partition.component_to_nodes.insert(next_id, members);
        next_id += 1;
    }

    partition
}
