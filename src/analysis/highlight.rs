//! Protein-presence highlighting
//!
//! The user picks a set of protein tokens; every rendered node is flagged
//! hit/dim by testing its whitespace-tokenized label against the selection.
//! Optionally the view is restricted to the parts of the graph reachable
//! from a hit node. This module only computes flags; the adapter layer on
//! the TypeScript side writes them onto the live Cytoscape elements in one
//! batch.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::graph::NetworkSnapshot;

use super::components::compute_components;
use super::traversal::reachable_from_seeds;

// =============================================================================
// Types
// =============================================================================

/// Whether a node must contain every selected token or at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    All,
    Any,
}

impl MatchMode {
    /// Lenient parse from the UI's mode string; anything unrecognized
    /// degrades to `Any` (the less restrictive reading).
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" | "All" | "ALL" => MatchMode::All,
            _ => MatchMode::Any,
        }
    }
}

/// Derived flags for one node
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeHighlight {
    pub hit: bool,
    pub dim: bool,
    /// Selected tokens found in this node's label, in selection order
    pub matched_tokens: Vec<String>,
}

/// Full result of one highlight recompute
#[derive(Debug, Clone, Default, Serialize)]
pub struct HighlightResult {
    /// False when the selection was empty (highlighting inactive)
    pub active: bool,
    /// Flags for every node id in the snapshot
    pub nodes: BTreeMap<String, NodeHighlight>,
    /// Present only when component filtering was requested and active
    pub visible_nodes: Option<BTreeSet<String>>,
    /// Edge ids with both endpoints visible; same presence rule
    pub visible_edges: Option<BTreeSet<String>>,
    /// Union of matched tokens per component; a component is relevant
    /// iff its entry is non-empty (absent means no matches)
    pub component_matched_tokens: BTreeMap<usize, BTreeSet<String>>,
}

impl HighlightResult {
    /// All-clear result for an inactive selection
    fn inactive(snapshot: &NetworkSnapshot) -> Self {
        Self {
            active: false,
            nodes: snapshot
                .nodes()
                .map(|n| (n.id.clone(), NodeHighlight::default()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn hit_node_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, flags)| flags.hit)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

// =============================================================================
// Tokenization & matching
// =============================================================================

/// Split a label on runs of whitespace, dropping empty tokens
///
/// Idempotent and non-mutating; a label that is effectively blank yields an
/// empty token list rather than an error.
pub fn tokenize(label: &str) -> Vec<String> {
    label.split_whitespace().map(str::to_string).collect()
}

/// Normalize the user's selection: drop blanks, collapse duplicates
/// keeping the first occurrence (order is significant for matched_tokens).
fn normalize_selection(selection: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    selection
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty() && seen.insert(token))
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Recompute
// =============================================================================

/// Recompute highlight flags for the whole snapshot
///
/// Empty (or blank-only) selection means highlighting is inactive: every
/// node gets `hit=false, dim=false` and no filtering happens regardless of
/// `filter_to_matching_components`. This is explicit, not the vacuous-truth
/// reading of ALL mode over an empty set.
pub fn recompute_highlight(
    snapshot: &NetworkSnapshot,
    selection: &[String],
    mode: MatchMode,
    filter_to_matching_components: bool,
) -> HighlightResult {
    let selection = normalize_selection(selection);
    if selection.is_empty() {
        return HighlightResult::inactive(snapshot);
    }

    let partition = compute_components(snapshot);

    let mut result = HighlightResult {
        active: true,
        ..HighlightResult::default()
    };

    for node in snapshot.nodes() {
        let node_tokens: HashSet<String> = tokenize(&node.label).into_iter().collect();

        let matched_tokens: Vec<String> = selection
            .iter()
            .filter(|token| node_tokens.contains(token.as_str()))
            .cloned()
            .collect();

        let hit = match mode {
            MatchMode::All => matched_tokens.len() == selection.len(),
            MatchMode::Any => !matched_tokens.is_empty(),
        };

        if !matched_tokens.is_empty() {
            if let Some(component_id) = partition.component_of(&node.id) {
                result
                    .component_matched_tokens
                    .entry(component_id)
                    .or_default()
                    .extend(matched_tokens.iter().cloned());
            }
        }

        result.nodes.insert(
            node.id.clone(),
            NodeHighlight {
                hit,
                dim: !hit,
                matched_tokens,
            },
        );
    }

    if filter_to_matching_components {
        // Visibility is BFS-from-hits over the live adjacency, not a
        // partition lookup, so it stays correct even against a stale
        // partition held elsewhere.
        let adjacency = snapshot.sorted_adjacency();
        let seeds: Vec<&str> = result.hit_node_ids();
        let reachable = reachable_from_seeds(&adjacency, seeds.iter().copied());

        let visible_edges: BTreeSet<String> = snapshot
            .edges()
            .filter(|edge| reachable.contains(&edge.source) && reachable.contains(&edge.target))
            .map(|edge| edge.id.clone())
            .collect();

        result.visible_nodes = Some(reachable.into_iter().collect());
        result.visible_edges = Some(visible_edges);
    }

    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeCategory, NetworkEdge, NetworkNode};

    fn selection(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    /// Nodes A("p1 p2"), B("p2 p3"), C("p4"); edge A-B. C is its own component.
    fn abc_snapshot() -> NetworkSnapshot {
        NetworkSnapshot::from_parts(
            vec![
                NetworkNode::new("A", "p1 p2", "protein"),
                NetworkNode::new("B", "p2 p3", "protein"),
                NetworkNode::new("C", "p4", "protein"),
            ],
            vec![NetworkEdge::new("e1", "A", "B", EdgeCategory::Prediction)],
        )
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("p1 p2"), vec!["p1", "p2"]);
        assert_eq!(tokenize("  p1\t\np2  "), vec!["p1", "p2"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_any_mode_scenario() {
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["p1", "p3"]),
            MatchMode::Any,
            false,
        );

        assert!(result.active);
        assert!(result.nodes["A"].hit); // has p1
        assert!(result.nodes["B"].hit); // has p3
        assert!(!result.nodes["C"].hit);
        assert!(result.nodes["C"].dim);
    }

    #[test]
    fn test_all_mode_scenario() {
        // No single node carries both p1 and p3
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["p1", "p3"]),
            MatchMode::All,
            false,
        );

        assert!(result.nodes.values().all(|flags| !flags.hit));
        assert!(result.nodes.values().all(|flags| flags.dim));
    }

    #[test]
    fn test_all_hits_are_any_hits() {
        let snapshot = abc_snapshot();
        let sel = selection(&["p2", "p3"]);

        let all = recompute_highlight(&snapshot, &sel, MatchMode::All, false);
        let any = recompute_highlight(&snapshot, &sel, MatchMode::Any, false);

        for (id, flags) in &all.nodes {
            if flags.hit {
                assert!(any.nodes[id].hit, "{id} hit under ALL but not ANY");
            }
        }
        // And the subset is proper here: B hits both, A hits only ANY
        assert!(all.nodes["B"].hit);
        assert!(!all.nodes["A"].hit);
        assert!(any.nodes["A"].hit);
    }

    #[test]
    fn test_empty_selection_inactive() {
        let result = recompute_highlight(&abc_snapshot(), &[], MatchMode::All, true);

        assert!(!result.active);
        assert!(result.nodes.values().all(|f| !f.hit && !f.dim));
        assert!(result.visible_nodes.is_none());
        assert!(result.visible_edges.is_none());
        assert!(result.component_matched_tokens.is_empty());
    }

    #[test]
    fn test_blank_selection_treated_as_empty() {
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["  ", ""]),
            MatchMode::Any,
            true,
        );
        assert!(!result.active);
    }

    #[test]
    fn test_clearing_after_active_call() {
        let snapshot = abc_snapshot();
        let active = recompute_highlight(&snapshot, &selection(&["p1"]), MatchMode::Any, false);
        assert!(active.nodes["A"].hit);

        let cleared = recompute_highlight(&snapshot, &[], MatchMode::Any, false);
        assert!(cleared.nodes.values().all(|f| !f.hit && !f.dim));
    }

    #[test]
    fn test_matched_tokens_selection_order() {
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["p2", "p1", "p2"]),
            MatchMode::Any,
            false,
        );

        // Duplicates collapse keeping first occurrence; order is selection order
        assert_eq!(result.nodes["A"].matched_tokens, vec!["p2", "p1"]);
        assert_eq!(result.nodes["B"].matched_tokens, vec!["p2"]);
        assert!(result.nodes["C"].matched_tokens.is_empty());
    }

    #[test]
    fn test_component_matched_tokens_aggregate() {
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["p1", "p3"]),
            MatchMode::Any,
            false,
        );

        // Component 0 = {A, B}: union of matches = {p1, p3}. Component 1 = {C}: absent.
        let aggregated = &result.component_matched_tokens;
        assert_eq!(aggregated.len(), 1);
        let tokens: Vec<&str> = aggregated[&0].iter().map(String::as_str).collect();
        assert_eq!(tokens, vec!["p1", "p3"]);
    }

    #[test]
    fn test_filter_restricts_to_reachable() {
        let result = recompute_highlight(
            &abc_snapshot(),
            &selection(&["p1"]),
            MatchMode::Any,
            true,
        );

        let visible = result.visible_nodes.as_ref().unwrap();
        assert!(visible.contains("A"));
        assert!(visible.contains("B")); // reachable from the hit node A
        assert!(!visible.contains("C"));

        let visible_edges = result.visible_edges.as_ref().unwrap();
        assert!(visible_edges.contains("e1"));
    }

    #[test]
    fn test_filter_matches_component_union() {
        // The BFS-visible set must equal the union of partition components
        // containing at least one hit node.
        let snapshot = abc_snapshot();
        let result = recompute_highlight(&snapshot, &selection(&["p4"]), MatchMode::Any, true);

        let partition = compute_components(&snapshot);
        let expected: BTreeSet<String> = partition
            .component_to_nodes
            .values()
            .filter(|members| members.iter().any(|id| result.nodes[id].hit))
            .flatten()
            .cloned()
            .collect();

        assert_eq!(result.visible_nodes.as_ref().unwrap(), &expected);
        assert_eq!(expected.len(), 1); // only C
    }

    #[test]
    fn test_idempotence() {
        let snapshot = abc_snapshot();
        let sel = selection(&["p2"]);

        let first = recompute_highlight(&snapshot, &sel, MatchMode::Any, true);
        let second = recompute_highlight(&snapshot, &sel, MatchMode::Any, true);

        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.visible_nodes, second.visible_nodes);
        assert_eq!(first.visible_edges, second.visible_edges);
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!(MatchMode::parse("all"), MatchMode::All);
        assert_eq!(MatchMode::parse("ALL"), MatchMode::All);
        assert_eq!(MatchMode::parse("any"), MatchMode::Any);
        assert_eq!(MatchMode::parse("garbage"), MatchMode::Any);
    }

    #[test]
    fn test_empty_snapshot() {
        let result = recompute_highlight(
            &NetworkSnapshot::new(),
            &selection(&["p1"]),
            MatchMode::Any,
            true,
        );
        assert!(result.active);
        assert!(result.nodes.is_empty());
        assert!(result.visible_nodes.as_ref().unwrap().is_empty());
    }
}
