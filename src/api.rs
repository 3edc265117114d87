//! WASM API for the network analysis engine
//!
//! Exposes the analysis core to TypeScript via wasm_bindgen. The UI layer
//! owns the live Cytoscape graph; it hands the current element state to
//! `loadNetwork` and applies the returned flags back onto the renderer in
//! one batch.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    compute_components, recompute_highlight, ComponentPartition, EdgeRatioFilter, EdgeTypeStats,
    HighlightResult, InputsDetector, MatchMode,
};
use crate::graph::{EdgeCategory, NetworkEdge, NetworkNode, NetworkSnapshot};
use crate::perf::{
    estimate_layout_ms, LayoutPreferences, PerformanceTier, SizeBucket, WarningDismissals,
};

// =============================================================================
// Input Types (from TypeScript)
// =============================================================================

/// Node element as serialized by the Cytoscape adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// "protein", "complex", ... — free-form upstream type tag
    #[serde(default)]
    pub kind: Option<String>,
}

/// Edge element as serialized by the Cytoscape adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// "matched_prediction", "reference", ... — unknown tags degrade to Unknown
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// Output Types (to TypeScript)
// =============================================================================

/// Result of loading a network snapshot
#[derive(Serialize)]
pub struct LoadResult {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges ignored because an endpoint id was unknown
    pub dropped_edges: usize,
    pub tier: ExportedTier,
}

/// One connected component, members sorted
#[derive(Serialize)]
pub struct ExportedComponent {
    pub id: usize,
    pub members: Vec<String>,
}

/// Full component partition
#[derive(Serialize)]
pub struct ExportedPartition {
    pub components: Vec<ExportedComponent>,
    /// Flat node→component assignment, sorted by node id
    pub assignments: Vec<ExportedAssignment>,
}

#[derive(Serialize)]
pub struct ExportedAssignment {
    pub node_id: String,
    pub component_id: usize,
}

/// Per-node highlight flags
#[derive(Serialize)]
pub struct ExportedNodeFlags {
    pub id: String,
    pub hit: bool,
    pub dim: bool,
    pub matched_tokens: Vec<String>,
}

/// Matched-token union for one component
#[derive(Serialize)]
pub struct ExportedComponentTokens {
    pub component_id: usize,
    pub tokens: Vec<String>,
}

/// Full highlight recompute result
#[derive(Serialize)]
pub struct ExportedHighlight {
    pub active: bool,
    pub nodes: Vec<ExportedNodeFlags>,
    pub visible_nodes: Option<Vec<String>>,
    pub visible_edges: Option<Vec<String>>,
    pub component_tokens: Vec<ExportedComponentTokens>,
    /// Wall time of this recompute (0 when served from the last result)
    pub elapsed_ms: f64,
    /// True when inputs were unchanged and the cached result was returned
    pub skipped: bool,
}

/// Performance tier info for the warning banner
#[derive(Serialize)]
pub struct ExportedTier {
    pub name: String,
    pub color: String,
    pub node_threshold: usize,
    pub edge_threshold: usize,
    pub flags: crate::perf::OptimizationFlags,
}

impl ExportedTier {
    fn from_tier(tier: PerformanceTier) -> Self {
        Self {
            name: tier.name().to_string(),
            color: tier.color().to_string(),
            node_threshold: tier.node_threshold(),
            edge_threshold: tier.edge_threshold(),
            flags: tier.optimization_flags(),
        }
    }
}

// =============================================================================
// NetworkCortex WASM Handle
// =============================================================================

/// The main WASM handle for network analysis
///
/// Stateful object that TypeScript instantiates once per network view and
/// re-uses across selection changes and reloads.
#[wasm_bindgen]
pub struct NetworkCortex {
    snapshot: NetworkSnapshot,
    partition: Option<ComponentPartition>,
    detector: InputsDetector,
    last_highlight: Option<HighlightResult>,
    dismissals: WarningDismissals,
    layout_prefs: LayoutPreferences,
}

#[wasm_bindgen]
impl NetworkCortex {
    /// Create a new NetworkCortex instance
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            snapshot: NetworkSnapshot::new(),
            partition: None,
            detector: InputsDetector::new(),
            last_highlight: None,
            dismissals: WarningDismissals::new(),
            layout_prefs: LayoutPreferences::new(),
        }
    }

    /// Replace the snapshot with the current rendered element state
    ///
    /// # Arguments
    /// * `nodes_js` - Array of InputNode objects
    /// * `edges_js` - Array of InputEdge objects
    #[wasm_bindgen(js_name = loadNetwork)]
    pub fn load_network(&mut self, nodes_js: JsValue, edges_js: JsValue) -> Result<JsValue, JsValue> {
        let input_nodes: Vec<InputNode> = serde_wasm_bindgen::from_value(nodes_js).map_err(|e| {
            web_sys::console::error_1(
                &format!("[NetworkCortex] Node deserialization failed: {:?}", e).into(),
            );
            JsValue::from(e)
        })?;
        let input_edges: Vec<InputEdge> = serde_wasm_bindgen::from_value(edges_js).map_err(|e| {
            web_sys::console::error_1(
                &format!("[NetworkCortex] Edge deserialization failed: {:?}", e).into(),
            );
            JsValue::from(e)
        })?;

        let nodes: Vec<NetworkNode> = input_nodes
            .into_iter()
            .map(|n| NetworkNode {
                id: n.id,
                label: n.label.unwrap_or_default(),
                kind: n.kind.unwrap_or_default(),
            })
            .collect();
        let edges: Vec<NetworkEdge> = input_edges
            .into_iter()
            .map(|e| NetworkEdge {
                id: e.id,
                source: e.source,
                target: e.target,
                category: EdgeCategory::parse(e.category.as_deref().unwrap_or("")),
            })
            .collect();

        self.snapshot = NetworkSnapshot::from_parts(nodes, edges);
        self.partition = None;
        self.last_highlight = None;
        self.detector.reset();

        if self.snapshot.dropped_edge_count() > 0 {
            web_sys::console::log_1(
                &format!(
                    "[NetworkCortex] dropped {} edge(s) with unknown endpoints",
                    self.snapshot.dropped_edge_count()
                )
                .into(),
            );
        }

        let tier = PerformanceTier::classify(self.snapshot.node_count(), self.snapshot.edge_count());
        let result = LoadResult {
            node_count: self.snapshot.node_count(),
            edge_count: self.snapshot.edge_count(),
            dropped_edges: self.snapshot.dropped_edge_count(),
            tier: ExportedTier::from_tier(tier),
        };
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// Compute the deterministic component partition of the loaded snapshot
    #[wasm_bindgen(js_name = computeComponents)]
    pub fn compute_components(&mut self) -> Result<JsValue, JsValue> {
        let partition = compute_components(&self.snapshot);
        let exported = export_partition(&partition);
        self.partition = Some(partition);
        Ok(serde_wasm_bindgen::to_value(&exported)?)
    }

    /// Recompute highlight flags for the current selection
    ///
    /// # Arguments
    /// * `selection_js` - Array of selected protein token strings
    /// * `mode` - "all" or "any"
    /// * `filter` - Restrict visibility to parts reachable from a hit node
    #[wasm_bindgen(js_name = recomputeHighlight)]
    pub fn recompute_highlight(
        &mut self,
        selection_js: JsValue,
        mode: &str,
        filter: bool,
    ) -> Result<JsValue, JsValue> {
        let selection: Vec<String> = serde_wasm_bindgen::from_value(selection_js)?;
        let mode = MatchMode::parse(mode);

        let changed = self
            .detector
            .has_changed(&self.snapshot, &selection, mode, filter);

        if !changed {
            if let Some(cached) = &self.last_highlight {
                let exported = export_highlight(cached, 0.0, true);
                return Ok(serde_wasm_bindgen::to_value(&exported)?);
            }
        }

        let start = instant::Instant::now();
        let result = recompute_highlight(&self.snapshot, &selection, mode, filter);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

        let exported = export_highlight(&result, elapsed_ms, false);
        self.last_highlight = Some(result);
        Ok(serde_wasm_bindgen::to_value(&exported)?)
    }

    // -------------------------------------------------------------------------
    // Performance tiers & layout estimation
    // -------------------------------------------------------------------------

    /// Classify the loaded network's performance tier
    #[wasm_bindgen(js_name = currentTier)]
    pub fn current_tier(&self) -> Result<JsValue, JsValue> {
        let tier = PerformanceTier::classify(self.snapshot.node_count(), self.snapshot.edge_count());
        Ok(serde_wasm_bindgen::to_value(&ExportedTier::from_tier(tier))?)
    }

    /// Estimate layout wall time in milliseconds for the loaded network
    #[wasm_bindgen(js_name = estimateLayoutMs)]
    pub fn estimate_layout_ms(&self, layout_name: &str) -> f64 {
        estimate_layout_ms(
            layout_name,
            self.snapshot.node_count(),
            self.snapshot.edge_count(),
        )
    }

    /// Dismiss the performance warning for the named tier
    ///
    /// Unknown tier names are ignored (nothing to suppress).
    #[wasm_bindgen(js_name = dismissWarning)]
    pub fn dismiss_warning(&mut self, tier_name: &str) {
        if let Some(tier) = PerformanceTier::from_name(tier_name) {
            self.dismissals.dismiss(tier, js_sys::Date::now() as u64);
        }
    }

    /// Should the UI show the performance warning banner right now?
    #[wasm_bindgen(js_name = shouldWarn)]
    pub fn should_warn(&self) -> bool {
        self.dismissals.should_warn(
            self.snapshot.node_count(),
            self.snapshot.edge_count(),
            js_sys::Date::now() as u64,
        )
    }

    /// Remember the layout chosen for a network of the current size
    #[wasm_bindgen(js_name = setPreferredLayout)]
    pub fn set_preferred_layout(&mut self, layout_name: &str) {
        self.layout_prefs.set(
            self.snapshot.node_count(),
            self.snapshot.edge_count(),
            layout_name,
        );
    }

    /// Last layout chosen for a similarly-sized network this session
    #[wasm_bindgen(js_name = preferredLayout)]
    pub fn preferred_layout(&self) -> Option<String> {
        self.layout_prefs
            .get(self.snapshot.node_count(), self.snapshot.edge_count())
            .map(str::to_string)
    }

    /// Size bucket name used to key layout preferences
    #[wasm_bindgen(js_name = sizeBucket)]
    pub fn size_bucket(&self) -> String {
        SizeBucket::classify(self.snapshot.node_count(), self.snapshot.edge_count())
            .name()
            .to_string()
    }

    // -------------------------------------------------------------------------
    // Edge-type filtering
    // -------------------------------------------------------------------------

    /// Edge-category counts internal to one component
    #[wasm_bindgen(js_name = componentEdgeStats)]
    pub fn component_edge_stats(&mut self, component_id: usize) -> Result<JsValue, JsValue> {
        let stats = self.stats_for(component_id);
        Ok(serde_wasm_bindgen::to_value(&stats)?)
    }

    /// Does the component's edge mix satisfy the given ratio bounds?
    ///
    /// # Arguments
    /// * `filter_js` - EdgeRatioFilter object; absent fields are unconstrained
    #[wasm_bindgen(js_name = matchesEdgeFilter)]
    pub fn matches_edge_filter(
        &mut self,
        component_id: usize,
        filter_js: JsValue,
    ) -> Result<bool, JsValue> {
        let filter: EdgeRatioFilter = serde_wasm_bindgen::from_value(filter_js)?;
        let stats = self.stats_for(component_id);
        Ok(filter.matches(&stats))
    }

    // -------------------------------------------------------------------------
    // Stats & lifecycle
    // -------------------------------------------------------------------------

    /// JSON summary for debugging/devtools
    #[wasm_bindgen(js_name = summaryJson)]
    pub fn summary_json(&mut self) -> Result<String, JsValue> {
        let component_count = self.ensure_partition().component_count();
        let summary = serde_json::json!({
            "node_count": self.snapshot.node_count(),
            "edge_count": self.snapshot.edge_count(),
            "dropped_edges": self.snapshot.dropped_edge_count(),
            "component_count": component_count,
            "tier": PerformanceTier::classify(
                self.snapshot.node_count(),
                self.snapshot.edge_count()
            ).name(),
            "highlight_skip_rate": self.detector.skip_rate(),
        });
        serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.snapshot.node_count()
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.snapshot.edge_count()
    }

    /// Clear all state (snapshot, caches, session records)
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.snapshot = NetworkSnapshot::new();
        self.partition = None;
        self.last_highlight = None;
        self.detector.reset();
        self.dismissals.clear();
    }
}

impl NetworkCortex {
    fn ensure_partition(&mut self) -> &ComponentPartition {
        if self.partition.is_none() {
            self.partition = Some(compute_components(&self.snapshot));
        }
        self.partition.as_ref().unwrap()
    }

    fn stats_for(&mut self, component_id: usize) -> EdgeTypeStats {
        self.ensure_partition();
        let members = self
            .partition
            .as_ref()
            .map(|p| p.members(component_id).to_vec())
            .unwrap_or_default();
        EdgeTypeStats::from_component(&self.snapshot, &members)
    }
}

impl Default for NetworkCortex {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Free functions (pure wrappers)
// =============================================================================

/// Classify node/edge counts into a tier, without a loaded snapshot
#[wasm_bindgen(js_name = classifyTier)]
pub fn classify_tier(node_count: usize, edge_count: usize) -> Result<JsValue, JsValue> {
    let tier = PerformanceTier::classify(node_count, edge_count);
    Ok(serde_wasm_bindgen::to_value(&ExportedTier::from_tier(tier))?)
}

/// Estimate layout wall time for arbitrary counts
#[wasm_bindgen(js_name = estimateLayout)]
pub fn estimate_layout(layout_name: &str, node_count: usize, edge_count: usize) -> f64 {
    estimate_layout_ms(layout_name, node_count, edge_count)
}

// =============================================================================
// Export helpers
// =============================================================================

fn export_partition(partition: &ComponentPartition) -> ExportedPartition {
    let components = partition
        .component_to_nodes
        .iter()
        .map(|(&id, members)| ExportedComponent {
            id,
            members: members.clone(),
        })
        .collect();

    let mut assignments: Vec<ExportedAssignment> = partition
        .node_to_component
        .iter()
        .map(|(node_id, &component_id)| ExportedAssignment {
            node_id: node_id.clone(),
            component_id,
        })
        .collect();
    assignments.sort_by(|a, b| a.node_id.cmp(&b.node_id));

    ExportedPartition {
        components,
        assignments,
    }
}

fn export_highlight(result: &HighlightResult, elapsed_ms: f64, skipped: bool) -> ExportedHighlight {
    ExportedHighlight {
        active: result.active,
        nodes: result
            .nodes
            .iter()
            .map(|(id, flags)| ExportedNodeFlags {
                id: id.clone(),
                hit: flags.hit,
                dim: flags.dim,
                matched_tokens: flags.matched_tokens.clone(),
            })
            .collect(),
        visible_nodes: result
            .visible_nodes
            .as_ref()
            .map(|set| set.iter().cloned().collect()),
        visible_edges: result
            .visible_edges
            .as_ref()
            .map(|set| set.iter().cloned().collect()),
        component_tokens: result
            .component_matched_tokens
            .iter()
            .map(|(&component_id, tokens)| ExportedComponentTokens {
                component_id,
                tokens: tokens.iter().cloned().collect(),
            })
            .collect(),
        elapsed_ms,
        skipped,
    }
}

// =============================================================================
// Tests (native; exercise the export path without a JS runtime)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeCategory, NetworkEdge, NetworkNode};

    fn loaded_cortex() -> NetworkCortex {
        let mut cortex = NetworkCortex::new();
        cortex.snapshot = NetworkSnapshot::from_parts(
            vec![
                NetworkNode::new("A", "p1 p2", "protein"),
                NetworkNode::new("B", "p2 p3", "protein"),
                NetworkNode::new("C", "p4", "protein"),
            ],
            vec![NetworkEdge::new(
                "e1",
                "A",
                "B",
                EdgeCategory::MatchedPrediction,
            )],
        );
        cortex
    }

    #[test]
    fn test_export_partition_shape() {
        let mut cortex = loaded_cortex();
        let partition = cortex.ensure_partition().clone();
        let exported = export_partition(&partition);

        assert_eq!(exported.components.len(), 2);
        assert_eq!(exported.components[0].members, vec!["A", "B"]);
        assert_eq!(exported.assignments.len(), 3);
        assert_eq!(exported.assignments[0].node_id, "A");
    }

    #[test]
    fn test_stats_for_component() {
        let mut cortex = loaded_cortex();
        let stats = cortex.stats_for(0);
        assert_eq!(stats.matched_prediction, 1);
        assert_eq!(stats.total, 1);

        // Singleton component has no internal edges
        let stats = cortex.stats_for(1);
        assert_eq!(stats.total, 0);
    }

    #[test]
    fn test_stats_for_unknown_component() {
        let mut cortex = loaded_cortex();
        let stats = cortex.stats_for(42);
        assert_eq!(stats, EdgeTypeStats::default());
    }

    #[test]
    fn test_export_highlight_round_trip() {
        let cortex = loaded_cortex();
        let result = crate::analysis::recompute_highlight(
            &cortex.snapshot,
            &["p1".to_string()],
            MatchMode::Any,
            true,
        );

        let exported = export_highlight(&result, 1.5, false);
        assert!(exported.active);
        assert_eq!(exported.nodes.len(), 3);
        assert_eq!(
            exported.visible_nodes.as_ref().unwrap(),
            &vec!["A".to_string(), "B".to_string()]
        );
        assert!(!exported.skipped);
        assert_eq!(exported.elapsed_ms, 1.5);
    }
}
