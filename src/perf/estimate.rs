//! Layout wall-clock estimation
//!
//! Consulted before running a layout so the UI can warn about long-running
//! force-directed runs and offer the grid fallback. Edge count contributes
//! sub-linearly: force-directed layouts are dominated by node-pair
//! repulsion, not edge traversal.

/// Base cost in milliseconds per 100 nodes for a known layout algorithm
///
/// Unrecognized names get a conservative default.
pub fn base_time_per_100_nodes(layout_name: &str) -> f64 {
    match layout_name {
        "grid" => 50.0,
        "circle" => 60.0,
        "concentric" => 80.0,
        "breadthfirst" => 100.0,
        "dagre" => 300.0,
        "cose" => 600.0,
        "cola" => 700.0,
        "fcose" => 800.0,
        _ => 500.0,
    }
}

/// Estimated layout duration in milliseconds
///
/// `base * (nodes / 100) * sqrt(edges / 500)`; zero when either count is
/// zero, never negative.
pub fn estimate_layout_ms(layout_name: &str, node_count: usize, edge_count: usize) -> f64 {
    let base = base_time_per_100_nodes(layout_name);
    base * (node_count as f64 / 100.0) * (edge_count as f64 / 500.0).sqrt()
}
