//! PPICore: client-side analysis engine for protein interaction networks
//!
//! A Rust/WASM implementation of the graph analysis layer behind the PPI
//! network explorer. The rendering library (Cytoscape.js) owns the live
//! graph on the TypeScript side; this crate computes everything derived
//! from it.
//!
//! # Architecture
//!
//! ## Graph (`graph/`)
//! - `snapshot.rs` - NetworkSnapshot: petgraph-backed immutable node/edge
//!   state for one analysis pass, plus the sorted adjacency substrate
//!
//! ## Analysis (`analysis/`)
//! - `traversal.rs` - Shared BFS primitive (components + visibility filtering)
//! - `components.rs` - Deterministic connected-component partition
//! - `highlight.rs` - Protein-token highlighting (ALL/ANY), visibility filter
//! - `edge_filter.rs` - Per-component edge-category ratio filtering
//! - `memo.rs` - InputsDetector: skip detection for redundant recomputes
//!
//! ## Performance (`perf/`)
//! - `tier.rs` - Size tier classification with optimization suggestions
//! - `estimate.rs` - Layout wall-time estimation
//! - `session.rs` - Warning dismissals and per-size layout preferences
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { NetworkCortex } from 'ppicore';
//!
//! await init();
//!
//! const cortex = new NetworkCortex();
//! cortex.loadNetwork(
//!   [{ id: 'A', label: 'P1 P2' }, { id: 'B', label: 'P2 P3' }],
//!   [{ id: 'e1', source: 'A', target: 'B', category: 'matched_prediction' }]
//! );
//!
//! const partition = cortex.computeComponents();
//! const highlight = cortex.recomputeHighlight(['P1', 'P3'], 'any', true);
//!
//! // Apply highlight.nodes / highlight.visible_nodes to Cytoscape in one batch
//! ```

pub mod analysis;
pub mod api;
pub mod graph;
pub mod perf;

// Public exports
pub use analysis::*;
pub use graph::*;
pub use perf::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("ppicore v{}", env!("CARGO_PKG_VERSION"))
}
