//! Performance tier classification
//!
//! Networks are bucketed by size before running a layout so the UI can warn
//! the user and suggest conservative rendering settings. Thresholds are
//! OR-combined: either dimension alone escalates the tier (a network with
//! few nodes but thousands of edges still renders slowly).

use serde::{Deserialize, Serialize};

/// Size tier of the currently-rendered network, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceTier {
    Optimal,
    Moderate,
    Large,
    Extreme,
    Massive,
}

/// Rendering optimizations suggested for a tier
///
/// Suggestions only; nothing in this crate applies them. Every flag set in
/// a lower tier stays set in every higher tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationFlags {
    pub disable_animations: bool,
    pub hide_edge_labels: bool,
    pub simplify_edge_styles: bool,
    pub progressive_rendering: bool,
    pub hide_node_labels: bool,
    pub force_grid_layout: bool,
}

impl PerformanceTier {
    /// All tiers, lowest to highest
    pub const ALL: [PerformanceTier; 5] = [
        PerformanceTier::Optimal,
        PerformanceTier::Moderate,
        PerformanceTier::Large,
        PerformanceTier::Extreme,
        PerformanceTier::Massive,
    ];

    /// Classify a network by node/edge counts
    ///
    /// Scans highest tier first and returns the first whose node OR edge
    /// threshold is reached; `Optimal` (thresholds 0/0) is the floor.
    pub fn classify(node_count: usize, edge_count: usize) -> Self {
        for tier in Self::ALL.iter().rev() {
            if node_count >= tier.node_threshold() || edge_count >= tier.edge_threshold() {
                return *tier;
            }
        }
        PerformanceTier::Optimal
    }

    pub fn node_threshold(&self) -> usize {
        match self {
            PerformanceTier::Optimal => 0,
            PerformanceTier::Moderate => 200,
            PerformanceTier::Large => 500,
            PerformanceTier::Extreme => 2_000,
            PerformanceTier::Massive => 5_000,
        }
    }

    pub fn edge_threshold(&self) -> usize {
        match self {
            PerformanceTier::Optimal => 0,
            PerformanceTier::Moderate => 400,
            PerformanceTier::Large => 1_000,
            PerformanceTier::Extreme => 4_000,
            PerformanceTier::Massive => 10_000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PerformanceTier::Optimal => "optimal",
            PerformanceTier::Moderate => "moderate",
            PerformanceTier::Large => "large",
            PerformanceTier::Extreme => "extreme",
            PerformanceTier::Massive => "massive",
        }
    }

    /// Inverse of `name`; None for unknown tier names
    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tier| tier.name() == raw)
    }

    /// Badge color shown next to the tier warning
    pub fn color(&self) -> &'static str {
        match self {
            PerformanceTier::Optimal => "#2ecc71",
            PerformanceTier::Moderate => "#f1c40f",
            PerformanceTier::Large => "#e67e22",
            PerformanceTier::Extreme => "#e74c3c",
            PerformanceTier::Massive => "#8e44ad",
        }
    }

    pub fn optimization_flags(&self) -> OptimizationFlags {
        match self {
            PerformanceTier::Optimal => OptimizationFlags::default(),
            PerformanceTier::Moderate => OptimizationFlags {
                disable_animations: true,
                hide_edge_labels: true,
                ..OptimizationFlags::default()
            },
            PerformanceTier::Large => OptimizationFlags {
                disable_animations: true,
                hide_edge_labels: true,
                simplify_edge_styles: true,
                progressive_rendering: true,
                ..OptimizationFlags::default()
            },
            PerformanceTier::Extreme => OptimizationFlags {
                disable_animations: true,
                hide_edge_labels: true,
                simplify_edge_styles: true,
                progressive_rendering: true,
                hide_node_labels: true,
                force_grid_layout: false,
            },
            PerformanceTier::Massive => OptimizationFlags {
                disable_animations: true,
                hide_edge_labels: true,
                simplify_edge_styles: true,
                progressive_rendering: true,
                hide_node_labels: true,
                force_grid_layout: true,
            },
        }
    }

    /// Position in the tier order (0 = Optimal)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Anything above Optimal deserves a warning banner
    pub fn warrants_warning(&self) -> bool {
        *self != PerformanceTier::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_floors_at_optimal() {
        assert_eq!(PerformanceTier::classify(0, 0), PerformanceTier::Optimal);
        assert_eq!(PerformanceTier::classify(199, 399), PerformanceTier::Optimal);
    }

    #[test]
    fn test_classify_each_boundary() {
        assert_eq!(PerformanceTier::classify(200, 0), PerformanceTier::Moderate);
        assert_eq!(PerformanceTier::classify(0, 400), PerformanceTier::Moderate);
        assert_eq!(PerformanceTier::classify(500, 0), PerformanceTier::Large);
        assert_eq!(PerformanceTier::classify(2_000, 0), PerformanceTier::Extreme);
        assert_eq!(PerformanceTier::classify(5_000, 0), PerformanceTier::Massive);
        assert_eq!(PerformanceTier::classify(0, 10_000), PerformanceTier::Massive);
    }

    #[test]
    fn test_either_dimension_escalates() {
        // 199 nodes alone would be Optimal, but 5000 edges reaches Extreme
        assert_eq!(PerformanceTier::classify(199, 5_000), PerformanceTier::Extreme);
        // 100 nodes but 10k+ edges is Massive on the edge dimension alone
        assert_eq!(PerformanceTier::classify(100, 12_000), PerformanceTier::Massive);
    }

    #[test]
    fn test_classification_monotone() {
        let samples = [0usize, 1, 100, 199, 200, 399, 400, 500, 999, 1_000, 2_000, 4_000, 5_000, 10_000];
        for &n1 in &samples {
            for &e1 in &samples {
                let lower = PerformanceTier::classify(n1, e1);
                let higher = PerformanceTier::classify(n1 + 1, e1);
                assert!(lower <= higher);
                let higher = PerformanceTier::classify(n1, e1 + 1);
                assert!(lower <= higher);
            }
        }
    }

    #[test]
    fn test_flags_escalate_monotonically() {
        fn as_bits(flags: OptimizationFlags) -> [bool; 6] {
            [
                flags.disable_animations,
                flags.hide_edge_labels,
                flags.simplify_edge_styles,
                flags.progressive_rendering,
                flags.hide_node_labels,
                flags.force_grid_layout,
            ]
        }

        for pair in PerformanceTier::ALL.windows(2) {
            let lower = as_bits(pair[0].optimization_flags());
            let higher = as_bits(pair[1].optimization_flags());
            for (low, high) in lower.iter().zip(higher.iter()) {
                assert!(
                    !low || *high,
                    "{:?} drops a flag set by {:?}",
                    pair[1],
                    pair[0]
                );
            }
        }
    }

    #[test]
    fn test_ordering_matches_index() {
        for pair in PerformanceTier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].index() + 1, pair[1].index());
        }
    }

    #[test]
    fn test_from_name_round_trip() {
        for tier in PerformanceTier::ALL {
            assert_eq!(PerformanceTier::from_name(tier.name()), Some(tier));
        }
        assert_eq!(PerformanceTier::from_name("huge"), None);
    }

    #[test]
    fn test_only_optimal_skips_warning() {
        assert!(!PerformanceTier::Optimal.warrants_warning());
        assert!(PerformanceTier::Moderate.warrants_warning());
        assert!(PerformanceTier::Massive.warrants_warning());
    }
}
