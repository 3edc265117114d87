//! Per-component edge-category statistics and ratio filtering
//!
//! Each interaction edge carries a comparison category (matched/unmatched ×
//! prediction/reference). The UI lets the user keep only components whose
//! matched ratios fall inside chosen bounds; the evaluation itself is a pure
//! AND over whatever bounds are present.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::{EdgeCategory, NetworkSnapshot};

// =============================================================================
// Stats
// =============================================================================

/// Edge-category counts for the edges internal to one component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTypeStats {
    pub matched_prediction: usize,
    pub matched_reference: usize,
    pub prediction: usize,
    pub reference: usize,
    /// All internal edges, including `Unknown`-category ones
    pub total: usize,
}

impl EdgeTypeStats {
    /// Count the edges whose endpoints are both inside `members`
    pub fn from_component(snapshot: &NetworkSnapshot, members: &[String]) -> Self {
        let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
        let mut stats = Self::default();

        for edge in snapshot.edges() {
            if !member_set.contains(edge.source.as_str())
                || !member_set.contains(edge.target.as_str())
            {
                continue;
            }

            stats.total += 1;
            match edge.category {
                EdgeCategory::MatchedPrediction => stats.matched_prediction += 1,
                EdgeCategory::MatchedReference => stats.matched_reference += 1,
                EdgeCategory::Prediction => stats.prediction += 1,
                EdgeCategory::Reference => stats.reference += 1,
                EdgeCategory::Unknown => {}
            }
        }

        stats
    }

    /// matched / (matched + unmatched) within the prediction family, 0 when
    /// the family is empty
    pub fn matched_prediction_ratio(&self) -> f64 {
        ratio(self.matched_prediction, self.matched_prediction + self.prediction)
    }

    pub fn unmatched_prediction_ratio(&self) -> f64 {
        ratio(self.prediction, self.matched_prediction + self.prediction)
    }

    pub fn matched_reference_ratio(&self) -> f64 {
        ratio(self.matched_reference, self.matched_reference + self.reference)
    }

    pub fn unmatched_reference_ratio(&self) -> f64 {
        ratio(self.reference, self.matched_reference + self.reference)
    }
}

fn ratio(part: usize, family_total: usize) -> f64 {
    if family_total == 0 {
        0.0
    } else {
        part as f64 / family_total as f64
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Optional min/max bounds over the four family ratios
///
/// Absent bounds impose no constraint; all present bounds must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRatioFilter {
    pub min_matched_prediction_ratio: Option<f64>,
    pub max_matched_prediction_ratio: Option<f64>,
    pub min_unmatched_prediction_ratio: Option<f64>,
    pub max_unmatched_prediction_ratio: Option<f64>,
    pub min_matched_reference_ratio: Option<f64>,
    pub max_matched_reference_ratio: Option<f64>,
    pub min_unmatched_reference_ratio: Option<f64>,
    pub max_unmatched_reference_ratio: Option<f64>,
}

impl EdgeRatioFilter {
    /// Does this component's edge mix satisfy every present bound?
    ///
    /// A component with no internal edges never matches: with nothing to
    /// take a ratio of, no ratio bound is meaningfully satisfied.
    pub fn matches(&self, stats: &EdgeTypeStats) -> bool {
        if stats.total == 0 {
            return false;
        }

        within(
            stats.matched_prediction_ratio(),
            self.min_matched_prediction_ratio,
            self.max_matched_prediction_ratio,
        ) && within(
            stats.unmatched_prediction_ratio(),
            self.min_unmatched_prediction_ratio,
            self.max_unmatched_prediction_ratio,
        ) && within(
            stats.matched_reference_ratio(),
            self.min_matched_reference_ratio,
            self.max_matched_reference_ratio,
        ) && within(
            stats.unmatched_reference_ratio(),
            self.min_unmatched_reference_ratio,
            self.max_unmatched_reference_ratio,
        )
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

// =============================================================================
// Tests
// =============================================================================
