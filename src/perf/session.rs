//! Session-scoped records around the tier classifier
//!
//! Two small pieces of state survive across recomputes within one browser
//! session: whether the user dismissed the current performance warning, and
//! which layout they last picked for a network of roughly this size. Both
//! take the current time as an argument; only the WASM layer reads a clock.

use chrono::Duration;
use serde::Serialize;
use std::collections::HashMap;

use super::tier::PerformanceTier;

/// How long a dismissal suppresses the warning for the same tier
pub fn dismissal_window_ms() -> u64 {
    Duration::hours(24).num_milliseconds() as u64
}

// =============================================================================
// Warning dismissal
// =============================================================================

/// A recorded "don't show this again" click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DismissalRecord {
    pub tier: PerformanceTier,
    pub dismissed_at_ms: u64,
}

/// Session store for performance-warning dismissals
#[derive(Debug, Default)]
pub struct WarningDismissals {
    record: Option<DismissalRecord>,
}

impl WarningDismissals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dismissal of the warning for `tier` at `now_ms`
    pub fn dismiss(&mut self, tier: PerformanceTier, now_ms: u64) {
        self.record = Some(DismissalRecord {
            tier,
            dismissed_at_ms: now_ms,
        });
    }

    /// Is the warning for `tier` currently suppressed?
    ///
    /// Only an unexpired dismissal of the *same* tier suppresses; crossing a
    /// tier boundary in either direction re-arms the warning immediately,
    /// since the warning text no longer matches what was dismissed.
    pub fn is_suppressed(&self, tier: PerformanceTier, now_ms: u64) -> bool {
        match self.record {
            Some(record) => {
                record.tier == tier
                    && now_ms.saturating_sub(record.dismissed_at_ms) < dismissal_window_ms()
            }
            None => false,
        }
    }

    /// Should the UI show a warning banner for this network right now?
    pub fn should_warn(&self, node_count: usize, edge_count: usize, now_ms: u64) -> bool {
        let tier = PerformanceTier::classify(node_count, edge_count);
        tier.warrants_warning() && !self.is_suppressed(tier, now_ms)
    }

    pub fn clear(&mut self) {
        self.record = None;
    }
}

// =============================================================================
// Size buckets & layout preference
// =============================================================================

/// Coarse size bucket used to key session preferences
///
/// Same OR-threshold scan as the tier classifier, but with six buckets so
/// layout preferences distinguish mid-size networks the tiers lump together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
    VeryLarge,
    Extreme,
    Massive,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 6] = [
        SizeBucket::Small,
        SizeBucket::Medium,
        SizeBucket::Large,
        SizeBucket::VeryLarge,
        SizeBucket::Extreme,
        SizeBucket::Massive,
    ];

    pub fn classify(node_count: usize, edge_count: usize) -> Self {
        for bucket in Self::ALL.iter().rev() {
            if node_count >= bucket.node_threshold() || edge_count >= bucket.edge_threshold() {
                return *bucket;
            }
        }
        SizeBucket::Small
    }

    pub fn node_threshold(&self) -> usize {
        match self {
            SizeBucket::Small => 0,
            SizeBucket::Medium => 100,
            SizeBucket::Large => 500,
            SizeBucket::VeryLarge => 1_000,
            SizeBucket::Extreme => 2_000,
            SizeBucket::Massive => 5_000,
        }
    }

    pub fn edge_threshold(&self) -> usize {
        match self {
            SizeBucket::Small => 0,
            SizeBucket::Medium => 200,
            SizeBucket::Large => 1_000,
            SizeBucket::VeryLarge => 2_000,
            SizeBucket::Extreme => 4_000,
            SizeBucket::Massive => 10_000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
            SizeBucket::VeryLarge => "very-large",
            SizeBucket::Extreme => "extreme",
            SizeBucket::Massive => "massive",
        }
    }
}

/// Remembered layout choice per size bucket
#[derive(Debug, Default)]
pub struct LayoutPreferences {
    by_bucket: HashMap<SizeBucket, String>,
}

impl LayoutPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node_count: usize, edge_count: usize, layout_name: impl Into<String>) {
        let bucket = SizeBucket::classify(node_count, edge_count);
        self.by_bucket.insert(bucket, layout_name.into());
    }

    pub fn get(&self, node_count: usize, edge_count: usize) -> Option<&str> {
        let bucket = SizeBucket::classify(node_count, edge_count);
        self.by_bucket.get(&bucket).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: u64 = 60 * 60 * 1_000;

    #[test]
    fn test_dismissal_suppresses_same_tier() {
        let mut dismissals = WarningDismissals::new();
        dismissals.dismiss(PerformanceTier::Large, 1_000);

        assert!(dismissals.is_suppressed(PerformanceTier::Large, 1_000 + HOUR_MS));
        assert!(!dismissals.should_warn(600, 0, 1_000 + HOUR_MS)); // 600 nodes → Large
    }

    #[test]
    fn test_dismissal_expires_after_24h() {
        let mut dismissals = WarningDismissals::new();
        dismissals.dismiss(PerformanceTier::Large, 0);

        assert!(dismissals.is_suppressed(PerformanceTier::Large, 24 * HOUR_MS - 1));
        assert!(!dismissals.is_suppressed(PerformanceTier::Large, 24 * HOUR_MS));
    }

    #[test]
    fn test_tier_change_rearms_immediately() {
        let mut dismissals = WarningDismissals::new();
        dismissals.dismiss(PerformanceTier::Large, 0);

        // Network grew into Extreme: warn regardless of the window
        assert!(dismissals.should_warn(2_500, 0, 1));
        // Network shrank into Moderate: also warn
        assert!(dismissals.should_warn(250, 0, 1));
    }

    #[test]
    fn test_optimal_never_warns() {
        let dismissals = WarningDismissals::new();
        assert!(!dismissals.should_warn(10, 10, 0));
    }

    #[test]
    fn test_clear() {
        let mut dismissals = WarningDismissals::new();
        dismissals.dismiss(PerformanceTier::Moderate, 0);
        dismissals.clear();
        assert!(!dismissals.is_suppressed(PerformanceTier::Moderate, 1));
    }

    #[test]
    fn test_bucket_classification() {
        assert_eq!(SizeBucket::classify(0, 0), SizeBucket::Small);
        assert_eq!(SizeBucket::classify(99, 199), SizeBucket::Small);
        assert_eq!(SizeBucket::classify(100, 0), SizeBucket::Medium);
        assert_eq!(SizeBucket::classify(0, 2_000), SizeBucket::VeryLarge);
        assert_eq!(SizeBucket::classify(6_000, 0), SizeBucket::Massive);
    }

    #[test]
    fn test_bucket_monotone() {
        let samples = [0usize, 50, 100, 200, 500, 1_000, 2_000, 4_000, 5_000, 10_000];
        for &n in &samples {
            for &e in &samples {
                assert!(SizeBucket::classify(n, e) <= SizeBucket::classify(n + 1, e + 1));
            }
        }
    }

    #[test]
    fn test_layout_preference_by_bucket() {
        let mut prefs = LayoutPreferences::new();
        prefs.set(150, 0, "fcose"); // Medium
        prefs.set(6_000, 0, "grid"); // Massive

        // Another Medium-sized network picks up the remembered layout
        assert_eq!(prefs.get(120, 100), Some("fcose"));
        assert_eq!(prefs.get(7_000, 20_000), Some("grid"));
        assert_eq!(prefs.get(10, 10), None);
    }
}
