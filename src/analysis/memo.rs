//! Recompute skip detection
//!
//! Highlighting is recomputed reactively whenever its inputs change. Rather
//! than binding to a framework reactivity mechanism, the adapter asks this
//! detector whether the (topology, selection, mode, filter) tuple differs
//! from the last computed one and skips the recompute when it does not.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::graph::NetworkSnapshot;

use super::highlight::MatchMode;

/// Content-addressable detector for redundant highlight recomputes
#[derive(Debug, Default)]
pub struct InputsDetector {
    /// Hash of the last computed input tuple
    last_hash: Option<u64>,
    /// Number of checks performed
    check_count: u64,
    /// Number of skipped (unchanged) checks
    skip_count: u64,
}

impl InputsDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the inputs differ from the last computed set
    ///
    /// Returns true (and records the new hash) when a recompute is needed.
    /// The first check always counts as changed.
    pub fn has_changed(
        &mut self,
        snapshot: &NetworkSnapshot,
        selection: &[String],
        mode: MatchMode,
        filter_to_matching_components: bool,
    ) -> bool {
        self.check_count += 1;

        let current = Self::compute_hash(
            snapshot.fingerprint(),
            selection,
            mode,
            filter_to_matching_components,
        );

        let changed = match self.last_hash {
            None => true,
            Some(prev) => prev != current,
        };

        if changed {
            self.last_hash = Some(current);
        } else {
            self.skip_count += 1;
        }

        changed
    }

    /// Get skip rate as percentage
    pub fn skip_rate(&self) -> f64 {
        if self.check_count == 0 {
            return 0.0;
        }
        (self.skip_count as f64 / self.check_count as f64) * 100.0
    }

    pub fn check_count(&self) -> u64 {
        self.check_count
    }

    pub fn skip_count(&self) -> u64 {
        self.skip_count
    }

    /// Reset the detector state
    pub fn reset(&mut self) {
        self.last_hash = None;
        self.check_count = 0;
        self.skip_count = 0;
    }

    fn compute_hash(
        topology_fingerprint: u64,
        selection: &[String],
        mode: MatchMode,
        filter: bool,
    ) -> u64 {
        let mut hasher = DefaultHasher::new();
        topology_fingerprint.hash(&mut hasher);
        selection.hash(&mut hasher);
        mode.hash(&mut hasher);
        filter.hash(&mut hasher);
        hasher.finish()
    }
}
