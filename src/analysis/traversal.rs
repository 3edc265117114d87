//! Shared breadth-first traversal over the sorted adjacency map
//!
//! Component analysis and highlight filtering both need "everything
//! reachable from here" over the same adjacency; keeping one primitive
//! prevents the two from drifting apart semantically.

use std::collections::{BTreeMap, HashSet, VecDeque};

/// BFS from a single seed, sharing a visited set across calls
///
/// Returns the nodes first visited by *this* call, in breadth-first order.
/// A seed that is unknown to the adjacency or already visited yields an
/// empty result. Neighbor lists are pre-sorted by the snapshot, so visit
/// order within a call is deterministic.
pub fn bfs_collect(
    adjacency: &BTreeMap<String, Vec<String>>,
    seed: &str,
    visited: &mut HashSet<String>,
) -> Vec<String> {
    if !adjacency.contains_key(seed) || visited.contains(seed) {
        return Vec::new();
    }

    let mut queue: VecDeque<String> = VecDeque::new();
    let mut collected = Vec::new();

    visited.insert(seed.to_string());
    queue.push_back(seed.to_string());

    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(&current) {
            for neighbor in neighbors {
                if !visited.contains(neighbor) {
                    visited.insert(neighbor.clone());
                    queue.push_back(neighbor.clone());
                }
            }
        }
        collected.push(current);
    }

    collected
}

/// Union of everything reachable from any of the given seeds
pub fn reachable_from_seeds<'a>(
    adjacency: &BTreeMap<String, Vec<String>>,
    seeds: impl IntoIterator<Item = &'a str>,
) -> HashSet<String> {
    let mut visited = HashSet::new();
    for seed in seeds {
        bfs_collect(adjacency, seed, &mut visited);
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_adjacency() -> BTreeMap<String, Vec<String>> {
        // a - b - c, d isolated
        let mut adjacency = BTreeMap::new();
        adjacency.insert("a".to_string(), vec!["b".to_string()]);
        adjacency.insert("b".to_string(), vec!["a".to_string(), "c".to_string()]);
        adjacency.insert("c".to_string(), vec!["b".to_string()]);
        adjacency.insert("d".to_string(), vec![]);
        adjacency
    }

    #[test]
    fn test_bfs_collect_order() {
        let adjacency = chain_adjacency();
        let mut visited = HashSet::new();

        let order = bfs_collect(&adjacency, "a", &mut visited);
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bfs_collect_skips_visited_seed() {
        let adjacency = chain_adjacency();
        let mut visited = HashSet::new();

        bfs_collect(&adjacency, "a", &mut visited);
        let second = bfs_collect(&adjacency, "c", &mut visited);
        assert!(second.is_empty());
    }

    #[test]
    fn test_bfs_collect_unknown_seed() {
        let adjacency = chain_adjacency();
        let mut visited = HashSet::new();

        assert!(bfs_collect(&adjacency, "nope", &mut visited).is_empty());
        assert!(visited.is_empty());
    }

    #[test]
    fn test_reachable_from_multiple_seeds() {
        let adjacency = chain_adjacency();

        let reachable = reachable_from_seeds(&adjacency, ["c", "d"]);
        assert_eq!(reachable.len(), 4); // c pulls in a,b; d is itself
        assert!(reachable.contains("a"));
        assert!(reachable.contains("d"));
    }

    #[test]
    fn test_reachable_empty_seeds() {
        let adjacency = chain_adjacency();
        let reachable = reachable_from_seeds(&adjacency, []);
        assert!(reachable.is_empty());
    }
}
