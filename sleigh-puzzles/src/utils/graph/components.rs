//! Proximity graphs and connected components.

use std::collections::BTreeMap;

pub fn manhattan<const D: usize>(a: &[i64; D], b: &[i64; D]) -> i64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Adjacency lists linking every pair of points within `threshold` Manhattan
/// distance.
///
/// Points are bucketed by their first coordinate so each point only compares
/// against buckets it could possibly reach.
pub fn proximity_graph<const D: usize>(points: &[[i64; D]], threshold: i64) -> Vec<Vec<usize>> {
    if threshold < 0 {
        return vec![Vec::new(); points.len()];
    }
    let first = |p: &[i64; D]| p.first().copied().unwrap_or_default();

    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, p) in points.iter().enumerate() {
        buckets.entry(first(p)).or_default().push(i);
    }

    let mut adjacency = vec![Vec::new(); points.len()];
    for (i, p) in points.iter().enumerate() {
        let x = first(p);
        for bucket in buckets.range(x - threshold..=x + threshold).map(|(_, b)| b) {
            adjacency[i].extend(
                bucket
                    .iter()
                    .copied()
                    .filter(|&j| j != i && manhattan(p, &points[j]) <= threshold),
            );
        }
    }
    adjacency
}

/// Number of connected components, found with an explicit stack.
pub fn count_components(adjacency: &[Vec<usize>]) -> usize {
    let mut visited = vec![false; adjacency.len()];
    let mut stack = Vec::new();
    let mut components = 0;

    for start in 0..adjacency.len() {
        if visited[start] {
            continue;
        }
        components += 1;
        visited[start] = true;
        stack.push(start);

        while let Some(node) = stack.pop() {
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }
    components
}
