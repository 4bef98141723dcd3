//! Bellman-Ford single-source shortest paths over the editor graph.
//!
//! Distances are written into the vertices in place:
//!
//! ```text
//!   dist[start] = 0, every other vertex already Unreachable
//!
//!   repeat |V| - 1 times:
//!     for u in vertex order:
//!       for (u -> v, w) in outgoing edges of u, edge order:
//!         if dist[u] is finite and dist[u] + w < dist[v]:
//!           dist[v] = dist[u] + w
//!
//!   closure pass: any edge that still relaxes => negative cycle
//! ```
//!
//! Complexity: O(V * E).

use crate::error::ShortestPathError;
use crate::graph::{EdgeId, Graph, VertexId};
use log::{debug, info, warn};
use std::fmt;

/// Shortest-path distance of a vertex.
///
/// `Unreachable` orders above every finite value, so the relaxation test
/// needs no special-casing and cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Distance {
    Finite(i64),
    #[default]
    Unreachable,
}

impl Distance {
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, if any.
    pub fn value(self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    /// Extend the distance by an edge weight. Unreachable stays unreachable;
    /// finite sums saturate at the `i64` bounds.
    pub fn extend(self, weight: i32) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d.saturating_add(i64::from(weight))),
            Distance::Unreachable => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreachable => write!(f, "\u{221e}"),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestPathRun {
    pub start: VertexId,
    /// Relaxation rounds performed (`|V| - 1`).
    pub rounds: usize,
    /// Number of distance updates across all rounds.
    pub relaxations: usize,
}

/// Run Bellman-Ford from `start`, writing each vertex's distance.
///
/// The caller resets distances beforehand (see
/// [`Graph::reset_distances`]). On [`ShortestPathError::NegativeCycle`] the
/// distances are left partially relaxed.
pub fn bellman_ford(graph: &mut Graph, start: VertexId) -> Result<ShortestPathRun, ShortestPathError> {
    if !graph.contains_vertex(start) {
        return Err(ShortestPathError::StartVertexNotFound(start));
    }

    graph.set_distance(start, Distance::Finite(0));

    // Outgoing edges grouped by vertex order, each group in edge order
    let view: &Graph = graph;
    let order: Vec<(EdgeId, VertexId, VertexId, i32)> = view
        .vertices()
        .flat_map(move |u| view.outgoing_edges(u.id))
        .map(|e| (e.id, e.start, e.end, e.weight))
        .collect();

    let rounds = graph.vertex_count().saturating_sub(1);
    let mut relaxations = 0;

    for _ in 0..rounds {
        for &(_, u, v, w) in &order {
            if relax(graph, u, v, w) {
                relaxations += 1;
            }
        }
    }

    for &(edge, u, v, w) in &order {
        if improves(graph, u, v, w).is_some() {
            warn!("negative cycle detected at edge {} ({} -> {})", edge, u, v);
            return Err(ShortestPathError::NegativeCycle { edge });
        }
    }

    info!(
        "shortest paths from {} done: {} round(s), {} relaxation(s)",
        start, rounds, relaxations
    );
    Ok(ShortestPathRun {
        start,
        rounds,
        relaxations,
    })
}

/// The shorter distance for `v` through `u`, if there is one.
fn improves(graph: &Graph, u: VertexId, v: VertexId, weight: i32) -> Option<Distance> {
    let du = graph.vertex(u)?.distance;
    let dv = graph.vertex(v)?.distance;
    if !du.is_finite() {
        return None;
    }
    let candidate = du.extend(weight);
    (candidate < dv).then_some(candidate)
}

fn relax(graph: &mut Graph, u: VertexId, v: VertexId, weight: i32) -> bool {
    match improves(graph, u, v, weight) {
        Some(candidate) => {
            debug!("relax {} -> {}: {}", u, v, candidate);
            graph.set_distance(v, candidate);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Point;

    fn vertex_at(graph: &mut Graph, x: f32) -> VertexId {
        graph.create_vertex(Point::new(x, 0.0))
    }

    fn weighted(graph: &mut Graph, start: VertexId, end: VertexId, weight: i32) -> EdgeId {
        let id = graph.create_edge(start, end).unwrap();
        graph.set_weight(id, weight).unwrap();
        id
    }

    fn distance(graph: &Graph, id: VertexId) -> Distance {
        graph.vertex(id).unwrap().distance
    }

    // ========================================================================
    // Distance
    // ========================================================================

    #[test]
    fn test_unreachable_orders_above_finite() {
        assert!(Distance::Finite(i64::MAX) < Distance::Unreachable);
        assert!(Distance::Finite(-5) < Distance::Finite(3));
        assert_eq!(Distance::default(), Distance::Unreachable);
    }

    #[test]
    fn test_extend_saturates() {
        assert_eq!(Distance::Finite(i64::MAX).extend(1), Distance::Finite(i64::MAX));
        assert_eq!(Distance::Finite(i64::MIN).extend(-1), Distance::Finite(i64::MIN));
        assert_eq!(Distance::Unreachable.extend(-100), Distance::Unreachable);
        assert_eq!(Distance::Finite(2).extend(-5), Distance::Finite(-3));
    }

    #[test]
    fn test_distance_display() {
        assert_eq!(Distance::Finite(-12).to_string(), "-12");
        assert_eq!(Distance::Unreachable.to_string(), "\u{221e}");
        assert_eq!(Distance::Finite(7).value(), Some(7));
        assert_eq!(Distance::Unreachable.value(), None);
    }

    // ========================================================================
    // bellman_ford()
    // ========================================================================

    #[test]
    fn test_prefers_cheaper_two_hop_path() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        let a = vertex_at(&mut graph, 100.0);
        let b = vertex_at(&mut graph, 200.0);
        weighted(&mut graph, s, a, 1);
        weighted(&mut graph, a, b, 2);
        weighted(&mut graph, s, b, 5);

        let run = bellman_ford(&mut graph, s).unwrap();

        assert_eq!(run.rounds, 2);
        assert_eq!(distance(&graph, s), Distance::Finite(0));
        assert_eq!(distance(&graph, a), Distance::Finite(1));
        assert_eq!(distance(&graph, b), Distance::Finite(3));
    }

    #[test]
    fn test_negative_cycle_is_reported() {
        let mut graph = Graph::with_validator(crate::validation::BasicEdgeValidator);
        let x = vertex_at(&mut graph, 0.0);
        let y = vertex_at(&mut graph, 100.0);
        weighted(&mut graph, x, y, -1);
        weighted(&mut graph, y, x, -1);

        let result = bellman_ford(&mut graph, x);
        assert!(matches!(result, Err(ShortestPathError::NegativeCycle { .. })));
    }

    #[test]
    fn test_unreachable_vertex_keeps_infinite_distance() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        let a = vertex_at(&mut graph, 100.0);
        let z = vertex_at(&mut graph, 200.0);
        weighted(&mut graph, s, a, 4);

        assert!(bellman_ford(&mut graph, s).is_ok());
        assert_eq!(distance(&graph, a), Distance::Finite(4));
        assert_eq!(distance(&graph, z), Distance::Unreachable);
    }

    #[test]
    fn test_edges_are_directed() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        let a = vertex_at(&mut graph, 100.0);
        weighted(&mut graph, a, s, 3);

        bellman_ford(&mut graph, s).unwrap();
        assert_eq!(distance(&graph, a), Distance::Unreachable);
    }

    #[test]
    fn test_negative_edge_without_cycle() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        let a = vertex_at(&mut graph, 100.0);
        let b = vertex_at(&mut graph, 200.0);
        weighted(&mut graph, s, a, 5);
        weighted(&mut graph, a, b, -7);
        weighted(&mut graph, s, b, 1);

        bellman_ford(&mut graph, s).unwrap();
        assert_eq!(distance(&graph, b), Distance::Finite(-2));
    }

    #[test]
    fn test_negative_cycle_unreachable_from_start_is_ignored() {
        let mut graph = Graph::with_validator(crate::validation::BasicEdgeValidator);
        let s = vertex_at(&mut graph, 0.0);
        let x = vertex_at(&mut graph, 100.0);
        let y = vertex_at(&mut graph, 200.0);
        weighted(&mut graph, x, y, -3);
        weighted(&mut graph, y, x, -3);

        assert!(bellman_ford(&mut graph, s).is_ok());
        assert_eq!(distance(&graph, x), Distance::Unreachable);
    }

    #[test]
    fn test_single_vertex_graph() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);

        let run = bellman_ford(&mut graph, s).unwrap();
        assert_eq!(run.rounds, 0);
        assert_eq!(run.relaxations, 0);
        assert_eq!(distance(&graph, s), Distance::Finite(0));
    }

    #[test]
    fn test_missing_start_vertex() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        graph.remove_vertex(s).unwrap();

        assert_eq!(
            bellman_ford(&mut graph, s),
            Err(ShortestPathError::StartVertexNotFound(s))
        );
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut graph = Graph::new();
        let s = vertex_at(&mut graph, 0.0);
        let a = vertex_at(&mut graph, 100.0);
        graph.create_edge(s, a).unwrap();

        bellman_ford(&mut graph, s).unwrap();
        assert_eq!(distance(&graph, a), Distance::Finite(0));
    }
}
