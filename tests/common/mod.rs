//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_bellman_editor::{Graph, GraphSnapshot};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Records every snapshot the controller publishes.
#[derive(Default, Clone)]
pub struct SnapshotTracker {
    pub snapshots: Rc<RefCell<Vec<GraphSnapshot>>>,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.snapshots.borrow().len()
    }

    pub fn last(&self) -> Option<GraphSnapshot> {
        self.snapshots.borrow().last().cloned()
    }

    /// Clear all recorded snapshots.
    pub fn clear(&self) {
        self.snapshots.borrow_mut().clear();
    }
}

/// Check the structural invariants that must hold after any operation.
///
/// Panics with a description of the first violation.
pub fn assert_graph_invariants(graph: &Graph) {
    let active_vertices = graph.vertices().filter(|v| v.active).count();
    assert!(active_vertices <= 1, "{} active vertices", active_vertices);

    let active_edges = graph.edges().iter().filter(|e| e.active).count();
    assert!(active_edges <= 1, "{} active edges", active_edges);

    assert!(graph.selection_is_consistent());

    for edge in graph.edges() {
        assert!(
            graph.contains_vertex(edge.start) && graph.contains_vertex(edge.end),
            "edge {} has a dangling endpoint",
            edge.id
        );
        assert_ne!(edge.start, edge.end, "edge {} is a self loop", edge.id);
    }

    let mut ids = HashSet::new();
    for edge in graph.edges() {
        assert!(ids.insert(edge.id), "edge id {} repeated", edge.id);
    }

    for a in graph.vertices() {
        for b in graph.vertices() {
            assert_eq!(
                graph.edges_between(a.id, b.id),
                graph.edges_between(b.id, a.id),
                "edges_between not symmetric for {} and {}",
                a.id,
                b.id
            );
        }
    }
}
