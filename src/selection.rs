use crate::error::GraphError;
use crate::graph::{EdgeId, Graph, VertexId};
use log::debug;
use slint::{Model, VecModel};

/// The active vertex and active edge at one point in time.
///
/// Activity is stored on the vertices and edges themselves; this is a read
/// out of it, e.g. to feed the UI highlight models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSnapshot {
    pub vertex: Option<VertexId>,
    pub edge: Option<EdgeId>,
}

impl SelectionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.vertex.is_none() && self.edge.is_none()
    }

    /// Sync the active vertex to a Slint VecModel (zero or one row)
    pub fn sync_vertex_model(&self, model: &VecModel<i32>) {
        sync_ids(model, self.vertex.map(VertexId::as_i32));
    }

    /// Sync the active edge to a Slint VecModel (zero or one row)
    pub fn sync_edge_model(&self, model: &VecModel<i32>) {
        sync_ids(model, self.edge.map(EdgeId::as_i32));
    }
}

fn sync_ids(model: &VecModel<i32>, id: Option<i32>) {
    match id {
        Some(id) if model.row_count() == 1 => model.set_row_data(0, id),
        Some(id) => {
            // Clear and repopulate to ensure exact match
            while model.row_count() > 0 {
                model.remove(0);
            }
            model.push(id);
        }
        None => {
            while model.row_count() > 0 {
                model.remove(0);
            }
        }
    }
}

/// Single-selection handling.
///
/// Every routine that activates something deactivates the previous holder
/// first, so at most one vertex and at most one edge are active.
impl Graph {
    /// Flip a vertex's active flag. Returns the new state.
    pub fn toggle_vertex(&mut self, id: VertexId) -> Result<bool, GraphError> {
        let active = !self.vertex(id).ok_or(GraphError::VertexNotFound(id))?.active;
        if active {
            self.deactivate_vertices();
        }
        if let Some(vertex) = self.vertex_mut(id) {
            vertex.active = active;
        }
        debug!("vertex {} active: {}", id, active);
        Ok(active)
    }

    /// Flip an edge's active flag. Returns the new state.
    pub fn toggle_edge(&mut self, id: EdgeId) -> Result<bool, GraphError> {
        let active = !self.edge(id).ok_or(GraphError::EdgeNotFound(id))?.active;
        if active {
            self.deactivate_edges();
        }
        if let Some(edge) = self.edge_mut(id) {
            edge.active = active;
        }
        debug!("edge {} active: {}", id, active);
        Ok(active)
    }

    pub fn deactivate_vertices(&mut self) {
        for vertex in self.vertices_mut() {
            vertex.active = false;
        }
    }

    pub fn deactivate_edges(&mut self) {
        for edge in self.edges_mut() {
            edge.active = false;
        }
    }

    /// Deactivate every vertex and edge.
    pub fn clear_selection(&mut self) {
        self.deactivate_vertices();
        self.deactivate_edges();
    }

    pub fn selection(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            vertex: self.active_vertex(),
            edge: self.active_edge(),
        }
    }

    /// Check the single-selection invariant: at most one active vertex and
    /// at most one active edge.
    pub fn selection_is_consistent(&self) -> bool {
        self.vertices().filter(|v| v.active).count() <= 1
            && self.edges().iter().filter(|e| e.active).count() <= 1
    }
}
