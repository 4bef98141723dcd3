//! Read-only render snapshots of the graph.
//!
//! After every mutation the UI redraws from a [`GraphSnapshot`]: the full
//! vertex and edge lists with positions, weights, active flags, computed
//! distances and derived edge geometry. [`SnapshotModels`] pushes a snapshot
//! into Slint `VecModel`s.
//!
//! # Example
//!
//! ```ignore
//! let vertices = Rc::new(VecModel::<VertexData>::default());
//! let edges = Rc::new(VecModel::<EdgeData>::default());
//!
//! let mut models = SnapshotModels::new();
//! models.bind_vertices(vertices.clone(), |v| VertexData {
//!     id: v.id.as_i32(),
//!     x: v.position.x,
//!     y: v.position.y,
//!     active: v.active,
//!     distance: v.distance_label(),
//! });
//! models.bind_edges(edges.clone(), |e| EdgeData {
//!     id: e.id.as_i32(),
//!     path: e.path_commands(),
//!     arrow: e.arrow_commands(),
//!     label: e.weight_label(),
//!     label_x: e.geometry.label.x,
//!     label_y: e.geometry.label.y,
//!     active: e.active,
//! });
//!
//! window.set_vertices(ModelRc::from(vertices));
//! window.set_edges(ModelRc::from(edges));
//!
//! // After each event
//! models.sync(&ctrl.snapshot());
//! ```

use crate::bellman_ford::Distance;
use crate::config::EditorConfig;
use crate::graph::{EdgeId, Graph, VertexId};
use crate::path::{EdgeGeometry, Point};
use slint::{Model, SharedString, VecModel};
use std::rc::Rc;

/// What the renderer needs to draw one vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexView {
    pub id: VertexId,
    pub position: Point,
    pub active: bool,
    pub distance: Distance,
}

impl VertexView {
    /// Distance text, "∞" for unreachable vertices.
    pub fn distance_label(&self) -> SharedString {
        SharedString::from(self.distance.to_string().as_str())
    }
}

/// What the renderer needs to draw one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub weight: i32,
    pub active: bool,
    pub geometry: EdgeGeometry,
}

impl EdgeView {
    pub fn weight_label(&self) -> SharedString {
        SharedString::from(self.weight.to_string().as_str())
    }

    pub fn path_commands(&self) -> SharedString {
        SharedString::from(self.geometry.path_commands().as_str())
    }

    pub fn arrow_commands(&self) -> SharedString {
        SharedString::from(self.geometry.arrow_commands().as_str())
    }
}

/// Full, consistent copy of the drawable graph state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphSnapshot {
    /// Vertices in creation order (later ones are drawn on top).
    pub vertices: Vec<VertexView>,
    /// Edges in creation order.
    pub edges: Vec<EdgeView>,
    /// Whether the help overlay is visible.
    pub show_hints: bool,
}

impl GraphSnapshot {
    /// Capture the current state of `graph`.
    pub fn capture(graph: &Graph, config: &EditorConfig) -> Self {
        let vertices = graph
            .vertices()
            .map(|v| VertexView {
                id: v.id,
                position: v.position,
                active: v.active,
                distance: v.distance,
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .filter_map(|e| {
                Some(EdgeView {
                    id: e.id,
                    start: e.start,
                    end: e.end,
                    weight: e.weight,
                    active: e.active,
                    geometry: graph.edge_geometry(e.id, config)?,
                })
            })
            .collect();

        Self {
            vertices,
            edges,
            show_hints: false,
        }
    }

    pub fn with_hints(mut self, show_hints: bool) -> Self {
        self.show_hints = show_hints;
        self
    }

    pub fn vertex(&self, id: VertexId) -> Option<&VertexView> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeView> {
        self.edges.iter().find(|e| e.id == id)
    }
}

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, snapshot: &GraphSnapshot);
}

struct VertexModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for VertexModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&VertexView) -> P,
{
    fn sync(&self, snapshot: &GraphSnapshot) {
        sync_rows(&self.model, snapshot.vertices.iter().map(&self.constructor));
    }
}

struct EdgeModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for EdgeModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&EdgeView) -> P,
{
    fn sync(&self, snapshot: &GraphSnapshot) {
        sync_rows(&self.model, snapshot.edges.iter().map(&self.constructor));
    }
}

/// Update existing rows in place, append new ones, drop the excess.
fn sync_rows<P, I>(model: &VecModel<P>, items: I)
where
    P: Clone + 'static,
    I: Iterator<Item = P>,
{
    let mut count = 0;
    for (i, item) in items.enumerate() {
        if i < model.row_count() {
            model.set_row_data(i, item);
        } else {
            model.push(item);
        }
        count = i + 1;
    }
    while model.row_count() > count {
        model.remove(model.row_count() - 1);
    }
}

/// Keeps Slint models in step with graph snapshots.
///
/// Bind each model once with a constructor that turns a view into the
/// UI's row type; every [`sync`](Self::sync) then rewrites the rows.
#[derive(Default)]
pub struct SnapshotModels {
    syncers: Vec<Box<dyn ModelSyncer>>,
}

impl SnapshotModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a vertex model.
    pub fn bind_vertices<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&VertexView) -> P + 'static,
    {
        self.syncers.push(Box::new(VertexModelSyncer { model, constructor }));
    }

    /// Bind an edge model.
    pub fn bind_edges<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&EdgeView) -> P + 'static,
    {
        self.syncers.push(Box::new(EdgeModelSyncer { model, constructor }));
    }

    pub fn is_empty(&self) -> bool {
        self.syncers.is_empty()
    }

    /// Push `snapshot` into every bound model.
    pub fn sync(&self, snapshot: &GraphSnapshot) {
        for syncer in &self.syncers {
            syncer.sync(snapshot);
        }
    }
}
