//! Test harness driving the controller the way the UI does.
//!
//! Clicks and key presses go through the same callback factories a Slint
//! window would use, and the snapshot models are bound exactly as an
//! application binds them.

#![allow(dead_code)]

use super::{assert_graph_invariants, SnapshotTracker};
use slint::{platform::PointerEventButton, Model, SharedString, VecModel};
use slint_bellman_editor::{
    Distance, EdgeId, GraphEditorController, InteractionState, Point, PointerOutcome,
    SnapshotModels, VertexId,
};
use std::rc::Rc;

/// Row type standing in for the UI's vertex struct.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRow {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub active: bool,
    pub distance: SharedString,
}

/// Row type standing in for the UI's edge struct.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub id: i32,
    pub path: SharedString,
    pub arrow: SharedString,
    pub label: SharedString,
    pub active: bool,
}

/// Controller plus bound models and a snapshot tracker.
pub struct EditorHarness {
    pub ctrl: GraphEditorController,
    pub vertices: Rc<VecModel<VertexRow>>,
    pub edges: Rc<VecModel<EdgeRow>>,
    pub tracker: SnapshotTracker,
    pointer: Box<dyn Fn(f32, f32, PointerEventButton)>,
    key: Box<dyn Fn(SharedString) -> bool>,
    run: Box<dyn Fn() -> SharedString>,
}

impl EditorHarness {
    pub fn new() -> Self {
        Self::with_controller(GraphEditorController::new())
    }

    pub fn with_controller(ctrl: GraphEditorController) -> Self {
        let vertices = Rc::new(VecModel::<VertexRow>::default());
        let edges = Rc::new(VecModel::<EdgeRow>::default());

        let mut models = SnapshotModels::new();
        models.bind_vertices(vertices.clone(), |v| VertexRow {
            id: v.id.as_i32(),
            x: v.position.x,
            y: v.position.y,
            active: v.active,
            distance: v.distance_label(),
        });
        models.bind_edges(edges.clone(), |e| EdgeRow {
            id: e.id.as_i32(),
            path: e.path_commands(),
            arrow: e.arrow_commands(),
            label: e.weight_label(),
            active: e.active,
        });

        let tracker = SnapshotTracker::new();
        ctrl.on_changed({
            let snapshots = tracker.snapshots.clone();
            move |snapshot| {
                models.sync(snapshot);
                snapshots.borrow_mut().push(snapshot.clone());
            }
        });

        Self {
            pointer: Box::new(ctrl.pointer_clicked_callback()),
            key: Box::new(ctrl.key_pressed_callback()),
            run: Box::new(ctrl.run_shortest_path_callback()),
            ctrl,
            vertices,
            edges,
            tracker,
        }
    }

    // === Input simulation ===

    pub fn click(&self, x: f32, y: f32) {
        (self.pointer)(x, y, PointerEventButton::Left);
        self.check();
    }

    pub fn right_click(&self, x: f32, y: f32) {
        (self.pointer)(x, y, PointerEventButton::Right);
        self.check();
    }

    /// Send each character of `text` as its own key event.
    pub fn type_text(&self, text: &str) {
        for c in text.chars() {
            self.press(SharedString::from(c.to_string().as_str()));
        }
    }

    pub fn press(&self, text: impl Into<SharedString>) -> bool {
        let accepted = (self.key)(text.into());
        self.check();
        accepted
    }

    /// Invoke the run command; returns the status text.
    pub fn run(&self) -> SharedString {
        let status = (self.run)();
        self.check();
        status
    }

    // === Scene building ===

    /// Click empty space at (x, y) and return the new vertex.
    pub fn add_vertex(&self, x: f32, y: f32) -> VertexId {
        match self.ctrl.handle_pointer(Point::new(x, y), slint_bellman_editor::PointerButton::Primary) {
            PointerOutcome::VertexCreated(id) => {
                self.check();
                id
            }
            other => panic!("expected a new vertex at ({}, {}), got {:?}", x, y, other),
        }
    }

    /// Select the vertex at `from`, then click the vertex at `to`.
    pub fn connect(&self, from: Point, to: Point) -> EdgeId {
        self.ctrl.graph().borrow_mut().clear_selection();
        self.click(from.x, from.y);
        match self.ctrl.handle_pointer(to, slint_bellman_editor::PointerButton::Primary) {
            PointerOutcome::EdgeCreated { edge, .. } => {
                self.check();
                edge
            }
            other => panic!("expected a new edge {} -> {}, got {:?}", from, to, other),
        }
    }

    /// Click the edge label point, type `weight`, confirm.
    pub fn set_weight(&self, edge: EdgeId, weight: i32) {
        let (start, end) = self
            .ctrl
            .graph()
            .borrow()
            .edge_endpoints(edge)
            .expect("edge exists");
        let middle = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);

        self.click(middle.x, middle.y);
        assert_eq!(self.ctrl.state(), InteractionState::EditingWeight(edge));

        // Clear the current value first
        while self.ctrl.graph().borrow().edge(edge).map(|e| e.weight) != Some(0) {
            self.press(SharedString::from(slint::platform::Key::Backspace));
        }
        self.type_text(&weight.unsigned_abs().to_string());
        if weight < 0 {
            self.type_text("-");
        }
        self.press(SharedString::from(slint::platform::Key::Return));
        assert_eq!(self.ctrl.state(), InteractionState::Idle);
    }

    /// Make `vertex` the only active vertex.
    pub fn select_vertex(&self, vertex: VertexId) {
        let graph = self.ctrl.graph();
        let mut graph = graph.borrow_mut();
        graph.deactivate_vertices();
        graph.toggle_vertex(vertex).expect("vertex exists");
    }

    // === Queries ===

    pub fn distance(&self, vertex: VertexId) -> Distance {
        self.ctrl
            .graph()
            .borrow()
            .vertex(vertex)
            .map(|v| v.distance)
            .expect("vertex exists")
    }

    pub fn weight(&self, edge: EdgeId) -> i32 {
        self.ctrl
            .graph()
            .borrow()
            .edge(edge)
            .map(|e| e.weight)
            .expect("edge exists")
    }

    pub fn vertex_row(&self, vertex: VertexId) -> Option<VertexRow> {
        self.vertices.iter().find(|row| row.id == vertex.as_i32())
    }

    pub fn edge_row(&self, edge: EdgeId) -> Option<EdgeRow> {
        self.edges.iter().find(|row| row.id == edge.as_i32())
    }

    /// Invariants plus agreement between graph and bound models.
    pub fn check(&self) {
        let graph = self.ctrl.graph();
        let graph = graph.borrow();
        assert_graph_invariants(&graph);

        if self.tracker.count() > 0 {
            assert_eq!(self.vertices.row_count(), graph.vertex_count());
            assert_eq!(self.edges.row_count(), graph.edge_count());
        }
    }
}
