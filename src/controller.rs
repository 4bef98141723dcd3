//! Interaction controller for the graph editor.
//!
//! The [`GraphEditorController`] owns the graph and turns raw pointer clicks
//! and key presses into graph operations. The editor has two states:
//! [`Idle`](InteractionState::Idle) and
//! [`EditingWeight`](InteractionState::EditingWeight). The state is not
//! stored; it is whatever the active edge says it is.
//!
//! # Example
//!
//! ```ignore
//! use slint_bellman_editor::{GraphEditorController, SnapshotModels};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = GraphEditorController::new();
//!
//!     let vertices = Rc::new(VecModel::<VertexData>::default());
//!     let edges = Rc::new(VecModel::<EdgeData>::default());
//!     let mut models = SnapshotModels::new();
//!     models.bind_vertices(vertices.clone(), vertex_row);
//!     models.bind_edges(edges.clone(), edge_row);
//!     window.set_vertices(ModelRc::from(vertices));
//!     window.set_edges(ModelRc::from(edges));
//!
//!     let w = window.as_weak();
//!     ctrl.on_changed(move |snapshot| {
//!         models.sync(snapshot);
//!         if let Some(w) = w.upgrade() {
//!             w.set_show_hints(snapshot.show_hints);
//!         }
//!     });
//!
//!     window.on_pointer_clicked(ctrl.pointer_clicked_callback());
//!     window.on_key_pressed(ctrl.key_pressed_callback());
//!     window.on_run_shortest_path(ctrl.run_shortest_path_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::bellman_ford::{bellman_ford, ShortestPathRun};
use crate::config::EditorConfig;
use crate::error::{GraphError, ShortestPathError};
use crate::graph::{EdgeId, Graph, Picked, VertexId};
use crate::hit_test::RadiusHitTester;
use crate::path::Point;
use crate::selection::SelectionSnapshot;
use crate::snapshot::GraphSnapshot;
use crate::validation::ValidationError;
use crate::weight::WeightEdit;
use log::{debug, info, warn};
use slint::platform::{Key, PointerEventButton};
use slint::SharedString;
use std::cell::RefCell;
use std::rc::Rc;

/// Help lines shown by the hint overlay.
pub const HINTS: &[&str] = &[
    "F1: hide or show these hints",
    "Left click on empty space: add a vertex",
    "Left click a vertex: select or deselect it",
    "Left click a second vertex: connect the selected vertex to it",
    "Left click an edge: select it and type its weight",
    "While an edge is selected: digits append, '-' negates, '+' drops the sign",
    "Backspace: remove the last digit, Enter or Escape: finish editing",
    "Right click a vertex or an edge: remove it",
    "S with a vertex selected: run Bellman-Ford from that vertex",
];

/// Where the editor is in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    /// Key presses go into this edge's weight.
    EditingWeight(EdgeId),
}

/// Pointer button, reduced to what the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Create, select and connect.
    Primary,
    /// Remove. Every non-primary button maps here.
    Secondary,
}

impl From<PointerEventButton> for PointerButton {
    fn from(button: PointerEventButton) -> Self {
        match button {
            PointerEventButton::Left => PointerButton::Primary,
            _ => PointerButton::Secondary,
        }
    }
}

/// A key press, reduced to what the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Confirm,
    Cancel,
    Backspace,
    ToggleHints,
    Char(char),
}

impl KeyInput {
    /// Parse the `text` of a Slint key event.
    ///
    /// Returns `None` for empty or multi-character text.
    pub fn from_text(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        let input = if c == char::from(Key::Return) || c == '\r' {
            KeyInput::Confirm
        } else if c == char::from(Key::Escape) {
            KeyInput::Cancel
        } else if c == char::from(Key::Backspace) {
            KeyInput::Backspace
        } else if c == char::from(Key::F1) {
            KeyInput::ToggleHints
        } else {
            KeyInput::Char(c)
        };
        Some(input)
    }
}

/// What a pointer click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    VertexCreated(VertexId),
    VertexToggled { vertex: VertexId, active: bool },
    EdgeCreated { edge: EdgeId, start: VertexId, end: VertexId },
    /// The pending connection was refused; the selection is unchanged.
    ConnectionRefused(ValidationError),
    EdgeToggled { edge: EdgeId, active: bool },
    VertexRemoved(VertexId),
    EdgeRemoved(EdgeId),
    Ignored,
}

impl PointerOutcome {
    pub fn changed_graph(&self) -> bool {
        !matches!(
            self,
            PointerOutcome::ConnectionRefused(_) | PointerOutcome::Ignored
        )
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    WeightChanged { edge: EdgeId, weight: i32 },
    /// Editing ended; the weight is kept.
    EditFinished { edge: EdgeId, weight: i32 },
    HintsToggled(bool),
    ShortestPath(Result<ShortestPathRun, ShortestPathError>),
    Ignored,
}

impl KeyOutcome {
    /// Whether the key was consumed by the editor.
    pub fn is_handled(&self) -> bool {
        !matches!(
            self,
            KeyOutcome::Ignored | KeyOutcome::ShortestPath(Err(ShortestPathError::NoActiveVertex))
        )
    }
}

type ChangeListener = Box<dyn Fn(&GraphSnapshot)>;

/// Controller that owns the graph and provides callback implementations.
///
/// All input goes through [`handle_pointer`](Self::handle_pointer),
/// [`handle_key`](Self::handle_key) and
/// [`run_shortest_path`](Self::run_shortest_path). Each call applies its
/// whole transition before returning, then notifies the change listener.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct GraphEditorController {
    graph: Rc<RefCell<Graph>>,
    config: Rc<RefCell<EditorConfig>>,
    show_hints: Rc<RefCell<bool>>,
    changed: Rc<RefCell<Option<ChangeListener>>>,
}

impl Default for GraphEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEditorController {
    /// Create a controller over an empty graph. Hints start visible.
    pub fn new() -> Self {
        Self::with_graph(Graph::new())
    }

    /// Create a controller over an existing graph.
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            graph: Rc::new(RefCell::new(graph)),
            config: Rc::new(RefCell::new(EditorConfig::default())),
            show_hints: Rc::new(RefCell::new(true)),
            changed: Rc::new(RefCell::new(None)),
        }
    }

    /// Get access to the graph.
    pub fn graph(&self) -> Rc<RefCell<Graph>> {
        self.graph.clone()
    }

    pub fn config(&self) -> EditorConfig {
        *self.config.borrow()
    }

    /// Replace the configuration. Takes effect on the next event.
    pub fn set_config(&self, config: EditorConfig) {
        *self.config.borrow_mut() = config;
        self.notify();
    }

    /// Register the listener called with a fresh snapshot after every change.
    pub fn on_changed(&self, listener: impl Fn(&GraphSnapshot) + 'static) {
        *self.changed.borrow_mut() = Some(Box::new(listener));
    }

    pub fn state(&self) -> InteractionState {
        match self.graph.borrow().active_edge() {
            Some(edge) => InteractionState::EditingWeight(edge),
            None => InteractionState::Idle,
        }
    }

    pub fn selection(&self) -> SelectionSnapshot {
        self.graph.borrow().selection()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.graph.borrow(), &self.config.borrow())
            .with_hints(*self.show_hints.borrow())
    }

    pub fn show_hints(&self) -> bool {
        *self.show_hints.borrow()
    }

    pub fn set_show_hints(&self, show: bool) {
        *self.show_hints.borrow_mut() = show;
        self.notify();
    }

    pub fn hints(&self) -> &'static [&'static str] {
        HINTS
    }

    // === Callback factories ===

    /// Returns a callback for `pointer-clicked(x, y, button)`.
    pub fn pointer_clicked_callback(&self) -> impl Fn(f32, f32, PointerEventButton) {
        let ctrl = self.clone();
        move |x, y, button| {
            ctrl.handle_pointer(Point::new(x, y), button.into());
        }
    }

    /// Returns a callback for `key-pressed(text) -> bool`.
    ///
    /// The return value tells Slint whether the key was accepted.
    pub fn key_pressed_callback(&self) -> impl Fn(SharedString) -> bool {
        let ctrl = self.clone();
        move |text| {
            KeyInput::from_text(&text)
                .map(|key| ctrl.handle_key(key).is_handled())
                .unwrap_or(false)
        }
    }

    /// Returns a callback for `run-shortest-path() -> string`.
    ///
    /// Yields an empty status on success or when no vertex is active, and
    /// the error message otherwise.
    pub fn run_shortest_path_callback(&self) -> impl Fn() -> SharedString {
        let ctrl = self.clone();
        move || match ctrl.run_shortest_path() {
            Ok(_) | Err(ShortestPathError::NoActiveVertex) => SharedString::default(),
            Err(err) => err.to_string().into(),
        }
    }

    // === Direct handlers ===

    /// Apply a pointer click at `position`.
    pub fn handle_pointer(&self, position: Point, button: PointerButton) -> PointerOutcome {
        let tester = RadiusHitTester::new(self.config());
        let result = {
            let mut graph = self.graph.borrow_mut();
            let picked = graph.pick(position, &tester);
            match button {
                PointerButton::Primary => primary_click(&mut graph, position, picked),
                PointerButton::Secondary => secondary_click(&mut graph, picked),
            }
        };

        let outcome = result.unwrap_or_else(|err| {
            warn!("pointer click at {} failed: {}", position, err);
            PointerOutcome::Ignored
        });
        if outcome.changed_graph() {
            self.notify();
        }
        outcome
    }

    /// Apply a key press.
    ///
    /// While an edge is active, keys edit its weight. While idle, only the
    /// start key does something. `F1` works in both states.
    pub fn handle_key(&self, key: KeyInput) -> KeyOutcome {
        if key == KeyInput::ToggleHints {
            let show = !self.show_hints();
            self.set_show_hints(show);
            return KeyOutcome::HintsToggled(show);
        }

        match self.state() {
            InteractionState::EditingWeight(edge) => {
                let outcome = self.edit_weight(edge, key);
                if outcome.is_handled() {
                    self.notify();
                }
                outcome
            }
            InteractionState::Idle => match key {
                KeyInput::Char(c) if self.config().is_start_key(c) => {
                    KeyOutcome::ShortestPath(self.run_shortest_path())
                }
                _ => KeyOutcome::Ignored,
            },
        }
    }

    fn edit_weight(&self, edge: EdgeId, key: KeyInput) -> KeyOutcome {
        let mut graph = self.graph.borrow_mut();
        let Some(weight) = graph.edge(edge).map(|e| e.weight) else {
            return KeyOutcome::Ignored;
        };

        let edit = match key {
            KeyInput::Confirm | KeyInput::Cancel => {
                graph.deactivate_edges();
                debug!("finished editing edge {} at weight {}", edge, weight);
                return KeyOutcome::EditFinished { edge, weight };
            }
            KeyInput::Backspace => WeightEdit::Backspace,
            KeyInput::Char(c) => match WeightEdit::from_char(c) {
                Some(edit) => edit,
                None => return KeyOutcome::Ignored,
            },
            KeyInput::ToggleHints => return KeyOutcome::Ignored,
        };

        let next = edit.apply(weight);
        if next == weight {
            return KeyOutcome::Ignored;
        }
        match graph.set_weight(edge, next) {
            Ok(()) => KeyOutcome::WeightChanged { edge, weight: next },
            Err(err) => {
                warn!("weight edit failed: {}", err);
                KeyOutcome::Ignored
            }
        }
    }

    /// Run Bellman-Ford from the active vertex.
    ///
    /// With no active vertex this is a no-op returning
    /// [`ShortestPathError::NoActiveVertex`]. Otherwise distances are reset
    /// first and the selection is left as it was.
    pub fn run_shortest_path(&self) -> Result<ShortestPathRun, ShortestPathError> {
        let result = {
            let mut graph = self.graph.borrow_mut();
            let Some(start) = graph.active_vertex() else {
                debug!("shortest path requested with no active vertex");
                return Err(ShortestPathError::NoActiveVertex);
            };
            info!("running shortest paths from {}", start);
            graph.reset_distances();
            bellman_ford(&mut graph, start)
        };
        self.notify();
        result
    }

    /// Reset every distance to unreachable.
    pub fn reset_distances(&self) {
        self.graph.borrow_mut().reset_distances();
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = self.changed.borrow().as_ref() {
            listener(&self.snapshot());
        }
    }
}

fn primary_click(
    graph: &mut Graph,
    position: Point,
    picked: Option<Picked>,
) -> Result<PointerOutcome, GraphError> {
    match picked {
        None => {
            graph.clear_selection();
            Ok(PointerOutcome::VertexCreated(graph.create_vertex(position)))
        }
        Some(Picked::Vertex(vertex)) => match graph.active_vertex() {
            Some(pending) if pending != vertex => match graph.create_edge(pending, vertex) {
                Ok(edge) => {
                    graph.deactivate_vertices();
                    Ok(PointerOutcome::EdgeCreated {
                        edge,
                        start: pending,
                        end: vertex,
                    })
                }
                Err(GraphError::InvalidEdge(reason)) => {
                    debug!("connection {} -> {} refused: {}", pending, vertex, reason);
                    Ok(PointerOutcome::ConnectionRefused(reason))
                }
                Err(err) => Err(err),
            },
            _ => {
                let active = graph.toggle_vertex(vertex)?;
                Ok(PointerOutcome::VertexToggled { vertex, active })
            }
        },
        Some(Picked::Edge(edge)) => {
            let active = graph.toggle_edge(edge)?;
            Ok(PointerOutcome::EdgeToggled { edge, active })
        }
    }
}

fn secondary_click(graph: &mut Graph, picked: Option<Picked>) -> Result<PointerOutcome, GraphError> {
    match picked {
        Some(Picked::Vertex(vertex)) => {
            graph.remove_vertex(vertex)?;
            Ok(PointerOutcome::VertexRemoved(vertex))
        }
        Some(Picked::Edge(edge)) => {
            graph.remove_edge(edge)?;
            Ok(PointerOutcome::EdgeRemoved(edge))
        }
        None => Ok(PointerOutcome::Ignored),
    }
}
