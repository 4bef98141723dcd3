//! # Slint Bellman-Ford Editor
//!
//! Core of an interactive weighted directed graph editor with a Bellman-Ford
//! shortest-path engine and negative-cycle detection. The UI is a thin Slint
//! layer that forwards clicks and key presses and redraws from snapshots.
//!
//! ## Features
//!
//! - **Arena Graph Store** - Vertices and edges addressed by stable ids, cascade removal
//! - **Single Selection** - At most one active vertex and one active edge, always
//! - **Keyboard Weight Editing** - Digits, sign keys and backspace edit the active edge
//! - **Bellman-Ford** - Distances written in place, negative cycles reported
//! - **Pluggable Validation** - Compose connection rules via `EdgeValidator`
//!
//! ## Rust API
//!
//! - [`GraphEditorController`] - Input handling and callback factories
//! - [`Graph`] - Vertex and edge storage with hit-test based picking
//! - [`bellman_ford`] - Shortest paths from one vertex
//! - [`WeightEdit`] - Keystroke edits of an edge weight
//! - [`GraphSnapshot`] / [`SnapshotModels`] - Render state and Slint model sync
//! - [`EditorConfig`] - Geometry constants and the start key
//!
//! ## Logging
//!
//! The crate logs through the `log` facade. Install any logger in the host
//! application to see graph mutations (`debug`), algorithm runs (`info`) and
//! negative cycles (`warn`).

pub mod bellman_ford;
pub mod config;
pub mod controller;
pub mod error;
pub mod graph;
pub mod path;
pub mod selection;
pub mod snapshot;
pub mod validation;
pub mod weight;

pub use bellman_ford::{bellman_ford, Distance, ShortestPathRun};
pub use config::EditorConfig;
pub use controller::{
    GraphEditorController, InteractionState, KeyInput, KeyOutcome, PointerButton,
    PointerOutcome, HINTS,
};
pub use error::{GraphError, ShortestPathError};
pub use graph::{Edge, EdgeId, Graph, Picked, Vertex, VertexId};
pub use hit_test::{HitTester, RadiusHitTester};
pub use path::{distance_to_segment_sq, EdgeGeometry, Point};
pub use selection::SelectionSnapshot;
pub use snapshot::{EdgeView, GraphSnapshot, SnapshotModels, VertexView};
pub use validation::{
    // Connection validation framework
    validate_edge, BasicEdgeValidator, CompositeValidator, EdgeValidator,
    NoParallelEdgesValidator, ValidationError, ValidationResult,
};
pub use weight::{apply_all, WeightEdit};
