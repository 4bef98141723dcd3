//! Editor configuration.
//!
//! [`EditorConfig`] collects the geometry constants the core needs to answer
//! hit-test queries and to derive edge presentation attributes. The values
//! must match what the UI draws, otherwise clicks land on the wrong object.
//!
//! ```ignore
//! let config = EditorConfig::default()
//!     .with_vertex_radius(24.0)
//!     .with_edge_hit_distance(8.0);
//! ctrl.set_config(config);
//! ```

/// Default vertex circle radius in logical pixels.
pub const DEFAULT_VERTEX_RADIUS: f32 = 20.0;
/// Default vertex border width in logical pixels.
pub const DEFAULT_VERTEX_BORDER_WIDTH: f32 = 3.0;
/// Default half-width of the clickable band around an edge line.
pub const DEFAULT_EDGE_HIT_DISTANCE: f32 = 6.0;
/// Default arrowhead length along the edge direction.
pub const DEFAULT_ARROW_LENGTH: f32 = 14.0;
/// Default arrowhead width across the edge direction.
pub const DEFAULT_ARROW_WIDTH: f32 = 10.0;
/// Default distance of the weight label from the edge midpoint.
pub const DEFAULT_LABEL_OFFSET: f32 = 12.0;
/// Default key that starts the shortest-path computation.
pub const DEFAULT_START_KEY: char = 's';

/// Geometry and key bindings shared by the controller, hit tester and
/// snapshot builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub vertex_radius: f32,
    pub vertex_border_width: f32,
    pub edge_hit_distance: f32,
    pub arrow_length: f32,
    pub arrow_width: f32,
    pub label_offset: f32,
    /// Matched case-insensitively while no edge weight is being edited.
    pub start_key: char,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            vertex_radius: DEFAULT_VERTEX_RADIUS,
            vertex_border_width: DEFAULT_VERTEX_BORDER_WIDTH,
            edge_hit_distance: DEFAULT_EDGE_HIT_DISTANCE,
            arrow_length: DEFAULT_ARROW_LENGTH,
            arrow_width: DEFAULT_ARROW_WIDTH,
            label_offset: DEFAULT_LABEL_OFFSET,
            start_key: DEFAULT_START_KEY,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertex_radius(mut self, radius: f32) -> Self {
        self.vertex_radius = radius.max(0.0);
        self
    }

    pub fn with_vertex_border_width(mut self, width: f32) -> Self {
        self.vertex_border_width = width.max(0.0);
        self
    }

    pub fn with_edge_hit_distance(mut self, distance: f32) -> Self {
        self.edge_hit_distance = distance.max(0.0);
        self
    }

    /// Set the arrowhead size (length along the edge, width across it).
    pub fn with_arrow_size(mut self, length: f32, width: f32) -> Self {
        self.arrow_length = length.max(0.0);
        self.arrow_width = width.max(0.0);
        self
    }

    pub fn with_label_offset(mut self, offset: f32) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn with_start_key(mut self, key: char) -> Self {
        self.start_key = key;
        self
    }

    /// Outer radius of a drawn vertex, border included.
    pub fn vertex_outer_radius(&self) -> f32 {
        self.vertex_radius + self.vertex_border_width
    }

    /// Check whether `c` triggers the shortest-path command.
    pub fn is_start_key(&self, c: char) -> bool {
        c.to_lowercase().eq(self.start_key.to_lowercase())
    }
}
