use crate::config::EditorConfig;
use std::fmt;

/// A position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Derived presentation attributes of an edge.
///
/// The line runs between the borders of the two vertex circles rather than
/// their centers, so the arrowhead tip touches the end vertex. The label sits
/// beside the midpoint, pushed perpendicular to the line so it does not
/// overlap it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    /// Point on the start vertex border.
    pub start: Point,
    /// Point on the end vertex border (arrow tip).
    pub end: Point,
    /// Arrowhead corners: tip, left, right.
    pub arrow: [Point; 3],
    /// Where the weight label is drawn.
    pub label: Point,
}

impl EdgeGeometry {
    /// Compute the geometry of an edge between two vertex centers.
    ///
    /// When the circles overlap there is no visible line; the anchors collapse
    /// to the centers and the arrowhead degenerates to a point.
    pub fn between(start_center: Point, end_center: Point, config: &EditorConfig) -> Self {
        let dx = end_center.x - start_center.x;
        let dy = end_center.y - start_center.y;
        let length = (dx * dx + dy * dy).sqrt();
        let radius = config.vertex_outer_radius();

        if length <= 2.0 * radius || length < f32::EPSILON {
            let mid = start_center.lerp(end_center, 0.5);
            return Self {
                start: start_center,
                end: end_center,
                arrow: [end_center; 3],
                label: Point::new(mid.x, mid.y - config.label_offset),
            };
        }

        // Unit direction and its left-hand normal
        let (ux, uy) = (dx / length, dy / length);
        let (nx, ny) = (-uy, ux);

        let start = Point::new(start_center.x + ux * radius, start_center.y + uy * radius);
        let end = Point::new(end_center.x - ux * radius, end_center.y - uy * radius);

        let base = Point::new(end.x - ux * config.arrow_length, end.y - uy * config.arrow_length);
        let half_width = config.arrow_width * 0.5;
        let left = Point::new(base.x + nx * half_width, base.y + ny * half_width);
        let right = Point::new(base.x - nx * half_width, base.y - ny * half_width);

        let mid = start.lerp(end, 0.5);
        let label = Point::new(mid.x + nx * config.label_offset, mid.y + ny * config.label_offset);

        Self {
            start,
            end,
            arrow: [end, left, right],
            label,
        }
    }

    /// SVG path command for the edge line (e.g. "M 10 20 L 140 80").
    pub fn path_commands(&self) -> String {
        format!(
            "M {} {} L {} {}",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }

    /// SVG path command for the closed arrowhead triangle.
    pub fn arrow_commands(&self) -> String {
        let [tip, left, right] = self.arrow;
        format!(
            "M {} {} L {} {} L {} {} Z",
            tip.x, tip.y, left.x, left.y, right.x, right.y
        )
    }

    /// Distance from `point` to the edge line.
    pub fn distance_to(&self, point: Point) -> f32 {
        distance_to_segment_sq(point, self.start, self.end).sqrt()
    }

    /// Check whether `point` lies inside the arrowhead triangle.
    pub fn arrow_contains(&self, point: Point) -> bool {
        let [a, b, c] = self.arrow;
        let d1 = cross(point, a, b);
        let d2 = cross(point, b, c);
        let d3 = cross(point, c, a);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        // A degenerate triangle has all three cross products at zero
        (has_neg != has_pos) || (!has_neg && !has_pos && a.distance_sq(point) < f32::EPSILON)
    }
}

fn cross(p: Point, a: Point, b: Point) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Calculate squared distance from a point to a line segment
pub fn distance_to_segment_sq(point: Point, a: Point, b: Point) -> f32 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (point.x - a.x, point.y - a.y);

    let ab_len_sq = ab.0 * ab.0 + ab.1 * ab.1;

    if ab_len_sq < f32::EPSILON {
        // Degenerate segment (a == b)
        return ap.0 * ap.0 + ap.1 * ap.1;
    }

    // Project point onto line, clamped to segment
    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / ab_len_sq).clamp(0.0, 1.0);

    let closest = Point::new(a.x + t * ab.0, a.y + t * ab.1);
    point.distance_sq(closest)
}
