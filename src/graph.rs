use crate::bellman_ford::Distance;
use crate::config::EditorConfig;
use crate::error::GraphError;
use crate::hit_test::HitTester;
use crate::path::{EdgeGeometry, Point};
use crate::validation::{
    BasicEdgeValidator, CompositeValidator, EdgeValidator, NoParallelEdgesValidator,
    ValidationResult,
};
use log::debug;
use std::fmt;

/// Stable handle of a vertex.
///
/// Handles are never reused: removing a vertex invalidates its slot, and a
/// stale handle simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

/// Stable handle of an edge. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl VertexId {
    /// Integer form used in Slint models.
    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    /// Integer form used in Slint models.
    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point,
    /// Selection highlight. At most one vertex is active at a time.
    pub active: bool,
    /// Shortest-path distance from the last run's start vertex.
    pub distance: Distance,
}

/// A directed, weighted edge. Holds vertex handles, not vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub weight: i32,
    /// Selection highlight. At most one edge is active at a time.
    pub active: bool,
}

impl Edge {
    /// Check if the edge touches `vertex` at either end.
    pub fn is_incident_to(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Check if the edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}

/// Result of a [`Graph::pick`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picked {
    Vertex(VertexId),
    Edge(EdgeId),
}

/// The graph store: owns vertices and edges.
///
/// Vertices live in an append-only slot arena, so slot order is creation
/// order and removal is a slot invalidation plus a filter over the edges.
/// Edges are kept in creation order as well.
pub struct Graph {
    vertices: Vec<Option<Vertex>>,
    vertex_count: usize,
    edges: Vec<Edge>,
    next_edge_id: u32,
    validator: Box<dyn EdgeValidator>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .finish()
    }
}

impl Graph {
    /// Create an empty graph that refuses self loops and parallel edges.
    pub fn new() -> Self {
        Self::with_validator(
            CompositeValidator::new()
                .add(BasicEdgeValidator)
                .add(NoParallelEdgesValidator),
        )
    }

    /// Create an empty graph with a custom connection policy.
    pub fn with_validator<V: EdgeValidator + 'static>(validator: V) -> Self {
        Self {
            vertices: Vec::new(),
            vertex_count: 0,
            edges: Vec::new(),
            next_edge_id: 0,
            validator: Box::new(validator),
        }
    }

    // === Mutation ===

    /// Append a new vertex. Positions may overlap existing vertices.
    pub fn create_vertex(&mut self, position: Point) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Some(Vertex {
            id,
            position,
            active: false,
            distance: Distance::Unreachable,
        }));
        self.vertex_count += 1;
        debug!("created vertex {} at {}", id, position);
        id
    }

    /// Append a new edge with weight 0.
    ///
    /// The graph's validator runs first; by default self loops and a second
    /// edge between an already connected pair (either direction) are refused.
    pub fn create_edge(&mut self, start: VertexId, end: VertexId) -> Result<EdgeId, GraphError> {
        if let ValidationResult::Invalid(err) = self.validator.validate(self, start, end) {
            debug!("refused edge {} -> {}: {}", start, end, err);
            return Err(err.into());
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            start,
            end,
            weight: 0,
            active: false,
        });
        debug!("created edge {} ({} -> {})", id, start, end);
        Ok(id)
    }

    /// Remove a vertex and every edge touching it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, GraphError> {
        let vertex = self
            .vertices
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(GraphError::VertexNotFound(id))?;
        self.vertex_count -= 1;

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.is_incident_to(id));
        debug!(
            "removed vertex {} and {} incident edge(s)",
            id,
            before - self.edges.len()
        );
        Ok(vertex)
    }

    /// Remove a single edge. Vertices are untouched.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|edge| edge.id == id)
            .ok_or(GraphError::EdgeNotFound(id))?;
        let edge = self.edges.remove(index);
        debug!("removed edge {}", id);
        Ok(edge)
    }

    /// Overwrite an edge weight.
    pub fn set_weight(&mut self, id: EdgeId, weight: i32) -> Result<(), GraphError> {
        let edge = self.edge_mut(id).ok_or(GraphError::EdgeNotFound(id))?;
        edge.weight = weight;
        Ok(())
    }

    /// Mark every vertex unreachable. Run before each shortest-path pass.
    pub fn reset_distances(&mut self) {
        for vertex in self.vertices.iter_mut().flatten() {
            vertex.distance = Distance::Unreachable;
        }
    }

    pub(crate) fn set_distance(&mut self, id: VertexId, distance: Distance) {
        if let Some(vertex) = self.vertex_mut(id) {
            vertex.distance = distance;
        }
    }

    // === Queries ===

    /// Find the object drawn under `position`.
    ///
    /// Vertices are drawn on top of edges, so they win; among overlapping
    /// vertices the most recently created one wins. Edges are checked in
    /// creation order.
    pub fn pick<H: HitTester>(&self, position: Point, tester: &H) -> Option<Picked> {
        if let Some(vertex) = self
            .vertices()
            .rev()
            .find(|vertex| tester.vertex_contains(vertex, position))
        {
            return Some(Picked::Vertex(vertex.id));
        }

        self.edges
            .iter()
            .find(|edge| {
                self.edge_endpoints(edge.id)
                    .is_some_and(|(start, end)| tester.edge_contains(start, end, position))
            })
            .map(|edge| Picked::Edge(edge.id))
    }

    /// The active vertex, if any.
    pub fn active_vertex(&self) -> Option<VertexId> {
        self.vertices().find(|vertex| vertex.active).map(|vertex| vertex.id)
    }

    /// The active edge, if any.
    pub fn active_edge(&self) -> Option<EdgeId> {
        self.edges.iter().find(|edge| edge.active).map(|edge| edge.id)
    }

    /// All edges touching `vertex`, in edge creation order.
    pub fn incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |edge| edge.is_incident_to(vertex))
    }

    /// Edges leaving `vertex`, in edge creation order.
    pub fn outgoing_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.incident_edges(vertex).filter(move |edge| edge.start == vertex)
    }

    /// Check whether any edge joins `a` and `b`, in either direction.
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> bool {
        self.edges.iter().any(|edge| edge.connects(a, b))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| edge.id == id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Live vertices in creation order.
    pub fn vertices(&self) -> impl DoubleEndedIterator<Item = &Vertex> + '_ {
        self.vertices.iter().flatten()
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> + '_ {
        self.vertices.iter_mut().flatten()
    }

    /// Edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> + '_ {
        self.edges.iter_mut()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Centers of the two endpoint vertices.
    pub fn edge_endpoints(&self, id: EdgeId) -> Option<(Point, Point)> {
        let edge = self.edge(id)?;
        let start = self.vertex(edge.start)?.position;
        let end = self.vertex(edge.end)?.position;
        Some((start, end))
    }

    /// Presentation geometry of an edge, recomputed from its endpoints.
    pub fn edge_geometry(&self, id: EdgeId, config: &EditorConfig) -> Option<EdgeGeometry> {
        let (start, end) = self.edge_endpoints(id)?;
        Some(EdgeGeometry::between(start, end, config))
    }
}
