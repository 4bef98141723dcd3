//! Connection validation framework.
//!
//! Every [`Graph::create_edge`](crate::Graph::create_edge) call runs through
//! the graph's [`EdgeValidator`]. The default policy is
//! [`BasicEdgeValidator`] followed by [`NoParallelEdgesValidator`].
//!
//! ```ignore
//! let graph = Graph::with_validator(
//!     CompositeValidator::new()
//!         .add(BasicEdgeValidator)
//!         .add(MaxOutDegree(3)),
//! );
//! ```

use crate::graph::{Graph, VertexId};
use thiserror::Error;

/// Result of edge validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Edge is valid
    Valid,
    /// Edge is invalid with a reason
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Check if the result is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }
}

/// Reasons why an edge was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("vertex {0} does not exist")]
    VertexNotFound(VertexId),
    #[error("cannot connect a vertex to itself")]
    SelfLoop,
    /// The pair is already joined, in either direction
    #[error("vertices are already connected")]
    AlreadyConnected,
    #[error("{0}")]
    Custom(String),
}

/// Trait for connection rules.
///
/// Implement this to add custom rules and combine them with
/// [`CompositeValidator`].
pub trait EdgeValidator {
    /// Check if an edge from `start` to `end` may be added to `graph`
    fn validate(&self, graph: &Graph, start: VertexId, end: VertexId) -> ValidationResult;
}

/// Both endpoints must exist and differ.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicEdgeValidator;

impl EdgeValidator for BasicEdgeValidator {
    fn validate(&self, graph: &Graph, start: VertexId, end: VertexId) -> ValidationResult {
        for id in [start, end] {
            if !graph.contains_vertex(id) {
                return ValidationResult::Invalid(ValidationError::VertexNotFound(id));
            }
        }

        if start == end {
            return ValidationResult::Invalid(ValidationError::SelfLoop);
        }

        ValidationResult::Valid
    }
}

/// At most one edge per unordered vertex pair.
///
/// (A, B) and (B, A) count as the same connection even though edges are
/// directed for shortest-path purposes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoParallelEdgesValidator;

impl EdgeValidator for NoParallelEdgesValidator {
    fn validate(&self, graph: &Graph, start: VertexId, end: VertexId) -> ValidationResult {
        if graph.edges_between(start, end) {
            ValidationResult::Invalid(ValidationError::AlreadyConnected)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the edge to be valid (AND logic).
/// Returns the first error encountered (short-circuits on failure).
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn EdgeValidator>>,
}

impl CompositeValidator {
    /// Create a new empty composite validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator to the composite
    ///
    /// Validators are checked in the order they were added.
    pub fn add<V: EdgeValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl EdgeValidator for CompositeValidator {
    fn validate(&self, graph: &Graph, start: VertexId, end: VertexId) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(graph, start, end);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

/// Convenience function to validate an edge with any validator
pub fn validate_edge<V: EdgeValidator + ?Sized>(
    graph: &Graph,
    start: VertexId,
    end: VertexId,
    validator: &V,
) -> ValidationResult {
    validator.validate(graph, start, end)
}
