/// Core data types for the row decoder
///
/// This module defines the fundamental types used throughout the system:
/// - VertexId / RelationId / TypeId: identifiers read out of the edgestore
/// - Row / Column: raw edgestore input
/// - RelationRecord: one column in decoded form
/// - Vertex / Edge: decoded graph elements
/// - RowGraph: per-row vertex cache and edge arena

pub mod edge;
pub mod graph;
pub mod ids;
pub mod relation;
pub mod row;
pub mod vertex;

pub use edge::Edge;
pub use graph::{GraphError, GraphResult, RowGraph};
pub use ids::{Direction, IdError, RelationId, TypeId, VertexId};
pub use relation::{RelationPayload, RelationRecord};
pub use row::{Column, Row};
pub use vertex::{Vertex, VertexProperty};
