/// Schema collaborators consumed by the row decoder
///
/// This module defines the lookups the decoder needs and ships in-memory
/// implementations of each:
/// - IdInspector: row key → vertex ID, partitioned vertex detection (IdManager)
/// - SystemTypeInspector: reserved system relation types (SystemTypes)
/// - TypeInspector: relation type names/kinds and vertex label names (SchemaCatalog)

pub mod catalog;
pub mod id_manager;
pub mod system;

pub use catalog::SchemaCatalog;
pub use id_manager::IdManager;
pub use system::SystemTypes;

use crate::types::{TypeId, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Schema lookup errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Row key has the wrong length
    #[error("Invalid row key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// No relation type with this ID
    #[error("Unknown relation type: {0}")]
    UnknownType(TypeId),

    /// No vertex label with this ID
    #[error("Unknown vertex label: {0}")]
    UnknownVertexLabel(VertexId),

    /// User types may not use the reserved system ID range
    #[error("Type ID {0} is reserved for system types")]
    ReservedTypeId(TypeId),

    /// The same ID was registered twice
    #[error("Duplicate schema entry: {0}")]
    Duplicate(String),

    /// Schema file could not be parsed
    #[error("Schema parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for schema lookups
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Whether a relation type describes properties or edges
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    PropertyKey,
    EdgeLabel,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::PropertyKey => f.write_str("property key"),
            RelationKind::EdgeLabel => f.write_str("edge label"),
        }
    }
}

/// A user-defined relation type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationType {
    pub id: TypeId,
    pub name: String,
    pub kind: RelationKind,

    /// Invisible types hold internal bookkeeping and are never decoded
    #[serde(default)]
    pub invisible: bool,
}

impl RelationType {
    pub fn is_property_key(&self) -> bool {
        self.kind == RelationKind::PropertyKey
    }

    pub fn is_edge_label(&self) -> bool {
        self.kind == RelationKind::EdgeLabel
    }
}

/// Maps row keys to vertex IDs and classifies vertex IDs
pub trait IdInspector: Send + Sync {
    /// Read the signed vertex ID encoded in a row key
    fn key_to_id(&self, key: &[u8]) -> SchemaResult<i64>;

    /// True if the vertex is one fragment of a partitioned vertex
    fn is_partitioned_vertex(&self, id: VertexId) -> bool;
}

/// Classifies reserved system relation types
pub trait SystemTypeInspector: Send + Sync {
    fn is_system_type(&self, type_id: TypeId) -> bool;

    /// The relation pointing at the vertex's label
    fn is_vertex_label_type(&self, type_id: TypeId) -> bool;

    /// The marker relation written for every live vertex
    fn is_vertex_exists_type(&self, type_id: TypeId) -> bool;
}

/// Resolves user-defined relation types and vertex labels
pub trait TypeInspector: Send + Sync {
    fn relation_type(&self, type_id: TypeId) -> SchemaResult<&RelationType>;

    /// Name of the vertex label whose schema vertex has ID `label_id`
    fn vertex_label_name(&self, label_id: VertexId) -> SchemaResult<&str>;

    /// Release any resources held by the inspector
    fn close(&self) {}
}
