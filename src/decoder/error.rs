/// Error types for row decoding

use crate::codec::CodecError;
use crate::schema::{RelationKind, SchemaError};
use crate::types::{Direction, GraphError, RelationId, VertexId};
use thiserror::Error;

/// Fatal row decoding errors
///
/// Rows that are skipped on purpose (partitioned vertex with filtering on,
/// no existence marker, no surviving relations) are not errors; the decoder
/// returns `Ok(None)` for them.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Row key is unreadable or holds a non-positive vertex ID
    #[error("Malformed row key: {0}")]
    MalformedKey(String),

    /// Partitioned vertex read while filtering is disabled
    #[error("Read partitioned vertex (ID={0}), but partitioned vertex filtering is disabled")]
    PartitionedVertexUnsupported(VertexId),

    /// Edge to a partitioned vertex read while filtering is disabled
    #[error(
        "Read edge {relation} from vertex {vertex} to partitioned vertex {other} ({label}), \
         but partitioned vertex filtering is disabled"
    )]
    PartitionedNeighborUnsupported {
        relation: RelationId,
        vertex: VertexId,
        other: VertexId,
        label: String,
    },

    /// Edge stored with a direction other than OUT or IN
    #[error("Direction {direction} is not supported (edge {relation})")]
    UnsupportedDirection {
        direction: Direction,
        relation: RelationId,
    },

    /// Property relation without a value
    #[error("Property {key} (relation {relation}) has no value")]
    NullPropertyValue { key: String, relation: RelationId },

    /// Edge carrying an edge-typed relation property
    #[error("Meta-edges are not supported: edge {relation} carries edge label {label}")]
    MetaEdgesUnsupported { relation: RelationId, label: String },

    /// Column payload disagrees with its relation type
    #[error("Relation {relation} of {kind} type {type_name} has a mismatched payload")]
    PayloadMismatch {
        relation: RelationId,
        type_name: String,
        kind: RelationKind,
    },

    /// Any failure while processing one column of a row
    #[error("Failed to decode column {index} of vertex {vertex}: {source}")]
    Relation {
        vertex: VertexId,
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    /// Column bytes could not be parsed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Schema lookup failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Row graph rejected a mutation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Result type for row decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

impl DecodeError {
    /// Wrap an error raised while processing column `index`
    pub(crate) fn in_column(self, vertex: VertexId, index: usize) -> Self {
        DecodeError::Relation {
            vertex,
            index,
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through column wrappers
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Relation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Index of the column that failed, if the error came from a column
    pub fn column_index(&self) -> Option<usize> {
        match self {
            DecodeError::Relation { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_column_wrapping_preserves_source() {
        let inner = DecodeError::NullPropertyValue {
            key: "name".to_string(),
            relation: RelationId(7),
        };
        let wrapped = inner.in_column(VertexId::from_raw(8), 3);

        assert_eq!(wrapped.column_index(), Some(3));
        assert!(matches!(
            wrapped.root_cause(),
            DecodeError::NullPropertyValue { .. }
        ));
        assert!(wrapped.source().is_some());
        assert!(wrapped.to_string().contains("column 3 of vertex 8"));
    }

    #[test]
    fn test_unwrapped_root_cause() {
        let error = DecodeError::MalformedKey("empty".to_string());
        assert!(matches!(error.root_cause(), DecodeError::MalformedKey(_)));
        assert_eq!(error.column_index(), None);
    }
}
