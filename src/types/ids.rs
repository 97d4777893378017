use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error types for identifier construction
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdError {
    #[error("Vertex ID must be positive, got {0}")]
    NonPositive(i64),
}

/// VertexId: positive 64-bit identifier of a vertex
///
/// The low bits of the raw value carry the vertex kind (see
/// `schema::IdManager`); the remaining bits are opaque to the decoder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u64);

impl VertexId {
    /// Create a vertex ID from a signed value read out of a row key
    ///
    /// # Returns
    /// * `Ok(VertexId)` if `value > 0`
    /// * `Err(IdError::NonPositive)` otherwise
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value <= 0 {
            return Err(IdError::NonPositive(value));
        }
        Ok(Self(value as u64))
    }

    /// Create a VertexId from a raw 64-bit value (unchecked)
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw 64-bit value
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VertexId> for u64 {
    fn from(id: VertexId) -> u64 {
        id.0
    }
}

impl TryFrom<i64> for VertexId {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of one relation instance (a single edge or property occurrence)
///
/// Relation IDs are assigned by the storage layer and are used verbatim as
/// the IDs of decoded properties and edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub u64);

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a relation type (property key, edge label or system type)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u64);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge direction relative to the vertex whose row is being decoded
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Out,
    In,
    Both,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
            Direction::Both => "BOTH",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_positive() {
        let id = VertexId::new(42).unwrap();
        assert_eq!(id.as_raw(), 42);
        assert_eq!(u64::from(id), 42);
    }

    #[test]
    fn test_vertex_id_rejects_zero_and_negative() {
        assert_eq!(VertexId::new(0), Err(IdError::NonPositive(0)));
        assert_eq!(VertexId::new(-7), Err(IdError::NonPositive(-7)));
        assert!(VertexId::try_from(-1i64).is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(VertexId::from_raw(8).to_string(), "8");
        assert_eq!(RelationId(900).to_string(), "900");
        assert_eq!(TypeId(101).to_string(), "101");
        assert_eq!(Direction::Both.to_string(), "BOTH");
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::In).unwrap();
        assert_eq!(json, "\"in\"");
        let parsed: Direction = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(parsed, Direction::Out);
    }
}
