/// Vertex ID layout
///
/// Row keys are the 8-byte big-endian encoding of the vertex ID. The low
/// `SUFFIX_BITS` bits of a vertex ID carry the vertex kind:
///
/// ```text
/// ┌──────────────────────────────────────┬────────┐
/// │ count (61 bits)                      │ suffix │
/// └──────────────────────────────────────┴────────┘
/// ```
///
/// - suffix `000`: normal vertex
/// - suffix `111`: partitioned vertex fragment

use super::{IdInspector, SchemaError, SchemaResult};
use crate::types::VertexId;

/// Length of a row key in bytes
pub const ROW_KEY_LEN: usize = 8;

/// Number of low bits reserved for the vertex kind
pub const SUFFIX_BITS: u32 = 3;

/// Suffix marking a partitioned vertex
pub const PARTITIONED_SUFFIX: u64 = 0b111;

#[derive(Debug, Clone)]
pub struct IdManager {
    suffix_mask: u64,
    partitioned_suffix: u64,
}

impl Default for IdManager {
    fn default() -> Self {
        Self::new(SUFFIX_BITS, PARTITIONED_SUFFIX)
    }
}

impl IdManager {
    /// Create an ID manager with a custom suffix layout
    pub fn new(suffix_bits: u32, partitioned_suffix: u64) -> Self {
        let suffix_mask = (1u64 << suffix_bits) - 1;
        Self {
            suffix_mask,
            partitioned_suffix: partitioned_suffix & suffix_mask,
        }
    }

    /// Encode a vertex ID as a row key
    pub fn vertex_key(&self, id: VertexId) -> [u8; ROW_KEY_LEN] {
        id.as_raw().to_be_bytes()
    }

    /// ID of the `count`-th normal vertex
    pub fn normal_vertex_id(&self, count: u64) -> VertexId {
        VertexId::from_raw(count << self.suffix_bits())
    }

    /// ID of the `count`-th partitioned vertex
    pub fn partitioned_vertex_id(&self, count: u64) -> VertexId {
        VertexId::from_raw((count << self.suffix_bits()) | self.partitioned_suffix)
    }

    fn suffix_bits(&self) -> u32 {
        self.suffix_mask.count_ones()
    }
}

impl IdInspector for IdManager {
    fn key_to_id(&self, key: &[u8]) -> SchemaResult<i64> {
        let bytes: [u8; ROW_KEY_LEN] = key.try_into().map_err(|_| SchemaError::InvalidKey {
            expected: ROW_KEY_LEN,
            actual: key.len(),
        })?;
        Ok(i64::from_be_bytes(bytes))
    }

    fn is_partitioned_vertex(&self, id: VertexId) -> bool {
        id.as_raw() & self.suffix_mask == self.partitioned_suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let ids = IdManager::default();
        let id = ids.normal_vertex_id(5);

        assert_eq!(id.as_raw(), 40);
        assert_eq!(ids.key_to_id(&ids.vertex_key(id)).unwrap(), 40);
    }

    #[test]
    fn test_key_wrong_length() {
        let ids = IdManager::default();
        let result = ids.key_to_id(&[0, 1, 2]);

        assert!(matches!(
            result,
            Err(SchemaError::InvalidKey { expected: 8, actual: 3 })
        ));
    }

    #[test]
    fn test_negative_key() {
        let ids = IdManager::default();
        let key = (-5i64).to_be_bytes();
        assert_eq!(ids.key_to_id(&key).unwrap(), -5);
    }

    #[test]
    fn test_partitioned_detection() {
        let ids = IdManager::default();

        assert!(ids.is_partitioned_vertex(ids.partitioned_vertex_id(3)));
        assert!(!ids.is_partitioned_vertex(ids.normal_vertex_id(3)));
        assert!(!ids.is_partitioned_vertex(VertexId::from_raw(42)));
    }

    #[test]
    fn test_custom_layout() {
        let ids = IdManager::new(2, 0b01);

        assert!(ids.is_partitioned_vertex(VertexId::from_raw(0b1101)));
        assert!(!ids.is_partitioned_vertex(VertexId::from_raw(0b1100)));
        assert_eq!(ids.normal_vertex_id(3).as_raw(), 12);
    }
}
