/// Reserved system relation types
///
/// Type IDs `1..=MAX_SYSTEM_TYPE_ID` belong to the storage layer's own
/// bookkeeping. Two of them matter to the decoder: the vertex-exists marker
/// written for every live vertex and the vertex-label edge pointing at the
/// vertex's label schema vertex.

use super::SystemTypeInspector;
use crate::types::{Direction, RelationId, RelationRecord, TypeId, VertexId};
use serde_json::Value as JsonValue;

/// Marker property present on every live vertex
pub const VERTEX_EXISTS: TypeId = TypeId(1);

/// Edge from a vertex to its label's schema vertex
pub const VERTEX_LABEL: TypeId = TypeId(2);

/// Schema name of a schema vertex
pub const SCHEMA_NAME: TypeId = TypeId(3);

/// Last reserved system type ID
pub const MAX_SYSTEM_TYPE_ID: u64 = 63;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTypes;

impl SystemTypes {
    /// The vertex-exists marker relation
    pub fn exists_record(relation_id: RelationId) -> RelationRecord {
        RelationRecord::property(VERTEX_EXISTS, relation_id, JsonValue::Bool(true))
    }

    /// The vertex-label relation pointing at `label_id`
    pub fn label_record(relation_id: RelationId, label_id: VertexId) -> RelationRecord {
        RelationRecord::edge(VERTEX_LABEL, relation_id, Direction::Out, label_id)
    }
}

impl SystemTypeInspector for SystemTypes {
    fn is_system_type(&self, type_id: TypeId) -> bool {
        (1..=MAX_SYSTEM_TYPE_ID).contains(&type_id.0)
    }

    fn is_vertex_label_type(&self, type_id: TypeId) -> bool {
        type_id == VERTEX_LABEL
    }

    fn is_vertex_exists_type(&self, type_id: TypeId) -> bool {
        type_id == VERTEX_EXISTS
    }
}
