use super::ids::{Direction, RelationId, TypeId, VertexId};
use serde_json::Value as JsonValue;

/// Payload of a decoded relation
#[derive(Debug, Clone, PartialEq)]
pub enum RelationPayload {
    /// A property value; `None` when the column stored no value
    Property { value: Option<JsonValue> },

    /// An edge to another vertex
    Edge { other_vertex: VertexId },
}

/// One column of an edgestore row in decoded form
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRecord {
    pub type_id: TypeId,
    pub direction: Direction,
    pub relation_id: RelationId,
    pub payload: RelationPayload,

    /// Relation properties keyed by their type, in stored order
    pub properties: Vec<(TypeId, JsonValue)>,
}

impl RelationRecord {
    /// A property relation (always stored with direction OUT)
    pub fn property(type_id: TypeId, relation_id: RelationId, value: JsonValue) -> Self {
        Self {
            type_id,
            direction: Direction::Out,
            relation_id,
            payload: RelationPayload::Property { value: Some(value) },
            properties: Vec::new(),
        }
    }

    /// An edge relation to `other_vertex`
    pub fn edge(
        type_id: TypeId,
        relation_id: RelationId,
        direction: Direction,
        other_vertex: VertexId,
    ) -> Self {
        Self {
            type_id,
            direction,
            relation_id,
            payload: RelationPayload::Edge { other_vertex },
            properties: Vec::new(),
        }
    }

    /// Add a relation property
    pub fn with_property(mut self, type_id: TypeId, value: JsonValue) -> Self {
        self.properties.push((type_id, value));
        self
    }

    /// The neighbor vertex, for edge relations
    pub fn other_vertex(&self) -> Option<VertexId> {
        match self.payload {
            RelationPayload::Edge { other_vertex } => Some(other_vertex),
            RelationPayload::Property { .. } => None,
        }
    }

    /// The stored value, for property relations
    pub fn value(&self) -> Option<&JsonValue> {
        match &self.payload {
            RelationPayload::Property { value } => value.as_ref(),
            RelationPayload::Edge { .. } => None,
        }
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_record() {
        let record = RelationRecord::property(TypeId(100), RelationId(7), json!("alice"));

        assert_eq!(record.direction, Direction::Out);
        assert_eq!(record.value(), Some(&json!("alice")));
        assert_eq!(record.other_vertex(), None);
        assert!(!record.has_properties());
    }

    #[test]
    fn test_edge_record_with_properties() {
        let record = RelationRecord::edge(
            TypeId(200),
            RelationId(8),
            Direction::In,
            VertexId::from_raw(42),
        )
        .with_property(TypeId(101), json!(2020));

        assert_eq!(record.other_vertex(), Some(VertexId::from_raw(42)));
        assert_eq!(record.value(), None);
        assert_eq!(record.properties, vec![(TypeId(101), json!(2020))]);
    }
}
