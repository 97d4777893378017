use super::ids::{RelationId, VertexId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Edge (Relationship) decoded from an edgestore row
///
/// Represents a directed edge with:
/// - Unique identifier (the relation-instance ID)
/// - Out vertex ID (tail)
/// - In vertex ID (head)
/// - Label (the edge label type name)
/// - Relation properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    /// Unique identifier
    pub id: RelationId,

    /// Out vertex ID (source)
    pub out_vertex: VertexId,

    /// In vertex ID (target)
    pub in_vertex: VertexId,

    /// Edge label (e.g., "knows")
    pub label: String,

    /// Relation properties
    pub properties: Map<String, JsonValue>,
}

impl Edge {
    /// Create an edge with an empty property map
    pub fn new(
        id: RelationId,
        out_vertex: VertexId,
        in_vertex: VertexId,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            out_vertex,
            in_vertex,
            label: label.into(),
            properties: Map::new(),
        }
    }

    /// Get a property value by key
    pub fn get_property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: JsonValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get all property keys
    pub fn property_keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    /// Check if edge has a specific property
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Convert properties to a HashMap
    pub fn properties_as_map(&self) -> HashMap<String, JsonValue> {
        self.properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Check if this edge is a self-loop
    pub fn is_self_loop(&self) -> bool {
        self.out_vertex == self.in_vertex
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint
    pub fn other_vertex(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.out_vertex {
            Some(self.in_vertex)
        } else if vertex == self.in_vertex {
            Some(self.out_vertex)
        } else {
            None
        }
    }
}
