use super::ids::{RelationId, VertexId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A single property attached to a vertex
///
/// The property ID is the relation-instance ID of the column it was decoded
/// from, so the same key may appear more than once on a vertex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexProperty {
    pub id: RelationId,
    pub key: String,
    pub value: JsonValue,
}

/// Vertex (Node) decoded from an edgestore row
///
/// Represents a graph vertex with:
/// - Unique identifier (VertexId)
/// - Optional label, fixed when the vertex is created
/// - Properties keyed by relation ID
/// - IDs of incident edges, split by direction
///
/// A vertex created only because an edge points at it (a placeholder) has no
/// label, no properties and only the edges of the row that referenced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    /// Unique identifier
    pub id: VertexId,

    label: Option<String>,

    properties: Vec<VertexProperty>,

    out_edges: Vec<RelationId>,

    in_edges: Vec<RelationId>,
}

impl Vertex {
    /// Create a new vertex without relations
    pub fn new(id: VertexId, label: Option<String>) -> Self {
        Self {
            id,
            label,
            properties: Vec::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    /// Vertex label (e.g., "person"), if one was decoded
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Attach a property
    pub fn add_property(&mut self, id: RelationId, key: impl Into<String>, value: JsonValue) {
        self.properties.push(VertexProperty {
            id,
            key: key.into(),
            value,
        });
    }

    /// All properties in decode order
    pub fn properties(&self) -> &[VertexProperty] {
        &self.properties
    }

    /// Get the first property value for a key
    pub fn get_property(&self, key: &str) -> Option<&JsonValue> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    /// Check if vertex has a specific property
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Get all distinct property keys
    pub fn property_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for property in &self.properties {
            if !keys.contains(&property.key) {
                keys.push(property.key.clone());
            }
        }
        keys
    }

    /// Convert properties to a HashMap (last value wins for repeated keys)
    pub fn properties_as_map(&self) -> HashMap<String, JsonValue> {
        self.properties
            .iter()
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect()
    }

    pub(crate) fn push_out_edge(&mut self, id: RelationId) {
        self.out_edges.push(id);
    }

    pub(crate) fn push_in_edge(&mut self, id: RelationId) {
        self.in_edges.push(id);
    }

    /// IDs of edges leaving this vertex
    pub fn out_edge_ids(&self) -> &[RelationId] {
        &self.out_edges
    }

    /// IDs of edges entering this vertex
    pub fn in_edge_ids(&self) -> &[RelationId] {
        &self.in_edges
    }

    /// Number of incident edges (a self-loop counts twice)
    pub fn edge_count(&self) -> usize {
        self.out_edges.len() + self.in_edges.len()
    }

    /// True if the vertex carries at least one edge or property
    pub fn has_relations(&self) -> bool {
        !self.properties.is_empty() || self.edge_count() > 0
    }
}
