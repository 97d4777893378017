/// Row-to-vertex decoder
///
/// Turns one edgestore row into a vertex with its properties and incident
/// edges. Each row is decoded in two passes over its columns:
///
/// 1. Label discovery: find the vertex-label relation and create the vertex
///    with that label (or none).
/// 2. Materialization: attach every visible property and edge, creating
///    label-less placeholders for neighbor vertices.
///
/// Rows for partitioned vertices, rows without a vertex-exists marker and
/// rows whose relations are all system or invisible types yield no vertex.

mod error;
mod setup;

pub use error::{DecodeError, DecodeResult};
pub use setup::DecoderSetup;

use crate::schema::{RelationKind, RelationType, SchemaError};
use crate::types::{
    Column, Direction, Edge, GraphError, RelationPayload, RelationRecord, Row, RowGraph, TypeId,
    Vertex, VertexId, VertexProperty,
};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

/// A decoded vertex together with the graph its edges live in
///
/// Neighbor vertices referenced by the vertex's edges are label-less
/// placeholders carrying only their ID.
#[derive(Debug, Clone)]
pub struct DecodedVertex {
    vertex: Vertex,
    graph: RowGraph,
}

impl DecodedVertex {
    pub fn id(&self) -> VertexId {
        self.vertex.id
    }

    pub fn label(&self) -> Option<&str> {
        self.vertex.label()
    }

    pub fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    pub fn properties(&self) -> &[VertexProperty] {
        self.vertex.properties()
    }

    /// Incident edges in the given direction
    pub fn edges(&self, direction: Direction) -> Vec<&Edge> {
        self.graph.edges_of(&self.vertex, direction)
    }

    /// Look up the vertex itself or one of its neighbors
    pub fn neighbor(&self, id: VertexId) -> Option<&Vertex> {
        if id == self.vertex.id {
            Some(&self.vertex)
        } else {
            self.graph.vertex(id)
        }
    }

    /// All neighbor vertices (excluding the vertex itself)
    pub fn neighbors(&self) -> impl Iterator<Item = &Vertex> {
        self.graph.vertices()
    }

    pub fn into_parts(self) -> (Vertex, RowGraph) {
        (self.vertex, self.graph)
    }
}

/// Decodes edgestore rows into vertices
///
/// The decoder holds no per-row state; concurrent calls on distinct rows are
/// safe.
#[derive(Debug)]
pub struct RowDecoder {
    setup: DecoderSetup,
}

impl RowDecoder {
    pub fn new(setup: DecoderSetup) -> Self {
        Self { setup }
    }

    pub fn setup(&self) -> &DecoderSetup {
        &self.setup
    }

    /// Decode a row
    pub fn decode(&self, row: &Row) -> DecodeResult<Option<DecodedVertex>> {
        self.decode_row(&row.key, &row.columns)
    }

    /// Decode the row with the given key and columns
    ///
    /// # Returns
    /// * `Ok(Some(vertex))` for a live vertex with at least one visible relation
    /// * `Ok(None)` if the row is skipped (partitioned vertex, unknown
    ///   lifecycle state, or no visible relations)
    /// * `Err(DecodeError)` if the row cannot be decoded; no partial vertex
    ///   is returned
    pub fn decode_row(&self, key: &[u8], columns: &[Column]) -> DecodeResult<Option<DecodedVertex>> {
        let vertex_id = self.resolve_vertex_id(key)?;

        if self.setup.ids.is_partitioned_vertex(vertex_id) {
            if !self.setup.filter_partitioned_vertices() {
                return Err(DecodeError::PartitionedVertexUnsupported(vertex_id));
            }
            debug!("Skipping partitioned vertex with ID {}", vertex_id);
            return Ok(None);
        }

        let mut graph = RowGraph::new();
        let label = self.discover_label(vertex_id, columns)?;
        graph.get_or_create_vertex(vertex_id, label.as_deref());

        let mut found_vertex_state = !self.setup.config.verify_vertex_existence;
        for (index, column) in columns.iter().enumerate() {
            let exists = self
                .materialize(vertex_id, column, &mut graph)
                .map_err(|e| e.in_column(vertex_id, index))?;
            found_vertex_state |= exists;
        }

        if !found_vertex_state {
            trace!("Vertex {} has unknown lifecycle state", vertex_id);
            return Ok(None);
        }

        let vertex = graph
            .remove_vertex(vertex_id)
            .ok_or(GraphError::VertexNotFound(vertex_id))?;
        if !vertex.has_relations() {
            trace!("Vertex {} has no relations", vertex_id);
            return Ok(None);
        }

        Ok(Some(DecodedVertex { vertex, graph }))
    }

    /// Release the decoder's collaborators
    pub fn close(self) {
        self.setup.close();
    }

    fn resolve_vertex_id(&self, key: &[u8]) -> DecodeResult<VertexId> {
        let raw = self
            .setup
            .ids
            .key_to_id(key)
            .map_err(|e| DecodeError::MalformedKey(e.to_string()))?;
        VertexId::new(raw).map_err(|e| DecodeError::MalformedKey(e.to_string()))
    }

    fn parse(&self, column: &Column, vertex_id: VertexId) -> DecodeResult<RelationRecord> {
        Ok(self.setup.reader.parse_relation(column, vertex_id)?)
    }

    /// First pass: the label named by the first vertex-label relation
    fn discover_label(&self, vertex_id: VertexId, columns: &[Column]) -> DecodeResult<Option<String>> {
        let mut label: Option<String> = None;

        for (index, column) in columns.iter().enumerate() {
            let relation = self
                .parse(column, vertex_id)
                .map_err(|e| e.in_column(vertex_id, index))?;
            if !self.setup.system_types.is_vertex_label_type(relation.type_id) {
                continue;
            }

            if let Some(current) = &label {
                trace!(
                    "Vertex {} has another label relation {}; keeping label {}",
                    vertex_id,
                    relation.relation_id,
                    current
                );
                continue;
            }

            let label_id = relation.other_vertex().ok_or_else(|| {
                DecodeError::PayloadMismatch {
                    relation: relation.relation_id,
                    type_name: "vertex label".to_string(),
                    kind: RelationKind::EdgeLabel,
                }
                .in_column(vertex_id, index)
            })?;
            let name = self
                .setup
                .types
                .vertex_label_name(label_id)
                .map_err(|e| DecodeError::from(e).in_column(vertex_id, index))?;
            label = Some(name.to_string());
        }

        Ok(label)
    }

    /// Second pass, one column: attach the relation and report whether it
    /// was the vertex-exists marker
    fn materialize(&self, vertex_id: VertexId, column: &Column, graph: &mut RowGraph) -> DecodeResult<bool> {
        let relation = self.parse(column, vertex_id)?;
        let system_types = &self.setup.system_types;

        let exists = system_types.is_vertex_exists_type(relation.type_id);
        if system_types.is_system_type(relation.type_id) {
            return Ok(exists);
        }

        let relation_type = self.setup.types.relation_type(relation.type_id)?;
        if relation_type.invisible {
            return Ok(exists);
        }

        if relation_type.is_property_key() {
            self.attach_property(vertex_id, relation_type, relation, graph)?;
        } else {
            self.attach_edge(vertex_id, relation_type, relation, graph)?;
        }
        Ok(exists)
    }

    fn attach_property(
        &self,
        vertex_id: VertexId,
        relation_type: &RelationType,
        relation: RelationRecord,
        graph: &mut RowGraph,
    ) -> DecodeResult<()> {
        let value = match relation.payload {
            RelationPayload::Property { value } => value,
            RelationPayload::Edge { .. } => {
                return Err(mismatch(&relation, relation_type));
            }
        };
        let value = non_null(value).ok_or_else(|| DecodeError::NullPropertyValue {
            key: relation_type.name.clone(),
            relation: relation.relation_id,
        })?;

        let vertex = graph
            .vertex_mut(vertex_id)
            .ok_or(GraphError::VertexNotFound(vertex_id))?;
        vertex.add_property(relation.relation_id, relation_type.name.as_str(), value);
        Ok(())
    }

    fn attach_edge(
        &self,
        vertex_id: VertexId,
        relation_type: &RelationType,
        relation: RelationRecord,
        graph: &mut RowGraph,
    ) -> DecodeResult<()> {
        let other = relation
            .other_vertex()
            .ok_or_else(|| mismatch(&relation, relation_type))?;

        let (out_vertex, in_vertex) = match relation.direction {
            Direction::Out => (vertex_id, other),
            Direction::In => (other, vertex_id),
            Direction::Both => {
                return Err(DecodeError::UnsupportedDirection {
                    direction: Direction::Both,
                    relation: relation.relation_id,
                });
            }
        };

        if self.setup.ids.is_partitioned_vertex(other) {
            if !self.setup.filter_partitioned_vertices() {
                return Err(DecodeError::PartitionedNeighborUnsupported {
                    relation: relation.relation_id,
                    vertex: vertex_id,
                    other,
                    label: relation_type.name.clone(),
                });
            }
            debug!(
                "Skipping edge with ID {} incident on partitioned vertex with ID {} (and nonpartitioned vertex with ID {})",
                relation.relation_id, other, vertex_id
            );
            return Ok(());
        }

        let edge_properties = self.edge_properties(&relation)?;

        graph.get_or_create_vertex(other, None);
        let edge = graph.add_edge(relation.relation_id, &relation_type.name, out_vertex, in_vertex)?;
        for (key, value) in edge_properties {
            edge.set_property(key, value);
        }
        Ok(())
    }

    /// Resolve an edge's relation properties to (key name, value) pairs
    fn edge_properties(&self, relation: &RelationRecord) -> DecodeResult<Vec<(String, JsonValue)>> {
        let mut resolved = Vec::with_capacity(relation.properties.len());

        for (type_id, value) in &relation.properties {
            let key_type = self.relation_property_type(*type_id)?;
            if key_type.is_edge_label() {
                return Err(DecodeError::MetaEdgesUnsupported {
                    relation: relation.relation_id,
                    label: key_type.name.clone(),
                });
            }
            let value = non_null(Some(value.clone())).ok_or_else(|| DecodeError::NullPropertyValue {
                key: key_type.name.clone(),
                relation: relation.relation_id,
            })?;
            resolved.push((key_type.name.clone(), value));
        }

        Ok(resolved)
    }

    fn relation_property_type(&self, type_id: TypeId) -> Result<&RelationType, SchemaError> {
        self.setup.types.relation_type(type_id)
    }
}

fn non_null(value: Option<JsonValue>) -> Option<JsonValue> {
    value.filter(|v| !v.is_null())
}

fn mismatch(relation: &RelationRecord, relation_type: &RelationType) -> DecodeError {
    DecodeError::PayloadMismatch {
        relation: relation.relation_id,
        type_name: relation_type.name.clone(),
        kind: relation_type.kind,
    }
}
