/// In-memory schema catalog
///
/// Holds the user-defined relation types and vertex labels of a graph. A
/// catalog is built programmatically or loaded from a JSON schema file:
///
/// ```json
/// {
///   "relation_types": [
///     { "id": 100, "name": "name", "kind": "property_key" },
///     { "id": 200, "name": "knows", "kind": "edge_label" },
///     { "id": 300, "name": "_audit", "kind": "property_key", "invisible": true }
///   ],
///   "vertex_labels": [
///     { "id": 1024, "name": "person" }
///   ]
/// }
/// ```

use super::system::MAX_SYSTEM_TYPE_ID;
use super::{RelationKind, RelationType, SchemaError, SchemaResult, TypeInspector};
use crate::types::{TypeId, VertexId};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    relation_types: Vec<RelationType>,
    #[serde(default)]
    vertex_labels: Vec<VertexLabelEntry>,
}

#[derive(Debug, Deserialize)]
struct VertexLabelEntry {
    id: VertexId,
    name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    types: HashMap<TypeId, RelationType>,
    vertex_labels: HashMap<VertexId, String>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON schema document
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let file: SchemaFile = serde_json::from_str(json)?;
        Self::from_schema_file(file)
    }

    /// Load a catalog from a JSON schema file
    pub fn from_path<P: AsRef<Path>>(path: P) -> SchemaResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file: SchemaFile = serde_json::from_reader(reader)?;
        Self::from_schema_file(file)
    }

    fn from_schema_file(file: SchemaFile) -> SchemaResult<Self> {
        let mut catalog = Self::new();
        for relation_type in file.relation_types {
            catalog.register_type(relation_type)?;
        }
        for label in file.vertex_labels {
            catalog.register_vertex_label(label.id, label.name)?;
        }
        Ok(catalog)
    }

    /// Register a relation type
    ///
    /// # Returns
    /// * `Err(SchemaError::ReservedTypeId)` for IDs in the system range
    /// * `Err(SchemaError::Duplicate)` if the ID is already registered
    pub fn register_type(&mut self, relation_type: RelationType) -> SchemaResult<()> {
        if relation_type.id.0 <= MAX_SYSTEM_TYPE_ID {
            return Err(SchemaError::ReservedTypeId(relation_type.id));
        }
        if self.types.contains_key(&relation_type.id) {
            return Err(SchemaError::Duplicate(format!(
                "relation type {}",
                relation_type.id
            )));
        }
        self.types.insert(relation_type.id, relation_type);
        Ok(())
    }

    /// Register a vertex label under the ID of its schema vertex
    pub fn register_vertex_label(
        &mut self,
        id: VertexId,
        name: impl Into<String>,
    ) -> SchemaResult<()> {
        if self.vertex_labels.contains_key(&id) {
            return Err(SchemaError::Duplicate(format!("vertex label {}", id)));
        }
        self.vertex_labels.insert(id, name.into());
        Ok(())
    }

    pub fn with_property_key(self, id: u64, name: &str) -> SchemaResult<Self> {
        self.with_type(id, name, RelationKind::PropertyKey, false)
    }

    pub fn with_edge_label(self, id: u64, name: &str) -> SchemaResult<Self> {
        self.with_type(id, name, RelationKind::EdgeLabel, false)
    }

    pub fn with_invisible_type(self, id: u64, name: &str, kind: RelationKind) -> SchemaResult<Self> {
        self.with_type(id, name, kind, true)
    }

    pub fn with_vertex_label(mut self, id: VertexId, name: &str) -> SchemaResult<Self> {
        self.register_vertex_label(id, name)?;
        Ok(self)
    }

    fn with_type(
        mut self,
        id: u64,
        name: &str,
        kind: RelationKind,
        invisible: bool,
    ) -> SchemaResult<Self> {
        self.register_type(RelationType {
            id: TypeId(id),
            name: name.to_string(),
            kind,
            invisible,
        })?;
        Ok(self)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn vertex_label_count(&self) -> usize {
        self.vertex_labels.len()
    }
}

impl TypeInspector for SchemaCatalog {
    fn relation_type(&self, type_id: TypeId) -> SchemaResult<&RelationType> {
        self.types
            .get(&type_id)
            .ok_or(SchemaError::UnknownType(type_id))
    }

    fn vertex_label_name(&self, label_id: VertexId) -> SchemaResult<&str> {
        self.vertex_labels
            .get(&label_id)
            .map(String::as_str)
            .ok_or(SchemaError::UnknownVertexLabel(label_id))
    }
}
