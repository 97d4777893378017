/// Decoded vertex export
///
/// Supports writing decoded vertices to:
/// - CSV files (one vertex file, one edge file)
/// - JSON files
///
/// Every edge is stored in the rows of both of its endpoints, so only the
/// out-edges of each decoded vertex are exported.

use super::{ToolError, ToolResult};
use crate::decoder::DecodedVertex;
use crate::types::Direction;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ToolError::InvalidFormat(format!("Unknown export format: {}", other))),
        }
    }
}

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// Include header row in CSV
    pub csv_header: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty_json: true,
            csv_header: true,
        }
    }
}

/// JSON export format
#[derive(Debug, Serialize)]
struct JsonGraphExport {
    vertices: Vec<JsonVertexExport>,
    edges: Vec<JsonEdgeExport>,
}

#[derive(Debug, Clone, Serialize)]
struct JsonVertexExport {
    id: u64,
    label: Option<String>,
    properties: Vec<JsonPropertyExport>,
}

#[derive(Debug, Clone, Serialize)]
struct JsonPropertyExport {
    id: u64,
    key: String,
    value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
struct JsonEdgeExport {
    id: u64,
    label: String,
    start: u64,
    end: u64,
    properties: serde_json::Map<String, serde_json::Value>,
}

fn vertex_export(vertex: &DecodedVertex) -> JsonVertexExport {
    JsonVertexExport {
        id: vertex.id().as_raw(),
        label: vertex.label().map(str::to_owned),
        properties: vertex
            .properties()
            .iter()
            .map(|p| JsonPropertyExport {
                id: p.id.0,
                key: p.key.clone(),
                value: p.value.clone(),
            })
            .collect(),
    }
}

fn edge_exports(vertex: &DecodedVertex) -> impl Iterator<Item = JsonEdgeExport> + '_ {
    vertex
        .edges(Direction::Out)
        .into_iter()
        .map(|edge| JsonEdgeExport {
            id: edge.id.0,
            label: edge.label.clone(),
            start: edge.out_vertex.as_raw(),
            end: edge.in_vertex.as_raw(),
            properties: edge.properties.clone(),
        })
}

/// Export decoded vertices and their out-edges to a JSON file
pub fn export_to_json<P: AsRef<Path>>(
    vertices: &[DecodedVertex],
    path: P,
    options: &ExportOptions,
) -> ToolResult<(usize, usize)> {
    let graph_export = JsonGraphExport {
        vertices: vertices.iter().map(vertex_export).collect(),
        edges: vertices.iter().flat_map(edge_exports).collect(),
    };

    let file = File::create(path)?;
    if options.pretty_json {
        serde_json::to_writer_pretty(file, &graph_export)?;
    } else {
        serde_json::to_writer(file, &graph_export)?;
    }

    info!(
        "Exported {} vertices and {} edges to JSON",
        graph_export.vertices.len(),
        graph_export.edges.len()
    );

    Ok((graph_export.vertices.len(), graph_export.edges.len()))
}

/// Export decoded vertices and their out-edges to CSV files
///
/// Vertex rows: `id,label,properties`; edge rows:
/// `id,label,start,end,properties`. Properties are JSON-encoded.
pub fn export_to_csv<P: AsRef<Path>>(
    vertices: &[DecodedVertex],
    vertices_path: P,
    edges_path: P,
    options: &ExportOptions,
) -> ToolResult<(usize, usize)> {
    let mut vertex_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(vertices_path)?;
    let mut edge_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(edges_path)?;

    if options.csv_header {
        vertex_writer.write_record(["id", "label", "properties"])?;
        edge_writer.write_record(["id", "label", "start", "end", "properties"])?;
    }

    let mut vertex_count = 0;
    let mut edge_count = 0;

    for vertex in vertices {
        let export = vertex_export(vertex);
        vertex_writer.write_record([
            export.id.to_string(),
            export.label.unwrap_or_default(),
            serde_json::to_string(&export.properties)?,
        ])?;
        vertex_count += 1;

        for edge in edge_exports(vertex) {
            edge_writer.write_record([
                edge.id.to_string(),
                edge.label,
                edge.start.to_string(),
                edge.end.to_string(),
                serde_json::to_string(&edge.properties)?,
            ])?;
            edge_count += 1;
        }
    }

    vertex_writer.flush()?;
    edge_writer.flush()?;

    info!("Exported {} vertices and {} edges to CSV", vertex_count, edge_count);

    Ok((vertex_count, edge_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RelationCodec;
    use crate::config::DecoderConfig;
    use crate::decoder::{DecoderSetup, RowDecoder};
    use crate::schema::{IdManager, SchemaCatalog, SystemTypes};
    use crate::types::{RelationId, RelationRecord, Row, TypeId, VertexId};
    use serde_json::json;
    use tempfile::TempDir;

    fn decoded() -> Vec<DecodedVertex> {
        let catalog = SchemaCatalog::new()
            .with_property_key(100, "name")
            .unwrap()
            .with_property_key(101, "since")
            .unwrap()
            .with_edge_label(200, "knows")
            .unwrap()
            .with_vertex_label(VertexId::from_raw(1024), "person")
            .unwrap();
        let decoder = RowDecoder::new(DecoderSetup::with_catalog(catalog, DecoderConfig::default()));
        let ids = IdManager::default();
        let codec = RelationCodec::new();

        let alice = ids.normal_vertex_id(1);
        let bob = ids.normal_vertex_id(2);
        let rows = [
            (
                alice,
                vec![
                    SystemTypes::label_record(RelationId(1), VertexId::from_raw(1024)),
                    SystemTypes::exists_record(RelationId(2)),
                    RelationRecord::property(TypeId(100), RelationId(3), json!("alice")),
                    RelationRecord::edge(TypeId(200), RelationId(50), Direction::Out, bob)
                        .with_property(TypeId(101), json!(2020)),
                ],
            ),
            (
                bob,
                vec![
                    SystemTypes::exists_record(RelationId(4)),
                    RelationRecord::edge(TypeId(200), RelationId(50), Direction::In, alice)
                        .with_property(TypeId(101), json!(2020)),
                ],
            ),
        ];

        rows.iter()
            .map(|(id, records)| {
                let row = Row::new(ids.vertex_key(*id).to_vec(), codec.encode_all(records, *id).unwrap());
                decoder.decode(&row).unwrap().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ToolError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_export_to_json() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("export.json");

        let (v_count, e_count) =
            export_to_json(&decoded(), &json_path, &ExportOptions::default()).unwrap();

        // The shared edge is exported once, from its out side
        assert_eq!(v_count, 2);
        assert_eq!(e_count, 1);

        let content = std::fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["vertices"][0]["label"], json!("person"));
        assert_eq!(parsed["vertices"][1]["label"], json!(null));
        assert_eq!(parsed["edges"][0]["id"], json!(50));
        assert_eq!(parsed["edges"][0]["properties"]["since"], json!(2020));
    }

    #[test]
    fn test_export_to_csv() {
        let temp_dir = TempDir::new().unwrap();
        let vertices_path = temp_dir.path().join("vertices.csv");
        let edges_path = temp_dir.path().join("edges.csv");

        let (v_count, e_count) =
            export_to_csv(&decoded(), &vertices_path, &edges_path, &ExportOptions::default())
                .unwrap();

        assert_eq!((v_count, e_count), (2, 1));

        let vertices = std::fs::read_to_string(&vertices_path).unwrap();
        let mut lines = vertices.lines();
        assert_eq!(lines.next(), Some("id,label,properties"));
        assert!(lines.next().unwrap().starts_with("8,person,"));

        let edges = std::fs::read_to_string(&edges_path).unwrap();
        assert_eq!(edges.lines().count(), 2);
        assert!(edges.lines().nth(1).unwrap().starts_with("50,knows,8,16,"));
    }
}
