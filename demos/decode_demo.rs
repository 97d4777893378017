/// Row decoder demonstration
///
/// This example demonstrates:
/// 1. Writing encoded rows into a RocksDB edgestore
/// 2. Decoding every row into a vertex with its edges
/// 3. How partitioned vertices and schema-only rows are filtered
/// 4. Exporting the result to JSON

use graph_row_decoder::config::{BatchConfig, DecoderConfig};
use graph_row_decoder::types::RelationRecord;
use graph_row_decoder::{
    decode_source, export_to_json, Direction, DecoderSetup, ExportOptions, IdManager,
    RelationCodec, RelationId, RocksDbEdgeStore, Row, RowDecoder, SchemaCatalog, SystemTypes,
    TypeId, VertexId,
};
use serde_json::json;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "relation_types": [
        { "id": 100, "name": "name", "kind": "property_key" },
        { "id": 101, "name": "age", "kind": "property_key" },
        { "id": 102, "name": "since", "kind": "property_key" },
        { "id": 103, "name": "_audit", "kind": "property_key", "invisible": true },
        { "id": 200, "name": "knows", "kind": "edge_label" },
        { "id": 201, "name": "works_at", "kind": "edge_label" }
    ],
    "vertex_labels": [
        { "id": 1048576, "name": "Person" },
        { "id": 2097152, "name": "Company" }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== Row Decoder Demonstration ===\n");

    let temp_dir = TempDir::new()?;
    let ids = IdManager::default();
    let codec = RelationCodec::new();

    let person = VertexId::from_raw(1 << 20);
    let company = VertexId::from_raw(2 << 20);
    let alice = ids.normal_vertex_id(1);
    let bob = ids.normal_vertex_id(2);
    let acme = ids.normal_vertex_id(3);
    let hub = ids.partitioned_vertex_id(4);
    let schema_row = ids.normal_vertex_id(5);

    // Example 1: Write rows
    println!("1. Writing Edgestore Rows");
    println!("{}", "-".repeat(50));

    let rows = vec![
        (
            alice,
            vec![
                SystemTypes::label_record(RelationId(1), person),
                SystemTypes::exists_record(RelationId(2)),
                RelationRecord::property(TypeId(100), RelationId(3), json!("Alice")),
                RelationRecord::property(TypeId(101), RelationId(4), json!(30)),
                RelationRecord::property(TypeId(103), RelationId(5), json!("hidden")),
                RelationRecord::edge(TypeId(200), RelationId(10), Direction::Out, bob)
                    .with_property(TypeId(102), json!(2019)),
                RelationRecord::edge(TypeId(201), RelationId(11), Direction::Out, acme),
                RelationRecord::edge(TypeId(200), RelationId(12), Direction::Out, hub),
            ],
        ),
        (
            bob,
            vec![
                SystemTypes::label_record(RelationId(20), person),
                SystemTypes::exists_record(RelationId(21)),
                RelationRecord::property(TypeId(100), RelationId(22), json!("Bob")),
                RelationRecord::edge(TypeId(200), RelationId(10), Direction::In, alice)
                    .with_property(TypeId(102), json!(2019)),
            ],
        ),
        (
            acme,
            vec![
                SystemTypes::label_record(RelationId(30), company),
                SystemTypes::exists_record(RelationId(31)),
                RelationRecord::property(TypeId(100), RelationId(32), json!("ACME Corp")),
                RelationRecord::edge(TypeId(201), RelationId(11), Direction::In, alice),
            ],
        ),
        (
            hub,
            vec![
                SystemTypes::exists_record(RelationId(40)),
                RelationRecord::edge(TypeId(200), RelationId(12), Direction::In, alice),
            ],
        ),
        (
            schema_row,
            vec![SystemTypes::exists_record(RelationId(50))],
        ),
    ];

    let store = RocksDbEdgeStore::open(temp_dir.path().join("edgestore"))?;
    for (id, records) in &rows {
        store.write_row(&Row::new(ids.vertex_key(*id).to_vec(), codec.encode_all(records, *id)?))?;
        println!("✓ Wrote row for vertex {} ({} columns)", id, records.len());
    }
    println!();

    // Example 2: Decode
    println!("2. Decoding Rows");
    println!("{}", "-".repeat(50));

    let catalog = SchemaCatalog::from_json(SCHEMA)?;
    let decoder = RowDecoder::new(DecoderSetup::with_catalog(catalog, DecoderConfig::default()));
    let output = decode_source(&decoder, &store, &BatchConfig::default())?;

    for vertex in &output.vertices {
        println!(
            "✓ Vertex {} ({})",
            vertex.id(),
            vertex.label().unwrap_or("<no label>")
        );
        for property in vertex.properties() {
            println!("  {} = {}", property.key, property.value);
        }
        for edge in vertex.edges(Direction::Both) {
            println!(
                "  [{}] {} -[{}]-> {} {:?}",
                edge.id,
                edge.out_vertex,
                edge.label,
                edge.in_vertex,
                edge.properties
            );
        }
    }
    println!();

    // Example 3: Filtering
    println!("3. Filtering");
    println!("{}", "-".repeat(50));
    println!("Rows read:        {}", output.stats.rows_read);
    println!("Vertices decoded: {}", output.stats.vertices_decoded);
    println!(
        "Rows skipped:     {} (partitioned vertex {} and schema-only vertex {})",
        output.stats.rows_skipped, hub, schema_row
    );
    println!();

    // Example 4: Export
    println!("4. Exporting to JSON");
    println!("{}", "-".repeat(50));
    let export_path = temp_dir.path().join("graph.json");
    let (vertex_count, edge_count) =
        export_to_json(&output.vertices, &export_path, &ExportOptions::default())?;
    println!(
        "✓ Exported {} vertices and {} edges to {:?}",
        vertex_count, edge_count, export_path
    );

    decoder.close();
    store.close()?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
