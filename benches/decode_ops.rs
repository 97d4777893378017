use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use graph_row_decoder::config::{BatchConfig, DecoderConfig};
use graph_row_decoder::types::RelationRecord;
use graph_row_decoder::{
    decode_rows, Direction, IdManager, RelationCodec, RelationId, Row, RowDecoder, DecoderSetup,
    SchemaCatalog, SystemTypes, TypeId, VertexId,
};
use serde_json::json;

const NAME: u64 = 100;
const AGE: u64 = 101;
const WEIGHT: u64 = 102;
const KNOWS: u64 = 200;
const PERSON_LABEL: u64 = 1 << 20;

fn decoder() -> RowDecoder {
    let catalog = SchemaCatalog::new()
        .with_property_key(NAME, "name")
        .unwrap()
        .with_property_key(AGE, "age")
        .unwrap()
        .with_property_key(WEIGHT, "weight")
        .unwrap()
        .with_edge_label(KNOWS, "knows")
        .unwrap()
        .with_vertex_label(VertexId::from_raw(PERSON_LABEL), "Person")
        .unwrap();
    RowDecoder::new(DecoderSetup::with_catalog(catalog, DecoderConfig::default()))
}

/// A person row with `degree` outgoing edges to the following vertices
fn person_row(count: u64, degree: u64) -> Row {
    let ids = IdManager::default();
    let id = ids.normal_vertex_id(count);
    let base = count * 1000;

    let mut records = vec![
        SystemTypes::label_record(RelationId(base), VertexId::from_raw(PERSON_LABEL)),
        SystemTypes::exists_record(RelationId(base + 1)),
        RelationRecord::property(TypeId(NAME), RelationId(base + 2), json!(format!("Person{}", count))),
        RelationRecord::property(TypeId(AGE), RelationId(base + 3), json!(20 + count % 60)),
    ];
    for i in 0..degree {
        let other = ids.normal_vertex_id(count + i + 1);
        records.push(
            RelationRecord::edge(TypeId(KNOWS), RelationId(base + 10 + i), Direction::Out, other)
                .with_property(TypeId(WEIGHT), json!(i as f64 / 10.0)),
        );
    }

    let columns = RelationCodec::new().encode_all(&records, id).unwrap();
    Row::new(ids.vertex_key(id).to_vec(), columns)
}

/// Benchmark decoding single rows of increasing width
fn bench_decode_row(c: &mut Criterion) {
    let decoder = decoder();
    let mut group = c.benchmark_group("decode_row");

    for degree in [0u64, 10, 100] {
        let row = person_row(1, degree);
        group.throughput(Throughput::Elements(row.len() as u64));
        group.bench_function(format!("degree_{}", degree), |b| {
            b.iter(|| black_box(decoder.decode(black_box(&row)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark parallel batch decoding
fn bench_decode_batch(c: &mut Criterion) {
    let decoder = decoder();
    let rows: Vec<Row> = (1..=10_000).map(|i| person_row(i, 5)).collect();
    let mut group = c.benchmark_group("decode_batch");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.sample_size(10);

    for threads in [1usize, 4] {
        let config = BatchConfig {
            threads,
            progress_interval: 0,
            ..BatchConfig::default()
        };
        group.bench_function(format!("threads_{}", threads), |b| {
            b.iter(|| black_box(decode_rows(&decoder, &rows, &config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode_row, bench_decode_batch);
criterion_main!(benches);
