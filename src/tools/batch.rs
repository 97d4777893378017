/// Parallel batch decoding
///
/// Rows are pulled from a source in chunks and each chunk is decoded on a
/// rayon pool. Every row gets its own row graph, so workers share nothing but
/// the decoder.

use super::{ToolError, ToolResult};
use crate::config::BatchConfig;
use crate::decoder::{DecodeResult, DecodedVertex, RowDecoder};
use crate::storage::RowSource;
use crate::types::Row;
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::Serialize;
use tracing::{info, warn};

/// Batch statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchStats {
    pub rows_read: usize,
    pub vertices_decoded: usize,
    /// Rows that intentionally produced no vertex
    pub rows_skipped: usize,
    /// Rows that failed to decode (only with `skip_errors`)
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl BatchStats {
    fn add_error(&mut self, error: String) {
        self.rows_failed += 1;
        self.errors.push(error);
    }
}

/// Decoded vertices plus statistics
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub vertices: Vec<DecodedVertex>,
    pub stats: BatchStats,
}

/// Decode a set of rows held in memory
pub fn decode_rows(decoder: &RowDecoder, rows: &[Row], config: &BatchConfig) -> ToolResult<BatchOutput> {
    let pool = build_pool(config)?;
    let mut output = BatchOutput::default();

    for chunk in rows.chunks(config.chunk_size.max(1)) {
        decode_chunk(&pool, decoder, chunk, config, &mut output)?;
    }

    log_finished(&output.stats);
    Ok(output)
}

/// Decode every row of a source
pub fn decode_source(
    decoder: &RowDecoder,
    source: &dyn RowSource,
    config: &BatchConfig,
) -> ToolResult<BatchOutput> {
    let pool = build_pool(config)?;
    let chunk_size = config.chunk_size.max(1);
    let mut output = BatchOutput::default();
    let mut chunk = Vec::with_capacity(chunk_size);

    for row in source.rows() {
        chunk.push(row?);
        if chunk.len() == chunk_size {
            decode_chunk(&pool, decoder, &chunk, config, &mut output)?;
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        decode_chunk(&pool, decoder, &chunk, config, &mut output)?;
    }

    log_finished(&output.stats);
    Ok(output)
}

fn build_pool(config: &BatchConfig) -> ToolResult<ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?)
}

fn decode_chunk(
    pool: &ThreadPool,
    decoder: &RowDecoder,
    rows: &[Row],
    config: &BatchConfig,
    output: &mut BatchOutput,
) -> ToolResult<()> {
    let results: Vec<DecodeResult<Option<DecodedVertex>>> =
        pool.install(|| rows.par_iter().map(|row| decoder.decode(row)).collect());

    for (row, result) in rows.iter().zip(results) {
        output.stats.rows_read += 1;
        match result {
            Ok(Some(vertex)) => {
                output.stats.vertices_decoded += 1;
                output.vertices.push(vertex);
            }
            Ok(None) => output.stats.rows_skipped += 1,
            Err(e) if config.skip_errors => {
                warn!("Skipping row {:02x?}: {}", row.key.as_ref(), e);
                output.stats.add_error(e.to_string());
            }
            Err(e) => return Err(ToolError::DecodeError(e)),
        }

        if config.progress_interval > 0 && output.stats.rows_read % config.progress_interval == 0 {
            info!(
                "Decoded {} rows ({} vertices)",
                output.stats.rows_read, output.stats.vertices_decoded
            );
        }
    }

    Ok(())
}

fn log_finished(stats: &BatchStats) {
    info!(
        "Batch complete: {} rows, {} vertices, {} skipped, {} failed",
        stats.rows_read, stats.vertices_decoded, stats.rows_skipped, stats.rows_failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RelationCodec;
    use crate::config::DecoderConfig;
    use crate::decoder::{DecodeError, DecoderSetup};
    use crate::schema::{IdManager, SchemaCatalog, SystemTypes};
    use crate::storage::MemoryRowSource;
    use crate::types::{Column, RelationId, RelationRecord, TypeId, VertexId};
    use serde_json::json;

    fn decoder() -> RowDecoder {
        let catalog = SchemaCatalog::new().with_property_key(100, "name").unwrap();
        RowDecoder::new(DecoderSetup::with_catalog(catalog, DecoderConfig::default()))
    }

    fn person(count: u64, name: &str) -> Row {
        let ids = IdManager::default();
        let id = ids.normal_vertex_id(count);
        let records = [
            SystemTypes::exists_record(RelationId(count * 10)),
            RelationRecord::property(TypeId(100), RelationId(count * 10 + 1), json!(name)),
        ];
        let columns = RelationCodec::new().encode_all(&records, id).unwrap();
        Row::new(ids.vertex_key(id).to_vec(), columns)
    }

    fn schema_only(count: u64) -> Row {
        let ids = IdManager::default();
        let id = ids.normal_vertex_id(count);
        let columns = RelationCodec::new()
            .encode_all(&[SystemTypes::exists_record(RelationId(count * 10))], id)
            .unwrap();
        Row::new(ids.vertex_key(id).to_vec(), columns)
    }

    fn broken(count: u64) -> Row {
        let ids = IdManager::default();
        let key = ids.vertex_key(ids.normal_vertex_id(count)).to_vec();
        Row::new(key, vec![Column::new(vec![0u8], vec![0u8])])
    }

    fn config(skip_errors: bool) -> BatchConfig {
        BatchConfig {
            threads: 2,
            chunk_size: 2,
            skip_errors,
            progress_interval: 1,
        }
    }

    #[test]
    fn test_decode_rows_counts() {
        let rows = vec![person(1, "alice"), schema_only(2), person(3, "bob")];

        let output = decode_rows(&decoder(), &rows, &config(false)).unwrap();

        assert_eq!(output.stats.rows_read, 3);
        assert_eq!(output.stats.vertices_decoded, 2);
        assert_eq!(output.stats.rows_skipped, 1);
        assert_eq!(output.vertices[0].id(), VertexId::from_raw(8));
        assert_eq!(output.vertices[1].id(), VertexId::from_raw(24));
    }

    #[test]
    fn test_failed_row_aborts_batch() {
        let rows = vec![person(1, "alice"), broken(2)];

        let result = decode_rows(&decoder(), &rows, &config(false));
        assert!(matches!(result, Err(ToolError::DecodeError(DecodeError::Relation { .. }))));
    }

    #[test]
    fn test_skip_errors_records_failures() {
        let rows = vec![broken(1), person(2, "alice"), broken(3)];

        let output = decode_rows(&decoder(), &rows, &config(true)).unwrap();

        assert_eq!(output.stats.rows_failed, 2);
        assert_eq!(output.stats.errors.len(), 2);
        assert_eq!(output.stats.vertices_decoded, 1);
    }

    #[test]
    fn test_decode_source() {
        let source = MemoryRowSource::new(vec![
            person(1, "alice"),
            person(2, "bob"),
            person(3, "carol"),
        ]);

        let output = decode_source(&decoder(), &source, &config(false)).unwrap();

        let names: Vec<_> = output
            .vertices
            .iter()
            .map(|v| v.vertex().get_property("name").cloned())
            .collect();
        assert_eq!(
            names,
            vec![Some(json!("alice")), Some(json!("bob")), Some(json!("carol"))]
        );
    }
}
