/// Graph Row Decoder
///
/// Decodes the rows of a wide-column edgestore back into graph vertices,
/// their properties and their incident edges.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           Graph Row Decoder                      │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Row Source (RocksDB/memory)  │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Batch Driver (rayon)         │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Row Decoder                  │  ← schema     │
/// │  │   (label pass, attach pass)    │  ← codec      │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Export (JSON/CSV)            │              │
/// │  └────────────────────────────────┘              │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core data types (VertexId, Vertex, Edge, RowGraph, Row)
/// - `schema`: ID layout, system types and the relation type catalog
/// - `codec`: Column/value codec for relations
/// - `decoder`: Row-to-vertex decoder
/// - `storage`: Row sources, including the RocksDB edgestore
/// - `config`: Environment and file configuration
/// - `tools`: Parallel batch decoding and export

pub mod types;
pub mod schema;
pub mod codec;
pub mod decoder;
pub mod storage;
pub mod config;
pub mod tools;

// Re-export commonly used types
pub use types::{Column, Direction, Edge, RelationId, Row, RowGraph, TypeId, Vertex, VertexId};

// Re-export schema types
pub use schema::{IdManager, SchemaCatalog, SchemaError, SystemTypes};

// Re-export decoder types
pub use codec::{CodecError, RelationCodec, RelationReader};
pub use decoder::{DecodeError, DecodeResult, DecodedVertex, DecoderSetup, RowDecoder};

// Re-export storage types
pub use storage::{MemoryRowSource, RocksDbEdgeStore, RowSource, StorageError, StorageResult};

pub use config::Config;

// Re-export tool types
pub use tools::{
    decode_rows, decode_source, export_to_csv, export_to_json, BatchOutput, BatchStats,
    ExportFormat, ExportOptions, ToolError, ToolResult,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
