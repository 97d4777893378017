/// Edgestore row sources
///
/// This module provides the row input for batch decoding:
/// - RowSource trait: ordered scan over edgestore rows
/// - MemoryRowSource: rows held in memory
/// - RocksDbEdgeStore: rows stored in RocksDB, one cell per column

pub mod error;
pub mod memory;
pub mod rocksdb_store;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryRowSource;
pub use rocksdb_store::RocksDbEdgeStore;

use crate::types::Row;

/// Iterator over the rows of a source
pub type RowIter<'a> = Box<dyn Iterator<Item = StorageResult<Row>> + 'a>;

/// Ordered scan over edgestore rows
pub trait RowSource: Send + Sync {
    /// Scan every row, in key order
    fn rows(&self) -> RowIter<'_>;
}
