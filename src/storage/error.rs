/// Error types for edgestore access

use thiserror::Error;

/// Edgestore errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Cell key shorter than a row key
    #[error("Invalid cell key: {0} bytes")]
    InvalidCellKey(usize),

    /// Row key with the wrong length
    #[error("Invalid row key length: expected {expected}, got {actual}")]
    InvalidRowKey { expected: usize, actual: usize },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// RocksDB error
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
}

/// Result type for edgestore operations
pub type StorageResult<T> = Result<T, StorageError>;
