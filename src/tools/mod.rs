/// Batch decoding and export tools
///
/// This module drives the row decoder over a whole edgestore and writes the
/// decoded vertices out for downstream analytics.

pub mod batch;
pub mod export;

pub use batch::{decode_rows, decode_source, BatchOutput, BatchStats};
pub use export::{export_to_csv, export_to_json, ExportFormat, ExportOptions};

use thiserror::Error;

/// Batch/export errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("Decode error: {0}")]
    DecodeError(#[from] crate::decoder::DecodeError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
