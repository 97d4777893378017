/// Edgestore column codec
///
/// Column layout (17 bytes):
///
/// ```text
/// ┌───────────────┬───────────┬────────────────────┐
/// │ type_id (u64) │ dir (u8)  │ relation_id (u64)  │
/// └───────────────┴───────────┴────────────────────┘
/// ```
///
/// Value layout, by leading tag byte:
/// - `0` property: present flag (u8), then `len (u32) | JSON bytes` if present
/// - `1` edge: other vertex as a signed delta from the row's vertex (i64),
///   relation property count (u16), then `type_id (u64) | len (u32) | JSON`
///   per property
///
/// All integers are big-endian.

mod relation_codec;

pub use relation_codec::RelationCodec;

use crate::types::{Column, RelationRecord, VertexId};
use thiserror::Error;

/// Column codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Truncated {context}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Unknown direction byte: {0}")]
    UnknownDirection(u8),

    #[error("Unknown value tag: {0}")]
    UnknownTag(u8),

    #[error("{0} trailing bytes after relation")]
    TrailingBytes(usize),

    #[error("Relation points at invalid vertex ID {0}")]
    InvalidVertexId(i128),

    #[error("Too many relation properties: {0}")]
    TooManyProperties(usize),

    #[error("Value too large: {0} bytes")]
    ValueTooLarge(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Decodes one edgestore column into a relation record
///
/// Implementations must be deterministic and free of side effects: the
/// decoder parses every column twice.
pub trait RelationReader: Send + Sync {
    fn parse_relation(&self, column: &Column, vertex_id: VertexId) -> CodecResult<RelationRecord>;
}
