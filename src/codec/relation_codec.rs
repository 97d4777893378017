use super::{CodecError, CodecResult, RelationReader};
use crate::types::{Column, Direction, RelationId, RelationPayload, RelationRecord, TypeId, VertexId};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde_json::Value as JsonValue;

const COLUMN_LEN: usize = 8 + 1 + 8;

const TAG_PROPERTY: u8 = 0;
const TAG_EDGE: u8 = 1;

const DIR_OUT: u8 = 0;
const DIR_IN: u8 = 1;
const DIR_BOTH: u8 = 2;

/// Binary codec for edgestore columns
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationCodec;

impl RelationCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode a relation of `vertex_id` as an edgestore column
    pub fn encode(&self, record: &RelationRecord, vertex_id: VertexId) -> CodecResult<Column> {
        let mut column = BytesMut::with_capacity(COLUMN_LEN);
        column.put_u64(record.type_id.0);
        column.put_u8(encode_direction(record.direction));
        column.put_u64(record.relation_id.0);

        let mut value = BytesMut::new();
        match &record.payload {
            RelationPayload::Property { value: stored } => {
                value.put_u8(TAG_PROPERTY);
                match stored {
                    Some(json) => {
                        value.put_u8(1);
                        put_json(&mut value, json)?;
                    }
                    None => value.put_u8(0),
                }
            }
            RelationPayload::Edge { other_vertex } => {
                value.put_u8(TAG_EDGE);
                let delta = other_vertex.as_raw() as i128 - vertex_id.as_raw() as i128;
                let delta =
                    i64::try_from(delta).map_err(|_| CodecError::InvalidVertexId(delta))?;
                value.put_i64(delta);

                let count = u16::try_from(record.properties.len())
                    .map_err(|_| CodecError::TooManyProperties(record.properties.len()))?;
                value.put_u16(count);
                for (type_id, json) in &record.properties {
                    value.put_u64(type_id.0);
                    put_json(&mut value, json)?;
                }
            }
        }

        Ok(Column::new(column.freeze(), value.freeze()))
    }

    /// Encode all relations of a vertex, in order
    pub fn encode_all(
        &self,
        records: &[RelationRecord],
        vertex_id: VertexId,
    ) -> CodecResult<Vec<Column>> {
        records
            .iter()
            .map(|record| self.encode(record, vertex_id))
            .collect()
    }
}

impl RelationReader for RelationCodec {
    fn parse_relation(&self, column: &Column, vertex_id: VertexId) -> CodecResult<RelationRecord> {
        let mut key = column.column.clone();
        ensure(&key, COLUMN_LEN, "column")?;
        let type_id = TypeId(key.get_u64());
        let direction = decode_direction(key.get_u8())?;
        let relation_id = RelationId(key.get_u64());
        if key.has_remaining() {
            return Err(CodecError::TrailingBytes(key.remaining()));
        }

        let mut value = column.value.clone();
        ensure(&value, 1, "value tag")?;
        let (payload, properties) = match value.get_u8() {
            TAG_PROPERTY => {
                ensure(&value, 1, "property flag")?;
                let stored = match value.get_u8() {
                    0 => None,
                    _ => Some(get_json(&mut value, "property value")?),
                };
                (RelationPayload::Property { value: stored }, Vec::new())
            }
            TAG_EDGE => {
                ensure(&value, 8 + 2, "edge header")?;
                let delta = value.get_i64();
                let other = vertex_id.as_raw() as i128 + delta as i128;
                if other <= 0 || other > u64::MAX as i128 {
                    return Err(CodecError::InvalidVertexId(other));
                }
                let other_vertex = VertexId::from_raw(other as u64);

                let count = value.get_u16() as usize;
                let mut properties = Vec::with_capacity(count);
                for _ in 0..count {
                    ensure(&value, 8, "relation property type")?;
                    let key_type = TypeId(value.get_u64());
                    properties.push((key_type, get_json(&mut value, "relation property")?));
                }
                (RelationPayload::Edge { other_vertex }, properties)
            }
            tag => return Err(CodecError::UnknownTag(tag)),
        };

        if value.has_remaining() {
            return Err(CodecError::TrailingBytes(value.remaining()));
        }

        Ok(RelationRecord {
            type_id,
            direction,
            relation_id,
            payload,
            properties,
        })
    }
}

fn ensure(buf: &Bytes, needed: usize, context: &'static str) -> CodecResult<()> {
    if buf.remaining() < needed {
        return Err(CodecError::Truncated {
            context,
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn put_json(buf: &mut BytesMut, json: &JsonValue) -> CodecResult<()> {
    let encoded = serde_json::to_vec(json)?;
    let len = u32::try_from(encoded.len()).map_err(|_| CodecError::ValueTooLarge(encoded.len()))?;
    buf.put_u32(len);
    buf.put_slice(&encoded);
    Ok(())
}

fn get_json(buf: &mut Bytes, context: &'static str) -> CodecResult<JsonValue> {
    ensure(buf, 4, context)?;
    let len = buf.get_u32() as usize;
    ensure(buf, len, context)?;
    let encoded = buf.split_to(len);
    Ok(serde_json::from_slice(&encoded)?)
}

fn encode_direction(direction: Direction) -> u8 {
    match direction {
        Direction::Out => DIR_OUT,
        Direction::In => DIR_IN,
        Direction::Both => DIR_BOTH,
    }
}

fn decode_direction(byte: u8) -> CodecResult<Direction> {
    match byte {
        DIR_OUT => Ok(Direction::Out),
        DIR_IN => Ok(Direction::In),
        DIR_BOTH => Ok(Direction::Both),
        other => Err(CodecError::UnknownDirection(other)),
    }
}
