//! Decoder for binary surface documents.
//!
//! Field numbers follow the surface document schema:
//!
//! ```protobuf
//! message Model  { string name = 1; repeated Type types = 2; repeated Method methods = 3;
//!                  repeated string symbolic_references = 4; }
//! message Type   { string name = 1; string description = 3; repeated Field fields = 5; }
//! message Field  { string name = 1; FieldKind kind = 3; Position position = 5;
//!                  string native_type = 6; string field_name = 7;
//!                  repeated string enum_values = 10; }
//! message Method { string path = 2; string method = 3; string handler_name = 6;
//!                  string parameters_type_name = 9; string responses_type_name = 10; }
//! ```
//!
//! Fields not listed above are skipped.

use super::*;
use crate::error::DecodeError;
use crate::wire::{decode_bytes, decode_key, decode_string, decode_varint, skip_field};

/// Decode a surface model from protobuf binary data.
pub fn decode_surface_model(data: &[u8]) -> Result<SurfaceModel, DecodeError> {
    let mut buf = data;
    let mut model = SurfaceModel::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            2 => model.types.push(decode_type(decode_bytes(&mut buf)?)?),
            3 => model.methods.push(decode_method(decode_bytes(&mut buf)?)?),
            4 => model.symbolic_references.push(decode_string(&mut buf)?),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(model)
}

/// Decode a Type.
fn decode_type(data: &[u8]) -> Result<Type, DecodeError> {
    let mut buf = data;
    let mut t = Type::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => t.name = decode_string(&mut buf)?,
            3 => t.description = decode_string(&mut buf)?,
            5 => t.fields.push(decode_field(decode_bytes(&mut buf)?)?),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(t)
}

/// Decode a Field.
fn decode_field(data: &[u8]) -> Result<Field, DecodeError> {
    let mut buf = data;
    let mut name = String::new();
    let mut field_name = String::new();
    let mut native_type = String::new();
    let mut kind = FieldKind::Scalar;
    // proto3 omits zero values, and zero is BODY.
    let mut position = Some(Position::Body);
    let mut enum_values: Option<Vec<String>> = None;

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            1 => name = decode_string(&mut buf)?,
            3 => kind = decode_field_kind(decode_varint(&mut buf)?)?,
            5 => position = decode_position(decode_varint(&mut buf)?)?,
            6 => native_type = decode_string(&mut buf)?,
            7 => field_name = decode_string(&mut buf)?,
            10 => enum_values
                .get_or_insert_with(Vec::new)
                .push(decode_string(&mut buf)?),
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(Field {
        name: if field_name.is_empty() { name } else { field_name },
        native_type,
        kind,
        position,
        enum_values,
    })
}

/// Decode a Method.
fn decode_method(data: &[u8]) -> Result<Method, DecodeError> {
    let mut buf = data;
    let mut m = Method::default();

    while !buf.is_empty() {
        let (field_number, wire_type) = decode_key(&mut buf)?;
        match field_number {
            2 => m.path = decode_string(&mut buf)?,
            3 => m.method = decode_string(&mut buf)?,
            6 => m.handler_name = decode_string(&mut buf)?,
            9 => m.parameters_type_name = decode_string(&mut buf)?,
            10 => m.responses_type_name = decode_string(&mut buf)?,
            _ => skip_field(&mut buf, wire_type)?,
        }
    }

    Ok(m)
}

fn decode_field_kind(value: u64) -> Result<FieldKind, DecodeError> {
    match value {
        0 => Ok(FieldKind::Scalar),
        1 => Ok(FieldKind::Map),
        2 => Ok(FieldKind::Array),
        3 => Ok(FieldKind::Reference),
        value => Err(DecodeError::InvalidEnum {
            name: "FieldKind",
            value,
        }),
    }
}

/// Header (1) and form data (2) parameters have no transcoding placement.
fn decode_position(value: u64) -> Result<Option<Position>, DecodeError> {
    match value {
        0 => Ok(Some(Position::Body)),
        1 | 2 => Ok(None),
        3 => Ok(Some(Position::Query)),
        4 => Ok(Some(Position::Path)),
        value => Err(DecodeError::InvalidEnum {
            name: "Position",
            value,
        }),
    }
}
