//! Mapping from protobuf scalar type names to descriptor types.
//!
//! See <https://protobuf.dev/programming-guides/proto3/#scalar>.

use crate::descriptor::Type;

/// Map a scalar type name such as `int32` to its descriptor [`Type`].
///
/// Returns `None` for any other name; such names refer to a message (or an
/// enum, when the field carries enum literals).
pub fn scalar_type(name: &str) -> Option<Type> {
    let ty = match name {
        "double" => Type::Double,
        "float" => Type::Float,
        "int64" => Type::Int64,
        "uint64" => Type::Uint64,
        "int32" => Type::Int32,
        "fixed64" => Type::Fixed64,
        "fixed32" => Type::Fixed32,
        "bool" => Type::Bool,
        "string" => Type::String,
        "bytes" => Type::Bytes,
        "uint32" => Type::Uint32,
        "sfixed32" => Type::Sfixed32,
        "sfixed64" => Type::Sfixed64,
        "sint32" => Type::Sint32,
        "sint64" => Type::Sint64,
        _ => return None,
    };
    Some(ty)
}

/// Whether `name` is a protobuf scalar type.
pub fn is_scalar(name: &str) -> bool {
    scalar_type(name).is_some()
}

/// Descriptor type for a declared type name: a scalar, otherwise an enum when
/// the field has enum literals, otherwise a message.
pub fn field_type(native_type: &str, has_enum_values: bool) -> Type {
    match scalar_type(native_type) {
        Some(ty) => ty,
        None if has_enum_values => Type::Enum,
        None => Type::Message,
    }
}
