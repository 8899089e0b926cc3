//! Field descriptors, map entries and request-parameter placement checks.

use crate::context::GenerationContext;
use crate::descriptor::{DescriptorProto, FieldDescriptorProto, Label, MessageOptions, Type};
use crate::diagnostic::Diagnostic;
use crate::scalar::{field_type, is_scalar};
use crate::surface::{self, FieldKind, Position};

/// Prefix of a declared map type; the value type follows it.
const MAP_PREFIX: &str = "map[string]";

/// Build the descriptor for `field` with the given number.
///
/// Message references resolve through the run registry, so a type generated
/// by an earlier (possibly nested) run keeps its qualified name. Enum
/// references use the declared name, which resolves to the nested enum.
pub(crate) fn build_field(
    ctx: &GenerationContext,
    package: &str,
    field: &surface::Field,
    number: i32,
) -> FieldDescriptorProto {
    let ty = field_type(&field.native_type, field.enum_values.is_some());

    let type_name = match ty {
        Type::Message => Some(ctx.qualified_message_name(&field.native_type, package)),
        Type::Enum => Some(field.native_type.clone()),
        _ => None,
    };

    FieldDescriptorProto {
        name: Some(field.name.clone()),
        number: Some(number),
        label: Some(label(field)),
        r#type: Some(ty),
        type_name,
        ..Default::default()
    }
}

/// Arrays and maps are repeated.
fn label(field: &surface::Field) -> Label {
    let is_map = field.kind == FieldKind::Map || field.native_type.starts_with("map[");
    if field.kind == FieldKind::Array || is_map {
        Label::Repeated
    } else {
        Label::Optional
    }
}

/// Build the synthetic `<field>Entry` message for a map field.
pub(crate) fn build_map_entry(field: &surface::Field) -> DescriptorProto {
    let value_type = field
        .native_type
        .strip_prefix(MAP_PREFIX)
        .unwrap_or(&field.native_type);

    let key = FieldDescriptorProto {
        name: Some("key".into()),
        number: Some(1),
        label: Some(Label::Optional),
        r#type: Some(Type::String),
        ..Default::default()
    };
    let value = FieldDescriptorProto {
        name: Some("value".into()),
        number: Some(2),
        label: Some(Label::Optional),
        r#type: Some(field_type(value_type, field.enum_values.is_some())),
        type_name: (!is_scalar(value_type)).then(|| value_type.to_string()),
        ..Default::default()
    };

    DescriptorProto {
        field: vec![key, value],
        options: Some(MessageOptions {
            map_entry: Some(true),
        }),
        ..DescriptorProto::new(format!("{}Entry", field.name))
    }
}

/// Check the placement rules of google/api/http.proto for a field of the
/// request-parameter type `type_name`.
pub(crate) fn check_placement(type_name: &str, field: &surface::Field) -> Option<Diagnostic> {
    match field.position {
        Some(Position::Path) if field.kind != FieldKind::Scalar => Some(Diagnostic::PathParameter {
            type_name: type_name.to_string(),
            field: field.name.clone(),
        }),
        Some(Position::Query) => {
            let valid = match field.kind {
                FieldKind::Scalar | FieldKind::Reference => true,
                FieldKind::Array => is_scalar(&field.native_type),
                FieldKind::Map => false,
            };
            (!valid).then(|| Diagnostic::QueryParameter {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            })
        }
        _ => None,
    }
}
