//! Enum descriptors for fields with enum literals.

use crate::descriptor::{EnumDescriptorProto, EnumValueDescriptorProto};
use crate::surface::Field;

/// Build the enum named after the field's declared type, or `None` if the
/// field has no enum literals.
///
/// Values are numbered from 0 in declaration order; names are upper-cased.
pub(crate) fn build_enum(field: &Field) -> Option<EnumDescriptorProto> {
    let literals = field.enum_values.as_ref()?;

    let value = literals
        .iter()
        .zip(0..)
        .map(|(literal, number)| EnumValueDescriptorProto {
            name: Some(literal.to_uppercase()),
            number: Some(number),
        })
        .collect();

    Some(EnumDescriptorProto {
        name: Some(field.native_type.clone()),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FieldKind;

    #[test]
    fn test_build_enum() {
        let field = Field::new("status", "Status", FieldKind::Scalar)
            .with_enum_values(["available", "pending", "sold-out"]);
        let e = build_enum(&field).unwrap();
        assert_eq!(e.name.as_deref(), Some("Status"));

        let values: Vec<_> = e
            .value
            .iter()
            .map(|v| (v.name.as_deref().unwrap(), v.number.unwrap()))
            .collect();
        assert_eq!(values, vec![("AVAILABLE", 0), ("PENDING", 1), ("SOLD-OUT", 2)]);
    }

    #[test]
    fn test_no_literals() {
        assert!(build_enum(&Field::new("name", "string", FieldKind::Scalar)).is_none());

        // Present but empty still declares the enum.
        let field =
            Field::new("kind", "Kind", FieldKind::Scalar).with_enum_values(Vec::<String>::new());
        assert_eq!(build_enum(&field).unwrap().value.len(), 0);
    }
}
