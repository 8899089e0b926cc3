//! Foundation descriptors every generated schema links against.
//!
//! A generated file imports `google/api/annotations.proto` for the
//! `google.api.http` method option and, when some method has no request or
//! response type, `google/protobuf/empty.proto`. Protobuf toolchains need the
//! descriptors of every imported file (and of their imports) to link the set,
//! so they are shipped ahead of the generated files.

use crate::descriptor::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, ExtensionRange,
    FieldDescriptorProto, FileDescriptorProto, Label, OneofDescriptorProto, Type,
    HTTP_EXTENSION_NUMBER, METHOD_OPTIONS_TYPE,
};

pub const ANNOTATIONS_FILE: &str = "google/api/annotations.proto";
pub const EMPTY_FILE: &str = "google/protobuf/empty.proto";
pub const DESCRIPTOR_FILE: &str = "google/protobuf/descriptor.proto";

/// Type name substituted for a missing request or response type.
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";

/// Supplies ready-made descriptors for the well-known files a generated
/// schema depends on.
pub trait FoundationProvider {
    /// Files placed ahead of all generated files, in order.
    fn files(&self) -> Vec<FileDescriptorProto>;

    /// Name of the file declaring the empty message.
    fn empty_file(&self) -> &str;

    /// Type name of the empty message.
    fn empty_type(&self) -> &str;

    /// The extension field that attaches an HTTP rule to method options.
    fn http_extension(&self) -> FieldDescriptorProto;
}

/// The canonical `google.api` / `google.protobuf` descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellKnownTypes;

impl FoundationProvider for WellKnownTypes {
    fn files(&self) -> Vec<FileDescriptorProto> {
        vec![annotations_file(), empty_file(), descriptor_file()]
    }

    fn empty_file(&self) -> &str {
        EMPTY_FILE
    }

    fn empty_type(&self) -> &str {
        EMPTY_TYPE
    }

    fn http_extension(&self) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some("http".into()),
            extendee: Some(METHOD_OPTIONS_TYPE.into()),
            number: Some(HTTP_EXTENSION_NUMBER),
            label: Some(Label::Optional),
            r#type: Some(Type::Message),
            type_name: Some(".google.api.HttpRule".into()),
            ..Default::default()
        }
    }
}

/// `google/api/annotations.proto`, with the `google/api/http.proto` messages
/// folded in so the extension's type resolves within the same file.
fn annotations_file() -> FileDescriptorProto {
    let http = DescriptorProto {
        field: vec![
            field("rules", 1, Label::Repeated, Type::Message, Some(".google.api.HttpRule")),
            field("fully_decode_reserved_expansion", 2, Label::Optional, Type::Bool, None),
        ],
        ..DescriptorProto::new("Http")
    };

    let pattern = |name: &str, number: i32| FieldDescriptorProto {
        oneof_index: Some(0),
        ..field(name, number, Label::Optional, Type::String, None)
    };
    let http_rule = DescriptorProto {
        field: vec![
            field("selector", 1, Label::Optional, Type::String, None),
            pattern("get", 2),
            pattern("put", 3),
            pattern("post", 4),
            pattern("delete", 5),
            pattern("patch", 6),
            FieldDescriptorProto {
                oneof_index: Some(0),
                ..field(
                    "custom",
                    8,
                    Label::Optional,
                    Type::Message,
                    Some(".google.api.CustomHttpPattern"),
                )
            },
            field("body", 7, Label::Optional, Type::String, None),
            field("response_body", 12, Label::Optional, Type::String, None),
            field(
                "additional_bindings",
                11,
                Label::Repeated,
                Type::Message,
                Some(".google.api.HttpRule"),
            ),
        ],
        oneof_decl: vec![OneofDescriptorProto {
            name: Some("pattern".into()),
        }],
        ..DescriptorProto::new("HttpRule")
    };

    let custom_pattern = DescriptorProto {
        field: vec![
            field("kind", 1, Label::Optional, Type::String, None),
            field("path", 2, Label::Optional, Type::String, None),
        ],
        ..DescriptorProto::new("CustomHttpPattern")
    };

    FileDescriptorProto {
        name: Some(ANNOTATIONS_FILE.into()),
        package: Some("google.api".into()),
        dependency: vec![DESCRIPTOR_FILE.into()],
        message_type: vec![http, http_rule, custom_pattern],
        extension: vec![WellKnownTypes.http_extension()],
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}

/// `google/protobuf/empty.proto`.
fn empty_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(EMPTY_FILE.into()),
        package: Some("google.protobuf".into()),
        message_type: vec![DescriptorProto::new("Empty")],
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}

/// The part of `google/protobuf/descriptor.proto` extended by the http
/// option.
fn descriptor_file() -> FileDescriptorProto {
    let idempotency_level = EnumDescriptorProto {
        name: Some("IdempotencyLevel".into()),
        value: ["IDEMPOTENCY_UNKNOWN", "NO_SIDE_EFFECTS", "IDEMPOTENT"]
            .into_iter()
            .zip(0..)
            .map(|(name, number)| EnumValueDescriptorProto {
                name: Some(name.into()),
                number: Some(number),
            })
            .collect(),
    };

    let method_options = DescriptorProto {
        field: vec![
            field("deprecated", 33, Label::Optional, Type::Bool, None),
            field(
                "idempotency_level",
                34,
                Label::Optional,
                Type::Enum,
                Some(".google.protobuf.MethodOptions.IdempotencyLevel"),
            ),
        ],
        enum_type: vec![idempotency_level],
        extension_range: vec![ExtensionRange {
            start: 1000,
            end: 536_870_912,
        }],
        ..DescriptorProto::new("MethodOptions")
    };

    FileDescriptorProto {
        name: Some(DESCRIPTOR_FILE.into()),
        package: Some("google.protobuf".into()),
        message_type: vec![method_options],
        syntax: Some("proto2".into()),
        ..Default::default()
    }
}

fn field(
    name: &str,
    number: i32,
    label: Label,
    ty: Type,
    type_name: Option<&str>,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        number: Some(number),
        label: Some(label),
        r#type: Some(ty),
        type_name: type_name.map(Into::into),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MethodOptions;

    #[test]
    fn test_file_order_and_names() {
        let names: Vec<_> = WellKnownTypes
            .files()
            .into_iter()
            .map(|f| f.name.unwrap())
            .collect();
        assert_eq!(names, vec![ANNOTATIONS_FILE, EMPTY_FILE, DESCRIPTOR_FILE]);
    }

    #[test]
    fn test_annotations_file() {
        let file = annotations_file();
        assert_eq!(file.package.as_deref(), Some("google.api"));
        assert_eq!(file.dependency, vec![DESCRIPTOR_FILE.to_string()]);

        let ext = &file.extension[0];
        assert_eq!(ext.name.as_deref(), Some("http"));
        assert_eq!(ext.number, Some(72295728));
        assert_eq!(ext.label, Some(Label::Optional));
        assert_eq!(ext.r#type, Some(Type::Message));
        assert_eq!(ext.extendee.as_deref(), Some(".google.protobuf.MethodOptions"));

        // The extension's type resolves within the file.
        let rule = file.find_message("HttpRule").expect("HttpRule");
        assert_eq!(rule.oneof_decl.len(), 1);
        assert_eq!(
            rule.field.iter().filter(|f| f.oneof_index == Some(0)).count(),
            6
        );
    }

    #[test]
    fn test_http_extension_is_attachable() {
        let mut options = MethodOptions::default();
        options
            .set_http_rule(&WellKnownTypes.http_extension(), Default::default())
            .unwrap();
        assert!(options.http.is_some());
    }

    #[test]
    fn test_descriptor_file_declares_extendee() {
        let file = descriptor_file();
        let options = file.find_message("MethodOptions").expect("MethodOptions");
        let range = options.extension_range[0];
        assert!(range.start <= HTTP_EXTENSION_NUMBER && HTTP_EXTENSION_NUMBER < range.end);
    }
}
