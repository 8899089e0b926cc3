//! Descriptor types for protobuf FileDescriptorSet.
//!
//! These types mirror google/protobuf/descriptor.proto but are implemented
//! independently to avoid depending on a protobuf runtime. Only the parts a
//! generated schema needs are modelled.

mod http;

pub use http::{HttpRule, Pattern};

use crate::Error;

/// A collection of file descriptors.
/// Corresponds to google.protobuf.FileDescriptorSet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDescriptorSet {
    /// The file descriptors. Dependencies precede their dependents.
    pub file: Vec<FileDescriptorProto>, // field 1
}

static_assertions::assert_impl_all!(FileDescriptorSet: Send, Sync, Clone);

impl FileDescriptorSet {
    /// The file every other file in the set was collected for.
    pub fn target(&self) -> Option<&FileDescriptorProto> {
        self.file.last()
    }

    /// Look up a file by name.
    pub fn find_file(&self, name: &str) -> Option<&FileDescriptorProto> {
        self.file.iter().find(|f| f.name.as_deref() == Some(name))
    }
}

/// Describes a complete .proto file.
/// Corresponds to google.protobuf.FileDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDescriptorProto {
    /// The file name, relative to root of source tree.
    pub name: Option<String>, // field 1
    /// The package name.
    pub package: Option<String>, // field 2
    /// Names of files imported by this file.
    pub dependency: Vec<String>, // field 3
    /// All top-level message definitions in this file.
    pub message_type: Vec<DescriptorProto>, // field 4
    /// All top-level enum definitions in this file.
    pub enum_type: Vec<EnumDescriptorProto>, // field 5
    /// All services defined in this file.
    pub service: Vec<ServiceDescriptorProto>, // field 6
    /// Extensions declared at file scope.
    pub extension: Vec<FieldDescriptorProto>, // field 7
    /// The syntax of the proto file (e.g., "proto2", "proto3").
    pub syntax: Option<String>, // field 12
}

impl FileDescriptorProto {
    /// Look up a top-level message by name.
    pub fn find_message(&self, name: &str) -> Option<&DescriptorProto> {
        self.message_type
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }
}

/// Describes a message type.
/// Corresponds to google.protobuf.DescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorProto {
    /// The message name.
    pub name: Option<String>, // field 1
    /// Fields of the message.
    pub field: Vec<FieldDescriptorProto>, // field 2
    /// Nested message types.
    pub nested_type: Vec<DescriptorProto>, // field 3
    /// Nested enum types.
    pub enum_type: Vec<EnumDescriptorProto>, // field 4
    /// Extension number ranges.
    pub extension_range: Vec<ExtensionRange>, // field 5
    /// Message options.
    pub options: Option<MessageOptions>, // field 7
    /// Oneof declarations.
    pub oneof_decl: Vec<OneofDescriptorProto>, // field 8
}

impl DescriptorProto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Look up a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptorProto> {
        self.field.iter().find(|f| f.name.as_deref() == Some(name))
    }

    /// Whether this is a synthetic map entry message.
    pub fn is_map_entry(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.map_entry)
            .unwrap_or(false)
    }
}

/// Range of extension numbers, start inclusive, end exclusive.
/// Corresponds to google.protobuf.DescriptorProto.ExtensionRange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRange {
    pub start: i32, // field 1
    pub end: i32,   // field 2
}

/// Describes a field within a message.
/// Corresponds to google.protobuf.FieldDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptorProto {
    /// The field name.
    pub name: Option<String>, // field 1
    /// For extensions, the message being extended.
    pub extendee: Option<String>, // field 2
    /// The field number (tag).
    pub number: Option<i32>, // field 3
    /// The field label (optional, required, repeated).
    pub label: Option<Label>, // field 4
    /// The field type.
    pub r#type: Option<Type>, // field 5
    /// For message and enum types, the type name.
    pub type_name: Option<String>, // field 6
    /// If set, this field is part of a oneof.
    pub oneof_index: Option<i32>, // field 9
}

/// Describes an enum type.
/// Corresponds to google.protobuf.EnumDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumDescriptorProto {
    /// The enum name.
    pub name: Option<String>, // field 1
    /// The enum values.
    pub value: Vec<EnumValueDescriptorProto>, // field 2
}

/// Describes an enum value.
/// Corresponds to google.protobuf.EnumValueDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumValueDescriptorProto {
    /// The value name.
    pub name: Option<String>, // field 1
    /// The value number.
    pub number: Option<i32>, // field 2
}

/// Describes a oneof.
/// Corresponds to google.protobuf.OneofDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneofDescriptorProto {
    /// The oneof name.
    pub name: Option<String>, // field 1
}

/// Describes a service.
/// Corresponds to google.protobuf.ServiceDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDescriptorProto {
    /// The service name.
    pub name: Option<String>, // field 1
    /// The service methods.
    pub method: Vec<MethodDescriptorProto>, // field 2
}

/// Describes a method of a service.
/// Corresponds to google.protobuf.MethodDescriptorProto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodDescriptorProto {
    /// The method name.
    pub name: Option<String>, // field 1
    /// Type name of the request message.
    pub input_type: Option<String>, // field 2
    /// Type name of the response message.
    pub output_type: Option<String>, // field 3
    /// Method options.
    pub options: Option<MethodOptions>, // field 4
}

/// Options for a message type.
/// Corresponds to google.protobuf.MessageOptions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Set true if this message is a map entry type.
    pub map_entry: Option<bool>, // field 7
}

/// Options for a method.
/// Corresponds to google.protobuf.MethodOptions with the `google.api.http`
/// extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodOptions {
    /// The `google.api.http` extension.
    pub http: Option<HttpRule>, // field 72295728
}

impl MethodOptions {
    /// Attach `rule` through the extension field `extension`.
    ///
    /// The extension must extend `google.protobuf.MethodOptions` with a
    /// `google.api.HttpRule` message at [`HTTP_EXTENSION_NUMBER`].
    pub fn set_http_rule(
        &mut self,
        extension: &FieldDescriptorProto,
        rule: HttpRule,
    ) -> Result<(), Error> {
        let name = extension.name.as_deref().unwrap_or("<unnamed>");
        if extension.extendee.as_deref() != Some(METHOD_OPTIONS_TYPE) {
            return Err(Error::Extension(format!(
                "extension '{name}' does not extend {METHOD_OPTIONS_TYPE}"
            )));
        }
        if extension.number != Some(HTTP_EXTENSION_NUMBER) {
            return Err(Error::Extension(format!(
                "extension '{name}' has number {:?}, expected {HTTP_EXTENSION_NUMBER}",
                extension.number
            )));
        }
        if extension.r#type != Some(Type::Message)
            || extension.type_name.as_deref().map(|t| t.trim_start_matches('.'))
                != Some(HTTP_RULE_TYPE)
        {
            return Err(Error::Extension(format!(
                "extension '{name}' does not carry a {HTTP_RULE_TYPE} message"
            )));
        }
        self.http = Some(rule);
        Ok(())
    }
}

/// Fully-qualified name of the message the http extension extends.
pub const METHOD_OPTIONS_TYPE: &str = ".google.protobuf.MethodOptions";

/// Type carried by the http extension.
pub const HTTP_RULE_TYPE: &str = "google.api.HttpRule";

/// Field number of the `google.api.http` extension.
pub const HTTP_EXTENSION_NUMBER: i32 = 72295728;

/// Field type enumeration.
/// Corresponds to google.protobuf.FieldDescriptorProto.Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Type {
    Double = 1,
    Float = 2,
    Int64 = 3,
    Uint64 = 4,
    Int32 = 5,
    Fixed64 = 6,
    Fixed32 = 7,
    Bool = 8,
    String = 9,
    Group = 10,
    Message = 11,
    Bytes = 12,
    Uint32 = 13,
    Enum = 14,
    Sfixed32 = 15,
    Sfixed64 = 16,
    Sint32 = 17,
    Sint64 = 18,
}

/// Field label enumeration.
/// Corresponds to google.protobuf.FieldDescriptorProto.Label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Label {
    Optional = 1,
    Required = 2,
    Repeated = 3,
}
