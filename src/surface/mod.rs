//! The surface model: a normalized, language-agnostic description of an API's
//! types and operations.
//!
//! Surface models are produced by an earlier pipeline stage and are read-only
//! to the generator. Models for symbolically referenced documents are decoded
//! from the binary surface documents returned by a
//! [`ReferenceResolver`](crate::ReferenceResolver), see [`decode_surface_model`].

mod decode;

pub use decode::decode_surface_model;

/// A complete API surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceModel {
    /// All named types, in declaration order.
    pub types: Vec<Type>,
    /// All operations, in declaration order.
    pub methods: Vec<Method>,
    /// URLs of other API descriptions referenced by this one. May carry a
    /// `#fragment` suffix.
    pub symbolic_references: Vec<String>,
}

impl SurfaceModel {
    /// Look up a type by name. The last declaration wins.
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().rev().find(|t| t.name == name)
    }
}

/// A named type with an ordered list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    pub description: String,
    pub fields: Vec<Field>,
}

impl Type {
    /// Create a type with no description.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this type carries the parameters of an RPC request.
    ///
    /// There is no structural marker for request parameters in the surface
    /// model; upstream tooling describes such types as
    /// `"<TypeName> holds parameters to <operation>"`.
    pub fn is_request_parameter(&self) -> bool {
        self.description
            .contains(&format!("{} holds parameters to", self.name))
    }

    /// The first field placed in the request body, if any.
    pub fn body_field(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.position == Some(Position::Body))
    }
}

/// A field of a [`Type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Declared type, e.g. `string`, `Pet`, `map[string]int32`.
    pub native_type: String,
    pub kind: FieldKind,
    /// Where the field travels in an HTTP request. Only meaningful for
    /// request-parameter types.
    pub position: Option<Position>,
    /// Enum literals, in declaration order. `None` for non-enum fields.
    pub enum_values: Option<Vec<String>>,
}

impl Field {
    /// A scalar field with no position.
    pub fn new(name: impl Into<String>, native_type: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            kind,
            position: None,
            enum_values: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the declared type is a map whose values are arrays. Such fields
    /// have no protobuf representation.
    pub fn is_map_of_array(&self) -> bool {
        self.native_type.contains("map[string][]")
    }
}

/// The shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Map,
    Array,
    Reference,
}

/// Placement of a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Body,
    Query,
    Path,
}

/// An API operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Method {
    /// HTTP verb, e.g. `GET`.
    pub method: String,
    /// URL path template, e.g. `/v1/pets/{pet_id}`.
    pub path: String,
    pub handler_name: String,
    /// Name of the request-parameter type. Empty when the operation takes no
    /// parameters.
    pub parameters_type_name: String,
    /// Name of the response type. Empty when the operation returns nothing.
    pub responses_type_name: String,
}

impl Method {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handler_name: handler_name.into(),
            ..Default::default()
        }
    }

    pub fn with_parameters(mut self, type_name: impl Into<String>) -> Self {
        self.parameters_type_name = type_name.into();
        self
    }

    pub fn with_responses(mut self, type_name: impl Into<String>) -> Self {
        self.responses_type_name = type_name.into();
        self
    }
}
