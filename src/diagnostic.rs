//! Non-fatal findings reported alongside a generated descriptor set.

use std::fmt;

/// A structural issue found while building descriptors.
///
/// Diagnostics never stop generation (unless strict parameter checking is
/// enabled); the offending element is kept in the output as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A path parameter that is not a non-repeated primitive.
    ///
    /// See <https://github.com/googleapis/googleapis/blob/master/google/api/http.proto#L62>.
    PathParameter { type_name: String, field: String },
    /// A query parameter that is neither a primitive, a repeated primitive,
    /// nor a non-repeated message.
    ///
    /// See <https://github.com/googleapis/googleapis/blob/master/google/api/http.proto#L118>.
    QueryParameter { type_name: String, field: String },
    /// A method whose HTTP verb has no transcoding pattern. The method is kept
    /// with an HTTP rule that has no pattern set.
    UnrecognizedVerb { method: String, verb: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PathParameter { type_name, field } => write!(
                f,
                "the path parameter '{field}' of '{type_name}' is invalid: the path template may \
                 only refer to non-repeated fields with a primitive (non-message) type"
            ),
            Diagnostic::QueryParameter { type_name, field } => write!(
                f,
                "the query parameter '{field}' of '{type_name}' is invalid: fields mapped to URL \
                 query parameters must have a primitive type, a repeated primitive type or a \
                 non-repeated message type"
            ),
            Diagnostic::UnrecognizedVerb { method, verb } => write!(
                f,
                "method '{method}' uses HTTP verb '{verb}' which has no transcoding pattern"
            ),
        }
    }
}
