//! gRPC-HTTP transcoding rules.
//!
//! The part of `google.api.HttpRule` from
//! <https://github.com/googleapis/googleapis/blob/master/google/api/http.proto>
//! that generation fills in.

/// Maps an RPC method onto an HTTP verb, path template and body.
/// Corresponds to google.api.HttpRule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRule {
    /// The HTTP verb and path template. `None` leaves the rule without a
    /// pattern.
    pub pattern: Option<Pattern>, // oneof fields 2-6
    /// Request field mapped to the HTTP body.
    pub body: String, // field 7
}

impl HttpRule {
    pub fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..Default::default()
        }
    }
}

/// The standard verbs of the `pattern` oneof of google.api.HttpRule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Get(String),    // field 2
    Put(String),    // field 3
    Post(String),   // field 4
    Delete(String), // field 5
    Patch(String),  // field 6
}
