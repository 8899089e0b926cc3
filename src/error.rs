//! Error types for protosurface.

use std::io;
use std::time::Duration;

use crate::diagnostic::Diagnostic;

/// Errors that abort a generation run.
///
/// Every variant is fatal: the run unwinds, including any in-flight recursive
/// resolution of a symbolic reference. Non-fatal findings are reported as
/// [`Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while talking to the reference resolver.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The reference resolver program could not be located.
    #[error("reference resolver '{0}' not found. Set SURFACE_RESOLVER or install it.")]
    ResolverNotFound(String),
    /// The reference resolver failed for a URL.
    #[error("failed to resolve '{url}': {message}")]
    ResolverFailed { url: String, message: String },
    /// The reference resolver did not finish in time.
    #[error("resolving '{url}' timed out after {}s", .timeout.as_secs())]
    ResolverTimeout { url: String, timeout: Duration },
    /// The document returned for a URL could not be decoded.
    #[error("failed to decode surface document for '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: DecodeError,
    },
    /// An option extension could not be attached.
    #[error("invalid extension: {0}")]
    Extension(String),
    /// A request parameter violates its placement rules (strict mode only).
    #[error("invalid request parameter: {0}")]
    InvalidParameter(Diagnostic),
}

/// Errors from decoding a binary surface document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of buffer")]
    UnexpectedEof,
    /// A varint was longer than ten bytes.
    #[error("invalid leb128 varint")]
    InvalidVarint,
    /// A key carried an unknown or unsupported wire type.
    #[error("invalid 'wire type' value: {0}")]
    InvalidWireType(u8),
    /// A string field was not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
    /// A length prefix exceeded the maximum message size.
    #[error("length prefix {0} exceeds maximum message size")]
    LengthOverflow(u64),
    /// An enum field carried a value outside its declared range.
    #[error("invalid value {value} for enum '{name}'")]
    InvalidEnum { name: &'static str, value: u64 },
}

impl DecodeError {
    /// Whether the input simply stopped early.
    ///
    /// Resolvers may emit no content at all for some inputs, which decodes as
    /// a truncated document rather than an empty one.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEof)
    }
}

impl From<leb128::read::Error> for DecodeError {
    fn from(e: leb128::read::Error) -> Self {
        match e {
            // Reading from a slice only fails when it runs dry.
            leb128::read::Error::IoError(_) => DecodeError::UnexpectedEof,
            leb128::read::Error::Overflow => DecodeError::InvalidVarint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leb128_eof_maps_to_unexpected_eof() {
        let mut buf: &[u8] = &[0x80];
        let err = leb128::read::unsigned(&mut buf).unwrap_err();
        assert!(DecodeError::from(err).is_unexpected_eof());
    }

    #[test]
    fn leb128_overflow_maps_to_invalid_varint() {
        // The tenth byte may only carry bit 63.
        let mut buf: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        let err = leb128::read::unsigned(&mut buf).unwrap_err();
        assert_eq!(DecodeError::from(err), DecodeError::InvalidVarint);
    }
}
