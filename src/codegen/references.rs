//! Resolution of symbolic references to other API descriptions.

use crate::Error;
use crate::context::GenerationContext;
use crate::descriptor::{FileDescriptorProto, FileDescriptorSet};
use crate::surface::{SurfaceModel, decode_surface_model};

/// Everything produced for the references of one run.
#[derive(Debug, Default)]
pub(crate) struct SymbolicReferences {
    /// Nested descriptor sets, each preceded by its own nested sets.
    pub sets: Vec<FileDescriptorSet>,
    /// The target file of every directly referenced set, in reference order.
    pub files: Vec<FileDescriptorProto>,
}

/// Resolve each reference not yet seen in this run and generate its
/// descriptor set.
pub(crate) fn build_symbolic_references(
    ctx: &mut GenerationContext,
    urls: &[String],
) -> Result<SymbolicReferences, Error> {
    let mut out = SymbolicReferences::default();

    for url in normalize(urls) {
        if !ctx.mark_resolved(url) {
            tracing::debug!(url, "reference already resolved in this run");
            continue;
        }

        tracing::info!(url, "resolving symbolic reference");
        let document = ctx.resolver.resolve(url)?;
        let model = decode_document(url, &document)?;

        let package = package_for_reference(url);
        let nested = super::build_file_descriptor_set(ctx, &package, &model)?;

        if let Some(target) = nested.descriptor_set.target() {
            out.files.push(target.clone());
        }
        out.sets.extend(nested.symbolic_sets);
        out.sets.push(nested.descriptor_set);
    }

    Ok(out)
}

/// Drop `#fragment` suffixes and duplicates, keeping first-seen order.
pub(crate) fn normalize(urls: &[String]) -> Vec<&str> {
    let mut result: Vec<&str> = Vec::with_capacity(urls.len());
    for url in urls {
        let trimmed = url.split('#').next().unwrap_or(url);
        if result.contains(&trimmed) {
            tracing::debug!(url = %url, "skipping duplicate reference");
            continue;
        }
        result.push(trimmed);
    }
    result
}

/// A resolver may print nothing at all for a document, which reads as a
/// truncated message. That case is an empty model.
fn decode_document(url: &str, document: &[u8]) -> Result<SurfaceModel, Error> {
    match decode_surface_model(document) {
        Ok(model) => Ok(model),
        Err(e) if e.is_unexpected_eof() => {
            tracing::debug!(url, "document ended early, treating it as empty");
            Ok(SurfaceModel::default())
        }
        Err(source) => Err(Error::Decode {
            url: url.to_string(),
            source,
        }),
    }
}

/// Package for a referenced document: its file name without extension.
pub(crate) fn package_for_reference(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    match base.rfind('.') {
        Some(dot) => base[..dot].to_string(),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let urls = vec![
            "https://example.com/common.yaml#/components/schemas/Error".to_string(),
            "https://example.com/pets.yaml".to_string(),
            "https://example.com/common.yaml#/components/schemas/Pet".to_string(),
            "https://example.com/common.yaml".to_string(),
        ];
        assert_eq!(
            normalize(&urls),
            vec!["https://example.com/common.yaml", "https://example.com/pets.yaml"]
        );
    }

    #[test]
    fn test_package_for_reference() {
        assert_eq!(package_for_reference("https://example.com/api/common.yaml"), "common");
        assert_eq!(package_for_reference("shared/errors.v1.json"), "errors.v1");
        assert_eq!(package_for_reference("https://example.com/specs/"), "specs");
        assert_eq!(package_for_reference("local"), "local");
    }

    #[test]
    fn test_decode_document() {
        assert_eq!(decode_document("a", &[]).unwrap(), SurfaceModel::default());
        // A length-delimited type record cut short.
        assert_eq!(decode_document("a", &[0x12, 0x05]).unwrap(), SurfaceModel::default());
        // Group wire types are rejected (field 15, start group).
        assert!(matches!(
            decode_document("a", &[0x7B]),
            Err(Error::Decode { .. })
        ));
    }
}
