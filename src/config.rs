//! Configuration for descriptor generation.

use crate::codegen;
use crate::context::GenerationContext;
use crate::foundation::{FoundationProvider, WellKnownTypes};
use crate::resolver::ReferenceResolver;
use crate::surface::SurfaceModel;
use crate::{Error, Generated};

/// Configuration for descriptor generation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Abort on the first request-parameter placement violation.
    pub(crate) strict_parameters: bool,

    /// Syntax declared by generated files.
    pub(crate) syntax: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_parameters: false,
            syntax: "proto3".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn request-parameter placement violations into
    /// [`Error::InvalidParameter`] instead of diagnostics.
    pub fn strict_parameters(&mut self, strict: bool) -> &mut Self {
        self.strict_parameters = strict;
        self
    }

    /// Set the syntax declared by generated files. Defaults to `proto3`.
    pub fn syntax(&mut self, syntax: impl Into<String>) -> &mut Self {
        self.syntax = syntax.into();
        self
    }

    /// Generate the descriptor set for `model` under `package`, linking
    /// against the well-known `google.api` and `google.protobuf` files.
    pub fn generate(
        &self,
        package: &str,
        model: &SurfaceModel,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Generated, Error> {
        self.generate_with_foundation(package, model, resolver, &WellKnownTypes)
    }

    /// Like [`Config::generate`], with custom foundation files.
    pub fn generate_with_foundation(
        &self,
        package: &str,
        model: &SurfaceModel,
        resolver: &dyn ReferenceResolver,
        foundation: &dyn FoundationProvider,
    ) -> Result<Generated, Error> {
        let mut ctx = GenerationContext::new(self, resolver, foundation);
        let output = codegen::build_file_descriptor_set(&mut ctx, package, model)?;

        Ok(Generated {
            descriptor_set: output.descriptor_set,
            symbolic_sets: output.symbolic_sets,
            diagnostics: ctx.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::new();
        assert!(!config.strict_parameters);
        assert_eq!(config.syntax, "proto3");

        let mut config = Config::new();
        config.strict_parameters(true).syntax("proto2");
        assert!(config.strict_parameters);
        assert_eq!(config.syntax, "proto2");
    }
}
