//! Run-scoped generation state.

use std::collections::{HashMap, HashSet};

use crate::Error;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::foundation::FoundationProvider;
use crate::resolver::ReferenceResolver;

/// State shared by every stage of one generation run, including the
/// recursive runs for symbolically referenced documents.
///
/// Owned by the top-level call; independent runs never share a context.
pub struct GenerationContext<'a> {
    /// The configuration.
    pub config: &'a Config,
    /// Fetches symbolically referenced documents.
    pub resolver: &'a dyn ReferenceResolver,
    /// Supplies the well-known files.
    pub foundation: &'a dyn FoundationProvider,
    /// Reference URLs (without fragment) already resolved in this run.
    pub resolved_references: HashSet<String>,
    /// Map from bare message name -> fully-qualified name, for every message
    /// generated so far in this run.
    pub generated_messages: HashMap<String, String>,
    /// Findings collected across the whole run.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    /// Create a new generation context.
    pub fn new(
        config: &'a Config,
        resolver: &'a dyn ReferenceResolver,
        foundation: &'a dyn FoundationProvider,
    ) -> Self {
        Self {
            config,
            resolver,
            foundation,
            resolved_references: HashSet::new(),
            generated_messages: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Mark `url` as resolved. Returns `false` if it already was.
    pub fn mark_resolved(&mut self, url: &str) -> bool {
        self.resolved_references.insert(url.to_string())
    }

    /// Register a generated message under its bare name.
    pub fn register_message(&mut self, name: &str, package: &str) {
        self.generated_messages
            .insert(name.to_string(), format!("{package}.{name}"));
    }

    /// Fully-qualified name for a message referenced as `name` from
    /// `package`: the registered name if one exists, else `<package>.<name>`.
    pub fn qualified_message_name(&self, name: &str, package: &str) -> String {
        match self.generated_messages.get(name) {
            Some(qualified) => qualified.clone(),
            None => format!("{package}.{name}"),
        }
    }

    /// Record a finding. In strict mode, parameter findings abort the run.
    pub fn report(&mut self, diagnostic: Diagnostic) -> Result<(), Error> {
        tracing::warn!("{diagnostic}");
        let is_parameter = matches!(
            diagnostic,
            Diagnostic::PathParameter { .. } | Diagnostic::QueryParameter { .. }
        );
        if is_parameter && self.config.strict_parameters {
            return Err(Error::InvalidParameter(diagnostic));
        }
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}
