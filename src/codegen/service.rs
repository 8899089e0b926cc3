//! The service descriptor and its HTTP transcoding rules.

use std::collections::HashSet;

use crate::Error;
use crate::context::GenerationContext;
use crate::descriptor::{
    DescriptorProto, FileDescriptorProto, HttpRule, MethodDescriptorProto, MethodOptions, Pattern,
    ServiceDescriptorProto,
};
use crate::diagnostic::Diagnostic;
use crate::surface::{SurfaceModel, Type};

/// An HTTP verb of a surface method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    /// Any verb without a transcoding pattern.
    Unrecognized(String),
}

impl HttpVerb {
    /// Parse an upper-case verb such as `GET`.
    pub fn parse(verb: &str) -> Self {
        match verb {
            "GET" => HttpVerb::Get,
            "POST" => HttpVerb::Post,
            "PUT" => HttpVerb::Put,
            "PATCH" => HttpVerb::Patch,
            "DELETE" => HttpVerb::Delete,
            other => HttpVerb::Unrecognized(other.to_string()),
        }
    }

    /// The transcoding pattern for `path`, `None` when unrecognized.
    pub fn pattern(&self, path: &str) -> Option<Pattern> {
        let path = path.to_string();
        match self {
            HttpVerb::Get => Some(Pattern::Get(path)),
            HttpVerb::Post => Some(Pattern::Post(path)),
            HttpVerb::Put => Some(Pattern::Put(path)),
            HttpVerb::Patch => Some(Pattern::Patch(path)),
            HttpVerb::Delete => Some(Pattern::Delete(path)),
            HttpVerb::Unrecognized(_) => None,
        }
    }
}

/// Add the package's service to `file`, one method per surface method.
///
/// Returns whether any method fell back to the empty type.
pub(crate) fn build_service(
    ctx: &mut GenerationContext,
    file: &mut FileDescriptorProto,
    package: &str,
    model: &SurfaceModel,
) -> Result<bool, Error> {
    let name = find_service_name(&file.message_type, &title_case(package));
    let extension = ctx.foundation.http_extension();
    let mut service = ServiceDescriptorProto {
        name: Some(name),
        method: Vec::with_capacity(model.methods.len()),
    };
    let mut needs_empty = false;

    for method in &model.methods {
        let verb = HttpVerb::parse(&method.method);
        if let HttpVerb::Unrecognized(v) = &verb {
            ctx.report(Diagnostic::UnrecognizedVerb {
                method: method.handler_name.clone(),
                verb: v.clone(),
            })?;
        }

        let body = model
            .find_type(&method.parameters_type_name)
            .and_then(Type::body_field)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        let rule = HttpRule {
            pattern: verb.pattern(&method.path),
            body,
            ..Default::default()
        };

        let mut options = MethodOptions::default();
        options.set_http_rule(&extension, rule)?;

        let mut resolve = |type_name: &str| {
            if type_name.is_empty() {
                needs_empty = true;
                ctx.foundation.empty_type().to_string()
            } else {
                ctx.qualified_message_name(type_name, package)
            }
        };
        let input_type = resolve(&method.parameters_type_name);
        let output_type = resolve(&method.responses_type_name);

        service.method.push(MethodDescriptorProto {
            name: Some(method.handler_name.clone()),
            input_type: Some(input_type),
            output_type: Some(output_type),
            options: Some(options),
        });
    }

    file.service = vec![service];
    Ok(needs_empty)
}

/// First name in `base`, `baseService`, `baseService1`, `baseService2`, ...
/// not taken by a message.
pub(crate) fn find_service_name(messages: &[DescriptorProto], base: &str) -> String {
    let taken: HashSet<&str> = messages.iter().filter_map(|m| m.name.as_deref()).collect();

    if !taken.contains(base) {
        return base.to_string();
    }
    let mut candidate = format!("{base}Service");
    let mut counter = 1;
    while taken.contains(candidate.as_str()) {
        candidate = format!("{base}Service{counter}");
        counter += 1;
    }
    candidate
}

/// Upper-case the first letter of every word.
///
/// Letters, digits and underscores continue a word; anything else separates
/// words.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = ' ';
    for c in s.chars() {
        if is_separator(prev) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}
