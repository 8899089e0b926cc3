//! Descriptor generation from surface models.
//!
//! One run builds the target file for a package and everything it links
//! against: the symbolically referenced files (each produced by a nested run),
//! the foundation files, then the target itself, always last.

mod enumeration;
mod field;
mod message;
mod references;
mod service;

pub use service::HttpVerb;

use crate::Error;
use crate::context::GenerationContext;
use crate::descriptor::{FileDescriptorProto, FileDescriptorSet};
use crate::surface::SurfaceModel;

/// The result of one run, before diagnostics are attached.
#[derive(Debug)]
pub(crate) struct Output {
    pub descriptor_set: FileDescriptorSet,
    pub symbolic_sets: Vec<FileDescriptorSet>,
}

/// Build the descriptor set for `model` under `package`.
///
/// Re-entered for every symbolic reference, sharing `ctx`.
pub(crate) fn build_file_descriptor_set(
    ctx: &mut GenerationContext,
    package: &str,
    model: &SurfaceModel,
) -> Result<Output, Error> {
    let _span = tracing::debug_span!("generate", package).entered();

    let mut target = FileDescriptorProto {
        name: Some(format!("{package}.proto")),
        package: Some(package.to_string()),
        syntax: Some(ctx.config.syntax.clone()),
        ..Default::default()
    };

    let foundation = ctx.foundation.files();
    let symbolic = references::build_symbolic_references(ctx, &model.symbolic_references)?;

    message::build_messages(ctx, &mut target, package, model)?;
    let needs_empty = service::build_service(ctx, &mut target, package, model)?;

    let mut descriptor_set = FileDescriptorSet {
        file: symbolic.files,
    };
    descriptor_set.file.extend(foundation);
    descriptor_set.file.push(target);

    let empty_file = ctx.foundation.empty_file();
    add_dependencies(&mut descriptor_set, empty_file, needs_empty);

    tracing::debug!(
        files = descriptor_set.file.len(),
        nested = symbolic.sets.len(),
        "built descriptor set"
    );

    Ok(Output {
        descriptor_set,
        symbolic_sets: symbolic.sets,
    })
}

/// Make the last file of the set import every other file.
///
/// `empty_file` is imported only when `needs_empty` is set. The list is sorted
/// and free of duplicates.
pub(crate) fn add_dependencies(fds: &mut FileDescriptorSet, empty_file: &str, needs_empty: bool) {
    let Some((target, others)) = fds.file.split_last_mut() else {
        return;
    };

    for file in others.iter() {
        let Some(name) = file.name.as_deref() else {
            continue;
        };
        if name == empty_file && !needs_empty {
            continue;
        }
        if target.name.as_deref() == Some(name) {
            continue;
        }
        target.dependency.push(name.to_string());
    }

    target.dependency.sort();
    target.dependency.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_dependencies() {
        let mut fds = FileDescriptorSet {
            file: vec![
                file("common.proto"),
                file("google/api/annotations.proto"),
                file("google/protobuf/empty.proto"),
                file("google/protobuf/descriptor.proto"),
                file("petstore.proto"),
            ],
        };
        add_dependencies(&mut fds, "google/protobuf/empty.proto", false);
        assert_eq!(
            fds.target().unwrap().dependency,
            vec![
                "common.proto",
                "google/api/annotations.proto",
                "google/protobuf/descriptor.proto",
            ]
        );
    }

    #[test]
    fn test_add_dependencies_with_empty() {
        let mut fds = FileDescriptorSet {
            file: vec![
                file("google/protobuf/empty.proto"),
                file("b.proto"),
                file("b.proto"),
                file("a.proto"),
                file("a.proto"),
            ],
        };
        add_dependencies(&mut fds, "google/protobuf/empty.proto", true);
        // Never the target itself, even when a referenced file shares its name.
        assert_eq!(
            fds.target().unwrap().dependency,
            vec!["b.proto", "google/protobuf/empty.proto"]
        );
    }

    #[test]
    fn test_add_dependencies_empty_set() {
        let mut fds = FileDescriptorSet::default();
        add_dependencies(&mut fds, "google/protobuf/empty.proto", true);
        assert!(fds.file.is_empty());
    }
}
