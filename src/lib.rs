//! `protosurface` compiles API surface models into protobuf descriptor sets
//! annotated for gRPC-HTTP transcoding.
//!
//! A [`SurfaceModel`] describes an API's types and operations. Every type
//! becomes a message, every operation a method of one service whose options
//! carry a `google.api.http` rule. References to other API descriptions are
//! fetched through a [`ReferenceResolver`] and compiled into descriptor sets
//! of their own, which the generated file then imports.
//!
//! # Example
//!
//! ```rust
//! use protosurface::{Error, Field, FieldKind, Method, SurfaceModel, Type};
//!
//! let model = SurfaceModel {
//!     types: vec![Type::new("Pet", vec![Field::new("name", "string", FieldKind::Scalar)])],
//!     methods: vec![Method::new("GET", "/pets", "ListPets").with_responses("Pet")],
//!     symbolic_references: vec![],
//! };
//! let no_references = |url: &str| -> Result<Vec<u8>, Error> {
//!     Err(Error::ResolverFailed { url: url.into(), message: "offline".into() })
//! };
//!
//! let generated = protosurface::generate("petstore", &model, &no_references)?;
//! let target = generated.descriptor_set.target().unwrap();
//! assert_eq!(target.name.as_deref(), Some("petstore.proto"));
//! assert_eq!(target.service[0].name.as_deref(), Some("Petstore"));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Output Layout
//!
//! The returned set lists the files produced for symbolic references first,
//! then the foundation files (`google/api/annotations.proto`,
//! `google/protobuf/empty.proto`, `google/protobuf/descriptor.proto`), and the
//! generated file last. The generated file imports every other file of the
//! set, in sorted order; `google/protobuf/empty.proto` only when some method
//! has no request or response type.
//!
//! # Resolving References
//!
//! ```rust,no_run
//! use protosurface::{CommandResolver, Config, SurfaceModel};
//! use std::time::Duration;
//!
//! fn main() -> Result<(), protosurface::Error> {
//!     let mut resolver = CommandResolver::find("gnostic")?;
//!     resolver.arg("--surface-out=-").timeout(Some(Duration::from_secs(30)));
//!
//!     let model = SurfaceModel::default();
//!     let generated = Config::new()
//!         .strict_parameters(true)
//!         .generate("petstore", &model, &resolver)?;
//!     for nested in &generated.symbolic_sets {
//!         println!("{:?}", nested.target().and_then(|f| f.name.as_deref()));
//!     }
//!     Ok(())
//! }
//! ```

mod codegen;
mod config;
mod context;
pub mod descriptor;
mod diagnostic;
mod error;
pub mod foundation;
mod resolver;
mod scalar;
pub mod surface;
mod wire;

pub use codegen::HttpVerb;
pub use config::Config;
pub use diagnostic::Diagnostic;
pub use error::{DecodeError, Error};
pub use foundation::{FoundationProvider, WellKnownTypes};
pub use resolver::{CommandResolver, ReferenceResolver};
pub use scalar::scalar_type;
pub use surface::{Field, FieldKind, Method, Position, SurfaceModel, Type, decode_surface_model};

use descriptor::FileDescriptorSet;

/// The output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The generated file, last, preceded by everything it imports.
    pub descriptor_set: FileDescriptorSet,
    /// The complete sets built for symbolic references. A set built for a
    /// reference of a referenced document precedes that document's set.
    pub symbolic_sets: Vec<FileDescriptorSet>,
    /// Non-fatal findings of the whole run.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate the descriptor set for `model` with default settings.
pub fn generate(
    package: &str,
    model: &SurfaceModel,
    resolver: &dyn ReferenceResolver,
) -> Result<Generated, Error> {
    Config::new().generate(package, model, resolver)
}
