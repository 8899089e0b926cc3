//! Message descriptors for surface types.

use super::{enumeration, field};
use crate::Error;
use crate::context::GenerationContext;
use crate::descriptor::{DescriptorProto, FileDescriptorProto};
use crate::surface::{FieldKind, SurfaceModel, Type};

/// Add a message for every type of `model` to `file`, registering each one
/// in the run registry once built.
pub(crate) fn build_messages(
    ctx: &mut GenerationContext,
    file: &mut FileDescriptorProto,
    package: &str,
    model: &SurfaceModel,
) -> Result<(), Error> {
    for ty in &model.types {
        let message = build_message(ctx, package, ty)?;
        file.message_type.push(message);
        ctx.register_message(&ty.name, package);
    }
    Ok(())
}

fn build_message(
    ctx: &mut GenerationContext,
    package: &str,
    ty: &Type,
) -> Result<DescriptorProto, Error> {
    let mut message = DescriptorProto::new(&ty.name);
    let is_request_parameter = ty.is_request_parameter();

    for (index, f) in ty.fields.iter().enumerate() {
        if is_request_parameter {
            if let Some(diagnostic) = field::check_placement(&ty.name, f) {
                ctx.report(diagnostic)?;
            }
        }

        if let Some(enum_type) = enumeration::build_enum(f) {
            if message.enum_type.iter().any(|e| e.name == enum_type.name) {
                tracing::debug!(message = %ty.name, field = %f.name, "enum already declared");
            } else {
                message.enum_type.push(enum_type);
            }
        }

        // Numbers follow declaration order, including omitted fields.
        let number = index as i32 + 1;

        if f.kind == FieldKind::Map && f.is_map_of_array() {
            tracing::debug!(
                message = %ty.name,
                field = %f.name,
                native_type = %f.native_type,
                "skipping map of arrays"
            );
            continue;
        }

        let mut descriptor = field::build_field(ctx, package, f, number);
        if f.kind == FieldKind::Map {
            let entry = field::build_map_entry(f);
            descriptor.type_name = entry.name.clone();
            message.nested_type.push(entry);
        }
        message.field.push(descriptor);
    }

    Ok(message)
}
