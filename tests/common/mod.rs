//! Helpers for hand-encoding surface documents.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use protosurface::{Error, FieldKind, Position, SurfaceModel};

fn len_field(out: &mut Vec<u8>, tag: u64, payload: &[u8]) {
    leb128::write::unsigned(out, (tag << 3) | 2).unwrap();
    leb128::write::unsigned(out, payload.len() as u64).unwrap();
    out.extend_from_slice(payload);
}

fn varint_field(out: &mut Vec<u8>, tag: u64, value: u64) {
    leb128::write::unsigned(out, tag << 3).unwrap();
    leb128::write::unsigned(out, value).unwrap();
}

/// Encode `model` as a binary surface document.
pub fn encode_model(model: &SurfaceModel) -> Vec<u8> {
    let mut out = Vec::new();

    for ty in &model.types {
        let mut t = Vec::new();
        len_field(&mut t, 1, ty.name.as_bytes());
        len_field(&mut t, 3, ty.description.as_bytes());
        for field in &ty.fields {
            let mut f = Vec::new();
            len_field(&mut f, 7, field.name.as_bytes());
            let kind = match field.kind {
                FieldKind::Scalar => 0,
                FieldKind::Map => 1,
                FieldKind::Array => 2,
                FieldKind::Reference => 3,
            };
            varint_field(&mut f, 3, kind);
            let position = match field.position {
                Some(Position::Body) => 0,
                None => 1,
                Some(Position::Query) => 3,
                Some(Position::Path) => 4,
            };
            varint_field(&mut f, 5, position);
            len_field(&mut f, 6, field.native_type.as_bytes());
            for literal in field.enum_values.iter().flatten() {
                len_field(&mut f, 10, literal.as_bytes());
            }
            len_field(&mut t, 5, &f);
        }
        len_field(&mut out, 2, &t);
    }

    for method in &model.methods {
        let mut m = Vec::new();
        len_field(&mut m, 2, method.path.as_bytes());
        len_field(&mut m, 3, method.method.as_bytes());
        len_field(&mut m, 6, method.handler_name.as_bytes());
        len_field(&mut m, 9, method.parameters_type_name.as_bytes());
        len_field(&mut m, 10, method.responses_type_name.as_bytes());
        len_field(&mut out, 3, &m);
    }

    for reference in &model.symbolic_references {
        len_field(&mut out, 4, reference.as_bytes());
    }

    out
}

/// An in-memory resolver that records every URL it is asked for.
#[derive(Default)]
pub struct Documents {
    documents: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl Documents {
    pub fn with(mut self, url: &str, model: &SurfaceModel) -> Self {
        self.documents.insert(url.to_string(), encode_model(model));
        self
    }

    pub fn with_bytes(mut self, url: &str, bytes: &[u8]) -> Self {
        self.documents.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl protosurface::ReferenceResolver for Documents {
    fn resolve(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.requests.borrow_mut().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| Error::ResolverFailed {
                url: url.to_string(),
                message: "no such document".into(),
            })
    }
}

/// A resolver for models without references.
pub fn offline(url: &str) -> Result<Vec<u8>, Error> {
    Err(Error::ResolverFailed {
        url: url.to_string(),
        message: "offline".into(),
    })
}
