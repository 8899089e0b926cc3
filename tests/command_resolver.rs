//! Integration tests for the subprocess reference resolver.

#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use common::encode_model;
use protosurface::{CommandResolver, Error, Field, FieldKind, ReferenceResolver, SurfaceModel, Type};

#[test]
fn test_reads_document_from_stdout() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("inventory.yaml");
    let document = SurfaceModel {
        types: vec![Type::new("Item", vec![Field::new("sku", "string", FieldKind::Scalar)])],
        ..Default::default()
    };
    std::fs::write(&path, encode_model(&document)).expect("Failed to write document");

    // `cat <url>` prints the document.
    let resolver = CommandResolver::new("cat");
    let url = path.to_str().unwrap().to_string();
    assert_eq!(resolver.resolve(&url).unwrap(), encode_model(&document));

    let model = SurfaceModel {
        types: vec![Type::new("Order", vec![Field::new("item", "Item", FieldKind::Reference)])],
        symbolic_references: vec![format!("{url}#/components/schemas/Item")],
        ..Default::default()
    };
    let generated = protosurface::generate("orders", &model, &resolver).unwrap();

    let inventory = generated.symbolic_sets[0].target().unwrap();
    assert_eq!(inventory.name.as_deref(), Some("inventory.proto"));
    assert!(inventory.find_message("Item").is_some());

    let item = generated
        .descriptor_set
        .target()
        .unwrap()
        .find_message("Order")
        .unwrap()
        .find_field("item")
        .unwrap();
    assert_eq!(item.type_name.as_deref(), Some("inventory.Item"));
}

#[test]
fn test_failure_reports_stderr() {
    let mut resolver = CommandResolver::new("sh");
    // The URL becomes `$0`.
    resolver.arg("-c").arg("echo \"cannot fetch $0\" >&2; exit 3");

    let err = resolver.resolve("https://example.com/missing.yaml").unwrap_err();
    match err {
        Error::ResolverFailed { url, message } => {
            assert_eq!(url, "https://example.com/missing.yaml");
            assert!(message.contains("cannot fetch https://example.com/missing.yaml"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_timeout_kills_resolver() {
    let mut resolver = CommandResolver::new("sleep");
    resolver.timeout(Some(Duration::from_millis(200)));

    let start = Instant::now();
    let err = resolver.resolve("30").unwrap_err();
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(matches!(
        err,
        Error::ResolverTimeout { ref url, timeout }
            if url == "30" && timeout == Duration::from_millis(200)
    ));
}

#[test]
fn test_timeout_covers_inherited_pipes() {
    // The shell exits at once but leaves `sleep` holding stdout open.
    let mut resolver = CommandResolver::new("sh");
    resolver
        .arg("-c")
        .arg("sleep \"$0\" & echo doc")
        .timeout(Some(Duration::from_millis(200)));

    let start = Instant::now();
    let err = resolver.resolve("5").unwrap_err();
    assert!(start.elapsed() < Duration::from_secs(2), "{:?}", start.elapsed());
    assert!(matches!(err, Error::ResolverTimeout { ref url, .. } if url == "5"));
}

#[test]
fn test_large_output() {
    // More than a pipe buffer's worth of output.
    let mut resolver = CommandResolver::new("sh");
    resolver.arg("-c").arg("yes surface | head -c \"$0\"");
    let document = resolver.resolve("300000").unwrap();
    assert_eq!(document.len(), 300_000);
}

#[test]
fn test_find_missing_program() {
    if std::env::var_os("SURFACE_RESOLVER").is_some() {
        return;
    }
    let err = CommandResolver::find("protosurface-no-such-resolver").unwrap_err();
    assert!(matches!(
        err,
        Error::ResolverNotFound(ref name) if name == "protosurface-no-such-resolver"
    ));

    let resolver = CommandResolver::find("sh").unwrap();
    assert!(resolver.program().ends_with("sh"));
}
