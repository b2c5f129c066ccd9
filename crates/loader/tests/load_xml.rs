// ABOUTME: Integration tests for loading and parsing documents over HTTP.
// ABOUTME: Exercises the loader-to-parser handoff against a mock server.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use xmlkit_loader::{LoadError, Loader};

#[tokio::test]
async fn load_xml_builds_a_tree_from_the_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/records/42");
        then.status(200)
            .header("content-type", "application/xml; charset=utf-8")
            .body(
                "<record id=\"42\" signed=\"yes\">\n  <label>Immunization</label>\n  <count>3</count>\n</record>",
            );
    });

    let loader = Loader::new(server.url("/records/42")).unwrap();
    let doc = loader.load_xml().await.expect("load_xml should succeed");
    mock.assert();

    let root = doc.root().unwrap();
    assert_eq!(root.name(), Some("record"));
    assert_eq!(root.num_attr("id"), Some(42.0));
    assert!(root.bool_attr("signed"));
    assert_eq!(root.child_named("label").unwrap().text(), Some("Immunization"));
    assert_eq!(root.child_named("count").unwrap().num_attr("missing"), None);
    assert_eq!(root.children().count(), 2);
}

#[tokio::test]
async fn load_xml_surfaces_parse_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(200).body("<a><b></a>");
    });

    let loader = Loader::new(server.url("/broken")).unwrap();
    let err = loader.load_xml().await.expect_err("malformed body must fail");
    assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");
    assert!(!err.is_cancelled());
}

#[tokio::test]
async fn load_xml_rejects_empty_responses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/empty");
        then.status(200).body("");
    });

    let loader = Loader::new(server.url("/empty")).unwrap();
    let err = loader.load_xml().await.expect_err("empty body must fail");
    assert!(
        matches!(err, LoadError::Parse(xmlkit_dom::ParseError::EmptyInput)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn loaded_tree_serializes_back_to_equivalent_xml() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/doc");
        then.status(200).body("<root><item n=\"1\"/><item n=\"2\"/></root>");
    });

    let loader = Loader::new(server.url("/doc")).unwrap();
    let doc = loader.load_xml().await.expect("load_xml should succeed");

    let serialized = doc.root().unwrap().xml();
    assert_eq!(serialized, "<root><item n=\"1\"/><item n=\"2\"/></root>");

    // Re-submitting what we serialized would parse to the same structure
    let reparsed = xmlkit_dom::parse_xml(&serialized).unwrap();
    assert_eq!(reparsed.root().unwrap().children_named("item").count(), 2);
}
