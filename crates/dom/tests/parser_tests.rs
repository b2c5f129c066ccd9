// ABOUTME: Integration tests for XML/HTML parsing and round-trip serialization.
// ABOUTME: Covers whitespace policy, failure modes, and structural equality after re-parse.

use pretty_assertions::assert_eq;
use xmlkit_dom::{parse_html, parse_xml, Node, ParseError};

/// Structural equality: names, attribute sets, child order, and text.
fn assert_structurally_equal(a: Node<'_>, b: Node<'_>) {
    assert_eq!(a.name(), b.name());
    assert_eq!(a.text(), b.text(), "text differs under <{:?}>", a.name());

    let mut attrs_a: Vec<(&str, &str)> = a.attributes().collect();
    let mut attrs_b: Vec<(&str, &str)> = b.attributes().collect();
    attrs_a.sort();
    attrs_b.sort();
    assert_eq!(attrs_a, attrs_b, "attributes differ under <{:?}>", a.name());

    let children_a: Vec<Node<'_>> = a.children().collect();
    let children_b: Vec<Node<'_>> = b.children().collect();
    assert_eq!(
        children_a.len(),
        children_b.len(),
        "child count differs under <{:?}>",
        a.name()
    );
    for (ca, cb) in children_a.into_iter().zip(children_b) {
        assert_structurally_equal(ca, cb);
    }
}

#[test]
fn test_parse_basic_document() {
    let doc = parse_xml("<a><b/></a>").unwrap();
    let root = doc.root().unwrap();

    assert_eq!(root.name(), Some("a"));
    assert!(root.parent().is_none(), "root must have no parent");

    let children: Vec<_> = root.children().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name(), Some("b"));
    assert_eq!(children[0].children().count(), 0);
    assert_eq!(children[0].text(), None);
}

#[test]
fn test_parse_failures() {
    // Mismatched close tag
    let err = parse_xml("<a><b></a>").unwrap_err();
    assert!(matches!(err, ParseError::Malformed(_)), "got {err:?}");

    // Empty and whitespace-only input
    assert_eq!(parse_xml(""), Err(ParseError::EmptyInput));
    assert_eq!(parse_xml("  \n "), Err(ParseError::EmptyInput));

    // Unclosed element at end of input
    let err = parse_xml("<a><b></b>").unwrap_err();
    assert!(matches!(err, ParseError::Malformed(_)), "got {err:?}");
}

#[test]
fn test_attr_coercion_and_whitespace_trimming() {
    let input = "<root attr=\"5\"><child>  42  </child></root>";

    let doc = parse_xml(input).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.num_attr("attr"), Some(5.0));
    assert_eq!(root.child_named("child").unwrap().text(), Some("42"));

    // html mode keeps the surrounding whitespace verbatim
    let doc = parse_html(input).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.child_named("child").unwrap().text(), Some("  42  "));
}

#[test]
fn test_round_trip_is_structurally_equal() {
    let input = r#"<catalog version="2" active="yes">
        <entry id="1"><title>First &amp; foremost</title><flag/></entry>
        <entry id="2">
            <title>Second</title>
        </entry>
        <note>a &lt; b</note>
    </catalog>"#;

    let first = parse_xml(input).unwrap();
    let serialized = first.root().unwrap().xml();
    let second = parse_xml(&serialized).unwrap();

    assert_structurally_equal(first.root().unwrap(), second.root().unwrap());

    // Serialization is deterministic
    assert_eq!(serialized, second.root().unwrap().xml());
}

#[test]
fn test_round_trip_of_pretty_output() {
    let input = "<a><b><c>text</c></b><d/></a>";
    let doc = parse_xml(input).unwrap();
    let pretty = doc.root().unwrap().pretty_xml();

    let reparsed = parse_xml(&pretty).unwrap();
    assert_structurally_equal(doc.root().unwrap(), reparsed.root().unwrap());
}

#[test]
fn test_both_empty_element_forms_parse_alike() {
    let collapsed = parse_xml("<a><b/></a>").unwrap();
    let expanded = parse_xml("<a><b></b></a>").unwrap();
    assert_structurally_equal(collapsed.root().unwrap(), expanded.root().unwrap());

    // And the serializer picks the self-closing form
    assert_eq!(expanded.root().unwrap().xml(), "<a><b/></a>");
}

#[test]
fn test_escaped_content_survives_round_trip() {
    let doc = parse_xml(r#"<m q="a &amp; &quot;b&quot;">x &lt; y &gt; z</m>"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.attr("q"), Some(r#"a & "b""#));
    assert_eq!(root.text(), Some("x < y > z"));

    let reparsed = parse_xml(&root.xml()).unwrap();
    assert_structurally_equal(root, reparsed.root().unwrap());
}

#[test]
fn test_whitespace_only_text_contributes_nothing() {
    let doc = parse_xml("<a>\n    <b>x</b>\n</a>").unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.text(), None);
    assert_eq!(root.child_named("b").unwrap().text(), Some("x"));
}

#[test]
fn test_html_mode_preserves_text_verbatim() {
    let doc = parse_html("<pre>  keep\n  this  </pre>").unwrap();
    assert_eq!(doc.root().unwrap().text(), Some("  keep\n  this  "));
}

#[test]
fn test_child_xml_returns_inner_markup() {
    let doc = parse_xml("<outer><inner>v</inner><inner2/></outer>").unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.child_xml(), "<inner>v</inner><inner2/>");
    assert_eq!(root.xml(), "<outer><inner>v</inner><inner2/></outer>");
}

#[test]
fn test_prolog_comments_and_doctype_are_skipped() {
    let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE note>\n<!-- c -->\n<note>hi</note>";
    let doc = parse_xml(input).unwrap();
    assert_eq!(doc.root().unwrap().name(), Some("note"));
    assert_eq!(doc.root().unwrap().text(), Some("hi"));
}

#[test]
fn test_deeply_nested_structure() {
    let mut input = String::new();
    for i in 0..50 {
        input.push_str(&format!("<n{i}>"));
    }
    for i in (0..50).rev() {
        input.push_str(&format!("</n{i}>"));
    }

    let doc = parse_xml(&input).unwrap();
    let mut node = doc.root().unwrap();
    let mut depth = 1;
    while let Some(child) = node.first_child() {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, 50);
    assert_eq!(node.name(), Some("n49"));
}
