//! Comprehensive tests for hx-html
//!
//! Document and fragment parsing, and serialization of the parsed tree.

use hx_dom::DomTree;
use hx_html::{HtmlParser, get_inner_html, get_outer_html, parse, parse_fragment};

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("");
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
}

#[test]
fn test_parse_malformed_html() {
    let html = r#"
        <div>
            <p>Unclosed paragraph
            <span>Unclosed span
        </div>
        <p>Another paragraph without closing
    "#;

    let doc = HtmlParser::new().parse(html);
    assert!(doc.tree().len() > 1);
    assert_eq!(doc.query_selector_all("p").len(), 2);
}

#[test]
fn test_parse_with_attributes() {
    let doc = parse(r#"<button id="b" class="primary big" hx-get="/test" hx-swap="outerHTML">Go</button>"#);
    let button = doc.get_element_by_id("b").unwrap();
    let tree = doc.tree();

    assert_eq!(tree.attribute(button, "hx-get"), Some("/test"));
    assert_eq!(tree.attribute(button, "hx-swap"), Some("outerHTML"));
    assert!(doc.query_selector(".primary.big").is_some());
}

#[test]
fn test_fragment_multiple_top_level_nodes() {
    let mut tree = DomTree::new();
    let nodes = parse_fragment(&mut tree, "<a id=\"a1\">1</a>text<span>2</span>");

    assert_eq!(nodes.len(), 3);
    assert_eq!(tree.tag_name(nodes[0]), Some("a"));
    assert!(tree.get(nodes[1]).is_some_and(|n| n.is_text()));
    assert_eq!(tree.tag_name(nodes[2]), Some("span"));
}

#[test]
fn test_fragment_keeps_whitespace_text() {
    let mut tree = DomTree::new();
    let nodes = parse_fragment(&mut tree, "<b>x</b> <i>y</i>");
    assert_eq!(nodes.len(), 3);
    assert_eq!(tree.get(nodes[1]).and_then(|n| n.as_text()), Some(" "));
}

#[test]
fn test_empty_fragment() {
    let mut tree = DomTree::new();
    assert!(parse_fragment(&mut tree, "").is_empty());
}

#[test]
fn test_fragment_serializes_back() {
    let mut tree = DomTree::new();
    let markup = "<a hx-get=\"/test2\">Click Me</a>";
    let nodes = parse_fragment(&mut tree, markup);
    assert_eq!(get_outer_html(&tree, nodes[0]), markup);
}

#[test]
fn test_inner_html_of_parsed_document() {
    let doc = parse("<div id=\"d1\"><span>a &amp; b</span></div>");
    let div = doc.get_element_by_id("d1").unwrap();
    assert_eq!(get_inner_html(doc.tree(), div), "<span>a &amp; b</span>");
}
