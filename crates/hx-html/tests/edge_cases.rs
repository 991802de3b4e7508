//! Edge case tests for hx-html
//!
//! Fragments the swap path actually receives: stray closing tags, table rows
//! out of context, entities and script bodies.

use hx_dom::DomTree;
use hx_html::{HtmlParser, get_inner_html, get_outer_html, parse_fragment};

fn roundtrip(markup: &str) -> String {
    let mut tree = DomTree::new();
    let holder = tree.create_element("div");
    for node in parse_fragment(&mut tree, markup) {
        tree.append_child(holder, node).unwrap();
    }
    get_inner_html(&tree, holder)
}

#[test]
fn test_stray_end_tag_dropped() {
    assert_eq!(roundtrip("<b>bold</b></i>tail"), "<b>bold</b>tail");
}

#[test]
fn test_unclosed_tags_are_closed() {
    assert_eq!(roundtrip("<p>one<p>two"), "<p>one</p><p>two</p>");
}

#[test]
fn test_entities_decoded_then_escaped() {
    let mut tree = DomTree::new();
    let nodes = parse_fragment(&mut tree, "a &amp; b &lt;c&gt;");
    assert_eq!(nodes.len(), 1);
    assert_eq!(tree.text_content(nodes[0]), "a & b <c>");
    assert_eq!(roundtrip("a &amp; b &lt;c&gt;"), "a &amp; b &lt;c&gt;");
}

#[test]
fn test_attribute_quotes_escaped() {
    assert_eq!(
        roundtrip(r#"<span title='say "hi"'>x</span>"#),
        r#"<span title="say &quot;hi&quot;">x</span>"#
    );
}

#[test]
fn test_script_body_kept_raw() {
    assert_eq!(roundtrip("<script>if (a < b) {}</script>"), "<script>if (a < b) {}</script>");
}

#[test]
fn test_void_element_in_fragment() {
    assert_eq!(roundtrip("line<br/>next"), "line<br>next");
}

#[test]
fn test_boolean_attribute() {
    assert_eq!(roundtrip("<input disabled>"), "<input disabled>");
}

#[test]
fn test_comment_survives() {
    assert_eq!(roundtrip("<!-- note --><em>x</em>"), "<!-- note --><em>x</em>");
}

#[test]
fn test_outer_html_of_fragment_root() {
    let mut tree = DomTree::new();
    let nodes = parse_fragment(&mut tree, r#"<div id="d1" class="a b"><i>x</i></div>"#);
    assert_eq!(get_outer_html(&tree, nodes[0]), r#"<div id="d1" class="a b"><i>x</i></div>"#);
}

#[test]
fn test_document_without_body_gets_one() {
    let doc = HtmlParser::new().parse("<title>t</title>hello");
    let title = doc.query_selector("head title").unwrap();
    assert_eq!(doc.text_content(title), "t");
    assert_eq!(doc.text_content(doc.body()), "hello");
}
