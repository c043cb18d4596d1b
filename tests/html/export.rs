//! Export tests for the HTML format (Document → HTML subset)

use crate::common::{example_document, kitchen_sink, text};
use richdown::format::Format;
use richdown::formats::html::HtmlFormat;
use richdown::{Block, Document};

fn doc_to_html(doc: &Document) -> String {
    HtmlFormat.serialize(doc).expect("html serialization never fails")
}

#[test]
fn example_document_html() {
    let html = doc_to_html(&example_document());
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<ul><li>item1<ul><li>subitem</li></ul></li><li>item2</li></ul>"));
    assert!(html.contains("<pre><code class=\"language-python\">print(&#39;hi&#39;)</code></pre>"));
}

#[test]
fn kitchen_sink_survives_an_html_round_trip() {
    let doc = kitchen_sink();
    let html = doc_to_html(&doc);
    assert_eq!(HtmlFormat.parse(&html).unwrap(), doc);
}

#[test]
fn code_block_markup_stays_literal() {
    let doc = Document::new(vec![Block::CodeBlock {
        language: None,
        text: "**not bold** <li>".to_string(),
    }]);
    let html = doc_to_html(&doc);
    assert!(!html.contains("<strong>"));
    assert!(html.contains("**not bold** &lt;li&gt;"));
}

#[test]
fn reserved_characters_are_escaped_once() {
    let doc = Document::new(vec![Block::Paragraph {
        content: vec![text("AT&T says 1 < 2 & \"quotes\"")],
    }]);
    let html = doc_to_html(&doc);
    assert_eq!(
        html,
        "<p>AT&amp;T says 1 &lt; 2 &amp; &quot;quotes&quot;</p>"
    );
}

#[test]
fn already_escaped_entities_are_not_double_encoded() {
    let doc = Document::new(vec![Block::Paragraph {
        content: vec![text("fish &amp; chips")],
    }]);
    assert_eq!(doc_to_html(&doc), "<p>fish &amp; chips</p>");
}

#[test]
fn ordered_flag_comes_from_first_item_at_depth() {
    let doc = Document::new(vec![
        Block::ListItem { depth: 0, ordered: true, content: vec![text("a")] },
        Block::ListItem { depth: 0, ordered: false, content: vec![text("b")] },
    ]);
    // The run opened as <ol>; a later conflicting flag cannot reopen it.
    assert_eq!(doc_to_html(&doc), "<ol><li>a</li><li>b</li></ol>");
}
