//! Tree preparation: parsing, element removal and line-break injection

use scraper::node::Text;
use scraper::{Html, Node};

/// Elements removed together with their whole subtree
pub const REMOVED_ELEMENTS: &[&str] = &["style", "script"];

/// Elements that get an explicit newline appended as their last child
pub const STRUCTURAL_ELEMENTS: &[&str] = &["div", "p", "br", "tr", "li"];

/// Parse markup and run both tree passes.
///
/// Removal runs first so that no newline is ever injected into a subtree
/// that is about to be discarded.
pub fn prepare(markup: &str) -> Html {
    let mut document = Html::parse_document(markup);
    remove_elements(&mut document, REMOVED_ELEMENTS);
    inject_line_breaks(&mut document, STRUCTURAL_ELEMENTS);
    document
}

/// Detach every element named in `names`, including nested ones.
pub fn remove_elements(document: &mut Html, names: &[&str]) {
    let ids: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter(|node| is_named(node.value(), names))
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Append a `"\n"` text node to every attached element named in `names`.
pub fn inject_line_breaks(document: &mut Html, names: &[&str]) {
    let ids: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter(|node| is_named(node.value(), names))
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.append(Node::Text(Text { text: "\n".into() }));
        }
    }
}

fn is_named(node: &Node, names: &[&str]) -> bool {
    node.as_element()
        .map(|element| names.contains(&element.name()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(document: &Html) -> String {
        document.root_element().text().collect()
    }

    #[test]
    fn test_removes_style_and_script() {
        let document = prepare(
            "<html><head><style>.a { color: red }</style></head>\
             <body><p>Keep</p><script>var x = 1;</script></body></html>",
        );
        let text = text_of(&document);
        assert!(text.contains("Keep"));
        assert!(!text.contains("color"));
        assert!(!text.contains("var x"));
    }

    #[test]
    fn test_removes_nested_script() {
        let document = prepare("<div><span><b><script>secret()</script>shown</b></span></div>");
        let text = text_of(&document);
        assert!(text.contains("shown"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_injects_newline_after_structural_elements() {
        let document = prepare("<div>Line1</div><div>Line2</div>");
        assert_eq!(text_of(&document), "Line1\nLine2\n");
    }

    #[test]
    fn test_injects_into_void_break() {
        let document = prepare("one<br>two");
        assert_eq!(text_of(&document), "one\ntwo");
    }

    #[test]
    fn test_leaves_inline_elements_alone() {
        let document = prepare("<span>a</span><b>b</b>");
        assert_eq!(text_of(&document), "ab");
    }

    #[test]
    fn test_tolerates_malformed_markup() {
        let document = prepare("<div><p>unclosed <b>bold <table><tr><td>cell");
        let text = text_of(&document);
        assert!(text.contains("unclosed"));
        assert!(text.contains("cell"));
    }
}
