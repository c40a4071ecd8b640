//! Helpers over rendered DOM elements.
//!
//! A document node is a [`scraper::ElementRef`]. This module adds the queries
//! the converters need on top of it: class tests, element-only child and
//! ancestor walks, first-match lookups and text extraction.

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

/// Class carried by every editor block
pub const BLOCK_WRAPPER: &str = "sc-block-wrapper";

/// Identity of an element within one borrowed document.
///
/// Wraps the element's tree node id. Two keys are equal exactly when they
/// were taken from the same element of the same parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(NodeId);

/// Query helpers for rendered elements
pub trait NodeExt<'a> {
    /// Check for an exact class name
    fn has_class(&self, name: &str) -> bool;

    /// Check for a class name made of `prefix` and one or more ASCII digits
    fn has_numbered_class(&self, prefix: &str) -> bool;

    /// Check for a class name containing `needle`
    fn class_contains(&self, needle: &str) -> bool;

    /// Check whether this element is an editor block
    fn is_block_wrapper(&self) -> bool {
        self.has_class(BLOCK_WRAPPER)
    }

    /// Lowercase tag name
    fn tag_name(&self) -> &'a str;

    /// Element children, in document order
    fn element_children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a;

    /// Element ancestors, nearest first
    fn ancestor_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a;

    fn parent_element(&self) -> Option<ElementRef<'a>>;

    /// Nearest enclosing block wrapper
    fn owning_block(&self) -> Option<ElementRef<'a>>;

    /// First descendant matching `selector`
    fn find(&self, selector: &Selector) -> Option<ElementRef<'a>>;

    /// First descendant matching `selector` that belongs to this block
    /// rather than to a block nested inside it
    fn find_owned(&self, selector: &Selector) -> Option<ElementRef<'a>>;

    /// Follow a chain of direct children.
    ///
    /// Each step lists the classes a child must carry. Every matching child
    /// is explored, so `[["a"], ["b"]]` behaves like `:scope > .a > .b`.
    fn child_path(&self, path: &[&[&str]]) -> Option<ElementRef<'a>>;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self) -> String;

    fn key(&self) -> NodeKey;
}

impl<'a> NodeExt<'a> for ElementRef<'a> {
    fn has_class(&self, name: &str) -> bool {
        self.value().classes().any(|c| c == name)
    }

    fn has_numbered_class(&self, prefix: &str) -> bool {
        self.value().classes().any(|c| {
            c.strip_prefix(prefix)
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        })
    }

    fn class_contains(&self, needle: &str) -> bool {
        self.value().classes().any(|c| c.contains(needle))
    }

    fn tag_name(&self) -> &'a str {
        let element: ElementRef<'a> = *self;
        element.value().name()
    }

    fn element_children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let element: ElementRef<'a> = *self;
        element.children().filter_map(ElementRef::wrap)
    }

    fn ancestor_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let element: ElementRef<'a> = *self;
        element.ancestors().filter_map(ElementRef::wrap)
    }

    fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn owning_block(&self) -> Option<ElementRef<'a>> {
        self.ancestor_elements().find(|a| a.is_block_wrapper())
    }

    fn find(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn find_owned(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        let key = self.key();
        self.select(selector)
            .find(|found| found.owning_block().map(|block| block.key()) == Some(key))
    }

    fn child_path(&self, path: &[&[&str]]) -> Option<ElementRef<'a>> {
        let Some((step, rest)) = path.split_first() else {
            return Some(*self);
        };

        self.element_children()
            .filter(|child| step.iter().all(|class| child.has_class(class)))
            .find_map(|child| child.child_path(rest))
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn key(&self) -> NodeKey {
        NodeKey(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_class_queries() {
        let doc = parse_html(r#"<div class="sc-block-wrapper sc-block-header3 callout-warning"></div>"#);
        let div = doc.select(&selector("div")).next().unwrap();

        assert!(div.is_block_wrapper());
        assert!(div.has_class("sc-block-header3"));
        assert!(!div.has_class("sc-block-header"));
        assert!(div.has_numbered_class("sc-block-header"));
        assert!(!div.has_numbered_class("sc-block-head"));
        assert!(div.class_contains("warning"));
        assert_eq!(div.tag_name(), "div");
    }

    #[test]
    fn test_element_children_skip_text() {
        let doc = parse_html("<div id=\"p\">a<span>b</span>c<em>d</em></div>");
        let div = doc.select(&selector("#p")).next().unwrap();

        let tags: Vec<_> = div.element_children().map(|c| c.tag_name()).collect();
        assert_eq!(tags, vec!["span", "em"]);
    }

    #[test]
    fn test_child_path_requires_direct_children() {
        let doc = parse_html(
            r#"<div id="root">
                <div class="a"><div class="x"><div class="b">deep</div></div></div>
                <div class="a"><div class="b c">direct</div></div>
            </div>"#,
        );
        let root = doc.select(&selector("#root")).next().unwrap();

        let found = root.child_path(&[&["a"], &["b"]]).unwrap();
        assert_eq!(found.text_content(), "direct");
        assert!(root.child_path(&[&["a"], &["b", "c"]]).is_some());
        assert!(root.child_path(&[&["a"], &["b", "d"]]).is_none());
    }

    #[test]
    fn test_owning_block() {
        let doc = parse_html(
            r#"<div class="sc-block-wrapper" id="outer"><div class="sc-block-wrapper" id="inner"><span>t</span></div></div>"#,
        );
        let span = doc.select(&selector("span")).next().unwrap();
        let owner = span.owning_block().unwrap();
        assert_eq!(owner.value().attr("id"), Some("inner"));
    }

    #[test]
    fn test_find_owned_skips_nested_blocks() {
        let doc = parse_html(
            r#"<div class="sc-block-wrapper" id="outer">
                <div class="sc-block-wrapper"><span class="mark">inner</span></div>
                <span class="mark">outer</span>
            </div>"#,
        );
        let outer = doc.select(&selector("#outer")).next().unwrap();

        assert_eq!(outer.find(&selector(".mark")).unwrap().text_content(), "inner");
        assert_eq!(outer.find_owned(&selector(".mark")).unwrap().text_content(), "outer");
    }

    #[test]
    fn test_keys_identify_elements() {
        let doc = parse_html("<p>a</p><p>b</p>");
        let ps: Vec<_> = doc.select(&selector("p")).collect();
        let again = doc.select(&selector("p")).next().unwrap();

        assert_ne!(ps[0].key(), ps[1].key());
        assert_eq!(ps[0].key(), again.key());
    }

    #[test]
    fn test_text_content() {
        let doc = parse_html("<div id=\"t\">Hello <b>World</b></div>");
        let div = doc.select(&selector("#t")).next().unwrap();
        assert_eq!(div.text_content(), "Hello World");
    }
}
