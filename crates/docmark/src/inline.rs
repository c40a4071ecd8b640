//! Inline text formatting: plain text with links rendered as Markdown.
//!
//! The editor renders links two ways. Pasted or inserted hyperlinks are real
//! `<a href>` elements. Links typed into the editor are often spans marked
//! `data-type="text-link"` whose URL lives on an attribute of the span, of its
//! parent, or of an enclosing anchor.

use docmark_core::Link;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Node, Selector};

use crate::html::static_selector;
use crate::node::NodeExt;
use crate::utilities::absolutize;

static ANCHOR: Lazy<Selector> = Lazy::new(|| static_selector("a[href]"));
static LINK_SPAN: Lazy<Selector> = Lazy::new(|| static_selector(r#"span[data-type="text-link"]"#));
static TEXT_INPUT: Lazy<Selector> = Lazy::new(|| static_selector(".sc-text-input-content"));

const TEXT_INPUT_CLASS: &str = "sc-text-input-content";

/// Text of `element` with links as `[text](url)`, trimmed.
///
/// Root-relative and protocol-relative URLs are resolved against `origin`.
pub fn formatted_text(element: ElementRef<'_>, origin: &str) -> String {
    if element.find(&ANCHOR).is_some() {
        let mut out = String::new();
        push_with_anchors(element, origin, &mut out);
        return out.trim().to_string();
    }

    if element.find(&LINK_SPAN).is_some() {
        let container = if element.has_class(TEXT_INPUT_CLASS) {
            element
        } else {
            element.find(&TEXT_INPUT).unwrap_or(element)
        };

        let mut out = String::new();
        push_with_link_spans(container, origin, &mut out);
        let out = out.trim();
        if !out.is_empty() {
            return out.to_string();
        }
    }

    element.text_content().trim().to_string()
}

/// Write text, replacing each `<a href>` with a Markdown link
fn push_with_anchors(element: ElementRef<'_>, origin: &str, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                match anchor_link(child, origin) {
                    Some(link) => {
                        tracing::debug!(text = %link.text, url = %link.url, "found link");
                        out.push_str(&link.to_string());
                    }
                    None => push_with_anchors(child, origin, out),
                }
            }
            _ => {}
        }
    }
}

fn anchor_link(element: ElementRef<'_>, origin: &str) -> Option<Link> {
    if element.tag_name() != "a" {
        return None;
    }
    let href = element.value().attr("href")?.trim();
    let text = element.text_content();
    let text = text.trim();
    if href.is_empty() || text.is_empty() {
        return None;
    }
    Some(Link::new(text, absolutize(href, origin)))
}

/// Write text in document order, replacing each link span with a Markdown
/// link when its URL can be resolved
fn push_with_link_spans(element: ElementRef<'_>, origin: &str, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_link_span(child) {
                    push_link_span(child, origin, out);
                } else {
                    push_with_link_spans(child, origin, out);
                }
            }
            _ => {}
        }
    }
}

fn is_link_span(element: ElementRef<'_>) -> bool {
    element.tag_name() == "span" && element.value().attr("data-type") == Some("text-link")
}

fn push_link_span(span: ElementRef<'_>, origin: &str, out: &mut String) {
    let text = span.text_content();
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    match span_url(span) {
        Some(url) if url != text => {
            let link = Link::new(text, absolutize(&url, origin));
            tracing::debug!(text = %link.text, url = %link.url, "found text link");
            out.push_str(&link.to_string());
        }
        _ => out.push_str(text),
    }
}

/// URL of a link span: an enclosing or contained anchor, then the span's own
/// `data-href`/`href`, then the parent's `data-href`
fn span_url(span: ElementRef<'_>) -> Option<String> {
    let non_empty = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let anchor = span
        .ancestor_elements()
        .find(|a| a.tag_name() == "a" && non_empty(a.value().attr("href")).is_some())
        .or_else(|| span.find(&ANCHOR));
    if let Some(anchor) = anchor {
        if let Some(href) = non_empty(anchor.value().attr("href")) {
            return Some(href);
        }
    }

    non_empty(span.value().attr("data-href"))
        .or_else(|| non_empty(span.value().attr("href")))
        .or_else(|| non_empty(span.parent_element().and_then(|p| p.value().attr("data-href"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    const ORIGIN: &str = "https://docs.qq.com";

    fn format(html: &str) -> String {
        let doc = parse_html(html);
        let element = doc.select(&static_selector("#t")).next().unwrap();
        formatted_text(element, ORIGIN)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(format(r#"<div id="t">  Hello <b>World</b> </div>"#), "Hello World");
    }

    #[test]
    fn test_anchor_links() {
        assert_eq!(
            format(r#"<div id="t">See <a href="https://example.com">the <b>docs</b></a> now</div>"#),
            "See [the docs](https://example.com) now"
        );
    }

    #[test]
    fn test_anchor_relative_url() {
        assert_eq!(
            format(r#"<div id="t"><a href="/doc/abc">Spec</a></div>"#),
            "[Spec](https://docs.qq.com/doc/abc)"
        );
    }

    #[test]
    fn test_empty_anchor_keeps_text() {
        assert_eq!(format(r#"<div id="t">a <a href="">b</a> c</div>"#), "a b c");
    }

    #[test]
    fn test_link_span_with_data_href() {
        assert_eq!(
            format(
                r#"<div id="t"><div class="sc-text-input-content"><span>Read </span><span data-type="text-link" data-href="//example.com/x">this</span><span> first</span></div></div>"#
            ),
            "Read [this](https://example.com/x) first"
        );
    }

    #[test]
    fn test_link_span_with_parent_data_href() {
        assert_eq!(
            format(
                r#"<div id="t"><span data-href="/doc/q"><span data-type="text-link">Q</span></span></div>"#
            ),
            "[Q](https://docs.qq.com/doc/q)"
        );
    }

    #[test]
    fn test_link_span_without_url_is_text() {
        assert_eq!(
            format(r#"<div id="t"><span data-type="text-link">https://x.com</span> tail</div>"#),
            "https://x.com tail"
        );
    }
}
