//! Single-line blocks: headings, paragraphs, quotes, code and callouts.

use docmark_core::{fenced_code, heading};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::block::BlockType;
use crate::html::static_selector;
use crate::inline::formatted_text;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

static CODE_CONTENT: Lazy<Selector> =
    Lazy::new(|| static_selector(".sc-block-code-content-wrapper .sc-text-input-content"));
static CODE_SPAN: Lazy<Selector> = Lazy::new(|| static_selector(r#"span[data-code-span="true"]"#));

/// Line-number marker the editor leaves inside code text
static LINE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\n<span data-line-number="\d+"></span>"#).expect("valid regex"));

pub(super) fn convert_heading(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let BlockType::Heading(level) = session.classify(block) else {
        return Ok(String::new());
    };

    let text = block.text_content();
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }

    Ok(heading(level, text))
}

pub(super) fn convert_text(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    Ok(formatted_text(block, &session.options().origin))
}

pub(super) fn convert_quote(
    _session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let text = block.text_content();
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }

    Ok(format!("> {}", text))
}

/// Only spans marked as code text are read, which leaves out the
/// line-number gutter. Blocks not yet rendered have no such spans.
pub(super) fn convert_code(
    _session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let Some(content) = block.find(&CODE_CONTENT) else {
        return Ok(String::new());
    };

    let code: String = content
        .select(&CODE_SPAN)
        .map(|span| span.text_content())
        .collect();
    let code = LINE_MARKER_RE.replace_all(&code, "\n");
    let code = code.trim();
    if code.is_empty() {
        return Ok(String::new());
    }

    Ok(fenced_code(code))
}

pub(super) fn convert_callout(
    _session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let text = block.text_content();
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }

    Ok(format!("**{} {}**", callout_icon(block), text))
}

fn callout_icon(block: ElementRef<'_>) -> &'static str {
    if block.class_contains("warning") {
        "⚠️"
    } else if block.class_contains("error") || block.class_contains("danger") {
        "❌"
    } else if block.class_contains("info") {
        "ℹ️"
    } else if block.class_contains("success") {
        "✅"
    } else {
        "💡"
    }
}
