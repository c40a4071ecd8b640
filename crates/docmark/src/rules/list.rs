//! List items and toggles.
//!
//! Each list block is a single item. Nesting is expressed by ancestry: a
//! nested item sits inside a children container of its parent item, so the
//! indent depth is the number of list blocks above it.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::html::static_selector;
use crate::inline::formatted_text;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

/// Deepest indent emitted; also bounds the ancestor walk
const MAX_LIST_DEPTH: usize = 5;

const TEXT_INPUT_CLASS: &str = "sc-text-input-content";

/// Item text directly under the item, never a nested item's
const ITEM_TEXT_PATH: &[&[&str]] = &[
    &["sc-smart-content-wrapper"],
    &["css-fb3u9x"],
    &["css-1nwtjaw"],
    &[TEXT_INPUT_CLASS],
];

/// Container of the item's nested children
const NESTED_PATH: &[&[&str]] = &[
    &["sc-smart-content-wrapper"],
    &["css-fb3u9x"],
    &["css-1ns5f5t", "e1wkj4az0"],
];

static TEXT_INPUT: Lazy<Selector> = Lazy::new(|| static_selector(".sc-text-input-content"));
static NUMBER_MARKER: Lazy<Selector> =
    Lazy::new(|| static_selector(r#".css-1kmb4e5, .e1ext5ct1, span[style*="color: inherit"]"#));
static TOGGLE_CONTENT: Lazy<Selector> = Lazy::new(|| static_selector(".sc-toggle-content"));

pub(super) fn convert_bulleted(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    if block.text_content().trim().is_empty() {
        return Ok(String::new());
    }

    let depth = list_depth(session, block);
    let text = item_text(session, block);
    let mut out = format!("{}- {}", indent(depth), text);
    append_nested(session, block, &mut out)?;

    Ok(out)
}

/// A rendered marker is passed through as-is, whatever its format; items
/// without one are numbered from the per-depth counter.
pub(super) fn convert_numbered(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    if block.text_content().trim().is_empty() {
        return Ok(String::new());
    }

    let depth = list_depth(session, block);
    let marker = match rendered_marker(block) {
        Some(marker) => {
            tracing::debug!(marker = %marker, "rendered list marker");
            marker
        }
        None => format!("{}.", session.next_list_number(depth)),
    };

    let text = item_text(session, block);
    let mut out = format!("{}{} {}", indent(depth), marker, text);
    append_nested(session, block, &mut out)?;

    Ok(out)
}

/// Rendered as a bullet whose body blocks follow on their own lines
pub(super) fn convert_toggle(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    if block.text_content().trim().is_empty() {
        return Ok(String::new());
    }

    let depth = list_depth(session, block);
    let text = item_text(session, block);
    let mut out = format!("{}- {}", indent(depth), text);

    if let Some(content) = block.find_owned(&TOGGLE_CONTENT) {
        for fragment in session.convert_children(content)? {
            out.push('\n');
            out.push_str(&fragment);
        }
    }

    Ok(out)
}

/// Number of list blocks enclosing `block`, at most [`MAX_LIST_DEPTH`]
fn list_depth(session: &ConversionSession<'_>, block: ElementRef<'_>) -> usize {
    block
        .ancestor_elements()
        .filter(|ancestor| ancestor.is_block_wrapper())
        .filter(|ancestor| session.classify(*ancestor).is_list())
        .take(MAX_LIST_DEPTH)
        .count()
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn item_text(session: &ConversionSession<'_>, block: ElementRef<'_>) -> String {
    let origin = &session.options().origin;

    if let Some(text) = block.child_path(ITEM_TEXT_PATH) {
        return formatted_text(text, origin);
    }
    if let Some(text) = block.find_owned(&TEXT_INPUT) {
        return formatted_text(text, origin);
    }
    if block.child_path(NESTED_PATH).is_none() {
        return formatted_text(block, origin);
    }

    String::new()
}

/// First marker owned by the item that is not part of its text
fn rendered_marker(block: ElementRef<'_>) -> Option<String> {
    let key = block.key();
    block
        .select(&NUMBER_MARKER)
        .filter(|marker| marker.owning_block().map(|owner| owner.key()) == Some(key))
        .filter(|marker| {
            !marker
                .ancestor_elements()
                .take_while(|ancestor| ancestor.key() != key)
                .any(|ancestor| ancestor.has_class(TEXT_INPUT_CLASS))
        })
        .map(|marker| marker.text_content().trim().to_string())
        .find(|marker| !marker.is_empty())
}

fn append_nested(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
    out: &mut String,
) -> Result<()> {
    let Some(nested) = block.child_path(NESTED_PATH) else {
        return Ok(());
    };

    for fragment in session.convert_children(nested)? {
        out.push('\n');
        out.push_str(&fragment);
    }

    Ok(())
}
