//! HTML parsing support.
//!
//! Hosts that hold a serialized page (a saved snapshot, a string captured from
//! the browser) parse it here into a [`scraper::Html`] tree for conversion.

use scraper::{Html, Selector};

use crate::{DocMarkError, Result};

/// Parse an HTML page into a document tree.
///
/// # Example
///
/// ```rust
/// use docmark::{parse_html, DocMarkService};
///
/// let document = parse_html(r#"<div id="sc-page-content"></div>"#);
/// let result = DocMarkService::new().parse(&document);
/// assert!(result.is_success());
/// ```
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compile a configured selector
pub fn compile_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| DocMarkError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{:?}", err),
    })
}

/// Compile a selector written into the converter itself
pub(crate) fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid selector")
}
