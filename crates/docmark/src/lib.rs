//! # docmark
//!
//! Convert a rendered Tencent Docs page to Markdown.
//!
//! The editor renders every paragraph, list item, table or embed as a
//! `.sc-block-wrapper` element whose class names identify the block kind.
//! docmark walks the direct block wrappers under the content root in
//! document order, classifies each by its class names, and dispatches to a
//! converter for that kind. Converters recurse into nested blocks (list
//! children, toggle bodies, columns) through the same session, which records
//! every converted block so nothing is emitted twice.
//!
//! ## Design
//!
//! - **Read-only over the DOM**: conversion state (converted blocks, ordered
//!   list counters) lives in a per-pass session, never in the document.
//! - **Degrade, don't fail**: a missing sub-element yields an empty fragment
//!   or a placeholder. Only configuration errors and runaway nesting abort
//!   the pass, and then no partial output is returned.
//! - **Capabilities passed in**: image collection is enabled by handing an
//!   [`ImageRegistry`] to [`DocMarkService::parse_with_images`].
//!
//! ## Example
//!
//! ```rust
//! use docmark::{DocMarkService, ConversionResult};
//!
//! let html = r#"<div id="sc-page-content">
//!   <div class="sc-block-wrapper sc-block-header2">Intro</div>
//!   <div class="sc-block-wrapper sc-block-bulleted_list">First</div>
//! </div>"#;
//!
//! let service = DocMarkService::new();
//! let result = service.parse_html(html);
//! assert_eq!(result, ConversionResult::Success("## Intro\n\n- First".to_string()));
//! ```

mod block;
pub mod html;
mod inline;
pub mod node;
mod rules;
mod service;
mod session;
mod utilities;

pub use block::BlockType;
pub use docmark_core::{
    suggested_file_name, CollectedImage, ConversionResult, ImageRegistry, MindMapMode, Options,
};
pub use html::{compile_selector, parse_html};
pub use inline::formatted_text;
pub use node::{NodeExt, NodeKey};
pub use rules::{ConvertFn, Filter, KindFn, Rule, Rules};
pub use service::DocMarkService;
pub use session::ConversionSession;

/// Parsed page tree
pub use scraper::Html;

/// Error type for docmark operations
#[derive(Debug, thiserror::Error)]
pub enum DocMarkError {
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Block nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

pub type Result<T> = std::result::Result<T, DocMarkError>;
