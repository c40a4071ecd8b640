//! docmark-core - Markdown primitives shared by the docmark converter
//!
//! This crate holds the parts of the converter that do not depend on an HTML
//! parser: the conversion options, the collected-image registry, the result
//! type handed back to hosts, and the small set of Markdown constructs the
//! block converters emit.
//!
//! # Architecture
//!
//! ```text
//!                      ┌──────────────┐
//! Rendered DOM ──────▶ │   docmark    │ ── fragments ──▶ Joiner ──▶ Markdown
//!                      └──────────────┘                    ▲
//!                             │                            │
//!                             └── Options / ImageRegistry ─┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use docmark_core::{heading, Joiner};
//!
//! let mut joiner = Joiner::new();
//! joiner.push(&heading(2, "Intro"), false);
//! joiner.push("- First", true);
//! joiner.push("- Second", true);
//!
//! assert_eq!(joiner.finish(), "## Intro\n\n- First\n- Second");
//! ```

mod ast;
mod images;
mod naming;
mod options;
mod result;
mod serialize;

pub use ast::{Image, Link, Table};
pub use images::{CollectedImage, ImageRegistry};
pub use naming::suggested_file_name;
pub use options::{MindMapMode, Options, UnknownMindMapMode, DEFAULT_ORIGIN};
pub use result::ConversionResult;
pub use serialize::{collapse_newlines, fenced_code, heading, Joiner};
