//! DocMarkService - the main entry point for page to Markdown conversion.

use docmark_core::{collapse_newlines, ConversionResult, ImageRegistry, Joiner, Options};
use scraper::Html;

use crate::html::{compile_selector, parse_html};
use crate::node::NodeExt;
use crate::rules::{pending_image_selector, Rules};
use crate::session::ConversionSession;
use crate::Result;

/// The main service for converting a rendered page to Markdown.
///
/// A service holds no per-pass state and may be reused; every call starts a
/// fresh [`ConversionSession`].
#[derive(Debug)]
pub struct DocMarkService {
    options: Options,
    rules: Rules,
}

impl DocMarkService {
    /// Create a service with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a service with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Block rules in precedence order
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Convert a page, linking images at their source URLs
    pub fn parse(&self, document: &Html) -> ConversionResult {
        self.convert(document, None).into()
    }

    /// Convert a page, recording each image block in `images` and linking it
    /// at its local placeholder path
    pub fn parse_with_images(&self, document: &Html, images: &mut ImageRegistry) -> ConversionResult {
        self.convert(document, Some(images)).into()
    }

    /// Parse serialized HTML and convert it
    pub fn parse_html(&self, html: &str) -> ConversionResult {
        self.parse(&parse_html(html))
    }

    /// Convert a page, returning the first error that aborts the pass
    pub fn convert(&self, document: &Html, images: Option<&mut ImageRegistry>) -> Result<String> {
        let span = tracing::info_span!(
            "convert",
            root = %self.options.content_root,
            chars = tracing::field::Empty
        );
        let _enter = span.enter();

        let root_selector = compile_selector(&self.options.content_root)?;
        let title = if self.options.include_title {
            self.extract_title(document)?
        } else {
            None
        };

        let mut session = ConversionSession::new(&self.options, &self.rules, images);
        let mut joiner = Joiner::new();

        match document.select(&root_selector).next() {
            Some(root) => {
                let blocks: Vec<_> = root
                    .element_children()
                    .filter(|child| child.is_block_wrapper())
                    .collect();
                tracing::debug!(blocks = blocks.len(), "top-level blocks");

                for block in blocks {
                    let fragment = session.convert_block(block)?;
                    joiner.push(&fragment, session.classify(block).is_list());
                }
            }
            None => tracing::warn!(root = %self.options.content_root, "content root not found"),
        }

        let content = joiner.finish();
        let markdown = match title {
            Some(title) => collapse_newlines(&format!("# {}\n\n{}", title, content))
                .trim()
                .to_string(),
            None => content,
        };

        span.record("chars", markdown.chars().count());
        tracing::info!("conversion finished");
        Ok(markdown)
    }

    /// Document title: the first title selector whose element has text,
    /// else the configured page title
    pub fn extract_title(&self, document: &Html) -> Result<Option<String>> {
        for css in &self.options.title_selectors {
            let selector = compile_selector(css)?;
            let title = document
                .select(&selector)
                .next()
                .map(|element| element.text_content().trim().to_string())
                .filter(|title| !title.is_empty());

            if let Some(title) = title {
                tracing::debug!(selector = %css, title = %title, "page title");
                return Ok(Some(title));
            }
        }

        Ok(self
            .options
            .page_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string))
    }

    /// Number of images in the page still showing a loading skeleton; a host
    /// may wait for this to reach zero before converting
    pub fn pending_images(&self, document: &Html) -> usize {
        document.select(pending_image_selector()).count()
    }
}

impl Default for DocMarkService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocMarkError;

    fn page(title: &str, blocks: &str) -> String {
        format!(
            r#"<html><head><title>{title}</title></head><body><div id="sc-page-content">{blocks}</div></body></html>"#
        )
    }

    #[test]
    fn test_empty_page() {
        let service = DocMarkService::new();
        assert_eq!(
            service.parse_html(r#"<div id="sc-page-content"></div>"#),
            ConversionResult::Success(String::new())
        );
    }

    #[test]
    fn test_title_heading() {
        let service = DocMarkService::new();
        let html = page(
            "Weekly",
            r#"<div class="sc-block-wrapper sc-block-text">Notes</div>"#,
        );
        assert_eq!(
            service.parse_html(&html),
            ConversionResult::Success("# Weekly\n\nNotes".to_string())
        );
    }

    #[test]
    fn test_title_selector_precedence() {
        let service = DocMarkService::new();
        let html = r#"<html><head><title>Tab title</title></head><body>
            <div class="sc-page-title">  Page title </div>
            <div id="sc-page-content"></div></body></html>"#;
        let title = service.extract_title(&parse_html(html)).unwrap();
        assert_eq!(title.as_deref(), Some("Page title"));
    }

    #[test]
    fn test_title_falls_back_to_page_title() {
        let options = Options {
            page_title: Some("From host".to_string()),
            ..Options::default()
        };
        let service = DocMarkService::with_options(options);
        let html = r#"<div class="sc-page-title"> </div><div id="sc-page-content"></div>"#;
        assert_eq!(
            service.parse_html(html),
            ConversionResult::Success("# From host".to_string())
        );
    }

    #[test]
    fn test_title_disabled() {
        let mut service = DocMarkService::new();
        service.options_mut().include_title = false;
        let html = page(
            "Weekly",
            r#"<div class="sc-block-wrapper sc-block-text">Notes</div>"#,
        );
        assert_eq!(service.parse_html(&html).markdown(), Some("Notes"));
    }

    #[test]
    fn test_consecutive_list_items_share_lines() {
        let mut service = DocMarkService::new();
        service.options_mut().include_title = false;
        let html = page(
            "",
            r#"<div class="sc-block-wrapper sc-block-bulleted_list">a</div>
               <div class="sc-block-wrapper sc-block-numbered_list">b</div>
               <div class="sc-block-wrapper sc-block-text">after</div>
               <div class="sc-block-wrapper sc-block-bulleted_list">c</div>"#,
        );
        assert_eq!(
            service.parse_html(&html).markdown(),
            Some("- a\n1. b\n\nafter\n\n- c")
        );
    }

    #[test]
    fn test_blocks_outside_root_are_ignored() {
        let mut service = DocMarkService::new();
        service.options_mut().include_title = false;
        let html = r#"<div class="sc-block-wrapper sc-block-text">sidebar</div>
            <div id="sc-page-content"><div class="sc-block-wrapper sc-block-text">main</div></div>"#;
        assert_eq!(service.parse_html(html).markdown(), Some("main"));
    }

    #[test]
    fn test_invalid_content_root_fails() {
        let mut service = DocMarkService::new();
        service.options_mut().content_root = "div[".to_string();
        let err = service.convert(&parse_html("<div></div>"), None).unwrap_err();
        assert!(matches!(err, DocMarkError::InvalidSelector { .. }));

        let result = service.parse_html("<div></div>");
        assert!(!result.is_success());
        assert_eq!(result.markdown(), None);
    }

    #[test]
    fn test_pending_images() {
        let service = DocMarkService::new();
        let doc = parse_html(
            r#"<div class="sc-table-image-item-container" data-imageid="1"><span class="react-loading-skeleton"></span></div>
               <div class="sc-table-image-item-container" data-imageid="2"><img src="a.png"></div>
               <span class="react-loading-skeleton"></span>"#,
        );
        assert_eq!(service.pending_images(&doc), 1);
    }
}
