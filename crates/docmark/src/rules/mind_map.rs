//! Embedded mind maps.
//!
//! The map itself is drawn on a canvas and has no textual content to
//! convert, so it is replaced by a marker carrying its id.

use docmark_core::MindMapMode;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::html::static_selector;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

const UNKNOWN_ID: &str = "未知";

static CONTAINER: Lazy<Selector> = Lazy::new(|| static_selector("hina-container"));
static NAME_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"hina-hina_mind_map-(.+)$").expect("valid regex"));

pub(super) fn convert_mind_map(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let Some(container) = block.find(&CONTAINER) else {
        tracing::warn!("mind map without an embed container");
        return Ok(String::new());
    };

    let id = mind_map_id(block, container);
    tracing::debug!(id = %id, mode = %session.options().mind_map_mode, "mind map");

    Ok(match session.options().mind_map_mode {
        MindMapMode::Skip => String::new(),
        MindMapMode::Placeholder => format!("![思维导图](# \"ID: {}\")\n\n", id),
        MindMapMode::Simple => format!("**[思维导图: {}]**\n\n", id),
    })
}

fn mind_map_id(block: ElementRef<'_>, container: ElementRef<'_>) -> String {
    let from_name = container
        .value()
        .attr("name")
        .and_then(|name| NAME_ID_RE.captures(name))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    from_name
        .or_else(|| {
            block
                .value()
                .attr("data-block-id")
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;
    use crate::rules::Rules;
    use docmark_core::Options;

    fn convert(html: &str, mode: MindMapMode) -> String {
        let doc = parse_html(html);
        let block = doc.select(&static_selector(".sc-block-wrapper")).next().unwrap();
        let options = Options {
            mind_map_mode: mode,
            ..Options::default()
        };
        let rules = Rules::new();
        let mut session = ConversionSession::new(&options, &rules, None);
        session.convert_block(block).unwrap()
    }

    const NAMED: &str = r#"<div class="sc-block-wrapper sc-block-hina_mind_map" data-block-id="blk1"><hina-container name="hina-hina_mind_map-abc123"></hina-container></div>"#;

    #[test]
    fn test_modes() {
        assert_eq!(convert(NAMED, MindMapMode::Skip), "");
        assert_eq!(
            convert(NAMED, MindMapMode::Placeholder),
            "![思维导图](# \"ID: abc123\")\n\n"
        );
        assert_eq!(
            convert(NAMED, MindMapMode::Simple),
            "**[思维导图: abc123]**\n\n"
        );
    }

    #[test]
    fn test_id_fallbacks() {
        let by_block = r#"<div class="sc-block-wrapper sc-block-hina_mind_map" data-block-id="blk1"><hina-container name="other"></hina-container></div>"#;
        assert_eq!(convert(by_block, MindMapMode::Simple), "**[思维导图: blk1]**\n\n");

        let unknown = r#"<div class="sc-block-wrapper sc-block-hina_mind_map"><hina-container></hina-container></div>"#;
        assert_eq!(convert(unknown, MindMapMode::Simple), "**[思维导图: 未知]**\n\n");
    }

    #[test]
    fn test_missing_container_is_dropped() {
        let html = r#"<div class="sc-block-wrapper sc-block-hina_mind_map" data-block-id="x"></div>"#;
        assert_eq!(convert(html, MindMapMode::Placeholder), "");
    }
}
