//! Column layouts, rendered as a one-row table with a column per region.

use docmark_core::Table;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::image::{extract_from_container, has_realised_image, realised_images};
use crate::html::static_selector;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

static COLUMN_LIST: Lazy<Selector> = Lazy::new(|| static_selector("[data-area-column-list]"));
static COLUMN_BODY: Lazy<Selector> =
    Lazy::new(|| static_selector(".sc-block-wrapper, .sc-block-column, .sc-column-container"));
static COLUMN_CONTAINER: Lazy<Selector> =
    Lazy::new(|| static_selector(".sc-block-column, .sc-column-container"));
static BLOCK_WRAPPER: Lazy<Selector> = Lazy::new(|| static_selector(".sc-block-wrapper"));
static IMAGE_CONTAINER: Lazy<Selector> =
    Lazy::new(|| static_selector(".sc-table-image-item-container"));

const DIVIDER_ATTR: &str = "data-area-column-divider";

pub(super) fn convert_column_list(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let Some(list) = block.find(&COLUMN_LIST) else {
        tracing::warn!("column list without a column container");
        return Ok(String::new());
    };

    let columns: Vec<_> = list
        .element_children()
        .filter(|child| child.tag_name() == "div")
        .filter(|child| child.value().attr(DIVIDER_ATTR).is_none())
        .filter(|child| child.find(&COLUMN_BODY).is_some())
        .collect();

    if columns.is_empty() {
        tracing::warn!("column list without columns");
        return Ok(String::new());
    }

    let mut contents = Vec::with_capacity(columns.len());
    for column in columns {
        let region = column.find(&COLUMN_CONTAINER).unwrap_or(column);
        contents.push(column_content(session, region)?);
    }

    tracing::debug!(columns = contents.len(), "column list");
    Ok(Table::from_columns(&contents).to_markdown())
}

/// Blocks of a column joined by blank lines. Nested blocks already emitted
/// by their parent come back empty and are skipped.
fn column_content(session: &mut ConversionSession<'_>, region: ElementRef<'_>) -> Result<String> {
    let blocks: Vec<_> = region.select(&BLOCK_WRAPPER).collect();
    if blocks.is_empty() {
        return Ok(loose_content(region, &session.options().origin));
    }

    let mut parts = Vec::new();
    for block in blocks {
        let fragment = session.convert_block(block)?;
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            parts.push(fragment.to_string());
        }
    }

    Ok(non_blank(parts.join("\n\n")))
}

/// Images, unrealised image containers, then the remaining text
fn loose_content(region: ElementRef<'_>, origin: &str) -> String {
    let mut parts = realised_images(region, origin);

    parts.extend(
        region
            .select(&IMAGE_CONTAINER)
            .filter(|container| container.value().attr("data-imageid").is_some())
            .filter(|container| !has_realised_image(*container))
            .map(|container| extract_from_container(container, None, origin)),
    );

    let text = region.text_content();
    let text = text.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }

    non_blank(parts.join("\n\n"))
}

fn non_blank(content: String) -> String {
    if content.trim().is_empty() {
        " ".to_string()
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;
    use crate::rules::Rules;
    use docmark_core::Options;

    fn convert(html: &str) -> String {
        let doc = parse_html(html);
        let block = doc.select(&static_selector(".sc-block-column_list")).next().unwrap();
        let options = Options::default();
        let rules = Rules::new();
        let mut session = ConversionSession::new(&options, &rules, None);
        session.convert_block(block).unwrap()
    }

    #[test]
    fn test_two_columns_of_blocks() {
        let html = r#"<div class="sc-block-wrapper sc-block-column_list"><div data-area-column-list="true">
            <div><div class="sc-block-column">
                <div class="sc-block-wrapper sc-block-header2">Left</div>
                <div class="sc-block-wrapper sc-block-text">Body</div>
            </div></div>
            <div data-area-column-divider="true"><div class="sc-block-wrapper">|</div></div>
            <div><div class="sc-block-column">
                <div class="sc-block-wrapper sc-block-quote">Right</div>
            </div></div>
            <div class="spacer"></div>
        </div></div>"#;

        assert_eq!(
            convert(html),
            "| 列 1 | 列 2 |\n|---|---|\n| ## Left<br>Body | > Right |"
        );
    }

    #[test]
    fn test_column_with_loose_image() {
        let html = r#"<div class="sc-block-wrapper sc-block-column_list"><div data-area-column-list="true">
            <div><div class="sc-column-container"><img src="https://img.qq.com/c.png?v=2"> caption</div></div>
            <div><div class="sc-column-container"><div class="sc-table-image-item-container" data-imageid="5"><div class="react-loading-skeleton"></div></div></div></div>
        </div></div>"#;

        assert_eq!(
            convert(html),
            "| 列 1 | 列 2 |\n|---|---|\n| ![图片](https://img.qq.com/c.png)<br>caption | ![图片加载中](# \"图片ID: 5\") |"
        );
    }

    #[test]
    fn test_missing_container_is_empty() {
        assert_eq!(
            convert(r#"<div class="sc-block-wrapper sc-block-column_list"><div>x</div></div>"#),
            ""
        );
    }
}
