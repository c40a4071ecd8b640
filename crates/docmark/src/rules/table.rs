//! Tables.
//!
//! Simple tables render a real `<table>`. The editor's own table component
//! renders rows and cells as divs with ARIA roles or table classes; that
//! layout is tried when no `<table>` rows are found.

use docmark_core::Table;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::image::extract_from_container;
use crate::html::static_selector;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

static TABLE: Lazy<Selector> = Lazy::new(|| static_selector("table"));
static TABLE_ROW: Lazy<Selector> = Lazy::new(|| static_selector("tr"));
static TABLE_CELL: Lazy<Selector> = Lazy::new(|| static_selector("td, th"));

static GRID: Lazy<Selector> = Lazy::new(|| {
    static_selector(".sc-table-container, .sc-block-table-content, .sc-exceed-scroller-content")
});
static GRID_ROW: Lazy<Selector> =
    Lazy::new(|| static_selector(r#"[role="row"], .sc-table-row, tr"#));
static GRID_CELL: Lazy<Selector> = Lazy::new(|| {
    static_selector(r#"[role="cell"], .sc-table-cell, .sc-table-header-cell, td"#)
});

static IMAGE_CONTAINER: Lazy<Selector> =
    Lazy::new(|| static_selector(".sc-table-image-item-container"));
static TEXT_INPUT: Lazy<Selector> = Lazy::new(|| static_selector(".sc-text-input-content"));

pub(super) fn convert_table(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let origin = &session.options().origin;

    let mut table = block
        .find(&TABLE)
        .map(|element| collect(element, &TABLE_ROW, &TABLE_CELL, origin))
        .unwrap_or_default();

    if table.is_empty() {
        if let Some(grid) = block.find(&GRID) {
            table = collect(grid, &GRID_ROW, &GRID_CELL, origin);
        }
    }

    tracing::debug!(rows = table.rows.len(), "table rows");
    Ok(table.to_markdown())
}

fn collect(container: ElementRef<'_>, rows: &Selector, cells: &Selector, origin: &str) -> Table {
    let mut table = Table::new();
    for row in container.select(rows) {
        table.push_row(row.select(cells).map(|cell| cell_content(cell, origin)).collect());
    }
    table
}

fn cell_content(cell: ElementRef<'_>, origin: &str) -> String {
    if let Some(container) = cell.find(&IMAGE_CONTAINER) {
        return extract_from_container(container, Some(cell), origin);
    }

    let text = match cell.find(&TEXT_INPUT) {
        Some(text) => text.text_content(),
        None => cell.text_content(),
    };
    escape_pipes(text.trim())
}

/// A literal `|` would end the cell early
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
