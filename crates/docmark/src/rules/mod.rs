//! Rule system for block conversion.
//!
//! Rules are kept in precedence order; the first rule whose filter matches a
//! block decides its type and converter. Blocks no rule matches are
//! [`BlockType::Unknown`] and fall back to their plain text.

mod column;
mod image;
mod list;
mod mind_map;
mod rule;
mod table;
mod text;

pub use rule::{ConvertFn, Filter, KindFn, Rule};

pub(crate) use image::pending_image_selector;

use indexmap::IndexMap;
use scraper::ElementRef;

use crate::block::BlockType;

/// Classes marking a heading block; the level follows as a decimal suffix
const HEADING_PREFIX: &str = "sc-block-header";

/// Ordered collection of block rules
#[derive(Debug)]
pub struct Rules {
    rules: IndexMap<&'static str, Rule>,
}

impl Rules {
    /// Create the built-in rules in precedence order
    pub fn new() -> Self {
        let mut rules = IndexMap::new();

        rules.insert(
            "heading",
            Rule::new(
                Filter::NumberedClass(HEADING_PREFIX),
                |el| BlockType::Heading(heading_level(el)),
                text::convert_heading,
            ),
        );
        rules.insert(
            "text",
            Rule::new(Filter::Class("sc-block-text"), |_| BlockType::Text, text::convert_text),
        );
        rules.insert(
            "bulleted_list",
            Rule::new(
                Filter::Class("sc-block-bulleted_list"),
                |_| BlockType::BulletedList,
                list::convert_bulleted,
            ),
        );
        rules.insert(
            "numbered_list",
            Rule::new(
                Filter::Class("sc-block-numbered_list"),
                |_| BlockType::NumberedList,
                list::convert_numbered,
            ),
        );
        rules.insert(
            "quote",
            Rule::new(Filter::Class("sc-block-quote"), |_| BlockType::Quote, text::convert_quote),
        );
        rules.insert(
            "code",
            Rule::new(Filter::Class("sc-block-code"), |_| BlockType::Code, text::convert_code),
        );
        rules.insert(
            "table",
            Rule::new(
                Filter::AnyClass(&["sc-block-table", "sc-block-simple_table"]),
                |_| BlockType::Table,
                table::convert_table,
            ),
        );
        rules.insert(
            "image",
            Rule::new(Filter::Class("sc-block-image"), |_| BlockType::Image, image::convert_image),
        );
        rules.insert(
            "mind_map",
            Rule::new(
                Filter::Class("sc-block-hina_mind_map"),
                |_| BlockType::MindMap,
                mind_map::convert_mind_map,
            ),
        );
        rules.insert(
            "column_list",
            Rule::new(
                Filter::Class("sc-block-column_list"),
                |_| BlockType::ColumnList,
                column::convert_column_list,
            ),
        );
        rules.insert(
            "callout",
            Rule::new(
                Filter::Class("sc-block-callout"),
                |_| BlockType::Callout,
                text::convert_callout,
            ),
        );
        rules.insert(
            "toggle",
            Rule::new(Filter::Class("sc-block-toggle"), |_| BlockType::Toggle, list::convert_toggle),
        );

        Self { rules }
    }

    /// Rule names in precedence order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    /// Find the first rule matching a block
    pub fn for_element(&self, element: &ElementRef<'_>) -> Option<(&'static str, &Rule)> {
        self.rules
            .iter()
            .find(|(_, rule)| rule.filter.matches(element))
            .map(|(name, rule)| (*name, rule))
    }

    /// Classify a block; total, with [`BlockType::Unknown`] as the fallback
    pub fn classify(&self, element: ElementRef<'_>) -> BlockType {
        self.for_element(&element)
            .map(|(_, rule)| rule.kind(element))
            .unwrap_or(BlockType::Unknown)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading level from the first `sc-block-header<N>` class; 1 when the
/// number is zero or out of range, at most 6
fn heading_level(element: ElementRef<'_>) -> u8 {
    element
        .value()
        .classes()
        .filter_map(|class| class.strip_prefix(HEADING_PREFIX))
        .find_map(|suffix| suffix.parse::<u32>().ok())
        .filter(|level| *level > 0)
        .map(|level| level.min(6) as u8)
        .unwrap_or(1)
}
