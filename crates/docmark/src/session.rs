//! Per-pass conversion state.

use std::collections::HashSet;

use docmark_core::{ImageRegistry, Options};
use scraper::ElementRef;

use crate::block::BlockType;
use crate::node::{NodeExt, NodeKey};
use crate::rules::Rules;
use crate::{DocMarkError, Result};

/// Running counters for ordered list items without a rendered marker,
/// keyed by nesting depth.
#[derive(Debug, Default, Clone)]
pub struct ListContext {
    counters: Vec<usize>,
}

impl ListContext {
    /// Advance the counter at `depth` and reset every deeper one
    pub fn next(&mut self, depth: usize) -> usize {
        if self.counters.len() <= depth {
            self.counters.resize(depth + 1, 0);
        }
        self.counters[depth] += 1;
        self.counters.truncate(depth + 1);
        self.counters[depth]
    }
}

/// State of one conversion pass.
///
/// Records every block already converted so that a block reached both from
/// its parent's converter and from an outer walk is emitted once.
pub struct ConversionSession<'s> {
    options: &'s Options,
    rules: &'s Rules,
    images: Option<&'s mut ImageRegistry>,
    converted: HashSet<NodeKey>,
    lists: ListContext,
    depth: usize,
}

impl<'s> ConversionSession<'s> {
    pub fn new(
        options: &'s Options,
        rules: &'s Rules,
        images: Option<&'s mut ImageRegistry>,
    ) -> Self {
        Self {
            options,
            rules,
            images,
            converted: HashSet::new(),
            lists: ListContext::default(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &'s Options {
        self.options
    }

    /// Image registry, present when the host collects images for download
    pub fn images(&mut self) -> Option<&mut ImageRegistry> {
        self.images.as_deref_mut()
    }

    pub fn classify(&self, block: ElementRef<'_>) -> BlockType {
        self.rules.classify(block)
    }

    pub fn is_converted(&self, block: ElementRef<'_>) -> bool {
        self.converted.contains(&block.key())
    }

    /// Next number for an ordered item at `depth`
    pub fn next_list_number(&mut self, depth: usize) -> usize {
        self.lists.next(depth)
    }

    /// Convert one block to a Markdown fragment.
    ///
    /// A block already converted in this pass yields an empty fragment.
    pub fn convert_block(&mut self, block: ElementRef<'_>) -> Result<String> {
        if !self.converted.insert(block.key()) {
            return Ok(String::new());
        }

        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(DocMarkError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        let rules = self.rules;
        let fragment = match rules.for_element(&block) {
            Some((name, rule)) => {
                tracing::debug!(rule = name, depth = self.depth, "converting block");
                rule.convert(self, block)?
            }
            None => block.text_content().trim().to_string(),
        };

        self.depth -= 1;
        Ok(fragment)
    }

    /// Convert the block wrappers directly inside `container`, keeping the
    /// non-blank fragments
    pub fn convert_children(&mut self, container: ElementRef<'_>) -> Result<Vec<String>> {
        let blocks: Vec<_> = container
            .element_children()
            .filter(|child| child.is_block_wrapper())
            .collect();

        let mut fragments = Vec::with_capacity(blocks.len());
        for block in blocks {
            let fragment = self.convert_block(block)?;
            if !fragment.trim().is_empty() {
                fragments.push(fragment);
            }
        }

        Ok(fragments)
    }
}
