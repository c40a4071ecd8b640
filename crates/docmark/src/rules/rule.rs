//! Rule and Filter types for block classification.

use scraper::ElementRef;

use crate::block::BlockType;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::Result;

/// Derives the block type of a matched element
pub type KindFn = fn(ElementRef<'_>) -> BlockType;

/// Converts a matched block to a Markdown fragment
pub type ConvertFn = fn(&mut ConversionSession<'_>, ElementRef<'_>) -> Result<String>;

/// A filter determines which blocks a rule applies to
#[derive(Debug, Clone, Copy)]
pub enum Filter {
    /// Match a single class name
    Class(&'static str),
    /// Match any of several class names
    AnyClass(&'static [&'static str]),
    /// Match a class name made of a prefix and a decimal number
    NumberedClass(&'static str),
}

impl Filter {
    /// Check if this filter matches an element
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Filter::Class(name) => element.has_class(name),
            Filter::AnyClass(names) => names.iter().any(|name| element.has_class(name)),
            Filter::NumberedClass(prefix) => element.has_numbered_class(prefix),
        }
    }
}

/// A rule pairs a filter with the block type it assigns and the converter
/// for that type
#[derive(Clone, Copy)]
pub struct Rule {
    pub filter: Filter,
    kind: KindFn,
    convert: ConvertFn,
}

impl Rule {
    pub fn new(filter: Filter, kind: KindFn, convert: ConvertFn) -> Self {
        Self {
            filter,
            kind,
            convert,
        }
    }

    /// Block type of an element this rule matched
    pub fn kind(&self, element: ElementRef<'_>) -> BlockType {
        (self.kind)(element)
    }

    /// Apply this rule's converter
    pub fn convert(
        &self,
        session: &mut ConversionSession<'_>,
        element: ElementRef<'_>,
    ) -> Result<String> {
        (self.convert)(session, element)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("filter", &self.filter).finish_non_exhaustive()
    }
}
