//! Block kinds recognised by the converter

/// Kind of an editor block, derived from its class names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Heading(u8),
    Text,
    BulletedList,
    NumberedList,
    Quote,
    Code,
    Table,
    Image,
    ColumnList,
    Callout,
    Toggle,
    MindMap,
    Unknown,
}

impl BlockType {
    /// List items are laid out on consecutive lines
    pub fn is_list(&self) -> bool {
        matches!(self, BlockType::BulletedList | BlockType::NumberedList)
    }
}
