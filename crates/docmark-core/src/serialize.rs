//! Markdown layout
//!
//! Builders for the fixed-syntax fragments and the joiner that lays block
//! fragments out into a document.

/// ATX heading; the level is clamped to 1..=6
pub fn heading(level: u8, text: &str) -> String {
    let level = level.clamp(1, 6) as usize;
    format!("{} {}", "#".repeat(level), text)
}

/// Fenced code block without a language tag
pub fn fenced_code(code: &str) -> String {
    format!("```\n{}\n```", code)
}

/// Collapse every run of three or more newlines into exactly two
pub fn collapse_newlines(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    result
}

/// Joins block fragments in document order.
///
/// Blocks are separated by a blank line, except that consecutive list items
/// follow each other on the next line. Blank fragments are skipped and do not
/// break a run of list items.
#[derive(Debug, Default)]
pub struct Joiner {
    out: String,
    previous_is_list: bool,
}

impl Joiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str, is_list: bool) {
        if fragment.trim().is_empty() {
            return;
        }

        if !self.out.trim().is_empty() {
            if self.previous_is_list && is_list {
                self.out.push('\n');
            } else {
                self.out.push_str("\n\n");
            }
        }

        self.out.push_str(fragment);
        self.previous_is_list = is_list;
    }

    pub fn is_empty(&self) -> bool {
        self.out.trim().is_empty()
    }

    /// Finished document: newline runs collapsed, surrounding whitespace trimmed
    pub fn finish(self) -> String {
        collapse_newlines(&self.out).trim().to_string()
    }
}
