//! Markdown constructs emitted by the block converters
//!
//! Converters work on string fragments, so these types are thin: they exist to
//! keep image, link and table syntax in one place.

use std::fmt;

/// An image reference: `![alt](url "title")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub alt: String,
    pub url: String,
    pub title: Option<String>,
}

impl Image {
    pub fn new(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            url: url.into(),
            title: None,
        }
    }

    /// Attach a title, ignoring blank ones
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "![{}]({} \"{}\")", self.alt, self.url, title),
            None => write!(f, "![{}]({})", self.alt, self.url),
        }
    }
}

/// An inline link: `[text](url)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.text, self.url)
    }
}

/// A pipe table whose first row is the header.
///
/// Rows are emitted as given: a row with a different cell count than the
/// header is not padded or truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row; rows without cells are dropped
    pub fn push_row(&mut self, cells: Vec<String>) {
        if !cells.is_empty() {
            self.rows.push(cells);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lay out columns side by side as a single-row table headed `列 1 | 列 2 | ...`.
    ///
    /// Line breaks inside a column become `<br>` since a table cell cannot
    /// span physical lines.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        let headers = (1..=columns.len()).map(|i| format!("列 {}", i)).collect();
        let contents = columns
            .iter()
            .map(|content| {
                content
                    .as_ref()
                    .split('\n')
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("<br>")
            })
            .collect();

        Self {
            rows: vec![headers, contents],
        }
    }

    /// Render the table without a trailing newline
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push('|');
            for cell in row {
                out.push(' ');
                // Empty cells break table rendering, keep a single space
                if cell.trim().is_empty() {
                    out.push(' ');
                } else {
                    out.push_str(cell);
                }
                out.push_str(" |");
            }

            if index == 0 {
                out.push_str("\n|");
                for _ in 0..row.len() {
                    out.push_str("---|");
                }
            }
        }

        out
    }
}
