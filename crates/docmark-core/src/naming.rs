//! Export file naming

/// Name used when the title has nothing usable left
const FALLBACK_NAME: &str = "腾讯文档导出";

/// File name for exporting a converted document titled `title`.
///
/// Characters not allowed in file names are dropped and whitespace runs become
/// underscores.
pub fn suggested_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    if stem.is_empty() {
        format!("{}.md", FALLBACK_NAME)
    } else {
        format!("{}.md", stem)
    }
}
