//! Configuration options for a conversion pass

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Origin used to absolutise root-relative links and image sources
pub const DEFAULT_ORIGIN: &str = "https://docs.qq.com";

/// How embedded mind-map blocks are rendered.
///
/// Deserializes leniently: an unrecognised name becomes
/// [`MindMapMode::Simple`] with a warning, as with [`MindMapMode::from_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MindMapMode {
    /// Drop the block entirely
    Skip,
    /// One bold line: `**[思维导图: <id>]**`
    #[default]
    Simple,
    /// An image-style reference carrying the id
    Placeholder,
}

/// Error returned when a mind-map mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mind map mode `{0}` (expected skip, simple or placeholder)")]
pub struct UnknownMindMapMode(pub String);

impl MindMapMode {
    /// Parse a configured mode, falling back to [`MindMapMode::Simple`] for
    /// unrecognised values.
    pub fn from_config(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: UnknownMindMapMode| {
            tracing::warn!(%err, "falling back to simple mind map mode");
            MindMapMode::Simple
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MindMapMode::Skip => "skip",
            MindMapMode::Simple => "simple",
            MindMapMode::Placeholder => "placeholder",
        }
    }
}

impl FromStr for MindMapMode {
    type Err = UnknownMindMapMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MindMapMode::Skip),
            "simple" => Ok(MindMapMode::Simple),
            "placeholder" => Ok(MindMapMode::Placeholder),
            _ => Err(UnknownMindMapMode(s.to_string())),
        }
    }
}

impl From<String> for MindMapMode {
    fn from(value: String) -> Self {
        MindMapMode::from_config(&value)
    }
}

impl fmt::Display for MindMapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a conversion pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Mind-map rendering mode
    pub mind_map_mode: MindMapMode,

    /// Prefix the output with `# <title>` when a title is found
    pub include_title: bool,

    /// Title used when none of the title selectors match
    pub page_title: Option<String>,

    /// Selector of the element whose direct block wrappers are converted
    pub content_root: String,

    /// Title selectors, tried in order
    pub title_selectors: Vec<String>,

    /// Origin for root-relative URLs
    pub origin: String,

    /// Maximum nesting of block wrappers before the pass fails
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mind_map_mode: MindMapMode::Simple,
            include_title: true,
            page_title: None,
            content_root: "#sc-page-content".to_string(),
            title_selectors: vec![
                ".sc-page-icon + .sc-page-title".to_string(),
                ".sc-page-title".to_string(),
                "[data-testid=\"page-title\"]".to_string(),
                "h1".to_string(),
                "title".to_string(),
            ],
            origin: DEFAULT_ORIGIN.to_string(),
            max_depth: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("skip".parse::<MindMapMode>(), Ok(MindMapMode::Skip));
        assert_eq!(" Placeholder ".parse::<MindMapMode>(), Ok(MindMapMode::Placeholder));
        assert_eq!(
            "mermaid".parse::<MindMapMode>(),
            Err(UnknownMindMapMode("mermaid".to_string()))
        );
    }

    #[test]
    fn test_mode_from_config_falls_back() {
        assert_eq!(MindMapMode::from_config("bogus"), MindMapMode::Simple);
        assert_eq!(MindMapMode::from_config("skip"), MindMapMode::Skip);
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [MindMapMode::Skip, MindMapMode::Simple, MindMapMode::Placeholder] {
            assert_eq!(mode.to_string().parse::<MindMapMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.mind_map_mode, MindMapMode::Simple);
        assert_eq!(options.content_root, "#sc-page-content");
        assert_eq!(options.title_selectors.len(), 5);
        assert!(options.include_title);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: Options =
            serde_json::from_str(r#"{"mind_map_mode": "placeholder", "include_title": false}"#)
                .unwrap();
        assert_eq!(options.mind_map_mode, MindMapMode::Placeholder);
        assert!(!options.include_title);
        assert_eq!(options.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn test_unknown_mode_in_json_is_simple() {
        let options: Options = serde_json::from_str(r#"{"mind_map_mode": "fancy"}"#).unwrap();
        assert_eq!(options.mind_map_mode, MindMapMode::Simple);

        let options: Options = serde_json::from_str(r#"{"mind_map_mode": "Skip"}"#).unwrap();
        assert_eq!(options.mind_map_mode, MindMapMode::Skip);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        let json = serde_json::to_string(&MindMapMode::Placeholder).unwrap();
        assert_eq!(json, r#""placeholder""#);
    }
}
