//! Registry of images collected during a conversion.
//!
//! When a host is able to download resources it hands an [`ImageRegistry`] to
//! the converter. Image blocks are then emitted with a local placeholder path
//! (`./images/image_N.ext`) and recorded here, so a later download pass can
//! fetch each source URL and write it to the placeholder location.

use serde::Serialize;

/// Extensions kept from the source URL; anything else becomes `jpg`
const KNOWN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"];

/// An image recorded for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedImage {
    /// Source URL as rendered, query string included
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Relative path written into the Markdown in place of `url`
    pub placeholder: String,
}

/// Append-only list of collected images, owned by the host across passes
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ImageRegistry {
    images: Vec<CollectedImage>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an image and return its entry. Placeholders are numbered from 1
    /// in registration order.
    pub fn register(&mut self, url: &str, alt: &str, title: Option<&str>) -> &CollectedImage {
        let index = self.images.len() + 1;
        let placeholder = format!("./images/image_{}.{}", index, extension_for(url));

        self.images.push(CollectedImage {
            url: url.to_string(),
            alt: alt.to_string(),
            title: title.map(str::to_string),
            placeholder,
        });

        &self.images[index - 1]
    }

    pub fn images(&self) -> &[CollectedImage] {
        &self.images
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectedImage> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// File extension for a source URL, judged from the last path segment
fn extension_for(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");

    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .and_then(|ext| KNOWN_EXTENSIONS.iter().find(|known| **known == ext).copied())
        .unwrap_or("jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_numbers_from_one() {
        let mut registry = ImageRegistry::new();
        let first = registry.register("https://img.qq.com/a.png?w=100", "图片", None);
        assert_eq!(first.placeholder, "./images/image_1.png");
        assert_eq!(first.url, "https://img.qq.com/a.png?w=100");

        let second = registry.register("https://img.qq.com/b", "图片", Some("B"));
        assert_eq!(second.placeholder, "./images/image_2.jpg");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("https://x.com/photo.JPEG"), "jpeg");
        assert_eq!(extension_for("https://x.com/a.webp#frag"), "webp");
        assert_eq!(extension_for("https://x.com/dir.v2/blob"), "jpg");
        assert_eq!(extension_for("https://x.com/file.exe"), "jpg");
        assert_eq!(extension_for(""), "jpg");
    }

    #[test]
    fn test_registry_serializes_as_list() {
        let mut registry = ImageRegistry::new();
        registry.register("https://x.com/a.gif", "动图", None);
        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(
            json,
            r#"[{"url":"https://x.com/a.gif","alt":"动图","placeholder":"./images/image_1.gif"}]"#
        );
    }
}
