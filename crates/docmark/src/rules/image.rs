//! Image blocks and image containers.
//!
//! Images inside tables and columns load lazily. Until the `<img>` is
//! realised the container only carries a `data-imageid`, possibly with a
//! loading skeleton or a background image, so extraction distinguishes
//! those states instead of dropping the cell.

use docmark_core::Image;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::html::static_selector;
use crate::node::NodeExt;
use crate::session::ConversionSession;
use crate::utilities::{absolutize, background_image_url, strip_query};
use crate::Result;

const DEFAULT_ALT: &str = "图片";

static IMG: Lazy<Selector> = Lazy::new(|| static_selector("img"));
static TEXT_INPUT: Lazy<Selector> = Lazy::new(|| static_selector(".sc-text-input-content"));
static SKELETON: Lazy<Selector> = Lazy::new(|| static_selector(".react-loading-skeleton"));
static PENDING: Lazy<Selector> = Lazy::new(|| {
    static_selector(".sc-table-image-item-container .react-loading-skeleton")
});

/// Loading skeletons of images that are not yet realised
pub(crate) fn pending_image_selector() -> &'static Selector {
    &PENDING
}

/// Source, alt text and title of a realised `<img>`
struct ImageSource {
    src: String,
    alt: String,
    title: Option<String>,
}

impl ImageSource {
    /// `None` when the image has no source yet
    fn read(img: ElementRef<'_>, origin: &str) -> Option<Self> {
        let element = img.value();
        let src = element.attr("src").map(str::trim).filter(|src| !src.is_empty())?;
        let alt = element
            .attr("alt")
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or(DEFAULT_ALT);
        let title = element
            .attr("title")
            .map(str::trim)
            .filter(|title| !title.is_empty());

        Some(Self {
            src: absolutize(src, origin),
            alt: alt.to_string(),
            title: title.map(str::to_string),
        })
    }

    /// Markdown pointing at the source without its query string
    fn markdown(&self) -> String {
        Image::new(self.alt.as_str(), strip_query(&self.src))
            .with_title(self.title.as_deref())
            .to_string()
    }
}

/// With an image registry present the image is recorded and the Markdown
/// points at its local placeholder path.
pub(super) fn convert_image(
    session: &mut ConversionSession<'_>,
    block: ElementRef<'_>,
) -> Result<String> {
    let origin = &session.options().origin;
    let Some(source) = block.find(&IMG).and_then(|img| ImageSource::read(img, origin)) else {
        return Ok(String::new());
    };

    let markdown = match session.images() {
        Some(registry) => {
            let collected = registry.register(&source.src, &source.alt, source.title.as_deref());
            tracing::debug!(url = %collected.url, placeholder = %collected.placeholder, "collected image");
            Image::new(source.alt.as_str(), collected.placeholder.as_str())
                .with_title(source.title.as_deref())
                .to_string()
        }
        None => source.markdown(),
    };

    Ok(markdown)
}

/// Markdown for every realised `<img>` under `element`, in document order
pub(super) fn realised_images(element: ElementRef<'_>, origin: &str) -> Vec<String> {
    element
        .select(&IMG)
        .filter_map(|img| ImageSource::read(img, origin))
        .map(|source| source.markdown())
        .collect()
}

/// Whether `container` holds an `<img>` with a source
pub(super) fn has_realised_image(container: ElementRef<'_>) -> bool {
    container
        .select(&IMG)
        .any(|img| img.value().attr("src").is_some_and(|src| !src.trim().is_empty()))
}

/// Content of an image container.
///
/// A realised image renders normally, followed by the caption text of `cell`
/// after a `<br>`. Otherwise an image id yields a loading or placeholder
/// reference, or the background image when one is set. Without an id the
/// caption text is used, and a single space when there is none.
pub(super) fn extract_from_container(
    container: ElementRef<'_>,
    cell: Option<ElementRef<'_>>,
    origin: &str,
) -> String {
    let caption = || {
        cell.and_then(|cell| cell.find(&TEXT_INPUT))
            .map(|text| text.text_content().trim().to_string())
            .filter(|text| !text.is_empty())
    };

    if let Some(source) = container.find(&IMG).and_then(|img| ImageSource::read(img, origin)) {
        let image = source.markdown();
        return match caption() {
            Some(text) => format!("{}<br>{}", image, text),
            None => image,
        };
    }

    if let Some(id) = container.value().attr("data-imageid") {
        if container.find(&SKELETON).is_some() {
            tracing::debug!(image_id = id, "image still loading");
            return format!("![图片加载中](# \"图片ID: {}\")", id);
        }

        if let Some(url) = container.value().attr("style").and_then(background_image_url) {
            return Image::new(DEFAULT_ALT, strip_query(&absolutize(&url, origin))).to_string();
        }

        return format!("![图片占位符](# \"图片ID: {}\")", id);
    }

    caption().unwrap_or_else(|| " ".to_string())
}
