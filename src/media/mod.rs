// SPDX-License-Identifier: MPL-2.0
//! Media items that can be enlarged in the lightbox.
//!
//! An article contributes two kinds of media: raster or vector images
//! referenced by `<img>` and inline diagrams (`<svg>` produced by a diagram
//! renderer). Both are modelled by the tagged [`MediaItem`], and the order the
//! lightbox walks them in is fixed by [`MediaSequence`]: every image in
//! document order, then every diagram in document order.

pub mod diagram;
pub mod image;

pub use diagram::DiagramData;
pub use image::{load_image, load_source, load_source_async, ImageData};

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    Image,
    Diagram,
}

/// Stable identity of a media element: its kind and its ordinal among
/// elements of that kind in the content area.
///
/// Ordinals count pending diagrams too, so a key keeps naming the same
/// element when the page is rescanned after diagrams finish rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaKey {
    pub kind: MediaKind,
    pub ordinal: usize,
}

impl MediaKey {
    #[must_use]
    pub fn image(ordinal: usize) -> Self {
        Self {
            kind: MediaKind::Image,
            ordinal,
        }
    }

    #[must_use]
    pub fn diagram(ordinal: usize) -> Self {
        Self {
            kind: MediaKind::Diagram,
            ordinal,
        }
    }
}

/// Where an image's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    /// Remote, protocol-relative or `data:` URL. Kept for display, never loaded.
    Unsupported(String),
}

impl ImageSource {
    /// Resolves an `<img src>` value the way a static site server would:
    /// root-relative paths against the site root, everything else against
    /// the page's directory.
    #[must_use]
    pub fn resolve(src: &str, page_dir: &Path, site_root: &Path) -> Self {
        let src = src.trim();
        let lower = src.to_ascii_lowercase();
        if lower.starts_with("http://")
            || lower.starts_with("https://")
            || lower.starts_with("data:")
            || src.starts_with("//")
        {
            return ImageSource::Unsupported(src.to_string());
        }

        if let Some(local) = src.strip_prefix("file://") {
            return ImageSource::File(PathBuf::from(strip_suffixes(local)));
        }

        let path = strip_suffixes(src);
        match path.strip_prefix('/') {
            Some(rooted) => ImageSource::File(site_root.join(rooted)),
            None => ImageSource::File(page_dir.join(path)),
        }
    }
}

/// Drops `?query` and `#fragment` parts, which never name files.
fn strip_suffixes(src: &str) -> &str {
    src.split(['?', '#']).next().unwrap_or(src)
}

/// One enlargeable unit of article content.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaItem {
    Image {
        key: MediaKey,
        source: ImageSource,
        alt: Option<String>,
    },
    Diagram {
        key: MediaKey,
        diagram: DiagramData,
    },
}

/// How an item reaches the lightbox.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    /// Content must be decoded first; the lightbox shows a loading state.
    Deferred(ImageSource),
    /// Content is ready and is shown at once.
    Immediate(DiagramData),
}

impl MediaItem {
    #[must_use]
    pub fn key(&self) -> MediaKey {
        match self {
            MediaItem::Image { key, .. } | MediaItem::Diagram { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.key().kind
    }

    #[must_use]
    pub fn is_diagram(&self) -> bool {
        self.kind() == MediaKind::Diagram
    }

    #[must_use]
    pub fn render(&self) -> Rendering {
        match self {
            MediaItem::Image { source, .. } => Rendering::Deferred(source.clone()),
            MediaItem::Diagram { diagram, .. } => Rendering::Immediate(diagram.clone()),
        }
    }

    /// Caption shown under the content: the alt text, or the kind's name.
    #[must_use]
    pub fn caption(&self) -> &str {
        match self {
            MediaItem::Image { alt, .. } => alt
                .as_deref()
                .filter(|alt| !alt.trim().is_empty())
                .unwrap_or("Image"),
            MediaItem::Diagram { .. } => "Diagram",
        }
    }
}

/// Ordered media of a page: all images, then all diagrams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSequence {
    items: Vec<MediaItem>,
}

impl MediaSequence {
    /// Concatenates images and diagrams. Each list must already be in
    /// document order.
    #[must_use]
    pub fn new(images: Vec<MediaItem>, diagrams: Vec<MediaItem>) -> Self {
        let mut items = images;
        items.extend(diagrams);
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn position_of(&self, key: MediaKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = MediaKey> + '_ {
        self.items.iter().map(MediaItem::key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(ordinal: usize) -> MediaItem {
        MediaItem::Image {
            key: MediaKey::image(ordinal),
            source: ImageSource::File(PathBuf::from(format!("{ordinal}.png"))),
            alt: None,
        }
    }

    fn diagram(ordinal: usize) -> MediaItem {
        MediaItem::Diagram {
            key: MediaKey::diagram(ordinal),
            diagram: DiagramData::from_markup("<svg width='2' height='2'></svg>"),
        }
    }

    #[test]
    fn sequence_places_images_before_diagrams() {
        let sequence = MediaSequence::new(vec![image(0), image(1)], vec![diagram(0)]);
        let kinds: Vec<_> = sequence.iter().map(MediaItem::kind).collect();
        assert_eq!(kinds, [MediaKind::Image, MediaKind::Image, MediaKind::Diagram]);
        assert_eq!(sequence.position_of(MediaKey::diagram(0)), Some(2));
        assert_eq!(sequence.position_of(MediaKey::diagram(1)), None);
    }

    #[test]
    fn render_is_deferred_for_images_and_immediate_for_diagrams() {
        assert!(matches!(image(0).render(), Rendering::Deferred(_)));
        assert!(matches!(diagram(0).render(), Rendering::Immediate(_)));
    }

    #[test]
    fn caption_falls_back_to_kind_name() {
        let with_alt = MediaItem::Image {
            key: MediaKey::image(0),
            source: ImageSource::Unsupported("data:,".into()),
            alt: Some("Architecture".into()),
        };
        assert_eq!(with_alt.caption(), "Architecture");
        assert_eq!(image(1).caption(), "Image");
        assert_eq!(diagram(0).caption(), "Diagram");
    }

    #[test]
    fn remote_and_inline_sources_are_unsupported() {
        let dir = Path::new("/site/posts");
        let root = Path::new("/site");
        for src in ["https://cdn.example/a.png", "HTTP://x/y.gif", "//cdn/a.png", "data:image/png;base64,AA"] {
            assert_eq!(
                ImageSource::resolve(src, dir, root),
                ImageSource::Unsupported(src.to_string())
            );
        }
    }

    #[test]
    fn local_sources_resolve_against_page_or_root() {
        let dir = Path::new("/site/posts");
        let root = Path::new("/site");
        assert_eq!(
            ImageSource::resolve("/images/a.png?v=2", dir, root),
            ImageSource::File(PathBuf::from("/site/images/a.png"))
        );
        assert_eq!(
            ImageSource::resolve("figures/b.jpg#top", dir, root),
            ImageSource::File(PathBuf::from("/site/posts/figures/b.jpg"))
        );
    }
}
