// SPDX-License-Identifier: MPL-2.0
//! Rendered blog pages and the content they expose to the reader.
//!
//! A [`Page`] is built from a server-rendered HTML file: the site header
//! (title and navigation links), the article as a flat list of [`Block`]s,
//! and the [`MediaSequence`] the lightbox walks through.
//!
//! - [`parser`] turns HTML text into a [`Page`]
//! - [`watcher`] notices when the page file changes on disk
//! - [`rescan`] debounces those notifications and retries while diagrams
//!   are still being rendered

pub mod parser;
pub mod rescan;
pub mod watcher;

use crate::error::Result;
use crate::media::{DiagramData, ImageSource, MediaKey, MediaSequence};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    /// Fragment target when the link points into the current page.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        anchor_target(&self.href)
    }
}

/// Returns the id named by an in-page `#fragment` link.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub text: String,
    /// Set when the item is nothing but a single link (tables of contents).
    pub link: Option<String>,
}

/// Rendering state of a diagram element.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramState {
    Rendered(DiagramData),
    /// Source text still waiting for the diagram renderer.
    Pending(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        id: Option<String>,
        text: String,
    },
    Paragraph(String),
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Quote(String),
    Rule,
    Code {
        language: Option<String>,
        code: String,
    },
    /// `key` is set only for images inside the article content area.
    Image {
        key: Option<MediaKey>,
        source: ImageSource,
        alt: Option<String>,
    },
    Diagram {
        key: Option<MediaKey>,
        state: DiagramState,
    },
}

impl Block {
    /// Media key of an enlargeable block that is ready to be shown.
    #[must_use]
    pub fn media_key(&self) -> Option<MediaKey> {
        match self {
            Block::Image { key, .. } => *key,
            Block::Diagram {
                key,
                state: DiagramState::Rendered(_),
            } => *key,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub path: PathBuf,
    /// Text of the `.site-title` element.
    pub site_title: Option<String>,
    /// Text of the document `<title>`.
    pub document_title: Option<String>,
    pub nav_links: Vec<NavLink>,
    pub blocks: Vec<Block>,
    pub media: MediaSequence,
    /// Diagrams in the content area that have not been rendered yet.
    pub pending_diagrams: usize,
    /// Whether the page has a `.post-content` article (reading progress).
    pub is_post: bool,
}

impl Page {
    /// Window title: the document title, else the site title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.document_title
            .as_deref()
            .or(self.site_title.as_deref())
    }

    /// Index of the block carrying `id`, for anchor scrolling.
    #[must_use]
    pub fn block_with_id(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| {
            matches!(block, Block::Heading { id: Some(block_id), .. } if block_id == id)
        })
    }

    #[must_use]
    pub fn has_pending_diagrams(&self) -> bool {
        self.pending_diagrams > 0
    }
}

/// Reads and parses the page at `path`.
///
/// Root-relative image sources resolve against `site_root`, falling back to
/// the page's own directory.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] when the file cannot be read and
/// [`crate::error::Error::Parse`] when nothing could be recovered from it.
pub fn load_page(path: &Path, site_root: Option<&Path>) -> Result<Page> {
    let html = std::fs::read_to_string(path)?;
    let page_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let site_root = site_root.unwrap_or(page_dir);

    let mut page = parser::parse(&html, page_dir, site_root)?;
    page.path = path.to_path_buf();

    tracing::info!(
        path = %path.display(),
        blocks = page.blocks.len(),
        media = page.media.len(),
        pending = page.pending_diagrams,
        "page loaded"
    );
    Ok(page)
}

/// Async wrapper running [`load_page`] on the blocking pool.
///
/// # Errors
///
/// Same as [`load_page`].
pub async fn load_page_async(path: PathBuf, site_root: Option<PathBuf>) -> Result<Page> {
    tokio::task::spawn_blocking(move || load_page(&path, site_root.as_deref()))
        .await
        .map_err(|e| crate::error::Error::Io(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn anchor_target_only_matches_fragments() {
        assert_eq!(anchor_target("#setup"), Some("setup"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/posts/#setup"), None);
    }

    #[test]
    fn load_page_resolves_images_against_page_dir() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("post.html");
        fs::write(
            &path,
            r#"<div class="post-content"><img src="a.png" alt="A"></div>"#,
        )
        .expect("write page");

        let page = load_page(&path, None).expect("page loads");
        assert_eq!(page.path, path);
        match &page.blocks[0] {
            Block::Image { source, .. } => {
                assert_eq!(source, &ImageSource::File(dir.path().join("a.png")));
            }
            other => panic!("expected image block, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_page_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let result = load_page(&dir.path().join("missing.html"), None);
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn block_with_id_finds_headings() {
        let page = Page {
            blocks: vec![
                Block::Paragraph("intro".into()),
                Block::Heading {
                    level: 2,
                    id: Some("usage".into()),
                    text: "Usage".into(),
                },
            ],
            ..Page::default()
        };
        assert_eq!(page.block_with_id("usage"), Some(1));
        assert_eq!(page.block_with_id("missing"), None);
    }
}
