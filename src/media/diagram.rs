// SPDX-License-Identifier: MPL-2.0
//! Inline vector diagrams picked up from rendered article markup.

use iced::widget::svg;
use iced::Size;
use resvg::usvg;
use std::sync::Arc;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Size assumed when the markup carries no usable dimensions.
const FALLBACK_SIZE: Size = Size::new(800.0, 600.0);

/// A rendered diagram: its SVG markup plus a widget handle built from it.
///
/// Cloning is cheap; both the markup and the handle are shared.
#[derive(Debug, Clone)]
pub struct DiagramData {
    markup: Arc<str>,
    handle: svg::Handle,
    size: Size,
}

impl DiagramData {
    /// Builds a diagram from inline `<svg>` markup.
    ///
    /// HTML documents routinely omit the SVG namespace on inline graphics,
    /// which XML renderers require, so it is added when missing.
    #[must_use]
    pub fn from_markup(markup: &str) -> Self {
        let markup: Arc<str> = ensure_namespace(markup).into();
        let size = intrinsic_size(&markup).unwrap_or(FALLBACK_SIZE);
        let handle = svg::Handle::from_memory(markup.as_bytes().to_vec());
        Self {
            markup,
            handle,
            size,
        }
    }

    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn handle(&self) -> &svg::Handle {
        &self.handle
    }

    /// Intrinsic size of the graphic in logical pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

impl PartialEq for DiagramData {
    fn eq(&self, other: &Self) -> bool {
        self.markup == other.markup
    }
}

fn ensure_namespace(markup: &str) -> String {
    let trimmed = markup.trim();
    let Some(rest) = trimmed.strip_prefix("<svg") else {
        return trimmed.to_string();
    };
    let tag_end = rest.find('>').unwrap_or(rest.len());
    if rest[..tag_end].contains("xmlns=") {
        trimmed.to_string()
    } else {
        format!("<svg xmlns=\"{SVG_NAMESPACE}\"{rest}")
    }
}

fn intrinsic_size(markup: &str) -> Option<Size> {
    match usvg::Tree::from_str(markup, &usvg::Options::default()) {
        Ok(tree) => {
            let size = tree.size();
            (size.width() > 0.0 && size.height() > 0.0)
                .then(|| Size::new(size.width(), size.height()))
        }
        Err(err) => {
            tracing::warn!(error = %err, "diagram markup is not valid SVG");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_is_added_when_missing() {
        let diagram = DiagramData::from_markup(r#"<svg width="10" height="5"><rect/></svg>"#);
        assert!(diagram.markup().starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width"#));
        assert_eq!(diagram.size(), Size::new(10.0, 5.0));
    }

    #[test]
    fn existing_namespace_is_kept() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 20"></svg>"#;
        let diagram = DiagramData::from_markup(markup);
        assert_eq!(diagram.markup(), markup);
        assert_eq!(diagram.size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn invalid_markup_uses_fallback_size() {
        let diagram = DiagramData::from_markup("<svg><g></svg>");
        assert_eq!(diagram.size(), FALLBACK_SIZE);
    }

    #[test]
    fn clones_share_markup() {
        let diagram = DiagramData::from_markup("<svg width='1' height='1'></svg>");
        let copy = diagram.clone();
        assert!(Arc::ptr_eq(&diagram.markup, &copy.markup));
        assert_eq!(diagram, copy);
    }
}
