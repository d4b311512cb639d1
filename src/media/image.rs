// SPDX-License-Identifier: MPL-2.0
//! Decoding of article images (PNG, JPEG, GIF, WebP, SVG, ...).

use super::ImageSource;
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use resvg::usvg;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes the image at `path`.
///
/// SVG files are rasterized with resvg at their intrinsic size; every other
/// extension goes through the `image` crate's format sniffing.
///
/// # Errors
///
/// - [`Error::Io`] when the file cannot be read
/// - [`Error::Image`] when the bytes are not a decodable image
/// - [`Error::Svg`] when an SVG cannot be parsed or has no area
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    let bytes = fs::read(path)?;
    if is_svg {
        rasterize_svg(&bytes)
    } else {
        let img = image_rs::load_from_memory(&bytes)?;
        let (width, height) = img.dimensions();
        Ok(ImageData::from_rgba(width, height, img.to_rgba8().into_vec()))
    }
}

fn rasterize_svg(bytes: &[u8]) -> Result<ImageData> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("failed to allocate SVG pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(ImageData::from_rgba(width, height, pixmap.take()))
}

/// Loads an image source. Remote and data URLs are never fetched.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSource`] for non-file sources, otherwise the
/// errors of [`load_image`].
pub fn load_source(source: &ImageSource) -> Result<ImageData> {
    match source {
        ImageSource::File(path) => load_image(path),
        ImageSource::Unsupported(url) => Err(Error::UnsupportedSource(url.clone())),
    }
}

/// Decodes `source` on the blocking thread pool.
///
/// # Errors
///
/// Same as [`load_source`], plus [`Error::Io`] if the worker panicked.
pub async fn load_source_async(source: ImageSource) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || load_source(&source))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_png_image_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");
        RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]))
            .save(&image_path)
            .expect("failed to write temporary png");

        let data = load_image(&image_path).expect("png should load successfully");
        assert_eq!((data.width, data.height), (4, 2));
    }

    #[test]
    fn load_svg_image_rasterizes_successfully() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let svg_path = temp_dir.path().join("figure.SVG");
        fs::write(
            &svg_path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="6" height="3"><rect width="6" height="3" fill="blue"/></svg>"#,
        )
        .expect("failed to write svg");

        let data = load_image(&svg_path).expect("svg should load successfully");
        assert_eq!((data.width, data.height), (6, 3));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_image(temp_dir.path().join("nope.png"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn garbage_bytes_are_image_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("broken.png");
        fs::write(&bad_path, b"not a png").expect("failed to write invalid data");

        assert!(matches!(load_image(&bad_path), Err(Error::Image(_))));
    }

    #[test]
    fn zero_sized_svg_is_svg_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let svg_path = temp_dir.path().join("zero.svg");
        fs::write(
            &svg_path,
            r"<svg xmlns='http://www.w3.org/2000/svg' width='0' height='10'></svg>",
        )
        .expect("write svg");

        assert!(matches!(load_image(&svg_path), Err(Error::Svg(_))));
    }

    #[test]
    fn remote_source_is_never_fetched() {
        let source = ImageSource::Unsupported("https://example.com/a.png".into());
        assert_eq!(
            load_source(&source).unwrap_err(),
            Error::UnsupportedSource("https://example.com/a.png".into())
        );
    }

    #[tokio::test]
    async fn async_loader_reports_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let source = ImageSource::File(temp_dir.path().join("missing.jpg"));
        assert!(matches!(load_source_async(source).await, Err(Error::Io(_))));
    }
}
