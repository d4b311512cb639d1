// SPDX-License-Identifier: MPL-2.0
//! Geometry of the lightbox content area.
//!
//! Diagrams are drawn at `fit × zoom` inside a scrollable whose scrollbars
//! are hidden. Centering padding keeps small content in the middle, and the
//! pan offset is applied by snapping the scrollable away from its centered
//! position.

use crate::ui::design_tokens::sizing;
use iced::widget::scrollable::RelativeOffset;
use iced::{Padding, Point, Rectangle, Size, Vector};

/// Size of the content box for a window of `window` size.
#[must_use]
pub fn content_viewport(window: Size) -> Size {
    Size::new(
        (window.width * sizing::LIGHTBOX_CONTENT_RATIO).max(0.0),
        (window.height * sizing::LIGHTBOX_CONTENT_RATIO).max(0.0),
    )
}

/// Window-space rectangle of the centered content box.
#[must_use]
pub fn content_bounds(window: Size) -> Rectangle {
    let viewport = content_viewport(window);
    Rectangle::new(
        Point::new(
            (window.width - viewport.width) / 2.0,
            (window.height - viewport.height) / 2.0,
        ),
        viewport,
    )
}

/// Scale that fits `content` inside `viewport` without enlarging it.
#[must_use]
pub fn fit_scale(content: Size, viewport: Size) -> f32 {
    if content.width <= 0.0 || content.height <= 0.0 {
        return 1.0;
    }
    let scale = (viewport.width / content.width)
        .min(viewport.height / content.height)
        .min(1.0);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramFrame {
    /// Drawn size of the diagram.
    pub scaled: Size,
    /// Padding that centers `scaled` within the viewport.
    pub padding: Padding,
}

impl DiagramFrame {
    #[must_use]
    pub fn new(content: Size, viewport: Size, zoom: f32) -> Self {
        let scale = fit_scale(content, viewport) * zoom;
        let scaled = Size::new(content.width * scale, content.height * scale);
        let horizontal = ((viewport.width - scaled.width) / 2.0).max(0.0);
        let vertical = ((viewport.height - scaled.height) / 2.0).max(0.0);
        Self {
            scaled,
            padding: Padding {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            },
        }
    }

    /// Scroll position showing the diagram shifted by `pan`.
    ///
    /// Panning right reveals the left part of the diagram, so the offset
    /// moves against the pan. Pans past the diagram edges stop at the edge.
    #[must_use]
    pub fn scroll_offset(&self, viewport: Size, pan: Vector) -> RelativeOffset {
        RelativeOffset {
            x: relative_axis(self.scaled.width, viewport.width, pan.x),
            y: relative_axis(self.scaled.height, viewport.height, pan.y),
        }
    }
}

fn relative_axis(scaled: f32, viewport: f32, pan: f32) -> f32 {
    let max = scaled - viewport;
    if max <= 0.0 {
        return 0.5;
    }
    let absolute = (max / 2.0 - pan).clamp(0.0, max);
    absolute / max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn small_content_is_not_enlarged() {
        assert_eq!(fit_scale(Size::new(100.0, 50.0), Size::new(800.0, 600.0)), 1.0);
    }

    #[test]
    fn large_content_fits_the_tighter_axis() {
        let scale = fit_scale(Size::new(1600.0, 600.0), Size::new(800.0, 600.0));
        assert_abs_diff_eq!(scale, 0.5);
    }

    #[test]
    fn frame_centers_content_with_padding() {
        let frame = DiagramFrame::new(Size::new(200.0, 100.0), Size::new(400.0, 300.0), 1.0);
        assert_eq!(frame.scaled, Size::new(200.0, 100.0));
        assert_eq!(frame.padding.left, 100.0);
        assert_eq!(frame.padding.top, 100.0);
    }

    #[test]
    fn unpanned_magnified_frame_is_centered() {
        let frame = DiagramFrame::new(Size::new(400.0, 300.0), Size::new(400.0, 300.0), 2.0);
        let offset = frame.scroll_offset(Size::new(400.0, 300.0), Vector::ZERO);
        assert_eq!(offset.x, 0.5);
        assert_eq!(offset.y, 0.5);
    }

    #[test]
    fn pan_moves_against_scroll_and_stops_at_edges() {
        let viewport = Size::new(400.0, 300.0);
        let frame = DiagramFrame::new(viewport, viewport, 2.0);
        let offset = frame.scroll_offset(viewport, Vector::new(100.0, -75.0));
        assert_eq!(offset.x, 0.25);
        assert_eq!(offset.y, 0.75);

        let far = frame.scroll_offset(viewport, Vector::new(10_000.0, 0.0));
        assert_eq!(far.x, 0.0);
    }

    #[test]
    fn content_box_is_centered_in_window() {
        let bounds = content_bounds(Size::new(1000.0, 500.0));
        assert_abs_diff_eq!(bounds.width, 900.0, epsilon = 0.01);
        assert_abs_diff_eq!(bounds.x, 50.0, epsilon = 0.01);
        assert_abs_diff_eq!(bounds.y, 25.0, epsilon = 0.01);
    }
}
