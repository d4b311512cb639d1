// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module.
//!
//! Icons are small monochrome SVG documents drawn with `currentColor`, so a
//! single set serves both themes and the dark lightbox overlay: callers tint
//! them through the `svg` widget style. Handles are created once and cached
//! in a `OnceLock`.
//!
//! # Naming Convention
//!
//! Icons use visual names (`chevron_left`, `plus`) rather than the action
//! they trigger.

use iced::widget::svg::{self, Handle, Svg};
use iced::{Color, Length, Theme};
use std::sync::OnceLock;

/// Defines an icon function returning an `Svg` with a cached handle.
macro_rules! define_icon {
    ($name:ident, $body:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static, Theme> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            let handle = HANDLE.get_or_init(|| {
                Handle::from_memory(
                    concat!(
                        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                        $body,
                        "</svg>"
                    )
                    .as_bytes(),
                )
            });
            Svg::new(handle.clone())
        }
    };
}

// =============================================================================
// Lightbox
// =============================================================================

define_icon!(
    cross,
    r#"<path d="M6 6l12 12M18 6L6 18"/>"#,
    "Cross: two diagonal strokes."
);
define_icon!(
    chevron_left,
    r#"<path d="M15 5l-7 7 7 7"/>"#,
    "Chevron pointing left."
);
define_icon!(
    chevron_right,
    r#"<path d="M9 5l7 7-7 7"/>"#,
    "Chevron pointing right."
);
define_icon!(
    plus,
    r#"<circle cx="11" cy="11" r="7"/><path d="M11 8v6M8 11h6M16 16l5 5"/>"#,
    "Magnifier with a plus sign."
);
define_icon!(
    minus,
    r#"<circle cx="11" cy="11" r="7"/><path d="M8 11h6M16 16l5 5"/>"#,
    "Magnifier with a minus sign."
);
define_icon!(
    frame,
    r#"<path d="M4 9V4h5M15 4h5v5M20 15v5h-5M9 20H4v-5"/>"#,
    "Four corners of a frame."
);

// =============================================================================
// Header and page
// =============================================================================

define_icon!(
    hamburger,
    r#"<path d="M4 6h16M4 12h16M4 18h16"/>"#,
    "Three horizontal bars."
);
define_icon!(
    sun,
    r#"<circle cx="12" cy="12" r="4"/><path d="M12 2v2M12 20v2M2 12h2M20 12h2M4.9 4.9l1.4 1.4M17.7 17.7l1.4 1.4M4.9 19.1l1.4-1.4M17.7 6.3l1.4-1.4"/>"#,
    "Sun: circle with rays."
);
define_icon!(
    moon,
    r#"<path d="M21 12.8A9 9 0 1 1 11.2 3a7 7 0 0 0 9.8 9.8z"/>"#,
    "Crescent moon."
);
define_icon!(
    arrow_up,
    r#"<path d="M12 19V5M5 12l7-7 7 7"/>"#,
    "Arrow pointing up."
);
define_icon!(
    copy,
    r#"<rect x="9" y="9" width="11" height="11" rx="2"/><path d="M5 15V5a2 2 0 0 1 2-2h8"/>"#,
    "Two overlapping sheets."
);
define_icon!(checkmark, r#"<path d="M5 12l5 5 9-10"/>"#, "Check mark.");
define_icon!(
    folder,
    r#"<path d="M3 7a2 2 0 0 1 2-2h4l2 2h8a2 2 0 0 1 2 2v8a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/>"#,
    "Folder outline."
);
define_icon!(
    warning,
    r#"<path d="M12 3l10 18H2z"/><path d="M12 10v4M12 17v.5"/>"#,
    "Triangle with an exclamation mark."
);
define_icon!(
    info,
    r#"<circle cx="12" cy="12" r="9"/><path d="M12 11v5M12 7.5v.5"/>"#,
    "Circle with the letter i."
);

/// Sizes an icon to a square of `size` pixels.
pub fn sized(icon: Svg<'static, Theme>, size: f32) -> Svg<'static, Theme> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}

/// Tints an icon with a fixed color.
pub fn tinted(icon: Svg<'static, Theme>, color: Color) -> Svg<'static, Theme> {
    icon.style(move |_theme: &Theme, _status: svg::Status| svg::Style { color: Some(color) })
}

/// Tints an icon with the theme's text color.
pub fn themed(icon: Svg<'static, Theme>) -> Svg<'static, Theme> {
    icon.style(|theme: &Theme, _status: svg::Status| svg::Style {
        color: Some(theme.palette().text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_cached() {
        // Both calls must succeed and share the lazily created handle.
        let _ = cross();
        let _ = cross();
        let _ = sized(sun(), 16.0);
        let _ = tinted(moon(), Color::WHITE);
        let _ = themed(hamburger());
    }
}
