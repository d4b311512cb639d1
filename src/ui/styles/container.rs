// SPDX-License-Identifier: MPL-2.0
//! Container styles for the reading surface.

use crate::ui::design_tokens::{radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Page background.
pub fn surface(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        ..Default::default()
    }
}

/// Sticky site header with a bottom rule.
pub fn header(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: colors.rule,
            width: 1.0,
            radius: 0.0.into(),
        },
        shadow: shadow::NONE,
        ..Default::default()
    }
}

/// Drop-down panel of the collapsed mobile menu.
pub fn menu_panel(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: colors.rule,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

pub fn code_block(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.code_background)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: colors.rule,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Left bar of a block quote.
pub fn quote(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_secondary),
        border: Border {
            color: colors.brand_primary,
            width: 0.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

/// Frame around enlargeable media; `focused` shows the keyboard focus ring.
pub fn media_frame(colors: ColorScheme, focused: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        border: Border {
            color: if focused {
                colors.brand_primary
            } else {
                Color::TRANSPARENT
            },
            width: 2.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

/// Horizontal rule between sections.
pub fn rule(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.rule)),
        ..Default::default()
    }
}

/// Box standing in for an image that cannot be shown inline.
pub fn placeholder(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_secondary),
        border: Border {
            color: colors.rule,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Filled part of the reading progress bar.
pub fn progress_fill(colors: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(colors.brand_primary)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_ring_only_when_focused() {
        let colors = ColorScheme::light();
        let focused = media_frame(colors, true)(&Theme::Light);
        let idle = media_frame(colors, false)(&Theme::Light);
        assert_eq!(focused.border.color, colors.brand_primary);
        assert_eq!(idle.border.color, Color::TRANSPARENT);
    }
}
