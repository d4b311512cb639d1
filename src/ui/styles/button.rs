// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{opacity, palette::WHITE, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Filled brand button for the main action of a screen.
pub fn primary(colors: ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered => colors.link,
            button::Status::Disabled => colors.rule,
            _ => colors.brand_primary,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: WHITE,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Borderless button used for header icons and navigation links.
pub fn flat(colors: ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let (background, text_color) = match status {
            button::Status::Hovered | button::Status::Pressed => {
                (Some(Background::Color(colors.surface_secondary)), colors.link)
            }
            _ => (None, colors.text_primary),
        };
        button::Style {
            background,
            text_color,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Round floating button (scroll to top).
pub fn floating(colors: ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => colors.link,
            _ => colors.brand_primary,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: WHITE,
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::MD,
            snap: true,
        }
    }
}

/// Lightbox overlay control: translucent disc with a white glyph.
///
/// `alpha` scales the whole control (dimmed boundary arrows); `focused`
/// draws the keyboard focus ring.
pub fn lightbox_control(
    alpha: f32,
    focused: bool,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let fill = match status {
            button::Status::Hovered => opacity::OVERLAY_MEDIUM,
            button::Status::Pressed => opacity::OVERLAY_STRONG,
            _ => opacity::OVERLAY_SUBTLE,
        };
        button::Style {
            background: Some(Background::Color(Color {
                a: fill * alpha,
                ..WHITE
            })),
            text_color: Color { a: alpha, ..WHITE },
            border: Border {
                color: if focused { WHITE } else { Color::TRANSPARENT },
                width: if focused { 2.0 } else { 0.0 },
                radius: radius::FULL.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Small copy button laid over code blocks.
pub fn code_copy(colors: ColorScheme, copied: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let text_color = if copied {
            colors.success
        } else {
            colors.text_secondary
        };
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => colors.surface_secondary,
            _ => colors.code_background,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: colors.rule,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Invisible button wrapping enlargeable media on the page.
pub fn media(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: Color::TRANSPARENT,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_color() {
        let colors = ColorScheme::light();
        let style = primary(colors)(&Theme::Light, button::Status::Active);
        assert_eq!(style.background, Some(Background::Color(colors.brand_primary)));
    }

    #[test]
    fn dimmed_lightbox_control_is_fainter() {
        let enabled = lightbox_control(opacity::NAV_ENABLED, false)(&Theme::Dark, button::Status::Active);
        let disabled = lightbox_control(opacity::NAV_DISABLED, false)(&Theme::Dark, button::Status::Active);
        assert!(disabled.text_color.a < enabled.text_color.a);
    }

    #[test]
    fn focused_control_has_a_ring() {
        let style = lightbox_control(1.0, true)(&Theme::Dark, button::Status::Active);
        assert!(style.border.width > 0.0);
    }

    #[test]
    fn copied_state_uses_success_color() {
        let colors = ColorScheme::dark();
        let style = code_copy(colors, true)(&Theme::Dark, button::Status::Active);
        assert_eq!(style.text_color, colors.success);
    }
}
