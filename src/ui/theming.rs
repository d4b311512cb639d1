// SPDX-License-Identifier: MPL-2.0
//! Light and dark reading themes.

use crate::ui::design_tokens::{opacity, palette};
use iced::Color;
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_secondary: Color,
    pub code_background: Color,

    pub text_primary: Color,
    pub text_secondary: Color,

    pub brand_primary: Color,
    pub link: Color,
    pub rule: Color,

    pub error: Color,
    pub success: Color,

    pub backdrop: Color,
    pub overlay_text: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,
            code_background: Color::from_rgb(0.96, 0.97, 0.98),

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            brand_primary: palette::PRIMARY_500,
            link: palette::PRIMARY_600,
            rule: palette::GRAY_200,

            error: palette::ERROR_500,
            success: palette::SUCCESS_500,

            backdrop: Color {
                a: opacity::BACKDROP,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_900,
            surface_secondary: palette::GRAY_800,
            code_background: Color::from_rgb(0.14, 0.15, 0.17),

            text_primary: palette::GRAY_100,
            text_secondary: palette::GRAY_200,

            brand_primary: palette::PRIMARY_400,
            link: palette::PRIMARY_400,
            rule: palette::GRAY_700,

            error: palette::ERROR_500,
            success: palette::SUCCESS_500,

            backdrop: Color {
                a: opacity::BACKDROP,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }
}

/// Persisted reading theme. Light unless the reader chose otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::light(),
            ThemeMode::Dark => ColorScheme::dark(),
        }
    }

    /// Built-in Iced theme backing the widgets.
    #[must_use]
    pub fn iced_theme(self) -> iced::Theme {
        match self {
            ThemeMode::Light => iced::Theme::Light,
            ThemeMode::Dark => iced::Theme::Dark,
        }
    }

    /// Toggle icon: a sun offers the way out of dark mode, a moon the way in.
    #[must_use]
    pub fn toggle_icon(self) -> ToggleIcon {
        match self {
            ThemeMode::Dark => ToggleIcon::Sun,
            ThemeMode::Light => ToggleIcon::Moon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Sun,
    Moon,
}
