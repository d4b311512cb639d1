// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Colors, opacities, spacing and sizes shared by the reader and the lightbox.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels, including lightbox control states
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes (header, article column, lightbox controls)
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use post_lens::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let backdrop = Color {
    a: opacity::BACKDROP,
    ..palette::BLACK
};
let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.11, 0.12, 0.13);
    pub const GRAY_800: Color = Color::from_rgb(0.17, 0.18, 0.2);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.45, 0.45);
    pub const GRAY_200: Color = Color::from_rgb(0.8, 0.8, 0.8);
    pub const GRAY_100: Color = Color::from_rgb(0.95, 0.95, 0.95);

    // Brand colors (blue scale)
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const WARNING_500: Color = Color::from_rgb(0.961, 0.620, 0.043);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Dimmed page behind the lightbox.
    pub const BACKDROP: f32 = 0.9;

    /// Lightbox navigation arrow when it can move.
    pub const NAV_ENABLED: f32 = 0.7;

    /// Lightbox navigation arrow at a sequence boundary.
    pub const NAV_DISABLED: f32 = 0.3;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;

    /// Height of the sticky site header.
    pub const HEADER_HEIGHT: f32 = 56.0;

    /// Maximum width of the article column.
    pub const ARTICLE_MAX_WIDTH: f32 = 760.0;

    /// Thickness of the reading progress bar.
    pub const PROGRESS_BAR: f32 = 3.0;

    /// Lightbox control button edge.
    pub const LIGHTBOX_BUTTON: f32 = 44.0;

    /// Lightbox previous/next arrow edge.
    pub const LIGHTBOX_ARROW: f32 = 56.0;

    /// Fraction of the window the lightbox content may occupy.
    pub const LIGHTBOX_CONTENT_RATIO: f32 = 0.9;

    /// Height of a diagram thumbnail in the article.
    pub const DIAGRAM_PREVIEW_HEIGHT: f32 = 280.0;

    pub const TOAST_WIDTH: f32 = 320.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 22.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 17.0;
    pub const BODY: f32 = 15.0;
    pub const BODY_SM: f32 = 13.0;
    pub const CAPTION: f32 = 12.0;

    /// Line height multiplier used by the layout estimate.
    pub const LINE_HEIGHT: f32 = 1.5;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::NAV_DISABLED < opacity::NAV_ENABLED);
    assert!(opacity::BACKDROP > 0.0 && opacity::BACKDROP < 1.0);

    assert!(sizing::LIGHTBOX_CONTENT_RATIO > 0.0 && sizing::LIGHTBOX_CONTENT_RATIO <= 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY > typography::BODY_SM);
};
