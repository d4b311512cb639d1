// SPDX-License-Identifier: MPL-2.0
//! Article column: the page's blocks, enlargeable media and code blocks.
//!
//! Media bound to the lightbox are clickable and take part in keyboard
//! focus (Tab / Shift+Tab, then Enter or Space to open). There is no layout
//! engine to query, so anchor scrolling relies on [`estimate_block_tops`],
//! which mirrors the sizes this view gives each block.

use crate::i18n::fluent::I18n;
use crate::lightbox::Bindings;
use crate::media::{ImageSource, MediaKey};
use crate::page::{Block, DiagramState, ListItem, Page};
use crate::ui::code_copy;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::font::Weight;
use iced::widget::image::{self, Image};
use iced::widget::svg::Svg;
use iced::widget::{button, mouse_area, Column, Container, Row, Space, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, ContentFit, Element, Font, Length,
};

/// Offset of the first block inside the page scrollable: the header height
/// plus breathing room.
pub const ARTICLE_TOP: f32 = sizing::HEADER_HEIGHT + spacing::XL;

const BLOCK_SPACING: f32 = spacing::MD;
const LIST_SPACING: f32 = spacing::XXS;
const CODE_SIZE: f32 = typography::BODY_SM;
/// Average glyph advance as a fraction of the font size.
const PROPORTIONAL_ADVANCE: f32 = 0.5;
const MONOSPACE_ADVANCE: f32 = 0.6;

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

#[derive(Debug, Clone)]
pub enum Message {
    OpenMedia(MediaKey),
    LinkPressed(String),
    Code(code_copy::Message),
}

/// Keyboard focus among the page's enlargeable media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFocus {
    focused: Option<MediaKey>,
}

impl MediaFocus {
    #[must_use]
    pub fn focused(&self) -> Option<MediaKey> {
        self.focused
    }

    /// Moves focus to the next (or previous) key of `order`, wrapping at
    /// either end. Returns the newly focused key.
    pub fn cycle(&mut self, order: &[MediaKey], backwards: bool) -> Option<MediaKey> {
        if order.is_empty() {
            self.focused = None;
            return None;
        }
        let len = order.len();
        let current = self
            .focused
            .and_then(|key| order.iter().position(|k| *k == key));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        self.focused = Some(order[next]);
        self.focused
    }

    /// Drops focus from a key that is no longer present.
    pub fn retain(&mut self, order: &[MediaKey]) {
        if self.focused.is_some_and(|key| !order.contains(&key)) {
            self.focused = None;
        }
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }
}

/// Bound media keys in document order, the order Tab walks them.
#[must_use]
pub fn focus_order(page: &Page, bindings: &Bindings) -> Vec<MediaKey> {
    page.blocks
        .iter()
        .filter_map(Block::media_key)
        .filter(|key| bindings.is_bound(*key))
        .collect()
}

/// Index of the block showing `key`.
#[must_use]
pub fn block_of(page: &Page, key: MediaKey) -> Option<usize> {
    page.blocks
        .iter()
        .position(|block| block.media_key() == Some(key))
}

/// Width of the article column in a window `window_width` wide.
#[must_use]
pub fn column_width(window_width: f32) -> f32 {
    (window_width - 2.0 * spacing::MD).clamp(1.0, sizing::ARTICLE_MAX_WIDTH)
}

/// Estimated top of every block within the page scrollable.
#[must_use]
pub fn estimate_block_tops(blocks: &[Block], column_width: f32) -> Vec<f32> {
    let mut top = ARTICLE_TOP;
    blocks
        .iter()
        .map(|block| {
            let this = top;
            top += block_height(block, column_width) + BLOCK_SPACING;
            this
        })
        .collect()
}

fn text_height(text: &str, size: f32, advance: f32, width: f32) -> f32 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let per_line = ((width / (size * advance)).floor() as usize).max(1);
    let lines: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(per_line).max(1))
        .sum::<usize>()
        .max(1);
    #[allow(clippy::cast_precision_loss)]
    let lines = lines as f32;
    lines * size * typography::LINE_HEIGHT
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => typography::TITLE_LG,
        2 => typography::TITLE_MD,
        3 => typography::TITLE_SM,
        _ => typography::BODY_LG,
    }
}

fn block_height(block: &Block, width: f32) -> f32 {
    match block {
        Block::Heading { level, text, .. } => {
            text_height(text, heading_size(*level), PROPORTIONAL_ADVANCE, width)
        }
        Block::Paragraph(text) => text_height(text, typography::BODY, PROPORTIONAL_ADVANCE, width),
        Block::List { items, .. } => {
            let rows: f32 = items
                .iter()
                .map(|item| {
                    let padding = if item.link.is_some() {
                        2.0 * spacing::XXS
                    } else {
                        0.0
                    };
                    text_height(&item.text, typography::BODY, PROPORTIONAL_ADVANCE, width) + padding
                })
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let gaps = items.len().saturating_sub(1) as f32 * LIST_SPACING;
            rows + gaps
        }
        Block::Quote(text) => {
            text_height(
                text,
                typography::BODY,
                PROPORTIONAL_ADVANCE,
                width - 2.0 * spacing::MD,
            ) + 2.0 * spacing::SM
        }
        Block::Rule => 1.0,
        Block::Code { code, .. } => {
            text_height(code, CODE_SIZE, MONOSPACE_ADVANCE, width - 2.0 * spacing::MD)
                + 2.0 * spacing::SM
        }
        Block::Image { .. } | Block::Diagram { .. } => sizing::DIAGRAM_PREVIEW_HEIGHT,
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: ColorScheme,
    pub page: &'a Page,
    pub bindings: &'a Bindings,
    pub focused: Option<MediaKey>,
    pub code_copy: &'a code_copy::State,
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(BLOCK_SPACING)
        .max_width(sizing::ARTICLE_MAX_WIDTH)
        .width(Length::Fill);

    if ctx.page.blocks.is_empty() {
        column = column.push(
            Text::new(ctx.i18n.tr("article-empty"))
                .size(typography::BODY)
                .color(ctx.colors.text_secondary),
        );
    }

    for (index, block) in ctx.page.blocks.iter().enumerate() {
        column = column.push(block_view(ctx, index, block));
    }

    Container::new(column)
        .width(Length::Fill)
        .padding([0.0, spacing::MD])
        .align_x(Horizontal::Center)
        .into()
}

fn block_view<'a>(ctx: &ViewContext<'a>, index: usize, block: &'a Block) -> Element<'a, Message> {
    let colors = ctx.colors;
    match block {
        Block::Heading { level, text, .. } => Text::new(text.as_str())
            .size(heading_size(*level))
            .line_height(typography::LINE_HEIGHT)
            .font(BOLD)
            .into(),
        Block::Paragraph(text) => paragraph(text, colors.text_primary),
        Block::List { ordered, items } => list_view(*ordered, items, colors),
        Block::Quote(text) => Container::new(paragraph(text, colors.text_secondary))
            .width(Length::Fill)
            .padding([spacing::SM, spacing::MD])
            .style(styles::container::quote(colors))
            .into(),
        Block::Rule => Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fixed(1.0))
            .style(styles::container::rule(colors))
            .into(),
        Block::Code { code, .. } => code_view(ctx, index, code),
        Block::Image { key, source, alt } => {
            let preview = image_preview(ctx, source, alt.as_deref());
            media_frame(ctx, *key, preview)
        }
        Block::Diagram { key, state } => match state {
            DiagramState::Rendered(diagram) => {
                let preview = Container::new(
                    Svg::new(diagram.handle().clone())
                        .width(Length::Fill)
                        .height(Length::Fill),
                )
                .width(Length::Fill)
                .height(Length::Fixed(sizing::DIAGRAM_PREVIEW_HEIGHT))
                .padding(spacing::XS)
                .style(styles::overlay::diagram_sheet)
                .into();
                media_frame(ctx, *key, preview)
            }
            DiagramState::Pending(_) => placeholder(
                icons::info(),
                ctx.i18n.tr("article-diagram-pending"),
                colors,
            ),
        },
    }
}

fn paragraph<'a>(text: &'a str, color: iced::Color) -> Element<'a, Message> {
    Text::new(text)
        .size(typography::BODY)
        .line_height(typography::LINE_HEIGHT)
        .color(color)
        .into()
}

fn list_view<'a>(ordered: bool, items: &'a [ListItem], colors: ColorScheme) -> Element<'a, Message> {
    items
        .iter()
        .enumerate()
        .fold(
            Column::new().spacing(LIST_SPACING),
            |column, (i, item)| {
                let marker = if ordered {
                    format!("{}.", i + 1)
                } else {
                    "•".to_string()
                };
                let body: Element<'a, Message> = match &item.link {
                    Some(href) => button(
                        Text::new(item.text.as_str())
                            .size(typography::BODY)
                            .color(colors.link),
                    )
                    .on_press(Message::LinkPressed(href.clone()))
                    .padding([spacing::XXS, 0.0])
                    .style(styles::button::flat(colors))
                    .into(),
                    None => paragraph(&item.text, colors.text_primary),
                };
                column.push(
                    Row::new()
                        .spacing(spacing::XS)
                        .push(Text::new(marker).size(typography::BODY))
                        .push(body),
                )
            },
        )
        .into()
}

fn code_view<'a>(ctx: &ViewContext<'a>, index: usize, code: &'a str) -> Element<'a, Message> {
    let colors = ctx.colors;
    let body = Container::new(
        Text::new(code)
            .size(CODE_SIZE)
            .line_height(typography::LINE_HEIGHT)
            .font(Font::MONOSPACE),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::MD])
    .style(styles::container::code_block(colors));

    let mut layers = Stack::new().width(Length::Fill).push(body);

    if ctx.code_copy.shows_button(index) {
        let copied = ctx.code_copy.is_copied(index);
        let (icon, label) = if copied {
            (icons::checkmark(), ctx.i18n.tr("code-copied"))
        } else {
            (icons::copy(), ctx.i18n.tr("code-copy"))
        };
        let copy_button = button(
            Row::new()
                .spacing(spacing::XXS)
                .align_y(Vertical::Center)
                .push(icons::sized(icons::themed(icon), sizing::ICON_SM))
                .push(Text::new(label).size(typography::CAPTION)),
        )
        .on_press(Message::Code(code_copy::Message::Copy(index)))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::code_copy(colors, copied));

        layers = layers.push(
            Container::new(copy_button)
                .width(Length::Fill)
                .padding(spacing::XXS)
                .align_x(Horizontal::Right),
        );
    }

    mouse_area(layers)
        .on_enter(Message::Code(code_copy::Message::Hovered(Some(index))))
        .on_exit(Message::Code(code_copy::Message::Hovered(None)))
        .into()
}

fn image_preview<'a>(
    ctx: &ViewContext<'a>,
    source: &ImageSource,
    alt: Option<&str>,
) -> Element<'a, Message> {
    match source {
        ImageSource::File(path) => Image::new(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::DIAGRAM_PREVIEW_HEIGHT))
            .content_fit(ContentFit::ScaleDown)
            .into(),
        ImageSource::Unsupported(_) => {
            let label = alt
                .filter(|alt| !alt.is_empty())
                .map_or_else(|| ctx.i18n.tr("article-image-unavailable"), str::to_string);
            placeholder(icons::warning(), label, ctx.colors)
        }
    }
}

fn placeholder<'a>(icon: Svg<'static>, label: String, colors: ColorScheme) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .align_x(Horizontal::Center)
            .push(icons::sized(icons::tinted(icon, colors.text_secondary), sizing::ICON_LG))
            .push(Text::new(label).size(typography::BODY_SM)),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::DIAGRAM_PREVIEW_HEIGHT))
    .align_x(Horizontal::Center)
    .align_y(Vertical::Center)
    .style(styles::container::placeholder(colors))
    .into()
}

/// Wraps a media preview; bound media get a pointer, a click handler and
/// the focus ring.
fn media_frame<'a>(
    ctx: &ViewContext<'a>,
    key: Option<MediaKey>,
    preview: Element<'a, Message>,
) -> Element<'a, Message> {
    let Some(key) = key.filter(|key| ctx.bindings.is_bound(*key)) else {
        return preview;
    };
    let framed = Container::new(preview)
        .width(Length::Fill)
        .padding(2.0)
        .style(styles::container::media_frame(
            ctx.colors,
            ctx.focused == Some(key),
        ));
    mouse_area(framed)
        .on_press(Message::OpenMedia(key))
        .interaction(mouse::Interaction::Pointer)
        .into()
}
