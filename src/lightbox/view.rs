// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay rendering.
//!
//! Layers, bottom to top: the dimmed backdrop (a press closes), the content
//! box (presses are swallowed), then the controls, caption and counter.

use super::component::{Content, Message, Phase, State, SCROLLABLE_ID};
use super::layout::{self, DiagramFrame};
use super::subcomponents::focus::Control;
use super::subcomponents::navigation;
use crate::i18n::fluent::I18n;
use crate::media::{DiagramData, ImageData};
use crate::ui::design_tokens::{opacity, palette::WHITE, radius, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use crate::ui::widgets::{pan_surface, AnimatedSpinner};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::svg::Svg;
use iced::widget::{
    button, container, mouse_area, opaque, Column, Container, Id, Image, Row, Scrollable, Space,
    Stack, Text,
};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, Element, Length, Size,
};

/// Backdrop strength while the close transition runs.
const CLOSING_FADE: f32 = 0.5;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    match state.phase() {
        Phase::Closed => Space::new().width(Length::Shrink).height(Length::Shrink).into(),
        Phase::Closing => Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop(CLOSING_FADE))
            .into(),
        Phase::Loading | Phase::Open => opaque(shown(state, &ctx)),
    }
}

fn shown<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let backdrop = mouse_area(
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop(1.0)),
    )
    .on_press(Message::BackdropPressed);

    let content = Container::new(mouse_area(content_box(state, ctx)).on_press(Message::ContentPressed))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(content)
        .push(controls(state, ctx))
        .into()
}

fn content_box<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let viewport = layout::content_viewport(state.window_size());
    match state.content() {
        Content::Diagram(diagram) => diagram_view(state, diagram, viewport),
        Content::Image(image) => image_view(image, viewport),
        Content::Failed => failed_view(),
        Content::None => loading_view(state, ctx),
    }
}

fn diagram_view<'a>(state: &State, diagram: &'a DiagramData, viewport: Size) -> Element<'a, Message> {
    let frame = DiagramFrame::new(diagram.size(), viewport, state.zoom_level().value());

    let sheet = Container::new(
        Svg::new(diagram.handle().clone())
            .width(Length::Fixed(frame.scaled.width))
            .height(Length::Fixed(frame.scaled.height)),
    )
    .style(styles::overlay::diagram_sheet);

    let scrollable = Scrollable::new(Container::new(sheet).padding(frame.padding))
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fixed(viewport.width))
        .height(Length::Fixed(viewport.height))
        .direction(Direction::Both {
            vertical: Scrollbar::hidden(),
            horizontal: Scrollbar::hidden(),
        });

    let interaction = if state.is_dragging() {
        mouse::Interaction::Grabbing
    } else if state.zoom_level().is_magnified() {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::default()
    };

    mouse_area(pan_surface(scrollable))
        .interaction(interaction)
        .into()
}

fn image_view(image: &ImageData, viewport: Size) -> Element<'_, Message> {
    #[allow(clippy::cast_precision_loss)]
    let natural = Size::new(image.width as f32, image.height as f32);
    let scale = layout::fit_scale(natural, viewport);

    Image::new(image.handle.clone())
        .width(Length::Fixed((natural.width * scale).max(1.0)))
        .height(Length::Fixed((natural.height * scale).max(1.0)))
        .into()
}

fn failed_view<'a>() -> Element<'a, Message> {
    Container::new(icons::sized(icons::tinted(icons::warning(), WHITE), sizing::ICON_LG * 2.0))
        .padding(spacing::LG)
        .into()
}

fn loading_view<'a>(state: &State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .push(AnimatedSpinner::new(WHITE, state.spinner_rotation()).into_element())
        .push(
            Text::new(ctx.i18n.tr("lightbox-loading"))
                .size(typography::BODY_SM)
                .color(WHITE),
        )
        .into()
}

fn controls<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let focused = state.focused_control();

    let close = control_button(icons::cross(), Some(Message::Close), 1.0, focused == Control::Close);
    let top = Row::new()
        .padding(spacing::MD)
        .push(Space::new().width(Length::Fill))
        .push(close);

    let nav = state.navigation();
    let middle: Element<'a, Message> = if nav.controls_visible() {
        Row::new()
            .padding(spacing::MD)
            .align_y(Vertical::Center)
            .height(Length::Fill)
            .push(arrow(
                icons::chevron_left(),
                nav.has_previous(),
                Message::Previous,
                focused == Control::Previous,
            ))
            .push(Space::new().width(Length::Fill))
            .push(arrow(
                icons::chevron_right(),
                nav.has_next(),
                Message::Next,
                focused == Control::Next,
            ))
            .into()
    } else {
        Space::new().height(Length::Fill).into()
    };

    let mut bottom = Column::new()
        .spacing(spacing::XS)
        .padding(spacing::MD)
        .width(Length::Fill)
        .align_x(Horizontal::Center);

    if state.shows_diagram() {
        bottom = bottom.push(zoom_controls(state, ctx, focused));
    }

    let mut caption = Row::new().spacing(spacing::SM).align_y(Vertical::Center);
    if !state.info().is_empty() {
        caption = caption.push(Text::new(state.info()).size(typography::BODY_SM));
    }
    if nav.controls_visible() {
        let (current, total) = nav.counter();
        caption = caption.push(
            Text::new(ctx.i18n.tr_with_args(
                "lightbox-counter",
                &[("current", current.to_string()), ("total", total.to_string())],
            ))
            .size(typography::CAPTION),
        );
    }
    bottom = bottom.push(
        Container::new(caption)
            .padding([spacing::XXS, spacing::SM])
            .style(styles::overlay::indicator(radius::MD)),
    );

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(top)
        .push(middle)
        .push(bottom)
        .into()
}

fn zoom_controls<'a>(state: &State, ctx: &ViewContext<'a>, focused: Control) -> Element<'a, Message> {
    let percent = (state.zoom_level().value() * 100.0).round();
    let label = Container::new(
        Text::new(ctx.i18n.tr_with_args("lightbox-zoom-level", &[("percent", format!("{percent}"))]))
            .size(typography::CAPTION),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::overlay::indicator(radius::SM));

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(control_button(
            icons::minus(),
            state.can_zoom_out().then_some(Message::ZoomOut),
            1.0,
            focused == Control::ZoomOut,
        ))
        .push(label)
        .push(control_button(
            icons::frame(),
            Some(Message::ZoomReset),
            1.0,
            focused == Control::ZoomReset,
        ))
        .push(control_button(
            icons::plus(),
            state.can_zoom_in().then_some(Message::ZoomIn),
            1.0,
            focused == Control::ZoomIn,
        ))
        .into()
}

/// Arrow that stays visible at a boundary, dimmed and inert.
fn arrow<'a>(
    icon: Svg<'static>,
    enabled: bool,
    message: Message,
    focused: bool,
) -> Element<'a, Message> {
    let alpha = navigation::State::arrow_opacity(enabled);
    let glyph = icons::sized(icons::tinted(icon, WHITE), sizing::ICON_MD);
    button(
        Container::new(glyph)
            .width(Length::Fixed(sizing::LIGHTBOX_ARROW))
            .height(Length::Fixed(sizing::LIGHTBOX_ARROW))
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center),
    )
    .padding(0)
    .on_press_maybe(enabled.then_some(message))
    .style(styles::button::lightbox_control(alpha, focused && enabled))
    .into()
}

fn control_button<'a>(
    icon: Svg<'static>,
    message: Option<Message>,
    alpha: f32,
    focused: bool,
) -> Element<'a, Message> {
    let alpha = if message.is_some() {
        alpha
    } else {
        alpha * opacity::NAV_DISABLED
    };
    let glyph = icons::sized(icons::tinted(icon, WHITE), sizing::ICON_SM);
    button(
        Container::new(glyph)
            .width(Length::Fixed(sizing::LIGHTBOX_BUTTON))
            .height(Length::Fixed(sizing::LIGHTBOX_BUTTON))
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center),
    )
    .padding(0)
    .on_press_maybe(message)
    .style(styles::button::lightbox_control(alpha, focused))
    .into()
}
