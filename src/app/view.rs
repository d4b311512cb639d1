// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The window is a stack: the page surface at the bottom, then the sticky
//! header with its progress bar, the floating scroll-to-top button, the
//! collapsed navigation menu, toasts and finally the lightbox.

use super::{Message, Screen};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::lightbox::{self, Bindings};
use crate::media::MediaKey;
use crate::page::Page;
use crate::ui::article::{self, ARTICLE_TOP};
use crate::ui::code_copy;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::navbar;
use crate::ui::notifications::{self, Toast};
use crate::ui::scroll::{self, Metrics, PAGE_SCROLLABLE_ID};
use crate::ui::styles;
use crate::ui::theming::{ColorScheme, ThemeMode};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, Column, Container, Id, Scrollable, Space, Stack, Text};
use iced::{Element, Length, Padding, Size};
use std::path::Path;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub page: Option<&'a Page>,
    pub pending_path: Option<&'a Path>,
    pub load_error: Option<&'a Error>,
    pub bindings: &'a Bindings,
    pub lightbox: Option<&'a lightbox::State>,
    pub media_focus: Option<MediaKey>,
    pub code_copy: &'a code_copy::State,
    pub scroll: &'a scroll::State,
    pub theme_mode: ThemeMode,
    pub menu_open: bool,
    pub window_size: Size,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let colors = ctx.theme_mode.colors();

    let body = match (ctx.screen, ctx.page) {
        (Screen::Reader, Some(page)) => reader(&ctx, page, colors),
        (Screen::Loading, _) => loading(&ctx, colors),
        (Screen::Failed, _) => failed(&ctx, colors),
        _ => empty(ctx.i18n, colors),
    };
    let surface = Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::surface(colors));

    let navbar_ctx = navbar::ViewContext {
        i18n: ctx.i18n,
        theme: ctx.theme_mode,
        site_title: ctx.page.and_then(|page| page.site_title.as_deref()),
        links: ctx.page.map_or(&[][..], |page| page.nav_links.as_slice()),
        menu_open: ctx.menu_open,
        window_width: ctx.window_size.width,
    };

    let mut header = Column::new().push(navbar::view(&navbar_ctx).map(Message::Navbar));
    if ctx.screen == Screen::Reader && ctx.page.is_some_and(|page| page.is_post) {
        header = header.push(progress_bar(&ctx, colors));
    }

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(surface)
        .push(header);

    if ctx.screen == Screen::Reader && ctx.scroll.shows_scroll_top() {
        stack = stack.push(scroll_top_button(colors));
    }
    if let Some(menu) = navbar::menu_overlay(&navbar_ctx) {
        stack = stack.push(menu.map(Message::Navbar));
    }
    stack = stack.push(
        Container::new(
            Toast::view_overlay(ctx.notifications, ctx.i18n, colors).map(Message::Notification),
        )
        .padding(Padding {
            top: sizing::HEADER_HEIGHT,
            bottom: sizing::LIGHTBOX_BUTTON + spacing::MD,
            ..Padding::ZERO
        }),
    );
    if let Some(state) = ctx.lightbox.filter(|state| state.is_visible()) {
        stack = stack.push(
            lightbox::view::view(state, lightbox::view::ViewContext { i18n: ctx.i18n })
                .map(Message::Lightbox),
        );
    }

    stack.into()
}

fn reader<'a>(ctx: &ViewContext<'a>, page: &'a Page, colors: ColorScheme) -> Element<'a, Message> {
    let article = article::view(&article::ViewContext {
        i18n: ctx.i18n,
        colors,
        page,
        bindings: ctx.bindings,
        focused: ctx.media_focus,
        code_copy: ctx.code_copy,
    })
    .map(Message::Article);

    let content = Column::new()
        .width(Length::Fill)
        .push(Space::new().height(Length::Fixed(ARTICLE_TOP)))
        .push(
            Container::new(article)
                .width(Length::Fill)
                .padding([0.0, spacing::MD])
                .align_x(Horizontal::Center),
        )
        .push(Space::new().height(Length::Fixed(spacing::XXL)));

    Scrollable::new(content)
        .id(Id::new(PAGE_SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport| {
            Message::Scroll(scroll::Message::Scrolled(Metrics::from_viewport(&viewport)))
        })
        .into()
}

fn progress_bar<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    let filled = ctx.window_size.width * ctx.scroll.progress(ARTICLE_TOP);
    Container::new(Space::new())
        .width(Length::Fixed(filled))
        .height(Length::Fixed(sizing::PROGRESS_BAR))
        .style(styles::container::progress_fill(colors))
        .into()
}

fn scroll_top_button<'a>(colors: ColorScheme) -> Element<'a, Message> {
    let arrow = button(icons::sized(
        icons::tinted(icons::arrow_up(), colors.overlay_text),
        sizing::ICON_MD,
    ))
    .width(Length::Fixed(sizing::LIGHTBOX_BUTTON))
    .height(Length::Fixed(sizing::LIGHTBOX_BUTTON))
    .padding(spacing::XS)
    .on_press(Message::Scroll(scroll::Message::ToTop))
    .style(styles::button::floating(colors));

    Container::new(arrow)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .into()
}

fn open_button<'a>(i18n: &I18n, colors: ColorScheme) -> Element<'a, Message> {
    button(Text::new(i18n.tr("open-page-button")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .on_press(Message::OpenFileDialog)
        .style(styles::button::primary(colors))
        .into()
}

fn centered<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    Container::new(content.spacing(spacing::MD).align_x(Horizontal::Center))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding {
            top: sizing::HEADER_HEIGHT,
            ..Padding::new(spacing::MD)
        })
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn empty<'a>(i18n: &I18n, colors: ColorScheme) -> Element<'a, Message> {
    centered(
        Column::new()
            .push(icons::sized(
                icons::tinted(icons::folder(), colors.text_secondary),
                sizing::ICON_LG,
            ))
            .push(Text::new(i18n.tr("empty-state-title")).size(typography::TITLE_MD))
            .push(
                Text::new(i18n.tr("empty-state-hint"))
                    .size(typography::BODY)
                    .color(colors.text_secondary),
            )
            .push(open_button(i18n, colors)),
    )
}

fn loading<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    let path = ctx
        .pending_path
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    centered(
        Column::new().push(
            Text::new(ctx.i18n.tr_with_args("page-loading", &[("path", path)]))
                .size(typography::BODY)
                .color(colors.text_secondary),
        ),
    )
}

fn failed<'a>(ctx: &ViewContext<'a>, colors: ColorScheme) -> Element<'a, Message> {
    let path = ctx
        .pending_path
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let mut column = Column::new()
        .push(icons::sized(
            icons::tinted(icons::warning(), colors.error),
            sizing::ICON_LG,
        ))
        .push(
            Text::new(ctx.i18n.tr_with_args("page-load-failed", &[("path", path)]))
                .size(typography::TITLE_SM),
        );
    if let Some(error) = ctx.load_error {
        column = column.push(
            Text::new(ctx.i18n.tr(error.i18n_key()))
                .size(typography::BODY)
                .color(colors.text_secondary),
        );
        column = column.push(
            Text::new(error.to_string())
                .size(typography::CAPTION)
                .color(colors.text_secondary),
        );
    }
    centered(column.push(open_button(ctx.i18n, colors)))
}
