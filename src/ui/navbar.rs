// SPDX-License-Identifier: MPL-2.0
//! Site header: title, navigation links, theme toggle and open-page button.
//!
//! Below [`MOBILE_BREAKPOINT_PX`] the links collapse behind a hamburger
//! toggle. The open menu is drawn by [`menu_overlay`] as a full-window
//! layer so a press anywhere outside the panel closes it.

use crate::config::defaults::MOBILE_BREAKPOINT_PX;
use crate::i18n::fluent::I18n;
use crate::page::NavLink;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use crate::ui::theming::{ColorScheme, ThemeMode, ToggleIcon};
use iced::widget::svg::Svg;
use iced::widget::{button, mouse_area, opaque, Column, Container, Row, Space, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme: ThemeMode,
    pub site_title: Option<&'a str>,
    pub links: &'a [NavLink],
    pub menu_open: bool,
    pub window_width: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleMenu,
    CloseMenu,
    LinkPressed(String),
    ToggleTheme,
    OpenFile,
}

/// Events propagated to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    FollowLink(String),
    ToggleTheme,
    OpenFile,
}

/// Whether the navigation links collapse behind the hamburger toggle.
#[must_use]
pub fn is_collapsed(window_width: f32) -> bool {
    window_width < MOBILE_BREAKPOINT_PX
}

pub fn update(message: Message, menu_open: &mut bool) -> Event {
    match message {
        Message::ToggleMenu => {
            *menu_open = !*menu_open;
            Event::None
        }
        Message::CloseMenu => {
            *menu_open = false;
            Event::None
        }
        Message::LinkPressed(href) => {
            *menu_open = false;
            Event::FollowLink(href)
        }
        Message::ToggleTheme => Event::ToggleTheme,
        Message::OpenFile => {
            *menu_open = false;
            Event::OpenFile
        }
    }
}

/// Closes the menu once the window grows past the breakpoint.
pub fn on_resize(window_width: f32, menu_open: &mut bool) {
    if !is_collapsed(window_width) {
        *menu_open = false;
    }
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let colors = ctx.theme.colors();
    let collapsed = is_collapsed(ctx.window_width);

    let title = ctx
        .site_title
        .map_or_else(|| ctx.i18n.tr("app-title"), str::to_string);

    let mut row = Row::new()
        .spacing(spacing::XS)
        .padding([0.0, spacing::MD])
        .height(Length::Fill)
        .align_y(Vertical::Center)
        .push(Text::new(title).size(typography::TITLE_SM))
        .push(Space::new().width(Length::Fill));

    if !collapsed {
        for link in ctx.links {
            row = row.push(link_button(link, colors, false));
        }
    }

    let toggle_icon = match ctx.theme.toggle_icon() {
        ToggleIcon::Sun => icons::sun(),
        ToggleIcon::Moon => icons::moon(),
    };
    row = row
        .push(icon_button(toggle_icon, Message::ToggleTheme, colors))
        .push(icon_button(icons::folder(), Message::OpenFile, colors));

    if collapsed && !ctx.links.is_empty() {
        row = row.push(icon_button(icons::hamburger(), Message::ToggleMenu, colors));
    }

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::HEADER_HEIGHT))
        .style(styles::container::header(colors))
        .into()
}

/// Drop-down menu layer, present only while the collapsed menu is open.
pub fn menu_overlay<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    if !ctx.menu_open || !is_collapsed(ctx.window_width) || ctx.links.is_empty() {
        return None;
    }
    let colors = ctx.theme.colors();

    let items = ctx.links.iter().fold(
        Column::new().spacing(spacing::XXS).width(Length::Fixed(220.0)),
        |column, link| column.push(link_button(link, colors, true)),
    );
    let panel = opaque(
        Container::new(items)
            .padding(spacing::XS)
            .style(styles::container::menu_panel(colors)),
    );

    let dismiss = mouse_area(
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .on_press(Message::CloseMenu);

    let placed = Column::new()
        .width(Length::Fill)
        .push(Space::new().height(Length::Fixed(sizing::HEADER_HEIGHT)))
        .push(
            Container::new(panel)
                .width(Length::Fill)
                .padding([0.0, spacing::MD])
                .align_x(Horizontal::Right),
        );

    Some(
        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(dismiss)
            .push(placed)
            .into(),
    )
}

fn link_button<'a>(link: &NavLink, colors: ColorScheme, full_width: bool) -> Element<'a, Message> {
    let mut link_button = button(Text::new(link.label.clone()).size(typography::BODY))
        .on_press(Message::LinkPressed(link.href.clone()))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::flat(colors));
    if full_width {
        link_button = link_button.width(Length::Fill);
    }
    link_button.into()
}

fn icon_button<'a>(icon: Svg<'static>, message: Message, colors: ColorScheme) -> Element<'a, Message> {
    button(icons::sized(icons::themed(icon), sizing::ICON_MD))
        .on_press(message)
        .padding(spacing::XS)
        .style(styles::button::flat(colors))
        .into()
}
