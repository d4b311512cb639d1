// SPDX-License-Identifier: MPL-2.0
//! Toast cards stacked in the bottom-right corner.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, radius, shadow, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::theming::ColorScheme;
use iced::widget::svg::Svg;
use iced::widget::{button, container, Column, Container, Row, Space, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};

pub struct Toast;

impl Toast {
    pub fn view<'a>(
        notification: &'a Notification,
        i18n: &I18n,
        colors: ColorScheme,
    ) -> Element<'a, Message> {
        let accent = notification.severity().color();

        let args: Vec<(&str, String)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        let message = i18n.tr_with_args(notification.message_key(), &args);

        let icon = icons::sized(
            icons::tinted(Self::severity_icon(notification.severity()), accent),
            sizing::ICON_MD,
        );

        let dismiss = button(icons::sized(
            icons::tinted(icons::cross(), colors.text_secondary),
            sizing::ICON_SM,
        ))
        .on_press(Message::Dismiss(notification.id()))
        .padding(spacing::XXS)
        .style(move |_theme: &Theme, status: button::Status| dismiss_button_style(colors, status));

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(icon)
            .push(
                Container::new(Text::new(message).size(typography::BODY))
                    .width(Length::Fill),
            )
            .push(dismiss);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |_theme: &Theme| toast_container_style(colors, accent))
            .into()
    }

    /// All visible toasts, or an empty shrink widget.
    pub fn view_overlay<'a>(
        manager: &'a Manager,
        i18n: &I18n,
        colors: ColorScheme,
    ) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = manager
            .visible()
            .map(|notification| Self::view(notification, i18n, colors))
            .collect();

        if toasts.is_empty() {
            return Space::new().width(Length::Shrink).height(Length::Shrink).into();
        }

        Container::new(
            Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
    }

    fn severity_icon(severity: Severity) -> Svg<'static> {
        match severity {
            Severity::Info => icons::info(),
            Severity::Warning | Severity::Error => icons::warning(),
        }
    }
}

fn toast_container_style(colors: ColorScheme, accent: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: accent,
            width: 2.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

fn dismiss_button_style(colors: ColorScheme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..colors.text_secondary
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..colors.text_secondary
        })),
        button::Status::Active | button::Status::Disabled => None,
    };
    button::Style {
        background,
        text_color: colors.text_primary,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_border_uses_accent() {
        let accent = Severity::Warning.color();
        let style = toast_container_style(ColorScheme::dark(), accent);
        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn dismiss_button_is_bare_until_hovered() {
        let colors = ColorScheme::light();
        assert!(dismiss_button_style(colors, button::Status::Active)
            .background
            .is_none());
        assert!(dismiss_button_style(colors, button::Status::Hovered)
            .background
            .is_some());
    }
}
