// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are routed by lightbox state: while it is shown it owns the
//! keyboard and pointer, otherwise unhandled key presses drive page-level
//! media focus. Resizes and file drops are handled in both modes.

use super::Message;
use crate::lightbox;
use crate::ui::notifications::NotificationMessage;
use crate::ui::scroll;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

const SPINNER_FRAME: Duration = Duration::from_millis(16);
const SCROLL_FRAME: Duration = Duration::from_millis(16);
const NOTIFICATION_TICK: Duration = Duration::from_millis(500);

pub fn events(lightbox_shown: bool) -> Subscription<Message> {
    if lightbox_shown {
        event::listen_with(|event, status, _window| lightbox_route(event, status))
    } else {
        event::listen_with(|event, status, _window| page_route(event, status))
    }
}

/// Routing while the lightbox is shown: it consumes every key press.
fn lightbox_route(event: event::Event, _status: event::Status) -> Option<Message> {
    if let Some(message) = window_message(&event) {
        return Some(message);
    }
    // The lightbox sees pointer events even when the overlay widgets
    // captured them; drag and swipe tracking needs every move.
    let input = matches!(
        event,
        event::Event::Keyboard(_) | event::Event::Mouse(_) | event::Event::Touch(_)
    );
    input.then(|| Message::Lightbox(lightbox::Message::RawEvent(event)))
}

fn page_route(event: event::Event, status: event::Status) -> Option<Message> {
    if let Some(message) = window_message(&event) {
        return Some(message);
    }
    let unhandled_key = status == event::Status::Ignored
        && matches!(
            event,
            event::Event::Keyboard(keyboard::Event::KeyPressed { .. })
        );
    unhandled_key.then(|| Message::PageKey(event))
}

fn window_message(event: &event::Event) -> Option<Message> {
    match event {
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(*size)),
        event::Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path.clone()))
        }
        _ => None,
    }
}

/// Polls the page file for changes.
pub fn watch(has_page: bool, interval: Duration) -> Subscription<Message> {
    if has_page {
        time::every(interval).map(|_| Message::WatchTick)
    } else {
        Subscription::none()
    }
}

/// Frame ticks for the loading spinner and smooth page scrolling.
pub fn frames(lightbox_loading: bool, scroll_animating: bool) -> Subscription<Message> {
    let spinner = if lightbox_loading {
        time::every(SPINNER_FRAME).map(|_| Message::Lightbox(lightbox::Message::SpinnerTick))
    } else {
        Subscription::none()
    };
    let scroll = if scroll_animating {
        time::every(SCROLL_FRAME).map(|at| Message::Scroll(scroll::Message::Tick(at)))
    } else {
        Subscription::none()
    };
    Subscription::batch([spinner, scroll])
}

/// Drives toast auto-dismiss.
pub fn notifications(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(NOTIFICATION_TICK).map(|_| Message::Notification(NotificationMessage::Tick))
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{mouse, touch, Size};
    use std::path::PathBuf;

    fn tab() -> event::Event {
        use keyboard::key::Named;
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(Named::Tab),
            modified_key: keyboard::Key::Named(Named::Tab),
            physical_key: keyboard::key::Physical::Unidentified(
                keyboard::key::NativeCode::Unidentified,
            ),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::default(),
            text: None,
            repeat: false,
        })
    }

    #[test]
    fn shown_lightbox_consumes_key_presses() {
        for status in [event::Status::Ignored, event::Status::Captured] {
            let routed = lightbox_route(tab(), status);
            assert!(matches!(
                routed,
                Some(Message::Lightbox(lightbox::Message::RawEvent(
                    event::Event::Keyboard(_)
                )))
            ));
        }
    }

    #[test]
    fn unhandled_keys_reach_the_page_when_lightbox_is_hidden() {
        assert!(matches!(
            page_route(tab(), event::Status::Ignored),
            Some(Message::PageKey(_))
        ));
        assert!(page_route(tab(), event::Status::Captured).is_none());
    }

    #[test]
    fn pointer_events_go_to_lightbox_only_while_shown() {
        let moved = event::Event::Mouse(mouse::Event::CursorMoved {
            position: iced::Point::new(10.0, 10.0),
        });
        assert!(matches!(
            lightbox_route(moved.clone(), event::Status::Captured),
            Some(Message::Lightbox(_))
        ));
        assert!(page_route(moved, event::Status::Ignored).is_none());
    }

    #[test]
    fn resize_and_drop_are_routed_in_both_modes() {
        let resized = event::Event::Window(window::Event::Resized(Size::new(800.0, 600.0)));
        assert!(matches!(
            window_message(&resized),
            Some(Message::WindowResized(size)) if size.width == 800.0
        ));

        let dropped = event::Event::Window(window::Event::FileDropped(PathBuf::from("a.html")));
        assert!(matches!(
            window_message(&dropped),
            Some(Message::FileDropped(path)) if path == PathBuf::from("a.html")
        ));
    }

    #[test]
    fn pointer_events_are_not_window_messages() {
        let moved = event::Event::Mouse(mouse::Event::CursorLeft);
        assert!(window_message(&moved).is_none());
        let lifted = event::Event::Touch(touch::Event::FingerLost {
            id: touch::Finger(0),
            position: iced::Point::ORIGIN,
        });
        assert!(window_message(&lifted).is_none());
    }
}
