// SPDX-License-Identifier: MPL-2.0
//! Zoom sub-component for diagrams shown in the lightbox.

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use iced::mouse::ScrollDelta;

/// Pixel deltas are converted to "lines" with this divisor so trackpads and
/// wheels step at comparable rates.
const PIXELS_PER_LINE: f32 = 120.0;

/// Zoom factor guaranteed to lie within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Creates a zoom level, clamping to the supported range.
    /// Non-finite input yields the default level.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether content is enlarged past its fitted size, which enables panning.
    #[must_use]
    pub fn is_magnified(self) -> bool {
        self.0 > DEFAULT_ZOOM
    }

    /// Steps by `delta`, rounded to hundredths so repeated steps land back
    /// exactly on the default level.
    #[must_use]
    pub fn offset(self, delta: f32) -> Self {
        Self::new(((self.0 + delta) * 100.0).round() / 100.0)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

#[derive(Debug, Clone)]
pub struct State {
    level: ZoomLevel,
    step: f32,
    wheel_step: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    Reset,
    /// Mouse wheel over the content.
    Wheel(ScrollDelta),
    /// Absolute level, used by pinch gestures.
    Set(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Changed(ZoomLevel),
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_ZOOM_STEP,
            crate::config::DEFAULT_WHEEL_ZOOM_STEP,
        )
    }
}

impl State {
    #[must_use]
    pub fn new(step: f32, wheel_step: f32) -> Self {
        Self {
            level: ZoomLevel::default(),
            step,
            wheel_step,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        let next = match msg {
            Message::ZoomIn => self.level.offset(self.step),
            Message::ZoomOut => self.level.offset(-self.step),
            Message::Reset => ZoomLevel::default(),
            Message::Wheel(delta) => {
                let steps = scroll_steps(&delta);
                if steps > 0.0 {
                    self.level.offset(self.wheel_step)
                } else if steps < 0.0 {
                    self.level.offset(-self.wheel_step)
                } else {
                    return Effect::None;
                }
            }
            Message::Set(value) => ZoomLevel::new(value),
        };

        // Reset always reports so callers re-center even at 1.0.
        if next == self.level && !matches!(msg, Message::Reset) {
            return Effect::None;
        }
        self.level = next;
        Effect::Changed(next)
    }

    #[must_use]
    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.level.value() < MAX_ZOOM
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.level.value() > MIN_ZOOM
    }

    pub fn reset(&mut self) {
        self.level = ZoomLevel::default();
    }
}

/// Signed wheel movement; positive means "towards the user" (zoom in).
fn scroll_steps(delta: &ScrollDelta) -> f32 {
    match delta {
        ScrollDelta::Lines { y, .. } => *y,
        ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn level_is_clamped() {
        assert_abs_diff_eq!(ZoomLevel::new(10.0).value(), MAX_ZOOM, epsilon = 1e-4);
        assert_abs_diff_eq!(ZoomLevel::new(0.1).value(), MIN_ZOOM, epsilon = 1e-4);
        assert_abs_diff_eq!(ZoomLevel::new(f32::NAN).value(), DEFAULT_ZOOM, epsilon = 1e-4);
    }

    #[test]
    fn buttons_step_by_configured_amount() {
        let mut state = State::default();
        let effect = state.handle(Message::ZoomIn);
        let Effect::Changed(level) = effect else {
            panic!("zoom in should change the level");
        };
        assert_abs_diff_eq!(level.value(), 1.2, epsilon = 1e-4);
        state.handle(Message::ZoomOut);
        state.handle(Message::ZoomOut);
        assert_abs_diff_eq!(state.level().value(), 0.8, epsilon = 1e-4);
    }

    #[test]
    fn zoom_stops_at_limits() {
        let mut state = State::default();
        for _ in 0..20 {
            state.handle(Message::ZoomIn);
        }
        assert_abs_diff_eq!(state.level().value(), MAX_ZOOM, epsilon = 1e-4);
        assert!(!state.can_zoom_in());
        assert_eq!(state.handle(Message::ZoomIn), Effect::None);

        for _ in 0..20 {
            state.handle(Message::ZoomOut);
        }
        assert_abs_diff_eq!(state.level().value(), MIN_ZOOM, epsilon = 1e-4);
        assert!(!state.can_zoom_out());
    }

    #[test]
    fn wheel_uses_only_the_sign_of_the_delta() {
        let mut state = State::default();
        state.handle(Message::Wheel(ScrollDelta::Pixels { x: 0.0, y: 3.0 }));
        assert_abs_diff_eq!(state.level().value(), 1.2, epsilon = 1e-4);
        state.handle(Message::Wheel(ScrollDelta::Lines { x: 0.0, y: -5.0 }));
        assert_abs_diff_eq!(state.level().value(), 1.0, epsilon = 1e-4);
        assert_eq!(
            state.handle(Message::Wheel(ScrollDelta::Lines { x: 2.0, y: 0.0 })),
            Effect::None
        );
    }

    #[test]
    fn stepping_in_and_out_returns_to_default() {
        let mut state = State::default();
        for _ in 0..3 {
            state.handle(Message::ZoomIn);
        }
        for _ in 0..3 {
            state.handle(Message::ZoomOut);
        }
        assert_eq!(state.level(), ZoomLevel::default());
        assert!(!state.level().is_magnified());
    }

    #[test]
    fn reset_returns_to_default_and_reports() {
        let mut state = State::default();
        assert!(matches!(state.handle(Message::Reset), Effect::Changed(_)));
        state.handle(Message::Set(2.5));
        state.handle(Message::Reset);
        assert_eq!(state.level(), ZoomLevel::default());
        assert!(!state.level().is_magnified());
    }
}
