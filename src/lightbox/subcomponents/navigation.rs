// SPDX-License-Identifier: MPL-2.0
//! Navigation sub-component: position within the media sequence.

use crate::ui::design_tokens::opacity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    index: usize,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open the item at this index.
    Navigate(usize),
}

impl State {
    #[must_use]
    pub fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// Boundary moves are no-ops rather than wrapping.
    pub fn handle(&self, msg: Message) -> Effect {
        match msg {
            Message::Next if self.has_next() => Effect::Navigate(self.index + 1),
            Message::Previous if self.has_previous() => Effect::Navigate(self.index - 1),
            _ => Effect::None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.len
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0 && self.index < self.len
    }

    /// Arrows are only shown when there is somewhere to go.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.len > 1
    }

    #[must_use]
    pub fn arrow_opacity(enabled: bool) -> f32 {
        if enabled {
            opacity::NAV_ENABLED
        } else {
            opacity::NAV_DISABLED
        }
    }

    /// One-based "current / total" pair for the counter.
    #[must_use]
    pub fn counter(&self) -> (usize, usize) {
        (self.index + 1, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_within_bounds() {
        let state = State::new(1, 3);
        assert_eq!(state.handle(Message::Next), Effect::Navigate(2));
        assert_eq!(state.handle(Message::Previous), Effect::Navigate(0));
    }

    #[test]
    fn boundaries_are_no_ops() {
        assert_eq!(State::new(2, 3).handle(Message::Next), Effect::None);
        assert_eq!(State::new(0, 3).handle(Message::Previous), Effect::None);
    }

    #[test]
    fn single_item_hides_controls() {
        assert!(!State::new(0, 1).controls_visible());
        assert!(State::new(0, 2).controls_visible());
    }

    #[test]
    fn disabled_arrow_is_dimmer() {
        assert!(State::arrow_opacity(false) < State::arrow_opacity(true));
        assert_eq!(State::arrow_opacity(true), 0.7);
        assert_eq!(State::arrow_opacity(false), 0.3);
    }
}
