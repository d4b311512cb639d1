// SPDX-License-Identifier: MPL-2.0
//! Keyboard focus among the lightbox controls.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Control {
    #[default]
    Close,
    Previous,
    Next,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    focused: Control,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Tab (`backwards` for Shift+Tab) over the controls currently shown.
    Cycle {
        available: Vec<Control>,
        backwards: bool,
    },
    Reset,
}

impl State {
    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::Cycle {
                available,
                backwards,
            } => self.cycle(&available, backwards),
            Message::Reset => self.focused = Control::Close,
        }
    }

    #[must_use]
    pub fn focused(&self) -> Control {
        self.focused
    }

    fn cycle(&mut self, available: &[Control], backwards: bool) {
        if available.is_empty() {
            self.focused = Control::Close;
            return;
        }
        let next = match available.iter().position(|c| *c == self.focused) {
            Some(i) if backwards => (i + available.len() - 1) % available.len(),
            Some(i) => (i + 1) % available.len(),
            None => 0,
        };
        self.focused = available[next];
    }

    /// Focus as it applies to `available`: a control that disappeared
    /// (for example a hidden arrow) falls back to close.
    #[must_use]
    pub fn effective(&self, available: &[Control]) -> Control {
        if available.contains(&self.focused) {
            self.focused
        } else {
            Control::Close
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_starts_on_close() {
        assert_eq!(State::default().focused(), Control::Close);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let available = vec![Control::Close, Control::Previous, Control::Next];
        let mut state = State::default();

        state.handle(Message::Cycle {
            available: available.clone(),
            backwards: true,
        });
        assert_eq!(state.focused(), Control::Next);

        state.handle(Message::Cycle {
            available,
            backwards: false,
        });
        assert_eq!(state.focused(), Control::Close);
    }

    #[test]
    fn missing_control_falls_back_to_close() {
        let mut state = State::default();
        state.handle(Message::Cycle {
            available: vec![Control::Close, Control::ZoomIn],
            backwards: false,
        });
        assert_eq!(state.effective(&[Control::Close]), Control::Close);
        state.handle(Message::Reset);
        assert_eq!(state.focused(), Control::Close);
    }
}
