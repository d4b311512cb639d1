// SPDX-License-Identifier: MPL-2.0
//! Copy buttons on code blocks.
//!
//! The button appears while the pointer is over a block. A copy writes the
//! code to the clipboard and shows a check mark until the revert timer for
//! that copy fires; a later copy supersedes the earlier timer.

use crate::config::defaults::COPY_FEEDBACK;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Hovered(Option<usize>),
    Copy(usize),
    Revert(CopyToken),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Write the code of `block` to the clipboard, then send
    /// [`Message::Revert`] with `token` after `revert_after`.
    Copy {
        block: usize,
        token: CopyToken,
        revert_after: Duration,
    },
}

#[derive(Debug, Clone, Default)]
pub struct State {
    hovered: Option<usize>,
    copied: Option<(usize, CopyToken)>,
    generation: u64,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Hovered(block) => {
                self.hovered = block;
                Effect::None
            }
            Message::Copy(block) => {
                self.generation = self.generation.wrapping_add(1);
                let token = CopyToken(self.generation);
                self.copied = Some((block, token));
                tracing::debug!(block, "code copied");
                Effect::Copy {
                    block,
                    token,
                    revert_after: COPY_FEEDBACK,
                }
            }
            Message::Revert(token) => {
                if self.copied.is_some_and(|(_, current)| current == token) {
                    self.copied = None;
                }
                Effect::None
            }
        }
    }

    /// Whether the copy button of `block` is drawn.
    #[must_use]
    pub fn shows_button(&self, block: usize) -> bool {
        self.hovered == Some(block) || self.is_copied(block)
    }

    /// Whether `block` shows the check mark.
    #[must_use]
    pub fn is_copied(&self, block: usize) -> bool {
        self.copied.is_some_and(|(copied, _)| copied == block)
    }

    /// Forgets hover and feedback, for a newly loaded page.
    pub fn clear(&mut self) {
        self.hovered = None;
        self.copied = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(state: &mut State, block: usize) -> CopyToken {
        match state.handle(Message::Copy(block)) {
            Effect::Copy {
                token,
                revert_after,
                ..
            } => {
                assert_eq!(revert_after, Duration::from_secs(2));
                token
            }
            Effect::None => panic!("copy should produce an effect"),
        }
    }

    #[test]
    fn button_follows_hover() {
        let mut state = State::new();
        assert!(!state.shows_button(0));
        state.handle(Message::Hovered(Some(0)));
        assert!(state.shows_button(0));
        assert!(!state.shows_button(1));
        state.handle(Message::Hovered(None));
        assert!(!state.shows_button(0));
    }

    #[test]
    fn copy_shows_check_until_revert() {
        let mut state = State::new();
        let token = copy(&mut state, 2);
        assert!(state.is_copied(2));
        assert!(state.shows_button(2));

        state.handle(Message::Revert(token));
        assert!(!state.is_copied(2));
    }

    #[test]
    fn stale_revert_keeps_latest_feedback() {
        let mut state = State::new();
        let first = copy(&mut state, 0);
        let _second = copy(&mut state, 0);

        state.handle(Message::Revert(first));
        assert!(state.is_copied(0));
    }

    #[test]
    fn copying_another_block_moves_the_check() {
        let mut state = State::new();
        copy(&mut state, 0);
        copy(&mut state, 3);
        assert!(!state.is_copied(0));
        assert!(state.is_copied(3));
    }
}
