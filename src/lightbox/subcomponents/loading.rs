// SPDX-License-Identifier: MPL-2.0
//! Loading sub-component: image load requests and the animated spinner.
//!
//! Every load is tagged with a [`RequestId`]. Only the active request may
//! deliver its result; starting a new load or cancelling makes earlier ids
//! stale. Ids are unique for the whole process, so a decode started by a
//! lightbox that has since been replaced can never match a newer request.

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Default)]
pub struct State {
    active: Option<RequestId>,
    spinner_rotation: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    SpinnerTick,
}

impl State {
    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::SpinnerTick => {
                if self.is_loading() {
                    self.spinner_rotation += SPINNER_SPEED;
                    if self.spinner_rotation > std::f32::consts::TAU {
                        self.spinner_rotation -= std::f32::consts::TAU;
                    }
                }
            }
        }
    }

    /// Starts a new request, superseding any active one.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId::next();
        self.active = Some(id);
        id
    }

    /// Completes `id` if it is the active request. Returns `false` for stale
    /// completions, which must be discarded.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            self.spinner_rotation = 0.0;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.spinner_rotation = 0.0;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut state = State::default();
        let first = state.begin();
        let second = state.begin();
        assert!(!state.accept(first));
        assert!(state.is_loading());
        assert!(state.accept(second));
        assert!(!state.is_loading());
    }

    #[test]
    fn cancelled_request_is_stale() {
        let mut state = State::default();
        let id = state.begin();
        state.cancel();
        assert!(!state.accept(id));
    }

    #[test]
    fn separate_states_never_share_ids() {
        let mut previous = State::default();
        let stale = previous.begin();

        let mut current = State::default();
        let active = current.begin();
        assert_ne!(stale, active);
        assert!(!current.accept(stale));
        assert!(current.is_loading());
    }

    #[test]
    fn spinner_turns_only_while_loading() {
        let mut state = State::default();
        state.handle(Message::SpinnerTick);
        assert_eq!(state.spinner_rotation(), 0.0);

        state.begin();
        state.handle(Message::SpinnerTick);
        assert!(state.spinner_rotation() > 0.0);
    }
}
