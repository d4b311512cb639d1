// SPDX-License-Identifier: MPL-2.0
//! Page scrolling: scroll-to-top affordance, smooth anchor scrolling and the
//! reading progress bar.
//!
//! The page lives in a single vertical scrollable identified by
//! [`PAGE_SCROLLABLE_ID`]. Its viewport reports land here as [`Metrics`];
//! animated scrolls are driven by frame ticks that snap the scrollable to
//! the interpolated offset.

use crate::config::defaults::SCROLL_ANIMATION;
use crate::config::PageTuning;
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::{operation, Id};
use iced::Task;
use std::time::{Duration, Instant};

pub const PAGE_SCROLLABLE_ID: &str = "page-scrollable";

/// Last viewport reported by the page scrollable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl Metrics {
    #[must_use]
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            offset: viewport.absolute_offset().y,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        }
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// The scroll-to-top button shows once the page is scrolled past `threshold`.
#[must_use]
pub fn scroll_top_visible(offset: f32, threshold: f32) -> bool {
    offset > threshold
}

/// Offset that brings a target at `target_top` just below the sticky header.
#[must_use]
pub fn anchor_target(target_top: f32, header_height: f32, margin: f32) -> f32 {
    (target_top - header_height - margin).max(0.0)
}

/// Fraction of the article read, in `[0, 1]`.
///
/// Zero when the article has no height.
#[must_use]
pub fn reading_progress(
    scroll_top: f32,
    article_top: f32,
    article_height: f32,
    viewport_height: f32,
) -> f32 {
    if article_height <= 0.0 {
        return 0.0;
    }
    ((scroll_top - article_top + viewport_height) / article_height).clamp(0.0, 1.0)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Animation {
    fn position(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let done = t >= 1.0;
        let value = if done {
            self.to
        } else {
            self.from + (self.to - self.from) * ease_in_out(t)
        };
        (value, done)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Scrolled(Metrics),
    ToTop,
    /// Animate to an absolute offset.
    ToOffset(f32),
    Tick(Instant),
}

#[derive(Debug, Clone)]
pub struct State {
    tuning: PageTuning,
    metrics: Metrics,
    animation: Option<Animation>,
}

impl State {
    #[must_use]
    pub fn new(tuning: PageTuning) -> Self {
        Self {
            tuning,
            metrics: Metrics::default(),
            animation: None,
        }
    }

    pub fn handle(&mut self, message: Message) -> Task<Message> {
        self.handle_at(message, Instant::now())
    }

    /// [`Self::handle`] with an explicit clock, for animation start times.
    pub fn handle_at(&mut self, message: Message, now: Instant) -> Task<Message> {
        match message {
            Message::Scrolled(metrics) => {
                self.metrics = metrics;
                Task::none()
            }
            Message::ToTop => {
                self.animate_to(0.0, now);
                Task::none()
            }
            Message::ToOffset(target) => {
                self.animate_to(target, now);
                Task::none()
            }
            Message::Tick(at) => self.tick(at),
        }
    }

    fn animate_to(&mut self, target: f32, now: Instant) {
        let from = self.current_offset(now);
        let max = self.metrics.max_offset();
        let to = if max > 0.0 { target.clamp(0.0, max) } else { 0.0 };
        if (to - from).abs() < 0.5 {
            self.animation = None;
            return;
        }
        tracing::debug!(from, to, "smooth scroll");
        self.animation = Some(Animation {
            from,
            to,
            started: now,
            duration: SCROLL_ANIMATION,
        });
    }

    fn tick(&mut self, now: Instant) -> Task<Message> {
        let Some(animation) = self.animation else {
            return Task::none();
        };
        let (position, done) = animation.position(now);
        if done {
            self.animation = None;
        }
        self.metrics.offset = position;
        self.snap(position)
    }

    fn snap(&self, offset: f32) -> Task<Message> {
        let max = self.metrics.max_offset();
        let y = if max > 0.0 { offset / max } else { 0.0 };
        operation::snap_to(Id::new(PAGE_SCROLLABLE_ID), RelativeOffset { x: 0.0, y })
    }

    fn current_offset(&self, now: Instant) -> f32 {
        self.animation
            .map_or(self.metrics.offset, |animation| animation.position(now).0)
    }

    /// Keeps the page at its top, for a freshly loaded page.
    pub fn reset(&mut self) -> Task<Message> {
        self.animation = None;
        self.metrics.offset = 0.0;
        operation::snap_to(Id::new(PAGE_SCROLLABLE_ID), RelativeOffset::START)
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn shows_scroll_top(&self) -> bool {
        scroll_top_visible(self.metrics.offset, self.tuning.scroll_top_threshold)
    }

    /// Scroll offset for an anchor whose block starts at `target_top`.
    #[must_use]
    pub fn anchor_offset(&self, target_top: f32, header_height: f32) -> f32 {
        anchor_target(target_top, header_height, self.tuning.anchor_margin)
    }

    /// Reading progress of an article starting at `article_top` in the
    /// scrollable content and running to its end.
    #[must_use]
    pub fn progress(&self, article_top: f32) -> f32 {
        reading_progress(
            self.metrics.offset,
            article_top,
            self.metrics.content_height - article_top,
            self.metrics.viewport_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn scrolled(offset: f32) -> State {
        let mut state = State::new(PageTuning::default());
        let _ = state.handle(Message::Scrolled(Metrics {
            offset,
            viewport_height: 600.0,
            content_height: 3000.0,
        }));
        state
    }

    #[test]
    fn scroll_top_button_threshold() {
        assert!(!scroll_top_visible(300.0, 300.0));
        assert!(scroll_top_visible(301.0, 300.0));
        assert!(!scrolled(120.0).shows_scroll_top());
        assert!(scrolled(900.0).shows_scroll_top());
    }

    #[test]
    fn anchor_target_leaves_room_for_header() {
        assert_abs_diff_eq!(anchor_target(500.0, 56.0, 20.0), 424.0);
        assert_abs_diff_eq!(anchor_target(30.0, 56.0, 20.0), 0.0);
    }

    #[test]
    fn reading_progress_is_clamped() {
        assert_abs_diff_eq!(reading_progress(0.0, 1000.0, 2000.0, 600.0), 0.0);
        assert_abs_diff_eq!(reading_progress(1400.0, 1000.0, 2000.0, 600.0), 0.5);
        assert_abs_diff_eq!(reading_progress(5000.0, 1000.0, 2000.0, 600.0), 1.0);
        assert_abs_diff_eq!(reading_progress(100.0, 0.0, 0.0, 600.0), 0.0);
    }

    #[test]
    fn progress_reaches_one_at_the_bottom() {
        let state = scrolled(2400.0);
        assert_abs_diff_eq!(state.progress(56.0), 1.0);
    }

    #[test]
    fn to_top_animates_back_to_zero() {
        let mut state = scrolled(1200.0);
        let start = Instant::now();
        let _ = state.handle_at(Message::ToTop, start);
        assert!(state.is_animating());

        let _ = state.handle_at(Message::Tick(start + SCROLL_ANIMATION / 2), start);
        let midway = state.metrics().offset;
        assert!(midway > 0.0 && midway < 1200.0);

        let _ = state.handle_at(Message::Tick(start + SCROLL_ANIMATION), start);
        assert!(!state.is_animating());
        assert_abs_diff_eq!(state.metrics().offset, 0.0);
    }

    #[test]
    fn animation_target_is_clamped_to_content() {
        let mut state = scrolled(0.0);
        let start = Instant::now();
        let _ = state.handle_at(Message::ToOffset(10_000.0), start);
        let _ = state.handle_at(Message::Tick(start + SCROLL_ANIMATION), start);
        assert_abs_diff_eq!(state.metrics().offset, 2400.0);
    }

    #[test]
    fn scrolling_to_the_current_offset_does_not_animate() {
        let mut state = scrolled(0.0);
        let _ = state.handle(Message::ToTop);
        assert!(!state.is_animating());
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=20 {
            let value = ease_in_out(step as f32 / 20.0);
            assert!(value >= last);
            last = value;
        }
        assert_abs_diff_eq!(last, 1.0);
    }
}
