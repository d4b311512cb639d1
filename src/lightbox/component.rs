// SPDX-License-Identifier: MPL-2.0
//! Lightbox component: state machine and update logic.
//!
//! ```text
//!            open               image loaded / failed
//! Closed ─────────► Loading ─────────────────────────► Open
//!    ▲                 │ close                          │ close
//!    │  cleanup timer  ▼                                ▼
//!    └──────────── Closing ◄────────────────────────────┘
//! ```
//!
//! Diagrams skip `Loading` and open immediately. While the lightbox is shown
//! (`Loading` or `Open`) it owns the keyboard and the page does not scroll.

use super::layout::{self, DiagramFrame};
use super::subcomponents::focus::{self, Control};
use super::subcomponents::loading::{self, RequestId};
use super::subcomponents::zoom::{self, ZoomLevel};
use super::subcomponents::{gesture, navigation, pan};
use crate::config::LightboxTuning;
use crate::error::Error;
use crate::media::{DiagramData, ImageData, ImageSource, MediaKey, MediaSequence, Rendering};
use iced::widget::{operation, Id};
use iced::{event, keyboard, mouse, touch, window, Point, Size, Task, Vector};
use std::time::Duration;

/// Identifier of the scrollable holding a zoomed diagram.
pub const SCROLLABLE_ID: &str = "lightbox-diagram-scrollable";

/// Info text shown when an image cannot be decoded.
pub const LOAD_FAILED_TEXT: &str = "Failed to load image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Loading,
    Open,
    /// Close transition running; content is still attached.
    Closing,
}

#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Image(ImageData),
    Diagram(DiagramData),
    Failed,
}

/// Token guarding the delayed content cleanup after a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupToken(u64);

impl CleanupToken {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Open(usize),
    OpenKey(MediaKey),
    Close,
    Next,
    Previous,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ImageLoaded {
        request: RequestId,
        result: Result<ImageData, Error>,
    },
    CleanupElapsed(CleanupToken),
    BackdropPressed,
    /// Swallows presses on the content so they never reach the backdrop.
    ContentPressed,
    RawEvent(event::Event),
    SpinnerTick,
    /// The page was rescanned and its media sequence rebuilt.
    Rebind(MediaSequence),
}

#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Decode `source` and answer with [`Message::ImageLoaded`].
    LoadImage {
        request: RequestId,
        source: ImageSource,
    },
    /// Send [`Message::CleanupElapsed`] after `after`.
    ScheduleCleanup {
        token: CleanupToken,
        after: Duration,
    },
}

#[derive(Debug, Clone)]
pub struct State {
    sequence: MediaSequence,
    phase: Phase,
    navigation: navigation::State,
    current_key: Option<MediaKey>,
    caption: String,
    content: Content,
    info: String,
    zoom: zoom::State,
    pan: pan::State,
    gesture: gesture::State,
    loading: loading::State,
    focus: focus::State,
    pending_cleanup: Option<CleanupToken>,
    close_transition: Duration,
    window: Size,
    cursor: Option<Point>,
}

impl State {
    #[must_use]
    pub fn new(sequence: MediaSequence, tuning: &LightboxTuning, window: Size) -> Self {
        let len = sequence.len();
        Self {
            sequence,
            phase: Phase::Closed,
            navigation: navigation::State::new(0, len),
            current_key: None,
            caption: String::new(),
            content: Content::None,
            info: String::new(),
            zoom: zoom::State::new(tuning.zoom_step, tuning.wheel_zoom_step),
            pan: pan::State::default(),
            gesture: gesture::State::new(tuning.swipe_threshold),
            loading: loading::State::default(),
            focus: focus::State::default(),
            pending_cleanup: None,
            close_transition: tuning.close_transition,
            window,
            cursor: None,
        }
    }

    pub fn handle(&mut self, msg: Message) -> (Effect, Task<Message>) {
        match msg {
            Message::Open(index) => self.open(index),
            Message::OpenKey(key) => match self.sequence.position_of(key) {
                Some(index) => self.open(index),
                None => {
                    tracing::warn!(?key, "no media bound for key");
                    (Effect::None, Task::none())
                }
            },
            Message::Close | Message::BackdropPressed => (self.close(), Task::none()),
            Message::Next => self.navigate(navigation::Message::Next),
            Message::Previous => self.navigate(navigation::Message::Previous),
            Message::ZoomIn => self.zoom(zoom::Message::ZoomIn),
            Message::ZoomOut => self.zoom(zoom::Message::ZoomOut),
            Message::ZoomReset => self.zoom(zoom::Message::Reset),
            Message::ImageLoaded { request, result } => {
                self.image_loaded(request, result);
                (Effect::None, Task::none())
            }
            Message::CleanupElapsed(token) => {
                self.cleanup(token);
                (Effect::None, Task::none())
            }
            Message::ContentPressed => (Effect::None, Task::none()),
            Message::RawEvent(event) => self.handle_raw_event(event),
            Message::SpinnerTick => {
                self.loading.handle(loading::Message::SpinnerTick);
                (Effect::None, Task::none())
            }
            Message::Rebind(sequence) => self.rebind(sequence),
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Visible and interactive: loading or open.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Open)
    }

    /// Whether anything is drawn, including the close transition.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// Page scrolling is suspended while the lightbox is shown.
    #[must_use]
    pub fn locks_page_scroll(&self) -> bool {
        self.is_shown()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigation.index()
    }

    #[must_use]
    pub fn current_key(&self) -> Option<MediaKey> {
        self.current_key
    }

    #[must_use]
    pub fn navigation(&self) -> &navigation::State {
        &self.navigation
    }

    #[must_use]
    pub fn sequence(&self) -> &MediaSequence {
        &self.sequence
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom.level()
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom.can_zoom_in()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom.can_zoom_out()
    }

    #[must_use]
    pub fn pan_offset(&self) -> Vector {
        self.pan.offset()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.loading.spinner_rotation()
    }

    /// Zoom applies only to a diagram that is on screen.
    #[must_use]
    pub fn shows_diagram(&self) -> bool {
        self.phase == Phase::Open && matches!(self.content, Content::Diagram(_))
    }

    #[must_use]
    pub fn window_size(&self) -> Size {
        self.window
    }

    /// Controls that are currently shown and enabled, in focus order.
    #[must_use]
    pub fn available_controls(&self) -> Vec<Control> {
        let mut controls = vec![Control::Close];
        if self.navigation.controls_visible() {
            if self.navigation.has_previous() {
                controls.push(Control::Previous);
            }
            if self.navigation.has_next() {
                controls.push(Control::Next);
            }
        }
        if self.shows_diagram() {
            controls.extend([Control::ZoomIn, Control::ZoomOut, Control::ZoomReset]);
        }
        controls
    }

    #[must_use]
    pub fn focused_control(&self) -> Control {
        self.focus.effective(&self.available_controls())
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    fn open(&mut self, index: usize) -> (Effect, Task<Message>) {
        let Some(item) = self.sequence.get(index).cloned() else {
            tracing::warn!(index, len = self.sequence.len(), "open ignored: index out of range");
            return (Effect::None, Task::none());
        };

        self.navigation = navigation::State::new(index, self.sequence.len());
        self.current_key = Some(item.key());
        self.caption = item.caption().to_string();
        self.reset_view();
        self.focus.handle(focus::Message::Reset);
        // Any pending cleanup belongs to an earlier close.
        self.pending_cleanup = None;

        match item.render() {
            Rendering::Deferred(source) => {
                self.phase = Phase::Loading;
                self.content = Content::None;
                self.info.clear();
                let request = self.loading.begin();
                tracing::debug!(index, ?request, "lightbox loading image");
                (Effect::LoadImage { request, source }, Task::none())
            }
            Rendering::Immediate(diagram) => {
                self.loading.cancel();
                self.phase = Phase::Open;
                self.content = Content::Diagram(diagram);
                self.info = self.caption.clone();
                tracing::debug!(index, "lightbox showing diagram");
                (Effect::None, self.sync_scroll())
            }
        }
    }

    fn close(&mut self) -> Effect {
        if !self.is_shown() {
            return Effect::None;
        }
        self.phase = Phase::Closing;
        self.loading.cancel();
        self.reset_view();
        let token = CleanupToken::next();
        self.pending_cleanup = Some(token);
        tracing::debug!(index = self.navigation.index(), "lightbox closing");
        Effect::ScheduleCleanup {
            token,
            after: self.close_transition,
        }
    }

    fn cleanup(&mut self, token: CleanupToken) {
        if self.phase != Phase::Closing || self.pending_cleanup != Some(token) {
            tracing::trace!(?token, "stale cleanup ignored");
            return;
        }
        self.phase = Phase::Closed;
        self.pending_cleanup = None;
        self.content = Content::None;
        self.info.clear();
        self.current_key = None;
    }

    fn navigate(&mut self, msg: navigation::Message) -> (Effect, Task<Message>) {
        if !self.is_shown() {
            return (Effect::None, Task::none());
        }
        match self.navigation.handle(msg) {
            navigation::Effect::Navigate(index) => self.open(index),
            navigation::Effect::None => (Effect::None, Task::none()),
        }
    }

    fn zoom(&mut self, msg: zoom::Message) -> (Effect, Task<Message>) {
        if !self.shows_diagram() {
            return (Effect::None, Task::none());
        }
        match self.zoom.handle(msg) {
            zoom::Effect::Changed(level) => {
                if !level.is_magnified() {
                    self.pan.reset();
                }
                (Effect::None, self.sync_scroll())
            }
            zoom::Effect::None => (Effect::None, Task::none()),
        }
    }

    fn image_loaded(&mut self, request: RequestId, result: Result<ImageData, Error>) {
        if !self.loading.accept(request) {
            tracing::debug!(?request, "stale image load discarded");
            return;
        }
        self.phase = Phase::Open;
        match result {
            Ok(image) => {
                self.content = Content::Image(image);
                self.info = self.caption.clone();
            }
            Err(error) => {
                tracing::warn!(%error, "lightbox image failed to load");
                self.content = Content::Failed;
                self.info = LOAD_FAILED_TEXT.to_string();
            }
        }
    }

    fn rebind(&mut self, sequence: MediaSequence) -> (Effect, Task<Message>) {
        let shown_item = self
            .current_key
            .and_then(|key| self.sequence.position_of(key))
            .and_then(|index| self.sequence.get(index))
            .cloned();
        self.sequence = sequence;
        let len = self.sequence.len();

        if !self.is_shown() {
            let index = self.navigation.index().min(len.saturating_sub(1));
            self.navigation = navigation::State::new(index, len);
            return (Effect::None, Task::none());
        }
        if len == 0 {
            tracing::debug!("media sequence emptied; closing lightbox");
            return (self.close(), Task::none());
        }

        let kept = self
            .current_key
            .and_then(|key| self.sequence.position_of(key));
        match kept {
            Some(index) if self.sequence.get(index) == shown_item.as_ref() => {
                self.navigation = navigation::State::new(index, len);
                (Effect::None, Task::none())
            }
            Some(index) => {
                tracing::debug!(index, "shown item changed on rescan; reopening");
                self.open(index)
            }
            None => self.open(self.navigation.index().min(len - 1)),
        }
    }

    fn reset_view(&mut self) {
        self.zoom.reset();
        self.pan.reset();
        self.gesture.reset();
    }

    fn activate_focused(&mut self) -> (Effect, Task<Message>) {
        match self.focused_control() {
            Control::Close => (self.close(), Task::none()),
            Control::Previous => self.navigate(navigation::Message::Previous),
            Control::Next => self.navigate(navigation::Message::Next),
            Control::ZoomIn => self.zoom(zoom::Message::ZoomIn),
            Control::ZoomOut => self.zoom(zoom::Message::ZoomOut),
            Control::ZoomReset => self.zoom(zoom::Message::Reset),
        }
    }

    /// Moves the diagram scrollable to reflect zoom and pan.
    fn sync_scroll(&self) -> Task<Message> {
        let Content::Diagram(diagram) = &self.content else {
            return Task::none();
        };
        let viewport = layout::content_viewport(self.window);
        let frame = DiagramFrame::new(diagram.size(), viewport, self.zoom.level().value());
        operation::snap_to(
            Id::new(SCROLLABLE_ID),
            frame.scroll_offset(viewport, self.pan.offset()),
        )
    }

    // ---------------------------------------------------------------------
    // Raw input
    // ---------------------------------------------------------------------

    fn handle_raw_event(&mut self, event: event::Event) -> (Effect, Task<Message>) {
        if let event::Event::Window(window::Event::Resized(size)) = event {
            self.window = size;
            return (Effect::None, self.sync_scroll());
        }
        if !self.is_shown() {
            return (Effect::None, Task::none());
        }

        match event {
            event::Event::Keyboard(keyboard_event) => self.handle_key(keyboard_event),
            event::Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            event::Event::Touch(touch_event) => self.handle_touch(touch_event),
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_key(&mut self, event: keyboard::Event) -> (Effect, Task<Message>) {
        use keyboard::key::Named;

        let keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(named),
            modifiers,
            ..
        } = event
        else {
            return (Effect::None, Task::none());
        };

        match named {
            Named::Escape => (self.close(), Task::none()),
            Named::ArrowLeft => self.navigate(navigation::Message::Previous),
            Named::ArrowRight => self.navigate(navigation::Message::Next),
            Named::Tab => {
                self.focus.handle(focus::Message::Cycle {
                    available: self.available_controls(),
                    backwards: modifiers.shift(),
                });
                (Effect::None, Task::none())
            }
            Named::Enter | Named::Space => self.activate_focused(),
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_mouse(&mut self, event: mouse::Event) -> (Effect, Task<Message>) {
        match event {
            mouse::Event::WheelScrolled { delta } => self.zoom(zoom::Message::Wheel(delta)),
            mouse::Event::CursorMoved { position } => {
                self.cursor = Some(position);
                self.pan_to(position)
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let press = self
                    .cursor
                    .filter(|p| layout::content_bounds(self.window).contains(*p));
                if let Some(position) = press.filter(|_| self.shows_diagram()) {
                    self.pan.handle(pan::Message::Start {
                        position,
                        magnified: self.zoom.level().is_magnified(),
                    });
                }
                (Effect::None, Task::none())
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                self.pan.handle(pan::Message::End);
                (Effect::None, Task::none())
            }
            mouse::Event::CursorLeft => {
                self.cursor = None;
                self.pan.handle(pan::Message::End);
                (Effect::None, Task::none())
            }
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_touch(&mut self, event: touch::Event) -> (Effect, Task<Message>) {
        let msg = match event {
            touch::Event::FingerPressed { id, position } => gesture::Message::Pressed {
                finger: id,
                position,
                zoom: if self.shows_diagram() {
                    self.zoom.level()
                } else {
                    ZoomLevel::default()
                },
            },
            touch::Event::FingerMoved { id, position } => gesture::Message::Moved {
                finger: id,
                position,
            },
            touch::Event::FingerLifted { id, position } => gesture::Message::Lifted {
                finger: id,
                position,
            },
            touch::Event::FingerLost { id, .. } => gesture::Message::Lost { finger: id },
        };

        match self.gesture.handle(msg) {
            gesture::Effect::None => (Effect::None, Task::none()),
            gesture::Effect::SwipeNext => self.navigate(navigation::Message::Next),
            gesture::Effect::SwipePrevious => self.navigate(navigation::Message::Previous),
            gesture::Effect::PinchZoom(level) => self.zoom(zoom::Message::Set(level)),
            gesture::Effect::PanStart(position) => {
                self.pan.handle(pan::Message::Start {
                    position,
                    magnified: self.zoom.level().is_magnified(),
                });
                (Effect::None, Task::none())
            }
            gesture::Effect::PanMove(position) => self.pan_to(position),
            gesture::Effect::PanEnd => {
                self.pan.handle(pan::Message::End);
                (Effect::None, Task::none())
            }
        }
    }

    fn pan_to(&mut self, position: Point) -> (Effect, Task<Message>) {
        match self.pan.handle(pan::Message::Move(position)) {
            pan::Effect::Moved(_) => (Effect::None, self.sync_scroll()),
            pan::Effect::None => (Effect::None, Task::none()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use crate::test_utils::assert_abs_diff_eq;
    use std::path::PathBuf;

    fn images(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::Image {
                key: MediaKey::image(i),
                source: ImageSource::File(PathBuf::from(format!("{i}.png"))),
                alt: Some(format!("alt {i}")),
            })
            .collect()
    }

    fn diagrams(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::Diagram {
                key: MediaKey::diagram(i),
                diagram: DiagramData::from_markup(
                    "<svg xmlns='http://www.w3.org/2000/svg' width='400' height='300'></svg>",
                ),
            })
            .collect()
    }

    fn lightbox(images_n: usize, diagrams_n: usize) -> State {
        State::new(
            MediaSequence::new(images(images_n), diagrams(diagrams_n)),
            &LightboxTuning::default(),
            Size::new(1000.0, 800.0),
        )
    }

    fn request_of(effect: Effect) -> RequestId {
        match effect {
            Effect::LoadImage { request, .. } => request,
            other => panic!("expected load effect, got {other:?}"),
        }
    }

    fn pixel() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn opening_an_image_loads_then_shows_alt_text() {
        let mut state = lightbox(2, 0);
        let (effect, _) = state.handle(Message::Open(1));
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.is_loading());
        assert!(state.locks_page_scroll());

        let request = request_of(effect);
        state.handle(Message::ImageLoaded {
            request,
            result: Ok(pixel()),
        });
        assert_eq!(state.phase(), Phase::Open);
        assert_eq!(state.info(), "alt 1");
        assert!(matches!(state.content(), Content::Image(_)));
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_image_shows_literal_message_and_stays_open() {
        let mut state = lightbox(1, 0);
        let (effect, _) = state.handle(Message::Open(0));
        state.handle(Message::ImageLoaded {
            request: request_of(effect),
            result: Err(Error::Io("missing".into())),
        });
        assert_eq!(state.phase(), Phase::Open);
        assert_eq!(state.info(), LOAD_FAILED_TEXT);
        assert!(matches!(state.content(), Content::Failed));
    }

    #[test]
    fn out_of_range_open_is_ignored() {
        let mut state = lightbox(1, 0);
        let (effect, _) = state.handle(Message::Open(5));
        assert!(matches!(effect, Effect::None));
        assert_eq!(state.phase(), Phase::Closed);
    }

    #[test]
    fn diagram_opens_immediately() {
        let mut state = lightbox(1, 1);
        let (effect, _) = state.handle(Message::Open(1));
        assert!(matches!(effect, Effect::None));
        assert_eq!(state.phase(), Phase::Open);
        assert_eq!(state.info(), "Diagram");
        assert!(state.shows_diagram());
    }

    #[test]
    fn superseded_load_is_discarded() {
        let mut state = lightbox(3, 0);
        let (first, _) = state.handle(Message::Open(0));
        let (second, _) = state.handle(Message::Next);
        let stale = request_of(first);
        let current = request_of(second);

        state.handle(Message::ImageLoaded {
            request: stale,
            result: Ok(pixel()),
        });
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.current_index(), 1);

        state.handle(Message::ImageLoaded {
            request: current,
            result: Ok(pixel()),
        });
        assert_eq!(state.info(), "alt 1");
    }

    #[test]
    fn load_finishing_after_close_is_discarded() {
        let mut state = lightbox(1, 0);
        let (effect, _) = state.handle(Message::Open(0));
        state.handle(Message::Close);
        state.handle(Message::ImageLoaded {
            request: request_of(effect),
            result: Ok(pixel()),
        });
        assert_eq!(state.phase(), Phase::Closing);
        assert!(matches!(state.content(), Content::None));
    }

    #[test]
    fn close_runs_cleanup_once_with_current_token() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        let (effect, _) = state.handle(Message::Close);
        let Effect::ScheduleCleanup { token, after } = effect else {
            panic!("expected cleanup");
        };
        assert_eq!(after, Duration::from_millis(300));
        assert!(!state.locks_page_scroll());
        assert!(matches!(state.handle(Message::Close).0, Effect::None));

        state.handle(Message::CleanupElapsed(token));
        assert_eq!(state.phase(), Phase::Closed);
        assert!(matches!(state.content(), Content::None));
    }

    #[test]
    fn reopening_during_close_ignores_old_cleanup() {
        let mut state = lightbox(0, 2);
        state.handle(Message::Open(0));
        let (effect, _) = state.handle(Message::Close);
        let Effect::ScheduleCleanup { token, .. } = effect else {
            panic!("expected cleanup");
        };
        state.handle(Message::Open(1));
        state.handle(Message::CleanupElapsed(token));
        assert_eq!(state.phase(), Phase::Open);
        assert!(matches!(state.content(), Content::Diagram(_)));
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut state = lightbox(0, 3);
        state.handle(Message::Open(0));
        state.handle(Message::Previous);
        assert_eq!(state.current_index(), 0);
        state.handle(Message::Next);
        state.handle(Message::Next);
        state.handle(Message::Next);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn navigation_is_ignored_when_closed() {
        let mut state = lightbox(0, 3);
        state.handle(Message::Next);
        assert_eq!(state.phase(), Phase::Closed);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn zoom_applies_only_to_diagrams() {
        let mut state = lightbox(1, 1);
        let (effect, _) = state.handle(Message::Open(0));
        state.handle(Message::ImageLoaded {
            request: request_of(effect),
            result: Ok(pixel()),
        });
        state.handle(Message::ZoomIn);
        assert_eq!(state.zoom_level(), ZoomLevel::default());

        state.handle(Message::Next);
        state.handle(Message::ZoomIn);
        assert!(state.zoom_level().is_magnified());
    }

    #[test]
    fn zooming_back_out_resets_pan() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        state.handle(Message::ZoomIn);
        state.handle(Message::RawEvent(event::Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(500.0, 400.0),
        })));
        state.handle(Message::RawEvent(event::Event::Mouse(
            mouse::Event::ButtonPressed(mouse::Button::Left),
        )));
        state.handle(Message::RawEvent(event::Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(520.0, 400.0),
        })));
        assert_eq!(state.pan_offset(), Vector::new(20.0, 0.0));

        state.handle(Message::ZoomOut);
        assert_eq!(state.pan_offset(), Vector::ZERO);
    }

    fn drag_by(state: &mut State, dx: f32) {
        let pointer = |input| Message::RawEvent(event::Event::Mouse(input));
        state.handle(pointer(mouse::Event::CursorMoved {
            position: Point::new(500.0, 400.0),
        }));
        state.handle(pointer(mouse::Event::ButtonPressed(mouse::Button::Left)));
        state.handle(pointer(mouse::Event::CursorMoved {
            position: Point::new(500.0 + dx, 400.0),
        }));
        state.handle(pointer(mouse::Event::ButtonReleased(mouse::Button::Left)));
    }

    #[test]
    fn wheel_back_to_default_zoom_resets_pan() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        state.handle(Message::ZoomIn);
        drag_by(&mut state, 25.0);
        assert_eq!(state.pan_offset(), Vector::new(25.0, 0.0));

        state.handle(Message::RawEvent(event::Event::Mouse(
            mouse::Event::WheelScrolled {
                delta: mouse::ScrollDelta::Lines { x: 0.0, y: -1.0 },
            },
        )));
        assert_abs_diff_eq!(state.zoom_level().value(), 1.0, epsilon = 1e-4);
        assert!(!state.zoom_level().is_magnified());
        assert_eq!(state.pan_offset(), Vector::ZERO);
    }

    #[test]
    fn pinching_below_default_zoom_resets_pan() {
        let finger = |input| Message::RawEvent(event::Event::Touch(input));
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        drag_by(&mut state, 30.0);
        assert_eq!(state.pan_offset(), Vector::new(30.0, 0.0));

        state.handle(finger(touch::Event::FingerPressed {
            id: touch::Finger(1),
            position: Point::new(400.0, 400.0),
        }));
        state.handle(finger(touch::Event::FingerPressed {
            id: touch::Finger(2),
            position: Point::new(500.0, 400.0),
        }));
        state.handle(finger(touch::Event::FingerMoved {
            id: touch::Finger(2),
            position: Point::new(450.0, 400.0),
        }));

        assert_abs_diff_eq!(state.zoom_level().value(), 0.7, epsilon = 1e-4);
        assert!(!state.zoom_level().is_magnified());
        assert_eq!(state.pan_offset(), Vector::ZERO);
    }

    #[test]
    fn rebind_reopens_item_whose_content_changed() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        state.handle(Message::ZoomIn);

        let redrawn = DiagramData::from_markup(
            "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='100'><circle r='5'/></svg>",
        );
        let item = MediaItem::Diagram {
            key: MediaKey::diagram(0),
            diagram: redrawn.clone(),
        };
        state.handle(Message::Rebind(MediaSequence::new(Vec::new(), vec![item])));

        assert!(matches!(state.content(), Content::Diagram(shown) if *shown == redrawn));
        assert_eq!(state.phase(), Phase::Open);
        assert_eq!(state.zoom_level(), ZoomLevel::default());
    }

    #[test]
    fn rebind_with_unchanged_item_keeps_zoom() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        state.handle(Message::ZoomIn);
        state.handle(Message::Rebind(MediaSequence::new(Vec::new(), diagrams(1))));
        assert!(state.zoom_level().is_magnified());
    }

    #[test]
    fn keyboard_drives_navigation_and_close() {
        use keyboard::key::Named;
        let key = |named| {
            Message::RawEvent(event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                modified_key: keyboard::Key::Named(named),
                physical_key: keyboard::key::Physical::Unidentified(
                    keyboard::key::NativeCode::Unidentified,
                ),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::default(),
                text: None,
                repeat: false,
            }))
        };

        let mut state = lightbox(0, 2);
        state.handle(Message::Open(0));
        state.handle(key(Named::ArrowRight));
        assert_eq!(state.current_index(), 1);
        state.handle(key(Named::ArrowLeft));
        assert_eq!(state.current_index(), 0);

        state.handle(key(Named::Tab));
        assert_eq!(state.focused_control(), Control::Next);
        state.handle(key(Named::Enter));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.focused_control(), Control::Close);

        state.handle(key(Named::Escape));
        assert_eq!(state.phase(), Phase::Closing);
    }

    #[test]
    fn rebind_keeps_current_item_by_key() {
        let mut state = lightbox(1, 2);
        state.handle(Message::Open(2));
        assert_eq!(state.current_key(), Some(MediaKey::diagram(1)));

        state.handle(Message::Rebind(MediaSequence::new(images(2), diagrams(2))));
        assert_eq!(state.current_index(), 3);
        assert_eq!(state.current_key(), Some(MediaKey::diagram(1)));
        assert_eq!(state.phase(), Phase::Open);
    }

    #[test]
    fn rebind_clamps_when_item_disappears() {
        let mut state = lightbox(0, 3);
        state.handle(Message::Open(2));
        state.handle(Message::Rebind(MediaSequence::new(Vec::new(), diagrams(2))));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.current_key(), Some(MediaKey::diagram(1)));
    }

    #[test]
    fn rebind_to_empty_closes() {
        let mut state = lightbox(0, 1);
        state.handle(Message::Open(0));
        let (effect, _) = state.handle(Message::Rebind(MediaSequence::default()));
        assert!(matches!(effect, Effect::ScheduleCleanup { .. }));
        assert_eq!(state.phase(), Phase::Closing);
    }
}
