// SPDX-License-Identifier: MPL-2.0
//! Touch gesture recognition: swipe navigation, pinch zoom and one-finger pan.
//!
//! A gesture lasts from the first finger down to the last finger up. Once a
//! second finger joins, the gesture is a pinch and never becomes a swipe. A
//! single finger that lands while the content is magnified pans instead of
//! swiping.

use super::zoom::ZoomLevel;
use iced::touch::Finger;
use iced::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f32,
    start_zoom: f32,
}

#[derive(Debug, Clone)]
pub struct State {
    threshold: f32,
    touches: Vec<(Finger, Point)>,
    swipe_start: Option<Point>,
    multi_touch: bool,
    panning: bool,
    pinch: Option<Pinch>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Pressed {
        finger: Finger,
        position: Point,
        zoom: ZoomLevel,
    },
    Moved {
        finger: Finger,
        position: Point,
    },
    Lifted {
        finger: Finger,
        position: Point,
    },
    /// The platform cancelled the touch.
    Lost { finger: Finger },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    SwipeNext,
    SwipePrevious,
    /// Absolute zoom level requested by a pinch.
    PinchZoom(f32),
    PanStart(Point),
    PanMove(Point),
    PanEnd,
}

impl Default for State {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl State {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            touches: Vec::new(),
            swipe_start: None,
            multi_touch: false,
            panning: false,
            pinch: None,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Pressed {
                finger,
                position,
                zoom,
            } => self.press(finger, position, zoom),
            Message::Moved { finger, position } => self.move_to(finger, position),
            Message::Lifted { finger, position } => self.lift(finger, Some(position)),
            Message::Lost { finger } => self.lift(finger, None),
        }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.touches.is_empty()
    }

    pub fn reset(&mut self) {
        self.touches.clear();
        self.swipe_start = None;
        self.multi_touch = false;
        self.panning = false;
        self.pinch = None;
    }

    fn press(&mut self, finger: Finger, position: Point, zoom: ZoomLevel) -> Effect {
        self.touches.retain(|(f, _)| *f != finger);
        self.touches.push((finger, position));

        match self.touches.len() {
            1 => {
                self.swipe_start = Some(position);
                self.multi_touch = false;
                self.pinch = None;
                self.panning = zoom.is_magnified();
                if self.panning {
                    Effect::PanStart(position)
                } else {
                    Effect::None
                }
            }
            2 => {
                self.multi_touch = true;
                self.pinch = self.finger_distance().map(|start_distance| Pinch {
                    start_distance,
                    start_zoom: zoom.value(),
                });
                if std::mem::take(&mut self.panning) {
                    Effect::PanEnd
                } else {
                    Effect::None
                }
            }
            _ => {
                self.multi_touch = true;
                Effect::None
            }
        }
    }

    fn move_to(&mut self, finger: Finger, position: Point) -> Effect {
        let Some(entry) = self.touches.iter_mut().find(|(f, _)| *f == finger) else {
            return Effect::None;
        };
        entry.1 = position;

        if let Some(pinch) = self.pinch {
            return match self.finger_distance() {
                Some(distance) if pinch.start_distance > 0.0 => {
                    Effect::PinchZoom(pinch.start_zoom * distance / pinch.start_distance)
                }
                _ => Effect::None,
            };
        }
        if self.panning && self.touches.len() == 1 {
            return Effect::PanMove(position);
        }
        Effect::None
    }

    fn lift(&mut self, finger: Finger, position: Option<Point>) -> Effect {
        let before = self.touches.len();
        self.touches.retain(|(f, _)| *f != finger);
        if self.touches.len() == before {
            return Effect::None;
        }

        if !self.touches.is_empty() {
            // Pinch ends when a finger leaves; the gesture stays multi-touch.
            self.pinch = None;
            return Effect::None;
        }

        let effect = if self.panning {
            Effect::PanEnd
        } else if self.multi_touch {
            Effect::None
        } else {
            match (self.swipe_start, position) {
                (Some(start), Some(end)) => self.classify_swipe(start.x - end.x),
                _ => Effect::None,
            }
        };
        self.reset();
        effect
    }

    fn classify_swipe(&self, distance: f32) -> Effect {
        if distance > self.threshold {
            Effect::SwipeNext
        } else if distance < -self.threshold {
            Effect::SwipePrevious
        } else {
            Effect::None
        }
    }

    fn finger_distance(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}
