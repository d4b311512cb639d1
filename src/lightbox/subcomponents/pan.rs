// SPDX-License-Identifier: MPL-2.0
//! Pan sub-component: grab-and-drag offset of a magnified diagram.

use iced::{Point, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_position: Point,
    start_offset: Vector,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    offset: Vector,
    drag: Option<Drag>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer or finger went down. `magnified` is whether zoom > 1.
    Start { position: Point, magnified: bool },
    Move(Point),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Moved(Vector),
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Start {
                position,
                magnified,
            } => {
                // A drag that begins unzoomed stays inert until released.
                self.drag = magnified.then_some(Drag {
                    start_position: position,
                    start_offset: self.offset,
                });
                Effect::None
            }
            Message::Move(position) => {
                let Some(drag) = self.drag else {
                    return Effect::None;
                };
                self.offset = drag.start_offset + (position - drag.start_position);
                Effect::Moved(self.offset)
            }
            Message::End => {
                self.drag = None;
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn reset(&mut self) {
        self.offset = Vector::ZERO;
        self.drag = None;
    }
}
