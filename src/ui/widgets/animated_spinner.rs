// SPDX-License-Identifier: MPL-2.0
//! Loading spinner drawn on a canvas: a faint ring with a rotating half arc.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{FRAC_PI_2, PI};

const STROKE_WIDTH: f32 = 3.0;
const ARC_SEGMENTS: u16 = 30;

pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    /// Spinner in `color` with its arc starting `rotation` radians past 12 o'clock.
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_LG,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    fn arc(&self, center: Point, radius: f32) -> Path {
        let start = self.rotation - FRAC_PI_2;
        Path::new(|builder| {
            for i in 0..=ARC_SEGMENTS {
                let angle = start + PI * f32::from(i) / f32::from(ARC_SEGMENTS);
                let point = Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                );
                if i == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
        })
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            let center = frame.center();
            let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

            frame.stroke(
                &Path::circle(center, radius),
                Stroke::default()
                    .with_width(STROKE_WIDTH)
                    .with_color(Color { a: 0.25, ..self.color }),
            );
            frame.stroke(
                &self.arc(center, radius),
                Stroke::default()
                    .with_width(STROKE_WIDTH)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        });

        vec![geometry]
    }
}
