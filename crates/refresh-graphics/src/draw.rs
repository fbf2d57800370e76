//! Declarative draw instructions handed to the rendering backend.
//!
//! Indicators never touch a canvas directly. They record primitives into a
//! [`DrawScope`] and the host translates the resulting list into whatever its
//! backend understands.

use crate::color::Color;
use crate::geometry::{Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    /// Fills a rectangle with a solid color.
    Rect { rect: Rect, color: Color },
    /// Fills a circle.
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Strokes an arc. Angles are in degrees, clockwise from 3 o'clock.
    Arc {
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke_width: f32,
        color: Color,
    },
    /// Fills a triangle (used for the spinner arrow head).
    Triangle { points: [Point; 3], color: Color },
    /// Draws `content` restricted to `clip`, leaving `exclusion` untouched.
    ///
    /// Backends without a difference clip may split the region into the
    /// strips left and right of the exclusion; the instruction itself is a
    /// single declarative step.
    Clipped {
        clip: Rect,
        exclusion: Option<Rect>,
        content: Vec<DrawPrimitive>,
    },
}

pub trait DrawScope {
    fn bounds(&self) -> Rect;
    /// Fills the whole scope bounds.
    fn fill(&mut self, color: Color);
    fn draw_circle(&mut self, center: Point, radius: f32, color: Color);
    fn draw_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke_width: f32,
        color: Color,
    );
    fn draw_triangle(&mut self, points: [Point; 3], color: Color);
    /// Records `content` clipped to `clip` minus `exclusion`.
    fn clipped(
        &mut self,
        clip: Rect,
        exclusion: Option<Rect>,
        content: &mut dyn FnMut(&mut dyn DrawScope),
    );
    fn into_primitives(self) -> Vec<DrawPrimitive>
    where
        Self: Sized;
}

#[derive(Default)]
pub struct DrawScopeDefault {
    bounds: Rect,
    primitives: Vec<DrawPrimitive>,
}

impl DrawScopeDefault {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            primitives: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl DrawScope for DrawScopeDefault {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn fill(&mut self, color: Color) {
        self.primitives.push(DrawPrimitive::Rect {
            rect: self.bounds,
            color,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.primitives.push(DrawPrimitive::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke_width: f32,
        color: Color,
    ) {
        self.primitives.push(DrawPrimitive::Arc {
            center,
            radius,
            start_degrees,
            sweep_degrees,
            stroke_width,
            color,
        });
    }

    fn draw_triangle(&mut self, points: [Point; 3], color: Color) {
        self.primitives.push(DrawPrimitive::Triangle { points, color });
    }

    fn clipped(
        &mut self,
        clip: Rect,
        exclusion: Option<Rect>,
        content: &mut dyn FnMut(&mut dyn DrawScope),
    ) {
        let mut nested = DrawScopeDefault::new(clip);
        content(&mut nested);
        if nested.is_empty() {
            return;
        }
        self.primitives.push(DrawPrimitive::Clipped {
            clip,
            exclusion,
            content: nested.primitives,
        });
    }

    fn into_primitives(self) -> Vec<DrawPrimitive> {
        self.primitives
    }
}
