//! Pure math/data for drawing refresh indicators
//!
//! This crate contains the geometry primitives, colors, units and the
//! declarative draw list handed to whatever rendering backend the host uses.

mod color;
mod draw;
mod geometry;
mod unit;

pub use color::*;
pub use draw::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::draw::{DrawPrimitive, DrawScope, DrawScopeDefault};
    pub use crate::geometry::{Point, Rect};
    pub use crate::unit::Dp;
}
