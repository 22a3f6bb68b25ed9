//! Colour representation shared by config and the draw surface.

mod color;

pub use color::Color;
