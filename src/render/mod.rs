//! Marker composition onto floor-plan imagery

pub mod compositor;

pub use compositor::{compose, feet_to_pixels, fit_within, MarkerStyle, RenderError, RenderResult};
