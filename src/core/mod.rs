//! Core types for the floor-map locator

pub mod types;

pub use types::*;
