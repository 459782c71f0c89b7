//! Core data types for the floor-map locator

use std::fmt;

/// Client position on a floor, in feet from the map origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPosition {
    pub x_feet: f64,
    pub y_feet: f64,
}

/// Hierarchical identifier of a single floor plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorPath {
    pub campus: String,
    pub building: String,
    pub floor: String,
}

impl fmt::Display for FloorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.campus, self.building, self.floor)
    }
}

/// Most recent recorded location of a client device
#[derive(Debug, Clone)]
pub struct ClientLocation {
    pub position: FloorPosition,
    pub floor: FloorPath,
}

/// Physical and pixel dimensions describing one floor's map scaling basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorDescriptor {
    pub width_feet: f64,
    pub length_feet: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
}
