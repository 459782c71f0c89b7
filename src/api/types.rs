//! Wire types and errors for the location-services REST API

use crate::core::{ClientLocation, FloorDescriptor, FloorPath, FloorPosition};
use serde::Deserialize;
use std::fmt;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Location history is empty for the requested device
    ClientNotFound { hardware_address: String },
    /// The service answered with something other than HTTP 200
    RequestFailed { endpoint: String, status: u16 },
    /// The request never produced a usable response
    Transport { endpoint: String, details: String },
    /// Response body could not be decoded
    DecodeFailure { endpoint: String, details: String },
    /// HTTP client construction failed
    ClientSetup { details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ClientNotFound { hardware_address } => {
                write!(
                    f,
                    "no location history for client '{}': device not found or hardware address incorrect",
                    hardware_address
                )
            }
            ApiError::RequestFailed { endpoint, status } => {
                write!(f, "request to {} failed with HTTP {}", endpoint, status)
            }
            ApiError::Transport { endpoint, details } => {
                write!(f, "request to {} failed: {}", endpoint, details)
            }
            ApiError::DecodeFailure { endpoint, details } => {
                write!(f, "could not decode response from {}: {}", endpoint, details)
            }
            ApiError::ClientSetup { details } => {
                write!(f, "could not construct HTTP client: {}", details)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Location history for one client, newest record first
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename = "Records", default)]
    pub records: Vec<HistoryRecord>,
}

impl HistoryResponse {
    /// Most recent history entry, if any exists
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    /// Head of the history list, or the not-found error an empty result
    /// represents
    pub fn client_location(&self, hardware_address: &str) -> ApiResult<ClientLocation> {
        match self.latest() {
            Some(record) => Ok(record.to_client_location()),
            None => Err(ApiError::ClientNotFound {
                hardware_address: hardware_address.to_string(),
            }),
        }
    }
}

/// One recorded observation of a client
#[derive(Debug, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "mapCoordinate")]
    pub map_coordinate: MapCoordinate,
    #[serde(rename = "mapInfo")]
    pub map_info: MapInfo,
}

impl HistoryRecord {
    /// Convert the wire record into the core location type
    pub fn to_client_location(&self) -> ClientLocation {
        ClientLocation {
            position: FloorPosition {
                x_feet: self.map_coordinate.x,
                y_feet: self.map_coordinate.y,
            },
            floor: FloorPath {
                campus: self.map_info.hierarchy.campus.clone(),
                building: self.map_info.hierarchy.building.clone(),
                floor: self.map_info.hierarchy.floor.clone(),
            },
        }
    }
}

/// Recorded position in feet from the map origin
#[derive(Debug, Deserialize)]
pub struct MapCoordinate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct MapInfo {
    #[serde(rename = "mapHierarchyDetails")]
    pub hierarchy: MapHierarchyDetails,
}

/// Campus, building and floor names identifying one floor plan
#[derive(Debug, Deserialize)]
pub struct MapHierarchyDetails {
    pub campus: String,
    pub building: String,
    pub floor: String,
}

/// Floor information body: physical dimensions plus reference image size
#[derive(Debug, Deserialize)]
pub struct FloorInfoResponse {
    pub dimension: FloorDimension,
    pub image: FloorImageInfo,
}

impl FloorInfoResponse {
    /// Collapse the wire body into the core scaling descriptor
    pub fn to_descriptor(&self) -> FloorDescriptor {
        FloorDescriptor {
            width_feet: self.dimension.width,
            length_feet: self.dimension.length,
            image_width_px: self.image.width,
            image_height_px: self.image.height,
        }
    }
}

/// Physical floor dimensions in feet
#[derive(Debug, Deserialize)]
pub struct FloorDimension {
    pub width: f64,
    pub length: f64,
}

/// Reference floor-plan image dimensions in pixels
#[derive(Debug, Deserialize)]
pub struct FloorImageInfo {
    pub width: u32,
    pub height: u32,
}
