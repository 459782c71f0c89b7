//! Linear locate, fetch, compose and save pipeline
//!
//! Each step takes explicit inputs and returns an explicit result; exit-code
//! policy stays with the caller so the steps remain unit-testable.

use crate::api::{ApiError, LocationClient};
use crate::config::{ConfigError, RunConfig};
use crate::core::FloorPath;
use crate::render::{self, MarkerStyle, RenderError};
use log::info;
use std::fmt;

/// Top-level error for a locate-and-plot run
#[derive(Debug)]
pub enum PlotError {
    Config(ConfigError),
    Api(ApiError),
    Render(RenderError),
}

impl PlotError {
    /// Process exit code for this failure. 1 is reserved for a client with
    /// no location history; every other failure maps to 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlotError::Api(ApiError::ClientNotFound { .. }) => 1,
            _ => 2,
        }
    }
}

impl From<ConfigError> for PlotError {
    fn from(error: ConfigError) -> Self {
        PlotError::Config(error)
    }
}

impl From<ApiError> for PlotError {
    fn from(error: ApiError) -> Self {
        PlotError::Api(error)
    }
}

impl From<RenderError> for PlotError {
    fn from(error: RenderError) -> Self {
        PlotError::Render(error)
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Config(e) => write!(f, "{}", e),
            PlotError::Api(e) => write!(f, "{}", e),
            PlotError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Config(e) => Some(e),
            PlotError::Api(e) => Some(e),
            PlotError::Render(e) => Some(e),
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Floor the client was found on
    pub floor: FloorPath,
    /// Marker center on the full-size floor image
    pub pixel_x: f64,
    pub pixel_y: f64,
    /// Where the composite image was written
    pub output_path: String,
    /// Final image dimensions after the size cap
    pub output_width: u32,
    pub output_height: u32,
}

/// Execute one locate-and-plot run.
///
/// Strictly sequential: history lookup, floor metadata, floor image, marker
/// composition, save. The first failure aborts the run and nothing is
/// written.
pub fn run(config: &RunConfig) -> Result<RunSummary, PlotError> {
    config.validate()?;

    let client = LocationClient::new(config)?;

    info!(
        "looking up location history for {}",
        config.hardware_address
    );
    let location = client.client_location(&config.hardware_address)?;
    info!(
        "client last seen on {} at ({:.1}, {:.1}) ft",
        location.floor, location.position.x_feet, location.position.y_feet
    );

    let descriptor = client.floor_descriptor(&location.floor)?;
    let bitmap = client.floor_image(&location.floor)?;

    let marker = MarkerStyle {
        color: config.marker_color,
        radius_px: config.marker_radius_px,
    };
    let (composed, pixel) = render::compose(
        bitmap,
        location.position,
        &descriptor,
        marker,
        config.max_output_px,
    )?;

    composed
        .save(&config.output_path)
        .map_err(|e| RenderError::WriteFailure {
            path: config.output_path.clone(),
            details: e.to_string(),
        })?;
    info!("wrote {}", config.output_path);

    Ok(RunSummary {
        floor: location.floor,
        pixel_x: pixel.x,
        pixel_y: pixel.y,
        output_path: config.output_path.clone(),
        output_width: composed.width(),
        output_height: composed.height(),
    })
}
