//! Wireless-client floor-map locator
//!
//! Looks up the most recent recorded position of a wireless client through a
//! location-services REST API, fetches the matching floor plan and its
//! scaling information, and renders a marker at the client's position before
//! saving the composite image.

pub mod api;
pub mod config;
pub mod core;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use self::api::{ApiError, ApiResult, LocationClient};
pub use self::config::{ConfigError, RunConfig};
pub use self::core::{ClientLocation, FloorDescriptor, FloorPath, FloorPosition};
pub use self::pipeline::{run, PlotError, RunSummary};
pub use self::render::{MarkerStyle, RenderError, RenderResult};
