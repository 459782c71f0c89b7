//! Blocking REST client for the location service
//!
//! Three authenticated GET endpoints supply the pipeline's inputs: the client
//! history lookup, the floor information lookup and the floor image download.

use crate::api::types::{ApiError, ApiResult, FloorInfoResponse, HistoryResponse};
use crate::config::RunConfig;
use crate::core::{ClientLocation, FloorDescriptor, FloorPath};
use image::DynamicImage;
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

/// Blocking client for the three location-service endpoints
pub struct LocationClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl LocationClient {
    /// Build a client from the run configuration.
    ///
    /// With `verify_cert` disabled the client accepts self-signed server
    /// certificates, matching appliances that ship without a CA-signed chain.
    pub fn new(config: &RunConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(!config.verify_cert)
            .build()
            .map_err(|e| ApiError::ClientSetup {
                details: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Most recent recorded location of the given client device
    pub fn client_location(&self, hardware_address: &str) -> ApiResult<ClientLocation> {
        let endpoint = self.history_url(hardware_address);
        let history: HistoryResponse =
            self.get(&endpoint)?
                .json()
                .map_err(|e| ApiError::DecodeFailure {
                    endpoint: endpoint.clone(),
                    details: e.to_string(),
                })?;

        history.client_location(hardware_address)
    }

    /// Physical and pixel dimensions of the given floor's map
    pub fn floor_descriptor(&self, floor: &FloorPath) -> ApiResult<FloorDescriptor> {
        let endpoint = self.floor_info_url(floor);
        let info: FloorInfoResponse =
            self.get(&endpoint)?
                .json()
                .map_err(|e| ApiError::DecodeFailure {
                    endpoint: endpoint.clone(),
                    details: e.to_string(),
                })?;

        Ok(info.to_descriptor())
    }

    /// Decoded floor-plan image for the given floor
    pub fn floor_image(&self, floor: &FloorPath) -> ApiResult<DynamicImage> {
        let endpoint = self.floor_image_url(floor);
        let bytes = self
            .get(&endpoint)?
            .bytes()
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.clone(),
                details: e.to_string(),
            })?;

        image::load_from_memory(&bytes).map_err(|e| ApiError::DecodeFailure {
            endpoint,
            details: e.to_string(),
        })
    }

    /// Authenticated GET that treats anything but HTTP 200 as an error
    fn get(&self, endpoint: &str) -> ApiResult<Response> {
        debug!("GET {}", endpoint);
        let response = self
            .http
            .get(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    fn history_url(&self, hardware_address: &str) -> String {
        format!(
            "{}/location/v1/history/clients/{}",
            self.base_url, hardware_address
        )
    }

    fn floor_info_url(&self, floor: &FloorPath) -> String {
        format!(
            "{}/config/v1/maps/info/{}/{}/{}",
            self.base_url, floor.campus, floor.building, floor.floor
        )
    }

    fn floor_image_url(&self, floor: &FloorPath) -> String {
        format!(
            "{}/config/v1/maps/image/{}/{}/{}",
            self.base_url, floor.campus, floor.building, floor.floor
        )
    }
}
