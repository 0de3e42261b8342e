use std::sync::Arc;

use log::{debug, error, warn};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::domain::constants::*;
use crate::domain::errors::ValidationError;
use crate::domain::model::order::{OrderRequest, OrderUpdate};
use crate::domain::validation::{validate_create, validate_update};

use super::error::ApiError;
use super::models::ApiResponse;
use super::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Thin client over the order REST surface.
///
/// The bearer token and base URL are fixed at construction. Every call is
/// attempted exactly once.
pub struct TradeApiRequester {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    headers: Vec<(String, String)>,
}

impl TradeApiRequester {
    /// Build a requester for `host`, falling back to the UAT host when none is given.
    pub fn new(
        token: &str,
        host: Option<&str>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        let host = match host {
            Some(host) => host,
            None => {
                warn!("API host was not provided. Using default UAT host '{}'", DEFAULT_HOST);
                DEFAULT_HOST
            }
        };

        let base_url = Url::parse(&format!("{}{}", host.trim_end_matches('/'), ORDER_API_PATH))
            .map_err(|e| ApiError::InvalidConfig(format!("invalid API host '{}': {}", host, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!("invalid API host '{}'", host)));
        }

        Ok(Self {
            transport,
            base_url,
            headers: vec![("Authorization".to_string(), format!("Bearer {}", token))],
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as a single segment.
    fn url_with(&self, segments: &[&str]) -> Result<String, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig(format!("API URL '{}' cannot take a path", self.base_url)))?
            .extend(segments);
        Ok(url.into())
    }

    async fn send(&self, method: Method, url: String, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url,
            headers: self.headers.clone(),
            body,
        };
        Ok(self.transport.send(request).await?)
    }

    /// Log a non-accepted status. Returns whether the status was accepted.
    fn check_status(&self, operation: &str, response: &HttpResponse, accepted: &[u16]) -> bool {
        if accepted.contains(&response.status) {
            debug!("{} succeeded with status {}", operation, response.status);
            true
        } else {
            error!("{} failed: {} - {}", operation, response.status, response.body);
            false
        }
    }

    fn parse_json(response: &HttpResponse) -> Result<Value, ApiError> {
        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
            status: response.status,
            source,
        })
    }

    /// `POST {base}`: validate and submit a new order.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Value, ApiError> {
        validate_create(request)?;

        let response = self
            .send(Method::POST, self.base_url.to_string(), Some(request.to_body()))
            .await?;
        self.check_status("create_order", &response, ACCEPTED_STATUS);
        Self::parse_json(&response)
    }

    /// `PUT {base}`: validate and submit an amendment.
    pub async fn update_order(&self, update: &OrderUpdate) -> Result<Value, ApiError> {
        validate_update(update)?;

        let response = self
            .send(Method::PUT, self.base_url.to_string(), Some(update.to_body()))
            .await?;
        self.check_status("update_order", &response, ACCEPTED_STATUS);
        Self::parse_json(&response)
    }

    /// `DELETE {base}/{id}`. An id equal to the cancel-all segment is refused.
    pub async fn cancel_order(&self, id: &str) -> Result<Value, ApiError> {
        let id = order_id_segment(id)?;
        if id == CANCEL_ALL_SEGMENT {
            return Err(ValidationError::InvalidOrderId { id: id.to_string() }.into());
        }
        let url = self.url_with(&[id])?;
        let response = self.send(Method::DELETE, url, None).await?;
        self.check_status("cancel_order", &response, ACCEPTED_STATUS);
        Self::parse_json(&response)
    }

    /// `DELETE {base}/myorders`. A 204 carries no JSON, so its raw text is returned.
    pub async fn cancel_all_orders(&self) -> Result<ApiResponse, ApiError> {
        let url = self.url_with(&[CANCEL_ALL_SEGMENT])?;
        let response = self.send(Method::DELETE, url, None).await?;
        self.check_status("cancel_all_orders", &response, ACCEPTED_STATUS_CANCEL_ALL);

        if response.status == STATUS_NO_CONTENT {
            return Ok(ApiResponse::Text(response.body));
        }
        Self::parse_json(&response).map(ApiResponse::Json)
    }

    /// `GET {base}`
    pub async fn get_orders(&self) -> Result<Value, ApiError> {
        let response = self.send(Method::GET, self.base_url.to_string(), None).await?;
        self.check_status("get_orders", &response, ACCEPTED_STATUS);
        Self::parse_json(&response)
    }

    /// `GET {base}/id/{id}`. Unlike the other calls a bad status is an error.
    pub async fn get_order(&self, id: &str) -> Result<Value, ApiError> {
        let url = self.url_with(&[ORDER_BY_ID_SEGMENT, order_id_segment(id)?])?;
        let response = self.send(Method::GET, url, None).await?;
        if !self.check_status("get_order", &response, ACCEPTED_STATUS) {
            return Err(ApiError::UnexpectedResponse {
                status: response.status,
                body: response.body,
            });
        }
        Self::parse_json(&response)
    }
}

/// An id usable as a path segment. Dot segments would be dropped from the URL.
fn order_id_segment(id: &str) -> Result<&str, ValidationError> {
    match id {
        "" => Err(ValidationError::MissingField { field: "id" }),
        "." | ".." => Err(ValidationError::InvalidOrderId { id: id.to_string() }),
        _ => Ok(id),
    }
}
