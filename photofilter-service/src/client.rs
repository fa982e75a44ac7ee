//! Filter service HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). One call per filter application:
//! `POST /filtering?filter=..&int=..&c=..` with the base64 payload as the body.

use photofilter_core::{EditError, FilterRequest, ImageRef};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::config::{ConfigError, ServiceConfig};
use crate::response::parse_filter_response;

/// Anything that can turn an image plus filter parameters into a new image.
pub trait FilterService {
    fn apply(&self, image: &ImageRef, request: &FilterRequest) -> Result<ImageRef, EditError>;
}

impl<S: FilterService + ?Sized> FilterService for &S {
    fn apply(&self, image: &ImageRef, request: &FilterRequest) -> Result<ImageRef, EditError> {
        (**self).apply(image, request)
    }
}

/// The remote filter service (blocking).
#[derive(Clone)]
pub struct HttpFilterService {
    http: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpFilterService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let endpoint = config.filtering_url()?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("photofilter/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        tracing::debug!(endpoint = %endpoint, "filter service client ready");
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl FilterService for HttpFilterService {
    fn apply(&self, image: &ImageRef, request: &FilterRequest) -> Result<ImageRef, EditError> {
        tracing::info!(
            filter = %request.kind,
            intensity = request.intensity.value,
            color = %request.color.to_wire(),
            payload_len = image.len(),
            "requesting filter"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&request.query_pairs())
            .header(CONTENT_TYPE, "text/plain")
            .body(image.as_base64().to_owned())
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "filter service unreachable");
                EditError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "filter service refused request");
            return Err(EditError::ServiceUnavailable {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| EditError::Network(e.to_string()))?;
        let filtered = parse_filter_response(&body)?;

        tracing::debug!(payload_len = filtered.len(), "filter applied");
        Ok(filtered)
    }
}
