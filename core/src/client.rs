//! Stateless request builders and response parsers for both backends.
//!
//! # Design
//! Each client holds only its base URL and credentials. Every operation is
//! split into a `build_*` method producing an `HttpRequest` and a `parse_*`
//! method consuming an `HttpResponse`; whoever sits in between performs the
//! I/O. See [`crate::source`] for the async glue.

use url::form_urlencoded;

use crate::auth::{sign, Credentials};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ComicCharacter, ComicsEnvelope, Page, RosterCharacter};

/// Header carrying the roster backend's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the signed comics API.
#[derive(Debug, Clone)]
pub struct ComicsClient {
    base_url: String,
    credentials: Credentials,
}

impl ComicsClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /characters`, signed for `ts_millis` and ordered by name.
    pub fn build_list_characters(&self, page: Page, ts_millis: i64) -> HttpRequest {
        let ts = ts_millis.to_string();
        let hash = sign(&ts, &self.credentials);
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("apikey", &self.credentials.public_key)
            .append_pair("ts", &ts)
            .append_pair("hash", &hash)
            .append_pair("offset", &page.offset().to_string())
            .append_pair("limit", &page.limit().to_string())
            .append_pair("orderBy", "name")
            .finish();
        HttpRequest::get(format!("{}/characters?{query}", self.base_url))
    }

    pub fn parse_envelope(&self, response: HttpResponse) -> Result<ComicsEnvelope, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Unwraps the envelope down to `data.results`.
    pub fn parse_list_characters(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ComicCharacter>, ApiError> {
        Ok(self.parse_envelope(response)?.data.results)
    }
}

/// Client for the roster API.
#[derive(Clone)]
pub struct RosterClient {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for RosterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RosterClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /heroes` with the API key header. The roster is not paginated.
    pub fn build_list_heroes(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/heroes", self.base_url)).with_header(API_KEY_HEADER, &self.api_key)
    }

    pub fn parse_list_heroes(&self, response: HttpResponse) -> Result<Vec<RosterCharacter>, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Map non-2xx statuses to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
