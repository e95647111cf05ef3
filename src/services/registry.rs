use crate::models::{RawDetailResult, RawSearchResult, SearchRequest};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Media type of the registry's JSON:API payloads
const JSON_API: &str = "application/vnd.api+json";

/// Related records fetched inline so normalization needs no extra round trips
const INCLUDE: &str = "locations,orgs,pictures";

/// Errors that can occur when talking to the animal registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Registry returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Missing registry credential: {0}")]
    MissingCredential(String),
}

impl RegistryError {
    /// Upstream status when the registry reported one, otherwise 500
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::RequestError(e) => e.status().map(|s| s.as_u16()).unwrap_or(500),
            RegistryError::ApiError { status, .. } => *status,
            RegistryError::InvalidResponse(_) | RegistryError::MissingCredential(_) => 500,
        }
    }
}

/// Read access to the external animal registry
#[async_trait]
pub trait AnimalRegistry: Send + Sync {
    /// Run a single-page search
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResult, RegistryError>;

    /// Fetch one animal; an unknown id yields an empty payload, not an error
    async fn get_by_id(&self, id: &str) -> Result<RawDetailResult, RegistryError>;
}

/// HTTP client for the animal registry
///
/// The `reqwest::Client` is injected so timeouts and TLS settings are
/// decided at composition time.
pub struct RegistryClient {
    base_url: String,
    api_key: String,
    species: String,
    client: Client,
}

impl RegistryClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(
        base_url: String,
        api_key: String,
        species: String,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_http_client(client, base_url, api_key, species)
    }

    /// Create a client around an existing HTTP client
    ///
    /// Fails with [`RegistryError::MissingCredential`] when the API key is blank.
    pub fn with_http_client(
        client: Client,
        base_url: String,
        api_key: String,
        species: String,
    ) -> Result<Self, RegistryError> {
        if api_key.trim().is_empty() {
            return Err(RegistryError::MissingCredential(
                "registry.api_key is not set".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            species,
            client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/public/animals/search/available/{}", self.base_url, self.species)
    }

    fn detail_url(&self, id: &str) -> String {
        format!("{}/public/animals/{}", self.base_url, urlencoding::encode(id))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RegistryError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| RegistryError::InvalidResponse(format!("Failed to parse registry payload: {}", e)))
    }

    async fn api_error(context: &str, response: reqwest::Response) -> RegistryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Registry {} failed: {} - {}", context, status, body);
        RegistryError::ApiError {
            status: status.as_u16(),
            message: format!("Failed to {}: {}", context, status),
        }
    }
}

#[async_trait]
impl AnimalRegistry for RegistryClient {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResult, RegistryError> {
        let url = self.search_url();
        let limit = request.limit.to_string();

        tracing::debug!(
            "Searching registry: {} ({} filters, radius: {:?}, limit: {})",
            url,
            request.filters.len(),
            request.radius,
            request.limit
        );

        let response = self
            .client
            .post(&url)
            .query(&[("limit", limit.as_str()), ("page", "1"), ("include", INCLUDE)])
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
            .json(&request.body())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error("search animals", response).await);
        }

        let raw: RawSearchResult = Self::read_json(response).await?;
        tracing::debug!(
            "Registry returned {} animals ({} included records)",
            raw.data.len(),
            raw.included.len()
        );

        Ok(raw)
    }

    async fn get_by_id(&self, id: &str) -> Result<RawDetailResult, RegistryError> {
        let url = self.detail_url(id);

        tracing::debug!("Fetching animal {} from registry", id);

        let response = self
            .client
            .get(&url)
            .query(&[("include", INCLUDE)])
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, JSON_API)
            .send()
            .await?;

        // Absence is decided by the caller
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Registry has no animal {}", id);
            return Ok(RawDetailResult::default());
        }

        if !response.status().is_success() {
            return Err(Self::api_error("fetch animal", response).await);
        }

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProviderFilter, RadiusFilter};
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> RegistryClient {
        RegistryClient::with_http_client(
            Client::new(),
            server.url(),
            "test_key".to_string(),
            "dogs".to_string(),
        )
        .unwrap()
    }

    fn request() -> SearchRequest {
        SearchRequest {
            filters: vec![ProviderFilter::equals("animals.sex", "Female")],
            radius: Some(RadiusFilter {
                miles: 50,
                postal_code: "01938".to_string(),
            }),
            limit: 150,
        }
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let result = RegistryClient::with_http_client(
            Client::new(),
            "https://registry.test".to_string(),
            "  ".to_string(),
            "dogs".to_string(),
        );
        assert!(matches!(result, Err(RegistryError::MissingCredential(_))));
    }

    #[test]
    fn test_urls_built_from_base() {
        let client = RegistryClient::with_http_client(
            Client::new(),
            "https://registry.test/v5/".to_string(),
            "key".to_string(),
            "cats".to_string(),
        )
        .unwrap();

        assert_eq!(client.search_url(), "https://registry.test/v5/public/animals/search/available/cats");
        assert_eq!(client.detail_url("a b"), "https://registry.test/v5/public/animals/a%20b");
    }

    #[tokio::test]
    async fn test_search_sends_credentials_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/public/animals/search/available/dogs")
            .match_header("authorization", "test_key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "150".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("include".into(), INCLUDE.into()),
            ]))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "data": {
                    "filters": [{"fieldName": "animals.sex", "operation": "equals", "criteria": "Female"}],
                    "filterRadius": {"miles": 50, "postalcode": "01938"}
                }
            })))
            .with_status(200)
            .with_header("content-type", JSON_API)
            .with_body(r#"{"data": [{"type": "animals", "id": "1", "attributes": {"name": "Rex"}}], "included": []}"#)
            .create_async()
            .await;

        let raw = client_for(&server).search(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(raw.data.len(), 1);
        assert_eq!(raw.data[0].attributes.name.as_deref(), Some("Rex"));
    }

    #[tokio::test]
    async fn test_search_forwards_provider_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/public/animals/search/available/dogs")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let err = client_for(&server).search(&request()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_garbage_payload_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/public/animals/search/available/dogs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server).search(&request()).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_empty_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/public/animals/404404")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let raw = client_for(&server).get_by_id("404404").await.unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/public/animals/7")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).get_by_id("7").await.unwrap_err();
        assert_eq!(err.status_code(), 503);
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_500() {
        let client = RegistryClient::with_http_client(
            Client::new(),
            "http://127.0.0.1:1".to_string(),
            "key".to_string(),
            "dogs".to_string(),
        )
        .unwrap();

        let err = client.get_by_id("1").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
