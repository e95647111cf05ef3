use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::{FavoritesError, RegistryError};

/// Errors surfaced by the discovery pipeline to its callers
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Upstream registry call failed; carries the upstream status when known, else 500
    #[error("Registry error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Favorite counts unavailable: {0}")]
    Favorites(String),
}

impl DiscoveryError {
    pub fn status_code_u16(&self) -> u16 {
        match self {
            DiscoveryError::Provider { status, .. } => *status,
            DiscoveryError::NotFound(_) => 404,
            DiscoveryError::Configuration(_) => 500,
            DiscoveryError::Favorites(_) => 503,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DiscoveryError::Provider { .. } => "provider_error",
            DiscoveryError::NotFound(_) => "not_found",
            DiscoveryError::Configuration(_) => "configuration_error",
            DiscoveryError::Favorites(_) => "favorites_unavailable",
        }
    }
}

impl From<RegistryError> for DiscoveryError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::MissingCredential(msg) => DiscoveryError::Configuration(msg),
            other => DiscoveryError::Provider {
                status: other.status_code(),
                message: other.to_string(),
            },
        }
    }
}

impl From<FavoritesError> for DiscoveryError {
    fn from(err: FavoritesError) -> Self {
        DiscoveryError::Favorites(err.to_string())
    }
}

impl ResponseError for DiscoveryError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = ResponseError::status_code(self);
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_status_forwarded() {
        let err: DiscoveryError = RegistryError::ApiError {
            status: 429,
            message: "slow down".to_string(),
        }
        .into();

        assert_eq!(err.status_code_u16(), 429);
        assert_eq!(ResponseError::status_code(&err), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let err: DiscoveryError = RegistryError::MissingCredential("registry.api_key".to_string()).into();
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = DiscoveryError::NotFound("animal 9".to_string());
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_upstream_status_falls_back_to_500() {
        let err = DiscoveryError::Provider {
            status: 1000,
            message: "weird".to_string(),
        };
        assert_eq!(ResponseError::status_code(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
