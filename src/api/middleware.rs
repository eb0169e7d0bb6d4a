//! Access control for the dashboard API.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

/// Security configuration loaded from environment variables.
#[derive(Clone, Debug, Default)]
pub struct SecurityConfig {
    /// Bearer token required on every request (from MAIRIS_ACCESS_TOKEN)
    pub access_token: Option<String>,
    /// Allowed CORS origins (from MAIRIS_CORS_ORIGINS, comma-separated)
    pub cors_origins: Option<Vec<String>>,
}

impl SecurityConfig {
    /// Load security configuration from environment variables.
    pub fn from_env() -> Self {
        let access_token = std::env::var("MAIRIS_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let cors_origins = std::env::var("MAIRIS_CORS_ORIGINS").ok().map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            access_token,
            cors_origins,
        }
    }

    /// No authentication and permissive CORS (local use and tests).
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Require `token` as a bearer token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            cors_origins: None,
        }
    }

    /// Build the CORS layer: permissive unless origins are configured.
    pub fn cors_layer(&self) -> CorsLayer {
        match &self.cors_origins {
            Some(origins) => {
                let origins: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|o| match o.parse() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            tracing::warn!("Ignoring invalid CORS origin: {}", o);
                            None
                        }
                    })
                    .collect();
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
            None => CorsLayer::permissive(),
        }
    }
}

/// Reject requests without the configured bearer token.
pub async fn auth_middleware(
    State(config): State<SecurityConfig>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = match &config.access_token {
        Some(token) => token,
        None => return Ok(next.run(request).await),
    };

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid access token provided");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_has_no_auth() {
        let config = SecurityConfig::disabled();
        assert!(config.access_token.is_none());
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn with_access_token_sets_token() {
        let config = SecurityConfig::with_access_token("lab-token");
        assert_eq!(config.access_token.as_deref(), Some("lab-token"));
    }
}
