//! Graph connection configuration.
//!
//! An explicit, immutable configuration object built once at startup and
//! passed to every component that needs it. There is no ambient
//! process-wide credential state.

use std::env;

use crate::error::{GraphError, GraphResult};

/// Default Graph REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// How the process authenticates against Microsoft Graph.
#[derive(Debug, Clone)]
pub enum Credential {
    /// A pre-acquired access token (e.g. a delegated token minted by the
    /// hosting application). Used as-is for every request.
    StaticToken(String),
    /// App registration for the client-credentials flow; exchanged for a
    /// token once at startup.
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

/// Immutable Graph connection settings.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub base_url: String,
    pub credential: Credential,
}

impl GraphConfig {
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential,
        }
    }

    /// Build configuration from environment variables.
    ///
    /// `GRAPH_ACCESS_TOKEN` wins if set; otherwise `GRAPH_TENANT_ID`,
    /// `GRAPH_CLIENT_ID`, and `GRAPH_CLIENT_SECRET` must all be present.
    /// `GRAPH_BASE_URL` overrides the endpoint (useful for sovereign clouds
    /// and for tests).
    pub fn from_env() -> GraphResult<Self> {
        let mut config = if let Ok(token) = env::var("GRAPH_ACCESS_TOKEN") {
            Self::new(Credential::StaticToken(token))
        } else {
            let require = |key: &str| {
                env::var(key).map_err(|_| GraphError::Config {
                    message: format!(
                        "{key} is not set (set GRAPH_ACCESS_TOKEN, or the full \
                         GRAPH_TENANT_ID/GRAPH_CLIENT_ID/GRAPH_CLIENT_SECRET triple)"
                    ),
                })
            };
            Self::new(Credential::ClientSecret {
                tenant_id: require("GRAPH_TENANT_ID")?,
                client_id: require("GRAPH_CLIENT_ID")?,
                client_secret: require("GRAPH_CLIENT_SECRET")?,
            })
        };

        if let Ok(base_url) = env::var("GRAPH_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }

    /// Override the REST endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token_wins() {
        let config = GraphConfig::new(Credential::StaticToken("tok".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(matches!(config.credential, Credential::StaticToken(ref t) if t == "tok"));
    }

    #[test]
    fn with_base_url_overrides_endpoint() {
        let config = GraphConfig::new(Credential::StaticToken("tok".into()))
            .with_base_url("http://localhost:9100/v1.0");
        assert_eq!(config.base_url, "http://localhost:9100/v1.0");
    }
}
