//! Startup token acquisition.
//!
//! The MCP binary exchanges its app registration for an access token once
//! via the client-credentials flow; the result is owned immutably by the
//! caller for the life of the process. A pre-acquired token short-circuits
//! the exchange.

use serde::Deserialize;
use tracing::info;

use crate::config::{Credential, GraphConfig};
use crate::error::{GraphError, GraphResult};

const LOGIN_AUTHORITY: &str = "https://login.microsoftonline.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Resolve the configured credential to a bearer token.
pub async fn acquire_token(config: &GraphConfig) -> GraphResult<String> {
    match &config.credential {
        Credential::StaticToken(token) => Ok(token.clone()),
        Credential::ClientSecret {
            tenant_id,
            client_id,
            client_secret,
        } => {
            let url = format!("{LOGIN_AUTHORITY}/{tenant_id}/oauth2/v2.0/token");
            let form = [
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", GRAPH_SCOPE),
                ("grant_type", "client_credentials"),
            ];

            let response = reqwest::Client::new().post(&url).form(&form).send().await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let message = match response.json::<TokenErrorResponse>().await {
                    Ok(body) if !body.error.is_empty() => {
                        format!("{}: {}", body.error, body.error_description)
                    }
                    _ => format!("token endpoint returned HTTP {status}"),
                };
                return Err(GraphError::Token { message });
            }

            let token: TokenResponse = response.json().await.map_err(|e| GraphError::Token {
                message: format!("malformed token response: {e}"),
            })?;

            info!(expires_in = token.expires_in, "Graph token acquired");
            Ok(token.access_token)
        }
    }
}
