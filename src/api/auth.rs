//! Bearer-token middleware.
//!
//! Every endpoint requires an `Authorization: Bearer <token>` header; the
//! token is the Graph access token the handlers forward upstream. The
//! middleware only checks presence and shape — validity is Graph's call.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::ErrorResponse;

/// The caller-supplied Graph access token, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reject requests without a bearer token; stash the token for handlers.
pub async fn require_bearer(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => {
            let token = AccessToken(token.to_string());
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized - No access token provided".to_string(),
                details: None,
            }),
        )
            .into_response(),
    }
}
