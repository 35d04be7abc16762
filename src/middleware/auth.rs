use axum::{
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, models::CurrentUser, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // user id as hex string
    pub sub: String,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn is_protected_path(path: &str) -> bool {
    path == "/portfolio" || path.starts_with("/portfolio/")
}

/// Verifies the bearer token on portfolio routes and injects [`CurrentUser`]
/// into request extensions. The owner id used by the order store comes from
/// here and nowhere else; request payloads are never consulted for it.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !is_protected_path(req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(req.headers()) else {
        return ApiError::Unauthorized("No token provided".to_string()).into_response();
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
        &validation,
    );

    let user_id = decoded
        .ok()
        .and_then(|data| ObjectId::parse_str(&data.claims.sub).ok());

    let Some(user_id) = user_id else {
        return ApiError::Unauthorized("Invalid token".to_string()).into_response();
    };

    req.extensions_mut().insert(CurrentUser { id: user_id });
    next.run(req).await
}
