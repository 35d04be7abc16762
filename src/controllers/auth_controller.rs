use axum::{extract::State, response::IntoResponse, Json};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{error::ApiError, models::User, services::auth_service, AppState};

fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

fn user_view(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_hex(),
        "email": user.email,
        "name": user.name,
    })
}

// ---------------- SIGNUP ----------------

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn post_signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = body.email.as_deref().unwrap_or("").trim().to_string();
    let name = body.name.as_deref().unwrap_or("").trim().to_string();
    let password = body.password.unwrap_or_default();

    if email.is_empty() || name.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Missing fields".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email.".to_string()));
    }

    let user = auth_service::register_user(&state, &email, &name, &password).await?;
    let token = auth_service::make_jwt_with_days(&state, &user.id, 7)?;

    Ok(Json(json!({ "token": token, "user": user_view(&user) })))
}

// ---------------- LOGIN ----------------

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn post_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = body.email.as_deref().unwrap_or("").trim().to_string();
    let password = body.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Missing fields".to_string()));
    }

    let user = auth_service::login_user(&state, &email, &password).await?;
    let token = auth_service::make_jwt_with_days(&state, &user.id, 7)?;

    Ok(Json(json!({ "token": token, "user": user_view(&user) })))
}
