use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::{doc, oid::ObjectId};

use crate::{error::ApiError, models::User, AppState};

#[derive(serde::Serialize)]
struct Claims {
    sub: String,
    exp: usize,
}

pub fn make_jwt_with_days(
    state: &AppState,
    user_id: &ObjectId,
    days: i64,
) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::days(days)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_hex(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token error: {e}")))
}

pub async fn login_user(state: &AppState, email: &str, password: &str) -> Result<User, ApiError> {
    let users = state.db.collection::<User>("users");

    let user = users
        .find_one(doc! { "email": email }, None)
        .await?
        .ok_or_else(|| ApiError::Validation("User not found".to_string()))?;

    if !verify(password, &user.password_hash).unwrap_or(false) {
        return Err(ApiError::Validation("Wrong password".to_string()));
    }

    Ok(user)
}

pub async fn register_user(
    state: &AppState,
    email: &str,
    name: &str,
    password: &str,
) -> Result<User, ApiError> {
    let users = state.db.collection::<User>("users");

    // unique email
    if users.find_one(doc! { "email": email }, None).await?.is_some() {
        return Err(ApiError::Conflict("User exists".to_string()));
    }

    let password_hash =
        hash(password, DEFAULT_COST).map_err(|e| ApiError::Internal(format!("hash error: {e}")))?;

    let user = User {
        id: ObjectId::new(),
        email: email.to_string(),
        name: name.to_string(),
        password_hash,
    };

    users.insert_one(&user, None).await?;

    Ok(user)
}
