use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    models::{CurrentUser, Order},
    services::{holdings, order_service},
    AppState,
};

fn fmt2(v: f64) -> String {
    format!("{:.2}", v)
}

fn order_view(order: &Order) -> serde_json::Value {
    json!({
        "id": order.id.to_hex(),
        "userId": order.user_id.to_hex(),
        "symbol": order.symbol,
        "side": order.side.to_string(),
        "qty": order.qty,
        "price": order.price,
        "createdAt": order.created_at,
    })
}

fn require_user(user: Option<Extension<CurrentUser>>) -> Result<CurrentUser, ApiError> {
    user.map(|Extension(u)| u)
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))
}

// POST /portfolio/order

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

pub async fn post_order(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let u = require_user(user)?;

    let order = order_service::place_order(
        &state,
        u.id,
        body.symbol.as_deref(),
        body.side.as_deref(),
        body.qty,
        body.price,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order_view(&order))))
}

// GET /portfolio

pub async fn get_orders(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<impl IntoResponse, ApiError> {
    let u = require_user(user)?;

    let orders = order_service::list_orders(&state, u.id).await?;
    let items: Vec<serde_json::Value> = orders.iter().map(order_view).collect();

    Ok(Json(items))
}

// GET /portfolio/holdings

pub async fn get_holdings(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<impl IntoResponse, ApiError> {
    let u = require_user(user)?;

    let orders = order_service::list_orders(&state, u.id).await?;
    let positions = holdings::aggregate_holdings(&orders);

    // avg_price keeps full precision until right here.
    let items: Vec<serde_json::Value> = positions
        .iter()
        .map(|h| {
            json!({
                "symbol": h.symbol,
                "netQty": h.net_qty,
                "avgPrice": fmt2(h.avg_price),
            })
        })
        .collect();

    Ok(Json(items))
}

// DELETE /portfolio/:order_id

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Result<impl IntoResponse, ApiError> {
    let u = require_user(user)?;

    // A malformed id cannot name any existing order.
    let oid = ObjectId::parse_str(&order_id).map_err(|_| ApiError::NotFound)?;

    order_service::delete_order(&state, oid, u.id).await?;

    Ok(Json(json!({ "message": "Deleted" })))
}
