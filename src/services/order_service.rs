use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;

use crate::{error::ApiError, models::{Order, Side}, AppState};

/// A fully validated order, ready to be stamped with an id and timestamp.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub symbol: String,
    pub side: Side,
    pub qty: f64,
    pub price: f64,
}

/// Field validation for a place-order request; the symbol is trimmed, its
/// case kept. Quantity must be finite and positive, price finite and >= 0.
pub fn validate_order(
    symbol: Option<&str>,
    side: Option<&str>,
    qty: Option<f64>,
    price: Option<f64>,
) -> Result<OrderDraft, ApiError> {
    let symbol = symbol.map(str::trim).unwrap_or("");
    if symbol.is_empty() {
        return Err(ApiError::Validation("Missing symbol.".to_string()));
    }

    let side = side
        .and_then(|s| s.parse::<Side>().ok())
        .ok_or_else(|| ApiError::Validation("Side must be \"buy\" or \"sell\".".to_string()))?;

    let qty = match qty {
        Some(q) if q.is_finite() && q > 0.0 => q,
        _ => return Err(ApiError::Validation("Enter a valid quantity.".to_string())),
    };

    let price = match price {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        _ => return Err(ApiError::Validation("Enter a valid price.".to_string())),
    };

    Ok(OrderDraft {
        symbol: symbol.to_string(),
        side,
        qty,
        price,
    })
}

/// Stamps a validated draft; the owner is always the authenticated caller.
pub fn stamp_order(user_id: ObjectId, draft: OrderDraft) -> Order {
    Order {
        id: ObjectId::new(),
        user_id,
        symbol: draft.symbol,
        side: draft.side,
        qty: draft.qty,
        price: draft.price,
        created_at: Utc::now().timestamp(),
    }
}

/// Existence is decided before ownership: a missing order is NotFound for
/// every requester, owner or not.
pub fn authorize_delete(order: Option<&Order>, requester_id: ObjectId) -> Result<(), ApiError> {
    let Some(order) = order else {
        return Err(ApiError::NotFound);
    };
    if order.user_id != requester_id {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

pub async fn place_order(
    state: &AppState,
    user_id: ObjectId,
    symbol: Option<&str>,
    side: Option<&str>,
    qty: Option<f64>,
    price: Option<f64>,
) -> Result<Order, ApiError> {
    let draft = validate_order(symbol, side, qty, price)?;
    let order = stamp_order(user_id, draft);

    let orders = state.db.collection::<Order>("orders");
    orders.insert_one(&order, None).await?;

    Ok(order)
}

// Newest first; a user with no history gets an empty vec, not an error.
pub async fn list_orders(state: &AppState, user_id: ObjectId) -> Result<Vec<Order>, ApiError> {
    let orders = state.db.collection::<Order>("orders");
    let find_opts = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

    let mut cursor = orders.find(doc! { "user_id": user_id }, find_opts).await?;

    let mut out: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res?);
    }
    Ok(out)
}

pub async fn delete_order(
    state: &AppState,
    order_id: ObjectId,
    requester_id: ObjectId,
) -> Result<(), ApiError> {
    let orders = state.db.collection::<Order>("orders");

    let found = orders.find_one(doc! { "_id": order_id }, None).await?;
    authorize_delete(found.as_ref(), requester_id)?;

    orders.delete_one(doc! { "_id": order_id }, None).await?;
    Ok(())
}
