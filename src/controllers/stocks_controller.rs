use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    services::{ai_client::PredictFeatures, market_data},
    AppState,
};

// GET /live-data

pub async fn get_live_data(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = market_data::read_snapshot(&state.settings.snapshot_path)?;
    Ok(Json(rows))
}

// GET /recommend

pub async fn get_recommend(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = market_data::read_snapshot(&state.settings.snapshot_path)?;

    let mut results: Vec<serde_json::Value> = Vec::new();
    for row in rows.into_iter().take(50) {
        let features = PredictFeatures {
            open: row.open,
            high: row.day_high,
            low: row.day_low,
            close: row.last_price,
            volume: row.ffmc,
        };

        let prediction = state.ai.predict(&features).await?;

        results.push(json!({
            "symbol": row.symbol,
            "lastPrice": row.last_price,
            "changePercent": row.p_change,
            "predictedNext": prediction.predicted_price,
            "recommendation": prediction.recommendation,
        }));
    }

    Ok(Json(results))
}

// GET /analyze/:symbol

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    pub period: Option<String>,
    pub interval: Option<String>,
}

pub async fn get_analyze(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = symbol.trim().to_string();

    // Indices arrive as "NIFTY 50" and the like; the analyzer only handles
    // single tickers.
    if symbol.contains(' ') {
        return Err(ApiError::Validation("Index not supported".to_string()));
    }

    let period = query.period.unwrap_or_else(|| "5d".to_string());
    let interval = query.interval.unwrap_or_else(|| "15m".to_string());

    let data = state.ai.analyze(&symbol, &period, &interval).await?;
    Ok(Json(data))
}

// POST /rank

#[derive(Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
}

pub async fn post_rank(
    State(state): State<AppState>,
    Json(body): Json<RankRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let symbols = body.symbols.unwrap_or_default();
    if symbols.is_empty() {
        return Err(ApiError::Validation("Missing fields".to_string()));
    }

    let period = body.period.unwrap_or_else(|| "5d".to_string());
    let interval = body.interval.unwrap_or_else(|| "15m".to_string());

    let data = state.ai.rank(&symbols, &period, &interval).await?;
    Ok(Json(data))
}
