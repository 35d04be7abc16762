use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

/// Client for the two AI sidecars: the price-prediction model and the
/// indicator/ranking analyzer. Analyzer responses are passed through as-is.
#[derive(Clone)]
pub struct AiClient {
    http: Client,
    predict_url: String,
    analyze_base: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictFeatures {
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub predicted_price: f64,
    // "Buy" | "Sell" | "Hold"
    pub recommendation: String,
}

impl AiClient {
    pub fn new(predict_url: String, analyze_base: String) -> Self {
        Self {
            http: Client::new(),
            predict_url,
            analyze_base,
        }
    }

    pub async fn predict(&self, features: &PredictFeatures) -> Result<Prediction, ApiError> {
        let res = self
            .http
            .post(&self.predict_url)
            .json(&json!({ "data": features }))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI predict failed: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "AI predict failed: {status} {body}"
            )));
        }

        res.json::<Prediction>()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI predict failed: {e}")))
    }

    pub async fn analyze(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/analyze", self.analyze_base);
        let res = self
            .http
            .get(&url)
            .query(&[("symbol", symbol), ("period", period), ("interval", interval)])
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI analyze failed: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "AI analyze failed: {status} {body}"
            )));
        }

        res.json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI analyze failed: {e}")))
    }

    pub async fn rank(
        &self,
        symbols: &[String],
        period: &str,
        interval: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/rank", self.analyze_base);
        let res = self
            .http
            .post(&url)
            .json(&json!({
                "symbols": symbols,
                "period": period,
                "interval": interval,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI rank failed: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "AI rank failed: {status} {body}"
            )));
        }

        res.json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Upstream(format!("AI rank failed: {e}")))
    }
}
