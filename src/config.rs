use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,

    pub snapshot_path: String,
    pub ai_predict_url: String,
    pub ai_analyze_base: String,

    pub cors_origin: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "stockdesk".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());

    let snapshot_path = env::var("SNAPSHOT_PATH")
        .unwrap_or_else(|_| "data/sample_live_stock_data.csv".to_string());

    let ai_predict_url = env::var("AI_PREDICT_URL")
        .unwrap_or_else(|_| "http://localhost:5001/predict".to_string());

    let ai_analyze_base = env::var("AI_ANALYZE_BASE")
        .unwrap_or_else(|_| "http://localhost:5002".to_string());

    let cors_origin = env::var("CORS_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        snapshot_path,
        ai_predict_url,
        ai_analyze_base,
        cors_origin,
    }
}
