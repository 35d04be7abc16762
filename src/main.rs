use std::net::SocketAddr;

use mongodb::Client;

use stockdesk::services::ai_client::AiClient;
use stockdesk::{AppState, config, routes, services};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    // Index setup needs a reachable server; the API itself can come up
    // without one and fail per-request instead.
    if let Err(e) = services::db_init::ensure_indexes(&db).await {
        tracing::warn!("index setup skipped: {e}");
    }

    let ai = AiClient::new(
        settings.ai_predict_url.clone(),
        settings.ai_analyze_base.clone(),
    );

    let state = AppState {
        db,
        settings: settings.clone(),
        ai,
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
