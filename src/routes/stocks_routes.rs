use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/live-data", get(stocks_controller::get_live_data))
        .route("/recommend", get(stocks_controller::get_recommend))
        .route("/analyze/:symbol", get(stocks_controller::get_analyze))
        .route("/rank", post(stocks_controller::post_rank))
}
