use axum::{Router, routing::{delete, get, post}};

use crate::{AppState, controllers::portfolio_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/portfolio/order", post(portfolio_controller::post_order))
        .route("/portfolio", get(portfolio_controller::get_orders))
        .route("/portfolio/holdings", get(portfolio_controller::get_holdings))
        .route("/portfolio/:order_id", delete(portfolio_controller::delete_order))
}
