pub mod auth_controller;
pub mod home_controller;
pub mod portfolio_controller;
pub mod stocks_controller;
