pub mod ai_client;
pub mod db_init;
pub mod market_data;

pub mod auth_service;
pub mod holdings;
pub mod order_service;
