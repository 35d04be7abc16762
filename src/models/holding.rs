use serde::Serialize;

/// Net position for one symbol. Never persisted; recomputed from the order
/// history on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holding {
    pub symbol: String,
    pub net_qty: f64,
    pub avg_price: f64,
}
