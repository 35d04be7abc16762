use std::collections::HashMap;

use crate::models::{Holding, Order};

/// Folds a user's full order history into per-symbol net positions.
///
/// Pure and total: no I/O, no error path, input untouched. Accumulation
/// stays at full f64 precision; a flat position (net qty of zero) reports an
/// average price of 0. The result is sorted by symbol, so any permutation of
/// the same orders produces an identical vector.
pub fn aggregate_holdings(orders: &[Order]) -> Vec<Holding> {
    struct Acc {
        net_qty: f64,
        cost_sum: f64,
    }

    let mut per_symbol: HashMap<&str, Acc> = HashMap::new();

    for order in orders {
        let signed_qty = order.side.sign() * order.qty;
        let acc = per_symbol.entry(order.symbol.as_str()).or_insert(Acc {
            net_qty: 0.0,
            cost_sum: 0.0,
        });
        acc.net_qty += signed_qty;
        acc.cost_sum += signed_qty * order.price;
    }

    let mut holdings: Vec<Holding> = per_symbol
        .into_iter()
        .map(|(symbol, acc)| Holding {
            symbol: symbol.to_string(),
            net_qty: acc.net_qty,
            avg_price: if acc.net_qty == 0.0 {
                0.0
            } else {
                (acc.cost_sum / acc.net_qty).abs()
            },
        })
        .collect();

    holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    holdings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use mongodb::bson::oid::ObjectId;

    fn order(symbol: &str, side: Side, qty: f64, price: f64) -> Order {
        Order {
            id: ObjectId::new(),
            user_id: ObjectId::new(),
            symbol: symbol.to_string(),
            side,
            qty,
            price,
            created_at: 0,
        }
    }

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_orders_no_holdings() {
        assert!(aggregate_holdings(&[]).is_empty());
    }

    #[test]
    fn single_buy_is_the_position() {
        let holdings = aggregate_holdings(&[order("INFY", Side::Buy, 10.0, 100.0)]);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, "INFY");
        assert!(close_to(holdings[0].net_qty, 10.0));
        assert!(close_to(holdings[0].avg_price, 100.0));
    }

    #[test]
    fn two_buys_average_cost_basis() {
        // cost = 10*100 + 5*110 = 1550; 1550 / 15 = 103.333...
        let holdings = aggregate_holdings(&[
            order("INFY", Side::Buy, 10.0, 100.0),
            order("INFY", Side::Buy, 5.0, 110.0),
        ]);
        assert_eq!(holdings.len(), 1);
        assert!(close_to(holdings[0].net_qty, 15.0));
        assert!(close_to(holdings[0].avg_price, 1550.0 / 15.0));
        // Rounding is a presentation concern; the aggregate itself must not
        // be pre-rounded to 103.33.
        assert!(holdings[0].avg_price != 103.33);
        assert_eq!(format!("{:.2}", holdings[0].avg_price), "103.33");
    }

    #[test]
    fn round_trip_nets_to_zero_with_zero_avg() {
        let holdings = aggregate_holdings(&[
            order("INFY", Side::Buy, 10.0, 100.0),
            order("INFY", Side::Sell, 10.0, 120.0),
        ]);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].net_qty, 0.0);
        assert_eq!(holdings[0].avg_price, 0.0);
    }

    #[test]
    fn naked_sell_reports_short_position() {
        let holdings = aggregate_holdings(&[order("TCS", Side::Sell, 5.0, 50.0)]);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, "TCS");
        assert!(close_to(holdings[0].net_qty, -5.0));
        assert!(close_to(holdings[0].avg_price, 50.0));
    }

    #[test]
    fn partial_sell_keeps_signed_cost_arithmetic() {
        // cost = 10*100 - 4*120 = 520; 520 / 6 = 86.666...
        let holdings = aggregate_holdings(&[
            order("WIPRO", Side::Buy, 10.0, 100.0),
            order("WIPRO", Side::Sell, 4.0, 120.0),
        ]);
        assert!(close_to(holdings[0].net_qty, 6.0));
        assert!(close_to(holdings[0].avg_price, 520.0 / 6.0));
    }

    #[test]
    fn short_position_average_is_absolute() {
        // cost = -10*100 + 4*80 = -680; abs(-680 / -6) = 113.333...
        let holdings = aggregate_holdings(&[
            order("HDFC", Side::Sell, 10.0, 100.0),
            order("HDFC", Side::Buy, 4.0, 80.0),
        ]);
        assert!(close_to(holdings[0].net_qty, -6.0));
        assert!(close_to(holdings[0].avg_price, 680.0 / 6.0));
        assert!(holdings[0].avg_price > 0.0);
    }

    #[test]
    fn symbols_are_case_sensitive() {
        let holdings = aggregate_holdings(&[
            order("Infy", Side::Buy, 1.0, 10.0),
            order("INFY", Side::Buy, 2.0, 20.0),
        ]);
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].symbol, "INFY");
        assert_eq!(holdings[1].symbol, "Infy");
    }

    #[test]
    fn flat_symbols_still_reported_next_to_open_ones() {
        let holdings = aggregate_holdings(&[
            order("TCS", Side::Buy, 3.0, 50.0),
            order("INFY", Side::Buy, 10.0, 100.0),
            order("INFY", Side::Sell, 10.0, 110.0),
        ]);
        assert_eq!(holdings.len(), 2);
        // Sorted by symbol.
        assert_eq!(holdings[0].symbol, "INFY");
        assert_eq!(holdings[0].net_qty, 0.0);
        assert_eq!(holdings[0].avg_price, 0.0);
        assert_eq!(holdings[1].symbol, "TCS");
        assert!(close_to(holdings[1].net_qty, 3.0));
    }

    #[test]
    fn aggregation_is_permutation_invariant() {
        // Integer-valued terms keep every partial sum exact, so the results
        // can be compared for full equality across orderings.
        let orders = vec![
            order("INFY", Side::Buy, 10.0, 100.0),
            order("TCS", Side::Sell, 5.0, 50.0),
            order("INFY", Side::Buy, 5.0, 110.0),
            order("WIPRO", Side::Buy, 8.0, 40.0),
            order("INFY", Side::Sell, 3.0, 120.0),
            order("TCS", Side::Buy, 2.0, 55.0),
        ];
        let baseline = aggregate_holdings(&orders);

        let mut reversed = orders.clone();
        reversed.reverse();
        assert_eq!(aggregate_holdings(&reversed), baseline);

        let mut rotated = orders.clone();
        rotated.rotate_left(2);
        assert_eq!(aggregate_holdings(&rotated), baseline);

        let mut interleaved = orders.clone();
        interleaved.swap(0, 3);
        interleaved.swap(1, 4);
        assert_eq!(aggregate_holdings(&interleaved), baseline);
    }

    #[test]
    fn repeated_calls_are_identical_and_input_is_untouched() {
        let orders = vec![
            order("INFY", Side::Buy, 10.0, 100.0),
            order("TCS", Side::Sell, 5.0, 50.0),
        ];
        let snapshot: Vec<(String, f64, f64)> = orders
            .iter()
            .map(|o| (o.symbol.clone(), o.qty, o.price))
            .collect();

        let first = aggregate_holdings(&orders);
        let second = aggregate_holdings(&orders);
        assert_eq!(first, second);

        let after: Vec<(String, f64, f64)> = orders
            .iter()
            .map(|o| (o.symbol.clone(), o.qty, o.price))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn zero_price_orders_count_toward_quantity_not_cost() {
        let holdings = aggregate_holdings(&[
            order("BONUS", Side::Buy, 5.0, 0.0),
            order("BONUS", Side::Buy, 5.0, 10.0),
        ]);
        assert!(close_to(holdings[0].net_qty, 10.0));
        assert!(close_to(holdings[0].avg_price, 5.0));
    }

    #[test]
    fn fractional_quantities_accumulate_at_full_precision() {
        let holdings = aggregate_holdings(&[
            order("GOLD", Side::Buy, 0.25, 1000.0),
            order("GOLD", Side::Buy, 0.75, 2000.0),
        ]);
        assert!(close_to(holdings[0].net_qty, 1.0));
        assert!(close_to(holdings[0].avg_price, 1750.0));
    }
}
