use log::info;
use std::sync::Arc;

use crate::domain::constants::EXCHANGE_TEXT_MARKER;
use crate::domain::model::snapshot::OrderRow;

/// Receives every order row of every poll cycle, in snapshot order.
pub type OrderUpdateCallback = Arc<dyn Fn(&OrderRow) + Send + Sync>;

fn or_none(value: Option<String>) -> String {
    value.unwrap_or_else(|| "None".to_string())
}

/// Human readable status line for one order row.
pub fn format_order_update(order: &OrderRow) -> String {
    let mut line = format!(
        "OrderId: {} - [{}] {} {}/{} {} @ {}",
        or_none(order.cl_ord_id()),
        or_none(order.ord_status()),
        or_none(order.side()),
        or_none(order.cum_qty()),
        or_none(order.qty()),
        or_none(order.symbol()),
        or_none(order.avg_px()),
    );

    if let Some(price) = order.price() {
        line.push_str(&format!(" with Px: {}", price));
    }
    if let Some(stop_px) = order.stop_px() {
        line.push_str(&format!(" and stopPx: {}", stop_px));
    }
    if let Some(text) = order.text() {
        if !text.replace(EXCHANGE_TEXT_MARKER, "").trim().is_empty() {
            line.push_str(&format!("\nWARNING: {}", text));
        }
    }

    line
}

/// Callback used when the caller does not supply one.
pub fn generic_update_callback(order: &OrderRow) {
    info!("Order update: {}", format_order_update(order));
}

pub fn default_callback() -> OrderUpdateCallback {
    Arc::new(generic_update_callback)
}
