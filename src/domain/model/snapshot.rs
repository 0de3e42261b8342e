use log::warn;
use serde_json::{Map, Value};

use crate::domain::constants::KEY_COLUMNS;

/// One order as reported by the server. Read-only on the client side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderRow(Map<String, Value>);

impl OrderRow {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field value; `null` is reported as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Field rendered for display: strings unquoted, other values as JSON.
    pub fn display(&self, field: &str) -> Option<String> {
        self.get(field).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn cl_ord_id(&self) -> Option<String> {
        self.display("clOrdId")
    }

    pub fn ord_status(&self) -> Option<String> {
        self.display("ordStatus")
    }

    pub fn side(&self) -> Option<String> {
        self.display("side")
    }

    pub fn symbol(&self) -> Option<String> {
        self.display("symbol")
    }

    pub fn qty(&self) -> Option<String> {
        self.display("qty")
    }

    pub fn cum_qty(&self) -> Option<String> {
        self.display("cumQty")
    }

    pub fn avg_px(&self) -> Option<String> {
        self.display("avgPx")
    }

    pub fn price(&self) -> Option<String> {
        self.display("price")
    }

    pub fn stop_px(&self) -> Option<String> {
        self.display("stopPx")
    }

    pub fn text(&self) -> Option<String> {
        self.display("text")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn project(&self, columns: &[String]) -> OrderRow {
        let fields = columns
            .iter()
            .filter_map(|c| self.0.get(c).map(|v| (c.clone(), v.clone())))
            .collect();
        OrderRow(fields)
    }
}

/// Tabular view over a full order snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderTable {
    columns: Vec<String>,
    rows: Vec<OrderRow>,
}

impl OrderTable {
    /// Build a table from the `GET {base}` payload.
    ///
    /// Columns are the union of row keys in first-seen order. Anything other
    /// than an array of objects yields an empty table.
    pub fn from_json(data: &Value) -> Self {
        let Some(items) = data.as_array() else {
            warn!("Order list payload is not an array: {}", data);
            return Self::default();
        };

        let mut table = Self::default();
        for item in items {
            match item.as_object() {
                Some(obj) => table.push(OrderRow::new(obj.clone())),
                None => warn!("Skipping non-object order entry: {}", item),
            }
        }
        table
    }

    pub fn push(&mut self, row: OrderRow) {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    /// Keep only the key columns that this table actually has, in table order.
    pub fn key_columns(&self) -> OrderTable {
        let columns: Vec<String> = self
            .columns
            .iter()
            .filter(|c| KEY_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect();
        let rows = self.rows.iter().map(|r| r.project(&columns)).collect();
        OrderTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for OrderTable {
    type Item = OrderRow;
    type IntoIter = std::vec::IntoIter<OrderRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let table = OrderTable::from_json(&json!([
            {"clOrdId": "1", "symbol": "PETR4"},
            {"clOrdId": "2", "avgPx": 10.0, "symbol": "VALE3"},
        ]));
        assert_eq!(table.columns(), ["clOrdId", "symbol", "avgPx"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn key_columns_is_intersection_and_never_fails() {
        let table = OrderTable::from_json(&json!([
            {"account": "1", "symbol": "PETR4", "clOrdId": "A", "avgPx": 0},
        ]));
        let summary = table.key_columns();
        assert_eq!(summary.columns(), ["symbol", "clOrdId"]);
        assert_eq!(
            summary.rows()[0].as_map(),
            json!({"symbol": "PETR4", "clOrdId": "A"}).as_object().unwrap()
        );

        let empty = OrderTable::from_json(&json!([{"foo": 1}])).key_columns();
        assert!(empty.columns().is_empty());
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn non_array_payload_is_empty_table() {
        assert!(OrderTable::from_json(&json!({"error": "nope"})).is_empty());
    }

    #[test]
    fn display_renders_strings_unquoted() {
        let row = OrderRow::new(json!({"qty": 100, "symbol": "PETR4", "price": null}).as_object().unwrap().clone());
        assert_eq!(row.qty().as_deref(), Some("100"));
        assert_eq!(row.symbol().as_deref(), Some("PETR4"));
        assert_eq!(row.price(), None);
    }
}
