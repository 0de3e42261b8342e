// Domain model for outgoing order requests
use serde_json::{Map, Value};

use crate::domain::errors::ValidationError;

/// Parameters of a new order, exactly as they will be sent.
///
/// All fields are kept as strings: the API takes quantities and prices as
/// strings, and validation only checks that they would parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderRequest {
    pub symbol: Option<String>,
    pub side: Option<String>,
    pub qty: Option<String>,
    pub account: Option<String>,
    pub exec_broker: Option<String>,
    pub ord_type: Option<String>,
    pub time_in_force: Option<String>,
    pub is_dma: Option<String>,
    pub entity: Option<String>,
    pub price: Option<String>,
    pub stop_px: Option<String>,
    /// Wire names of fields that were present but not strings.
    pub(crate) non_string: Vec<&'static str>,
}

impl OrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        qty: impl Into<String>,
        time_in_force: impl Into<String>,
        is_dma: impl Into<String>,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            side: Some(side.into()),
            qty: Some(qty.into()),
            time_in_force: Some(time_in_force.into()),
            is_dma: Some(is_dma.into()),
            ..Self::default()
        }
    }

    pub fn ord_type(mut self, ord_type: impl Into<String>) -> Self {
        self.ord_type = Some(ord_type.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn stop_px(mut self, stop_px: impl Into<String>) -> Self {
        self.stop_px = Some(stop_px.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn exec_broker(mut self, exec_broker: impl Into<String>) -> Self {
        self.exec_broker = Some(exec_broker.into());
        self
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Build a request from a loosely typed JSON object.
    ///
    /// Keys use the API's camelCase names and `null` counts as absent. A value
    /// that is present but not a JSON string is remembered and reported as a
    /// type error by `validate_create`, at the point its field is checked.
    pub fn from_json(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = JsonFields::new(data)?;
        Ok(Self {
            symbol: fields.string("symbol"),
            side: fields.string("side"),
            qty: fields.string("qty"),
            account: fields.string("account"),
            exec_broker: fields.string("execBroker"),
            ord_type: fields.string("ordType"),
            time_in_force: fields.string("timeInForce"),
            is_dma: fields.string("isDMA"),
            entity: fields.string("entity"),
            price: fields.string("price"),
            stop_px: fields.string("stopPx"),
            non_string: fields.non_string,
        })
    }

    /// Wire names of fields given as something other than a string.
    pub fn non_string_fields(&self) -> &[&'static str] {
        &self.non_string
    }

    /// JSON body for `POST {base}`. Empty price/stopPx are left out.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("symbol".into(), opt_value(&self.symbol));
        body.insert("side".into(), opt_value(&self.side));
        body.insert("qty".into(), opt_value(&self.qty));
        body.insert("account".into(), opt_value(&self.account));
        body.insert("execBroker".into(), opt_value(&self.exec_broker));
        body.insert("ordType".into(), opt_value(&self.ord_type));
        body.insert("timeInForce".into(), opt_value(&self.time_in_force));
        body.insert("isDMA".into(), opt_value(&self.is_dma));
        body.insert("entity".into(), opt_value(&self.entity));
        if let Some(price) = non_empty(&self.price) {
            body.insert("price".into(), Value::from(price));
        }
        if let Some(stop_px) = non_empty(&self.stop_px) {
            body.insert("stopPx".into(), Value::from(stop_px));
        }
        Value::Object(body)
    }
}

/// Amendment of a live order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderUpdate {
    pub id: String,
    pub ord_type: Option<String>,
    pub qty: Option<String>,
    pub price: Option<String>,
    pub stop_px: Option<String>,
    pub time_in_force: Option<String>,
    pub(crate) non_string: Vec<&'static str>,
}

impl OrderUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn ord_type(mut self, ord_type: impl Into<String>) -> Self {
        self.ord_type = Some(ord_type.into());
        self
    }

    pub fn qty(mut self, qty: impl Into<String>) -> Self {
        self.qty = Some(qty.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn stop_px(mut self, stop_px: impl Into<String>) -> Self {
        self.stop_px = Some(stop_px.into());
        self
    }

    pub fn time_in_force(mut self, time_in_force: impl Into<String>) -> Self {
        self.time_in_force = Some(time_in_force.into());
        self
    }

    /// Build an update from a loosely typed JSON object.
    ///
    /// `id` must be a string. Other non-string values are left for
    /// `validate_update` to report, as with `OrderRequest::from_json`.
    pub fn from_json(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = JsonFields::new(data)?;
        let id = match data.get("id") {
            Some(Value::String(id)) => id.clone(),
            None | Some(Value::Null) => return Err(ValidationError::MissingField { field: "id" }),
            Some(_) => return Err(ValidationError::Type { field: "id" }),
        };
        Ok(Self {
            id,
            ord_type: fields.string("ordType"),
            qty: fields.string("qty"),
            price: fields.string("price"),
            stop_px: fields.string("stopPx"),
            time_in_force: fields.string("timeInForce"),
            non_string: fields.non_string,
        })
    }

    pub fn non_string_fields(&self) -> &[&'static str] {
        &self.non_string
    }

    /// JSON body for `PUT {base}`. Empty optional fields are left out.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("id".into(), Value::from(self.id.as_str()));
        body.insert("ordType".into(), opt_value(&self.ord_type));
        if let Some(qty) = non_empty(&self.qty) {
            body.insert("qty".into(), Value::from(qty));
        }
        if let Some(price) = non_empty(&self.price) {
            body.insert("price".into(), Value::from(price));
        }
        if let Some(stop_px) = non_empty(&self.stop_px) {
            body.insert("stopPx".into(), Value::from(stop_px));
        }
        if let Some(tif) = non_empty(&self.time_in_force) {
            body.insert("timeInForce".into(), Value::from(tif));
        }
        Value::Object(body)
    }
}

/// Account defaults a controller applies to every new order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountContext {
    pub account: Option<String>,
    pub exec_broker: Option<String>,
    pub entity: Option<String>,
}

impl AccountContext {
    /// Fill fields the request leaves empty. Values already on the request win.
    pub fn apply(&self, mut request: OrderRequest) -> OrderRequest {
        if request.account.is_none() {
            request.account = self.account.clone();
        }
        if request.exec_broker.is_none() {
            request.exec_broker = self.exec_broker.clone();
        }
        if request.entity.is_none() {
            request.entity = self.entity.clone();
        }
        request
    }
}

/// Order id as understood by the API: anything after the first `:` is
/// client-side metadata and is dropped.
pub fn transport_id(id: &str) -> &str {
    id.split(':').next().unwrap_or(id)
}

/// Value that counts as "provided" for optional numeric fields.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn opt_value(value: &Option<String>) -> Value {
    value.as_deref().map(Value::from).unwrap_or(Value::Null)
}

/// String reader over a JSON object that remembers non-string values.
struct JsonFields<'a> {
    obj: &'a Map<String, Value>,
    non_string: Vec<&'static str>,
}

impl<'a> JsonFields<'a> {
    fn new(data: &'a Value) -> Result<Self, ValidationError> {
        let obj = data.as_object().ok_or(ValidationError::NotAnObject)?;
        Ok(Self {
            obj,
            non_string: Vec::new(),
        })
    }

    fn string(&mut self, field: &'static str) -> Option<String> {
        match self.obj.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.non_string.push(field);
                None
            }
        }
    }
}
