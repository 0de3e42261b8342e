//! Parameter checks that gate every mutating request.
//!
//! Checks run in a fixed order so that the first error reported for a
//! request with several bad fields is deterministic:
//! required strings, integer fields, conditional price/stopPx, vocabularies.
//! A value read from JSON as a non-string is a type error raised at its own
//! step, so it never jumps ahead of an earlier field's error.

use std::str::FromStr;

use crate::domain::enums::{DmaFlag, OrderSide, OrderType, TimeInForce, UnknownCode, WireCode};
use crate::domain::errors::{ParseFailure, ValidationError};
use crate::domain::model::order::{non_empty, OrderRequest, OrderUpdate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Numeric {
    Integer,
    Float,
}

fn numeric_kind(field: &str) -> Option<Numeric> {
    match field {
        "qty" | "account" | "execBroker" => Some(Numeric::Integer),
        "price" | "stopPx" => Some(Numeric::Float),
        _ => None,
    }
}

/// Fields read from JSON as something other than a string.
struct NonString<'a>(&'a [&'static str]);

impl NonString<'_> {
    fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.0.contains(&field) {
            return Err(ValidationError::Type { field });
        }
        Ok(())
    }

    fn require<'v>(&self, field: &'static str, value: &'v Option<String>) -> Result<&'v str, ValidationError> {
        self.check(field)?;
        value
            .as_deref()
            .ok_or(ValidationError::MissingField { field })
    }

    /// Optional field: `None` when absent or empty.
    fn optional<'v>(&self, field: &'static str, value: &'v Option<String>) -> Result<Option<&'v str>, ValidationError> {
        self.check(field)?;
        Ok(non_empty(value))
    }
}

/// Optional sign followed by ASCII digits, of any length.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check that a numeric field would parse, without converting it.
fn coerce(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let result = match numeric_kind(field) {
        Some(Numeric::Integer) if is_integer(trimmed) => Ok(()),
        Some(Numeric::Integer) => Err(ParseFailure::Integer),
        Some(Numeric::Float) => trimmed.parse::<f64>().map(drop).map_err(ParseFailure::Float),
        None => Ok(()),
    };
    result.map_err(|source| ValidationError::Unparseable { field, source })
}

fn member<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownCode>,
{
    value
        .parse::<T>()
        .map_err(|UnknownCode { code, allowed }| ValidationError::NotAllowed {
            field,
            value: code,
            allowed,
        })
}

/// Validate a new order. Nothing is converted; values are sent as given.
pub fn validate_create(request: &OrderRequest) -> Result<(), ValidationError> {
    let fields = NonString(&request.non_string);

    let symbol = fields.require("symbol", &request.symbol);
    let side = fields.require("side", &request.side);
    let qty = fields.require("qty", &request.qty);
    let account = fields.require("account", &request.account);
    let exec_broker = fields.require("execBroker", &request.exec_broker);
    let ord_type = fields.require("ordType", &request.ord_type);
    let time_in_force = fields.require("timeInForce", &request.time_in_force);
    let is_dma = fields.require("isDMA", &request.is_dma);
    let entity = fields.require("entity", &request.entity);

    // Report the first missing field in declaration order
    let (_, side, qty, account, exec_broker, ord_type, time_in_force, is_dma, _) = (
        symbol?,
        side?,
        qty?,
        account?,
        exec_broker?,
        ord_type?,
        time_in_force?,
        is_dma?,
        entity?,
    );

    coerce("qty", qty)?;
    coerce("account", account)?;
    coerce("execBroker", exec_broker)?;

    // Vocabulary is checked later; compare the raw code here
    if let Some(kind) = OrderType::from_code(ord_type) {
        if kind.requires_price() {
            coerce("price", fields.require("price", &request.price)?)?;
        }
        if kind.requires_stop_price() {
            coerce("stopPx", fields.require("stopPx", &request.stop_px)?)?;
        }
    }

    member::<OrderSide>("side", side)?;
    member::<OrderType>("ordType", ord_type)?;
    member::<DmaFlag>("isDMA", is_dma)?;
    member::<TimeInForce>("timeInForce", time_in_force)?;

    Ok(())
}

/// Validate an amendment.
///
/// At least one of qty/price/stopPx must be given, and ordType is always
/// required. Optional fields given as empty strings are skipped.
pub fn validate_update(update: &OrderUpdate) -> Result<(), ValidationError> {
    let fields = NonString(&update.non_string);
    let given = |field: &'static str, value: &Option<String>| value.is_some() || fields.check(field).is_err();

    if !given("qty", &update.qty) && !given("price", &update.price) && !given("stopPx", &update.stop_px) {
        return Err(ValidationError::MissingAmendment);
    }

    member::<OrderType>("ordType", fields.require("ordType", &update.ord_type)?)?;

    if let Some(qty) = fields.optional("qty", &update.qty)? {
        coerce("qty", qty)?;
    }
    if let Some(price) = fields.optional("price", &update.price)? {
        coerce("price", price)?;
    }
    if let Some(stop_px) = fields.optional("stopPx", &update.stop_px)? {
        coerce("stopPx", stop_px)?;
    }
    if let Some(tif) = fields.optional("timeInForce", &update.time_in_force)? {
        member::<TimeInForce>("timeInForce", tif)?;
    }

    Ok(())
}
