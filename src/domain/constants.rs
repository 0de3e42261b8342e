// Remote endpoint layout. Every call is made relative to `{host}{ORDER_API_PATH}`.
pub const DEFAULT_HOST: &str = "https://api.uat.btgpactualsolutions.com";
pub const ORDER_API_PATH: &str = "/api/v1/order";
// Path segments below the order path
pub const CANCEL_ALL_SEGMENT: &str = "myorders";
pub const ORDER_BY_ID_SEGMENT: &str = "id";

// Status codes the remote API uses for a successful call.
pub const ACCEPTED_STATUS: &[u16] = &[200, 202];
pub const ACCEPTED_STATUS_CANCEL_ALL: &[u16] = &[200, 202, 204];
pub const STATUS_NO_CONTENT: u16 = 204;

/// Columns kept by `summary(false)`.
pub const KEY_COLUMNS: &[&str] = &[
    "clOrdId",
    "symbol",
    "side",
    "qty",
    "price",
    "stopPx",
    "ordStatus",
    "text",
];

/// Exchange tag prepended to server annotations; not a warning on its own.
pub const EXCHANGE_TEXT_MARKER: &str = "[B3]";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
