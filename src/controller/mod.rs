//! Order controller
//!
//! Account defaults, the create/modify/cancel/query façade, and the
//! background poller that keeps callers informed of every live order.

mod config;
mod order_controller;
mod poller;
mod update_callback;

pub use config::ControllerConfig;
pub use order_controller::OrderController;
pub use poller::{OrderPoller, PollerHandle};
pub use update_callback::{default_callback, format_order_update, generic_update_callback, OrderUpdateCallback};
