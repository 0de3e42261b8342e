pub mod config_loader;
pub mod controller;
pub mod domain;
pub mod infrastructure;

pub use controller::*;
pub use domain::constants::*;
pub use domain::enums::*;
pub use domain::errors::*;
pub use domain::model::order::*;
pub use domain::model::snapshot::*;
pub use domain::validation::{validate_create, validate_update};
pub use infrastructure::exchange::tradeservices::*;
