pub mod order;
pub mod snapshot;
