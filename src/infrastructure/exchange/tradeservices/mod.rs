pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::TradeApiRequester;
pub use error::ApiError;
pub use models::ApiResponse;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
