use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;
use tokio::runtime::Handle;

use crate::domain::model::order::{transport_id, AccountContext, OrderRequest, OrderUpdate};
use crate::domain::model::snapshot::OrderTable;
use crate::infrastructure::exchange::tradeservices::{
    ApiError, ApiResponse, HttpTransport, ReqwestTransport, TradeApiRequester,
};

use super::config::ControllerConfig;
use super::poller::{OrderPoller, PollerHandle};
use super::update_callback::{default_callback, OrderUpdateCallback};

/// Entry point for sending orders and following their state.
///
/// Holds the account defaults applied to new orders and, unless disabled,
/// a background poller that reports every order to the update callback.
/// The poller stops when the controller is shut down or dropped.
pub struct OrderController {
    api: Arc<TradeApiRequester>,
    context: AccountContext,
    poller: Option<PollerHandle>,
}

impl OrderController {
    /// Build a controller talking HTTP through `reqwest`.
    ///
    /// Must be called from within a tokio runtime when polling is enabled.
    pub fn new(
        token: &str,
        config: ControllerConfig,
        callback: Option<OrderUpdateCallback>,
    ) -> Result<Self, ApiError> {
        Self::with_transport(token, config, callback, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        token: &str,
        config: ControllerConfig,
        callback: Option<OrderUpdateCallback>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        let api = Arc::new(TradeApiRequester::new(token, config.host.as_deref(), transport)?);

        let poller = if config.polling_enabled {
            if Handle::try_current().is_err() {
                return Err(ApiError::InvalidConfig(
                    "order polling requires a running tokio runtime".to_string(),
                ));
            }
            let callback = callback.unwrap_or_else(default_callback);
            Some(OrderPoller::new(api.clone(), callback, config.poll_interval).spawn())
        } else {
            debug!("Order polling disabled");
            None
        };

        info!("Order controller ready for {}", api.base_url());

        Ok(Self {
            api,
            context: config.context,
            poller,
        })
    }

    pub fn context(&self) -> &AccountContext {
        &self.context
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollerHandle::is_running)
    }

    /// Create a new order. Account, execution broker and entity fall back
    /// to the controller defaults when the request leaves them unset.
    pub async fn create_order(&self, request: OrderRequest) -> Result<Value, ApiError> {
        let request = self.context.apply(request);
        self.api.create_order(&request).await
    }

    /// Amend an order. Any `:suffix` on the id is dropped before sending.
    pub async fn change_order(&self, mut update: OrderUpdate) -> Result<Value, ApiError> {
        update.id = transport_id(&update.id).to_string();
        self.api.update_order(&update).await
    }

    pub async fn cancel_order(&self, id: &str) -> Result<Value, ApiError> {
        self.api.cancel_order(transport_id(id)).await
    }

    pub async fn cancel_all_orders(&self) -> Result<ApiResponse, ApiError> {
        self.api.cancel_all_orders().await
    }

    pub async fn get_order(&self, id: &str) -> Result<Value, ApiError> {
        self.api.get_order(transport_id(id)).await
    }

    pub async fn get_orders(&self) -> Result<Value, ApiError> {
        self.api.get_orders().await
    }

    /// All orders as a table; `detailed = false` keeps only the key columns present.
    pub async fn summary(&self, detailed: bool) -> Result<OrderTable, ApiError> {
        let table = OrderTable::from_json(&self.get_orders().await?);
        if detailed {
            Ok(table)
        } else {
            Ok(table.key_columns())
        }
    }

    /// Stop the background poller, if any, and wait for it to exit.
    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.shutdown().await;
        }
    }
}
