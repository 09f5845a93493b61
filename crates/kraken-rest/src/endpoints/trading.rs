//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use super::{join_required, Params};
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::OrderRequest;
use kraken_auth::Credentials;
use kraken_types::{AddOrderResponse, CancelOrderResponse};
use tracing::{debug, instrument};

/// Trading endpoints for order management
#[derive(Debug, Clone, Copy)]
pub struct TradingEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(transport: &'a Transport, credentials: &'a Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> RestResult<T> {
        self.transport
            .private(self.credentials, method, &params.as_pairs())
            .await
    }

    /// Add a new order
    ///
    /// The request is validated locally first; an incomplete order fails
    /// with [`RestError::InvalidParameter`](crate::RestError::InvalidParameter)
    /// without contacting the exchange. With
    /// [`OrderRequest::validate_only`] Kraken checks the order but does not
    /// place it, and `txid` comes back empty.
    #[instrument(skip(self, order), fields(pair = %order.pair, side = %order.side, order_type = %order.order_type))]
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<AddOrderResponse> {
        let params = order.to_params()?;

        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.volume, order.pair
        );

        self.post("AddOrder", params).await
    }

    /// Cancel an order by transaction id or user reference
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResponse> {
        let params = Params::new().push("txid", join_required("txid", &[txid])?);
        debug!("Cancelling order {}", txid);
        self.post("CancelOrder", params).await
    }

    /// Cancel all open orders
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> RestResult<CancelOrderResponse> {
        debug!("Cancelling all open orders");
        self.post("CancelAll", Params::new()).await
    }
}
