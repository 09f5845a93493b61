//! Funding endpoints (deposits and withdrawals)
//!
//! These endpoints require authentication.

use super::{join_required, Params};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use kraken_auth::Credentials;
use kraken_types::{DepositAddress, DepositMethod, WithdrawInfo, WithdrawResult};
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Funding endpoints
#[derive(Debug, Clone, Copy)]
pub struct FundingEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
}

impl<'a> FundingEndpoints<'a> {
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

    /// Get deposit methods for an asset
    #[instrument(skip(self))]
    pub async fn get_deposit_methods(&self, asset: &str) -> RestResult<Vec<DepositMethod>> {
        let params = Params::new().push("asset", join_required("asset", &[asset])?);
        self.post("DepositMethods", params).await
    }

    /// Get deposit addresses for an asset and method
    ///
    /// # Arguments
    /// * `asset` - Asset being deposited
    /// * `method` - Method name from [`get_deposit_methods`](Self::get_deposit_methods)
    /// * `new` - Generate a new address
    #[instrument(skip(self))]
    pub async fn get_deposit_addresses(
        &self,
        asset: &str,
        method: &str,
        new: bool,
    ) -> RestResult<Vec<DepositAddress>> {
        let params = Params::new()
            .push("asset", join_required("asset", &[asset])?)
            .push("method", join_required("method", &[method])?)
            .flag("new", new);
        self.post("DepositAddresses", params).await
    }

    /// Get fee and limit for a prospective withdrawal
    ///
    /// # Arguments
    /// * `asset` - Asset being withdrawn
    /// * `key` - Withdrawal key name, as set up on the account
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self))]
    pub async fn get_withdraw_info(
        &self,
        asset: &str,
        key: &str,
        amount: Decimal,
    ) -> RestResult<WithdrawInfo> {
        let params = withdraw_params(asset, key, amount)?;
        self.post("WithdrawInfo", params).await
    }

    /// Withdraw funds to a pre-configured withdrawal key
    #[instrument(skip(self))]
    pub async fn withdraw(
        &self,
        asset: &str,
        key: &str,
        amount: Decimal,
    ) -> RestResult<WithdrawResult> {
        let params = withdraw_params(asset, key, amount)?;
        info!("Requesting withdrawal of {} {} to {}", amount, asset, key);
        self.post("Withdraw", params).await
    }
}

fn withdraw_params(asset: &str, key: &str, amount: Decimal) -> RestResult<Params> {
    if amount <= Decimal::ZERO {
        return Err(RestError::InvalidParameter(format!(
            "withdrawal amount must be positive, got {}",
            amount
        )));
    }

    Ok(Params::new()
        .push("asset", join_required("asset", &[asset])?)
        .push("key", join_required("key", &[key])?)
        .push("amount", amount))
}
