//! Request types for the trading endpoints

use crate::endpoints::Params;
use crate::error::{RestError, RestResult};
use kraken_types::{OrderFlag, OrderSide, OrderType, TimeInForce};
use rust_decimal::Decimal;

/// Request to place an order via `AddOrder`
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Trading pair
    pub pair: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Order volume in base currency
    pub volume: Decimal,
    /// Primary price (limit price, or trigger price for conditional types)
    pub price: Option<Decimal>,
    /// Secondary price (limit price for *-limit types)
    pub price2: Option<Decimal>,
    /// Time in force
    pub time_in_force: Option<TimeInForce>,
    /// Leverage (for margin)
    pub leverage: Option<String>,
    /// Order flags
    pub flags: Vec<OrderFlag>,
    /// Scheduled start time (`+<n>` for relative)
    pub starttm: Option<String>,
    /// Expiration time (`+<n>` for relative)
    pub expiretm: Option<String>,
    /// User reference id
    pub userref: Option<i32>,
    /// Validate only (don't submit)
    pub validate: bool,
    /// Conditional close order type
    pub close_order_type: Option<OrderType>,
    /// Conditional close order price
    pub close_price: Option<Decimal>,
    /// Conditional close order secondary price
    pub close_price2: Option<Decimal>,
}

impl OrderRequest {
    /// Create an order of any type
    pub fn new(
        pair: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        volume: Decimal,
    ) -> Self {
        Self {
            pair: pair.into(),
            side,
            order_type,
            volume,
            price: None,
            price2: None,
            time_in_force: None,
            leverage: None,
            flags: Vec::new(),
            starttm: None,
            expiretm: None,
            userref: None,
            validate: false,
            close_order_type: None,
            close_price: None,
            close_price2: None,
        }
    }

    /// Create a market order
    pub fn market(pair: impl Into<String>, side: OrderSide, volume: Decimal) -> Self {
        Self::new(pair, side, OrderType::Market, volume)
    }

    /// Create a limit order
    pub fn limit(pair: impl Into<String>, side: OrderSide, volume: Decimal, price: Decimal) -> Self {
        Self::new(pair, side, OrderType::Limit, volume).with_price(price)
    }

    /// Create a stop loss order
    pub fn stop_loss(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self::new(pair, side, OrderType::StopLoss, volume).with_price(stop_price)
    }

    /// Create a stop loss limit order
    pub fn stop_loss_limit(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        trigger: Decimal,
        limit: Decimal,
    ) -> Self {
        Self::new(pair, side, OrderType::StopLossLimit, volume)
            .with_price(trigger)
            .with_price2(limit)
    }

    /// Set the primary price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the secondary price
    pub fn with_price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Add an order flag
    pub fn with_flag(mut self, flag: OrderFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(self) -> Self {
        self.with_flag(OrderFlag::PostOnly)
    }

    /// Set leverage for margin trading
    pub fn with_leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    /// Set user reference id
    pub fn with_userref(mut self, userref: i32) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Set scheduled start time
    pub fn with_start_time(mut self, starttm: impl Into<String>) -> Self {
        self.starttm = Some(starttm.into());
        self
    }

    /// Set expiration time
    pub fn with_expire_time(mut self, expiretm: impl Into<String>) -> Self {
        self.expiretm = Some(expiretm.into());
        self
    }

    /// Set as validate-only (Kraken checks the order but does not place it)
    pub fn validate_only(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Attach a conditional close order
    pub fn with_close(mut self, order_type: OrderType, price: Decimal) -> Self {
        self.close_order_type = Some(order_type);
        self.close_price = Some(price);
        self
    }

    /// Set the conditional close order's secondary price
    pub fn with_close_price2(mut self, price2: Decimal) -> Self {
        self.close_price2 = Some(price2);
        self
    }

    /// Check the request locally before it is signed and sent
    pub fn validate(&self) -> RestResult<()> {
        if self.pair.trim().is_empty() {
            return Err(invalid("pair must not be empty"));
        }
        if self.volume <= Decimal::ZERO {
            return Err(invalid(format!("volume must be positive, got {}", self.volume)));
        }
        if self.order_type != OrderType::Market && self.price.is_none() {
            return Err(invalid(format!("{} order requires a price", self.order_type)));
        }
        if self.order_type.uses_price2() && self.price2.is_none() {
            return Err(invalid(format!("{} order requires price2", self.order_type)));
        }
        if self.close_price.is_some() != self.close_order_type.is_some() {
            return Err(invalid("close order needs both a type and a price"));
        }
        if self.time_in_force == Some(TimeInForce::GoodTillDate) && self.expiretm.is_none() {
            return Err(invalid("GTD orders require an expiration time"));
        }
        Ok(())
    }

    /// Form parameters for `AddOrder`
    pub(crate) fn to_params(&self) -> RestResult<Params> {
        self.validate()?;

        let flags = (!self.flags.is_empty()).then(|| {
            self.flags
                .iter()
                .map(OrderFlag::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });

        Ok(Params::new()
            .push("pair", &self.pair)
            .push("type", self.side)
            .push("ordertype", self.order_type)
            .push("volume", self.volume)
            .push_opt("price", self.price)
            .push_opt("price2", self.price2)
            .push_opt("timeinforce", self.time_in_force)
            .push_opt("leverage", self.leverage.as_deref())
            .push_opt("oflags", flags)
            .push_opt("starttm", self.starttm.as_deref())
            .push_opt("expiretm", self.expiretm.as_deref())
            .push_opt("userref", self.userref)
            .flag("validate", self.validate)
            .push_opt("close[ordertype]", self.close_order_type)
            .push_opt("close[price]", self.close_price)
            .push_opt("close[price2]", self.close_price2))
    }
}

fn invalid(message: impl Into<String>) -> RestError {
    RestError::InvalidParameter(message.into())
}
