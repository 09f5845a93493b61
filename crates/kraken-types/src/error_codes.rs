//! Classification of the error strings Kraken returns in the `error` array
//!
//! Kraken errors have the shape `"<severity><category>:<message>"`, e.g.
//! `"EGeneral:Invalid arguments"` or `"EAPI:Invalid nonce"`. Warnings use a
//! `W` severity prefix. The classification is advisory: the raw string is
//! always preserved and unknown codes are not an error.

use std::fmt;

/// Kraken error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// `EAPI:*` - authentication, nonce and request-level issues
    Api,
    /// `EGeneral:*` - general errors
    General,
    /// `EService:*` - service availability
    Service,
    /// `EOrder:*` - order placement errors
    Order,
    /// `EFunding:*` - deposit/withdrawal errors
    Funding,
    /// `EQuery:*` - query errors
    Query,
    /// `ETrade:*` - trade errors
    Trade,
    /// Unrecognized prefix
    Unknown,
}

impl ErrorCategory {
    fn from_prefix(prefix: &str) -> Self {
        // Severity letter first, then the category name
        match prefix.get(1..).unwrap_or_default() {
            "API" => Self::Api,
            "General" => Self::General,
            "Service" => Self::Service,
            "Order" => Self::Order,
            "Funding" => Self::Funding,
            "Query" => Self::Query,
            "Trade" => Self::Trade,
            _ => Self::Unknown,
        }
    }
}

/// Known Kraken REST error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KrakenErrorCode {
    /// EAPI:Rate limit exceeded
    RateLimitExceeded,
    /// EAPI:Invalid key
    InvalidKey,
    /// EAPI:Invalid signature
    InvalidSignature,
    /// EAPI:Invalid nonce
    InvalidNonce,
    /// EAPI:Bad request
    BadRequest,
    /// EAPI:Feature disabled
    FeatureDisabled,
    /// EGeneral:Invalid arguments
    InvalidArguments,
    /// EGeneral:Permission denied
    PermissionDenied,
    /// EGeneral:Unknown method
    UnknownMethod,
    /// EGeneral:Too many requests
    TooManyRequests,
    /// EGeneral:Temporary lockout
    TemporaryLockout,
    /// EGeneral:Internal error
    InternalError,
    /// EQuery:Unknown asset pair
    UnknownAssetPair,
    /// EQuery:Unknown asset
    UnknownAsset,
    /// EService:Unavailable
    ServiceUnavailable,
    /// EService:Busy
    ServiceBusy,
    /// EService:Market in cancel_only mode
    MarketCancelOnly,
    /// EService:Market in post_only mode
    MarketPostOnly,
    /// EService:Deadline elapsed
    DeadlineElapsed,
    /// EOrder:Insufficient funds
    InsufficientFunds,
    /// EOrder:Insufficient margin
    InsufficientMargin,
    /// EOrder:Order minimum not met
    OrderMinimumNotMet,
    /// EOrder:Cost minimum not met
    CostMinimumNotMet,
    /// EOrder:Tick size check failed
    TickSizeCheckFailed,
    /// EOrder:Orders limit exceeded
    OrdersLimitExceeded,
    /// EOrder:Rate limit exceeded
    OrderRateLimitExceeded,
    /// EOrder:Unknown order
    UnknownOrder,
    /// EOrder:Invalid price
    InvalidPrice,
    /// EOrder:Trading agreement required
    TradingAgreementRequired,
    /// EFunding:Unknown withdraw key
    UnknownWithdrawKey,
    /// EFunding:Invalid amount
    InvalidFundingAmount,
    /// EFunding:Too small
    FundingTooSmall,
    /// EFunding:Unknown asset
    UnknownFundingAsset,
}

/// Exact error strings (severity and category included)
const KNOWN_CODES: &[(&str, KrakenErrorCode)] = &[
    ("EAPI:Rate limit exceeded", KrakenErrorCode::RateLimitExceeded),
    ("EAPI:Invalid key", KrakenErrorCode::InvalidKey),
    ("EAPI:Invalid signature", KrakenErrorCode::InvalidSignature),
    ("EAPI:Invalid nonce", KrakenErrorCode::InvalidNonce),
    ("EAPI:Bad request", KrakenErrorCode::BadRequest),
    ("EAPI:Feature disabled", KrakenErrorCode::FeatureDisabled),
    ("EGeneral:Invalid arguments", KrakenErrorCode::InvalidArguments),
    ("EGeneral:Permission denied", KrakenErrorCode::PermissionDenied),
    ("EGeneral:Unknown method", KrakenErrorCode::UnknownMethod),
    ("EGeneral:Too many requests", KrakenErrorCode::TooManyRequests),
    ("EGeneral:Temporary lockout", KrakenErrorCode::TemporaryLockout),
    ("EGeneral:Internal error", KrakenErrorCode::InternalError),
    ("EQuery:Unknown asset pair", KrakenErrorCode::UnknownAssetPair),
    ("EQuery:Unknown asset", KrakenErrorCode::UnknownAsset),
    ("EService:Unavailable", KrakenErrorCode::ServiceUnavailable),
    ("EService:Busy", KrakenErrorCode::ServiceBusy),
    ("EService:Market in cancel_only mode", KrakenErrorCode::MarketCancelOnly),
    ("EService:Market in post_only mode", KrakenErrorCode::MarketPostOnly),
    ("EService:Deadline elapsed", KrakenErrorCode::DeadlineElapsed),
    ("EOrder:Insufficient funds", KrakenErrorCode::InsufficientFunds),
    ("EOrder:Insufficient margin", KrakenErrorCode::InsufficientMargin),
    ("EOrder:Order minimum not met", KrakenErrorCode::OrderMinimumNotMet),
    ("EOrder:Cost minimum not met", KrakenErrorCode::CostMinimumNotMet),
    ("EOrder:Tick size check failed", KrakenErrorCode::TickSizeCheckFailed),
    ("EOrder:Orders limit exceeded", KrakenErrorCode::OrdersLimitExceeded),
    ("EOrder:Rate limit exceeded", KrakenErrorCode::OrderRateLimitExceeded),
    ("EOrder:Unknown order", KrakenErrorCode::UnknownOrder),
    ("EOrder:Invalid price", KrakenErrorCode::InvalidPrice),
    ("EOrder:Trading agreement required", KrakenErrorCode::TradingAgreementRequired),
    ("EFunding:Unknown withdraw key", KrakenErrorCode::UnknownWithdrawKey),
    ("EFunding:Invalid amount", KrakenErrorCode::InvalidFundingAmount),
    ("EFunding:Too small", KrakenErrorCode::FundingTooSmall),
    ("EFunding:Unknown asset", KrakenErrorCode::UnknownFundingAsset),
];

impl KrakenErrorCode {
    /// Look up an exact Kraken error string
    ///
    /// Kraken sometimes appends detail after a second colon
    /// (`"EGeneral:Invalid arguments:volume"`), which is ignored here.
    pub fn lookup(error: &str) -> Option<Self> {
        KNOWN_CODES
            .iter()
            .find(|(known, _)| {
                error == *known
                    || error
                        .strip_prefix(known)
                        .is_some_and(|rest| rest.starts_with(':'))
            })
            .map(|(_, code)| *code)
    }

    /// True for rate limiting and lockouts
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::TooManyRequests
                | Self::OrderRateLimitExceeded
                | Self::TemporaryLockout
        )
    }

    /// True for key, signature, nonce and permission problems
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidKey | Self::InvalidSignature | Self::InvalidNonce | Self::PermissionDenied
        )
    }

    /// True when the same request may succeed later
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limit()
            || matches!(
                self,
                Self::ServiceUnavailable
                    | Self::ServiceBusy
                    | Self::DeadlineElapsed
                    | Self::InternalError
                    | Self::InvalidNonce
            )
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::RateLimitExceeded => "API rate limit exceeded",
            Self::InvalidKey => "Invalid API key",
            Self::InvalidSignature => "Invalid request signature",
            Self::InvalidNonce => "Nonce not increasing",
            Self::BadRequest => "Malformed request",
            Self::FeatureDisabled => "Feature not available for this account",
            Self::InvalidArguments => "Invalid arguments",
            Self::PermissionDenied => "API key lacks permission",
            Self::UnknownMethod => "Unknown API method",
            Self::TooManyRequests => "Too many requests",
            Self::TemporaryLockout => "Account temporarily locked out",
            Self::InternalError => "Internal server error",
            Self::UnknownAssetPair => "Unknown asset pair",
            Self::UnknownAsset => "Unknown asset",
            Self::ServiceUnavailable => "Service unavailable",
            Self::ServiceBusy => "Service busy",
            Self::MarketCancelOnly => "Market accepts cancellations only",
            Self::MarketPostOnly => "Market accepts post-only orders only",
            Self::DeadlineElapsed => "Request deadline elapsed",
            Self::InsufficientFunds => "Insufficient funds",
            Self::InsufficientMargin => "Insufficient margin",
            Self::OrderMinimumNotMet => "Order minimum not met",
            Self::CostMinimumNotMet => "Cost minimum not met",
            Self::TickSizeCheckFailed => "Price not a multiple of tick size",
            Self::OrdersLimitExceeded => "Too many open orders",
            Self::OrderRateLimitExceeded => "Order rate limit exceeded",
            Self::UnknownOrder => "Unknown order",
            Self::InvalidPrice => "Invalid price",
            Self::TradingAgreementRequired => "Trading agreement required",
            Self::UnknownWithdrawKey => "Unknown withdrawal key",
            Self::InvalidFundingAmount => "Invalid funding amount",
            Self::FundingTooSmall => "Funding amount too small",
            Self::UnknownFundingAsset => "Unknown funding asset",
        }
    }
}

/// A single entry of a response's `error` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenApiError {
    /// The string exactly as Kraken sent it
    pub raw: String,
    /// Recognized code, if any
    pub code: Option<KrakenErrorCode>,
    /// Category from the prefix
    pub category: ErrorCategory,
    /// True for `W`-prefixed warnings
    pub is_warning: bool,
    /// Text after the prefix
    pub message: String,
}

impl KrakenApiError {
    /// Classify a raw error string
    pub fn parse(error: &str) -> Self {
        let (category, message) = match error.split_once(':') {
            Some((prefix, message)) => (ErrorCategory::from_prefix(prefix), message.trim()),
            None => (ErrorCategory::Unknown, error),
        };

        Self {
            raw: error.to_string(),
            code: KrakenErrorCode::lookup(error),
            category,
            is_warning: error.starts_with('W'),
            message: message.to_string(),
        }
    }

    /// Classify every entry of an `error` array
    pub fn parse_many<S: AsRef<str>>(errors: &[S]) -> Vec<Self> {
        errors.iter().map(|e| Self::parse(e.as_ref())).collect()
    }

    /// True for rate limiting and lockouts
    pub fn is_rate_limit(&self) -> bool {
        self.code.is_some_and(|c| c.is_rate_limit())
    }

    /// True for key, signature, nonce and permission problems
    pub fn is_auth_error(&self) -> bool {
        self.code.is_some_and(|c| c.is_auth_error())
    }

    /// True when the same request may succeed later
    pub fn is_retryable(&self) -> bool {
        self.code.is_some_and(|c| c.is_retryable())
    }
}

impl fmt::Display for KrakenApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
