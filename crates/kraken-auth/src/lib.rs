//! Credentials and request signing for Kraken's private REST endpoints
//!
//! # Example
//!
//! ```no_run
//! use kraken_auth::{Credentials, RequestSigner};
//!
//! # fn main() -> Result<(), kraken_auth::AuthError> {
//! // Load credentials from environment
//! let creds = Credentials::from_env()?;
//!
//! let signer = RequestSigner::new(&creds, "/0/private/Balance");
//! let body = format!("nonce={}", signer.nonce());
//! let signature = signer.sign(&body)?;
//! # let _ = signature;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{Credentials, RequestSigner, API_KEY_ENV, PRIVATE_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
