//! API credentials for Kraken's private REST endpoints
//!
//! Implements HMAC-SHA512 request signing.
//!
//! # Security
//!
//! The decoded private key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Keeps the key out of `Debug` output
//! - Requires explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::{Digest, Sha256, Sha512};
use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use crate::nonce::NonceGenerator;

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "KRAKEN_API_KEY";
/// Environment variable holding the base64 private key
pub const PRIVATE_KEY_ENV: &str = "KRAKEN_PRIVATE_KEY";

/// API credentials for authenticated requests
///
/// Clones share one [`NonceGenerator`], so every request made with the same
/// key gets a fresh, increasing nonce regardless of which clone sent it.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Private key (decoded from base64, zeroized on drop)
    private_key: SecretBox<Vec<u8>>,
    nonces: Arc<NonceGenerator>,
}

impl Credentials {
    /// Create credentials from an API key and a base64 encoded private key
    ///
    /// Fails with [`AuthError::InvalidCredentials`] when the key is empty or
    /// the private key is not valid base64.
    pub fn new(api_key: impl Into<String>, private_key: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }

        let decoded = BASE64.decode(private_key.as_ref().trim()).map_err(|e| {
            AuthError::InvalidCredentials(format!("Invalid base64 private key: {}", e))
        })?;
        if decoded.is_empty() {
            return Err(AuthError::InvalidCredentials("private key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            private_key: SecretBox::new(Box::new(decoded)),
            nonces: Arc::new(NonceGenerator::new()),
        })
    }

    /// Create credentials from `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY`
    pub fn from_env() -> AuthResult<Self> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let private_key = std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(PRIVATE_KEY_ENV.to_string()))?;

        Self::new(api_key, private_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Next nonce for this key
    pub fn next_nonce(&self) -> u64 {
        self.nonces.next()
    }

    /// Sign a private request
    ///
    /// Kraken signature algorithm:
    /// 1. SHA256(nonce + POST data)
    /// 2. HMAC-SHA512(private key, URI path + SHA256 result)
    /// 3. Base64 encode
    ///
    /// `path` is the URI path (e.g. "/0/private/Balance") and `post_data` the
    /// exact URL-encoded body that will be sent, including `nonce=`.
    pub fn sign(&self, path: &str, nonce: &str, post_data: &str) -> AuthResult<String> {
        let digest = Sha256::new()
            .chain_update(nonce.as_bytes())
            .chain_update(post_data.as_bytes())
            .finalize();

        let mut mac = HmacSha512::new_from_slice(self.private_key.expose_secret())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(path.as_bytes());
        mac.update(&digest);

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            private_key: SecretBox::new(Box::new(self.private_key.expose_secret().clone())),
            nonces: Arc::clone(&self.nonces),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Signs a single private request
///
/// Draws the nonce once at construction so the body and the signature
/// always agree on it.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer for `path`, drawing a fresh nonce
    pub fn new(credentials: &'a Credentials, path: impl Into<String>) -> Self {
        Self {
            credentials,
            path: path.into(),
            nonce: credentials.next_nonce().to_string(),
        }
    }

    /// Nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// URI path being signed
    pub fn path(&self) -> &str {
        &self.path
    }

    /// API key to send in the `API-Key` header
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Signature for the `API-Sign` header
    pub fn sign(&self, post_data: &str) -> AuthResult<String> {
        self.credentials.sign(&self.path, &self.nonce, post_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example key pair from Kraken's REST authentication guide
    const GUIDE_SECRET: &str =
        "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

    #[test]
    fn test_known_signature() {
        let creds = Credentials::new("API_KEY", GUIDE_SECRET).unwrap();
        let signature = creds
            .sign(
                "/0/private/AddOrder",
                "1616492376594",
                "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25",
            )
            .unwrap();

        assert_eq!(
            signature,
            "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ=="
        );
    }

    #[test]
    fn test_signature_depends_on_body() {
        let creds = Credentials::new("API_KEY", GUIDE_SECRET).unwrap();
        let a = creds.sign("/0/private/Balance", "1", "nonce=1").unwrap();
        let b = creds.sign("/0/private/Balance", "1", "nonce=1").unwrap();
        let c = creds.sign("/0/private/Balance", "1", "nonce=1&asset=XBT").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(BASE64.decode(&a).is_ok());
    }

    #[test]
    fn test_invalid_private_key() {
        let err = Credentials::new("key", "not base64!!").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));

        let err = Credentials::new("", GUIDE_SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let creds = Credentials::new("test_api_key", "dGVzdF9wcml2YXRlX2tleQ==").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("dGVzdF9wcml2YXRlX2tleQ"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api"));
    }

    #[test]
    fn test_clones_share_nonce_sequence() {
        let creds = Credentials::new("key", GUIDE_SECRET).unwrap();
        let clone = creds.clone();

        let first = creds.next_nonce();
        let second = clone.next_nonce();
        assert!(second > first);
    }

    #[test]
    fn test_request_signer_uses_one_nonce() {
        let creds = Credentials::new("key", GUIDE_SECRET).unwrap();
        let signer = RequestSigner::new(&creds, "/0/private/Balance");
        let body = format!("nonce={}", signer.nonce());

        assert!(signer.nonce().chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            signer.sign(&body).unwrap(),
            creds.sign("/0/private/Balance", signer.nonce(), &body).unwrap()
        );
        assert_eq!(signer.path(), "/0/private/Balance");
    }
}
