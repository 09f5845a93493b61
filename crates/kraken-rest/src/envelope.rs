//! The `{"error": [...], "result": ...}` envelope around every response
//!
//! Decoding happens in two stages. The envelope is parsed first with the
//! result kept as raw JSON. Only when `error` is empty is the result decoded
//! into the caller's type, so a failed request never trips over a `result`
//! shape it does not have.

use crate::error::{RestError, RestResult};
use kraken_types::{decode_value, DecodeError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Kraken response envelope with an undecoded result
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Error messages (empty if successful)
    #[serde(default)]
    pub error: Vec<String>,
    /// Result payload (`Null` when absent)
    #[serde(default)]
    pub result: Value,
}

impl ApiResponse {
    /// Parse the envelope from raw response bytes
    pub fn from_slice(bytes: &[u8]) -> RestResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| RestError::Decode(DecodeError::Json(e)))
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// Decode the result, or surface the exchange's errors
    pub fn into_result<T: DeserializeOwned>(self) -> RestResult<T> {
        if !self.error.is_empty() {
            return Err(RestError::from_api_errors(self.error));
        }
        if self.result.is_null() {
            return Err(DecodeError::MissingResult.into());
        }
        Ok(decode_value(self.result)?)
    }
}

/// Decode a complete response body into `T`
pub fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> RestResult<T> {
    ApiResponse::from_slice(bytes)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kraken_types::{PairMap, ServerTime};

    #[test]
    fn test_error_envelope_skips_result() {
        // `result` would not decode as ServerTime; it must not be looked at
        let body = br#"{"error":["EGeneral:Invalid arguments"],"result":{"bogus":true}}"#;
        let err = decode_response::<ServerTime>(body).unwrap_err();

        match err {
            RestError::Api { errors, .. } => {
                assert_eq!(errors, vec!["EGeneral:Invalid arguments".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_result_is_missing() {
        let err = decode_response::<ServerTime>(br#"{"error":[],"result":null}"#).unwrap_err();
        assert!(matches!(err, RestError::Decode(DecodeError::MissingResult)));

        let err = decode_response::<ServerTime>(br#"{"error":[]}"#).unwrap_err();
        assert!(matches!(err, RestError::Decode(DecodeError::MissingResult)));
    }

    #[test]
    fn test_success() {
        let body = br#"{"error":[],"result":{"unixtime":1688669448,"rfc1123":"Thu, 06 Jul 23 18:50:48 +0000"}}"#;
        let time: ServerTime = decode_response(body).unwrap();
        assert_eq!(time.unixtime, 1688669448);
    }

    #[test]
    fn test_not_json() {
        let err = decode_response::<ServerTime>(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, RestError::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn test_result_shape_mismatch() {
        let err = decode_response::<PairMap<ServerTime>>(br#"{"error":[],"result":[1,2]}"#)
            .unwrap_err();
        assert!(matches!(err, RestError::Decode(_)));
    }
}
