//! Common test utilities and fixtures for integration tests
//!
//! Contains response bodies shaped like live Kraken REST responses and a
//! minimal HTTP server that replays them.

#![allow(dead_code)]

use kraken_rest::{ClientConfig, Credentials, KrakenRestClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Example secret from Kraken's REST authentication guide
pub const TEST_SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

pub const TEST_API_KEY: &str = "test-api-key";

/// Successful `Time` response
pub const TIME_RESPONSE: &str = r#"{
    "error": [],
    "result": {"unixtime": 1688669448, "rfc1123": "Thu, 06 Jul 23 18:50:48 +0000"}
}"#;

/// Successful `Depth` response for XBT/EUR with two levels per side
pub const DEPTH_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "XXBTZEUR": {
            "asks": [
                ["27550.10000", "0.500", 1688671200],
                ["27551.00000", "1.250", 1688671195]
            ],
            "bids": [
                ["27549.90000", "0.750", 1688671201],
                ["27548.50000", "2.000", 1688671180]
            ]
        }
    }
}"#;

/// Successful `Ticker` response for XBT/EUR
pub const TICKER_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "XXBTZEUR": {
            "a": ["30300.10000", "1", "1.000"],
            "b": ["30300.00000", "2", "2.000"],
            "c": ["30303.20000", "0.00067643"],
            "v": ["4083.67001100", "4412.73601799"],
            "p": ["30706.77771", "30689.13205"],
            "t": [34619, 38907],
            "l": ["29868.30000", "29868.30000"],
            "h": ["31631.00000", "31631.00000"],
            "o": "30000.1"
        }
    }
}"#;

/// Successful `OHLC` response with two candles
pub const OHLC_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            [1609459200, "100.0", "110.0", "90.0", "105.0", "102.5", "50.0", 42],
            [1609459260, "105.0", "106.0", "104.0", "104.5", "105.1", "3.25", 7]
        ],
        "last": 1609459200
    }
}"#;

/// Successful `Balance` response
pub const BALANCE_RESPONSE: &str = r#"{
    "error": [],
    "result": {"ZUSD": "171288.6158", "XXBT": "0.0000000000", "XETH": "5.2500000000"}
}"#;

/// Successful validate-only `AddOrder` response
pub const ADD_ORDER_VALIDATE_RESPONSE: &str = r#"{
    "error": [],
    "result": {"descr": {"order": "buy 1.25000000 XBTUSD @ limit 27500.0"}}
}"#;

/// Exchange-reported error with a null result
pub const INVALID_ARGUMENTS_RESPONSE: &str =
    r#"{"error":["EGeneral:Invalid arguments"],"result":null}"#;

/// Nonce rejection
pub const INVALID_NONCE_RESPONSE: &str = r#"{"error":["EAPI:Invalid nonce"]}"#;

/// A request as seen by the fake server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub target: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    /// Form fields of the body, in order
    pub fn form(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.body).unwrap()
    }
}

/// Local HTTP server answering each connection with the next canned response
pub struct FakeKraken {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeKraken {
    /// Serve `responses` in order, one per connection
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                if let Some(request) = read_request(&mut stream).await {
                    recorded.lock().unwrap().push(request);
                }
                write_response(&mut stream, status, &body).await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn public_client(&self) -> KrakenRestClient {
        KrakenRestClient::with_config(ClientConfig::new().with_base_url(&self.base_url)).unwrap()
    }

    pub fn private_client(&self) -> (KrakenRestClient, Credentials) {
        let credentials = test_credentials();
        let config = ClientConfig::new()
            .with_base_url(&self.base_url)
            .with_credentials(credentials.clone());
        (KrakenRestClient::with_config(config).unwrap(), credentials)
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET).unwrap()
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
