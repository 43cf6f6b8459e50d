use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;

use crate::error::ExchangeError;
use crate::models::{Candle, OpenOrder, OrderRequest, PlacedOrder, ProductMetadata};

type HmacSha256 = Hmac<Sha256>;

const COINBASE_API: &str = "https://api.exchange.coinbase.com";

/// API credentials for the private (signed) endpoints.
#[derive(Clone)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
    pub passphrase: String,
}

/// Client for the Coinbase Exchange REST API
///
/// Public market data works without credentials; order placement, listing
/// and cancellation need the key/secret/passphrase triple.
#[derive(Clone)]
pub struct CoinbaseClient {
    client: Client,
    base_url: String,
    credentials: Option<ApiCredentials>,
}

/// One candle as the exchange serializes it: an array laid out as
/// [time, low, high, open, close, volume]. The core reads low at index 1,
/// high at index 2 and close at index 4, so this tuple is a compatibility
/// contract with the documented API — verify it against the live schema
/// before changing anything here.
#[derive(Debug, serde::Deserialize)]
struct RawCandle(f64, f64, f64, f64, f64, f64);

#[derive(Serialize)]
struct OrderPayload<'a> {
    product_id: &'a str,
    side: crate::models::OrderSide,
    #[serde(rename = "type")]
    order_type: crate::models::OrderType,
    size: String,
    price: String,
    time_in_force: crate::models::TimeInForce,
}

impl CoinbaseClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: COINBASE_API.to_string(),
            credentials: None,
        }
    }

    /// Point the client at a different REST endpoint (sandbox, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, key: String, secret: String, passphrase: String) -> Self {
        self.credentials = Some(ApiCredentials {
            key,
            secret,
            passphrase,
        });
        self
    }

    /// Build a client from `COINBASE_API_KEY` / `COINBASE_API_SECRET` /
    /// `COINBASE_API_PASSPHRASE`. Missing credentials leave the client in
    /// public-data-only mode.
    pub fn from_env() -> Self {
        let client = Self::new();
        if let (Ok(key), Ok(secret), Ok(passphrase)) = (
            std::env::var("COINBASE_API_KEY"),
            std::env::var("COINBASE_API_SECRET"),
            std::env::var("COINBASE_API_PASSPHRASE"),
        ) {
            client.with_credentials(key, secret, passphrase)
        } else {
            client
        }
    }

    /// CB-ACCESS headers: the signature is base64(HMAC-SHA256(base64-decoded
    /// secret, timestamp + method + path + body)).
    fn signed_headers(
        &self,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<HeaderMap, ExchangeError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| ExchangeError::Auth("API credentials are not configured".to_string()))?;

        let timestamp = Utc::now().timestamp().to_string();
        let prehash = format!("{timestamp}{method}{request_path}{body}");

        let secret = BASE64
            .decode(&credentials.secret)
            .map_err(|e| ExchangeError::Auth(format!("API secret is not valid base64: {e}")))?;
        let mut mac = HmacSha256::new_from_slice(&secret)
            .map_err(|e| ExchangeError::Auth(e.to_string()))?;
        mac.update(prehash.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        let mut headers = HeaderMap::new();
        headers.insert("cb-access-key", header_value(&credentials.key)?);
        headers.insert("cb-access-sign", header_value(&signature)?);
        headers.insert("cb-access-timestamp", header_value(&timestamp)?);
        headers.insert("cb-access-passphrase", header_value(&credentials.passphrase)?);
        Ok(headers)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ExchangeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ExchangeError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for CoinbaseClient {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ExchangeError> {
    HeaderValue::from_str(value)
        .map_err(|e| ExchangeError::Auth(format!("header value rejected: {e}")))
}

#[async_trait]
impl super::Exchange for CoinbaseClient {
    async fn fetch_candles(
        &self,
        product: &str,
        granularity: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, ExchangeError> {
        let url = format!(
            "{}/products/{}/candles?granularity={}&start={}&end={}",
            self.base_url,
            product,
            granularity,
            start.format("%Y-%m-%dT%H:%M:%SZ"),
            end.format("%Y-%m-%dT%H:%M:%SZ"),
        );

        let response = Self::check_status(self.client.get(&url).send().await?).await?;
        let raw: Vec<RawCandle> = response.json().await?;

        let mut candles = Vec::with_capacity(raw.len());
        for RawCandle(time, low, high, open, close, volume) in raw {
            let timestamp = Utc
                .timestamp_opt(time as i64, 0)
                .single()
                .ok_or_else(|| {
                    ExchangeError::InvalidResponse(format!("bad candle timestamp {time}"))
                })?;
            candles.push(Candle {
                timestamp,
                low,
                high,
                open,
                close,
                volume,
            });
        }

        // The API returns candles newest first; every consumer expects
        // oldest first.
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }

    async fn product_metadata(&self, product: &str) -> Result<ProductMetadata, ExchangeError> {
        let url = format!("{}/products/{}", self.base_url, product);
        let response = Self::check_status(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn list_open_orders(&self, product: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let path = format!("/orders?product_id={product}&status=open");
        let headers = self.signed_headers("GET", &path, "")?;
        let url = format!("{}{}", self.base_url, path);

        let response =
            Self::check_status(self.client.get(&url).headers(headers).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError> {
        let path = format!("/orders/{order_id}");
        let headers = self.signed_headers("DELETE", &path, "")?;
        let url = format!("{}{}", self.base_url, path);

        Self::check_status(self.client.delete(&url).headers(headers).send().await?).await?;
        Ok(())
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<PlacedOrder, ExchangeError> {
        let payload = OrderPayload {
            product_id: &request.product,
            side: request.side,
            order_type: request.order_type,
            size: request.size.to_string(),
            price: request.price.to_string(),
            time_in_force: request.time_in_force,
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;

        let path = "/orders";
        let headers = self.signed_headers("POST", path, &body)?;
        let url = format!("{}{}", self.base_url, path);

        let response = Self::check_status(
            self.client
                .post(&url)
                .headers(headers)
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Exchange;
    use crate::models::{OrderSide, OrderType, TimeInForce};

    // "secret" as base64, good enough for signing in tests.
    const TEST_SECRET: &str = "c2VjcmV0";

    fn test_client(server: &mockito::Server) -> CoinbaseClient {
        CoinbaseClient::new()
            .with_base_url(server.url())
            .with_credentials("key".into(), TEST_SECRET.into(), "passphrase".into())
    }

    #[tokio::test]
    async fn test_fetch_candles_parses_and_orders_oldest_first() {
        let mut server = mockito::Server::new_async().await;
        // Newest first, as the API serves them.
        let body = "[[1700000120,99.0,101.0,100.0,100.5,12.0],\
                     [1700000060,98.0,100.0,99.0,99.5,10.0]]";
        let mock = server
            .mock("GET", "/products/BTC-USD/candles")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = CoinbaseClient::new().with_base_url(server.url());
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let end = Utc.timestamp_opt(1_700_000_180, 0).unwrap();
        let candles = client
            .fetch_candles("BTC-USD", 60, start, end)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(candles.len(), 2);
        assert!(candles[0].timestamp < candles[1].timestamp);
        // Field positions: low@1, high@2, close@4.
        assert_eq!(candles[0].low, 98.0);
        assert_eq!(candles[0].high, 100.0);
        assert_eq!(candles[0].close, 99.5);
        assert_eq!(candles[1].close, 100.5);
    }

    #[tokio::test]
    async fn test_fetch_candles_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/BTC-USD/candles")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = CoinbaseClient::new().with_base_url(server.url());
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let result = client.fetch_candles("BTC-USD", 60, start, Utc::now()).await;

        assert!(matches!(result, Err(ExchangeError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_product_metadata() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/BTC-USD")
            .with_status(200)
            .with_body(r#"{"id":"BTC-USD","base_min_size":"0.000016"}"#)
            .create_async()
            .await;

        let client = CoinbaseClient::new().with_base_url(server.url());
        let metadata = client.product_metadata("BTC-USD").await.unwrap();
        assert_eq!(metadata.base_min_size, "0.000016");
    }

    #[tokio::test]
    async fn test_submit_order_sends_signed_limit_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/orders")
            .match_header("cb-access-key", "key")
            .match_header("cb-access-passphrase", "passphrase")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "product_id": "BTC-USD",
                "side": "buy",
                "type": "limit",
                "size": "0.002",
                "price": "50000",
                "time_in_force": "GTC",
            })))
            .with_status(200)
            .with_body(r#"{"id":"order-123"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let request = OrderRequest {
            product: "BTC-USD".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            size: 0.002,
            price: 50_000.0,
            time_in_force: TimeInForce::Gtc,
        };

        let placed = client.submit_order(&request).await.unwrap();
        mock.assert_async().await;
        assert_eq!(placed.id, "order-123");
    }

    #[tokio::test]
    async fn test_submit_order_without_credentials() {
        let client = CoinbaseClient::new();
        let request = OrderRequest {
            product: "BTC-USD".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            size: 1.0,
            price: 100.0,
            time_in_force: TimeInForce::Gtc,
        };

        let result = client.submit_order(&request).await;
        assert!(matches!(result, Err(ExchangeError::Auth(_))));
    }

    #[tokio::test]
    async fn test_list_open_orders() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orders")
            .match_query(mockito::Matcher::UrlEncoded(
                "product_id".into(),
                "BTC-USD".into(),
            ))
            .with_status(200)
            .with_body(r#"[{"id":"a","time_in_force":"GTC"},{"id":"b","time_in_force":"IOC"}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let orders = client.list_open_orders("BTC-USD").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].time_in_force, TimeInForce::Gtc);
        assert_eq!(orders[1].time_in_force, TimeInForce::Ioc);
    }
}
