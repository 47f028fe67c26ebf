//! Retail trading API client.

use async_trait::async_trait;
use pulse_core::error::DataError;
use pulse_core::traits::PriceProvider;
use pulse_core::types::{AssetClass, SymbolSpec};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Candle as returned by the historicals endpoints.
///
/// Close prices arrive as strings and may be null or empty; such points
/// are dropped rather than treated as zero.
#[derive(Debug, Deserialize)]
struct Candle {
    close_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CryptoHistoricals {
    data_points: Vec<Candle>,
}

#[derive(Debug, Deserialize)]
struct StockHistoricals {
    historicals: Vec<Candle>,
}

#[derive(Debug, Deserialize)]
struct CryptoQuote {
    mark_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StockQuote {
    last_trade_price: Option<String>,
}

/// HTTP client for the retail trading API's market-data endpoints.
///
/// Crypto symbols use five-minute candles over a week; stocks use
/// five-minute candles over a day, matching what the indicators expect.
pub struct RetailApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl RetailApiClient {
    /// Create a client with a session token.
    ///
    /// A missing token is an authentication failure up front, not a
    /// per-symbol fetch error later.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DataError::Unauthenticated);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client reading the token from the named environment variable.
    pub fn from_env(
        base_url: impl Into<String>,
        token_env: &str,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let token = std::env::var(token_env).map_err(|_| DataError::Unauthenticated)?;
        Self::new(base_url, token, timeout)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "provider request");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DataError::Unauthenticated)
            }
            StatusCode::NOT_FOUND => {
                return Err(DataError::SymbolNotFound(url));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Err(DataError::RateLimited { retry_after_secs });
            }
            status if !status.is_success() => {
                return Err(DataError::Network(format!("{url} returned {status}")));
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))
    }

    fn parse_price(symbol: &str, raw: Option<String>) -> Result<f64, DataError> {
        let raw = raw
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DataError::EmptyResponse {
                symbol: symbol.to_string(),
            })?;
        raw.parse()
            .map_err(|_| DataError::Parse(format!("bad price for {symbol}: {raw}")))
    }

    fn collect_closes(symbol: &str, candles: Vec<Candle>) -> Result<Vec<f64>, DataError> {
        let mut closes = Vec::with_capacity(candles.len());
        for candle in candles {
            match candle.close_price {
                Some(raw) if !raw.is_empty() => {
                    let close = raw
                        .parse()
                        .map_err(|_| DataError::Parse(format!("bad close for {symbol}: {raw}")))?;
                    closes.push(close);
                }
                _ => {}
            }
        }

        if closes.is_empty() {
            return Err(DataError::EmptyResponse {
                symbol: symbol.to_string(),
            });
        }
        Ok(closes)
    }
}

#[async_trait]
impl PriceProvider for RetailApiClient {
    async fn historical_closes(&self, spec: &SymbolSpec) -> Result<Vec<f64>, DataError> {
        match spec.class {
            AssetClass::Crypto => {
                let path = format!(
                    "/marketdata/crypto/historicals/{}/?interval=5minute&span=week",
                    spec.symbol
                );
                let body: CryptoHistoricals = self.get_json(&path).await?;
                Self::collect_closes(&spec.symbol, body.data_points)
            }
            AssetClass::Stock => {
                let path = format!(
                    "/marketdata/historicals/{}/?interval=5minute&span=day",
                    spec.symbol
                );
                let body: StockHistoricals = self.get_json(&path).await?;
                Self::collect_closes(&spec.symbol, body.historicals)
            }
        }
    }

    async fn latest_price(&self, spec: &SymbolSpec) -> Result<f64, DataError> {
        match spec.class {
            AssetClass::Crypto => {
                let path = format!("/marketdata/crypto/quotes/{}/", spec.symbol);
                let body: CryptoQuote = self.get_json(&path).await?;
                Self::parse_price(&spec.symbol, body.mark_price)
            }
            AssetClass::Stock => {
                let path = format!("/marketdata/quotes/{}/", spec.symbol);
                let body: StockQuote = self.get_json(&path).await?;
                Self::parse_price(&spec.symbol, body.last_trade_price)
            }
        }
    }

    fn name(&self) -> &str {
        "retail-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let result = RetailApiClient::new("https://api.example", "", Duration::from_secs(5));
        assert!(matches!(result, Err(DataError::Unauthenticated)));
    }

    #[test]
    fn test_collect_closes_skips_null_and_empty() {
        let candles = vec![
            Candle {
                close_price: Some("100.5".to_string()),
            },
            Candle { close_price: None },
            Candle {
                close_price: Some(String::new()),
            },
            Candle {
                close_price: Some("101.25".to_string()),
            },
        ];

        let closes = RetailApiClient::collect_closes("BTC", candles).unwrap();
        assert_eq!(closes, vec![100.5, 101.25]);
    }

    #[test]
    fn test_collect_closes_rejects_all_empty() {
        let candles = vec![Candle { close_price: None }];
        let err = RetailApiClient::collect_closes("BTC", candles).unwrap_err();
        assert!(matches!(err, DataError::EmptyResponse { .. }));
    }

    #[test]
    fn test_collect_closes_rejects_malformed() {
        let candles = vec![Candle {
            close_price: Some("not-a-number".to_string()),
        }];
        let err = RetailApiClient::collect_closes("BTC", candles).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(
            RetailApiClient::parse_price("BTC", Some("42.5".to_string())).unwrap(),
            42.5
        );
        assert!(matches!(
            RetailApiClient::parse_price("BTC", None),
            Err(DataError::EmptyResponse { .. })
        ));
    }
}
