use crate::domain::{
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::{CoinId, CoinMarket, MarketDataSource, SortBy, Timeframe},
};
use gloo_net::http::Request;
use serde::Deserialize;
use url::form_urlencoded;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
/// Search hits looked up in detail
const SEARCH_RESULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: CoinId,
}

/// CoinGecko REST client for market listings and coin search
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: String,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self { base_url: COINGECKO_BASE_URL.to_string() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn markets_url(&self, limit: usize, sort_by: SortBy, timeframe: Timeframe) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("vs_currency", "usd")
            .append_pair("order", &sort_by.order_param())
            .append_pair("per_page", &limit.to_string())
            .append_pair("page", "1")
            .append_pair("sparkline", "false")
            .append_pair("price_change_percentage", timeframe.price_change_param())
            .finish();
        format!("{}/coins/markets?{}", self.base_url, query)
    }

    pub fn search_url(&self, query: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new()).append_pair("query", query).finish();
        format!("{}/search?{}", self.base_url, query)
    }

    /// Market rows for explicit ids with every change window
    pub fn markets_by_ids_url(&self, ids: &[CoinId]) -> String {
        let joined = ids.iter().map(CoinId::as_str).collect::<Vec<_>>().join(",");
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("vs_currency", "usd")
            .append_pair("ids", &joined)
            .append_pair("price_change_percentage", "1h,24h,7d")
            .finish();
        format!("{}/coins/markets?{}", self.base_url, query)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, AppError> {
        get_logger().debug(LogComponent::Infrastructure("CoinGecko"), &format!("GET {url}"));

        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch {url}: {e}")))?;

        if !response.ok() {
            return Err(AppError::NetworkError(format!(
                "HTTP error: {} {}",
                response.status(),
                response.status_text()
            )));
        }

        response.json::<T>().await.map_err(|e| AppError::DecodeError(format!("Failed to parse JSON: {e}")))
    }

    async fn search_ids(&self, query: &str) -> Result<Vec<CoinId>, AppError> {
        let found: SearchResponse = self.get_json(&self.search_url(query)).await?;
        Ok(found.coins.into_iter().take(SEARCH_RESULT_LIMIT).map(|hit| hit.id).collect())
    }
}

impl MarketDataSource for CoinGeckoClient {
    async fn fetch_markets(
        &self,
        limit: usize,
        sort_by: SortBy,
        timeframe: Timeframe,
    ) -> Result<Vec<CoinMarket>, AppError> {
        let coins: Vec<CoinMarket> = self.get_json(&self.markets_url(limit, sort_by, timeframe)).await?;
        get_logger().info(
            LogComponent::Infrastructure("CoinGecko"),
            &format!("Loaded {} markets ({}, {})", coins.len(), sort_by, timeframe),
        );
        Ok(coins)
    }

    /// Search failures degrade to an empty result
    async fn search_markets(&self, query: &str) -> Result<Vec<CoinMarket>, AppError> {
        let lookup = async {
            let ids = self.search_ids(query).await?;
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            self.get_json::<Vec<CoinMarket>>(&self.markets_by_ids_url(&ids)).await
        };

        match lookup.await {
            Ok(coins) => Ok(coins),
            Err(err) => {
                get_logger().warn(
                    LogComponent::Infrastructure("CoinGecko"),
                    &format!("Search for '{query}' failed: {err}"),
                );
                Ok(Vec::new())
            }
        }
    }
}
