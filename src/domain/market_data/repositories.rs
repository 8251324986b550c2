use crate::domain::errors::AppError;
use crate::domain::market_data::{CoinMarket, NewsArticle, SortBy, Timeframe};

/// Source of market listings (CoinGecko in production, stubs in tests)
#[allow(async_fn_in_trait)]
pub trait MarketDataSource {
    /// Top `limit` coins ordered server-side by `sort_by`
    async fn fetch_markets(
        &self,
        limit: usize,
        sort_by: SortBy,
        timeframe: Timeframe,
    ) -> Result<Vec<CoinMarket>, AppError>;

    /// Market rows for coins matching a free-text query
    async fn search_markets(&self, query: &str) -> Result<Vec<CoinMarket>, AppError>;
}

/// Source of crypto headlines
#[allow(async_fn_in_trait)]
pub trait NewsFeed {
    async fn fetch_news(&self) -> Result<Vec<NewsArticle>, AppError>;
}
