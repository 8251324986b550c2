use crate::domain::{
    arena::ArenaGeometry,
    bubble::{BubbleEntity, BubbleMapper},
    errors::AppError,
    logging::LogComponent,
    market_data::{CoinMarket, MarketDataSource, MarketFilter, MarketStats, market_stats},
    random::XorShift64Star,
};
use crate::{log_info, log_warn};

/// Fetch and refresh settings of the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardOptions {
    pub limit: usize,
    pub auto_refresh: bool,
    pub refresh_interval_ms: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self { limit: 100, auto_refresh: true, refresh_interval_ms: 30_000 }
    }
}

/// Fetches the listing for the current filter: a search when a query is set,
/// otherwise the top `limit` coins. Direction filters and local ordering are
/// applied to the result.
pub async fn load_markets<S: MarketDataSource>(
    source: &S,
    filter: &MarketFilter,
    options: &DashboardOptions,
) -> Result<Vec<CoinMarket>, AppError> {
    let raw = match filter.search() {
        Some(query) => source.search_markets(query).await?,
        None => source.fetch_markets(options.limit, filter.sort_by, filter.timeframe).await?,
    };
    let fetched = raw.len();
    let kept = filter.apply(raw);
    log_info!(
        LogComponent::Application("Dashboard"),
        "loaded {} coins, {} after filters",
        fetched,
        kept.len()
    );
    Ok(kept)
}

/// Listing currently on screen plus request bookkeeping
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub filter: MarketFilter,
    coins: Vec<CoinMarket>,
    error: Option<String>,
    loading: bool,
    last_updated: Option<u64>,
}

impl DashboardState {
    pub fn new(filter: MarketFilter) -> Self {
        Self { filter, ..Default::default() }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Stores a finished request. A failure keeps the previous listing.
    pub fn absorb(&mut self, result: Result<Vec<CoinMarket>, AppError>, now_ms: u64) {
        self.loading = false;
        match result {
            Ok(coins) => {
                self.coins = coins;
                self.last_updated = Some(now_ms);
            }
            Err(err) => {
                log_warn!(LogComponent::Application("Dashboard"), "refresh failed: {}", err);
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn coins(&self) -> &[CoinMarket] {
        &self.coins
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_updated(&self) -> Option<u64> {
        self.last_updated
    }

    pub fn stats(&self) -> MarketStats {
        market_stats(&self.coins, self.filter.timeframe)
    }

    /// Bubble entities for the listing under the current size basis and timeframe
    pub fn bubbles(&self, mapper: &BubbleMapper, arena: &ArenaGeometry, rng: &mut XorShift64Star) -> Vec<BubbleEntity> {
        mapper.map(&self.coins, self.filter.size_basis, self.filter.timeframe, arena, rng)
    }
}
