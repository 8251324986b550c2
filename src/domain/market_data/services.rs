use super::entities::CoinMarket;
use super::value_objects::{SizeBasis, SortBy, Timeframe};

/// User-selected view over the market listing.
///
/// Gainers-only and losers-only are mutually exclusive: toggling one clears
/// the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketFilter {
    pub timeframe: Timeframe,
    pub sort_by: SortBy,
    pub size_basis: SizeBasis,
    pub search_query: String,
    pub only_gainers: bool,
    pub only_losers: bool,
}

impl MarketFilter {
    pub fn toggle_gainers(&mut self) {
        self.only_gainers = !self.only_gainers;
        self.only_losers = false;
    }

    pub fn toggle_losers(&mut self) {
        self.only_losers = !self.only_losers;
        self.only_gainers = false;
    }

    /// Drops direction filters and the search query, keeps the selectors
    pub fn clear(&mut self) {
        self.only_gainers = false;
        self.only_losers = false;
        self.search_query.clear();
    }

    /// Trimmed search query, `None` when blank
    pub fn search(&self) -> Option<&str> {
        let query = self.search_query.trim();
        (!query.is_empty()).then_some(query)
    }

    pub fn accepts(&self, coin: &CoinMarket) -> bool {
        if self.only_gainers {
            coin.is_gainer(self.timeframe)
        } else if self.only_losers {
            coin.is_loser(self.timeframe)
        } else {
            true
        }
    }

    /// Applies direction filters and the local ordering
    pub fn apply(&self, coins: Vec<CoinMarket>) -> Vec<CoinMarket> {
        let mut kept: Vec<CoinMarket> = coins.into_iter().filter(|c| self.accepts(c)).collect();
        sort_coins(&mut kept, self.sort_by);
        kept
    }
}

/// Descending order by the selected metric; missing values sink to the end.
/// The sort is stable so API order breaks ties.
pub fn sort_coins(coins: &mut [CoinMarket], sort_by: SortBy) {
    let key = |coin: &CoinMarket| -> f64 {
        let value = match sort_by {
            SortBy::MarketCap => coin.market_cap,
            SortBy::Volume => coin.total_volume,
            SortBy::PriceChange24h => coin.price_change_percentage_24h,
        };
        value.filter(|v| v.is_finite()).unwrap_or(f64::NEG_INFINITY)
    };
    coins.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketStats {
    pub total: usize,
    pub gainers: usize,
    pub losers: usize,
}

pub fn market_stats(coins: &[CoinMarket], timeframe: Timeframe) -> MarketStats {
    MarketStats {
        total: coins.len(),
        gainers: coins.iter().filter(|c| c.is_gainer(timeframe)).count(),
        losers: coins.iter().filter(|c| c.is_loser(timeframe)).count(),
    }
}
