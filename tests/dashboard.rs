use crypto_bubbles_wasm::application::{DashboardOptions, DashboardState, load_markets};
use crypto_bubbles_wasm::domain::{
    arena::ArenaGeometry,
    bubble::BubbleMapper,
    errors::AppError,
    market_data::{CoinMarket, MarketDataSource, MarketFilter, MarketStats, SortBy, Timeframe},
    random::XorShift64Star,
};
use futures::executor::block_on;
use std::cell::RefCell;

#[derive(Default)]
struct StubSource {
    markets: Vec<CoinMarket>,
    offline: bool,
    calls: RefCell<Vec<String>>,
}

impl MarketDataSource for StubSource {
    async fn fetch_markets(
        &self,
        limit: usize,
        sort_by: SortBy,
        timeframe: Timeframe,
    ) -> Result<Vec<CoinMarket>, AppError> {
        self.calls.borrow_mut().push(format!("markets:{limit}:{}:{timeframe}", sort_by.order_param()));
        if self.offline {
            return Err(AppError::NetworkError("offline".to_string()));
        }
        Ok(self.markets.iter().take(limit).cloned().collect())
    }

    async fn search_markets(&self, query: &str) -> Result<Vec<CoinMarket>, AppError> {
        self.calls.borrow_mut().push(format!("search:{query}"));
        let query = query.to_lowercase();
        Ok(self.markets.iter().filter(|c| c.name.to_lowercase().contains(&query)).cloned().collect())
    }
}

fn stub() -> StubSource {
    StubSource {
        markets: vec![
            CoinMarket::new("bitcoin", "btc", "Bitcoin")
                .with_price(64_000.0)
                .with_market_cap(1.2e12)
                .with_change(Timeframe::OneDay, 2.1),
            CoinMarket::new("ethereum", "eth", "Ethereum").with_market_cap(4.0e11).with_change(Timeframe::OneDay, -1.4),
            CoinMarket::new("tether", "usdt", "Tether").with_market_cap(1.1e11),
            CoinMarket::new("solana", "sol", "Solana").with_market_cap(8.0e10).with_change(Timeframe::OneDay, 6.3),
        ],
        ..Default::default()
    }
}

#[test]
fn listing_uses_limit_and_selectors() {
    let source = stub();
    let options = DashboardOptions { limit: 3, ..Default::default() };

    let coins = block_on(load_markets(&source, &MarketFilter::default(), &options)).unwrap();

    assert_eq!(coins.len(), 3);
    assert_eq!(source.calls.borrow().as_slice(), ["markets:3:market_cap_desc:24h"]);
}

#[test]
fn search_query_replaces_listing_request() {
    let source = stub();
    let filter = MarketFilter { search_query: "  sol ".to_string(), ..Default::default() };

    let coins = block_on(load_markets(&source, &filter, &DashboardOptions::default())).unwrap();

    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0].id.as_str(), "solana");
    assert_eq!(source.calls.borrow().as_slice(), ["search:sol"]);
}

#[test]
fn direction_filter_applies_to_loaded_listing() {
    let source = stub();
    let mut filter = MarketFilter::default();
    filter.toggle_gainers();

    let coins = block_on(load_markets(&source, &filter, &DashboardOptions::default())).unwrap();
    let ids: Vec<&str> = coins.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["bitcoin", "solana"]);
}

#[test]
fn failed_refresh_keeps_previous_listing() {
    let mut state = DashboardState::new(MarketFilter::default());
    state.begin_loading();
    state.absorb(block_on(load_markets(&stub(), &state.filter, &DashboardOptions::default())), 1_000);
    assert_eq!(state.coins().len(), 4);
    assert_eq!(state.last_updated(), Some(1_000));
    assert_eq!(state.stats(), MarketStats { total: 4, gainers: 2, losers: 1 });

    let offline = StubSource { offline: true, ..stub() };
    state.begin_loading();
    assert!(state.is_loading());
    state.absorb(block_on(load_markets(&offline, &state.filter, &DashboardOptions::default())), 2_000);

    assert!(!state.is_loading());
    assert_eq!(state.coins().len(), 4);
    assert_eq!(state.last_updated(), Some(1_000));
    assert_eq!(state.error(), Some("Network Error: offline"));

    state.begin_loading();
    assert_eq!(state.error(), None);
}

#[test]
fn state_maps_listing_to_bubbles() {
    let mut state = DashboardState::new(MarketFilter::default());
    state.absorb(block_on(load_markets(&stub(), &state.filter, &DashboardOptions::default())), 1);

    let arena = ArenaGeometry::from_viewport(1280.0, 720.0);
    let bubbles = state.bubbles(&BubbleMapper::default(), &arena, &mut XorShift64Star::new(11));

    assert_eq!(bubbles.len(), 4);
    assert_eq!(bubbles[0].symbol, "BTC");
    assert_eq!(bubbles[0].price, Some(64_000.0));
    assert_eq!(bubbles[0].radius, 100.0);
    assert_eq!(bubbles[3].radius, 15.0);
}
