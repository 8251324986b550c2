pub use super::value_objects::{CoinId, SizeBasis, Timeframe};
use serde::{Deserialize, Serialize};

/// Domain entity - one row of the CoinGecko `/coins/markets` listing.
///
/// Every numeric field is optional: the API returns `null` for freshly listed
/// coins and omits the `_in_currency` changes unless they were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
}

impl CoinMarket {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CoinId::new(id),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
            total_volume: None,
            circulating_supply: None,
            price_change_percentage_24h: None,
            price_change_percentage_1h_in_currency: None,
            price_change_percentage_7d_in_currency: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.total_volume = Some(volume);
        self
    }

    pub fn with_change(mut self, timeframe: Timeframe, percentage: f64) -> Self {
        match timeframe {
            Timeframe::OneHour => self.price_change_percentage_1h_in_currency = Some(percentage),
            Timeframe::OneDay => self.price_change_percentage_24h = Some(percentage),
            Timeframe::SevenDays => self.price_change_percentage_7d_in_currency = Some(percentage),
        }
        self
    }

    /// Raw change for the window, `None` when the API did not send it
    pub fn change_for(&self, timeframe: Timeframe) -> Option<f64> {
        match timeframe {
            Timeframe::OneHour => self.price_change_percentage_1h_in_currency,
            Timeframe::OneDay => self.price_change_percentage_24h,
            Timeframe::SevenDays => self.price_change_percentage_7d_in_currency,
        }
    }

    /// Change for the window with absent or non-finite values read as 0
    pub fn price_change(&self, timeframe: Timeframe) -> f64 {
        self.change_for(timeframe).filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Value of the size basis, absent or non-finite values read as 0
    pub fn size_value(&self, basis: SizeBasis) -> f64 {
        let raw = match basis {
            SizeBasis::MarketCap => self.market_cap,
            SizeBasis::Volume => self.total_volume,
        };
        raw.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn is_gainer(&self, timeframe: Timeframe) -> bool {
        self.price_change(timeframe) > 0.0
    }

    pub fn is_loser(&self, timeframe: Timeframe) -> bool {
        self.price_change(timeframe) < 0.0
    }
}

/// External pages for a coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLinks {
    pub coin_gecko: String,
    pub coin_market_cap: String,
    pub trading_view: String,
}

impl ExternalLinks {
    pub fn for_coin(id: &CoinId, symbol: &str) -> Self {
        Self {
            coin_gecko: format!("https://www.coingecko.com/en/coins/{}", id.as_str()),
            coin_market_cap: format!("https://coinmarketcap.com/currencies/{}", id.as_str()),
            trading_view: format!(
                "https://www.tradingview.com/symbols/{}USD/",
                symbol.to_uppercase()
            ),
        }
    }
}

/// Domain entity - crypto news article as delivered by NewsAPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage", default)]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub source: NewsSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_markets_row_with_nulls() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/btc.png",
            "current_price": 64000.5,
            "market_cap": 1260000000000,
            "market_cap_rank": 1,
            "total_volume": null,
            "price_change_percentage_24h": -1.25,
            "last_updated": "2024-05-01T10:00:00.000Z"
        }"#;
        let coin: CoinMarket = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, CoinId::from("bitcoin"));
        assert_eq!(coin.size_value(SizeBasis::Volume), 0.0);
        assert_eq!(coin.price_change(Timeframe::OneDay), -1.25);
        assert_eq!(coin.price_change(Timeframe::OneHour), 0.0);
        assert!(coin.is_loser(Timeframe::OneDay));
    }

    #[test]
    fn external_links_use_id_and_upper_symbol() {
        let links = ExternalLinks::for_coin(&CoinId::from("ethereum"), "eth");
        assert_eq!(links.coin_gecko, "https://www.coingecko.com/en/coins/ethereum");
        assert_eq!(links.coin_market_cap, "https://coinmarketcap.com/currencies/ethereum");
        assert_eq!(links.trading_view, "https://www.tradingview.com/symbols/ETHUSD/");
    }
}
