pub mod coingecko_client;
pub mod news_client;

pub use coingecko_client::CoinGeckoClient;
pub use news_client::{NewsApiClient, save_api_key, stored_api_key};
