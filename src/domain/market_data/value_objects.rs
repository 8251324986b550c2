use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - stable coin identifier (CoinGecko id, e.g. `bitcoin`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CoinId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value Object - percentage-change window driving bubble color
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum Timeframe {
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,

    #[default]
    #[strum(serialize = "24h")]
    #[serde(rename = "24h")]
    OneDay,

    #[strum(serialize = "7d")]
    #[serde(rename = "7d")]
    SevenDays,
}

impl Timeframe {
    /// `price_change_percentage` query value requested from CoinGecko
    pub fn price_change_param(&self) -> &'static str {
        match self {
            Self::OneHour => "1h,24h,7d",
            Self::OneDay => "24h,7d",
            Self::SevenDays => "7d,24h",
        }
    }
}

/// Value Object - metric that drives bubble radius
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum SizeBasis {
    #[default]
    #[strum(serialize = "market_cap")]
    #[serde(rename = "market_cap")]
    MarketCap,

    #[strum(serialize = "volume")]
    #[serde(rename = "volume")]
    Volume,
}

impl SizeBasis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketCap => "Market Cap",
            Self::Volume => "Volume",
        }
    }
}

/// Value Object - server-side ordering of the market listing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum SortBy {
    #[default]
    #[strum(serialize = "market_cap")]
    #[serde(rename = "market_cap")]
    MarketCap,

    #[strum(serialize = "volume")]
    #[serde(rename = "volume")]
    Volume,

    #[strum(serialize = "price_change_24h")]
    #[serde(rename = "price_change_24h")]
    PriceChange24h,
}

impl SortBy {
    /// CoinGecko `order` parameter
    pub fn order_param(&self) -> String {
        format!("{}_desc", self.as_ref())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketCap => "Market Cap",
            Self::Volume => "Volume",
            Self::PriceChange24h => "24h Change",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn selectors_parse_from_wire_strings() {
        assert_eq!(Timeframe::from_str("7d").unwrap(), Timeframe::SevenDays);
        assert_eq!(SizeBasis::from_str("volume").unwrap(), SizeBasis::Volume);
        assert_eq!(SortBy::from_str("price_change_24h").unwrap(), SortBy::PriceChange24h);
        assert!(Timeframe::from_str("30d").is_err());
    }

    #[test]
    fn price_change_params_follow_timeframe() {
        assert_eq!(Timeframe::OneHour.price_change_param(), "1h,24h,7d");
        assert_eq!(Timeframe::OneDay.price_change_param(), "24h,7d");
        assert_eq!(Timeframe::SevenDays.price_change_param(), "7d,24h");
        assert_eq!(SortBy::Volume.order_param(), "volume_desc");
    }
}
