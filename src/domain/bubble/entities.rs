use super::color::{Hsl, color_for_change};
use crate::domain::formatting::format_percentage;
use crate::domain::geometry::Vec2;
use crate::domain::market_data::{CoinId, CoinMarket, ExternalLinks, Timeframe};
use serde::Serialize;

/// Domain entity - one coin as a circular body in the simulation.
///
/// Identity and market fields are fixed for the lifetime of the entity; the
/// kinematic state is owned by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleEntity {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,

    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub change_1h: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,

    pub timeframe: Timeframe,
    pub radius: f64,
    pub color: Hsl,

    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) pin: Option<(Vec2, PinKind)>,
}

/// Origin of a pin point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PinKind {
    /// Held for the whole drag session
    Drag,
    /// Cursor attraction step, released after one tick
    Attraction,
}

impl BubbleEntity {
    /// Builds the entity with color derived from the change of `timeframe`
    pub fn from_market(coin: &CoinMarket, timeframe: Timeframe, radius: f64, position: Vec2) -> Self {
        Self {
            id: coin.id.clone(),
            symbol: coin.symbol.to_uppercase(),
            name: coin.name.clone(),
            image: coin.image.clone(),
            price: coin.current_price,
            market_cap: coin.market_cap,
            volume: coin.total_volume,
            circulating_supply: coin.circulating_supply,
            market_cap_rank: coin.market_cap_rank,
            change_1h: coin.price_change_percentage_1h_in_currency,
            change_24h: coin.price_change_percentage_24h,
            change_7d: coin.price_change_percentage_7d_in_currency,
            timeframe,
            radius,
            color: color_for_change(coin.price_change(timeframe)),
            position,
            velocity: Vec2::ZERO,
            pin: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn pin(&self) -> Option<Vec2> {
        self.pin.map(|(point, _)| point)
    }

    pub fn pin_kind(&self) -> Option<PinKind> {
        self.pin.map(|(_, kind)| kind)
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    pub fn change_for(&self, timeframe: Timeframe) -> Option<f64> {
        match timeframe {
            Timeframe::OneHour => self.change_1h,
            Timeframe::OneDay => self.change_24h,
            Timeframe::SevenDays => self.change_7d,
        }
    }

    /// Change for the entity's own timeframe, missing read as 0
    pub fn change(&self) -> f64 {
        self.change_for(self.timeframe).filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn change_label(&self) -> String {
        format_percentage(self.change())
    }

    pub fn links(&self) -> ExternalLinks {
        ExternalLinks::for_coin(&self.id, &self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_change_reads_as_flat() {
        let coin = CoinMarket::new("tether", "usdt", "Tether");
        let bubble = BubbleEntity::from_market(&coin, Timeframe::SevenDays, 20.0, Vec2::ZERO);
        assert_eq!(bubble.change(), 0.0);
        assert_eq!(bubble.change_label(), "0.00%");
        assert_eq!(bubble.color, color_for_change(0.0));
        assert_eq!(bubble.symbol, "USDT");
        assert!(!bubble.is_pinned());
    }
}
