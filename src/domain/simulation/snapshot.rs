use crate::domain::bubble::BubbleEntity;
use crate::domain::market_data::CoinId;
use serde::Serialize;

/// Plain per-bubble drawing data handed to the render adapter after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleSnapshot {
    pub id: CoinId,
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub change_label: String,
    pub pinned: bool,
}

impl From<&BubbleEntity> for BubbleSnapshot {
    fn from(entity: &BubbleEntity) -> Self {
        let position = entity.position();
        Self {
            id: entity.id.clone(),
            symbol: entity.symbol.clone(),
            x: position.x,
            y: position.y,
            radius: entity.radius,
            color: entity.color.css(),
            change_label: entity.change_label(),
            pinned: entity.is_pinned(),
        }
    }
}
