use super::entities::BubbleEntity;
use super::profile::{DeviceProfile, RadiusRange};
use crate::domain::arena::ArenaGeometry;
use crate::domain::geometry::Vec2;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{CoinMarket, SizeBasis, Timeframe};
use crate::domain::random::XorShift64Star;
use crate::log_debug;

/// Turns market records into bubble entities.
///
/// Records past `entity_cap` are dropped before normalization, so the radius
/// scale always spans exactly the bubbles that are shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleMapper {
    pub radius_range: RadiusRange,
    pub entity_cap: usize,
}

impl BubbleMapper {
    pub fn new(radius_range: RadiusRange, entity_cap: usize) -> Self {
        Self { radius_range, entity_cap }
    }

    pub fn for_profile(profile: DeviceProfile) -> Self {
        Self::new(profile.radius_range(), profile.entity_cap())
    }

    /// Entities for the first `entity_cap` records with radius, color and a
    /// random start position inside the arena's bounding box.
    pub fn map(
        &self,
        coins: &[CoinMarket],
        size_basis: SizeBasis,
        timeframe: Timeframe,
        arena: &ArenaGeometry,
        rng: &mut XorShift64Star,
    ) -> Vec<BubbleEntity> {
        let shown = &coins[..coins.len().min(self.entity_cap)];
        if shown.is_empty() {
            return Vec::new();
        }

        let values: Vec<f64> = shown.iter().map(|c| c.size_value(size_basis)).collect();
        let radii = self.radii(&values);
        let (top_left, bottom_right) = arena.bounding_box();

        let entities: Vec<BubbleEntity> = shown
            .iter()
            .zip(radii)
            .map(|(coin, radius)| {
                let position = Vec2::new(
                    rng.next_range(top_left.x, bottom_right.x),
                    rng.next_range(top_left.y, bottom_right.y),
                );
                BubbleEntity::from_market(coin, timeframe, radius, position)
            })
            .collect();

        log_debug!(
            LogComponent::Domain("BubbleMapper"),
            "mapped {} of {} records ({} / {})",
            entities.len(),
            coins.len(),
            size_basis,
            timeframe
        );
        entities
    }

    /// Min-max normalization of `values` into the radius range.
    /// A batch without spread maps every value to the midpoint.
    pub fn radii(&self, values: &[f64]) -> Vec<f64> {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let spread = max - min;
        let range = self.radius_range;

        let scale = move |value: f64| -> f64 {
            if !spread.is_finite() || spread <= 0.0 {
                range.midpoint()
            } else {
                range.clamp(range.lerp((value - min) / spread))
            }
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            values.par_iter().map(|&v| scale(v)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            values.iter().map(|&v| scale(v)).collect()
        }
    }
}

impl Default for BubbleMapper {
    fn default() -> Self {
        Self::for_profile(DeviceProfile::Desktop)
    }
}
