use crate::domain::arena::{DEFAULT_MARGIN, DEFAULT_RADIUS_FRACTION};
use serde::{Deserialize, Serialize};

/// Tuning knobs of the bubble simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Per-axis pull toward the arena center
    pub centering_strength: f64,
    /// Charge on a sparse layout (more negative = stronger push)
    pub charge_sparse: f64,
    /// Charge once the layout is dense
    pub charge_dense: f64,
    /// Share of the arena disc covered by bodies at which the layout counts as dense
    pub dense_coverage: f64,
    /// Extra spacing kept between two bodies
    pub collision_buffer: f64,
    pub collision_iterations: usize,
    pub collision_strength: f64,
    pub velocity_decay: f64,
    pub alpha_decay: f64,
    /// Below this alpha every force is scaled down proportionally
    pub alpha_floor: f64,
    /// Alpha target while a bubble is dragged
    pub drag_alpha_target: f64,
    /// Alpha applied after a viewport resize
    pub resize_alpha: f64,
    pub reheat_threshold: f64,
    pub reheat_alpha: f64,
    pub reheat_period_ms: u32,
    pub tick_period_ms: u32,
    /// Pointer must be farther than this from a bubble to attract it
    pub attraction_capture_distance: f64,
    /// Fraction of the bubble-to-pointer vector covered per attraction step
    pub attraction_step: f64,
    pub arena_radius_fraction: f64,
    pub arena_margin: f64,
    /// Seed a refreshed coin at its previous position instead of a random one
    pub carry_over_positions: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            centering_strength: 0.02,
            charge_sparse: -50.0,
            charge_dense: -20.0,
            dense_coverage: 0.5,
            collision_buffer: 2.0,
            collision_iterations: 3,
            collision_strength: 0.7,
            velocity_decay: 0.4,
            alpha_decay: 0.05,
            alpha_floor: 0.001,
            drag_alpha_target: 0.3,
            resize_alpha: 0.3,
            reheat_threshold: 0.2,
            reheat_alpha: 0.15,
            reheat_period_ms: 3_000,
            tick_period_ms: 16,
            attraction_capture_distance: 20.0,
            attraction_step: 0.05,
            arena_radius_fraction: DEFAULT_RADIUS_FRACTION,
            arena_margin: DEFAULT_MARGIN,
            carry_over_positions: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_carry_over(mut self, carry_over: bool) -> Self {
        self.carry_over_positions = carry_over;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"collision_buffer": 4.0, "carry_over_positions": true}"#).unwrap();
        assert_eq!(config.collision_buffer, 4.0);
        assert!(config.carry_over_positions);
        assert_eq!(config.reheat_period_ms, 3_000);
    }
}
