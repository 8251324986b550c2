use super::config::SimulationConfig;
use super::forces::{self, ForceContext};
use super::snapshot::BubbleSnapshot;
use crate::domain::arena::ArenaGeometry;
use crate::domain::bubble::{BubbleEntity, PinKind};
use crate::domain::geometry::Vec2;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::CoinId;
use crate::{log_debug, log_info};
use std::collections::{HashMap, VecDeque};

/// Messages applied at the start of the next tick
#[derive(Debug, Clone, PartialEq)]
pub enum EngineDirective {
    /// `Some` pins the bubble for a drag session, `None` releases it
    SetPin { id: CoinId, point: Option<Vec2> },
    /// Pin for a single tick; ignored while the bubble is dragged
    Attract { id: CoinId, target: Vec2 },
    ClearAttraction { id: CoinId },
    SetAlphaTarget(f64),
}

/// Force-directed layout of the bubble set.
///
/// Per tick: pending directives, centering and repulsion velocities,
/// integration (pinned bodies sit on their pin), collision relaxation, arena
/// clamp for every body not held by a drag, then alpha moves toward its target.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    arena: ArenaGeometry,
    config: SimulationConfig,
    entities: Vec<BubbleEntity>,
    pending: VecDeque<EngineDirective>,
    alpha: f64,
    alpha_target: f64,
    tick_count: u64,
}

impl SimulationEngine {
    pub fn new(arena: ArenaGeometry, config: SimulationConfig) -> Self {
        Self {
            arena,
            config,
            entities: Vec::new(),
            pending: VecDeque::new(),
            alpha: 1.0,
            alpha_target: 0.0,
            tick_count: 0,
        }
    }

    /// Engine over a `width` x `height` viewport
    pub fn for_viewport(width: f64, height: f64, config: SimulationConfig) -> Self {
        let arena = ArenaGeometry::new(width, height, config.arena_radius_fraction, config.arena_margin);
        Self::new(arena, config)
    }

    /// Swaps in a freshly mapped entity set and restarts at full energy.
    /// With `carry_over_positions` a coin that was already shown keeps its place.
    pub fn replace_entities(&mut self, mut entities: Vec<BubbleEntity>) {
        if self.config.carry_over_positions && !self.entities.is_empty() {
            let previous: HashMap<&CoinId, (Vec2, Vec2)> = self
                .entities
                .iter()
                .map(|e| (&e.id, (e.position, e.velocity)))
                .collect();
            for entity in &mut entities {
                if let Some(&(position, velocity)) = previous.get(&entity.id) {
                    entity.position = position;
                    entity.velocity = velocity;
                }
            }
        }

        log_info!(
            LogComponent::Domain("Simulation"),
            "entity set replaced: {} -> {} bubbles",
            self.entities.len(),
            entities.len()
        );
        self.entities = entities;
        self.alpha = 1.0;
    }

    /// Rebinds the arena to a new viewport and nudges the layout awake.
    /// The entity set is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.arena = ArenaGeometry::new(width, height, self.config.arena_radius_fraction, self.config.arena_margin);
        self.alpha = self.config.resize_alpha;
        log_info!(
            LogComponent::Domain("Simulation"),
            "arena rebound to {}x{} (radius {:.1})",
            self.arena.width(),
            self.arena.height(),
            self.arena.bounding_radius()
        );
    }

    pub fn enqueue(&mut self, directive: EngineDirective) {
        self.pending.push_back(directive);
    }

    pub fn pending_directives(&self) -> impl Iterator<Item = &EngineDirective> {
        self.pending.iter()
    }

    /// Advances the layout one step. Returns `false` when there was nothing
    /// to simulate.
    pub fn tick(&mut self) -> bool {
        self.apply_directives();
        if self.entities.is_empty() {
            return false;
        }

        let ctx = ForceContext::new(&self.arena, self.alpha, self.config);

        let centering = forces::centering(&self.entities, &ctx);
        let repulsion = forces::repulsion(&self.entities, &ctx);
        let keep = 1.0 - self.config.velocity_decay;
        for ((entity, dc), dr) in self.entities.iter_mut().zip(centering).zip(repulsion) {
            match entity.pin() {
                Some(point) => {
                    entity.position = point;
                    entity.velocity = Vec2::ZERO;
                }
                None => {
                    entity.velocity = (entity.velocity + dc + dr) * keep;
                    entity.position += entity.velocity;
                }
            }
        }

        for _ in 0..self.config.collision_iterations {
            let corrections = forces::collision_step(&self.entities, &ctx);
            for (entity, dp) in self.entities.iter_mut().zip(corrections) {
                entity.position += dp;
            }
        }

        for entity in self.entities.iter_mut().filter(|e| e.pin_kind() != Some(PinKind::Drag)) {
            if !entity.position.is_finite() || !entity.velocity.is_finite() {
                entity.position = self.arena.center();
                entity.velocity = Vec2::ZERO;
            }
            if let Some(corrected) = self.arena.correction(entity.position, entity.radius) {
                entity.position = corrected;
            }
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        self.release_attraction_pins();
        self.tick_count += 1;
        true
    }

    /// Re-injects energy into a layout that has gone quiet. Returns `true`
    /// when alpha was raised.
    pub fn reheat_if_idle(&mut self) -> bool {
        if self.entities.is_empty() || self.alpha >= self.config.reheat_threshold {
            return false;
        }
        log_debug!(
            LogComponent::Domain("Simulation"),
            "reheat: alpha {:.4} -> {}",
            self.alpha,
            self.config.reheat_alpha
        );
        self.alpha = self.config.reheat_alpha;
        true
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn arena(&self) -> &ArenaGeometry {
        &self.arena
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn entities(&self) -> &[BubbleEntity] {
        &self.entities
    }

    pub fn entity(&self, id: &CoinId) -> Option<&BubbleEntity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn snapshot(&self) -> Vec<BubbleSnapshot> {
        self.entities.iter().map(BubbleSnapshot::from).collect()
    }

    fn apply_directives(&mut self) {
        while let Some(directive) = self.pending.pop_front() {
            match directive {
                EngineDirective::SetAlphaTarget(target) => {
                    if target.is_finite() {
                        self.alpha_target = target.clamp(0.0, 1.0);
                    }
                }
                EngineDirective::SetPin { id, point } => {
                    let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
                        log_debug!(LogComponent::Domain("Simulation"), "pin for missing bubble {} dropped", id);
                        continue;
                    };
                    entity.pin = point.filter(Vec2::is_finite).map(|p| (p, PinKind::Drag));
                }
                EngineDirective::Attract { id, target } => {
                    if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
                        if entity.pin_kind() != Some(PinKind::Drag) && target.is_finite() {
                            entity.pin = Some((target, PinKind::Attraction));
                        }
                    }
                }
                EngineDirective::ClearAttraction { id } => {
                    if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
                        if entity.pin_kind() == Some(PinKind::Attraction) {
                            entity.pin = None;
                        }
                    }
                }
            }
        }
    }

    fn release_attraction_pins(&mut self) {
        for entity in &mut self.entities {
            if entity.pin_kind() == Some(PinKind::Attraction) {
                entity.pin = None;
            }
        }
    }
}
