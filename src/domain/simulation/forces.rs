//! Force kernels. Each one reads the entity slice and a [`ForceContext`] and
//! returns one contribution per entity; the engine decides how to apply it.

use super::config::SimulationConfig;
use crate::domain::arena::ArenaGeometry;
use crate::domain::bubble::BubbleEntity;
use crate::domain::geometry::Vec2;

/// Golden angle in radians; spreads tie-break directions evenly
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Per-tick inputs shared by all force kernels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    pub center: Vec2,
    pub bounding_radius: f64,
    pub alpha: f64,
    /// 1 above the alpha floor, proportionally less below it
    pub settle: f64,
    pub config: SimulationConfig,
}

impl ForceContext {
    pub fn new(arena: &ArenaGeometry, alpha: f64, config: SimulationConfig) -> Self {
        let settle = if config.alpha_floor > 0.0 {
            (alpha / config.alpha_floor).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            center: arena.center(),
            bounding_radius: arena.bounding_radius(),
            alpha,
            settle,
            config,
        }
    }

    /// Scale applied to the velocity forces
    pub fn intensity(&self) -> f64 {
        self.alpha * self.settle
    }

    /// Center distance two bodies must keep
    pub fn min_distance(&self, a: &BubbleEntity, b: &BubbleEntity) -> f64 {
        a.radius + b.radius + self.config.collision_buffer
    }
}

/// Velocity change pulling every body toward the center, per axis
pub fn centering(entities: &[BubbleEntity], ctx: &ForceContext) -> Vec<Vec2> {
    let k = ctx.config.centering_strength * ctx.intensity();
    entities.iter().map(|e| (ctx.center - e.position) * k).collect()
}

/// Charge eased from sparse to dense by the share of the arena disc covered
pub fn charge_strength(entities: &[BubbleEntity], ctx: &ForceContext) -> f64 {
    let cfg = &ctx.config;
    let covered: f64 = entities.iter().map(|e| e.radius * e.radius).sum();
    let coverage = if ctx.bounding_radius > 0.0 {
        covered / (ctx.bounding_radius * ctx.bounding_radius)
    } else {
        1.0
    };
    let t = if cfg.dense_coverage > 0.0 { (coverage / cfg.dense_coverage).clamp(0.0, 1.0) } else { 1.0 };
    cfg.charge_sparse + (cfg.charge_dense - cfg.charge_sparse) * t
}

/// Pairwise inverse-distance push. Pairs already within collision distance
/// are left to [`collision_step`].
pub fn repulsion(entities: &[BubbleEntity], ctx: &ForceContext) -> Vec<Vec2> {
    let mut dv = vec![Vec2::ZERO; entities.len()];
    let strength = charge_strength(entities, ctx) * ctx.intensity();

    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            let (a, b) = (&entities[i], &entities[j]);
            let delta = b.position - a.position;
            let l2 = delta.length_squared();
            let min_distance = ctx.min_distance(a, b);
            if l2 == 0.0 || l2 < min_distance * min_distance {
                continue;
            }
            let push = delta * (strength / l2);
            dv[i] += push;
            dv[j] -= push;
        }
    }
    dv
}

/// One relaxation pass over overlapping pairs, returning position
/// corrections. Each side moves in proportion to the other's area; pinned
/// bodies do not move.
pub fn collision_step(entities: &[BubbleEntity], ctx: &ForceContext) -> Vec<Vec2> {
    let mut dp = vec![Vec2::ZERO; entities.len()];
    let strength = ctx.config.collision_strength * ctx.settle;

    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            let (a, b) = (&entities[i], &entities[j]);
            let delta = b.position - a.position;
            let distance = delta.length();
            let min_distance = ctx.min_distance(a, b);
            if distance.is_nan() || distance >= min_distance {
                continue;
            }

            let direction = if distance > 0.0 { delta * (1.0 / distance) } else { tie_break_direction(i, j) };
            let overlap = (min_distance - distance) * strength;

            let weight_a = if a.is_pinned() { 0.0 } else { b.radius * b.radius };
            let weight_b = if b.is_pinned() { 0.0 } else { a.radius * a.radius };
            let total = weight_a + weight_b;
            if total <= 0.0 {
                continue;
            }

            dp[i] -= direction * (overlap * weight_a / total);
            dp[j] += direction * (overlap * weight_b / total);
        }
    }
    dp
}

/// Fixed unit direction for a coincident pair `(i, j)`
pub fn tie_break_direction(i: usize, j: usize) -> Vec2 {
    let seed = (i as f64) * 31.0 + (j as f64) * 17.0 + 1.0;
    Vec2::from_angle(GOLDEN_ANGLE * seed, 1.0)
}
