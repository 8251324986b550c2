//! Bubble layout simulation: configuration, force kernels and the engine.

pub mod config;
pub mod engine;
pub mod forces;
pub mod snapshot;

pub use config::SimulationConfig;
pub use engine::{EngineDirective, SimulationEngine};
pub use forces::ForceContext;
pub use snapshot::BubbleSnapshot;
