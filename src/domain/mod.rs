//! Browser-free core: market records, bubble mapping, arena, simulation and
//! pointer interaction. Everything here runs natively under `cargo test`.

pub mod arena;
pub mod bubble;
pub mod errors;
pub mod formatting;
pub mod geometry;
pub mod interaction;
pub mod logging;
pub mod market_data;
pub mod random;
pub mod simulation;
