pub mod dashboard;
pub mod runtime;

pub use dashboard::*;
pub use runtime::*;
