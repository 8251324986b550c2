pub mod color;
pub mod entities;
pub mod mapper;
pub mod profile;

pub use color::*;
pub use entities::*;
pub use mapper::*;
pub use profile::*;
