//! Browser adapters: REST clients, canvas rendering, console logging.

pub mod http;
pub mod rendering;
pub mod services;
