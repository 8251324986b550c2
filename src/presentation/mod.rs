pub mod chart_view;
pub mod wasm_api;

pub use chart_view::BubbleChartView;
pub use wasm_api::CryptoBubblesApi;
