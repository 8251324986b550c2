pub mod canvas_renderer;

pub use canvas_renderer::{BubbleCanvasRenderer, hit_test, symbol_font_size};
