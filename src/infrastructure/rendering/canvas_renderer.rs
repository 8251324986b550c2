use crate::domain::{
    errors::{AppError, RenderingResult},
    geometry::Vec2,
    logging::{LogComponent, get_logger},
    market_data::CoinId,
    simulation::{BubbleSnapshot, SimulationEngine},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

const BACKGROUND: &str = "hsl(225, 25%, 8%)";
const ARENA_OUTLINE: &str = "hsla(225, 20%, 40%, 0.35)";
const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.9)";
const HOVER_SCALE: f64 = 1.1;
const MAX_SYMBOL_FONT: f64 = 18.0;
/// Bubbles smaller than this skip the percentage line
const MIN_RADIUS_FOR_CHANGE: f64 = 25.0;

/// Canvas 2D drawing of the bubble chart - Infrastructure implementation.
///
/// Stateless between frames: every call paints a full frame from the
/// engine's current snapshot.
pub struct BubbleCanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl BubbleCanvasRenderer {
    pub fn from_canvas_id(canvas_id: &str) -> RenderingResult<Self> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| AppError::RenderingError(format!("Canvas '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError(format!("Element '{canvas_id}' is not a canvas")))?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| AppError::RenderingError("Failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::RenderingError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;
        let (width, height) = (canvas.width(), canvas.height());
        Ok(Self { canvas, context, width, height })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("Canvas resized to {width}x{height}"),
        );
    }

    /// Pointer position in canvas pixels, corrected for CSS scaling
    pub fn pointer_position(&self, event: &MouseEvent) -> Vec2 {
        let client_w = self.canvas.client_width().max(1) as f64;
        let client_h = self.canvas.client_height().max(1) as f64;
        Vec2::new(
            event.offset_x() as f64 * self.width as f64 / client_w,
            event.offset_y() as f64 * self.height as f64 / client_h,
        )
    }

    pub fn render(&self, engine: &SimulationEngine, hovered: Option<&CoinId>) -> RenderingResult<()> {
        let ctx = &self.context;
        let (w, h) = (self.width as f64, self.height as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
        ctx.fill_rect(0.0, 0.0, w, h);

        self.render_arena(engine.arena().vertices());
        for bubble in engine.snapshot() {
            let emphasized = hovered == Some(&bubble.id) || bubble.pinned;
            self.render_bubble(&bubble, emphasized)?;
        }
        Ok(())
    }

    fn render_arena(&self, vertices: &[Vec2]) {
        let Some((first, rest)) = vertices.split_first() else {
            return;
        };
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for v in rest {
            ctx.line_to(v.x, v.y);
        }
        ctx.close_path();
        ctx.set_line_width(1.0);
        ctx.set_stroke_style(&JsValue::from_str(ARENA_OUTLINE));
        ctx.stroke();
    }

    fn render_bubble(&self, bubble: &BubbleSnapshot, emphasized: bool) -> RenderingResult<()> {
        let ctx = &self.context;
        let radius = if emphasized { bubble.radius * HOVER_SCALE } else { bubble.radius };

        ctx.set_global_alpha(if emphasized { 1.0 } else { 0.8 });
        ctx.begin_path();
        ctx.arc(bubble.x, bubble.y, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| AppError::RenderingError(format!("arc failed: {e:?}")))?;
        ctx.set_line_width(if emphasized { 3.0 } else { 2.0 });
        ctx.set_stroke_style(&JsValue::from_str(&bubble.color));
        ctx.stroke();
        ctx.set_global_alpha(1.0);

        let font_size = symbol_font_size(bubble.radius);
        ctx.set_fill_style(&JsValue::from_str(LABEL_COLOR));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font(&format!("bold {font_size:.0}px monospace"));

        if bubble.radius >= MIN_RADIUS_FOR_CHANGE {
            ctx.fill_text(&bubble.symbol, bubble.x, bubble.y - font_size * 0.4)
                .map_err(|e| AppError::RenderingError(format!("fill_text failed: {e:?}")))?;
            ctx.set_font(&format!("{:.0}px monospace", font_size * 0.7));
            ctx.set_fill_style(&JsValue::from_str(&bubble.color));
            ctx.fill_text(&bubble.change_label, bubble.x, bubble.y + font_size * 0.6)
                .map_err(|e| AppError::RenderingError(format!("fill_text failed: {e:?}")))?;
        } else {
            ctx.fill_text(&bubble.symbol, bubble.x, bubble.y)
                .map_err(|e| AppError::RenderingError(format!("fill_text failed: {e:?}")))?;
        }
        Ok(())
    }
}

/// Symbol label size: half the radius, capped
pub fn symbol_font_size(radius: f64) -> f64 {
    (radius / 2.0).min(MAX_SYMBOL_FONT)
}

/// Topmost bubble under `point`. Later snapshots are drawn on top.
pub fn hit_test<'a>(bubbles: &'a [BubbleSnapshot], point: Vec2) -> Option<&'a BubbleSnapshot> {
    bubbles
        .iter()
        .rev()
        .find(|b| Vec2::new(b.x, b.y).distance(point) <= b.radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(id: &str, x: f64, y: f64, radius: f64) -> BubbleSnapshot {
        BubbleSnapshot {
            id: CoinId::from(id),
            symbol: id.to_uppercase(),
            x,
            y,
            radius,
            color: "hsl(45, 93%, 47%)".to_string(),
            change_label: "0.00%".to_string(),
            pinned: false,
        }
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let bubbles = [snap("a", 100.0, 100.0, 30.0), snap("b", 120.0, 100.0, 30.0)];
        assert_eq!(hit_test(&bubbles, Vec2::new(110.0, 100.0)).map(|b| b.id.as_str()), Some("b"));
        assert_eq!(hit_test(&bubbles, Vec2::new(75.0, 100.0)).map(|b| b.id.as_str()), Some("a"));
        assert!(hit_test(&bubbles, Vec2::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn font_is_capped() {
        assert_eq!(symbol_font_size(20.0), 10.0);
        assert_eq!(symbol_font_size(100.0), 18.0);
    }
}
