use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::chart_view::BubbleChartView;
use crate::domain::{
    bubble::{BubbleMapper, DeviceProfile},
    errors::AppError,
    interaction::InteractionOutput,
    logging::{LogComponent, get_logger},
    market_data::{MarketDataSource, SizeBasis, SortBy, Timeframe},
    random::XorShift64Star,
    simulation::SimulationConfig,
};
use crate::infrastructure::{http::CoinGeckoClient, rendering::BubbleCanvasRenderer};

/// Bubble chart for embedding from plain JavaScript
#[wasm_bindgen]
pub struct CryptoBubblesApi {
    view: Rc<RefCell<BubbleChartView>>,
    client: CoinGeckoClient,
}

#[wasm_bindgen]
impl CryptoBubblesApi {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String) -> Result<CryptoBubblesApi, JsValue> {
        let renderer = BubbleCanvasRenderer::from_canvas_id(&canvas_id)?;
        let view = BubbleChartView::new(renderer, SimulationConfig::default(), |output| {
            if let InteractionOutput::Select(bubble) = output {
                if let Some(window) = web_sys::window() {
                    let _ = window.open_with_url_and_target(&bubble.links().coin_gecko, "_blank");
                }
            }
        });
        get_logger().info(LogComponent::Presentation("WasmApi"), &format!("Chart bound to #{canvas_id}"));
        Ok(Self { view: Rc::new(RefCell::new(view)), client: CoinGeckoClient::new() })
    }

    /// Fetches the top `limit` coins and replaces the bubbles. Resolves to the
    /// number of bubbles shown.
    #[wasm_bindgen(js_name = loadMarkets)]
    pub fn load_markets(&self, limit: usize, size_basis: String, timeframe: String) -> Promise {
        let view = Rc::clone(&self.view);
        let client = self.client.clone();

        future_to_promise(async move {
            let size_basis = SizeBasis::from_str(&size_basis)
                .map_err(|_| AppError::ValidationError(format!("Unknown size basis '{size_basis}'")))?;
            let timeframe = Timeframe::from_str(&timeframe)
                .map_err(|_| AppError::ValidationError(format!("Unknown timeframe '{timeframe}'")))?;

            let coins = client.fetch_markets(limit, SortBy::MarketCap, timeframe).await?;

            let view = view.try_borrow().map_err(|_| JsValue::from_str("Chart is busy"))?;
            let arena = view.arena();
            let mapper = BubbleMapper::for_profile(DeviceProfile::from_viewport_width(arena.width()));
            let bubbles = mapper.map(&coins, size_basis, timeframe, &arena, &mut XorShift64Star::from_clock());
            let count = bubbles.len();
            view.set_bubbles(bubbles);
            Ok(JsValue::from(count as u32))
        })
    }

    pub fn start(&self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.start();
        }
    }

    pub fn stop(&self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.stop();
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        if let Ok(view) = self.view.try_borrow() {
            view.resize(width, height);
        }
    }

    #[wasm_bindgen(js_name = bubbleCount)]
    pub fn bubble_count(&self) -> usize {
        self.view.try_borrow().map(|v| v.bubble_count()).unwrap_or(0)
    }

    /// Current bubble positions as a JSON array
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let view = self.view.try_borrow().map_err(|_| JsValue::from_str("Chart is busy"))?;
        serde_json::to_string(&view.snapshot())
            .map_err(|e| AppError::DecodeError(e.to_string()).into())
    }
}
