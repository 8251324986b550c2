#![cfg(target_arch = "wasm32")]

use crypto_bubbles_wasm::application::SimulationRuntime;
use crypto_bubbles_wasm::domain::{
    bubble::BubbleEntity,
    geometry::Vec2,
    market_data::{CoinMarket, Timeframe},
    simulation::{SimulationConfig, SimulationEngine},
};
use gloo_timers::future::sleep;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn bubble(id: &str, x: f64, y: f64) -> BubbleEntity {
    BubbleEntity::from_market(&CoinMarket::new(id, id, id), Timeframe::OneDay, 20.0, Vec2::new(x, y))
}

#[cfg(feature = "render")]
fn canvas(width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    use wasm_bindgen::JsCast;

    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test(async)]
async fn stop_cancels_ticking() {
    let mut engine = SimulationEngine::for_viewport(400.0, 400.0, SimulationConfig::default());
    engine.replace_entities(vec![bubble("a", 200.0, 200.0), bubble("b", 150.0, 200.0)]);
    let mut runtime = SimulationRuntime::new(engine);
    let frames = Rc::new(Cell::new(0u32));

    let counter = Rc::clone(&frames);
    runtime.start(move |_| counter.set(counter.get() + 1));
    sleep(Duration::from_millis(120)).await;
    assert!(runtime.is_running());
    assert!(frames.get() > 0);

    runtime.stop();
    assert!(!runtime.is_running());
    let ticks = runtime.engine().borrow().tick_count();
    sleep(Duration::from_millis(80)).await;
    assert_eq!(runtime.engine().borrow().tick_count(), ticks);
}

#[wasm_bindgen_test(async)]
async fn reheat_timer_wakes_a_quiet_layout() {
    let config = SimulationConfig { reheat_period_ms: 40, tick_period_ms: 60_000, ..SimulationConfig::default() };
    let mut engine = SimulationEngine::for_viewport(400.0, 400.0, config);
    engine.replace_entities(vec![bubble("a", 200.0, 200.0)]);
    engine.set_alpha(0.05);
    let mut runtime = SimulationRuntime::new(engine);

    runtime.start(|_| {});
    sleep(Duration::from_millis(120)).await;

    assert_eq!(runtime.engine().borrow().alpha(), config.reheat_alpha);
    assert_eq!(runtime.engine().borrow().tick_count(), 0);
    runtime.stop();
}

#[cfg(feature = "render")]
#[wasm_bindgen_test]
fn renderer_draws_engine_frame() {
    use crypto_bubbles_wasm::infrastructure::rendering::BubbleCanvasRenderer;

    let renderer = BubbleCanvasRenderer::new(canvas(300, 300)).unwrap();
    let mut engine = SimulationEngine::for_viewport(300.0, 300.0, SimulationConfig::default());
    engine.replace_entities(vec![bubble("a", 150.0, 150.0)]);
    engine.tick();

    assert_eq!(renderer.size(), (300, 300));
    renderer.render(&engine, None).unwrap();
    renderer.render(&engine, Some(&"a".into())).unwrap();
}
