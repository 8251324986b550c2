//! Canvas-backed bubble chart: wires the simulation runtime, the canvas
//! renderer and the interaction controller to DOM pointer events.

use crate::application::SimulationRuntime;
use crate::domain::{
    arena::ArenaGeometry,
    bubble::BubbleEntity,
    geometry::Vec2,
    interaction::{InteractionController, InteractionOutput, PointerEvent},
    logging::{LogComponent, get_logger},
    market_data::CoinId,
    simulation::{BubbleSnapshot, SimulationConfig, SimulationEngine},
};
use crate::infrastructure::rendering::{BubbleCanvasRenderer, hit_test};
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

type OutputSink = Rc<dyn Fn(InteractionOutput)>;

pub struct BubbleChartView {
    runtime: SimulationRuntime,
    renderer: Rc<RefCell<BubbleCanvasRenderer>>,
    controller: Rc<RefCell<InteractionController>>,
    listeners: Vec<EventListener>,
    on_output: OutputSink,
}

impl BubbleChartView {
    pub fn new(
        renderer: BubbleCanvasRenderer,
        config: SimulationConfig,
        on_output: impl Fn(InteractionOutput) + 'static,
    ) -> Self {
        let (width, height) = renderer.size();
        let engine = SimulationEngine::for_viewport(width as f64, height as f64, config);
        Self {
            runtime: SimulationRuntime::new(engine),
            renderer: Rc::new(RefCell::new(renderer)),
            controller: Rc::new(RefCell::new(InteractionController::new())),
            listeners: Vec::new(),
            on_output: Rc::new(on_output),
        }
    }

    pub fn arena(&self) -> ArenaGeometry {
        self.runtime.engine().borrow().arena().clone()
    }

    pub fn bubble_count(&self) -> usize {
        self.runtime.engine().borrow().len()
    }

    pub fn snapshot(&self) -> Vec<BubbleSnapshot> {
        self.runtime.engine().borrow().snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_running()
    }

    pub fn set_bubbles(&self, bubbles: Vec<BubbleEntity>) {
        self.runtime.replace_entities(bubbles);
    }

    pub fn resize(&self, width: u32, height: u32) {
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.resize(width, height);
        }
        self.runtime.resize(width as f64, height as f64);
    }

    /// Starts ticking, drawing and pointer handling
    pub fn start(&mut self) {
        let renderer = Rc::clone(&self.renderer);
        let controller = Rc::clone(&self.controller);
        self.runtime.start(move |engine| {
            let (Ok(renderer), Ok(controller)) = (renderer.try_borrow(), controller.try_borrow()) else {
                return;
            };
            if let Err(err) = renderer.render(engine, controller.hovered()) {
                get_logger().error(LogComponent::Presentation("ChartView"), &err.to_string());
            }
        });
        self.attach_pointer_listeners();
    }

    /// Cancels the timers and detaches pointer listeners
    pub fn stop(&mut self) {
        self.runtime.stop();
        self.listeners.clear();
    }

    fn attach_pointer_listeners(&mut self) {
        self.listeners.clear();
        let canvas = self.renderer.borrow().canvas().clone();

        for event_name in ["pointerdown", "pointermove", "pointerup", "pointerleave"] {
            let engine = self.runtime.engine();
            let renderer = Rc::clone(&self.renderer);
            let controller = Rc::clone(&self.controller);
            let sink = Rc::clone(&self.on_output);
            let capture_target = canvas.clone();

            let listener = EventListener::new(&canvas, event_name, move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Ok(renderer) = renderer.try_borrow() else {
                    return;
                };
                let pointer = renderer.pointer_position(mouse);
                let (Ok(mut engine), Ok(mut controller)) = (engine.try_borrow_mut(), controller.try_borrow_mut())
                else {
                    return;
                };

                let hit = hit_test(&engine.snapshot(), pointer).map(|b| b.id.clone());
                let events = translate(event_name, pointer, hit, &controller);
                if event_name == "pointerdown" && controller.dragging().is_none() {
                    if let Some(pe) = event.dyn_ref::<web_sys::PointerEvent>() {
                        if let Err(err) = capture_target.set_pointer_capture(pe.pointer_id()) {
                            get_logger().warn(
                                LogComponent::Presentation("ChartView"),
                                &format!("pointer capture failed: {:?}", err),
                            );
                        }
                    }
                }
                for pointer_event in events {
                    for output in controller.handle(pointer_event, &mut engine) {
                        sink(output);
                    }
                }
            });
            self.listeners.push(listener);
        }
    }
}

impl Drop for BubbleChartView {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Maps a raw canvas event plus hit-test result to controller events
fn translate(
    event_name: &str,
    pointer: Vec2,
    hit: Option<CoinId>,
    controller: &InteractionController,
) -> Vec<PointerEvent> {
    let hovered = controller.hovered().cloned();
    let dragging = controller.dragging().cloned();

    match event_name {
        "pointerdown" if dragging.is_some() => Vec::new(),
        "pointerdown" => hit.map(|id| vec![PointerEvent::DragStart { id, pointer }]).unwrap_or_default(),
        "pointerup" => dragging.map(|id| vec![PointerEvent::DragEnd { id, pointer }]).unwrap_or_default(),
        "pointerleave" => {
            let mut out = Vec::new();
            if let Some(id) = dragging {
                out.push(PointerEvent::DragEnd { id, pointer });
            }
            if let Some(id) = hovered {
                out.push(PointerEvent::Leave { id });
            }
            out
        }
        "pointermove" => {
            if let Some(id) = dragging {
                return vec![PointerEvent::DragMove { id, pointer }];
            }
            let mut out = Vec::new();
            if hovered.is_some() && hovered != hit {
                if let Some(id) = hovered.clone() {
                    out.push(PointerEvent::Leave { id });
                }
            }
            if let Some(id) = hit {
                if hovered.as_ref() != Some(&id) {
                    out.push(PointerEvent::Enter { id: id.clone(), pointer });
                }
                out.push(PointerEvent::Move { id, pointer });
            }
            out
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{CoinMarket, Timeframe};

    #[test]
    fn press_while_holding_is_not_a_new_drag() {
        let mut engine = SimulationEngine::for_viewport(600.0, 600.0, SimulationConfig::default());
        engine.replace_entities(
            [("a", 300.0), ("b", 150.0)]
                .iter()
                .map(|(id, x)| {
                    BubbleEntity::from_market(&CoinMarket::new(*id, *id, *id), Timeframe::OneDay, 20.0, Vec2::new(*x, 300.0))
                })
                .collect(),
        );
        let mut controller = InteractionController::new();
        let pointer = Vec2::new(300.0, 300.0);

        let first = translate("pointerdown", pointer, Some("a".into()), &controller);
        assert_eq!(first, vec![PointerEvent::DragStart { id: "a".into(), pointer }]);
        for event in first {
            controller.handle(event, &mut engine);
        }

        let second = Vec2::new(150.0, 300.0);
        assert!(translate("pointerdown", second, Some("b".into()), &controller).is_empty());
        assert_eq!(
            translate("pointerup", second, Some("b".into()), &controller),
            vec![PointerEvent::DragEnd { id: "a".into(), pointer: second }]
        );
    }
}
