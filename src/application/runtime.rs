use crate::domain::{
    bubble::BubbleEntity,
    logging::LogComponent,
    simulation::SimulationEngine,
};
use crate::log_info;
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the timers that drive a [`SimulationEngine`]: the tick driver and
/// the coarse reheat check. Both are cancelled together on [`stop`] and on
/// drop, so no callback outlives the chart.
///
/// [`stop`]: SimulationRuntime::stop
pub struct SimulationRuntime {
    engine: Rc<RefCell<SimulationEngine>>,
    tick: Option<Interval>,
    reheat: Option<Interval>,
}

impl SimulationRuntime {
    pub fn new(engine: SimulationEngine) -> Self {
        Self { engine: Rc::new(RefCell::new(engine)), tick: None, reheat: None }
    }

    /// Shared handle for pointer handlers; callbacks never borrow across ticks
    pub fn engine(&self) -> Rc<RefCell<SimulationEngine>> {
        Rc::clone(&self.engine)
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Starts both timers. `on_frame` sees the engine right after each tick
    /// and must not borrow it mutably.
    pub fn start(&mut self, mut on_frame: impl FnMut(&SimulationEngine) + 'static) {
        self.stop();

        let (tick_ms, reheat_ms) = {
            let engine = self.engine.borrow();
            (engine.config().tick_period_ms, engine.config().reheat_period_ms)
        };

        let engine = Rc::clone(&self.engine);
        self.tick = Some(Interval::new(tick_ms, move || {
            let Ok(mut guard) = engine.try_borrow_mut() else {
                return;
            };
            guard.tick();
            drop(guard);
            if let Ok(guard) = engine.try_borrow() {
                on_frame(&guard);
            }
        }));

        let engine = Rc::clone(&self.engine);
        self.reheat = Some(Interval::new(reheat_ms, move || {
            if let Ok(mut guard) = engine.try_borrow_mut() {
                guard.reheat_if_idle();
            }
        }));

        log_info!(
            LogComponent::Application("Runtime"),
            "started: tick every {}ms, reheat check every {}ms",
            tick_ms,
            reheat_ms
        );
    }

    /// Cancels the tick driver and the reheat check
    pub fn stop(&mut self) {
        let was_running = self.tick.is_some() || self.reheat.is_some();
        if let Some(tick) = self.tick.take() {
            tick.cancel();
        }
        if let Some(reheat) = self.reheat.take() {
            reheat.cancel();
        }
        if was_running {
            log_info!(LogComponent::Application("Runtime"), "stopped");
        }
    }

    pub fn replace_entities(&self, entities: Vec<BubbleEntity>) {
        self.engine.borrow_mut().replace_entities(entities);
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.engine.borrow_mut().resize(width, height);
    }
}

impl Drop for SimulationRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}
