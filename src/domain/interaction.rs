//! Pointer handling for the bubble chart.
//!
//! Hit-testing happens in the render adapter; the controller receives events
//! already targeted at a bubble and answers with engine directives (queued on
//! the engine) plus outputs for the surrounding UI.

use crate::domain::bubble::BubbleEntity;
use crate::domain::geometry::Vec2;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::CoinId;
use crate::domain::simulation::{EngineDirective, SimulationEngine};
use crate::{log_debug, log_info};

/// Pointer travel below which a press-release counts as a click
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Enter { id: CoinId, pointer: Vec2 },
    Move { id: CoinId, pointer: Vec2 },
    Leave { id: CoinId },
    DragStart { id: CoinId, pointer: Vec2 },
    DragMove { id: CoinId, pointer: Vec2 },
    DragEnd { id: CoinId, pointer: Vec2 },
    Click { id: CoinId },
}

impl PointerEvent {
    pub fn target(&self) -> &CoinId {
        match self {
            Self::Enter { id, .. }
            | Self::Move { id, .. }
            | Self::Leave { id }
            | Self::DragStart { id, .. }
            | Self::DragMove { id, .. }
            | Self::DragEnd { id, .. }
            | Self::Click { id } => id,
        }
    }
}

/// What the UI around the chart should do in response to an event
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutput {
    ShowTooltip { bubble: Box<BubbleEntity>, pointer: Vec2 },
    HideTooltip,
    Emphasize { id: CoinId, emphasized: bool },
    Select(Box<BubbleEntity>),
}

#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    id: CoinId,
    origin: Vec2,
    moved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    hovered: Option<CoinId>,
    drag: Option<DragSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&CoinId> {
        self.hovered.as_ref()
    }

    pub fn dragging(&self) -> Option<&CoinId> {
        self.drag.as_ref().map(|d| &d.id)
    }

    pub fn handle(&mut self, event: PointerEvent, engine: &mut SimulationEngine) -> Vec<InteractionOutput> {
        let Some(bubble) = engine.entity(event.target()).cloned() else {
            return self.drop_stale(event.target(), engine);
        };

        match event {
            PointerEvent::Enter { id, pointer } => {
                self.hovered = Some(id.clone());
                let mut out = vec![InteractionOutput::Emphasize { id, emphasized: true }];
                if self.drag.is_none() {
                    out.push(InteractionOutput::ShowTooltip { bubble: Box::new(bubble), pointer });
                }
                out
            }
            PointerEvent::Move { id, pointer } => {
                if self.drag.is_some() {
                    return Vec::new();
                }
                self.attract(&bubble, pointer, engine);
                self.hovered = Some(id);
                vec![InteractionOutput::ShowTooltip { bubble: Box::new(bubble), pointer }]
            }
            PointerEvent::Leave { id } => {
                engine.enqueue(EngineDirective::ClearAttraction { id: id.clone() });
                if self.hovered.as_ref() == Some(&id) {
                    self.hovered = None;
                }
                vec![InteractionOutput::Emphasize { id, emphasized: false }, InteractionOutput::HideTooltip]
            }
            PointerEvent::DragStart { id, pointer } => {
                if let Some(active) = self.dragging() {
                    log_debug!(LogComponent::Domain("Interaction"), "drag start on {} ignored: {} is held", id, active);
                    return Vec::new();
                }
                log_debug!(LogComponent::Domain("Interaction"), "drag start on {}", id);
                engine.enqueue(EngineDirective::SetPin { id: id.clone(), point: Some(bubble.position()) });
                let drag_target = engine.config().drag_alpha_target;
                engine.enqueue(EngineDirective::SetAlphaTarget(drag_target));
                self.drag = Some(DragSession { id, origin: pointer, moved: false });
                vec![InteractionOutput::HideTooltip]
            }
            PointerEvent::DragMove { id, pointer } => {
                let Some(session) = self.drag.as_mut().filter(|s| s.id == id) else {
                    return Vec::new();
                };
                if session.origin.distance(pointer) > CLICK_SLOP {
                    session.moved = true;
                }
                engine.enqueue(EngineDirective::SetPin { id, point: Some(pointer) });
                Vec::new()
            }
            PointerEvent::DragEnd { id, .. } => {
                if self.dragging() != Some(&id) {
                    return Vec::new();
                }
                let Some(session) = self.drag.take() else {
                    return Vec::new();
                };
                engine.enqueue(EngineDirective::SetPin { id: id.clone(), point: None });
                engine.enqueue(EngineDirective::SetAlphaTarget(0.0));
                log_debug!(LogComponent::Domain("Interaction"), "drag end on {} (moved: {})", id, session.moved);
                if session.moved { Vec::new() } else { vec![InteractionOutput::Select(Box::new(bubble))] }
            }
            PointerEvent::Click { .. } => {
                if self.drag.is_some() {
                    return Vec::new();
                }
                vec![InteractionOutput::Select(Box::new(bubble))]
            }
        }
    }

    /// One-tick pull of `bubble` a fraction of the way toward the pointer
    fn attract(&self, bubble: &BubbleEntity, pointer: Vec2, engine: &mut SimulationEngine) {
        let config = *engine.config();
        if !engine.arena().is_inside(pointer, 0.0) {
            return;
        }
        let toward = pointer - bubble.position();
        if toward.length() <= config.attraction_capture_distance {
            return;
        }
        let target = bubble.position() + toward * config.attraction_step;
        engine.enqueue(EngineDirective::Attract { id: bubble.id.clone(), target });
    }

    /// Event for a bubble that is no longer in the engine. A drag on it is
    /// cancelled and its hover state cleared.
    fn drop_stale(&mut self, id: &CoinId, engine: &mut SimulationEngine) -> Vec<InteractionOutput> {
        log_debug!(LogComponent::Domain("Interaction"), "event for vanished bubble {} dropped", id);
        if self.drag.as_ref().is_some_and(|d| &d.id == id) {
            self.drag = None;
            engine.enqueue(EngineDirective::SetAlphaTarget(0.0));
            log_info!(LogComponent::Domain("Interaction"), "drag on {} cancelled: bubble removed", id);
        }
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
            return vec![InteractionOutput::HideTooltip];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{CoinMarket, Timeframe};
    use crate::domain::simulation::SimulationConfig;

    fn engine_with(ids: &[(&str, f64, f64)]) -> SimulationEngine {
        let mut engine = SimulationEngine::for_viewport(600.0, 600.0, SimulationConfig::default());
        let bubbles = ids
            .iter()
            .map(|(id, x, y)| {
                BubbleEntity::from_market(&CoinMarket::new(*id, *id, *id), Timeframe::OneDay, 20.0, Vec2::new(*x, *y))
            })
            .collect();
        engine.replace_entities(bubbles);
        engine
    }

    #[test]
    fn near_pointer_does_not_attract() {
        let mut engine = engine_with(&[("a", 300.0, 300.0)]);
        let mut controller = InteractionController::new();
        controller.handle(PointerEvent::Move { id: "a".into(), pointer: Vec2::new(310.0, 300.0) }, &mut engine);
        assert_eq!(engine.pending_directives().count(), 0);

        controller.handle(PointerEvent::Move { id: "a".into(), pointer: Vec2::new(400.0, 300.0) }, &mut engine);
        assert_eq!(
            engine.pending_directives().last(),
            Some(&EngineDirective::Attract { id: "a".into(), target: Vec2::new(305.0, 300.0) })
        );
    }

    #[test]
    fn press_without_travel_selects() {
        let mut engine = engine_with(&[("a", 300.0, 300.0)]);
        let mut controller = InteractionController::new();
        let p = Vec2::new(300.0, 300.0);
        controller.handle(PointerEvent::DragStart { id: "a".into(), pointer: p }, &mut engine);
        let out = controller.handle(PointerEvent::DragEnd { id: "a".into(), pointer: p }, &mut engine);
        assert!(matches!(out.as_slice(), [InteractionOutput::Select(b)] if b.id.as_str() == "a"));
        assert_eq!(controller.dragging(), None);
    }
}
