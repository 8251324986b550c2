use crypto_bubbles_wasm::domain::{
    bubble::{BubbleEntity, PinKind},
    geometry::Vec2,
    interaction::{InteractionController, InteractionOutput, PointerEvent},
    market_data::{CoinId, CoinMarket, Timeframe},
    simulation::{EngineDirective, SimulationConfig, SimulationEngine},
};

fn engine_with(bodies: &[(&str, f64, f64)]) -> SimulationEngine {
    let mut engine = SimulationEngine::for_viewport(600.0, 600.0, SimulationConfig::default());
    engine.replace_entities(
        bodies
            .iter()
            .map(|(id, x, y)| {
                BubbleEntity::from_market(&CoinMarket::new(*id, *id, *id), Timeframe::OneDay, 25.0, Vec2::new(*x, *y))
            })
            .collect(),
    );
    engine
}

fn id(raw: &str) -> CoinId {
    CoinId::from(raw)
}

#[test]
fn hover_shows_and_hides_tooltip() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0)]);
    let mut controller = InteractionController::new();
    let pointer = Vec2::new(305.0, 300.0);

    let out = controller.handle(PointerEvent::Enter { id: id("btc"), pointer }, &mut engine);
    assert_eq!(out[0], InteractionOutput::Emphasize { id: id("btc"), emphasized: true });
    assert!(matches!(&out[1], InteractionOutput::ShowTooltip { bubble, .. } if bubble.symbol == "BTC"));
    assert_eq!(controller.hovered(), Some(&id("btc")));

    let out = controller.handle(PointerEvent::Leave { id: id("btc") }, &mut engine);
    assert_eq!(
        out,
        vec![InteractionOutput::Emphasize { id: id("btc"), emphasized: false }, InteractionOutput::HideTooltip]
    );
    assert_eq!(controller.hovered(), None);
    assert_eq!(engine.pending_directives().last(), Some(&EngineDirective::ClearAttraction { id: id("btc") }));
}

#[test]
fn leaving_stops_attraction() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0)]);
    let mut controller = InteractionController::new();

    controller.handle(PointerEvent::Move { id: id("btc"), pointer: Vec2::new(400.0, 300.0) }, &mut engine);
    controller.handle(PointerEvent::Leave { id: id("btc") }, &mut engine);

    let queued: Vec<&EngineDirective> = engine.pending_directives().collect();
    assert_eq!(
        queued,
        [
            &EngineDirective::Attract { id: id("btc"), target: Vec2::new(305.0, 300.0) },
            &EngineDirective::ClearAttraction { id: id("btc") },
        ]
    );
    engine.tick();
    assert!(!engine.entity(&id("btc")).unwrap().is_pinned());
}

#[test]
fn drag_session_pins_then_releases() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0), ("eth", 150.0, 300.0)]);
    let mut controller = InteractionController::new();

    let out = controller.handle(PointerEvent::DragStart { id: id("btc"), pointer: Vec2::new(300.0, 300.0) }, &mut engine);
    assert_eq!(out, vec![InteractionOutput::HideTooltip]);
    engine.tick();
    assert_eq!(engine.entity(&id("btc")).unwrap().pin_kind(), Some(PinKind::Drag));
    assert_eq!(engine.alpha_target(), 0.3);

    let held = Vec2::new(350.0, 320.0);
    controller.handle(PointerEvent::DragMove { id: id("btc"), pointer: held }, &mut engine);
    engine.tick();
    assert_eq!(engine.entity(&id("btc")).unwrap().position(), held);

    let out = controller.handle(PointerEvent::DragEnd { id: id("btc"), pointer: held }, &mut engine);
    assert!(out.is_empty(), "a moved drag is not a click");
    assert_eq!(controller.dragging(), None);
    engine.tick();
    assert!(!engine.entity(&id("btc")).unwrap().is_pinned());
    assert_eq!(engine.alpha_target(), 0.0);
}

#[test]
fn hover_moves_are_ignored_while_dragging() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0), ("eth", 150.0, 300.0)]);
    let mut controller = InteractionController::new();
    controller.handle(PointerEvent::DragStart { id: id("btc"), pointer: Vec2::new(300.0, 300.0) }, &mut engine);
    engine.tick();

    let out = controller.handle(PointerEvent::Move { id: id("eth"), pointer: Vec2::new(100.0, 300.0) }, &mut engine);
    assert!(out.is_empty());
    assert_eq!(engine.pending_directives().count(), 0);
}

#[test]
fn pointer_outside_arena_does_not_attract() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0)]);
    let mut controller = InteractionController::new();

    controller.handle(PointerEvent::Move { id: id("btc"), pointer: Vec2::new(595.0, 595.0) }, &mut engine);
    assert!(!engine.pending_directives().any(|d| matches!(d, EngineDirective::Attract { .. })));
}

#[test]
fn events_for_removed_bubble_cancel_the_drag() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0), ("eth", 150.0, 300.0)]);
    let mut controller = InteractionController::new();
    let pointer = Vec2::new(300.0, 300.0);
    controller.handle(PointerEvent::Enter { id: id("btc"), pointer }, &mut engine);
    controller.handle(PointerEvent::DragStart { id: id("btc"), pointer }, &mut engine);
    engine.tick();

    let eth = engine.entity(&id("eth")).unwrap().clone();
    engine.replace_entities(vec![eth]);

    let out = controller.handle(PointerEvent::DragMove { id: id("btc"), pointer: Vec2::new(320.0, 300.0) }, &mut engine);
    assert_eq!(out, vec![InteractionOutput::HideTooltip]);
    assert_eq!(controller.dragging(), None);
    assert_eq!(controller.hovered(), None);
    assert_eq!(engine.pending_directives().last(), Some(&EngineDirective::SetAlphaTarget(0.0)));

    assert!(controller.handle(PointerEvent::DragEnd { id: id("btc"), pointer }, &mut engine).is_empty());
    assert!(engine.tick());
}

#[test]
fn click_selects_unless_dragging() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0)]);
    let mut controller = InteractionController::new();

    let out = controller.handle(PointerEvent::Click { id: id("btc") }, &mut engine);
    assert!(matches!(out.as_slice(), [InteractionOutput::Select(b)] if b.id == id("btc")));

    controller.handle(PointerEvent::DragStart { id: id("btc"), pointer: Vec2::new(300.0, 300.0) }, &mut engine);
    assert!(controller.handle(PointerEvent::Click { id: id("btc") }, &mut engine).is_empty());
}

#[test]
fn second_press_during_drag_does_not_strand_a_pin() {
    let mut engine = engine_with(&[("btc", 300.0, 300.0), ("eth", 150.0, 300.0)]);
    let mut controller = InteractionController::new();

    controller.handle(PointerEvent::DragStart { id: id("btc"), pointer: Vec2::new(300.0, 300.0) }, &mut engine);
    let out = controller.handle(PointerEvent::DragStart { id: id("eth"), pointer: Vec2::new(150.0, 300.0) }, &mut engine);
    assert!(out.is_empty());
    assert_eq!(controller.dragging(), Some(&id("btc")));

    controller.handle(PointerEvent::DragEnd { id: id("eth"), pointer: Vec2::new(150.0, 300.0) }, &mut engine);
    controller.handle(PointerEvent::DragEnd { id: id("btc"), pointer: Vec2::new(320.0, 300.0) }, &mut engine);
    for _ in 0..200 {
        engine.tick();
    }

    assert_eq!(controller.dragging(), None);
    assert!(!engine.entity(&id("btc")).unwrap().is_pinned());
    assert!(!engine.entity(&id("eth")).unwrap().is_pinned());
    assert_eq!(engine.alpha_target(), 0.0);
}
