use std::sync::mpsc;

use linechart_rs::animation::ManualFrameClock;
use linechart_rs::api::{ChartConfig, ViewportController};
use linechart_rs::core::{ChartLayout, Dataset, Series, SurfaceSize, Viewport};
use linechart_rs::extensions::{ChannelObserver, ChartEvent};
use linechart_rs::render::{Color, NullRenderer};
use linechart_rs::ChartEngine;

fn engine(points: usize) -> (ChartEngine<NullRenderer, ManualFrameClock>, ManualFrameClock) {
    let x_values: Vec<f64> = (0..points).map(|i| i as f64).collect();
    let values: Vec<f64> = (0..points).map(|i| (i % 7) as f64).collect();
    let dataset = Dataset::new(
        x_values,
        vec![Series::new("y0", "A", Color::rgb(0.0, 0.5, 0.0), values)],
    )
    .expect("valid dataset");
    let clock = ManualFrameClock::new(0.0);
    let engine = ChartEngine::create(
        NullRenderer::default(),
        clock.clone(),
        dataset,
        "viewport",
        ChartConfig::default(),
        ChartLayout::new(SurfaceSize::new(600, 400), SurfaceSize::new(600, 100)),
    )
    .expect("engine init");
    (engine, clock)
}

#[test]
fn fresh_controller_covers_every_index() {
    let controller = ViewportController::new(5);

    assert_eq!(controller.viewport(), Viewport::new(0, 4));
    assert_eq!(controller.handles(), (0.0, 100.0));
}

#[test]
fn handles_are_clamped_and_may_arrive_unordered() {
    let mut controller = ViewportController::new(101);

    controller.set_handles(150.0, -20.0).expect("finite handles");
    assert_eq!(controller.handles(), (100.0, 0.0));
    assert_eq!(controller.viewport(), Viewport::new(0, 100));

    controller.set_handles(50.0, 25.0).expect("finite handles");
    assert_eq!(controller.viewport(), Viewport::new(25, 50));
}

#[test]
fn non_finite_handles_are_rejected_without_change() {
    let mut controller = ViewportController::new(11);
    controller.set_handles(10.0, 90.0).expect("finite handles");

    assert!(controller.set_handles(f64::NAN, 50.0).is_err());
    assert_eq!(controller.handles(), (10.0, 90.0));
}

#[test]
fn shift_at_the_edge_is_a_no_op() {
    let mut controller = ViewportController::new(5);

    assert!(!controller.shift_window(20.0));
    assert_eq!(controller.handles(), (0.0, 100.0));
    assert_eq!(controller.viewport(), Viewport::new(0, 4));
}

#[test]
fn shift_past_the_edge_stops_at_the_edge() {
    let mut controller = ViewportController::new(101);
    controller.set_handles(60.0, 90.0).expect("finite handles");

    assert!(controller.shift_window(25.0));
    assert_eq!(controller.sorted_handles(), (70.0, 100.0));
    assert_eq!(controller.viewport(), Viewport::new(70, 100));
}

#[test]
fn dragging_a_full_window_does_nothing() {
    let (mut engine, _clock) = engine(5);

    engine.begin_window_drag(0.0);
    let moved = engine.drag_window_to(120.0).expect("drag");
    engine.end_window_drag();

    assert!(!moved);
    assert_eq!(engine.viewport(), Viewport::new(0, 4));
}

#[test]
fn dragging_moves_the_window_by_whole_percent_steps() {
    let (mut engine, clock) = engine(101);
    let (sender, receiver) = mpsc::channel();
    engine
        .register_observer(Box::new(ChannelObserver::new("events", sender)))
        .expect("register observer");
    engine.set_handles(0.0, 50.0).expect("set handles");
    assert_eq!(engine.viewport(), Viewport::new(0, 50));

    clock.advance(20.0);
    engine.begin_window_drag(100.0);
    assert!(!engine.drag_window_to(104.0).expect("sub-percent drag"));
    assert!(engine.drag_window_to(220.0).expect("drag"));
    engine.end_window_drag();

    assert_eq!(engine.handles(), (20.0, 70.0));
    assert_eq!(engine.viewport(), Viewport::new(20, 70));
    let windows: Vec<(usize, usize)> = receiver
        .try_iter()
        .filter_map(|event| match event {
            ChartEvent::ViewportChanged { left, right } => Some((left, right)),
            _ => None,
        })
        .collect();
    assert_eq!(windows, vec![(0, 50), (20, 70)]);
}

#[test]
fn rapid_window_updates_are_throttled_to_one_trailing_render() {
    let (mut engine, clock) = engine(101);
    let initial = engine.renderer().frames_rendered;

    engine.set_handles(0.0, 80.0).expect("leading update");
    assert_eq!(engine.renderer().frames_rendered, initial + 1);

    clock.advance(2.0);
    engine.set_handles(0.0, 60.0).expect("throttled update");
    clock.advance(2.0);
    engine.set_handles(0.0, 40.0).expect("throttled update");
    assert!(engine.has_deferred_render());
    assert_eq!(engine.scales().x.current().map(|s| s.domain()), Some((0.0, 80.0)));

    clock.set(10.0);
    engine.tick().expect("tick");
    assert!(!engine.has_deferred_render());
    assert_eq!(engine.scales().x.current().map(|s| s.domain()), Some((0.0, 40.0)));
}
