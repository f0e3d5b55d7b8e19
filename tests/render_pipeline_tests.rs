use std::sync::mpsc;

use approx::assert_relative_eq;
use linechart_rs::animation::ManualFrameClock;
use linechart_rs::api::{ChartConfig, draw_x_axis};
use linechart_rs::core::{ChartLayout, Dataset, LinearScale, Series, SurfaceSize};
use linechart_rs::extensions::{ChannelObserver, ChartEvent};
use linechart_rs::render::{
    Color, DrawCommand, NullRenderer, Surface, SurfaceKind, SurfaceTarget, SurfaceTransform,
};
use linechart_rs::ChartEngine;

type TestEngine = ChartEngine<NullRenderer, ManualFrameClock>;

fn layout() -> ChartLayout {
    ChartLayout::new(SurfaceSize::new(600, 400), SurfaceSize::new(600, 100))
}

fn build(x_values: Vec<f64>, values: Vec<f64>) -> (TestEngine, ManualFrameClock) {
    let dataset = Dataset::new(
        x_values,
        vec![Series::new("y0", "Joined", Color::rgb(0.24, 0.76, 0.25), values)],
    )
    .expect("valid dataset");
    let clock = ManualFrameClock::new(0.0);
    let engine = ChartEngine::create(
        NullRenderer::default(),
        clock.clone(),
        dataset,
        "pipeline",
        ChartConfig::default(),
        layout(),
    )
    .expect("engine init");
    (engine, clock)
}

fn small() -> (TestEngine, ManualFrameClock) {
    build(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0, 10.0, 5.0, 20.0, 15.0],
    )
}

fn wide() -> (TestEngine, ManualFrameClock) {
    build(
        (0..101).map(f64::from).collect(),
        (0..101).map(|i| f64::from(i % 7)).collect(),
    )
}

fn texts(surface: &Surface) -> Vec<&str> {
    surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn first_frame_snaps_scales_axes_and_lines() {
    let (engine, _clock) = small();

    let y = engine.main_y_scale().current().expect("y scale");
    assert_eq!(y.domain(), (0.0, 20.0));
    assert_eq!(y.range(), (350.0, 50.0));
    let x = engine.scales().x.current().expect("x scale");
    assert_eq!(x.domain(), (0.0, 4.0));
    assert_eq!(x.range(), (0.0, 600.0));

    let surfaces = &engine.stage().surfaces;
    assert_eq!(texts(&surfaces.y_axis), vec!["0", "4", "8", "12", "16", "20"]);
    assert_eq!(texts(&surfaces.x_axis).len(), 5);
    match surfaces.lines[0].commands() {
        [DrawCommand::Polyline(polyline)] => assert_eq!(
            polyline.points,
            vec![
                (0.0, 350.0),
                (150.0, 200.0),
                (300.0, 275.0),
                (450.0, 50.0),
                (600.0, 125.0)
            ]
        ),
        other => panic!("expected one polyline, got {other:?}"),
    }

    assert!(!engine.is_animating());
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_polyline_count, 2);
}

#[test]
fn frame_layers_follow_canonical_order() {
    let (engine, _clock) = small();

    let kinds: Vec<SurfaceKind> = engine.frame().layers.iter().map(Surface::kind).collect();
    assert_eq!(
        kinds,
        vec![
            SurfaceKind::XAxis,
            SurfaceKind::YAxis,
            SurfaceKind::Line { series: 0 },
            SurfaceKind::PointerOverlay,
            SurfaceKind::OverviewLine { series: 0 },
        ]
    );
    let frame = engine.frame();
    let overview: Vec<SurfaceKind> = frame
        .visible_layers(SurfaceTarget::Overview)
        .map(Surface::kind)
        .collect();
    assert_eq!(overview, vec![SurfaceKind::OverviewLine { series: 0 }]);
}

#[test]
fn window_change_crossfades_the_x_axis() {
    let (mut engine, clock) = wide();

    engine.set_handles(0.0, 50.0).expect("set handles");
    assert!(engine.is_animating());
    assert_eq!(engine.stage().surfaces.staged_x.len(), 1);
    // Same tick-aligned y top in both windows: the y axis stays put.
    assert!(engine.stage().surfaces.staged_y.is_empty());

    clock.set(250.0);
    assert!(engine.tick().expect("tick"));
    let staged = engine
        .stage()
        .surfaces
        .staged_x
        .values()
        .next()
        .expect("staged axis");
    assert_relative_eq!(staged.opacity(), 0.5);
    assert_relative_eq!(engine.stage().surfaces.x_axis.opacity(), 0.15);

    clock.set(600.0);
    assert!(!engine.tick().expect("tick"));
    let surfaces = &engine.stage().surfaces;
    assert!(surfaces.staged_x.is_empty());
    assert_eq!(surfaces.x_axis.opacity(), 1.0);
    assert_eq!(surfaces.x_axis.transform(), SurfaceTransform::IDENTITY);
    assert!(engine.scales().x.previous().is_none());
}

#[test]
fn superseded_transition_settles_on_the_latest_window() {
    let (mut engine, clock) = wide();

    engine.set_handles(0.0, 50.0).expect("first window");
    clock.set(100.0);
    engine.tick().expect("tick");
    engine.set_handles(0.0, 30.0).expect("second window");
    assert_eq!(engine.stage().surfaces.staged_x.len(), 1);

    clock.set(700.0);
    assert!(!engine.tick().expect("tick"));

    let mut expected = Surface::new(SurfaceKind::XAxis, layout().main);
    draw_x_axis(
        &mut expected,
        LinearScale::new((0.0, 30.0), (0.0, 600.0)),
        &ChartConfig::default().axis.x,
    );
    assert_eq!(engine.stage().surfaces.x_axis.commands(), expected.commands());
    assert!(engine.stage().surfaces.staged_x.is_empty());
}

#[test]
fn y_axis_transition_stages_the_new_gridlines() {
    let (mut engine, clock) = small();

    // Window [0, 2] drops the visible peak from 20 to 10.
    engine.set_handles(0.0, 50.0).expect("set handles");
    let y = engine.main_y_scale();
    assert_eq!(y.previous().map(LinearScale::domain_max), Some(20.0));
    assert_eq!(y.current().map(LinearScale::domain_max), Some(10.0));
    let staged = engine
        .stage()
        .surfaces
        .staged_y
        .values()
        .next()
        .expect("staged y axis");
    assert_eq!(texts(staged), vec!["0", "2", "4", "6", "8", "10"]);

    clock.set(400.0);
    engine.tick().expect("tick");
    assert_eq!(
        texts(&engine.stage().surfaces.y_axis),
        vec!["0", "2", "4", "6", "8", "10"]
    );
}

#[test]
fn resize_redraws_without_animation() {
    let (mut engine, _clock) = small();
    let resized = ChartLayout::new(SurfaceSize::new(800, 300), SurfaceSize::new(800, 80));

    engine.resize(resized).expect("resize");

    assert!(!engine.is_animating());
    assert_eq!(engine.layout(), resized);
    let y = engine.main_y_scale().current().expect("y scale");
    assert_eq!(y.range(), (250.0, 50.0));
    assert_eq!(engine.stage().surfaces.lines[0].size(), resized.main);
    assert_eq!(engine.stage().surfaces.overview_lines[0].size(), resized.overview);
    assert_eq!(engine.renderer().last_frame.as_ref().map(|f| f.layout), Some(resized));
}

#[test]
fn idle_tick_presents_nothing() {
    let (mut engine, clock) = small();
    let frames = engine.renderer().frames_rendered;

    clock.advance(16.0);
    assert!(!engine.tick().expect("tick"));
    assert_eq!(engine.renderer().frames_rendered, frames);
}

#[test]
fn every_pass_notifies_observers() {
    let (mut engine, _clock) = small();
    let (sender, receiver) = mpsc::channel();
    engine
        .register_observer(Box::new(ChannelObserver::new("log", sender)))
        .expect("register");
    assert!(engine
        .register_observer(Box::new(ChannelObserver::new("log", mpsc::channel().0)))
        .is_err());

    engine.render().expect("render");
    engine.toggle_series(0).expect("toggle");

    let events: Vec<ChartEvent> = receiver.try_iter().collect();
    assert_eq!(
        events,
        vec![
            ChartEvent::Rendered,
            ChartEvent::SeriesToggled {
                series: 0,
                enabled: false
            },
            ChartEvent::Rendered,
        ]
    );
    assert!(engine.unregister_observer("log"));
    assert_eq!(engine.observer_count(), 0);
}
