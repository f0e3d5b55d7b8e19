use linechart_rs::animation::ManualFrameClock;
use linechart_rs::api::{ChartConfig, PendingTransition};
use linechart_rs::core::{ChartLayout, Dataset, Series, SurfaceSize, find_extent};
use linechart_rs::render::{Color, DrawCommand, NullRenderer, SurfaceTarget, SurfaceTransform};
use linechart_rs::{ChartEngine, ChartError};

fn engine() -> (ChartEngine<NullRenderer, ManualFrameClock>, ManualFrameClock) {
    let dataset = Dataset::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![
            Series::new("a", "A", Color::rgb(1.0, 0.0, 0.0), vec![0.0, 10.0, 5.0, 20.0, 15.0]),
            Series::new("b", "B", Color::rgb(0.0, 0.0, 1.0), vec![1.0, 2.0, 3.0, 40.0, 4.0]),
        ],
    )
    .expect("valid dataset");
    let clock = ManualFrameClock::new(0.0);
    let engine = ChartEngine::create(
        NullRenderer::default(),
        clock.clone(),
        dataset,
        "visibility",
        ChartConfig::default(),
        ChartLayout::new(SurfaceSize::new(600, 400), SurfaceSize::new(600, 100)),
    )
    .expect("engine init");
    (engine, clock)
}

fn y_top(engine: &ChartEngine<NullRenderer, ManualFrameClock>) -> Option<f64> {
    engine.main_y_scale().current().map(|scale| scale.domain_max())
}

fn line_visible(
    engine: &ChartEngine<NullRenderer, ManualFrameClock>,
    target: SurfaceTarget,
    series: usize,
) -> bool {
    engine
        .stage()
        .surfaces
        .line(target, series)
        .is_some_and(|surface| surface.is_visible())
}

#[test]
fn hiding_the_tallest_series_shrinks_the_axis_and_fades_it_out() {
    let (mut engine, clock) = engine();
    assert_eq!(y_top(&engine), Some(40.0));

    assert!(!engine.toggle_series(1).expect("toggle"));
    assert_eq!(y_top(&engine), Some(20.0));
    assert!(engine.is_animating());
    assert!(line_visible(&engine, SurfaceTarget::Main, 1));

    clock.set(175.0);
    engine.tick().expect("tick");
    let fading = engine.stage().surfaces.line(SurfaceTarget::Main, 1).expect("line");
    assert!((fading.opacity() - 0.5).abs() < 1e-9);

    clock.set(400.0);
    assert!(!engine.tick().expect("tick"));
    assert!(!line_visible(&engine, SurfaceTarget::Main, 1));
    assert!(!line_visible(&engine, SurfaceTarget::Overview, 1));
    assert!(line_visible(&engine, SurfaceTarget::Main, 0));
    assert_eq!(engine.renderer().last_polyline_count, 2);

    let settled = engine.stage().surfaces.line(SurfaceTarget::Main, 0).expect("line");
    assert_eq!(settled.transform(), SurfaceTransform::IDENTITY);
    match settled.commands() {
        [DrawCommand::Polyline(polyline)] => assert_eq!(polyline.points[3], (450.0, 50.0)),
        other => panic!("expected one polyline, got {other:?}"),
    }
}

fn peak_y(engine: &ChartEngine<NullRenderer, ManualFrameClock>) -> f64 {
    let line = engine.stage().surfaces.line(SurfaceTarget::Main, 0).expect("line");
    match line.commands() {
        [DrawCommand::Polyline(polyline)] => polyline.points[3].1,
        other => panic!("expected one polyline, got {other:?}"),
    }
}

#[test]
fn remaining_line_is_redrawn_at_an_interpolated_scale() {
    let (mut engine, clock) = engine();
    assert_eq!(peak_y(&engine), 200.0);

    engine.toggle_series(1).expect("toggle");
    // Still drawn against the old 0..40 scale.
    assert_eq!(peak_y(&engine), 200.0);

    let frames = engine.renderer().frames_rendered;
    clock.set(175.0);
    assert!(engine.tick().expect("tick"));
    assert_eq!(engine.renderer().frames_rendered, frames + 1);
    assert_eq!(peak_y(&engine), 125.0);
    let rescaling = engine.stage().surfaces.line(SurfaceTarget::Main, 0).expect("line");
    assert_eq!(rescaling.transform(), SurfaceTransform::IDENTITY);
    assert_eq!(rescaling.opacity(), 1.0);

    clock.set(400.0);
    assert!(!engine.tick().expect("tick"));
    assert_eq!(peak_y(&engine), 50.0);
}

#[test]
fn toggling_twice_restores_the_extent_and_every_line() {
    let (mut engine, clock) = engine();
    let before = find_extent(engine.dataset(), engine.visibility().enabled_flags(), None);

    engine.toggle_series(1).expect("hide");
    clock.set(1_000.0);
    engine.tick().expect("tick");
    assert!(engine.toggle_series(1).expect("show"));
    clock.set(1_400.0);
    engine.tick().expect("tick");

    let after = find_extent(engine.dataset(), engine.visibility().enabled_flags(), None);
    assert_eq!(after, before);
    assert_eq!(y_top(&engine), Some(40.0));
    for target in [SurfaceTarget::Main, SurfaceTarget::Overview] {
        for series in 0..2 {
            let line = engine.stage().surfaces.line(target, series).expect("line");
            assert!(line.is_visible());
            assert_eq!(line.opacity(), 1.0);
        }
    }
    assert!(!engine.is_animating());
}

#[test]
fn showing_again_mid_fade_wins_over_the_running_hide() {
    let (mut engine, clock) = engine();

    engine.toggle_series(1).expect("hide");
    clock.set(100.0);
    engine.tick().expect("tick");
    engine.toggle_series(1).expect("show");
    clock.set(600.0);
    engine.tick().expect("tick");

    assert!(line_visible(&engine, SurfaceTarget::Main, 1));
    assert!(line_visible(&engine, SurfaceTarget::Overview, 1));
    assert!(!engine.is_animating());
}

#[test]
fn render_pass_consumes_pending_transitions() {
    let (mut engine, _clock) = engine();

    engine.toggle_series(0).expect("toggle");
    for target in [SurfaceTarget::Main, SurfaceTarget::Overview] {
        assert_eq!(
            engine.visibility().pending(target, 0).expect("pending"),
            PendingTransition::None
        );
    }
}

#[test]
fn hiding_every_series_falls_back_to_the_default_extent() {
    let (mut engine, clock) = engine();

    engine.set_series_enabled(0, false).expect("hide a");
    engine.set_series_enabled(1, false).expect("hide b");
    clock.set(500.0);
    engine.tick().expect("tick");

    assert_eq!(y_top(&engine), Some(100.0));
    assert_eq!(engine.renderer().last_polyline_count, 0);
}

#[test]
fn unknown_series_is_rejected() {
    let (mut engine, _clock) = engine();

    assert!(matches!(
        engine.toggle_series(5),
        Err(ChartError::SeriesIndexOutOfRange { index: 5, len: 2 })
    ));
    assert!(engine.set_series_enabled(0, true).is_ok());
}
