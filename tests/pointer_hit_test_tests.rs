use std::sync::mpsc::{self, Receiver};

use linechart_rs::animation::ManualFrameClock;
use linechart_rs::api::{ChartConfig, TOOLTIP_OFFSET_PX};
use linechart_rs::core::{ChartLayout, Dataset, Series, SurfaceSize};
use linechart_rs::extensions::{ChannelObserver, ChartEvent};
use linechart_rs::render::{Color, DrawCommand, NullRenderer};
use linechart_rs::{ChartEngine, ChartError};

type TestEngine = ChartEngine<NullRenderer, ManualFrameClock>;

fn engine() -> (TestEngine, ManualFrameClock, Receiver<ChartEvent>) {
    let dataset = Dataset::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![
            Series::new("a", "A", Color::rgb(1.0, 0.0, 0.0), vec![0.0, 10.0, 5.0, 20.0, 15.0]),
            Series::new("b", "B", Color::rgb(0.0, 0.0, 1.0), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ],
    )
    .expect("valid dataset");
    let clock = ManualFrameClock::new(0.0);
    let mut engine = ChartEngine::create(
        NullRenderer::default(),
        clock.clone(),
        dataset,
        "pointer",
        ChartConfig::default(),
        ChartLayout::new(SurfaceSize::new(600, 400), SurfaceSize::new(600, 100)),
    )
    .expect("engine init");
    let (sender, receiver) = mpsc::channel();
    engine
        .register_observer(Box::new(ChannelObserver::new("tooltip", sender)))
        .expect("register observer");
    (engine, clock, receiver)
}

fn tooltip_events(receiver: &Receiver<ChartEvent>) -> Vec<ChartEvent> {
    receiver
        .try_iter()
        .filter(|event| {
            matches!(
                event,
                ChartEvent::TooltipShow { .. } | ChartEvent::TooltipHide
            )
        })
        .collect()
}

#[test]
fn pointer_selects_the_nearest_index_of_every_enabled_series() {
    let (mut engine, _clock, receiver) = engine();

    engine.pointer_move(160.0, 100.0).expect("pointer move");

    let selection = engine.selection();
    assert_eq!(selection.index(), Some(1));
    let values: Vec<(usize, f64)> = selection
        .points()
        .iter()
        .map(|point| (point.series, point.y))
        .collect();
    assert_eq!(values, vec![(0, 10.0), (1, 2.0)]);

    match tooltip_events(&receiver).as_slice() {
        [ChartEvent::TooltipShow {
            content,
            anchor_x,
            anchor_y,
            ..
        }] => {
            assert_eq!(content, "Jan 1\n10 A\n2 B");
            assert_eq!(*anchor_x, 150.0 + TOOLTIP_OFFSET_PX);
            assert_eq!(*anchor_y, 100.0 + TOOLTIP_OFFSET_PX);
        }
        other => panic!("expected one tooltip, got {other:?}"),
    }
}

#[test]
fn overlay_draws_guide_and_markers_at_the_selection() {
    let (mut engine, _clock, _receiver) = engine();

    engine.pointer_move(440.0, 10.0).expect("pointer move");

    let commands = engine.stage().surfaces.overlay.commands();
    assert_eq!(commands.len(), 3);
    match &commands[0] {
        DrawCommand::Line(guide) => {
            assert_eq!((guide.x1, guide.x2), (450.0, 450.0));
            assert_eq!((guide.y1, guide.y2), (350.0, 50.0));
        }
        other => panic!("expected guide line, got {other:?}"),
    }
    match &commands[1] {
        DrawCommand::Circle(marker) => assert_eq!((marker.cx, marker.cy), (450.0, 50.0)),
        other => panic!("expected marker, got {other:?}"),
    }
}

#[test]
fn pointer_outside_the_plot_clamps_to_the_window_edges() {
    let (mut engine, _clock, _receiver) = engine();

    engine.pointer_move(-80.0, 0.0).expect("pointer move");
    assert_eq!(engine.selection().index(), Some(0));
    engine.pointer_move(5_000.0, 0.0).expect("pointer move");
    assert_eq!(engine.selection().index(), Some(4));
}

#[test]
fn leaving_the_plot_hides_the_tooltip() {
    let (mut engine, _clock, receiver) = engine();

    engine.pointer_move(300.0, 50.0).expect("pointer move");
    engine.pointer_leave().expect("pointer leave");

    assert!(engine.selection().is_empty());
    assert!(engine.stage().surfaces.overlay.commands().is_empty());
    let events = tooltip_events(&receiver);
    assert_eq!(events.last(), Some(&ChartEvent::TooltipHide));
}

#[test]
fn moving_the_window_away_drops_the_selection() {
    let (mut engine, _clock, receiver) = engine();
    engine.pointer_move(600.0, 50.0).expect("pointer move");
    assert_eq!(engine.selection().index(), Some(4));

    engine.set_handles(0.0, 50.0).expect("set handles");

    assert!(engine.selection().is_empty());
    assert_eq!(
        tooltip_events(&receiver).last(),
        Some(&ChartEvent::TooltipHide)
    );
}

#[test]
fn hiding_a_series_removes_it_from_the_selection() {
    let (mut engine, _clock, _receiver) = engine();
    engine.pointer_move(150.0, 50.0).expect("pointer move");

    engine.toggle_series(1).expect("toggle");

    let series: Vec<usize> = engine
        .selection()
        .points()
        .iter()
        .map(|point| point.series)
        .collect();
    assert_eq!(series, vec![0]);
}

#[test]
fn nothing_is_selected_with_every_series_disabled() {
    let (mut engine, _clock, receiver) = engine();
    engine.set_series_enabled(0, false).expect("hide a");
    engine.set_series_enabled(1, false).expect("hide b");

    engine.pointer_move(300.0, 50.0).expect("pointer move");

    assert!(engine.selection().is_empty());
    assert!(tooltip_events(&receiver).is_empty());
}

#[test]
fn custom_formatter_replaces_the_tooltip_text() {
    let (mut engine, _clock, receiver) = engine();
    engine.set_tooltip_formatter(|selection, _config| {
        format!("{} points", selection.points().len())
    });

    engine.pointer_move(0.0, 0.0).expect("pointer move");

    match tooltip_events(&receiver).as_slice() {
        [ChartEvent::TooltipShow { content, .. }] => assert_eq!(content, "2 points"),
        other => panic!("expected one tooltip, got {other:?}"),
    }
}

#[test]
fn non_finite_pointer_is_rejected() {
    let (mut engine, _clock, _receiver) = engine();

    assert!(matches!(
        engine.pointer_move(f64::NAN, 10.0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(engine.pointer_move(10.0, f64::INFINITY).is_err());
    assert!(engine.selection().is_empty());
}
