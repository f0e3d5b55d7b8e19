use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::glib::ControlFlow;
use gtk::prelude::*;
use tracing::warn;

use crate::api::ChartEngine;
use crate::render::{CairoContextRenderer, Renderer, SurfaceTarget};

/// Wires a chart engine into two GTK drawing areas.
///
/// The main area receives pointer hover events, the overview area receives
/// window drags, and a widget tick callback drives animations.
pub struct GtkChartAdapter<R: Renderer + CairoContextRenderer + 'static> {
    engine: Rc<RefCell<ChartEngine<R>>>,
    main_area: gtk::DrawingArea,
    overview_area: gtk::DrawingArea,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkChartAdapter<R> {
    #[must_use]
    pub fn new(engine: ChartEngine<R>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let main_area = gtk::DrawingArea::new();
        let overview_area = gtk::DrawingArea::new();

        install_draw_func(&main_area, Rc::clone(&engine), SurfaceTarget::Main);
        install_draw_func(&overview_area, Rc::clone(&engine), SurfaceTarget::Overview);

        let motion = gtk::EventControllerMotion::new();
        let hover = Rc::clone(&engine);
        let hover_area = main_area.clone();
        motion.connect_motion(move |_, x, y| {
            if let Err(err) = hover.borrow_mut().pointer_move(x, y) {
                warn!(error = %err, "pointer move failed");
            }
            hover_area.queue_draw();
        });
        let leave = Rc::clone(&engine);
        let leave_area = main_area.clone();
        motion.connect_leave(move |_| {
            if let Err(err) = leave.borrow_mut().pointer_leave() {
                warn!(error = %err, "pointer leave failed");
            }
            leave_area.queue_draw();
        });
        main_area.add_controller(motion);

        let drag = gtk::GestureDrag::new();
        let begin = Rc::clone(&engine);
        drag.connect_drag_begin(move |_, x, _| begin.borrow_mut().begin_window_drag(x));
        let update = Rc::clone(&engine);
        drag.connect_drag_update(move |gesture, offset_x, _| {
            let Some((start_x, _)) = gesture.start_point() else {
                return;
            };
            if let Err(err) = update.borrow_mut().drag_window_to(start_x + offset_x) {
                warn!(error = %err, "window drag failed");
            }
        });
        let end = Rc::clone(&engine);
        drag.connect_drag_end(move |_, _, _| end.borrow_mut().end_window_drag());
        overview_area.add_controller(drag);

        let ticking = Rc::clone(&engine);
        let areas = (main_area.clone(), overview_area.clone());
        main_area.add_tick_callback(move |_, _| {
            // Skip the frame if a handler still holds the engine.
            let Ok(mut engine) = ticking.try_borrow_mut() else {
                return ControlFlow::Continue;
            };
            let was_animating = engine.is_animating();
            match engine.tick() {
                // The tick that finishes the last animation still changed the frame.
                Ok(animating) if animating || was_animating => {
                    areas.0.queue_draw();
                    areas.1.queue_draw();
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "chart tick failed"),
            }
            ControlFlow::Continue
        });

        Self {
            engine,
            main_area,
            overview_area,
        }
    }

    #[must_use]
    pub fn engine(&self) -> Rc<RefCell<ChartEngine<R>>> {
        Rc::clone(&self.engine)
    }

    #[must_use]
    pub fn main_area(&self) -> &gtk::DrawingArea {
        &self.main_area
    }

    #[must_use]
    pub fn overview_area(&self) -> &gtk::DrawingArea {
        &self.overview_area
    }

    pub fn queue_draw(&self) {
        self.main_area.queue_draw();
        self.overview_area.queue_draw();
    }
}

fn install_draw_func<R: Renderer + CairoContextRenderer + 'static>(
    area: &gtk::DrawingArea,
    engine: Rc<RefCell<ChartEngine<R>>>,
    target: SurfaceTarget,
) {
    area.set_draw_func(move |_, context, _, _| {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            return;
        };
        if let Err(err) = engine.render_on_cairo_context(context, target) {
            warn!(error = %err, ?target, "chart draw failed");
        }
    });
}
