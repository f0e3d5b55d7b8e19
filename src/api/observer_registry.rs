use tracing::{debug, trace};

use crate::animation::FrameClock;
use crate::core::ScaleState;
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartObserver, ObserverContext};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Registers an observer; ids must be unique per engine.
    pub fn register_observer(&mut self, observer: Box<dyn ChartObserver>) -> ChartResult<()> {
        let id = observer.id().to_owned();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{id}` is already registered"
            )));
        }
        debug!(chart_id = %self.chart_id, observer = %id, "observer registered");
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id; returns whether it existed.
    pub fn unregister_observer(&mut self, id: &str) -> bool {
        let Some(position) = self.observers.iter().position(|observer| observer.id() == id)
        else {
            return false;
        };
        self.observers.remove(position);
        debug!(chart_id = %self.chart_id, observer = %id, "observer unregistered");
        true
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, id: &str) -> bool {
        self.observers.iter().any(|observer| observer.id() == id)
    }

    pub(super) fn observer_context(&self) -> ObserverContext {
        let domain = |state: ScaleState| {
            state
                .current()
                .map(|scale| scale.domain())
                .unwrap_or((0.0, 0.0))
        };
        ObserverContext {
            viewport: self.model.viewport.viewport(),
            x_domain: domain(self.stage.scales.x),
            y_domain: domain(self.stage.scales.y),
            enabled_series: self.model.visibility.enabled_count(),
            series_count: self.model.visibility.series_count(),
        }
    }

    pub(super) fn emit_event(&mut self, event: ChartEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        trace!(chart_id = %self.chart_id, ?event, "dispatching chart event");
        for observer in &mut self.observers {
            observer.on_event(&event, &context);
        }
    }
}
