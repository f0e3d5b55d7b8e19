use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::SelectionState;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub viewport: Viewport,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub enabled_series: usize,
    pub series_count: usize,
}

/// Event stream pushed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// Pointer resolved to a non-empty selection.
    ///
    /// `anchor_x`/`anchor_y` are in main-surface coordinates; hosts add their
    /// own page offsets.
    TooltipShow {
        content: String,
        anchor_x: f64,
        anchor_y: f64,
        selection: SelectionState,
    },
    TooltipHide,
    ViewportChanged { left: usize, right: usize },
    SeriesToggled { series: usize, enabled: bool },
    Rendered,
}

/// Subscriber for chart events, replacing a shared global event bus.
///
/// Observers see events and engine context but never mutate engine state.
pub trait ChartObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: &ObserverContext);
}

/// Forwards every event into an mpsc channel.
///
/// A disconnected receiver is ignored.
#[derive(Debug)]
pub struct ChannelObserver {
    id: String,
    sender: Sender<ChartEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(id: impl Into<String>, sender: Sender<ChartEvent>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }
}

impl ChartObserver for ChannelObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, _context: &ObserverContext) {
        let _ = self.sender.send(event.clone());
    }
}
