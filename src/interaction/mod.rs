use serde::{Deserialize, Serialize};

use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    /// Both zoom handles follow the pointer across the overview strip.
    DraggingWindow,
}

/// Pointer position where the current drag step started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragOrigin {
    pub x: f64,
    /// Width of the overview track the handles live on, in pixels.
    pub track_width: f64,
}

impl DragOrigin {
    /// Whole-percent handle delta for a pointer at `pointer_x`.
    ///
    /// Returns `0` for an unsized track.
    #[must_use]
    pub fn percent_delta(self, pointer_x: f64) -> f64 {
        if self.track_width <= 0.0 || !pointer_x.is_finite() {
            return 0.0;
        }
        ((pointer_x - self.x) * 100.0 / self.track_width).floor()
    }
}

/// One series value at the selected index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub series: usize,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub name: String,
}

/// Points nearest the pointer, one per enabled series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    index: Option<usize>,
    points: Vec<SelectedPoint>,
}

impl SelectionState {
    #[must_use]
    pub fn new(index: usize, points: Vec<SelectedPoint>) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        Self {
            index: Some(index),
            points,
        }
    }

    /// Dataset index the selection was resolved at.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn points(&self) -> &[SelectedPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shared x value of every selected point.
    #[must_use]
    pub fn x(&self) -> Option<f64> {
        self.points.first().map(|point| point.x)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    drag_origin: Option<DragOrigin>,
    pointer: Option<(f64, f64)>,
    selection: SelectionState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            drag_origin: None,
            pointer: None,
            selection: SelectionState::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn drag_origin(&self) -> Option<DragOrigin> {
        self.drag_origin
    }

    pub fn on_drag_start(&mut self, x: f64, track_width: f64) {
        self.mode = InteractionMode::DraggingWindow;
        self.drag_origin = Some(DragOrigin { x, track_width });
    }

    /// Moves the origin to `x` after a drag step was applied.
    pub fn rebase_drag(&mut self, x: f64) {
        if let Some(origin) = self.drag_origin.as_mut() {
            origin.x = x;
        }
    }

    pub fn on_drag_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.drag_origin = None;
    }

    /// Last pointer position over the main plot.
    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.selection = SelectionState::default();
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
    }
}
