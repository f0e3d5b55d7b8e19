use indexmap::IndexMap;

use crate::core::{ChartLayout, ScaleState};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Surface, SurfaceKind, SurfaceTarget, canonical_layer_order};

/// Current and previous scale of every axis the engine draws with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleSet {
    pub x: ScaleState,
    pub y: ScaleState,
    pub overview_x: ScaleState,
    pub overview_y: ScaleState,
}

impl ScaleSet {
    /// Drops every previous scale, used on hard resets.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.overview_x.reset();
        self.overview_y.reset();
    }
}

/// Every drawing surface of one chart.
///
/// Staged axes are keyed by transition so a late completion of a superseded
/// transition only ever commits its own surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSet {
    pub x_axis: Surface,
    pub y_axis: Surface,
    pub staged_x: IndexMap<u64, Surface>,
    pub staged_y: IndexMap<u64, Surface>,
    pub lines: Vec<Surface>,
    pub overview_lines: Vec<Surface>,
    pub overlay: Surface,
    next_stage_key: u64,
}

impl SurfaceSet {
    #[must_use]
    pub fn new(layout: ChartLayout, series_count: usize) -> Self {
        let main = layout.main;
        Self {
            x_axis: Surface::new(SurfaceKind::XAxis, main),
            y_axis: Surface::new(SurfaceKind::YAxis, main),
            staged_x: IndexMap::new(),
            staged_y: IndexMap::new(),
            lines: (0..series_count)
                .map(|series| Surface::new(SurfaceKind::Line { series }, main))
                .collect(),
            overview_lines: (0..series_count)
                .map(|series| Surface::new(SurfaceKind::OverviewLine { series }, layout.overview))
                .collect(),
            overlay: Surface::new(SurfaceKind::PointerOverlay, main),
            next_stage_key: 1,
        }
    }

    /// Resizes (and thereby clears) every surface; staged axes are dropped.
    pub fn resize(&mut self, layout: ChartLayout) {
        self.x_axis.resize(layout.main);
        self.y_axis.resize(layout.main);
        self.overlay.resize(layout.main);
        for line in &mut self.lines {
            line.resize(layout.main);
        }
        for line in &mut self.overview_lines {
            line.resize(layout.overview);
        }
        self.clear_staged();
    }

    pub fn clear_staged(&mut self) {
        self.staged_x.clear();
        self.staged_y.clear();
    }

    /// Parks an incoming x axis and returns its transition key.
    pub fn stage_x(&mut self, surface: Surface) -> u64 {
        let key = self.take_stage_key();
        self.staged_x.insert(key, surface);
        key
    }

    pub fn stage_y(&mut self, surface: Surface) -> u64 {
        let key = self.take_stage_key();
        self.staged_y.insert(key, surface);
        key
    }

    /// Moves the staged x axis `key` onto the visible one, if it still exists,
    /// and clears the visible axis' compositing overrides either way.
    pub fn commit_staged_x(&mut self, key: u64) {
        if let Some(staged) = self.staged_x.shift_remove(&key) {
            self.x_axis.commit_from(staged);
        }
        self.x_axis.reset_compositing();
    }

    pub fn commit_staged_y(&mut self, key: u64) {
        if let Some(staged) = self.staged_y.shift_remove(&key) {
            self.y_axis.commit_from(staged);
        }
        self.y_axis.reset_compositing();
    }

    /// Line surface of `series` on `target`.
    pub fn line_mut(&mut self, target: SurfaceTarget, series: usize) -> ChartResult<&mut Surface> {
        let lines = match target {
            SurfaceTarget::Main => &mut self.lines,
            SurfaceTarget::Overview => &mut self.overview_lines,
        };
        let len = lines.len();
        lines
            .get_mut(series)
            .ok_or(ChartError::SeriesIndexOutOfRange { index: series, len })
    }

    #[must_use]
    pub fn line(&self, target: SurfaceTarget, series: usize) -> Option<&Surface> {
        match target {
            SurfaceTarget::Main => self.lines.get(series),
            SurfaceTarget::Overview => self.overview_lines.get(series),
        }
    }

    /// Composes the ordered frame handed to the renderer.
    #[must_use]
    pub fn compose(&self, layout: ChartLayout) -> RenderFrame {
        let mut frame = RenderFrame::new(layout);
        for kind in canonical_layer_order(self.lines.len()) {
            match kind {
                SurfaceKind::XAxis => frame.layers.push(self.x_axis.clone()),
                SurfaceKind::StagedXAxis => frame.layers.extend(self.staged_x.values().cloned()),
                SurfaceKind::YAxis => frame.layers.push(self.y_axis.clone()),
                SurfaceKind::StagedYAxis => frame.layers.extend(self.staged_y.values().cloned()),
                SurfaceKind::Line { series } => {
                    if let Some(line) = self.lines.get(series) {
                        frame.layers.push(line.clone());
                    }
                }
                SurfaceKind::OverviewLine { series } => {
                    if let Some(line) = self.overview_lines.get(series) {
                        frame.layers.push(line.clone());
                    }
                }
                SurfaceKind::PointerOverlay => frame.layers.push(self.overlay.clone()),
            }
        }
        frame
    }

    fn take_stage_key(&mut self) -> u64 {
        let key = self.next_stage_key;
        self.next_stage_key += 1;
        key
    }
}

/// State lent to animation callbacks on every frame tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStage {
    pub surfaces: SurfaceSet,
    pub scales: ScaleSet,
}

impl ChartStage {
    #[must_use]
    pub fn new(layout: ChartLayout, series_count: usize) -> Self {
        Self {
            surfaces: SurfaceSet::new(layout, series_count),
            scales: ScaleSet::default(),
        }
    }
}
