use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::{Dataset, Viewport};

/// Value span `{min, max}` over the series under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Used whenever no enabled series contributes a value.
    pub const FALLBACK: Self = Self {
        min: 0.0,
        max: 100.0,
    };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Axis top rounded so every gridline lands on a whole step:
    /// `ceil(max / ticks) * ticks`.
    #[must_use]
    pub fn tick_aligned_max(self, ticks: u32) -> f64 {
        let ticks = f64::from(ticks.max(1));
        (self.max / ticks).ceil() * ticks
    }
}

/// Computes the extent of enabled series, restricted to `window` when given.
///
/// `enabled` is indexed like `dataset.series()`; missing entries count as
/// disabled. Falls back to [`Extent::FALLBACK`] when nothing contributes.
#[must_use]
pub fn find_extent(dataset: &Dataset, enabled: &[bool], window: Option<Viewport>) -> Extent {
    let last = dataset.len().saturating_sub(1);
    let (left, right) = match window {
        Some(window) => (window.left().min(last), window.right().min(last)),
        None => (0, last),
    };

    let values = dataset
        .series()
        .iter()
        .enumerate()
        .filter(|(index, _)| enabled.get(*index).copied().unwrap_or(false))
        .flat_map(|(_, series)| series.values[left..=right].iter().copied())
        .map(OrderedFloat);

    let mut bounds: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    bounds.map_or(Extent::FALLBACK, |(min, max)| Extent::new(min.0, max.0))
}
