use serde::{Deserialize, Serialize};

/// Immutable linear mapping between a data domain and a pixel range.
///
/// A degenerate domain or range maps every input to `0.0` instead of
/// producing non-finite values, so surfaces that are not sized yet stay inert.
/// Changing a scale means building a new value; the previous one can then be
/// kept around for transition interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 0.0), (0.0, 0.0))
    }
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_max(self) -> f64 {
        self.domain_end
    }

    #[must_use]
    pub fn with_domain(self, start: f64, end: f64) -> Self {
        Self::new((start, end), self.range())
    }

    #[must_use]
    pub fn with_range(self, start: f64, end: f64) -> Self {
        Self::new(self.domain(), (start, end))
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end || self.range_start == self.range_end
    }

    /// Maps a domain value into the range.
    #[must_use]
    pub fn convert(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value - self.domain_start) * (self.range_end - self.range_start)
            / (self.domain_end - self.domain_start)
            + self.range_start
    }

    /// Maps a range position back into the domain.
    #[must_use]
    pub fn invert(self, position: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (position - self.range_start) * (self.domain_end - self.domain_start)
            / (self.range_end - self.range_start)
            + self.domain_start
    }
}

/// Current scale of one axis plus the scale it replaced.
///
/// `previous` only lives while a transition needs it; `settle` and `reset`
/// drop it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleState {
    current: Option<LinearScale>,
    previous: Option<LinearScale>,
}

impl ScaleState {
    #[must_use]
    pub fn current(self) -> Option<LinearScale> {
        self.current
    }

    #[must_use]
    pub fn previous(self) -> Option<LinearScale> {
        self.previous
    }

    /// Installs `next` as the current scale and keeps the old one as previous.
    pub fn advance(&mut self, next: LinearScale) {
        self.previous = self.current.replace(next);
    }

    pub fn settle(&mut self) {
        self.previous = None;
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    #[must_use]
    pub fn upper_bound_changed(self) -> bool {
        match (self.previous, self.current) {
            (Some(previous), Some(current)) => previous.domain_max() != current.domain_max(),
            _ => true,
        }
    }
}
