use serde::{Deserialize, Serialize};

/// Pixel size of one drawing surface.
///
/// A zero-sized surface is legal: it simply has not been laid out yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Sizes of the main plot surfaces and of the overview strip under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartLayout {
    pub main: SurfaceSize,
    pub overview: SurfaceSize,
}

impl ChartLayout {
    #[must_use]
    pub const fn new(main: SurfaceSize, overview: SurfaceSize) -> Self {
        Self { main, overview }
    }
}

/// Visible index window `[left, right]` into the x values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    left: usize,
    right: usize,
}

impl Viewport {
    /// Builds a window, swapping the bounds if they arrive inverted.
    #[must_use]
    pub fn new(left: usize, right: usize) -> Self {
        if left <= right {
            Self { left, right }
        } else {
            Self {
                left: right,
                right: left,
            }
        }
    }

    #[must_use]
    pub fn full(len: usize) -> Self {
        Self::new(0, len.saturating_sub(1))
    }

    #[must_use]
    pub fn left(self) -> usize {
        self.left
    }

    #[must_use]
    pub fn right(self) -> usize {
        self.right
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.left && index <= self.right
    }

    #[must_use]
    pub fn index_count(self) -> usize {
        self.right - self.left + 1
    }
}
