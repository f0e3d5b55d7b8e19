pub mod dataset;
pub mod extent;
pub mod nearest;
pub mod scale;
pub mod types;

pub use dataset::{Dataset, RawColumns, RawDataset, Series};
pub use extent::{Extent, find_extent};
pub use nearest::nearest_index;
pub use scale::{LinearScale, ScaleState};
pub use types::{ChartLayout, SurfaceSize, Viewport};
