//! Optional hooks for host applications.
//!
//! Extensions observe the engine; they are never on the render path.

pub mod observers;

pub use observers::{ChannelObserver, ChartEvent, ChartObserver, ObserverContext};
