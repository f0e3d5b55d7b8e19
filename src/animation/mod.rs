//! Frame-driven, cancellable transitions.

pub mod clock;
pub mod scheduler;

pub use clock::{FrameClock, ManualFrameClock, SystemFrameClock};
pub use scheduler::{
    AnimationGroup, AnimationHandle, AnimationOutcome, AnimationScheduler, AnimationSpec,
    CompletionCallback, Progress, ProgressCallback,
};

/// Y-axis crossfade duration.
pub const Y_AXIS_TRANSITION_MS: f64 = 350.0;
/// X-axis crossfade duration.
pub const X_AXIS_TRANSITION_MS: f64 = 500.0;
/// Series show, hide and rescale duration.
pub const LINE_TRANSITION_MS: f64 = 350.0;
