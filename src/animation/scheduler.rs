use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::render::SurfaceTarget;

/// Timing of one animation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl AnimationSpec {
    #[must_use]
    pub const fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Time passed since the end of the delay, plus the total duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl Progress {
    /// Completed share in `[0, 1]`; a zero duration counts as done.
    #[must_use]
    pub fn fraction(self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Why a completion callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationOutcome {
    /// Elapsed time ran past `delay + duration`.
    Completed,
    /// `stop` was called, or a progress callback failed.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Logical concern owning a set of handles.
///
/// Starting a new transition for a concern first stops whatever that concern
/// still has running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationGroup {
    XAxis,
    YAxis,
    Line { target: SurfaceTarget, series: usize },
}

pub type ProgressCallback<C> = Box<dyn FnMut(&mut C, Progress) -> ChartResult<()>>;
pub type CompletionCallback<C> = Box<dyn FnOnce(&mut C, AnimationOutcome)>;

struct Animation<C> {
    handle: AnimationHandle,
    start_ms: f64,
    spec: AnimationSpec,
    progress: ProgressCallback<C>,
    on_end: Option<CompletionCallback<C>>,
    stopped: bool,
}

/// Cooperative frame-driven animation driver.
///
/// `C` is the state the callbacks mutate; it is lent to every callback for
/// the duration of one `tick`, so callbacks never reach back into the
/// scheduler itself.
pub struct AnimationScheduler<C> {
    next_id: u64,
    animations: Vec<Animation<C>>,
    groups: IndexMap<AnimationGroup, SmallVec<[AnimationHandle; 2]>>,
}

impl<C> Default for AnimationScheduler<C> {
    fn default() -> Self {
        Self {
            next_id: 1,
            animations: Vec::new(),
            groups: IndexMap::new(),
        }
    }
}

impl<C> AnimationScheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an ungrouped animation starting at `now_ms`.
    pub fn animate(
        &mut self,
        now_ms: f64,
        spec: AnimationSpec,
        progress: impl FnMut(&mut C, Progress) -> ChartResult<()> + 'static,
    ) -> AnimationHandle {
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.animations.push(Animation {
            handle,
            start_ms: now_ms,
            spec,
            progress: Box::new(progress),
            on_end: None,
            stopped: false,
        });
        trace!(
            handle = handle.0,
            duration_ms = spec.duration_ms,
            delay_ms = spec.delay_ms,
            "animation scheduled"
        );
        handle
    }

    /// Stops every handle previously registered under `group`.
    pub fn begin_group(&mut self, group: AnimationGroup) {
        let Some(handles) = self.groups.get_mut(&group) else {
            return;
        };
        let handles = std::mem::take(handles);
        for handle in handles {
            self.stop(handle);
        }
    }

    /// Registers an animation under `group` without stopping its siblings.
    ///
    /// Callers start a transition with `begin_group` and then add each of
    /// its handles through this method.
    pub fn animate_in(
        &mut self,
        group: AnimationGroup,
        now_ms: f64,
        spec: AnimationSpec,
        progress: impl FnMut(&mut C, Progress) -> ChartResult<()> + 'static,
    ) -> AnimationHandle {
        let handle = self.animate(now_ms, spec, progress);
        self.groups.entry(group).or_default().push(handle);
        handle
    }

    /// Sets the single completion callback, replacing an earlier one.
    ///
    /// Returns `false` when the handle already finished; the callback is then
    /// dropped without running.
    pub fn on_end(
        &mut self,
        handle: AnimationHandle,
        callback: impl FnOnce(&mut C, AnimationOutcome) + 'static,
    ) -> bool {
        match self.find_mut(handle) {
            Some(animation) => {
                animation.on_end = Some(Box::new(callback));
                true
            }
            None => false,
        }
    }

    /// Flags the handle; its completion fires on the next tick. Idempotent.
    pub fn stop(&mut self, handle: AnimationHandle) -> bool {
        match self.find_mut(handle) {
            Some(animation) => {
                animation.stopped = true;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.animations
            .iter()
            .any(|animation| animation.handle == handle && !animation.stopped)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.animations
            .iter()
            .filter(|animation| !animation.stopped)
            .count()
    }

    /// Handles tracked for `group` since its last `begin_group`.
    #[must_use]
    pub fn group_handles(&self, group: AnimationGroup) -> &[AnimationHandle] {
        self.groups
            .get(&group)
            .map(|handles| handles.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advances every animation to `now_ms` in creation order.
    ///
    /// Running animations get their progress callback; finished or stopped
    /// ones get their completion callback exactly once and are dropped.
    /// Returns the number of animations still registered afterwards.
    pub fn tick(&mut self, now_ms: f64, context: &mut C) -> usize {
        let mut animations = std::mem::take(&mut self.animations);

        animations.retain_mut(|animation| {
            let elapsed = now_ms - animation.start_ms - animation.spec.delay_ms;
            if animation.stopped || elapsed > animation.spec.duration_ms {
                let outcome = if animation.stopped {
                    AnimationOutcome::Stopped
                } else {
                    AnimationOutcome::Completed
                };
                if let Some(on_end) = animation.on_end.take() {
                    on_end(&mut *context, outcome);
                }
                trace!(handle = animation.handle.0, ?outcome, "animation finished");
                return false;
            }

            if elapsed >= 0.0 {
                let progress = Progress {
                    elapsed_ms: elapsed,
                    duration_ms: animation.spec.duration_ms,
                };
                if let Err(err) = (animation.progress)(&mut *context, progress) {
                    warn!(
                        handle = animation.handle.0,
                        error = %err,
                        "animation progress failed; stopping"
                    );
                    animation.stopped = true;
                }
            }
            true
        });

        // Nothing can register while the list is taken, but keep any
        // additions rather than silently dropping them.
        animations.append(&mut self.animations);
        self.animations = animations;

        let live = &self.animations;
        self.groups.retain(|_, handles| {
            handles.retain(|handle| live.iter().any(|animation| animation.handle == *handle));
            !handles.is_empty()
        });

        self.animations.len()
    }

    fn find_mut(&mut self, handle: AnimationHandle) -> Option<&mut Animation<C>> {
        self.animations
            .iter_mut()
            .find(|animation| animation.handle == handle)
    }
}

impl<C> std::fmt::Debug for AnimationScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("next_id", &self.next_id)
            .field("live", &self.animations.len())
            .field("groups", &self.groups.len())
            .finish()
    }
}
