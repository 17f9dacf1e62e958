//! Scalar interpolation drivers.
//!
//! - [`Tween`] – maps elapsed time to a value between `begin` and `end`
//!   through an [`Easing`] curve and reports completion.
//! - [`TweenSequence`] – runs several tweens back to back, used by multi-phase
//!   effects such as a flash that fades in and then out.
//!
//! Tweens know nothing about frames or sprites. The animation engine drives
//! one over the frame-list index range, and effects drive them over
//! intensities.

use crate::easing::Easing;

/// Eased interpolation from `begin` to `end` over `duration` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    begin: f32,
    end: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    /// Negative durations are treated as zero.
    pub fn new(begin: f32, end: f32, duration: f32, easing: Easing) -> Self {
        Self {
            begin,
            end,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return `(value, finished)`.
    ///
    /// Once elapsed time reaches the duration the tween clamps: the value is
    /// exactly `end` and `finished` stays true on every later call. A zero
    /// duration finishes on the first update. Negative `dt` does not rewind.
    pub fn update(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            return (self.end, true);
        }
        (self.value(), false)
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.end;
        }
        let t = self.elapsed / self.duration;
        self.begin + (self.end - self.begin) * self.easing.apply(t)
    }

    /// Rewind to the start, keeping the configuration.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn begin(&self) -> f32 {
        self.begin
    }

    pub fn end(&self) -> f32 {
        self.end
    }
}

/// Ordered list of tweens consumed front to back.
///
/// When the active stage completes, the next stage starts on the following
/// update. Leftover time from the finishing tick is not carried over.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSequence {
    stages: Vec<Tween>,
    index: usize,
}

impl TweenSequence {
    pub fn new(stages: impl IntoIterator<Item = Tween>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
            index: 0,
        }
    }

    /// Advance the active stage by `dt`.
    ///
    /// Returns `(value, stage_finished, all_finished)`. After the last stage
    /// completes, further updates keep returning its end value. An empty
    /// sequence is finished with a value of 0.
    pub fn update(&mut self, dt: f32) -> (f32, bool, bool) {
        let Some(stage) = self.stages.get_mut(self.index) else {
            return (self.value(), false, true);
        };
        let (value, stage_finished) = stage.update(dt);
        if stage_finished {
            self.index += 1;
        }
        (value, stage_finished, self.is_finished())
    }

    /// Value of the active stage, or the last stage's end value once done.
    pub fn value(&self) -> f32 {
        match self.stages.get(self.index) {
            Some(stage) => stage.value(),
            None => self.stages.last().map_or(0.0, Tween::end),
        }
    }

    /// Rewind every stage and restart from the first.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.index = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.stages.len()
    }

    /// Index of the active stage (equals the stage count once finished).
    pub fn current_stage(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
