//! Sprite-sheet animation playback.
//!
//! An [`Animation`] is a cheap playback instance created from a shared
//! [`AnimationTemplate`]. It drives a [`Tween`] over the index range of its
//! frame list and rounds the eased value to pick which atlas frame is visible.
//!
//! # States
//!
//! ```text
//!   Stopped --run()--> Running --stop()--> Paused --run()--> Running
//!                         |
//!                 driver completes, loops exhausted
//!                         v
//!                      Finished --reset()/run()--> (restart at frame 0)
//! ```
//!
//! A frame list of length 1 is a static animation: it never changes frame and
//! is finished from the moment it is created.
//!
//! Changing the frames, duration or easing rebuilds the driver inside the
//! setter and restarts the cycle at the first frame, so timing can never go
//! stale.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::tween::Tween;
use crate::easing::Easing;
use crate::errors::Result;
use crate::render::{DrawTarget, DrawTransform};
use crate::resources::animationstore::{AnimationTemplate, FrameList};
use crate::resources::atlas::FrameRect;

/// What happens when the driver reaches the end of the frame list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPolicy {
    /// Play once and finish on the last frame.
    #[default]
    None,
    /// Restart forever.
    Infinite,
    /// Play `n` times in total, then finish.
    Count(u32),
}

impl LoopPolicy {
    /// Integer encoding: negative loops forever, zero plays once, `n` plays `n` times.
    pub fn from_count(loops: i32) -> Self {
        match loops {
            n if n < 0 => LoopPolicy::Infinite,
            0 => LoopPolicy::None,
            n => LoopPolicy::Count(n as u32),
        }
    }

    /// Boolean encoding: `true` loops forever.
    pub fn from_looped(looped: bool) -> Self {
        if looped {
            LoopPolicy::Infinite
        } else {
            LoopPolicy::None
        }
    }

    fn initial_count(self) -> Option<u32> {
        match self {
            LoopPolicy::Count(n) => Some(n),
            _ => None,
        }
    }
}

/// Externally visible playback state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Never started since creation.
    Stopped,
    Running,
    Paused,
    Finished,
}

/// Per-entity animation playback instance.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    template: Arc<AnimationTemplate>,
    frames: FrameList,
    duration: f32,
    easing: Easing,
    loop_policy: LoopPolicy,
    tween: Tween,
    current_frame: usize,
    last_frame: usize,
    paused: bool,
    finished: bool,
    has_run: bool,
    loops_remaining: Option<u32>,
}

impl Animation {
    /// Create a stopped instance positioned on the first frame.
    pub fn new(template: Arc<AnimationTemplate>) -> Self {
        let frames = FrameList::from_slice(template.frames());
        let duration = template.duration();
        let easing = template.easing();
        let loop_policy = template.loop_policy();
        let first = frames[0];
        let mut anim = Self {
            tween: Tween::new(0.0, 0.0, duration, easing),
            template,
            frames,
            duration,
            easing,
            loop_policy,
            current_frame: first,
            last_frame: first,
            paused: true,
            finished: false,
            has_run: false,
            loops_remaining: loop_policy.initial_count(),
        };
        anim.rebuild_driver();
        anim
    }

    /// Start or resume playback. A finished animation restarts from frame 0.
    pub fn run(&mut self) {
        if self.finished && !self.is_static() {
            self.reset();
        }
        self.paused = false;
        self.has_run = true;
    }

    /// Pause on the current frame.
    pub fn stop(&mut self) {
        self.paused = true;
    }

    /// Rewind to the first frame and restore the loop counter.
    ///
    /// Running or paused state is left as is.
    pub fn reset(&mut self) {
        self.rewind();
        self.last_frame = self.current_frame;
        self.loops_remaining = self.loop_policy.initial_count();
        self.finished = self.is_static();
    }

    /// Advance playback by `dt` seconds.
    ///
    /// Returns true only on the tick the animation becomes finished.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.paused || self.finished || self.is_static() {
            return false;
        }

        let (value, done) = self.tween.update(dt);
        let last_index = self.frames.len() - 1;
        let index = (value.round().max(0.0) as usize).min(last_index);
        self.last_frame = self.current_frame;
        self.current_frame = self.frames[index];

        if !done {
            return false;
        }
        match self.loop_policy {
            LoopPolicy::Infinite => {
                self.rewind();
                false
            }
            LoopPolicy::None => {
                self.finished = true;
                true
            }
            LoopPolicy::Count(_) => {
                let remaining = self.loops_remaining.unwrap_or(0).saturating_sub(1);
                self.loops_remaining = Some(remaining);
                if remaining > 0 {
                    self.rewind();
                    false
                } else {
                    self.finished = true;
                    true
                }
            }
        }
    }

    /// Draw the current frame. Pure read.
    pub fn draw<T: DrawTarget + ?Sized>(&self, target: &mut T, transform: &DrawTransform) {
        target.draw_region(self.image_key(), self.current_rect(), transform);
    }

    /// Replace the frame list. Every index must exist in the atlas.
    pub fn set_frames(&mut self, frames: &[usize]) -> Result<()> {
        self.template.atlas().check_frames(frames)?;
        self.frames = SmallVec::from_slice(frames);
        self.rebuild_driver();
        Ok(())
    }

    /// Change the cycle duration in seconds (negative is treated as zero).
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.rebuild_driver();
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
        self.rebuild_driver();
    }

    /// Change the loop policy and restore its counter.
    pub fn set_loop_policy(&mut self, loop_policy: LoopPolicy) {
        self.loop_policy = loop_policy;
        self.loops_remaining = loop_policy.initial_count();
    }

    /// Atlas index of the visible frame.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Atlas index visible before the last update.
    pub fn last_frame(&self) -> usize {
        self.last_frame
    }

    /// Image region of the visible frame.
    pub fn current_rect(&self) -> FrameRect {
        self.template
            .atlas()
            .frame(self.current_frame)
            .unwrap_or_default()
    }

    pub fn image_key(&self) -> &str {
        self.template.image_key()
    }

    pub fn state(&self) -> PlaybackState {
        if self.finished {
            PlaybackState::Finished
        } else if !self.paused {
            PlaybackState::Running
        } else if self.has_run {
            PlaybackState::Paused
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Remaining plays for a [`LoopPolicy::Count`] policy.
    pub fn loops_remaining(&self) -> Option<u32> {
        self.loops_remaining
    }

    pub fn loop_policy(&self) -> LoopPolicy {
        self.loop_policy
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn template(&self) -> &Arc<AnimationTemplate> {
        &self.template
    }

    fn is_static(&self) -> bool {
        self.frames.len() <= 1
    }

    // Back to frame 0 without touching the loop counter.
    fn rewind(&mut self) {
        self.tween.reset();
        self.current_frame = self.frames[0];
    }

    fn rebuild_driver(&mut self) {
        let end = (self.frames.len() - 1) as f32;
        self.tween = Tween::new(0.0, end, self.duration, self.easing);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::atlas::{FrameAtlas, Section};

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // 4 frames of 10x10 in one row, no padding.
    fn template(frames: &[usize], duration: f32, loop_policy: LoopPolicy) -> Arc<AnimationTemplate> {
        let atlas = FrameAtlas::new(40, 10, Section::new(0, 0, 40, 10, 0), 10, 10).unwrap();
        Arc::new(
            AnimationTemplate::new("sheet", Arc::new(atlas), frames)
                .unwrap()
                .with_duration(duration)
                .with_loop_policy(loop_policy),
        )
    }

    #[test]
    fn test_new_animation_is_stopped_on_first_frame() {
        let anim = Animation::new(template(&[2, 3], 1.0, LoopPolicy::None));
        assert_eq!(anim.state(), PlaybackState::Stopped);
        assert_eq!(anim.current_frame(), 2);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_update_is_noop_while_stopped() {
        let mut anim = Animation::new(template(&[0, 1, 2], 1.0, LoopPolicy::None));
        anim.update(0.9);
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_rounds_driver_value_to_frame_list_index() {
        let mut anim = Animation::new(template(&[3, 1, 0], 1.0, LoopPolicy::None));
        anim.run();
        anim.update(0.2); // 0.4 -> index 0
        assert_eq!(anim.current_frame(), 3);
        anim.update(0.1); // 0.6 -> index 1
        assert_eq!(anim.current_frame(), 1);
        assert_eq!(anim.last_frame(), 3);
        anim.update(0.5); // 1.6 -> index 2
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_play_once_finishes_on_last_frame() {
        let mut anim = Animation::new(template(&[0, 1, 2], 1.0, LoopPolicy::None));
        anim.run();
        assert!(anim.update(1.0));
        assert!(anim.is_finished());
        assert_eq!(anim.state(), PlaybackState::Finished);
        assert_eq!(anim.current_frame(), 2);
        assert!(!anim.update(0.3));
        assert_eq!(anim.current_frame(), 2);
    }

    #[test]
    fn test_infinite_loop_rewinds_and_never_finishes() {
        let mut anim = Animation::new(template(&[0, 1], 1.0, LoopPolicy::Infinite));
        anim.run();
        for _ in 0..10 {
            assert!(!anim.update(1.0));
        }
        assert!(!anim.is_finished());
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_half_steps_match_full_step() {
        let t = template(&[0, 1], 2.0, LoopPolicy::Infinite);
        let mut halves = Animation::new(t.clone());
        let mut whole = Animation::new(t);
        halves.run();
        whole.run();

        halves.update(1.0);
        assert_eq!(halves.current_frame(), 1);
        halves.update(1.0);
        whole.update(2.0);

        assert_eq!(halves.current_frame(), whole.current_frame());
        assert_eq!(halves.is_finished(), whole.is_finished());
        assert_eq!(halves.state(), whole.state());
    }

    #[test]
    fn test_loop_count_finishes_after_nth_completion() {
        let mut anim = Animation::new(template(&[0, 1, 2], 1.0, LoopPolicy::Count(2)));
        anim.run();
        assert_eq!(anim.loops_remaining(), Some(2));

        assert!(!anim.update(1.0));
        assert!(!anim.is_finished());
        assert_eq!(anim.loops_remaining(), Some(1));

        assert!(anim.update(1.0));
        assert!(anim.is_finished());
        assert_eq!(anim.loops_remaining(), Some(0));
    }

    #[test]
    fn test_static_animation_never_changes() {
        let mut anim = Animation::new(template(&[3], 1.0, LoopPolicy::Infinite));
        assert!(anim.is_finished());
        anim.run();
        for _ in 0..5 {
            assert!(!anim.update(0.7));
        }
        assert_eq!(anim.current_frame(), 3);
        anim.reset();
        assert!(anim.is_finished());
    }

    #[test]
    fn test_stop_freezes_position() {
        let mut anim = Animation::new(template(&[0, 1, 2, 3], 1.0, LoopPolicy::None));
        anim.run();
        anim.update(0.5);
        let frame = anim.current_frame();
        anim.stop();
        assert_eq!(anim.state(), PlaybackState::Paused);
        anim.update(0.4);
        assert_eq!(anim.current_frame(), frame);
        anim.run();
        assert_eq!(anim.state(), PlaybackState::Running);
    }

    #[test]
    fn test_reset_after_run_then_zero_update() {
        let mut anim = Animation::new(template(&[1, 2, 3], 1.0, LoopPolicy::None));
        anim.run();
        anim.update(0.6);
        anim.reset();
        anim.update(0.0);
        assert_eq!(anim.current_frame(), 1);
        assert!(!anim.is_finished());
        assert_eq!(anim.state(), PlaybackState::Running);
    }

    #[test]
    fn test_reset_preserves_paused_state() {
        let mut anim = Animation::new(template(&[0, 1], 1.0, LoopPolicy::None));
        anim.run();
        anim.update(0.9);
        anim.stop();
        anim.reset();
        assert_eq!(anim.state(), PlaybackState::Paused);
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_run_restarts_finished_animation() {
        let mut anim = Animation::new(template(&[0, 1], 1.0, LoopPolicy::Count(1)));
        anim.run();
        anim.update(1.0);
        assert!(anim.is_finished());
        anim.run();
        assert!(!anim.is_finished());
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.loops_remaining(), Some(1));
    }

    #[test]
    fn test_set_duration_resyncs_driver() {
        let mut anim = Animation::new(template(&[0, 1, 2], 1.0, LoopPolicy::None));
        anim.run();
        anim.update(0.5);
        anim.set_duration(4.0);
        assert!(approx_eq(anim.duration(), 4.0));
        assert_eq!(anim.current_frame(), 0);
        anim.update(1.0); // 0.5 of index range -> index 1 under 4s
        assert_eq!(anim.current_frame(), 1);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_set_frames_validates_and_resyncs() {
        let mut anim = Animation::new(template(&[0, 1], 1.0, LoopPolicy::None));
        assert!(anim.set_frames(&[0, 9]).is_err());
        assert_eq!(anim.frames(), &[0, 1]);

        anim.set_frames(&[3, 2, 1, 0]).unwrap();
        anim.run();
        anim.update(1.0);
        assert_eq!(anim.current_frame(), 0);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_set_frames_from_static_to_animated() {
        let mut anim = Animation::new(template(&[0], 1.0, LoopPolicy::None));
        assert!(anim.is_finished());
        anim.set_frames(&[0, 1]).unwrap();
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_set_easing_changes_pacing() {
        let mut anim = Animation::new(template(&[0, 1, 2], 1.0, LoopPolicy::None));
        anim.set_easing(Easing::InQuart);
        anim.run();
        anim.update(0.5); // 0.0625 * 2 = 0.125 -> index 0
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.easing(), Easing::InQuart);
    }

    #[test]
    fn test_overshooting_easing_stays_in_range() {
        let mut anim = Animation::new(template(&[0, 1], 1.0, LoopPolicy::None));
        anim.set_easing(Easing::InBack);
        anim.run();
        let mut t = 0.0;
        while t < 1.0 {
            anim.update(0.05);
            assert!(anim.current_frame() <= 1);
            t += 0.05;
        }
    }

    #[test]
    fn test_zero_duration_finishes_on_first_update() {
        let mut anim = Animation::new(template(&[0, 1, 2], 0.0, LoopPolicy::None));
        anim.run();
        assert!(anim.update(0.0));
        assert_eq!(anim.current_frame(), 2);
    }

    #[test]
    fn test_current_rect_follows_frame() {
        let mut anim = Animation::new(template(&[0, 3], 1.0, LoopPolicy::None));
        assert_eq!(anim.current_rect(), FrameRect::new(0, 0, 10, 10));
        anim.run();
        anim.update(1.0);
        assert_eq!(anim.current_rect(), FrameRect::new(30, 0, 10, 10));
    }

    #[test]
    fn test_loop_policy_encodings() {
        assert_eq!(LoopPolicy::from_count(-1), LoopPolicy::Infinite);
        assert_eq!(LoopPolicy::from_count(0), LoopPolicy::None);
        assert_eq!(LoopPolicy::from_count(3), LoopPolicy::Count(3));
        assert_eq!(LoopPolicy::from_looped(true), LoopPolicy::Infinite);
        assert_eq!(LoopPolicy::from_looped(false), LoopPolicy::None);
    }
}
