//! Short-lived visual effects layered over a sprite.
//!
//! - [`ShakeEffect`] – random displacement for a fixed time.
//! - [`FlashEffect`] – white overlay that fades in then out.
//!
//! Effects live in an [`Effects`] list on the entity. The effects system ticks
//! the list and drops finished entries; the render pass folds whatever is
//! still running into the sprite's [`DrawTransform`].

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use glam::Vec2;

use crate::components::tween::{Tween, TweenSequence};
use crate::easing::Easing;
use crate::render::DrawTransform;

/// Random jitter of up to half the magnitude in each direction.
#[derive(Debug, Clone)]
pub struct ShakeEffect {
    magnitude: Vec2,
    displace: Vec2,
    duration: f32,
    runtime: f32,
    running: bool,
    rng: Rng,
}

impl ShakeEffect {
    pub fn new(duration: f32, magnitude_x: f32, magnitude_y: f32) -> Self {
        Self {
            magnitude: Vec2::new(magnitude_x, magnitude_y),
            displace: Vec2::ZERO,
            duration: duration.max(0.0),
            runtime: 0.0,
            running: false,
            rng: Rng::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    /// Returns true once the shake has run for its whole duration.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.displace = Vec2::new(
            self.rng.f32() * self.magnitude.x - self.magnitude.x / 2.0,
            self.rng.f32() * self.magnitude.y - self.magnitude.y / 2.0,
        );
        self.runtime += dt.max(0.0);
        if self.runtime >= self.duration {
            self.runtime = self.duration;
            self.running = false;
        }
        !self.running
    }

    pub fn contribute(&self, transform: &mut DrawTransform) {
        if self.running {
            transform.offset += self.displace;
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.runtime = 0.0;
        self.displace = Vec2::ZERO;
        self.running = false;
    }

    pub fn displacement(&self) -> Vec2 {
        self.displace
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Overlay that rises from 0 to 1 over the first half and falls back over the second.
#[derive(Debug, Clone)]
pub struct FlashEffect {
    sequence: TweenSequence,
    value: f32,
    running: bool,
    finished: bool,
}

impl FlashEffect {
    pub fn new(duration: f32, ease_in: Easing, ease_out: Easing) -> Self {
        let half = duration.max(0.0) / 2.0;
        Self {
            sequence: TweenSequence::new([
                Tween::new(0.0, 1.0, half, ease_in),
                Tween::new(1.0, 0.0, half, ease_out),
            ]),
            value: 0.0,
            running: false,
            finished: false,
        }
    }

    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        if self.finished {
            return true;
        }
        let (value, _, finished) = self.sequence.update(dt);
        self.value = value;
        self.finished = finished;
        finished
    }

    pub fn contribute(&self, transform: &mut DrawTransform) {
        if self.running && !self.finished {
            transform.flash = transform.flash.max(self.value);
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.sequence.reset();
        self.value = 0.0;
        self.finished = false;
        self.running = false;
    }

    /// Current overlay intensity.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    Shake(ShakeEffect),
    Flash(FlashEffect),
}

impl Effect {
    pub fn update(&mut self, dt: f32) -> bool {
        match self {
            Effect::Shake(e) => e.update(dt),
            Effect::Flash(e) => e.update(dt),
        }
    }

    pub fn contribute(&self, transform: &mut DrawTransform) {
        match self {
            Effect::Shake(e) => e.contribute(transform),
            Effect::Flash(e) => e.contribute(transform),
        }
    }

    pub fn start(&mut self) {
        match self {
            Effect::Shake(e) => e.start(),
            Effect::Flash(e) => e.start(),
        }
    }

    pub fn stop(&mut self) {
        match self {
            Effect::Shake(e) => e.stop(),
            Effect::Flash(e) => e.stop(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Effect::Shake(e) => e.reset(),
            Effect::Flash(e) => e.reset(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Effect::Shake(e) => e.is_running(),
            Effect::Flash(e) => e.is_running(),
        }
    }
}

impl From<ShakeEffect> for Effect {
    fn from(e: ShakeEffect) -> Self {
        Effect::Shake(e)
    }
}

impl From<FlashEffect> for Effect {
    fn from(e: FlashEffect) -> Self {
        Effect::Flash(e)
    }
}

/// Ordered list of effects applied to an entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Effects {
    effects: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset, start and append an effect.
    pub fn apply(&mut self, effect: impl Into<Effect>) {
        let mut effect = effect.into();
        effect.reset();
        effect.start();
        self.effects.push(effect);
    }

    /// Tick every effect and drop the finished or stopped ones, keeping order.
    ///
    /// Effects are started by [`Effects::apply`], so an entry that is not
    /// running was stopped and will never finish on its own.
    pub fn update(&mut self, dt: f32) {
        self.effects.retain_mut(|e| e.is_running() && !e.update(dt));
    }

    pub fn contribute(&self, transform: &mut DrawTransform) {
        for effect in &self.effects {
            effect.contribute(transform);
        }
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Effect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
