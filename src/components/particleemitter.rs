//! Fixed-capacity particle pool.
//!
//! A [`ParticleEmitter`] owns every particle it will ever use: the backing
//! storage is allocated once at construction and live particles are the first
//! `active_count` slots. Spawning resets the next free slot in place; killing
//! swaps the dead slot with the last live one and shrinks the live range.
//!
//! ```text
//!   [ live | live | live | dead | dead ]
//!                         ^ active_count
//! ```
//!
//! Live particles do not keep their relative order across kills.
//!
//! # How It Works
//!
//! Each [`update`](ParticleEmitter::update):
//! 1. If the emitter is active, `rate * dt` is added to a spawn accumulator
//!    and one particle is spawned per whole unit while slots remain. The
//!    fractional remainder carries to the next tick.
//! 2. Every live particle loses `dt` of lifetime. Expired ones are swap-removed,
//!    the rest move by `velocity * dt` and advance their sub-animation.
//!
//! Turning emission off with [`show(false)`](ParticleEmitter::show) only stops
//! spawning; particles already in flight keep aging out.
//!
//! # Related
//!
//! - [`crate::systems::particleemitter::particle_emitter_system`] – drives every emitter
//! - [`crate::events::particles::EmitterDrainedEvent`] – fired when the pool empties

use std::f32::consts::TAU;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec2;
use log::trace;

use crate::components::animation::Animation;
use crate::errors::{Result, SpriteFlowError};
use crate::render::{DrawTarget, DrawTransform};
use crate::resources::animationstore::AnimationStore;
use crate::resources::assetconfig::EmitterConfig;
use crate::resources::atlas::FrameRect;
use crate::resources::imagestore::ImageProvider;

/// What a particle looks like.
#[derive(Debug, Clone)]
pub enum ParticleVisual {
    /// Nothing to draw; the host may still render a point.
    Point,
    /// A fixed region of an image.
    Image { image_key: Arc<str>, source: FrameRect },
    /// An owned animation, restarted on every spawn.
    Animated(Box<Animation>),
}

impl ParticleVisual {
    /// Resolve the visual described by an emitter config.
    ///
    /// `animation` wins over `image`; an image is drawn whole.
    pub fn from_config(
        cfg: &EmitterConfig,
        animations: &AnimationStore,
        images: &impl ImageProvider,
    ) -> Result<Self> {
        if let Some(name) = &cfg.animation {
            return animations
                .instantiate(name)
                .map(|anim| ParticleVisual::Animated(Box::new(anim)));
        }
        if let Some(name) = &cfg.image {
            let size = images
                .image_size(name)
                .ok_or_else(|| SpriteFlowError::ImageNotLoaded(name.clone()))?;
            return Ok(ParticleVisual::Image {
                image_key: Arc::from(name.as_str()),
                source: FrameRect::new(0, 0, size.width, size.height),
            });
        }
        Ok(ParticleVisual::Point)
    }

    fn restart(&mut self) {
        if let ParticleVisual::Animated(anim) = self {
            anim.reset();
            anim.run();
        }
    }

    fn update(&mut self, dt: f32) {
        if let ParticleVisual::Animated(anim) = self {
            anim.update(dt);
        }
    }

    fn draw<T: DrawTarget + ?Sized>(&self, target: &mut T, transform: &DrawTransform) {
        match self {
            ParticleVisual::Point => target.draw_point(transform),
            ParticleVisual::Image { image_key, source } => {
                target.draw_region(image_key, *source, transform)
            }
            ParticleVisual::Animated(anim) => anim.draw(target, transform),
        }
    }
}

/// One pooled particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining lifetime in seconds.
    pub ttl: f32,
    pub visual: ParticleVisual,
    serial: u64,
}

impl Particle {
    fn new(visual: ParticleVisual) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ttl: 0.0,
            visual,
            serial: 0,
        }
    }

    /// Spawn sequence number, unique within the owning emitter.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// Particle pool component.
///
/// # Fields
///
/// - `particles` - backing storage, `capacity` slots, live prefix of `active_count`
/// - `origin` - spawn point for new particles
/// - `offset` - offset from the owner's `MapPosition`, applied by the system
/// - `rate` - particles per second while active
/// - `angle_range` / `speed_range` / `lifetime_range` - (min, max) sampling ranges
#[derive(Component, Debug, Clone)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    active_count: usize,
    origin: Vec2,
    /// Offset from owner's MapPosition.
    pub offset: Vec2,
    rate: f32,
    spawn_accumulator: f32,
    angle_range: (f32, f32),
    speed_range: (f32, f32),
    lifetime_range: (f32, f32),
    active: bool,
    rng: Rng,
    spawned_total: u64,
}

impl ParticleEmitter {
    /// Allocate a pool of `capacity` particles.
    ///
    /// The emitter starts inactive with angles over the full circle, speed in
    /// `[25, 75)` and lifetime in `[0.5, 1)` seconds.
    pub fn new(visual: ParticleVisual, capacity: usize, rate: f32) -> Self {
        Self {
            particles: vec![Particle::new(visual); capacity],
            active_count: 0,
            origin: Vec2::ZERO,
            offset: Vec2::ZERO,
            rate: rate.max(0.0),
            spawn_accumulator: 0.0,
            angle_range: (0.0, TAU),
            speed_range: (25.0, 75.0),
            lifetime_range: (0.5, 1.0),
            active: false,
            rng: Rng::new(),
            spawned_total: 0,
        }
    }

    pub fn from_config(cfg: &EmitterConfig, visual: ParticleVisual) -> Self {
        Self::new(visual, cfg.capacity, cfg.rate)
            .with_angle_range(cfg.angle.0, cfg.angle.1)
            .with_speed_range(cfg.speed.0, cfg.speed.1)
            .with_lifetime_range(cfg.lifetime.0, cfg.lifetime.1)
            .with_offset(Vec2::new(cfg.offset.0, cfg.offset.1))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn with_angle_range(mut self, min: f32, max: f32) -> Self {
        self.angle_range = ordered(min, max);
        self
    }

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = ordered(min, max);
        self
    }

    pub fn with_lifetime_range(mut self, min: f32, max: f32) -> Self {
        self.lifetime_range = ordered(min, max);
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.set_origin(x, y);
        self
    }

    /// Advance the pool by `dt` seconds.
    ///
    /// While active, `rate * dt` is added to the spawn accumulator and one
    /// particle is spawned per whole unit until the pool is full. Whatever
    /// backlog remains is capped at the pool capacity, so a pool that stays
    /// full does not refill in one oversized burst once slots free up.
    /// Inactive emitters still age and move their live particles.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        if self.active {
            self.spawn_accumulator += self.rate * dt;
            while self.spawn_accumulator >= 1.0 && self.spawn() {
                self.spawn_accumulator -= 1.0;
            }
            // Saturated: keep at most one pool's worth of backlog.
            let capacity = self.particles.len() as f32;
            if self.spawn_accumulator > capacity {
                self.spawn_accumulator = capacity;
            }
        }

        let mut i = 0;
        while i < self.active_count {
            let p = &mut self.particles[i];
            p.ttl -= dt;
            if p.ttl <= 0.0 {
                // Slot i now holds the former last live particle; do not advance.
                self.kill(i);
                continue;
            }
            p.position += p.velocity * dt;
            p.visual.update(dt);
            i += 1;
        }
    }

    /// Spawn until the pool is full. Returns how many particles were spawned.
    pub fn burst(&mut self) -> usize {
        let mut spawned = 0;
        while self.spawn() {
            spawned += 1;
        }
        trace!(
            "burst spawned {} particles ({}/{})",
            spawned,
            self.active_count,
            self.particles.len()
        );
        spawned
    }

    /// Kill the live particle at `index`. Returns false if it is not live.
    pub fn kill(&mut self, index: usize) -> bool {
        if index >= self.active_count {
            return false;
        }
        self.active_count -= 1;
        self.particles.swap(index, self.active_count);
        true
    }

    /// Kill every particle and drop pending spawns.
    pub fn clear(&mut self) {
        self.active_count = 0;
        self.spawn_accumulator = 0.0;
    }

    /// Draw every live particle at its own position.
    pub fn draw<T: DrawTarget + ?Sized>(&self, target: &mut T, transform: &DrawTransform) {
        for p in self.particles() {
            let t = DrawTransform {
                position: p.position,
                ..*transform
            };
            p.visual.draw(target, &t);
        }
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x, y);
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Start or stop emission. Live particles are unaffected.
    pub fn show(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn active_particles(&self) -> usize {
        self.active_count
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn is_full(&self) -> bool {
        self.active_count >= self.particles.len()
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }

    /// Live particles, in no particular order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.active_count]
    }

    fn spawn(&mut self) -> bool {
        if self.is_full() {
            return false;
        }

        let ttl = random_f32_range(&mut self.rng, self.lifetime_range.0, self.lifetime_range.1);
        let angle = random_f32_range(&mut self.rng, self.angle_range.0, self.angle_range.1);
        let speed = random_f32_range(&mut self.rng, self.speed_range.0, self.speed_range.1);

        let p = &mut self.particles[self.active_count];
        p.ttl = ttl.max(f32::MIN_POSITIVE);
        p.position = self.origin;
        p.velocity = Vec2::from_angle(angle) * speed;
        p.serial = self.spawned_total;
        p.visual.restart();

        self.active_count += 1;
        self.spawned_total += 1;
        true
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}
