// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Pool-based particle emitter
//!
//! An [`Emitter`] owns a fixed-capacity pool of [`Particle`] records and the
//! [`EmitterConfig`] that governs them. The pool is partitioned at all times
//! into a contiguous active prefix of `particle_count` particles and a
//! dormant suffix; spawning claims the first dormant slot and retiring swaps
//! the dead particle with the last active one.
//!
//! # Frame Step
//!
//! Each [`Emitter::update`] call on an active emitter:
//!
//! 1. records the frame in the frame-rate monitor;
//! 2. spawns one particle every `1 / emission_rate` seconds of accumulated
//!    time while the pool has room;
//! 3. advances the elapsed time and deactivates the emitter once its
//!    duration is reached;
//! 4. integrates the particles that were active when the call began, then
//!    retires every active particle whose life has run out.
//!
//! Particles spawned during a call start aging on the next call. An inactive
//! emitter keeps aging and retiring the particles it still owns but emits
//! nothing.
//!
//! # Example
//!
//! ```
//! use particle_engine::{ConfigOverrides, Emitter};
//!
//! let mut emitter = Emitter::new(&ConfigOverrides {
//!     total_particles: Some(10),
//!     emission_rate: Some(10.0),
//!     life: Some(1.0),
//!     active: Some(true),
//!     ..Default::default()
//! });
//!
//! emitter.update(0.5);
//! assert_eq!(emitter.particle_count(), 5);
//! ```

use std::fmt;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{ConfigOverrides, EmitterConfig};
use crate::particle::{Color, Particle};
use crate::presets::{CanvasSize, Preset};
use crate::shape::PositionTransform;
use crate::telemetry::FrameRateMonitor;

/// Active particle count from which integration is split across threads
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Particles integrated per parallel work item
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 1024;

/// Owner of a particle pool and its configuration
pub struct Emitter {
    config: EmitterConfig,
    pool: Vec<Particle>,
    particle_count: usize,
    elapsed: f64,
    emit_counter: f64,
    rng: StdRng,
    transform: Option<Box<dyn PositionTransform>>,
    frame_rate: FrameRateMonitor,
}

impl Emitter {
    /// Create an emitter from engine defaults plus `overrides`
    pub fn new(overrides: &ConfigOverrides) -> Self {
        Self::with_config(EmitterConfig::default().merged(overrides))
    }

    /// Create an emitter from a preset placed on a canvas of the given size
    pub fn from_preset(preset: &Preset, size: CanvasSize) -> Self {
        Self::new(&preset.configured_for(size))
    }

    /// Create an emitter running exactly `config`
    pub fn with_config(config: EmitterConfig) -> Self {
        let mut emitter = Emitter {
            config,
            pool: Vec::new(),
            particle_count: 0,
            elapsed: 0.0,
            emit_counter: 0.0,
            rng: StdRng::from_os_rng(),
            transform: None,
            frame_rate: FrameRateMonitor::new(),
        };
        emitter.reset();
        emitter
    }

    /// Reseed the random source for reproducible spawns
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Install a custom position transform
    pub fn with_position_transform(mut self, transform: Box<dyn PositionTransform>) -> Self {
        self.set_position_transform(transform);
        self
    }

    /// Install a custom position transform, taking precedence over the
    /// configured spawn shape
    pub fn set_position_transform(&mut self, transform: Box<dyn PositionTransform>) {
        log::debug!("Using position transform '{}'", transform.name());
        self.transform = Some(transform);
    }

    /// Remove the custom position transform
    pub fn clear_position_transform(&mut self) {
        self.transform = None;
    }

    /// Name of the transform applied to spawn jitter, if any
    pub fn position_transform_name(&self) -> Option<&str> {
        self.position_transform().map(|transform| transform.name())
    }

    fn position_transform(&self) -> Option<&dyn PositionTransform> {
        resolve_transform(&self.transform, &self.config)
    }

    /// Replace the whole configuration with defaults plus `overrides`
    ///
    /// Drops any custom position transform and rebuilds the pool.
    pub fn configure(&mut self, overrides: &ConfigOverrides) {
        self.config = EmitterConfig::default().merged(overrides);
        self.transform = None;
        self.reset();
    }

    /// Replace the whole configuration with `config` and rebuild the pool
    pub fn set_config(&mut self, config: EmitterConfig) {
        self.config = config;
        self.reset();
    }

    /// Apply `overrides` on top of the current configuration and rebuild
    /// the pool
    pub fn overlay(&mut self, overrides: &ConfigOverrides) {
        self.config = self.config.merged(overrides);
        self.reset();
    }

    /// Discard all particles and restart the emitter
    ///
    /// The pool is reallocated with `total_particles` dormant particles and
    /// the active count, elapsed time and emission accumulator are zeroed.
    pub fn reset(&mut self) {
        self.pool = (0..self.config.total_particles)
            .map(|_| Particle::new())
            .collect();
        self.particle_count = 0;
        self.elapsed = 0.0;
        self.emit_counter = 0.0;

        log::debug!("Emitter reset with {} particle slots", self.pool.len());
    }

    /// Capacity of the pool
    pub fn total_particles(&self) -> usize {
        self.config.total_particles
    }

    /// Change the pool capacity
    ///
    /// Rebuilds the pool when the capacity changes; setting the current
    /// capacity again leaves the pool alone.
    pub fn set_total_particles(&mut self, total: usize) {
        if total != self.config.total_particles {
            self.config.total_particles = total;
            self.reset();
        }
    }

    /// Current configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Whether the emitter is emitting
    pub fn is_active(&self) -> bool {
        self.config.active
    }

    /// Start or stop emission without touching the pool
    pub fn set_active(&mut self, active: bool) {
        self.config.active = active;
    }

    /// Whether the emitter is active or still owns live particles
    pub fn is_alive(&self) -> bool {
        self.config.active || self.particle_count > 0
    }

    /// Move the emitter without touching the pool
    ///
    /// Live particles keep their positions; radial forces are measured from
    /// the new position from the next update on.
    pub fn set_position(&mut self, pos: DVec2) {
        self.config.pos = pos;
    }

    /// Seconds accounted while active since the last reset
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of active particles at the front of the pool
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Whether every slot of the pool holds an active particle
    pub fn is_full(&self) -> bool {
        self.particle_count == self.pool.len()
    }

    /// The whole pool: active particles first, then dormant ones
    ///
    /// Dormant particles keep whatever state they last had; only the first
    /// [`particle_count`](Self::particle_count) entries should be drawn.
    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    /// Mutable access to the pool
    ///
    /// Setting an active particle's `life` to zero or below retires it on
    /// the next update.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.pool
    }

    /// The active prefix of the pool
    pub fn active_particles(&self) -> &[Particle] {
        &self.pool[..self.particle_count]
    }

    /// Frame-rate telemetry fed by [`update`](Self::update)
    pub fn frame_rate(&self) -> &FrameRateMonitor {
        &self.frame_rate
    }

    /// Advance the simulation by `delta` seconds
    pub fn update(&mut self, delta: f64) {
        if !self.config.active {
            if self.particle_count > 0 {
                self.step_particles(delta, self.particle_count);
            }
            return;
        }

        self.frame_rate.record(delta);

        let live = self.particle_count;

        if self.config.emission_rate > 0.0 {
            let interval = 1.0 / self.config.emission_rate;
            self.emit_counter += delta;

            while !self.is_full() && self.emit_counter >= interval {
                self.add_particle();
                self.emit_counter -= interval;
            }
        }

        self.elapsed += delta;
        if self.config.duration.reached(self.elapsed) {
            log::debug!("Emitter duration reached after {:.3}s", self.elapsed);
            self.config.active = false;
        }

        self.step_particles(delta, live);
    }

    /// Integrate the first `live` particles, then retire the dead
    fn step_particles(&mut self, delta: f64, live: usize) {
        let origin = self.config.pos;
        let gravity = self.config.gravity;

        integrate_particles(&mut self.pool[..live], delta, origin, gravity);
        self.retire_expired();
    }

    /// Swap every dead particle out of the active prefix
    ///
    /// The scan index stays put after a swap so the particle moved into the
    /// slot is examined too.
    fn retire_expired(&mut self) {
        let mut index = 0;
        while index < self.particle_count {
            if self.pool[index].is_alive() {
                index += 1;
            } else {
                self.particle_count -= 1;
                self.pool.swap(index, self.particle_count);
            }
        }
    }

    /// Claim the first dormant particle and initialize it
    ///
    /// Returns `false` without touching anything when the pool is full.
    fn add_particle(&mut self) -> bool {
        if self.is_full() {
            return false;
        }

        let transform = resolve_transform(&self.transform, &self.config);
        init_particle(
            &mut self.pool[self.particle_count],
            &self.config,
            transform,
            &mut self.rng,
        );
        self.particle_count += 1;

        true
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::new(&ConfigOverrides::default())
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("config", &self.config)
            .field("particle_count", &self.particle_count)
            .field("total_particles", &self.pool.len())
            .field("elapsed", &self.elapsed)
            .field("transform", &self.position_transform_name())
            .finish_non_exhaustive()
    }
}

fn resolve_transform<'a>(
    custom: &'a Option<Box<dyn PositionTransform>>,
    config: &'a EmitterConfig,
) -> Option<&'a dyn PositionTransform> {
    match custom {
        Some(transform) => Some(&**transform),
        None => config
            .spawn_shape
            .as_ref()
            .map(|shape| shape as &dyn PositionTransform),
    }
}

/// Uniform sample in `[-1, 1]`
fn random11(rng: &mut StdRng) -> f64 {
    rng.random_range(-1.0..=1.0)
}

/// `value`, or zero when the value is NaN
fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Per-second rate covering `change` over `life` seconds, zero for no life
fn per_second(change: f64, life: f64) -> f64 {
    if life > 0.0 {
        change / life
    } else {
        0.0
    }
}

fn jitter_color(base: Color, variance: Color, rng: &mut StdRng) -> Color {
    base + variance
        * Color::new(random11(rng), random11(rng), random11(rng), random11(rng))
}

/// Reinitialize `particle` from the configuration
///
/// Every perturbed field draws its own sample.
fn init_particle(
    particle: &mut Particle,
    config: &EmitterConfig,
    transform: Option<&dyn PositionTransform>,
    rng: &mut StdRng,
) {
    particle.texture = config.texture;
    particle.texture_enabled = config.texture_enabled;
    particle.texture_additive = config.texture_additive;

    let mut jitter = DVec2::new(
        config.pos_var.x * random11(rng),
        config.pos_var.y * random11(rng),
    );
    if let Some(transform) = transform {
        jitter = transform.transform(jitter);
    }
    particle.pos = config.pos + jitter;

    let angle = config.angle + config.angle_var * random11(rng);
    let speed = config.speed + config.speed_var * random11(rng);
    particle.set_velocity(angle, speed);

    particle.radial_accel = or_zero(config.radial_accel + config.radial_accel_var * random11(rng));
    particle.tangential_accel =
        or_zero(config.tangential_accel + config.tangential_accel_var * random11(rng));

    let life = or_zero(config.life + config.life_var * random11(rng));
    particle.life = life.max(0.0);

    particle.scale = config.start_scale + config.start_scale_var * random11(rng);
    let end_scale = config.end_scale + config.end_scale_var * random11(rng);
    particle.delta_scale = per_second(end_scale - particle.scale, particle.life);

    particle.radius = config.radius + config.radius_var * random11(rng);

    match config.start_color {
        Some(start_color) => {
            let start = jitter_color(start_color, config.start_color_var, rng);
            let end = match config.end_color {
                Some(end_color) => jitter_color(end_color, config.end_color_var, rng),
                None => start,
            };

            particle.color = Some(start);
            particle.delta_color = Color::new(
                per_second(end.x - start.x, particle.life),
                per_second(end.y - start.y, particle.life),
                per_second(end.z - start.z, particle.life),
                per_second(end.w - start.w, particle.life),
            );
        }
        None => {
            particle.color = None;
            particle.delta_color = Color::ZERO;
        }
    }
}

/// Integrate a slice of particles
///
/// Each particle only reads the shared `delta`, `origin` and `gravity`, so
/// the parallel path produces the same result as the sequential one.
fn integrate_particles(particles: &mut [Particle], delta: f64, origin: DVec2, gravity: DVec2) {
    #[cfg(feature = "parallel")]
    {
        if particles.len() >= PARALLEL_THRESHOLD {
            integrate_parallel(particles, delta, origin, gravity);
            return;
        }
    }

    integrate_sequential(particles, delta, origin, gravity);
}

fn integrate_sequential(particles: &mut [Particle], delta: f64, origin: DVec2, gravity: DVec2) {
    for particle in particles {
        particle.integrate(delta, origin, gravity);
    }
}

#[cfg(feature = "parallel")]
fn integrate_parallel(particles: &mut [Particle], delta: f64, origin: DVec2, gravity: DVec2) {
    particles
        .par_chunks_mut(PARALLEL_CHUNK)
        .for_each(|chunk| integrate_sequential(chunk, delta, origin, gravity));
}
