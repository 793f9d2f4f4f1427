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
//! Particle record and per-particle integration
//!
//! A [`Particle`] is a plain data record: the emitter re-initializes it in
//! place every time it is claimed from the dormant region of the pool, and
//! integrates it once per frame while its `life` is positive.
//!
//! # Coordinate System
//!
//! Positions live in screen space with +y pointing down. Angles are given in
//! degrees, so an angle of 90° produces a velocity pointing up the screen.
//!
//! # Integration
//!
//! Particles are advanced with semi-implicit Euler:
//!
//! ```text
//! a = radial * radial_accel + tangential * tangential_accel + gravity
//! v(t + dt) = v(t) + a * dt
//! x(t + dt) = x(t) + v(t + dt) * dt
//! ```
//!
//! where `radial` is the unit vector from the emitter to the particle and
//! `tangential` is that vector rotated by 90°.

use glam::{DVec2, DVec4};

use crate::texture::TextureId;

/// RGBA color, one `f64` per channel
///
/// Channels carry whatever range the configuration uses (`0..=1` or
/// `0..=255`); the engine only interpolates them.
pub type Color = DVec4;

/// One live or dormant simulated point
///
/// `life > 0` marks the particle as active. A particle whose life has run
/// out stays in the pool and is reclaimed by a later spawn.
///
/// # Examples
///
/// ```
/// use particle_engine::Particle;
///
/// let mut particle = Particle::new();
/// assert!(!particle.is_alive());
///
/// particle.set_velocity(0.0, 10.0);
/// assert!((particle.vel.x - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position
    pub pos: DVec2,
    /// Current velocity in units per second
    pub vel: DVec2,
    /// Base radius handed to the renderer
    pub radius: f64,
    /// Current scale factor applied to `radius`
    pub scale: f64,
    /// Change of `scale` per second
    pub delta_scale: f64,
    /// Current color, `None` for particles drawn without one
    pub color: Option<Color>,
    /// Change of each color channel per second
    pub delta_color: Color,
    /// Remaining life in seconds
    pub life: f64,
    /// Acceleration along the emitter-to-particle direction
    pub radial_accel: f64,
    /// Acceleration perpendicular to the emitter-to-particle direction
    pub tangential_accel: f64,
    /// Texture handle assigned verbatim from the configuration
    pub texture: Option<TextureId>,
    /// Whether the renderer should draw `texture`
    pub texture_enabled: bool,
    /// Whether the renderer should blend additively
    pub texture_additive: bool,
    // Scratch vectors rewritten by every integration step
    forces: DVec2,
    radial: DVec2,
    tangential: DVec2,
}

impl Particle {
    /// Create a dormant particle
    pub fn new() -> Self {
        Particle {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            radius: 0.0,
            scale: 1.0,
            delta_scale: 0.0,
            color: None,
            delta_color: Color::ZERO,
            life: 0.0,
            radial_accel: 0.0,
            tangential_accel: 0.0,
            texture: None,
            texture_enabled: false,
            texture_additive: false,
            forces: DVec2::ZERO,
            radial: DVec2::ZERO,
            tangential: DVec2::ZERO,
        }
    }

    /// Whether the particle still has life left
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Set the velocity from an angle in degrees and a speed
    pub fn set_velocity(&mut self, angle: f64, speed: f64) {
        let radians = angle.to_radians();
        self.vel = DVec2::new(radians.cos() * speed, -radians.sin() * speed);
    }

    /// Net acceleration applied during the last integration step, times `dt`
    pub fn last_impulse(&self) -> DVec2 {
        self.forces
    }

    /// Advance the particle by `delta` seconds
    ///
    /// `origin` is the emitter position radial and tangential accelerations
    /// are measured from; `gravity` is applied to every particle unchanged.
    /// Dead particles are left untouched.
    pub fn integrate(&mut self, delta: f64, origin: DVec2, gravity: DVec2) {
        if !self.is_alive() {
            return;
        }

        self.radial = DVec2::ZERO;

        // No radial direction exists until the particle leaves the emitter
        if self.pos != origin && (self.radial_accel != 0.0 || self.tangential_accel != 0.0) {
            self.radial = (self.pos - origin).normalize();
        }

        self.tangential = self.radial.perp();
        self.radial *= self.radial_accel;
        self.tangential *= self.tangential_accel;

        self.forces = (self.radial + self.tangential + gravity) * delta;

        self.vel += self.forces;
        self.pos += self.vel * delta;

        self.life -= delta;
        self.scale += self.delta_scale * delta;

        if let Some(color) = self.color.as_mut() {
            *color += self.delta_color * delta;
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Particle::new()
    }
}
