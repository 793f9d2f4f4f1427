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
//! Emitter configuration
//!
//! [`EmitterConfig`] is the complete ruleset an emitter runs with. Its
//! [`Default`] value is the engine default set, and a configuration is never
//! patched in place: [`EmitterConfig::merged`] applies a [`ConfigOverrides`]
//! record and returns a new configuration.
//!
//! Every `*_var` field is a variance: at spawn time the paired base value is
//! perturbed by `var * r` with `r` drawn uniformly from `[-1, 1]`, once per
//! field. Base values themselves never change.
//!
//! # Example
//!
//! ```
//! use particle_engine::config::{ConfigOverrides, EmitterConfig};
//!
//! let overrides = ConfigOverrides {
//!     total_particles: Some(100),
//!     emission_rate: Some(25.0),
//!     ..Default::default()
//! };
//!
//! let config = EmitterConfig::default().merged(&overrides);
//! assert_eq!(config.total_particles, 100);
//! assert_eq!(config.life, 0.0);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::particle::Color;
use crate::shape::SpawnShape;
use crate::texture::TextureId;

/// How long an emitter keeps emitting once started
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifespan {
    /// Emit until deactivated explicitly
    #[default]
    Unbounded,
    /// Emit for the given number of seconds
    Seconds(f64),
}

impl Lifespan {
    /// Whether `elapsed` seconds exhaust this lifespan
    ///
    /// A `Seconds` duration that is not positive, NaN included, is reached
    /// by the first update.
    pub fn reached(&self, elapsed: f64) -> bool {
        match *self {
            Lifespan::Unbounded => false,
            Lifespan::Seconds(duration) => duration.is_nan() || elapsed >= duration,
        }
    }
}

/// Complete emission, physics and visual configuration of an emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Capacity of the particle pool
    pub total_particles: usize,
    /// Particles spawned per second; `0` disables emission
    pub emission_rate: f64,
    /// Whether `update` emits and advances time
    pub active: bool,
    /// How long the emitter stays active
    pub duration: Lifespan,

    /// Emitter position; also the origin for radial forces
    pub pos: DVec2,
    /// Half-extents of the spawn jitter rectangle
    pub pos_var: DVec2,
    /// Optional reshaping of the spawn jitter
    pub spawn_shape: Option<SpawnShape>,

    /// Emission angle in degrees
    pub angle: f64,
    /// Variance of `angle`
    pub angle_var: f64,
    /// Initial speed
    pub speed: f64,
    /// Variance of `speed`
    pub speed_var: f64,
    /// Particle life in seconds
    pub life: f64,
    /// Variance of `life`
    pub life_var: f64,
    /// Particle radius
    pub radius: f64,
    /// Variance of `radius`
    pub radius_var: f64,

    /// Texture handed to every particle
    pub texture: Option<TextureId>,
    /// Whether particles draw their texture
    pub texture_enabled: bool,
    /// Whether particles blend additively
    pub texture_additive: bool,

    /// Scale at spawn
    pub start_scale: f64,
    /// Variance of `start_scale`
    pub start_scale_var: f64,
    /// Scale reached when life runs out
    pub end_scale: f64,
    /// Variance of `end_scale`
    pub end_scale_var: f64,

    /// Color at spawn; `None` spawns uncolored particles
    pub start_color: Option<Color>,
    /// Per-channel variance of `start_color`
    pub start_color_var: Color,
    /// Color reached when life runs out; `None` keeps the start color
    pub end_color: Option<Color>,
    /// Per-channel variance of `end_color`
    pub end_color_var: Color,

    /// Constant acceleration applied to every particle
    pub gravity: DVec2,
    /// Acceleration away from the emitter
    pub radial_accel: f64,
    /// Variance of `radial_accel`
    pub radial_accel_var: f64,
    /// Acceleration perpendicular to the radial direction
    pub tangential_accel: f64,
    /// Variance of `tangential_accel`
    pub tangential_accel_var: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        EmitterConfig {
            total_particles: 0,
            emission_rate: 0.0,
            active: false,
            duration: Lifespan::Unbounded,
            pos: DVec2::ZERO,
            pos_var: DVec2::ZERO,
            spawn_shape: None,
            angle: 0.0,
            angle_var: 0.0,
            speed: 0.0,
            speed_var: 0.0,
            life: 0.0,
            life_var: 0.0,
            radius: 0.0,
            radius_var: 0.0,
            texture: None,
            texture_enabled: false,
            texture_additive: false,
            start_scale: 0.0,
            start_scale_var: 0.0,
            end_scale: 0.0,
            end_scale_var: 0.0,
            start_color: Some(Color::ZERO),
            start_color_var: Color::ZERO,
            end_color: Some(Color::ZERO),
            end_color_var: Color::ZERO,
            gravity: DVec2::ZERO,
            radial_accel: 0.0,
            radial_accel_var: 0.0,
            tangential_accel: 0.0,
            tangential_accel_var: 0.0,
        }
    }
}

/// Sparse set of configuration fields
///
/// `None` leaves the corresponding field alone when merged. Optional
/// configuration fields (`texture`, colors, `spawn_shape`) can only be set
/// through an override; clearing them takes a full [`EmitterConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ConfigOverrides {
    pub total_particles: Option<usize>,
    pub emission_rate: Option<f64>,
    pub active: Option<bool>,
    pub duration: Option<Lifespan>,
    pub pos: Option<DVec2>,
    pub pos_var: Option<DVec2>,
    pub spawn_shape: Option<SpawnShape>,
    pub angle: Option<f64>,
    pub angle_var: Option<f64>,
    pub speed: Option<f64>,
    pub speed_var: Option<f64>,
    pub life: Option<f64>,
    pub life_var: Option<f64>,
    pub radius: Option<f64>,
    pub radius_var: Option<f64>,
    pub texture: Option<TextureId>,
    pub texture_enabled: Option<bool>,
    pub texture_additive: Option<bool>,
    pub start_scale: Option<f64>,
    pub start_scale_var: Option<f64>,
    pub end_scale: Option<f64>,
    pub end_scale_var: Option<f64>,
    pub start_color: Option<Color>,
    pub start_color_var: Option<Color>,
    pub end_color: Option<Color>,
    pub end_color_var: Option<Color>,
    pub gravity: Option<DVec2>,
    pub radial_accel: Option<f64>,
    pub radial_accel_var: Option<f64>,
    pub tangential_accel: Option<f64>,
    pub tangential_accel_var: Option<f64>,
}

impl ConfigOverrides {
    /// Parse overrides from JSON; absent keys stay `None`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the overrides to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Copies every `Some` override into the target configuration. Fields listed
// after `;` are optional in the configuration and get wrapped in `Some`.
macro_rules! apply_overrides {
    ($config:ident, $overrides:ident; $($field:ident),* ; $($optional:ident),*) => {
        $(
            if let Some(value) = $overrides.$field {
                $config.$field = value;
            }
        )*
        $(
            if let Some(value) = $overrides.$optional {
                $config.$optional = Some(value);
            }
        )*
    };
}

impl EmitterConfig {
    /// Return a copy of this configuration with `overrides` applied
    pub fn merged(&self, overrides: &ConfigOverrides) -> EmitterConfig {
        let mut config = self.clone();

        apply_overrides!(config, overrides;
            total_particles, emission_rate, active, duration, pos, pos_var,
            angle, angle_var, speed, speed_var, life, life_var, radius, radius_var,
            texture_enabled, texture_additive,
            start_scale, start_scale_var, end_scale, end_scale_var,
            start_color_var, end_color_var,
            gravity, radial_accel, radial_accel_var, tangential_accel, tangential_accel_var;
            spawn_shape, texture, start_color, end_color
        );

        config
    }

    /// Parse a full configuration from JSON; absent keys take engine defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
