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
//! # Particle Engine
//!
//! A pool-based 2D particle emitter. An [`Emitter`] spawns particles at a
//! fixed rate, integrates their motion under gravity and radial/tangential
//! acceleration, interpolates their scale and color over their lifetime,
//! and recycles them in place when they expire.
//!
//! ## Features
//!
//! - **Fixed-Capacity Pooling**: Particles are allocated once per pool size and
//!   reused; active particles always occupy a contiguous prefix
//! - **Rate-Stable Emission**: A fixed-step accumulator makes spawn counts
//!   independent of frame timing
//! - **Declarative Configuration**: Serializable config with explicit
//!   default-plus-overrides merging
//! - **Spawn Shapes**: Pluggable reshaping of spawn jitter
//! - **Presets**: Versioned catalog of named configurations
//! - **Parallelization**: Optional Rayon integration for large pools
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use particle_engine::{ConfigOverrides, Emitter};
//!
//! let mut emitter = Emitter::new(&ConfigOverrides {
//!     total_particles: Some(100),
//!     emission_rate: Some(50.0),
//!     life: Some(2.0),
//!     speed: Some(40.0),
//!     angle: Some(90.0),
//!     gravity: Some(DVec2::new(0.0, 30.0)),
//!     active: Some(true),
//!     ..Default::default()
//! });
//!
//! for _ in 0..60 {
//!     emitter.update(1.0 / 60.0);
//! }
//!
//! for particle in emitter.active_particles() {
//!     assert!(particle.is_alive());
//! }
//! ```

#![warn(missing_docs)]

/// Emitter configuration and override merging
pub mod config;

/// Pool-owning emitter
pub mod emitter;

/// Error types
pub mod error;

/// Particle record and integration
pub mod particle;

/// Named preset configurations
pub mod presets;

/// Spawn jitter transforms
pub mod shape;

/// Frame-rate telemetry
pub mod telemetry;

/// Opaque texture handles
pub mod texture;

pub use config::{ConfigOverrides, EmitterConfig, Lifespan};
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use particle::{Color, Particle};
pub use shape::{PositionTransform, SpawnShape};
pub use texture::{TextureCache, TextureId};
