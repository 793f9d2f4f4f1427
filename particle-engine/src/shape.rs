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
//! Spawn shapes for positional jitter
//!
//! Before a new particle is placed, the emitter draws a jitter vector inside
//! the `pos_var` rectangle. A [`PositionTransform`] may reshape that vector,
//! which is how non-rectangular spawn areas (rings, rotated lines) are built.
//!
//! Built-in shapes are variants of [`SpawnShape`] so they serialize with the
//! rest of the configuration. Custom transforms implement the trait and are
//! handed to the emitter directly:
//!
//! ```
//! use glam::DVec2;
//! use particle_engine::{Emitter, PositionTransform};
//!
//! struct Mirror;
//!
//! impl PositionTransform for Mirror {
//!     fn name(&self) -> &str { "mirror" }
//!     fn transform(&self, jitter: DVec2) -> DVec2 { DVec2::new(jitter.x.abs(), jitter.y) }
//! }
//!
//! let emitter = Emitter::default().with_position_transform(Box::new(Mirror));
//! assert_eq!(emitter.position_transform_name(), Some("mirror"));
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Strategy reshaping the positional jitter of newly spawned particles
pub trait PositionTransform: Send + Sync {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Map a raw jitter vector to the offset added to the emitter position
    fn transform(&self, jitter: DVec2) -> DVec2;
}

/// Serializable built-in spawn shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnShape {
    /// Ring around the emitter
    ///
    /// The jitter's x component is read as a polar angle in degrees and its
    /// y component as a signed offset from `radius`. A `pos_var` of
    /// `(180, w)` covers the whole ring with thickness `2w`.
    Ring {
        /// Distance from the emitter to the middle of the ring
        radius: f64,
    },
    /// Jitter rotated by `angle` degrees
    ///
    /// With a `pos_var` of `(l, 0)` particles spawn on a segment of length
    /// `2l` tilted by `angle`.
    Line {
        /// Rotation in degrees, counter-clockwise on screen
        angle: f64,
    },
}

impl PositionTransform for SpawnShape {
    fn name(&self) -> &str {
        match self {
            SpawnShape::Ring { .. } => "ring",
            SpawnShape::Line { .. } => "line",
        }
    }

    fn transform(&self, jitter: DVec2) -> DVec2 {
        match *self {
            SpawnShape::Ring { radius } => {
                let theta = jitter.x.to_radians();
                let distance = radius + jitter.y;
                DVec2::new(theta.cos() * distance, -theta.sin() * distance)
            }
            SpawnShape::Line { angle } => {
                let (sin, cos) = angle.to_radians().sin_cos();
                DVec2::new(
                    jitter.x * cos + jitter.y * sin,
                    -jitter.x * sin + jitter.y * cos,
                )
            }
        }
    }
}
