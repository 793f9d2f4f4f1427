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
//! Custom spawn transform demo
//!
//! Compares the built-in ring shape against a user-supplied
//! [`PositionTransform`] that spawns particles on a five-pointed star.

use std::f64::consts::TAU;

use glam::DVec2;
use particle_engine::presets::{CanvasSize, PresetCatalog};
use particle_engine::{Emitter, PositionTransform};

/// Places particles on the outline of a star
///
/// The jitter's x component picks a point along the outline, y is ignored.
struct Star {
    outer: f64,
    inner: f64,
}

impl PositionTransform for Star {
    fn name(&self) -> &str {
        "star"
    }

    fn transform(&self, jitter: DVec2) -> DVec2 {
        // jitter.x in [-180, 180] maps to one full turn
        let t = (jitter.x / 360.0 + 0.5) * 10.0;
        let segment = t.floor().min(9.0);
        let along = t - segment;

        let vertex = |index: f64| {
            let radius = if index as u32 % 2 == 0 { self.outer } else { self.inner };
            let angle = index / 10.0 * TAU;
            DVec2::new(angle.cos(), -angle.sin()) * radius
        };

        vertex(segment).lerp(vertex(segment + 1.0), along)
    }
}

fn describe(label: &str, emitter: &Emitter) {
    let center = emitter.config().pos;
    let distances: Vec<f64> = emitter
        .active_particles()
        .iter()
        .map(|particle| particle.pos.distance(center))
        .collect();
    let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let farthest = distances.iter().copied().fold(0.0, f64::max);

    println!(
        "{:>6}: {:3} particles, distance from center {:6.1} .. {:6.1}",
        label,
        distances.len(),
        nearest,
        farthest
    );
}

fn main() {
    env_logger::init();

    println!("Particle Engine - Ring of Fire Example");
    println!("======================================\n");

    let catalog = PresetCatalog::builtin();
    let Some(preset) = catalog.get("ringoffire") else {
        println!("Preset catalog is empty");
        return;
    };
    let canvas = CanvasSize::new(400, 400);

    // A quarter second of spawning, checked before the particles drift far
    let mut ring = Emitter::from_preset(preset, canvas).with_seed(1);
    ring.update(0.25);

    let mut star = Emitter::from_preset(preset, canvas)
        .with_seed(1)
        .with_position_transform(Box::new(Star {
            outer: 120.0,
            inner: 50.0,
        }));
    star.update(0.25);

    println!("Spawn shapes:");
    for (label, emitter) in [("ring", &ring), ("star", &star)] {
        println!(
            "  {} uses '{}'",
            label,
            emitter.position_transform_name().unwrap_or("none")
        );
    }
    println!();

    describe("ring", &ring);
    describe("star", &star);
}
