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
//! Fireworks preset demo
//!
//! Runs the built-in fireworks preset headlessly at 60 frames per second and
//! prints a summary of the pool every simulated second.
//!
//! Run with `RUST_LOG=debug` to see emitter and frame-rate logging.

use particle_engine::presets::{CanvasSize, PresetCatalog};
use particle_engine::Emitter;

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    println!("Particle Engine - Fireworks Example");
    println!("===================================\n");

    let catalog = PresetCatalog::builtin();
    let Some(preset) = catalog.get("fireworks") else {
        println!("Preset catalog is empty");
        return;
    };
    let mut emitter = Emitter::from_preset(preset, CanvasSize::new(800, 600)).with_seed(2025);

    println!("Preset: {}", preset.name);
    println!("  Origin: {}", emitter.config().pos);
    println!("  Pool size: {}", emitter.total_particles());
    println!("  Emission rate: {:.1}/s\n", emitter.config().emission_rate);

    for second in 1..=6 {
        for _ in 0..60 {
            emitter.update(FRAME);
        }

        let active = emitter.active_particles();
        let highest = active
            .iter()
            .map(|particle| particle.pos.y)
            .fold(f64::INFINITY, f64::min);
        let mean_life = if active.is_empty() {
            0.0
        } else {
            active.iter().map(|particle| particle.life).sum::<f64>() / active.len() as f64
        };

        println!(
            "t = {}s: {:4} live, highest y = {:7.1}, mean life left = {:.2}s",
            second,
            emitter.particle_count(),
            highest,
            mean_life
        );
    }

    if let Some(fps) = emitter.frame_rate().fps() {
        println!("\nMeasured frame rate: {:.2} fps", fps);
    }

    // Stop emitting and let the sky clear
    emitter.set_active(false);
    let mut frames = 0;
    while emitter.is_alive() {
        emitter.update(FRAME);
        frames += 1;
    }
    println!("Last particle faded after {:.2}s", frames as f64 * FRAME);
}
