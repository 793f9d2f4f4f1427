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
//! Integration tests for texture loading and custom spawn transforms

use glam::DVec2;
use particle_engine::{ConfigOverrides, Emitter, Error, PositionTransform, TextureCache};

fn textured_emitter() -> Emitter {
    Emitter::new(&ConfigOverrides {
        total_particles: Some(8),
        emission_rate: Some(10.0),
        life: Some(5.0),
        texture_enabled: Some(true),
        texture_additive: Some(true),
        active: Some(true),
        ..Default::default()
    })
}

#[test]
fn test_loaded_texture_reaches_spawned_particles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spark.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

    let mut cache = TextureCache::new();
    let id = cache.load(&path).unwrap();
    assert_eq!(cache.bytes(id), Some(&[0x89, b'P', b'N', b'G'][..]));

    let mut emitter = textured_emitter();
    cache.apply(&mut emitter, id);
    emitter.update(0.5);

    assert!(emitter.particle_count() > 0);
    for particle in emitter.active_particles() {
        assert_eq!(particle.texture, Some(id));
        assert!(particle.texture_enabled);
        assert!(particle.texture_additive);
    }
}

#[test]
fn test_cache_serves_repeat_loads_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("smoke.gif");
    std::fs::write(&first, b"GIF89a").unwrap();

    let mut cache = TextureCache::new();
    let id = cache.load(&first).unwrap();

    // Same file name in another directory hits the cache without reading
    let elsewhere = dir.path().join("missing").join("smoke.gif");
    assert_eq!(cache.load(&elsewhere).unwrap(), id);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_texture_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = TextureCache::new();

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"hello").unwrap();
    assert!(matches!(cache.load(&text), Err(Error::UnsupportedTexture(_))));

    let missing = dir.path().join("absent.jpeg");
    match cache.load(&missing) {
        Err(Error::TextureLoad { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a load error, got {:?}", other),
    }
    assert!(cache.is_empty());
}

struct Offset(DVec2);

impl PositionTransform for Offset {
    fn name(&self) -> &str {
        "offset"
    }

    fn transform(&self, jitter: DVec2) -> DVec2 {
        jitter + self.0
    }
}

#[test]
fn test_custom_transform_reshapes_spawn_positions() {
    let mut emitter = Emitter::new(&ConfigOverrides {
        total_particles: Some(16),
        emission_rate: Some(100.0),
        life: Some(5.0),
        pos: Some(DVec2::new(10.0, 10.0)),
        active: Some(true),
        ..Default::default()
    })
    .with_position_transform(Box::new(Offset(DVec2::new(5.0, -5.0))));
    assert_eq!(emitter.position_transform_name(), Some("offset"));

    emitter.update(0.1);

    assert!(emitter.particle_count() > 0);
    for particle in emitter.active_particles() {
        assert_eq!(particle.pos, DVec2::new(15.0, 5.0));
    }

    emitter.clear_position_transform();
    assert_eq!(emitter.position_transform_name(), None);
}
