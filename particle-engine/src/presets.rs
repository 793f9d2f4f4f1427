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
//! Named preset configurations
//!
//! A [`Preset`] is a named [`ConfigOverrides`] bundle plus an [`Anchor`]
//! describing where on the canvas the emitter sits. Anchors are resolved
//! against a [`CanvasSize`] once the drawing surface is known.
//!
//! # Catalog Format
//!
//! Catalogs serialize to JSON with a format version:
//!
//! ```json
//! { "version": "1.0.0", "presets": [ { "name": "fire", "anchor": "center_bottom", "config": { } } ] }
//! ```
//!
//! A catalog is accepted when its major version matches
//! [`CATALOG_FORMAT_VERSION`] and its minor version is not newer (for `0.x`
//! versions the minor version must match exactly).
//!
//! # Example
//!
//! ```
//! use particle_engine::presets::{CanvasSize, PresetCatalog};
//! use particle_engine::Emitter;
//!
//! let mut catalog = PresetCatalog::builtin();
//! catalog.position_all(CanvasSize::new(250, 300));
//!
//! let fire = catalog.get("fire").unwrap();
//! let mut emitter = Emitter::new(&fire.config);
//! emitter.update(1.0 / 60.0);
//! assert!(emitter.is_active());
//! ```

use glam::DVec2;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigOverrides, Lifespan};
use crate::error::{Error, Result};
use crate::particle::Color;
use crate::shape::SpawnShape;
use crate::texture::TextureId;

/// Version of the catalog JSON format this build reads and writes
pub const CATALOG_FORMAT_VERSION: &str = "1.0.0";

/// Size of the drawing surface anchors are resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas size
    pub fn new(width: u32, height: u32) -> Self {
        CanvasSize { width, height }
    }
}

/// Canvas-relative emitter placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Middle of the canvas
    Center,
    /// Horizontally centered, two thirds down
    CenterBottom,
    /// Horizontally centered, just below the bottom edge
    CenterOffBottom,
    /// Horizontally centered on the top edge
    CenterAboveTop,
    /// Left edge, just below the bottom edge
    BottomLeft,
}

impl Anchor {
    /// Pixel position of the anchor on a canvas of the given size
    pub fn resolve(&self, size: CanvasSize) -> DVec2 {
        let (width, height) = (u64::from(size.width), u64::from(size.height));
        let (x, y) = match self {
            Anchor::Center => (width / 2, height / 2),
            Anchor::CenterBottom => (width / 2, height * 2 / 3),
            Anchor::CenterOffBottom => (width / 2, height + 20),
            Anchor::CenterAboveTop => (width / 2, 0),
            Anchor::BottomLeft => (0, height + 5),
        };
        DVec2::new(x as f64, y as f64)
    }
}

/// Named configuration bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Unique name within a catalog
    pub name: String,
    /// Where the emitter sits on the canvas
    pub anchor: Anchor,
    /// Configuration applied on top of engine defaults
    pub config: ConfigOverrides,
}

impl Preset {
    /// Configuration with `pos` resolved from the anchor
    pub fn configured_for(&self, size: CanvasSize) -> ConfigOverrides {
        ConfigOverrides {
            pos: Some(self.anchor.resolve(size)),
            ..self.config.clone()
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    version: String,
    presets: Vec<Preset>,
}

/// Ordered collection of presets
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Create a catalog from presets; the first one is the fallback
    pub fn new(presets: Vec<Preset>) -> Self {
        PresetCatalog { presets }
    }

    /// The presets shipped with the engine
    pub fn builtin() -> Self {
        PresetCatalog::new(vec![
            meteor(),
            fireworks(),
            fire(),
            galaxy(),
            snow(),
            bubbles(),
            water_geyser(),
            ribbon(),
            ring_of_fire(),
        ])
    }

    /// Parse a catalog from JSON, rejecting incompatible format versions
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] for malformed JSON
    /// - [`Error::InvalidVersion`] if the version string is not semver
    /// - [`Error::IncompatibleCatalog`] if the version is not supported
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;

        if !is_version_compatible(&file.version, CATALOG_FORMAT_VERSION)? {
            log::warn!(
                "Rejecting preset catalog version {} (supported: {})",
                file.version,
                CATALOG_FORMAT_VERSION
            );
            return Err(Error::IncompatibleCatalog {
                found: file.version,
                supported: CATALOG_FORMAT_VERSION.to_string(),
            });
        }

        log::debug!("Loaded {} presets", file.presets.len());
        Ok(PresetCatalog::new(file.presets))
    }

    /// Serialize the catalog to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let file = CatalogFile {
            version: CATALOG_FORMAT_VERSION.to_string(),
            presets: self.presets.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Look up a preset by name, falling back to the first preset
    ///
    /// Returns `None` only when the catalog is empty.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.find(name).or_else(|| self.presets.first())
    }

    /// Look up a preset by exact name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    /// Resolve every preset's anchor for the given canvas
    pub fn position_all(&mut self, size: CanvasSize) {
        for preset in &mut self.presets {
            preset.config.pos = Some(preset.anchor.resolve(size));
        }
    }

    /// Give every preset the same texture
    pub fn set_texture(&mut self, texture: TextureId) {
        for preset in &mut self.presets {
            preset.config.texture = Some(texture);
        }
    }

    /// Remove a preset by name, returning it if it existed
    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        let index = self.presets.iter().position(|preset| preset.name == name)?;
        Some(self.presets.remove(index))
    }

    /// Add a preset, replacing any preset with the same name
    pub fn insert(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|existing| existing.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Preset names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.name.as_str())
    }

    /// Number of presets
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        PresetCatalog::builtin()
    }
}

/// Check catalog version compatibility
///
/// Major versions must match. For `0.x` versions the minor version must
/// match too; otherwise the catalog's minor version may not exceed ours.
fn is_version_compatible(catalog_version: &str, supported_version: &str) -> Result<bool> {
    let parse = |version: &str| {
        Version::parse(version).map_err(|err| Error::InvalidVersion(format!("{}: {}", version, err)))
    };
    let catalog = parse(catalog_version)?;
    let supported = parse(supported_version)?;

    if catalog.major != supported.major {
        return Ok(false);
    }

    if catalog.major != 0 {
        Ok(catalog.minor <= supported.minor)
    } else {
        Ok(catalog.minor == supported.minor)
    }
}

fn rgba(r: f64, g: f64, b: f64, a: f64) -> Option<Color> {
    Some(Color::new(r, g, b, a))
}

fn preset(name: &str, anchor: Anchor, config: ConfigOverrides) -> Preset {
    Preset {
        name: name.to_string(),
        anchor,
        config,
    }
}

fn meteor() -> Preset {
    preset("meteor", Anchor::Center, ConfigOverrides {
        total_particles: Some(150),
        emission_rate: Some(150.0 / 2.0),
        gravity: Some(DVec2::new(-200.0, -200.0)),
        angle: Some(90.0),
        angle_var: Some(360.0),
        speed: Some(15.0),
        speed_var: Some(5.0),
        life: Some(2.0),
        life_var: Some(1.0),
        texture_enabled: Some(true),
        texture_additive: Some(true),
        radius: Some(12.0),
        radius_var: Some(2.0),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(255.0, 0.0, 0.0, 1.0),
        end_color: rgba(0.0, 0.0, 255.0, 1.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        ..Default::default()
    })
}

fn fireworks() -> Preset {
    preset("fireworks", Anchor::CenterBottom, ConfigOverrides {
        total_particles: Some(1500),
        emission_rate: Some(1500.0 / 3.5),
        angle: Some(90.0),
        angle_var: Some(20.0),
        gravity: Some(DVec2::new(0.0, -90.0)),
        speed: Some(180.0),
        speed_var: Some(50.0),
        life: Some(3.5),
        life_var: Some(1.0),
        radius: Some(8.0),
        radius_var: Some(2.0),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(0.5, 0.5, 0.5, 1.0),
        start_color_var: rgba(0.5, 0.5, 0.5, 0.1),
        end_color: rgba(0.1, 0.1, 0.1, 0.2),
        end_color_var: rgba(0.1, 0.1, 0.1, 0.2),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        ..Default::default()
    })
}

fn fire() -> Preset {
    preset("fire", Anchor::CenterBottom, ConfigOverrides {
        total_particles: Some(250),
        emission_rate: Some(250.0 / 7.0),
        pos_var: Some(DVec2::new(40.0, 20.0)),
        angle: Some(90.0),
        angle_var: Some(10.0),
        speed: Some(60.0),
        speed_var: Some(20.0),
        life: Some(7.0),
        life_var: Some(4.0),
        texture_enabled: Some(true),
        texture_additive: Some(true),
        radius: Some(10.0),
        radius_var: Some(1.0),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(0.76, 0.25, 0.12, 1.0),
        end_color: rgba(0.0, 0.0, 0.0, 0.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        ..Default::default()
    })
}

fn galaxy() -> Preset {
    preset("galaxy", Anchor::Center, ConfigOverrides {
        total_particles: Some(200),
        emission_rate: Some(200.0 / 4.0),
        angle: Some(90.0),
        angle_var: Some(360.0),
        speed: Some(60.0),
        speed_var: Some(10.0),
        life: Some(4.0),
        life_var: Some(1.0),
        radial_accel: Some(-80.0),
        tangential_accel: Some(80.0),
        texture_enabled: Some(true),
        texture_additive: Some(true),
        radius: Some(10.0),
        radius_var: Some(2.0),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(0.12, 0.25, 0.76, 1.0),
        end_color: rgba(0.0, 0.0, 0.0, 1.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        ..Default::default()
    })
}

fn snow() -> Preset {
    preset("snow", Anchor::CenterAboveTop, ConfigOverrides {
        total_particles: Some(700),
        emission_rate: Some(10.0),
        pos_var: Some(DVec2::new(175.0, 0.0)),
        gravity: Some(DVec2::new(0.0, 8.0)),
        angle: Some(-90.0),
        angle_var: Some(10.0),
        speed: Some(9.0),
        speed_var: Some(1.0),
        life: Some(45.0),
        life_var: Some(15.0),
        texture_enabled: Some(false),
        texture_additive: Some(false),
        radius: Some(3.0),
        radius_var: Some(2.0),
        start_scale: Some(1.0),
        end_scale: Some(0.3),
        start_color: rgba(1.0, 1.0, 1.0, 1.0),
        end_color: rgba(1.0, 1.0, 1.0, 0.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        ..Default::default()
    })
}

fn bubbles() -> Preset {
    preset("bubbles", Anchor::CenterOffBottom, ConfigOverrides {
        total_particles: Some(500),
        emission_rate: Some(200.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        pos_var: Some(DVec2::new(150.0, 0.0)),
        angle: Some(90.0),
        angle_var: Some(20.0),
        life: Some(3.5),
        life_var: Some(1.0),
        radius: Some(8.0),
        radius_var: Some(2.0),
        texture_enabled: Some(false),
        texture_additive: Some(true),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(200.0 / 255.0, 200.0 / 255.0, 1.0, 1.0),
        start_color_var: rgba(0.0, 0.0, 40.0 / 255.0, 0.1),
        end_color: rgba(0.1, 0.1, 0.1, 0.2),
        end_color_var: rgba(0.1, 0.1, 0.1, 0.2),
        gravity: Some(DVec2::new(0.0, -90.0)),
        speed: Some(180.0),
        speed_var: Some(50.0),
        ..Default::default()
    })
}

fn water_geyser() -> Preset {
    preset("watergeyser", Anchor::CenterBottom, ConfigOverrides {
        total_particles: Some(400),
        emission_rate: Some(100.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        angle: Some(90.0),
        angle_var: Some(10.0),
        life: Some(2.5),
        life_var: Some(1.0),
        radius: Some(5.0),
        radius_var: Some(3.0),
        texture_enabled: Some(false),
        texture_additive: Some(false),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(20.0 / 255.0, 60.0 / 255.0, 1.0, 1.0),
        start_color_var: rgba(0.0, 0.0, 50.0 / 255.0, 0.3),
        end_color: rgba(200.0 / 255.0, 200.0 / 255.0, 1.0, 0.0),
        gravity: Some(DVec2::new(0.0, 150.0)),
        speed: Some(180.0),
        speed_var: Some(50.0),
        ..Default::default()
    })
}

fn ribbon() -> Preset {
    preset("ribbon", Anchor::BottomLeft, ConfigOverrides {
        total_particles: Some(200),
        emission_rate: Some(40.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        pos_var: Some(DVec2::new(30.0, 0.0)),
        angle: Some(55.0),
        life: Some(2.5),
        radius: Some(10.0),
        radius_var: Some(5.0),
        texture_enabled: Some(false),
        texture_additive: Some(false),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(1.0, 0.0, 0.0, 1.0),
        end_color: rgba(0.0, 0.0, 1.0, 1.0),
        gravity: Some(DVec2::new(0.0, -45.0)),
        tangential_accel: Some(60.0),
        speed: Some(180.0),
        speed_var: Some(50.0),
        ..Default::default()
    })
}

fn ring_of_fire() -> Preset {
    preset("ringoffire", Anchor::Center, ConfigOverrides {
        total_particles: Some(400),
        emission_rate: Some(180.0),
        active: Some(true),
        duration: Some(Lifespan::Unbounded),
        pos_var: Some(DVec2::new(180.0, 20.0)),
        spawn_shape: Some(SpawnShape::Ring { radius: 80.0 }),
        angle: Some(90.0),
        angle_var: Some(10.0),
        life: Some(1.0),
        life_var: Some(1.0),
        radius: Some(10.0),
        radius_var: Some(1.0),
        texture_enabled: Some(true),
        texture_additive: Some(true),
        start_scale: Some(1.0),
        end_scale: Some(1.0),
        start_color: rgba(0.76, 0.25, 0.12, 1.0),
        end_color: rgba(0.0, 0.0, 0.0, 0.0),
        gravity: Some(DVec2::ZERO),
        speed: Some(60.0),
        speed_var: Some(20.0),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_resolution_truncates() {
        let size = CanvasSize::new(251, 301);
        assert_eq!(Anchor::Center.resolve(size), DVec2::new(125.0, 150.0));
        assert_eq!(Anchor::CenterBottom.resolve(size), DVec2::new(125.0, 200.0));
        assert_eq!(Anchor::CenterOffBottom.resolve(size), DVec2::new(125.0, 321.0));
        assert_eq!(Anchor::CenterAboveTop.resolve(size), DVec2::new(125.0, 0.0));
        assert_eq!(Anchor::BottomLeft.resolve(size), DVec2::new(0.0, 306.0));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = PresetCatalog::builtin();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            [
                "meteor",
                "fireworks",
                "fire",
                "galaxy",
                "snow",
                "bubbles",
                "watergeyser",
                "ribbon",
                "ringoffire"
            ]
        );
    }

    #[test]
    fn test_unknown_name_falls_back_to_first() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.get("no-such-preset").unwrap().name, "meteor");
        assert_eq!(catalog.get("snow").unwrap().name, "snow");
        assert!(catalog.find("no-such-preset").is_none());
    }

    #[test]
    fn test_position_all() {
        let mut catalog = PresetCatalog::builtin();
        catalog.position_all(CanvasSize::new(250, 300));

        assert_eq!(catalog.get("meteor").unwrap().config.pos, Some(DVec2::new(125.0, 150.0)));
        assert_eq!(catalog.get("snow").unwrap().config.pos, Some(DVec2::new(125.0, 0.0)));
        assert_eq!(catalog.get("ribbon").unwrap().config.pos, Some(DVec2::new(0.0, 305.0)));
    }

    #[test]
    fn test_configured_for_leaves_preset_alone() {
        let catalog = PresetCatalog::builtin();
        let preset = catalog.get("fire").unwrap();
        let config = preset.configured_for(CanvasSize::new(300, 300));

        assert_eq!(config.pos, Some(DVec2::new(150.0, 200.0)));
        assert_eq!(preset.config.pos, None);
        assert_eq!(config.life, Some(7.0));
    }

    #[test]
    fn test_set_texture_and_remove() {
        let mut catalog = PresetCatalog::builtin();
        catalog.set_texture(TextureId::new(3));
        assert!(catalog
            .names()
            .all(|name| catalog.get(name).unwrap().config.texture == Some(TextureId::new(3))));

        let removed = catalog.remove("ringoffire");
        assert_eq!(removed.map(|preset| preset.name), Some("ringoffire".to_string()));
        assert_eq!(catalog.len(), 8);
        assert!(catalog.remove("ringoffire").is_none());
    }

    #[test]
    fn test_anchor_resolution_on_huge_canvas() {
        let size = CanvasSize::new(u32::MAX, u32::MAX);
        let max = u32::MAX as f64;
        assert_eq!(Anchor::CenterBottom.resolve(size).y, ((u32::MAX as u64) * 2 / 3) as f64);
        assert_eq!(Anchor::CenterOffBottom.resolve(size).y, max + 20.0);
        assert_eq!(Anchor::BottomLeft.resolve(size).y, max + 5.0);
    }

    #[test]
    fn test_empty_catalog_has_no_fallback() {
        let mut catalog = PresetCatalog::new(Vec::new());
        assert!(catalog.get("fire").is_none());

        catalog.insert(preset("only", Anchor::Center, ConfigOverrides::default()));
        assert_eq!(catalog.get("fire").unwrap().name, "only");

        catalog.remove("only");
        assert!(catalog.get("only").is_none());

        let parsed = PresetCatalog::from_json(r#"{ "version": "1.0.0", "presets": [] }"#).unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.get("fire").is_none());
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut catalog = PresetCatalog::new(Vec::new());
        assert!(catalog.is_empty());

        catalog.insert(preset("a", Anchor::Center, ConfigOverrides::default()));
        catalog.insert(preset("a", Anchor::BottomLeft, ConfigOverrides::default()));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().anchor, Anchor::BottomLeft);
    }

    #[test]
    fn test_version_compatibility() {
        assert!(is_version_compatible("1.0.0", "1.0.0").unwrap());
        assert!(is_version_compatible("1.0.5", "1.2.0").unwrap());
        assert!(!is_version_compatible("1.3.0", "1.2.0").unwrap());
        assert!(!is_version_compatible("2.0.0", "1.0.0").unwrap());
        assert!(is_version_compatible("0.2.1", "0.2.0").unwrap());
        assert!(!is_version_compatible("0.1.0", "0.2.0").unwrap());
        assert!(matches!(
            is_version_compatible("one", "1.0.0"),
            Err(Error::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalog = PresetCatalog::builtin();
        let json = catalog.to_json().unwrap();
        let parsed = PresetCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.names().collect::<Vec<_>>(), catalog.names().collect::<Vec<_>>());
        assert_eq!(parsed.get("galaxy").unwrap().config.radial_accel, Some(-80.0));
        assert_eq!(
            parsed.get("ringoffire").unwrap().config.spawn_shape,
            Some(SpawnShape::Ring { radius: 80.0 })
        );
    }

    #[test]
    fn test_incompatible_catalog_rejected() {
        let json = r#"{ "version": "2.0.0", "presets": [] }"#;
        match PresetCatalog::from_json(json) {
            Err(Error::IncompatibleCatalog { found, supported }) => {
                assert_eq!(found, "2.0.0");
                assert_eq!(supported, CATALOG_FORMAT_VERSION);
            }
            other => panic!("expected incompatible catalog, got {:?}", other),
        }
    }
}
