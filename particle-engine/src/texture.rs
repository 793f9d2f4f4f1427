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
//! Texture handles and cache
//!
//! The simulation treats textures as opaque: a [`TextureId`] is copied from
//! the configuration onto every spawned particle and handed to the renderer
//! untouched. [`TextureCache`] hands out those ids for image files, keyed by
//! file name so loading the same file twice reuses the first handle.
//!
//! The cache never decodes image data; it keeps the raw bytes for the
//! renderer to upload however it likes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigOverrides;
use crate::emitter::Emitter;
use crate::error::{Error, Result};

/// File extensions accepted as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Opaque handle to a texture owned by the renderer side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureId(u64);

impl TextureId {
    /// Wrap a raw handle value
    pub fn new(id: u64) -> Self {
        TextureId(id)
    }

    /// Raw handle value
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Cache of loaded texture files
#[derive(Debug, Default)]
pub struct TextureCache {
    by_name: HashMap<String, TextureId>,
    data: Vec<Vec<u8>>,
}

impl TextureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image file, returning the cached handle for a known file name
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedTexture`] if the extension is not an image type
    /// - [`Error::TextureLoad`] if the file cannot be read
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<TextureId> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(&id) = self.by_name.get(&name) {
            log::debug!("Texture {} served from cache", name);
            return Ok(id);
        }

        if !is_image_file(path) {
            return Err(Error::UnsupportedTexture(path.display().to_string()));
        }

        let bytes = fs::read(path).map_err(|source| Error::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.insert(name, bytes))
    }

    /// Store already-loaded image bytes under `name`
    ///
    /// Replaces nothing: an existing entry with the same name is returned
    /// instead.
    pub fn insert_bytes(&mut self, name: &str, bytes: Vec<u8>) -> TextureId {
        match self.by_name.get(name) {
            Some(&id) => id,
            None => self.insert(name.to_string(), bytes),
        }
    }

    fn insert(&mut self, name: String, bytes: Vec<u8>) -> TextureId {
        let id = TextureId::new(self.data.len() as u64);
        log::debug!("Texture {} loaded as {} ({} bytes)", name, id.id(), bytes.len());
        self.data.push(bytes);
        self.by_name.insert(name, id);
        id
    }

    /// Raw bytes behind a handle
    pub fn bytes(&self, id: TextureId) -> Option<&[u8]> {
        usize::try_from(id.id())
            .ok()
            .and_then(|index| self.data.get(index))
            .map(Vec::as_slice)
    }

    /// Handle previously assigned to a file name
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Point an emitter at a texture
    ///
    /// Goes through [`Emitter::overlay`], so the emitter's pool is reset.
    pub fn apply(&self, emitter: &mut Emitter, id: TextureId) {
        emitter.overlay(&ConfigOverrides {
            texture: Some(id),
            ..Default::default()
        });
    }
}

/// Whether the path has one of the [`IMAGE_EXTENSIONS`]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
