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
//! Error types for the collaborators around the emitter
//!
//! The simulation itself never fails. Errors only come from parsing
//! configuration and preset catalogs, and from loading textures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration, presets or textures
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration or catalog JSON
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A version string could not be parsed
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Catalog format version rejected by the compatibility rule
    #[error("Preset catalog version {found} is incompatible with supported version {supported}")]
    IncompatibleCatalog {
        /// Version declared by the catalog
        found: String,
        /// Version this build reads
        supported: String,
    },

    /// The file does not look like an image the renderer can use
    #[error("Unsupported texture file: {0}")]
    UnsupportedTexture(String),

    /// Reading the texture file failed
    #[error("Failed to load texture {}: {source}", .path.display())]
    TextureLoad {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

/// Result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
