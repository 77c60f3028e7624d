// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bindings manifest.
//!
//! This module defines file format for entity bindings manifest. The
//! manifest declares which entity types and entity sets a consumer
//! expects the service to expose:
//!
//! ```toml
//! [[entity]]
//! entity-type = "Person"
//! entity-set = "People"
//! ```

use crate::edm::Schema;
use crate::registry::verify_all;
use crate::registry::BindingError;
use crate::registry::EntityBinding;
use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use toml::de::Error as TomlError;

/// Manifest of expected entity bindings.
#[derive(Deserialize, Debug, Default)]
pub struct BindingsManifest {
    #[serde(rename = "entity", default)]
    pub entities: Vec<EntityBinding>,
}

impl BindingsManifest {
    /// Read bindings manifest from toml file.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid manifest.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        Self::parse(&content)
    }

    /// Parse bindings manifest from toml text.
    ///
    /// # Errors
    ///
    /// `Error::Toml` if content is not a valid manifest.
    pub fn parse(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(Error::Toml)
    }

    /// Verify all bindings against `schema`.
    #[must_use]
    pub fn verify(&self, schema: &Schema) -> Vec<BindingError> {
        verify_all(self.entities.iter(), schema)
    }
}

/// Errors of reading bindings manifest.
#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "toml parse error: {err}"),
        }
    }
}

impl StdError for Error {}
