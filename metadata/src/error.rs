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


use crate::bindings::Error as BindingsError;
use crate::edm::Error as EdmError;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;

/// Command line tool errors.
#[derive(Debug)]
pub enum Error {
    Io(String, IoError),
    Edm(String, EdmError),
    Bindings(String, BindingsError),
    Json(JsonError),
    Unbound(Vec<String>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Io(fname, error) => write!(f, "input/output error: file: {fname}: {error}"),
            Self::Edm(fname, error) => {
                write!(f, "metadata document error: file: {fname}: {error}")
            }
            Self::Bindings(fname, error) => {
                write!(f, "bindings manifest error: file: {fname}: {error}")
            }
            Self::Json(error) => write!(f, "failed to serialize schema: {error}"),
            Self::Unbound(lines) => {
                write!(f, "bindings don't match the schema:")?;
                lines
                    .iter()
                    .enumerate()
                    .try_for_each(|(no, line)| write!(f, "\n #{no}: {line}"))
            }
        }
    }
}

impl StdError for Error {}
