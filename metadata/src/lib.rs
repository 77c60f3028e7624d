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

//! OData metadata document mapper.
//!
//! Maps the `edmx:DataServices/Schema` element of an OData CSDL/EDMX
//! document to a typed [`edm::Schema`]:
//!
//! ```
//! use odata_metadata::edm::Schema;
//!
//! let schema = Schema::parse(
//!     r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
//!          <edmx:DataServices>
//!            <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Sample">
//!              <EntityType Name="Person">
//!                <Key><PropertyRef Name="id"/></Key>
//!                <Property Name="id" Type="Edm.Int32" Nullable="false"/>
//!              </EntityType>
//!            </Schema>
//!          </edmx:DataServices>
//!        </edmx:Edmx>"#,
//! )?;
//! let person = schema.entity_type("Sample.Person").unwrap();
//! assert!(!person.properties[0].nullable);
//! # Ok::<(), odata_metadata::edm::Error>(())
//! ```
//!
//! Mappers consume [`xml::QueryableNode`], so any DOM can be used as a
//! source. Implementation for `roxmltree` is provided.

/// Typed schema model and mappers.
pub mod edm;

/// Queryable XML node.
pub mod xml;

/// Binding of consumer types to entity types / entity sets.
pub mod registry;

/// Bindings manifest.
pub mod bindings;

/// Command line commands.
pub mod commands;

/// Command line errors.
pub mod error;

#[doc(inline)]
pub use error::Error;
