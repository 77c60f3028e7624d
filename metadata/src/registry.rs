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

//! Binding of consumer types to entity types and entity sets.
//!
//! Consumers register their own Rust types explicitly:
//!
//! ```
//! use odata_metadata::registry::EntityRegistry;
//!
//! struct Person;
//!
//! let mut registry = EntityRegistry::new();
//! registry
//!     .register_entity::<Person>(None)
//!     .register_entity_set::<Person>("People");
//! assert_eq!(registry.entity_name::<Person>(), Some("Person"));
//! assert_eq!(registry.entity_set_name::<Person>(), Some("People"));
//! ```

use crate::edm::Schema;
use serde::Deserialize;
use serde::Serialize;
use std::any::type_name;
use std::any::TypeId;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Entity type and optional entity set names bound to a consumer type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntityBinding {
    /// Simple or qualified name of the entity type.
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_set: Option<String>,
}

/// Binding doesn't match the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// Entity type is not declared in the schema.
    UnknownEntityType(String),
    /// Entity set is not declared in the entity container.
    UnknownEntitySet(String),
    /// Entity set exists but contains instances of another type.
    EntitySetTypeMismatch {
        entity_set: String,
        expected: String,
        found: String,
    },
}

impl Display for BindingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnknownEntityType(name) => write!(f, "unknown entity type: {name}"),
            Self::UnknownEntitySet(name) => write!(f, "unknown entity set: {name}"),
            Self::EntitySetTypeMismatch {
                entity_set,
                expected,
                found,
            } => write!(
                f,
                "entity set {entity_set} contains {found} instead of {expected}"
            ),
        }
    }
}

impl StdError for BindingError {}

impl EntityBinding {
    /// Check that entity type and entity set exist in `schema` and that
    /// the entity set contains the bound entity type.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found.
    pub fn verify(&self, schema: &Schema) -> Result<(), BindingError> {
        let entity_type = schema
            .entity_type(&self.entity_type)
            .ok_or_else(|| BindingError::UnknownEntityType(self.entity_type.clone()))?;
        if let Some(set_name) = &self.entity_set {
            let set = schema
                .entity_set(set_name)
                .ok_or_else(|| BindingError::UnknownEntitySet(set_name.clone()))?;
            if schema.local_name(set.entity_type.inner()) != entity_type.name {
                return Err(BindingError::EntitySetTypeMismatch {
                    entity_set: set_name.clone(),
                    expected: self.entity_type.clone(),
                    found: set.entity_type.inner().clone(),
                });
            }
        }
        Ok(())
    }
}

/// Registry of bindings keyed by consumer type. Keeps registration
/// order.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    bindings: Vec<(TypeId, EntityBinding)>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `T` to an entity type. If `name` is `None` the last path
    /// segment of the Rust type name is used.
    pub fn register_entity<T: ?Sized + 'static>(&mut self, name: Option<&str>) -> &mut Self {
        let entity_type = name.map_or_else(default_entity_name::<T>, Into::into);
        self.binding_mut::<T>().entity_type = entity_type;
        self
    }

    /// Bind `T` to an entity set. Entity type of a new binding gets
    /// the default name.
    pub fn register_entity_set<T: ?Sized + 'static>(&mut self, name: &str) -> &mut Self {
        self.binding_mut::<T>().entity_set = Some(name.into());
        self
    }

    #[must_use]
    pub fn binding<T: ?Sized + 'static>(&self) -> Option<&EntityBinding> {
        let id = TypeId::of::<T>();
        self.bindings
            .iter()
            .find_map(|(k, b)| if *k == id { Some(b) } else { None })
    }

    #[must_use]
    pub fn entity_name<T: ?Sized + 'static>(&self) -> Option<&str> {
        self.binding::<T>().map(|b| b.entity_type.as_str())
    }

    #[must_use]
    pub fn entity_set_name<T: ?Sized + 'static>(&self) -> Option<&str> {
        self.binding::<T>().and_then(|b| b.entity_set.as_deref())
    }

    /// All bindings in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &EntityBinding> {
        self.bindings.iter().map(|(_, b)| b)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Verify all bindings against `schema`.
    #[must_use]
    pub fn verify(&self, schema: &Schema) -> Vec<BindingError> {
        verify_all(self.bindings(), schema)
    }

    fn binding_mut<T: ?Sized + 'static>(&mut self) -> &mut EntityBinding {
        let id = TypeId::of::<T>();
        let pos = self.bindings.iter().position(|(k, _)| *k == id);
        let pos = pos.unwrap_or_else(|| {
            self.bindings.push((
                id,
                EntityBinding {
                    entity_type: default_entity_name::<T>(),
                    entity_set: None,
                },
            ));
            self.bindings.len() - 1
        });
        &mut self.bindings[pos].1
    }
}

/// Verify every binding and collect all mismatches.
pub(crate) fn verify_all<'a>(
    bindings: impl Iterator<Item = &'a EntityBinding>,
    schema: &Schema,
) -> Vec<BindingError> {
    bindings.filter_map(|b| b.verify(schema).err()).collect()
}

/// `my_crate::model::Person<T>` -> `Person`
fn default_entity_name<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path).into()
}

#[cfg(test)]
mod test {
    use super::BindingError;
    use super::EntityRegistry;
    use crate::edm::Schema;

    struct Person;
    struct Order;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    fn schema() -> Schema {
        Schema::parse(
            r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
                 <edmx:DataServices>
                   <Schema Namespace="Sample">
                     <EntityType Name="Person"/>
                     <EntityType Name="Order"/>
                     <EntityContainer>
                       <EntitySet Name="People" EntityType="Sample.Person"/>
                       <EntitySet Name="Orders" EntityType="Sample.Order"/>
                     </EntityContainer>
                   </Schema>
                 </edmx:DataServices>
               </edmx:Edmx>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_names() {
        let mut r = EntityRegistry::new();
        r.register_entity::<Person>(None)
            .register_entity::<Wrapper<Order>>(None);
        assert_eq!(r.entity_name::<Person>(), Some("Person"));
        assert_eq!(r.entity_name::<Wrapper<Order>>(), Some("Wrapper"));
        assert_eq!(r.entity_set_name::<Person>(), None);
        assert_eq!(r.entity_name::<Order>(), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_set_before_entity() {
        let mut r = EntityRegistry::new();
        r.register_entity_set::<Order>("Orders")
            .register_entity::<Order>(Some("Sample.Order"));
        assert_eq!(r.len(), 1);
        assert_eq!(r.entity_name::<Order>(), Some("Sample.Order"));
        assert_eq!(r.entity_set_name::<Order>(), Some("Orders"));
        assert!(r.verify(&schema()).is_empty());
    }

    #[test]
    fn test_verify() {
        let s = schema();
        let mut r = EntityRegistry::new();
        r.register_entity::<Person>(None)
            .register_entity_set::<Person>("Orders")
            .register_entity::<Order>(Some("Invoice"))
            .register_entity::<Wrapper<Person>>(Some("Person"))
            .register_entity_set::<Wrapper<Person>>("Persons");
        assert_eq!(
            r.verify(&s),
            vec![
                BindingError::EntitySetTypeMismatch {
                    entity_set: "Orders".into(),
                    expected: "Person".into(),
                    found: "Sample.Order".into(),
                },
                BindingError::UnknownEntityType("Invoice".into()),
                BindingError::UnknownEntitySet("Persons".into()),
            ]
        );
    }
}
