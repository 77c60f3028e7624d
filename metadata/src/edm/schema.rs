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

//! Schema root mapper.

use crate::edm::collection_item_type;
use crate::edm::map_nodes;
use crate::edm::map_single_node;
use crate::edm::opt_attribute;
use crate::edm::Action;
use crate::edm::EntityContainer;
use crate::edm::EntitySet;
use crate::edm::EntityType;
use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::Function;
use crate::edm::TypeName;
use crate::xml::QueryableNode;
use roxmltree::Document;
use serde::Serialize;
use std::collections::HashSet;

/// Path of schemas relative to the document element.
pub const SCHEMA_PATH: &str = "edmx:DataServices/Schema";

/// 5.1 Element edm:Schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schema {
    /// 5.1.1 Attribute `Namespace`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// 5.1.2 Attribute `Alias`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(rename = "EntityType")]
    pub entity_types: Vec<EntityType>,
    /// Always present. Empty if the schema has no container.
    pub entity_container: EntityContainer,
    #[serde(rename = "Action")]
    pub actions: Vec<Action>,
    #[serde(rename = "Function")]
    pub functions: Vec<Function>,
}

/// Bound operations of an entity type.
#[derive(Debug, Default)]
pub struct BoundOperations<'a> {
    pub actions: Vec<&'a Action>,
    pub functions: Vec<&'a Function>,
}

impl FromXmlNode for Schema {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            namespace: opt_attribute(node, "Namespace"),
            alias: opt_attribute(node, "Alias"),
            entity_types: map_nodes(node, "EntityType")?,
            entity_container: map_single_node(node, "EntityContainer")?.unwrap_or_default(),
            actions: map_nodes(node, "Action")?,
            functions: map_nodes(node, "Function")?,
        })
    }
}

impl Schema {
    /// Parse metadata document and map its first schema.
    ///
    /// # Errors
    ///
    /// - `Error::Xml` if document is not well-formed XML.
    /// - `Error::SchemaNotFound` if there is no
    ///   `edmx:DataServices/Schema` under the document element.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let doc = Document::parse(xml).map_err(Error::Xml)?;
        Self::from_document(&doc)
    }

    /// Map the first schema of already parsed document.
    ///
    /// # Errors
    ///
    /// `Error::SchemaNotFound` if schema element is not found.
    pub fn from_document(doc: &Document<'_>) -> Result<Self, Error> {
        Self::from_root(&doc.root_element())
    }

    /// Map the first schema found under the document element `root`.
    ///
    /// # Errors
    ///
    /// `Error::SchemaNotFound` if schema element is not found.
    pub fn from_root<N: QueryableNode>(root: &N) -> Result<Self, Error> {
        map_single_node(root, SCHEMA_PATH)?.ok_or(Error::SchemaNotFound)
    }

    /// Parse metadata document and map all its schemas in document
    /// order.
    ///
    /// # Errors
    ///
    /// - `Error::Xml` if document is not well-formed XML.
    /// - `Error::SchemaNotFound` if the document has no schemas.
    pub fn parse_all(xml: &str) -> Result<Vec<Self>, Error> {
        let doc = Document::parse(xml).map_err(Error::Xml)?;
        let schemas: Vec<Self> = map_nodes(&doc.root_element(), SCHEMA_PATH)?;
        if schemas.is_empty() {
            Err(Error::SchemaNotFound)
        } else {
            Ok(schemas)
        }
    }

    /// Strip schema namespace or alias qualification from `name`.
    /// Names qualified by other namespaces are returned as is.
    #[must_use]
    pub fn local_name<'a>(&self, name: &'a str) -> &'a str {
        self.namespace
            .iter()
            .chain(self.alias.iter())
            .find_map(|q| {
                name.strip_prefix(q.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
            })
            .unwrap_or(name)
    }

    /// Entity type by simple or qualified name.
    #[must_use]
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        let name = self.local_name(name);
        self.entity_types.iter().find(|t| t.name == name)
    }

    /// Entity set by name.
    #[must_use]
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_container.entity_set(name)
    }

    /// Entity sets whose entity type is `type_name` (simple or
    /// qualified).
    #[must_use]
    pub fn entity_sets_of(&self, type_name: &str) -> Vec<&EntitySet> {
        let name = self.local_name(type_name);
        self.entity_container
            .entity_sets
            .iter()
            .filter(|s| self.local_name(s.entity_type.inner()) == name)
            .collect()
    }

    /// Chain of base types of `entity_type`, nearest first. The chain
    /// stops at a base type that is not declared in this schema or on
    /// a cycle.
    #[must_use]
    pub fn base_types<'a>(&'a self, entity_type: &'a EntityType) -> BaseTypes<'a> {
        let mut seen = HashSet::new();
        seen.insert(entity_type.name.as_str());
        BaseTypes {
            schema: self,
            next: entity_type.base_type.as_ref(),
            seen,
        }
    }

    /// Bound actions and functions whose binding parameter is
    /// `type_name` or a collection of `type_name`.
    #[must_use]
    pub fn bound_operations(&self, type_name: &str) -> BoundOperations<'_> {
        let name = self.local_name(type_name);
        let binds = |ptype: &TypeName| {
            let ptype = ptype.inner().as_str();
            self.local_name(collection_item_type(ptype).unwrap_or(ptype)) == name
        };
        BoundOperations {
            actions: self
                .actions
                .iter()
                .filter(|a| a.binding_parameter().is_some_and(|p| binds(&p.ptype)))
                .collect(),
            functions: self
                .functions
                .iter()
                .filter(|f| f.binding_parameter().is_some_and(|p| binds(&p.ptype)))
                .collect(),
        }
    }
}

/// Iterator over base types. See `Schema::base_types`.
pub struct BaseTypes<'a> {
    schema: &'a Schema,
    next: Option<&'a TypeName>,
    seen: HashSet<&'a str>,
}

impl<'a> Iterator for BaseTypes<'a> {
    type Item = &'a EntityType;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.schema.entity_type(self.next.take()?.inner())?;
        if self.seen.insert(base.name.as_str()) {
            self.next = base.base_type.as_ref();
            Some(base)
        } else {
            None
        }
    }
}
