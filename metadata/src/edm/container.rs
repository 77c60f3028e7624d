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

use crate::edm::annotation::annotation_string;
use crate::edm::annotation::terms;
use crate::edm::map_nodes;
use crate::edm::opt_attribute;
use crate::edm::Annotated;
use crate::edm::Annotation;
use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::TypeName;
use crate::xml::QueryableNode;
use serde::Serialize;

/// 13.1 Element edm:EntityContainer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityContainer {
    /// 13.1.1 Attribute `Name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "EntitySet")]
    pub entity_sets: Vec<EntitySet>,
}

/// 13.2 Element edm:EntitySet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntitySet {
    /// 13.2.1 Attribute `Name`
    pub name: String,
    /// 13.2.2 Attribute `EntityType`
    pub entity_type: TypeName,
    /// Path from `Org.OData.Core.V1.ResourcePath`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl FromXmlNode for EntityContainer {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: opt_attribute(node, "Name"),
            entity_sets: map_nodes(node, "EntitySet")?,
        })
    }
}

impl FromXmlNode for EntitySet {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            entity_type: TypeName::new(node.attribute_or_empty("EntityType")),
            resource_path: annotation_string(node, terms::RESOURCE_PATH)?,
            annotations: map_nodes(node, "Annotation")?,
        })
    }
}

impl EntityContainer {
    /// Entity set by name.
    #[must_use]
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }
}

impl Annotated for EntitySet {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
