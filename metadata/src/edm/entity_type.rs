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
use crate::edm::bool_attribute;
use crate::edm::map_nodes;
use crate::edm::map_single_node;
use crate::edm::Annotated;
use crate::edm::Annotation;
use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::NavigationProperty;
use crate::edm::Property;
use crate::edm::PropertyName;
use crate::edm::TypeName;
use crate::xml::QueryableNode;
use serde::Serialize;

/// 8.1 Element edm:EntityType
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityType {
    /// 8.1.1 Attribute `Name`
    pub name: String,
    /// 8.1.2 Attribute `BaseType`
    ///
    /// Reference by name. Use `Schema::base_types` to resolve it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeName>,
    /// 8.1.4 Attribute `OpenType`
    pub open_type: bool,
    /// 8.2 Element edm:Key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(rename = "Property")]
    pub properties: Vec<Property>,
    #[serde(rename = "NavigationProperty")]
    pub navigation_properties: Vec<NavigationProperty>,
    /// Type named by `DataModel.OData.Core.V1.Implements`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implements_type: Option<TypeName>,
    pub annotations: Vec<Annotation>,
}

/// 8.2 Element edm:Key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    /// Order of references is the order of the composite key.
    #[serde(rename = "PropertyRef")]
    pub property_refs: Vec<PropertyRef>,
}

/// 8.3 Element edm:PropertyRef
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyRef {
    /// 8.3.1 Attribute `Name`. Not checked against properties of the
    /// entity type.
    pub name: PropertyName,
}

impl FromXmlNode for EntityType {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            base_type: node.get_attribute("BaseType").map(|v| TypeName::new(v.into())),
            open_type: bool_attribute(node, "OpenType", true),
            key: map_single_node(node, "Key")?,
            properties: map_nodes(node, "Property")?,
            navigation_properties: map_nodes(node, "NavigationProperty")?,
            implements_type: annotation_string(node, terms::IMPLEMENTS)?.map(TypeName::new),
            annotations: map_nodes(node, "Annotation")?,
        })
    }
}

impl FromXmlNode for Key {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            property_refs: map_nodes(node, "PropertyRef")?,
        })
    }
}

impl FromXmlNode for PropertyRef {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: node.attribute_or_empty("Name"),
        })
    }
}

impl EntityType {
    /// Structural property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Navigation property by name.
    #[must_use]
    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }

    /// Properties referenced by the key in key order. References to
    /// properties that are not declared in this entity type (for
    /// example, declared in a base type) are skipped.
    #[must_use]
    pub fn key_properties(&self) -> Vec<&Property> {
        self.key
            .iter()
            .flat_map(|k| k.property_refs.iter())
            .filter_map(|r| self.property(&r.name))
            .collect()
    }
}

impl Annotated for EntityType {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
