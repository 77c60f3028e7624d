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

use crate::edm::annotation::annotation_flag;
use crate::edm::annotation::annotation_string;
use crate::edm::annotation::terms;
use crate::edm::bool_attribute;
use crate::edm::map_nodes;
use crate::edm::opt_attribute;
use crate::edm::Annotated;
use crate::edm::Annotation;
use crate::edm::Description;
use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::LongDescription;
use crate::edm::PropertyName;
use crate::edm::TypeName;
use crate::xml::QueryableNode;
use serde::Serialize;

/// 6.1 Element edm:Property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    /// 6.1.1 Attribute `Name`
    pub name: PropertyName,
    /// 6.1.2 Attribute `Type`
    #[serde(rename = "Type")]
    pub ptype: TypeName,
    /// 6.2.1 Attribute `Nullable`
    pub nullable: bool,
    /// 6.2.2 Attribute `MaxLength`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    /// 6.2.7 Attribute `DefaultValue`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub immutable: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<LongDescription>,
    /// All annotations including interpreted ones.
    pub annotations: Vec<Annotation>,
}

/// 7.1 Element edm:NavigationProperty
///
/// Multiplicity is encoded in the type (single entity or
/// `Collection(...)`), so there is no nullable flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationProperty {
    /// 7.1.1 Attribute `Name`
    pub name: PropertyName,
    /// 7.1.2 Attribute `Type`
    #[serde(rename = "Type")]
    pub ptype: TypeName,
    /// 7.1.4 Attribute `Partner`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    /// 7.1.5 Attribute `ContainsTarget`
    pub contains_target: bool,
    pub immutable: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<LongDescription>,
    /// All annotations including interpreted ones.
    pub annotations: Vec<Annotation>,
}

/// Annotation-derived fields shared by both property kinds.
struct PropertyAnnotations {
    immutable: bool,
    computed: bool,
    description: Option<Description>,
    long_description: Option<LongDescription>,
    annotations: Vec<Annotation>,
}

impl PropertyAnnotations {
    fn read<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            immutable: annotation_flag(node, terms::IMMUTABLE)?.unwrap_or(false),
            computed: annotation_flag(node, terms::COMPUTED)?.unwrap_or(false),
            description: annotation_string(node, terms::DESCRIPTION)?.map(Description::new),
            long_description: annotation_string(node, terms::LONG_DESCRIPTION)?
                .map(LongDescription::new),
            annotations: map_nodes(node, "Annotation")?,
        })
    }
}

impl FromXmlNode for Property {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        let PropertyAnnotations {
            immutable,
            computed,
            description,
            long_description,
            annotations,
        } = PropertyAnnotations::read(node)?;
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            ptype: TypeName::new(node.attribute_or_empty("Type")),
            nullable: bool_attribute(node, "Nullable", true),
            max_length: opt_attribute(node, "MaxLength"),
            default_value: opt_attribute(node, "DefaultValue"),
            immutable,
            computed,
            description,
            long_description,
            annotations,
        })
    }
}

impl FromXmlNode for NavigationProperty {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        let PropertyAnnotations {
            immutable,
            computed,
            description,
            long_description,
            annotations,
        } = PropertyAnnotations::read(node)?;
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            ptype: TypeName::new(node.attribute_or_empty("Type")),
            partner: opt_attribute(node, "Partner"),
            contains_target: bool_attribute(node, "ContainsTarget", false),
            immutable,
            computed,
            description,
            long_description,
            annotations,
        })
    }
}

impl NavigationProperty {
    /// Navigation property targets a collection of entities.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        crate::edm::collection_item_type(self.ptype.inner()).is_some()
    }
}

impl Annotated for Property {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl Annotated for NavigationProperty {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
