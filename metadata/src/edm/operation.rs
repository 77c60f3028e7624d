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

//! Actions and functions.
//!
//! Both elements have the same shape and are mapped by the same code.
//! They are distinguished on type level by a kind marker so a
//! `Function` can't be passed where an `Action` is expected.

use crate::edm::bool_attribute;
use crate::edm::map_nodes;
use crate::edm::map_single_node;
use crate::edm::Annotated;
use crate::edm::Annotation;
use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::TypeName;
use crate::xml::QueryableNode;
use serde::Serialize;
use std::marker::PhantomData;

/// Kind of an operation.
pub trait OperationKind {
    /// Name of the CSDL element.
    const ELEMENT: &'static str;
}

/// Marker of 12.1 Element edm:Action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {}

/// Marker of 12.2 Element edm:Function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {}

impl OperationKind for ActionKind {
    const ELEMENT: &'static str = "Action";
}

impl OperationKind for FunctionKind {
    const ELEMENT: &'static str = "Function";
}

pub type Action = Operation<ActionKind>;
pub type Function = Operation<FunctionKind>;

/// Bound or unbound operation declared in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase", bound = "")]
pub struct Operation<K> {
    /// 12.1.1 Attribute `Name`
    pub name: String,
    /// 12.1.2 Attribute `IsBound`
    pub is_bound: bool,
    /// 12.4 Element edm:Parameter
    #[serde(rename = "Parameter")]
    pub parameters: Vec<Parameter>,
    /// 12.3 Element edm:ReturnType. `None` if operation doesn't
    /// return anything.
    pub return_type: Option<ReturnType>,
    pub annotations: Vec<Annotation>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

/// 12.4 Element edm:Parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    /// 12.4.1 Attribute `Name`
    pub name: String,
    /// 12.4.2 Attribute `Type`
    #[serde(rename = "Type")]
    pub ptype: TypeName,
    /// 12.4.3 Attribute `Nullable`
    pub nullable: bool,
}

/// 12.3 Element edm:ReturnType
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReturnType {
    /// 12.3.1 Attribute `Type`
    #[serde(rename = "Type")]
    pub rtype: TypeName,
    /// 12.3.2 Attribute `Nullable`
    pub nullable: bool,
}

impl<K: OperationKind> FromXmlNode for Operation<K> {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            // Any present value other than "true" unbinds the operation.
            is_bound: bool_attribute(node, "IsBound", true),
            parameters: map_nodes(node, "Parameter")?,
            return_type: map_single_node(node, "ReturnType")?,
            annotations: map_nodes(node, "Annotation")?,
            kind: PhantomData,
        })
    }
}

impl FromXmlNode for Parameter {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            name: node.attribute_or_empty("Name"),
            ptype: TypeName::new(node.attribute_or_empty("Type")),
            nullable: bool_attribute(node, "Nullable", true),
        })
    }
}

impl FromXmlNode for ReturnType {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            rtype: TypeName::new(node.attribute_or_empty("Type")),
            nullable: bool_attribute(node, "Nullable", true),
        })
    }
}

impl<K: OperationKind> Operation<K> {
    /// Name of the CSDL element of this operation kind.
    #[must_use]
    pub const fn element_name() -> &'static str {
        K::ELEMENT
    }

    /// Binding parameter: the first parameter of a bound operation.
    #[must_use]
    pub fn binding_parameter(&self) -> Option<&Parameter> {
        if self.is_bound {
            self.parameters.first()
        } else {
            None
        }
    }
}

impl<K> Annotated for Operation<K> {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

#[cfg(test)]
mod test {
    use super::Action;
    use super::Function;
    use crate::edm::FromXmlNode;
    use roxmltree::Document;

    fn action(xml: &str) -> Action {
        let doc = Document::parse(xml).unwrap();
        Action::from_xml_node(&doc.root_element()).unwrap()
    }

    #[test]
    fn test_is_bound() {
        assert!(action(r#"<Action Name="a"/>"#).is_bound);
        assert!(action(r#"<Action Name="a" IsBound="true"/>"#).is_bound);
        assert!(!action(r#"<Action Name="a" IsBound="false"/>"#).is_bound);
        assert!(!action(r#"<Action Name="a" IsBound="yes"/>"#).is_bound);
    }

    #[test]
    fn test_no_return_type() {
        let a = action(r#"<Action Name="a"><Parameter Name="p" Type="Edm.String"/></Action>"#);
        assert!(a.return_type.is_none());
    }

    #[test]
    fn test_parameters_and_return_type() {
        let a = action(
            r#"<Action Name="Cancel" IsBound="true">
                 <Parameter Name="bindingParameter" Type="Shop.Order" Nullable="false"/>
                 <Parameter Name="reason" Type="Edm.String"/>
                 <ReturnType Type="Shop.Order" Nullable="false"/>
               </Action>"#,
        );
        assert_eq!(a.name, "Cancel");
        let names: Vec<_> = a.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["bindingParameter", "reason"]);
        assert!(!a.parameters[0].nullable);
        assert!(a.parameters[1].nullable);
        assert_eq!(a.parameters[1].ptype.inner(), "Edm.String");
        let rt = a.return_type.as_ref().unwrap();
        assert_eq!(rt.rtype.inner(), "Shop.Order");
        assert!(!rt.nullable);
        assert_eq!(a.binding_parameter().unwrap().name, "bindingParameter");
    }

    #[test]
    fn test_function() {
        let doc = Document::parse(
            r#"<Function Name="Total" IsBound="false">
                 <Parameter Name="from" Type="Edm.Date"/>
                 <ReturnType Type="Edm.Decimal"/>
               </Function>"#,
        )
        .unwrap();
        let f = Function::from_xml_node(&doc.root_element()).unwrap();
        assert!(!f.is_bound);
        assert!(f.binding_parameter().is_none());
        assert!(f.return_type.as_ref().unwrap().nullable);
        assert_eq!(Function::element_name(), "Function");
    }
}
