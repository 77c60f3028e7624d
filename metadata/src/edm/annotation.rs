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

//! Annotations and extraction of well-known annotation terms.
//!
//! Semantic flags such as `Immutable` or `Description` are encoded as
//! generic `Annotation` children distinguished by the `Term`
//! attribute. Functions of this module look up such child by term
//! and read its value.

use crate::edm::Error;
use crate::edm::FromXmlNode;
use crate::edm::TermName;
use crate::xml::QueryableNode;
use serde::Serialize;

/// Well-known annotation terms.
pub mod terms {
    /// A value for this non-key property can be provided on insert and
    /// remains unchanged on update.
    pub const IMMUTABLE: &str = "Org.OData.Core.V1.Immutable";
    /// A value for this property is generated on both insert and
    /// update.
    pub const COMPUTED: &str = "Org.OData.Core.V1.Computed";
    pub const DESCRIPTION: &str = "Org.OData.Core.V1.Description";
    pub const LONG_DESCRIPTION: &str = "Org.OData.Core.V1.LongDescription";
    /// Resource path of an entity set relative to the service root.
    pub const RESOURCE_PATH: &str = "Org.OData.Core.V1.ResourcePath";
    /// Name of the type implemented by an entity type.
    pub const IMPLEMENTS: &str = "DataModel.OData.Core.V1.Implements";
}

/// 14.3 Element edm:Annotation
///
/// Value attributes are stored as they are found in the document. More
/// than one of them can be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Annotation {
    /// 14.3.1 Attribute `Term`
    pub term: TermName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "Bool", skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
}

/// One populated value slot of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationValue<'a> {
    String(&'a str),
    Tag(&'a str),
    Bool(bool),
}

impl FromXmlNode for Annotation {
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error> {
        Ok(Self {
            term: TermName::new(node.attribute_or_empty("Term")),
            string: node.get_attribute("String").map(Into::into),
            tag: node.get_attribute("Tag").map(Into::into),
            bool_value: node.get_attribute("Bool").map(|v| v == "true"),
        })
    }
}

impl Annotation {
    /// Populated value slots in order `String`, `Tag`, `Bool`.
    pub fn values(&self) -> impl Iterator<Item = AnnotationValue<'_>> {
        self.string
            .as_deref()
            .map(AnnotationValue::String)
            .into_iter()
            .chain(self.tag.as_deref().map(AnnotationValue::Tag))
            .chain(self.bool_value.map(AnnotationValue::Bool))
    }

    /// Tag-like annotation is set if either `Tag` or `Bool` is `true`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.tag.as_deref() == Some("true") || self.bool_value == Some(true)
    }
}

/// Model element that keeps its raw annotations.
pub trait Annotated {
    fn annotations(&self) -> &[Annotation];

    /// First annotation with the term.
    fn annotation(&self, term: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.term.inner() == term)
    }

    /// `String` value of the first annotation with the term.
    fn annotation_string(&self, term: &str) -> Option<&str> {
        self.annotation(term).and_then(|a| a.string.as_deref())
    }
}

/// Child `Annotation` element with the given term.
fn select_annotation<N: QueryableNode>(node: &N, term: &str) -> Result<Option<N>, Error> {
    node.select_single_node(&format!(r#"Annotation[@Term="{term}"]"#))
        .map_err(Error::Pattern)
}

/// Read tag-like annotation. `None` if annotation is not present.
/// Otherwise the value is `true` if either `Tag` or `Bool` attribute is
/// `"true"`.
///
/// # Errors
///
/// Returns error if node selection fails.
pub fn annotation_flag<N: QueryableNode>(node: &N, term: &str) -> Result<Option<bool>, Error> {
    Ok(select_annotation(node, term)?
        .map(|a| a.get_attribute("Tag") == Some("true") || a.get_attribute("Bool") == Some("true")))
}

/// Read `String` value of the annotation. `None` if annotation is not
/// present or it doesn't have `String` attribute.
///
/// # Errors
///
/// Returns error if node selection fails.
pub fn annotation_string<N: QueryableNode>(node: &N, term: &str) -> Result<Option<String>, Error> {
    Ok(select_annotation(node, term)?.and_then(|a| a.get_attribute("String").map(Into::into)))
}

#[cfg(test)]
mod test {
    use super::annotation_flag;
    use super::annotation_string;
    use super::terms;
    use super::Annotated;
    use super::Annotation;
    use super::AnnotationValue;
    use crate::edm::map_nodes;
    use crate::edm::FromXmlNode;
    use roxmltree::Document;

    struct Holder(Vec<Annotation>);

    impl Annotated for Holder {
        fn annotations(&self) -> &[Annotation] {
            &self.0
        }
    }

    #[test]
    fn test_flag_union() {
        let doc = Document::parse(
            r#"<Property>
                 <Annotation Term="Org.OData.Core.V1.Immutable" Tag="true"/>
                 <Annotation Term="Org.OData.Core.V1.Computed" Bool="true"/>
                 <Annotation Term="Org.OData.Core.V1.Description" Bool="false" Tag="false"/>
               </Property>"#,
        )
        .unwrap();
        let node = doc.root_element();
        assert_eq!(annotation_flag(&node, terms::IMMUTABLE).unwrap(), Some(true));
        assert_eq!(annotation_flag(&node, terms::COMPUTED).unwrap(), Some(true));
        assert_eq!(annotation_flag(&node, terms::DESCRIPTION).unwrap(), Some(false));
        assert_eq!(annotation_flag(&node, terms::RESOURCE_PATH).unwrap(), None);
    }

    #[test]
    fn test_first_annotation_wins() {
        let doc = Document::parse(
            r#"<Property>
                 <Annotation Term="Org.OData.Core.V1.Description" String="one"/>
                 <Annotation Term="Org.OData.Core.V1.Description" String="two"/>
                 <Annotation Term="Org.OData.Core.V1.LongDescription"/>
               </Property>"#,
        )
        .unwrap();
        let node = doc.root_element();
        assert_eq!(
            annotation_string(&node, terms::DESCRIPTION).unwrap().as_deref(),
            Some("one")
        );
        assert_eq!(annotation_string(&node, terms::LONG_DESCRIPTION).unwrap(), None);
        assert_eq!(annotation_string(&node, terms::IMPLEMENTS).unwrap(), None);
    }

    #[test]
    fn test_annotation_keeps_all_values() {
        let doc = Document::parse(r#"<Annotation Term="X.Y" String="s" Tag="t" Bool="maybe"/>"#)
            .unwrap();
        let a = Annotation::from_xml_node(&doc.root_element()).unwrap();
        assert_eq!(a.term.inner(), "X.Y");
        assert_eq!(
            a.values().collect::<Vec<_>>(),
            vec![
                AnnotationValue::String("s"),
                AnnotationValue::Tag("t"),
                AnnotationValue::Bool(false)
            ]
        );
        assert!(!a.is_true());
    }

    #[test]
    fn test_annotated_lookup() {
        let doc = Document::parse(
            r#"<P>
                 <Annotation Term="A.B" String="x"/>
                 <Annotation Term="A.C"/>
               </P>"#,
        )
        .unwrap();
        let holder = Holder(map_nodes(&doc.root_element(), "Annotation").unwrap());
        assert_eq!(holder.annotation_string("A.B"), Some("x"));
        assert!(holder.annotation("A.C").is_some());
        assert_eq!(holder.annotation_string("A.C"), None);
        assert!(holder.annotation("A.D").is_none());
        assert_eq!(holder.annotation("A.C").unwrap().values().count(), 0);
    }
}
