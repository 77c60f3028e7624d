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

//! Typed model of an OData `Schema` and mappers that build it from
//! a [`QueryableNode`].
//!
//! Every model type implements [`FromXmlNode`]. A mapper reads only
//! attributes and children it knows about and ignores everything
//! else. Construction starts from the type defaults and a default is
//! overridden only if the corresponding attribute or annotation is
//! present in the document.

/// Element edm:Annotation and well-known terms.
pub mod annotation;

/// Element edm:EntityContainer / edm:EntitySet.
pub mod container;

/// Element edm:EntityType / edm:Key / edm:PropertyRef.
pub mod entity_type;

/// Elements edm:Action / edm:Function and their parameters.
pub mod operation;

/// Elements edm:Property / edm:NavigationProperty.
pub mod property;

/// Element edm:Schema.
pub mod schema;

pub use annotation::Annotated;
pub use annotation::Annotation;
pub use annotation::AnnotationValue;
pub use container::EntityContainer;
pub use container::EntitySet;
pub use entity_type::EntityType;
pub use entity_type::Key;
pub use entity_type::PropertyRef;
pub use operation::Action;
pub use operation::Function;
pub use operation::Operation;
pub use operation::Parameter;
pub use operation::ReturnType;
pub use property::NavigationProperty;
pub use property::Property;
pub use schema::Schema;

use crate::xml::PatternError;
use crate::xml::QueryableNode;
use roxmltree::Error as XmlError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use tagged_types::TaggedType;

/// Reference to a type: `Edm.String`, `Ns.Person`,
/// `Collection(Ns.Person)`.
pub type TypeName = TaggedType<String, TypeNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Serialize)]
#[capability(inner_access)]
pub enum TypeNameTag {}

/// Qualified name of an annotation term.
pub type TermName = TaggedType<String, TermNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Serialize)]
#[capability(inner_access)]
pub enum TermNameTag {}

/// A brief description of a model element.
pub type Description = TaggedType<String, DescriptionTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, PartialEq, Eq)]
#[transparent(Debug, Display, Serialize)]
#[capability(inner_access)]
pub enum DescriptionTag {}

/// A lengthy description of a model element.
pub type LongDescription = TaggedType<String, LongDescriptionTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, PartialEq, Eq)]
#[transparent(Debug, Display, Serialize)]
#[capability(inner_access)]
pub enum LongDescriptionTag {}

pub type PropertyName = String;

/// Errors of mapping a metadata document.
#[derive(Debug)]
pub enum Error {
    /// Document is not well-formed XML.
    Xml(XmlError),
    /// Internal selection pattern is malformed.
    Pattern(PatternError),
    /// `edmx:DataServices/Schema` is not found in the document.
    SchemaNotFound,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Xml(e) => write!(f, "xml parse error: {e}"),
            Self::Pattern(e) => write!(f, "node selection error: {e}"),
            Self::SchemaNotFound => "schema element is not found".fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::SchemaNotFound => None,
        }
    }
}

/// Capability to construct a value from an XML node.
pub trait FromXmlNode: Sized {
    /// Build value from `node`.
    ///
    /// # Errors
    ///
    /// Returns error if node selection fails. Missing attributes and
    /// optional children are never errors.
    fn from_xml_node<N: QueryableNode>(node: &N) -> Result<Self, Error>;
}

/// Map all children matching `pattern`, preserving document order.
pub(crate) fn map_nodes<T: FromXmlNode, N: QueryableNode>(
    node: &N,
    pattern: &str,
) -> Result<Vec<T>, Error> {
    node.select_nodes(pattern)
        .map_err(Error::Pattern)?
        .iter()
        .map(T::from_xml_node)
        .collect()
}

/// Map the first child matching `pattern` if any.
pub(crate) fn map_single_node<T: FromXmlNode, N: QueryableNode>(
    node: &N,
    pattern: &str,
) -> Result<Option<T>, Error> {
    node.select_single_node(pattern)
        .map_err(Error::Pattern)?
        .as_ref()
        .map(T::from_xml_node)
        .transpose()
}

/// Boolean attribute: `default` if the attribute is absent, otherwise
/// `true` only if its value is literally `"true"`.
pub(crate) fn bool_attribute<N: QueryableNode>(node: &N, name: &str, default: bool) -> bool {
    node.get_attribute(name).map_or(default, |v| v == "true")
}

/// Optional string attribute, verbatim.
pub(crate) fn opt_attribute<N: QueryableNode>(node: &N, name: &str) -> Option<String> {
    node.get_attribute(name).map(Into::into)
}

/// Item type of `Collection(...)` type reference.
#[must_use]
pub fn collection_item_type(tname: &str) -> Option<&str> {
    tname
        .strip_prefix("Collection(")
        .and_then(|v| v.strip_suffix(')'))
}

#[cfg(test)]
mod test {
    use super::bool_attribute;
    use super::collection_item_type;
    use roxmltree::Document;

    #[test]
    fn test_bool_attribute_presence() {
        let doc = Document::parse(r#"<P A="true" B="false" C="yes" D=""/>"#).unwrap();
        let node = doc.root_element();
        assert!(bool_attribute(&node, "A", false));
        assert!(!bool_attribute(&node, "B", true));
        assert!(!bool_attribute(&node, "C", true));
        assert!(!bool_attribute(&node, "D", true));
        assert!(bool_attribute(&node, "Missing", true));
        assert!(!bool_attribute(&node, "Missing", false));
    }

    #[test]
    fn test_collection_item_type() {
        assert_eq!(collection_item_type("Collection(Ns.T)"), Some("Ns.T"));
        assert_eq!(collection_item_type("Ns.T"), None);
        assert_eq!(collection_item_type("Collection(Ns.T"), None);
    }
}
