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

//! Queryable XML node.
//!
//! Mappers of the `edm` module never touch an XML parser
//! directly. They consume [`QueryableNode`] that provides node
//! selection by path pattern and attribute access. Implementations
//! only need to supply a handful of DOM primitives; selection is
//! implemented on top of them.

/// Path patterns.
pub mod pattern;

pub use pattern::Pattern;
pub use pattern::PatternError;

use roxmltree::Node;

/// Element node that can be queried by path patterns.
pub trait QueryableNode: Clone {
    /// Direct element children in document order.
    fn child_elements(&self) -> Vec<Self>;

    /// Local (unprefixed) name of the element.
    fn local_name(&self) -> &str;

    /// Namespace URI of the element if any.
    fn namespace_uri(&self) -> Option<&str>;

    /// Namespace URI bound to `prefix` in scope of this element.
    fn lookup_namespace(&self, prefix: &str) -> Option<&str>;

    /// Value of the attribute. `None` if attribute is not present.
    fn get_attribute(&self, name: &str) -> Option<&str>;

    /// Check that attribute is present (even if its value is empty).
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Value of the attribute or empty string if the attribute is
    /// not present.
    fn attribute_or_empty(&self, name: &str) -> String {
        self.get_attribute(name).unwrap_or_default().into()
    }

    /// All nodes matching `pattern` in document order.
    ///
    /// # Errors
    ///
    /// Returns error only if `pattern` is malformed.
    fn select_nodes(&self, pattern: &str) -> Result<Vec<Self>, PatternError> {
        Ok(pattern.parse::<Pattern>()?.select(self))
    }

    /// First node matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns error only if `pattern` is malformed.
    fn select_single_node(&self, pattern: &str) -> Result<Option<Self>, PatternError> {
        Ok(self.select_nodes(pattern)?.into_iter().next())
    }
}

impl QueryableNode for Node<'_, '_> {
    fn child_elements(&self) -> Vec<Self> {
        self.children().filter(|n| n.is_element()).collect()
    }

    fn local_name(&self) -> &str {
        self.tag_name().name()
    }

    fn namespace_uri(&self) -> Option<&str> {
        self.tag_name().namespace()
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        self.lookup_namespace_uri(Some(prefix))
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name)
    }
}

#[cfg(test)]
mod test {
    use super::QueryableNode;
    use roxmltree::Document;

    const DOC: &str = r#"
        <edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
          <edmx:DataServices>
            <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="A">
              <EntityType Name="One"/>
              <ComplexType Name="Skipped"/>
              <EntityType Name="Two" OpenType="">
                <Annotation Term="T.X" String="first"/>
                <Annotation Term="T.Y" String="second"/>
                <Annotation Term="T.X" String="third"/>
              </EntityType>
            </Schema>
          </edmx:DataServices>
          <DataServices/>
        </edmx:Edmx>"#;

    #[test]
    fn test_select_nodes_in_document_order() {
        let doc = Document::parse(DOC).unwrap();
        let root = doc.root_element();
        let types = root
            .select_nodes("edmx:DataServices/Schema/EntityType")
            .unwrap();
        let names: Vec<_> = types
            .iter()
            .map(|n| n.attribute_or_empty("Name"))
            .collect();
        assert_eq!(names, vec!["One", "Two"]);
        assert!(root.select_nodes("edmx:DataServices/Function").unwrap().is_empty());
        let all = root.select_nodes("edmx:DataServices/Schema/*").unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_prefix_requires_namespace() {
        let doc = Document::parse(DOC).unwrap();
        let root = doc.root_element();
        // Unprefixed `DataServices` has no namespace and is not matched.
        assert_eq!(root.select_nodes("edmx:DataServices").unwrap().len(), 1);
        // Local name match ignores namespaces.
        assert_eq!(root.select_nodes("DataServices").unwrap().len(), 2);
    }

    #[test]
    fn test_select_single_node_with_predicate() {
        let doc = Document::parse(DOC).unwrap();
        let two = doc
            .root_element()
            .select_single_node(r#"edmx:DataServices/Schema/EntityType[@Name="Two"]"#)
            .unwrap()
            .unwrap();
        let x = two
            .select_single_node(r#"Annotation[@Term="T.X"]"#)
            .unwrap()
            .unwrap();
        assert_eq!(x.get_attribute("String"), Some("first"));
        assert!(two
            .select_single_node(r#"Annotation[@Term="T.Z"]"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_attribute_presence() {
        let doc = Document::parse(DOC).unwrap();
        let types = doc
            .root_element()
            .select_nodes("edmx:DataServices/Schema/EntityType")
            .unwrap();
        assert!(!QueryableNode::has_attribute(&types[0], "OpenType"));
        assert!(QueryableNode::has_attribute(&types[1], "OpenType"));
        assert_eq!(types[1].get_attribute("OpenType"), Some(""));
        assert_eq!(types[0].attribute_or_empty("BaseType"), "");
    }

    #[test]
    fn test_malformed_pattern() {
        let doc = Document::parse(DOC).unwrap();
        assert!(doc.root_element().select_nodes("Schema[@Name").is_err());
    }
}
