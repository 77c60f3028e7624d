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

//! Path patterns used to select element children.
//!
//! Supported subset of `XPath`:
//!
//! ```text
//! pattern   := step ('/' step)*
//! step      := name predicate*
//! name      := '*' | NCName | prefix ':' NCName
//! predicate := '[' '@' NCName '=' quoted ']'
//! ```
//!
//! Every step selects direct element children of the nodes matched by
//! the previous step.

use crate::xml::QueryableNode;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

/// Malformed pattern. Every variant carries the whole pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern is empty.
    Empty,
    /// Pattern contains an empty step (`A//B`, leading or trailing `/`).
    EmptyStep(String),
    /// Element name of a step is not a valid (qualified) name.
    BadName(String),
    /// Predicate is not closed.
    UnterminatedPredicate(String),
    /// Predicate is not of form `[@Name="value"]`.
    BadPredicate(String),
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Empty => "empty pattern".fmt(f),
            Self::EmptyStep(p) => write!(f, "empty step in pattern: {p}"),
            Self::BadName(p) => write!(f, "invalid element name in pattern: {p}"),
            Self::UnterminatedPredicate(p) => write!(f, "unterminated predicate in pattern: {p}"),
            Self::BadPredicate(p) => write!(f, "invalid predicate in pattern: {p}"),
        }
    }
}

impl StdError for PatternError {}

/// Parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub steps: Vec<Step>,
}

/// One `/`-separated step of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: NameTest,
    pub predicates: Vec<Predicate>,
}

/// Element name test of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `*`
    Any,
    /// Unprefixed name. Matches local name in any namespace.
    Local(String),
    /// `prefix:local`
    Prefixed { prefix: String, local: String },
}

/// Attribute equality predicate: `[@attribute="value"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub attribute: String,
    pub value: String,
}

impl Pattern {
    /// Select nodes matching the pattern relative to `node`. Result is
    /// in document order.
    pub fn select<N: QueryableNode>(&self, node: &N) -> Vec<N> {
        self.steps.iter().fold(vec![node.clone()], |current, step| {
            current
                .iter()
                .flat_map(QueryableNode::child_elements)
                .filter(|child| step.matches(child))
                .collect()
        })
    }
}

impl Step {
    /// Check whether `node` satisfies the name test and all predicates.
    pub fn matches<N: QueryableNode>(&self, node: &N) -> bool {
        self.name.matches(node)
            && self
                .predicates
                .iter()
                .all(|p| node.get_attribute(&p.attribute) == Some(p.value.as_str()))
    }

    fn parse<'a>(input: &'a str, pattern: &str) -> Result<(Self, &'a str), PatternError> {
        let end = input.find(['[', '/']).unwrap_or(input.len());
        let (name, mut rest) = input.split_at(end);
        if name.is_empty() {
            return Err(PatternError::EmptyStep(pattern.into()));
        }
        let name = name.parse::<NameTest>().map_err(|()| PatternError::BadName(pattern.into()))?;
        let mut predicates = Vec::new();
        while let Some(body) = rest.strip_prefix('[') {
            let (predicate, tail) = Predicate::parse(body, pattern)?;
            predicates.push(predicate);
            rest = tail;
        }
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(PatternError::BadPredicate(pattern.into()));
        }
        Ok((Self { name, predicates }, rest))
    }
}

impl NameTest {
    fn matches<N: QueryableNode>(&self, node: &N) -> bool {
        match self {
            Self::Any => true,
            Self::Local(local) => node.local_name() == local,
            Self::Prefixed { prefix, local } => {
                // Undeclared prefix degrades to local name match.
                node.local_name() == local
                    && node
                        .lookup_namespace(prefix)
                        .map_or(true, |uri| node.namespace_uri() == Some(uri))
            }
        }
    }
}

impl FromStr for NameTest {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(Self::Any)
        } else if let Some((prefix, local)) = s.split_once(':') {
            if is_ncname(prefix) && is_ncname(local) {
                Ok(Self::Prefixed {
                    prefix: prefix.into(),
                    local: local.into(),
                })
            } else {
                Err(())
            }
        } else if is_ncname(s) {
            Ok(Self::Local(s.into()))
        } else {
            Err(())
        }
    }
}

impl Predicate {
    /// Parse predicate body (text right after `[`).
    fn parse<'a>(body: &'a str, pattern: &str) -> Result<(Self, &'a str), PatternError> {
        let bad = || PatternError::BadPredicate(pattern.into());
        let unterminated = || PatternError::UnterminatedPredicate(pattern.into());

        let body = body.strip_prefix('@').ok_or_else(bad)?;
        let (attribute, value_part) = body
            .split_once('=')
            .ok_or_else(|| if body.contains(']') { bad() } else { unterminated() })?;
        if !is_ncname(attribute) {
            return Err(bad());
        }
        let quote = match value_part.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(bad()),
            None => return Err(unterminated()),
        };
        let quoted = &value_part[1..];
        let end = quoted.find(quote).ok_or_else(unterminated)?;
        let (value, tail) = (&quoted[..end], &quoted[end + 1..]);
        let tail = match tail.strip_prefix(']') {
            Some(tail) => tail,
            None if tail.is_empty() => return Err(unterminated()),
            None => return Err(bad()),
        };
        Ok((
            Self {
                attribute: attribute.into(),
                value: value.into(),
            },
            tail,
        ))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut steps = Vec::new();
        let mut rest = s;
        loop {
            let (step, tail) = Step::parse(rest, s)?;
            steps.push(step);
            match tail.strip_prefix('/') {
                Some(tail) => rest = tail,
                None => break,
            }
        }
        Ok(Self { steps })
    }
}

fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
