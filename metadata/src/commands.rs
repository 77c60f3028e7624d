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

//! Command-line entry points.
//!
//! - `Dump`: print the schema of a metadata document as JSON.
//! - `Summary`: one line per entity type, entity set, action and
//!   function.
//! - `Check`: verify a bindings manifest against the schema.

use crate::bindings::BindingsManifest;
use crate::edm::EntityType;
use crate::edm::Operation;
use crate::edm::Schema;
use crate::Error;
use clap::Subcommand;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;

/// Tool high-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print schema as JSON.
    Dump {
        /// Metadata document (CSDL/EDMX).
        file: PathBuf,
        /// Print JSON on a single line.
        #[arg(long)]
        compact: bool,
    },
    /// Print entity types, entity sets and operations of the schema.
    Summary {
        /// Metadata document (CSDL/EDMX).
        file: PathBuf,
    },
    /// Verify entity bindings manifest against the schema.
    Check {
        /// Metadata document (CSDL/EDMX).
        file: PathBuf,
        /// Bindings manifest (TOML).
        #[arg(short, long)]
        bindings: PathBuf,
    },
}

/// Process a command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Dump { file, compact } => {
            let schema = read_schema(file)?;
            let json = if *compact {
                serde_json::to_string(&schema)
            } else {
                serde_json::to_string_pretty(&schema)
            }
            .map_err(Error::Json)?;
            Ok(vec![json])
        }
        Commands::Summary { file } => {
            let schema = read_schema(file)?;
            Ok(summary(&schema))
        }
        Commands::Check { file, bindings } => {
            let schema = read_schema(file)?;
            log::info!("reading bindings manifest {}", bindings.display());
            let manifest = BindingsManifest::read(bindings)
                .map_err(|e| Error::Bindings(bindings.display().to_string(), e))?;
            let errors = manifest.verify(&schema);
            if errors.is_empty() {
                Ok(vec![format!(
                    "{} bindings match the schema",
                    manifest.entities.len()
                )])
            } else {
                Err(Error::Unbound(
                    errors.iter().map(ToString::to_string).collect(),
                ))
            }
        }
    }
}

fn read_schema(fname: &Path) -> Result<Schema, Error> {
    let name = fname.display().to_string();
    log::info!("reading metadata document {name}");
    let mut file = File::open(fname).map_err(|err| Error::Io(name.clone(), err))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|err| Error::Io(name.clone(), err))?;
    let schema = Schema::parse(&content).map_err(|e| Error::Edm(name, e))?;
    log::debug!(
        "schema {}: {} entity types, {} entity sets, {} actions, {} functions",
        schema.namespace.as_deref().unwrap_or("<unnamed>"),
        schema.entity_types.len(),
        schema.entity_container.entity_sets.len(),
        schema.actions.len(),
        schema.functions.len(),
    );
    Ok(schema)
}

/// Human readable summary of the schema.
#[must_use]
pub fn summary(schema: &Schema) -> Vec<String> {
    schema
        .entity_types
        .iter()
        .map(entity_type_line)
        .chain(
            schema
                .entity_container
                .entity_sets
                .iter()
                .map(|s| format!("entity-set {}: {}", s.name, s.entity_type)),
        )
        .chain(schema.actions.iter().map(|a| operation_line("action", a)))
        .chain(schema.functions.iter().map(|f| operation_line("function", f)))
        .collect()
}

fn entity_type_line(t: &EntityType) -> String {
    let mut line = format!("entity-type {}", t.name);
    if let Some(base) = &t.base_type {
        line += &format!(": {base}");
    }
    if let Some(key) = &t.key {
        let names: Vec<_> = key.property_refs.iter().map(|r| r.name.as_str()).collect();
        line += &format!(" key({})", names.join(", "));
    }
    if t.open_type {
        line += " open";
    }
    line
}

fn operation_line<K>(kind: &str, op: &Operation<K>) -> String {
    let params: Vec<_> = op
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ptype))
        .collect();
    let mut line = format!("{kind} {}({})", op.name, params.join(", "));
    if let Some(rt) = &op.return_type {
        line += &format!(" -> {}", rt.rtype);
    }
    if op.is_bound {
        line += " bound";
    }
    line
}

#[cfg(test)]
mod test {
    use super::summary;
    use crate::edm::Schema;

    #[test]
    fn test_summary() {
        let schema = Schema::parse(
            r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
                 <edmx:DataServices>
                   <Schema Namespace="Sample">
                     <EntityType Name="Person" OpenType="false">
                       <Key><PropertyRef Name="id"/></Key>
                       <Property Name="id" Type="Edm.Int32" Nullable="false"/>
                     </EntityType>
                     <EntityType Name="Employee" BaseType="Sample.Person"/>
                     <Action Name="Promote">
                       <Parameter Name="it" Type="Sample.Employee"/>
                     </Action>
                     <Function Name="Count" IsBound="false">
                       <ReturnType Type="Edm.Int64"/>
                     </Function>
                     <EntityContainer>
                       <EntitySet Name="People" EntityType="Sample.Person"/>
                     </EntityContainer>
                   </Schema>
                 </edmx:DataServices>
               </edmx:Edmx>"#,
        )
        .unwrap();
        assert_eq!(
            summary(&schema),
            vec![
                "entity-type Person key(id)",
                "entity-type Employee: Sample.Person open",
                "entity-set People: Sample.Person",
                "action Promote(it: Sample.Employee) bound",
                "function Count() -> Edm.Int64",
            ]
        );
    }
}
