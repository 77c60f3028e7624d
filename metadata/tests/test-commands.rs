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


use odata_metadata::commands::process_command;
use odata_metadata::commands::Commands;
use odata_metadata::Error;
use std::path::Path;
use std::path::PathBuf;

fn test_data(fname: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(fname)
}

#[test]
fn test_summary_command() {
    let out = process_command(&Commands::Summary {
        file: test_data("people-service.xml"),
    })
    .unwrap();
    assert_eq!(out[0], "entity-type Thing key(id) open");
    assert_eq!(out[1], "entity-type Person: People.Thing");
    assert!(out.contains(&"entity-set People: People.Person".to_string()));
    assert!(out.contains(&"action Reset()".to_string()));
    assert!(out.contains(&"function Version() -> Edm.String".to_string()));
}

#[test]
fn test_dump_command() {
    let out = process_command(&Commands::Dump {
        file: test_data("people-service.xml"),
        compact: true,
    })
    .unwrap();
    assert_eq!(out.len(), 1);
    assert!(!out[0].contains('\n'));
    let json: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
    assert_eq!(json["EntityType"].as_array().unwrap().len(), 4);
}

#[test]
fn test_check_command() {
    let out = process_command(&Commands::Check {
        file: test_data("people-service.xml"),
        bindings: test_data("people-bindings.toml"),
    })
    .unwrap();
    assert_eq!(out, vec!["3 bindings match the schema"]);

    let err = process_command(&Commands::Check {
        file: test_data("people-service.xml"),
        bindings: test_data("broken-bindings.toml"),
    })
    .unwrap_err();
    match err {
        Error::Unbound(lines) => assert_eq!(
            lines,
            vec![
                "entity set Users contains People.User instead of Person",
                "unknown entity type: Invoice",
            ]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let err = process_command(&Commands::Summary {
        file: test_data("no-such-file.xml"),
    })
    .unwrap_err();
    assert!(matches!(err, Error::Io(..)));
}
