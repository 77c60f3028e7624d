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

use clap::Parser;
use odata_metadata::commands::process_command;
use odata_metadata::commands::Commands;
use odata_metadata::Error;

/// Metadata tool CLI.
#[derive(Parser, Debug)]
#[command(name = "odata-metadata")]
#[command(about = "OData CSDL metadata document inspector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    for msg in process_command(&cli.command)? {
        println!("{msg}");
    }
    Ok(())
}
