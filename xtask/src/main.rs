// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Project maintenance tasks for the Hearth asset pipeline.
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask", version, about = "Hearth project maintenance tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect and edit a project's asset registry.
    Assets {
        /// Path to the project's .hproj file.
        #[arg(short, long, default_value = "Project.hproj")]
        project: PathBuf,

        #[command(subcommand)]
        action: commands::assets::AssetsAction,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Assets { project, action } => commands::assets::run(&project, action),
    };

    if let Err(e) = result {
        helpers::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
