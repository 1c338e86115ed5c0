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

use crate::helpers::*;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use hearth_agents::EditorAssetManager;
use hearth_core::asset::{AssetHandle, AssetManagerBase};
use hearth_core::Timestep;
use hearth_io::Project;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long `verify` waits for background imports to drain.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Subcommand)]
pub enum AssetsAction {
    /// List every registered asset.
    List,
    /// Import files into the registry.
    Import {
        /// Files, absolute or relative to the asset directory.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove assets from the registry.
    Remove {
        /// Handles to remove.
        #[arg(required = true)]
        handles: Vec<u64>,
    },
    /// Import every unregistered file under the asset directory.
    Scan,
    /// Check that every registered asset still imports.
    Verify,
}

pub fn run(project_file: &Path, action: AssetsAction) -> Result<()> {
    let project = Project::load(project_file)
        .with_context(|| format!("Failed to load project '{}'", project_file.display()))?;
    let mut manager = EditorAssetManager::open(&project).with_context(|| {
        format!(
            "Failed to open asset registry '{}'",
            project.asset_registry_path().display()
        )
    })?;

    match action {
        AssetsAction::List => list(&manager),
        AssetsAction::Import { paths } => import(&mut manager, &paths),
        AssetsAction::Remove { handles } => remove(&mut manager, &handles),
        AssetsAction::Scan => scan(&mut manager),
        AssetsAction::Verify => verify(&mut manager),
    }
}

fn list(manager: &EditorAssetManager) -> Result<()> {
    print_task_start("Asset Registry", CLIPBOARD, CYAN);
    for (handle, metadata) in manager.registry().iter() {
        println!(
            "{}{:>20}{}  {:<24} {}",
            BOLD,
            handle.raw(),
            RESET,
            metadata.asset_type.as_tag(),
            metadata.filepath_string()
        );
    }
    print_success(&format!("{} assets registered.", manager.registry().len()));
    Ok(())
}

fn import(manager: &mut EditorAssetManager, paths: &[PathBuf]) -> Result<()> {
    print_task_start("Importing Assets", PACKAGE, MAGENTA);
    let mut failures = 0usize;
    for path in paths {
        match manager.try_import_asset(path) {
            Ok(handle) => print_success(&format!("{} -> {}", path.display(), handle)),
            Err(e) => {
                failures += 1;
                print_error(&format!("{}: {:#}", path.display(), anyhow::Error::new(e)));
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} imports failed", paths.len());
    }
    Ok(())
}

fn remove(manager: &mut EditorAssetManager, handles: &[u64]) -> Result<()> {
    print_task_start("Removing Assets", BROOM, YELLOW);
    for &raw in handles {
        let handle = AssetHandle::from_raw(raw);
        if manager.remove_asset(handle) {
            print_success(&format!("Removed {handle}"));
        } else {
            print_warning(&format!("{handle} is not registered"));
        }
    }
    Ok(())
}

fn scan(manager: &mut EditorAssetManager) -> Result<()> {
    print_task_start("Scanning Asset Directory", MAGNIFIER, BLUE);
    let imported = manager.import_directory();
    for handle in &imported {
        println!("  {} {}", handle, manager.filepath(*handle).display());
    }
    print_success(&format!("{} new assets imported.", imported.len()));
    Ok(())
}

fn verify(manager: &mut EditorAssetManager) -> Result<()> {
    print_task_start("Verifying Assets", MAGNIFIER, GREEN);
    let handles: Vec<AssetHandle> = manager.registry().iter().map(|(h, _)| h).collect();

    let mut broken = Vec::new();
    for handle in handles {
        if manager.get_asset(handle).is_none() {
            broken.push(handle);
        }
    }

    let deadline = Instant::now() + VERIFY_TIMEOUT;
    while manager.pending_tasks() > 0 && Instant::now() < deadline {
        manager.update(Timestep::from_seconds(1.0 / 60.0));
        std::thread::sleep(Duration::from_millis(5));
    }
    if manager.pending_tasks() > 0 {
        print_warning(&format!(
            "{} background imports still running after {:?}",
            manager.pending_tasks(),
            VERIFY_TIMEOUT
        ));
    }

    for handle in &broken {
        print_error(&format!(
            "{} '{}' failed to import",
            handle,
            manager.filepath(*handle).display()
        ));
    }
    if !broken.is_empty() {
        bail!("{} of {} assets are broken", broken.len(), manager.registry().len());
    }
    print_success(&format!("All {} assets import cleanly.", manager.registry().len()));
    Ok(())
}
