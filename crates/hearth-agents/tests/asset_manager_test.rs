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

use anyhow::Result;
use hearth_agents::{AssetManagerConfig, EditorAssetManager, RuntimeAssetManager};
use hearth_core::asset::{Asset, AssetHandle, AssetManagerBase, AssetMetadata, AssetType};
use hearth_core::Timestep;
use hearth_data::assets::{Font, Scene, Texture2D};
use hearth_io::importer::SceneImporter;
use hearth_io::{AssetRegistry, Project};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::{tempdir, TempDir};

// --- Fixtures ---

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_project() -> Result<(TempDir, Project)> {
    init_logging();
    let dir = tempdir()?;
    let project = Project::create(dir.path(), "Sandbox")?;
    Ok((dir, project))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn write_png(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255])).save(path)?;
    Ok(())
}

fn write_wav(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for _ in 0..2_205 {
        writer.write_sample(0i16)?;
    }
    writer.finalize()?;
    Ok(())
}

fn write_scene(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    SceneImporter::save(&Scene::new(AssetHandle::INVALID, "Level"), path)?;
    Ok(())
}

/// A TrueType file with `head` (1000 units/em), `hhea` and `maxp` (12 glyphs).
fn write_font(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());
    let hhea = vec![0u8; 36];
    let mut maxp = 0x0000_5000u32.to_be_bytes().to_vec();
    maxp.extend_from_slice(&12u16.to_be_bytes());

    let tables = [(b"head", head), (b"hhea", hhea), (b"maxp", maxp)];
    let mut bytes = 0x0001_0000u32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&[0; 6]);
    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        bytes.extend_from_slice(*tag);
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(&(offset as u32).to_be_bytes());
        bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += data.len();
    }
    for (_, data) in tables {
        bytes.extend_from_slice(&data);
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn triples(registry: &AssetRegistry) -> BTreeSet<(AssetHandle, String, AssetType)> {
    registry
        .iter()
        .map(|(h, m)| (h, m.filepath_string(), m.asset_type))
        .collect()
}

// --- Identity and caching ---

#[test]
fn test_import_mints_fresh_registered_handle() -> Result<()> {
    let (_dir, project) = new_project()?;
    let png = project.asset_file_system_path(Path::new("textures/wall.png"));
    write_png(&png)?;

    let mut manager = EditorAssetManager::open(&project)?;
    let handle = manager.import_asset(&png);

    assert!(handle.is_valid());
    assert!(manager.is_asset_handle_valid(handle));
    assert!(manager.is_asset_loaded(handle));
    assert_eq!(manager.get_asset_type(handle), AssetType::Texture);
    assert_eq!(manager.filepath(handle), Path::new("textures/wall.png"));
    assert_eq!(
        manager.metadata(handle).map(|m| m.filepath_string()),
        Some("textures/wall.png".to_string())
    );

    let other = manager.import_asset("textures/wall.png");
    assert!(other.is_valid());
    assert_ne!(other, handle);
    Ok(())
}

#[test]
fn test_validity_reflects_registry_membership() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    let mut manager = EditorAssetManager::open(&project)?;

    let handle = manager.import_asset("a.png");
    assert!(manager.is_asset_handle_valid(handle));
    assert!(!manager.is_asset_handle_valid(AssetHandle::INVALID));
    assert!(!manager.is_asset_handle_valid(AssetHandle::from_raw(handle.raw() ^ 1)));

    // Eviction does not affect validity.
    assert!(manager.remove_loaded_asset(handle));
    assert!(!manager.is_asset_loaded(handle));
    assert!(manager.is_asset_handle_valid(handle));
    Ok(())
}

#[test]
fn test_cached_instance_is_shared() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    let mut manager = EditorAssetManager::open(&project)?;
    let handle = manager.import_asset("a.png");

    let first = manager.get_asset(handle).unwrap();
    let second = manager.get_asset(handle).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let texture = manager.get_asset_as::<Texture2D>(handle).unwrap();
    assert_eq!((texture.width, texture.height), (2, 2));
    assert_eq!(texture.handle(), handle);

    manager.remove_loaded_asset(handle);
    let third = manager.get_asset(handle).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    Ok(())
}

#[test]
fn test_scene_is_reimported_every_time() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_scene(&project.asset_file_system_path(Path::new("level.org")))?;
    let mut manager = EditorAssetManager::open(&project)?;
    let handle = manager.import_asset("level.org");
    assert_eq!(manager.get_asset_type(handle), AssetType::Scene);

    let first = manager.get_asset(handle).unwrap();
    let second = manager.get_asset(handle).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(manager.get_asset_as::<Scene>(handle).is_some());
    Ok(())
}

#[test]
fn test_invalid_handle_degrades_to_empty() -> Result<()> {
    let (_dir, project) = new_project()?;
    let mut manager = EditorAssetManager::open(&project)?;
    let ghost = AssetHandle::from_raw(1234);

    assert!(manager.get_asset(ghost).is_none());
    assert!(manager.metadata(ghost).is_none());
    assert_eq!(manager.filepath(ghost), Path::new(""));
    assert_eq!(manager.get_asset_type(ghost), AssetType::None);
    assert!(!manager.remove_asset(ghost));
    Ok(())
}

// --- Failure paths ---

#[test]
fn test_unknown_extension_fails_closed() -> Result<()> {
    let (_dir, project) = new_project()?;
    let notes = project.asset_file_system_path(Path::new("file.unknownext"));
    std::fs::write(&notes, "hello")?;
    let mut manager = EditorAssetManager::open(&project)?;
    let before = std::fs::read_to_string(project.asset_registry_path())?;

    assert_eq!(manager.import_asset(&notes), AssetHandle::INVALID);
    assert!(manager.registry().is_empty());
    assert_eq!(std::fs::read_to_string(project.asset_registry_path())?, before);
    Ok(())
}

#[test]
fn test_failed_decode_registers_nothing() -> Result<()> {
    let (_dir, project) = new_project()?;
    std::fs::write(
        project.asset_file_system_path(Path::new("corrupt.png")),
        b"not an image",
    )?;
    let mut manager = EditorAssetManager::open(&project)?;

    assert!(manager.try_import_asset("corrupt.png").is_err());
    assert_eq!(manager.import_asset("missing.wav"), AssetHandle::INVALID);
    assert!(manager.registry().is_empty());
    assert!(manager.loaded_assets().is_empty());
    Ok(())
}

#[test]
fn test_malformed_registry_refuses_to_open() -> Result<()> {
    let (_dir, project) = new_project()?;
    std::fs::write(
        project.asset_registry_path(),
        r#"(AssetRegistry: [(Handle: 0, Filepath: "a.png", Type: "AssetType::Texture")])"#,
    )?;
    assert!(EditorAssetManager::open(&project).is_err());
    assert!(RuntimeAssetManager::open(&project).is_err());
    Ok(())
}

// --- Removal and persistence ---

#[test]
fn test_remove_clears_both_tiers_and_persists() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    write_wav(&project.asset_file_system_path(Path::new("b.wav")))?;
    let mut manager = EditorAssetManager::open(&project)?;
    let texture = manager.import_asset("a.png");
    let sound = manager.import_asset("b.wav");

    assert!(manager.remove_asset(texture));
    assert!(!manager.is_asset_handle_valid(texture));
    assert!(!manager.is_asset_loaded(texture));
    assert!(manager.is_asset_handle_valid(sound));

    let on_disk = AssetRegistry::load(&project.asset_registry_path())?;
    assert!(!on_disk.contains(texture));
    assert!(on_disk.contains(sound));
    Ok(())
}

#[test]
fn test_registry_survives_reopen() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("textures/a.png")))?;
    write_wav(&project.asset_file_system_path(Path::new("audio/b.wav")))?;
    write_scene(&project.asset_file_system_path(Path::new("c.org")))?;

    let expected = {
        let mut manager = EditorAssetManager::open(&project)?;
        for path in ["textures/a.png", "audio/b.wav", "c.org"] {
            assert!(manager.import_asset(path).is_valid());
        }
        triples(manager.registry())
    };

    let reopened = EditorAssetManager::open(&project)?;
    assert_eq!(triples(reopened.registry()), expected);
    assert!(reopened.loaded_assets().is_empty());
    Ok(())
}

#[test]
fn test_explicit_commit_when_auto_commit_is_off() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    let config = AssetManagerConfig::default().with_auto_commit(false);
    let mut manager = EditorAssetManager::open_with_config(&project, config)?;

    let handle = manager.import_asset("a.png");
    assert!(manager.is_dirty());
    assert!(AssetRegistry::load(&project.asset_registry_path())?.is_empty());

    manager.commit()?;
    assert!(!manager.is_dirty());
    assert!(AssetRegistry::load(&project.asset_registry_path())?.contains(handle));
    Ok(())
}

// --- Lazy loaders and directory scans ---

#[test]
fn test_inserted_loader_runs_lazily_once() -> Result<()> {
    let (_dir, project) = new_project()?;
    let mut manager = EditorAssetManager::open(&project)?;
    let handle = AssetHandle::generate();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let inserted = manager.insert_asset(
        handle,
        AssetMetadata::new("generated/white.png", AssetType::Texture),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Arc::new(Texture2D::white(handle)) as Arc<dyn Asset>)
        }),
    );
    assert!(inserted);
    assert!(manager.is_asset_handle_valid(handle));
    assert!(!manager.is_asset_loaded(handle));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let first = manager.get_asset(handle).unwrap();
    let second = manager.get_asset(handle).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(!manager.insert_asset(
        AssetHandle::INVALID,
        AssetMetadata::new("x.png", AssetType::Texture),
        Box::new(|| None),
    ));
    Ok(())
}

#[test]
fn test_import_directory_picks_up_new_files_only() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("textures/a.png")))?;
    write_wav(&project.asset_file_system_path(Path::new("sfx/b.wav")))?;
    std::fs::write(project.asset_file_system_path(Path::new("README.txt")), "docs")?;
    let mut manager = EditorAssetManager::open(&project)?;
    let existing = manager.import_asset("textures/a.png");

    let imported = manager.import_directory();
    assert_eq!(imported.len(), 1);
    assert_eq!(manager.filepath(imported[0]), Path::new("sfx/b.wav"));
    assert_ne!(imported[0], existing);
    assert_eq!(manager.registry().len(), 2);
    assert!(manager.import_directory().is_empty());
    assert_eq!(AssetRegistry::load(&project.asset_registry_path())?.len(), 2);
    Ok(())
}

// --- Background fonts ---

#[test]
fn test_font_finalizes_on_update() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_font(&project.asset_file_system_path(Path::new("fonts/mono.ttf")))?;
    let mut manager = EditorAssetManager::open(&project)?;

    let handle = manager.import_asset("fonts/mono.ttf");
    assert!(handle.is_valid());
    let font = manager.get_asset_as::<Font>(handle).unwrap();
    assert!(!font.is_ready());
    assert_eq!(manager.pending_tasks(), 1);

    let deadline = Instant::now() + Duration::from_secs(5);
    while manager.pending_tasks() > 0 && Instant::now() < deadline {
        manager.update(Timestep::from_seconds(1.0 / 60.0));
        std::thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(manager.pending_tasks(), 0);
    assert!(font.is_ready());
    assert_eq!(font.face().map(|f| f.units_per_em), Some(1000));
    Ok(())
}

#[test]
fn test_corrupt_font_is_not_registered() -> Result<()> {
    let (_dir, project) = new_project()?;
    let bad = project.asset_file_system_path(Path::new("fonts/bad.ttf"));
    ensure_parent(&bad)?;
    std::fs::write(&bad, b"not a font")?;
    let mut manager = EditorAssetManager::open(&project)?;

    let handle = manager.import_asset("fonts/bad.ttf");
    assert_eq!(handle, AssetHandle::INVALID);
    assert_eq!(manager.pending_tasks(), 0);
    assert!(manager.registry().is_empty());
    assert!(AssetRegistry::load(&project.asset_registry_path())?.is_empty());
    Ok(())
}

// --- Paths ---

#[test]
fn test_file_outside_asset_directory_is_refused() -> Result<()> {
    let (_dir, project) = new_project()?;
    let elsewhere = tempdir()?;
    let stray = elsewhere.path().join("x.png");
    write_png(&stray)?;
    let mut manager = EditorAssetManager::open(&project)?;

    assert_eq!(manager.import_asset(&stray), AssetHandle::INVALID);
    assert_eq!(manager.import_asset("../x.png"), AssetHandle::INVALID);
    assert!(manager.registry().is_empty());
    assert!(AssetRegistry::load(&project.asset_registry_path())?.is_empty());
    Ok(())
}

#[test]
fn test_absolute_path_inside_asset_directory_is_stored_relative() -> Result<()> {
    let (_dir, project) = new_project()?;
    let png = project.asset_file_system_path(Path::new("ui/icon.png"));
    write_png(&png)?;
    let mut manager = EditorAssetManager::open(&project)?;

    let handle = manager.import_asset(&png);
    assert!(handle.is_valid());
    let stored = AssetRegistry::load(&project.asset_registry_path())?;
    assert_eq!(
        stored.get(handle).map(|m| m.filepath_string()),
        Some("ui/icon.png".to_string())
    );
    Ok(())
}

// --- Scenes ---

#[test]
fn test_open_scene_reuses_registered_handle() -> Result<()> {
    let (_dir, project) = new_project()?;
    let level = project.asset_file_system_path(Path::new("levels/one.org"));
    write_scene(&level)?;
    let mut manager = EditorAssetManager::open(&project)?;

    let imported = manager.import_asset("levels/one.org");
    assert!(imported.is_valid());
    assert_eq!(manager.open_scene("levels/one.org"), imported);
    assert_eq!(manager.open_scene(&level), imported);
    assert_eq!(manager.registry().len(), 1);
    Ok(())
}

#[test]
fn test_open_scene_imports_unregistered_scene() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_scene(&project.asset_file_system_path(Path::new("levels/two.org")))?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    let mut manager = EditorAssetManager::open(&project)?;

    let handle = manager.open_scene("levels/two.org");
    assert!(handle.is_valid());
    assert_eq!(manager.get_asset_type(handle), AssetType::Scene);
    assert_eq!(manager.open_scene("levels/two.org"), handle);

    assert_eq!(manager.open_scene("a.png"), AssetHandle::INVALID);
    assert_eq!(manager.open_scene("levels/missing.org"), AssetHandle::INVALID);
    assert_eq!(manager.registry().len(), 1);
    Ok(())
}

// --- Contract polymorphism ---

fn resolve_through_contract(manager: &mut dyn AssetManagerBase, handle: AssetHandle) -> bool {
    manager.is_asset_handle_valid(handle) && manager.get_asset(handle).is_some()
}

#[test]
fn test_runtime_manager_serves_committed_registry() -> Result<()> {
    let (_dir, project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    write_scene(&project.asset_file_system_path(Path::new("start.org")))?;
    let (texture, scene) = {
        let mut editor = EditorAssetManager::open(&project)?;
        let texture = editor.import_asset("a.png");
        let scene = editor.import_asset("start.org");
        assert!(resolve_through_contract(&mut editor, texture));
        (texture, scene)
    };

    let mut runtime = RuntimeAssetManager::open(&project)?;
    assert!(!runtime.is_asset_loaded(texture));
    assert!(resolve_through_contract(&mut runtime, texture));
    assert!(runtime.is_asset_loaded(texture));
    assert_eq!(runtime.get_asset_type(scene), AssetType::Scene);

    let first = runtime.get_asset(scene).unwrap();
    let second = runtime.get_asset(scene).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn test_start_scene_must_be_a_registered_scene() -> Result<()> {
    let (_dir, mut project) = new_project()?;
    write_png(&project.asset_file_system_path(Path::new("a.png")))?;
    write_scene(&project.asset_file_system_path(Path::new("start.org")))?;
    let mut manager = EditorAssetManager::open(&project)?;
    let texture = manager.import_asset("a.png");
    let scene = manager.import_asset("start.org");

    assert!(!project.set_start_scene(texture, &manager));
    assert!(!project.set_start_scene(AssetHandle::from_raw(5), &manager));
    assert!(project.set_start_scene(scene, &manager));
    project.save()?;

    let reloaded = Project::load(project.project_file())?;
    assert_eq!(reloaded.config().start_scene, scene);
    Ok(())
}
