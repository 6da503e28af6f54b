//! Integration tests for the directory store and import sessions on disk.

use std::fs;

use blendmaestro::codec::Codec;
use blendmaestro::mesh::MeshSnapshot;
use blendmaestro::session::ImportSession;
use blendmaestro::shape::{BlendShape, DeltaSet};
use blendmaestro::store::asset::{load_dataset, save_dataset};
use blendmaestro::store::{DirStore, ExistingBackup, MeshStore, MESH_EXTENSION};
use blendmaestro::transfer::{PerShape, Resolution};
use blendmaestro::util::Vec3;
use blendmaestro::Error;

use tempfile::TempDir;

fn mesh(name: &str, shapes: &[(&str, f32)]) -> MeshSnapshot {
    MeshSnapshot {
        name: name.into(),
        vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
        normals: vec![Vec3::Z; 4],
        triangles: vec![0, 1, 2, 1, 3, 2],
        blend_shapes: shapes
            .iter()
            .map(|(s, v)| {
                BlendShape::single(
                    *s,
                    100.0,
                    DeltaSet::new(vec![Vec3::splat(*v); 4], vec![Vec3::ZERO; 4], vec![Vec3::ZERO; 4]),
                )
            })
            .collect(),
        ..Default::default()
    }
}

fn write_mesh_file(dir: &TempDir, handle: &str, mesh: &MeshSnapshot) {
    let path = dir.path().join(format!("{handle}{MESH_EXTENSION}"));
    fs::write(path, serde_json::to_vec(mesh).unwrap()).unwrap();
}

#[test]
fn test_export_asset_then_import_into_other_model() {
    let source_dir = TempDir::new().expect("Failed to create temp dir");
    let target_dir = TempDir::new().expect("Failed to create temp dir");
    write_mesh_file(&source_dir, "Face", &mesh("Face", &[("Smile", 1.0), ("Blink", 2.0)]));
    write_mesh_file(&target_dir, "Face", &mesh("Face", &[("Blink", 9.0), ("Pout", 3.0)]));
    write_mesh_file(&target_dir, "Hair", &mesh("Hair", &[]));

    // Export
    let asset = source_dir.path().join("face.bmasset");
    let codec = Codec::default();
    {
        let session = ImportSession::new(DirStore::open(source_dir.path()).unwrap());
        let dataset = session.export_named("Face", &["Blink", "Smile"]).unwrap();
        save_dataset(&asset, &dataset, &codec).unwrap();
    }

    // Import
    let dataset = load_dataset(&asset, &codec).unwrap();
    let mut asked = Vec::new();
    let mut policy = PerShape(|name: &str| {
        asked.push(name.to_string());
        Resolution::Overwrite
    });
    let mut session = ImportSession::new(DirStore::open(target_dir.path()).unwrap());
    let results = session.import_matching(&dataset, &mut policy).unwrap();
    drop(policy);

    assert_eq!(asked, ["Blink"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "Face");

    let store = session.into_store();
    let face = store.read_mesh("Face").unwrap();
    let names: Vec<&str> = face.blend_shape_names().collect();
    assert_eq!(names, ["Pout", "Blink", "Smile"]);
    assert_eq!(face.blend_shapes[1].frames[0].delta.vertices[0], Vec3::splat(2.0));

    // Original kept next to the mesh
    let backup: MeshSnapshot =
        serde_json::from_slice(&fs::read(target_dir.path().join("Face_origin.mesh.json")).unwrap()).unwrap();
    assert_eq!(backup, mesh("Face", &[("Blink", 9.0), ("Pout", 3.0)]));
    assert_eq!(store.list_meshes().unwrap(), ["Face", "Hair"]);
    assert_eq!(store.meshes_with_blend_shapes().unwrap(), ["Face"]);
}

#[test]
fn test_existing_backup_fail_blocks_import() {
    let dir = TempDir::new().unwrap();
    let original = mesh("Body", &[("A", 1.0)]);
    write_mesh_file(&dir, "Body", &original);
    fs::write(dir.path().join("Body_origin.mesh.json"), b"{}").unwrap();

    let store = DirStore::open(dir.path()).unwrap().with_backup("_origin", ExistingBackup::Fail);
    let mut session = ImportSession::new(store);

    let mut dataset = blendmaestro::BlendShapeDataset::new("Body");
    dataset.push(blendmaestro::shape::DatasetShape::new("B", DeltaSet::zeroed(4)));
    let err = session.import("Body", &dataset, &mut Resolution::Overwrite).unwrap_err();

    assert!(matches!(err, Error::BackupFailed { .. }));
    assert_eq!(session.store().read_mesh("Body").unwrap(), original);
}

#[test]
fn test_corrupt_mesh_file_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(format!("Broken{MESH_EXTENSION}")), b"{ not json").unwrap();
    let store = DirStore::open(dir.path()).unwrap();
    assert!(matches!(store.read_mesh("Broken"), Err(Error::Json(_))));
}

#[test]
fn test_dotted_handle_backup_stays_untouched() {
    let dir = TempDir::new().unwrap();
    let original = mesh("Body.001", &[("A", 1.0)]);
    write_mesh_file(&dir, "Body.001", &original);

    let mut dataset = blendmaestro::BlendShapeDataset::new("Body.001");
    dataset.push(blendmaestro::shape::DatasetShape::new("B", DeltaSet::zeroed(4)));

    let mut session = ImportSession::new(DirStore::open(dir.path()).unwrap());
    let first = session.import_matching(&dataset, &mut Resolution::Overwrite).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(session.store().list_meshes().unwrap(), ["Body.001"]);

    // A fresh session sees only the mesh, never its backup
    let mut session = ImportSession::new(session.into_store());
    let second = session.import_matching(&dataset, &mut Resolution::Overwrite).unwrap();
    let touched: Vec<&str> = second.iter().map(|(h, _)| h.as_str()).collect();
    assert_eq!(touched, ["Body.001"]);

    let backup_file = dir.path().join("Body.001_origin.mesh.json");
    let backup: MeshSnapshot = serde_json::from_slice(&fs::read(backup_file).unwrap()).unwrap();
    assert_eq!(backup, original);

    let mut files: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, ["Body.001.mesh.json", "Body.001_origin.mesh.json"]);
}
