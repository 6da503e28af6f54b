//! Command implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use blendmaestro::codec;
use blendmaestro::session::ImportSession;
use blendmaestro::settings::{CollisionMode, Settings};
use blendmaestro::store::asset::{load_dataset, save_dataset};
use blendmaestro::store::{DirStore, MeshStore};
use blendmaestro::transfer::{CollisionPolicy, MergeOutcome, PerShape, Resolution};

const DISPLACEMENT_EPSILON: f32 = 1e-6;

fn open_store(settings: &Settings, dir: &Path) -> Result<DirStore> {
    let store = DirStore::open(dir)
        .with_context(|| format!("cannot open mesh directory {}", dir.display()))?
        .with_backup(settings.backup_suffix.clone(), settings.existing_backup);
    Ok(store)
}

pub fn cmd_list(settings: &Settings, dir: &Path, all: bool) -> Result<()> {
    let store = open_store(settings, dir)?;
    let handles = store.list_meshes()?;
    let mut shown = 0;

    for handle in handles {
        let mesh = store.read_mesh(&handle).with_context(|| format!("cannot read mesh '{handle}'"))?;
        if !all && !mesh.has_blend_shapes() {
            continue;
        }
        shown += 1;
        println!(
            "{handle}  ({} vertices, {} triangles, {} blend shapes)",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.blend_shape_count()
        );
        for (i, shape) in mesh.blend_shapes.iter().enumerate() {
            let frames = if shape.is_progressive() {
                format!("  [{} frames]", shape.frame_count())
            } else {
                String::new()
            };
            println!("  {i:>3}  {}{frames}", shape.name);
        }
    }

    if shown == 0 {
        println!("No meshes with blend shapes found");
    }
    Ok(())
}

pub fn cmd_export(
    settings: &Settings,
    dir: &Path,
    mesh: &str,
    indices: &[usize],
    names: &[String],
    output: &Path,
) -> Result<()> {
    let session = ImportSession::new(open_store(settings, dir)?);
    let dataset = if names.is_empty() {
        session.export(mesh, indices)?
    } else {
        session.export_named(mesh, names)?
    };

    save_dataset(output, &dataset, &settings.codec())
        .with_context(|| format!("cannot write {}", output.display()))?;
    println!(
        "Exported {} blend shape(s) from '{}' to {}",
        dataset.len(),
        dataset.mesh_name,
        output.display()
    );
    Ok(())
}

fn ask_overwrite(name: &str) -> Resolution {
    print!("Blend shape '{name}' already exists. Overwrite? [y/N] ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) if matches!(line.trim(), "y" | "Y" | "yes") => Resolution::Overwrite,
        _ => Resolution::Skip,
    }
}

fn print_outcome(handle: &str, outcome: &MergeOutcome) {
    println!(
        "{handle}: {} added, {} overwritten, {} skipped",
        outcome.added.len(),
        outcome.overwritten.len(),
        outcome.skipped.len()
    );
}

pub fn cmd_import(
    settings: &Settings,
    dir: &Path,
    asset: &Path,
    mesh: Option<&str>,
    mode: CollisionMode,
    backup: bool,
) -> Result<()> {
    let dataset = load_dataset(asset, &settings.codec())
        .with_context(|| format!("cannot load dataset {}", asset.display()))?;
    let mut session = ImportSession::new(open_store(settings, dir)?).with_backup(backup && settings.backup);

    let mut bulk;
    let mut prompt;
    let policy: &mut dyn CollisionPolicy = match mode.resolution() {
        Some(r) => {
            bulk = r;
            &mut bulk
        }
        None => {
            prompt = PerShape(ask_overwrite);
            &mut prompt
        }
    };

    match mesh {
        Some(handle) => {
            let outcome = session.import(handle, &dataset, policy)?;
            print_outcome(handle, &outcome);
        }
        None => {
            for (handle, outcome) in session.import_matching(&dataset, policy)? {
                print_outcome(&handle, &outcome);
            }
        }
    }
    Ok(())
}

pub fn cmd_inspect(settings: &Settings, asset: &Path) -> Result<()> {
    let bytes = std::fs::read(asset).with_context(|| format!("cannot read {}", asset.display()))?;
    let dataset = settings.codec().decode(&bytes)?;

    println!("Asset:  {}", asset.display());
    println!("Size:   {} bytes", bytes.len());
    println!("Mesh:   {}", dataset.mesh_name);
    println!("Shapes: {}", dataset.len());
    for shape in &dataset.shapes {
        println!(
            "  {:<24} weight {:>5.1}  {} vertices, {} moved, max offset {:.4}",
            shape.name,
            shape.weight,
            shape.delta.len(),
            shape.delta.affected_vertices(DISPLACEMENT_EPSILON),
            shape.delta.max_displacement()
        );
    }
    Ok(())
}

pub fn cmd_remove(settings: &Settings, dir: &Path, mesh: &str, shape: &str) -> Result<()> {
    let mut session = ImportSession::new(open_store(settings, dir)?).with_backup(settings.backup);
    let rebuilt = session.remove_shape(mesh, shape)?;
    println!("Removed '{shape}' from '{mesh}' ({} blend shapes left)", rebuilt.blend_shape_count());
    Ok(())
}

pub fn cmd_to_json(settings: &Settings, asset: &Path, output: &Path, pretty: bool) -> Result<()> {
    let dataset = load_dataset(asset, &settings.codec())
        .with_context(|| format!("cannot load dataset {}", asset.display()))?;
    let json = codec::to_json(&dataset, pretty)?;
    std::fs::write(output, json).with_context(|| format!("cannot write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

pub fn cmd_from_json(settings: &Settings, input: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input).with_context(|| format!("cannot read {}", input.display()))?;
    let dataset = codec::from_json(&text)?;
    if dataset.is_empty() {
        bail!("{} contains no blend shapes", input.display());
    }
    save_dataset(output, &dataset, &settings.codec())
        .with_context(|| format!("cannot write {}", output.display()))?;
    println!("Wrote {} ({} blend shapes)", output.display(), dataset.len());
    Ok(())
}
