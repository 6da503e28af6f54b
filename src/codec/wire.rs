//! JSON text form of a [`BlendShapeDataset`].
//!
//! ```text
//! {"meshName":"Body","blendShapes":[{"name":"Smile",
//!   "deltaVertices":[x,y,z,...],"deltaNormals":[...],"deltaTangents":[...]}]}
//! ```
//!
//! Shapes with a weight other than 100 carry an extra `"weight"` field.
//! Vector arrays are written as flat float lists; reading also accepts the
//! older `[{"x":..,"y":..,"z":..}]` object form.

use serde::{Deserialize, Serialize};

use crate::shape::{BlendShapeDataset, DatasetShape, DeltaSet};
use crate::util::{flatten_vec3, unflatten_vec3, Error, Result, Vec3, FULL_WEIGHT};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetOut<'a> {
    mesh_name: &'a str,
    blend_shapes: Vec<ShapeOut<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShapeOut<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f32>,
    delta_vertices: &'a [f32],
    delta_normals: &'a [f32],
    delta_tangents: &'a [f32],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetIn {
    mesh_name: String,
    blend_shapes: Vec<ShapeIn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeIn {
    name: String,
    #[serde(default)]
    weight: Option<f32>,
    delta_vertices: VectorsIn,
    delta_normals: VectorsIn,
    delta_tangents: VectorsIn,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VectorsIn {
    Flat(Vec<f32>),
    Objects(Vec<XyzIn>),
}

#[derive(Deserialize)]
struct XyzIn {
    x: f32,
    y: f32,
    z: f32,
}

impl VectorsIn {
    fn into_vec3(self, shape: &str, field: &str) -> Result<Vec<Vec3>> {
        match self {
            Self::Flat(floats) => unflatten_vec3(&floats).ok_or_else(|| {
                Error::corrupt(format!(
                    "shape '{shape}': {field} has {} floats, not a multiple of 3",
                    floats.len()
                ))
            }),
            Self::Objects(items) => Ok(items.into_iter().map(|v| Vec3::new(v.x, v.y, v.z)).collect()),
        }
    }
}

/// Serialize a dataset to JSON text.
pub fn to_json(dataset: &BlendShapeDataset, pretty: bool) -> Result<String> {
    dataset.check().map_err(Error::InvalidDataset)?;

    let out = DatasetOut {
        mesh_name: &dataset.mesh_name,
        blend_shapes: dataset
            .shapes
            .iter()
            .map(|s| ShapeOut {
                name: &s.name,
                weight: (s.weight != FULL_WEIGHT).then_some(s.weight),
                delta_vertices: flatten_vec3(&s.delta.vertices),
                delta_normals: flatten_vec3(&s.delta.normals),
                delta_tangents: flatten_vec3(&s.delta.tangents),
            })
            .collect(),
    };

    let text = if pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    Ok(text)
}

/// Parse a dataset from JSON text.
///
/// Any parse or integrity failure is a [`Error::CorruptPayload`].
pub fn from_json(text: &str) -> Result<BlendShapeDataset> {
    let parsed: DatasetIn =
        serde_json::from_str(text).map_err(|e| Error::corrupt(format!("invalid dataset JSON: {e}")))?;

    let mut dataset = BlendShapeDataset::new(parsed.mesh_name);
    for shape in parsed.blend_shapes {
        let delta = DeltaSet::new(
            shape.delta_vertices.into_vec3(&shape.name, "deltaVertices")?,
            shape.delta_normals.into_vec3(&shape.name, "deltaNormals")?,
            shape.delta_tangents.into_vec3(&shape.name, "deltaTangents")?,
        );
        let weight = shape.weight.unwrap_or(FULL_WEIGHT);
        dataset.push(DatasetShape::with_weight(shape.name, weight, delta));
    }

    dataset.check().map_err(Error::CorruptPayload)?;
    Ok(dataset)
}
