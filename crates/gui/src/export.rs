//! Binary glTF export of the wall mesh

use crate::build::WallMesh;
use crate::viewport::mesh::MESH_STRIDE;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
const GLB_VERSION: u32 = 2;
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Byte range of one attribute inside the BIN chunk
struct View {
    offset: usize,
    length: usize,
    target: u32,
}

/// Build a GLB file holding the wall mesh as a single node.
///
/// Returns `None` for an empty mesh.
pub fn build_glb(walls: &WallMesh) -> Option<Vec<u8>> {
    let mesh = &walls.geometry;
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 || mesh.indices.is_empty() {
        return None;
    }

    // Split interleaved [pos, normal, color] into separate attribute streams
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut normals = Vec::with_capacity(vertex_count * 3);
    let mut pos_min = [f32::MAX; 3];
    let mut pos_max = [f32::MIN; 3];
    for v in mesh.vertices.chunks_exact(MESH_STRIDE) {
        positions.extend_from_slice(&v[0..3]);
        normals.extend_from_slice(&v[3..6]);
        for axis in 0..3 {
            pos_min[axis] = pos_min[axis].min(v[axis]);
            pos_max[axis] = pos_max[axis].max(v[axis]);
        }
    }

    let mut bin = Vec::new();
    let views = [
        push_view(&mut bin, &floats_to_bytes(&positions), ARRAY_BUFFER),
        push_view(&mut bin, &floats_to_bytes(&normals), ARRAY_BUFFER),
        push_view(&mut bin, &u32s_to_bytes(&mesh.indices), ELEMENT_ARRAY_BUFFER),
    ];

    let buffer_views: Vec<_> = views
        .iter()
        .map(|v| {
            serde_json::json!({
                "buffer": 0,
                "byteOffset": v.offset,
                "byteLength": v.length,
                "target": v.target
            })
        })
        .collect();

    let [r, g, b] = walls.material.color;
    let gltf = serde_json::json!({
        "asset": { "version": "2.0", "generator": "floorplan" },
        "scene": 0,
        "scenes": [{ "name": "Scene", "nodes": [0] }],
        "nodes": [{ "name": walls.name, "mesh": 0 }],
        "meshes": [{
            "name": walls.name,
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2,
                "material": 0
            }]
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": FLOAT,
                "count": vertex_count,
                "type": "VEC3",
                "min": pos_min,
                "max": pos_max
            },
            {
                "bufferView": 1,
                "componentType": FLOAT,
                "count": vertex_count,
                "type": "VEC3"
            },
            {
                "bufferView": 2,
                "componentType": UNSIGNED_INT,
                "count": mesh.indices.len(),
                "type": "SCALAR"
            }
        ],
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": bin.len() }],
        "materials": [{
            "name": "wall",
            "pbrMetallicRoughness": {
                "baseColorFactor": [r, g, b, 1.0],
                "metallicFactor": walls.material.metalness,
                "roughnessFactor": walls.material.roughness
            }
        }]
    });

    let mut json = serde_json::to_vec(&gltf).ok()?;
    // JSON chunk pads with spaces, BIN with zeros
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    write_chunk(&mut glb, CHUNK_TYPE_JSON, &json);
    write_chunk(&mut glb, CHUNK_TYPE_BIN, &bin);
    Some(glb)
}

fn push_view(bin: &mut Vec<u8>, bytes: &[u8], target: u32) -> View {
    let offset = bin.len();
    bin.extend_from_slice(bytes);
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    View {
        offset,
        length: bytes.len(),
        target,
    }
}

fn write_chunk(out: &mut Vec<u8>, kind: u32, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(data);
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    data.iter().flat_map(|v| v.to_le_bytes()).collect()
}
