use glam::Vec3;

use crate::constants::*;
use crate::core::field::ScalarField;
use crate::core::vertex::Vertex;
use crate::mesh::MeshData;
use crate::mesh::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};

/// Extract the isosurface of one chunk's scalar field as a triangle list.
///
/// Walks every cell of the chunk, classifies its 8 corners against the iso
/// level (bit set = air) and emits the triangulation the lookup table
/// prescribes. A fully uniform field produces an empty mesh.
pub fn build_mesh(field: &ScalarField, origin: Vec3, cell_size: f32, iso_level: f32) -> MeshData {
    let mut mesh = MeshData::new();
    for cz in 0..CHUNK_SIZE {
        for cy in 0..CHUNK_SIZE {
            for cx in 0..CHUNK_SIZE {
                march_cell(field, origin, cell_size, iso_level, cx, cy, cz, &mut mesh);
            }
        }
    }
    mesh
}

fn march_cell(
    field: &ScalarField,
    origin: Vec3,
    cell_size: f32,
    iso_level: f32,
    cx: i32,
    cy: i32,
    cz: i32,
    mesh: &mut MeshData,
) {
    let mut corner_values = [0.0f32; 8];
    let mut corner_positions = [Vec3::ZERO; 8];
    for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
        let (gx, gy, gz) = (cx + offset[0], cy + offset[1], cz + offset[2]);
        corner_values[i] = field.get(gx, gy, gz);
        corner_positions[i] = origin + Vec3::new(gx as f32, gy as f32, gz as f32) * cell_size;
    }

    let mut config = 0usize;
    for (i, &value) in corner_values.iter().enumerate() {
        if value < iso_level {
            config |= 1 << i;
        }
    }
    // No surface passes through a fully solid or fully open cell.
    if config == 0 || config == 255 {
        return;
    }

    // Crossing point for every edge this configuration references.
    let edges = EDGE_TABLE[config];
    let mut crossings = [Vec3::ZERO; 12];
    for (e, corners) in EDGE_CORNERS.iter().enumerate() {
        if edges & (1 << e) != 0 {
            let [a, b] = *corners;
            crossings[e] = interpolate_crossing(
                corner_positions[a],
                corner_positions[b],
                corner_values[a],
                corner_values[b],
                iso_level,
            );
        }
    }

    let block = config * 16;
    let mut t = 0;
    while t < 16 && TRI_TABLE[block + t] != -1 {
        let a = crossings[TRI_TABLE[block + t] as usize];
        let b = crossings[TRI_TABLE[block + t + 1] as usize];
        let c = crossings[TRI_TABLE[block + t + 2] as usize];
        push_triangle(mesh, a, b, c);
        t += 3;
    }
}

/// Point where the isosurface crosses the edge between two corners, by
/// linear interpolation of the corner densities. Falls back to the edge
/// midpoint when the densities are too close to divide by.
fn interpolate_crossing(pa: Vec3, pb: Vec3, va: f32, vb: f32, iso_level: f32) -> Vec3 {
    let denom = vb - va;
    if denom.abs() < INTERP_EPSILON {
        return (pa + pb) * 0.5;
    }
    let t = ((iso_level - va) / denom).clamp(0.0, 1.0);
    pa + (pb - pa) * t
}

fn push_triangle(mesh: &mut MeshData, a: Vec3, b: Vec3, c: Vec3) {
    let face = (b - a).cross(c - a);
    let normal = face.normalize_or_zero().to_array();

    let base = mesh.vertices.len() as u32;
    for p in [a, b, c] {
        mesh.vertices.push(Vertex {
            position: p.to_array(),
            normal,
            uv: dominant_axis_uv(p, face),
        });
    }
    mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

/// Project onto the plane orthogonal to the largest face-normal component.
/// Near-vertical cave walls tile against their own plane instead of
/// stretching a top-down projection.
fn dominant_axis_uv(p: Vec3, face: Vec3) -> [f32; 2] {
    let (ax, ay, az) = (face.x.abs(), face.y.abs(), face.z.abs());
    if ax >= ay && ax >= az {
        [p.z * UV_SCALE, p.y * UV_SCALE]
    } else if ay >= az {
        [p.x * UV_SCALE, p.z * UV_SCALE]
    } else {
        [p.x * UV_SCALE, p.y * UV_SCALE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_field(value: f32) -> ScalarField {
        let mut field = ScalarField::new();
        for lz in 0..GRID_SIZE {
            for ly in 0..GRID_SIZE {
                for lx in 0..GRID_SIZE {
                    field.set(lx, ly, lz, value);
                }
            }
        }
        field
    }

    #[test]
    fn test_uniform_fields_produce_no_triangles() {
        let solid = build_mesh(&uniform_field(1.0), Vec3::ZERO, 1.0, 0.5);
        assert!(solid.is_empty());

        let air = build_mesh(&uniform_field(0.0), Vec3::ZERO, 1.0, 0.5);
        assert!(air.is_empty());
    }

    #[test]
    fn test_single_air_corner_emits_one_triangle() {
        let mut field = uniform_field(1.0);
        field.set(0, 0, 0, 0.0);

        let mesh = build_mesh(&field, Vec3::ZERO, 1.0, 0.5);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);

        // The crossings sit at the midpoints of the three edges leaving
        // corner (0, 0, 0): exactly one coordinate is 0.5, the rest 0.
        for vertex in &mesh.vertices {
            let p = vertex.position;
            let halves = p.iter().filter(|&&c| c == 0.5).count();
            let zeros = p.iter().filter(|&&c| c == 0.0).count();
            assert_eq!(halves, 1, "unexpected vertex {p:?}");
            assert_eq!(zeros, 2, "unexpected vertex {p:?}");
        }
    }

    #[test]
    fn test_crossing_interpolation_weights_by_density() {
        // 0.2 -> 0.6 crossing at iso 0.5 sits three quarters along the edge.
        let p = interpolate_crossing(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.2, 0.6, 0.5);
        assert!((p.x - 0.75).abs() < 1e-6);

        // Degenerate edge falls back to the midpoint.
        let p = interpolate_crossing(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.5, 0.5, 0.5);
        assert_eq!(p.x, 0.5);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut field = uniform_field(1.0);
        for lz in 0..GRID_SIZE {
            for lx in 0..GRID_SIZE {
                for ly in 9..GRID_SIZE {
                    field.set(lx, ly, lz, 0.1);
                }
            }
        }

        let a = build_mesh(&field, Vec3::ZERO, 1.0, 0.5);
        let b = build_mesh(&field, Vec3::ZERO, 1.0, 0.5);
        assert!(!a.is_empty());
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.vertices.len(), b.vertices.len());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.position, vb.position);
        }
    }

    #[test]
    fn test_index_buffer_addresses_every_vertex() {
        let mut field = uniform_field(1.0);
        field.set(8, 8, 8, 0.0);
        field.set(9, 8, 8, 0.0);

        let mesh = build_mesh(&field, Vec3::ZERO, 1.0, 0.5);
        assert_eq!(mesh.indices.len(), mesh.vertices.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        for (i, &index) in mesh.indices.iter().enumerate() {
            assert_eq!(index as usize, i);
        }
    }
}
