// mesh.rs - segmented box geometry with one index group per face

/// Edge length of the panorama cube.
pub const CUBE_SIZE: f32 = 300.0;
/// Segments along each face edge.
pub const CUBE_SEGMENTS: usize = 7;

/// Contiguous index range drawn with one face material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGroup {
    pub start: u32,
    pub count: u32,
    pub material: usize,
}

#[derive(Debug, Clone)]
pub struct BoxMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub groups: Vec<FaceGroup>,
}

#[derive(Clone, Copy)]
enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

/// Box centered on the origin. Faces come in the order +x, -x, +y, -y, +z, -z,
/// which is also their material index.
pub fn build_box(width: f32, height: f32, depth: f32, segments: usize) -> BoxMesh {
    let segments = segments.max(1);
    let per_face = (segments + 1) * (segments + 1);

    let mut mesh = BoxMesh {
        positions: Vec::with_capacity(per_face * 6),
        uvs: Vec::with_capacity(per_face * 6),
        indices: Vec::with_capacity(segments * segments * 6 * 6),
        groups: Vec::with_capacity(6),
    };

    use Axis::{X, Y, Z};
    // (u axis, v axis, w axis, u dir, v dir, plane width, plane height, w offset)
    let planes = [
        (Z, Y, X, -1.0, -1.0, depth, height, width),
        (Z, Y, X, 1.0, -1.0, depth, height, -width),
        (X, Z, Y, 1.0, 1.0, width, depth, height),
        (X, Z, Y, 1.0, -1.0, width, depth, -height),
        (X, Y, Z, 1.0, -1.0, width, height, depth),
        (X, Y, Z, -1.0, -1.0, width, height, -depth),
    ];

    for (material, &(u, v, w, udir, vdir, pw, ph, pd)) in planes.iter().enumerate() {
        let first_vertex = mesh.positions.len() as u32;
        let first_index = mesh.indices.len() as u32;

        let seg_w = pw / segments as f32;
        let seg_h = ph / segments as f32;

        for iy in 0..=segments {
            let y = iy as f32 * seg_h - ph / 2.0;
            for ix in 0..=segments {
                let x = ix as f32 * seg_w - pw / 2.0;

                let mut p = [0.0f32; 3];
                p[u as usize] = x * udir;
                p[v as usize] = y * vdir;
                p[w as usize] = pd / 2.0;

                mesh.positions.push(p);
                mesh.uvs.push([
                    ix as f32 / segments as f32,
                    1.0 - iy as f32 / segments as f32,
                ]);
            }
        }

        let row = (segments + 1) as u32;
        for iy in 0..segments as u32 {
            for ix in 0..segments as u32 {
                let a = first_vertex + ix + row * iy;
                let b = first_vertex + ix + row * (iy + 1);
                let c = first_vertex + (ix + 1) + row * (iy + 1);
                let d = first_vertex + (ix + 1) + row * iy;

                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        mesh.groups.push(FaceGroup {
            start: first_index,
            count: mesh.indices.len() as u32 - first_index,
            material,
        });
    }

    mesh
}

impl BoxMesh {
    /// Scale x by -1 so the faces are seen from inside the box.
    pub fn mirror_x(mut self) -> Self {
        for p in &mut self.positions {
            p[0] = -p[0];
        }
        self
    }
}

/// The cube every panorama is painted on.
pub fn panorama_cube() -> BoxMesh {
    build_box(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE, CUBE_SEGMENTS).mirror_x()
}
