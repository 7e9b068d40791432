use std::f32::consts::{PI, TAU};
use crate::math::Vec3;

/// A vertex with position, normal and UV
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

/// Floats per vertex in the GPU buffer
pub const VERTEX_FLOATS: usize = 8;

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    /// Layout: position(3) + normal(3) + uv(2)
    pub fn to_array(&self) -> [f32; VERTEX_FLOATS] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Vertex buffer data as flat f32 array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Create a ring of vertices around `direction` at `center`
pub fn create_ring(
    center: Vec3,
    direction: Vec3,
    radius: f32,
    segments: usize,
    v_coord: f32,
) -> Vec<Vertex> {
    let tangent = direction.perpendicular();
    let bitangent = direction.cross(&tangent).normalize();

    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * TAU;
            let offset = tangent.scale(angle.cos() * radius) + bitangent.scale(angle.sin() * radius);
            Vertex::new(center + offset, offset.normalize())
                .with_uv(i as f32 / segments as f32, v_coord)
        })
        .collect()
}

/// Connect two rings with triangles
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

/// Close a ring with a triangle fan to a single apex
fn cap_ring(mesh: &mut Mesh, ring_start: u32, segments: usize, apex: Vertex, flip: bool) {
    let apex_idx = mesh.add_vertices(std::iter::once(apex));
    for i in 0..segments {
        let a = ring_start + i as u32;
        let b = ring_start + ((i + 1) % segments) as u32;
        if flip {
            mesh.add_triangle(a, apex_idx, b);
        } else {
            mesh.add_triangle(a, b, apex_idx);
        }
    }
}

/// Capped cylinder along +Y, centered on the origin
pub fn cylinder(radius: f32, height: f32, segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height / 2.0;

    let bottom = mesh.add_vertices(create_ring(Vec3::new(0.0, -half, 0.0), Vec3::UP, radius, segments, 0.0));
    let top = mesh.add_vertices(create_ring(Vec3::new(0.0, half, 0.0), Vec3::UP, radius, segments, 1.0));
    connect_rings(&mut mesh, bottom, top, segments);

    let bottom_cap = mesh.add_vertices(
        create_ring(Vec3::new(0.0, -half, 0.0), Vec3::UP, radius, segments, 0.0)
            .into_iter()
            .map(|v| Vertex { normal: -Vec3::UP, ..v }),
    );
    cap_ring(&mut mesh, bottom_cap, segments, Vertex::new(Vec3::new(0.0, -half, 0.0), -Vec3::UP), true);

    let top_cap = mesh.add_vertices(
        create_ring(Vec3::new(0.0, half, 0.0), Vec3::UP, radius, segments, 1.0)
            .into_iter()
            .map(|v| Vertex { normal: Vec3::UP, ..v }),
    );
    cap_ring(&mut mesh, top_cap, segments, Vertex::new(Vec3::new(0.0, half, 0.0), Vec3::UP), false);

    mesh
}

/// Cone along +Y with its base at -height/2 and apex at +height/2
pub fn cone(radius: f32, height: f32, segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let half = height / 2.0;
    let slope = radius / height;

    // Side normals tilt upward by the cone's slope
    let side = create_ring(Vec3::new(0.0, -half, 0.0), Vec3::UP, radius, segments, 0.0)
        .into_iter()
        .map(|v| {
            let out = v.position.with_y(0.0).normalize();
            Vertex { normal: (out + Vec3::UP.scale(slope)).normalize(), ..v }
        });
    let ring = mesh.add_vertices(side);
    cap_ring(
        &mut mesh,
        ring,
        segments,
        Vertex::new(Vec3::new(0.0, half, 0.0), Vec3::UP).with_uv(0.5, 1.0),
        false,
    );

    let base = mesh.add_vertices(
        create_ring(Vec3::new(0.0, -half, 0.0), Vec3::UP, radius, segments, 0.0)
            .into_iter()
            .map(|v| Vertex { normal: -Vec3::UP, ..v }),
    );
    cap_ring(&mut mesh, base, segments, Vertex::new(Vec3::new(0.0, -half, 0.0), -Vec3::UP), true);

    mesh
}

/// UV sphere centered on the origin
pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    for row in 0..=height_segments {
        let v = row as f32 / height_segments as f32;
        let theta = v * PI;
        let verts = (0..=width_segments).map(|col| {
            let u = col as f32 / width_segments as f32;
            let phi = u * TAU;
            let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            Vertex::new(normal.scale(radius), normal).with_uv(u, 1.0 - v)
        });
        mesh.add_vertices(verts);
    }

    let stride = width_segments as u32 + 1;
    for row in 0..height_segments as u32 {
        for col in 0..width_segments as u32 {
            let a = row * stride + col + 1;
            let b = row * stride + col;
            let c = (row + 1) * stride + col;
            let d = (row + 1) * stride + col + 1;
            if row != 0 {
                mesh.add_triangle(a, b, d);
            }
            if row != height_segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

/// Flat plane in XY facing +Z, UVs repeated `uv_repeat` times
pub fn plane(width: f32, height: f32, uv_repeat: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let hw = width / 2.0;
    let hh = height / 2.0;

    let start = mesh.add_vertices([
        Vertex::new(Vec3::new(-hw, -hh, 0.0), Vec3::FORWARD).with_uv(0.0, 0.0),
        Vertex::new(Vec3::new(hw, -hh, 0.0), Vec3::FORWARD).with_uv(uv_repeat, 0.0),
        Vertex::new(Vec3::new(hw, hh, 0.0), Vec3::FORWARD).with_uv(uv_repeat, uv_repeat),
        Vertex::new(Vec3::new(-hw, hh, 0.0), Vec3::FORWARD).with_uv(0.0, uv_repeat),
    ]);
    mesh.add_quad(start, start + 1, start + 2, start + 3);

    mesh
}

/// Two-sided flat shape in XY from a closed outline.
///
/// Triangulated as a fan around the outline centroid, so the outline must be
/// star-shaped with respect to it.
pub fn flat_shape(outline: &[Vec3]) -> Mesh {
    let mut mesh = Mesh::new();
    if outline.len() < 3 {
        return mesh;
    }

    let (min, max) = outline.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(lo, hi), p| {
            (
                Vec3::new(lo.x.min(p.x), lo.y.min(p.y), 0.0),
                Vec3::new(hi.x.max(p.x), hi.y.max(p.y), 0.0),
            )
        },
    );
    let extent = max - min;
    let uv = |p: Vec3| {
        [
            if extent.x > 0.0 { (p.x - min.x) / extent.x } else { 0.0 },
            if extent.y > 0.0 { (p.y - min.y) / extent.y } else { 0.0 },
        ]
    };

    let centroid = outline
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc + *p)
        .scale(1.0 / outline.len() as f32);
    let n = outline.len() as u32;

    for (normal, front) in [(Vec3::FORWARD, true), (-Vec3::FORWARD, false)] {
        let make = |p: Vec3| {
            let [u, v] = uv(p);
            Vertex::new(Vec3::new(p.x, p.y, 0.0), normal).with_uv(u, v)
        };
        let center = mesh.add_vertices(std::iter::once(make(centroid)));
        let ring = mesh.add_vertices(outline.iter().map(|p| make(*p)));

        for i in 0..n {
            let a = ring + i;
            let b = ring + (i + 1) % n;
            if front {
                mesh.add_triangle(center, a, b);
            } else {
                mesh.add_triangle(center, b, a);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UP).with_uv(0.25, 0.75);
        let arr = v.to_array();
        assert_eq!(arr.len(), VERTEX_FLOATS);
        assert_eq!(arr[0], 1.0);
        assert_eq!(arr[4], 1.0); // normal.y
        assert_eq!(arr[7], 0.75);
    }

    #[test]
    fn test_quad_is_two_triangles() {
        let mut mesh = Mesh::new();
        let start = mesh.add_vertices((0..4).map(|_| Vertex::new(Vec3::ZERO, Vec3::UP)));
        assert_eq!(start, 0);
        mesh.add_quad(0, 1, 2, 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_ring_radius() {
        let ring = create_ring(Vec3::ZERO, Vec3::UP, 1.0, 8, 0.0);
        assert_eq!(ring.len(), 8);
        for v in &ring {
            let dist = (v.position.x.powi(2) + v.position.z.powi(2)).sqrt();
            assert!((dist - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_cylinder_structure() {
        let mesh = cylinder(0.1, 1.0, 8);
        // Side rings + two cap rings + two apexes
        assert_eq!(mesh.vertex_count(), 8 * 4 + 2);
        // 8 quads on the side, 8 fan triangles per cap
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);

        for v in &mesh.vertices {
            assert!(v.position.y.abs() <= 0.5 + 0.0001);
        }
    }

    #[test]
    fn test_cone_apex_on_top() {
        let mesh = cone(0.2, 1.0, 8);
        let top = mesh
            .vertices
            .iter()
            .map(|v| v.position.y)
            .fold(f32::MIN, f32::max);
        assert!((top - 0.5).abs() < 0.0001);
        assert_eq!(mesh.triangle_count(), 16);
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = sphere(0.4, 32, 32);
        for v in &mesh.vertices {
            assert!((v.position.length() - 0.4).abs() < 0.0001);
        }
    }

    #[test]
    fn test_plane_uv_repeat() {
        let mesh = plane(20.0, 20.0, 5.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        let max_u = mesh.vertices.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
        assert_eq!(max_u, 5.0);
    }

    #[test]
    fn test_flat_shape_is_two_sided() {
        let square = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        let mesh = flat_shape(&square);
        assert_eq!(mesh.vertex_count(), 2 * (1 + 4));
        assert_eq!(mesh.triangle_count(), 2 * 4);

        let back_facing = mesh.vertices.iter().filter(|v| v.normal.z < 0.0).count();
        assert_eq!(back_facing, 5);
    }

    #[test]
    fn test_flat_shape_degenerate() {
        assert_eq!(flat_shape(&[Vec3::ZERO, Vec3::UP]).vertex_count(), 0);
    }

    #[test]
    fn test_vertex_data_flat() {
        let mesh = plane(1.0, 1.0, 1.0);
        assert_eq!(mesh.vertex_data().len(), 4 * VERTEX_FLOATS);
    }
}
