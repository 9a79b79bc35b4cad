use crate::math::Vec3;

/// Floats per vertex in [`Vertex::to_array`]
pub const VERTEX_STRIDE: usize = 9;

/// A vertex with position, normal, UV, and the branch depth it belongs to
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
    /// Recursion depth of the source segment (lets a shader fade fine branches)
    pub depth: f32,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
            depth: 0.0,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth as f32;
        self
    }

    /// Layout: position(3) + normal(3) + uv(2) + depth(1)
    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
            self.depth,
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
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

    /// Bounding sphere around the vertex centroid
    pub fn calculate_bounds(&mut self) {
        if self.vertices.is_empty() {
            self.bounds_center = Vec3::ZERO;
            self.bounds_radius = 0.0;
            return;
        }

        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + v.position);
        let center = sum.scale(1.0 / self.vertices.len() as f32);

        self.bounds_radius = self
            .vertices
            .iter()
            .map(|v| v.position.distance(&center))
            .fold(0.0, f32::max);
        self.bounds_center = center;
    }

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

/// Ring of `segments` vertices around `center`, in the plane normal to
/// `direction`. Normals point radially outward.
pub fn create_ring(
    center: Vec3,
    direction: Vec3,
    radius: f32,
    segments: usize,
    v_coord: f32,
    depth: u32,
) -> Vec<Vertex> {
    let tangent = direction.perpendicular();
    let bitangent = direction.normalize().cross(&tangent).normalize();

    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let offset = tangent.scale(angle.cos() * radius) + bitangent.scale(angle.sin() * radius);
            let u = i as f32 / segments as f32;

            Vertex::new(center + offset, offset.normalize())
                .with_uv(u, v_coord)
                .with_depth(depth)
        })
        .collect()
}

/// Connect two rings of equal size with quads
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

/// Close a ring with a triangle fan around `apex`
pub fn cap_ring(mesh: &mut Mesh, ring_start: u32, segments: usize, apex: Vertex, outward: bool) {
    let apex_idx = mesh.add_vertices(std::iter::once(apex));
    for i in 0..segments {
        let a = ring_start + i as u32;
        let b = ring_start + ((i + 1) % segments) as u32;
        if outward {
            mesh.add_triangle(a, b, apex_idx);
        } else {
            mesh.add_triangle(b, a, apex_idx);
        }
    }
}
