use tracing::debug;
use crate::config::ConfigError;
use crate::growth::{Hub, SegmentSpec, Snowflake};
use crate::math::Vec3;
use super::branch::{Mesh, Vertex, cap_ring, connect_rings, create_ring};

/// Segments shorter than this produce no geometry
pub const MIN_SEGMENT_LENGTH: f32 = 0.001;

/// Most vertices allowed around a ring
pub const MAX_RADIAL_SEGMENTS: usize = 64;

/// Parameters for mesh generation
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Vertices around each ring (more = rounder tubes)
    pub radial_segments: usize,
    /// End radius as a fraction of start radius (1.0 = straight cylinder)
    pub taper: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            radial_segments: 12,
            taper: 1.0,
        }
    }
}

impl MeshParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(3..=MAX_RADIAL_SEGMENTS).contains(&self.radial_segments) {
            return Err(ConfigError::RadialSegmentsOutOfRange {
                count: self.radial_segments,
                max: MAX_RADIAL_SEGMENTS,
            });
        }
        if !(self.taper.is_finite() && self.taper >= 0.0) {
            return Err(ConfigError::InvalidTaper(self.taper));
        }
        Ok(())
    }
}

/// Vertices needed for `segment_count` tubes plus the hub, or `None` when the
/// total does not fit a `u32` index.
pub fn vertex_budget(segment_count: usize, length_segments: usize, radial_segments: usize) -> Option<u32> {
    let per_tube = length_segments.checked_add(1)?.checked_mul(radial_segments)?;
    let hub = radial_segments.checked_mul(2)?.checked_add(2)?;
    let total = segment_count.checked_mul(per_tube)?.checked_add(hub)?;
    u32::try_from(total).ok()
}

/// Turns a [`Snowflake`] into tube geometry: one tube per segment plus the
/// capped hub. Length subdivision comes from `arm_segments`.
pub struct MeshGenerator {
    params: MeshParams,
}

impl MeshGenerator {
    pub fn new(params: MeshParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn generate(&self, flake: &Snowflake) -> Result<Mesh, ConfigError> {
        let length_segments = flake.params().arm_segments.max(1) as usize;
        // vertex indices are u32
        vertex_budget(flake.segments().len(), length_segments, self.params.radial_segments)
            .ok_or(ConfigError::MeshTooLarge { max: u32::MAX })?;

        let mut mesh = Mesh::new();
        let mut skipped = 0usize;
        for segment in flake.segments() {
            if !self.generate_segment(segment, length_segments, &mut mesh) {
                skipped += 1;
            }
        }
        self.generate_hub(flake.hub(), &mut mesh);
        mesh.calculate_bounds();

        debug!(
            segments = flake.segments().len(),
            skipped,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tessellated snowflake"
        );
        Ok(mesh)
    }

    /// Emit one tube. Returns false when the segment is too short to draw.
    fn generate_segment(&self, segment: &SegmentSpec, length_segments: usize, mesh: &mut Mesh) -> bool {
        if segment.length() < MIN_SEGMENT_LENGTH {
            return false;
        }

        let radial = self.params.radial_segments;
        let direction = segment.direction();
        let start_radius = segment.thickness();
        let end_radius = start_radius * self.params.taper;

        let mut prev_ring = None;
        for i in 0..=length_segments {
            let t = i as f32 / length_segments as f32;
            let radius = lerp(start_radius, end_radius, t);
            let ring = create_ring(segment.point_at(t), direction, radius, radial, t, segment.depth());
            let ring_start = mesh.add_vertices(ring);

            if let Some(prev) = prev_ring {
                connect_rings(mesh, prev, ring_start, radial);
            }
            prev_ring = Some(ring_start);
        }
        true
    }

    fn generate_hub(&self, hub: &Hub, mesh: &mut Mesh) {
        let radial = self.params.radial_segments;
        let half = Vec3::Z.scale(hub.height / 2.0);
        let bottom_center = hub.center - half;
        let top_center = hub.center + half;

        let bottom = mesh.add_vertices(create_ring(bottom_center, Vec3::Z, hub.radius, radial, 0.0, 0));
        let top = mesh.add_vertices(create_ring(top_center, Vec3::Z, hub.radius, radial, 1.0, 0));
        connect_rings(mesh, bottom, top, radial);

        cap_ring(mesh, top, radial, Vertex::new(top_center, Vec3::Z).with_uv(0.5, 1.0), true);
        cap_ring(mesh, bottom, radial, Vertex::new(bottom_center, -Vec3::Z).with_uv(0.5, 0.0), false);
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
