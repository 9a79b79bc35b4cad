use serde::Serialize;
use crate::config::BranchParameters;
use crate::math::Vec3;
use super::algorithm::segments_per_arm;
use super::segment::{SegmentSpec, SEGMENT_STRIDE};

/// Flat disc joining the arms at the origin, axis along Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hub {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Hub {
    /// Hub sized relative to the main arm radius
    pub fn for_thickness(thickness: f32) -> Self {
        Self {
            center: Vec3::ZERO,
            radius: thickness * 2.0,
            height: thickness * 1.5,
        }
    }
}

/// A generated snowflake: the parameters it came from, every segment in
/// generation order, and the center hub.
#[derive(Debug, Clone)]
pub struct Snowflake {
    params: BranchParameters,
    segments: Vec<SegmentSpec>,
    hub: Hub,
}

impl Snowflake {
    pub(crate) fn new(params: BranchParameters, segments: Vec<SegmentSpec>, hub: Hub) -> Self {
        Self { params, segments, hub }
    }

    pub fn params(&self) -> &BranchParameters {
        &self.params
    }

    pub fn segments(&self) -> &[SegmentSpec] {
        &self.segments
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn arm_count(&self) -> usize {
        self.params.arm_count as usize
    }

    /// Segments of arm `index`, or `None` past the last arm
    pub fn arm(&self, index: usize) -> Option<&[SegmentSpec]> {
        let per_arm = segments_per_arm(self.params.branch_levels);
        let start = index.checked_mul(per_arm)?;
        self.segments.get(start..start.checked_add(per_arm)?)
    }

    pub fn count_at_depth(&self, depth: u32) -> usize {
        self.segments.iter().filter(|s| s.depth() == depth).count()
    }

    /// Radius of the smallest origin-centered circle containing every segment
    /// endpoint.
    pub fn extent(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.end().length().max(s.start().length()))
            .fold(self.hub.radius, f32::max)
    }

    /// Flat buffer, [`SEGMENT_STRIDE`] floats per segment
    pub fn segment_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.segments.len() * SEGMENT_STRIDE);
        for s in &self.segments {
            data.extend_from_slice(&s.to_array());
        }
        data
    }
}
