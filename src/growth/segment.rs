use serde::Serialize;
use crate::math::{AxisRotation, Vec3};

/// Floats per segment in [`SegmentSpec::to_array`]
pub const SEGMENT_STRIDE: usize = 8;

/// One straight branch piece: a line from `start` to `end` with a radius,
/// tagged with the recursion depth that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentSpec {
    start: Vec3,
    end: Vec3,
    thickness: f32,
    depth: u32,
}

impl SegmentSpec {
    pub fn new(start: Vec3, end: Vec3, thickness: f32, depth: u32) -> Self {
        Self { start, end, thickness, depth }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// 0 = main arm
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Unit vector from start to end
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize()
    }

    /// Point at fraction `t` of the way from start to end
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start.lerp(&self.end, t)
    }

    /// Copy of this segment with both endpoints rotated
    pub fn rotated(&self, rotation: &AxisRotation) -> Self {
        Self {
            start: rotation.apply(self.start),
            end: rotation.apply(self.end),
            ..*self
        }
    }

    /// Flat layout: start(3) + end(3) + thickness(1) + depth(1)
    pub fn to_array(&self) -> [f32; SEGMENT_STRIDE] {
        [
            self.start.x, self.start.y, self.start.z,
            self.end.x, self.end.y, self.end.z,
            self.thickness,
            self.depth as f32,
        ]
    }

    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.depth == other.depth
            && (self.thickness - other.thickness).abs() <= eps
            && self.start.approx_eq(&other.start, eps)
            && self.end.approx_eq(&other.end, eps)
    }
}
