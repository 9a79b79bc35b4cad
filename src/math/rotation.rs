use super::Vec3;

/// Rotation about an axis through the origin.
///
/// Sine and cosine are computed once so the same rotation can be applied to
/// every point of an arm.
#[derive(Debug, Clone, Copy)]
pub struct AxisRotation {
    axis: Vec3,
    cos_a: f32,
    sin_a: f32,
}

impl AxisRotation {
    pub fn new(axis: Vec3, radians: f32) -> Self {
        Self {
            axis: axis.normalize(),
            cos_a: radians.cos(),
            sin_a: radians.sin(),
        }
    }

    /// Counter-clockwise rotation about the Z axis (viewed from +Z)
    pub fn about_z(radians: f32) -> Self {
        Self::new(Vec3::Z, radians)
    }

    pub fn from_degrees(axis: Vec3, degrees: f32) -> Self {
        Self::new(axis, degrees.to_radians())
    }

    /// Rodrigues: v*cos + (k x v)*sin + k*(k.v)*(1 - cos)
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let k = self.axis;
        let k_cross_v = k.cross(&v);
        let k_dot_v = k.dot(&v);

        v.scale(self.cos_a) + k_cross_v.scale(self.sin_a) + k.scale(k_dot_v * (1.0 - self.cos_a))
    }
}
