pub mod vec3;
pub mod rotation;

pub use vec3::Vec3;
pub use rotation::AxisRotation;
