pub mod branch;
pub mod generator;

pub use branch::{Mesh, Vertex, VERTEX_STRIDE};
pub use generator::{MeshGenerator, MeshParams};
