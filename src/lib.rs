use wasm_bindgen::prelude::*;

pub mod config;
pub mod growth;
pub mod math;
pub mod mesh;

pub use config::{BranchParameters, ConfigError};
pub use growth::{generate, SegmentSpec, Snowflake, SnowflakeGenerator};

use mesh::{Mesh, MeshGenerator, MeshParams};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Generated snowflake and its mesh, exposed to JavaScript
#[wasm_bindgen]
pub struct SnowflakeModel {
    flake: Snowflake,
    mesh: Mesh,
}

#[wasm_bindgen]
impl SnowflakeModel {
    /// Build from YAML parameters (missing keys take defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(yaml: &str) -> Result<SnowflakeModel, JsValue> {
        Self::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build with tube resolution and taper for the mesh
    #[wasm_bindgen]
    pub fn with_mesh_params(yaml: &str, radial_segments: usize, taper: f32) -> Result<SnowflakeModel, JsValue> {
        let mesh_params = MeshParams { radial_segments, taper };
        BranchParameters::from_yaml(yaml)
            .and_then(|params| Self::build(params, mesh_params))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn segment_count(&self) -> usize {
        self.flake.segments().len()
    }

    /// start(3) + end(3) + thickness + depth per segment
    #[wasm_bindgen]
    pub fn segment_data(&self) -> Vec<f32> {
        self.flake.segment_data()
    }

    /// position(3) + normal(3) + uv(2) + depth per vertex
    #[wasm_bindgen]
    pub fn vertex_data(&self) -> Vec<f32> {
        self.mesh.vertex_data()
    }

    #[wasm_bindgen]
    pub fn index_data(&self) -> Vec<u32> {
        self.mesh.index_data().to_vec()
    }

    /// Radius that frames the whole snowflake, for camera placement
    #[wasm_bindgen]
    pub fn extent(&self) -> f32 {
        self.flake.extent()
    }
}

impl SnowflakeModel {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::build(BranchParameters::from_yaml(yaml)?, MeshParams::default())
    }

    pub fn build(params: BranchParameters, mesh_params: MeshParams) -> Result<Self, ConfigError> {
        let mesh_generator = MeshGenerator::new(mesh_params)?;
        let flake = SnowflakeGenerator::new(params)?.build();
        let mesh = mesh_generator.generate(&flake)?;
        Ok(Self { flake, mesh })
    }

    pub fn snowflake(&self) -> &Snowflake {
        &self.flake
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Default parameters as YAML, a starting point for editing
#[wasm_bindgen]
pub fn default_parameters_yaml() -> String {
    // serializing a flat struct of numbers cannot fail
    BranchParameters::default().to_yaml().unwrap_or_default()
}
