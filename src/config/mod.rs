//! Snowflake configuration: parameters, defaults, YAML loading and validation.

mod error;
mod params;

pub use error::ConfigError;
pub use params::{BranchParameters, MAX_ARM_COUNT, MAX_ARM_SEGMENTS, MAX_BRANCH_LEVELS};
