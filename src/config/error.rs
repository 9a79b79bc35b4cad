use thiserror::Error;

/// Rejected snowflake configuration. Raised before any geometry is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A length or radius that must be strictly positive was not.
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive {
        field: &'static str,
        value: f32,
    },
    /// A count that must be at least one was zero.
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    /// A shrink ratio outside the open interval (0, 1).
    #[error("{field} must lie strictly between 0 and 1 (got {value})")]
    RatioOutOfRange {
        field: &'static str,
        value: f32,
    },
    #[error("branch_angle_degrees must be finite (got {0})")]
    NonFiniteAngle(f32),
    /// Recursion deeper than the generator allows.
    #[error("branch_levels {levels} exceeds the maximum of {max}")]
    TooManyLevels { levels: u32, max: u32 },
    #[error("arm_count {count} exceeds the maximum of {max}")]
    TooManyArms { count: u32, max: u32 },
    #[error("arm_segments {count} exceeds the maximum of {max}")]
    TooManyArmSegments { count: u32, max: u32 },
    #[error("radial_segments {count} must lie between 3 and {max}")]
    RadialSegmentsOutOfRange { count: usize, max: usize },
    #[error("taper must be a finite number >= 0 (got {0})")]
    InvalidTaper(f32),
    /// Tessellation would need more vertices than a `u32` index can address.
    #[error("mesh would need more than {max} vertices")]
    MeshTooLarge { max: u32 },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
