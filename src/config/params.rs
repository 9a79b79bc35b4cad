use serde::{Deserialize, Serialize};
use super::error::ConfigError;

/// Deepest recursion accepted. Segment count per arm grows as `2^d * d!`,
/// so depth 6 already yields ~50k segments per arm.
pub const MAX_BRANCH_LEVELS: u32 = 6;

/// Highest rotational symmetry order accepted
pub const MAX_ARM_COUNT: u32 = 64;

/// Most length bands a tessellated segment may have
pub const MAX_ARM_SEGMENTS: u32 = 64;

/// Parameters controlling snowflake shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchParameters {
    /// Length of each main arm
    pub arm_length: f32,
    /// Length subdivisions used when tessellating a segment
    pub arm_segments: u32,
    /// Maximum recursion depth (0 = bare arms)
    pub branch_levels: u32,
    /// Angle between a child branch and its parent, in degrees
    pub branch_angle_degrees: f32,
    /// Child length as a fraction of parent length
    pub branch_length_ratio: f32,
    /// Radius of the main arms
    pub thickness: f32,
    /// Child radius as a fraction of parent radius
    pub branch_thickness_ratio: f32,
    /// Rotational symmetry order
    pub arm_count: u32,
}

impl Default for BranchParameters {
    fn default() -> Self {
        Self {
            arm_length: 5.0,
            arm_segments: 5,
            branch_levels: 2,
            branch_angle_degrees: 30.0,
            branch_length_ratio: 0.6,
            thickness: 0.08,
            branch_thickness_ratio: 0.7,
            arm_count: 6, // hexagonal
        }
    }
}

impl BranchParameters {
    /// Parse from YAML. Missing keys fall back to the defaults, and the
    /// result is validated.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_arm_count(mut self, arm_count: u32) -> Self {
        self.arm_count = arm_count;
        self
    }

    pub fn with_branch_levels(mut self, branch_levels: u32) -> Self {
        self.branch_levels = branch_levels;
        self
    }

    pub fn with_branch_angle(mut self, degrees: f32) -> Self {
        self.branch_angle_degrees = degrees;
        self
    }

    /// Angle between neighbouring arms, in degrees
    pub fn arm_spacing_degrees(&self) -> f32 {
        360.0 / self.arm_count as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arm_length", self.arm_length)?;
        positive("thickness", self.thickness)?;
        nonzero("arm_count", self.arm_count)?;
        nonzero("arm_segments", self.arm_segments)?;
        unit_ratio("branch_length_ratio", self.branch_length_ratio)?;
        unit_ratio("branch_thickness_ratio", self.branch_thickness_ratio)?;

        if !self.branch_angle_degrees.is_finite() {
            return Err(ConfigError::NonFiniteAngle(self.branch_angle_degrees));
        }
        if self.branch_levels > MAX_BRANCH_LEVELS {
            return Err(ConfigError::TooManyLevels {
                levels: self.branch_levels,
                max: MAX_BRANCH_LEVELS,
            });
        }
        if self.arm_count > MAX_ARM_COUNT {
            return Err(ConfigError::TooManyArms {
                count: self.arm_count,
                max: MAX_ARM_COUNT,
            });
        }
        if self.arm_segments > MAX_ARM_SEGMENTS {
            return Err(ConfigError::TooManyArmSegments {
                count: self.arm_segments,
                max: MAX_ARM_SEGMENTS,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn nonzero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroCount { field })
    } else {
        Ok(())
    }
}

fn unit_ratio(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { field, value })
    }
}
