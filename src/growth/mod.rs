//! Recursive branch generation for rotationally symmetric snowflakes.

mod algorithm;
mod segment;
mod snowflake;

pub use algorithm::{attachment_fractions, generate, segments_per_arm, SnowflakeGenerator};
pub use segment::{SegmentSpec, SEGMENT_STRIDE};
pub use snowflake::{Hub, Snowflake};
