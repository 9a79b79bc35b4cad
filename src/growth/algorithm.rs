use tracing::{debug, trace};
use crate::config::{BranchParameters, ConfigError};
use crate::math::{AxisRotation, Vec3};
use super::segment::SegmentSpec;
use super::snowflake::{Hub, Snowflake};

/// Fractions along a depth-`depth` segment where children attach.
///
/// A segment at depth `d` carries `d + 1` evenly spaced attachment points at
/// `i / (d + 2)`: the main arm branches at its midpoint, first-level branches
/// at thirds, and so on.
pub fn attachment_fractions(depth: u32) -> impl Iterator<Item = f32> {
    let divisions = depth + 2;
    (1..divisions).map(move |i| i as f32 / divisions as f32)
}

/// Number of segments one arm produces for a given recursion depth.
///
/// Every depth-`d` segment spawns `2 * (d + 1)` children, so depth `d` holds
/// `2^d * d!` segments.
pub fn segments_per_arm(branch_levels: u32) -> usize {
    let mut at_depth = 1usize;
    let mut total = 1usize;
    for d in 0..branch_levels as usize {
        at_depth *= 2 * (d + 1);
        total += at_depth;
    }
    total
}

/// Validate `params` and produce every segment of the snowflake, arm by arm.
pub fn generate(params: &BranchParameters) -> Result<Vec<SegmentSpec>, ConfigError> {
    Ok(SnowflakeGenerator::new(*params)?.generate())
}

/// Recursive branch generator.
///
/// Arm 0 points along +X in the XY plane. Children are rotated about Z by
/// `-angle` then `+angle` at each attachment point, so the whole snowflake
/// stays flat. The remaining arms are copies of arm 0 rotated about Z.
#[derive(Debug, Clone)]
pub struct SnowflakeGenerator {
    params: BranchParameters,
    sides: [AxisRotation; 2],
}

impl SnowflakeGenerator {
    pub fn new(params: BranchParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        let angle = params.branch_angle_degrees;
        Ok(Self {
            params,
            sides: [
                AxisRotation::from_degrees(Vec3::Z, -angle),
                AxisRotation::from_degrees(Vec3::Z, angle),
            ],
        })
    }

    pub fn params(&self) -> &BranchParameters {
        &self.params
    }

    /// All segments: arm index ascending, depth-first pre-order within an arm
    pub fn generate(&self) -> Vec<SegmentSpec> {
        let arm = self.grow_arm();
        let arm_count = self.params.arm_count;
        let spacing = self.params.arm_spacing_degrees();

        // capacity is only a hint; validation keeps the product small
        let capacity = arm.len().checked_mul(arm_count as usize).unwrap_or(arm.len());
        let mut segments = Vec::with_capacity(capacity);
        segments.extend_from_slice(&arm);
        for k in 1..arm_count {
            let rotation = AxisRotation::from_degrees(Vec3::Z, spacing * k as f32);
            segments.extend(arm.iter().map(|s| s.rotated(&rotation)));
        }

        debug!(
            arm_count,
            branch_levels = self.params.branch_levels,
            per_arm = arm.len(),
            total = segments.len(),
            "generated snowflake segments"
        );
        segments
    }

    /// Segments plus the center hub
    pub fn build(&self) -> Snowflake {
        let hub = Hub::for_thickness(self.params.thickness);
        Snowflake::new(self.params, self.generate(), hub)
    }

    fn grow_arm(&self) -> Vec<SegmentSpec> {
        let mut arm = Vec::with_capacity(segments_per_arm(self.params.branch_levels));
        self.grow_branch(
            Vec3::ZERO,
            Vec3::X,
            self.params.arm_length,
            self.params.thickness,
            0,
            &mut arm,
        );
        arm
    }

    fn grow_branch(
        &self,
        start: Vec3,
        direction: Vec3,
        length: f32,
        thickness: f32,
        depth: u32,
        out: &mut Vec<SegmentSpec>,
    ) {
        let end = start + direction.scale(length);
        out.push(SegmentSpec::new(start, end, thickness, depth));

        if depth >= self.params.branch_levels {
            return;
        }

        let child_length = length * self.params.branch_length_ratio;
        let child_thickness = thickness * self.params.branch_thickness_ratio;

        for t in attachment_fractions(depth) {
            let child_start = start.lerp(&end, t);
            for side in &self.sides {
                let child_direction = side.apply(direction).normalize();
                trace!(depth = depth + 1, t, "attaching branch");
                self.grow_branch(
                    child_start,
                    child_direction,
                    child_length,
                    child_thickness,
                    depth + 1,
                    out,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const EPS: f32 = 1e-4;

    fn params(arm_count: u32, branch_levels: u32) -> BranchParameters {
        BranchParameters::default()
            .with_arm_count(arm_count)
            .with_branch_levels(branch_levels)
    }

    #[test]
    fn test_attachment_fractions() {
        assert_eq!(attachment_fractions(0).collect::<Vec<_>>(), vec![0.5]);
        let thirds: Vec<_> = attachment_fractions(1).collect();
        assert_eq!(thirds.len(), 2);
        assert!((thirds[0] - 1.0 / 3.0).abs() < EPS);
        assert!((thirds[1] - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_segments_per_arm() {
        assert_eq!(segments_per_arm(0), 1);
        assert_eq!(segments_per_arm(1), 3);
        assert_eq!(segments_per_arm(2), 11);
        assert_eq!(segments_per_arm(3), 59);
    }

    #[test]
    fn test_one_main_arm_per_arm_count() {
        for arm_count in [1, 3, 6, 12] {
            let p = params(arm_count, 2);
            let segments = generate(&p).unwrap();
            let mains: Vec<_> = segments.iter().filter(|s| s.depth() == 0).collect();
            assert_eq!(mains.len(), arm_count as usize);
            for s in mains {
                assert_eq!(s.start(), Vec3::ZERO);
                assert!((s.length() - p.arm_length).abs() < EPS);
            }
            assert_eq!(segments.len(), arm_count as usize * segments_per_arm(2));
        }
    }

    #[test]
    fn test_length_and_thickness_shrink_per_depth() {
        let p = params(6, 3);
        for s in generate(&p).unwrap() {
            let d = s.depth() as i32;
            let expected_length = p.arm_length * p.branch_length_ratio.powi(d);
            let expected_thickness = p.thickness * p.branch_thickness_ratio.powi(d);
            assert!((s.length() - expected_length).abs() < 1e-3, "depth {}", d);
            assert!((s.thickness() - expected_thickness).abs() < 1e-6, "depth {}", d);
            assert!(s.depth() <= p.branch_levels);
        }
    }

    #[test]
    fn test_no_branches_at_level_zero() {
        let segments = generate(&params(6, 0)).unwrap();
        assert_eq!(segments.len(), 6);
        assert!(segments.iter().all(|s| s.depth() == 0));
    }

    #[test]
    fn test_single_level_example() {
        let p = BranchParameters {
            arm_count: 6,
            branch_levels: 1,
            arm_length: 5.0,
            branch_length_ratio: 0.6,
            ..Default::default()
        };
        let segments = generate(&p).unwrap();
        assert_eq!(segments.len(), 18);

        let mains = segments.iter().filter(|s| s.depth() == 0).count();
        assert_eq!(mains, 6);

        let children: Vec<_> = segments.iter().filter(|s| s.depth() == 1).collect();
        assert_eq!(children.len(), 12);
        for c in &children {
            assert!((c.length() - 3.0).abs() < EPS);
            // attached at the arm midpoint
            assert!((c.start().length() - 2.5).abs() < EPS);
        }

        // arm 0 children branch off the +X axis at -30 then +30 degrees
        let left = segments[1].direction();
        let right = segments[2].direction();
        let angle = 30f32.to_radians();
        assert!(left.approx_eq(&Vec3::new(angle.cos(), -angle.sin(), 0.0), EPS));
        assert!(right.approx_eq(&Vec3::new(angle.cos(), angle.sin(), 0.0), EPS));
    }

    #[test]
    fn test_grandchildren_attach_at_thirds() {
        let segments = generate(&params(1, 2)).unwrap();
        // pre-order: [main, child, 4 grandchildren, child, 4 grandchildren]
        for parent_idx in [1, 6] {
            let parent = segments[parent_idx];
            assert_eq!(parent.depth(), 1);
            let grandchildren = &segments[parent_idx + 1..parent_idx + 5];

            let expected = [1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0];
            for (g, t) in grandchildren.iter().zip(expected) {
                assert_eq!(g.depth(), 2);
                assert!(g.start().approx_eq(&parent.point_at(t), EPS), "parent {} t {}", parent_idx, t);
            }
        }
    }

    #[test]
    fn test_max_arm_count_generates() {
        let p = params(crate::config::MAX_ARM_COUNT, 1);
        assert_eq!(generate(&p).unwrap().len(), 64 * 3);
        assert!(generate(&params(u32::MAX, 6)).is_err());
    }

    #[test]
    fn test_preorder_within_arm() {
        let segments = generate(&params(1, 2)).unwrap();
        let depths: Vec<_> = segments.iter().map(|s| s.depth()).collect();
        // main, then each depth-1 child followed by its four grandchildren
        assert_eq!(depths, vec![0, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn test_rotational_symmetry() {
        let p = params(6, 2);
        let segments = generate(&p).unwrap();
        let per_arm = segments_per_arm(p.branch_levels);
        let arms: Vec<_> = segments.chunks(per_arm).collect();
        assert_eq!(arms.len(), 6);

        for i in 0..arms.len() {
            for j in 0..arms.len() {
                let degrees = (j as f32 - i as f32) * p.arm_spacing_degrees();
                let rotation = AxisRotation::from_degrees(Vec3::Z, degrees);
                for (a, b) in arms[i].iter().zip(arms[j]) {
                    assert!(a.rotated(&rotation).approx_eq(b, 1e-3), "arm {} -> {}", i, j);
                }
            }
        }
    }

    #[test]
    fn test_snowflake_is_flat() {
        for s in generate(&params(6, 3)).unwrap() {
            assert!(s.start().z.abs() < EPS);
            assert!(s.end().z.abs() < EPS);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = params(5, 3).with_branch_angle(41.0);
        assert_eq!(generate(&p).unwrap(), generate(&p).unwrap());
    }

    #[test]
    fn test_zero_angle_is_collinear() {
        let p = params(3, 2).with_branch_angle(0.0);
        let segments = generate(&p).unwrap();
        let per_arm = segments_per_arm(2);
        for arm in segments.chunks(per_arm) {
            let main = arm[0].direction();
            for s in arm {
                assert!(s.direction().approx_eq(&main, EPS));
            }
        }
    }

    #[test]
    fn test_invalid_params_fail_before_generation() {
        assert!(generate(&params(0, 1)).is_err());
        let p = BranchParameters { arm_length: 0.0, ..Default::default() };
        assert!(matches!(generate(&p), Err(ConfigError::NotPositive { .. })));
        assert!(SnowflakeGenerator::new(BranchParameters { arm_length: -2.0, ..Default::default() }).is_err());
    }

    #[test]
    fn test_build_includes_hub() {
        let generator = SnowflakeGenerator::new(BranchParameters::default()).unwrap();
        let flake = generator.build();
        assert_eq!(flake.segments().len(), 6 * segments_per_arm(2));
        assert!((flake.hub().radius - 0.16).abs() < EPS);
    }

    #[test]
    #[traced_test]
    fn test_generation_is_logged() {
        generate(&params(4, 1)).unwrap();
        assert!(logs_contain("generated snowflake segments"));
        assert!(logs_contain("total=12"));
    }
}
