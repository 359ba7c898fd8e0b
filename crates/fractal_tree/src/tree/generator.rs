//! Recursive branch generation with partial growth of the newest generation.
use glam::Vec2;
use tracing::debug;

use crate::error::Result;
use crate::tree::events::{EventSink, GrowthEvent};
use crate::tree::params::{GrowthConstants, GrowthParams, GrowthState};
use crate::tree::{growth_direction, Branch, LeafDescriptor, TreeGeometry};

/// Builds tree geometry from a continuous growth level.
///
/// Every generation below the newest is fully grown. The newest generation
/// (`floor(level)`) is grown to `level - floor(level)` of its nominal length,
/// except when it is the trunk, which is always fully grown. The whole tree is
/// additionally scaled by `level / max_level`.
#[derive(Debug, Clone, Default)]
pub struct BranchGenerator {
    constants: GrowthConstants,
}

impl BranchGenerator {
    /// Creates a generator with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom constants, validating them first.
    pub fn try_with_constants(constants: GrowthConstants) -> Result<Self> {
        constants.validate()?;
        Ok(Self { constants })
    }

    pub fn constants(&self) -> &GrowthConstants {
        &self.constants
    }

    /// Generates the tree for `params`.
    pub fn generate(&self, params: &GrowthParams) -> Result<TreeGeometry> {
        self.generate_with_events(params, &mut ())
    }

    /// Generates the tree for `params`, reporting progress to `sink`.
    ///
    /// Nothing is sent to the sink when the parameters are rejected.
    pub fn generate_with_events(
        &self,
        params: &GrowthParams,
        sink: &mut dyn EventSink,
    ) -> Result<TreeGeometry> {
        params.validate()?;
        let state = params.state()?;

        sink.send(GrowthEvent::Started {
            params: *params,
            state,
        });
        if state.level != params.level {
            debug!(
                requested = params.level,
                clamped = state.level,
                "growth level clamped"
            );
            sink.send(GrowthEvent::Adjusted {
                message: format!(
                    "level {} clamped to {} (max_level {})",
                    params.level, state.level, params.max_level
                ),
            });
        }
        if state.is_capped() {
            debug!(
                level = state.level,
                generations = state.generations,
                "branching depth capped"
            );
            sink.send(GrowthEvent::Adjusted {
                message: format!(
                    "branching stopped at {} generations (level {})",
                    state.generations, state.level
                ),
            });
        }

        let mut walk = Walk::new(&self.constants, state, sink);
        walk.grow(
            params.origin,
            params.base_length * state.scale,
            params.initial_angle,
            state.generations,
            1.0,
        );
        let geometry = walk.geometry;

        debug!(
            level = state.level,
            generations = state.generations,
            branches = geometry.branches.len(),
            leaves = geometry.leaves.len(),
            "tree generated"
        );
        sink.send(GrowthEvent::Finished {
            branch_count: geometry.branches.len(),
            leaf_count: geometry.leaves.len(),
        });

        Ok(geometry)
    }
}

/// Generates a tree with the default constants.
pub fn generate(
    origin: Vec2,
    base_length: f32,
    initial_angle: f32,
    level: f32,
    max_level: f32,
) -> Result<TreeGeometry> {
    let params = GrowthParams::new(origin, base_length, max_level)
        .with_initial_angle(initial_angle)
        .with_level(level);
    BranchGenerator::new().generate(&params)
}

/// Number of branches in a full binary tree with `generations` levels.
pub fn branch_count(generations: u32) -> usize {
    if generations == 0 {
        return 0;
    }
    (1usize << generations) - 1
}

struct Walk<'a> {
    constants: &'a GrowthConstants,
    root_remaining: u32,
    fraction: f32,
    geometry: TreeGeometry,
    sink: &'a mut dyn EventSink,
}

impl<'a> Walk<'a> {
    fn new(
        constants: &'a GrowthConstants,
        state: GrowthState,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        let branches = branch_count(state.generations);
        let leaf_depth = constants.leaf_generation_threshold.min(state.generations);
        let leaves = branches - branch_count(state.generations - leaf_depth);
        Self {
            constants,
            root_remaining: state.generations,
            fraction: state.fraction,
            geometry: TreeGeometry::with_capacity(branches, leaves),
            sink,
        }
    }

    fn grow(&mut self, start: Vec2, length: f32, angle: f32, remaining: u32, progress: f32) {
        if remaining == 0 {
            return;
        }

        let end = start + growth_direction(angle) * (length * progress);
        let branch = Branch::new(start, end, self.root_remaining - remaining + 1);
        self.geometry.branches.push(branch);
        self.sink.send(GrowthEvent::BranchGrown { branch, progress });

        if remaining <= self.constants.leaf_generation_threshold {
            let leaf = LeafDescriptor::new(end, angle, length * self.constants.leaf_size_factor);
            self.geometry.leaves.push(leaf);
            self.sink.send(GrowthEvent::LeafAttached { leaf });
        }

        // Children with one remaining level form the newest generation.
        let child_progress = if remaining == 2 { self.fraction } else { 1.0 };
        let child_length = length * self.constants.length_decay;
        let step = self.constants.angle_increment;
        self.grow(end, child_length, angle + step, remaining - 1, child_progress);
        self.grow(end, child_length, angle - step, remaining - 1, child_progress);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::error::Error;
    use crate::tree::events::VecSink;

    const EPS: f32 = 1e-4;

    fn params(level: f32) -> GrowthParams {
        GrowthParams::new(Vec2::ZERO, 120.0, 8.0).with_level(level)
    }

    #[test]
    fn level_zero_produces_no_tree() {
        let geometry = BranchGenerator::new().generate(&params(0.0)).unwrap();
        assert!(geometry.branches.is_empty());
        assert!(geometry.leaves.is_empty());
    }

    #[test]
    fn fractional_level_below_one_produces_no_tree() {
        let geometry = BranchGenerator::new().generate(&params(0.99)).unwrap();
        assert!(geometry.is_empty());
    }

    #[test]
    fn level_one_produces_fully_grown_trunk_with_leaf() {
        let geometry = BranchGenerator::new().generate(&params(1.0)).unwrap();
        assert_eq!(geometry.branches.len(), 1);
        assert_eq!(geometry.leaves.len(), 1);

        let trunk = geometry.branches[0];
        assert_eq!(trunk.generation, 1);
        assert_eq!(trunk.start, Vec2::ZERO);
        assert!((trunk.end - Vec2::new(0.0, -15.0)).length() < EPS);

        let leaf = geometry.leaves[0];
        assert_eq!(leaf.position, trunk.end);
        assert_eq!(leaf.angle, 0.0);
        assert!((leaf.size - 7.5).abs() < EPS);
    }

    #[test]
    fn level_two_and_a_half_half_grows_newest_generation() {
        let geometry = BranchGenerator::new().generate(&params(2.5)).unwrap();
        assert_eq!(geometry.branches.len(), 3);

        let trunk_length = 120.0 * 2.5 / 8.0;
        let trunk = geometry.branches[0];
        assert_eq!(trunk.generation, 1);
        assert!((trunk.length() - trunk_length).abs() < EPS);

        for child in geometry.generation(2) {
            assert_eq!(child.start, trunk.end);
            assert!((child.length() - trunk_length * 0.7 * 0.5).abs() < EPS);
        }
        assert_eq!(geometry.generation(2).count(), 2);
    }

    #[test]
    fn first_child_turns_clockwise() {
        let geometry = BranchGenerator::new().generate(&params(2.0)).unwrap();
        let geometry_grown = BranchGenerator::new().generate(&params(2.9)).unwrap();
        let left = geometry_grown.branches[1];
        let right = geometry_grown.branches[2];
        // Positive angles turn clockwise, which is to the right on screen.
        assert!(left.end.x > left.start.x);
        assert!(right.end.x < right.start.x);
        assert!((left.direction() - growth_direction(PI / 5.0)).length() < EPS);
        // At an exact integer level the newest generation has not started growing.
        assert_eq!(geometry.branches[1].length(), 0.0);
    }

    #[test]
    fn leaves_use_nominal_length() {
        let geometry = BranchGenerator::new().generate(&params(2.0)).unwrap();
        assert_eq!(geometry.leaves.len(), 3);
        let trunk_length = 120.0 * 2.0 / 8.0;
        assert!((geometry.leaves[0].size - trunk_length * 0.5).abs() < EPS);
        assert!((geometry.leaves[1].size - trunk_length * 0.7 * 0.5).abs() < EPS);
    }

    #[test]
    fn level_above_max_is_clamped() {
        let clamped = BranchGenerator::new().generate(&params(100.0)).unwrap();
        let at_max = BranchGenerator::new().generate(&params(8.0)).unwrap();
        assert_eq!(clamped, at_max);
        assert_eq!(clamped.branches.len(), 255);
    }

    #[test]
    fn negative_level_is_clamped_to_empty() {
        let geometry = BranchGenerator::new().generate(&params(-2.0)).unwrap();
        assert!(geometry.is_empty());
    }

    #[test]
    fn large_max_level_only_scales_the_tree() {
        let geometry = generate(Vec2::ZERO, 120.0, 0.0, 3.0, 25.0).unwrap();
        assert_eq!(geometry.branches.len(), 7);
        assert_eq!(geometry.max_generation(), 3);
        assert!((geometry.branches[0].length() - 120.0 * 3.0 / 25.0).abs() < EPS);
    }

    #[test]
    fn invalid_max_level_is_rejected() {
        let err = generate(Vec2::ZERO, 120.0, 0.0, 3.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn invalid_constants_are_rejected() {
        let constants = GrowthConstants::default().with_leaf_size_factor(f32::NAN);
        assert!(BranchGenerator::try_with_constants(constants).is_err());
    }

    #[test]
    fn custom_threshold_changes_leaf_count() {
        let constants = GrowthConstants::default().with_leaf_generation_threshold(1);
        let generator = BranchGenerator::try_with_constants(constants).unwrap();
        let geometry = generator.generate(&params(4.0)).unwrap();
        assert_eq!(geometry.leaves.len(), 8);
    }

    #[test]
    fn initial_angle_rotates_trunk() {
        let geometry = generate(Vec2::new(10.0, 10.0), 80.0, PI / 2.0, 1.0, 4.0).unwrap();
        let trunk = geometry.branches[0];
        assert!((trunk.end - Vec2::new(30.0, 10.0)).length() < EPS);
        assert_eq!(geometry.leaves[0].angle, PI / 2.0);
    }

    #[test]
    fn events_mirror_geometry() {
        let mut sink = VecSink::new();
        let geometry = BranchGenerator::new()
            .generate_with_events(&params(3.5), &mut sink)
            .unwrap();
        let events = sink.into_inner();

        assert!(matches!(events.first(), Some(GrowthEvent::Started { .. })));
        assert_eq!(
            events.last(),
            Some(&GrowthEvent::Finished {
                branch_count: geometry.branches.len(),
                leaf_count: geometry.leaves.len(),
            })
        );

        let grown: Vec<Branch> = events
            .iter()
            .filter_map(|e| match e {
                GrowthEvent::BranchGrown { branch, .. } => Some(*branch),
                _ => None,
            })
            .collect();
        assert_eq!(grown, geometry.branches);

        let newest_progress: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                GrowthEvent::BranchGrown { branch, progress } if branch.generation == 3 => {
                    Some(*progress)
                }
                _ => None,
            })
            .collect();
        assert_eq!(newest_progress, vec![0.5; 4]);
    }

    #[test]
    fn clamping_is_reported_as_adjustment() {
        let mut sink = VecSink::new();
        BranchGenerator::new()
            .generate_with_events(&params(9.0), &mut sink)
            .unwrap();
        assert!(sink
            .as_slice()
            .iter()
            .any(|e| matches!(e, GrowthEvent::Adjusted { .. })));
    }

    #[test]
    fn rejected_parameters_emit_nothing() {
        let mut sink = VecSink::new();
        let bad = GrowthParams::new(Vec2::ZERO, -5.0, 8.0).with_level(2.0);
        assert!(BranchGenerator::new()
            .generate_with_events(&bad, &mut sink)
            .is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn branch_count_matches_full_binary_tree() {
        assert_eq!(branch_count(0), 0);
        assert_eq!(branch_count(1), 1);
        assert_eq!(branch_count(4), 15);
    }
}
