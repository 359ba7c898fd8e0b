//! Recursive binary tree growth driven by a continuous growth level.
//!
//! Screen-space convention: y grows downward, angle 0 points straight up and
//! angles increase clockwise.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod events;
pub mod generator;
pub mod params;

/// Unit vector for a growth angle (0 = up on a y-down screen, clockwise positive).
#[inline]
pub fn growth_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// One generated tree edge.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub start: Vec2,
    pub end: Vec2,
    /// Depth from the root, 1 for the trunk.
    pub generation: u32,
}

impl Branch {
    pub fn new(start: Vec2, end: Vec2, generation: u32) -> Self {
        Self {
            start,
            end,
            generation,
        }
    }

    /// Effective (grown) length of this branch.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Normalized growth direction, or zero for a branch that has not grown yet.
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }
}

/// Leaf decoration anchored at the end of a terminal branch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafDescriptor {
    /// Anchor point, the end of the parent branch.
    pub position: Vec2,
    /// Orientation in radians, same as the parent branch.
    pub angle: f32,
    /// Nominal leaf size derived from the parent branch length.
    pub size: f32,
}

impl LeafDescriptor {
    pub fn new(position: Vec2, angle: f32, size: f32) -> Self {
        Self {
            position,
            angle,
            size,
        }
    }
}

/// Axis-aligned bounding box in screen space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_point(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn include(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Grow the box by `margin` on every side.
    pub fn expand(self, margin: f32) -> Bounds {
        Bounds {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// Output of a single generation call.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct TreeGeometry {
    /// Branches in pre-order: parent, left subtree, right subtree.
    pub branches: Vec<Branch>,
    /// Leaf descriptors in the order their branches were produced.
    pub leaves: Vec<LeafDescriptor>,
}

impl TreeGeometry {
    /// Creates an empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(branches: usize, leaves: usize) -> Self {
        Self {
            branches: Vec::with_capacity(branches),
            leaves: Vec::with_capacity(leaves),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.leaves.is_empty()
    }

    /// Deepest generation present, or 0 for an empty tree.
    pub fn max_generation(&self) -> u32 {
        self.branches
            .iter()
            .map(|b| b.generation)
            .max()
            .unwrap_or(0)
    }

    /// Branches belonging to one generation.
    pub fn generation(&self, generation: u32) -> impl Iterator<Item = &Branch> + '_ {
        self.branches
            .iter()
            .filter(move |b| b.generation == generation)
    }

    /// Bounding box of all branch endpoints, `None` for an empty tree.
    ///
    /// Leaf outlines extend past the branch ends; callers fitting a viewport should
    /// expand the result by the largest leaf size.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.branches.iter().flat_map(|b| [b.start, b.end]);
        let first = points.next()?;
        let mut bounds = Bounds::from_point(first);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Largest leaf size, 0 when there are no leaves.
    pub fn max_leaf_size(&self) -> f32 {
        self.leaves.iter().fold(0.0, |acc, l| acc.max(l.size))
    }
}
