//! Leaf decoration: serrated outlines and vein polylines for [`LeafDescriptor`]s.
//!
//! Shapes are authored in a local frame with the stem at the origin and the tip
//! towards negative y, then rotated by the leaf angle around the leaf position.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tree::LeafDescriptor;

pub mod builder;
pub mod outline;
pub mod path;
pub mod veins;

pub use builder::LeafGeometryBuilder;
pub use path::{LeafOutline, PathBuilder, PathCommand, SvgPathBuilder, Vein};

pub const DEFAULT_WIDTH_RATIO: f32 = 0.6;
pub const DEFAULT_TOOTH_COUNT: u32 = 5;
pub const DEFAULT_TOOTH_DEPTH_RATIO: f32 = 0.15;
pub const DEFAULT_VEIN_LENGTH_RATIO: f32 = 0.8;
pub const DEFAULT_SIDE_VEIN_COUNT: u32 = 3;
pub const DEFAULT_SIDE_VEIN_WIDTH_RATIO: f32 = 0.4;

/// Proportions of the synthesized leaf, relative to the leaf size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct LeafShape {
    /// Blade width relative to size.
    pub width_ratio: f32,
    /// Serration teeth per margin.
    pub tooth_count: u32,
    /// Notch depth relative to the blade width.
    pub tooth_depth_ratio: f32,
    /// Main vein length relative to size.
    pub vein_length_ratio: f32,
    /// Side vein pairs along the main vein.
    pub side_vein_count: u32,
    /// Half width of the lowest side vein relative to size, before tapering.
    pub side_vein_width_ratio: f32,
}

impl Default for LeafShape {
    fn default() -> Self {
        Self {
            width_ratio: DEFAULT_WIDTH_RATIO,
            tooth_count: DEFAULT_TOOTH_COUNT,
            tooth_depth_ratio: DEFAULT_TOOTH_DEPTH_RATIO,
            vein_length_ratio: DEFAULT_VEIN_LENGTH_RATIO,
            side_vein_count: DEFAULT_SIDE_VEIN_COUNT,
            side_vein_width_ratio: DEFAULT_SIDE_VEIN_WIDTH_RATIO,
        }
    }
}

impl LeafShape {
    pub fn with_width_ratio(mut self, width_ratio: f32) -> Self {
        self.width_ratio = width_ratio;
        self
    }

    pub fn with_teeth(mut self, tooth_count: u32, tooth_depth_ratio: f32) -> Self {
        self.tooth_count = tooth_count;
        self.tooth_depth_ratio = tooth_depth_ratio;
        self
    }

    pub fn with_veins(mut self, side_vein_count: u32, side_vein_width_ratio: f32) -> Self {
        self.side_vein_count = side_vein_count;
        self.side_vein_width_ratio = side_vein_width_ratio;
        self
    }

    pub fn with_vein_length_ratio(mut self, vein_length_ratio: f32) -> Self {
        self.vein_length_ratio = vein_length_ratio;
        self
    }

    /// Validates the shape, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("width_ratio", self.width_ratio),
            ("tooth_depth_ratio", self.tooth_depth_ratio),
            ("vein_length_ratio", self.vein_length_ratio),
            ("side_vein_width_ratio", self.side_vein_width_ratio),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Outline and veins of one leaf, ready for painting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LeafGeometry {
    pub outline: LeafOutline,
    pub veins: Vec<Vein>,
}

/// Rotates a point from the leaf's local frame by `angle` and moves it to `anchor`.
#[inline]
pub fn rotate(local: Vec2, angle: f32, anchor: Vec2) -> Vec2 {
    anchor + Vec2::from_angle(angle).rotate(local)
}

/// Builds the outline of `leaf` with the default shape.
pub fn build_outline(leaf: &LeafDescriptor) -> LeafOutline {
    outline::build(leaf, &LeafShape::default())
}

/// Builds the veins of `leaf` with the default shape.
pub fn build_veins(leaf: &LeafDescriptor) -> Vec<Vein> {
    veins::build(leaf, &LeafShape::default())
}

/// Leaf size usable for geometry; non-positive and NaN sizes collapse to 0.
pub(crate) fn effective_size(leaf: &LeafDescriptor) -> f32 {
    if leaf.size > 0.0 {
        leaf.size
    } else {
        if leaf.size != 0.0 {
            debug!(size = leaf.size, "degenerate leaf size treated as 0");
        }
        0.0
    }
}
