//! Growth parameters, algorithm constants and the normalized growth state.
use std::f32::consts::PI;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_ANGLE_INCREMENT: f32 = PI / 5.0;
pub const DEFAULT_LENGTH_DECAY: f32 = 0.7;
pub const DEFAULT_LEAF_GENERATION_THRESHOLD: u32 = 2;
pub const DEFAULT_LEAF_SIZE_FACTOR: f32 = 0.5;

/// Deepest generation ever produced; a full tree at this depth has `2^20 - 1` branches.
pub const MAX_GENERATIONS: u32 = 20;

/// Tunable constants of the branching algorithm.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct GrowthConstants {
    /// Angle added (left child) or subtracted (right child) per generation, in radians.
    pub angle_increment: f32,
    /// Ratio of a child's nominal length to its parent's.
    pub length_decay: f32,
    /// Leaves are attached to branches whose remaining depth is at most this value.
    pub leaf_generation_threshold: u32,
    /// Leaf size relative to the parent branch's nominal length.
    pub leaf_size_factor: f32,
}

impl Default for GrowthConstants {
    fn default() -> Self {
        Self {
            angle_increment: DEFAULT_ANGLE_INCREMENT,
            length_decay: DEFAULT_LENGTH_DECAY,
            leaf_generation_threshold: DEFAULT_LEAF_GENERATION_THRESHOLD,
            leaf_size_factor: DEFAULT_LEAF_SIZE_FACTOR,
        }
    }
}

impl GrowthConstants {
    pub fn with_angle_increment(mut self, angle_increment: f32) -> Self {
        self.angle_increment = angle_increment;
        self
    }

    pub fn with_length_decay(mut self, length_decay: f32) -> Self {
        self.length_decay = length_decay;
        self
    }

    pub fn with_leaf_generation_threshold(mut self, threshold: u32) -> Self {
        self.leaf_generation_threshold = threshold;
        self
    }

    pub fn with_leaf_size_factor(mut self, leaf_size_factor: f32) -> Self {
        self.leaf_size_factor = leaf_size_factor;
        self
    }

    /// Validates the constants, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.angle_increment.is_finite() {
            return Err(Error::InvalidConfig(
                "angle_increment must be finite".into(),
            ));
        }
        if !self.length_decay.is_finite() || self.length_decay < 0.0 {
            return Err(Error::InvalidConfig(
                "length_decay must be finite and >= 0".into(),
            ));
        }
        if !self.leaf_size_factor.is_finite() || self.leaf_size_factor < 0.0 {
            return Err(Error::InvalidConfig(
                "leaf_size_factor must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// Input to a single tree generation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct GrowthParams {
    /// Base of the trunk in screen space.
    pub origin: Vec2,
    /// Trunk length at `level == max_level`.
    pub base_length: f32,
    /// Direction of the trunk in radians, 0 = up.
    pub initial_angle: f32,
    /// Continuous growth value; clamped to `[0, max_level]` before use.
    pub level: f32,
    /// Upper bound of `level`, also the level at which the trunk reaches `base_length`.
    pub max_level: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            base_length: 120.0,
            initial_angle: 0.0,
            level: 0.0,
            max_level: 8.0,
        }
    }
}

impl GrowthParams {
    /// Creates parameters for an ungrown tree (level 0) pointing straight up.
    pub fn new(origin: impl Into<Vec2>, base_length: f32, max_level: f32) -> Self {
        Self {
            origin: origin.into(),
            base_length,
            max_level,
            ..Default::default()
        }
    }

    /// Sets the growth level.
    pub fn with_level(mut self, level: f32) -> Self {
        self.level = level;
        self
    }

    /// Sets the trunk direction.
    pub fn with_initial_angle(mut self, initial_angle: f32) -> Self {
        self.initial_angle = initial_angle;
        self
    }

    /// Sets the trunk base.
    pub fn with_origin(mut self, origin: impl Into<Vec2>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Validates the parameters, returning an error if invalid.
    ///
    /// An out-of-range `level` is not an error, it is clamped during generation.
    pub fn validate(&self) -> Result<()> {
        check_level_range(self.level, self.max_level)?;
        if !self.base_length.is_finite() || self.base_length < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "base_length must be finite and >= 0, got {}",
                self.base_length
            )));
        }
        if !self.origin.is_finite() {
            return Err(Error::InvalidConfig("origin must be finite".into()));
        }
        if !self.initial_angle.is_finite() {
            return Err(Error::InvalidConfig("initial_angle must be finite".into()));
        }
        Ok(())
    }

    /// Normalized view of `level` against `max_level`.
    pub fn state(&self) -> Result<GrowthState> {
        GrowthState::from_level(self.level, self.max_level)
    }
}

fn check_level_range(level: f32, max_level: f32) -> Result<()> {
    if !max_level.is_finite() || max_level <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "max_level must be finite and > 0, got {max_level}"
        )));
    }
    if level.is_nan() {
        return Err(Error::InvalidConfig("level must not be NaN".into()));
    }
    Ok(())
}

/// A growth level split into completed generations and progress of the newest one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthState {
    /// Level clamped into `[0, max_level]`.
    pub level: f32,
    /// Number of generations present, `floor(level)` capped at [`MAX_GENERATIONS`].
    pub generations: u32,
    /// Progress of the newest generation, `level - floor(level)`.
    pub fraction: f32,
    /// Trunk length relative to `base_length`, `level / max_level`.
    pub scale: f32,
}

impl GrowthState {
    /// Splits `level`, clamped into `[0, max_level]`, into whole generations and a fraction.
    ///
    /// Fails when `max_level` is not a positive finite number or `level` is NaN.
    /// Past [`MAX_GENERATIONS`] the tree stops branching but keeps scaling with `level`.
    pub fn from_level(level: f32, max_level: f32) -> Result<Self> {
        check_level_range(level, max_level)?;
        let level = level.clamp(0.0, max_level);
        let branching = level.min(MAX_GENERATIONS as f32);
        let whole = branching.floor();
        Ok(Self {
            level,
            generations: whole as u32,
            fraction: branching - whole,
            scale: level / max_level,
        })
    }

    /// True when branching stopped at [`MAX_GENERATIONS`] before reaching `level`.
    pub fn is_capped(&self) -> bool {
        self.level > MAX_GENERATIONS as f32
    }

    /// True when no branch exists at this level.
    pub fn is_bare(&self) -> bool {
        self.generations == 0
    }
}
