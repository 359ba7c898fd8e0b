//! Serrated leaf outline synthesis.
use std::f32::consts::PI;

use glam::Vec2;

use crate::leaf::path::{LeafOutline, PathCommand};
use crate::leaf::{effective_size, rotate, LeafShape};
use crate::tree::LeafDescriptor;

/// Blade curve control points for the left margin, as (width, height) fractions.
/// The right margin mirrors them.
const BLADE_CONTROLS: [(f32, f32); 3] = [(0.3, 0.2), (1.0, 0.5), (0.7, 0.8)];

/// Builds the closed outline of `leaf`.
pub fn build(leaf: &LeafDescriptor, shape: &LeafShape) -> LeafOutline {
    let commands = local_commands(effective_size(leaf), shape)
        .into_iter()
        .map(|c| c.map_points(|p| rotate(p, leaf.angle, leaf.position)))
        .collect();
    LeafOutline::from_commands(commands)
}

/// Outline commands in the leaf's local frame: stem at the origin, tip at `(0, -size)`.
///
/// Path order: stem, left blade curve, left teeth from stem to tip, tip, right teeth
/// from tip to stem, right blade curve back to the stem, close.
pub fn local_commands(size: f32, shape: &LeafShape) -> Vec<PathCommand> {
    let width = size * shape.width_ratio;
    let height = size;
    let depth = width * shape.tooth_depth_ratio;
    let teeth = shape.tooth_count;

    let base = Vec2::ZERO;
    let tip = Vec2::new(0.0, -height);
    let control = |side: f32, (fx, fy): (f32, f32)| Vec2::new(side * width * fx, -height * fy);

    // Margin point on side `side` (-1 left, 1 right) at `progress` along the blade,
    // paired with its notch pulled `depth` towards the midrib.
    let tooth = |side: f32, i: u32| {
        let progress = i as f32 / (teeth + 1) as f32;
        let half_width = width * (PI * progress).sin();
        let margin = Vec2::new(side * half_width, -height * progress);
        let notch = margin - Vec2::new(side * depth, 0.0);
        PathCommand::QuadTo {
            ctrl: notch,
            to: margin,
        }
    };

    let mut commands = Vec::with_capacity(teeth as usize * 2 + 5);
    commands.push(PathCommand::MoveTo(base));
    commands.push(PathCommand::CubicTo {
        ctrl1: control(-1.0, BLADE_CONTROLS[0]),
        ctrl2: control(-1.0, BLADE_CONTROLS[1]),
        to: control(-1.0, BLADE_CONTROLS[2]),
    });
    commands.extend((1..=teeth).map(|i| tooth(-1.0, i)));
    commands.push(PathCommand::QuadTo { ctrl: tip, to: tip });
    commands.extend((1..=teeth).rev().map(|i| tooth(1.0, i)));
    commands.push(PathCommand::CubicTo {
        ctrl1: control(1.0, BLADE_CONTROLS[1]),
        ctrl2: control(1.0, BLADE_CONTROLS[0]),
        to: base,
    });
    commands.push(PathCommand::Close);
    commands
}
