//! Leaf vein synthesis: a midrib plus tapering side veins.
use glam::Vec2;

use crate::leaf::path::Vein;
use crate::leaf::{effective_size, rotate, LeafShape};
use crate::tree::LeafDescriptor;

/// Builds the veins of `leaf`: the midrib first, then side veins from stem to tip.
pub fn build(leaf: &LeafDescriptor, shape: &LeafShape) -> Vec<Vein> {
    local_veins(effective_size(leaf), shape)
        .into_iter()
        .map(|vein| {
            Vein::new(
                vein.points
                    .into_iter()
                    .map(|p| rotate(p, leaf.angle, leaf.position))
                    .collect(),
            )
        })
        .collect()
}

/// Veins in the leaf's local frame.
///
/// Side vein `i` of `n` crosses the midrib at `i / (n + 1)` of its length and its
/// half width shrinks linearly towards the tip.
pub fn local_veins(size: f32, shape: &LeafShape) -> Vec<Vein> {
    let length = size * shape.vein_length_ratio;
    let n = shape.side_vein_count;

    let mut veins = Vec::with_capacity(n as usize + 1);
    veins.push(Vein::new(vec![Vec2::ZERO, Vec2::new(0.0, -length)]));
    for i in 1..=n {
        let t = i as f32 / (n + 1) as f32;
        let y = -length * t;
        let half_width = size * shape.side_vein_width_ratio * (1.0 - t);
        veins.push(Vein::new(vec![
            Vec2::new(-half_width, y),
            Vec2::new(0.0, y),
            Vec2::new(half_width, y),
        ]));
    }
    veins
}
