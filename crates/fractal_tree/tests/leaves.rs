use std::f32::consts::PI;

use fractal_tree::prelude::*;
use glam::Vec2;

const EPS: f32 = 1e-3;

#[test]
fn every_generated_leaf_has_a_closed_outline() {
    let tree = BranchGenerator::new()
        .generate(&GrowthParams::new(Vec2::new(150.0, 300.0), 120.0, 8.0).with_level(5.7))
        .unwrap();
    let leaves = LeafGeometryBuilder::new().decorate(&tree);
    assert_eq!(leaves.len(), tree.leaves.len());
    for (geometry, leaf) in leaves.iter().zip(&tree.leaves) {
        assert!(geometry.outline.is_closed());
        assert_eq!(geometry.outline.curve_count(), 2 * 5 + 3);
        let first = geometry.outline.first_point().unwrap();
        assert!((first - leaf.position).length() < EPS);
        assert_eq!(geometry.veins.len(), 4);
    }
}

#[test]
fn unrotated_leaf_matches_local_frame() {
    let position = Vec2::new(10.0, 20.0);
    let leaf = LeafDescriptor::new(position, 0.0, 10.0);
    let outline = build_outline(&leaf);

    let tip = outline.commands()[7].end_point().unwrap();
    assert!((tip - (position + Vec2::new(0.0, -10.0))).length() < EPS);

    let veins = build_veins(&leaf);
    assert!((veins[0].points[1] - (position + Vec2::new(0.0, -8.0))).length() < EPS);
    let first_side = &veins[1];
    assert!((first_side.points[0] - (position + Vec2::new(-3.0, -2.0))).length() < EPS);
    assert!((first_side.points[2] - (position + Vec2::new(3.0, -2.0))).length() < EPS);
}

#[test]
fn half_turn_mirrors_every_point_through_the_anchor() {
    let position = Vec2::new(-7.0, 12.0);
    let upright = LeafDescriptor::new(position, 0.0, 9.0);
    let flipped = LeafDescriptor::new(position, PI, 9.0);

    let a: Vec<Vec2> = build_outline(&upright).points().collect();
    let b: Vec<Vec2> = build_outline(&flipped).points().collect();
    assert_eq!(a.len(), b.len());
    for (p, q) in a.iter().zip(&b) {
        assert!((*q - (position * 2.0 - *p)).length() < EPS, "{p} vs {q}");
    }

    let veins_a = build_veins(&upright);
    let veins_b = build_veins(&flipped);
    for (va, vb) in veins_a.iter().zip(&veins_b) {
        for (p, q) in va.points.iter().zip(&vb.points) {
            assert!((*q - (position * 2.0 - *p)).length() < EPS);
        }
    }
}

#[test]
fn leaf_follows_its_branch_direction() {
    let angle = PI / 5.0;
    let leaf = LeafDescriptor::new(Vec2::ZERO, angle, 10.0);
    let tip = build_outline(&leaf).commands()[7].end_point().unwrap();
    assert!((tip.normalize() - growth_direction(angle)).length() < EPS);
}

#[test]
fn svg_export_starts_at_the_stem_and_closes() {
    let leaf = LeafDescriptor::new(Vec2::new(1.0, 2.0), 0.0, 4.0);
    let data = build_outline(&leaf).to_svg_path_data();
    assert!(data.starts_with("M 1 2 C "));
    assert!(data.ends_with(" Z"));
    assert_eq!(data.matches('Q').count(), 11);
    assert_eq!(data.matches('C').count(), 2);
}
