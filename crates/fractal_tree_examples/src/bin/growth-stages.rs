use fractal_tree::prelude::*;
use fractal_tree_examples::{init_tracing, render_tree_to_png, RenderConfig};
use glam::Vec2;

const MAX_LEVEL: f32 = 8.0;
const BASE_LENGTH: f32 = 120.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let generator = BranchGenerator::new();
    let leaves = LeafGeometryBuilder::new();

    // Fix the view to the fully grown tree so the stages are comparable.
    let full = generator.generate(&params(MAX_LEVEL))?;
    let view = full
        .bounds()
        .map(|b| b.expand(full.max_leaf_size() * 1.2 + 1.0))
        .ok_or_else(|| anyhow::anyhow!("fully grown tree is empty"))?;
    let config = RenderConfig::new((800, 800)).with_view(view);

    for level in [1.0, 2.5, 3.0, 4.75, 6.5, MAX_LEVEL] {
        let tree = generator.generate(&params(level))?;
        render_tree_to_png(
            &tree,
            &leaves,
            &config,
            format!("growth-stages-level-{level:.2}.png"),
        )?;
    }

    Ok(())
}

fn params(level: f32) -> GrowthParams {
    GrowthParams::new(Vec2::ZERO, BASE_LENGTH, MAX_LEVEL).with_level(level)
}
