use std::collections::BTreeMap;

use fractal_tree::prelude::*;
use fractal_tree_examples::{init_tracing, render_tree_to_svg, RenderConfig};
use glam::Vec2;

/// Usage: `growth-report [level] [max_level]`
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let level: f32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5.4);
    let max_level: f32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(8.0);

    let params = GrowthParams::new(Vec2::new(0.0, 0.0), 120.0, max_level).with_level(level);

    let mut per_generation: BTreeMap<u32, (usize, f32, f32)> = BTreeMap::new();
    let mut adjustments = Vec::new();
    let mut sink = FnSink::new(|event| match event {
        GrowthEvent::BranchGrown { branch, progress } => {
            let entry = per_generation
                .entry(branch.generation)
                .or_insert((0, 0.0, progress));
            entry.0 += 1;
            entry.1 += branch.length();
        }
        GrowthEvent::Adjusted { message } => adjustments.push(message),
        _ => {}
    });

    let tree = BranchGenerator::new().generate_with_events(&params, &mut sink)?;
    let state = params.state()?;

    println!(
        "level {:.2} of {:.0}: {} generations, newest at {:.0}%",
        state.level,
        max_level,
        state.generations,
        state.fraction * 100.0
    );
    for message in &adjustments {
        println!("  note: {message}");
    }
    for (generation, (count, total, progress)) in &per_generation {
        println!(
            "  generation {generation}: {count} branches, avg length {:.2}, progress {:.2}",
            total / *count as f32,
            progress
        );
    }
    println!(
        "{} branches, {} leaves",
        tree.branches.len(),
        tree.leaves.len()
    );

    render_tree_to_svg(
        &tree,
        &LeafGeometryBuilder::new(),
        &RenderConfig::new((800, 800)),
        "growth-report.svg",
    )?;
    Ok(())
}
