use std::f32::consts::PI;

use fractal_tree::prelude::*;
use glam::Vec2;
use tracing::info;

fn main() -> anyhow::Result<()> {
    fractal_tree_examples::init_tracing();

    let narrow = LeafShape::default().with_width_ratio(0.35).with_teeth(8, 0.2);
    let builders = [
        ("default", LeafGeometryBuilder::new()),
        ("narrow", LeafGeometryBuilder::try_with_shape(narrow)?),
    ];

    let mut body = String::new();
    for (row, (name, builder)) in builders.iter().enumerate() {
        for (col, angle) in [0.0, PI / 5.0, -PI / 5.0, PI].into_iter().enumerate() {
            let position = Vec2::new(60.0 + col as f32 * 120.0, 140.0 + row as f32 * 180.0);
            let leaf = LeafDescriptor::new(position, angle, 90.0);
            let geometry = builder.build(&leaf);

            let mut veins = SvgPathBuilder::new();
            for vein in &geometry.veins {
                vein.build_into(&mut veins);
            }
            body.push_str(&format!(
                "<path d=\"{}\" fill=\"#7cbf62\" stroke=\"#2f6b2c\"/>\n<path d=\"{}\" fill=\"none\" stroke=\"#2f6b2c\"/>\n",
                geometry.outline.to_svg_path_data(),
                veins.as_str()
            ));
            info!(
                shape = name,
                angle,
                curves = geometry.outline.curve_count(),
                veins = geometry.veins.len(),
                "leaf built"
            );
        }
    }

    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"480\" height=\"400\">\n{body}</svg>\n"
    );
    std::fs::write("leaf-anatomy.svg", svg)?;
    Ok(())
}
