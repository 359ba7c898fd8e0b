use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use fractal_tree::prelude::*;
use glam::Vec2;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber honouring `RUST_LOG` (defaults to `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Colours used when painting a tree.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: [u8; 3],
    pub bark: [u8; 3],
    pub leaf: [u8; 3],
    pub vein: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [246, 243, 232],
            bark: [92, 64, 44],
            leaf: [86, 160, 72],
            vein: [48, 108, 44],
        }
    }
}

/// Output size, colours and stroke widths for the example renderers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub palette: Palette,
    /// Stroke width of the trunk in pixels; each generation is thinner.
    pub trunk_width_px: f32,
    /// Leaf outline flattening resolution.
    pub segments_per_curve: usize,
    /// Fixed view in world units; fitted to the tree when `None`.
    pub view: Option<Bounds>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            palette: Palette::default(),
            trunk_width_px: 12.0,
            segments_per_curve: 6,
            view: None,
        }
    }

    pub fn with_view(mut self, view: Bounds) -> Self {
        self.view = Some(view);
        self
    }

    fn stroke_width(&self, generation: u32) -> f32 {
        (self.trunk_width_px * 0.72f32.powi(generation as i32 - 1)).max(1.0)
    }
}

/// World-to-pixel mapping that keeps the aspect ratio and centres the view.
struct Viewport {
    min: Vec2,
    scale: f32,
    offset: Vec2,
}

impl Viewport {
    fn fit(view: Bounds, image_size: (u32, u32)) -> Self {
        let size = view.size().max(Vec2::splat(1e-3));
        let pixels = Vec2::new(image_size.0 as f32, image_size.1 as f32);
        let scale = (pixels.x / size.x).min(pixels.y / size.y);
        let offset = (pixels - size * scale) * 0.5;
        Self {
            min: view.min,
            scale,
            offset,
        }
    }

    fn to_pixel(&self, p: Vec2) -> Vec2 {
        (p - self.min) * self.scale + self.offset
    }
}

fn view_for(tree: &TreeGeometry, config: &RenderConfig) -> Option<Bounds> {
    config
        .view
        .or_else(|| tree.bounds().map(|b| b.expand(tree.max_leaf_size() * 1.2 + 1.0)))
}

/// Paints the tree and its decorated leaves into a PNG file.
pub fn render_tree_to_png(
    tree: &TreeGeometry,
    leaves: &LeafGeometryBuilder,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.palette.background));

    if let Some(view) = view_for(tree, config) {
        let viewport = Viewport::fit(view, config.image_size);

        for branch in &tree.branches {
            draw_segment(
                &mut img,
                viewport.to_pixel(branch.start),
                viewport.to_pixel(branch.end),
                config.stroke_width(branch.generation),
                config.palette.bark,
            );
        }

        for geometry in leaves.decorate(tree) {
            let polygon: Vec<Vec2> = geometry
                .outline
                .flatten(config.segments_per_curve)
                .into_iter()
                .map(|p| viewport.to_pixel(p))
                .collect();
            fill_polygon(&mut img, &polygon, config.palette.leaf);
            for vein in &geometry.veins {
                for pair in vein.points.windows(2) {
                    draw_segment(
                        &mut img,
                        viewport.to_pixel(pair[0]),
                        viewport.to_pixel(pair[1]),
                        1.0,
                        config.palette.vein,
                    );
                }
            }
        }
    }

    img.save(out_path)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(
        path = %out_path.display(),
        branches = tree.branches.len(),
        leaves = tree.leaves.len(),
        "wrote png"
    );
    Ok(())
}

/// Writes the tree as an SVG document in world coordinates.
pub fn render_tree_to_svg(
    tree: &TreeGeometry,
    leaves: &LeafGeometryBuilder,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let view = view_for(tree, config).unwrap_or(Bounds::from_point(Vec2::ZERO).expand(1.0));
    let size = view.size();
    let hex = |c: [u8; 3]| format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2]);
    let units_per_px = size.x.max(size.y) / config.image_size.0.max(1) as f32;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        config.image_size.0, config.image_size.1, view.min.x, view.min.y, size.x, size.y
    )?;
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        view.min.x,
        view.min.y,
        size.x,
        size.y,
        hex(config.palette.background)
    )?;
    for branch in &tree.branches {
        writeln!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            branch.start.x,
            branch.start.y,
            branch.end.x,
            branch.end.y,
            hex(config.palette.bark),
            config.stroke_width(branch.generation) * units_per_px
        )?;
    }
    for geometry in leaves.decorate(tree) {
        writeln!(
            svg,
            r#"<path d="{}" fill="{}"/>"#,
            geometry.outline.to_svg_path_data(),
            hex(config.palette.leaf)
        )?;
        let mut veins = SvgPathBuilder::new();
        for vein in &geometry.veins {
            vein.build_into(&mut veins);
        }
        writeln!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            veins.as_str(),
            hex(config.palette.vein),
            units_per_px
        )?;
    }
    svg.push_str("</svg>\n");

    std::fs::write(out_path, svg)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote svg");
    Ok(())
}

fn draw_segment(img: &mut RgbImage, a: Vec2, b: Vec2, width: f32, color: [u8; 3]) {
    let r = (width * 0.5).max(0.5);
    let lo = a.min(b) - Vec2::splat(r);
    let hi = a.max(b) + Vec2::splat(r);
    let ab = b - a;
    let len2 = ab.length_squared();

    for y in pixel_range(lo.y, hi.y, img.height()) {
        for x in pixel_range(lo.x, hi.x, img.width()) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let t = if len2 > 0.0 {
                ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            if p.distance(a + ab * t) <= r {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

/// Even-odd scanline fill of a closed polygon given in pixel space.
fn fill_polygon(img: &mut RgbImage, polygon: &[Vec2], color: [u8; 3]) {
    if polygon.len() < 3 {
        return;
    }
    let (lo, hi) = polygon
        .iter()
        .fold((polygon[0], polygon[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));

    let mut crossings = Vec::new();
    for y in pixel_range(lo.y, hi.y, img.height()) {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            if (a.y <= sy) != (b.y <= sy) {
                crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);
        // A pixel is inside when its centre lies in [left, right).
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as u32;
            let end = ((span[1] - 0.5).ceil().max(0.0) as u32).min(img.width());
            for x in start..end {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

fn pixel_range(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let start = lo.floor().max(0.0) as u32;
    let end = (hi.ceil().max(0.0) as u32).min(limit);
    start.min(end)..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_range_clips_to_image() {
        assert_eq!(pixel_range(-5.0, 3.2, 10), 0..4);
        assert_eq!(pixel_range(8.5, 20.0, 10), 8..10);
        assert_eq!(pixel_range(12.0, 20.0, 10), 10..10);
    }

    #[test]
    fn fill_polygon_paints_interior_only() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let square = [
            Vec2::new(2.0, 2.0),
            Vec2::new(8.0, 2.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(2.0, 8.0),
        ];
        fill_polygon(&mut img, &square, [255, 255, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(7, 7).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(1, 5).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(8, 5).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(9, 5).0, [0, 0, 0]);
    }

    #[test]
    fn viewport_keeps_aspect_and_centres() {
        let view = Bounds {
            min: Vec2::ZERO,
            max: Vec2::new(10.0, 20.0),
        };
        let viewport = Viewport::fit(view, (100, 100));
        assert_eq!(viewport.to_pixel(Vec2::ZERO), Vec2::new(25.0, 0.0));
        assert_eq!(viewport.to_pixel(Vec2::new(10.0, 20.0)), Vec2::new(75.0, 100.0));
    }
}
