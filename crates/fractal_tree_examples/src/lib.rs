#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_tree_to_png, render_tree_to_svg, Palette, RenderConfig};
