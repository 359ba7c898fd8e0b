#![forbid(unsafe_code)]
//! fractal_tree: procedural fractal tree geometry driven by a continuous growth level.
//!
//! Modules:
//! - tree: growth parameters, recursive branch generation with partial growth, events
//! - leaf: serrated leaf outlines, vein polylines and path export
//!
//! Coordinates are screen space with y growing downward.
pub mod error;
pub mod leaf;
pub mod tree;

/// Convenient re-exports for common types. Import with `use fractal_tree::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::leaf::{
        build_outline, build_veins, rotate, LeafGeometry, LeafGeometryBuilder, LeafOutline,
        LeafShape, PathBuilder, PathCommand, SvgPathBuilder, Vein,
    };
    pub use crate::tree::events::{EventSink, FnSink, GrowthEvent, VecSink};
    pub use crate::tree::generator::{generate, BranchGenerator};
    pub use crate::tree::params::{GrowthConstants, GrowthParams, GrowthState};
    pub use crate::tree::{growth_direction, Bounds, Branch, LeafDescriptor, TreeGeometry};
}
