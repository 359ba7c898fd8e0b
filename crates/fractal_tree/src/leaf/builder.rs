//! Configured leaf geometry builder.
use crate::error::Result;
use crate::leaf::path::{LeafOutline, Vein};
use crate::leaf::{outline, veins, LeafGeometry, LeafShape};
use crate::tree::{LeafDescriptor, TreeGeometry};

/// Turns [`LeafDescriptor`]s into drawable outlines and veins.
#[derive(Debug, Clone, Default)]
pub struct LeafGeometryBuilder {
    shape: LeafShape,
}

impl LeafGeometryBuilder {
    /// Creates a builder with the default leaf shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a custom shape, validating it first.
    pub fn try_with_shape(shape: LeafShape) -> Result<Self> {
        shape.validate()?;
        Ok(Self { shape })
    }

    pub fn shape(&self) -> &LeafShape {
        &self.shape
    }

    pub fn build_outline(&self, leaf: &LeafDescriptor) -> LeafOutline {
        outline::build(leaf, &self.shape)
    }

    pub fn build_veins(&self, leaf: &LeafDescriptor) -> Vec<Vein> {
        veins::build(leaf, &self.shape)
    }

    /// Outline and veins for one leaf.
    pub fn build(&self, leaf: &LeafDescriptor) -> LeafGeometry {
        LeafGeometry {
            outline: self.build_outline(leaf),
            veins: self.build_veins(leaf),
        }
    }

    /// Leaf geometry for every leaf of a generated tree, in leaf order.
    pub fn decorate(&self, tree: &TreeGeometry) -> Vec<LeafGeometry> {
        tree.leaves.iter().map(|leaf| self.build(leaf)).collect()
    }
}
