//! Growth events reported by
//! [`crate::tree::generator::BranchGenerator::generate_with_events`] and the sinks that
//! receive them.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tree::params::{GrowthParams, GrowthState};
use crate::tree::{Branch, LeafDescriptor};

/// Describes events emitted while growing a tree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthEvent {
    /// Emitted once the parameters are validated, before any branch is produced.
    Started {
        /// Parameters as supplied by the caller.
        params: GrowthParams,
        /// Normalized growth state derived from the parameters.
        state: GrowthState,
    },

    /// Emitted for every branch, in output order.
    BranchGrown {
        /// The produced branch.
        branch: Branch,
        /// Fraction of the nominal length this branch has grown, in [0, 1].
        progress: f32,
    },

    /// Emitted for every leaf, directly after the branch carrying it.
    LeafAttached {
        /// The produced leaf.
        leaf: LeafDescriptor,
    },

    /// Emitted when generation completes.
    Finished {
        /// Number of branches produced.
        branch_count: usize,
        /// Number of leaves produced.
        leaf_count: usize,
    },

    /// Input was corrected instead of rejected.
    Adjusted {
        /// Human-readable message.
        message: String,
    },
}

/// Receives [`GrowthEvent`]s in emission order.
pub trait EventSink {
    fn send(&mut self, event: GrowthEvent);
}

/// Discards every event; used by [`crate::tree::generator::BranchGenerator::generate`].
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GrowthEvent) {}
}

/// Forwards each event to a closure.
pub struct FnSink<F: FnMut(GrowthEvent)>(F);

impl<F: FnMut(GrowthEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(GrowthEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: GrowthEvent) {
        (self.0)(event);
    }
}

/// Records every event of a generation.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<GrowthEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[GrowthEvent] {
        &self.events
    }

    pub fn into_inner(self) -> Vec<GrowthEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Grown branches paired with their progress, in output order.
    pub fn branches(&self) -> impl Iterator<Item = (&Branch, f32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            GrowthEvent::BranchGrown { branch, progress } => Some((branch, *progress)),
            _ => None,
        })
    }

    /// Messages of every input correction reported during the run.
    pub fn adjustments(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|e| match e {
            GrowthEvent::Adjusted { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GrowthEvent) {
        self.events.push(event);
    }
}
