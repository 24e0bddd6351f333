//! Pack Size Optimizer Library
//!
//! Splits an order quantity into packs of fixed sizes, shipping at least the
//! requested amount with the least surplus and, for equal surplus, the fewest
//! packs.

pub mod format;
pub mod greedy;
pub mod optimizer;
pub mod packs;
pub mod persistence;
pub mod prefill;
pub mod registry;
pub mod service;
mod solver;

use packs::{PackSize, Packs, Target};

/// A way of turning an order quantity into packs.
///
/// Implementations are total: any target and any size list produce a packing,
/// empty for a non-positive target or when no positive sizes are given.
pub trait PackingStrategy: Send + Sync {
    /// Short identifier used in logs and on the command line.
    fn name(&self) -> &'static str;

    fn compute(&self, target: Target, sizes: &[PackSize]) -> Packs;
}
