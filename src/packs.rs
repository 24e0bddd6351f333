//! Pack size definitions and the public packing result type.
//!
//! A packing maps each used pack size to the number of packs shipped. It is
//! kept in a `BTreeMap` so iteration and formatting are stable.

use std::collections::BTreeMap;

/// Quantity contained in one shippable pack.
pub type PackSize = u32;

/// Requested quantity. Non-positive values are tolerated and yield no packs.
pub type Target = i64;

/// Number of packs of each size in a finished order.
///
/// Never contains zero counts.
pub type Packs = BTreeMap<PackSize, u64>;

/// Pack sizes a fresh registry starts with.
pub const DEFAULT_PACK_SIZES: &[PackSize] = &[250, 500, 1000, 2000, 5000];

/// Total number of items shipped by a packing.
pub fn total_shipped(packs: &Packs) -> u64 {
    packs
        .iter()
        .map(|(&size, &count)| u64::from(size) * count)
        .sum()
}

/// Total number of packs in a packing.
pub fn pack_count(packs: &Packs) -> u64 {
    packs.values().sum()
}

/// Shipped surplus over the requested target.
///
/// Negative only if the packing does not cover the target, which no strategy
/// in this crate produces for a positive target. Widened to `i128` because a
/// packing for a target near `i64::MAX` can ship more than `i64::MAX`.
pub fn excess(packs: &Packs, target: Target) -> i128 {
    i128::from(total_shipped(packs)) - i128::from(target.max(0))
}

/// Returns a copy of `sizes` sorted in descending order with zero sizes removed.
///
/// Duplicates are kept. The stable sort pins the search order for equal
/// values.
pub fn descending(sizes: &[PackSize]) -> Vec<PackSize> {
    let mut sorted: Vec<PackSize> = sizes.iter().copied().filter(|&size| size > 0).collect();
    sorted.sort_by(|a, b| b.cmp(a));
    sorted
}
