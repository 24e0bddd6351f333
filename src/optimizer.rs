//! Optimal packing: least surplus first, then fewest packs.
//!
//! Pipeline per call:
//! 1. normalize: reject non-positive targets, drop zero sizes, sort descending
//! 2. prefill: set aside largest packs for very large targets
//! 3. memoized search over remaining quantities
//! 4. reassemble: fold per-slot counts into a packing, reattach prefill

use log::trace;

use crate::packs::{descending, PackSize, Packs, Target};
use crate::prefill::{Prefill, PrefillPolicy};
use crate::solver::MemoSolver;
use crate::PackingStrategy;

/// Optimal packing strategy.
///
/// Exact below the prefill trigger. Above it the result depends on the
/// [`PrefillPolicy`] heuristic.
///
/// # Examples
///
/// ```
/// use packopt::optimizer::Optimizer;
/// use packopt::packs::Packs;
///
/// let packs = Optimizer::default().calculate(12_001, &[250, 500, 1000]);
/// assert_eq!(packs, Packs::from([(250, 1), (1000, 12)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimizer {
    prefill: Option<PrefillPolicy>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            prefill: Some(PrefillPolicy::default()),
        }
    }
}

impl Optimizer {
    pub fn with_prefill(mut self, policy: PrefillPolicy) -> Self {
        self.prefill = Some(policy);
        self
    }

    /// Searches the whole target regardless of size. Memory grows with the target.
    pub fn without_prefill(mut self) -> Self {
        self.prefill = None;
        self
    }

    pub fn prefill(&self) -> Option<&PrefillPolicy> {
        self.prefill.as_ref()
    }

    /// Computes the packing for `target` from `sizes`.
    ///
    /// Never fails: a non-positive target or no positive sizes gives an empty
    /// packing. Duplicate sizes are allowed and merge into one entry.
    pub fn calculate(&self, target: Target, sizes: &[PackSize]) -> Packs {
        if target <= 0 {
            return Packs::new();
        }

        let sorted = descending(sizes);
        let Some(mut solver) = MemoSolver::new(&sorted) else {
            return Packs::new();
        };
        let largest = sorted[0];

        let plan = match &self.prefill {
            Some(policy) => policy.plan(target, largest),
            None => Prefill::skip(target),
        };

        let best = solver.solve(plan.remaining());
        trace!(
            "resolved {} states for remaining target {}: shipped {} in {} packs",
            solver.states(),
            plan.remaining(),
            best.total_shipped(),
            best.pack_count()
        );

        let mut packs = fold_counts(&sorted, best.counts());
        plan.reattach(&mut packs, largest);
        packs
    }
}

impl PackingStrategy for Optimizer {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn compute(&self, target: Target, sizes: &[PackSize]) -> Packs {
        self.calculate(target, sizes)
    }
}

/// Optimal packing with the default prefill policy.
pub fn calculate(target: Target, sizes: &[PackSize]) -> Packs {
    Optimizer::default().calculate(target, sizes)
}

/// Merges per-slot counts into a packing keyed by size, skipping zeros.
fn fold_counts(sizes: &[PackSize], counts: &[u64]) -> Packs {
    let mut packs = Packs::new();
    for (&size, &count) in sizes.iter().zip(counts) {
        if count > 0 {
            *packs.entry(size).or_insert(0) += count;
        }
    }
    packs
}
