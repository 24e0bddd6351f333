//! Memoized search for the best packing of a remaining target.
//!
//! Each state is a remaining quantity. A state's answer is built from the
//! answers of `remaining - size` for every pack size, so the search is a
//! depth-first walk over those states with one cached winner per state.
//!
//! Key points:
//! - Iterative walk with an explicit frame stack instead of recursion, so
//!   small pack sizes against large targets cannot overflow the thread stack
//! - Visiting order matches the recursive formulation exactly: sizes are
//!   tried in the order given, children are resolved before the parent moves on
//! - `FxHashMap` memo keyed by remaining quantity, written once per key
//! - Counts are stored per slot of the size list, which keeps a solution to a
//!   flat `Vec` that is cheap to clone

use rustc_hash::FxHashMap;

use crate::packs::{PackSize, Target};

/// A packing for one remaining quantity.
///
/// `counts[i]` is the number of packs of the solver's `i`-th size. The empty
/// solution (all zeros) means the quantity is already met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Solution {
    counts: Vec<u64>,
    total_shipped: i64,
    pack_count: u64,
}

impl Solution {
    /// The canonical "already met" solution for a size list with `slots` entries.
    pub(crate) fn empty(slots: usize) -> Self {
        Self {
            counts: vec![0; slots],
            total_shipped: 0,
            pack_count: 0,
        }
    }

    /// Returns a copy of this solution with one more pack in `slot`.
    fn with_pack(&self, slot: usize, size: PackSize) -> Self {
        let mut counts = self.counts.clone();
        counts[slot] += 1;
        Self {
            counts,
            total_shipped: self.total_shipped + Target::from(size),
            pack_count: self.pack_count + 1,
        }
    }

    pub(crate) fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub(crate) fn total_shipped(&self) -> i64 {
        self.total_shipped
    }

    pub(crate) fn pack_count(&self) -> u64 {
        self.pack_count
    }

    /// An exact single pack: nothing at the same level can beat it.
    fn is_perfect_for(&self, target: Target) -> bool {
        self.total_shipped == target && self.pack_count == 1
    }
}

/// Returns true when `candidate` should replace `incumbent` as the answer for `target`.
///
/// Ordering: any candidate beats no incumbent, then smaller excess wins, then
/// fewer packs win. On a full tie the incumbent stays, so the first solution
/// found in size order survives.
pub(crate) fn prefers(candidate: &Solution, incumbent: Option<&Solution>, target: Target) -> bool {
    let Some(incumbent) = incumbent else {
        return true;
    };

    let candidate_excess = candidate.total_shipped - target;
    let incumbent_excess = incumbent.total_shipped - target;
    if candidate_excess != incumbent_excess {
        return candidate_excess < incumbent_excess;
    }

    candidate.pack_count < incumbent.pack_count
}

/// One pending state in the depth-first walk.
struct Frame {
    remaining: Target,
    /// Index of the next size to try.
    next_slot: usize,
    /// Best candidate so far; `None` until the first size has been tried.
    best: Option<Solution>,
}

impl Frame {
    fn new(remaining: Target) -> Self {
        Self {
            remaining,
            next_slot: 0,
            best: None,
        }
    }

    fn is_settled(&self, slots: usize) -> bool {
        self.next_slot == slots
            || self
                .best
                .as_ref()
                .is_some_and(|best| best.is_perfect_for(self.remaining))
    }
}

/// Search state for one top-level calculation.
///
/// Owns its memo; create a new solver per call.
pub(crate) struct MemoSolver<'a> {
    sizes: &'a [PackSize],
    memo: FxHashMap<Target, Solution>,
}

impl<'a> MemoSolver<'a> {
    /// Creates a solver over `sizes` in search order.
    ///
    /// Returns `None` for an empty size list, which has no answer for any
    /// positive target.
    pub(crate) fn new(sizes: &'a [PackSize]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        Some(Self {
            sizes,
            memo: FxHashMap::default(),
        })
    }

    /// Number of distinct remaining quantities resolved so far.
    pub(crate) fn states(&self) -> usize {
        self.memo.len()
    }

    /// Finds the best packing for `target`.
    ///
    /// Non-positive targets are already met and yield the empty solution.
    pub(crate) fn solve(&mut self, target: Target) -> Solution {
        if target <= 0 {
            return Solution::empty(self.sizes.len());
        }
        if let Some(hit) = self.memo.get(&target) {
            return hit.clone();
        }

        let slots = self.sizes.len();
        let mut stack = vec![Frame::new(target)];

        while let Some(frame) = stack.last_mut() {
            if frame.is_settled(slots) {
                let remaining = frame.remaining;
                let best = frame.best.take();
                stack.pop();
                if let Some(best) = best {
                    self.memo.insert(remaining, best);
                }
                continue;
            }

            let slot = frame.next_slot;
            let size = self.sizes[slot];
            let child = frame.remaining - Target::from(size);

            let candidate = if child <= 0 {
                Solution::empty(slots).with_pack(slot, size)
            } else if let Some(resolved) = self.memo.get(&child) {
                resolved.with_pack(slot, size)
            } else {
                // resolve the child first, then retry this slot
                stack.push(Frame::new(child));
                continue;
            };

            if prefers(&candidate, frame.best.as_ref(), frame.remaining) {
                frame.best = Some(candidate);
            }
            frame.next_slot += 1;
        }

        // every frame settles with a winner because `sizes` is non-empty
        self.memo
            .get(&target)
            .cloned()
            .unwrap_or_else(|| Solution::empty(slots))
    }
}
