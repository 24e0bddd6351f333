//! Prefill reduction for targets far above the largest pack size.
//!
//! Before the search, a large multiple of the largest size is set aside so the
//! solver only explores a window of `headroom` largest packs plus whatever
//! remainder the target leaves. The set-aside packs are added back to the
//! result afterwards.
//!
//! This bounds memo size to roughly `headroom × largest` states. It assumes
//! extra largest packs beyond the window never hurt, which holds for the few
//! sizes / large target workloads this is used for but is not a theorem.
//! Below the trigger the search is exact.

use log::debug;

use crate::packs::{PackSize, Packs, Target};

/// Targets at or above this multiple of the largest size are prefilled.
pub const DEFAULT_TRIGGER_MULTIPLE: u32 = 100;

/// Largest packs left inside the searched window.
pub const DEFAULT_HEADROOM: u32 = 20;

/// Tunable prefill parameters.
///
/// # Examples
///
/// ```
/// use packopt::prefill::PrefillPolicy;
///
/// let policy = PrefillPolicy::default()
///     .with_trigger_multiple(50)
///     .with_headroom(10);
/// assert_eq!(policy.plan(5_000, 100).count(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefillPolicy {
    /// Prefill activates when `target >= trigger_multiple × largest`.
    pub trigger_multiple: u32,

    /// Multiples of the largest size kept in the searched space.
    pub headroom: u32,
}

impl Default for PrefillPolicy {
    fn default() -> Self {
        Self {
            trigger_multiple: DEFAULT_TRIGGER_MULTIPLE,
            headroom: DEFAULT_HEADROOM,
        }
    }
}

impl PrefillPolicy {
    pub fn with_trigger_multiple(mut self, trigger_multiple: u32) -> Self {
        self.trigger_multiple = trigger_multiple;
        self
    }

    pub fn with_headroom(mut self, headroom: u32) -> Self {
        self.headroom = headroom;
        self
    }

    /// Decides how many `largest` packs to set aside for `target`.
    pub fn plan(&self, target: Target, largest: PackSize) -> Prefill {
        let largest = Target::from(largest);
        if largest == 0 || target < Target::from(self.trigger_multiple) * largest {
            return Prefill::skip(target);
        }

        let count = target / largest - Target::from(self.headroom);
        if count <= 0 {
            return Prefill::skip(target);
        }

        debug!(
            "prefilling {} packs of {} for target {}",
            count, largest, target
        );
        Prefill {
            count: count as u64,
            remaining: target - count * largest,
        }
    }
}

/// Outcome of [`PrefillPolicy::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefill {
    count: u64,
    remaining: Target,
}

impl Prefill {
    /// No packs set aside; the whole target is searched.
    pub fn skip(target: Target) -> Self {
        Self {
            count: 0,
            remaining: target,
        }
    }

    /// Number of largest packs set aside.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Target left for the search.
    pub fn remaining(&self) -> Target {
        self.remaining
    }

    /// Adds the set-aside packs back under the largest size.
    pub fn reattach(&self, packs: &mut Packs, largest: PackSize) {
        if self.count > 0 {
            *packs.entry(largest).or_insert(0) += self.count;
        }
    }
}
