//! Single-pass rounding strategy.
//!
//! Takes as many of each size as fit, largest first, and rounds any leftover
//! up with one extra pack of the smallest size. Cheap and predictable, but it
//! can ship more than [`Optimizer`](crate::optimizer::Optimizer): for 251
//! against `[250, 500, 1000]` it picks two 250 packs where one 500 pack has
//! the same surplus in fewer packs.

use crate::packs::{PackSize, Packs, Target};
use crate::PackingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greedy;

impl Greedy {
    pub fn calculate(&self, target: Target, sizes: &[PackSize]) -> Packs {
        let mut packs = Packs::new();
        if target <= 0 {
            return packs;
        }

        let mut ascending: Vec<PackSize> = sizes.iter().copied().filter(|&size| size > 0).collect();
        ascending.sort_unstable();

        let mut remaining = target;
        for (index, &size) in ascending.iter().enumerate().rev() {
            let size_qty = Target::from(size);
            let mut count = remaining / size_qty;
            remaining -= count * size_qty;

            if index == 0 && remaining > 0 {
                count += 1;
            }
            if count > 0 {
                *packs.entry(size).or_insert(0) += count as u64;
            }
        }

        packs
    }
}

impl PackingStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn compute(&self, target: Target, sizes: &[PackSize]) -> Packs {
        self.calculate(target, sizes)
    }
}
