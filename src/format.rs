//! Text rendering of packings.

use crate::packs::{excess, pack_count, total_shipped, Packs, Target};

/// Formats a packing as a human-readable report.
///
/// One line per size, largest first, sizes right-aligned to the widest one,
/// followed by a summary line. An empty packing renders as a single line.
pub fn format_packing(packs: &Packs, target: Target) -> String {
    if packs.is_empty() {
        return String::from("no packs required\n");
    }

    let width = packs
        .keys()
        .map(|size| size.to_string().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (size, count) in packs.iter().rev() {
        output.push_str(&format!("{:>width$} x {}\n", size, count, width = width));
    }
    output.push_str(&format!(
        "shipped {} in {} packs (excess {})\n",
        total_shipped(packs),
        pack_count(packs),
        excess(packs, target)
    ));

    output
}
