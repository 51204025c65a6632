//! Choose the smallest set of smallest rings from enumerated candidates.

use bit_set::BitSet;
use clap::ValueEnum;
use log::debug;

use crate::ring::Ring;

/// Rule deciding whether a candidate ring joins the selection.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum SelectMode {
    /// Accept a ring iff it contains at least one bond no accepted ring has
    /// used yet. Exact for simple, spiro, and ortho/peri-fused systems.
    #[default]
    NewBond,
    /// Accept a ring iff its bond set is linearly independent, over GF(2),
    /// of the bond sets already accepted. Reaches the full cycle-space rank
    /// whenever the candidates span it.
    Independent,
}

/// Bond sets of accepted rings kept in row-echelon form over GF(2).
#[derive(Default)]
struct CycleBasis {
    rows: Vec<(usize, BitSet)>,
}

impl CycleBasis {
    /// Reduce `bonds` against the basis and keep it if anything remains.
    fn insert(&mut self, mut bonds: BitSet) -> bool {
        for (pivot, row) in &self.rows {
            if bonds.contains(*pivot) {
                bonds.symmetric_difference_with(row);
            }
        }
        match bonds.iter().next() {
            Some(pivot) => {
                self.rows.push((pivot, bonds));
                true
            }
            None => false,
        }
    }
}

/// Sort `candidates` by size, keeping discovery order among equal sizes, and
/// greedily accept rings under `mode` until `target` rings are accepted or
/// the candidates run out.
///
/// Returns fewer than `target` rings when the candidates do not support a
/// full selection.
pub fn select_rings(mut candidates: Vec<Ring>, target: usize, mode: SelectMode) -> Vec<Ring> {
    candidates.sort_by_key(Ring::len);

    let mut selected = Vec::with_capacity(target);
    let mut used = BitSet::new();
    let mut basis = CycleBasis::default();

    for ring in candidates {
        if selected.len() >= target {
            break;
        }
        let bonds = ring.bond_set();
        let accept = match mode {
            SelectMode::NewBond => !bonds.is_subset(&used),
            SelectMode::Independent => basis.insert(bonds.clone()),
        };
        if accept {
            used.union_with(&bonds);
            selected.push(ring);
        }
    }

    if selected.len() < target {
        debug!(
            "selected {} of {target} rings; candidates ran out",
            selected.len()
        );
    }
    selected
}
