//! Perceive the Smallest Set of Smallest Rings of a molecule.
//!
//! The search runs in five stages over scratch state owned by the call:
//!
//! 1. count connected components and derive the cyclomatic number `F`;
//! 2. return early when `F == 0`;
//! 3. prune the acyclic periphery ([`CyclicCore::reduce`]);
//! 4. enumerate candidate rings with a [`RingFinder`];
//! 5. select at most `F` rings ([`select_rings`]) and record each bond's
//!    ring on the molecule.
//!
//! Nothing but the ring assignment of each bond is written to the molecule,
//! so repeated searches on the same molecule agree, and searches on distinct
//! molecules can run in parallel.

use clap::ValueEnum;
use log::debug;
use petgraph::graph::EdgeIndex;
use rayon::prelude::*;

use crate::{
    components::cyclomatic_number,
    enumerate::{FingerSearch, FinderMode, HortonSearch, RingFinder, DEFAULT_MAX_DEPTH},
    molecule::Molecule,
    reduce::CyclicCore,
    ring::{Ring, RingId, RingSet},
    select::{select_rings, SelectMode},
};

/// Parallelization strategy for [`sssr_batch`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum ParallelMode {
    /// Process molecules one after another.
    None,
    /// Process molecules on the rayon thread pool.
    #[default]
    Always,
}

/// Options for one SSSR search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Candidate ring enumeration algorithm.
    pub finder: FinderMode,
    /// Rule for accepting candidates into the SSSR.
    pub select: SelectMode,
    /// Depth bound of [`FingerSearch`]; ignored by other finders.
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            finder: FinderMode::default(),
            select: SelectMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn with_finder(mut self, finder: FinderMode) -> Self {
        self.finder = finder;
        self
    }

    pub fn with_select(mut self, select: SelectMode) -> Self {
        self.select = select;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Record `rings` on the bonds of `mol`.
///
/// Every bond's previous assignment is cleared first. A bond shared by
/// several rings ends up referencing the last of them in `rings` order.
pub fn annotate(mol: &mut Molecule, rings: &RingSet) {
    for bond in mol.bonds_mut() {
        bond.set_ring(None);
    }
    for (id, ring) in rings.iter() {
        for &ix in ring.bonds() {
            if let Some(bond) = mol.bond_mut(ix) {
                bond.set_ring(Some(id));
            }
        }
    }
}

/// Compute the SSSR of `mol` with default options and record each ring bond's
/// ring.
pub fn sssr(mol: &mut Molecule) -> RingSet {
    sssr_search(mol, &SearchConfig::default())
}

/// Compute the SSSR of `mol` using the algorithms in `config` and record
/// each ring bond's ring.
///
/// The result holds at most [`cyclomatic_number`] rings; fewer only when the
/// chosen finder misses rings of an unusual topology.
pub fn sssr_search(mol: &mut Molecule, config: &SearchConfig) -> RingSet {
    match config.finder {
        FinderMode::Fingers => {
            sssr_with_finder(mol, &FingerSearch::new(config.max_depth), config.select)
        }
        FinderMode::Horton => sssr_with_finder(mol, &HortonSearch, config.select),
    }
}

/// Compute the SSSR of `mol` using a caller-supplied ring finder.
pub fn sssr_with_finder(mol: &mut Molecule, finder: &dyn RingFinder, select: SelectMode) -> RingSet {
    let rings = find_sssr(mol, finder, select);
    annotate(mol, &rings);
    rings
}

fn find_sssr(mol: &Molecule, finder: &dyn RingFinder, select: SelectMode) -> RingSet {
    let target = cyclomatic_number(mol);
    if target == 0 {
        return RingSet::default();
    }

    let core = CyclicCore::reduce(mol);
    debug!(
        "cyclic core keeps {} of {} atoms and {} of {} bonds; expecting {target} rings",
        core.atom_count(),
        mol.atom_count(),
        core.bond_count(),
        mol.bond_count()
    );

    let candidates = finder.find_rings(&core);
    RingSet::new(select_rings(candidates, target, select))
}

/// Compute the SSSR of every molecule in `mols`, in order.
pub fn sssr_batch(mols: &mut [Molecule], config: &SearchConfig, pmode: ParallelMode) -> Vec<RingSet> {
    match pmode {
        ParallelMode::None => mols.iter_mut().map(|m| sssr_search(m, config)).collect(),
        ParallelMode::Always => mols.par_iter_mut().map(|m| sssr_search(m, config)).collect(),
    }
}

/// Return the ring `mol`'s bond `bond` was assigned to, resolved in `rings`.
pub fn bond_ring<'a>(
    mol: &Molecule,
    rings: &'a RingSet,
    bond: EdgeIndex,
) -> Option<(RingId, &'a Ring)> {
    let id = mol.bond_ring(bond)?;
    rings.ring(id).map(|r| (id, r))
}
