//! Enumerate candidate rings of a molecule's cyclic core.
//!
//! Candidates are later filtered by [`select`](crate::select) down to an
//! SSSR. Every enumeration strategy implements [`RingFinder`], so the search
//! in [`sssr`](crate::sssr) can swap algorithms without changing callers.

use std::collections::{HashSet, VecDeque};

use bit_set::BitSet;
use clap::ValueEnum;
use log::{debug, trace};
use petgraph::graph::NodeIndex;

use crate::{reduce::CyclicCore, ring::Ring};

/// Default number of growth steps a finger pair takes before its probe hits
/// the depth bound. Rings of up to `2 * DEFAULT_MAX_DEPTH + 1` atoms close
/// before the bound is first reached.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Strategy for enumerating candidate rings.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum FinderMode {
    /// Grow two paths ("fingers") out of every pair of bonds at each atom
    /// until they close a ring.
    #[default]
    Fingers,
    /// Build a ring from every bond and every atom's shortest paths to the
    /// bond's ends (Horton's candidate set).
    Horton,
}

/// Enumerates the elementary rings of a cyclic core.
pub trait RingFinder {
    /// Return candidate rings of `core` in discovery order. Candidates need
    /// not be independent and may outnumber the cyclomatic number.
    fn find_rings(&self, core: &CyclicCore) -> Vec<Ring>;
}

/// Pair an atom cycle with the core bonds joining consecutive atoms.
fn ring_from_cycle(core: &CyclicCore, atoms: Vec<NodeIndex>) -> Option<Ring> {
    let n = atoms.len();
    let bonds = (0..n)
        .map(|i| core.bond_between(atoms[i], atoms[(i + 1) % n]))
        .collect::<Option<Vec<_>>>()?;
    Ring::new(atoms, bonds)
}

/// Rings recorded so far, keyed by atom set.
///
/// A ring whose atoms include every atom of a recorded ring is not
/// elementary and is dropped; a new ring evicts recorded rings whose atom
/// sets strictly contain its own.
#[derive(Default)]
struct RingRegistry {
    found: Vec<(BitSet, Vec<NodeIndex>)>,
}

impl RingRegistry {
    fn offer(&mut self, atoms: Vec<NodeIndex>) -> bool {
        let set: BitSet = atoms.iter().map(|a| a.index()).collect();
        if self.found.iter().any(|(other, _)| other.is_subset(&set)) {
            return false;
        }
        self.found.retain(|(other, _)| !set.is_subset(other));
        self.found.push((set, atoms));
        true
    }

    fn into_rings(self, core: &CyclicCore) -> Vec<Ring> {
        self.found
            .into_iter()
            .filter_map(|(_, atoms)| ring_from_cycle(core, atoms))
            .collect()
    }
}

/// Two simple paths grown in lockstep from the two ends of a probe.
#[derive(Debug, Clone)]
struct FingerPair {
    left: Vec<NodeIndex>,
    right: Vec<NodeIndex>,
}

impl FingerPair {
    fn tips(&self) -> (NodeIndex, NodeIndex) {
        (self.left[self.left.len() - 1], self.right[self.right.len() - 1])
    }

    fn occupies(&self, atom: NodeIndex) -> bool {
        self.left.contains(&atom) || self.right.contains(&atom)
    }

    /// Return the ring through `root` if the tips meet or are bonded.
    fn closure(&self, core: &CyclicCore, root: NodeIndex) -> Option<Vec<NodeIndex>> {
        let (left_tip, right_tip) = self.tips();
        let shared = if left_tip == right_tip {
            1
        } else if core.bond_between(left_tip, right_tip).is_some() {
            0
        } else {
            return None;
        };

        let mut atoms = Vec::with_capacity(1 + self.left.len() + self.right.len());
        atoms.push(root);
        atoms.extend_from_slice(&self.left);
        atoms.extend(self.right.iter().rev().skip(shared));
        Some(atoms)
    }

    /// Unblocked, unoccupied neighbors of `tip`.
    fn steps(&self, core: &CyclicCore, tip: NodeIndex, blockers: &BitSet) -> Vec<NodeIndex> {
        core.neighbors(tip)
            .iter()
            .map(|&(n, _)| n)
            .filter(|&n| !blockers.contains(n.index()) && !self.occupies(n))
            .collect()
    }
}

/// Ring enumeration by paired path growth.
///
/// For every core atom `v` and every pair of its bonds, two fingers start at
/// the far ends of the bonds and grow one hop per step in lockstep, never
/// entering `v`, `v`'s other neighbors, or their own paths. A ring closes
/// when the tips meet (even ring) or are bonded (odd ring). The first step
/// that closes anything ends the probe and every ring of the smallest size
/// closed at that step is recorded.
///
/// Every `max_depth` steps the probe reaches the depth bound: blockers absorb
/// the interior atoms of every live finger pair, pairs sharing both tips are
/// merged, and growth resumes. Large rings are still found, while the number
/// of live pairs stays bounded by the territory not yet explored. A probe
/// that runs out of pairs contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct FingerSearch {
    max_depth: usize,
}

impl FingerSearch {
    /// Construct a finger search with the given depth bound (at least 1).
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Grow fingers from `first` and `second`, both neighbors of `root`, and
    /// return every smallest ring closed through `root`.
    fn probe(
        &self,
        core: &CyclicCore,
        root: NodeIndex,
        first: NodeIndex,
        second: NodeIndex,
    ) -> Vec<Vec<NodeIndex>> {
        let mut blockers = BitSet::with_capacity(core.universe());
        blockers.insert(root.index());
        for &(n, _) in core.neighbors(root) {
            if n != first && n != second {
                blockers.insert(n.index());
            }
        }

        let mut pairs = vec![FingerPair {
            left: vec![first],
            right: vec![second],
        }];
        let mut step = 1;

        loop {
            let closed: Vec<Vec<NodeIndex>> =
                pairs.iter().filter_map(|p| p.closure(core, root)).collect();
            if let Some(smallest) = closed.iter().map(Vec::len).min() {
                return closed.into_iter().filter(|r| r.len() == smallest).collect();
            }

            if step % self.max_depth == 0 {
                absorb_explored(&mut blockers, &mut pairs);
                trace!(
                    "probe at atom {} hit depth bound at step {step}, {} pairs remain",
                    root.index(),
                    pairs.len()
                );
            }

            let mut grown = Vec::new();
            for pair in &pairs {
                let (left_tip, right_tip) = pair.tips();
                let lefts = pair.steps(core, left_tip, &blockers);
                let rights = pair.steps(core, right_tip, &blockers);
                for &l in &lefts {
                    for &r in &rights {
                        let mut next = pair.clone();
                        next.left.push(l);
                        next.right.push(r);
                        grown.push(next);
                    }
                }
            }

            if grown.is_empty() {
                return Vec::new();
            }
            pairs = grown;
            step += 1;
        }
    }
}

impl Default for FingerSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Block the interior atoms of every live pair and merge pairs whose tips
/// coincide, keeping the first.
fn absorb_explored(blockers: &mut BitSet, pairs: &mut Vec<FingerPair>) {
    for pair in pairs.iter() {
        for path in [&pair.left, &pair.right] {
            for atom in &path[..path.len() - 1] {
                blockers.insert(atom.index());
            }
        }
    }
    let mut seen = HashSet::new();
    pairs.retain(|p| seen.insert(p.tips()));
}

impl RingFinder for FingerSearch {
    fn find_rings(&self, core: &CyclicCore) -> Vec<Ring> {
        let mut registry = RingRegistry::default();
        let mut probes = 0;

        for root in core.atoms() {
            let neighbors = core.neighbors(root);
            for i in 0..neighbors.len() {
                for j in (i + 1)..neighbors.len() {
                    probes += 1;
                    for atoms in self.probe(core, root, neighbors[i].0, neighbors[j].0) {
                        if registry.offer(atoms) {
                            trace!("probe at atom {} recorded a ring", root.index());
                        }
                    }
                }
            }
        }

        let rings = registry.into_rings(core);
        debug!(
            "finger search ran {probes} probes and kept {} rings",
            rings.len()
        );
        rings
    }
}

/// Horton's candidate rings: for every core bond `(u, w)` and core atom `x`,
/// the cycle made of the bond and the shortest paths from `x` to `u` and to
/// `w`, whenever those paths meet only at `x`.
///
/// The candidate set always contains a minimum cycle basis but grows with
/// `V * E`, so it is best paired with independent selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct HortonSearch;

/// Breadth-first distances and predecessors from `source` within the core.
fn shortest_path_tree(
    core: &CyclicCore,
    source: NodeIndex,
) -> (Vec<Option<usize>>, Vec<Option<NodeIndex>>) {
    let n = core.universe();
    let mut dist = vec![None; n];
    let mut pred = vec![None; n];
    let mut queue = VecDeque::from([source]);
    dist[source.index()] = Some(0);

    while let Some(atom) = queue.pop_front() {
        let d = dist[atom.index()].unwrap_or(0);
        for &(next, _) in core.neighbors(atom) {
            if dist[next.index()].is_none() {
                dist[next.index()] = Some(d + 1);
                pred[next.index()] = Some(atom);
                queue.push_back(next);
            }
        }
    }

    (dist, pred)
}

/// Walk predecessors back from `target` and return the path from the tree's
/// source to `target`.
fn path_to(pred: &[Option<NodeIndex>], target: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut cur = target;
    while let Some(prev) = pred[cur.index()] {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}

/// Rotate a cycle to start at its smallest atom, walking toward the smaller
/// of that atom's two ring neighbors.
fn normalize_cycle(atoms: &[NodeIndex]) -> Vec<NodeIndex> {
    let n = atoms.len();
    let start = (0..n).min_by_key(|&i| atoms[i]).unwrap_or(0);
    let forward = atoms[(start + 1) % n];
    let backward = atoms[(start + n - 1) % n];
    if forward <= backward {
        (0..n).map(|k| atoms[(start + k) % n]).collect()
    } else {
        (0..n).map(|k| atoms[(start + n - k) % n]).collect()
    }
}

impl RingFinder for HortonSearch {
    fn find_rings(&self, core: &CyclicCore) -> Vec<Ring> {
        let trees: Vec<_> = core
            .atoms()
            .map(|x| shortest_path_tree(core, x))
            .collect();

        let mut candidates: Vec<Vec<NodeIndex>> = Vec::new();
        for root in core.atoms() {
            for &(other, _) in core.neighbors(root) {
                // Visit each bond once, from its lower-indexed end.
                if other < root {
                    continue;
                }
                for (dist, pred) in &trees {
                    let (Some(du), Some(dw)) = (dist[root.index()], dist[other.index()]) else {
                        continue;
                    };
                    if du + dw + 1 < 3 {
                        continue;
                    }
                    let to_root = path_to(pred, root);
                    let to_other = path_to(pred, other);
                    let disjoint = to_root[1..].iter().all(|a| !to_other[1..].contains(a));
                    if !disjoint {
                        continue;
                    }
                    let mut atoms = to_root;
                    atoms.extend(to_other[1..].iter().rev());
                    candidates.push(normalize_cycle(&atoms));
                }
            }
        }

        candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        candidates.dedup();
        debug!("horton search built {} distinct candidates", candidates.len());

        candidates
            .into_iter()
            .filter_map(|atoms| ring_from_cycle(core, atoms))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::Molecule;

    fn core_of(atom_count: usize, bonds: &[(usize, usize)]) -> CyclicCore {
        let mol = Molecule::skeleton(atom_count, bonds.iter().copied()).unwrap();
        CyclicCore::reduce(&mol)
    }

    fn cycle(n: usize) -> Vec<(usize, usize)> {
        (0..n).map(|i| (i, (i + 1) % n)).collect()
    }

    fn sorted_sizes(rings: &[Ring]) -> Vec<usize> {
        let mut sizes: Vec<usize> = rings.iter().map(Ring::len).collect();
        sizes.sort();
        sizes
    }

    #[test]
    fn finds_triangle() {
        let core = core_of(3, &cycle(3));
        let rings = FingerSearch::default().find_rings(&core);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn ring_bonds_join_consecutive_atoms() {
        let core = core_of(7, &cycle(7));
        let rings = FingerSearch::default().find_rings(&core);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        for (i, bond) in ring.bonds().iter().enumerate() {
            let a = ring.atoms()[i];
            let b = ring.atoms()[(i + 1) % ring.len()];
            assert_eq!(core.bond_between(a, b), Some(*bond));
        }
    }

    #[test]
    fn even_and_odd_closures() {
        for n in 3..=11 {
            let core = core_of(n, &cycle(n));
            let rings = FingerSearch::default().find_rings(&core);
            assert_eq!(sorted_sizes(&rings), vec![n], "cycle of {n}");
        }
    }

    #[test]
    fn macrocycle_beyond_depth_bound() {
        let core = core_of(24, &cycle(24));
        let rings = FingerSearch::new(3).find_rings(&core);
        assert_eq!(sorted_sizes(&rings), vec![24]);
        assert_eq!(FingerSearch::new(0).max_depth(), 1);
    }

    #[test]
    fn naphthalene_skips_perimeter() {
        let core = core_of(
            10,
            &[
                (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0),
                (4, 6), (6, 7), (7, 8), (8, 9), (9, 5),
            ],
        );
        let rings = FingerSearch::default().find_rings(&core);
        assert_eq!(sorted_sizes(&rings), vec![6, 6]);
    }

    #[test]
    fn spiro_rings_found_separately() {
        // Two cyclobutanes sharing atom 0.
        let core = core_of(7, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (4, 5), (5, 6), (6, 0)]);
        let rings = FingerSearch::default().find_rings(&core);
        assert_eq!(sorted_sizes(&rings), vec![4, 4]);
    }

    #[test]
    fn bicyclooctane_keeps_tied_rings() {
        // Bicyclo[2.2.2]octane: bridgeheads 0 and 1, three two-atom bridges.
        let core = core_of(
            8,
            &[(0, 2), (2, 3), (3, 1), (0, 4), (4, 5), (5, 1), (0, 6), (6, 7), (7, 1)],
        );
        let rings = FingerSearch::default().find_rings(&core);
        assert_eq!(sorted_sizes(&rings), vec![6, 6, 6]);
    }

    #[test]
    fn registry_drops_supersets() {
        let mut registry = RingRegistry::default();
        let atoms = |ix: &[usize]| ix.iter().copied().map(NodeIndex::new).collect::<Vec<_>>();
        assert!(registry.offer(atoms(&[0, 1, 2, 3])));
        assert!(registry.offer(atoms(&[0, 1, 2])));
        assert_eq!(registry.found.len(), 1);
        assert!(!registry.offer(atoms(&[2, 1, 0])));
        assert!(!registry.offer(atoms(&[0, 1, 2, 4])));
        assert!(registry.offer(atoms(&[0, 2, 3])));
        assert_eq!(registry.found.len(), 2);
    }

    #[test]
    fn horton_covers_fused_triangles() {
        let core = core_of(4, &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)]);
        let rings = HortonSearch.find_rings(&core);
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[1].len(), 3);
        assert!(rings.iter().all(|r| r.len() <= 4));
    }

    #[test]
    fn normalize_cycle_is_rotation_and_reflection_invariant() {
        let atoms = |ix: &[usize]| ix.iter().copied().map(NodeIndex::new).collect::<Vec<_>>();
        let expected = atoms(&[1, 3, 4, 6]);
        assert_eq!(normalize_cycle(&atoms(&[4, 6, 1, 3])), expected);
        assert_eq!(normalize_cycle(&atoms(&[6, 4, 3, 1])), expected);
    }
}
