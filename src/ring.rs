//! Rings and the ordered ring sets produced by SSSR perception.

use std::fmt::Display;

use bit_set::BitSet;
use petgraph::graph::{EdgeIndex, NodeIndex};

/// Position of a [`Ring`] inside the [`RingSet`] it belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RingId(pub usize);

impl RingId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for RingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ring {}", self.0)
    }
}

/// An elementary cycle of a molecular graph.
///
/// `atoms` lists the ring atoms in cyclic order starting anywhere, and
/// `bonds[i]` joins `atoms[i]` to `atoms[(i + 1) % len]`. Every ring has at
/// least three atoms and exactly as many bonds as atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ring {
    atoms: Vec<NodeIndex>,
    bonds: Vec<EdgeIndex>,
}

impl Ring {
    /// Pair a cyclic atom sequence with its consecutive bonds. Returns `None`
    /// unless both have the same length of at least three.
    pub(crate) fn new(atoms: Vec<NodeIndex>, bonds: Vec<EdgeIndex>) -> Option<Self> {
        (atoms.len() >= 3 && atoms.len() == bonds.len()).then_some(Self { atoms, bonds })
    }

    pub fn atoms(&self) -> &[NodeIndex] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[EdgeIndex] {
        &self.bonds
    }

    /// Number of atoms (equivalently, bonds) in this ring.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Always `false`; rings have at least three atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains_atom(&self, atom: NodeIndex) -> bool {
        self.atoms.contains(&atom)
    }

    pub fn contains_bond(&self, bond: EdgeIndex) -> bool {
        self.bonds.contains(&bond)
    }

    /// Return the ring atoms as a set of node indices.
    pub fn atom_set(&self) -> BitSet {
        self.atoms.iter().map(|a| a.index()).collect()
    }

    /// Return the ring bonds as a set of edge indices.
    pub fn bond_set(&self) -> BitSet {
        self.bonds.iter().map(|b| b.index()).collect()
    }
}

/// The ordered rings selected by one SSSR search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingSet {
    rings: Vec<Ring>,
}

impl RingSet {
    pub(crate) fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.rings.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Iterate over `(id, ring)` pairs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (RingId, &Ring)> {
        self.rings.iter().enumerate().map(|(i, r)| (RingId(i), r))
    }

    /// Return `true` iff `bond` lies in at least one ring of this set.
    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.rings.iter().any(|r| r.contains_bond(bond))
    }

    /// Return `true` iff `atom` lies in at least one ring of this set.
    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|r| r.contains_atom(atom))
    }

    /// Return the union of all ring bonds as a set of edge indices.
    pub fn ring_bonds(&self) -> BitSet {
        let mut bonds = BitSet::new();
        for ring in &self.rings {
            bonds.union_with(&ring.bond_set());
        }
        bonds
    }

    /// Sizes of the rings, in selection order.
    pub fn sizes(&self) -> Vec<usize> {
        self.rings.iter().map(Ring::len).collect()
    }
}

impl IntoIterator for RingSet {
    type Item = Ring;
    type IntoIter = std::vec::IntoIter<Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.into_iter()
    }
}
