//! Strip the acyclic periphery of a molecule, leaving its cyclic core.
//!
//! Atoms with at most one remaining bond cannot lie on a ring, so they are
//! pruned together with that bond until nothing changes. What remains is
//! every atom and bond that lies on at least one ring, plus the bridges and
//! linkers joining ring systems to each other.

use bit_set::BitSet;
use log::trace;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::molecule::Molecule;

/// The atoms and bonds of a molecule that survive leaf pruning.
///
/// Adjacency is stored per atom in bond insertion order so that every
/// traversal of the core is deterministic for a given molecule.
#[derive(Debug, Clone)]
pub struct CyclicCore {
    atoms: BitSet,
    bonds: BitSet,
    adjacency: Vec<Vec<(NodeIndex, EdgeIndex)>>,
}

impl CyclicCore {
    /// Repeatedly scan `mol` in atom order, removing every atom whose
    /// remaining degree is 0 or 1 along with its sole remaining bond, until a
    /// full scan removes nothing.
    pub fn reduce(mol: &Molecule) -> Self {
        let graph = mol.graph();
        let atom_count = graph.node_count();

        let mut adjacency: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); atom_count];
        for bond in graph.edge_indices() {
            if let Some((first, second)) = graph.edge_endpoints(bond) {
                adjacency[first.index()].push((second, bond));
                adjacency[second.index()].push((first, bond));
            }
        }

        let mut atoms: BitSet = (0..atom_count).collect();
        let mut bonds: BitSet = graph.edge_indices().map(|b| b.index()).collect();
        let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();

        let mut pass = 0;
        loop {
            let mut removed = 0;
            for atom in 0..atom_count {
                if !atoms.contains(atom) || degree[atom] > 1 {
                    continue;
                }
                atoms.remove(atom);
                removed += 1;
                let live = adjacency[atom]
                    .iter()
                    .find(|(_, bond)| bonds.contains(bond.index()));
                if let Some(&(neighbor, bond)) = live {
                    bonds.remove(bond.index());
                    degree[atom] = 0;
                    degree[neighbor.index()] -= 1;
                }
            }
            pass += 1;
            trace!("leaf pruning pass {pass} removed {removed} atoms");
            if removed == 0 {
                break;
            }
        }

        for list in adjacency.iter_mut() {
            list.retain(|(_, bond)| bonds.contains(bond.index()));
        }

        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    /// Iterate over core atoms in index order.
    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.atoms.iter().map(NodeIndex::new)
    }

    /// Iterate over core bonds in index order.
    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.bonds.iter().map(EdgeIndex::new)
    }

    pub fn contains_atom(&self, atom: NodeIndex) -> bool {
        self.atoms.contains(atom.index())
    }

    pub fn contains_bond(&self, bond: EdgeIndex) -> bool {
        self.bonds.contains(bond.index())
    }

    /// Return the core neighbors of `atom` and the bonds leading to them.
    /// Empty for atoms outside the core.
    pub fn neighbors(&self, atom: NodeIndex) -> &[(NodeIndex, EdgeIndex)] {
        self.adjacency
            .get(atom.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Return the core bond joining `first` and `second`, if any.
    pub fn bond_between(&self, first: NodeIndex, second: NodeIndex) -> Option<EdgeIndex> {
        self.neighbors(first)
            .iter()
            .find(|(n, _)| *n == second)
            .map(|&(_, bond)| bond)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Total number of atoms in the molecule the core was taken from.
    pub(crate) fn universe(&self) -> usize {
        self.adjacency.len()
    }
}
