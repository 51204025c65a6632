//! Connected components and the dimension of a molecule's cycle space.

use std::collections::VecDeque;

use bit_set::BitSet;

use crate::molecule::Molecule;

/// Count the connected components of `mol` by breadth-first traversal from
/// each not yet visited atom, in atom index order.
///
/// Isolated atoms count as components of their own. Returns 0 only for a
/// molecule without atoms.
pub fn connected_components(mol: &Molecule) -> usize {
    let graph = mol.graph();
    let mut visited = BitSet::with_capacity(graph.node_count());
    let mut queue = VecDeque::new();
    let mut count = 0;

    for start in graph.node_indices() {
        if !visited.insert(start.index()) {
            continue;
        }
        count += 1;
        queue.push_back(start);
        while let Some(atom) = queue.pop_front() {
            for neighbor in graph.neighbors(atom) {
                if visited.insert(neighbor.index()) {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    count
}

/// Return the cyclomatic (Frerejacque) number `E - V + C` of `mol`, i.e. the
/// number of independent rings an SSSR of the whole molecule contains.
///
/// The component count `C` is taken over the full molecule, so salts and
/// other multi-fragment inputs get one term per fragment.
pub fn cyclomatic_number(mol: &Molecule) -> usize {
    let components = connected_components(mol);
    (mol.bond_count() + components).saturating_sub(mol.atom_count())
}
