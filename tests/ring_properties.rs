//! Structural properties of SSSR perception on hand-built and random graphs.

use std::collections::HashSet;

use petgraph::graph::EdgeIndex;
use proptest::prelude::*;

use sssr::{
    components::{connected_components, cyclomatic_number},
    enumerate::FinderMode,
    molecule::Molecule,
    reduce::CyclicCore,
    ring::{Ring, RingId, RingSet},
    select::SelectMode,
    sssr::{sssr, sssr_search, SearchConfig},
};

fn cycle(start: usize, n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (start + i, start + (i + 1) % n)).collect()
}

fn assignments(mol: &Molecule) -> Vec<Option<RingId>> {
    mol.bonds().map(|b| mol.bond_ring(b)).collect()
}

/// Bonds whose removal leaves the component count unchanged.
fn cyclic_bonds(atom_count: usize, bonds: &[(usize, usize)]) -> HashSet<usize> {
    let whole = Molecule::skeleton(atom_count, bonds.iter().copied()).unwrap();
    let components = connected_components(&whole);
    (0..bonds.len())
        .filter(|&skip| {
            let rest = bonds
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &b)| b);
            let mol = Molecule::skeleton(atom_count, rest).unwrap();
            connected_components(&mol) == components
        })
        .collect()
}

fn assert_well_formed(mol: &Molecule, ring: &Ring) {
    assert!(ring.len() >= 3);
    assert_eq!(ring.atoms().len(), ring.bonds().len());
    let distinct: HashSet<_> = ring.atoms().iter().collect();
    assert_eq!(distinct.len(), ring.len());
    for (i, &bond) in ring.bonds().iter().enumerate() {
        let a = ring.atoms()[i];
        let b = ring.atoms()[(i + 1) % ring.len()];
        assert_eq!(mol.bond_between(a, b), Some(bond));
    }
}

fn ring_bond_union(rings: &RingSet) -> HashSet<usize> {
    rings.ring_bonds().iter().collect()
}

#[test]
fn fused_triangles() {
    let mut mol = Molecule::skeleton(4, [(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)]).unwrap();
    assert_eq!(cyclomatic_number(&mol), 2);
    let rings = sssr(&mut mol);
    assert_eq!(rings.len(), 2);
    assert_eq!(ring_bond_union(&rings).len(), 5);
    let shared: Vec<usize> = rings.rings()[0]
        .bond_set()
        .intersection(&rings.rings()[1].bond_set())
        .collect();
    assert_eq!(shared, vec![1]);
}

#[test]
fn fused_triangles_with_pendant() {
    // Five atoms and six bonds; the pendant bond 5 stays out of every ring.
    let mut mol =
        Molecule::skeleton(5, [(0, 1), (1, 2), (2, 0), (1, 3), (3, 2), (0, 4)]).unwrap();
    assert_eq!(cyclomatic_number(&mol), 2);
    let rings = sssr(&mut mol);
    assert_eq!(rings.sizes(), vec![3, 3]);
    assert!(!rings.is_ring_bond(EdgeIndex::new(5)));
    assert_eq!(mol.bond_ring(EdgeIndex::new(5)), None);
}

#[test]
fn cyclohexane() {
    let mut mol = Molecule::skeleton(6, cycle(0, 6)).unwrap();
    assert_eq!(cyclomatic_number(&mol), 1);
    assert_eq!(sssr(&mut mol).sizes(), vec![6]);
}

#[test]
fn decalin() {
    let mut bonds = cycle(0, 6);
    bonds.extend([(4, 6), (6, 7), (7, 8), (8, 9), (9, 5)]);
    let mut mol = Molecule::skeleton(10, bonds).unwrap();
    assert_eq!(cyclomatic_number(&mol), 2);
    let rings = sssr(&mut mol);
    assert_eq!(rings.sizes(), vec![6, 6]);
    assert_eq!(ring_bond_union(&rings).len(), 11);
    for ring in rings.rings() {
        assert_well_formed(&mol, ring);
    }
}

#[test]
fn disjoint_rings_one_per_component() {
    let mut bonds = cycle(0, 6);
    bonds.extend(cycle(6, 6));
    let mut mol = Molecule::skeleton(12, bonds).unwrap();
    assert_eq!(cyclomatic_number(&mol), 2);
    let rings = sssr(&mut mol);
    assert_eq!(rings.len(), 2);
    let low = rings.rings().iter().filter(|r| r.atoms().iter().all(|a| a.index() < 6));
    assert_eq!(low.count(), 1);
}

#[test]
fn bridge_between_rings_is_not_a_ring_bond() {
    // Biphenyl skeleton; bond 12 joins the rings.
    let mut bonds = cycle(0, 6);
    bonds.extend(cycle(6, 6));
    bonds.push((0, 6));
    let mut mol = Molecule::skeleton(12, bonds.clone()).unwrap();
    let core = CyclicCore::reduce(&mol);
    assert!(core.contains_bond(EdgeIndex::new(12)));
    let rings = sssr(&mut mol);
    assert_eq!(rings.sizes(), vec![6, 6]);
    assert_eq!(ring_bond_union(&rings), cyclic_bonds(12, &bonds));
}

#[test]
fn cubane_needs_independent_selection() {
    let bonds = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let mut mol = Molecule::skeleton(8, bonds).unwrap();
    assert_eq!(cyclomatic_number(&mol), 5);
    let config = SearchConfig::default().with_select(SelectMode::Independent);
    let rings = sssr_search(&mut mol, &config);
    assert_eq!(rings.sizes(), vec![4; 5]);
    assert_eq!(ring_bond_union(&rings).len(), 12);
}

#[test]
fn repeated_search_is_idempotent() {
    let mut bonds = cycle(0, 6);
    bonds.extend([(4, 6), (6, 7), (7, 5), (0, 8), (8, 9)]);
    let mut mol = Molecule::skeleton(10, bonds).unwrap();
    let first = sssr(&mut mol);
    let first_assignments = assignments(&mol);
    let second = sssr(&mut mol);
    assert_eq!(first, second);
    assert_eq!(first_assignments, assignments(&mol));
}

#[test]
fn searches_on_different_molecules_are_isolated() {
    let mut triangle = Molecule::skeleton(3, cycle(0, 3)).unwrap();
    let mut chain = Molecule::skeleton(3, [(0, 1), (1, 2)]).unwrap();
    let before = sssr(&mut triangle);
    assert!(sssr(&mut chain).is_empty());
    assert_eq!(sssr(&mut triangle), before);
}

/// A random forest: atom `i > 0` hangs off an earlier atom unless cut.
fn forest() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), n).prop_map(
            move |picks| {
                let bonds = picks
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter(|(_, (_, cut))| !cut)
                    .map(|(i, (parent, _))| (parent.index(i), i))
                    .collect();
                (n, bonds)
            },
        )
    })
}

/// A random simple graph on up to a dozen atoms.
fn simple_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (3usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..20).prop_map(move |pairs| {
            let mut seen = HashSet::new();
            let bonds = pairs
                .into_iter()
                .filter(|&(a, b)| a != b && seen.insert((a.min(b), a.max(b))))
                .collect();
            (n, bonds)
        })
    })
}

proptest! {
    #[test]
    fn forests_have_no_rings((n, bonds) in forest()) {
        let mut mol = Molecule::skeleton(n, bonds).unwrap();
        prop_assert_eq!(cyclomatic_number(&mol), 0);
        prop_assert!(CyclicCore::reduce(&mol).is_empty());
        prop_assert!(sssr(&mut mol).is_empty());
    }

    #[test]
    fn simple_cycles_give_one_ring(n in 3usize..60) {
        let mut mol = Molecule::skeleton(n, cycle(0, n)).unwrap();
        let rings = sssr(&mut mol);
        prop_assert_eq!(rings.len(), 1);
        prop_assert_eq!(rings.rings()[0].len(), n);
        prop_assert_eq!(ring_bond_union(&rings).len(), n);
        prop_assert!(mol.bonds().all(|b| mol.bond_ring(b) == Some(RingId(0))));
    }

    #[test]
    fn finger_search_never_overshoots((n, bonds) in simple_graph()) {
        let mut mol = Molecule::skeleton(n, bonds.clone()).unwrap();
        let target = cyclomatic_number(&mol);
        let rings = sssr(&mut mol);
        prop_assert!(rings.len() <= target);
        for ring in rings.rings() {
            assert_well_formed(&mol, ring);
        }
        let cyclic = cyclic_bonds(n, &bonds);
        prop_assert!(ring_bond_union(&rings).is_subset(&cyclic));
        for (id, ring) in rings.iter() {
            for &bond in ring.bonds() {
                let assigned = mol.bond_ring(bond).expect("ring bond is annotated");
                prop_assert!(assigned >= id);
            }
        }
    }

    #[test]
    fn search_is_idempotent((n, bonds) in simple_graph()) {
        let mut mol = Molecule::skeleton(n, bonds).unwrap();
        let first = sssr(&mut mol);
        let first_assignments = assignments(&mol);
        let second = sssr(&mut mol);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_assignments, assignments(&mol));
    }

    #[test]
    fn horton_basis_is_complete((n, bonds) in simple_graph()) {
        let mut mol = Molecule::skeleton(n, bonds.clone()).unwrap();
        let config = SearchConfig::default()
            .with_finder(FinderMode::Horton)
            .with_select(SelectMode::Independent);
        let rings = sssr_search(&mut mol, &config);
        prop_assert_eq!(rings.len(), cyclomatic_number(&mol));
        prop_assert_eq!(ring_bond_union(&rings), cyclic_bonds(n, &bonds));
    }
}
