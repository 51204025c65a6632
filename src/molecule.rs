//! Molecular graphs: atoms, bonds, and validated construction.
//!
//! A [`Molecule`] wraps an undirected petgraph whose node and edge indices
//! follow insertion order. Ring perception relies on that order for
//! deterministic tie-breaking, so atoms and bonds are never reordered or
//! removed once added.

use std::{fmt::Display, str::FromStr};

use petgraph::{
    graph::{EdgeIndex, Graph, NodeIndex},
    Undirected,
};
use thiserror::Error;

use crate::ring::RingId;

pub(crate) type Index = u32;
pub(crate) type MGraph = Graph<Atom, Bond, Undirected, Index>;

/// Thrown by [`Element::from_str`] if the string does not represent a valid
/// chemical element.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseElementError;

macro_rules! periodic_table {
    ( $(($element:ident, $name:literal, $number:literal),)* ) => {
        /// Represents a chemical element.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Element {
            $( $element, )*
        }

        impl Element {
            /// Return the atomic number of this element.
            pub fn atomic_number(&self) -> u8 {
                match self {
                    $( Element::$element => $number, )*
                }
            }
        }

        impl Display for Element {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( Element::$element => write!(f, "{}", $name), )*
                }
            }
        }

        impl FromStr for Element {
            type Err = ParseElementError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Element::$element), )*
                    _ => Err(ParseElementError),
                }
            }
        }
    };
}

periodic_table!(
    (Hydrogen, "H", 1),
    (Helium, "He", 2),
    (Lithium, "Li", 3),
    (Beryllium, "Be", 4),
    (Boron, "B", 5),
    (Carbon, "C", 6),
    (Nitrogen, "N", 7),
    (Oxygen, "O", 8),
    (Fluorine, "F", 9),
    (Neon, "Ne", 10),
    (Sodium, "Na", 11),
    (Magnesium, "Mg", 12),
    (Aluminum, "Al", 13),
    (Silicon, "Si", 14),
    (Phosphorus, "P", 15),
    (Sulfur, "S", 16),
    (Chlorine, "Cl", 17),
    (Argon, "Ar", 18),
    (Potassium, "K", 19),
    (Calcium, "Ca", 20),
    (Scandium, "Sc", 21),
    (Titanium, "Ti", 22),
    (Vanadium, "V", 23),
    (Chromium, "Cr", 24),
    (Manganese, "Mn", 25),
    (Iron, "Fe", 26),
    (Cobalt, "Co", 27),
    (Nickel, "Ni", 28),
    (Copper, "Cu", 29),
    (Zinc, "Zn", 30),
    (Gallium, "Ga", 31),
    (Germanium, "Ge", 32),
    (Arsenic, "As", 33),
    (Selenium, "Se", 34),
    (Bromine, "Br", 35),
    (Krypton, "Kr", 36),
    (Rubidium, "Rb", 37),
    (Strontium, "Sr", 38),
    (Yttrium, "Y", 39),
    (Zirconium, "Zr", 40),
    (Niobium, "Nb", 41),
    (Molybdenum, "Mo", 42),
    (Technetium, "Tc", 43),
    (Ruthenium, "Ru", 44),
    (Rhodium, "Rh", 45),
    (Palladium, "Pd", 46),
    (Silver, "Ag", 47),
    (Cadmium, "Cd", 48),
    (Indium, "In", 49),
    (Tin, "Sn", 50),
    (Antimony, "Sb", 51),
    (Tellurium, "Te", 52),
    (Iodine, "I", 53),
    (Xenon, "Xe", 54),
    (Cesium, "Cs", 55),
    (Barium, "Ba", 56),
    (Lanthanum, "La", 57),
    (Cerium, "Ce", 58),
    (Praseodymium, "Pr", 59),
    (Neodymium, "Nd", 60),
    (Promethium, "Pm", 61),
    (Samarium, "Sm", 62),
    (Europium, "Eu", 63),
    (Gadolinium, "Gd", 64),
    (Terbium, "Tb", 65),
    (Dysprosium, "Dy", 66),
    (Holmium, "Ho", 67),
    (Erbium, "Er", 68),
    (Thulium, "Tm", 69),
    (Ytterbium, "Yb", 70),
    (Lutetium, "Lu", 71),
    (Hafnium, "Hf", 72),
    (Tantalum, "Ta", 73),
    (Wolfram, "W", 74),
    (Rhenium, "Re", 75),
    (Osmium, "Os", 76),
    (Iridium, "Ir", 77),
    (Platinum, "Pt", 78),
    (Gold, "Au", 79),
    (Mercury, "Hg", 80),
    (Thallium, "Tl", 81),
    (Lead, "Pb", 82),
    (Bismuth, "Bi", 83),
    (Polonium, "Po", 84),
    (Astatine, "At", 85),
    (Radon, "Rn", 86),
    (Francium, "Fr", 87),
    (Radium, "Ra", 88),
    (Actinium, "Ac", 89),
    (Thorium, "Th", 90),
    (Protactinium, "Pa", 91),
    (Uranium, "U", 92),
    (Neptunium, "Np", 93),
    (Plutonium, "Pu", 94),
    (Americium, "Am", 95),
    (Curium, "Cm", 96),
    (Berkelium, "Bk", 97),
    (Californium, "Cf", 98),
    (Einsteinium, "Es", 99),
    (Fermium, "Fm", 100),
    (Mendelevium, "Md", 101),
    (Nobelium, "No", 102),
    (Lawrencium, "Lr", 103),
    (Rutherfordium, "Rf", 104),
    (Dubnium, "Db", 105),
    (Seaborgium, "Sg", 106),
    (Bohrium, "Bh", 107),
    (Hassium, "Hs", 108),
    (Meitnerium, "Mt", 109),
    (Darmstadtium, "Ds", 110),
    (Roentgenium, "Rg", 111),
    (Copernicium, "Cn", 112),
    (Nihonium, "Nh", 113),
    (Flerovium, "Fl", 114),
    (Moscovium, "Mc", 115),
    (Livermorium, "Lv", 116),
    (Tennessine, "Ts", 117),
    (Oganesson, "Og", 118),
);

/// The nodes of a [`Molecule`] graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    element: Element,
}

impl Atom {
    /// Construct an [`Atom`] of type `element`.
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Return this [`Atom`]'s element.
    pub fn element(&self) -> Element {
        self.element
    }
}

/// Bond multiplicity as read from a molfile. Ring perception ignores it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

/// Thrown by [`BondOrder::try_from`] when given anything other than the
/// molfile bond types 1 through 4.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseBondError;

impl TryFrom<usize> for BondOrder {
    type Error = ParseBondError;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BondOrder::Single),
            2 => Ok(BondOrder::Double),
            3 => Ok(BondOrder::Triple),
            4 => Ok(BondOrder::Aromatic),
            _ => Err(ParseBondError),
        }
    }
}

/// The edges of a [`Molecule`] graph.
///
/// Besides its order, a bond carries the ring it was assigned to by the last
/// SSSR search run on its molecule. The [`RingId`] is a plain index into the
/// [`RingSet`](crate::ring::RingSet) returned by that search; the bond does
/// not own or borrow the ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bond {
    order: BondOrder,
    ring: Option<RingId>,
}

impl Bond {
    /// Construct a [`Bond`] of the given order, not yet assigned to a ring.
    pub fn new(order: BondOrder) -> Self {
        Self { order, ring: None }
    }

    pub fn order(&self) -> BondOrder {
        self.order
    }

    /// Return the ring this bond was assigned to, if any.
    pub fn ring(&self) -> Option<RingId> {
        self.ring
    }

    pub(crate) fn set_ring(&mut self, ring: Option<RingId>) {
        self.ring = ring;
    }
}

/// Rejected attempts to add a bond that would break the simple-graph
/// invariants ring perception depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoleculeError {
    /// A bond references an atom that is not part of the molecule.
    #[error("bond {bond} references atom {atom}, but the molecule has only {atom_count} atoms")]
    AtomOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },

    /// A bond joins an atom to itself.
    #[error("bond {bond} joins atom {atom} to itself")]
    SelfLoop { bond: usize, atom: usize },

    /// A second bond between an already bonded pair of atoms.
    #[error("bond {bond} duplicates the bond between atoms {first} and {second}")]
    DuplicateBond {
        bond: usize,
        first: usize,
        second: usize,
    },
}

/// A simple, loopless graph with [`Atom`]s as nodes and [`Bond`]s as edges.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    graph: MGraph,
}

impl Molecule {
    /// Construct an empty [`Molecule`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a [`Molecule`] from atoms and `(first, second, order)` bond
    /// triples whose atom numbers are 0-based positions in `atoms`.
    ///
    /// Fails on the first bond that references a missing atom, joins an atom
    /// to itself, or repeats an existing bond.
    pub fn from_parts(
        atoms: impl IntoIterator<Item = Atom>,
        bonds: impl IntoIterator<Item = (usize, usize, BondOrder)>,
    ) -> Result<Self, MoleculeError> {
        let mut mol = Self::new();
        for atom in atoms {
            mol.add_atom(atom);
        }
        for (first, second, order) in bonds {
            mol.add_bond(NodeIndex::new(first), NodeIndex::new(second), order)?;
        }
        Ok(mol)
    }

    /// Construct an all-carbon, single-bonded [`Molecule`] with `atom_count`
    /// atoms and the given bonds.
    pub fn skeleton(
        atom_count: usize,
        bonds: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, MoleculeError> {
        Self::from_parts(
            std::iter::repeat(Atom::new(Element::Carbon)).take(atom_count),
            bonds
                .into_iter()
                .map(|(first, second)| (first, second, BondOrder::Single)),
        )
    }

    /// Return a representation of this molecule as an `MGraph`.
    pub(crate) fn graph(&self) -> &MGraph {
        &self.graph
    }

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    /// Append a bond between two existing, distinct, not yet bonded atoms.
    pub fn add_bond(
        &mut self,
        first: NodeIndex,
        second: NodeIndex,
        order: BondOrder,
    ) -> Result<EdgeIndex, MoleculeError> {
        let bond = self.graph.edge_count();
        let atom_count = self.graph.node_count();
        for atom in [first, second] {
            if atom.index() >= atom_count {
                return Err(MoleculeError::AtomOutOfRange {
                    bond,
                    atom: atom.index(),
                    atom_count,
                });
            }
        }
        if first == second {
            return Err(MoleculeError::SelfLoop {
                bond,
                atom: first.index(),
            });
        }
        if self.graph.find_edge(first, second).is_some() {
            return Err(MoleculeError::DuplicateBond {
                bond,
                first: first.index(),
                second: second.index(),
            });
        }
        Ok(self.graph.add_edge(first, second, Bond::new(order)))
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atom(&self, ix: NodeIndex) -> Option<&Atom> {
        self.graph.node_weight(ix)
    }

    pub fn bond(&self, ix: EdgeIndex) -> Option<&Bond> {
        self.graph.edge_weight(ix)
    }

    /// Return the two atoms joined by bond `ix`, in the order they were given
    /// when the bond was added.
    pub fn bond_endpoints(&self, ix: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(ix)
    }

    /// Return the bond joining `first` and `second`, if any.
    pub fn bond_between(&self, first: NodeIndex, second: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(first, second)
    }

    /// Iterate over atom indices in insertion order.
    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Iterate over bond indices in insertion order.
    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> {
        self.graph.edge_indices()
    }

    /// Return the ring bond `ix` was assigned to by the last SSSR search.
    pub fn bond_ring(&self, ix: EdgeIndex) -> Option<RingId> {
        self.graph.edge_weight(ix).and_then(Bond::ring)
    }

    pub(crate) fn bonds_mut(&mut self) -> impl Iterator<Item = &mut Bond> {
        self.graph.edge_weights_mut()
    }

    pub(crate) fn bond_mut(&mut self, ix: EdgeIndex) -> Option<&mut Bond> {
        self.graph.edge_weight_mut(ix)
    }
}
