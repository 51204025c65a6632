//! Smallest Set of Smallest Rings (SSSR) perception for molecular graphs.
//!
//! ```
//! use sssr::{molecule::Molecule, sssr::sssr};
//!
//! // Naphthalene's carbon skeleton.
//! let mut mol = Molecule::skeleton(
//!     10,
//!     [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0),
//!      (4, 6), (6, 7), (7, 8), (8, 9), (9, 5)],
//! )
//! .unwrap();
//! let rings = sssr(&mut mol);
//! assert_eq!(rings.sizes(), vec![6, 6]);
//! ```

// Molecule definition and validated construction
pub mod molecule;

// Rings and ring sets
pub mod ring;

// Data IO
pub mod loader;

// Components and the cyclomatic number
pub mod components;

// Leaf pruning down to the cyclic core
pub mod reduce;

// The hard bit: enumerate candidate rings
pub mod enumerate;

// Greedy SSSR selection
pub mod select;

// Top-level search and bond annotation
pub mod sssr;

// Python library
#[cfg(feature = "python")]
pub mod python;
