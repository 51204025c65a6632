//! Parse MDL V2000 molfiles and SD files into [`Molecule`]s.
//!
//! Only the connection table is read: the counts line, the element symbol of
//! each atom, and the atom numbers and type of each bond. Coordinates,
//! charges, and property blocks are skipped.

use std::{fs, path::Path};

use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::molecule::{Atom, BondOrder, Element, Molecule, MoleculeError};

/// Line index of the counts line; the three header lines come first.
const COUNTS_LINE: usize = 3;

/// Thrown when a molfile cannot be turned into a [`Molecule`]. Line numbers
/// are 1-based positions within the record.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read molfile: {0}")]
    Io(#[from] std::io::Error),

    #[error("record ends before line {line}")]
    MissingLine { line: usize },

    #[error("line {line}: malformed {field}")]
    BadField { line: usize, field: &'static str },

    #[error("line {line}: unknown element symbol {symbol:?}")]
    UnknownElement { line: usize, symbol: String },

    #[error("line {line}: unsupported bond type {value}")]
    BadBondType { line: usize, value: usize },

    #[error("line {line}: {source}")]
    Molecule {
        line: usize,
        #[source]
        source: MoleculeError,
    },

    #[error("file contains no molecule records")]
    Empty,
}

/// Read the first molecule of the molfile at `path`.
pub fn parse(path: &Path) -> Result<Molecule, LoadError> {
    parse_molfile_str(&fs::read_to_string(path)?)
}

/// Read every molecule of the SD file at `path`.
pub fn parse_sdf(path: &Path) -> Result<Vec<Molecule>, LoadError> {
    parse_sdf_str(&fs::read_to_string(path)?)
}

/// Parse the first record of a molfile or SD file.
pub fn parse_molfile_str(input: &str) -> Result<Molecule, LoadError> {
    let lines: Vec<&str> = input.lines().collect();
    parse_record(&lines)
}

/// Parse every `$$$$`-terminated record of an SD file.
pub fn parse_sdf_str(input: &str) -> Result<Vec<Molecule>, LoadError> {
    let mut mols = Vec::new();
    let mut record = Vec::new();
    for line in input.lines() {
        if line.trim_end() == "$$$$" {
            mols.push(parse_record(&record)?);
            record.clear();
        } else {
            record.push(line);
        }
    }
    if record.iter().any(|l| !l.trim().is_empty()) {
        mols.push(parse_record(&record)?);
    }
    if mols.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(mols)
}

fn parse_record(lines: &[&str]) -> Result<Molecule, LoadError> {
    let counts = line_at(lines, COUNTS_LINE)?;
    let atom_count = fixed_field(counts, 0, COUNTS_LINE, "atom count")?;
    let bond_count = fixed_field(counts, 1, COUNTS_LINE, "bond count")?;

    let mut mol = Molecule::new();
    let atom_start = COUNTS_LINE + 1;
    for ix in atom_start..atom_start + atom_count {
        let line = line_at(lines, ix)?;
        mol.add_atom(Atom::new(parse_atom_line(line, ix)?));
    }

    let bond_start = atom_start + atom_count;
    for ix in bond_start..bond_start + bond_count {
        let line = line_at(lines, ix)?;
        let first = fixed_field(line, 0, ix, "first bond atom")?;
        let second = fixed_field(line, 1, ix, "second bond atom")?;
        let kind = fixed_field(line, 2, ix, "bond type")?;
        let order = BondOrder::try_from(kind).map_err(|_| LoadError::BadBondType {
            line: ix + 1,
            value: kind,
        })?;
        if first == 0 || second == 0 {
            return Err(LoadError::BadField {
                line: ix + 1,
                field: "bond atom number",
            });
        }
        mol.add_bond(NodeIndex::new(first - 1), NodeIndex::new(second - 1), order)
            .map_err(|source| LoadError::Molecule {
                line: ix + 1,
                source,
            })?;
    }

    Ok(mol)
}

fn line_at<'a>(lines: &[&'a str], ix: usize) -> Result<&'a str, LoadError> {
    lines
        .get(ix)
        .copied()
        .ok_or(LoadError::MissingLine { line: ix + 1 })
}

/// Parse the `slot`-th three-character integer field of a line.
fn fixed_field(
    line: &str,
    slot: usize,
    ix: usize,
    field: &'static str,
) -> Result<usize, LoadError> {
    line.get(3 * slot..3 * slot + 3)
        .and_then(|s| s.trim().parse().ok())
        .ok_or(LoadError::BadField {
            line: ix + 1,
            field,
        })
}

/// Read the element symbol, the fourth whitespace-separated atom field.
fn parse_atom_line(line: &str, ix: usize) -> Result<Element, LoadError> {
    let symbol = line.split_whitespace().nth(3).ok_or(LoadError::BadField {
        line: ix + 1,
        field: "atom symbol",
    })?;
    symbol.parse().map_err(|_| LoadError::UnknownElement {
        line: ix + 1,
        symbol: symbol.to_string(),
    })
}
