use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{
    components::cyclomatic_number,
    loader::parse_molfile_str,
    molecule::Molecule,
    sssr::sssr as find_sssr,
};

fn load(mol_block: &str) -> PyResult<Molecule> {
    parse_molfile_str(mol_block).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Return the SSSR of a molfile block as lists of 0-based atom indices, each
/// in ring order.
#[pyfunction]
fn sssr(mol_block: String) -> PyResult<Vec<Vec<usize>>> {
    let mut mol = load(&mol_block)?;
    let rings = find_sssr(&mut mol);
    Ok(rings
        .rings()
        .iter()
        .map(|r| r.atoms().iter().map(|a| a.index()).collect())
        .collect())
}

/// Return the number of independent rings of a molfile block.
#[pyfunction]
fn ring_count(mol_block: String) -> PyResult<usize> {
    Ok(cyclomatic_number(&load(&mol_block)?))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
#[pyo3(name = "sssr")]
fn _sssr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sssr, m)?)?;
    m.add_function(wrap_pyfunction!(ring_count, m)?)?;
    Ok(())
}
