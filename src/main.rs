use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use sssr::{
    enumerate::{FinderMode, DEFAULT_MAX_DEPTH},
    loader,
    molecule::Molecule,
    ring::RingSet,
    select::SelectMode,
    sssr::{sssr_search, SearchConfig},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Molfiles (.mol) or SD files (.sdf) to process.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Candidate ring enumeration algorithm.
    #[arg(long, value_enum, default_value_t = FinderMode::Fingers)]
    finder: FinderMode,

    /// Rule for accepting candidate rings.
    #[arg(long, value_enum, default_value_t = SelectMode::NewBond)]
    select: SelectMode,

    /// Finger growth steps between blocker expansions.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Process files one at a time instead of in parallel.
    #[arg(long)]
    serial: bool,
}

fn load(path: &Path) -> Result<Vec<Molecule>> {
    let mols = if path.extension().and_then(OsStr::to_str) == Some("sdf") {
        loader::parse_sdf(path)?
    } else {
        vec![loader::parse(path)?]
    };
    Ok(mols)
}

fn report(path: &Path, mol: &Molecule, rings: &RingSet) -> String {
    let mut out = format!("{}: {} rings\n", path.display(), rings.len());
    for (id, ring) in rings.iter() {
        let atoms: Vec<String> = ring
            .atoms()
            .iter()
            .map(|&a| match mol.atom(a) {
                Some(atom) => format!("{}{}", atom.element(), a.index() + 1),
                None => (a.index() + 1).to_string(),
            })
            .collect();
        out.push_str(&format!("  {id} ({}): {}\n", ring.len(), atoms.join(" ")));
    }
    out
}

fn run(path: &Path, config: &SearchConfig) -> Result<String> {
    let mols = load(path).with_context(|| format!("failed to load {}", path.display()))?;
    let mut out = String::new();
    for mut mol in mols {
        let rings = sssr_search(&mut mol, config);
        info!("{}: {} rings", path.display(), rings.len());
        out.push_str(&report(path, &mol, &rings));
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = SearchConfig::default()
        .with_finder(cli.finder)
        .with_select(cli.select)
        .with_max_depth(cli.max_depth);

    let reports: Vec<Result<String>> = if cli.serial {
        cli.paths.iter().map(|p| run(p, &config)).collect()
    } else {
        cli.paths.par_iter().map(|p| run(p, &config)).collect()
    };

    for report in reports {
        print!("{}", report?);
    }
    Ok(())
}
