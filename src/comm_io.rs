use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::graph::VInt;

/// Name of the community file of a run, e.g. `communities_5.txt` for alpha 0.5.
pub fn output_file_name(alpha: f64) -> String {
    let name = if alpha == 0.0 {
        "0".to_owned()
    } else if alpha == 0.5 {
        "5".to_owned()
    } else if alpha == 1.0 {
        "1".to_owned()
    } else {
        alpha.to_string()
    };
    format!("communities_{}.txt", name)
}

/// Write one line per community, vertex ids separated by ", ".
pub fn write_communities<W: Write>(writer: &mut W, communities: &[Vec<VInt>]) -> Result<()> {
    for community in communities {
        writeln!(writer, "{}", community.iter().join(", "))?;
    }
    Ok(())
}

/// Write the communities of a run into `dir`, returns the path of the file.
pub fn write_communities_file(
    dir: impl AsRef<Path>,
    alpha: f64,
    communities: &[Vec<VInt>],
) -> Result<PathBuf> {
    let path = dir.as_ref().join(output_file_name(alpha));
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_communities(&mut writer, communities)
        .and_then(|_| writer.flush().map_err(Into::into))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
