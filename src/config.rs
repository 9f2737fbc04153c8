use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum local-search passes over the vertices of one level.
pub const MAX_PASSES: usize = 15;

/// Maximum number of levels the driver runs.
pub const MAX_LEVELS: usize = 15;

/// Buffer size used when reading graph files.
pub(crate) const READ_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Default seed of the vertex visiting order.
pub const DEFAULT_SEED: u64 = 0;

/// The configuration of one SAC-1 run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SacConfig {
    pub alpha: f64, // Weight of the structural gain, 1 - alpha goes to attribute similarity.
    pub seed: u64, // Seed of the shuffled visiting order, fixed once per run.
    pub max_passes: usize, // Pass budget of each level.
    pub max_levels: usize, // Level budget of the driver.
    pub parallel_gain: bool, // Evaluate the candidate communities of a vertex with rayon.
}

impl Default for SacConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            seed: DEFAULT_SEED,
            max_passes: MAX_PASSES,
            max_levels: MAX_LEVELS,
            parallel_gain: false,
        }
    }
}

impl SacConfig {
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Default::default()
        }
    }

    /// Load a configuration from a yaml file, missing fields take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config: SacConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            bail!("Alpha should be between 0 and 1.");
        }
        if self.max_passes == 0 || self.max_levels == 0 {
            bail!("Pass and level budgets should be positive.");
        }
        Ok(())
    }
}
