use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use sac_community::comm_io::write_communities_file;
use sac_community::logger::init_logger;
use sac_community::quality::evaluate;
use sac_community::{AttrGraph, Sac1, SacConfig};

/// Attributed community detection with SAC-1.
#[derive(Parser, Debug)]
#[command(name = "sac1", version, about)]
struct Cli {
    /// Weight of structural modularity, 1 - ALPHA weights attribute similarity (0 to 1).
    #[arg(allow_negative_numbers = true)]
    alpha: f64,

    /// Attribute csv file, header line of attribute names then one row per vertex.
    #[arg(long, default_value = "data/fb_caltech_small_attrlist.csv")]
    attributes: PathBuf,

    /// Edge list file, `u v [weight]` per line.
    #[arg(long, default_value = "data/fb_caltech_small_edgelist.txt")]
    edges: PathBuf,

    /// Directory receiving the community file.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Seed of the vertex visiting order.
    #[arg(long)]
    seed: Option<u64>,

    /// Yaml file with run parameters, ALPHA and --seed override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate candidate communities in parallel.
    #[arg(long)]
    parallel: bool,

    /// Directory of the log file.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

/// Assemble the run configuration and reject it before any file is touched.
fn build_sac(cli: &Cli) -> Result<Sac1> {
    let mut config = match &cli.config {
        Some(path) => SacConfig::from_yaml_file(path)?,
        None => SacConfig::default(),
    };
    config.alpha = cli.alpha;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.parallel_gain |= cli.parallel;
    Sac1::new(config)
}

fn run(cli: &Cli, sac: &Sac1) -> Result<()> {
    let graph = AttrGraph::from_files(&cli.attributes, &cli.edges)?;
    let membership = sac.execute(&graph);
    let report = evaluate(&graph, &membership.communities, sac.config().alpha);
    info!("Final: {} communities after {} levels, {:?}", membership.community_count(), membership.levels, report);

    let path = write_communities_file(&cli.output_dir, sac.config().alpha, &membership.communities)?;
    println!(
        "{} communities written to {}",
        membership.community_count(),
        path.display()
    );
    println!(
        "modularity: {:.6}, attribute cohesion: {:.6}, composite: {:.6}",
        report.modularity, report.attribute_cohesion, report.composite
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let sac = match build_sac(&cli) {
        Ok(sac) => sac,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logger(&cli.log_dir) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    match run(&cli, &sac) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
