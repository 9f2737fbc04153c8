//! SAC-1 community detection on attributed graphs.
//!
//! Vertices carry numeric attribute vectors next to their weighted edges. The
//! detection mixes the Newman modularity gain with the cosine similarity of
//! attributes, `alpha` weighting the former, and runs the greedy local search
//! level by level, contracting every community into a super vertex between levels.
//!
//! ```no_run
//! use sac_community::{AttrGraph, Sac1, SacConfig};
//!
//! let graph = AttrGraph::from_files("data/attrlist.csv", "data/edgelist.txt")?;
//! let membership = Sac1::new(SacConfig::with_alpha(0.5))?.execute(&graph);
//! for community in &membership.communities {
//!     println!("{:?}", community);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod attribute;
pub mod comm_io;
pub mod community;
pub mod community_algo;
pub mod config;
pub mod gain;
pub mod graph;
pub mod logger;
pub mod quality;
pub mod sac;
mod util;

pub use config::SacConfig;
pub use graph::{AttrGraph, VInt};
pub use sac::{Membership, Sac1};
