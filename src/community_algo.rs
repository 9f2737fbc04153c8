use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use crate::community::{Community, CommunityId, Partition};
use crate::config::SacConfig;
use crate::gain::GainEvaluator;
use crate::graph::{AttrGraph, VInt};

/// The single-level local search of SAC-1.
///
/// Starting from singletons, each pass visits the vertices in a shuffled order,
/// takes the vertex out of its community and puts it into the community with the
/// largest positive combined gain. Among equal gains the community created first
/// wins. A vertex that lands back in the community it was taken from does not
/// count as a move. A pass in which no vertex changes community ends the search,
/// as does the pass budget.
pub struct LocalSearch<'a> {
    graph: &'a AttrGraph,
    evaluator: GainEvaluator<'a>,
    max_passes: usize,
    parallel_gain: bool,
}

/// What a local search run did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub passes: usize,
    pub moves: usize,
    pub stabilized: bool,
}

impl<'a> LocalSearch<'a> {
    pub fn new(graph: &'a AttrGraph, config: &SacConfig) -> LocalSearch<'a> {
        LocalSearch {
            graph,
            evaluator: GainEvaluator::new(graph, config.alpha),
            max_passes: config.max_passes,
            parallel_gain: config.parallel_gain,
        }
    }

    /// Run the search from singletons and return the resulting partition.
    pub fn execute(&self, rng: &mut StdRng) -> (Partition, SearchStats) {
        let mut partition = Partition::singletons(self.graph);
        let mut stats = SearchStats {
            passes: 0,
            moves: 0,
            stabilized: false,
        };
        // Nothing to optimize without edges.
        if self.graph.get_edge_count() == 0 {
            return (partition, stats);
        }

        let mut vertices: Vec<VInt> = (0..self.graph.get_vertex_count()).collect();
        while stats.passes < self.max_passes {
            stats.passes += 1;
            vertices.shuffle(rng);
            let mut pass_moves = 0usize;
            for vertex in &vertices {
                if self.update_vertex(&mut partition, *vertex) {
                    pass_moves += 1;
                }
            }
            debug!("Pass {}: {} moves, {} communities", stats.passes, pass_moves, partition.community_count());
            stats.moves += pass_moves;
            if pass_moves == 0 {
                stats.stabilized = true;
                break;
            }
        }
        (partition, stats)
    }

    /// Re-place one vertex, returns whether it changed community.
    fn update_vertex(&self, partition: &mut Partition, vertex: VInt) -> bool {
        let origin = partition.detach(vertex);
        match self.best_community(partition, vertex) {
            Some(target) if target != origin => {
                partition.attach(vertex, target);
                partition.discard_if_empty(origin);
                true
            }
            // Either the origin itself is the best place or nothing has a positive gain.
            _ => {
                partition.attach(vertex, origin);
                false
            }
        }
    }

    /// The first community, in creation order, with the largest positive gain.
    fn best_community(&self, partition: &Partition, vertex: VInt) -> Option<CommunityId> {
        let gains: Vec<(CommunityId, f64)> = if self.parallel_gain {
            let candidates: Vec<&Community> = partition.iter().collect();
            candidates
                .par_iter()
                .map(|community| (community.id(), self.evaluator.gain(vertex, community)))
                .collect()
        } else {
            partition
                .iter()
                .map(|community| (community.id(), self.evaluator.gain(vertex, community)))
                .collect()
        };

        let mut best = 0.0f64;
        let mut best_community: Option<CommunityId> = None;
        for (com_id, q_value) in gains {
            if q_value > best {
                best = q_value;
                best_community = Some(com_id);
            }
        }
        best_community
    }
}
