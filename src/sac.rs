use anyhow::Result;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aggregate::aggregate;
use crate::community::Partition;
use crate::community_algo::LocalSearch;
use crate::config::SacConfig;
use crate::graph::{AttrGraph, VInt};
use crate::util::{elapsed_micros, get_current_timestamp};

/// The final communities of a run, over the ids of the input graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Membership {
    pub communities: Vec<Vec<VInt>>, // Original vertex ids of each community.
    pub levels: usize, // Number of levels whose result was kept.
    pub level_sizes: Vec<usize>, // Community count of each kept level.
}

impl Membership {
    pub fn community_count(&self) -> usize {
        self.communities.len()
    }
}

/// Multi-level SAC-1: local search, then contraction of every community into a
/// super vertex, repeated until a level no longer reduces the community count.
pub struct Sac1 {
    config: SacConfig,
}

impl Sac1 {
    pub fn new(config: SacConfig) -> Result<Sac1> {
        config.validate()?;
        Ok(Sac1 { config })
    }

    pub fn config(&self) -> &SacConfig {
        &self.config
    }

    /// Run all levels on `graph`.
    ///
    /// When a level yields as many communities as the one before it, the run stops
    /// and the previous level's communities are returned.
    pub fn execute(&self, graph: &AttrGraph) -> Membership {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut membership = Membership::default();
        let mut coarse: Option<AttrGraph> = None;

        for level in 1..=self.config.max_levels {
            let level_graph = coarse.as_ref().unwrap_or(graph);
            let start = get_current_timestamp();
            let (partition, stats) = LocalSearch::new(level_graph, &self.config).execute(&mut rng);
            let expanded = if level == 1 {
                partition.member_lists()
            } else {
                expand_communities(&partition, &membership.communities)
            };
            info!(
                "Level {}: {} vertices, {} edges -> {} communities ({} passes, {} moves, {} us)",
                level,
                level_graph.get_vertex_count(),
                level_graph.get_edge_count(),
                expanded.len(),
                stats.passes,
                stats.moves,
                elapsed_micros(start)
            );

            if expanded.len() == membership.communities.len() {
                info!("Community count unchanged at level {}, stop", level);
                return membership;
            }

            membership.communities = expanded;
            membership.levels = level;
            membership.level_sizes.push(membership.communities.len());
            if level < self.config.max_levels {
                coarse = Some(aggregate(level_graph, &partition));
            }
        }
        info!("Level budget {} exhausted", self.config.max_levels);
        membership
    }
}

/// Replace every super vertex of a partition with the original vertices it stands for.
fn expand_communities(partition: &Partition, previous: &[Vec<VInt>]) -> Vec<Vec<VInt>> {
    partition
        .iter()
        .map(|community| {
            community
                .get_vertex_set()
                .iter()
                .flat_map(|super_vertex| previous[*super_vertex as usize].iter().copied())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod test_sac {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::aggregate::aggregate;
    use crate::community::test_community::is_exact_partition;
    use crate::community_algo::LocalSearch;
    use crate::config::SacConfig;
    use crate::graph::{AttrGraph, VInt};
    use crate::sac::Sac1;

    fn two_triangles() -> AttrGraph {
        let mut attributes = vec![vec![1.0, 0.0]; 3];
        attributes.extend(vec![vec![0.0, 1.0]; 3]);
        let edges = vec![
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 0, 1.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
            (5, 3, 1.0),
        ];
        AttrGraph::from_edges(vec!["a".to_owned(), "b".to_owned()], attributes, edges).unwrap()
    }

    // Rings of 5 vertices, each ring linked to the next one by a single edge.
    fn ring_of_rings(rings: u32) -> AttrGraph {
        let size = 5u32;
        let mut attributes = Vec::new();
        let mut edges = Vec::new();
        for ring in 0..rings {
            for i in 0..size {
                let v = ring * size + i;
                attributes.push(vec![(ring % 3) as f64 + 0.1 * i as f64, (ring % 2) as f64, 1.0]);
                edges.push((v, ring * size + (i + 1) % size, 1.0));
                edges.push((v, ring * size + (i + 2) % size, 1.0));
            }
            edges.push((ring * size, ((ring + 1) % rings) * size + 3, 1.0));
        }
        let schema = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        AttrGraph::from_edges(schema, attributes, edges).unwrap()
    }

    fn as_sets(communities: &[Vec<VInt>]) -> BTreeSet<BTreeSet<VInt>> {
        communities.iter().map(|c| c.iter().copied().collect()).collect()
    }

    #[test]
    fn test_two_triangles() {
        let sac = Sac1::new(SacConfig::with_alpha(0.5)).unwrap();
        let membership = sac.execute(&two_triangles());
        let expected = BTreeSet::from([BTreeSet::from([0, 1, 2]), BTreeSet::from([3, 4, 5])]);
        assert_eq!(membership.community_count(), 2);
        assert_eq!(as_sets(&membership.communities), expected);
        assert_eq!(membership.levels, 1);
        assert_eq!(membership.level_sizes, vec![2]);
    }

    #[test]
    fn test_no_edges() {
        let g = AttrGraph::new(vec!["a".to_owned()], vec![vec![1.0], vec![2.0], vec![0.0]]).unwrap();
        let membership = Sac1::new(SacConfig::with_alpha(0.5)).unwrap().execute(&g);
        assert_eq!(membership.communities, vec![vec![0], vec![1], vec![2]]);
        assert_eq!(membership.levels, 1);
    }

    #[test]
    fn test_empty_graph() {
        let membership = Sac1::new(SacConfig::with_alpha(0.5))
            .unwrap()
            .execute(&AttrGraph::default());
        assert!(membership.communities.is_empty());
        assert_eq!(membership.levels, 0);
    }

    #[test]
    fn test_invalid_alpha() {
        let err = Sac1::new(SacConfig::with_alpha(1.5)).err().unwrap();
        assert_eq!(err.to_string(), "Alpha should be between 0 and 1.");
    }

    #[test]
    fn test_reconstruction_and_monotonic_count() {
        let g = ring_of_rings(12);
        for alpha in [0.0, 0.3, 0.5, 1.0] {
            for seed in 0..3 {
                let config = SacConfig {
                    seed,
                    ..SacConfig::with_alpha(alpha)
                };
                let membership = Sac1::new(config).unwrap().execute(&g);
                assert!(is_exact_partition(&membership.communities, 60));
                assert!(membership.level_sizes.windows(2).all(|w| w[0] > w[1]));
                assert_eq!(membership.level_sizes.last(), Some(&membership.community_count()));
            }
        }
    }

    #[test]
    fn test_reproducible() {
        let g = ring_of_rings(8);
        let config = SacConfig {
            seed: 42,
            ..SacConfig::with_alpha(0.7)
        };
        let first = Sac1::new(config.clone()).unwrap().execute(&g);
        let second = Sac1::new(config).unwrap().execute(&g);
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_budget() {
        let g = ring_of_rings(12);
        let config = SacConfig {
            max_levels: 1,
            ..SacConfig::with_alpha(1.0)
        };
        let membership = Sac1::new(config).unwrap().execute(&g);
        assert_eq!(membership.levels, 1);
        assert!(is_exact_partition(&membership.communities, 60));
    }

    #[test]
    fn test_converged_level_is_idempotent() {
        let g = two_triangles();
        let config = SacConfig::with_alpha(0.5);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let (partition, stats) = LocalSearch::new(&g, &config).execute(&mut rng);
        assert!(stats.stabilized);

        let coarse = aggregate(&g, &partition);
        assert_eq!(coarse.get_vertex_count(), partition.community_count() as u32);
        let (again, _) = LocalSearch::new(&coarse, &config).execute(&mut rng);
        assert_eq!(again.community_count(), coarse.get_vertex_count() as usize);
        assert_eq!(again.member_lists(), vec![vec![0], vec![1]]);
    }
}
