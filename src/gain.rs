use crate::attribute::cosine_similarity;
use crate::community::Community;
use crate::graph::{AttrGraph, VInt};

/// Scores the placement of a vertex into a candidate community, mixing the
/// Newman modularity gain and the mean attribute similarity with `alpha`.
pub struct GainEvaluator<'a> {
    graph: &'a AttrGraph,
    alpha: f64,
}

impl<'a> GainEvaluator<'a> {
    pub fn new(graph: &'a AttrGraph, alpha: f64) -> GainEvaluator<'a> {
        GainEvaluator { graph, alpha }
    }

    /// Modularity gain of adding `vertex` to `community`, which must not contain it.
    pub fn structural_gain(&self, vertex: VInt, community: &Community) -> f64 {
        let two_m = 2.0 * self.graph.total_weight();
        if two_m == 0.0 {
            return 0.0;
        }
        let edges_to: f64 = community
            .get_vertex_set()
            .iter()
            .map(|member| self.graph.edge_weight(&vertex, member))
            .sum();
        let vertex_weight = self.graph.degree(&vertex);
        (edges_to - (vertex_weight / two_m) * community.weight_sum(self.graph)) / two_m
    }

    /// Mean cosine similarity between `vertex` and the members of `community`.
    pub fn attribute_gain(&self, vertex: VInt, community: &Community) -> f64 {
        let vertex_attr = self.graph.get_attributes(&vertex);
        let similarity_sum: f64 = community
            .get_vertex_set()
            .iter()
            .map(|member| cosine_similarity(vertex_attr, self.graph.get_attributes(member)))
            .sum();
        similarity_sum / community.size().max(1) as f64
    }

    /// The combined gain `alpha * Q_struct + (1 - alpha) * Q_attr`.
    /// A term whose weight is zero is not computed.
    pub fn gain(&self, vertex: VInt, community: &Community) -> f64 {
        let q_struct = if self.alpha == 0.0 {
            0.0
        } else {
            self.structural_gain(vertex, community)
        };
        let q_attr = if self.alpha == 1.0 {
            0.0
        } else {
            self.attribute_gain(vertex, community)
        };
        self.alpha * q_struct + (1.0 - self.alpha) * q_attr
    }
}
