use crate::attribute::cosine_similarity;
use crate::graph::{AttrGraph, VInt};

/// Scores of a final partition on the input graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualityReport {
    pub modularity: f64,
    pub attribute_cohesion: f64,
    pub composite: f64,
}

/// Score `communities`, a partition of the vertices of `graph`.
pub fn evaluate(graph: &AttrGraph, communities: &[Vec<VInt>], alpha: f64) -> QualityReport {
    let mut com_structure = vec![0usize; graph.get_vertex_count() as usize];
    for (index, community) in communities.iter().enumerate() {
        for vertex in community {
            com_structure[*vertex as usize] = index;
        }
    }
    let modularity = final_q(graph, &com_structure, communities.len());
    let attribute_cohesion = attribute_cohesion(graph, communities);
    QualityReport {
        modularity,
        attribute_cohesion,
        composite: alpha * modularity + (1.0 - alpha) * attribute_cohesion,
    }
}

/// Newman modularity, `sum_c in_c / m - (deg_c / 2m)^2`.
fn final_q(graph: &AttrGraph, com_structure: &[usize], community_count: usize) -> f64 {
    let total_weight = graph.total_weight();
    if total_weight == 0.0 {
        return 0.0;
    }
    let mut internal = vec![0.0f64; community_count];
    let mut degrees = vec![0.0f64; community_count];
    for vertex in 0..graph.get_vertex_count() {
        degrees[com_structure[vertex as usize]] += graph.degree(&vertex);
    }
    for (u, v, weight) in graph.edges() {
        if com_structure[u as usize] == com_structure[v as usize] {
            internal[com_structure[u as usize]] += weight;
        }
    }
    let mut res = 0.0f64;
    for i in 0..community_count {
        res += internal[i] / total_weight - (degrees[i] / (2.0 * total_weight)).powi(2);
    }
    res
}

/// Average over all vertices of the mean similarity to the rest of their community.
fn attribute_cohesion(graph: &AttrGraph, communities: &[Vec<VInt>]) -> f64 {
    let vertex_count = graph.get_vertex_count();
    if vertex_count == 0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    for community in communities.iter().filter(|c| c.len() > 1) {
        for (i, u) in community.iter().enumerate() {
            let similarity: f64 = community
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, v)| cosine_similarity(graph.get_attributes(u), graph.get_attributes(v)))
                .sum();
            sum += similarity / (community.len() - 1) as f64;
        }
    }
    sum / vertex_count as f64
}
