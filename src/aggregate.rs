use std::collections::BTreeMap;

use crate::attribute::{mean_vector, AttrVector};
use crate::community::Partition;
use crate::graph::{AttrGraph, VInt};

/// Contract a level's graph along its partition into the graph of the next level.
///
/// Community `i` (in creation order) becomes super vertex `i`, whose attribute
/// vector is the mean of its members'. Edges between two super vertices are merged
/// by summing their weights, edges inside a community disappear.
pub fn aggregate(graph: &AttrGraph, partition: &Partition) -> AttrGraph {
    let membership = partition.membership();
    contract_vertices(graph, &membership, partition.community_count())
}

/// Merge the vertices sharing a membership value, `membership[v]` being the super
/// vertex of `v` in `0..count`.
pub fn contract_vertices(graph: &AttrGraph, membership: &[VInt], count: usize) -> AttrGraph {
    // Group the members of each super vertex.
    let mut groups: Vec<Vec<&AttrVector>> = vec![Vec::new(); count];
    for (vertex, super_vertex) in membership.iter().enumerate() {
        groups[*super_vertex as usize].push(graph.get_attributes(&(vertex as VInt)));
    }
    let attributes: Vec<AttrVector> = groups
        .into_iter()
        .map(|members| mean_vector(members, graph.dimension()))
        .collect();

    // Sum parallel edges, drop self-loops.
    let mut merged_edges = BTreeMap::<(VInt, VInt), f64>::new();
    for (u, v, weight) in graph.edges() {
        let (src, dst) = (membership[u as usize], membership[v as usize]);
        if src == dst {
            continue;
        }
        let key = if src < dst { (src, dst) } else { (dst, src) };
        *merged_edges.entry(key).or_insert(0.0) += weight;
    }

    let mut coarse = AttrGraph {
        schema: graph.schema.clone(),
        attributes,
        adj_map: vec![BTreeMap::new(); count],
        weight_list: vec![0.0; count],
        v_size: count as u32,
        e_size: 0,
        graph_weight_sum: 0.0,
    };
    for ((src, dst), weight) in merged_edges {
        coarse.adj_map[src as usize].insert(dst, weight);
        coarse.adj_map[dst as usize].insert(src, weight);
        coarse.weight_list[src as usize] += weight;
        coarse.weight_list[dst as usize] += weight;
        coarse.e_size += 1;
        coarse.graph_weight_sum += weight;
    }
    coarse
}
