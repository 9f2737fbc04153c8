use std::collections::BTreeMap;

use crate::graph::{AttrGraph, VInt};

pub type CommunityId = u32;

// Define the community structure.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Community {
    id: CommunityId, // ID of community.
    vertex_set: Vec<VInt>, // Vertex ids in this community, in joining order.
}

impl Community {
    fn new(id: CommunityId) -> Community {
        // Create a new empty community.
        Community {
            id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> CommunityId {
        self.id
    }

    pub fn get_vertex_set(&self) -> &[VInt] {
        &self.vertex_set
    }

    /// Sum of the weighted degrees of the members, recomputed on every call so
    /// it never drifts from the member set.
    pub fn weight_sum(&self, graph: &AttrGraph) -> f64 {
        self.vertex_set.iter().map(|vertex| graph.degree(vertex)).sum()
    }

    pub fn size(&self) -> usize {
        // Get the vertex count in this community.
        self.vertex_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_set.is_empty()
    }

    fn add(&mut self, vertex: VInt) {
        self.vertex_set.push(vertex);
    }

    fn remove(&mut self, vertex: VInt) {
        self.vertex_set.retain(|&n| n != vertex);
    }
}

/// A partition of the vertices of one level into communities.
///
/// Communities are kept in a `BTreeMap` keyed by id. Ids are handed out in
/// ascending order and never reused, so iterating the map visits communities
/// in creation order, which fixes both the tie-break order of the local search
/// and the numbering of super vertices during aggregation.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Partition {
    communities: BTreeMap<CommunityId, Community>,
    vertex_community_map: Vec<CommunityId>, // Locate the community of a vertex.
}

impl Partition {
    /// One community per vertex, community `i` holding vertex `i`.
    pub fn singletons(graph: &AttrGraph) -> Partition {
        let vertex_count = graph.get_vertex_count();
        let mut partition = Partition {
            communities: BTreeMap::new(),
            vertex_community_map: Vec::with_capacity(vertex_count as usize),
        };
        for vertex in 0..vertex_count {
            let mut community = Community::new(vertex);
            community.add(vertex);
            partition.communities.insert(vertex, community);
            partition.vertex_community_map.push(vertex);
        }
        partition
    }

    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_community_map.len()
    }

    pub fn community_of(&self, vertex: &VInt) -> CommunityId {
        self.vertex_community_map[*vertex as usize]
    }

    pub fn get(&self, id: &CommunityId) -> Option<&Community> {
        self.communities.get(id)
    }

    /// Communities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }

    /// Take a vertex out of its community and return that community's id.
    /// The community is kept even when it becomes empty, until the vertex is
    /// placed again and `discard_if_empty` is called.
    pub(crate) fn detach(&mut self, vertex: VInt) -> CommunityId {
        let origin = self.vertex_community_map[vertex as usize];
        if let Some(community) = self.communities.get_mut(&origin) {
            community.remove(vertex);
        }
        origin
    }

    /// Put a detached vertex into an existing community.
    pub(crate) fn attach(&mut self, vertex: VInt, to: CommunityId) {
        if let Some(community) = self.communities.get_mut(&to) {
            community.add(vertex);
            self.vertex_community_map[vertex as usize] = to;
        }
    }

    pub(crate) fn discard_if_empty(&mut self, id: CommunityId) {
        if self.communities.get(&id).map_or(false, Community::is_empty) {
            self.communities.remove(&id);
        }
    }

    /// Move a vertex from its community to another one, dropping the old community if emptied.
    pub fn move_vertex_to(&mut self, vertex: VInt, to: CommunityId) {
        if !self.communities.contains_key(&to) {
            return;
        }
        let origin = self.detach(vertex);
        self.attach(vertex, to);
        self.discard_if_empty(origin);
    }

    /// Member lists of all communities, in creation order.
    pub fn member_lists(&self) -> Vec<Vec<VInt>> {
        self.communities
            .values()
            .map(|community| community.vertex_set.clone())
            .collect()
    }

    /// Map every vertex to the contiguous index of its community, `0..community_count`,
    /// numbering communities in creation order.
    pub fn membership(&self) -> Vec<VInt> {
        let mut membership = vec![0 as VInt; self.vertex_count()];
        for (index, community) in self.communities.values().enumerate() {
            for vertex in &community.vertex_set {
                membership[*vertex as usize] = index as VInt;
            }
        }
        membership
    }
}
