use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::attribute::AttrVector;
use crate::config::READ_BUFFER_SIZE;

pub type VInt = u32;

/// Undirected, weighted graph whose vertices carry numeric attribute vectors.
/// Vertex ids are dense, `0..v_size`, and the graph is simple: no self-loops
/// and at most one edge per vertex pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrGraph {
    pub(crate) schema: Vec<String>, // Ordered attribute names, shared by all vertices.
    pub(crate) attributes: Vec<AttrVector>, // Attribute vector, one per vertex.
    pub(crate) adj_map: Vec<BTreeMap<VInt, f64>>, // Neighbor -> edge weight, one per vertex.
    pub(crate) weight_list: Vec<f64>, // Weighted degree, one per vertex.
    pub(crate) v_size: u32,
    pub(crate) e_size: u32,
    pub(crate) graph_weight_sum: f64, // Total edge weight, i.e., m.
}

impl AttrGraph {
    /// Create a graph without edges, one vertex per attribute vector.
    pub fn new(schema: Vec<String>, attributes: Vec<AttrVector>) -> Result<Self> {
        let dim = schema.len();
        for (vertex_id, attr) in attributes.iter().enumerate() {
            if attr.len() != dim {
                bail!(
                    "vertex {} has {} attribute values, the schema has {}",
                    vertex_id,
                    attr.len(),
                    dim
                );
            }
        }
        let v_size = attributes.len();
        Ok(AttrGraph {
            schema,
            attributes,
            adj_map: vec![BTreeMap::new(); v_size],
            weight_list: vec![0.0; v_size],
            v_size: v_size as u32,
            e_size: 0,
            graph_weight_sum: 0.0,
        })
    }

    /// Build a graph from attribute vectors and an edge list.
    /// Self-loops and repeated vertex pairs are skipped.
    pub fn from_edges(
        schema: Vec<String>,
        attributes: Vec<AttrVector>,
        edges: impl IntoIterator<Item = (VInt, VInt, f64)>,
    ) -> Result<Self> {
        let mut graph = AttrGraph::new(schema, attributes)?;
        for (u, v, weight) in edges {
            if !graph.insert_edge(u, v, weight)? {
                warn!("Skip edge ({}, {}): self-loop or duplicate", u, v);
            }
        }
        Ok(graph)
    }

    /// Insert an undirected edge, returns false when it is a self-loop or already exists.
    pub fn insert_edge(&mut self, u: VInt, v: VInt, weight: f64) -> Result<bool> {
        if u >= self.v_size || v >= self.v_size {
            bail!("edge ({}, {}) out of range, vertex count is {}", u, v, self.v_size);
        }
        if !weight.is_finite() || weight < 0.0 {
            bail!("edge ({}, {}) has invalid weight {}", u, v, weight);
        }
        if u == v || self.has_edge(&u, &v) {
            return Ok(false);
        }
        self.adj_map[u as usize].insert(v, weight);
        self.adj_map[v as usize].insert(u, weight);
        self.weight_list[u as usize] += weight;
        self.weight_list[v as usize] += weight;
        self.e_size += 1;
        self.graph_weight_sum += weight;
        Ok(true)
    }

    pub fn get_vertex_count(&self) -> u32 {
        self.v_size
    }

    pub fn get_edge_count(&self) -> u32 {
        self.e_size
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.graph_weight_sum
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn dimension(&self) -> usize {
        self.schema.len()
    }

    pub fn has_edge(&self, src_id: &VInt, dst_id: &VInt) -> bool {
        self.adj_map
            .get(*src_id as usize)
            .map_or(false, |neighbors| neighbors.contains_key(dst_id))
    }

    /// Weight of the edge between two vertices, 0 if they are not adjacent.
    pub fn edge_weight(&self, src_id: &VInt, dst_id: &VInt) -> f64 {
        self.adj_map
            .get(*src_id as usize)
            .and_then(|neighbors| neighbors.get(dst_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Weighted degree, i.e., the sum of incident edge weights.
    pub fn degree(&self, vertex_id: &VInt) -> f64 {
        self.weight_list[*vertex_id as usize]
    }

    pub fn get_attributes(&self, vertex_id: &VInt) -> &AttrVector {
        &self.attributes[*vertex_id as usize]
    }

    /// Every edge once, as `(u, v, weight)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (VInt, VInt, f64)> + '_ {
        self.adj_map.iter().enumerate().flat_map(|(u, neighbors)| {
            let u = u as VInt;
            neighbors
                .range(u + 1..)
                .map(move |(v, weight)| (u, *v, *weight))
        })
    }

    /// Load a graph from an attribute csv file and an edge list file.
    pub fn from_files(attr_path: impl AsRef<Path>, edge_path: impl AsRef<Path>) -> Result<Self> {
        let (schema, attributes) = read_attribute_file(attr_path.as_ref())?;
        let edges = read_edge_file(edge_path.as_ref())?;
        let graph = AttrGraph::from_edges(schema, attributes, edges)?;
        info!(
            "Load graph: {} vertices, {} edges, {} attributes",
            graph.v_size,
            graph.e_size,
            graph.dimension()
        );
        Ok(graph)
    }
}

/// Read the attribute csv: a header line of attribute names, then one row of values per vertex.
/// Fields may be quoted and padded with spaces; blank lines are skipped.
fn read_attribute_file(path: &Path) -> Result<(Vec<String>, Vec<AttrVector>)> {
    let attr_file = File::open(path)
        .with_context(|| format!("failed to open attribute file {}", path.display()))?;
    let mut attr_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .buffer_capacity(READ_BUFFER_SIZE)
        .from_reader(attr_file);

    let schema: Vec<String> = attr_reader
        .headers()
        .with_context(|| format!("failed to read the header of {}", path.display()))?
        .iter()
        .map(str::to_owned)
        .collect();
    let mut attributes = Vec::<AttrVector>::new();
    for record in attr_reader.records() {
        let record = record.with_context(|| format!("failed to read {}", path.display()))?;
        let line_no = record.position().map_or(0, |pos| pos.line());
        let row = record
            .iter()
            .map(|field| field.parse::<f64>())
            .collect::<Result<AttrVector, _>>()
            .with_context(|| format!("{}:{}: invalid attribute value", path.display(), line_no))?;
        if row.len() != schema.len() {
            bail!(
                "{}:{}: expect {} attribute values, found {}",
                path.display(),
                line_no,
                schema.len(),
                row.len()
            );
        }
        attributes.push(row);
    }
    Ok((schema, attributes))
}

/// Read the edge list: `u v [weight]` per line, weight defaults to 1.0.
fn read_edge_file(path: &Path) -> Result<Vec<(VInt, VInt, f64)>> {
    let edge_file = File::open(path)
        .with_context(|| format!("failed to open edge file {}", path.display()))?;
    let edge_reader = BufReader::with_capacity(READ_BUFFER_SIZE, edge_file);

    let mut edges = Vec::new();
    for (line_no, line) in edge_reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < 2 || tokens.len() > 3 {
            bail!("{}:{}: expect `u v [weight]`", path.display(), line_no + 1);
        }
        let parse_vertex = |token: &str| {
            token
                .parse::<VInt>()
                .with_context(|| format!("{}:{}: invalid vertex id", path.display(), line_no + 1))
        };
        let src = parse_vertex(tokens[0])?;
        let dst = parse_vertex(tokens[1])?;
        let weight = match tokens.get(2) {
            Some(token) => token
                .parse::<f64>()
                .with_context(|| format!("{}:{}: invalid weight", path.display(), line_no + 1))?,
            None => 1.0,
        };
        edges.push((src, dst, weight));
    }
    Ok(edges)
}
