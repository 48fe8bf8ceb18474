//! Memory-mapped road graph.
//!
//! A graph is a directory of six binary files — nodes.bin, edges.bin,
//! sectors.bin, profile_ids.bin, elevations.bin, attributes.bin — built
//! offline and immutable afterwards. [`Graph`] maps them read-only and
//! exposes O(1) decode operations plus a sector-grid nearest-node query.
//! Everything here is safe to share across threads: there is no mutable
//! state after [`Graph::load_from`] returns.

pub mod attributes;
pub mod buffer;
pub mod edges;
pub mod nodes;
pub mod sectors;

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::GraphError;
use crate::functions::ProfileFunction;
use crate::geo::Point;

use attributes::AttributeSet;
use buffer::GraphBuffer;
use edges::EdgeTable;
use nodes::NodeTable;
use sectors::SectorTable;

/// The routable road network.
#[derive(Debug)]
pub struct Graph {
    nodes: NodeTable,
    sectors: SectorTable,
    edges: EdgeTable,
    attribute_sets: Vec<AttributeSet>,
}

impl Graph {
    /// Assemble a graph from already-decoded tables. Mostly useful for
    /// tests; production code goes through [`Graph::load_from`].
    pub fn new(
        nodes: NodeTable,
        sectors: SectorTable,
        edges: EdgeTable,
        attribute_sets: Vec<AttributeSet>,
    ) -> Self {
        Self {
            nodes,
            sectors,
            edges,
            attribute_sets,
        }
    }

    /// Map the graph files found in `base_path`.
    pub fn load_from(base_path: &Path) -> Result<Graph, GraphError> {
        let nodes_buf = map_file(base_path, "nodes.bin")?;
        check_record_size(base_path, "nodes.bin", &nodes_buf, 12)?;
        let sectors_buf = map_file(base_path, "sectors.bin")?;
        check_record_size(base_path, "sectors.bin", &sectors_buf, 6)?;
        let edges_buf = map_file(base_path, "edges.bin")?;
        check_record_size(base_path, "edges.bin", &edges_buf, 10)?;
        let profile_ids_buf = map_file(base_path, "profile_ids.bin")?;
        check_record_size(base_path, "profile_ids.bin", &profile_ids_buf, 4)?;
        let elevations_buf = map_file(base_path, "elevations.bin")?;
        check_record_size(base_path, "elevations.bin", &elevations_buf, 2)?;
        let attributes_buf = map_file(base_path, "attributes.bin")?;
        check_record_size(base_path, "attributes.bin", &attributes_buf, 8)?;

        let attribute_sets: Vec<AttributeSet> = (0..attributes_buf.len() / 8)
            .map(|i| AttributeSet::new(attributes_buf.u64_at(i * 8)))
            .collect();

        let graph = Graph::new(
            NodeTable::new(nodes_buf),
            SectorTable::new(sectors_buf),
            EdgeTable::new(edges_buf, profile_ids_buf, elevations_buf),
            attribute_sets,
        );
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edges.count(),
            attribute_sets = graph.attribute_sets.len(),
            "loaded graph from {}",
            base_path.display()
        );
        Ok(graph)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// Number of distinct attribute sets referenced by the edges.
    pub fn attribute_set_count(&self) -> usize {
        self.attribute_sets.len()
    }

    /// Position of the node.
    pub fn node_point(&self, node_id: u32) -> Point {
        Point::new(self.nodes.node_e(node_id), self.nodes.node_n(node_id))
    }

    /// Number of edges leaving the node.
    pub fn node_out_degree(&self, node_id: u32) -> u32 {
        self.nodes.out_degree(node_id)
    }

    /// Identity of the `edge_index`-th edge leaving the node.
    pub fn node_out_edge_id(&self, node_id: u32, edge_index: u32) -> u32 {
        self.nodes.edge_id(node_id, edge_index)
    }

    /// Identity of the node closest to `point`, or `None` if no node lies
    /// within `search_distance` meters.
    ///
    /// Scans only the sectors overlapping the search square, not the whole
    /// node table.
    pub fn node_closest_to(&self, point: Point, search_distance: f64) -> Option<u32> {
        let mut best_squared = search_distance * search_distance;
        let mut best: Option<u32> = None;
        for sector in self.sectors.sectors_in_area(point, search_distance) {
            for node_id in sector.start_node_id..sector.end_node_id {
                let squared = point.squared_distance_to(self.node_point(node_id));
                if squared <= best_squared {
                    best_squared = squared;
                    best = Some(node_id);
                }
            }
        }
        best
    }

    /// Target node of the edge (reverse-sign decode applied).
    pub fn edge_target_node_id(&self, edge_id: u32) -> u32 {
        self.edges.target_node_id(edge_id)
    }

    /// Whether the edge runs in reverse of the way it was built from.
    pub fn edge_is_inverted(&self, edge_id: u32) -> bool {
        self.edges.is_inverted(edge_id)
    }

    /// The attribute set attached to the edge.
    pub fn edge_attributes(&self, edge_id: u32) -> AttributeSet {
        self.attribute_sets[self.edges.attributes_index(edge_id)]
    }

    /// Length of the edge, in meters.
    pub fn edge_length(&self, edge_id: u32) -> f64 {
        self.edges.length(edge_id)
    }

    /// Total positive elevation gain of the edge, in meters.
    pub fn edge_elevation_gain(&self, edge_id: u32) -> f64 {
        self.edges.elevation_gain(edge_id)
    }

    /// The edge's elevation as a function of position along it: a sampled
    /// function when the edge carries a profile, the NaN constant otherwise.
    pub fn edge_profile(&self, edge_id: u32) -> ProfileFunction {
        if self.edges.has_profile(edge_id) {
            ProfileFunction::sampled(self.edges.profile_samples(edge_id), self.edge_length(edge_id))
        } else {
            ProfileFunction::constant(f64::NAN)
        }
    }
}

fn map_file(base_path: &Path, name: &str) -> Result<GraphBuffer, GraphError> {
    let path = base_path.join(name);
    let file = File::open(&path).map_err(|source| GraphError::Io {
        path: path.clone(),
        source,
    })?;
    // Safety: the graph files are written once by the build pipeline and
    // never modified afterwards; mapping them read-only is sound.
    let map = unsafe { Mmap::map(&file) }.map_err(|source| GraphError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(GraphBuffer::from(map))
}

fn check_record_size(
    base_path: &Path,
    name: &str,
    buffer: &GraphBuffer,
    record_size: usize,
) -> Result<(), GraphError> {
    if buffer.len() % record_size != 0 {
        return Err(GraphError::Malformed {
            path: base_path.join(name),
            detail: format!(
                "{} bytes is not a multiple of the {}-byte record size",
                buffer.len(),
                record_size
            ),
        });
    }
    Ok(())
}
