//! nodes.bin decode.
//!
//! Format (big-endian, memory-mapped, 12-byte records, one per node):
//!
//!   e_q28_4:   i32  // east coordinate, Q28.4 meters
//!   n_q28_4:   i32  // north coordinate, Q28.4 meters
//!   out_edges: u32  // out-edge base id (bits 0..28) | out-degree (bits 28..32)
//!
//! A node's outgoing edges are contiguous in edges.bin starting at the base
//! id, so the i-th outgoing edge is `base + i`.

use crate::bits;
use crate::q28_4;

use super::buffer::GraphBuffer;

const RECORD_SIZE: usize = 12;
const OFFSET_N: usize = 4;
const OFFSET_OUT_EDGES: usize = 8;

const EDGE_BASE_START: u32 = 0;
const EDGE_BASE_LENGTH: u32 = 28;
const OUT_DEGREE_START: u32 = 28;
const OUT_DEGREE_LENGTH: u32 = 4;

/// Random-access view over the node records.
#[derive(Debug)]
pub struct NodeTable {
    data: GraphBuffer,
}

impl NodeTable {
    pub fn new(data: impl Into<GraphBuffer>) -> Self {
        Self { data: data.into() }
    }

    /// Number of nodes in the table.
    pub fn count(&self) -> usize {
        self.data.len() / RECORD_SIZE
    }

    /// East coordinate of the node, in meters.
    pub fn node_e(&self, node_id: u32) -> f64 {
        q28_4::as_double(self.data.i32_at(node_id as usize * RECORD_SIZE))
    }

    /// North coordinate of the node, in meters.
    pub fn node_n(&self, node_id: u32) -> f64 {
        q28_4::as_double(self.data.i32_at(node_id as usize * RECORD_SIZE + OFFSET_N))
    }

    /// Number of edges leaving the node (at most 15).
    pub fn out_degree(&self, node_id: u32) -> u32 {
        let packed = self.data.u32_at(node_id as usize * RECORD_SIZE + OFFSET_OUT_EDGES);
        bits::extract_unsigned(packed, OUT_DEGREE_START, OUT_DEGREE_LENGTH)
    }

    /// Identity of the `edge_index`-th edge leaving the node.
    pub fn edge_id(&self, node_id: u32, edge_index: u32) -> u32 {
        debug_assert!(edge_index < self.out_degree(node_id));
        let packed = self.data.u32_at(node_id as usize * RECORD_SIZE + OFFSET_OUT_EDGES);
        bits::extract_unsigned(packed, EDGE_BASE_START, EDGE_BASE_LENGTH) + edge_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_record(e_q: i32, n_q: i32, edge_base: u32, degree: u32) -> Vec<u8> {
        let mut raw = Vec::with_capacity(RECORD_SIZE);
        raw.extend_from_slice(&e_q.to_be_bytes());
        raw.extend_from_slice(&n_q.to_be_bytes());
        raw.extend_from_slice(&((degree << 28) | edge_base).to_be_bytes());
        raw
    }

    #[test]
    fn decodes_coordinates_and_adjacency() {
        let mut raw = node_record(2_600_000 << 4, 1_200_000 << 4, 0, 2);
        raw.extend(node_record((2_600_100 << 4) + 8, 1_200_050 << 4, 2, 1));
        let table = NodeTable::new(raw);

        assert_eq!(table.count(), 2);
        assert_eq!(table.node_e(0), 2_600_000.0);
        assert_eq!(table.node_n(0), 1_200_000.0);
        assert_eq!(table.node_e(1), 2_600_100.5);
        assert_eq!(table.out_degree(0), 2);
        assert_eq!(table.edge_id(0, 0), 0);
        assert_eq!(table.edge_id(0, 1), 1);
        assert_eq!(table.out_degree(1), 1);
        assert_eq!(table.edge_id(1, 0), 2);
    }

    #[test]
    fn max_out_degree_uses_all_four_bits() {
        let table = NodeTable::new(node_record(0, 0, 0x0FFF_FFFF, 15));
        assert_eq!(table.out_degree(0), 15);
        assert_eq!(table.edge_id(0, 14), 0x0FFF_FFFF + 14);
    }
}
