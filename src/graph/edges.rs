//! edges.bin / profile_ids.bin / elevations.bin decode.
//!
//! edges.bin (big-endian, 10-byte records, one per edge):
//!
//!   target:     i32  // target node id; sign bit set = edge traversed in
//!                    // reverse of its original way, target stored as the
//!                    // bitwise complement
//!   length:     u16  // Q28.4 meters
//!   elev_gain:  u16  // Q28.4 meters, total positive elevation gain
//!   attr_index: u16  // index into attributes.bin
//!
//! profile_ids.bin (one i32 per edge):
//!
//!   first_sample_index (bits 0..30) | profile_type (bits 30..32)
//!
//! profile_type: 0 = no profile, 1 = raw u16 Q28.4 samples, 2 = 8-bit delta
//! pairs, 3 = 4-bit delta quads. elevations.bin holds one i16 per sample
//! slot; for the delta types each i16 packs 2 or 4 signed sub-fields,
//! most significant first, cumulatively added to the previous sample.

use crate::bits;
use crate::math;
use crate::q28_4;

use super::buffer::GraphBuffer;

const RECORD_SIZE: usize = 10;
const OFFSET_LENGTH: usize = 4;
const OFFSET_ELEVATION_GAIN: usize = 6;
const OFFSET_ATTRIBUTES: usize = 8;

const SAMPLE_INDEX_START: u32 = 0;
const SAMPLE_INDEX_LENGTH: u32 = 30;
const PROFILE_TYPE_START: u32 = 30;
const PROFILE_TYPE_LENGTH: u32 = 2;

/// Maximum spacing between two consecutive profile samples, in Q28.4 meters.
const SAMPLE_SPACING_Q28_4: i32 = 2 << 4;

/// Random-access view over the edge records and their elevation profiles.
#[derive(Debug)]
pub struct EdgeTable {
    edges: GraphBuffer,
    profile_ids: GraphBuffer,
    elevations: GraphBuffer,
}

impl EdgeTable {
    pub fn new(
        edges: impl Into<GraphBuffer>,
        profile_ids: impl Into<GraphBuffer>,
        elevations: impl Into<GraphBuffer>,
    ) -> Self {
        Self {
            edges: edges.into(),
            profile_ids: profile_ids.into(),
            elevations: elevations.into(),
        }
    }

    /// Number of edges in the table.
    pub fn count(&self) -> usize {
        self.edges.len() / RECORD_SIZE
    }

    /// Whether the edge runs in reverse of the way it was built from.
    pub fn is_inverted(&self, edge_id: u32) -> bool {
        self.edges.i32_at(edge_id as usize * RECORD_SIZE) < 0
    }

    /// Target node id of the edge, with the reverse-sign decode applied.
    pub fn target_node_id(&self, edge_id: u32) -> u32 {
        let word = self.edges.i32_at(edge_id as usize * RECORD_SIZE);
        if word < 0 {
            !word as u32
        } else {
            bits::extract_unsigned(word as u32, 0, 31)
        }
    }

    /// Length of the edge, in meters.
    pub fn length(&self, edge_id: u32) -> f64 {
        q28_4::as_double(i32::from(self.length_q28_4(edge_id)))
    }

    /// Total positive elevation gain along the edge, in meters.
    pub fn elevation_gain(&self, edge_id: u32) -> f64 {
        let raw = self
            .edges
            .u16_at(edge_id as usize * RECORD_SIZE + OFFSET_ELEVATION_GAIN);
        q28_4::as_double(i32::from(raw))
    }

    /// Index of the edge's attribute set in attributes.bin.
    pub fn attributes_index(&self, edge_id: u32) -> usize {
        self.edges
            .u16_at(edge_id as usize * RECORD_SIZE + OFFSET_ATTRIBUTES) as usize
    }

    /// Whether the edge has a recorded elevation profile.
    pub fn has_profile(&self, edge_id: u32) -> bool {
        self.profile_type(edge_id) != 0
    }

    /// Decoded elevation samples of the edge, ordered start-to-end (inverted
    /// edges are reversed here so callers never see way order). Empty if the
    /// edge has no profile.
    pub fn profile_samples(&self, edge_id: u32) -> Vec<f32> {
        let profile_type = self.profile_type(edge_id);
        if profile_type == 0 {
            return Vec::new();
        }

        let word = self.profile_ids.u32_at(edge_id as usize * 4);
        let first = bits::extract_unsigned(word, SAMPLE_INDEX_START, SAMPLE_INDEX_LENGTH) as usize;
        let count =
            1 + math::ceil_div(i32::from(self.length_q28_4(edge_id)), SAMPLE_SPACING_Q28_4) as usize;

        let mut samples = vec![0.0f32; count];
        if profile_type == 1 {
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = q28_4::as_float(i32::from(self.elevation_u16(first + i)));
            }
        } else {
            let (per_word, bit_length) = if profile_type == 2 { (2, 8) } else { (4, 4) };
            samples[0] = q28_4::as_float(i32::from(self.elevation_u16(first)));
            for i in 1..count {
                // Sample i lives in elevation word first + ceil(i / per_word),
                // in the (i-1) % per_word-th sub-field counted from the most
                // significant end.
                let word_index = first + (i + per_word - 1) / per_word;
                let sub_field = (i - 1) % per_word;
                let start = ((per_word - 1 - sub_field) * bit_length) as u32;
                let delta = bits::extract_signed(
                    u32::from(self.elevation_u16(word_index)),
                    start,
                    bit_length as u32,
                );
                samples[i] = samples[i - 1] + q28_4::as_float(delta);
            }
        }

        if self.is_inverted(edge_id) {
            samples.reverse();
        }
        samples
    }

    fn length_q28_4(&self, edge_id: u32) -> u16 {
        self.edges
            .u16_at(edge_id as usize * RECORD_SIZE + OFFSET_LENGTH)
    }

    fn profile_type(&self, edge_id: u32) -> u32 {
        let word = self.profile_ids.u32_at(edge_id as usize * 4);
        bits::extract_unsigned(word, PROFILE_TYPE_START, PROFILE_TYPE_LENGTH)
    }

    fn elevation_u16(&self, sample_index: usize) -> u16 {
        self.elevations.u16_at(sample_index * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_record(target: i32, length_q: u16, gain_q: u16, attr: u16) -> Vec<u8> {
        let mut raw = Vec::with_capacity(RECORD_SIZE);
        raw.extend_from_slice(&target.to_be_bytes());
        raw.extend_from_slice(&length_q.to_be_bytes());
        raw.extend_from_slice(&gain_q.to_be_bytes());
        raw.extend_from_slice(&attr.to_be_bytes());
        raw
    }

    fn profile_id(profile_type: u32, first_sample: u32) -> Vec<u8> {
        ((profile_type << 30) | first_sample).to_be_bytes().to_vec()
    }

    fn elevation_words(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    #[test]
    fn forward_edge_fields() {
        // 12.25 m long, 4.0625 m gain, attribute set 7, no profile.
        let table = EdgeTable::new(
            edge_record(53, 0x00C4, 0x0041, 7),
            profile_id(0, 0),
            Vec::new(),
        );
        assert_eq!(table.count(), 1);
        assert!(!table.is_inverted(0));
        assert_eq!(table.target_node_id(0), 53);
        assert_eq!(table.length(0), 12.25);
        assert_eq!(table.elevation_gain(0), 4.0625);
        assert_eq!(table.attributes_index(0), 7);
        assert!(!table.has_profile(0));
        assert!(table.profile_samples(0).is_empty());
    }

    #[test]
    fn inverted_edge_target_is_complemented() {
        let table = EdgeTable::new(edge_record(!53, 16, 0, 0), profile_id(0, 0), Vec::new());
        assert!(table.is_inverted(0));
        assert_eq!(table.target_node_id(0), 53);
    }

    #[test]
    fn raw_profile_samples() {
        // Length 4 m => ceil(4/2) + 1 = 3 samples.
        let table = EdgeTable::new(
            edge_record(1, 4 << 4, 0, 0),
            profile_id(1, 1),
            // One unused slot, then 500.0, 502.5, 501.0 in Q28.4.
            elevation_words(&[0, 500 << 4, (502 << 4) + 8, 501 << 4]),
        );
        assert!(table.has_profile(0));
        assert_eq!(table.profile_samples(0), vec![500.0, 502.5, 501.0]);
    }

    #[test]
    fn delta8_profile_accumulates_pairs() {
        // Length 6 m => 4 samples. Base 384.0, then deltas +1, -1.5, +0.5 m
        // packed two per word, most significant first (Q28.4 deltas 16, -24, 8).
        let deltas_word_1 = ((16u16 & 0xFF) << 8) | (((-24i16) as u16) & 0xFF);
        let deltas_word_2 = ((8u16 & 0xFF) << 8) | 0;
        let table = EdgeTable::new(
            edge_record(1, 6 << 4, 0, 0),
            profile_id(2, 0),
            elevation_words(&[384 << 4, deltas_word_1, deltas_word_2]),
        );
        assert_eq!(table.profile_samples(0), vec![384.0, 385.0, 383.5, 384.0]);
    }

    #[test]
    fn delta4_profile_accumulates_quads() {
        // Length 8 m => 5 samples. Base 0.0, deltas +0.5, +0.5, -0.25, +0.0625
        // in Q28.4: 8, 8, -4, 1, four per word from the most significant nibble.
        let word = (8u16 << 12) | (8u16 << 8) | ((((-4i16) as u16) & 0xF) << 4) | 1;
        let table = EdgeTable::new(
            edge_record(1, 8 << 4, 0, 0),
            profile_id(3, 0),
            elevation_words(&[0, word]),
        );
        assert_eq!(table.profile_samples(0), vec![0.0, 0.5, 1.0, 0.75, 0.8125]);
    }

    #[test]
    fn inverted_edge_profile_is_reversed() {
        let table = EdgeTable::new(
            edge_record(!1, 4 << 4, 0, 0),
            profile_id(1, 0),
            elevation_words(&[100 << 4, 101 << 4, 102 << 4]),
        );
        assert_eq!(table.profile_samples(0), vec![102.0, 101.0, 100.0]);
    }
}
