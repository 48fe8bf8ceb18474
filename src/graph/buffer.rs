//! Byte buffers backing the graph tables.
//!
//! Production graphs are memory-mapped; unit tests decode straight from
//! heap-owned bytes. Both are read-only once constructed. All multi-byte
//! reads are big-endian, as the files were originally authored.

use std::ops::Deref;

use memmap2::Mmap;

/// A read-only byte buffer, either memory-mapped or heap-owned.
#[derive(Debug)]
pub enum GraphBuffer {
    Mapped(Mmap),
    Heap(Vec<u8>),
}

impl Deref for GraphBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            GraphBuffer::Mapped(map) => map,
            GraphBuffer::Heap(bytes) => bytes,
        }
    }
}

impl From<Mmap> for GraphBuffer {
    fn from(map: Mmap) -> Self {
        GraphBuffer::Mapped(map)
    }
}

impl From<Vec<u8>> for GraphBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        GraphBuffer::Heap(bytes)
    }
}

impl GraphBuffer {
    /// Big-endian `i32` at byte offset `offset`.
    pub fn i32_at(&self, offset: usize) -> i32 {
        let b: &[u8] = self;
        i32::from_be_bytes([b[offset], b[offset + 1], b[offset + 2], b[offset + 3]])
    }

    /// Big-endian `u32` at byte offset `offset`.
    pub fn u32_at(&self, offset: usize) -> u32 {
        self.i32_at(offset) as u32
    }

    /// Big-endian `u16` at byte offset `offset`.
    pub fn u16_at(&self, offset: usize) -> u16 {
        let b: &[u8] = self;
        u16::from_be_bytes([b[offset], b[offset + 1]])
    }

    /// Big-endian `i16` at byte offset `offset`.
    pub fn i16_at(&self, offset: usize) -> i16 {
        self.u16_at(offset) as i16
    }

    /// Big-endian `u64` at byte offset `offset`.
    pub fn u64_at(&self, offset: usize) -> u64 {
        let b: &[u8] = self;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&b[offset..offset + 8]);
        u64::from_be_bytes(raw)
    }
}
