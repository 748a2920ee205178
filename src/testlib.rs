//! Test utilities for caffstream-rs
// Provides helpers for assembling CAFF containers and writing them to temp files

use std::io::Write;
use tempfile::NamedTempFile;

use crate::formats::{ANIMATION_BLOCK, CAFF_MAGIC, CREDITS_BLOCK, CaffHeader, HEADER_BLOCK};

/// Frame a payload as a block with the given tag.
pub fn block(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Build the mandatory leading header block declaring `block_count` blocks.
pub fn header_block(block_count: u64) -> Vec<u8> {
    let mut payload = CAFF_MAGIC.to_vec();
    payload.extend_from_slice(&(CaffHeader::LEN as u64).to_le_bytes());
    payload.extend_from_slice(&block_count.to_le_bytes());
    block(HEADER_BLOCK, &payload)
}

/// Build a credits block around an opaque payload.
pub fn credits_block(payload: &[u8]) -> Vec<u8> {
    block(CREDITS_BLOCK, payload)
}

/// Build an animation block: the fixed 8-byte sub-header followed by the
/// image bytes.
pub fn animation_block(subheader: &[u8; 8], image: &[u8]) -> Vec<u8> {
    let mut payload = subheader.to_vec();
    payload.extend_from_slice(image);
    block(ANIMATION_BLOCK, &payload)
}

/// Assemble a complete container: the header block first, then `blocks` in
/// order.
pub fn caff_bytes(block_count: u64, blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header_block(block_count);
    for b in blocks {
        out.extend_from_slice(b);
    }
    out
}

/// Write a complete container to a temp file for path-level tests.
pub fn create_test_caff(block_count: u64, blocks: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&caff_bytes(block_count, blocks)).unwrap();
    file.flush().unwrap();
    file
}
