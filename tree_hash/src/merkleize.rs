use super::*;
use eth2_hashing::hash32_concat;
use lazy_static::lazy_static;

/// The deepest zero-filled subtrie with a precomputed root.
pub const MAX_TREE_DEPTH: usize = 255;

lazy_static! {
    /// Roots of the all-zero subtries: `ZERO_HASHES[0]` is the zero chunk and
    /// `ZERO_HASHES[d]` hashes `ZERO_HASHES[d - 1]` with itself.
    static ref ZERO_HASHES: Vec<[u8; BYTES_PER_CHUNK]> = {
        let mut hashes = vec![[0; BYTES_PER_CHUNK]; MAX_TREE_DEPTH + 1];

        for depth in 0..MAX_TREE_DEPTH {
            hashes[depth + 1] = hash32_concat(&hashes[depth], &hashes[depth]);
        }

        hashes
    };
}

/// Returns the cached root of a zero-filled subtrie of the given depth.
///
/// # Panics
///
/// Panics if `depth > MAX_TREE_DEPTH`; callers are bounded well below that by
/// the address space.
pub fn zero_hash(depth: usize) -> &'static [u8] {
    if depth <= MAX_TREE_DEPTH {
        &ZERO_HASHES[depth]
    } else {
        panic!("tree exceeds MAX_TREE_DEPTH of {}", MAX_TREE_DEPTH)
    }
}

/// Merkleizes `bytes`, padding the tree with zero-subtrie roots out to
/// `next_power_of_two(max(chunks, min_chunk_count))` leaves.
///
/// Chunks beyond `bytes` are never materialized: any right half without input
/// bytes is replaced by the precomputed root of a zero subtrie of matching
/// depth.
pub fn merkleize_padded(bytes: &[u8], min_chunk_count: usize) -> Hash256 {
    let chunk_count = std::cmp::max(
        (bytes.len() + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK,
        min_chunk_count,
    );

    if chunk_count == 0 {
        return Hash256::zero();
    }

    let leaf_count = chunk_count.next_power_of_two();

    Hash256::from_slice(&subtree_root(bytes, leaf_count))
}

/// Computes the root of a subtree spanning `leaf_count` (a power of two)
/// leaves, the first `ceil(bytes.len() / 32)` of which hold data.
fn subtree_root(bytes: &[u8], leaf_count: usize) -> [u8; BYTES_PER_CHUNK] {
    if leaf_count == 1 {
        let mut chunk = [0; BYTES_PER_CHUNK];
        chunk[0..bytes.len()].copy_from_slice(bytes);

        return chunk;
    }

    let half = leaf_count / 2;
    let split = half * BYTES_PER_CHUNK;

    let left = subtree_root(&bytes[0..std::cmp::min(bytes.len(), split)], half);

    let right = if bytes.len() > split {
        subtree_root(&bytes[split..], half)
    } else {
        // The right half holds no data at all.
        let mut root = [0; BYTES_PER_CHUNK];
        root.copy_from_slice(zero_hash(half.trailing_zeros() as usize));
        root
    };

    hash32_concat(&left, &right)
}
