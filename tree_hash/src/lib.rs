pub mod impls;
mod merkleize;

pub use merkleize::{merkleize_padded, zero_hash, MAX_TREE_DEPTH};

use eth2_hashing::{hash32_concat, hash_fixed};

pub const BYTES_PER_CHUNK: usize = 32;
pub const HASHSIZE: usize = 32;
pub const MERKLE_HASH_CHUNK: usize = 2 * BYTES_PER_CHUNK;
pub const MAX_UNION_SELECTOR: u8 = 127;

pub type Hash256 = ethereum_types::H256;

/// Returned when merkleization hits a resource bound.
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The input occupied more leaves than the declared limit allows.
    MaximumLeavesExceeded { max_leaves: usize },
}

/// Computes the Merkle root of `bytes`, padding the leaf count up to at least
/// `minimum_leaf_count`.
///
/// Provides fast paths for trees small enough not to need the full
/// merkleization machinery.
pub fn merkle_root(bytes: &[u8], minimum_leaf_count: usize) -> Hash256 {
    let leaves = std::cmp::max(
        (bytes.len() + (HASHSIZE - 1)) / HASHSIZE,
        minimum_leaf_count,
    );

    if leaves == 0 {
        // No bytes means a zero root.
        Hash256::zero()
    } else if leaves == 1 {
        let mut root = [0; HASHSIZE];
        root[0..bytes.len()].copy_from_slice(bytes);
        Hash256::from_slice(&root)
    } else if leaves == 2 {
        let mut leaves = [0; HASHSIZE * 2];
        leaves[0..bytes.len()].copy_from_slice(bytes);

        Hash256::from_slice(&hash_fixed(&leaves))
    } else {
        merkleize_padded(bytes, leaves)
    }
}

/// Like `merkle_root`, but rejects inputs occupying more than `leaf_limit`
/// leaves instead of growing the tree.
pub fn merkle_root_with_limit(bytes: &[u8], leaf_limit: usize) -> Result<Hash256, Error> {
    let leaves = (bytes.len() + (HASHSIZE - 1)) / HASHSIZE;

    if leaves > leaf_limit {
        Err(Error::MaximumLeavesExceeded {
            max_leaves: leaf_limit,
        })
    } else {
        Ok(merkle_root(bytes, leaf_limit))
    }
}

/// Returns the node created by hashing `root` and `length`.
///
/// Used in `TreeHash` for placing the length of a list above its root.
pub fn mix_in_length(root: &Hash256, length: usize) -> Hash256 {
    let usize_len = std::mem::size_of::<usize>();

    let mut length_bytes = [0; BYTES_PER_CHUNK];
    length_bytes[0..usize_len].copy_from_slice(&length.to_le_bytes());

    Hash256::from_slice(&hash32_concat(root.as_bytes(), &length_bytes))
}

/// Returns `Some(root)` created by hashing `root` and `selector`, if
/// `selector <= MAX_UNION_SELECTOR`. Otherwise returns `None`.
///
/// The selector is mixed in as its little-endian u256 serialization, per the
/// SSZ union scheme.
pub fn mix_in_selector(root: &Hash256, selector: u8) -> Option<Hash256> {
    if selector > MAX_UNION_SELECTOR {
        return None;
    }

    let mut chunk = [0; BYTES_PER_CHUNK];
    chunk[0] = selector;

    Some(Hash256::from_slice(&hash32_concat(root.as_bytes(), &chunk)))
}

/// Returns the node created by hashing `root` and an auxiliary chunk.
///
/// Used by stable containers to pin the active-field bitmap above the data
/// tree.
pub fn mix_in_aux(root: &Hash256, aux: &Hash256) -> Hash256 {
    Hash256::from_slice(&hash32_concat(root.as_bytes(), aux.as_bytes()))
}

#[derive(Debug, PartialEq, Clone)]
pub enum TreeHashType {
    Basic,
    Vector,
    List,
    Container,
}

pub trait TreeHash {
    fn tree_hash_type() -> TreeHashType;

    fn tree_hash_packed_encoding(&self) -> Vec<u8>;

    fn tree_hash_packing_factor() -> usize;

    fn tree_hash_root(&self) -> Hash256;
}

/// Punch through references.
impl<'a, T> TreeHash for &'a T
where
    T: TreeHash,
{
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        T::tree_hash_packed_encoding(*self)
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Hash256 {
        T::tree_hash_root(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_in_length() {
        let hash = {
            let mut preimage = vec![42; BYTES_PER_CHUNK];
            preimage.append(&mut vec![42]);
            preimage.append(&mut vec![0; BYTES_PER_CHUNK - 1]);
            eth2_hashing::hash(&preimage)
        };

        assert_eq!(
            mix_in_length(&Hash256::from_slice(&[42; BYTES_PER_CHUNK]), 42).as_bytes(),
            &hash[..]
        );
    }

    #[test]
    fn test_mix_in_selector() {
        let hash = {
            let mut preimage = vec![42; BYTES_PER_CHUNK];
            preimage.append(&mut vec![25]);
            preimage.append(&mut vec![0; BYTES_PER_CHUNK - 1]);
            eth2_hashing::hash(&preimage)
        };

        assert_eq!(
            mix_in_selector(&Hash256::from_slice(&[42; BYTES_PER_CHUNK]), 25)
                .unwrap()
                .as_bytes(),
            &hash[..]
        );

        assert_eq!(
            mix_in_selector(&Hash256::zero(), MAX_UNION_SELECTOR + 1),
            None
        );
    }

    #[test]
    fn test_mix_in_aux() {
        let hash = {
            let mut preimage = vec![42; BYTES_PER_CHUNK];
            preimage.append(&mut vec![11; BYTES_PER_CHUNK]);
            eth2_hashing::hash(&preimage)
        };

        assert_eq!(
            mix_in_aux(
                &Hash256::from_slice(&[42; BYTES_PER_CHUNK]),
                &Hash256::from_slice(&[11; BYTES_PER_CHUNK])
            )
            .as_bytes(),
            &hash[..]
        );
    }

    #[test]
    fn test_merkle_root_empty() {
        assert_eq!(merkle_root(&[], 0), Hash256::zero());
    }

    #[test]
    fn test_merkle_root_single_leaf() {
        let root = merkle_root(&[1, 2, 3], 0);

        let mut expected = [0; BYTES_PER_CHUNK];
        expected[0..3].copy_from_slice(&[1, 2, 3]);

        assert_eq!(root.as_bytes(), &expected[..]);
    }

    #[test]
    fn test_merkle_root_two_leaves() {
        let bytes = vec![7; 40];

        let mut preimage = bytes.clone();
        preimage.resize(MERKLE_HASH_CHUNK, 0);

        assert_eq!(
            merkle_root(&bytes, 0).as_bytes(),
            &eth2_hashing::hash(&preimage)[..]
        );
    }

    #[test]
    fn test_merkle_root_with_limit() {
        assert_eq!(
            merkle_root_with_limit(&[0; 96], 2),
            Err(Error::MaximumLeavesExceeded { max_leaves: 2 })
        );

        assert_eq!(
            merkle_root_with_limit(&[0; 64], 2),
            Ok(merkle_root(&[0; 64], 2))
        );
    }
}
