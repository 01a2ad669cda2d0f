use tree_hash::{merkle_root_with_limit, Hash256, TreeHash, TreeHashType, BYTES_PER_CHUNK};
use typenum::Unsigned;

/// Computes the Merkle root for the elements of a `FixedVector` or
/// `VariableList` with capacity `N`.
///
/// Basic elements pack into shared chunks; composite elements contribute one
/// root each. Either way the tree is padded out to the capacity's chunk
/// count.
pub fn vec_tree_hash_root<T: TreeHash, N: Unsigned>(vec: &[T]) -> Hash256 {
    let (leaves, minimum_chunk_count) = match T::tree_hash_type() {
        TreeHashType::Basic => {
            let mut leaves =
                Vec::with_capacity((BYTES_PER_CHUNK / T::tree_hash_packing_factor()) * vec.len());

            for item in vec {
                leaves.append(&mut item.tree_hash_packed_encoding());
            }

            let values_per_chunk = T::tree_hash_packing_factor();
            let minimum_chunk_count = (N::to_usize() + values_per_chunk - 1) / values_per_chunk;

            (leaves, minimum_chunk_count)
        }
        TreeHashType::Container | TreeHashType::List | TreeHashType::Vector => {
            let mut leaves = Vec::with_capacity(vec.len() * BYTES_PER_CHUNK);

            for item in vec {
                leaves.extend_from_slice(item.tree_hash_root().as_bytes());
            }

            (leaves, N::to_usize())
        }
    };

    merkle_root_with_limit(&leaves, minimum_chunk_count)
        .expect("capacity-checked container cannot exceed its own chunk count")
}

/// Computes the Merkle root of the bytes backing a bitfield of capacity `N`
/// bits.
pub fn bitfield_bytes_tree_hash_root<N: Unsigned>(bytes: &[u8]) -> Hash256 {
    let byte_count = (N::to_usize() + 7) / 8;
    let minimum_chunk_count = (byte_count + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;

    merkle_root_with_limit(bytes, minimum_chunk_count)
        .expect("capacity-checked bitfield cannot exceed its own chunk count")
}
