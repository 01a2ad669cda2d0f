use super::*;
use ethereum_types::{H256, U128, U256};
use std::sync::Arc;

/// Right-pads little-endian `bytes` into a single chunk root.
fn int_to_hash256(bytes: &[u8]) -> Hash256 {
    debug_assert!(bytes.len() <= HASHSIZE);

    let mut root = [0; HASHSIZE];
    root[0..bytes.len()].copy_from_slice(bytes);
    Hash256::from_slice(&root)
}

macro_rules! impl_tree_hash_for_uint {
    ($type: ident, $bit_size: expr) => {
        impl TreeHash for $type {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn tree_hash_packing_factor() -> usize {
                HASHSIZE / ($bit_size / 8)
            }

            fn tree_hash_root(&self) -> Hash256 {
                int_to_hash256(&self.to_le_bytes())
            }
        }
    };
}

impl_tree_hash_for_uint!(u8, 8);
impl_tree_hash_for_uint!(u16, 16);
impl_tree_hash_for_uint!(u32, 32);
impl_tree_hash_for_uint!(u64, 64);

#[cfg(target_pointer_width = "32")]
impl_tree_hash_for_uint!(usize, 32);

#[cfg(target_pointer_width = "64")]
impl_tree_hash_for_uint!(usize, 64);

impl TreeHash for bool {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        vec![*self as u8]
    }

    fn tree_hash_packing_factor() -> usize {
        HASHSIZE
    }

    fn tree_hash_root(&self) -> Hash256 {
        int_to_hash256(&[*self as u8])
    }
}

// Little-endian wide integers.
macro_rules! impl_tree_hash_for_le_integer {
    ($type: ident, $bit_size: expr) => {
        impl TreeHash for $type {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                let mut bytes = vec![0; $bit_size / 8];
                self.to_little_endian(&mut bytes);
                bytes
            }

            fn tree_hash_packing_factor() -> usize {
                HASHSIZE / ($bit_size / 8)
            }

            fn tree_hash_root(&self) -> Hash256 {
                int_to_hash256(&self.tree_hash_packed_encoding())
            }
        }
    };
}

impl_tree_hash_for_le_integer!(U128, 128);
impl_tree_hash_for_le_integer!(U256, 256);

impl TreeHash for H256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        *self
    }
}

macro_rules! impl_tree_hash_for_u8_array {
    ($len: expr) => {
        impl TreeHash for [u8; $len] {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Vector
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Vector should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Vector should never be packed.")
            }

            fn tree_hash_root(&self) -> Hash256 {
                merkle_root(&self[..], 0)
            }
        }
    };
}

impl_tree_hash_for_u8_array!(4);
impl_tree_hash_for_u8_array!(32);
impl_tree_hash_for_u8_array!(48);

/// The SSZ `Optional` type: the payload root (or the zero chunk for `None`)
/// with the presence selector mixed in.
impl<T: TreeHash> TreeHash for Option<T> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Container
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("Optional should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Optional should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        let (root, selector) = match self {
            None => (Hash256::zero(), 0),
            Some(inner) => (inner.tree_hash_root(), 1),
        };

        mix_in_selector(&root, selector).expect("selector 0 and 1 are always in bounds")
    }
}

impl<T: TreeHash> TreeHash for Arc<T> {
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        self.as_ref().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Hash256 {
        self.as_ref().tree_hash_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_root() {
        let mut expected = [0; HASHSIZE];
        expected[0] = 1;

        assert_eq!(true.tree_hash_root().as_bytes(), &expected[..]);
        assert_eq!(false.tree_hash_root(), Hash256::zero());
    }

    #[test]
    fn test_uint_packing() {
        assert_eq!(u8::tree_hash_packing_factor(), 32);
        assert_eq!(u64::tree_hash_packing_factor(), 4);
        assert_eq!(U256::tree_hash_packing_factor(), 1);

        assert_eq!(0x55667788_u32.tree_hash_packed_encoding(), vec![
            0x88, 0x77, 0x66, 0x55
        ]);
    }

    #[test]
    fn test_u64_root() {
        let mut expected = [0; HASHSIZE];
        expected[0..8].copy_from_slice(&42_u64.to_le_bytes());

        assert_eq!(42_u64.tree_hash_root().as_bytes(), &expected[..]);
    }

    #[test]
    fn test_optional_root() {
        let none: Option<u64> = None;
        assert_eq!(
            none.tree_hash_root(),
            mix_in_selector(&Hash256::zero(), 0).unwrap()
        );

        let some: Option<u64> = Some(42);
        assert_eq!(
            some.tree_hash_root(),
            mix_in_selector(&42_u64.tree_hash_root(), 1).unwrap()
        );

        assert_ne!(none.tree_hash_root(), Hash256::zero());
    }

    #[test]
    fn test_h256_root_is_identity() {
        let h = Hash256::from_slice(&[13; 32]);
        assert_eq!(h.tree_hash_root(), h);
    }
}
