use crate::tree_hash::vec_tree_hash_root;
use crate::Error;
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::SliceIndex;
use tree_hash::Hash256;
use typenum::Unsigned;

/// Emulates the SSZ `Vector` type: a sequence holding exactly `N` values.
///
/// `N` is a type-level integer (`typenum::Unsigned`), so the length is part
/// of the type and never travels on the wire.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedVector<T, N> {
    vec: Vec<T>,
    _meta: PhantomData<N>,
}

impl<T, N: Unsigned> FixedVector<T, N> {
    /// Instantiates from `vec`, which must hold exactly `N` items.
    pub fn new(vec: Vec<T>) -> Result<Self, Error> {
        if vec.len() == Self::capacity() {
            Ok(Self {
                vec,
                _meta: PhantomData,
            })
        } else {
            Err(Error::OutOfBounds {
                i: vec.len(),
                len: Self::capacity(),
            })
        }
    }

    /// Instantiates with `elem` cloned into every slot.
    pub fn from_elem(elem: T) -> Self
    where
        T: Clone,
    {
        Self {
            vec: vec![elem; Self::capacity()],
            _meta: PhantomData,
        }
    }

    /// The number of items stored (always `N`).
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `N` in `Vector[T, N]`.
    pub fn capacity() -> usize {
        N::to_usize()
    }
}

impl<T: Default, N: Unsigned> From<Vec<T>> for FixedVector<T, N> {
    /// Truncates or right-pads (with `T::default()`) to exactly `N` items.
    fn from(mut vec: Vec<T>) -> Self {
        vec.resize_with(Self::capacity(), Default::default);

        Self {
            vec,
            _meta: PhantomData,
        }
    }
}

impl<T, N: Unsigned> Into<Vec<T>> for FixedVector<T, N> {
    fn into(self) -> Vec<T> {
        self.vec
    }
}

impl<T, N: Unsigned, I: SliceIndex<[T]>> Index<I> for FixedVector<T, N> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(&self.vec, index)
    }
}

impl<T, N: Unsigned, I: SliceIndex<[T]>> IndexMut<I> for FixedVector<T, N> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut self.vec, index)
    }
}

impl<T, N: Unsigned> Deref for FixedVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.vec[..]
    }
}

impl<T, N: Unsigned> DerefMut for FixedVector<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.vec[..]
    }
}

impl<'a, T, N: Unsigned> IntoIterator for &'a FixedVector<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: ssz::Encode, N: Unsigned> ssz::Encode for FixedVector<T, N> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if <Self as ssz::Encode>::is_ssz_fixed_len() {
            N::to_usize() * T::ssz_fixed_len()
        } else {
            ssz::BYTES_PER_LENGTH_OFFSET
        }
    }

    fn ssz_bytes_len(&self) -> usize {
        ssz::sequence_ssz_bytes_len(self.vec.iter())
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        ssz::sequence_ssz_append(self.vec.iter(), buf)
    }
}

impl<T: ssz::Decode + Default, N: Unsigned> ssz::Decode for FixedVector<T, N> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if <Self as ssz::Decode>::is_ssz_fixed_len() {
            N::to_usize() * T::ssz_fixed_len()
        } else {
            ssz::BYTES_PER_LENGTH_OFFSET
        }
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
        if bytes.is_empty() && N::to_usize() > 0 {
            Err(ssz::DecodeError::InvalidByteLength {
                len: 0,
                expected: <Self as ssz::Decode>::ssz_fixed_len(),
            })
        } else if T::is_ssz_fixed_len() {
            let items = bytes
                .chunks(T::ssz_fixed_len())
                .map(T::from_ssz_bytes)
                .collect::<Result<Vec<T>, _>>()?;

            if items.len() == N::to_usize() {
                Self::new(items).map_err(|e| {
                    ssz::DecodeError::BytesInvalid(format!("FixedVector {:?}", e))
                })
            } else {
                Err(ssz::DecodeError::BytesInvalid(format!(
                    "Wrong number of FixedVector items: got {}, expected {}",
                    items.len(),
                    N::to_usize()
                )))
            }
        } else {
            let items = ssz::decode_list_of_variable_length_items(bytes)?;

            if items.len() == N::to_usize() {
                Self::new(items).map_err(|e| {
                    ssz::DecodeError::BytesInvalid(format!("FixedVector {:?}", e))
                })
            } else {
                Err(ssz::DecodeError::BytesInvalid(format!(
                    "Wrong number of FixedVector items: got {}, expected {}",
                    items.len(),
                    N::to_usize()
                )))
            }
        }
    }
}

impl<T: tree_hash::TreeHash, N: Unsigned> tree_hash::TreeHash for FixedVector<T, N> {
    fn tree_hash_type() -> tree_hash::TreeHashType {
        tree_hash::TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        vec_tree_hash_root::<T, N>(&self.vec)
    }
}
