use crate::tree_hash::bitfield_bytes_tree_hash_root;
use crate::Error;
use core::marker::PhantomData;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz::{Decode, DecodeError, Encode};
use tree_hash::Hash256;
use typenum::Unsigned;

/// A marker struct used to declare SSZ `Variable` behaviour on a `Bitfield`.
///
/// See the [`Bitfield`](struct.Bitfield.html) docs for usage.
#[derive(Clone, PartialEq, Debug)]
pub struct Variable<N> {
    _meta: PhantomData<N>,
}

/// A marker struct used to declare SSZ `Fixed` behaviour on a `Bitfield`.
///
/// See the [`Bitfield`](struct.Bitfield.html) docs for usage.
#[derive(Clone, PartialEq, Debug)]
pub struct Fixed<N> {
    _meta: PhantomData<N>,
}

/// A marker trait applied to `Variable` and `Fixed` that defines the
/// behaviour of a `Bitfield`.
pub trait BitfieldBehaviour: Clone {}

impl<N: Unsigned + Clone> BitfieldBehaviour for Variable<N> {}
impl<N: Unsigned + Clone> BitfieldBehaviour for Fixed<N> {}

/// A heap-allocated, ordered collection of `bool` values, limited to (or
/// fixed at) `N` bits. Bit `i` lives in byte `i / 8` at position `i % 8`,
/// LSB first.
///
/// `Bitfield<Variable<N>>` is the SSZ `Bitlist[N]`: its serialization
/// carries a sentinel bit just past the data bits so the length survives the
/// wire. `Bitfield<Fixed<N>>` is the SSZ `Bitvector[N]`: exactly `⌈N/8⌉`
/// bytes with no sentinel.
#[derive(Clone, PartialEq, Debug)]
pub struct Bitfield<C> {
    bytes: Vec<u8>,
    len: usize,
    _meta: PhantomData<C>,
}

impl<N: Unsigned + Clone> Bitfield<Variable<N>> {
    /// Instantiates with a capacity of `bits_len`, all bits cleared.
    pub fn with_capacity(bits_len: usize) -> Result<Self, Error> {
        if bits_len <= Self::max_len() {
            Ok(Self {
                bytes: vec![0; bytes_for_bit_len(bits_len)],
                len: bits_len,
                _meta: PhantomData,
            })
        } else {
            Err(Error::OutOfBounds {
                i: bits_len,
                len: Self::max_len(),
            })
        }
    }

    /// The maximum possible number of bits (the `N` in `Bitlist[N]`).
    pub fn max_len() -> usize {
        N::to_usize()
    }

    /// Consumes `self`, returning its serialized form: the data bytes with
    /// the sentinel bit set at position `self.len()`.
    pub fn into_bytes(self) -> Vec<u8> {
        let len = self.len();
        let mut bytes = self.bytes;

        bytes.resize(bytes_for_bit_len(len + 1), 0);

        let mut bitfield: Bitfield<Variable<N>> = Bitfield::from_raw_bytes(bytes, len + 1)
            .unwrap_or_else(|_| {
                unreachable!(
                    "Bitfield with {} bytes has enough capacity for {} bits",
                    bytes_for_bit_len(len + 1),
                    len + 1
                )
            });

        bitfield
            .set(len, true)
            .expect("len must be in bounds for bitfield");

        bitfield.bytes
    }

    /// Instantiates from serialized bytes, requiring and removing the
    /// sentinel bit.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::MissingLengthInformation);
        }

        let bytes_len = bytes.len();
        let mut bitfield: Bitfield<Variable<N>> = Bitfield::from_raw_bytes(bytes, bytes_len * 8)?;

        let sentinel = bitfield
            .highest_set_bit()
            .ok_or(Error::MissingLengthInformation)?;

        // The sentinel must live in the last byte, otherwise the encoding
        // carried superfluous zero bytes.
        if sentinel / 8 + 1 != bytes_len {
            return Err(Error::InvalidByteCount {
                given: bytes_len,
                expected: sentinel / 8 + 1,
            });
        }

        if sentinel <= Self::max_len() {
            bitfield
                .set(sentinel, false)
                .expect("sentinel has already been read");

            let mut bytes = bitfield.into_raw_bytes();
            bytes.truncate(bytes_for_bit_len(sentinel));

            Self::from_raw_bytes(bytes, sentinel)
        } else {
            Err(Error::OutOfBounds {
                i: sentinel,
                len: Self::max_len(),
            })
        }
    }

    /// Returns a new bitfield of identical length with a bit set wherever
    /// both `self` and `other` have it set.
    pub fn intersection(&self, other: &Self) -> Self {
        let min_len = std::cmp::min(self.len(), other.len());
        let mut result = Self::with_capacity(min_len).expect("min length is always in bounds");

        for i in 0..result.bytes.len() {
            result.bytes[i] = self.bytes[i] & other.bytes[i];
        }

        result
    }

    /// Returns a new bitfield with a bit set wherever either `self` or
    /// `other` has it set.
    pub fn union(&self, other: &Self) -> Self {
        let max_len = std::cmp::max(self.len(), other.len());
        let mut result = Self::with_capacity(max_len).expect("max length is always in bounds");

        // One of the two operands may be the shorter.
        for i in 0..result.bytes.len() {
            result.bytes[i] = self.bytes.get(i).copied().unwrap_or(0)
                | other.bytes.get(i).copied().unwrap_or(0);
        }

        result
    }
}

impl<N: Unsigned + Clone> Bitfield<Fixed<N>> {
    /// Instantiates a new instance with `N` bits, all cleared.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; bytes_for_bit_len(Self::capacity())],
            len: Self::capacity(),
            _meta: PhantomData,
        }
    }

    /// The number of bits (the `N` in `Bitvector[N]`).
    pub fn capacity() -> usize {
        N::to_usize()
    }

    /// Consumes `self`, returning its serialized form.
    ///
    /// A fixed-length bitfield carries no sentinel, so this is the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.into_raw_bytes()
    }

    /// Instantiates from serialized bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::from_raw_bytes(bytes, Self::capacity())
    }
}

impl<N: Unsigned + Clone> Default for Bitfield<Fixed<N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BitfieldBehaviour> Bitfield<C> {
    /// Sets bit `i` to `value`.
    ///
    /// Returns an error if `i` is out of bounds.
    pub fn set(&mut self, i: usize, value: bool) -> Result<(), Error> {
        let len = self.len;

        if i < len {
            let byte = self
                .bytes
                .get_mut(i / 8)
                .ok_or(Error::OutOfBounds { i, len })?;

            if value {
                *byte |= 1 << (i % 8);
            } else {
                *byte &= !(1 << (i % 8));
            }

            Ok(())
        } else {
            Err(Error::OutOfBounds { i, len })
        }
    }

    /// Returns bit `i`.
    ///
    /// Returns an error if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Result<bool, Error> {
        let len = self.len;

        if i < len {
            let byte = self.bytes.get(i / 8).ok_or(Error::OutOfBounds { i, len })?;

            Ok(*byte & (1 << (i % 8)) > 0)
        } else {
            Err(Error::OutOfBounds { i, len })
        }
    }

    /// Returns the number of bits stored in `self`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if `self.len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes `self`, returning the underlying bytes without any sentinel.
    pub fn into_raw_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns a view into the underlying bytes, without any sentinel.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Instantiates from raw (sentinel-free) bytes holding `bits_len` bits.
    ///
    /// Rejects a byte count that does not match `bits_len` and any set bit at
    /// or above `bits_len`.
    pub fn from_raw_bytes(bytes: Vec<u8>, bits_len: usize) -> Result<Self, Error> {
        if bits_len == 0 {
            if bytes.len() == 1 && bytes == [0] {
                // A zero-length bitfield still occupies its single sentinel
                // byte on the wire.
                Ok(Self {
                    bytes,
                    len: 0,
                    _meta: PhantomData,
                })
            } else {
                Err(Error::ExcessBits)
            }
        } else if bytes.len() != bytes_for_bit_len(bits_len) {
            Err(Error::InvalidByteCount {
                given: bytes.len(),
                expected: bytes_for_bit_len(bits_len),
            })
        } else {
            // No bit at or above `bits_len` may be set.
            let (mask, _) = u8::max_value().overflowing_shr(8 - (bits_len % 8) as u32);

            if (bytes.last().expect("bytes cannot be empty") & !mask) == 0 {
                Ok(Self {
                    bytes,
                    len: bits_len,
                    _meta: PhantomData,
                })
            } else {
                Err(Error::ExcessBits)
            }
        }
    }

    /// Returns the index of the highest set bit, if any.
    pub fn highest_set_bit(&self) -> Option<usize> {
        self.bytes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, byte)| **byte > 0)
            .map(|(i, byte)| i * 8 + 7 - byte.leading_zeros() as usize)
    }

    /// Iterates the bits in `self`, lowest index first.
    pub fn iter(&self) -> BitIter<'_, C> {
        BitIter {
            bitfield: self,
            i: 0,
        }
    }

    /// Returns `true` if no bit is set.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|byte| *byte == 0)
    }

    /// Returns the number of set bits.
    pub fn num_set_bits(&self) -> usize {
        self.bytes
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Returns a new bitfield with a bit set wherever `self` has it set and
    /// `other` does not.
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = self.clone();

        let min_bytes_len = std::cmp::min(self.bytes.len(), other.bytes.len());
        for i in 0..min_bytes_len {
            result.bytes[i] &= !other.bytes[i];
        }

        result
    }
}

/// An iterator over the bits in a `Bitfield`.
pub struct BitIter<'a, C> {
    bitfield: &'a Bitfield<C>,
    i: usize,
}

impl<'a, C: BitfieldBehaviour> Iterator for BitIter<'a, C> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.bitfield.get(self.i).ok()?;
        self.i += 1;

        Some(bit)
    }
}

/// The number of bytes required to hold `bit_len` bits (at least one).
fn bytes_for_bit_len(bit_len: usize) -> usize {
    std::cmp::max(1, (bit_len + 7) / 8)
}

impl<N: Unsigned + Clone> Encode for Bitfield<Variable<N>> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        // The sentinel bit may spill into an extra byte.
        bytes_for_bit_len(self.len() + 1)
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.append(&mut self.clone().into_bytes())
    }
}

impl<N: Unsigned + Clone> Decode for Bitfield<Variable<N>> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes(bytes.to_vec())
            .map_err(|e| DecodeError::BytesInvalid(format!("BitList failed to decode: {:?}", e)))
    }
}

impl<N: Unsigned + Clone> Encode for Bitfield<Fixed<N>> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        bytes_for_bit_len(N::to_usize())
    }

    fn ssz_bytes_len(&self) -> usize {
        <Self as Encode>::ssz_fixed_len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.append(&mut self.clone().into_bytes())
    }
}

impl<N: Unsigned + Clone> Decode for Bitfield<Fixed<N>> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        bytes_for_bit_len(N::to_usize())
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes(bytes.to_vec())
            .map_err(|e| DecodeError::BytesInvalid(format!("BitVector failed to decode: {:?}", e)))
    }
}

impl<N: Unsigned + Clone> tree_hash::TreeHash for Bitfield<Variable<N>> {
    fn tree_hash_type() -> tree_hash::TreeHashType {
        tree_hash::TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        // Hash over the data bits only; the sentinel is a wire artifact.
        let root = bitfield_bytes_tree_hash_root::<N>(self.as_slice());

        tree_hash::mix_in_length(&root, self.len())
    }
}

impl<N: Unsigned + Clone> tree_hash::TreeHash for Bitfield<Fixed<N>> {
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
        bitfield_bytes_tree_hash_root::<N>(self.as_slice())
    }
}

macro_rules! impl_bitfield_serde {
    ($type: ident) => {
        impl<N: Unsigned + Clone> Serialize for Bitfield<$type<N>> {
            /// Serde serialization is 0x-prefixed hex of the SSZ encoding.
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut hex_string: String = "0x".to_string();
                hex_string.push_str(&hex::encode(self.as_ssz_bytes()));

                serializer.serialize_str(&hex_string)
            }
        }

        impl<'de, N: Unsigned + Clone> Deserialize<'de> for Bitfield<$type<N>> {
            /// Serde deserialization is 0x-prefixed hex of the SSZ encoding.
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bytes = deserializer
                    .deserialize_str(eth2_serde_utils::hex::PrefixedHexVisitor)?;
                Self::from_ssz_bytes(&bytes)
                    .map_err(|e| serde::de::Error::custom(format!("Bitfield {:?}", e)))
            }
        }
    };
}

impl_bitfield_serde!(Variable);
impl_bitfield_serde!(Fixed);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitList, BitVector};
    use typenum::*;

    #[test]
    fn test_bytes_for_bit_len() {
        assert_eq!(bytes_for_bit_len(0), 1);
        assert_eq!(bytes_for_bit_len(1), 1);
        assert_eq!(bytes_for_bit_len(8), 1);
        assert_eq!(bytes_for_bit_len(9), 2);
        assert_eq!(bytes_for_bit_len(16), 2);
        assert_eq!(bytes_for_bit_len(17), 3);
    }

    #[test]
    fn test_bitlist_with_capacity() {
        let bitfield = <BitList<U10>>::with_capacity(10).unwrap();
        assert_eq!(bitfield.bytes, vec![0; 2]);

        let bitfield = <BitList<U10>>::with_capacity(3).unwrap();
        assert_eq!(bitfield.bytes, vec![0; 1]);
    }

    #[test]
    fn test_bitlist_with_capacity_error() {
        assert_eq!(
            <BitList<U10>>::with_capacity(11),
            Err(Error::OutOfBounds { i: 11, len: 10 })
        );
    }

    #[test]
    fn test_bitlist_into_bytes_appends_sentinel() {
        let bitfield = <BitList<U5>>::with_capacity(5).unwrap();
        assert_eq!(bitfield.into_bytes(), &[0b0010_0000]);

        let bitfield = <BitList<U17>>::with_capacity(5).unwrap();
        assert_eq!(bitfield.into_bytes(), &[0b0010_0000]);

        let bitfield = <BitList<U8>>::with_capacity(8).unwrap();
        assert_eq!(bitfield.into_bytes(), &[0b0000_0000, 0b0000_0001]);
    }

    #[test]
    fn test_bitlist_zero_length_serialization() {
        let bitfield = <BitList<U8>>::with_capacity(0).unwrap();
        assert_eq!(bitfield.clone().into_bytes(), &[0b0000_0001]);
        assert_eq!(
            <BitList<U8>>::from_bytes(vec![0b0000_0001]).unwrap(),
            bitfield
        );
    }

    #[test]
    fn test_bitlist_from_bytes_strips_sentinel() {
        let bitfield = <BitList<U5>>::from_bytes(vec![0b0010_0000]).unwrap();
        assert_eq!(bitfield.bytes, &[0b0000_0000]);
        assert_eq!(bitfield.len(), 5);
    }

    #[test]
    fn test_bitlist_from_bytes_rejects_zero_terminal_byte() {
        assert_eq!(
            <BitList<U16>>::from_bytes(vec![0b0000_0001, 0b0000_0000]),
            Err(Error::InvalidByteCount {
                given: 2,
                expected: 1
            })
        );

        assert_eq!(
            <BitList<U16>>::from_bytes(vec![0b0000_0000]),
            Err(Error::MissingLengthInformation)
        );
    }

    #[test]
    fn test_bitlist_from_bytes_rejects_excess_length() {
        assert!(<BitList<U5>>::from_bytes(vec![0b0100_0000]).is_err());
    }

    #[test]
    fn test_bitvector_new() {
        let bitfield: BitVector<U10> = BitVector::new();
        assert_eq!(bitfield.bytes, vec![0; 2]);
        assert_eq!(bitfield.len(), 10);
    }

    #[test]
    fn test_bitvector_spec_bytes() {
        // Bitvector[7] = [T, F, T, T, F, F, F].
        let mut bitfield: BitVector<U7> = BitVector::new();
        for i in &[0, 2, 3] {
            bitfield.set(*i, true).unwrap();
        }
        assert_eq!(bitfield.into_bytes(), vec![0x0D]);

        // Bitvector[12] = [T, F, T, T, F, F, F, T, F, T, F, T].
        let mut bitfield: BitVector<U12> = BitVector::new();
        for i in &[0, 2, 3, 7, 9, 11] {
            bitfield.set(*i, true).unwrap();
        }
        assert_eq!(bitfield.into_bytes(), vec![0x8D, 0x0A]);
    }

    #[test]
    fn test_get_set() {
        let mut bitfield = <BitList<U8>>::with_capacity(8).unwrap();
        bitfield.set(5, true).unwrap();
        assert_eq!(bitfield.get(4), Ok(false));
        assert_eq!(bitfield.get(5), Ok(true));
        assert_eq!(bitfield.get(6), Ok(false));
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut bitfield = <BitList<U8>>::with_capacity(8).unwrap();
        assert_eq!(
            bitfield.set(50, true),
            Err(Error::OutOfBounds { i: 50, len: 8 })
        );
        assert_eq!(bitfield.get(50), Err(Error::OutOfBounds { i: 50, len: 8 }));
    }

    #[test]
    fn test_from_raw_bytes() {
        assert!(<BitList<U10>>::from_raw_bytes(vec![0b0111_1111], 7).is_ok());
        assert!(<BitList<U10>>::from_raw_bytes(vec![0b1111_1111, 0b0000_0011], 10).is_ok());
    }

    #[test]
    fn test_from_raw_bytes_errors() {
        // Excess bits set to true.
        assert_eq!(
            <BitList<U10>>::from_raw_bytes(vec![0b0111_1111], 6),
            Err(Error::ExcessBits)
        );

        // Wrong number of bytes.
        assert_eq!(
            <BitList<U12>>::from_raw_bytes(vec![0, 0, 0, 0], 3),
            Err(Error::InvalidByteCount {
                given: 4,
                expected: 1
            })
        );
    }

    #[test]
    fn test_highest_set_bit() {
        let bitfield = <BitList<U8>>::from_raw_bytes(vec![0b0100_0000], 7).unwrap();
        assert_eq!(bitfield.highest_set_bit(), Some(6));

        let bitfield = <BitList<U8>>::from_raw_bytes(vec![0b0000_0000], 7).unwrap();
        assert_eq!(bitfield.highest_set_bit(), None);
    }

    #[test]
    fn test_intersection() {
        let a = <BitList<U16>>::from_raw_bytes(vec![0b0000_1100, 0b0000_0001], 16).unwrap();
        let b = <BitList<U16>>::from_raw_bytes(vec![0b0000_1000, 0b0100_0000], 16).unwrap();
        let expected = <BitList<U16>>::from_raw_bytes(vec![0b0000_1000, 0b0000_0000], 16).unwrap();

        assert_eq!(a.intersection(&b), expected);
    }

    #[test]
    fn test_union() {
        let a = <BitList<U16>>::from_raw_bytes(vec![0b0000_1100, 0b0000_0000], 16).unwrap();
        let b = <BitList<U16>>::from_raw_bytes(vec![0b0000_1000, 0b0100_0000], 16).unwrap();
        let expected = <BitList<U16>>::from_raw_bytes(vec![0b0000_1100, 0b0100_0000], 16).unwrap();

        assert_eq!(a.union(&b), expected);
    }

    #[test]
    fn test_difference() {
        let a = <BitList<U16>>::from_raw_bytes(vec![0b0011_1100, 0b0001_0001], 16).unwrap();
        let b = <BitList<U16>>::from_raw_bytes(vec![0b0001_1000, 0b0100_0000], 16).unwrap();
        let expected = <BitList<U16>>::from_raw_bytes(vec![0b0010_0100, 0b0001_0001], 16).unwrap();

        assert_eq!(a.difference(&b), expected);
    }

    #[test]
    fn test_num_set_bits() {
        let bitfield = <BitList<U16>>::from_raw_bytes(vec![0b1100_0000, 0b1110_1111], 16).unwrap();
        assert_eq!(bitfield.num_set_bits(), 9);

        assert!(<BitList<U16>>::with_capacity(16).unwrap().is_zero());
    }

    #[test]
    fn test_iteration() {
        let bitfield = <BitList<U16>>::from_raw_bytes(vec![0b1010_1010, 0b1010_1010], 16).unwrap();

        for (i, bit) in bitfield.iter().enumerate() {
            assert_eq!(bit, i % 2 == 1);
        }
        assert_eq!(bitfield.iter().count(), 16);
    }

    #[test]
    fn test_bitlist_ssz_round_trip() {
        type List = BitList<U100>;

        let list = List::from_bytes(vec![0, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(List::from_ssz_bytes(&list.as_ssz_bytes()).unwrap(), list);

        let list = List::from_bytes(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]).unwrap();
        assert_eq!(List::from_ssz_bytes(&list.as_ssz_bytes()).unwrap(), list);
    }

    #[test]
    fn test_bitvector_ssz_round_trip() {
        type Vector = BitVector<U100>;

        let vector = Vector::from_bytes(vec![0; 13]).unwrap();
        assert_eq!(
            Vector::from_ssz_bytes(&vector.as_ssz_bytes()).unwrap(),
            vector
        );

        let vector = Vector::from_bytes(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]).unwrap();
        assert_eq!(
            Vector::from_ssz_bytes(&vector.as_ssz_bytes()).unwrap(),
            vector
        );
    }

    #[test]
    fn test_bitvector_ssz_fixed_len() {
        assert_eq!(<BitVector<U7> as Encode>::ssz_fixed_len(), 1);
        assert_eq!(<BitVector<U12> as Encode>::ssz_fixed_len(), 2);
        assert_eq!(<BitVector<U32> as Encode>::ssz_fixed_len(), 4);
    }
}
