mod impls;

use super::*;

pub use impls::{sequence_ssz_append, sequence_ssz_bytes_len};

/// Provides SSZ encoding (serialization) via the `as_ssz_bytes()` method.
pub trait Encode {
    /// Returns `true` if this object has a fixed-length serialization.
    ///
    /// A container with at least one variable-length item is itself
    /// variable-length.
    fn is_ssz_fixed_len() -> bool;

    /// Appends the serialization of `self` to the provided buffer.
    ///
    /// Variable-length objects append only their payload, never their offset.
    fn ssz_append(&self, buf: &mut Vec<u8>);

    /// The number of bytes this object occupies in the fixed-length portion
    /// of a containing object's serialization.
    ///
    /// The default covers variable-length objects (which occupy an offset);
    /// fixed-length objects must return their serialized width.
    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// The total number of bytes `self` occupies once serialized.
    ///
    /// Touches only lengths, never contents.
    fn ssz_bytes_len(&self) -> usize;

    /// Serializes `self` into a fresh buffer.
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut buf = vec![];

        self.ssz_append(&mut buf);

        buf
    }
}

/// Encodes an ordered series of items as an SSZ container or list.
///
/// Fixed-length items land inline in the fixed portion; variable-length items
/// contribute an offset to the fixed portion and their payload to a variable
/// region that `finalize` splices on afterwards.
pub struct SszEncoder<'a> {
    /// Running offset: size of the fixed portion plus variable bytes so far.
    offset: usize,

    /// Target buffer holding the fixed portion.
    buf: &'a mut Vec<u8>,

    /// Payloads of the variable-length items, in append order.
    variable_bytes: Vec<u8>,
}

impl<'a> SszEncoder<'a> {
    /// Identical to `Self::container`.
    pub fn list(buf: &'a mut Vec<u8>, num_fixed_bytes: usize) -> Self {
        Self::container(buf, num_fixed_bytes)
    }

    /// Creates an encoder for a container whose fixed portion is
    /// `num_fixed_bytes` wide.
    pub fn container(buf: &'a mut Vec<u8>, num_fixed_bytes: usize) -> Self {
        buf.reserve(num_fixed_bytes);

        Self {
            offset: num_fixed_bytes,
            buf,
            variable_bytes: vec![],
        }
    }

    /// Appends the next item.
    pub fn append<T: Encode>(&mut self, item: &T) {
        self.append_parameterized(T::is_ssz_fixed_len(), |buf| item.ssz_append(buf))
    }

    /// Appends the next item, using `ssz_append` to serialize it rather than
    /// the item's own `Encode` implementation.
    pub fn append_parameterized<F>(&mut self, is_ssz_fixed_len: bool, ssz_append: F)
    where
        F: Fn(&mut Vec<u8>),
    {
        if is_ssz_fixed_len {
            ssz_append(self.buf);
        } else {
            self.buf
                .extend_from_slice(&encode_length(self.offset + self.variable_bytes.len()));

            ssz_append(&mut self.variable_bytes);
        }
    }

    /// Appends the variable-length payloads to the fixed portion.
    ///
    /// Must be called after the final `append`; the encoder is spent
    /// afterwards.
    pub fn finalize(&mut self) -> &mut Vec<u8> {
        self.buf.append(&mut self.variable_bytes);

        self.buf
    }
}

/// Encodes `len` in the little-endian offset format.
pub fn encode_length(len: usize) -> [u8; BYTES_PER_LENGTH_OFFSET] {
    // Lengths beyond the offset range cannot be represented on the wire.
    debug_assert!(len <= MAX_LENGTH_VALUE);

    let mut bytes = [0; BYTES_PER_LENGTH_OFFSET];
    bytes.copy_from_slice(&len.to_le_bytes()[0..BYTES_PER_LENGTH_OFFSET]);
    bytes
}
