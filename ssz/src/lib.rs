//! Encoding (serialization) and decoding (deserialization) in the
//! SimpleSerialize (SSZ) format used by the Ethereum consensus layer.
//!
//! The encoding is deterministic and little-endian throughout. Variable-size
//! items inside a container are replaced by 4-byte offsets in the fixed
//! portion of the serialization, with their payloads appended afterwards in
//! declaration order.
//!
//! ## Example
//!
//! ```rust
//! use ssz_derive::{Encode, Decode};
//! use ssz::{Decode, Encode};
//!
//! #[derive(PartialEq, Debug, Encode, Decode)]
//! struct Foo {
//!     a: u64,
//!     b: Vec<u16>,
//! }
//!
//! fn ssz_encode_decode_example() {
//!     let foo = Foo {
//!         a: 42,
//!         b: vec![1, 3, 3, 7]
//!     };
//!
//!     let ssz_bytes: Vec<u8> = foo.as_ssz_bytes();
//!
//!     let decoded_foo = Foo::from_ssz_bytes(&ssz_bytes).unwrap();
//!
//!     assert_eq!(foo, decoded_foo);
//! }
//! ```

mod decode;
mod encode;
mod union_selector;
mod view;

pub use decode::{
    impls::decode_list_of_variable_length_items, read_offset, sanitize_offset, split_union_bytes,
    Decode, DecodeError, SszDecoder, SszDecoderBuilder,
};
pub use encode::{encode_length, sequence_ssz_append, sequence_ssz_bytes_len, Encode, SszEncoder};
pub use union_selector::UnionSelector;
pub use view::{ByteView, DecodeView};

/// The number of bytes used to represent an offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
#[cfg(target_pointer_width = "32")]
pub const MAX_LENGTH_VALUE: usize = (std::u32::MAX >> (8 * (4 - BYTES_PER_LENGTH_OFFSET))) as usize;
#[cfg(target_pointer_width = "64")]
pub const MAX_LENGTH_VALUE: usize = (std::u64::MAX >> (8 * (8 - BYTES_PER_LENGTH_OFFSET))) as usize;

/// The number of bytes used to indicate the variant of a union.
pub const BYTES_PER_UNION_SELECTOR: usize = 1;

/// The highest possible union selector value (higher values are reserved for
/// backwards compatible extensions).
pub const MAX_UNION_SELECTOR: u8 = 127;

/// Convenience function to SSZ encode an object supporting `ssz::Encode`.
///
/// Equivalent to `val.as_ssz_bytes()`.
pub fn ssz_encode<T: Encode>(val: &T) -> Vec<u8> {
    val.as_ssz_bytes()
}
