//! Sequence and bitfield containers whose capacity is pinned by a
//! `typenum::Unsigned` type parameter, with SSZ, hash-tree-root and serde
//! support.

mod bitfield;
mod fixed_vector;
pub mod tree_hash;
mod variable_list;

pub use bitfield::{Bitfield, BitfieldBehaviour, Fixed, Variable};
pub use fixed_vector::FixedVector;
pub use variable_list::VariableList;

pub use typenum;

/// A bit list with a maximum length of `N` bits.
pub type BitList<N> = Bitfield<Variable<N>>;

/// A bit vector of exactly `N` bits.
pub type BitVector<N> = Bitfield<Fixed<N>>;

/// Returned when a container operation violates its capacity or encoding
/// rules.
#[derive(PartialEq, Debug, Clone)]
pub enum Error {
    OutOfBounds {
        i: usize,
        len: usize,
    },
    /// A `BitList` does not have a set sentinel bit, therefore its length is
    /// unknowable.
    MissingLengthInformation,
    /// A bitfield has bits set to true beyond its length.
    ExcessBits,
    /// A bitfield has an invalid number of bytes for the given bit length.
    InvalidByteCount {
        given: usize,
        expected: usize,
    },
}
