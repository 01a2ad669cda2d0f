use super::*;
use core::num::NonZeroUsize;
use ethereum_types::{H256, U128, U256};
use std::sync::Arc;

macro_rules! impl_decodable_for_uint {
    ($type: ident, $bit_size: expr) => {
        impl Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $bit_size / 8
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let len = bytes.len();
                let expected = <Self as Decode>::ssz_fixed_len();

                if len != expected {
                    Err(DecodeError::InvalidByteLength { len, expected })
                } else {
                    let mut array = [0; $bit_size / 8];
                    array.copy_from_slice(bytes);

                    Ok(<$type>::from_le_bytes(array))
                }
            }
        }
    };
}

impl_decodable_for_uint!(u8, 8);
impl_decodable_for_uint!(u16, 16);
impl_decodable_for_uint!(u32, 32);
impl_decodable_for_uint!(u64, 64);

#[cfg(target_pointer_width = "32")]
impl_decodable_for_uint!(usize, 32);

#[cfg(target_pointer_width = "64")]
impl_decodable_for_uint!(usize, 64);

impl Decode for bool {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        1
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let len = bytes.len();
        let expected = <Self as Decode>::ssz_fixed_len();

        if len != expected {
            Err(DecodeError::InvalidByteLength { len, expected })
        } else {
            // Strict booleans: any byte other than 0 or 1 is rejected.
            match bytes[0] {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(DecodeError::BytesInvalid(format!(
                    "Invalid value for boolean: {}",
                    other
                ))),
            }
        }
    }
}

/// The SSZ `Optional` type: one selector byte, then the payload if present.
impl<T: Decode> Decode for Option<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (selector, body) = split_union_bytes(bytes)?;

        match selector.into() {
            0u8 => {
                if body.is_empty() {
                    Ok(None)
                } else {
                    Err(DecodeError::BytesInvalid(format!(
                        "optional None has {} trailing bytes",
                        body.len()
                    )))
                }
            }
            1u8 => <T as Decode>::from_ssz_bytes(body).map(Some),
            other => Err(DecodeError::UnionSelectorInvalid(other)),
        }
    }
}

impl Decode for NonZeroUsize {
    fn is_ssz_fixed_len() -> bool {
        <usize as Decode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        <usize as Decode>::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let x = usize::from_ssz_bytes(bytes)?;

        NonZeroUsize::new(x)
            .ok_or_else(|| DecodeError::BytesInvalid("NonZeroUsize cannot be zero".to_string()))
    }
}

impl<T: Decode> Decode for Arc<T> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        T::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        T::from_ssz_bytes(bytes).map(Arc::new)
    }
}

impl Decode for H256 {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        32
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let len = bytes.len();
        let expected = <Self as Decode>::ssz_fixed_len();

        if len != expected {
            Err(DecodeError::InvalidByteLength { len, expected })
        } else {
            Ok(H256::from_slice(bytes))
        }
    }
}

// Little-endian wide integers.
macro_rules! impl_decodable_for_le_integer {
    ($type: ident, $bit_size: expr) => {
        impl Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $bit_size / 8
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let len = bytes.len();
                let expected = <Self as Decode>::ssz_fixed_len();

                if len != expected {
                    Err(DecodeError::InvalidByteLength { len, expected })
                } else {
                    Ok(<$type>::from_little_endian(bytes))
                }
            }
        }
    };
}

impl_decodable_for_le_integer!(U128, 128);
impl_decodable_for_le_integer!(U256, 256);

macro_rules! impl_decodable_for_u8_array {
    ($len: expr) => {
        impl Decode for [u8; $len] {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $len
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let len = bytes.len();
                let expected = <Self as Decode>::ssz_fixed_len();

                if len != expected {
                    Err(DecodeError::InvalidByteLength { len, expected })
                } else {
                    let mut array = [0; $len];
                    array.copy_from_slice(bytes);

                    Ok(array)
                }
            }
        }
    };
}

impl_decodable_for_u8_array!(4);
impl_decodable_for_u8_array!(32);
impl_decodable_for_u8_array!(48);

impl<T: Decode> Decode for Vec<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            Ok(vec![])
        } else if T::is_ssz_fixed_len() {
            let num_items = bytes
                .len()
                .checked_div(T::ssz_fixed_len())
                .ok_or(DecodeError::ZeroLengthItem)?;

            if num_items * T::ssz_fixed_len() != bytes.len() {
                return Err(DecodeError::InvalidByteLength {
                    len: bytes.len(),
                    expected: num_items * T::ssz_fixed_len(),
                });
            }

            bytes
                .chunks(T::ssz_fixed_len())
                .map(|chunk| T::from_ssz_bytes(chunk))
                .collect()
        } else {
            decode_list_of_variable_length_items(bytes)
        }
    }
}

/// Decodes `bytes` as if it were a list of variable-length items.
///
/// The first offset determines both the position of the first payload byte
/// and the number of items (`first / BYTES_PER_LENGTH_OFFSET`); each item `i`
/// occupies the bytes between consecutive offsets, the last running to the
/// end of the input.
pub fn decode_list_of_variable_length_items<T: Decode>(
    bytes: &[u8],
) -> Result<Vec<T>, DecodeError> {
    if bytes.is_empty() {
        return Ok(vec![]);
    }

    let first_offset = read_offset(bytes)?;
    sanitize_offset(first_offset, None, bytes.len(), Some(first_offset))?;

    if first_offset % BYTES_PER_LENGTH_OFFSET != 0 || first_offset < BYTES_PER_LENGTH_OFFSET {
        return Err(DecodeError::InvalidListFixedBytesLen(first_offset));
    }

    let num_items = first_offset / BYTES_PER_LENGTH_OFFSET;

    let mut values = Vec::with_capacity(num_items);
    let mut previous_offset = first_offset;

    for i in 1..=num_items {
        let slice = if i == num_items {
            bytes
                .get(previous_offset..)
                .ok_or(DecodeError::OutOfBoundsByte { i: previous_offset })?
        } else {
            let offset = read_offset(&bytes[i * BYTES_PER_LENGTH_OFFSET..])?;
            sanitize_offset(offset, Some(previous_offset), bytes.len(), None)?;

            let slice = bytes
                .get(previous_offset..offset)
                .ok_or(DecodeError::OutOfBoundsByte { i: offset })?;
            previous_offset = offset;
            slice
        };

        values.push(T::from_ssz_bytes(slice)?);
    }

    Ok(values)
}
