use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};
use std::fmt::Debug;

fn assert_encode<T: Encode>(item: &T, bytes: &[u8]) {
    assert_eq!(item.as_ssz_bytes(), bytes);
    assert_eq!(item.ssz_bytes_len(), bytes.len());
}

fn assert_encode_decode<T: Encode + Decode + PartialEq + Debug>(item: &T, bytes: &[u8]) {
    assert_encode(item, bytes);
    assert_eq!(T::from_ssz_bytes(bytes).unwrap(), *item);
}

mod structs {
    use super::*;

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct Mixed {
        a: u8,
        b: Vec<u8>,
    }

    #[test]
    fn mixed_struct() {
        assert_encode_decode(
            &Mixed {
                a: 1,
                b: vec![2, 3],
            },
            &[1, 5, 0, 0, 0, 2, 3],
        );
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct SkippedField {
        a: u16,
        #[ssz(skip_serializing)]
        #[ssz(skip_deserializing)]
        b: u64,
        c: u16,
    }

    #[test]
    fn skipped_field_absent_from_wire() {
        let item = SkippedField {
            a: 1,
            b: 99,
            c: 2,
        };

        assert_encode(&item, &[1, 0, 2, 0]);

        let decoded = SkippedField::from_ssz_bytes(&[1, 0, 2, 0]).unwrap();
        assert_eq!(
            decoded,
            SkippedField {
                a: 1,
                b: 0,
                c: 2
            }
        );
    }
}

mod custom_codec {
    use super::*;

    /// Stores a `u64` on the wire as its bitwise complement.
    mod complement {
        pub mod encode {
            use ssz::Encode;

            pub fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Encode>::is_ssz_fixed_len()
            }

            pub fn ssz_fixed_len() -> usize {
                <u64 as ssz::Encode>::ssz_fixed_len()
            }

            pub fn ssz_bytes_len(value: &u64) -> usize {
                (!value).ssz_bytes_len()
            }

            pub fn ssz_append(value: &u64, buf: &mut Vec<u8>) {
                ssz::Encode::ssz_append(&!value, buf)
            }
        }

        pub mod decode {
            pub fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Decode>::is_ssz_fixed_len()
            }

            pub fn ssz_fixed_len() -> usize {
                <u64 as ssz::Decode>::ssz_fixed_len()
            }

            pub fn from_ssz_bytes(bytes: &[u8]) -> Result<u64, ssz::DecodeError> {
                <u64 as ssz::Decode>::from_ssz_bytes(bytes).map(|value| !value)
            }
        }
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct WithDelegate {
        #[ssz(with = "complement")]
        a: u64,
        b: u8,
    }

    #[test]
    fn delegated_field_codec() {
        let item = WithDelegate { a: 0, b: 9 };

        assert_encode(&item, &[255, 255, 255, 255, 255, 255, 255, 255, 9]);
        assert_eq!(
            WithDelegate::from_ssz_bytes(&[255, 255, 255, 255, 255, 255, 255, 255, 9]).unwrap(),
            item
        );
    }
}

mod enums {
    use super::*;

    #[derive(PartialEq, Debug, Encode, Decode)]
    #[ssz(enum_behaviour = "union")]
    enum TwoFixedUnion {
        U8(u8),
        U16(u16),
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct TwoFixedUnionStruct {
        a: TwoFixedUnion,
    }

    #[test]
    fn two_fixed_union() {
        let eight = TwoFixedUnion::U8(1);
        let sixteen = TwoFixedUnion::U16(1);

        assert_encode_decode(&eight, &[0, 1]);
        assert_encode_decode(&sixteen, &[1, 1, 0]);

        assert_encode_decode(&TwoFixedUnionStruct { a: eight }, &[4, 0, 0, 0, 0, 1]);
        assert_encode_decode(&TwoFixedUnionStruct { a: sixteen }, &[4, 0, 0, 0, 1, 1, 0]);
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct VariableA {
        a: u8,
        b: Vec<u8>,
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct VariableB {
        a: Vec<u8>,
        b: u8,
    }

    #[derive(PartialEq, Debug, Encode)]
    #[ssz(enum_behaviour = "transparent")]
    enum TwoVariableTrans {
        A(VariableA),
        B(VariableB),
    }

    #[derive(PartialEq, Debug, Encode)]
    struct TwoVariableTransStruct {
        a: TwoVariableTrans,
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    #[ssz(enum_behaviour = "union")]
    enum TwoVariableUnion {
        A(VariableA),
        B(VariableB),
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    struct TwoVariableUnionStruct {
        a: TwoVariableUnion,
    }

    #[test]
    fn two_variable_trans() {
        let trans_a = TwoVariableTrans::A(VariableA {
            a: 1,
            b: vec![2, 3],
        });
        let trans_b = TwoVariableTrans::B(VariableB {
            a: vec![1, 2],
            b: 3,
        });

        assert_encode(&trans_a, &[1, 5, 0, 0, 0, 2, 3]);
        assert_encode(&trans_b, &[5, 0, 0, 0, 3, 1, 2]);

        assert_encode(
            &TwoVariableTransStruct { a: trans_a },
            &[4, 0, 0, 0, 1, 5, 0, 0, 0, 2, 3],
        );
        assert_encode(
            &TwoVariableTransStruct { a: trans_b },
            &[4, 0, 0, 0, 5, 0, 0, 0, 3, 1, 2],
        );
    }

    #[test]
    fn two_variable_union() {
        let union_a = TwoVariableUnion::A(VariableA {
            a: 1,
            b: vec![2, 3],
        });
        let union_b = TwoVariableUnion::B(VariableB {
            a: vec![1, 2],
            b: 3,
        });

        assert_encode_decode(&union_a, &[0, 1, 5, 0, 0, 0, 2, 3]);
        assert_encode_decode(&union_b, &[1, 5, 0, 0, 0, 3, 1, 2]);

        assert_encode_decode(
            &TwoVariableUnionStruct { a: union_a },
            &[4, 0, 0, 0, 0, 1, 5, 0, 0, 0, 2, 3],
        );
        assert_encode_decode(
            &TwoVariableUnionStruct { a: union_b },
            &[4, 0, 0, 0, 1, 5, 0, 0, 0, 3, 1, 2],
        );
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    #[ssz(enum_behaviour = "union")]
    enum TwoVecUnion {
        A(Vec<u8>),
        B(Vec<u8>),
    }

    #[test]
    fn two_vec_union() {
        assert_encode_decode(&TwoVecUnion::A(vec![]), &[0]);
        assert_encode_decode(&TwoVecUnion::B(vec![]), &[1]);

        assert_encode_decode(&TwoVecUnion::A(vec![0]), &[0, 0]);
        assert_encode_decode(&TwoVecUnion::B(vec![0]), &[1, 0]);

        assert_encode_decode(&TwoVecUnion::A(vec![0, 1]), &[0, 0, 1]);
        assert_encode_decode(&TwoVecUnion::B(vec![0, 1]), &[1, 0, 1]);
    }
}

mod stable_containers {
    use super::*;
    use ssz_types::VariableList;
    use typenum::{U4, U8};

    // The shape example from EIP-7495.
    #[derive(PartialEq, Debug, Encode, Decode)]
    #[ssz(struct_behaviour = "stable_container", max_fields = "U4")]
    struct Shape {
        side: Option<u16>,
        color: Option<u8>,
        radius: Option<u16>,
    }

    #[test]
    fn square_known_encoding() {
        let square = Shape {
            side: Some(0x42),
            color: Some(1),
            radius: None,
        };

        assert_encode_decode(&square, &[0x03, 0x42, 0x00, 0x01]);
    }

    #[test]
    fn circle_known_encoding() {
        let circle = Shape {
            side: None,
            color: Some(1),
            radius: Some(0x42),
        };

        assert_encode_decode(&circle, &[0x06, 0x01, 0x42, 0x00]);
    }

    #[test]
    fn empty_container() {
        let empty = Shape {
            side: None,
            color: None,
            radius: None,
        };

        assert_encode_decode(&empty, &[0x00]);
    }

    #[test]
    fn bitmap_round_trips_exactly() {
        let shapes = vec![
            Shape {
                side: Some(1),
                color: None,
                radius: Some(3),
            },
            Shape {
                side: None,
                color: Some(2),
                radius: None,
            },
        ];

        for shape in shapes {
            let bytes = shape.as_ssz_bytes();
            let decoded = Shape::from_ssz_bytes(&bytes).unwrap();
            assert_eq!(decoded, shape);
            // Idempotence: re-encoding reproduces the input bytes, bitmap
            // included.
            assert_eq!(decoded.as_ssz_bytes(), bytes);
        }
    }

    #[test]
    fn rejects_unknown_active_field() {
        // Bit 3 has no corresponding field.
        assert!(Shape::from_ssz_bytes(&[0x08]).is_err());
    }

    #[test]
    fn rejects_excess_bitmap_bits() {
        // Bit 4 exceeds the container capacity.
        assert!(Shape::from_ssz_bytes(&[0x10]).is_err());
    }

    #[test]
    fn rejects_truncated_bitmap() {
        assert_eq!(
            Shape::from_ssz_bytes(&[]),
            Err(ssz::DecodeError::InvalidByteLength {
                len: 0,
                expected: 1
            })
        );
    }

    #[derive(PartialEq, Debug, Encode, Decode)]
    #[ssz(struct_behaviour = "stable_container", max_fields = "U8")]
    struct WithVariable {
        id: Option<u64>,
        data: Option<VariableList<u8, U8>>,
        flag: Option<bool>,
    }

    #[test]
    fn variable_field_offsets_exclude_bitmap() {
        let item = WithVariable {
            id: Some(7),
            data: Some(VariableList::from(vec![0xaa, 0xbb])),
            flag: Some(true),
        };

        // Present subset: u64 (8 bytes), offset (4 bytes), bool (1 byte);
        // the first offset is 13, measured from after the bitmap.
        let expected = vec![
            0x07, // bitmap
            7, 0, 0, 0, 0, 0, 0, 0, // id
            13, 0, 0, 0, // offset of `data`
            1,    // flag
            0xaa, 0xbb, // data payload
        ];

        assert_encode_decode(&item, &expected);
    }

    #[test]
    fn variable_field_absent() {
        let item = WithVariable {
            id: None,
            data: Some(VariableList::from(vec![1])),
            flag: None,
        };

        assert_encode_decode(&item, &[0x02, 4, 0, 0, 0, 1]);
    }
}
