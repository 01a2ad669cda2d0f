#![recursion_limit = "256"]
//! Procedural derive macros for the `Encode` and `Decode` traits of the
//! `ssz` crate.
//!
//! Supports container-level and field-level attributes, see each derive
//! macro for more information.

extern crate proc_macro;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod impls;
mod opts;

use opts::{EnumBehaviour, StructBehaviour, StructOpts};

/// Implements `ssz::Encode` for some `struct` or `enum`.
///
/// ## Structs
///
/// Fields are encoded in the order they are defined.
///
/// The default behaviour is an SSZ container. With
/// `#[ssz(struct_behaviour = "stable_container", max_fields = "typenum::UN")]`
/// the struct is encoded as an EIP-7495 `StableContainer[N]`: every field
/// must be an `Option` and an `N`-bit bitmap of the present fields precedes
/// the container encoding of the present subset. The generated code refers to
/// the `ssz_types` crate, which must be a dependency of the calling crate.
///
/// ### Field attributes
///
/// - `#[ssz(skip_serializing)]`: the field will not be serialized.
/// - `#[ssz(with = "module")]`: delegate the field's codec to
///   `module::encode::*` / `module::decode::*` functions.
///
/// ## Enums
///
/// Enums require an `enum_behaviour` attribute:
///
/// - `"union"`: one-byte selector (the variant's position, starting at zero)
///   followed by the selected variant's encoding, per the SSZ union spec.
/// - `"transparent"`: the inner value is encoded as if the enum did not
///   exist. Such an encoding carries no selector and cannot be decoded.
///
/// Each variant must have exactly one unnamed field.
#[proc_macro_derive(Encode, attributes(ssz))]
pub fn ssz_encode_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let opts = StructOpts::from_derive_input(&item).unwrap();

    match &item.data {
        syn::Data::Struct(s) => match opts.struct_behaviour() {
            StructBehaviour::Container => impls::encode_struct(&item, s),
            StructBehaviour::StableContainer => {
                impls::encode_stable_container(&item, s, &opts.max_fields_type())
            }
        },
        syn::Data::Enum(e) => match opts.enum_behaviour() {
            EnumBehaviour::Union => impls::encode_enum_union(&item, e),
            EnumBehaviour::Transparent => impls::encode_enum_transparent(&item, e),
        },
        _ => panic!("ssz_derive only supports structs and enums"),
    }
}

/// Implements `ssz::Decode` for some `struct` or `enum`.
///
/// Mirrors the `Encode` derive; see its documentation for the attribute
/// surface.
///
/// ### Field attributes
///
/// - `#[ssz(skip_deserializing)]`: the field is instantiated from `Default`
///   and assumed to be absent from the serialization.
///
/// `enum_behaviour = "transparent"` cannot be decoded (the selector is not
/// on the wire) and is rejected.
#[proc_macro_derive(Decode, attributes(ssz))]
pub fn ssz_decode_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let opts = StructOpts::from_derive_input(&item).unwrap();

    match &item.data {
        syn::Data::Struct(s) => match opts.struct_behaviour() {
            StructBehaviour::Container => impls::decode_struct(&item, s),
            StructBehaviour::StableContainer => {
                impls::decode_stable_container(&item, s, &opts.max_fields_type())
            }
        },
        syn::Data::Enum(e) => match opts.enum_behaviour() {
            EnumBehaviour::Union => impls::decode_enum_union(&item, e),
            EnumBehaviour::Transparent => panic!(
                "Decode cannot be derived for enum_behaviour \"transparent\", only \"union\" is valid"
            ),
        },
        _ => panic!("ssz_derive only supports structs and enums"),
    }
}
