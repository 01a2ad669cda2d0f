#![recursion_limit = "256"]
//! Procedural derive macro for the `TreeHash` trait of the `tree_hash`
//! crate.

extern crate proc_macro;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod impls;

/// Container-level configuration, parsed from `#[tree_hash(..)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(tree_hash))]
struct StructOpts {
    #[darling(default)]
    enum_behaviour: Option<String>,
    #[darling(default)]
    struct_behaviour: Option<String>,
    #[darling(default)]
    max_fields: Option<String>,
}

/// Implements `tree_hash::TreeHash` for some `struct` or `enum`.
///
/// ## Structs
///
/// The default behaviour hashes the struct as an SSZ container: one leaf per
/// field, merkleized bottom-up.
///
/// With `#[tree_hash(struct_behaviour = "stable_container",
/// max_fields = "typenum::UN")]` the struct is hashed as an EIP-7495
/// `StableContainer[N]`: `N` leaves (absent fields contribute the zero
/// chunk), merkleized, with the root of the active-field bitmap mixed in.
/// Every field must be an `Option` and the `ssz_types` crate must be a
/// dependency of the calling crate.
///
/// Fields marked `#[tree_hash(skip_hashing)]` contribute no leaf.
///
/// ## Enums
///
/// Enums require an `enum_behaviour` attribute:
///
/// - `"union"`: mixes the variant's position into the inner value's root,
///   per the SSZ union scheme.
/// - `"transparent"`: hashes the inner value as if the enum did not exist.
#[proc_macro_derive(TreeHash, attributes(tree_hash))]
pub fn tree_hash_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let opts = StructOpts::from_derive_input(&item).unwrap();

    match &item.data {
        syn::Data::Struct(s) => {
            if opts.enum_behaviour.is_some() {
                panic!("enum_behaviour is invalid for structs");
            }

            match opts.struct_behaviour.as_deref() {
                None | Some("container") => {
                    if opts.max_fields.is_some() {
                        panic!("max_fields is invalid for regular containers");
                    }
                    impls::tree_hash_struct(&item, s)
                }
                Some("stable_container") => {
                    let max_fields = opts.max_fields.as_ref().expect(
                        "stable_container requires a \"max_fields\" attribute, \
                         e.g., #[tree_hash(struct_behaviour = \"stable_container\", \
                         max_fields = \"typenum::U8\")]",
                    );
                    let max_fields =
                        syn::parse_str(max_fields).expect("max_fields is not a valid type path");

                    impls::tree_hash_stable_container(&item, s, &max_fields)
                }
                Some(other) => panic!(
                    "{} is an invalid struct_behaviour, use \"container\" or \"stable_container\"",
                    other
                ),
            }
        }
        syn::Data::Enum(e) => {
            if opts.struct_behaviour.is_some() {
                panic!("struct_behaviour is invalid for enums");
            }

            match opts.enum_behaviour.as_deref() {
                Some("union") => impls::tree_hash_enum_union(&item, e),
                Some("transparent") => impls::tree_hash_enum_transparent(&item, e),
                Some(other) => panic!(
                    "{} is an invalid enum_behaviour, use \"union\" or \"transparent\"",
                    other
                ),
                None => panic!(
                    "enums require an \"enum_behaviour\" attribute, \
                     e.g., #[tree_hash(enum_behaviour = \"union\")]"
                ),
            }
        }
        _ => panic!("tree_hash_derive only supports structs and enums"),
    }
}
