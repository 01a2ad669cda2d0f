use proc_macro::TokenStream;
use quote::quote;
use std::convert::TryInto;
use syn::{DataEnum, DataStruct, DeriveInput};

/// The highest possible union selector value.
const MAX_UNION_SELECTOR: u8 = 127;

/// Returns `true` unless the field carries `#[tree_hash(skip_hashing)]`.
fn should_hash_field(field: &syn::Field) -> bool {
    !field.attrs.iter().any(|attr| {
        attr.path.is_ident("tree_hash")
            && attr.tokens.to_string().replace(' ', "") == "(skip_hashing)"
    })
}

fn extract_ident(field: &syn::Field) -> &syn::Ident {
    match &field.ident {
        Some(ident) => ident,
        _ => panic!("tree_hash_derive only supports named struct fields"),
    }
}

/// Extracts the `T` from an `Option<T>` field of a stable container.
fn option_inner_type(ty: &syn::Type) -> &syn::Type {
    let invalid = || -> ! { panic!("stable_container fields must all be Option<_>") };

    match ty {
        syn::Type::Path(type_path) => {
            let segment = match type_path.path.segments.last() {
                Some(segment) if segment.ident == "Option" => segment,
                _ => invalid(),
            };

            match &segment.arguments {
                syn::PathArguments::AngleBracketed(args) => match args.args.first() {
                    Some(syn::GenericArgument::Type(inner)) => inner,
                    _ => invalid(),
                },
                _ => invalid(),
            }
        }
        _ => invalid(),
    }
}

fn compute_union_selectors(num_variants: usize) -> Vec<u8> {
    let union_selectors = (0..num_variants)
        .map(|i| {
            i.try_into()
                .expect("union selector exceeds u8::max_value, union has too many variants")
        })
        .collect::<Vec<u8>>();

    let highest_selector = union_selectors
        .last()
        .copied()
        .expect("0-variant union is not permitted");

    assert!(
        highest_selector <= MAX_UNION_SELECTOR,
        "union selector {} exceeds limit of {}, enum has too many variants",
        highest_selector,
        MAX_UNION_SELECTOR
    );

    union_selectors
}

/// Derives `tree_hash::TreeHash` for a struct behaving as an SSZ container.
pub fn tree_hash_struct(derive_input: &DeriveInput, struct_data: &DataStruct) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let hashed_idents: Vec<_> = struct_data
        .fields
        .iter()
        .filter(|field| should_hash_field(field))
        .map(extract_ident)
        .collect();

    let leaf_count = hashed_idents.len();

    let output = quote! {
        impl #impl_generics tree_hash::TreeHash for #name #ty_generics #where_clause {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                let mut leaves = Vec::with_capacity(#leaf_count * tree_hash::HASHSIZE);

                #(
                    leaves.extend_from_slice(
                        self.#hashed_idents.tree_hash_root().as_bytes()
                    );
                )*

                tree_hash::merkle_root(&leaves, 0)
            }
        }
    };

    output.into()
}

/// Derives `tree_hash::TreeHash` for a struct behaving as an EIP-7495
/// `StableContainer[N]`.
///
/// Absent fields contribute the zero chunk; the tree is always `N` leaves
/// wide and the bitmap's own root is mixed in on top.
pub fn tree_hash_stable_container(
    derive_input: &DeriveInput,
    struct_data: &DataStruct,
    max_fields: &syn::Type,
) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let mut field_idents = vec![];
    let mut field_indices = vec![];

    for (index, field) in struct_data.fields.iter().enumerate() {
        if !should_hash_field(field) {
            panic!("skip_hashing is not supported inside a stable_container");
        }

        // Only sanity-checks the shape; the inner type hashes through the
        // `Option` pattern match below.
        option_inner_type(&field.ty);

        field_idents.push(extract_ident(field));
        field_indices.push(index);
    }

    let output = quote! {
        impl #impl_generics tree_hash::TreeHash for #name #ty_generics #where_clause {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                let capacity = <#max_fields as ssz_types::typenum::Unsigned>::to_usize();

                let mut active_fields = ssz_types::BitVector::<#max_fields>::new();
                #(
                    if self.#field_idents.is_some() {
                        active_fields
                            .set(#field_indices, true)
                            .expect("stable container capacity covers every field");
                    }
                )*

                let mut leaves = vec![0; capacity * tree_hash::HASHSIZE];
                #(
                    if let Some(field) = &self.#field_idents {
                        leaves[#field_indices * tree_hash::HASHSIZE
                            ..(#field_indices + 1) * tree_hash::HASHSIZE]
                            .copy_from_slice(field.tree_hash_root().as_bytes());
                    }
                )*

                let root = tree_hash::merkle_root(&leaves, capacity);

                tree_hash::mix_in_aux(&root, &active_fields.tree_hash_root())
            }
        }
    };

    output.into()
}

/// Derives `tree_hash::TreeHash` for an enum in the "transparent" method:
/// the inner value is hashed as if the enum did not exist.
pub fn tree_hash_enum_transparent(
    derive_input: &DeriveInput,
    enum_data: &DataEnum,
) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let patterns: Vec<_> = enum_data
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;

            if variant.fields.len() != 1 {
                panic!("TreeHash can only be derived for enums with 1 field per variant");
            }

            quote! {
                #name::#variant_name(ref inner)
            }
        })
        .collect();

    let output = quote! {
        impl #impl_generics tree_hash::TreeHash for #name #ty_generics #where_clause {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Enum should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Enum should never be packed.")
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                match self {
                    #(
                        #patterns => inner.tree_hash_root(),
                    )*
                }
            }
        }
    };

    output.into()
}

/// Derives `tree_hash::TreeHash` for an enum following the "union" SSZ spec:
/// the variant's position is mixed into the inner value's root.
pub fn tree_hash_enum_union(derive_input: &DeriveInput, enum_data: &DataEnum) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let patterns: Vec<_> = enum_data
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;

            if variant.fields.len() != 1 {
                panic!("TreeHash can only be derived for enums with 1 field per variant");
            }

            quote! {
                #name::#variant_name(ref inner)
            }
        })
        .collect();

    let union_selectors = compute_union_selectors(patterns.len());

    let output = quote! {
        impl #impl_generics tree_hash::TreeHash for #name #ty_generics #where_clause {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Enum should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Enum should never be packed.")
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                match self {
                    #(
                        #patterns => {
                            let root = inner.tree_hash_root();
                            let selector = #union_selectors;
                            tree_hash::mix_in_selector(&root, selector)
                                .expect("derive macro should prevent out-of-bounds selectors")
                        },
                    )*
                }
            }
        }
    };

    output.into()
}
