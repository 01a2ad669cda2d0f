use crate::opts::FieldOpts;
use darling::FromMeta;
use proc_macro::TokenStream;
use quote::quote;
use std::convert::TryInto;
use syn::{DataEnum, DataStruct, DeriveInput};

/// The highest possible union selector value (higher values are reserved for
/// backwards compatible extensions).
const MAX_UNION_SELECTOR: u8 = 127;

fn parse_ssz_fields(struct_data: &DataStruct) -> Vec<(&syn::Type, &syn::Ident, FieldOpts)> {
    struct_data
        .fields
        .iter()
        .map(|field| {
            let ty = &field.ty;
            let ident = match &field.ident {
                Some(ident) => ident,
                _ => panic!("ssz_derive only supports named struct fields"),
            };

            let field_opts_candidates = field
                .attrs
                .iter()
                .filter(|attr| attr.path.get_ident().map_or(false, |ident| *ident == "ssz"))
                .collect::<Vec<_>>();

            if field_opts_candidates.len() > 1 {
                panic!("more than one field-level \"ssz\" attribute provided");
            }

            let field_opts = field_opts_candidates
                .first()
                .map(|attr| {
                    let meta = attr.parse_meta().unwrap();
                    FieldOpts::from_meta(&meta).unwrap()
                })
                .unwrap_or_default();

            (ty, ident, field_opts)
        })
        .collect()
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

/// Parses a stable container's fields, yielding `(inner_type, ident, index)`
/// per field.
fn parse_stable_fields(struct_data: &DataStruct) -> Vec<(&syn::Type, &syn::Ident, usize)> {
    parse_ssz_fields(struct_data)
        .into_iter()
        .enumerate()
        .map(|(index, (ty, ident, field_opts))| {
            if field_opts.with.is_some()
                || field_opts.skip_serializing
                || field_opts.skip_deserializing
            {
                panic!("field-level ssz attributes are not supported inside a stable_container");
            }

            (option_inner_type(ty), ident, index)
        })
        .collect()
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

/// Derives `ssz::Encode` for a struct behaving as an SSZ container.
pub fn encode_struct(derive_input: &DeriveInput, struct_data: &DataStruct) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let mut field_is_ssz_fixed_len = vec![];
    let mut field_fixed_len = vec![];
    let mut field_ssz_bytes_len = vec![];
    let mut field_encoder_append = vec![];

    for (ty, ident, field_opts) in parse_ssz_fields(struct_data) {
        if field_opts.skip_serializing {
            continue;
        }

        if let Some(module) = field_opts.with {
            let module = quote! { #module::encode };
            field_is_ssz_fixed_len.push(quote! { #module::is_ssz_fixed_len() });
            field_fixed_len.push(quote! { #module::ssz_fixed_len() });
            field_ssz_bytes_len.push(quote! { #module::ssz_bytes_len(&self.#ident) });
            field_encoder_append.push(quote! {
                encoder.append_parameterized(
                    #module::is_ssz_fixed_len(),
                    |buf| #module::ssz_append(&self.#ident, buf)
                )
            });
        } else {
            field_is_ssz_fixed_len.push(quote! { <#ty as ssz::Encode>::is_ssz_fixed_len() });
            field_fixed_len.push(quote! { <#ty as ssz::Encode>::ssz_fixed_len() });
            field_ssz_bytes_len.push(quote! { self.#ident.ssz_bytes_len() });
            field_encoder_append.push(quote! { encoder.append(&self.#ident) });
        }
    }

    let output = quote! {
        impl #impl_generics ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    #field_is_ssz_fixed_len &&
                )*
                    true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ssz::Encode>::is_ssz_fixed_len() {
                    #(
                        #field_fixed_len +
                    )*
                        0
                } else {
                    ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn ssz_bytes_len(&self) -> usize {
                if <Self as ssz::Encode>::is_ssz_fixed_len() {
                    <Self as ssz::Encode>::ssz_fixed_len()
                } else {
                    let mut len = 0;
                    #(
                        if #field_is_ssz_fixed_len {
                            len += #field_fixed_len;
                        } else {
                            len += ssz::BYTES_PER_LENGTH_OFFSET;
                            len += #field_ssz_bytes_len;
                        }
                    )*
                    len
                }
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let offset = #(
                        #field_fixed_len +
                    )*
                        0;

                let mut encoder = ssz::SszEncoder::container(buf, offset);

                #(
                    #field_encoder_append;
                )*

                encoder.finalize();
            }
        }
    };
    output.into()
}

/// Derives `ssz::Encode` for a struct behaving as an EIP-7495
/// `StableContainer[N]`.
pub fn encode_stable_container(
    derive_input: &DeriveInput,
    struct_data: &DataStruct,
    max_fields: &syn::Type,
) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let mut field_idents = vec![];
    let mut field_inner_tys = vec![];
    let mut field_indices = vec![];

    for (inner_ty, ident, index) in parse_stable_fields(struct_data) {
        field_idents.push(ident);
        field_inner_tys.push(inner_ty);
        field_indices.push(index);
    }

    let output = quote! {
        impl #impl_generics ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                false
            }

            fn ssz_bytes_len(&self) -> usize {
                let mut len =
                    (<#max_fields as ssz_types::typenum::Unsigned>::to_usize() + 7) / 8;

                #(
                    if let Some(field) = &self.#field_idents {
                        if <#field_inner_tys as ssz::Encode>::is_ssz_fixed_len() {
                            len += <#field_inner_tys as ssz::Encode>::ssz_fixed_len();
                        } else {
                            len += ssz::BYTES_PER_LENGTH_OFFSET;
                            len += field.ssz_bytes_len();
                        }
                    }
                )*

                len
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let mut active_fields = ssz_types::BitVector::<#max_fields>::new();

                #(
                    if self.#field_idents.is_some() {
                        active_fields
                            .set(#field_indices, true)
                            .expect("stable container capacity covers every field");
                    }
                )*

                buf.extend_from_slice(active_fields.as_slice());

                // Offsets are relative to the container encoding of the
                // present subset, not the bitmap.
                let mut offset = 0;
                #(
                    if self.#field_idents.is_some() {
                        offset += if <#field_inner_tys as ssz::Encode>::is_ssz_fixed_len() {
                            <#field_inner_tys as ssz::Encode>::ssz_fixed_len()
                        } else {
                            ssz::BYTES_PER_LENGTH_OFFSET
                        };
                    }
                )*

                let mut encoder = ssz::SszEncoder::container(buf, offset);

                #(
                    if let Some(field) = &self.#field_idents {
                        encoder.append(field);
                    }
                )*

                encoder.finalize();
            }
        }
    };
    output.into()
}

/// Derives `ssz::Encode` for an enum in the "transparent" method.
///
/// The inner field is serialized as if the enum did not exist. Since no
/// selector is serialized, the encoding cannot be reliably decoded.
///
/// Only supports enums where each variant has a single field, all of which
/// are variably sized from an SSZ perspective.
pub fn encode_enum_transparent(derive_input: &DeriveInput, enum_data: &DataEnum) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let (patterns, assert_exprs): (Vec<_>, Vec<_>) = enum_data
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;

            if variant.fields.len() != 1 {
                panic!("ssz::Encode can only be derived for enums with 1 field per variant");
            }

            let pattern = quote! {
                #name::#variant_name(ref inner)
            };

            let ty = &variant.fields.iter().next().unwrap().ty;
            let type_assert = quote! {
                !<#ty as ssz::Encode>::is_ssz_fixed_len()
            };
            (pattern, type_assert)
        })
        .unzip();

    let output = quote! {
        impl #impl_generics ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                assert!(
                    #(
                        #assert_exprs &&
                    )* true,
                    "not all enum variants are variably-sized"
                );
                false
            }

            fn ssz_bytes_len(&self) -> usize {
                match self {
                    #(
                        #patterns => inner.ssz_bytes_len(),
                    )*
                }
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                match self {
                    #(
                        #patterns => inner.ssz_append(buf),
                    )*
                }
            }
        }
    };
    output.into()
}

/// Derives `ssz::Encode` for an enum following the "union" SSZ spec.
///
/// The selector is the variant's position in the enum, starting at zero.
pub fn encode_enum_union(derive_input: &DeriveInput, enum_data: &DataEnum) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let patterns: Vec<_> = enum_data
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;

            if variant.fields.len() != 1 {
                panic!("ssz::Encode can only be derived for enums with 1 field per variant");
            }

            quote! {
                #name::#variant_name(ref inner)
            }
        })
        .collect();

    let union_selectors = compute_union_selectors(patterns.len());

    let output = quote! {
        impl #impl_generics ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                false
            }

            fn ssz_bytes_len(&self) -> usize {
                match self {
                    #(
                        #patterns => inner.ssz_bytes_len() + ssz::BYTES_PER_UNION_SELECTOR,
                    )*
                }
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                match self {
                    #(
                        #patterns => {
                            let union_selector: u8 = #union_selectors;
                            debug_assert!(union_selector <= ssz::MAX_UNION_SELECTOR);
                            buf.push(union_selector);
                            inner.ssz_append(buf)
                        },
                    )*
                }
            }
        }
    };
    output.into()
}

/// Derives `ssz::Decode` for a struct behaving as an SSZ container.
pub fn decode_struct(derive_input: &DeriveInput, struct_data: &DataStruct) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let mut register_types = vec![];
    let mut field_names = vec![];
    let mut decodes = vec![];
    let mut is_fixed_lens = vec![];
    let mut fixed_lens = vec![];

    for (ty, ident, field_opts) in parse_ssz_fields(struct_data) {
        field_names.push(quote! { #ident });

        // The field is absent from the serialization; instantiate it from a
        // `Default` implementation instead.
        if field_opts.skip_deserializing {
            decodes.push(quote! {
                let #ident = <_>::default();
            });

            continue;
        }

        if let Some(module) = field_opts.with {
            let module = quote! { #module::decode };

            let is_ssz_fixed_len = quote! { #module::is_ssz_fixed_len() };
            let ssz_fixed_len = quote! { #module::ssz_fixed_len() };

            register_types.push(quote! {
                builder.register_type_parameterized(#is_ssz_fixed_len, #ssz_fixed_len)?;
            });
            decodes.push(quote! {
                let #ident = decoder.decode_next_with(|slice| #module::from_ssz_bytes(slice))?;
            });
            is_fixed_lens.push(is_ssz_fixed_len);
            fixed_lens.push(ssz_fixed_len);
        } else {
            register_types.push(quote! {
                builder.register_type::<#ty>()?;
            });
            decodes.push(quote! {
                let #ident = decoder.decode_next()?;
            });
            is_fixed_lens.push(quote! { <#ty as ssz::Decode>::is_ssz_fixed_len() });
            fixed_lens.push(quote! { <#ty as ssz::Decode>::ssz_fixed_len() });
        }
    }

    let output = quote! {
        impl #impl_generics ssz::Decode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    #is_fixed_lens &&
                )*
                    true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ssz::Decode>::is_ssz_fixed_len() {
                    #(
                        #fixed_lens +
                    )*
                        0
                } else {
                    ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
                let mut builder = ssz::SszDecoderBuilder::new(bytes);

                #(
                    #register_types
                )*

                let mut decoder = builder.build()?;

                #(
                    #decodes
                )*

                Ok(Self {
                    #(
                        #field_names,
                    )*
                })
            }
        }
    };
    output.into()
}

/// Derives `ssz::Decode` for a struct behaving as an EIP-7495
/// `StableContainer[N]`.
pub fn decode_stable_container(
    derive_input: &DeriveInput,
    struct_data: &DataStruct,
    max_fields: &syn::Type,
) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let mut field_idents = vec![];
    let mut field_inner_tys = vec![];
    let mut field_indices = vec![];

    for (inner_ty, ident, index) in parse_stable_fields(struct_data) {
        field_idents.push(ident);
        field_inner_tys.push(inner_ty);
        field_indices.push(index);
    }

    let field_count = field_idents.len();

    let output = quote! {
        impl #impl_generics ssz::Decode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                false
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
                let capacity = <#max_fields as ssz_types::typenum::Unsigned>::to_usize();
                let bitmap_len = (capacity + 7) / 8;

                if bytes.len() < bitmap_len {
                    return Err(ssz::DecodeError::InvalidByteLength {
                        len: bytes.len(),
                        expected: bitmap_len,
                    });
                }

                let (bitmap_bytes, body) = bytes.split_at(bitmap_len);

                let active_fields =
                    ssz_types::BitVector::<#max_fields>::from_bytes(bitmap_bytes.to_vec())
                        .map_err(|e| ssz::DecodeError::BytesInvalid(
                            format!("invalid active-fields bitvector: {:?}", e)
                        ))?;

                // Bits without a corresponding field belong to a newer
                // version of the container.
                for i in #field_count..capacity {
                    if active_fields.get(i).expect("index is within capacity") {
                        return Err(ssz::DecodeError::BytesInvalid(
                            format!("unknown active field {} in stable container", i)
                        ));
                    }
                }

                let mut builder = ssz::SszDecoderBuilder::new(body);

                #(
                    if active_fields.get(#field_indices).expect("index is within capacity") {
                        builder.register_type::<#field_inner_tys>()?;
                    }
                )*

                let mut decoder = builder.build()?;

                #(
                    let #field_idents = if active_fields
                        .get(#field_indices)
                        .expect("index is within capacity")
                    {
                        Some(decoder.decode_next()?)
                    } else {
                        None
                    };
                )*

                Ok(Self {
                    #(
                        #field_idents,
                    )*
                })
            }
        }
    };
    output.into()
}

/// Derives `ssz::Decode` for an enum following the "union" SSZ spec.
pub fn decode_enum_union(derive_input: &DeriveInput, enum_data: &DataEnum) -> TokenStream {
    let name = &derive_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derive_input.generics.split_for_impl();

    let (constructors, var_types): (Vec<_>, Vec<_>) = enum_data
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;

            if variant.fields.len() != 1 {
                panic!("ssz::Decode can only be derived for enums with 1 field per variant");
            }

            let constructor = quote! {
                #name::#variant_name
            };

            let ty = &variant.fields.iter().next().unwrap().ty;
            (constructor, ty)
        })
        .unzip();

    let union_selectors = compute_union_selectors(constructors.len());

    let output = quote! {
        impl #impl_generics ssz::Decode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                false
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
                // Sanity check to ensure the selector limit here does not
                // drift from the one defined in `ssz`.
                debug_assert_eq!(#MAX_UNION_SELECTOR, ssz::MAX_UNION_SELECTOR);

                let (selector, body) = ssz::split_union_bytes(bytes)?;

                match selector.into() {
                    #(
                        #union_selectors => {
                            <#var_types as ssz::Decode>::from_ssz_bytes(body).map(#constructors)
                        },
                    )*
                    other => Err(ssz::DecodeError::UnionSelectorInvalid(other))
                }
            }
        }
    };
    output.into()
}
