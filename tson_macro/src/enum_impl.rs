use proc_macro2::{Literal, Span};
use quote::quote;
use syn::*;

pub fn tson_rep(name: Ident, data: DataEnum) -> proc_macro2::TokenStream {
    let name_str = name.to_string();

    let variant_info: Vec<(Ident, Vec<Ident>, Fields, String, Literal)> = data
        .variants // variants of the enum
        .iter()
        .enumerate()
        .map(|(ix, variant)| {
            // fields of the variant
            let field_idents = match &variant.fields {
                Fields::Named(_fields) => variant
                    .fields
                    .iter()
                    .map(|field| field.ident.clone().unwrap())
                    .collect(),
                _ => (0..variant.fields.iter().len())
                    .map(|i| Ident::new(&format!("field{}", i), Span::call_site()))
                    .collect(),
            };
            (
                variant.ident.clone(),
                field_idents,
                variant.fields.clone(),
                variant.ident.to_string(),
                Literal::u64_unsuffixed(ix as u64),
            )
        })
        .collect();

    // shape
    let impl_shape = {
        let alts = variant_info
            .iter()
            .map(|(_variant, _field_idents, fields, ident_string, _ix)| match fields {
                // unit-like variant
                Fields::Unit => quote! {
                    ::tson::shape::Alt::new(#ident_string, ::tson::shape::Shape::unit())
                },
                // tuple variant
                Fields::Unnamed(_fields) => {
                    let members = fields.iter().map(|field| {
                        let ty = &field.ty;
                        quote! {
                            ::tson::shape::Field::unnamed(::tson::shape::Shape::defer::<#ty>())
                        }
                    });
                    quote! {
                        ::tson::shape::Alt::new(
                            #ident_string,
                            ::tson::shape::Shape::Product(vec![#(#members),*]),
                        )
                    }
                }
                // c-style variant
                Fields::Named(_fields) => {
                    let members = fields.iter().map(|field| {
                        let ty = &field.ty;
                        let field_string = field.ident.clone().unwrap().to_string();
                        quote! {
                            ::tson::shape::Field::named(
                                #field_string,
                                ::tson::shape::Shape::defer::<#ty>(),
                            )
                        }
                    });
                    quote! {
                        ::tson::shape::Alt::new(
                            #ident_string,
                            ::tson::shape::Shape::Product(vec![#(#members),*]),
                        )
                    }
                }
            });
        quote! {
            fn shape() -> ::tson::shape::Shape {
                ::tson::shape::Shape::Sum(#name_str, vec![#(#alts),*])
            }
        }
    };

    // to_tson
    let impl_to_tson = {
        let branches = variant_info
            .iter()
            .map(|(variant, field_idents, fields, _ident_string, ix)| match fields {
                // unit-like variant
                Fields::Unit => quote! {
                    #name::#variant => ::tson::Tson::Variant(
                        #ix,
                        Box::new(::tson::Tson::Product(vec![])),
                    ),
                },
                // tuple variant
                Fields::Unnamed(_fields) => {
                    let args = field_idents
                        .iter()
                        .map(|ident| quote! { ::tson::rep::TsonRep::to_tson(#ident) });
                    quote! {
                        #name::#variant(#(#field_idents),*) => ::tson::Tson::Variant(
                            #ix,
                            Box::new(::tson::Tson::Product(vec![#(#args),*])),
                        ),
                    }
                }
                // c-style variant
                Fields::Named(_fields) => {
                    let args = field_idents
                        .iter()
                        .map(|ident| quote! { ::tson::rep::TsonRep::to_tson(#ident) });
                    quote! {
                        #name::#variant { #(#field_idents),* } => ::tson::Tson::Variant(
                            #ix,
                            Box::new(::tson::Tson::Product(vec![#(#args),*])),
                        ),
                    }
                }
            });
        quote! {
            fn to_tson(&self) -> ::tson::Tson {
                match self {
                    #(#branches)*
                }
            }
        }
    };

    // from_tson
    let impl_from_tson = {
        let arms = variant_info
            .iter()
            .map(|(variant, field_idents, fields, _ident_string, ix)| match fields {
                // unit-like variant
                Fields::Unit => quote! {
                    #ix => #name::#variant,
                },
                // tuple variant
                Fields::Unnamed(_fields) => {
                    let popped = fields
                        .iter()
                        .map(|_| quote! { ::tson::rep::pop_tson(&mut fields)? });
                    quote! {
                        #ix => #name::#variant(#(#popped),*),
                    }
                }
                // c-style variant
                Fields::Named(_fields) => {
                    let popped = field_idents
                        .iter()
                        .map(|ident| quote! { #ident: ::tson::rep::pop_tson(&mut fields)? });
                    quote! {
                        #ix => #name::#variant { #(#popped),* },
                    }
                }
            });
        quote! {
            fn from_tson(
                ts: ::tson::Tson,
            ) -> ::std::result::Result<Self, ::tson::errors::Error> {
                let (ix, payload) = ts.into_variant()?;
                let mut fields = payload.into_product()?.into_iter();
                let out = match ix {
                    #(#arms)*
                    other => {
                        return Err(::tson::errors::Error::MalformedInput(format!(
                            "`{}` has no alternative {}",
                            #name_str, other,
                        )))
                    }
                };
                match fields.next() {
                    None => Ok(out),
                    Some(_) => Err(::tson::errors::Error::MalformedInput(format!(
                        "too many fields for `{}`",
                        #name_str,
                    ))),
                }
            }
        }
    };

    quote! {
        impl ::tson::rep::TsonRep for #name {
            #impl_shape
            #impl_to_tson
            #impl_from_tson
        }
    }
}
