use proc_macro2::Literal;
use quote::quote;
use syn::*;

pub fn tson_rep(name: Ident, data: DataStruct) -> proc_macro2::TokenStream {
    let name_str = name.to_string();

    let (impl_shape, impl_to_tson, impl_from_tson) = match data.fields {
        // C-style structs
        Fields::Named(fields) => {
            let fields = Fields::Named(fields);
            let field_idents: Vec<Ident> = fields
                .iter()
                .map(|field| field.ident.clone().unwrap())
                .collect();
            let field_types: Vec<Type> = fields.iter().map(|field| field.ty.clone()).collect();

            let impl_shape = {
                let members =
                    field_idents
                        .iter()
                        .zip(field_types.iter())
                        .map(|(ident, ty)| {
                            let ident_string = ident.to_string();
                            quote! {
                                ::tson::shape::Field::named(
                                    #ident_string,
                                    ::tson::shape::Shape::defer::<#ty>(),
                                )
                            }
                        });
                quote! {
                    fn shape() -> ::tson::shape::Shape {
                        ::tson::shape::Shape::Named(
                            #name_str,
                            Box::new(::tson::shape::Shape::Product(vec![#(#members),*])),
                        )
                    }
                }
            };

            let impl_to_tson = {
                let args = field_idents
                    .iter()
                    .map(|ident| quote! { ::tson::rep::TsonRep::to_tson(&self.#ident) });
                quote! {
                    fn to_tson(&self) -> ::tson::Tson {
                        ::tson::Tson::Product(vec![#(#args),*])
                    }
                }
            };

            let impl_from_tson = {
                let popped = field_idents
                    .iter()
                    .map(|ident| quote! { #ident: ::tson::rep::pop_tson(&mut fields)? });
                quote! {
                    fn from_tson(
                        ts: ::tson::Tson,
                    ) -> ::std::result::Result<Self, ::tson::errors::Error> {
                        let mut fields = ts.into_product()?.into_iter();
                        let out = #name { #(#popped),* };
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

            (impl_shape, impl_to_tson, impl_from_tson)
        }
        // Tuple structs
        Fields::Unnamed(fields) => {
            let fields = Fields::Unnamed(fields);
            let field_types: Vec<Type> = fields.iter().map(|field| field.ty.clone()).collect();
            let fields_len = field_types.len();

            let impl_shape = {
                let members = field_types.iter().map(|ty| {
                    quote! {
                        ::tson::shape::Field::unnamed(::tson::shape::Shape::defer::<#ty>())
                    }
                });
                quote! {
                    fn shape() -> ::tson::shape::Shape {
                        ::tson::shape::Shape::Named(
                            #name_str,
                            Box::new(::tson::shape::Shape::Product(vec![#(#members),*])),
                        )
                    }
                }
            };

            let impl_to_tson = {
                let args = (0..fields_len)
                    .map(Literal::usize_unsuffixed)
                    .map(|index| quote! { ::tson::rep::TsonRep::to_tson(&self.#index) });
                quote! {
                    fn to_tson(&self) -> ::tson::Tson {
                        ::tson::Tson::Product(vec![#(#args),*])
                    }
                }
            };

            let impl_from_tson = {
                let popped =
                    (0..fields_len).map(|_| quote! { ::tson::rep::pop_tson(&mut fields)? });
                quote! {
                    fn from_tson(
                        ts: ::tson::Tson,
                    ) -> ::std::result::Result<Self, ::tson::errors::Error> {
                        let mut fields = ts.into_product()?.into_iter();
                        let out = #name(#(#popped),*);
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

            (impl_shape, impl_to_tson, impl_from_tson)
        }
        // Unit-like structs
        Fields::Unit => {
            let impl_shape = quote! {
                fn shape() -> ::tson::shape::Shape {
                    ::tson::shape::Shape::Named(
                        #name_str,
                        Box::new(::tson::shape::Shape::unit()),
                    )
                }
            };

            let impl_to_tson = quote! {
                fn to_tson(&self) -> ::tson::Tson {
                    ::tson::Tson::Product(vec![])
                }
            };

            let impl_from_tson = quote! {
                fn from_tson(
                    ts: ::tson::Tson,
                ) -> ::std::result::Result<Self, ::tson::errors::Error> {
                    let mut fields = ts.into_product()?.into_iter();
                    match fields.next() {
                        None => Ok(#name),
                        Some(_) => Err(::tson::errors::Error::MalformedInput(format!(
                            "`{}` has no fields",
                            #name_str,
                        ))),
                    }
                }
            };

            (impl_shape, impl_to_tson, impl_from_tson)
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
