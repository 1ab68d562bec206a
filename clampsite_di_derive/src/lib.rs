use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field};

/// Derives `clampsite_di::Build` for a struct.
///
/// Every field is built from the provider, except fields marked with
/// `#[state]`, which start from `Default`. Type parameters stay generic, so
/// `RestServer<Contact, Search>` builds for any services the provider can
/// build. The built value is cached in the provider; later builds of the same
/// type return a clone of the cached value.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = input.ident;

    let generics = input
        .generics
        .type_params()
        .map(|x| &x.ident)
        .collect::<Vec<_>>();

    let syn::Data::Struct(data) = input.data else {
        return quote! { ::core::compile_error!("Build can only be derived for structs"); }.into();
    };

    fn is_state(field: &Field) -> bool {
        field
            .attrs
            .iter()
            .any(|x| x.path().get_ident().is_some_and(|x| x == "state"))
    }

    let bounds = data
        .fields
        .iter()
        .filter(|x| !is_state(x))
        .map(|Field { ty, .. }| quote! { #ty: ::clampsite_di::Build<__Provider> })
        .collect::<Vec<_>>();

    let build_expr = match data.fields {
        syn::Fields::Named(fields) => {
            let fields = fields
                .named
                .iter()
                .map(|f @ Field { ident, .. }| {
                    if is_state(f) {
                        quote! { #ident: ::core::default::Default::default() }
                    } else {
                        quote! { #ident: ::clampsite_di::Build::build(provider) }
                    }
                })
                .collect::<Vec<_>>();
            quote! { Self { #(#fields),* } }
        }
        syn::Fields::Unnamed(fields) => {
            let fields = fields
                .unnamed
                .iter()
                .map(|f| {
                    if is_state(f) {
                        quote! { ::core::default::Default::default() }
                    } else {
                        quote! { ::clampsite_di::Build::build(provider) }
                    }
                })
                .collect::<Vec<_>>();
            quote! { Self( #(#fields),* ) }
        }
        syn::Fields::Unit => quote! { Self },
    };

    quote! {
        impl<__Provider, #(#generics),*> ::clampsite_di::Build<__Provider> for #ident<#(#generics),*>
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::clampsite_di::Provider,
            #(#bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) =
                    ::clampsite_di::Provider::cache(provider).get::<Self>()
                {
                    return ::core::clone::Clone::clone(cached);
                }

                let built = #build_expr;
                ::clampsite_di::Provider::cache(provider)
                    .insert(::core::clone::Clone::clone(&built));
                built
            }
        }
    }
    .into()
}
