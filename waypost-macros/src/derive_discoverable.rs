use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::waypost_path;

pub fn expand(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    match syn::parse2(input.into()) {
        Ok(input) => expand_with(&input, &waypost_path()).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

pub fn expand_with(input: &syn::DeriveInput, krate: &TokenStream) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics #krate::ControllerDiscoverable for #name #ty_generics #where_clause {}
    }
}
