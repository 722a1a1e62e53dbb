//! Crate path resolution for generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing the `waypost` runtime.
///
/// Follows a rename in the caller's `Cargo.toml`; falls back to `::waypost`
/// when the dependency cannot be found (the resulting error then points at
/// the missing crate).
pub fn waypost_path() -> TokenStream {
    match crate_name("waypost") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::waypost),
    }
}
