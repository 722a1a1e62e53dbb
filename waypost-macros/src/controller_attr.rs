use proc_macro2::{Span, TokenStream};
use quote::quote;
use waypost_codegen::attr::CONTROLLER;
use waypost_codegen::syntax::attr_from_args;
use waypost_codegen::{synthesize_controller, SynthesisOptions};

use crate::crate_path::waypost_path;
use crate::strip::strip_impl_markers;

pub fn expand(args: proc_macro::TokenStream, input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let options = SynthesisOptions {
        krate: waypost_path(),
        ..SynthesisOptions::default()
    };
    expand_with(args.into(), input.into(), &options).into()
}

/// The impl block with its markers stripped, followed by the generated items;
/// or the stripped block followed by the diagnostic.
pub fn expand_with(args: TokenStream, input: TokenStream, options: &SynthesisOptions) -> TokenStream {
    let mut item: syn::Item = match syn::parse2(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };
    let args_span = args
        .clone()
        .into_iter()
        .next()
        .map_or_else(Span::call_site, |token| token.span());

    let generated = attr_from_args(CONTROLLER, args, args_span).and_then(|attr| {
        synthesize_controller(&item, &attr, options)
            .map(|synthesis| synthesis.tokens())
            .map_err(syn::Error::from)
    });

    strip_impl_markers(&mut item);
    match generated {
        Ok(tokens) => quote! {
            #item
            #tokens
        },
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #item
                #err
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(args: TokenStream, input: TokenStream) -> String {
        expand_with(args, input, &SynthesisOptions::default()).to_string()
    }

    #[test]
    fn emits_stripped_impl_and_registration() {
        let out = expand(
            quote!("hello"),
            quote! {
                impl HelloController {
                    #[get(":name")]
                    async fn hello(&self, #[path_param] name: String) -> String { todo!() }
                }
            },
        );
        let file: syn::File = syn::parse_str(&out).unwrap();
        assert_eq!(file.items.len(), 3);
        assert!(!out.contains("# [get"));
        assert!(!out.contains("# [path_param]"));
        assert!(out.contains("pub fn register_routes"));
        assert!(out.contains("RouteCollection for HelloController"));
    }

    #[test]
    fn invalid_controller_emits_no_registration() {
        let out = expand(
            quote!(""),
            quote! {
                impl HelloController {
                    #[get]
                    fn hello(&self) -> String { todo!() }
                }
            },
        );
        assert!(out.contains("compile_error"));
        assert!(!out.contains("register_routes"));
        assert!(out.contains("impl HelloController"));
    }

    #[test]
    fn unbound_parameter_is_reported() {
        let out = expand(
            quote!("hello"),
            quote! {
                impl HelloController {
                    #[get]
                    fn hello(&self, name: String) -> String { todo!() }
                }
            },
        );
        assert!(out.contains("compile_error"));
        assert!(out.contains("unbound parameter(s): name"));
        assert!(!out.contains("RouteCollection"));
    }

    #[test]
    fn malformed_arguments_are_reported() {
        let out = expand(quote!("hello", ,), quote!(impl HelloController {}));
        assert!(out.contains("compile_error"));
    }
}
