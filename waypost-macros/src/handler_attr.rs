use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use waypost_codegen::syntax::attr_from_args;
use waypost_codegen::validate_marked_handler;

use crate::strip::strip_param_markers;

pub fn expand(
    marker: &str,
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    expand_with(marker, args.into(), input.into()).into()
}

/// Validate a handler outside a controller and strip its parameter markers.
pub fn expand_with(marker: &str, args: TokenStream, input: TokenStream) -> TokenStream {
    let mut method: syn::ImplItemFn = match syn::parse2(input) {
        Ok(method) => method,
        Err(err) => return err.to_compile_error(),
    };

    let checked = attr_from_args(marker, args, Span::call_site()).and_then(|_| {
        validate_marked_handler(&method, marker).map_err(syn::Error::from)
    });

    strip_param_markers(&mut method.sig);
    let method = method.into_token_stream();
    match checked {
        Ok(()) => method,
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #method
                #err
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_handler_is_reemitted_without_param_markers() {
        let out = expand_with(
            "get",
            quote!("there"),
            quote! {
                async fn hello(&self, #[query_param("n")] name: Option<String>, req: Request) -> String {
                    todo!()
                }
            },
        );
        let expected = quote! {
            async fn hello(&self, name: Option<String>, req: Request) -> String {
                todo!()
            }
        };
        assert_eq!(out.to_string(), expected.to_string());
    }

    #[test]
    fn unbound_parameter_is_reported_with_the_marker() {
        let out = expand_with(
            "post",
            TokenStream::new(),
            quote! {
                fn create(payload: Payload) -> String { todo!() }
            },
        )
        .to_string();
        assert!(out.contains("compile_error"));
        assert!(out.contains("#[post] must be attached to a handler"));
        assert!(out.contains("fn create"));
    }
}
