//! The `register_routes` function and the `RouteCollection` conformance.

use proc_macro2::TokenStream;
use quote::quote;

use super::handlers::handler_statements;
use crate::error::SynthesisError;
use crate::extract::ControllerMetadata;

/// Statements of the registration function, in emission order.
pub fn registration_statements(
    def: &ControllerMetadata,
    krate: &TokenStream,
) -> Result<Vec<TokenStream>, SynthesisError> {
    let base_path = &def.base_path;
    let mut statements = vec![quote! { let controller_path = #base_path; }];

    match &def.middleware_expression {
        Some(middleware) => {
            let middleware: syn::Expr = syn::parse_str(middleware).map_err(|err| {
                SynthesisError::configuration(
                    format!("invalid middleware expression `{middleware}`: {err}"),
                    def.span,
                )
            })?;
            statements.push(quote! {
                let routes_with_middleware = routes.with_middleware(#middleware);
            });
            statements.push(quote! {
                let controller = routes_with_middleware.grouped(#krate::path_components(controller_path));
            });
        }
        None => statements.push(quote! {
            let controller = routes.grouped(#krate::path_components(controller_path));
        }),
    }

    for (index, handler) in def.handlers.iter().enumerate() {
        statements.extend(handler_statements(handler, index, krate)?);
    }

    Ok(statements)
}

/// `impl T { pub fn register_routes(...) { ... } }`
pub fn register_fn(
    self_ty: &syn::Type,
    statements: &[TokenStream],
    krate: &TokenStream,
) -> TokenStream {
    quote! {
        impl #self_ty {
            #[allow(unused_variables)]
            pub fn register_routes<__R: #krate::RoutesBuilder + ?Sized>(
                self: ::std::sync::Arc<Self>,
                routes: &__R,
            ) {
                #(#statements)*
            }
        }
    }
}

/// `impl RouteCollection for T`, delegating to `register_routes`.
pub fn conformance(self_ty: &syn::Type, krate: &TokenStream) -> TokenStream {
    quote! {
        impl #krate::RouteCollection for #self_ty {
            fn boot<__R: #krate::RoutesBuilder + ?Sized>(
                self: ::std::sync::Arc<Self>,
                routes: &__R,
            ) {
                <#self_ty>::register_routes(self, routes)
            }
        }
    }
}
