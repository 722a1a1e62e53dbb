//! Per-handler route registration: the `on(...)` chain and its closure.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};

use crate::error::SynthesisError;
use crate::extract::{BindingSource, HandlerMetadata, HandlerParam, Verb};

/// Local holding handler `index`'s path suffix.
pub fn handler_path_ident(index: usize) -> syn::Ident {
    format_ident!("handler{}_path", index)
}

/// Convert camelCase / PascalCase to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    result
}

fn sanitize(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Name the `{binding}_param` local of every parameter of one handler.
///
/// Ambient parameters get `None`. Two bindings that map to the same local
/// are told apart by the parameter's position.
pub fn binding_locals(params: &[HandlerParam]) -> Vec<Option<syn::Ident>> {
    let mut taken: Vec<String> = Vec::new();
    params
        .iter()
        .enumerate()
        .map(|(position, param)| {
            if param.source == BindingSource::Ambient {
                return None;
            }
            let base = sanitize(&format!("{}_param", to_snake_case(&param.binding_name)));
            let name = if taken.contains(&base) {
                format!("{base}_{position}")
            } else {
                base
            };
            taken.push(name.clone());
            Some(syn::Ident::new(&name, Span::call_site()))
        })
        .collect()
}

fn parse_forwarded<T: syn::parse::Parse>(
    text: &str,
    what: &str,
    span: Span,
) -> Result<T, SynthesisError> {
    syn::parse_str(text).map_err(|err| {
        SynthesisError::configuration(format!("invalid {what} `{text}`: {err}"), span)
    })
}

/// Guarded extraction for a Path / QueryContent / BodyContent parameter.
fn guard_statement(
    param: &HandlerParam,
    local: &syn::Ident,
    ty: &syn::Type,
    krate: &TokenStream,
) -> TokenStream {
    let key = &param.binding_name;
    let lookup = match param.source {
        BindingSource::Path => quote! { req.parameters().get::<#ty>(#key) },
        BindingSource::QueryContent => quote! { req.query().decode::<#ty>().ok() },
        _ => quote! { req.content().decode::<#ty>().ok() },
    };
    quote! {
        let Some(#local) = #lookup else {
            return Err(#krate::Error::from(#krate::Abort::bad_request()));
        };
    }
}

fn query_statement(param: &HandlerParam, local: &syn::Ident, ty: &syn::Type) -> TokenStream {
    let key = &param.binding_name;
    quote! {
        let #local: #ty = req.query().get(#key);
    }
}

/// Body of the `async move` block: guards, then query lookups, then the call.
pub fn closure_body(
    handler: &HandlerMetadata,
    krate: &TokenStream,
) -> Result<TokenStream, SynthesisError> {
    let locals = binding_locals(&handler.params);

    let mut guards = Vec::new();
    let mut queries = Vec::new();
    let mut args = Vec::new();

    for (param, local) in handler.params.iter().zip(&locals) {
        let Some(local) = local else {
            args.push(quote!(req));
            continue;
        };
        let ty: syn::Type = parse_forwarded(
            &param.type_name,
            &format!("type for parameter `{}`", param.argument_label),
            handler.span,
        )?;
        match param.source {
            BindingSource::Query => queries.push(query_statement(param, local, &ty)),
            _ => guards.push(guard_statement(param, local, &ty, krate)),
        }
        args.push(quote!(#local));
    }

    let method = format_ident!("{}", handler.method_name, span = handler.span);
    let mut call = if handler.has_receiver {
        quote! { this.#method(#(#args),*) }
    } else {
        quote! { Self::#method(#(#args),*) }
    };
    if handler.effects.is_async {
        call = quote! { #call.await };
    }
    if handler.effects.is_fallible {
        call = quote! { #call? };
    }

    Ok(quote! {
        #(#guards)*
        #(#queries)*
        ::core::result::Result::<_, #krate::Error>::Ok(#call)
    })
}

/// Statements registering one handler on the `controller` group.
pub fn handler_statements(
    handler: &HandlerMetadata,
    index: usize,
    krate: &TokenStream,
) -> Result<Vec<TokenStream>, SynthesisError> {
    let mut statements = Vec::new();

    let verb = match &handler.verb {
        Verb::Standard(method) => {
            let constant = format_ident!("{}", method.as_str());
            quote! { #krate::Method::#constant }
        }
        Verb::Custom(expr) => {
            let expr: syn::Expr = parse_forwarded(expr, "HTTP method expression", handler.span)?;
            quote! { #expr }
        }
    };

    let mut chain = quote! { controller.on(#verb) };
    if let Some(suffix) = &handler.path_suffix {
        let path_local = handler_path_ident(index);
        statements.push(quote! { let #path_local = #suffix; });
        chain = quote! { #chain.path(#krate::path_components(#path_local)) };
    }
    if let Some(body) = &handler.body_strategy {
        let body: syn::Expr = parse_forwarded(body, "body strategy", handler.span)?;
        chain = quote! { #chain.body(#body) };
    }

    let body = closure_body(handler, krate)?;
    let closure = if handler.has_receiver {
        quote! {
            move |req: #krate::Request| {
                let this = ::std::sync::Arc::clone(&this);
                async move { #body }
            }
        }
    } else {
        quote! {
            move |req: #krate::Request| async move { #body }
        }
    };

    let capture = handler
        .has_receiver
        .then(|| quote! { let this = ::std::sync::Arc::clone(&self); });
    statements.push(quote! {
        {
            #capture
            #chain.to(#closure);
        }
    });

    Ok(statements)
}
