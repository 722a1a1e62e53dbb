use crate::attr;
use crate::decl::FnDecl;
use crate::error::SynthesisError;
use crate::extract::{handler_marker, handler_params};

/// Reject a handler whose parameters are not all bound.
///
/// Each parameter must either be the ambient `Request` or carry one of the
/// four binding markers. Runs on the declaration directly, so it catches
/// malformed handlers even where extraction would go through.
pub fn validate_handler<F: FnDecl>(decl: &F) -> Result<(), SynthesisError> {
    let attrs = decl.attributes();
    let marker = handler_marker(&attrs)
        .map(|(attr, _)| attr.name.as_str())
        .unwrap_or(attr::HANDLER);
    validate_marked_handler(decl, marker)
}

/// [`validate_handler`] for a declaration whose handler marker has already
/// been consumed, as when the marker is itself the attribute being expanded.
pub fn validate_marked_handler<F: FnDecl>(decl: &F, marker: &str) -> Result<(), SynthesisError> {
    let unbound: Vec<String> = handler_params(decl)
        .into_iter()
        .filter(|param| !param.valid)
        .map(|param| param.argument_label)
        .collect();

    if unbound.is_empty() {
        return Ok(());
    }

    Err(SynthesisError::InvalidHandlerSignature {
        handler: decl.identifier(),
        marker: marker.to_string(),
        params: unbound,
        span: decl.span(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn request_only_handler_is_valid() {
        let method: syn::ImplItemFn = parse_quote! {
            #[get]
            fn hello(&self, req: Request) -> String { todo!() }
        };
        assert!(validate_handler(&method).is_ok());
    }

    #[test]
    fn every_binding_marker_is_accepted() {
        let method: syn::ImplItemFn = parse_quote! {
            #[post(":id")]
            fn hello(
                &self,
                #[path_param("id")] key: u64,
                #[query_param] page: Option<u32>,
                #[query_content] filter: Filter,
                #[body_content] payload: Payload,
                req: waypost::Request,
            ) -> String { todo!() }
        };
        assert!(validate_handler(&method).is_ok());
    }

    #[test]
    fn unannotated_parameter_is_rejected() {
        let method: syn::ImplItemFn = parse_quote! {
            #[put("there")]
            fn hello(&self, name: Option<String>, req: Request, count: u32) -> String { todo!() }
        };
        match validate_handler(&method).unwrap_err() {
            SynthesisError::InvalidHandlerSignature {
                handler,
                marker,
                params,
                ..
            } => {
                assert_eq!(handler, "hello");
                assert_eq!(marker, "put");
                assert_eq!(params, ["name", "count"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn diagnostic_lists_allowed_forms() {
        let method: syn::ImplItemFn = parse_quote! {
            #[get]
            fn hello(&self, name: String) -> String { todo!() }
        };
        let message = validate_handler(&method).unwrap_err().to_string();
        assert!(message.starts_with("#[get] must be attached to a handler"));
        assert!(message.contains("`Request`"));
        assert!(message.contains("#[path_param], #[query_param], #[query_content] or #[body_content]"));
        assert!(message.contains("`hello` has unbound parameter(s): name"));
    }

    #[test]
    fn reference_to_request_is_not_ambient() {
        let method: syn::ImplItemFn = parse_quote! {
            #[get]
            fn hello(&self, req: &Request) -> String { todo!() }
        };
        assert!(validate_handler(&method).is_err());
    }

    #[test]
    fn path_tokens_are_not_cross_checked() {
        let method: syn::ImplItemFn = parse_quote! {
            #[get(":name/:other")]
            fn hello(&self, #[path_param] unrelated: String) -> String { todo!() }
        };
        assert!(validate_handler(&method).is_ok());
    }

    #[test]
    fn consumed_marker_is_named_in_the_diagnostic() {
        let function: syn::ItemFn = parse_quote! {
            fn hello(name: String) -> String { todo!() }
        };
        let message = validate_marked_handler(&function, "patch").unwrap_err().to_string();
        assert!(message.starts_with("#[patch]"));
    }

    #[test]
    fn free_function_without_marker_defaults_the_marker_name() {
        let function: syn::ItemFn = parse_quote! {
            fn hello(name: String) -> String { todo!() }
        };
        let message = validate_handler(&function).unwrap_err().to_string();
        assert!(message.starts_with("#[handler]"));
    }
}
