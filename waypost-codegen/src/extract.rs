//! Handler and controller metadata extraction.

use proc_macro2::Span;

use crate::attr::{self, classify, AttributeMarker, HttpMethod};
use crate::decl::*;
use crate::error::SynthesisError;
use crate::validate::validate_handler;

/// Where a handler parameter's value comes from at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// The request object itself, passed through unchanged.
    Ambient,
    Path,
    Query,
    QueryContent,
    BodyContent,
}

/// Binding plan for one handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerParam {
    /// Lookup key for the value.
    pub binding_name: String,
    /// Declared parameter name; fixes the argument's slot at the call site.
    pub argument_label: String,
    pub source: BindingSource,
    pub type_name: String,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Standard(HttpMethod),
    /// Verb expression forwarded verbatim from `#[handler(...)]`.
    Custom(String),
}

/// Routing plan for one handler method.
#[derive(Debug, Clone)]
pub struct HandlerMetadata {
    pub method_name: String,
    pub verb: Verb,
    pub path_suffix: Option<String>,
    pub body_strategy: Option<String>,
    pub params: Vec<HandlerParam>,
    pub effects: Effects,
    pub has_receiver: bool,
    pub span: Span,
}

/// Routing plan for one controller.
#[derive(Debug, Clone)]
pub struct ControllerMetadata {
    pub type_name: String,
    pub base_path: String,
    pub middleware_expression: Option<String>,
    /// Overrides the runtime crate path for this controller (`runtime = path`).
    pub runtime: Option<String>,
    pub handlers: Vec<HandlerMetadata>,
    pub span: Span,
}

/// First handler marker on a declaration, with its verb.
pub fn handler_marker(attrs: &[Attr]) -> Option<(&Attr, Option<HttpMethod>)> {
    attrs.iter().find_map(|attr| match classify(&attr.name) {
        Some(AttributeMarker::Handler(method)) => Some((attr, method)),
        _ => None,
    })
}

/// Classify every parameter of a method, in declaration order.
pub fn handler_params<F: FnDecl>(decl: &F) -> Vec<HandlerParam> {
    decl.params().into_iter().map(classify_param).collect()
}

fn classify_param<P: ParamDecl>(param: &P) -> HandlerParam {
    let name = param.name();
    let type_name = param.type_name();
    let attrs = param.attributes();
    let binding = attrs.iter().find_map(|attr| {
        classify(&attr.name)
            .filter(AttributeMarker::is_param_binding)
            .map(|marker| (attr, marker))
    });

    let (binding_name, source) = match binding {
        None => (name.clone(), BindingSource::Ambient),
        Some((attr, AttributeMarker::PathParam)) => (
            attr.first_str_lit().map(str::to_string).unwrap_or_else(|| name.clone()),
            BindingSource::Path,
        ),
        Some((attr, AttributeMarker::QueryParam)) => (
            attr.first_str_lit().map(str::to_string).unwrap_or_else(|| name.clone()),
            BindingSource::Query,
        ),
        Some((_, AttributeMarker::QueryContent)) => (name.clone(), BindingSource::QueryContent),
        Some((_, _)) => (name.clone(), BindingSource::BodyContent),
    };

    let valid = source != BindingSource::Ambient || is_request_type(&type_name);

    HandlerParam {
        binding_name,
        argument_label: name,
        source,
        type_name,
        valid,
    }
}

/// Extract the routing plan of a method, or `None` when it carries no handler
/// marker (or a generic `#[handler]` without its verb argument).
///
/// Parameter problems never fail extraction; they surface as `valid == false`
/// and are reported by [`validate_handler`].
pub fn extract_handler<F: FnDecl>(decl: &F) -> Option<HandlerMetadata> {
    let attrs = decl.attributes();
    let (marker, method) = handler_marker(&attrs)?;

    let (verb, path_suffix) = match method {
        Some(method) => {
            let path = marker
                .first_unlabeled()
                .or_else(|| marker.labeled("path"))
                .and_then(ArgValue::as_str_lit)
                .map(str::to_string);
            (Verb::Standard(method), path)
        }
        None => {
            let verb = marker.first_unlabeled()?.source_text();
            let path = marker
                .labeled("path")
                .and_then(ArgValue::as_str_lit)
                .map(str::to_string);
            (Verb::Custom(verb), path)
        }
    };
    let body_strategy = marker.labeled("body").map(ArgValue::source_text);

    Some(HandlerMetadata {
        method_name: decl.identifier(),
        verb,
        path_suffix,
        body_strategy,
        params: handler_params(decl),
        effects: decl.effects(),
        has_receiver: decl.has_receiver(),
        span: decl.span(),
    })
}

/// Build the routing plan of a controller from its declaration and the
/// arguments of its `#[controller(...)]` attribute.
///
/// Every handler is validated before it is extracted; the first failure
/// aborts the whole controller.
pub fn extract_controller<C: ControllerDecl>(
    decl: &C,
    controller: &Attr,
) -> Result<ControllerMetadata, SynthesisError> {
    let type_name = match decl.type_name() {
        Some(name) if decl.is_final() => name,
        _ => {
            return Err(SynthesisError::configuration(
                "#[controller] only works on inherent impl blocks of a concrete, non-generic type\n\n\
                 example:\n\
                 \n  #[controller(\"hello\")]\n  impl HelloController {\n      #[get]\n      async fn hello(&self) -> String { ... }\n  }",
                decl.span(),
            ))
        }
    };

    let base_path = match controller.first_unlabeled() {
        Some(ArgValue::Str(path)) if !path.is_empty() => path.clone(),
        _ => {
            return Err(SynthesisError::configuration(
                "#[controller] requires that the provided path be a non-empty string literal\n\
                 example: #[controller(\"hello\", middleware = AddVersionHeader)]",
                controller.span,
            ))
        }
    };

    let middleware_expression = controller.labeled("middleware").map(ArgValue::source_text);
    let runtime = controller.labeled("runtime").map(ArgValue::source_text);

    let mut handlers = Vec::new();
    for method in decl.methods() {
        let attrs = method.attributes();
        let Some((marker, verb)) = handler_marker(&attrs) else {
            continue;
        };
        validate_handler(method)?;
        if verb.is_none() && marker.first_unlabeled().is_none() {
            return Err(SynthesisError::configuration(
                format!(
                    "#[{}] requires the HTTP method as its first argument\n\
                     example: #[handler(Method::OPTIONS, path = \"there\")]",
                    attr::HANDLER
                ),
                marker.span,
            ));
        }
        if let Some(handler) = extract_handler(method) {
            handlers.push(handler);
        }
    }

    Ok(ControllerMetadata {
        type_name,
        base_path,
        middleware_expression,
        runtime,
        handlers,
        span: decl.span(),
    })
}
