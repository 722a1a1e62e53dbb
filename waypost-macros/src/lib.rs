extern crate proc_macro;
use proc_macro::TokenStream;
use waypost_codegen::attr;

pub(crate) mod controller_attr;
pub(crate) mod crate_path;
pub(crate) mod derive_discoverable;
pub(crate) mod handler_attr;
pub(crate) mod strip;

/// Attribute macro on an inherent `impl` block that generates route registration.
///
/// # Arguments
///
/// | Argument | Required | Description |
/// |----------|----------|-------------|
/// | first, unlabeled | **yes** | Base path of the group, a non-empty string literal |
/// | `middleware` | no | Expression passed to `RoutesBuilder::with_middleware` before grouping |
/// | `runtime` | no | Path of the runtime crate, when it is not reachable as `waypost` |
///
/// # Handler parameters
///
/// Every parameter of a handler must be the ambient `Request` or carry one of:
///
/// | Attribute | Binding |
/// |-----------|---------|
/// | `#[path_param]` / `#[path_param("key")]` | Path parameter; rejects the request with 400 when absent |
/// | `#[query_param]` / `#[query_param("key")]` | Query value; never rejects (use `Option<T>` for optional values) |
/// | `#[query_content]` | Whole query decoded into the parameter type; 400 on failure |
/// | `#[body_content]` | Request body decoded into the parameter type; 400 on failure |
///
/// # Example
///
/// ```ignore
/// use waypost::prelude::*;
///
/// #[controller("hello", middleware = AddVersionHeader)]
/// impl HelloController {
///     #[get]
///     async fn hello(&self, #[query_param("name")] provided: Option<String>) -> String {
///         format!("Hello, {}!", provided.as_deref().unwrap_or("world"))
///     }
///
///     #[post(":id", body = BodyStrategy::Collect)]
///     async fn update(&self, #[path_param] id: u64, #[body_content] patch: Patch) -> Result<String, Error> {
///         ...
///     }
/// }
/// ```
///
/// # What is generated
///
/// - The original `impl` block with the handler and parameter markers removed.
/// - `impl HelloController { pub fn register_routes(self: Arc<Self>, routes: &R) }`.
/// - `impl RouteCollection for HelloController`, delegating to `register_routes`.
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    controller_attr::expand(args, input)
}

// ---------------------------------------------------------------------------
// Handler markers, consumed by #[controller] from the token stream. On their
// own they only validate the handler's parameters.
// ---------------------------------------------------------------------------

/// Register a **GET** handler.
///
/// ```ignore
/// #[get]                // at the controller's base path
/// #[get("there")]       // base path + "there"
/// #[get(":name")]       // path parameter
/// ```
#[proc_macro_attribute]
pub fn get(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::GET, args, input)
}

/// Register a **POST** handler.
///
/// ```ignore
/// #[post(body = BodyStrategy::Collect)]
/// async fn create(&self, #[body_content] user: NewUser) -> Result<String, Error> { ... }
/// ```
#[proc_macro_attribute]
pub fn post(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::POST, args, input)
}

/// Register a **PUT** handler.
#[proc_macro_attribute]
pub fn put(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::PUT, args, input)
}

/// Register a **PATCH** handler.
#[proc_macro_attribute]
pub fn patch(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::PATCH, args, input)
}

/// Register a **DELETE** handler.
#[proc_macro_attribute]
pub fn delete(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::DELETE, args, input)
}

/// Register a handler for any HTTP method.
///
/// The method expression comes first and is forwarded unchanged:
///
/// ```ignore
/// #[handler(Method::OPTIONS, path = "there", body = BodyStrategy::Stream)]
/// async fn probe(&self, req: Request) -> String { ... }
/// ```
#[proc_macro_attribute]
pub fn handler(args: TokenStream, input: TokenStream) -> TokenStream {
    handler_attr::expand(attr::HANDLER, args, input)
}

/// Derive macro implementing the `ControllerDiscoverable` marker, which opts
/// a type into discovery by `waypost-discover`.
#[proc_macro_derive(ControllerDiscoverable)]
pub fn derive_controller_discoverable(input: TokenStream) -> TokenStream {
    derive_discoverable::expand(input)
}
