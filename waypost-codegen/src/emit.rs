//! Generated discovery file templates.
//!
//! Controllers are registered by their bare type name, so every discovered
//! type must be in scope where the generated file is `include!`d. A
//! controller declared inside a nested module (`mod api { .. }`) is found
//! but has to be re-exported at that point to resolve.

/// Default name of the generated discovery file.
pub const GENERATED_FILE_NAME: &str = "controller_discovery.generated.rs";

/// Directory the driver expects controllers in, named by the fallback advice.
pub const CONTROLLERS_DIR: &str = "controllers";

fn header(target: &str) -> String {
    format!("// @generated by waypost-discover for target `{target}`. Do not edit.\n")
}

fn registry(runtime_crate: &str, body: &str) -> String {
    format!(
        r#"
pub trait ControllerRegistry {{
    fn register_controllers(&self);
}}

impl<R: ::{runtime_crate}::RoutesBuilder> ControllerRegistry for R {{
    fn register_controllers(&self) {{
{body}    }}
}}
"#
    )
}

/// Sort and deduplicate discovered identifiers.
pub fn normalize(mut identifiers: Vec<String>) -> Vec<String> {
    identifiers.sort();
    identifiers.dedup();
    identifiers
}

/// One `boot` call per controller, in the order given.
pub fn render_registrations(target: &str, identifiers: &[String], runtime_crate: &str) -> String {
    let body: String = identifiers
        .iter()
        .map(|ident| {
            format!(
                "        ::{runtime_crate}::RouteCollection::boot(::std::sync::Arc::new(<{ident} as ::core::default::Default>::default()), self);\n"
            )
        })
        .collect();
    header(target) + &registry(runtime_crate, &body)
}

/// Placeholder registry used when no controllers were found.
pub fn render_fallback(target: &str, runtime_crate: &str) -> String {
    let body = format!(
        "        // No controllers found for target `{target}`.\n        \
         // Add types marked #[controller] or implementing ControllerDiscoverable under the `{CONTROLLERS_DIR}` directory.\n        \
         // Registered types are named without their module path and must be in scope where this file is included.\n"
    );
    header(target) + &registry(runtime_crate, &body)
}

/// Render the discovery file: the registrations when any identifier was
/// found, the fallback otherwise.
pub fn render(target: &str, identifiers: Vec<String>, runtime_crate: &str) -> String {
    let identifiers = normalize(identifiers);
    if identifiers.is_empty() {
        render_fallback(target, runtime_crate)
    } else {
        render_registrations(target, &identifiers, runtime_crate)
    }
}
