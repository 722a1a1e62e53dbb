//! Registration code synthesis.
//!
//! [`synthesize`] turns a [`ControllerMetadata`] into two items: an inherent
//! `register_routes` function that wires every handler into a router builder,
//! and a `RouteCollection` impl delegating to it. Synthesis is all-or-nothing;
//! on error no tokens for the controller are produced.

pub mod handlers;
pub mod registration;

use proc_macro2::TokenStream;
use quote::quote;

use crate::decl::{Attr, ControllerDecl};
use crate::error::SynthesisError;
use crate::extract::{extract_controller, ControllerMetadata};

/// How [`Synthesis::render`] lays out the generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatMode {
    /// Raw token rendering on one line.
    #[default]
    Disabled,
    /// One generated statement per line.
    Lines,
}

#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub format: FormatMode,
    /// Path of the runtime crate the generated code calls into.
    pub krate: TokenStream,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            format: FormatMode::Disabled,
            krate: quote!(::waypost),
        }
    }
}

/// Output of one controller's synthesis.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub statements: Vec<TokenStream>,
    pub register_fn: TokenStream,
    pub conformance: TokenStream,
    format: FormatMode,
}

impl Synthesis {
    /// Both generated items, ready to append after the controller's impl block.
    pub fn tokens(&self) -> TokenStream {
        let register_fn = &self.register_fn;
        let conformance = &self.conformance;
        quote! {
            #register_fn
            #conformance
        }
    }

    pub fn render(&self) -> String {
        match self.format {
            FormatMode::Disabled => self.tokens().to_string(),
            FormatMode::Lines => {
                let mut out = String::from("// register_routes\n");
                for statement in &self.statements {
                    out.push_str(&statement.to_string());
                    out.push('\n');
                }
                out.push_str(&self.conformance.to_string());
                out.push('\n');
                out
            }
        }
    }
}

/// Generate the registration function and conformance for one controller.
pub fn synthesize(
    def: &ControllerMetadata,
    options: &SynthesisOptions,
) -> Result<Synthesis, SynthesisError> {
    let krate = match &def.runtime {
        Some(path) => {
            let path: syn::Path = syn::parse_str(path).map_err(|err| {
                SynthesisError::configuration(
                    format!("invalid runtime crate path `{path}`: {err}"),
                    def.span,
                )
            })?;
            quote!(#path)
        }
        None => options.krate.clone(),
    };
    let self_ty: syn::Type = syn::parse_str(&def.type_name).map_err(|err| {
        SynthesisError::configuration(
            format!("invalid controller type `{}`: {err}", def.type_name),
            def.span,
        )
    })?;

    let statements = registration::registration_statements(def, &krate)?;
    let register_fn = registration::register_fn(&self_ty, &statements, &krate);
    let conformance = registration::conformance(&self_ty, &krate);

    Ok(Synthesis {
        statements,
        register_fn,
        conformance,
        format: options.format,
    })
}

/// Extract, validate and synthesize a controller in one step.
pub fn synthesize_controller<C: ControllerDecl>(
    decl: &C,
    controller: &Attr,
    options: &SynthesisOptions,
) -> Result<Synthesis, SynthesisError> {
    let def = extract_controller(decl, controller)?;
    synthesize(&def, options)
}
