//! Analysis and code synthesis behind the waypost controller macros and the
//! `waypost-discover` build tool.
//!
//! The core modules ([`extract`], [`validate`], [`discover`], [`codegen`]) are
//! written against the declaration traits in [`decl`]; [`syntax`] implements
//! those traits for `syn`.

pub mod attr;
pub mod codegen;
pub mod decl;
pub mod discover;
pub mod emit;
pub mod error;
pub mod extract;
pub mod scan;
pub mod syntax;
pub mod validate;

pub use attr::{classify, AttributeMarker, HttpMethod};
pub use codegen::{synthesize, synthesize_controller, FormatMode, Synthesis, SynthesisOptions};
pub use error::{ScanError, SynthesisError};
pub use extract::{
    extract_controller, extract_handler, BindingSource, ControllerMetadata, HandlerMetadata,
    HandlerParam, Verb,
};
pub use scan::scan_directory;
pub use validate::{validate_handler, validate_marked_handler};
