use std::path::PathBuf;

use proc_macro2::{Span, TokenStream};

/// Failure while turning a controller declaration into registration code.
///
/// Either variant aborts the whole controller: no partial registration code is
/// emitted alongside a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The controller declaration itself is malformed (not an inherent impl of
    /// a concrete type, empty or non-literal base path, unparsable forwarded
    /// expression).
    #[error("{message}")]
    Configuration { message: String, span: Span },

    /// A handler parameter has no recognised binding.
    #[error(
        "#[{marker}] must be attached to a handler containing only parameters of type `Request` \
         or parameters annotated with #[path_param], #[query_param], #[query_content] or \
         #[body_content]\n\n`{handler}` has unbound parameter(s): {}",
        .params.join(", ")
    )]
    InvalidHandlerSignature {
        handler: String,
        marker: String,
        params: Vec<String>,
        span: Span,
    },
}

impl SynthesisError {
    pub fn configuration(message: impl Into<String>, span: Span) -> Self {
        SynthesisError::Configuration {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SynthesisError::Configuration { span, .. } => *span,
            SynthesisError::InvalidHandlerSignature { span, .. } => *span,
        }
    }

    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::from(self).to_compile_error()
    }
}

impl From<&SynthesisError> for syn::Error {
    fn from(err: &SynthesisError) -> Self {
        syn::Error::new(err.span(), err.to_string())
    }
}

impl From<SynthesisError> for syn::Error {
    fn from(err: SynthesisError) -> Self {
        syn::Error::from(&err)
    }
}

/// Failure of the directory-scanning discovery path.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Recovered by the driver: it emits the fallback artifact instead.
    #[error("input directory `{}` does not exist", .0.display())]
    MissingInputDirectory(PathBuf),

    #[error("failed to read `{}`: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk the input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to create directory `{}`: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create file `{}`: {source}", .path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
