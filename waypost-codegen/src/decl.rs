//! Parser-independent view of the declarations the analysis reads.
//!
//! The extractor, validator, discoverer and synthesizer only see these traits
//! and value types. [`crate::syntax`] implements them over `syn`.

use proc_macro2::Span;

/// Value of one attribute argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A string literal, unquoted.
    Str(String),
    /// Any other expression, as source text.
    Expr(String),
}

impl ArgValue {
    pub fn as_str_lit(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            ArgValue::Expr(_) => None,
        }
    }

    /// Source text suitable for forwarding verbatim into generated code.
    pub fn source_text(&self) -> String {
        match self {
            ArgValue::Str(s) => format!("{s:?}"),
            ArgValue::Expr(e) => e.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrArg {
    pub label: Option<String>,
    pub value: ArgValue,
}

impl AttrArg {
    pub fn positional(value: ArgValue) -> Self {
        AttrArg { label: None, value }
    }

    pub fn labeled(label: impl Into<String>, value: ArgValue) -> Self {
        AttrArg {
            label: Some(label.into()),
            value,
        }
    }
}

/// One attribute as seen by the analysis: its name and its argument list.
#[derive(Debug, Clone)]
pub struct Attr {
    pub name: String,
    pub args: Vec<AttrArg>,
    pub span: Span,
}

impl Attr {
    pub fn new(name: impl Into<String>, args: Vec<AttrArg>) -> Self {
        Attr {
            name: name.into(),
            args,
            span: Span::call_site(),
        }
    }

    /// First argument without a label.
    pub fn first_unlabeled(&self) -> Option<&ArgValue> {
        self.args
            .iter()
            .find(|arg| arg.label.is_none())
            .map(|arg| &arg.value)
    }

    pub fn labeled(&self, label: &str) -> Option<&ArgValue> {
        self.args
            .iter()
            .find(|arg| arg.label.as_deref() == Some(label))
            .map(|arg| &arg.value)
    }

    /// First argument that is a string literal, labeled or not.
    pub fn first_str_lit(&self) -> Option<&str> {
        self.args.first().and_then(|arg| arg.value.as_str_lit())
    }
}

/// Effect qualifiers of a function declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub is_async: bool,
    /// The declared return type is a `Result`.
    pub is_fallible: bool,
}

pub trait ParamDecl {
    /// Declared binding name of the parameter.
    fn name(&self) -> String;
    /// Declared type, as source text.
    fn type_name(&self) -> String;
    fn attributes(&self) -> Vec<Attr>;
    fn span(&self) -> Span;
}

pub trait FnDecl {
    type Param: ParamDecl;

    fn identifier(&self) -> String;
    fn attributes(&self) -> Vec<Attr>;
    /// Typed parameters in declaration order, receiver excluded.
    fn params(&self) -> Vec<&Self::Param>;
    fn effects(&self) -> Effects;
    fn has_receiver(&self) -> bool;
    fn span(&self) -> Span;
}

pub trait ControllerDecl {
    type Method: FnDecl;

    /// Identifier of the type the declaration belongs to, if it has one.
    fn type_name(&self) -> Option<String>;
    /// Whether the declaration cannot be specialised or re-implemented any
    /// further. Only such declarations can host a controller.
    fn is_final(&self) -> bool;
    /// Methods in declaration order.
    fn methods(&self) -> Vec<&Self::Method>;
    fn span(&self) -> Span;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Struct,
    Enum,
    Impl,
    Module,
    Function,
    Other,
}

/// Minimal tree-walker interface used by controller discovery.
pub trait SyntaxNode {
    fn kind(&self) -> NodeKind;
    /// The declared name, or for an impl the name of the implementing type.
    fn identifier(&self) -> Option<String>;
    fn attributes(&self) -> Vec<Attr>;
    /// Trait names this node attaches to its type: the implemented trait of an
    /// impl, or the derive list of a struct or enum.
    fn conformances(&self) -> Vec<String>;
    fn children(&self) -> Vec<&Self>;
}

/// The ambient request type: `Request`, or any path ending in `::Request`.
pub fn is_request_type(type_name: &str) -> bool {
    let compact: String = type_name.chars().filter(|c| !c.is_whitespace()).collect();
    compact == "Request" || compact.ends_with("::Request")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_type_recognition() {
        assert!(is_request_type("Request"));
        assert!(is_request_type("waypost :: Request"));
        assert!(is_request_type("::waypost::Request"));
        assert!(!is_request_type("&Request"));
        assert!(!is_request_type("MyRequest"));
        assert!(!is_request_type("Option<Request>"));
    }

    #[test]
    fn attr_argument_lookup() {
        let attr = Attr::new(
            "handler",
            vec![
                AttrArg::positional(ArgValue::Expr("Method :: OPTIONS".into())),
                AttrArg::labeled("path", ArgValue::Str("there".into())),
            ],
        );
        assert_eq!(
            attr.first_unlabeled(),
            Some(&ArgValue::Expr("Method :: OPTIONS".into()))
        );
        assert_eq!(attr.labeled("path").and_then(ArgValue::as_str_lit), Some("there"));
        assert_eq!(attr.labeled("body"), None);
        assert_eq!(attr.first_str_lit(), None);
    }

    #[test]
    fn string_values_forward_as_literals() {
        assert_eq!(ArgValue::Str("a\"b".into()).source_text(), r#""a\"b""#);
        assert_eq!(ArgValue::Expr("Collect".into()).source_text(), "Collect");
    }
}
