//! `syn` adapter for the declaration traits in [`crate::decl`].

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;

use crate::decl::*;

/// Convert a `syn` attribute. The name is the last path segment, so
/// `#[waypost::get]` and `#[get]` read the same.
pub fn convert_attr(attr: &syn::Attribute) -> Attr {
    let name = attr
        .path()
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default();
    let args = match &attr.meta {
        syn::Meta::List(list) => parse_attr_args(list.tokens.clone()),
        _ => Vec::new(),
    };
    Attr {
        name,
        args,
        span: attr.span(),
    }
}

/// Build an [`Attr`] from the argument tokens an attribute macro receives.
pub fn attr_from_args(name: &str, args: TokenStream, span: Span) -> syn::Result<Attr> {
    let parser = Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
    let exprs = parser.parse2(args)?;
    Ok(Attr {
        name: name.to_string(),
        args: exprs.into_iter().map(convert_arg).collect(),
        span,
    })
}

/// Attribute arguments that do not parse as a comma-separated expression list
/// are not ours; they read as an empty list.
fn parse_attr_args(tokens: TokenStream) -> Vec<AttrArg> {
    let parser = Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
    match parser.parse2(tokens) {
        Ok(exprs) => exprs.into_iter().map(convert_arg).collect(),
        Err(_) => Vec::new(),
    }
}

fn convert_arg(expr: syn::Expr) -> AttrArg {
    if let syn::Expr::Assign(assign) = &expr {
        if let syn::Expr::Path(ref left) = *assign.left {
            if let Some(ident) = left.path.get_ident() {
                return AttrArg::labeled(ident.unraw().to_string(), arg_value(&assign.right));
            }
        }
    }
    AttrArg::positional(arg_value(&expr))
}

fn arg_value(expr: &syn::Expr) -> ArgValue {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit_str),
            ..
        }) => ArgValue::Str(lit_str.value()),
        other => ArgValue::Expr(other.to_token_stream().to_string()),
    }
}

fn convert_attrs(attrs: &[syn::Attribute]) -> Vec<Attr> {
    attrs.iter().map(convert_attr).collect()
}

/// Identifier of a type written as a plain path (`Foo`, `crate::Foo`).
fn type_ident(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        syn::Type::Group(group) => type_ident(&group.elem),
        syn::Type::Paren(paren) => type_ident(&paren.elem),
        _ => None,
    }
}

fn returns_result(output: &syn::ReturnType) -> bool {
    match output {
        syn::ReturnType::Type(_, ty) => match &**ty {
            syn::Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map_or(false, |segment| segment.ident == "Result"),
            _ => false,
        },
        syn::ReturnType::Default => false,
    }
}

fn signature_effects(sig: &syn::Signature) -> Effects {
    Effects {
        is_async: sig.asyncness.is_some(),
        is_fallible: returns_result(&sig.output),
    }
}

fn typed_params(sig: &syn::Signature) -> Vec<&syn::PatType> {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            syn::FnArg::Typed(pat_type) => Some(pat_type),
            syn::FnArg::Receiver(_) => None,
        })
        .collect()
}

impl ParamDecl for syn::PatType {
    fn name(&self) -> String {
        match &*self.pat {
            syn::Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
            other => other
                .to_token_stream()
                .to_string()
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect(),
        }
    }

    fn type_name(&self) -> String {
        self.ty.to_token_stream().to_string()
    }

    fn attributes(&self) -> Vec<Attr> {
        convert_attrs(&self.attrs)
    }

    fn span(&self) -> Span {
        Spanned::span(self)
    }
}

impl FnDecl for syn::ImplItemFn {
    type Param = syn::PatType;

    fn identifier(&self) -> String {
        self.sig.ident.to_string()
    }

    fn attributes(&self) -> Vec<Attr> {
        convert_attrs(&self.attrs)
    }

    fn params(&self) -> Vec<&syn::PatType> {
        typed_params(&self.sig)
    }

    fn effects(&self) -> Effects {
        signature_effects(&self.sig)
    }

    fn has_receiver(&self) -> bool {
        self.sig.receiver().is_some()
    }

    fn span(&self) -> Span {
        self.sig.ident.span()
    }
}

impl FnDecl for syn::ItemFn {
    type Param = syn::PatType;

    fn identifier(&self) -> String {
        self.sig.ident.to_string()
    }

    fn attributes(&self) -> Vec<Attr> {
        convert_attrs(&self.attrs)
    }

    fn params(&self) -> Vec<&syn::PatType> {
        typed_params(&self.sig)
    }

    fn effects(&self) -> Effects {
        signature_effects(&self.sig)
    }

    fn has_receiver(&self) -> bool {
        false
    }

    fn span(&self) -> Span {
        self.sig.ident.span()
    }
}

impl ControllerDecl for syn::Item {
    type Method = syn::ImplItemFn;

    /// For an impl, the whole self type as written, qualification and
    /// generic arguments included.
    fn type_name(&self) -> Option<String> {
        match self {
            syn::Item::Impl(item) => {
                type_ident(&item.self_ty).map(|_| item.self_ty.to_token_stream().to_string())
            }
            syn::Item::Struct(item) => Some(item.ident.to_string()),
            syn::Item::Enum(item) => Some(item.ident.to_string()),
            syn::Item::Trait(item) => Some(item.ident.to_string()),
            _ => None,
        }
    }

    /// Only an inherent, non-`default`, non-generic impl of a concrete type.
    fn is_final(&self) -> bool {
        match self {
            syn::Item::Impl(item) => {
                item.trait_.is_none()
                    && item.defaultness.is_none()
                    && item.generics.params.is_empty()
                    && type_ident(&item.self_ty).is_some()
            }
            _ => false,
        }
    }

    fn methods(&self) -> Vec<&syn::ImplItemFn> {
        match self {
            syn::Item::Impl(item) => item
                .items
                .iter()
                .filter_map(|impl_item| match impl_item {
                    syn::ImplItem::Fn(method) => Some(method),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn span(&self) -> Span {
        match self {
            syn::Item::Impl(item) => item.self_ty.span(),
            other => Spanned::span(other),
        }
    }
}

fn derive_list(attrs: &[syn::Attribute]) -> Vec<String> {
    let parser = Punctuated::<syn::Path, syn::Token![,]>::parse_terminated;
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::List(list) => parser.parse2(list.tokens.clone()).ok(),
            _ => None,
        })
        .flat_map(|paths| {
            paths
                .into_iter()
                .filter_map(|path| path.segments.last().map(|s| s.ident.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn block_items(block: &syn::Block) -> impl Iterator<Item = &syn::Item> {
    block.stmts.iter().filter_map(|stmt| match stmt {
        syn::Stmt::Item(item) => Some(item),
        _ => None,
    })
}

impl SyntaxNode for syn::Item {
    fn kind(&self) -> NodeKind {
        match self {
            syn::Item::Struct(_) => NodeKind::Struct,
            syn::Item::Enum(_) => NodeKind::Enum,
            syn::Item::Impl(_) => NodeKind::Impl,
            syn::Item::Mod(_) => NodeKind::Module,
            syn::Item::Fn(_) => NodeKind::Function,
            _ => NodeKind::Other,
        }
    }

    fn identifier(&self) -> Option<String> {
        match self {
            syn::Item::Struct(item) => Some(item.ident.to_string()),
            syn::Item::Enum(item) => Some(item.ident.to_string()),
            syn::Item::Impl(item) => type_ident(&item.self_ty),
            syn::Item::Mod(item) => Some(item.ident.to_string()),
            syn::Item::Fn(item) => Some(item.sig.ident.to_string()),
            _ => None,
        }
    }

    fn attributes(&self) -> Vec<Attr> {
        match self {
            syn::Item::Struct(item) => convert_attrs(&item.attrs),
            syn::Item::Enum(item) => convert_attrs(&item.attrs),
            syn::Item::Impl(item) => convert_attrs(&item.attrs),
            syn::Item::Mod(item) => convert_attrs(&item.attrs),
            syn::Item::Fn(item) => convert_attrs(&item.attrs),
            _ => Vec::new(),
        }
    }

    fn conformances(&self) -> Vec<String> {
        match self {
            syn::Item::Impl(item) => match &item.trait_ {
                Some((None, path, _)) => path
                    .segments
                    .last()
                    .map(|segment| vec![segment.ident.to_string()])
                    .unwrap_or_default(),
                _ => Vec::new(),
            },
            syn::Item::Struct(item) => derive_list(&item.attrs),
            syn::Item::Enum(item) => derive_list(&item.attrs),
            _ => Vec::new(),
        }
    }

    fn children(&self) -> Vec<&syn::Item> {
        match self {
            syn::Item::Mod(item) => item
                .content
                .as_ref()
                .map(|(_, items)| items.iter().collect())
                .unwrap_or_default(),
            syn::Item::Fn(item) => block_items(&item.block).collect(),
            syn::Item::Impl(item) => item
                .items
                .iter()
                .filter_map(|impl_item| match impl_item {
                    syn::ImplItem::Fn(method) => Some(method),
                    _ => None,
                })
                .flat_map(|method| block_items(&method.block))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Run discovery over a parsed source file.
pub fn discover_file(file: &syn::File) -> Vec<String> {
    crate::discover::discover(file.items.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn converts_attribute_arguments() {
        let attr: syn::Attribute = parse_quote!(#[waypost::post("there", body = BodyStrategy::Collect)]);
        let attr = convert_attr(&attr);
        assert_eq!(attr.name, "post");
        assert_eq!(attr.first_unlabeled(), Some(&ArgValue::Str("there".into())));
        assert_eq!(
            attr.labeled("body"),
            Some(&ArgValue::Expr("BodyStrategy :: Collect".into()))
        );
    }

    #[test]
    fn bare_attribute_has_no_arguments() {
        let attr: syn::Attribute = parse_quote!(#[get]);
        assert!(convert_attr(&attr).args.is_empty());
    }

    #[test]
    fn reads_method_signature() {
        let method: syn::ImplItemFn = parse_quote! {
            async fn hello(&self, #[path_param] name: String, req: Request) -> Result<String, Error> {
                todo!()
            }
        };
        assert_eq!(method.identifier(), "hello");
        assert!(method.has_receiver());
        assert_eq!(
            method.effects(),
            Effects {
                is_async: true,
                is_fallible: true
            }
        );
        let params = method.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name(), "name");
        assert_eq!(params[0].attributes()[0].name, "path_param");
        assert_eq!(params[1].type_name(), "Request");
    }

    #[test]
    fn only_inherent_concrete_impls_are_final() {
        let inherent: syn::Item = parse_quote!(impl HelloController {});
        let trait_impl: syn::Item = parse_quote!(impl Greeter for HelloController {});
        let generic: syn::Item = parse_quote!(impl<T> HelloController<T> {});
        let structure: syn::Item = parse_quote!(struct HelloController;);
        assert!(inherent.is_final());
        assert!(!trait_impl.is_final());
        assert!(!generic.is_final());
        assert!(!structure.is_final());
        assert_eq!(trait_impl.type_name().as_deref(), Some("HelloController"));
    }

    #[test]
    fn impl_type_name_keeps_qualification_and_arguments() {
        let qualified: syn::Item = parse_quote!(impl api::Users {});
        let applied: syn::Item = parse_quote!(impl Wrapper<u32> {});
        assert_eq!(qualified.type_name().as_deref(), Some("api :: Users"));
        assert_eq!(applied.type_name().as_deref(), Some("Wrapper < u32 >"));
        assert_eq!(SyntaxNode::identifier(&qualified).as_deref(), Some("Users"));
    }

    #[test]
    fn reads_conformances() {
        let derived: syn::Item = parse_quote! {
            #[derive(Debug, waypost::ControllerDiscoverable)]
            struct A;
        };
        let implemented: syn::Item = parse_quote!(impl ControllerDiscoverable for B {});
        let negative: syn::Item = parse_quote!(impl !Send for C {});
        assert_eq!(derived.conformances(), vec!["Debug", "ControllerDiscoverable"]);
        assert_eq!(implemented.conformances(), vec!["ControllerDiscoverable"]);
        assert!(negative.conformances().is_empty());
    }
}
