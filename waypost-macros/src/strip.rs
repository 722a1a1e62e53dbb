//! Removal of the inert markers once they have been read.

use waypost_codegen::attr::{classify, AttributeMarker};

fn marker_of(attr: &syn::Attribute) -> Option<AttributeMarker> {
    attr.path()
        .segments
        .last()
        .and_then(|segment| classify(&segment.ident.to_string()))
}

/// Drop `#[path_param]`, `#[query_param]`, `#[query_content]` and
/// `#[body_content]` from a signature's parameters.
pub fn strip_param_markers(sig: &mut syn::Signature) {
    for input in sig.inputs.iter_mut() {
        if let syn::FnArg::Typed(pat_type) = input {
            pat_type
                .attrs
                .retain(|attr| !marker_of(attr).is_some_and(|m| m.is_param_binding()));
        }
    }
}

/// Drop handler and parameter markers from every method of an impl block.
pub fn strip_impl_markers(item: &mut syn::Item) {
    let syn::Item::Impl(item_impl) = item else {
        return;
    };
    for impl_item in item_impl.items.iter_mut() {
        if let syn::ImplItem::Fn(method) = impl_item {
            method
                .attrs
                .retain(|attr| !marker_of(attr).is_some_and(|m| m.is_handler()));
            strip_param_markers(&mut method.sig);
        }
    }
}
