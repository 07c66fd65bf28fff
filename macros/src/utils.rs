//! Utility functions for procedural macros
//!
//! This module contains utility functions used by the procedural macros,
//! such as return type inspection and parameter attribute parsing.

use syn::{Attribute, GenericArgument, LitStr, PathArguments, ReturnType, Type};

/// How a factory hands back its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryReturn {
    /// `-> Self`
    Plain,
    /// `-> Result<Self, E>`
    Fallible,
}

/// Check if a type is `Self` or the impl's own type
pub fn is_self_type(ty: &Type, self_ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.is_ident("Self") || ty == self_ty
        }
        Type::Paren(inner) => is_self_type(&inner.elem, self_ty),
        Type::Group(inner) => is_self_type(&inner.elem, self_ty),
        _ => false,
    }
}

/// Classify a function's return type, `None` when it does not produce `Self`
pub fn factory_return(output: &ReturnType, self_ty: &Type) -> Option<FactoryReturn> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    if is_self_type(ty, self_ty) {
        return Some(FactoryReturn::Plain);
    }

    // Result<Self, E>, io::Result<Self> and similar aliases
    let Type::Path(type_path) = ty.as_ref() else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if is_self_type(inner, self_ty) => {
            Some(FactoryReturn::Fallible)
        }
        _ => None,
    }
}

/// Remove every `#[named(...)]` attribute, returning the declared name
///
/// Fails on a malformed attribute or on more than one per parameter.
pub fn take_named_attr(attrs: &mut Vec<Attribute>) -> syn::Result<Option<LitStr>> {
    let mut found: Option<LitStr> = None;
    let mut error: Option<syn::Error> = None;

    attrs.retain(|attr| {
        if !attr.path().is_ident("named") {
            return true;
        }
        match attr.parse_args::<LitStr>() {
            Ok(name) if found.is_none() => found = Some(name),
            Ok(name) => {
                error.get_or_insert_with(|| {
                    syn::Error::new(name.span(), "duplicate `#[named]` attribute on parameter")
                });
            }
            Err(err) => {
                error.get_or_insert(err);
            }
        }
        false
    });

    match error {
        Some(err) => Err(err),
        None => Ok(found),
    }
}

/// Short display name for the impl type
pub fn type_label(self_ty: &Type) -> String {
    if let Type::Path(type_path) = self_ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident.to_string();
        }
    }
    quote::quote!(#self_ty).to_string()
}
