//! `#[named_constructors]` attribute macro implementation
//!
//! Expands an inherent impl block into itself plus a `SchemaSource` impl that
//! declares one factory per associated function producing `Self`.

use darling::{ast::NestedMeta, FromMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Type};

use crate::utils::{self, FactoryReturn};

/// Options from `#[named_constructors(...)]`
#[derive(Debug, Default, FromMeta)]
pub(crate) struct NamedConstructorsArgs {
    /// Path of the runtime crate, for re-exports
    #[darling(default, rename = "crate")]
    pub(crate) krate: Option<syn::Path>,
    /// Type name reported in diagnostics
    #[darling(default)]
    pub(crate) name: Option<String>,
}

/// One factory found in the impl block
struct FactoryInfo {
    ident: syn::Ident,
    names: Vec<Option<LitStr>>,
    types: Vec<Type>,
    returns: FactoryReturn,
}

/// Process the `named_constructors` attribute macro
pub fn process_named_constructors(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(list) => list,
        Err(err) => return TokenStream::from(darling::Error::from(err).write_errors()),
    };
    let args = match NamedConstructorsArgs::from_list(&attr_args) {
        Ok(args) => args,
        Err(err) => return TokenStream::from(err.write_errors()),
    };

    let mut item = parse_macro_input!(input as ItemImpl);
    match expand(&args, &mut item) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

pub(crate) fn expand(args: &NamedConstructorsArgs, item: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[named_constructors] must be placed on an inherent impl block",
        ));
    }

    let self_ty = item.self_ty.as_ref().clone();
    let mut factories = Vec::new();
    for impl_item in &mut item.items {
        if let ImplItem::Fn(function) = impl_item {
            if let Some(info) = inspect_fn(function, &self_ty)? {
                factories.push(info);
            }
        }
    }

    let krate = args
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::named_constructor));
    let type_name = args
        .name
        .clone()
        .unwrap_or_else(|| utils::type_label(&self_ty));
    let decls = factories.iter().map(|info| generate_decl(&krate, info));
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics #krate::SchemaSource for #self_ty #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn factories() -> ::std::vec::Vec<#krate::FactoryDecl<Self>> {
                ::std::vec![#(#decls),*]
            }
        }
    })
}

/// Strip `#[named]` from the parameters of `function` and describe it as a
/// factory, or return `None` when it is not one
fn inspect_fn(function: &mut ImplItemFn, self_ty: &Type) -> syn::Result<Option<FactoryInfo>> {
    let sig = &mut function.sig;
    let returns = utils::factory_return(&sig.output, self_ty);
    let is_generic = sig.generics.type_params().next().is_some()
        || sig.generics.const_params().next().is_some();
    let eligible = sig.receiver().is_none() && !is_generic && sig.asyncness.is_none();

    let mut names = Vec::with_capacity(sig.inputs.len());
    let mut types = Vec::with_capacity(sig.inputs.len());
    for input in &mut sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            let name = utils::take_named_attr(&mut pat_type.attrs)?;
            if let (Some(name), false) = (&name, eligible && returns.is_some()) {
                return Err(syn::Error::new(
                    name.span(),
                    "`#[named]` is only allowed on non-generic, non-async associated functions returning `Self`",
                ));
            }
            names.push(name);
            types.push(pat_type.ty.as_ref().clone());
        }
    }

    let Some(returns) = returns.filter(|_| eligible) else {
        return Ok(None);
    };
    Ok(Some(FactoryInfo {
        ident: sig.ident.clone(),
        names,
        types,
        returns,
    }))
}

/// Generate the `FactoryDecl` expression for one factory
fn generate_decl(krate: &syn::Path, info: &FactoryInfo) -> TokenStream2 {
    let label = info.ident.to_string();
    let params = info.names.iter().map(|name| match name {
        Some(name) => quote! {
            ::core::option::Option::Some(::std::string::String::from(#name))
        },
        None => quote! { ::core::option::Option::None },
    });

    let fully_named = !info.names.is_empty() && info.names.iter().all(Option::is_some);
    if !fully_named {
        // never invoked: the extractor skips or rejects this declaration
        let arity = info.names.len();
        return quote! {
            #krate::FactoryDecl::new(
                #label,
                ::std::vec![#(#params),*],
                |_args: #krate::Arguments| -> ::core::result::Result<Self, #krate::BoxError> {
                    ::core::result::Result::Err(::std::format!(
                        "factory '{}' with {} parameters declares no complete name set",
                        #label,
                        #arity
                    ).into())
                },
            )
        };
    }

    let ident = &info.ident;
    let types = &info.types;
    let call = quote! { Self::#ident(#(args.next::<#types>()?),*) };
    let body = match info.returns {
        FactoryReturn::Plain => quote! { ::core::result::Result::Ok(#call) },
        FactoryReturn::Fallible => quote! { #call.map_err(::core::convert::Into::into) },
    };

    quote! {
        #krate::FactoryDecl::new(
            #label,
            ::std::vec![#(#params),*],
            |mut args: #krate::Arguments| -> ::core::result::Result<Self, #krate::BoxError> {
                #body
            },
        )
    }
}
