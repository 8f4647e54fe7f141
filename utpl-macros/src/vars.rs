use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, LitStr, parse_macro_input};

pub fn derive_vars_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data {
        syn::Data::Struct(data) => match data.fields {
            syn::Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(name, "Vars only supports structs with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Vars only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut inserts = Vec::with_capacity(fields.len());
    for f in fields.iter() {
        let Some(field_name) = f.ident.as_ref() else {
            continue;
        };
        let (key, ignore) = match parse_field_attrs(f, field_name) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };
        if ignore {
            continue;
        }
        let key_lit = LitStr::new(&key, Span::call_site());
        inserts.push(quote! {
            if let ::std::option::Option::Some(value) = ::utpl::vars::ToVar::to_var(&self.#field_name) {
                vars.insert(#key_lit, value);
            }
        });
    }

    TokenStream::from(quote! {
        impl #impl_generics ::utpl::vars::ToVars for #name #ty_generics #where_clause {
            fn to_vars(&self) -> ::utpl::vars::Vars {
                let mut vars = ::utpl::vars::Vars::new();
                #(#inserts)*
                vars
            }
        }
    })
}

/// Reads `#[var(...)]` on a field: the variable name and whether to skip it.
fn parse_field_attrs(field: &syn::Field, ident: &syn::Ident) -> syn::Result<(String, bool)> {
    let mut name = ident.unraw().to_string();
    let mut ignore = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("var") {
            continue;
        }
        if let Ok(s) = attr.parse_args::<LitStr>() {
            name = s.value();
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignore = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let s: LitStr = meta.value()?.parse()?;
                name = s.value();
                Ok(())
            } else {
                Err(meta.error("expected `ignore` or `rename = \"...\"`"))
            }
        })?;
    }
    if !ignore && !is_var_name(&name) {
        return Err(syn::Error::new_spanned(
            ident,
            format!("`{}` is not a template variable name (use ASCII letters, digits and `_`)", name),
        ));
    }
    Ok((name, ignore))
}

fn is_var_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
