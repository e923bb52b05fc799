//! Attribute parsing functions.
//!
//! Uses manual `parse_nested_meta` for all `#[zerofill(...)]` attributes.

use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, ExprUnary, Field, Lit, LitStr, UnOp};

use super::container::StructAttrs;
use super::field::FieldAttrs;
use super::types::{ClassOverride, DefaultTag, RenameStrategy};

const ATTR: &str = "zerofill";

/// Parse struct-level attributes from `#[zerofill(...)]`.
pub fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut result = StructAttrs::default();
    let mut rename_all_seen = false;

    for attr in attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let ident = meta.path.get_ident().map(|i| i.to_string());
            match ident.as_deref() {
                Some("custom") => {
                    if result.custom {
                        return Err(meta.error("duplicate `custom` attribute"));
                    }
                    result.custom = true;
                }
                Some("rename_all") => {
                    if rename_all_seen {
                        return Err(meta.error("duplicate `rename_all` attribute"));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    result.rename_all = RenameStrategy::parse(&value.value()).ok_or_else(|| {
                        syn::Error::new_spanned(
                            &value,
                            "invalid rename_all, expected one of: kebab-case, snake_case, lowercase, UPPERCASE, none",
                        )
                    })?;
                    rename_all_seen = true;
                }
                Some("crate") => {
                    if result.crate_path.is_some() {
                        return Err(meta.error("duplicate `crate` attribute"));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    result.crate_path = Some(value.parse().map_err(|_| {
                        syn::Error::new_spanned(&value, "invalid #[zerofill(crate = \"...\")] path")
                    })?);
                }
                _ => {
                    return Err(syn::Error::new(
                        meta.path.span(),
                        "unknown struct attribute, expected one of: custom, rename_all, crate",
                    ));
                }
            }
            Ok(())
        })?;
    }

    Ok(result)
}

/// Parse field-level attributes from `#[zerofill(...)]`.
pub fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let span = field
        .ident
        .as_ref()
        .map(|i| i.span())
        .unwrap_or_else(|| field.ty.span());
    let mut result = FieldAttrs::new(span);

    for attr in &field.attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }
        result.span = attr.span();

        attr.parse_nested_meta(|meta| {
            let ident = meta.path.get_ident().map(|i| i.to_string());
            match ident.as_deref() {
                Some("default") => {
                    if result.default.is_some() {
                        return Err(meta.error("duplicate `default` attribute"));
                    }
                    let expr: Expr = meta.value()?.parse()?;
                    let tag = parse_default_expr(&expr).ok_or_else(|| {
                        syn::Error::new_spanned(
                            &expr,
                            "default value must be a literal (string, integer, float, or boolean)",
                        )
                    })?;
                    result.default = Some(tag);
                }
                Some("rename") => {
                    if result.rename.is_some() {
                        return Err(meta.error("duplicate `rename` attribute"));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    result.rename = Some(value.value());
                }
                Some(keyword @ ("skip" | "nested" | "scalar")) => {
                    let requested = match keyword {
                        "skip" => ClassOverride::Skip,
                        "nested" => ClassOverride::Nested,
                        _ => ClassOverride::Scalar,
                    };
                    if let Some(existing) = result.class {
                        return Err(meta.error(format!(
                            "`{}` conflicts with `{}`",
                            requested.keyword(),
                            existing.keyword()
                        )));
                    }
                    result.class = Some(requested);
                }
                _ => {
                    return Err(syn::Error::new(
                        meta.path.span(),
                        "unknown field attribute, expected one of: default, rename, skip, nested, scalar",
                    ));
                }
            }
            Ok(())
        })?;
    }

    Ok(result)
}

/// Normalize a default literal to the text the runtime parses.
fn parse_default_expr(expr: &Expr) -> Option<DefaultTag> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Some(DefaultTag(s.value())),
            Lit::Int(i) => Some(DefaultTag(i.base10_digits().to_string())),
            Lit::Float(f) => Some(DefaultTag(f.base10_digits().to_string())),
            Lit::Bool(b) => Some(DefaultTag(b.value().to_string())),
            _ => None,
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match &**expr {
            Expr::Lit(ExprLit {
                lit: Lit::Int(i), ..
            }) => Some(DefaultTag(format!("-{}", i.base10_digits()))),
            Expr::Lit(ExprLit {
                lit: Lit::Float(f), ..
            }) => Some(DefaultTag(format!("-{}", f.base10_digits()))),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field(field: Field) -> syn::Result<FieldAttrs> {
        parse_field_attrs(&field)
    }

    fn named(tokens: proc_macro2::TokenStream) -> Field {
        syn::parse::Parser::parse2(Field::parse_named, tokens).unwrap()
    }

    #[test]
    fn literal_defaults_are_normalized_to_text() {
        let attrs = field(named(quote::quote! { #[zerofill(default = "1+2i")] c: Complex64 })).unwrap();
        assert_eq!(attrs.default, Some(DefaultTag("1+2i".into())));

        let attrs = field(named(quote::quote! { #[zerofill(default = 10u8)] n: u8 })).unwrap();
        assert_eq!(attrs.default, Some(DefaultTag("10".into())));

        let attrs = field(named(quote::quote! { #[zerofill(default = -2.5)] x: f64 })).unwrap();
        assert_eq!(attrs.default, Some(DefaultTag("-2.5".into())));

        let attrs = field(named(quote::quote! { #[zerofill(default = true)] b: bool })).unwrap();
        assert_eq!(attrs.default, Some(DefaultTag("true".into())));
    }

    #[test]
    fn non_literal_default_is_rejected() {
        let err = field(named(quote::quote! { #[zerofill(default = some_fn())] n: u8 })).unwrap_err();
        assert!(err.to_string().contains("must be a literal"));
    }

    #[test]
    fn duplicate_and_conflicting_keys_are_rejected() {
        let err = field(named(quote::quote! {
            #[zerofill(default = "1")]
            #[zerofill(default = "2")]
            n: u8
        }))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate `default`"));

        let err = field(named(quote::quote! { #[zerofill(skip, nested)] inner: Inner })).unwrap_err();
        assert!(err.to_string().contains("`nested` conflicts with `skip`"));

        let err = field(named(quote::quote! { #[zerofill(defualt = "1")] n: u8 })).unwrap_err();
        assert!(err.to_string().contains("unknown field attribute"));
    }

    #[test]
    fn other_attributes_are_ignored() {
        let attrs = field(named(quote::quote! { #[serde(default)] #[doc = "x"] n: u8 })).unwrap();
        assert!(attrs.default.is_none());
        assert!(attrs.class.is_none());
    }

    #[test]
    fn struct_attrs_parse() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[zerofill(custom, rename_all = "kebab-case")]),
            parse_quote!(#[zerofill(crate = "my_crate::zerofill")]),
        ];
        let parsed = parse_struct_attrs(&attrs).unwrap();
        assert!(parsed.custom);
        assert_eq!(parsed.rename_all, RenameStrategy::KebabCase);
        let path = parsed.runtime_path();
        assert_eq!(quote::quote!(#path).to_string(), "my_crate :: zerofill");

        let attrs: Vec<Attribute> = vec![parse_quote!(#[zerofill(rename_all = "camelCase")])];
        assert!(parse_struct_attrs(&attrs).is_err());
    }
}
