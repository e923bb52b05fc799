//! Processed field information for code generation.

use proc_macro2::Span;
use syn::{Field, Ident, Index, Type};

use super::parse::parse_field_attrs;
use super::type_utils::{classify_type, is_option_type, type_name};
use super::types::{ClassOverride, DefaultTag, FieldClass, RenameStrategy};

/// How generated code reaches a field.
#[derive(Debug, Clone)]
pub enum FieldAccess {
    Named(Ident),
    Index(Index),
}

impl quote::ToTokens for FieldAccess {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        match self {
            FieldAccess::Named(ident) => ident.to_tokens(tokens),
            FieldAccess::Index(index) => index.to_tokens(tokens),
        }
    }
}

/// Processed field information used for code generation.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub access: FieldAccess,
    pub ty: Type,
    /// Descriptor name: the identifier or index, after renaming.
    pub name: String,
    pub class: FieldClass,
    pub default: Option<DefaultTag>,
    pub span: Span,
}

impl FieldInfo {
    /// Create FieldInfo from a named or tuple field at `index`.
    pub fn from_field(field: &Field, index: usize, rename_all: RenameStrategy) -> syn::Result<Self> {
        let attrs = parse_field_attrs(field)?;

        let (access, natural_name) = match &field.ident {
            Some(ident) => {
                let raw = ident.to_string();
                let raw = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
                (FieldAccess::Named(ident.clone()), rename_all.apply(&raw))
            }
            None => (FieldAccess::Index(Index::from(index)), index.to_string()),
        };
        let name = attrs.rename.clone().unwrap_or(natural_name);

        let class = match attrs.class {
            Some(ClassOverride::Skip) => FieldClass::Opaque,
            Some(ClassOverride::Scalar) => FieldClass::Scalar,
            Some(ClassOverride::Nested) if is_option_type(&field.ty) => FieldClass::OptionalNested,
            Some(ClassOverride::Nested) => FieldClass::Nested,
            None => classify_type(&field.ty),
        };

        if attrs.default.is_some() {
            let reason = match (&class, attrs.class) {
                (_, Some(ClassOverride::Skip)) => Some("a skipped field cannot carry a default".to_string()),
                (FieldClass::Nested | FieldClass::OptionalNested, _) => Some(format!(
                    "field `{name}` is a nested record; defaults belong on the fields of the nested type"
                )),
                (FieldClass::Opaque, _) => Some(format!(
                    "no default conversion for `{}`; mark the field `scalar` if it is an alias of a supported type",
                    type_name(&field.ty)
                )),
                (FieldClass::Scalar, _) => None,
            };
            if let Some(reason) = reason {
                return Err(syn::Error::new(attrs.span, reason));
            }
        }

        Ok(Self {
            access,
            ty: field.ty.clone(),
            name,
            class,
            default: attrs.default,
            span: attrs.span,
        })
    }

    /// Type as written, for opaque descriptors.
    pub fn type_name(&self) -> String {
        type_name(&self.ty)
    }
}
