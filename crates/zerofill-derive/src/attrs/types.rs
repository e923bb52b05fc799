//! Value types for `#[zerofill(...)]` attributes.
//!
//! These types are parsed from attribute values by the helpers in `parse.rs`.

use proc_macro2::TokenStream;
use quote::quote;

/// Rename strategy for descriptor names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenameStrategy {
    #[default]
    None,
    KebabCase,
    SnakeCase,
    Lowercase,
    Uppercase,
}

impl RenameStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kebab-case" => Some(RenameStrategy::KebabCase),
            "snake_case" => Some(RenameStrategy::SnakeCase),
            "lowercase" => Some(RenameStrategy::Lowercase),
            "UPPERCASE" => Some(RenameStrategy::Uppercase),
            "none" => Some(RenameStrategy::None),
            _ => None,
        }
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            RenameStrategy::None => name.to_string(),
            RenameStrategy::KebabCase => to_kebab_case(name),
            RenameStrategy::SnakeCase => to_snake_case(name),
            RenameStrategy::Lowercase => name.to_lowercase(),
            RenameStrategy::Uppercase => name.to_uppercase(),
        }
    }
}

/// How a field takes part in default application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldClass {
    Scalar,
    Nested,
    OptionalNested,
    Opaque,
}

/// Explicit classification requested with `skip`, `nested` or `scalar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOverride {
    Skip,
    Nested,
    Scalar,
}

impl ClassOverride {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassOverride::Skip => "skip",
            ClassOverride::Nested => "nested",
            ClassOverride::Scalar => "scalar",
        }
    }
}

/// A default tag, normalized to the text the runtime parses.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTag(pub String);

impl quote::ToTokens for DefaultTag {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let text = &self.0;
        tokens.extend(quote! { #text });
    }
}

// ============================================================================
// Helper functions for case conversion
// ============================================================================

fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' {
            result.push('-');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase();
        }
    }

    result
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '-' {
            result.push('_');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase();
        }
    }

    result
}
