//! Field-level attribute definitions.

use proc_macro2::Span;

use super::types::{ClassOverride, DefaultTag};

/// Parsed field attributes.
#[derive(Debug)]
pub struct FieldAttrs {
    /// Span of the last `#[zerofill(...)]` attribute, or of the field name.
    pub span: Span,
    pub default: Option<DefaultTag>,
    pub rename: Option<String>,
    pub class: Option<ClassOverride>,
}

impl FieldAttrs {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            default: None,
            rename: None,
            class: None,
        }
    }
}
