//! Container-level (struct) attribute definitions.

use super::types::RenameStrategy;

/// Struct-level attributes.
///
/// Parsed from `#[zerofill(...)]` on structs.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Delegate to the type's `CustomDefaults` impl instead of visiting fields.
    pub custom: bool,
    /// Rename strategy for all descriptor names.
    pub rename_all: RenameStrategy,
    /// Path to the runtime crate, from `crate = "..."`.
    pub crate_path: Option<syn::Path>,
}

impl StructAttrs {
    /// The runtime crate path used in generated code.
    pub fn runtime_path(&self) -> syn::Path {
        self.crate_path
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::zerofill))
    }
}
