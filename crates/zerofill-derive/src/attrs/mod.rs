//! Attribute parsing for the `Defaults` derive.
//!
//! # Module Structure
//!
//! - `types` - Value types for attribute settings
//! - `container` - Struct-level attribute definitions
//! - `field` - Field-level attribute definitions
//! - `field_info` - Processed field information for codegen
//! - `type_utils` - Type analysis utilities
//! - `parse` - Parsing entry points using `parse_nested_meta`

mod container;
mod field;
mod field_info;
mod parse;
mod type_utils;
mod types;

pub use container::StructAttrs;
pub use field_info::FieldInfo;
pub use parse::{parse_field_attrs, parse_struct_attrs};
pub use types::FieldClass;
