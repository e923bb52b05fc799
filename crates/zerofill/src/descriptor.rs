//! Field descriptors: per-field metadata fixed at the type definition.

use crate::apply::ApplyDefaults;
use crate::convert::{Kind, ScalarMut};

/// How a field takes part in default application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A primitive filled through the conversion registry.
    Scalar(Kind),
    /// A record held by value (or `Box`), always recursed into.
    Nested,
    /// A record behind `Option`, created with `Default` when absent.
    OptionalNested,
    /// Any other type. Never visited; carries the declared type name.
    Opaque(&'static str),
}

impl FieldKind {
    pub fn is_nested(self) -> bool {
        matches!(self, FieldKind::Nested | FieldKind::OptionalNested)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// The default tag as written, if any.
    pub default: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, default: None }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self { default: Some(default), ..self }
    }

    /// The default tag, treating an empty tag as no tag.
    pub fn default_tag(&self) -> Option<&'static str> {
        self.default.filter(|tag| !tag.is_empty())
    }

    pub fn is_nested(&self) -> bool {
        self.kind.is_nested()
    }
}

/// Mutable access to one field of a record, as handed to the engine.
pub enum FieldMut<'a> {
    Scalar(ScalarMut<'a>),
    Nested(&'a mut dyn ApplyDefaults),
    OptionalNested(&'a mut dyn NestedSlot),
    Opaque,
}

impl<'a> From<ScalarMut<'a>> for FieldMut<'a> {
    fn from(value: ScalarMut<'a>) -> Self {
        FieldMut::Scalar(value)
    }
}

impl FieldMut<'_> {
    pub(crate) fn describe(&self) -> String {
        match self {
            FieldMut::Scalar(scalar) => scalar.kind().to_string(),
            FieldMut::Nested(_) => "record".to_string(),
            FieldMut::OptionalNested(_) => "optional record".to_string(),
            FieldMut::Opaque => "opaque value".to_string(),
        }
    }
}

/// An optional nested record that can be created on demand.
pub trait NestedSlot {
    fn is_absent(&self) -> bool;

    /// The nested record, inserting a default instance if absent.
    fn get_or_insert_default(&mut self) -> &mut dyn ApplyDefaults;
}

impl<T: ApplyDefaults + Default> NestedSlot for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn get_or_insert_default(&mut self) -> &mut dyn ApplyDefaults {
        self.get_or_insert_with(T::default)
    }
}
