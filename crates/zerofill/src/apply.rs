//! The default applier: walks a record's fields and fills zero values.

use crate::convert::{self, Conversion};
use crate::descriptor::{FieldDescriptor, FieldKind, FieldMut};
use crate::error::DefaultsError;

/// A value that defaults can be applied to.
///
/// Derived by `#[derive(Defaults)]`. Implementing it by hand replaces the
/// field traversal for the type entirely.
pub trait ApplyDefaults {
    fn apply_defaults(&mut self) -> Result<(), DefaultsError>;
}

impl<T: ApplyDefaults + ?Sized> ApplyDefaults for Box<T> {
    fn apply_defaults(&mut self) -> Result<(), DefaultsError> {
        (**self).apply_defaults()
    }
}

/// Custom default logic for a record type.
///
/// Used in place of field traversal when the type is marked
/// `#[zerofill(custom)]`. The hook owns its nested fields: nothing else is
/// visited, and its result is returned unchanged.
pub trait CustomDefaults {
    fn custom_defaults(&mut self) -> Result<(), DefaultsError>;
}

/// A record type with a descriptor table and typed access to its fields.
pub trait Record {
    /// Type name used in errors.
    const NAME: &'static str;
    /// One descriptor per field, in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Access to the field at `index` in [`Record::FIELDS`], or `None` if the
    /// field cannot be written through this record.
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Fill every zero-valued, tagged field of `record`, recursing into nested
/// records.
pub fn apply_defaults<T: ApplyDefaults + ?Sized>(record: &mut T) -> Result<(), DefaultsError> {
    record.apply_defaults()
}

/// Run the custom hook of a record.
pub fn apply_custom<T: CustomDefaults + ?Sized>(record: &mut T, name: &'static str) -> Result<(), DefaultsError> {
    tracing::trace!(record = name, "running custom defaults");
    record.custom_defaults()
}

/// Reject defaults declared on fields that cannot take them.
///
/// Runs before any field of the record is touched.
pub fn validate_fields(record: &'static str, fields: &[FieldDescriptor]) -> Result<(), DefaultsError> {
    for field in fields {
        if field.default_tag().is_none() {
            continue;
        }
        match field.kind {
            FieldKind::Nested | FieldKind::OptionalNested => {
                return Err(DefaultsError::nested_default(record, field.name));
            }
            FieldKind::Opaque(type_name) => {
                return Err(DefaultsError::unsupported_default(record, field.name, type_name));
            }
            FieldKind::Scalar(_) => {}
        }
    }
    Ok(())
}

/// Check that every default of `R` is declared on a field that accepts it
/// and parses as that field's kind. Nothing is written.
///
/// Only `R`'s own table is checked; nested records are not visited, so each
/// record type with defaults needs its own call.
pub fn check_defaults<R: Record + ?Sized>() -> Result<(), DefaultsError> {
    validate_fields(R::NAME, R::FIELDS)?;
    for field in R::FIELDS {
        if let (FieldKind::Scalar(kind), Some(tag)) = (field.kind, field.default_tag()) {
            convert::check(kind, tag).map_err(|err| DefaultsError::parse(R::NAME, field.name, err))?;
        }
    }
    Ok(())
}

/// Field-by-field default application for a record without a custom hook.
///
/// Stops at the first failing field; fields visited before it keep their
/// new values.
pub fn apply_fields<R: Record + ?Sized>(record: &mut R) -> Result<(), DefaultsError> {
    validate_fields(R::NAME, R::FIELDS)?;

    for (index, field) in R::FIELDS.iter().enumerate() {
        let tag = field.default_tag();
        if tag.is_none() && !field.is_nested() {
            continue;
        }

        let slot = record
            .field_mut(index)
            .ok_or_else(|| DefaultsError::not_settable(R::NAME, field.name))?;

        match (field.kind, slot) {
            (FieldKind::Nested, FieldMut::Nested(inner)) => {
                inner.apply_defaults().map_err(|err| err.nested_in(field.name))?;
            }
            (FieldKind::OptionalNested, FieldMut::OptionalNested(inner)) => {
                if inner.is_absent() {
                    tracing::trace!(record = R::NAME, field = field.name, "creating absent nested record");
                }
                inner
                    .get_or_insert_default()
                    .apply_defaults()
                    .map_err(|err| err.nested_in(field.name))?;
            }
            (FieldKind::Scalar(kind), FieldMut::Scalar(scalar)) if scalar.kind() == kind => {
                // Untagged scalars were skipped above.
                let Some(tag) = tag else { continue };
                let outcome = convert::conversion_for(kind)(scalar, tag)
                    .map_err(|err| DefaultsError::parse(R::NAME, field.name, err))?;
                match outcome {
                    Conversion::Applied => {
                        tracing::trace!(record = R::NAME, field = field.name, default = tag, "applied default");
                    }
                    Conversion::Kept => {
                        tracing::trace!(record = R::NAME, field = field.name, "kept existing value");
                    }
                }
            }
            (kind, slot) => {
                return Err(DefaultsError::unsupported_kind(
                    R::NAME,
                    field.name,
                    expected_name(kind),
                    slot.describe(),
                ));
            }
        }
    }

    Ok(())
}

fn expected_name(kind: FieldKind) -> String {
    match kind {
        FieldKind::Scalar(kind) => kind.to_string(),
        FieldKind::Nested => "record".to_string(),
        FieldKind::OptionalNested => "optional record".to_string(),
        FieldKind::Opaque(type_name) => type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Kind, Scalar};
    use crate::error::ErrorKind;

    #[derive(Debug, Default, PartialEq)]
    struct Limits {
        max: u32,
        label: String,
    }

    impl Record for Limits {
        const NAME: &'static str = "Limits";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("max", FieldKind::Scalar(Kind::U32)).with_default("64"),
            FieldDescriptor::new("label", FieldKind::Scalar(Kind::String)).with_default("default"),
        ];

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(self.max.scalar_mut().into()),
                1 => Some(self.label.scalar_mut().into()),
                _ => None,
            }
        }
    }

    impl ApplyDefaults for Limits {
        fn apply_defaults(&mut self) -> Result<(), DefaultsError> {
            apply_fields(self)
        }
    }

    #[derive(Debug, Default)]
    struct Service {
        port: u16,
        limits: Limits,
        backup: Option<Limits>,
        tags: Vec<String>,
    }

    impl Record for Service {
        const NAME: &'static str = "Service";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("port", FieldKind::Scalar(Kind::U16)).with_default("8080"),
            FieldDescriptor::new("limits", FieldKind::Nested),
            FieldDescriptor::new("backup", FieldKind::OptionalNested),
            FieldDescriptor::new("tags", FieldKind::Opaque("Vec<String>")),
        ];

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(self.port.scalar_mut().into()),
                1 => Some(FieldMut::Nested(&mut self.limits)),
                2 => Some(FieldMut::OptionalNested(&mut self.backup)),
                3 => Some(FieldMut::Opaque),
                _ => None,
            }
        }
    }

    impl ApplyDefaults for Service {
        fn apply_defaults(&mut self) -> Result<(), DefaultsError> {
            apply_fields(self)
        }
    }

    #[test]
    fn hand_registered_records_are_filled_recursively() {
        let mut service = Service::default();
        apply_defaults(&mut service).unwrap();

        assert_eq!(service.port, 8080);
        assert_eq!(service.limits, Limits { max: 64, label: "default".into() });
        assert_eq!(service.backup, Some(Limits { max: 64, label: "default".into() }));
        assert!(service.tags.is_empty());
    }

    #[test]
    fn present_optional_record_is_filled_in_place() {
        let mut service = Service {
            backup: Some(Limits { max: 3, label: String::new() }),
            ..Service::default()
        };
        apply_defaults(&mut service).unwrap();
        assert_eq!(service.backup, Some(Limits { max: 3, label: "default".into() }));
    }

    struct TaggedNested {
        count: i32,
        limits: Limits,
    }

    impl Record for TaggedNested {
        const NAME: &'static str = "TaggedNested";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("count", FieldKind::Scalar(Kind::I32)).with_default("5"),
            FieldDescriptor::new("limits", FieldKind::Nested).with_default("{}"),
        ];

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(self.count.scalar_mut().into()),
                1 => Some(FieldMut::Nested(&mut self.limits)),
                _ => None,
            }
        }
    }

    #[test]
    fn nested_default_is_rejected_before_any_mutation() {
        let mut record = TaggedNested { count: 0, limits: Limits::default() };
        let err = apply_fields(&mut record).unwrap_err();

        assert_eq!(err.kind, ErrorKind::NestedDefault);
        assert!(err.kind.is_configuration());
        assert_eq!(err.field.as_deref(), Some("limits"));
        assert_eq!(record.count, 0);
        assert_eq!(record.limits, Limits::default());
    }

    struct Locked {
        first: bool,
        second: bool,
    }

    impl Record for Locked {
        const NAME: &'static str = "Locked";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("first", FieldKind::Scalar(Kind::Bool)).with_default("true"),
            FieldDescriptor::new("second", FieldKind::Scalar(Kind::Bool)).with_default("true"),
        ];

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(self.first.scalar_mut().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn unwritable_field_fails_after_earlier_fields_are_filled() {
        let mut record = Locked { first: false, second: false };
        let err = apply_fields(&mut record).unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotSettable);
        assert_eq!(err.field.as_deref(), Some("second"));
        assert!(record.first);
        assert!(!record.second);
    }

    struct Mismatched {
        level: u8,
    }

    impl Record for Mismatched {
        const NAME: &'static str = "Mismatched";
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::new("level", FieldKind::Scalar(Kind::I64)).with_default("3")];

        fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
            Some(self.level.scalar_mut().into())
        }
    }

    #[test]
    fn slot_of_another_kind_is_unsupported() {
        let mut record = Mismatched { level: 0 };
        let err = apply_fields(&mut record).unwrap_err();

        assert_eq!(
            err.kind,
            ErrorKind::UnsupportedKind { expected: "i64".into(), found: "u8".into() }
        );
        assert_eq!(record.level, 0);
    }

    struct BadOpaque;

    impl Record for BadOpaque {
        const NAME: &'static str = "BadOpaque";
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::new("items", FieldKind::Opaque("Vec<u8>")).with_default("1")];

        fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
            Some(FieldMut::Opaque)
        }
    }

    #[test]
    fn default_on_opaque_field_is_a_configuration_error() {
        let err = apply_fields(&mut BadOpaque).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedDefault { type_name: "Vec<u8>".into() });
        assert!(check_defaults::<BadOpaque>().is_err());
    }

    #[test]
    fn check_defaults_parses_without_a_record() {
        assert!(check_defaults::<Service>().is_ok());

        let err = check_defaults::<TaggedNested>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestedDefault);
    }

    struct BadLimits;

    impl Record for BadLimits {
        const NAME: &'static str = "BadLimits";
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::new("max", FieldKind::Scalar(Kind::U32)).with_default("lots")];

        fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
            None
        }
    }

    struct HoldsBadLimits;

    impl Record for HoldsBadLimits {
        const NAME: &'static str = "HoldsBadLimits";
        const FIELDS: &'static [FieldDescriptor] = &[FieldDescriptor::new("limits", FieldKind::Nested)];

        fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
            None
        }
    }

    #[test]
    fn check_defaults_covers_only_its_own_table() {
        assert!(check_defaults::<HoldsBadLimits>().is_ok());

        let err = check_defaults::<BadLimits>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parse(_)));
        assert_eq!(err.field.as_deref(), Some("max"));
    }

    #[test]
    fn empty_tag_counts_as_no_tag() {
        let descriptor = FieldDescriptor::new("name", FieldKind::Scalar(Kind::String)).with_default("");
        assert_eq!(descriptor.default_tag(), None);
        assert!(validate_fields(
            "Record",
            &[FieldDescriptor::new("inner", FieldKind::Nested).with_default("")]
        )
        .is_ok());
    }
}
