use std::fmt;

use thiserror::Error;

use crate::convert::Kind;

/// A default string that could not be parsed as its field's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {value:?} as {kind}: {reason}")]
pub struct ConversionError {
    pub kind: Kind,
    pub value: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(kind: Kind, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid default: {0}")]
    Parse(ConversionError),
    #[error("defaults are not allowed on structured fields")]
    NestedDefault,
    #[error("default provided but type `{type_name}` cannot hold one")]
    UnsupportedDefault { type_name: String },
    #[error("field cannot be set")]
    NotSettable,
    #[error("expected a {expected} field, found `{found}`")]
    UnsupportedKind { expected: String, found: String },
    #[error("{0}")]
    Custom(String),
}

impl ErrorKind {
    /// Whether the error comes from how the record type declared its
    /// defaults rather than from the values being filled in.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ErrorKind::NestedDefault | ErrorKind::UnsupportedDefault { .. }
        )
    }
}

/// Error returned by default application, with the record and field it
/// occurred in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsError {
    /// Name of the record type that declares the failing field.
    pub record: String,
    pub field: Option<String>,
    /// Fields of the enclosing records, outermost first.
    pub parents: Vec<String>,
    pub kind: ErrorKind,
}

impl fmt::Display for DefaultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error applying defaults to {}", self.record)?;

        if let Some(ref field) = self.field {
            write!(f, " field '{field}'")?;
        }

        if !self.parents.is_empty() {
            write!(f, " (at '{}')", self.path())?;
        }

        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for DefaultsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl DefaultsError {
    fn at(record: impl Into<String>, field: Option<String>, kind: ErrorKind) -> Self {
        Self {
            record: record.into(),
            field,
            parents: Vec::new(),
            kind,
        }
    }

    pub fn parse(record: impl Into<String>, field: impl Into<String>, source: ConversionError) -> Self {
        Self::at(record, Some(field.into()), ErrorKind::Parse(source))
    }

    pub fn nested_default(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::at(record, Some(field.into()), ErrorKind::NestedDefault)
    }

    pub fn unsupported_default(record: impl Into<String>, field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::at(
            record,
            Some(field.into()),
            ErrorKind::UnsupportedDefault { type_name: type_name.into() },
        )
    }

    pub fn not_settable(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::at(record, Some(field.into()), ErrorKind::NotSettable)
    }

    pub fn unsupported_kind(
        record: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::at(
            record,
            Some(field.into()),
            ErrorKind::UnsupportedKind { expected: expected.into(), found: found.into() },
        )
    }

    /// Error for a custom defaults hook to return.
    pub fn custom(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(record, None, ErrorKind::Custom(message.into()))
    }

    /// Record the field of an enclosing record that led to this error.
    pub fn nested_in(mut self, field: impl Into<String>) -> Self {
        self.parents.insert(0, field.into());
        self
    }

    /// Dotted path from the outermost record to the failing field.
    pub fn path(&self) -> String {
        self.parents
            .iter()
            .map(String::as_str)
            .chain(self.field.as_deref())
            .collect::<Vec<_>>()
            .join(".")
    }
}
