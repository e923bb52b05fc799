//! Fill zero-valued struct fields from declarative default tags.
//!
//! A record declares its defaults where its fields are defined:
//!
//! ```
//! use zerofill::Defaults;
//!
//! #[derive(Debug, Default, Defaults)]
//! struct Server {
//!     #[zerofill(default = "127.0.0.1")]
//!     host: String,
//!     #[zerofill(default = 8080)]
//!     port: u16,
//!     tls: Option<Tls>,
//! }
//!
//! #[derive(Debug, Default, Defaults)]
//! struct Tls {
//!     #[zerofill(default = true)]
//!     verify: bool,
//! }
//!
//! let mut server = Server { port: 9000, ..Server::default() };
//! zerofill::apply_defaults(&mut server).unwrap();
//!
//! assert_eq!(server.host, "127.0.0.1");
//! assert_eq!(server.port, 9000);
//! assert!(server.tls.unwrap().verify);
//! ```
//!
//! Only fields still holding their zero value (`0`, `false`, `""`, `0+0i`)
//! are written. Nested records are always visited; an absent
//! `Option<Record>` is created with `Default` first.

pub mod apply;
pub mod convert;
pub mod descriptor;
pub mod error;

pub use apply::{
    apply_custom, apply_defaults, apply_fields, check_defaults, validate_fields, ApplyDefaults,
    CustomDefaults, Record,
};
pub use convert::{check, conversion_for, convert, Conversion, ConversionFn, Kind, Scalar, ScalarMut};
pub use descriptor::{FieldDescriptor, FieldKind, FieldMut, NestedSlot};
pub use error::{ConversionError, DefaultsError, ErrorKind};
pub use num_complex::{Complex32, Complex64};

#[cfg(feature = "derive")]
pub use zerofill_derive::Defaults;
