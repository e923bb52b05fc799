//! Conversion registry: parses textual defaults into primitive fields.
//!
//! Every supported primitive kind has one entry. A conversion only writes
//! when the field still holds its kind's zero value.

use std::fmt;
use std::str::FromStr;

use num_complex::{Complex32, Complex64};

use crate::error::ConversionError;

/// Primitive kinds that can carry a default tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Complex32,
    Complex64,
    String,
}

impl Kind {
    pub const ALL: [Kind; 16] = [
        Kind::Bool,
        Kind::I8,
        Kind::I16,
        Kind::I32,
        Kind::I64,
        Kind::Isize,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::Usize,
        Kind::F32,
        Kind::F64,
        Kind::Complex32,
        Kind::Complex64,
        Kind::String,
    ];

    /// Rust type name of the kind, as written in a field declaration.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Complex32 => "Complex32",
            Kind::Complex64 => "Complex64",
            Kind::String => "String",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable access to a primitive field, tagged by kind.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Complex32(&'a mut Complex32),
    Complex64(&'a mut Complex64),
    String(&'a mut String),
}

impl ScalarMut<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ScalarMut::Bool(_) => Kind::Bool,
            ScalarMut::I8(_) => Kind::I8,
            ScalarMut::I16(_) => Kind::I16,
            ScalarMut::I32(_) => Kind::I32,
            ScalarMut::I64(_) => Kind::I64,
            ScalarMut::Isize(_) => Kind::Isize,
            ScalarMut::U8(_) => Kind::U8,
            ScalarMut::U16(_) => Kind::U16,
            ScalarMut::U32(_) => Kind::U32,
            ScalarMut::U64(_) => Kind::U64,
            ScalarMut::Usize(_) => Kind::Usize,
            ScalarMut::F32(_) => Kind::F32,
            ScalarMut::F64(_) => Kind::F64,
            ScalarMut::Complex32(_) => Kind::Complex32,
            ScalarMut::Complex64(_) => Kind::Complex64,
            ScalarMut::String(_) => Kind::String,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The field was zero and now holds the parsed default.
    Applied,
    /// The field already held a value and was left untouched.
    Kept,
}

/// A registry entry.
pub type ConversionFn = fn(ScalarMut<'_>, &str) -> Result<Conversion, ConversionError>;

/// A primitive type that can be filled from a default tag.
///
/// The zero value of every scalar is its `Default` value.
pub trait Scalar: Default + PartialEq + Sized {
    const KIND: Kind;

    fn parse_default(text: &str) -> Result<Self, String>;

    fn scalar_mut(&mut self) -> ScalarMut<'_>;
}

fn parse_from_str<T>(text: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse::<T>().map_err(|err| err.to_string())
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident, $parse:expr) => {
        impl Scalar for $ty {
            const KIND: Kind = Kind::$variant;

            fn parse_default(text: &str) -> Result<Self, String> {
                $parse(text)
            }

            fn scalar_mut(&mut self) -> ScalarMut<'_> {
                ScalarMut::$variant(self)
            }
        }

        impl<'a> From<&'a mut $ty> for ScalarMut<'a> {
            fn from(value: &'a mut $ty) -> Self {
                ScalarMut::$variant(value)
            }
        }
    };
}

impl_scalar!(bool, Bool, parse_bool);
impl_scalar!(i8, I8, parse_from_str::<i8>);
impl_scalar!(i16, I16, parse_from_str::<i16>);
impl_scalar!(i32, I32, parse_from_str::<i32>);
impl_scalar!(i64, I64, parse_from_str::<i64>);
impl_scalar!(isize, Isize, parse_from_str::<isize>);
impl_scalar!(u8, U8, parse_from_str::<u8>);
impl_scalar!(u16, U16, parse_from_str::<u16>);
impl_scalar!(u32, U32, parse_from_str::<u32>);
impl_scalar!(u64, U64, parse_from_str::<u64>);
impl_scalar!(usize, Usize, parse_from_str::<usize>);
impl_scalar!(f32, F32, parse_from_str::<f32>);
impl_scalar!(f64, F64, parse_from_str::<f64>);
impl_scalar!(Complex32, Complex32, parse_complex::<f32>);
impl_scalar!(Complex64, Complex64, parse_complex::<f64>);
impl_scalar!(String, String, parse_text);

fn parse_text(text: &str) -> Result<String, String> {
    Ok(text.to_string())
}

fn parse_bool(text: &str) -> Result<bool, String> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

fn parse_complex<T>(text: &str) -> Result<num_complex::Complex<T>, String>
where
    num_complex::Complex<T>: FromStr,
    <num_complex::Complex<T> as FromStr>::Err: fmt::Display,
{
    let inner = text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(text);
    parse_from_str(inner)
}

fn fill<T: Scalar>(slot: &mut T, default: &str) -> Result<Conversion, ConversionError> {
    if *slot != T::default() {
        return Ok(Conversion::Kept);
    }
    *slot = T::parse_default(default)
        .map_err(|reason| ConversionError::new(T::KIND, default, reason))?;
    Ok(Conversion::Applied)
}

/// Write `default` into `slot` if the slot still holds its zero value.
pub fn convert(slot: ScalarMut<'_>, default: &str) -> Result<Conversion, ConversionError> {
    match slot {
        ScalarMut::Bool(v) => fill(v, default),
        ScalarMut::I8(v) => fill(v, default),
        ScalarMut::I16(v) => fill(v, default),
        ScalarMut::I32(v) => fill(v, default),
        ScalarMut::I64(v) => fill(v, default),
        ScalarMut::Isize(v) => fill(v, default),
        ScalarMut::U8(v) => fill(v, default),
        ScalarMut::U16(v) => fill(v, default),
        ScalarMut::U32(v) => fill(v, default),
        ScalarMut::U64(v) => fill(v, default),
        ScalarMut::Usize(v) => fill(v, default),
        ScalarMut::F32(v) => fill(v, default),
        ScalarMut::F64(v) => fill(v, default),
        ScalarMut::Complex32(v) => fill(v, default),
        ScalarMut::Complex64(v) => fill(v, default),
        ScalarMut::String(v) => fill(v, default),
    }
}

/// Look up the conversion registered for `kind`.
///
/// The returned function rejects slots of any other kind.
pub fn conversion_for(kind: Kind) -> ConversionFn {
    fn typed<T: Scalar>(slot: ScalarMut<'_>, default: &str) -> Result<Conversion, ConversionError> {
        if slot.kind() != T::KIND {
            return Err(ConversionError::new(
                T::KIND,
                default,
                format!("field holds {}", slot.kind()),
            ));
        }
        convert(slot, default)
    }

    match kind {
        Kind::Bool => typed::<bool>,
        Kind::I8 => typed::<i8>,
        Kind::I16 => typed::<i16>,
        Kind::I32 => typed::<i32>,
        Kind::I64 => typed::<i64>,
        Kind::Isize => typed::<isize>,
        Kind::U8 => typed::<u8>,
        Kind::U16 => typed::<u16>,
        Kind::U32 => typed::<u32>,
        Kind::U64 => typed::<u64>,
        Kind::Usize => typed::<usize>,
        Kind::F32 => typed::<f32>,
        Kind::F64 => typed::<f64>,
        Kind::Complex32 => typed::<Complex32>,
        Kind::Complex64 => typed::<Complex64>,
        Kind::String => typed::<String>,
    }
}

/// Parse `default` as `kind` without writing it anywhere.
pub fn check(kind: Kind, default: &str) -> Result<(), ConversionError> {
    fn parses<T: Scalar>(default: &str) -> Result<(), ConversionError> {
        T::parse_default(default)
            .map(drop)
            .map_err(|reason| ConversionError::new(T::KIND, default, reason))
    }

    match kind {
        Kind::Bool => parses::<bool>(default),
        Kind::I8 => parses::<i8>(default),
        Kind::I16 => parses::<i16>(default),
        Kind::I32 => parses::<i32>(default),
        Kind::I64 => parses::<i64>(default),
        Kind::Isize => parses::<isize>(default),
        Kind::U8 => parses::<u8>(default),
        Kind::U16 => parses::<u16>(default),
        Kind::U32 => parses::<u32>(default),
        Kind::U64 => parses::<u64>(default),
        Kind::Usize => parses::<usize>(default),
        Kind::F32 => parses::<f32>(default),
        Kind::F64 => parses::<f64>(default),
        Kind::Complex32 => parses::<Complex32>(default),
        Kind::Complex64 => parses::<Complex64>(default),
        Kind::String => parses::<String>(default),
    }
}
