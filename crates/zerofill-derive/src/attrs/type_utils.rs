//! Type analysis utilities for field types.

use syn::{GenericArgument, PathArguments, Type, TypePath};

use super::types::FieldClass;

const SCALAR_TYPES: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
    "String", "Complex32", "Complex64",
];

const COLLECTION_TYPES: &[&str] = &[
    "Vec", "VecDeque", "LinkedList", "HashMap", "BTreeMap", "HashSet", "BTreeSet", "BinaryHeap",
];

/// Standard library value types that are never records.
const LEAF_TYPES: &[&str] = &[
    "char", "i128", "u128", "Duration", "Instant", "SystemTime", "PathBuf", "Path", "OsString",
    "SocketAddr", "SocketAddrV4", "SocketAddrV6", "IpAddr", "Ipv4Addr", "Ipv6Addr",
];

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

/// Check if a type is one of the primitive kinds the runtime can convert.
///
/// `Complex<f32>` and `Complex<f64>` count as scalars alongside the aliases.
pub fn is_scalar_type(ty: &Type) -> bool {
    let Some(segment) = last_segment(ty) else {
        return false;
    };
    let name = segment.ident.to_string();
    if segment.arguments.is_empty() {
        return SCALAR_TYPES.contains(&name.as_str());
    }
    if name == "Complex" {
        return extract_inner_type(ty)
            .and_then(last_segment)
            .map(|inner| inner.ident == "f32" || inner.ident == "f64")
            .unwrap_or(false);
    }
    false
}

/// Check if a type is `Option<T>`.
pub fn is_option_type(ty: &Type) -> bool {
    last_segment(ty)
        .map(|s| s.ident == "Option")
        .unwrap_or(false)
}

/// Check if a type is a standard collection.
pub fn is_collection_type(ty: &Type) -> bool {
    last_segment(ty)
        .map(|s| COLLECTION_TYPES.contains(&s.ident.to_string().as_str()))
        .unwrap_or(false)
}

/// Check if a type is a standard library leaf value such as `Duration`.
pub fn is_leaf_type(ty: &Type) -> bool {
    last_segment(ty)
        .map(|s| s.arguments.is_empty() && LEAF_TYPES.contains(&s.ident.to_string().as_str()))
        .unwrap_or(false)
}

/// Extract the first type argument, e.g. `T` from `Option<T>`.
pub fn extract_inner_type(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}

/// Classify a field by the syntax of its type.
///
/// Any path type that is not a scalar, `Option`, collection or std leaf value
/// is taken to be a nested record; `Box<T>` included.
pub fn classify_type(ty: &Type) -> FieldClass {
    if is_scalar_type(ty) {
        return FieldClass::Scalar;
    }
    if is_option_type(ty) {
        return match extract_inner_type(ty) {
            Some(inner) if is_record_like(inner) => FieldClass::OptionalNested,
            _ => FieldClass::Opaque,
        };
    }
    if is_record_like(ty) {
        FieldClass::Nested
    } else {
        FieldClass::Opaque
    }
}

fn is_record_like(ty: &Type) -> bool {
    if last_segment(ty).is_none()
        || is_scalar_type(ty)
        || is_option_type(ty)
        || is_collection_type(ty)
        || is_leaf_type(ty)
    {
        return false;
    }
    if let Some(segment) = last_segment(ty) {
        if segment.ident == "Box" {
            return extract_inner_type(ty).map(is_record_like).unwrap_or(false);
        }
    }
    true
}

/// Render a type the way it was written, for descriptors and messages.
pub fn type_name(ty: &Type) -> String {
    let spaced = quote::quote!(#ty).to_string();
    let chars: Vec<char> = spaced.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut name = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            if !(prev.is_some_and(is_word) && next.is_some_and(is_word)) {
                continue;
            }
        }
        name.push(c);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn class(ty: Type) -> FieldClass {
        classify_type(&ty)
    }

    #[test]
    fn primitives_and_complex_are_scalars() {
        assert_eq!(class(parse_quote!(bool)), FieldClass::Scalar);
        assert_eq!(class(parse_quote!(usize)), FieldClass::Scalar);
        assert_eq!(class(parse_quote!(std::string::String)), FieldClass::Scalar);
        assert_eq!(class(parse_quote!(zerofill::Complex64)), FieldClass::Scalar);
        assert_eq!(class(parse_quote!(num_complex::Complex<f32>)), FieldClass::Scalar);
    }

    #[test]
    fn options_of_records_are_optional_nested() {
        assert_eq!(class(parse_quote!(Option<Inner>)), FieldClass::OptionalNested);
        assert_eq!(class(parse_quote!(Option<Box<Inner>>)), FieldClass::OptionalNested);
        assert_eq!(class(parse_quote!(Option<u32>)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(Option<Vec<Inner>>)), FieldClass::Opaque);
    }

    #[test]
    fn records_and_boxes_are_nested() {
        assert_eq!(class(parse_quote!(Inner)), FieldClass::Nested);
        assert_eq!(class(parse_quote!(crate::config::Inner<T>)), FieldClass::Nested);
        assert_eq!(class(parse_quote!(Box<Inner>)), FieldClass::Nested);
        assert_eq!(class(parse_quote!(Box<u8>)), FieldClass::Opaque);
    }

    #[test]
    fn collections_and_compound_types_are_opaque() {
        assert_eq!(class(parse_quote!(Vec<String>)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(HashMap<String, Inner>)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!((u8, u8))), FieldClass::Opaque);
        assert_eq!(class(parse_quote!([u8; 4])), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(&'static str)), FieldClass::Opaque);
    }

    #[test]
    fn std_leaf_types_are_opaque() {
        assert_eq!(class(parse_quote!(Duration)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(std::time::Duration)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(PathBuf)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(std::net::SocketAddr)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(char)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(i128)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(Option<IpAddr>)), FieldClass::Opaque);
        assert_eq!(class(parse_quote!(Box<Duration>)), FieldClass::Opaque);
    }

    #[test]
    fn type_name_drops_token_spacing() {
        let ty: Type = parse_quote!(Vec<(String, u8)>);
        assert_eq!(type_name(&ty), "Vec<(String,u8)>");

        let ty: Type = parse_quote!(&'static str);
        assert_eq!(type_name(&ty), "&'static str");
    }
}
