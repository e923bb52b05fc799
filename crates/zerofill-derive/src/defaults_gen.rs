use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{Data, DeriveInput};

use crate::attrs::{parse_field_attrs, parse_struct_attrs, FieldClass, FieldInfo, StructAttrs};

pub fn generate_defaults_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Defaults supports structs only; enums have no fields to fill",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(&input.ident, "Defaults does not support unions"))
        }
    };

    let struct_attrs = parse_struct_attrs(&input.attrs)?;

    // A custom hook owns the whole record: fields are neither classified
    // nor exposed, only their attributes are checked for syntax.
    if struct_attrs.custom {
        for field in data.fields.iter() {
            parse_field_attrs(field)?;
        }
        return Ok(generate_apply_impl(input, &struct_attrs));
    }

    let fields: Vec<FieldInfo> = data
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| FieldInfo::from_field(field, index, struct_attrs.rename_all))
        .collect::<syn::Result<_>>()?;

    let record_impl = generate_record_impl(input, &struct_attrs, &fields);
    let apply_impl = generate_apply_impl(input, &struct_attrs);

    Ok(quote! {
        #record_impl
        #apply_impl
    })
}

fn generate_record_impl(input: &DeriveInput, attrs: &StructAttrs, fields: &[FieldInfo]) -> TokenStream {
    let krate = attrs.runtime_path();
    let struct_name = &input.ident;
    let name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = fields.iter().map(|field| descriptor_tokens(&krate, field));
    let arms = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let access = &field.access;
            let slot = match field.class {
                FieldClass::Scalar => quote! {
                    #krate::FieldMut::Scalar(#krate::Scalar::scalar_mut(&mut self.#access))
                },
                FieldClass::Nested => quote! { #krate::FieldMut::Nested(&mut self.#access) },
                FieldClass::OptionalNested => quote! { #krate::FieldMut::OptionalNested(&mut self.#access) },
                FieldClass::Opaque => quote! { #krate::FieldMut::Opaque },
            };
            quote! { #index => ::core::option::Option::Some(#slot), }
        });

    quote! {
        impl #impl_generics #krate::Record for #struct_name #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const FIELDS: &'static [#krate::FieldDescriptor] = &[
                #(#descriptors,)*
            ];

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<#krate::FieldMut<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

fn descriptor_tokens(krate: &syn::Path, field: &FieldInfo) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let kind = match field.class {
        // Unsupported scalar types are reported at the field, not the derive.
        FieldClass::Scalar => quote_spanned! {field.span=> #krate::FieldKind::Scalar(<#ty as #krate::Scalar>::KIND) },
        FieldClass::Nested => quote! { #krate::FieldKind::Nested },
        FieldClass::OptionalNested => quote! { #krate::FieldKind::OptionalNested },
        FieldClass::Opaque => {
            let type_name = field.type_name();
            quote! { #krate::FieldKind::Opaque(#type_name) }
        }
    };
    let default = match &field.default {
        Some(tag) => quote! { ::core::option::Option::Some(#tag) },
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        #krate::FieldDescriptor {
            name: #name,
            kind: #kind,
            default: #default,
        }
    }
}

fn generate_apply_impl(input: &DeriveInput, attrs: &StructAttrs) -> TokenStream {
    let krate = attrs.runtime_path();
    let struct_name = &input.ident;
    let name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = if attrs.custom {
        quote! { #krate::apply_custom(self, #name) }
    } else {
        quote! { #krate::apply_fields(self) }
    };

    quote! {
        impl #impl_generics #krate::ApplyDefaults for #struct_name #ty_generics #where_clause {
            fn apply_defaults(&mut self) -> ::core::result::Result<(), #krate::DefaultsError> {
                #body
            }
        }
    }
}
