use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields};

// derive_field_values
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            &named.named
        } else {
            let err = Error::new_spanned(
                &data.fields,
                "FieldValues can only be derived for structs with named fields",
            );
            return err.to_compile_error();
        }
    } else {
        let err = Error::new_spanned(
            &input.ident,
            "FieldValues can only be derived for structs with named fields",
        );
        return err.to_compile_error();
    };

    let field_names = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        field_ident.to_string()
    });

    let get_arms = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();

        // Option and Vec fields go through the blanket FieldValue impls,
        // so every cardinality takes the same path here.
        quote! {
            #field_name => Some(
                ::lazyref::traits::FieldValue::to_value(&self.#field_ident)
            ),
        }
    });

    let set_arms = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();
        let field_ty = &field.ty;

        quote! {
            #field_name => {
                match <#field_ty as ::lazyref::traits::FieldValue>::from_value(value) {
                    Some(next) => {
                        self.#field_ident = next;
                        Ok(())
                    }
                    None => Err(::lazyref::error::FieldError::incompatible(field, value)),
                }
            }
        }
    });

    quote! {
        impl #impl_generics ::lazyref::traits::FieldValues for #ident #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#field_names),*];

            fn get_value(&self, field: &str) -> Option<::lazyref::value::Value> {
                match field {
                    #(#get_arms)*
                    _ => None,
                }
            }

            fn try_set_value(
                &mut self,
                field: &str,
                value: &::lazyref::value::Value,
            ) -> Result<(), ::lazyref::error::FieldError> {
                match field {
                    #(#set_arms)*
                    _ => Err(::lazyref::error::FieldError::unknown(field)),
                }
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_enums() {
        let out = derive_field_values(quote! {
            enum Shape {
                Circle,
            }
        })
        .to_string();

        assert!(out.contains("compile_error"));
        assert!(out.contains("structs with named fields"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let out = derive_field_values(quote! {
            struct Wrapper(u64);
        })
        .to_string();

        assert!(out.contains("compile_error"));
    }

    #[test]
    fn emits_an_impl_for_named_structs() {
        let out = derive_field_values(quote! {
            struct Goblin {
                id: u64,
                name: String,
            }
        })
        .to_string();

        assert!(out.contains("FieldValues for Goblin"));
        assert!(out.contains("\"id\""));
        assert!(out.contains("\"name\""));
    }
}
