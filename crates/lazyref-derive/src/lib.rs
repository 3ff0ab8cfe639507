use proc_macro::TokenStream;

mod field_values;

#[proc_macro_derive(FieldValues)]
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    field_values::derive_field_values(input.into()).into()
}
