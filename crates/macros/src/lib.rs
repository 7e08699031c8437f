/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Fields, ItemEnum, ItemStruct};

/// Turns a plain enum into an error type whose `Display` is the variant name in
/// SCREAMING_SNAKE_CASE, so `RidesNotFoundError` displays as `RIDES_NOT_FOUND_ERROR`.
///
/// The expansion derives `Debug`, `Serialize` and `thiserror::Error`, so the calling
/// crate needs `serde::Serialize` in scope and `thiserror` as a dependency.
#[proc_macro_attribute]
pub fn add_error(_: TokenStream, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ItemEnum);
    let enum_name = &input.ident;
    let visibility = &input.vis;
    let attrs = &input.attrs;

    let variants = input.variants.iter().map(|variant| {
        let variant_attrs = &variant.attrs;
        let error_code = to_screaming_snake_case(&variant.ident.to_string());
        let variant = strip_attrs(variant);
        quote! {
            #(#variant_attrs)*
            #[error(#error_code)]
            #variant,
        }
    });

    let expanded = quote! {
        #(#attrs)*
        #[derive(Debug, Serialize, thiserror::Error)]
        #visibility enum #enum_name {
            #(#variants)*
        }
    };

    TokenStream::from(expanded)
}

/// Adds an `inner` accessor to a single-field tuple struct such as `RideId(pub i64)`.
#[proc_macro_attribute]
pub fn impl_getter(_: TokenStream, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ItemStruct);
    let struct_name = &input.ident;

    let inner_type = match &input.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "impl_getter expects a tuple struct with exactly one field",
            )
            .to_compile_error()
            .into()
        }
    };

    let expanded = quote! {
        #input

        impl #struct_name {
            pub fn inner(self) -> #inner_type {
                self.0
            }
        }
    };

    TokenStream::from(expanded)
}

fn strip_attrs(variant: &syn::Variant) -> syn::Variant {
    let mut variant = variant.clone();
    variant.attrs.clear();
    variant
}

fn to_screaming_snake_case(input: &str) -> String {
    let mut result = String::new();
    let mut last_char_was_upper = false;

    for c in input.chars() {
        if c.is_uppercase() {
            if !last_char_was_upper && !result.is_empty() {
                result.push('_');
            }
            last_char_was_upper = true;
        } else {
            last_char_was_upper = false;
        }
        result.push(c.to_ascii_uppercase());
    }

    result
}
