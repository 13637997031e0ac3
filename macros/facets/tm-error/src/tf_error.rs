//
// Copyright 2025 Tabs Data Inc.
//

extern crate proc_macro;

use proc_macro::TokenStream;

use quote::{format_ident, quote};
use syn::{ItemEnum, parse_macro_input};

pub fn tf_error_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ItemEnum);

    let name = &input.ident;

    let discriminant_enum = format_ident!("{}Discriminants", name);

    let expanded = quote! {

        #[repr(u16)]
        #[derive(Debug, thiserror::Error, strum::EnumDiscriminants)]
        #input

        impl #name {
            fn variant_index(&self) -> u16 {
                let discriminant: #discriminant_enum = self.into();
                discriminant as u16
            }
        }

        impl tf_error::TfDomainError for #name {
            fn domain(&self) -> &str {
                stringify!(#name)
            }

            fn code(&self) -> String {
                format!("{}::{:04}", self.domain(), self.variant_index())
            }

            fn class(&self) -> tf_error::ErrorClass {
                tf_error::ErrorClass::from(self.variant_index())
            }
        }

        impl From<#name> for tf_error::TfError {
            fn from(error: #name) -> Self {
                Self::new(error)
            }
        }
    };
    expanded.into()
}
