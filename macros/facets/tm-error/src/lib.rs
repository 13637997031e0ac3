//
// Copyright 2025 Tabs Data Inc.
//

extern crate proc_macro;
use crate::tf_error::tf_error_impl;
use proc_macro::TokenStream;

mod tf_error;

/// Macro that generates required impls for a tabfetch error enum.
///
/// The annotated crate must depend on `tf-error`, `thiserror` and `strum` (with `derive`).
#[proc_macro_attribute]
pub fn tf_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    tf_error_impl(item)
}
