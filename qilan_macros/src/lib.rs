//! The qilan procedural macros.

#![forbid(unsafe_code)]

mod mockable;

extern crate proc_macro;

///
/// The `mockable` attribute.
/// Re-exported by `qilan`, it is documented there.
///
#[proc_macro_attribute]
pub fn mockable(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as mockable::Attr);
    let item_trait = syn::parse_macro_input!(input as syn::ItemTrait);

    let output = match mockable::generate(attr, item_trait) {
        Ok(stream) => stream,
        Err(err) => err.to_compile_error(),
    };

    proc_macro::TokenStream::from(output)
}
