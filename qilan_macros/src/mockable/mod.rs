use quote::quote;

mod attr;
mod trait_info;

pub use attr::Attr;
use trait_info::TraitInfo;

pub fn generate(attr: Attr, item_trait: syn::ItemTrait) -> syn::Result<proc_macro2::TokenStream> {
    let trait_info = TraitInfo::analyze(&item_trait)?;
    let prefix = &attr.prefix;

    let vis = &item_trait.vis;
    let ident = &item_trait.ident;
    let name = attr
        .name
        .clone()
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));
    let methods = trait_info.method_names();
    let parents = &attr.extends;
    let doc = format!("Mockable description of the `{ident}` trait.");

    Ok(quote! {
        #item_trait

        #[doc = #doc]
        #[allow(non_upper_case_globals)]
        #vis const #ident: #prefix::MockableTrait = #prefix::MockableTrait {
            name: #name,
            methods: &[#(#methods),*],
            parents: &[#(&#parents),*],
        };
    })
}
