pub struct TraitInfo<'t> {
    pub methods: Vec<&'t syn::TraitItemFn>,
}

impl<'t> TraitInfo<'t> {
    pub fn analyze(input_trait: &'t syn::ItemTrait) -> syn::Result<Self> {
        if let Some(param) = input_trait.generics.type_params().next() {
            return Err(syn::Error::new(
                param.ident.span(),
                "Generic traits are not supported",
            ));
        }

        // Associated functions without a receiver are constructors, not members
        let methods = input_trait
            .items
            .iter()
            .filter_map(|item| match item {
                syn::TraitItem::Fn(method) if method.sig.receiver().is_some() => Some(method),
                _ => None,
            })
            .collect();

        Ok(Self { methods })
    }

    pub fn method_names(&self) -> Vec<syn::LitStr> {
        self.methods
            .iter()
            .map(|method| {
                let ident = &method.sig.ident;
                syn::LitStr::new(&ident.to_string(), ident.span())
            })
            .collect()
    }
}
