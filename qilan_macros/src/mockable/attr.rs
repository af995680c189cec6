/// Parsed mockable attribute
pub struct Attr {
    /// Qilan's prefix, e.g. `::qilan`
    pub prefix: syn::Path,
    /// Parent traits, which must be `#[mockable]` too
    pub extends: Vec<syn::Path>,
    /// Overrides the trait name used in failure messages
    pub name: Option<syn::LitStr>,
}

impl syn::parse::Parse for Attr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut prefix: Option<syn::Path> = None;
        let mut extends = vec![];
        let mut name = None;

        while !input.is_empty() {
            let keyword: syn::Ident = input.parse()?;
            let _: syn::token::Eq = input.parse()?;
            match keyword.to_string().as_str() {
                "prefix" => {
                    prefix = Some(input.parse()?);
                }
                "extends" => {
                    let content;
                    let _ = syn::bracketed!(content in input);
                    let parents = content
                        .parse_terminated(syn::Path::parse_mod_style, syn::token::Comma)?;
                    extends.extend(parents);
                }
                "name" => {
                    name = Some(input.parse()?);
                }
                _ => return Err(syn::Error::new(keyword.span(), "Unrecognized keyword")),
            };

            if input.peek(syn::token::Comma) {
                let _: syn::token::Comma = input.parse()?;
            } else {
                break;
            }
        }

        if !input.is_empty() {
            return Err(input.error("Expected `,`"));
        }

        Ok(Self {
            prefix: prefix.unwrap_or_else(|| syn::parse_quote! { ::qilan }),
            extends,
            name,
        })
    }
}
