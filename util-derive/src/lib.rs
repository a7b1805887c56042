use proc_macro::TokenStream;
use quote::quote;

/// Derives `util::Mnemonic` plus a matching `FromStr`.
///
/// Both directions go through one static name table, indexed by
/// discriminant: `mnemonic()` looks its variant up by position, `from_str`
/// scans the table and maps the position back to the variant. Names are
/// the lowercased variant identifiers, which is exactly the source form
/// the assembler deals in.
#[proc_macro_derive(Mnemonic)]
pub fn mnemonic_derive(input: TokenStream) -> TokenStream {
    let input: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &input.ident;

    let variants: Vec<&syn::Ident> = match &input.data {
        syn::Data::Enum(item) => item
            .variants
            .iter()
            .map(|variant| {
                if !variant.fields.is_empty() {
                    panic!("Mnemonic variants cannot carry fields.");
                }
                &variant.ident
            })
            .collect(),
        _ => panic!("Mnemonic can only be derived for enums."),
    };

    let names: Vec<String> = variants
        .iter()
        .map(|variant| variant.to_string().to_lowercase())
        .collect();

    let expanded = quote! {
        const _: () = {
            const NAMES: &[&str] = &[#(#names),*];
            const VARIANTS: &[#name] = &[#(#name::#variants),*];

            impl Mnemonic for #name {
                fn mnemonic(&self) -> &'static str {
                    NAMES[*self as usize]
                }
            }

            impl ::core::str::FromStr for #name {
                type Err = ::util::UnknownMnemonic;

                fn from_str(s: &str) -> Result<#name, ::util::UnknownMnemonic> {
                    match NAMES.iter().position(|name| *name == s) {
                        Some(index) => Ok(VARIANTS[index]),
                        None => Err(::util::UnknownMnemonic(s.to_string())),
                    }
                }
            }
        };
    };

    expanded.into()
}
