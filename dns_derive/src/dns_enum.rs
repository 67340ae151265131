// Create enum implementations for Default, numeric conversion, FromStr and
// Display for DNS code enums, which are always of the same category.
//
// An enum made only of unit variants gets TryFrom<u16>, failing on codes the
// enum doesn't list. An enum whose last variant is a single-field tuple (the
// wildcard, e.g. `Unknown(u16)`) gets a total From<u16> instead: codes the
// enum doesn't list are kept numerically in the wildcard so a packet carrying
// them still decodes and re-encodes bit-for-bit.
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput};

// Verify the derive macro is applied to a suitable enum and collect
// (variant name, discriminant) pairs plus the optional wildcard variant.
//
// This function panics in these cases:
//  enum Foo { A, B = 2 } : a unit variant has no discriminant
//  enum Foo { A = 2*3 } : a discriminant is not an integer literal
//  enum Foo { A = 1, U(u16), V(u16) } : more than one wildcard variant
//  enum Foo { A(u8, u8) } : a variant is neither unit nor single-field tuple
fn get_enum_data(ast: &DeriveInput) -> (Vec<(String, String)>, Option<String>) {
    // check first this is an enum
    if let Data::Enum(enum_token) = &ast.data {
        let mut variant_data = Vec::new();
        let mut wildcard: Option<String> = None;

        for v in &enum_token.variants {
            match &v.fields {
                syn::Fields::Unit => {
                    // every unit variant carries its wire code as discriminant
                    if v.discriminant.is_none() {
                        panic!("variant {} for enum {} has no value!", v.ident, ast.ident);
                    }

                    let discriminant = v.discriminant.as_ref().unwrap();
                    if let syn::Expr::Lit(expr_lit) = &discriminant.1 {
                        if let syn::Lit::Int(e) = &expr_lit.lit {
                            variant_data.push((v.ident.to_string(), e.base10_digits().to_string()));
                        } else {
                            panic!(
                                "variant {} is not an integer literal for enum {}",
                                v.ident, ast.ident
                            );
                        }
                    } else {
                        panic!("not ExprLit for enum {} and variant {}!", ast.ident, v.ident);
                    }
                }
                syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                    // the wildcard carrying codes the enum doesn't list
                    if wildcard.is_some() {
                        panic!("enum {} has more than one wildcard variant!", ast.ident);
                    }
                    wildcard = Some(v.ident.to_string());
                }
                _ => panic!(
                    "variant {} for enum {} is neither a unit variant nor a single-field wildcard!",
                    v.ident, ast.ident
                ),
            }
        }

        if variant_data.is_empty() {
            panic!("enum {} has no unit variant to use as default!", ast.ident);
        }

        (variant_data, wildcard)
    } else {
        panic!("<{}> is not an enum!", ast.ident);
    }
}

// create code for implementation of Default, From/TryFrom<u16>, code(), FromStr, Display
pub fn dns_enum(ast: &DeriveInput) -> TokenStream {
    // get enum data or panic
    let (variant_data, wildcard) = get_enum_data(ast);

    // grab enum name as an ident and as a string
    let enum_name = &ast.ident;
    let enum_name_s = enum_name.to_string();

    let default_variant = format_ident!("{}", variant_data[0].0);

    let from_arms = variant_data.iter().map(|v| {
        let value = v.1.parse::<u16>().unwrap();
        let variant = format_ident!("{}", v.0);

        quote! {
            #value => #enum_name::#variant,
        }
    });

    let try_from_arms = variant_data.iter().map(|v| {
        let value = v.1.parse::<u16>().unwrap();
        let variant = format_ident!("{}", v.0);

        quote! {
            #value => Ok(#enum_name::#variant),
        }
    });

    let code_arms = variant_data.iter().map(|v| {
        let value = v.1.parse::<u16>().unwrap();
        let variant = format_ident!("{}", v.0);

        quote! {
            #enum_name::#variant => #value,
        }
    });

    let from_str_arms = variant_data.iter().map(|v| {
        let value = &v.0;
        let variant = format_ident!("{}", &v.0);

        quote! {
            #value => Ok(#enum_name::#variant),
        }
    });

    let display_arms = variant_data.iter().map(|v| {
        let value = &v.0;
        let variant = format_ident!("{}", &v.0);

        quote! {
            #enum_name::#variant => write!(f, "{}", #value),
        }
    });

    // numeric conversion: total with a wildcard, fallible without
    let conversion = if let Some(w) = &wildcard {
        let w = format_ident!("{}", w);

        quote! {
            // impl From<u16>
            impl std::convert::From<u16> for #enum_name {
                fn from(value: u16) -> Self {
                    match value {
                        #(#from_arms)*
                        _ => #enum_name::#w(value),
                    }
                }
            }
        }
    } else {
        quote! {
            // impl TryFrom<u16>
            impl std::convert::TryFrom<u16> for #enum_name {
                type Error = String;

                fn try_from(value: u16) -> Result<Self, Self::Error> {
                    match value {
                        #(#try_from_arms)*
                        _ => Err(format!("error converting u16 value <{}> to enum type {}", value, #enum_name_s)),
                    }
                }
            }
        }
    };

    let wildcard_code_arm = wildcard.as_ref().map(|w| {
        let w = format_ident!("{}", w);
        quote! { #enum_name::#w(value) => *value, }
    });

    let wildcard_display_arm = wildcard.as_ref().map(|w| {
        let w = format_ident!("{}", w);
        quote! { #enum_name::#w(value) => write!(f, "{}", value), }
    });

    // now create code for implementation of the standard traits
    let impls = quote! {
        // impl Default
        impl Default for #enum_name {
            fn default() -> Self {
                #enum_name::#default_variant
            }
        }

        #conversion

        // the numeric wire code of the value
        impl #enum_name {
            pub fn code(&self) -> u16 {
                match self {
                    #(#code_arms)*
                    #wildcard_code_arm
                }
            }
        }

        // impl FromStr
        impl std::str::FromStr for #enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    #(#from_str_arms)*
                    _ => Err(format!("error converting string '{}' to enum type {}", s, #enum_name_s)),
                }
            }
        }

        // impl Display
        impl std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    #(#display_arms)*
                    #wildcard_display_arm
                }
            }
        }
    };

    // Hand the output tokens back to the compiler
    TokenStream::from(impls)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::get_derive_input;

    const E1: &str = "enum Foo { A, B = 2, C = 3 }";
    const E2: &str = "enum Foo { A = 2*3, B = 1 }";
    const E3: &str = "enum Foo { A = 1, U(u16), V(u16) }";
    const E4: &str = "enum Foo { A(u8, u8), B = 1 }";
    const E5: &str = "enum Foo { A = 1, B = 2, Unknown(u16) }";
    const S1: &str = "struct Point { x : f64 , y : u8 , z : u32 }";

    #[test]
    #[should_panic]
    fn not_an_enum() {
        let input = get_derive_input(S1);
        let _ = get_enum_data(&input);
    }

    #[test]
    #[should_panic]
    fn missing_discriminant() {
        let input = get_derive_input(E1);
        let _ = get_enum_data(&input);
    }

    #[test]
    #[should_panic]
    fn not_all_literal_discriminants() {
        let input = get_derive_input(E2);
        let _ = get_enum_data(&input);
    }

    #[test]
    #[should_panic]
    fn more_than_one_wildcard() {
        let input = get_derive_input(E3);
        let _ = get_enum_data(&input);
    }

    #[test]
    #[should_panic]
    fn not_a_unit_or_wildcard_variant() {
        let input = get_derive_input(E4);
        let _ = get_enum_data(&input);
    }

    #[test]
    fn variant_data() {
        let input = get_derive_input(E5);
        let (v, wildcard) = get_enum_data(&input);

        assert_eq!(
            v,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(wildcard, Some("Unknown".to_string()));
    }
}
