// implement the ToNetworkOrder/FromNetworkOrder traits field by field
use proc_macro::TokenStream;
use quote::quote;
use syn::visit::{self, Visit};
use syn::{Data, DataStruct, DeriveInput, Lifetime};

// structure used with the visit methods: remembers whether the type carries a lifetime
#[derive(Default)]
struct LifetimeVisitor {
    has_lifetime: bool,
}

impl<'ast> Visit<'ast> for LifetimeVisitor {
    fn visit_lifetime(&mut self, node: &'ast Lifetime) {
        self.has_lifetime = true;
        visit::visit_lifetime(self, node);
    }
}

// helper function to check whether the structure being derived owns a lifetime
fn has_lifetime(derive_input: &DeriveInput) -> bool {
    let mut visitor = LifetimeVisitor::default();
    visitor.visit_derive_input(derive_input);

    visitor.has_lifetime
}

// verify the derive macro is applied to a structure
fn get_struct(ast: &DeriveInput) -> &DataStruct {
    if let Data::Struct(struct_token) = &ast.data {
        struct_token
    } else {
        panic!("<{}> is not a struct!", ast.ident);
    }
}

// create the impl blocks for the ToNetworkOrder and FromNetworkOrder traits
pub fn dns_struct(ast: &DeriveInput) -> TokenStream {
    let lifetime = has_lifetime(ast);

    // get struct data or panic
    let struct_token = get_struct(ast);

    // save structure name because we're gonna use it soon
    let structure_name = &ast.ident;

    // to_network_bytes() call for each field
    let to_method_calls = struct_token.fields.iter().map(|f| {
        let field_name = f.ident.as_ref().unwrap();

        quote! {
            length += ToNetworkOrder::to_network_bytes(&self.#field_name, buffer)?;
        }
    });

    // from_network_bytes() call for each field
    let from_method_calls = struct_token.fields.iter().map(|f| {
        let field_name = f.ident.as_ref().unwrap();

        quote! {
            FromNetworkOrder::from_network_bytes(&mut self.#field_name, buffer)?;
        }
    });

    // the decode impl is always generic over the buffer lifetime; the struct
    // itself only mentions it when it borrows from the buffer
    let new_code = if lifetime {
        quote! {
            // the generated impl.
            impl<'a> ToNetworkOrder for #structure_name<'a> {
                fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
                    let mut length = 0usize;
                    #( #to_method_calls)*
                    Ok(length)
                }
            }

            impl<'a> FromNetworkOrder<'a> for #structure_name<'a> {
                fn from_network_bytes(&mut self, buffer: &mut std::io::Cursor<&'a [u8]>) -> DNSResult<()> {
                    #( #from_method_calls)*
                    Ok(())
                }
            }
        }
    } else {
        quote! {
            // the generated impl.
            impl ToNetworkOrder for #structure_name {
                fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
                    let mut length = 0usize;
                    #( #to_method_calls)*
                    Ok(length)
                }
            }

            impl<'a> FromNetworkOrder<'a> for #structure_name {
                fn from_network_bytes(&mut self, buffer: &mut std::io::Cursor<&'a [u8]>) -> DNSResult<()> {
                    #( #from_method_calls)*
                    Ok(())
                }
            }
        }
    };

    // Hand the output tokens back to the compiler
    TokenStream::from(new_code)
}
