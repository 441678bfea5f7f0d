use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, Attribute, Field, ItemStruct};

/// Turn a struct of fixed-size little-endian fields into a zero-copy
/// reader/writer.
///
/// Supported field types are `bool`, `u8`, `i8`, `u16`, `i16`, `u32`, `i32`,
/// `u64` and `&[u8]`. A `&[u8]` field needs a `#[bytes(N)]` attribute, where
/// `N == 0` means "the rest of the buffer" and is only allowed on the last
/// field. Fields whose name starts with an underscore are skipped over
/// without generating accessors.
#[proc_macro_attribute]
pub fn frame(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

enum Kind {
    Bool,
    Byte,
    SignedByte,
    Int(usize),
    Bytes(usize),
    Rest,
}

impl Kind {
    fn of(field: &Field) -> syn::Result<Self> {
        let bytes = bytes_attr(&field.attrs)?;

        let kind = match field.ty.to_token_stream().to_string().as_str() {
            "bool" => Kind::Bool,
            "u8" => Kind::Byte,
            "i8" => Kind::SignedByte,
            "u16" | "i16" => Kind::Int(2),
            "u32" | "i32" => Kind::Int(4),
            "u64" => Kind::Int(8),
            "& [u8]" => match bytes {
                Some(0) => Kind::Rest,
                Some(n) => Kind::Bytes(n),
                None => {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "byte slice fields need a #[bytes(N)] attribute",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "unsupported field type",
                ))
            }
        };

        Ok(kind)
    }

    fn size(&self) -> usize {
        match self {
            Kind::Bool | Kind::Byte | Kind::SignedByte => 1,
            Kind::Int(n) | Kind::Bytes(n) => *n,
            Kind::Rest => 0,
        }
    }
}

fn bytes_attr(attrs: &[Attribute]) -> syn::Result<Option<usize>> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("bytes"))
        .map(|attr| attr.parse_args::<syn::LitInt>()?.base10_parse::<usize>())
        .transpose()
}

fn expand(input: ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let item_attr = input.attrs;
    let vis = input.vis;
    let name = input.ident;

    let mut getters = vec![];
    let mut setters = vec![];

    let mut offset = 0usize;
    let field_count = input.fields.len();

    for (i, field) in input.fields.iter().enumerate() {
        let kind = Kind::of(field)?;
        let ty = &field.ty;
        let Some(fnname) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "tuple structs are not supported"));
        };

        if matches!(kind, Kind::Rest) && i + 1 != field_count {
            return Err(syn::Error::new_spanned(
                field,
                "#[bytes(0)] is only allowed on the last field",
            ));
        }

        if fnname.to_string().starts_with('_') {
            offset += kind.size();
            continue;
        }

        let doc: Vec<_> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .collect();
        let setter = format_ident!("set_{}", fnname);

        let (getter_body, setter_body) = match kind {
            Kind::Bool => (
                quote! { self.buffer.as_ref()[#offset] != 0 },
                quote! { self.buffer.as_mut()[#offset] = value as u8; },
            ),
            Kind::Byte => (
                quote! { self.buffer.as_ref()[#offset] },
                quote! { self.buffer.as_mut()[#offset] = value; },
            ),
            Kind::SignedByte => (
                quote! { self.buffer.as_ref()[#offset] as i8 },
                quote! { self.buffer.as_mut()[#offset] = value as u8; },
            ),
            Kind::Int(n) => (
                quote! {
                    let mut raw = [0u8; #n];
                    raw.copy_from_slice(&self.buffer.as_ref()[#offset..][..#n]);
                    #ty::from_le_bytes(raw)
                },
                quote! {
                    self.buffer.as_mut()[#offset..][..#n].copy_from_slice(&value.to_le_bytes());
                },
            ),
            Kind::Bytes(n) => (
                quote! { &self.buffer.as_ref()[#offset..][..#n] },
                quote! { self.buffer.as_mut()[#offset..][..#n].copy_from_slice(value); },
            ),
            Kind::Rest => (
                quote! { &self.buffer.as_ref()[#offset..] },
                quote! { self.buffer.as_mut()[#offset..][..value.len()].copy_from_slice(value); },
            ),
        };

        getters.push(quote! {
            #(#doc)*
            pub fn #fnname(&self) -> #ty {
                #getter_body
            }
        });

        let setter_doc = format!("Set the `{fnname}` field.");
        setters.push(quote! {
            #[doc = #setter_doc]
            pub fn #setter(&mut self, value: #ty) {
                #setter_body
            }
        });

        offset += kind.size();
    }

    Ok(quote! {
        #(#item_attr)*
        #vis struct #name<T: AsRef<[u8]>> {
            buffer: T,
        }

        impl<T: AsRef<[u8]>> #name<T> {
            /// Create a new reader/writer without checking the buffer length.
            pub fn new_unchecked(buffer: T) -> Self {
                Self { buffer }
            }

            /// Returns `false` if the buffer is too short to contain every
            /// fixed-size field.
            pub fn check_len(&self) -> bool {
                self.buffer.as_ref().len() >= Self::size()
            }

            /// Return the underlying buffer.
            pub fn into_inner(self) -> T {
                self.buffer
            }

            #(#getters)*

            /// Returns the size of the fixed-size fields in bytes.
            pub const fn size() -> usize {
                #offset
            }
        }

        impl<T: AsRef<[u8]> + AsMut<[u8]>> #name<T> {
            #(#setters)*
        }
    })
}
