use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Error, Fields, GenericArgument, Generics, Ident, ItemStruct, PathArguments, Result, Type,
    Visibility,
    parse::{Parse, ParseStream},
};

#[derive(Debug)]
pub(crate) struct Parsed {
    ident: Ident,
    generics: Generics,
    fields: Vec<ObservableField>,
}

/// A field marked `#[observable]`, with the value type extracted from its
/// `Property<Owner, T>` declaration.
#[derive(Debug)]
struct ObservableField {
    vis: Visibility,
    ident: Ident,
    value_type: Type,
}

impl Parse for Parsed {
    /// Parses a struct definition and validates constraints.
    fn parse(input: ParseStream) -> Result<Self> {
        let ItemStruct {
            ident,
            generics,
            fields,
            ..
        } = input.parse()?;

        let Fields::Named(fields) = fields else {
            return Err(Error::new_spanned(
                ident,
                "Unsupported struct type. This macro requires a struct with named fields.",
            ));
        };

        let mut observables = Vec::new();
        for field in fields.named {
            let marked = field
                .attrs
                .iter()
                .any(|attr| attr.path().is_ident("observable"));
            if !marked {
                continue;
            }

            let Some(value_type) = property_value_type(&field.ty) else {
                return Err(Error::new_spanned(
                    &field.ty,
                    "An #[observable] field must have type `Property<Owner, T>`.",
                ));
            };

            observables.push(ObservableField {
                vis: field.vis,
                ident: field.ident.expect("named fields have identifiers"),
                value_type,
            });
        }

        Ok(Parsed {
            ident,
            generics,
            fields: observables,
        })
    }
}

impl Parsed {
    /// Generates the full token stream for the macro expansion.
    pub fn expand(self) -> TokenStream {
        let observable_impl = self.generate_observable_impl();
        let accessors_impl = self.generate_accessors_impl();

        quote! {
            #observable_impl
            #accessors_impl
        }
    }

    /// Generates the `Observable` implementation: the declared name list and
    /// the name-to-slot lookup.
    fn generate_observable_impl(&self) -> TokenStream {
        let struct_name = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let names: Vec<String> = self.fields.iter().map(|f| f.ident.to_string()).collect();
        let idents: Vec<&Ident> = self.fields.iter().map(|f| &f.ident).collect();

        quote! {
            impl #impl_generics vigil_core::Observable for #struct_name #ty_generics #where_clause {
                fn observable_properties(&self) -> &'static [&'static str] {
                    &[#(#names),*]
                }

                fn observable_slot(&self, property: &str) -> Option<&dyn vigil_core::PropertySlot<Self>> {
                    match property {
                        #(#names => Some(&self.#idents),)*
                        _ => None,
                    }
                }
            }
        }
    }

    /// Generates the per-property accessors at each field's visibility.
    fn generate_accessors_impl(&self) -> TokenStream {
        let struct_name = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let accessors: Vec<TokenStream> = self.fields.iter().map(ObservableField::accessors).collect();

        quote! {
            impl #impl_generics #struct_name #ty_generics #where_clause {
                #(#accessors)*
            }
        }
    }
}

impl ObservableField {
    fn accessors(&self) -> TokenStream {
        let vis = &self.vis;
        let ident = &self.ident;
        let name = ident.to_string();
        let value_type = &self.value_type;
        let setter = format_ident!("set_{}", ident);
        let deleter = format_ident!("delete_{}", ident);

        quote! {
            #vis fn #ident(&self) -> Result<#value_type, vigil_core::ObservablePropertyError> {
                self.#ident.get().ok_or_else(|| {
                    vigil_core::ObservablePropertyError::not_observable::<Self>(#name)
                })
            }

            #vis fn #setter(&self, value: #value_type) -> Result<(), vigil_core::ObservablePropertyError> {
                self.#ident.set(self, #name, value)
            }

            #vis fn #deleter(&self) {
                self.#ident.delete();
            }
        }
    }
}

/// Extracts `T` from a `Property<Owner, T>` type, or returns `None` when the
/// type has a different shape.
fn property_value_type(ty: &Type) -> Option<Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Property" {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    let mut types = arguments.args.iter().filter_map(|argument| match argument {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    let _owner = types.next()?;
    let value = types.next()?;
    if types.next().is_some() {
        return None;
    }

    Some(value.clone())
}
