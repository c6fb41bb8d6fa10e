use proc_macro2::{Span, TokenStream};
use syn::{
    parse_quote, spanned::Spanned, Data, Field, Fields, GenericParam, Generics, Ident,
};

/// A derive name like `MulAssignScalar` decomposed into the std trait to
/// implement, its method and the flavor flags.
pub struct OpInfo {
    pub trait_ident: Ident,
    pub fn_ident: Ident,
    pub is_scalar: bool,
    pub is_assign: bool,
}

impl OpInfo {
    pub fn parse(full_name: &str) -> Self {
        // `Scalar` is our own suffix marking a broadcast op over `T`
        let (trait_name, is_scalar) = match full_name.strip_suffix("Scalar") {
            Some(name) => (name, true),
            None => (full_name, false),
        };
        let is_assign = trait_name.ends_with("Assign");

        // CamelCase trait to snake_case method, e.g. AddAssign -> add_assign
        let mut fn_name = String::new();
        for c in trait_name.chars() {
            if c.is_uppercase() && !fn_name.is_empty() {
                fn_name.push('_');
            }
            fn_name.extend(c.to_lowercase());
        }

        Self {
            trait_ident: Ident::new(trait_name, Span::call_site()),
            fn_ident: Ident::new(&fn_name, Span::call_site()),
            is_scalar,
            is_assign,
        }
    }
}

/// Returns the single type parameter of the struct.
///
/// The component structs are all of the form `struct Name<T> where T: ...`
/// so anything else is an error worth surfacing at the usage site.
pub fn type_param(generics: &Generics) -> Result<Ident, syn::Error> {
    let mut found = None;
    for param in &generics.params {
        match param {
            GenericParam::Type(t) => {
                if found.is_some() {
                    return Err(syn::Error::new(
                        t.span(),
                        "component structs take a single type parameter",
                    ));
                }
                found = Some(t.ident.clone());
            }
            GenericParam::Lifetime(l) => {
                return Err(syn::Error::new(l.span(), "lifetimes are not supported"));
            }
            GenericParam::Const(c) => {
                return Err(syn::Error::new(c.span(), "const generics are not supported"));
            }
        }
    }
    found.ok_or_else(|| {
        syn::Error::new(Span::call_site(), "expected a generic component type")
    })
}

/// Returns a copy of `generics` with `bound` added to every type parameter.
pub fn with_bound(generics: &Generics, bound: &TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

/// Collects the named fields of the struct in declaration order.
pub fn components(data: &Data) -> Vec<(Ident, Field)> {
    match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields
                .named
                .iter()
                .map(|f| (f.ident.clone().unwrap(), f.clone()))
                .collect(),
            _ => panic!("component structs have named fields"),
        },
        Data::Enum(_) | Data::Union(_) => panic!("component types are structs"),
    }
}
