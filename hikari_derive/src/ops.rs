use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DeriveInput};

use crate::common::{components, type_param, with_bound, OpInfo};

/// Generates a component-wise `std::ops` impl.
///
/// `Scalar` variants broadcast a `T` right-hand side over the components,
/// `Assign` variants mutate in place. The component ops come from the `Num`
/// and `NumAssign` supertraits of `ValueType` so no extra bounds are needed.
pub fn component_op(input: &DeriveInput, full_name: &str) -> TokenStream {
    let OpInfo {
        trait_ident,
        fn_ident,
        is_scalar,
        is_assign,
    } = OpInfo::parse(full_name);

    let t = match type_param(&input.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let rhs = if is_scalar {
        quote! { #t }
    } else {
        quote! { #type_ident #type_generics }
    };

    let per_component: Vec<TokenStream> = components(&input.data)
        .iter()
        .map(|(c, f)| {
            let rhs_component = if is_scalar {
                quote! { other }
            } else {
                quote! { other.#c }
            };
            if is_assign {
                quote_spanned! { f.span() => self.#c.#fn_ident(#rhs_component); }
            } else {
                quote_spanned! { f.span() => self.#c.#fn_ident(#rhs_component) }
            }
        })
        .collect();

    // The bare trait name keeps the expansion readable; the host file is
    // expected to have the std::ops traits in scope
    if is_assign {
        quote! {
            impl #impl_generics #trait_ident<#rhs> for #type_ident #type_generics
            #where_clause
            {
                fn #fn_ident(&mut self, other: #rhs) {
                    #(#per_component)*
                    debug_assert!(!self.has_nans());
                }
            }
        }
    } else {
        quote! {
            impl #impl_generics #trait_ident<#rhs> for #type_ident #type_generics
            #where_clause
            {
                type Output = Self;

                fn #fn_ident(self, other: #rhs) -> Self {
                    Self::new(#(#per_component),*)
                }
            }
        }
    }
}

/// Generates a component-wise `std::ops::Neg` impl.
///
/// Adds a `Neg` bound since the base `ValueType` also admits unsigned types.
pub fn neg(input: &DeriveInput, _full_name: &str) -> TokenStream {
    let t = match type_param(&input.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &input.ident;
    let generics = with_bound(&input.generics, &quote!(std::ops::Neg<Output = #t>));
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let (_, type_generics, _) = input.generics.split_for_impl();

    let per_component: Vec<TokenStream> = components(&input.data)
        .iter()
        .map(|(c, f)| quote_spanned! { f.span() => -self.#c })
        .collect();

    quote! {
        impl #impl_generics Neg for #type_ident #type_generics
        #where_clause
        {
            type Output = Self;

            fn neg(self) -> Self {
                Self::new(#(#per_component),*)
            }
        }
    }
}
