use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DeriveInput};

use crate::common::{components, type_param, with_bound};

/// Generates `std::ops::Index<usize>` or `IndexMut<usize>` mapping indices to
/// components in declaration order. Out-of-range indices panic.
pub fn index(input: &DeriveInput, full_name: &str) -> TokenStream {
    let is_mut = full_name.ends_with("Mut");

    let t = match type_param(&input.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let arms: Vec<TokenStream> = components(&input.data)
        .iter()
        .enumerate()
        .map(|(i, (c, f))| {
            if is_mut {
                quote_spanned! { f.span() => #i => &mut self.#c }
            } else {
                quote_spanned! { f.span() => #i => &self.#c }
            }
        })
        .collect();

    if is_mut {
        quote! {
            impl #impl_generics IndexMut<usize> for #type_ident #type_generics
            #where_clause
            {
                fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                    match index {
                        #(#arms,)*
                        _ => panic!("index {} out of bounds", index),
                    }
                }
            }
        }
    } else {
        quote! {
            impl #impl_generics Index<usize> for #type_ident #type_generics
            #where_clause
            {
                type Output = #t;

                fn index(&self, index: usize) -> &Self::Output {
                    match index {
                        #(#arms,)*
                        _ => panic!("index {} out of bounds", index),
                    }
                }
            }
        }
    }
}

/// Generates `approx::AbsDiffEq` or `approx::RelativeEq` comparing all
/// components, with `T` itself as the epsilon type.
pub fn approx_eq(input: &DeriveInput, full_name: &str) -> TokenStream {
    let t = match type_param(&input.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &input.ident;
    let (_, type_generics, _) = input.generics.split_for_impl();

    let mut generics = with_bound(&input.generics, &quote!(approx::AbsDiffEq<Epsilon = #t>));
    if full_name == "RelativeEq" {
        generics = with_bound(&generics, &quote!(approx::RelativeEq));
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    match full_name {
        "AbsDiffEq" => {
            let per_component: Vec<TokenStream> = components(&input.data)
                .iter()
                .map(|(c, f)| {
                    quote_spanned! { f.span() =>
                        self.#c.abs_diff_eq(&other.#c, epsilon)
                    }
                })
                .collect();

            quote! {
                impl #impl_generics AbsDiffEq for #type_ident #type_generics
                #where_clause
                {
                    type Epsilon = <#t as approx::AbsDiffEq>::Epsilon;

                    fn default_epsilon() -> Self::Epsilon {
                        <#t as approx::AbsDiffEq>::default_epsilon()
                    }

                    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                        #(#per_component)&&*
                    }
                }
            }
        }
        "RelativeEq" => {
            let per_component: Vec<TokenStream> = components(&input.data)
                .iter()
                .map(|(c, f)| {
                    quote_spanned! { f.span() =>
                        self.#c.relative_eq(&other.#c, epsilon, max_relative)
                    }
                })
                .collect();

            quote! {
                impl #impl_generics RelativeEq for #type_ident #type_generics
                #where_clause
                {
                    fn default_max_relative() -> Self::Epsilon {
                        <#t as approx::RelativeEq>::default_max_relative()
                    }

                    fn relative_eq(
                        &self,
                        other: &Self,
                        epsilon: Self::Epsilon,
                        max_relative: Self::Epsilon,
                    ) -> bool {
                        #(#per_component)&&*
                    }
                }
            }
        }
        _ => unimplemented!(),
    }
}
