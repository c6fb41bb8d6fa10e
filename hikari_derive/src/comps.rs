use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DeriveInput, Ident};

use crate::common::{components, type_param, with_bound};

// The generated impls repeat the struct's own `T: ValueType` bound so the
// expansion site is expected to have `ValueType` in scope. The component
// min/max/arithmetic calls all resolve through that bound's supertraits.

/// Members shared by every component struct: constructors, NaN predicate and
/// component-wise min/max, plus a splatting `From<T>`.
fn base_members(
    item: &DeriveInput,
    t: &Ident,
    extra_members: TokenStream,
) -> TokenStream {
    let type_ident = &item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();

    let comps = components(&item.data);

    let new_args: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => #c: #t))
        .collect();
    let new_init: Vec<TokenStream> = comps.iter().map(|(c, _)| quote!(#c)).collect();
    let zeros_init: Vec<TokenStream> = comps
        .iter()
        .map(|(c, _)| quote!(#c: #t::zero()))
        .collect();
    let ones_init: Vec<TokenStream> = comps
        .iter()
        .map(|(c, _)| quote!(#c: #t::one()))
        .collect();
    // Not every T has is_nan() so lean on NaN != NaN
    let nan_pred: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => self.#c != self.#c))
        .collect();
    let min_init: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => #c: self.#c.mini(other.#c)))
        .collect();
    let max_init: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => #c: self.#c.maxi(other.#c)))
        .collect();
    let splat_init: Vec<TokenStream> = comps.iter().map(|(_, _)| quote!(v)).collect();

    let type_str = type_ident.to_string();
    let new_doc = format!("Creates a new `{0}`.", type_str);
    let zeros_doc = format!("Creates a new `{0}` filled with `0`s.", type_str);
    let ones_doc = format!("Creates a new `{0}` filled with `1`s.", type_str);
    let has_nans_doc = format!("Checks if this `{0}` contains NaNs.", type_str);
    let min_doc = format!("Returns the component-wise minimum of two `{0}`s.", type_str);
    let max_doc = format!("Returns the component-wise maximum of two `{0}`s.", type_str);

    quote! {
        impl #impl_generics #type_ident #type_generics
        #where_clause
        {
            #[doc = #new_doc]
            #[inline]
            pub fn new(#(#new_args),*) -> Self {
                let v = Self { #(#new_init),* };
                debug_assert!(!v.has_nans());
                v
            }

            #[doc = #zeros_doc]
            #[inline]
            pub fn zeros() -> Self {
                Self { #(#zeros_init),* }
            }

            #[doc = #ones_doc]
            #[inline]
            pub fn ones() -> Self {
                Self { #(#ones_init),* }
            }

            #[doc = #has_nans_doc]
            #[allow(clippy::eq_op)]
            #[inline]
            pub fn has_nans(&self) -> bool {
                #(#nan_pred)||*
            }

            #[doc = #min_doc]
            #[inline]
            pub fn min(&self, other: Self) -> Self {
                debug_assert!(!self.has_nans());
                debug_assert!(!other.has_nans());

                Self { #(#min_init),* }
            }

            #[doc = #max_doc]
            #[inline]
            pub fn max(&self, other: Self) -> Self {
                debug_assert!(!self.has_nans());
                debug_assert!(!other.has_nans());

                Self { #(#max_init),* }
            }

            #extra_members
        }

        impl #impl_generics From<#t> for #type_ident #type_generics
        #where_clause
        {
            fn from(v: #t) -> Self {
                Self::new(#(#splat_init),*)
            }
        }
    }
}

pub fn vec_members(item: &DeriveInput) -> TokenStream {
    let t = match type_param(&item.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &item.ident;
    let (_, type_generics, _) = item.generics.split_for_impl();

    let comps = components(&item.data);
    let dot_prods: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => self.#c * other.#c))
        .collect();

    let type_str = type_ident.to_string();
    let dot_doc = format!("Calculates the dot product of two `{0}`s.", type_str);
    let len_sqr_doc = format!("Calculates the squared length of this `{0}`.", type_str);
    let len_doc = format!("Calculates the length of this `{0}`.", type_str);
    let normalized_doc = format!("Returns this `{0}` normalized.", type_str);

    let member_ops = quote! {
        #[doc = #dot_doc]
        #[inline]
        pub fn dot(&self, other: Self) -> #t {
            debug_assert!(!self.has_nans());
            debug_assert!(!other.has_nans());

            #(#dot_prods)+*
        }

        #[doc = #len_sqr_doc]
        #[inline]
        pub fn len_sqr(&self) -> #t {
            self.dot(*self)
        }
    };

    let base = base_members(item, &t, member_ops);

    // Lengths and normalization only make sense for float components
    let float_generics = with_bound(&item.generics, &quote!(num::traits::Float));
    let (float_impl_generics, _, float_where_clause) = float_generics.split_for_impl();

    quote! {
        #base

        impl #float_impl_generics #type_ident #type_generics
        #float_where_clause
        {
            #[doc = #len_doc]
            #[inline]
            pub fn len(&self) -> #t {
                num::traits::Float::sqrt(self.len_sqr())
            }

            #[doc = #normalized_doc]
            #[inline]
            pub fn normalized(&self) -> Self {
                debug_assert!(!self.has_nans());

                *self / self.len()
            }
        }
    }
}

pub fn spectrum_members(item: &DeriveInput) -> TokenStream {
    let t = match type_param(&item.generics) {
        Ok(t) => t,
        Err(e) => return e.to_compile_error(),
    };
    let type_ident = &item.ident;

    let comps = components(&item.data);
    let black_pred: Vec<TokenStream> = comps
        .iter()
        .map(|(c, f)| quote_spanned!(f.span() => self.#c == #t::zero()))
        .collect();

    let type_str = type_ident.to_string();
    let is_black_doc = format!("Returns `true` if this `{0}` is all zeros.", type_str);

    let member_ops = quote! {
        #[doc = #is_black_doc]
        #[inline]
        pub fn is_black(&self) -> bool {
            debug_assert!(!self.has_nans());

            #(#black_pred)&&*
        }
    };

    base_members(item, &t, member_ops)
}
