use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod common;
mod comps;
mod ops;
mod traits;

// The math value types are plain component structs and their operator and
// member impls only differ in the component list. Expanding them here keeps
// the math module itself readable and makes adding a component type cheap.

/// Implements the shared members of a vector-like struct: constructors, NaN
/// checking, component-wise min/max, dot, lengths and normalization.
///
/// Expects `struct Name<T> where T: ValueType` with named fields of type `T`.
/// The expansion site needs `ValueType` in scope.
#[proc_macro_attribute]
pub fn impl_vec(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = parse_macro_input!(item as DeriveInput);

    let members = comps::vec_members(&item);
    proc_macro::TokenStream::from(quote! {
        #item
        #members
    })
}

/// Implements the shared members of a color-like struct: constructors, NaN
/// checking, component-wise min/max and `is_black`.
///
/// Same expectations as [`macro@impl_vec`].
#[proc_macro_attribute]
pub fn impl_spectrum(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = parse_macro_input!(item as DeriveInput);

    let members = comps::spectrum_members(&item);
    proc_macro::TokenStream::from(quote! {
        #item
        #members
    })
}

macro_rules! component_derive {
    ($tr:ident $fn_name:ident $gen:path) => {
        #[proc_macro_derive($tr)]
        pub fn $fn_name(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
            let input = parse_macro_input!(input as DeriveInput);

            proc_macro::TokenStream::from($gen(&input, stringify!($tr)))
        }
    };
}

// Component-wise binary ops, Type op Type
component_derive!(Add add ops::component_op);
component_derive!(Sub sub ops::component_op);
component_derive!(Mul mul ops::component_op);
component_derive!(AddAssign add_assign ops::component_op);
component_derive!(SubAssign sub_assign ops::component_op);
component_derive!(MulAssign mul_assign ops::component_op);
// Broadcast ops, Type op T
component_derive!(AddScalar add_scalar ops::component_op);
component_derive!(SubScalar sub_scalar ops::component_op);
component_derive!(MulScalar mul_scalar ops::component_op);
component_derive!(DivScalar div_scalar ops::component_op);
component_derive!(AddAssignScalar add_assign_scalar ops::component_op);
component_derive!(SubAssignScalar sub_assign_scalar ops::component_op);
component_derive!(MulAssignScalar mul_assign_scalar ops::component_op);
component_derive!(DivAssignScalar div_assign_scalar ops::component_op);
component_derive!(Neg neg ops::neg);
component_derive!(Index index traits::index);
component_derive!(IndexMut index_mut traits::index);
component_derive!(AbsDiffEq abs_diff_eq traits::approx_eq);
component_derive!(RelativeEq relative_eq traits::approx_eq);
