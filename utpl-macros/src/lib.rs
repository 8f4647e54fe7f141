mod vars;

use proc_macro::TokenStream;

/// Derives `utpl::vars::ToVars` for a struct with named fields.
///
/// Every field must implement `utpl::vars::ToVar`. Field attributes:
/// - `#[var("name")]` or `#[var(rename = "name")]` sets the variable name,
/// - `#[var(ignore)]` leaves the field out.
#[proc_macro_derive(Vars, attributes(var))]
pub fn derive_vars(input: TokenStream) -> TokenStream {
    vars::derive_vars_impl(input)
}
