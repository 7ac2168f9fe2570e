mod observable;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Implements the `Observable` trait for structs declaring observable
/// properties.
///
/// Mark fields of type `Property<Owner, T>` with `#[observable]`. When
/// applied to a struct, this macro:
///
/// - Implements `Observable`, registering each marked field under the
///   field's name for lookup by the subscription façade.
/// - Generates accessors for each marked field, at the field's visibility:
///   `fn <field>()` reads the value, `fn set_<field>(value)` assigns it and
///   notifies subscribers, and `fn delete_<field>()` unbinds it and
///   discards its subscriptions.
///
/// ## Restrictions
///
/// - The input struct must use named fields (not tuple or unit structs).
/// - Every `#[observable]` field must have type `Property<Owner, T>`.
///
/// ## Example
///
/// ### Input
///
/// ```ignore
/// #[derive(Observable)]
/// struct Temperature {
///     #[observable]
///     celsius: Property<Temperature, f64>,
/// }
/// ```
///
/// ### Expanded
///
/// ```ignore
/// impl vigil_core::Observable for Temperature {
///     fn observable_properties(&self) -> &'static [&'static str] {
///         &["celsius"]
///     }
///
///     fn observable_slot(&self, property: &str) -> Option<&dyn vigil_core::PropertySlot<Self>> {
///         match property {
///             "celsius" => Some(&self.celsius),
///             _ => None,
///         }
///     }
/// }
///
/// impl Temperature {
///     fn celsius(&self) -> Result<f64, vigil_core::ObservablePropertyError> { /* ... */ }
///     fn set_celsius(&self, value: f64) -> Result<(), vigil_core::ObservablePropertyError> { /* ... */ }
///     fn delete_celsius(&self) { /* ... */ }
/// }
/// ```
#[proc_macro_derive(Observable, attributes(observable))]
pub fn derive_observable(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as observable::Parsed);
    parsed.expand().into()
}
