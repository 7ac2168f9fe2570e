use crate::{
    error::{ObservablePropertyError, ObservableResult},
    observer::Observer,
    property::PropertySlot,
    subscription,
};

/// A type with observable properties.
///
/// The two required methods describe the declaration surface (which names
/// are observable, and where each property lives) and are normally generated
/// by [`#[derive(Observable)]`](macro@crate::Observable). Everything else is
/// provided: instance-method conveniences that delegate to the free
/// functions [`subscribe`](crate::subscribe) and
/// [`unsubscribe`](crate::unsubscribe), manual notification, and a scoped
/// helper for grouped mutations.
///
/// # Implementing by hand
///
/// ```
/// use vigil_core::{Observable, Property, PropertySlot};
///
/// struct Kettle {
///     water_level: Property<Kettle, u32>,
/// }
///
/// impl Observable for Kettle {
///     fn observable_properties(&self) -> &'static [&'static str] {
///         &["water_level"]
///     }
///
///     fn observable_slot(&self, property: &str) -> Option<&dyn PropertySlot<Self>> {
///         match property {
///             "water_level" => Some(&self.water_level),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Observable {
    /// The names of this type's observable properties, in declaration order.
    fn observable_properties(&self) -> &'static [&'static str];

    /// Looks up the property declared under `property`, or `None` when the
    /// name is not observable.
    fn observable_slot(&self, property: &str) -> Option<&dyn PropertySlot<Self>>;

    /// Returns `true` when `property` names a declared observable property.
    ///
    /// A deleted property is still declared; subscribing to it fails until
    /// it is re-created by assignment.
    fn is_observable(&self, property: &str) -> bool {
        self.observable_slot(property).is_some()
    }

    /// Subscribes a callback to changes of `property` on this instance.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError`] when the property is not
    /// observable or does not exist.
    fn subscribe(&self, property: &str, observer: &Observer<Self>) -> ObservableResult<()>
    where
        Self: Sized,
    {
        subscription::subscribe(observer, self, property)
    }

    /// Unsubscribes a callback from `property`, returning `true` if a
    /// subscription was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError`] when the property is not
    /// observable or does not exist.
    fn unsubscribe(&self, property: &str, observer: &Observer<Self>) -> ObservableResult<bool>
    where
        Self: Sized,
    {
        subscription::unsubscribe(observer, self, property)
    }

    /// Runs the subscribers of `property` with its current value, without
    /// changing it.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError`] when the property is not
    /// observable, and fails like an assignment when an observer rejects or
    /// re-enters the cycle.
    fn notify(&self, property: &str) -> ObservableResult<()>
    where
        Self: Sized,
    {
        let slot = self
            .observable_slot(property)
            .ok_or_else(|| ObservablePropertyError::not_observable::<Self>(property))?;
        slot.notify(self, property)
    }

    /// Runs `block`, then notifies the subscribers of `property` once.
    ///
    /// Use this when several related fields are mutated together and a
    /// single notification should fire at the end. Notification happens on
    /// normal return only; if `block` panics, nothing is notified.
    ///
    /// # Errors
    ///
    /// Fails like [`notify`](Observable::notify).
    fn notify_after<R>(&self, property: &str, block: impl FnOnce(&Self) -> R) -> ObservableResult<R>
    where
        Self: Sized,
    {
        let output = block(self);
        self.notify(property)?;
        Ok(output)
    }
}
