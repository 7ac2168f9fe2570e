//! The free-function subscription façade.
//!
//! [`subscribe`] and [`unsubscribe`] attach and detach observers by
//! `(instance, property name)`, validating that the name is a declared
//! observable property of the instance's type. The [`Observable`] trait
//! exposes the same operations as instance methods.

use crate::{
    error::{ObservablePropertyError, ObservableResult},
    observable::Observable,
    observer::Observer,
};

/// Subscribes `observer` to changes of `property` on `instance`.
///
/// Subscribing a callback that is already subscribed replaces the existing
/// subscription, moving the callback to the end of the notification order.
/// After this call there is exactly one active subscription for it.
///
/// # Errors
///
/// Returns [`ObservablePropertyError`] when `property` is not an observable
/// property of the instance's type, or has been deleted from the instance.
///
/// # Example
///
/// ```
/// use vigil_core::{Observable, Observer, Property, subscribe};
///
/// #[derive(Observable)]
/// struct Tank {
///     #[observable]
///     volume: Property<Tank, f64>,
/// }
///
/// let tank = Tank { volume: Property::new(0.0) };
/// let watcher = Observer::new("watcher", |_tank: &Tank, property, _value| {
///     println!("{property} changed");
///     Ok(())
/// });
///
/// subscribe(&watcher, &tank, "volume")?;
/// assert!(subscribe(&watcher, &tank, "depth").is_err());
/// # Ok::<(), vigil_core::ObservablePropertyError>(())
/// ```
pub fn subscribe<O: Observable>(
    observer: &Observer<O>,
    instance: &O,
    property: &str,
) -> ObservableResult<()> {
    let slot = instance
        .observable_slot(property)
        .ok_or_else(|| ObservablePropertyError::not_observable::<O>(property))?;
    slot.subscribe(property, observer)
}

/// Unsubscribes `observer` from changes of `property` on `instance`.
///
/// Removes one matching subscription. Returns `true` if one was removed and
/// `false` if the callback was not subscribed.
///
/// # Errors
///
/// Returns [`ObservablePropertyError`] when `property` is not an observable
/// property of the instance's type, or has been deleted from the instance.
pub fn unsubscribe<O: Observable>(
    observer: &Observer<O>,
    instance: &O,
    property: &str,
) -> ObservableResult<bool> {
    let slot = instance
        .observable_slot(property)
        .ok_or_else(|| ObservablePropertyError::not_observable::<O>(property))?;
    slot.unsubscribe(property, observer)
}

#[cfg(test)]
mod tests {
    use crate::property::{Property, PropertySlot};

    use super::*;

    struct Gauge {
        reading: Property<Gauge, i64>,
    }

    impl Observable for Gauge {
        fn observable_properties(&self) -> &'static [&'static str] {
            &["reading"]
        }

        fn observable_slot(&self, property: &str) -> Option<&dyn PropertySlot<Self>> {
            match property {
                "reading" => Some(&self.reading),
                _ => None,
            }
        }
    }

    fn noop() -> Observer<Gauge> {
        Observer::new("noop", |_, _, _| Ok(()))
    }

    #[test]
    fn subscribe_rejects_unknown_properties() {
        let gauge = Gauge {
            reading: Property::new(0),
        };

        assert_eq!(
            subscribe(&noop(), &gauge, "elevation"),
            Err(ObservablePropertyError::not_observable::<Gauge>("elevation"))
        );
    }

    #[test]
    fn unsubscribe_rejects_unknown_properties() {
        let gauge = Gauge {
            reading: Property::new(0),
        };

        assert_eq!(
            unsubscribe(&noop(), &gauge, "elevation"),
            Err(ObservablePropertyError::not_observable::<Gauge>("elevation"))
        );
    }

    #[test]
    fn subscribe_then_unsubscribe_round_trip() {
        let gauge = Gauge {
            reading: Property::new(0),
        };
        let observer = noop();

        subscribe(&observer, &gauge, "reading").unwrap();
        assert!(unsubscribe(&observer, &gauge, "reading").unwrap());
        assert!(!unsubscribe(&observer, &gauge, "reading").unwrap());
    }
}
