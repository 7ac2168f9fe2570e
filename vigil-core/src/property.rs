//! The observable property mechanism.
//!
//! A [`Property<O, T>`] wraps a private backing value of type `T` inside an
//! owning instance of type `O`, together with the two per-instance side
//! tables that make it observable:
//!
//! - the *subscriber list*, an ordered sequence of [`Observer`]s notified on
//!   every successful assignment (insertion order = notification order), and
//! - the *recursion guard*, the set of observers currently mid-notification,
//!   used to reject re-entrant assignments to the same property.
//!
//! Because both tables live inside the property field itself, they share the
//! owning instance's lifetime exactly and are released when it drops.
//!
//! Assignment goes through [`Property::set`], which stores the new value
//! *before* running observers and clears the guard when the cycle ends,
//! whether it succeeded or failed. No internal borrow is held while an
//! observer runs, so a re-entrant assignment reaches the guard check and
//! fails with [`ObservablePropertyError::IllegalReentry`] instead of
//! aborting the process.
//!
//! [`PropertySlot`] is the object-safe, value-erased face of a property,
//! used by [`Observable`](crate::Observable) implementations to look up
//! properties by name.

use std::{any::Any, cell::RefCell, fmt};

use crate::{
    error::{ObservablePropertyError, ObservableResult},
    observer::Observer,
};

/// An observable property of an instance of `O`, holding a value of type `T`.
///
/// Declare one as a struct field and mark it `#[observable]` under
/// [`#[derive(Observable)]`](crate::Observable) to generate accessors, or
/// drive it directly with [`set`], [`touch`], and [`delete`].
///
/// A property starts *bound* to its initial value. [`delete`] unbinds it and
/// discards all subscriptions; a later [`set`] re-creates it with an empty
/// subscriber list.
///
/// [`set`]: Property::set
/// [`touch`]: Property::touch
/// [`delete`]: Property::delete
pub struct Property<O: ?Sized, T> {
    value: RefCell<Option<T>>,
    subscribers: RefCell<Vec<Observer<O>>>,
    in_flight: RefCell<Vec<Observer<O>>>,
}

impl<O: ?Sized, T> Property<O, T> {
    /// Creates a property bound to an initial value with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(Some(value)),
            subscribers: RefCell::new(Vec::new()),
            in_flight: RefCell::new(Vec::new()),
        }
    }

    /// Returns a copy of the current value, or `None` when the property has
    /// been deleted. Reading has no side effects.
    #[must_use]
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Returns `true` while the property holds a value.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.value.borrow().is_some()
    }

    /// Deletes the property: unbinds the value and discards the subscriber
    /// list and recursion guard.
    ///
    /// Until a later [`set`](Property::set) re-creates it, subscription and
    /// notification fail as not observable and [`get`](Property::get)
    /// returns `None`.
    pub fn delete(&self) {
        *self.value.borrow_mut() = None;
        self.subscribers.borrow_mut().clear();
        self.in_flight.borrow_mut().clear();
    }

    /// Subscribes `observer`, replacing any existing subscription of the
    /// same callback.
    ///
    /// A re-subscribed observer moves to the end of the notification order;
    /// after this call there is exactly one entry for the callback.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::NotObservable`] when the property
    /// has been deleted.
    pub fn subscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<()> {
        self.unsubscribe(property, observer)?;
        self.subscribers.borrow_mut().push(observer.clone());
        Ok(())
    }

    /// Removes one subscription of `observer`, returning `true` if one was
    /// removed and `false` if the callback was not subscribed.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::NotObservable`] when the property
    /// has been deleted.
    pub fn unsubscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<bool> {
        if !self.is_bound() {
            return Err(ObservablePropertyError::not_observable::<O>(property));
        }

        let mut subscribers = self.subscribers.borrow_mut();
        match subscribers.iter().position(|s| s.same_callback(observer)) {
            Some(index) => {
                subscribers.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<O: ?Sized, T: Any + Clone> Property<O, T> {
    /// Assigns a new value and notifies all subscribers in order.
    ///
    /// The value is stored first, so observers (and anyone they call) read
    /// the new value. Each subscriber is entered into the recursion guard
    /// before it runs; the guard is cleared when the cycle ends, on success
    /// and on failure alike. Assigning to a deleted property re-creates it.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::IllegalReentry`] when a subscriber
    /// is already mid-notification for this property, and propagates any
    /// error an observer returns. The assignment itself remains in effect.
    pub fn set(&self, instance: &O, property: &str, value: T) -> ObservableResult<()> {
        let assigned = value.clone();
        *self.value.borrow_mut() = Some(value);
        self.run_observers(instance, property, &assigned)
    }

    /// Re-runs the notification sequence with the current value, without
    /// changing it.
    ///
    /// Used after internal or bulk mutations that bypass [`set`], for
    /// example via [`Observable::notify_after`](crate::Observable::notify_after).
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::NotObservable`] when the property
    /// has been deleted; otherwise fails like [`set`].
    ///
    /// [`set`]: Property::set
    pub fn touch(&self, instance: &O, property: &str) -> ObservableResult<()> {
        let Some(current) = self.get() else {
            return Err(ObservablePropertyError::not_observable::<O>(property));
        };
        self.run_observers(instance, property, &current)
    }

    /// Runs one notification cycle, clearing the guard unconditionally.
    fn run_observers(&self, instance: &O, property: &str, value: &T) -> ObservableResult<()> {
        let outcome = self.execute_callbacks(instance, property, value);
        self.in_flight.borrow_mut().clear();
        outcome
    }

    fn execute_callbacks(&self, instance: &O, property: &str, value: &T) -> ObservableResult<()> {
        // Snapshot the list so observers may subscribe or unsubscribe
        // mid-cycle; changes take effect on the next cycle.
        let subscribers = self.subscribers.borrow().clone();

        for observer in subscribers {
            let re_entered = self
                .in_flight
                .borrow()
                .iter()
                .any(|running| running.same_callback(&observer));
            if re_entered {
                return Err(ObservablePropertyError::illegal_reentry::<O>(
                    observer.name(),
                    property,
                ));
            }

            self.in_flight.borrow_mut().push(observer.clone());
            observer.call(instance, property, value)?;
        }

        Ok(())
    }
}

impl<O: ?Sized, T: Default> Default for Property<O, T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<O: ?Sized, T: fmt::Debug> fmt::Debug for Property<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<O: ?Sized, T: serde::Serialize> serde::Serialize for Property<O, T> {
    /// Serializes the current value only (`None` when deleted);
    /// subscriptions are never persisted.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.borrow().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, O: ?Sized, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Property<O, T> {
    /// Deserializes into a property with no subscribers.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            in_flight: RefCell::new(Vec::new()),
        })
    }
}

/// The object-safe face of a [`Property`], with its value type erased.
///
/// [`Observable`](crate::Observable) implementations return `&dyn
/// PropertySlot<Self>` from name lookups so that the subscription façade can
/// operate on any property of an instance regardless of its value type.
pub trait PropertySlot<O: ?Sized> {
    /// Subscribes `observer`, replacing any existing subscription of the
    /// same callback.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::NotObservable`] when the property
    /// has been deleted.
    fn subscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<()>;

    /// Removes one subscription of `observer`, returning whether one was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`ObservablePropertyError::NotObservable`] when the property
    /// has been deleted.
    fn unsubscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<bool>;

    /// Notifies subscribers with the current value, without changing it.
    ///
    /// # Errors
    ///
    /// Fails like [`Property::touch`].
    fn notify(&self, instance: &O, property: &str) -> ObservableResult<()>;
}

impl<O: ?Sized, T: Any + Clone> PropertySlot<O> for Property<O, T> {
    fn subscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<()> {
        Property::subscribe(self, property, observer)
    }

    fn unsubscribe(&self, property: &str, observer: &Observer<O>) -> ObservableResult<bool> {
        Property::unsubscribe(self, property, observer)
    }

    fn notify(&self, instance: &O, property: &str) -> ObservableResult<()> {
        self.touch(instance, property)
    }
}
