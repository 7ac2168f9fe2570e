use std::{any::Any, fmt, rc::Rc};

use crate::error::ObservableResult;

/// A named callback subscribed to changes of an observable property.
///
/// Observers are invoked synchronously with the instance being observed,
/// the property name, and the newly assigned value (type-erased behind
/// [`Any`], since one observer may watch properties of different value
/// types). An observer may fail, which aborts the remaining notifications
/// of the current cycle and propagates to the original assignment.
///
/// Cloning an observer is cheap and preserves identity: clones count as
/// the *same* subscription for [`subscribe`], [`unsubscribe`], and the
/// re-entrancy guard, while two observers built from identical closures do
/// not. The name is used in error messages to identify the offending
/// callback.
///
/// [`subscribe`]: crate::subscribe
/// [`unsubscribe`]: crate::unsubscribe
pub struct Observer<O: ?Sized> {
    name: Rc<str>,
    callback: Rc<dyn Fn(&O, &str, &dyn Any) -> ObservableResult<()>>,
}

impl<O: ?Sized> Observer<O> {
    /// Creates a named observer from a callback.
    ///
    /// # Example
    ///
    /// ```
    /// use vigil_core::Observer;
    ///
    /// struct Tank;
    ///
    /// let observer = Observer::<Tank>::new("print_level", |_tank, property, value| {
    ///     println!("{property} is now {:?}", value.downcast_ref::<f64>());
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(observer.name(), "print_level");
    /// ```
    pub fn new(
        name: impl Into<Rc<str>>,
        callback: impl Fn(&O, &str, &dyn Any) -> ObservableResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Rc::new(callback),
        }
    }

    /// Returns the observer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callback itself produces, typically a
    /// rejected re-entrant assignment propagated with `?`.
    pub fn call(&self, instance: &O, property: &str, value: &dyn Any) -> ObservableResult<()> {
        (self.callback)(instance, property, value)
    }

    /// Returns `true` when both observers share the same underlying
    /// callback, i.e. one is a clone of the other.
    #[must_use]
    pub fn same_callback(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.callback).cast::<()>() == Rc::as_ptr(&other.callback).cast::<()>()
    }
}

// Manual impls keep `O` free of `Clone`/`Debug` bounds.

impl<O: ?Sized> Clone for Observer<O> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<O: ?Sized> fmt::Debug for Observer<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").field("name", &self.name).finish()
    }
}
