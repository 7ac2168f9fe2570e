use std::any::type_name;

use thiserror::Error;

/// An error from an invalid operation on an observable property.
///
/// Covers the two ways observation can go wrong:
///
/// - [`NotObservable`]: the requested name is not a declared observable
///   property of the target's type, or the property was deleted from the
///   instance and has not been re-created.
/// - [`IllegalReentry`]: an observer attempted to mutate (or otherwise
///   re-notify) the very property it is being notified about while its own
///   notification was still in flight.
///
/// Both are unrecoverable at the point of failure and propagate to the
/// caller that triggered the assignment, subscription, or notification.
///
/// [`NotObservable`]: ObservablePropertyError::NotObservable
/// [`IllegalReentry`]: ObservablePropertyError::IllegalReentry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObservablePropertyError {
    /// The name does not refer to an observable property of the type.
    #[error("'{property}' is not an observable property of '{owner}'")]
    NotObservable {
        /// The requested property name.
        property: String,

        /// The type expected to declare the property.
        owner: &'static str,
    },

    /// An observer re-entered the notification cycle it is part of.
    #[error("'{observer}' is not allowed to modify observable property '{owner}.{property}'")]
    IllegalReentry {
        /// The name of the offending observer.
        observer: String,

        /// The property whose notification was re-entered.
        property: String,

        /// The type declaring the property.
        owner: &'static str,
    },
}

/// A result type alias to use with [`ObservablePropertyError`].
pub type ObservableResult<T, E = ObservablePropertyError> = Result<T, E>;

impl ObservablePropertyError {
    /// Creates a [`NotObservable`] error for property `property` of type `O`.
    ///
    /// [`NotObservable`]: ObservablePropertyError::NotObservable
    #[must_use]
    pub fn not_observable<O: ?Sized>(property: &str) -> Self {
        Self::NotObservable {
            property: property.to_string(),
            owner: short_type_name::<O>(),
        }
    }

    /// Creates an [`IllegalReentry`] error naming the offending `observer`.
    ///
    /// [`IllegalReentry`]: ObservablePropertyError::IllegalReentry
    #[must_use]
    pub fn illegal_reentry<O: ?Sized>(observer: &str, property: &str) -> Self {
        Self::IllegalReentry {
            observer: observer.to_string(),
            property: property.to_string(),
            owner: short_type_name::<O>(),
        }
    }
}

/// Returns the type name of `O` with its leading module path stripped, so
/// error messages read `'Temperature.celsius'` rather than
/// `'my_app::sensors::Temperature.celsius'`.
fn short_type_name<O: ?Sized>() -> &'static str {
    let full = type_name::<O>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(index) => &full[index + 2..],
        None => full,
    }
}
