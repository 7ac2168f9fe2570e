//! Observable object properties with synchronous change notification.
//!
//! This crate is a reusable building block for reactive, MVC-style state
//! propagation without a full event-bus framework. Any number of external
//! callbacks can be notified, synchronously and in subscription order,
//! whenever a designated property of an instance is assigned a new value:
//!
//! - [`Property`] — a field wrapper that stores the value and notifies
//!   subscribers on every successful assignment
//! - [`Observer`] — a named callback invoked with
//!   `(instance, property name, new value)`
//! - [`Observable`] — a trait (normally derived) exposing `subscribe`,
//!   `unsubscribe`, and manual notification as instance methods
//! - [`subscribe`], [`unsubscribe`] — the free-function façade
//! - [`ObservablePropertyError`] — invalid operations: unknown or deleted
//!   properties, and observers attempting re-entrant mutation
//!
//! Delivery is a direct, in-line call chain on the assigning thread; there
//! is no deferred or batched notification. A per-cycle recursion guard
//! turns an observer mutating the property it is observing into an
//! immediate error rather than unbounded recursion, and the guard is
//! cleared after every cycle, so a failed notification never poisons the
//! property.
//!
//! # Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use vigil_core::{Observable, Observer, Property, subscribe};
//!
//! #[derive(Observable)]
//! struct Temperature {
//!     #[observable]
//!     celsius: Property<Temperature, f64>,
//! }
//!
//! let temperature = Temperature {
//!     celsius: Property::new(0.0),
//! };
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let observer = Observer::new("log", {
//!     let log = Rc::clone(&log);
//!     move |_temperature: &Temperature, _property, value| {
//!         log.borrow_mut().push(*value.downcast_ref::<f64>().unwrap());
//!         Ok(())
//!     }
//! });
//!
//! subscribe(&observer, &temperature, "celsius")?;
//! temperature.set_celsius(20.0)?;
//! temperature.set_celsius(25.0)?;
//! assert_eq!(*log.borrow(), vec![20.0, 25.0]);
//!
//! temperature.unsubscribe("celsius", &observer)?;
//! temperature.set_celsius(30.0)?;
//! assert_eq!(*log.borrow(), vec![20.0, 25.0]);
//! # Ok::<(), vigil_core::ObservablePropertyError>(())
//! ```

mod error;
mod observable;
mod observer;
mod property;
mod subscription;

pub use error::{ObservablePropertyError, ObservableResult};
pub use observable::Observable;
pub use observer::Observer;
pub use property::{Property, PropertySlot};
pub use subscription::{subscribe, unsubscribe};

#[cfg(feature = "macros")]
pub use vigil_macros::Observable;
