//! Shared fixtures for the integration test suite.

use std::{cell::RefCell, rc::Rc};

use vigil_core::{Observable, Observer, Property};

/// A thermometer with an observable reading, used throughout the suite.
#[derive(Observable)]
pub struct Temperature {
    #[observable]
    pub celsius: Property<Temperature, f64>,
}

impl Temperature {
    #[must_use]
    pub fn new(celsius: f64) -> Self {
        Self {
            celsius: Property::new(celsius),
        }
    }
}

/// Returns an observer that appends every observed value to the returned log.
pub fn value_log(name: &str) -> (Observer<Temperature>, Rc<RefCell<Vec<f64>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let observer = Observer::new(name, {
        let log = Rc::clone(&log);
        move |_temperature: &Temperature, _property, value| {
            log.borrow_mut().push(*value.downcast_ref::<f64>().unwrap());
            Ok(())
        }
    });
    (observer, log)
}
