//! Serialization of observable state: values round-trip, subscriptions do not.

use serde::{Deserialize, Serialize};
use vigil_core::{Observable, Observer, Property, subscribe, unsubscribe};

#[derive(Observable, Serialize, Deserialize)]
struct Settings {
    #[observable]
    brightness: Property<Settings, u8>,
    locale: String,
}

fn settings() -> Settings {
    Settings {
        brightness: Property::new(128),
        locale: "en".to_string(),
    }
}

#[test]
fn values_round_trip_through_json() {
    let original = settings();

    let json = serde_json::to_string(&original).unwrap();
    assert_eq!(json, r#"{"brightness":128,"locale":"en"}"#);

    let restored: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.brightness(), Ok(128));
    assert_eq!(restored.locale, "en");
}

#[test]
fn subscriptions_do_not_survive_re_creation() {
    let original = settings();
    let observer = Observer::new("log", |_: &Settings, _, _| Ok(()));
    subscribe(&observer, &original, "brightness").unwrap();

    let json = serde_json::to_string(&original).unwrap();
    let restored: Settings = serde_json::from_str(&json).unwrap();

    assert_eq!(unsubscribe(&observer, &restored, "brightness"), Ok(false));
}

#[test]
fn deleted_properties_round_trip_as_null() {
    let original = settings();
    original.delete_brightness();

    let json = serde_json::to_string(&original).unwrap();
    assert_eq!(json, r#"{"brightness":null,"locale":"en"}"#);

    let restored: Settings = serde_json::from_str(&json).unwrap();
    assert!(restored.brightness().is_err());
}
