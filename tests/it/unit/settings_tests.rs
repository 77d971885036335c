//! Unit tests for persisted input settings.

use crate::helpers::Fixture;
use tempfile::TempDir;
use unipointer::input::WheelScale;
use unipointer::settings::default_settings_path;
use unipointer::types::{ContactId, EventKind, Gesture};
use unipointer::{ContactMode, InputError, InputSettings};

#[test]
fn test_defaults() {
    let settings = InputSettings::default();
    assert_eq!(settings.primary_button, 0);
    assert_eq!(settings.wheel, WheelScale::default());
    assert_eq!(settings.wheel.line, 20.0);
}

#[test]
fn test_partial_json_fills_defaults() {
    let settings = InputSettings::from_json(r#"{"wheel": {"page": 80.0}}"#).unwrap();
    assert_eq!(settings.wheel.page, 80.0);
    assert_eq!(settings.wheel.line, 20.0);
    assert_eq!(settings.primary_button, 0);

    assert_eq!(InputSettings::from_json("{}").unwrap(), InputSettings::default());
}

#[test]
fn test_invalid_json() {
    let err = InputSettings::from_json("{ not json").unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = InputSettings {
        primary_button: 1,
        ..InputSettings::default()
    };

    settings.save(&path).unwrap();
    assert_eq!(InputSettings::load(&path).unwrap(), settings);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    assert!(matches!(InputSettings::load(&path), Err(InputError::Io(_))));
    assert_eq!(InputSettings::load_or_default(&path).unwrap(), InputSettings::default());
}

#[test]
fn test_default_path_file_name() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("unipointer/settings.json"));
    }
}

#[test]
fn test_primary_button_setting() {
    let settings = InputSettings {
        primary_button: 2,
        ..InputSettings::default()
    };
    let fx = Fixture::with_settings(ContactMode::Single, &settings);

    fx.mouse_button(EventKind::MouseDown, 0.0, 0.0, 0);
    assert!(fx.recorder.is_empty());

    fx.mouse_button(EventKind::MouseDown, 0.0, 0.0, 2);
    fx.mouse_button(EventKind::MouseUp, 0.0, 0.0, 2);
    assert_eq!(
        fx.recorder.take().last(),
        Some(&Gesture::SingleUp {
            id: ContactId::Mouse,
            switching: false,
        })
    );
}
