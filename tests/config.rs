//! Config persistence tests and config-driven engine behavior

mod common;

use std::time::Duration;

use common::{click, press, test_area_with_config, type_chars};
use tempfile::tempdir;
use textarea::config::TextAreaConfig;
use textarea::editable::{SelectionRenderMode, TextEditMsg};

// ========================================================================
// Persistence
// ========================================================================

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = TextAreaConfig {
        history_interval_ms: 250,
        max_history: 32,
        wrap: false,
        scroll_margin: 8.0,
        selection_render: SelectionRenderMode::InlineOverlay,
        ..TextAreaConfig::default()
    };

    config.save_to(&path).unwrap();
    let loaded = TextAreaConfig::load_from(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "blink_interval_ms: 0\nselection_render: inline_overlay\n").unwrap();

    let loaded = TextAreaConfig::load_from(&path).unwrap();

    assert_eq!(loaded.blink_interval(), Duration::ZERO);
    assert_eq!(loaded.selection_render, SelectionRenderMode::InlineOverlay);
    assert_eq!(loaded.max_history, TextAreaConfig::default().max_history);
    assert!(loaded.wrap);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = TextAreaConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config"));
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "max_history: [not a number").unwrap();

    let err = TextAreaConfig::load_from(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn test_unknown_render_mode_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "selection_render: sparkles\n").unwrap();

    assert!(TextAreaConfig::load_from(&path).is_err());
}

// ========================================================================
// Engine behavior
// ========================================================================

#[test]
fn test_read_only_config_rejects_typing() {
    let config = TextAreaConfig {
        read_only: true,
        ..TextAreaConfig::default()
    };
    let mut area = test_area_with_config("abc", 0.0, 0.0, config);

    type_chars(&mut area, "xyz");
    press(&mut area, TextEditMsg::Move(textarea::editable::MoveTarget::Right));

    assert_eq!(area.text(), "abc");
    assert_eq!(area.caret().index, 1);
}

#[test]
fn test_multi_click_window_from_config() {
    let config = TextAreaConfig {
        multi_click_ms: 1000,
        ..TextAreaConfig::default()
    };
    let mut area = test_area_with_config("foo bar", 0.0, 0.0, config);

    click(&mut area, 55.0, 5.0);
    area.update(Duration::from_millis(600));
    click(&mut area, 55.0, 5.0);

    assert_eq!(area.selected_text(), "bar");
}

#[test]
fn test_caret_blinks_after_idle() {
    let mut area = test_area_with_config("abc", 0.0, 0.0, TextAreaConfig::default());
    assert!(area.caret_geometry().visible);

    area.update(Duration::from_millis(600));
    assert!(!area.caret_geometry().visible);

    press(&mut area, TextEditMsg::Move(textarea::editable::MoveTarget::Right));
    assert!(area.caret_geometry().visible);
}

#[test]
fn test_blink_disabled() {
    let config = TextAreaConfig {
        blink_interval_ms: 0,
        ..TextAreaConfig::default()
    };
    let mut area = test_area_with_config("abc", 0.0, 0.0, config);

    area.update(Duration::from_millis(600));

    assert!(area.caret_geometry().visible);
}
