//! Selection tests: keyboard extension, sticky selection and geometry

mod common;

use common::{
    caret_at, move_to, press, select_to, selection_range, test_area, test_area_with_config,
    wrapped_area,
};
use textarea::config::TextAreaConfig;
use textarea::editable::{
    MoveTarget, OverlaySpan, SelectionExtent, SelectionGeometry, SelectionRenderMode,
    TextAreaEvent, TextEditMsg,
};

// ========================================================================
// Shift+movement
// ========================================================================

#[test]
fn test_shift_right_extends_selection() {
    let mut area = test_area("hello world");
    caret_at(&mut area, 2);

    select_to(&mut area, MoveTarget::Right);
    select_to(&mut area, MoveTarget::Right);

    assert_eq!(selection_range(&area), Some(2..4));
    assert_eq!(area.selection_extent(), SelectionExtent::ExtendingRight);
    assert_eq!(area.caret().index, 4);
    assert_eq!(area.selected_text(), "ll");
}

#[test]
fn test_reaching_fixed_edge_clears_selection() {
    let mut area = test_area("hello world");
    caret_at(&mut area, 2);
    select_to(&mut area, MoveTarget::Right);
    select_to(&mut area, MoveTarget::Right);

    select_to(&mut area, MoveTarget::Left);
    assert_eq!(selection_range(&area), Some(2..3));

    select_to(&mut area, MoveTarget::Left);
    assert_eq!(selection_range(&area), None);
    assert_eq!(area.selection_extent(), SelectionExtent::None);
}

#[test]
fn test_crossing_fixed_edge_flips_direction() {
    let mut area = test_area("hello world");
    caret_at(&mut area, 2);
    select_to(&mut area, MoveTarget::Right);

    select_to(&mut area, MoveTarget::Left);
    select_to(&mut area, MoveTarget::Left);

    assert_eq!(selection_range(&area), Some(1..2));
    assert_eq!(area.selection_extent(), SelectionExtent::ExtendingLeft);
    assert_eq!(area.caret().index, 1);
}

#[test]
fn test_word_jump_over_fixed_edge() {
    let mut area = test_area("foo bar baz");
    caret_at(&mut area, 5);
    select_to(&mut area, MoveTarget::Right);
    assert_eq!(selection_range(&area), Some(5..6));

    select_to(&mut area, MoveTarget::WordLeft);

    assert_eq!(selection_range(&area), Some(4..5));
    assert_eq!(area.selection_extent(), SelectionExtent::ExtendingLeft);
}

#[test]
fn test_shift_down_selects_across_lines() {
    let mut area = test_area("ab\ncd");
    caret_at(&mut area, 1);

    select_to(&mut area, MoveTarget::Down);

    assert_eq!(selection_range(&area), Some(1..4));
    assert_eq!(area.selected_text(), "b\nc");
}

#[test]
fn test_shift_end_then_shift_home() {
    let mut area = test_area("  indented");
    caret_at(&mut area, 5);

    select_to(&mut area, MoveTarget::LineEnd);
    assert_eq!(selection_range(&area), Some(5..10));

    select_to(&mut area, MoveTarget::LineStart);
    assert_eq!(selection_range(&area), Some(2..5));
    assert_eq!(area.selection_extent(), SelectionExtent::ExtendingLeft);
}

#[test]
fn test_plain_move_clears_selection() {
    let mut area = test_area("ab\ncd");
    area.select(0..2);

    move_to(&mut area, MoveTarget::Down);

    assert!(!area.has_selection());
}

// ========================================================================
// Select all
// ========================================================================

#[test]
fn test_select_all() {
    let mut area = test_area("abc\ndef");

    press(&mut area, TextEditMsg::SelectAll);

    assert_eq!(selection_range(&area), Some(0..7));
    assert_eq!(area.caret().index, 7);
}

#[test]
fn test_select_all_on_empty_buffer_selects_nothing() {
    let mut area = test_area("");

    press(&mut area, TextEditMsg::SelectAll);

    assert!(!area.has_selection());
    assert_eq!(area.caret().index, 0);
}

#[test]
fn test_select_clamps_range() {
    let mut area = test_area("abc");

    area.select(1..99);

    assert_eq!(selection_range(&area), Some(1..3));
    assert_eq!(area.caret().index, 3);
}

// ========================================================================
// Sticky selection
// ========================================================================

#[test]
fn test_start_selection_makes_moves_extend() {
    let mut area = test_area("hello");

    press(&mut area, TextEditMsg::StartSelection);
    assert!(area.is_selecting());
    move_to(&mut area, MoveTarget::Right);
    move_to(&mut area, MoveTarget::Right);

    assert_eq!(selection_range(&area), Some(0..2));
}

#[test]
fn test_cancel_selection_ends_sticky_mode() {
    let mut area = test_area("hello");
    press(&mut area, TextEditMsg::StartSelection);
    move_to(&mut area, MoveTarget::Right);

    press(&mut area, TextEditMsg::CancelSelection);
    assert!(!area.has_selection());
    assert!(!area.is_selecting());

    move_to(&mut area, MoveTarget::Right);
    assert!(!area.has_selection());
    assert_eq!(area.caret().index, 2);
}

#[test]
fn test_edit_ends_sticky_mode() {
    let mut area = test_area("hello");
    press(&mut area, TextEditMsg::StartSelection);
    move_to(&mut area, MoveTarget::Right);

    press(&mut area, TextEditMsg::InsertChar('x'));
    assert_eq!(area.text(), "xello");
    assert_eq!(area.caret().index, 1);
    assert!(!area.is_selecting());

    move_to(&mut area, MoveTarget::Right);
    assert!(!area.has_selection());
}

// ========================================================================
// Events
// ========================================================================

#[test]
fn test_selection_changes_emit_events() {
    let mut area = test_area("abc");
    area.drain_events().for_each(drop);

    select_to(&mut area, MoveTarget::Right);
    select_to(&mut area, MoveTarget::Left);

    let events: Vec<_> = area.drain_events().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        TextAreaEvent::SelectionChanged { selection: Some(_) }
    ));
    assert!(matches!(
        events[1],
        TextAreaEvent::SelectionChanged { selection: None }
    ));
}

#[test]
fn test_plain_move_without_selection_emits_nothing() {
    let mut area = test_area("abc");

    move_to(&mut area, MoveTarget::Right);

    assert_eq!(area.drain_events().count(), 0);
}

// ========================================================================
// Geometry
// ========================================================================

#[test]
fn test_selection_rects_include_newline_cell() {
    let mut area = test_area("ab\ncd");
    area.select(1..4);

    let SelectionGeometry::Rects(rects) = area.selection_geometry() else {
        panic!("expected rects");
    };

    assert_eq!(rects.len(), 2);
    assert_eq!((rects[0].line, rects[0].x, rects[0].width), (0, 10.0, 20.0));
    assert_eq!((rects[1].line, rects[1].x, rects[1].width), (1, 0.0, 10.0));
    assert_eq!(rects[1].y, 20.0);
    assert_eq!(rects[1].height, 20.0);
}

#[test]
fn test_selection_rects_follow_soft_wraps() {
    let mut area = wrapped_area("The quick brown fox", 105.0);
    area.select(4..16);

    let SelectionGeometry::Rects(rects) = area.selection_geometry() else {
        panic!("expected rects");
    };

    assert_eq!(rects.len(), 2);
    assert_eq!((rects[0].x, rects[0].width), (40.0, 60.0));
    assert_eq!((rects[1].x, rects[1].width), (0.0, 60.0));
}

#[test]
fn test_no_selection_has_empty_geometry() {
    let area = test_area("abc");
    assert!(area.selection_geometry().is_empty());
}

#[test]
fn test_inline_overlay_mode() {
    let config = TextAreaConfig {
        selection_render: SelectionRenderMode::InlineOverlay,
        ..TextAreaConfig::default()
    };
    let mut area = test_area_with_config("ab\ncd", 0.0, 0.0, config);
    area.select(1..4);

    let SelectionGeometry::InlineOverlay { lines } = area.selection_geometry() else {
        panic!("expected overlay");
    };

    assert_eq!(
        lines,
        vec![
            OverlaySpan {
                line: 0,
                start_col: 1,
                end_col: 3
            },
            OverlaySpan {
                line: 1,
                start_col: 0,
                end_col: 1
            },
        ]
    );
}
