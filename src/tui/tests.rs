// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{demo_page, App, Focus, FormField};
use crate::editor::EditorState;
use crate::gateway::TourGateway;
use crate::model::CourseId;
use crate::store::TourFolder;

fn temp_course_dir(test_name: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let mut dir = std::env::temp_dir();
    let pid = std::process::id();
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).expect("clock is monotonic").as_nanos();
    dir.push(format!("cicerone-tui-{test_name}-{pid}-{nanos}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn app_with_temp_folder(test_name: &str) -> (App, std::path::PathBuf) {
    let dir = temp_course_dir(test_name);
    let page = demo_page(CourseId::new(101));
    (App::new(TourFolder::new(&dir), page), dir)
}

#[test]
fn demo_page_carries_the_expected_chrome() {
    let page = demo_page(CourseId::new(5));
    assert_eq!(page.course_id(), CourseId::new(5));
    assert!(page.element(&"page-header".parse().expect("id")).is_some());
    assert!(page.element(&"section-1".parse().expect("id")).is_some());
    assert!(page.element(&"module-30".parse().expect("id")).is_some());
}

#[test]
fn authoring_via_keys_persists_a_tour() {
    let (mut app, dir) = app_with_temp_folder("authoring");

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.editor.state(), EditorState::PickingTarget);

    // Down to section-1 (the header is row 0), then pick it.
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.editor.state(), EditorState::EditingStep);

    type_text(&mut app, "Welcome");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "Intro text");
    app.handle_key(ctrl('r'));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.editor.state(), EditorState::PickingTarget);
    assert_eq!(app.editor.draft().steps().len(), 1);

    app.handle_key(key(KeyCode::Char('S')));
    assert_eq!(app.editor.state(), EditorState::Idle);
    assert_eq!(app.panel.cards().len(), 1);

    let tours = TourFolder::new(&dir)
        .get_course_tours(CourseId::new(101), false)
        .expect("list tours");
    assert_eq!(tours.len(), 1);
    assert!(tours[0].steps.contains("#section-1"));
    assert!(tours[0].steps.contains("\"reflex\":\"true\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn escape_cancels_the_step_and_typing_returns_to_page_keys() {
    let (mut app, dir) = app_with_temp_folder("cancel-step");

    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "dropped");
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.editor.state(), EditorState::PickingTarget);
    assert!(app.editor.draft().steps().is_empty());
    assert_eq!(app.form_field, FormField::Title);

    // 'q' reaches the shell again now that the form is closed.
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tab_switches_between_page_and_panel_focus() {
    let (mut app, dir) = app_with_temp_folder("focus");
    assert_eq!(app.focus, Focus::Page);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Panel);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Page);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sticky_authoring_leaves_a_start_button_after_materialization() {
    let (mut app, dir) = app_with_temp_folder("sticky");

    app.handle_key(key(KeyCode::Char('s')));
    assert_eq!(app.editor.state(), EditorState::StickyPlacementSelection);

    // Select section-1 as the placement, then author one step on module-10.
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.editor.state(), EditorState::PickingTarget);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "Forum");
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "Say hello");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('S')));
    assert_eq!(app.editor.state(), EditorState::Idle);

    // The sticky draft is custom-only: no playable tour yet, but its start
    // button is injected on the placement.
    assert!(app.panel.is_empty());
    let section = app.page.element(&"section-1".parse().expect("id")).expect("section");
    assert_eq!(section.buttons().len(), 1);

    // Clicking the start button materializes the draft into a playable tour.
    app.page_cursor = 1;
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.panel.cards().len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}
