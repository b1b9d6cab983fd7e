// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{ClickOutcome, EditorMode, EditorState, SaveOutcome, TourEditor};
use crate::gateway::{GatewayError, SaveTourResponse};
use crate::model::{ElementId, Placement, StepTarget, StickyPlacement, TourId};
use crate::page::fixtures::course_page_small;
use crate::page::CoursePage;

fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

fn editor_with_page() -> (TourEditor, CoursePage) {
    let page = course_page_small();
    let editor = TourEditor::new(page.course_id());
    (editor, page)
}

fn fill_and_save_step(editor: &mut TourEditor, page: &mut CoursePage, title: &str, content: &str) {
    *editor.form_mut().title_mut() = title.to_owned();
    *editor.form_mut().content_mut() = content.to_owned();
    editor.save_step(page);
}

#[test]
fn adhoc_pick_edit_save_cycle() {
    let (mut editor, mut page) = editor_with_page();
    assert_eq!(editor.state(), EditorState::Idle);

    editor.start_tour(&mut page);
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert_eq!(editor.mode(), EditorMode::AdHoc);

    let outcome = editor.click(&mut page, &eid("section-3"));
    assert_eq!(outcome, ClickOutcome::StepEditorOpened);
    assert_eq!(editor.state(), EditorState::EditingStep);
    assert_eq!(editor.indicator(), Some("Section: Week 2"));

    fill_and_save_step(&mut editor, &mut page, "Welcome", "Intro text");
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert_eq!(editor.indicator(), None);

    let steps = editor.draft().steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].target(), &StepTarget::Section(eid("section-3")));
    assert_eq!(steps[0].title(), "Welcome");
    assert_eq!(steps[0].placement(), Placement::Right);
}

#[test]
fn start_is_ignored_outside_idle() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    let state = editor.state();
    editor.start_sticky_tour(&mut page);
    assert_eq!(editor.state(), state);
}

#[test]
fn cancel_step_discards_the_draft_step() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    editor.click(&mut page, &eid("module-10"));
    *editor.form_mut().title_mut() = "dropped".to_owned();

    editor.cancel_step(&mut page);
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert!(editor.draft().steps().is_empty());
    assert!(!editor.form().visible());
}

#[test]
fn edit_in_place_keeps_length_and_order() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    for (id, title) in [("section-1", "A"), ("section-2", "B"), ("section-3", "C")] {
        editor.click(&mut page, &eid(id));
        fill_and_save_step(&mut editor, &mut page, title, "body");
    }
    assert_eq!(editor.draft().steps().len(), 3);

    assert!(editor.edit_step(1));
    assert_eq!(editor.state(), EditorState::EditingStep);
    assert_eq!(editor.indicator(), Some("Editing: #section-2"));
    *editor.form_mut().title_mut() = "B'".to_owned();
    editor.save_step(&mut page);

    let titles: Vec<&str> = editor.draft().steps().iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["A", "B'", "C"]);
}

#[test]
fn stale_edit_index_is_a_no_op() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    for id in ["section-1", "section-2"] {
        editor.click(&mut page, &eid(id));
        fill_and_save_step(&mut editor, &mut page, "t", "c");
    }

    let before = editor.draft().clone();
    assert!(!editor.edit_step(5));
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert_eq!(editor.draft(), &before);
}

#[test]
fn sticky_flow_records_placement_then_free_picks() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_sticky_tour(&mut page);
    assert_eq!(editor.state(), EditorState::StickyPlacementSelection);
    assert_eq!(editor.mode(), EditorMode::Sticky);

    let outcome = editor.click(&mut page, &eid("section-3"));
    assert_eq!(outcome, ClickOutcome::PlacementRecorded);
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert_eq!(
        editor.draft().sticky_placement(),
        Some(&StickyPlacement::Section(eid("section-3")))
    );

    // Steps for the placement are picked in ordinary free mode.
    let outcome = editor.click(&mut page, &eid("module-20"));
    assert_eq!(outcome, ClickOutcome::StepEditorOpened);
}

#[test]
fn header_placement_is_recorded() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_sticky_tour(&mut page);
    editor.click(&mut page, &eid("page-header"));
    assert_eq!(editor.draft().sticky_placement(), Some(&StickyPlacement::Header));
}

#[test]
fn save_roundtrip_resets_on_success() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    editor.click(&mut page, &eid("section-1"));
    fill_and_save_step(&mut editor, &mut page, "Welcome", "Intro");

    let wire = editor.begin_save_tour().expect("wire tour");
    assert!(editor.save_in_flight());
    assert_eq!(wire.steps.len(), 1);
    assert_eq!(wire.steps[0].targetvalue, "#section-1");

    // A second save cannot start while one is pending.
    assert!(editor.begin_save_tour().is_none());

    let outcome = editor.complete_save_tour(
        &mut page,
        Ok(SaveTourResponse {
            success: true,
            tourid: 12,
            message: "Tour created successfully".to_owned(),
        }),
    );
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            tour_id: TourId::new(12),
            message: "Tour created successfully".to_owned()
        }
    );
    assert_eq!(editor.state(), EditorState::Idle);
    assert!(editor.draft().steps().is_empty());
    assert!(!editor.save_in_flight());
}

#[test]
fn save_rejection_leaves_the_editor_in_place() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    editor.click(&mut page, &eid("section-1"));
    fill_and_save_step(&mut editor, &mut page, "Welcome", "Intro");

    editor.begin_save_tour().expect("wire tour");
    let outcome = editor.complete_save_tour(
        &mut page,
        Ok(SaveTourResponse { success: false, tourid: 0, message: String::new() }),
    );
    assert_eq!(outcome, SaveOutcome::Rejected { message: "Unknown error".to_owned() });
    assert_eq!(editor.state(), EditorState::PickingTarget);
    assert_eq!(editor.draft().steps().len(), 1);
}

#[test]
fn save_transport_failure_leaves_the_editor_in_place() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    editor.click(&mut page, &eid("section-1"));
    fill_and_save_step(&mut editor, &mut page, "t", "c");

    editor.begin_save_tour().expect("wire tour");
    let outcome = editor.complete_save_tour(
        &mut page,
        Err(GatewayError::Transport { message: "connection lost".to_owned() }),
    );
    assert_eq!(
        outcome,
        SaveOutcome::Rejected { message: "transport failure: connection lost".to_owned() }
    );
    assert_eq!(editor.draft().steps().len(), 1);
}

#[test]
fn cancel_tour_resets_everything() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_sticky_tour(&mut page);
    editor.click(&mut page, &eid("section-2"));
    editor.click(&mut page, &eid("module-20"));
    fill_and_save_step(&mut editor, &mut page, "t", "c");

    editor.cancel_tour(&mut page);
    assert_eq!(editor.state(), EditorState::Idle);
    assert!(editor.draft().steps().is_empty());
    assert!(editor.draft().sticky_placement().is_none());
    assert_eq!(editor.indicator(), None);

    for element in page.elements() {
        assert!(element.marks().is_empty());
        assert!(element.listeners().is_empty());
    }
}

#[test]
fn preview_is_a_pure_projection() {
    let (mut editor, mut page) = editor_with_page();
    editor.start_tour(&mut page);
    for (id, title) in [("section-1", "First"), ("module-10", "Second")] {
        editor.click(&mut page, &eid(id));
        fill_and_save_step(&mut editor, &mut page, title, "body");
    }

    let rows = editor.preview();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].index, 0);
    assert_eq!(rows[0].target, "#section-1");
    assert_eq!(rows[0].title, "First");
    assert_eq!(rows[1].target, "#module-10");
}

#[test]
fn start_button_click_bubbles_up() {
    let (mut editor, mut page) = editor_with_page();
    editor.init_placements(&mut page, &[(TourId::new(3), eid("section-1"))]);
    let outcome = editor.click(&mut page, &eid("section-1"));
    assert_eq!(outcome, ClickOutcome::StartRequested { custom_tour_id: TourId::new(3) });
}
