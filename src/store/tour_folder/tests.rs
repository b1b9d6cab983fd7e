// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{TourFolder, WriteDurability};
use crate::gateway::{GatewayError, TourGateway};
use crate::model::{
    decode_steps, encode_tour, CourseId, ElementId, Step, StepTarget, StickyPlacement, TourDraft,
    TourId, WireStep,
};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("cicerone-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

fn draft_with_steps(course_id: CourseId, titles: &[&str]) -> TourDraft {
    let mut draft = TourDraft::for_course(course_id);
    for (index, title) in titles.iter().enumerate() {
        let mut step =
            Step::from_pick(StepTarget::Section(eid(&format!("section-{}", index + 1))));
        step.set_title(*title);
        step.set_content("body");
        draft.push_step(step);
    }
    draft
}

#[test]
fn save_and_get_round_trips_steps_in_order() {
    let tmp = TempDir::new("save-get");
    let folder = TourFolder::new(tmp.path());
    let draft = draft_with_steps(CourseId::new(7), &["one", "two", "three"]);

    let response = folder.save_tour(&encode_tour(&draft)).expect("save");
    assert!(response.success);
    let tour_id = TourId::new(response.tourid);

    let record = folder.get_tour(tour_id).expect("get");
    assert_eq!(record.courseid, 7);
    assert!(record.enabled, "unset enabled resolves to enabled");

    let wire_steps: Vec<WireStep> = serde_json::from_str(&record.steps).expect("steps json");
    let steps = decode_steps(&wire_steps).expect("decode steps");
    assert_eq!(steps.as_slice(), draft.steps());
}

#[test]
fn ids_are_allocated_sequentially() {
    let tmp = TempDir::new("ids");
    let folder = TourFolder::new(tmp.path());
    let draft = draft_with_steps(CourseId::new(1), &["a"]);

    let first = folder.save_tour(&encode_tour(&draft)).expect("save");
    let second = folder.save_tour(&encode_tour(&draft)).expect("save");
    assert_eq!(second.tourid, first.tourid + 1);
}

#[test]
fn missing_course_id_is_an_application_rejection() {
    let tmp = TempDir::new("bad-path");
    let folder = TourFolder::new(tmp.path());
    let mut wire = encode_tour(&draft_with_steps(CourseId::new(1), &[]));
    wire.pathmatch = "/course/view.php".to_owned();

    let response = folder.save_tour(&wire).expect("save");
    assert!(!response.success);
    assert_eq!(response.tourid, 0);
}

#[test]
fn get_unknown_tour_is_not_found() {
    let tmp = TempDir::new("unknown");
    let folder = TourFolder::new(tmp.path());
    assert_eq!(
        folder.get_tour(TourId::new(99)).unwrap_err(),
        GatewayError::NotFound { tour_id: TourId::new(99) }
    );
}

#[test]
fn course_listing_filters_by_course_and_enabled() {
    let tmp = TempDir::new("listing");
    let folder = TourFolder::new(tmp.path());

    let first = folder
        .save_tour(&encode_tour(&draft_with_steps(CourseId::new(1), &["a"])))
        .expect("save");
    folder
        .save_tour(&encode_tour(&draft_with_steps(CourseId::new(2), &["b"])))
        .expect("save");
    folder
        .toggle_tour_enabled(TourId::new(first.tourid), false)
        .expect("toggle");

    let all = folder.get_course_tours(CourseId::new(1), false).expect("list");
    assert_eq!(all.len(), 1);
    assert!(!all[0].enabled);

    let enabled = folder.get_course_tours(CourseId::new(1), true).expect("list");
    assert!(enabled.is_empty());
}

#[test]
fn toggle_returns_the_authoritative_value() {
    let tmp = TempDir::new("toggle");
    let folder = TourFolder::new(tmp.path());
    let saved = folder
        .save_tour(&encode_tour(&draft_with_steps(CourseId::new(1), &["a"])))
        .expect("save");

    let response =
        folder.toggle_tour_enabled(TourId::new(saved.tourid), false).expect("toggle");
    assert!(response.success);
    assert!(!response.enabled);
    assert!(!folder.get_tour(TourId::new(saved.tourid)).expect("get").enabled);
}

#[test]
fn delete_removes_the_record() {
    let tmp = TempDir::new("delete");
    let folder = TourFolder::new(tmp.path());
    let saved = folder
        .save_tour(&encode_tour(&draft_with_steps(CourseId::new(1), &["a"])))
        .expect("save");
    let tour_id = TourId::new(saved.tourid);

    assert!(folder.delete_tour(tour_id).expect("delete").success);
    assert_eq!(
        folder.delete_tour(tour_id).unwrap_err(),
        GatewayError::NotFound { tour_id }
    );
}

#[test]
fn update_steps_replaces_and_normalizes() {
    let tmp = TempDir::new("update");
    let folder = TourFolder::new(tmp.path());
    let saved = folder
        .save_tour(&encode_tour(&draft_with_steps(CourseId::new(1), &["a", "b"])))
        .expect("save");
    let tour_id = TourId::new(saved.tourid);

    // An unprefixed target value is normalized on the way in.
    let replacement = serde_json::json!([{
        "title": "only",
        "content": "body",
        "targettype": "0",
        "targetvalue": "module-9",
        "placement": "left",
        "orphan": "false",
        "backdrop": "true",
        "reflex": "false"
    }])
    .to_string();
    assert!(folder.update_steps(tour_id, &replacement).expect("update").success);

    let record = folder.get_tour(tour_id).expect("get");
    let wire_steps: Vec<WireStep> = serde_json::from_str(&record.steps).expect("steps json");
    assert_eq!(wire_steps.len(), 1);
    assert_eq!(wire_steps[0].targetvalue, "#module-9");

    assert!(folder.update_steps(tour_id, "null").expect("update").success);
    let record = folder.get_tour(tour_id).expect("get");
    assert_eq!(record.steps, "[]");
}

#[test]
fn sticky_save_creates_a_custom_record_only() {
    let tmp = TempDir::new("sticky");
    let folder = TourFolder::new(tmp.path());
    let mut draft = draft_with_steps(CourseId::new(4), &["a"]);
    draft.set_sticky_placement(Some(StickyPlacement::Section(eid("section-3"))));

    let response = folder.save_tour(&encode_tour(&draft)).expect("save");
    assert!(response.success);
    assert_eq!(response.message, "Custom tour created successfully");

    // Nothing playable yet; the draft is held back for materialization.
    assert!(folder.get_course_tours(CourseId::new(4), false).expect("list").is_empty());
    assert_eq!(
        folder.custom_placements(CourseId::new(4)).expect("placements"),
        vec![(TourId::new(response.tourid), eid("section-3"))]
    );
}

#[test]
fn materialization_creates_a_playable_tour() {
    let tmp = TempDir::new("materialize");
    let folder = TourFolder::new(tmp.path()).with_durability(WriteDurability::Durable);
    let mut draft = draft_with_steps(CourseId::new(4), &["a", "b"]);
    draft.set_sticky_placement(Some(StickyPlacement::Header));
    folder.save_tour(&encode_tour(&draft)).expect("save");

    let response = folder.create_tour_from_custom(CourseId::new(4)).expect("materialize");
    assert!(response.success);
    assert_eq!(response.reload, Some(true));
    assert_eq!(response.message, "Tour created successfully with 2 steps");

    let started = folder.start_tour(TourId::new(response.tourid)).expect("start");
    let wire_steps: Vec<WireStep> = serde_json::from_str(&started.steps).expect("steps json");
    assert_eq!(wire_steps.len(), 2);
}

#[test]
fn materialization_without_custom_tour_is_rejected() {
    let tmp = TempDir::new("no-custom");
    let folder = TourFolder::new(tmp.path());
    let response = folder.create_tour_from_custom(CourseId::new(9)).expect("call");
    assert!(!response.success);
    assert_eq!(response.message, "No custom tour found for this course");
}

#[test]
fn materialization_rejects_stepless_drafts() {
    let tmp = TempDir::new("stepless");
    let folder = TourFolder::new(tmp.path());
    let mut draft = draft_with_steps(CourseId::new(4), &[]);
    draft.set_sticky_placement(Some(StickyPlacement::Header));
    folder.save_tour(&encode_tour(&draft)).expect("save");

    let response = folder.create_tour_from_custom(CourseId::new(4)).expect("call");
    assert!(!response.success);
    assert_eq!(response.message, "Custom tour has no steps defined");
}
