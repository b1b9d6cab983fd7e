// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The tour editor controller.
//!
//! A single-owner state machine driving target picking, step editing and tour
//! persistence over one course page. All state lives on the controller
//! instance, nothing is ambient, so several editors can exist side by side
//! and the machine is testable without any UI.
//!
//! States: `Idle → PickingTarget → EditingStep → (PickingTarget | Idle)`,
//! with an orthogonal entry mode (ad-hoc vs. sticky) and a one-shot
//! `StickyPlacementSelection` sub-state entered only when a sticky tour has
//! no placement recorded yet.

pub mod form;

pub use form::StepForm;

use crate::gateway::{GatewayError, SaveTourResponse};
use crate::model::{
    encode_tour, CourseId, ElementId, Step, StickyPlacement, TourDraft, TourId, WireTour,
};
use crate::page::highlight::{HighlightController, PickEvent, PickMode};
use crate::page::CoursePage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    StickyPlacementSelection,
    PickingTarget,
    EditingStep,
}

/// How the current editing session was entered. Selected from `Idle` and
/// fixed for the session; the highlight controller's pick mode flips
/// independently once a placement has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    AdHoc,
    Sticky,
}

/// What a dispatched click did to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A target was picked; the step form is now open.
    StepEditorOpened,
    /// The sticky placement was recorded; picking continues in free mode.
    PlacementRecorded,
    /// A persisted custom tour's start button was clicked; the caller should
    /// materialize it through the gateway and refresh the page.
    StartRequested { custom_tour_id: TourId },
    Ignored,
}

/// Terminal result of one save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { tour_id: TourId, message: String },
    /// Application-level rejection or transport failure; the editor stays in
    /// place so nothing authored is lost.
    Rejected { message: String },
}

/// One row of the read-only step list projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub index: usize,
    pub target: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourEditor {
    course_id: CourseId,
    state: EditorState,
    mode: EditorMode,
    draft: TourDraft,
    current_step: Option<Step>,
    form: StepForm,
    highlight: HighlightController,
    indicator: Option<String>,
    save_in_flight: bool,
}

impl TourEditor {
    pub fn new(course_id: CourseId) -> Self {
        Self {
            course_id,
            state: EditorState::Idle,
            mode: EditorMode::AdHoc,
            draft: TourDraft::for_course(course_id),
            current_step: None,
            form: StepForm::new(),
            highlight: HighlightController::new(),
            indicator: None,
            save_in_flight: false,
        }
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &TourDraft {
        &self.draft
    }

    pub fn form(&self) -> &StepForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut StepForm {
        &mut self.form
    }

    pub fn indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// Surfaces the persistent start buttons for custom tours that already
    /// exist for this course, as done once when the editor initializes.
    pub fn init_placements(
        &self,
        page: &mut CoursePage,
        placements: &[(TourId, ElementId)],
    ) {
        for (custom_tour_id, container) in placements {
            self.highlight.set_placement_button(page, container, *custom_tour_id);
        }
    }

    /// `Idle --start-->` ad-hoc picking.
    pub fn start_tour(&mut self, page: &mut CoursePage) {
        if self.state != EditorState::Idle {
            return;
        }
        self.mode = EditorMode::AdHoc;
        self.highlight.enter(page, PickMode::Free);
        self.state = EditorState::PickingTarget;
    }

    /// `Idle --start-sticky-->` placement selection.
    pub fn start_sticky_tour(&mut self, page: &mut CoursePage) {
        if self.state != EditorState::Idle {
            return;
        }
        self.mode = EditorMode::Sticky;
        self.highlight.enter(page, PickMode::Sticky);
        self.state = EditorState::StickyPlacementSelection;
    }

    /// Routes a click on a page element through the highlight controller and
    /// advances the machine accordingly.
    pub fn click(&mut self, page: &mut CoursePage, id: &ElementId) -> ClickOutcome {
        let Some(event) = self.highlight.click(page, id) else {
            return ClickOutcome::Ignored;
        };

        match event {
            PickEvent::TargetPicked { target, indicator } => {
                if self.state != EditorState::PickingTarget {
                    return ClickOutcome::Ignored;
                }
                let picked = Step::from_pick(target);
                self.form.open_new(&picked);
                self.current_step = Some(picked);
                self.indicator = Some(indicator);
                self.state = EditorState::EditingStep;
                ClickOutcome::StepEditorOpened
            }
            PickEvent::PlacementChosen { container } => {
                if self.state != EditorState::StickyPlacementSelection {
                    return ClickOutcome::Ignored;
                }
                self.draft
                    .set_sticky_placement(StickyPlacement::from_container_id(&container));
                self.state = EditorState::PickingTarget;
                ClickOutcome::PlacementRecorded
            }
            PickEvent::StartCustomTour { custom_tour_id } => {
                ClickOutcome::StartRequested { custom_tour_id }
            }
        }
    }

    /// Commits the open form: appends the current step draft, or merges in
    /// place when the form was opened on an existing index. A stale index is
    /// a no-op. Either way the machine returns to picking with highlighting
    /// re-applied.
    pub fn save_step(&mut self, page: &mut CoursePage) {
        if self.state != EditorState::EditingStep {
            return;
        }

        match self.form.edit_index() {
            Some(index) => {
                if let Some(step) = self.draft.step_mut(index) {
                    self.form.apply_to(step);
                }
            }
            None => {
                if let Some(mut step) = self.current_step.take() {
                    self.form.apply_to(&mut step);
                    self.draft.push_step(step);
                }
            }
        }

        self.current_step = None;
        self.indicator = None;
        self.form.close();
        self.highlight.apply(page);
        self.state = EditorState::PickingTarget;
    }

    /// Discards the current step draft and returns to picking.
    pub fn cancel_step(&mut self, page: &mut CoursePage) {
        if self.state != EditorState::EditingStep {
            return;
        }
        self.current_step = None;
        self.indicator = None;
        self.form.close();
        self.highlight.apply(page);
        self.state = EditorState::PickingTarget;
    }

    /// Side transition: re-opens the form on a committed step, from any state
    /// where the step list is visible, without passing through a pick.
    /// Returns false (and changes nothing) when the index has gone stale.
    pub fn edit_step(&mut self, index: usize) -> bool {
        if !matches!(self.state, EditorState::PickingTarget | EditorState::EditingStep) {
            return false;
        }
        let Some(step) = self.draft.step(index) else {
            return false;
        };
        self.indicator = Some(format!("Editing: {}", step.target().label()));
        self.form.open_prefilled(index, step);
        self.current_step = None;
        self.state = EditorState::EditingStep;
        true
    }

    /// Starts a save round-trip: marks the save affordance in-flight and
    /// hands the caller the encoded draft to ship through the gateway.
    /// Returns `None` when the editor is idle or a save is already pending.
    pub fn begin_save_tour(&mut self) -> Option<WireTour> {
        if self.save_in_flight
            || !matches!(self.state, EditorState::PickingTarget | EditorState::EditingStep)
        {
            return None;
        }
        self.save_in_flight = true;
        Some(encode_tour(&self.draft))
    }

    /// Applies the authoritative gateway result for a save started with
    /// [`Self::begin_save_tour`]. Success resets the editor completely;
    /// rejection and transport failure leave everything in place.
    pub fn complete_save_tour(
        &mut self,
        page: &mut CoursePage,
        result: Result<SaveTourResponse, GatewayError>,
    ) -> SaveOutcome {
        self.save_in_flight = false;
        match result {
            Ok(response) if response.success => {
                let tour_id = TourId::new(response.tourid);
                self.reset(page);
                SaveOutcome::Saved { tour_id, message: response.message }
            }
            Ok(response) => SaveOutcome::Rejected {
                message: if response.message.is_empty() {
                    "Unknown error".to_owned()
                } else {
                    response.message
                },
            },
            Err(err) => SaveOutcome::Rejected { message: err.to_string() },
        }
    }

    /// `--cancel tour--> Idle`: full reset of draft, overlay and form.
    pub fn cancel_tour(&mut self, page: &mut CoursePage) {
        if self.state == EditorState::Idle {
            return;
        }
        self.reset(page);
    }

    /// The read-only ordered step list. Pure projection from the draft; the
    /// rows carry an index so the edit affordance can address the step.
    pub fn preview(&self) -> Vec<PreviewRow> {
        self.draft
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| PreviewRow {
                index,
                target: step.target().label(),
                title: step.title().to_owned(),
            })
            .collect()
    }

    fn reset(&mut self, page: &mut CoursePage) {
        self.highlight.remove(page);
        self.draft.reset(self.course_id);
        self.current_step = None;
        self.indicator = None;
        self.form.close();
        self.mode = EditorMode::AdHoc;
        self.state = EditorState::Idle;
    }
}

#[cfg(test)]
mod tests;
