// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Highlight controller.
//!
//! Owns the two mutually exclusive pick modes and is the only writer of
//! transient page state. Application and removal are paired per mode:
//! free-pick toggles marks and listeners (same handler identity on both
//! sides), sticky-pick injects and deletes ephemeral placement buttons.
//! Removal is idempotent in both modes.

use crate::model::{ElementId, StepTarget, TourId};

use super::locator::locate_targets;
use super::{ButtonStyle, CoursePage, ElementKind, Handler, HighlightMark, InjectedButton};

pub const SELECT_PLACEMENT_LABEL: &str = "Select placement";
pub const TOUR_AVAILABLE_LABEL: &str = "Tour available";

/// Free-pick highlights every section and module; sticky-pick offers the
/// placement containers (sections and the page header) instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickMode {
    #[default]
    Free,
    Sticky,
}

/// What a dispatched click produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickEvent {
    /// A highlighted element was picked as a step target.
    TargetPicked { target: StepTarget, indicator: String },
    /// A select-placement button was clicked; the container id is the
    /// button's parent element.
    PlacementChosen { container: ElementId },
    /// A persisted custom tour's start button was clicked.
    StartCustomTour { custom_tour_id: TourId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightController {
    mode: PickMode,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PickMode {
        self.mode
    }

    /// Tears down the current mode's affordances, switches mode and applies
    /// the new one. The two modes are never simultaneously active.
    pub fn enter(&mut self, page: &mut CoursePage, mode: PickMode) {
        self.remove(page);
        self.mode = mode;
        self.apply(page);
    }

    /// (Re)applies the current mode's affordances. Locating runs fresh on
    /// every call.
    pub fn apply(&self, page: &mut CoursePage) {
        let candidates = locate_targets(page);
        match self.mode {
            PickMode::Free => {
                for id in candidates.sections() {
                    if let Some(element) = page.element_mut(id) {
                        element.add_mark(HighlightMark::Section);
                        element.add_listener(Handler::SectionClick);
                    }
                }
                for id in candidates.modules() {
                    if let Some(element) = page.element_mut(id) {
                        element.add_mark(HighlightMark::Module);
                        element.add_listener(Handler::ModuleClick);
                    }
                }
            }
            PickMode::Sticky => {
                for id in candidates.sections() {
                    if let Some(element) = page.element_mut(id) {
                        element.prepend_button(InjectedButton::new(
                            ButtonStyle::SectionStickyHighlight,
                            SELECT_PLACEMENT_LABEL,
                            Handler::StickySelect,
                        ));
                    }
                }
                if let Some(id) = candidates.header() {
                    if let Some(element) = page.element_mut(id) {
                        element.prepend_button(InjectedButton::new(
                            ButtonStyle::HeaderStickyHighlight,
                            SELECT_PLACEMENT_LABEL,
                            Handler::StickySelect,
                        ));
                    }
                }
            }
        }
    }

    /// Mode-aware removal. In sticky mode the dashed select affordances are
    /// deleted outright (solid start buttons stay); in free-pick mode marks
    /// are stripped and the exact listener identities detached.
    pub fn remove(&self, page: &mut CoursePage) {
        match self.mode {
            PickMode::Sticky => {
                for element in page.elements_mut() {
                    element.remove_buttons_where(|button| button.style().is_select_affordance());
                }
            }
            PickMode::Free => {
                for element in page.elements_mut() {
                    let id = element.id().as_str();
                    if id.starts_with("section-") {
                        element.remove_mark(HighlightMark::Section);
                        element.remove_listener(Handler::SectionClick);
                    } else if id.starts_with("module-") {
                        element.remove_mark(HighlightMark::Module);
                        element.remove_listener(Handler::ModuleClick);
                    }
                }
            }
        }
    }

    /// Injects the persistent "tour available" start button for an already
    /// persisted custom tour, as done when the editor initializes.
    pub fn set_placement_button(
        &self,
        page: &mut CoursePage,
        container: &ElementId,
        custom_tour_id: TourId,
    ) {
        let style = if container.as_str() == "page-header" {
            ButtonStyle::HeaderStickyButton
        } else {
            ButtonStyle::SectionStickyButton
        };
        if let Some(element) = page.element_mut(container) {
            element.prepend_button(
                InjectedButton::new(style, TOUR_AVAILABLE_LABEL, Handler::StickyStart)
                    .with_custom_tour_id(custom_tour_id),
            );
        }
    }

    /// Dispatches a click on an element to whatever affordance is wired
    /// there. Injected buttons win over the element's own listeners.
    pub fn click(&mut self, page: &mut CoursePage, id: &ElementId) -> Option<PickEvent> {
        enum Dispatch {
            Select { button_index: usize },
            Start { custom_tour_id: TourId },
            Pick { event: PickEvent },
        }

        let dispatch = {
            let element = page.element(id)?;
            if let Some(button_index) =
                element.buttons().iter().position(|b| b.handler() == Handler::StickySelect)
            {
                Some(Dispatch::Select { button_index })
            } else if let Some(button) =
                element.buttons().iter().find(|b| b.handler() == Handler::StickyStart)
            {
                button.custom_tour_id().map(|custom_tour_id| Dispatch::Start { custom_tour_id })
            } else if element.has_listener(Handler::SectionClick) {
                match element.kind() {
                    ElementKind::Section { section_name } => Some(Dispatch::Pick {
                        event: PickEvent::TargetPicked {
                            target: StepTarget::Section(id.clone()),
                            indicator: format!("Section: {section_name}"),
                        },
                    }),
                    _ => None,
                }
            } else if element.has_listener(Handler::ModuleClick) {
                match element.kind() {
                    ElementKind::Module { activity_name } => Some(Dispatch::Pick {
                        event: PickEvent::TargetPicked {
                            target: StepTarget::Module(id.clone()),
                            indicator: format!("Module: {activity_name}"),
                        },
                    }),
                    _ => None,
                }
            } else {
                None
            }
        }?;

        match dispatch {
            Dispatch::Select { button_index } => {
                // The clicked affordance turns solid and survives teardown;
                // the remaining dashed buttons are deleted, and the
                // controller drops straight back into free-pick for the
                // placement's steps.
                if let Some(element) = page.element_mut(id) {
                    element.buttons_mut()[button_index].mark_selected();
                }
                self.mode = PickMode::Sticky;
                self.remove(page);
                self.mode = PickMode::Free;
                self.apply(page);
                Some(PickEvent::PlacementChosen { container: id.clone() })
            }
            Dispatch::Start { custom_tour_id } => {
                Some(PickEvent::StartCustomTour { custom_tour_id })
            }
            Dispatch::Pick { event } => {
                self.remove(page);
                Some(event)
            }
        }
    }
}
