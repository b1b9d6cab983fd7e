// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{CourseId, ElementId};
use super::step::Step;

/// Tri-state enabled flag. `Unset` is resolved at persistence time, where
/// absence is treated as enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enabled {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Enabled {
    pub fn resolve(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// The fixed entry-point element of a sticky tour.
///
/// A sticky tour is *entered* from its placement button; its steps keep
/// ordinary free-pick targets, so placements and step targets are distinct
/// types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StickyPlacement {
    Section(ElementId),
    Header,
}

impl StickyPlacement {
    /// Reads a placement back from a recorded container id.
    pub fn from_container_id(id: &ElementId) -> Option<Self> {
        if id.as_str() == "page-header" {
            return Some(Self::Header);
        }
        if id.as_str().starts_with("section-") {
            return Some(Self::Section(id.clone()));
        }
        None
    }

    pub fn container_id(&self) -> &str {
        match self {
            Self::Section(id) => id.as_str(),
            Self::Header => "page-header",
        }
    }
}

/// The in-memory aggregate being authored: everything that is serialized and
/// sent through the persistence gateway when the teacher saves.
///
/// Step order is insertion order and doubles as display and playback order;
/// steps have no ids of their own, the index is the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourDraft {
    name: String,
    description: String,
    path_match: String,
    steps: Vec<Step>,
    enabled: Enabled,
    sticky_placement: Option<StickyPlacement>,
}

impl TourDraft {
    /// A fresh draft bound to a course page, with the default name and path
    /// match the host derives from the course id.
    pub fn for_course(course_id: CourseId) -> Self {
        Self {
            name: format!("tour for course {course_id}"),
            description: format!("A tour for course {course_id}"),
            path_match: format!("/course/view.php?id={course_id}"),
            steps: Vec::new(),
            enabled: Enabled::Unset,
            sticky_placement: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn path_match(&self) -> &str {
        &self.path_match
    }

    pub fn enabled(&self) -> Enabled {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: Enabled) {
        self.enabled = enabled;
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Mutable access by index. Indices can go stale (a deletion race between
    /// preview and commit), so `None` is an expected answer and callers treat
    /// it as a no-op.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut Step> {
        self.steps.get_mut(index)
    }

    pub fn sticky_placement(&self) -> Option<&StickyPlacement> {
        self.sticky_placement.as_ref()
    }

    pub fn set_sticky_placement(&mut self, placement: Option<StickyPlacement>) {
        self.sticky_placement = placement;
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky_placement.is_some()
    }

    /// Drops all authored state and re-derives the defaults, as when the
    /// editor opens or the course context is re-established.
    pub fn reset(&mut self, course_id: CourseId) {
        *self = Self::for_course(course_id);
    }
}
