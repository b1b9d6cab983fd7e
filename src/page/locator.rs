// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Target location.
//!
//! Locating is a fresh scan over the live page every time highlighting is
//! (re)applied; nothing is cached, so structural changes between edits are
//! picked up automatically. Candidates are keyed by id pattern, the same
//! contract the host page exposes (`section-*`, `module-*`, `page-header`).

use crate::model::ElementId;

use super::CoursePage;

/// The disjoint candidate sets a locate pass produces. Empty sets are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetCandidates {
    sections: Vec<ElementId>,
    modules: Vec<ElementId>,
    header: Option<ElementId>,
}

impl TargetCandidates {
    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    pub fn modules(&self) -> &[ElementId] {
        &self.modules
    }

    pub fn header(&self) -> Option<&ElementId> {
        self.header.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.modules.is_empty() && self.header.is_none()
    }
}

pub fn locate_targets(page: &CoursePage) -> TargetCandidates {
    let mut candidates = TargetCandidates::default();
    for element in page.elements() {
        let id = element.id();
        if id.as_str().starts_with("section-") {
            candidates.sections.push(id.clone());
        } else if id.as_str().starts_with("module-") {
            candidates.modules.push(id.clone());
        } else if id.as_str() == "page-header" {
            candidates.header = Some(id.clone());
        }
    }
    candidates
}
