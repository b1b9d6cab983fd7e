// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The step editor form.
//!
//! A small field buffer bound to the currently selected target. Opening it
//! without an edit index implies a new step (fields cleared, defaults taken
//! from the pick); opening with an index pre-fills from the existing step and
//! the commit path merges back in place.

use crate::model::{Placement, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepForm {
    title: String,
    content: String,
    placement: Placement,
    orphan: bool,
    backdrop: bool,
    reflex: bool,
    edit_index: Option<usize>,
    visible: bool,
}

impl Default for StepForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            placement: Placement::Right,
            orphan: false,
            backdrop: true,
            reflex: false,
            edit_index: None,
            visible: false,
        }
    }
}

impl StepForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the form for a freshly picked step: texts cleared, placement and
    /// behavior flags seeded from the pick.
    pub fn open_new(&mut self, picked: &Step) {
        self.title.clear();
        self.content.clear();
        self.placement = picked.placement();
        self.orphan = picked.orphan();
        self.backdrop = picked.backdrop();
        self.reflex = picked.reflex();
        self.edit_index = None;
        self.visible = true;
    }

    /// Opens the form pre-filled from an existing step; the commit path will
    /// update `steps[edit_index]` in place instead of appending.
    pub fn open_prefilled(&mut self, edit_index: usize, step: &Step) {
        self.title = step.title().to_owned();
        self.content = step.content().to_owned();
        self.placement = step.placement();
        self.orphan = step.orphan();
        self.backdrop = step.backdrop();
        self.reflex = step.reflex();
        self.edit_index = Some(edit_index);
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.edit_index = None;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn cycle_placement(&mut self) {
        self.placement = self.placement.next();
    }

    pub fn orphan(&self) -> bool {
        self.orphan
    }

    pub fn toggle_orphan(&mut self) {
        self.orphan = !self.orphan;
    }

    pub fn backdrop(&self) -> bool {
        self.backdrop
    }

    pub fn toggle_backdrop(&mut self) {
        self.backdrop = !self.backdrop;
    }

    pub fn reflex(&self) -> bool {
        self.reflex
    }

    pub fn toggle_reflex(&mut self) {
        self.reflex = !self.reflex;
    }

    /// Writes the form fields onto a step.
    pub fn apply_to(&self, step: &mut Step) {
        step.set_title(self.title.clone());
        step.set_content(self.content.clone());
        step.set_placement(self.placement);
        step.set_orphan(self.orphan);
        step.set_backdrop(self.backdrop);
        step.set_reflex(self.reflex);
    }
}

#[cfg(test)]
mod tests {
    use super::StepForm;
    use crate::model::{ElementId, Placement, Step, StepTarget};

    fn picked_step() -> Step {
        Step::from_pick(StepTarget::Section(
            ElementId::new("section-1").expect("element id"),
        ))
    }

    #[test]
    fn open_new_clears_texts_and_seeds_flags() {
        let mut form = StepForm::new();
        *form.title_mut() = "stale".to_owned();
        form.open_new(&picked_step());
        assert!(form.visible());
        assert_eq!(form.title(), "");
        assert_eq!(form.content(), "");
        assert_eq!(form.placement(), Placement::Right);
        assert!(form.backdrop());
        assert_eq!(form.edit_index(), None);
    }

    #[test]
    fn open_prefilled_keeps_step_fields_and_index() {
        let mut step = picked_step();
        step.set_title("Welcome");
        step.set_content("Intro");
        step.set_placement(Placement::Left);

        let mut form = StepForm::new();
        form.open_prefilled(1, &step);
        assert_eq!(form.title(), "Welcome");
        assert_eq!(form.placement(), Placement::Left);
        assert_eq!(form.edit_index(), Some(1));
    }

    #[test]
    fn apply_writes_every_field() {
        let mut form = StepForm::new();
        form.open_new(&picked_step());
        *form.title_mut() = "Title".to_owned();
        *form.content_mut() = "Body".to_owned();
        form.cycle_placement();
        form.toggle_reflex();

        let mut step = picked_step();
        form.apply_to(&mut step);
        assert_eq!(step.title(), "Title");
        assert_eq!(step.content(), "Body");
        assert_eq!(step.placement(), Placement::Top);
        assert!(step.reflex());
    }
}
