// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The live course page the editor runs against.
//!
//! This is the one shared mutable resource of the system. Elements carry
//! stable ids (`section-*`, `module-*`, `page-header`) plus transient editor
//! state: highlight marks, injected placement buttons and attached click
//! handlers. Only the highlight controller writes any of it.

pub mod highlight;
pub mod locator;

#[cfg(test)]
pub(crate) mod fixtures;

use smallvec::SmallVec;

use crate::model::{CourseId, ElementId, TourId};

/// What an element is, with the descriptive attribute read at pick time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Section { section_name: String },
    Module { activity_name: String },
    Header,
}

/// A highlight class toggled on an element in free-pick mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMark {
    Section,
    Module,
}

impl HighlightMark {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Section => "section-highlight",
            Self::Module => "module-highlight",
        }
    }
}

/// Styling of an injected button. The `*StickyHighlight` variants are the
/// dashed select-placement affordances, removed wholesale when sticky
/// highlighting is torn down; the `*StickyButton` variants are the solid
/// start buttons that outlive the editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    SectionStickyHighlight,
    SectionStickyButton,
    HeaderStickyHighlight,
    HeaderStickyButton,
}

impl ButtonStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::SectionStickyHighlight => "section-sticky-highlight",
            Self::SectionStickyButton => "section-sticky-button",
            Self::HeaderStickyHighlight => "header-sticky-highlight",
            Self::HeaderStickyButton => "header-sticky-button",
        }
    }

    pub fn is_select_affordance(self) -> bool {
        matches!(self, Self::SectionStickyHighlight | Self::HeaderStickyHighlight)
    }

    fn selected(self) -> Self {
        match self {
            Self::SectionStickyHighlight | Self::SectionStickyButton => Self::SectionStickyButton,
            Self::HeaderStickyHighlight | Self::HeaderStickyButton => Self::HeaderStickyButton,
        }
    }
}

/// Stable handler identity, one per semantic action.
///
/// Attach and detach always refer to the same variant, so tearing down
/// highlighting removes exactly what applying it added and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    SectionClick,
    ModuleClick,
    StickySelect,
    StickyStart,
}

/// An ephemeral button prepended into a placement container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedButton {
    style: ButtonStyle,
    label: String,
    custom_tour_id: Option<TourId>,
    handler: Handler,
}

impl InjectedButton {
    pub fn new(style: ButtonStyle, label: impl Into<String>, handler: Handler) -> Self {
        Self {
            style,
            label: label.into(),
            custom_tour_id: None,
            handler,
        }
    }

    pub fn with_custom_tour_id(mut self, custom_tour_id: TourId) -> Self {
        self.custom_tour_id = Some(custom_tour_id);
        self
    }

    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn custom_tour_id(&self) -> Option<TourId> {
        self.custom_tour_id
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    fn mark_selected(&mut self) {
        self.style = self.style.selected();
    }
}

/// A live page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    id: ElementId,
    kind: ElementKind,
    marks: SmallVec<[HighlightMark; 2]>,
    listeners: SmallVec<[Handler; 2]>,
    buttons: Vec<InjectedButton>,
    position_relative: bool,
}

impl PageElement {
    pub fn section(id: ElementId, section_name: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Section { section_name: section_name.into() })
    }

    pub fn module(id: ElementId, activity_name: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Module { activity_name: activity_name.into() })
    }

    pub fn header(id: ElementId) -> Self {
        Self::new(id, ElementKind::Header)
    }

    fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            marks: SmallVec::new(),
            listeners: SmallVec::new(),
            buttons: Vec::new(),
            position_relative: false,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The descriptive attribute shown by the step indicator.
    pub fn descriptive_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Section { section_name } => Some(section_name),
            ElementKind::Module { activity_name } => Some(activity_name),
            ElementKind::Header => None,
        }
    }

    pub fn marks(&self) -> &[HighlightMark] {
        &self.marks
    }

    pub fn has_mark(&self, mark: HighlightMark) -> bool {
        self.marks.contains(&mark)
    }

    pub fn add_mark(&mut self, mark: HighlightMark) {
        if !self.marks.contains(&mark) {
            self.marks.push(mark);
        }
    }

    pub fn remove_mark(&mut self, mark: HighlightMark) {
        self.marks.retain(|existing| *existing != mark);
    }

    pub fn listeners(&self) -> &[Handler] {
        &self.listeners
    }

    pub fn has_listener(&self, handler: Handler) -> bool {
        self.listeners.contains(&handler)
    }

    /// Attaching the same handler twice is a no-op, as it is for a DOM
    /// listener registered with the same function value.
    pub fn add_listener(&mut self, handler: Handler) {
        if !self.listeners.contains(&handler) {
            self.listeners.push(handler);
        }
    }

    pub fn remove_listener(&mut self, handler: Handler) {
        self.listeners.retain(|existing| *existing != handler);
    }

    pub fn buttons(&self) -> &[InjectedButton] {
        &self.buttons
    }

    pub fn prepend_button(&mut self, button: InjectedButton) {
        self.position_relative = true;
        self.buttons.insert(0, button);
    }

    pub fn remove_buttons_where(&mut self, mut predicate: impl FnMut(&InjectedButton) -> bool) {
        self.buttons.retain(|button| !predicate(button));
    }

    pub fn position_relative(&self) -> bool {
        self.position_relative
    }

    pub(crate) fn buttons_mut(&mut self) -> &mut Vec<InjectedButton> {
        &mut self.buttons
    }
}

/// The rendered course page, elements in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    course_id: CourseId,
    elements: Vec<PageElement>,
}

impl CoursePage {
    pub fn new(course_id: CourseId) -> Self {
        Self { course_id, elements: Vec::new() }
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn push_element(&mut self, element: PageElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [PageElement] {
        &mut self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&PageElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut PageElement> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }
}
