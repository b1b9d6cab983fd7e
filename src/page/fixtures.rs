// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{CourseId, ElementId};

use super::{CoursePage, PageElement};

fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

/// A small three-section course page used by tests and the demo shell.
pub(crate) fn course_page_small() -> CoursePage {
    let mut page = CoursePage::new(CourseId::new(101));
    page.push_element(PageElement::header(eid("page-header")));
    page.push_element(PageElement::section(eid("section-1"), "Introduction"));
    page.push_element(PageElement::module(eid("module-10"), "Welcome forum"));
    page.push_element(PageElement::module(eid("module-11"), "Course outline"));
    page.push_element(PageElement::section(eid("section-2"), "Week 1"));
    page.push_element(PageElement::module(eid("module-20"), "Reading assignment"));
    page.push_element(PageElement::section(eid("section-3"), "Week 2"));
    page
}
