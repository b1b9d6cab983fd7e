// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic text projections of the page and the step list.
//!
//! These renderers are pure: they read the page/draft and produce lines, so
//! the interactive shell and the tests see exactly the same output.

use crate::editor::PreviewRow;
use crate::page::{CoursePage, ElementKind, PageElement};

const NAME_COLUMN: usize = 14;

/// One rendered page line, paired with the index of the element it shows so
/// the shell can map a cursor row back to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub element_index: usize,
    pub text: String,
}

fn annotations(element: &PageElement) -> String {
    let mut parts = Vec::new();
    for mark in element.marks() {
        parts.push(format!("«{}»", mark.class_name()));
    }
    for button in element.buttons() {
        parts.push(format!("[{}]", button.label()));
    }
    parts.join(" ")
}

fn pad_to(text: &str, width: usize) -> String {
    let mut padded = text.to_owned();
    while padded.chars().count() < width {
        padded.push(' ');
    }
    padded
}

/// Renders each page element as one line: selector, descriptive name, then
/// the transient editor affordances (marks and injected buttons). Modules are
/// indented under their sections the way the page nests them.
pub fn render_page_lines(page: &CoursePage) -> Vec<PageLine> {
    let mut lines = Vec::with_capacity(page.elements().len());
    for (element_index, element) in page.elements().iter().enumerate() {
        let (indent, name) = match element.kind() {
            ElementKind::Header => ("", "Course header"),
            ElementKind::Section { section_name } => ("", section_name.as_str()),
            ElementKind::Module { activity_name } => ("  ", activity_name.as_str()),
        };

        let selector = format!("{indent}#{}", element.id());
        let mut text =
            format!("{} {}", pad_to(&selector, NAME_COLUMN), pad_to(name, NAME_COLUMN + 6));
        let annotations = annotations(element);
        if !annotations.is_empty() {
            text.push(' ');
            text.push_str(&annotations);
        }
        while text.ends_with(' ') {
            text.pop();
        }
        lines.push(PageLine { element_index, text });
    }
    lines
}

pub fn render_page_unicode(page: &CoursePage) -> String {
    render_page_lines(page)
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The read-only step list, one row per committed step with its edit
/// affordance, mirroring what the draft holds and nothing else.
pub fn render_preview(rows: &[PreviewRow]) -> String {
    let mut buffer = itoa::Buffer::new();
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let ordinal = buffer.format(row.index + 1).to_owned();
        lines.push(format!("Step {ordinal} {}: {} ✎", row.target, row.title));
    }
    lines.join("\n")
}
