// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::ElementId;

/// The side of the target element the step popup is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Cycles in the order the step form offers them.
    pub fn next(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Right,
            Self::Right => Self::Top,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError {
    value: String,
}

impl ParsePlacementError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown placement '{}'", self.value)
    }
}

impl std::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParsePlacementError { value: other.to_owned() }),
        }
    }
}

/// What a step points at, carried as an explicit tagged union end-to-end.
///
/// The wire form (a CSS selector string plus a numeric type code) is produced
/// and re-parsed only at the wire boundary; inside the editor no string
/// matching on id prefixes is needed to recover the kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepTarget {
    /// A course section, e.g. `section-3`.
    Section(ElementId),
    /// An activity module, e.g. `module-42`.
    Module(ElementId),
    /// The page header.
    Header,
    /// A named block region; not producible by the pick flow, kept for
    /// persisted records authored elsewhere.
    Block(String),
    /// Shown without an anchor element.
    Unattached,
}

impl StepTarget {
    /// The `#`-prefixed CSS selector, for targets that have one.
    pub fn selector(&self) -> Option<String> {
        match self {
            Self::Section(id) | Self::Module(id) => Some(format!("#{id}")),
            Self::Header => Some("#page-header".to_owned()),
            Self::Block(_) | Self::Unattached => None,
        }
    }

    /// Short human label used by the step indicator and preview rows.
    pub fn label(&self) -> String {
        match self {
            Self::Section(id) | Self::Module(id) => format!("#{id}"),
            Self::Header => "#page-header".to_owned(),
            Self::Block(name) => name.clone(),
            Self::Unattached => "(unattached)".to_owned(),
        }
    }

    pub fn is_unattached(&self) -> bool {
        matches!(self, Self::Unattached)
    }
}

/// One popup in a tour, anchored to a target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    title: String,
    content: String,
    target: StepTarget,
    placement: Placement,
    orphan: bool,
    backdrop: bool,
    reflex: bool,
}

impl Step {
    pub fn new(target: StepTarget, placement: Placement) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            target,
            placement,
            orphan: false,
            backdrop: false,
            reflex: false,
        }
    }

    /// Seeds a step the way a click on a highlighted element does: anchored
    /// right, backdrop on, no orphan, no reflex.
    pub fn from_pick(target: StepTarget) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            target,
            placement: Placement::Right,
            orphan: false,
            backdrop: true,
            reflex: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn target(&self) -> &StepTarget {
        &self.target
    }

    pub fn set_target(&mut self, target: StepTarget) {
        self.target = target;
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    pub fn orphan(&self) -> bool {
        self.orphan
    }

    pub fn set_orphan(&mut self, orphan: bool) {
        self.orphan = orphan;
    }

    pub fn backdrop(&self) -> bool {
        self.backdrop
    }

    pub fn set_backdrop(&mut self, backdrop: bool) {
        self.backdrop = backdrop;
    }

    pub fn reflex(&self) -> bool {
        self.reflex
    }

    pub fn set_reflex(&mut self, reflex: bool) {
        self.reflex = reflex;
    }

    /// A step is safe to persist once it has an anchor (or is explicitly
    /// unattached) and both texts are filled in. Save is not gated on this;
    /// callers use it for advisory warnings only.
    pub fn is_complete(&self) -> bool {
        let anchored = self.target.is_unattached() || self.target.selector().is_some();
        anchored && !self.title.is_empty() && !self.content.is_empty()
    }
}
