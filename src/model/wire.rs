// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire encoding for the host transport.
//!
//! The host persists tours in a stringly-typed shape: booleans as
//! `"true"`/`"false"`, target types as numeric-string codes, selectors as
//! `#`-prefixed CSS ids. That shape exists only here; the rest of the crate
//! works with the real enums from [`crate::model`]. The mapping is fixed:
//!
//! | code | target kind            |
//! |------|------------------------|
//! | `0`  | selector (section, module, header) |
//! | `1`  | block                  |
//! | `2`  | unattached             |

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{CourseId, ElementId, IdError};
use super::step::{ParsePlacementError, Placement, Step, StepTarget};
use super::tour::{Enabled, TourDraft};

pub const TARGET_TYPE_SELECTOR: &str = "0";
pub const TARGET_TYPE_BLOCK: &str = "1";
pub const TARGET_TYPE_UNATTACHED: &str = "2";

/// Version stamp for the persisted custom (sticky) payload. Materialization
/// refuses unknown versions instead of guessing at field meanings.
pub const CUSTOM_PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WireStep {
    pub title: String,
    pub content: String,
    pub targettype: String,
    pub targetvalue: String,
    pub placement: String,
    pub orphan: String,
    pub backdrop: String,
    pub reflex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WireTour {
    pub steps: Vec<WireStep>,
    pub name: String,
    pub description: String,
    pub pathmatch: String,
    pub enabled: String,
    #[serde(default)]
    pub filter_values: String,
    #[serde(default)]
    pub sortorder: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placementid: Option<String>,
}

/// The raw blob persisted for a sticky draft until it is materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTourPayload {
    pub version: u32,
    pub tour: WireTour,
}

impl CustomTourPayload {
    pub fn new(tour: WireTour) -> Self {
        Self { version: CUSTOM_PAYLOAD_VERSION, tour }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireDecodeError {
    EmptySelector,
    UnrecognizedSelector { selector: String },
    InvalidElementId { selector: String, reason: IdError },
    Placement(ParsePlacementError),
    UnsupportedPayloadVersion { version: u32 },
}

impl fmt::Display for WireDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelector => f.write_str("selector target has an empty target value"),
            Self::UnrecognizedSelector { selector } => {
                write!(f, "selector '{selector}' does not address a known page element kind")
            }
            Self::InvalidElementId { selector, reason } => {
                write!(f, "selector '{selector}' carries an invalid element id: {reason}")
            }
            Self::Placement(err) => write!(f, "{err}"),
            Self::UnsupportedPayloadVersion { version } => {
                write!(f, "unsupported custom payload version {version}")
            }
        }
    }
}

impl std::error::Error for WireDecodeError {}

impl From<ParsePlacementError> for WireDecodeError {
    fn from(value: ParsePlacementError) -> Self {
        Self::Placement(value)
    }
}

/// Prefixes `#` exactly once. Values already carrying the prefix are passed
/// through untouched.
pub fn ensure_selector_prefix(value: &str) -> String {
    if value.starts_with('#') {
        value.to_owned()
    } else {
        format!("#{value}")
    }
}

fn encode_bool(value: bool) -> String {
    if value { "true".to_owned() } else { "false".to_owned() }
}

// The host only ever compares against the literal string "true"; any other
// value, including "1", reads as false.
fn decode_bool(value: &str) -> bool {
    value == "true"
}

fn encode_enabled(value: Enabled) -> String {
    match value {
        Enabled::Unset => String::new(),
        Enabled::Enabled => "true".to_owned(),
        Enabled::Disabled => "false".to_owned(),
    }
}

/// Resolves the tri-state wire flag the way the host does at persistence
/// time: absence counts as enabled.
pub fn decode_enabled(value: &str) -> bool {
    value.is_empty() || value == "true" || value == "1"
}

pub fn encode_step(step: &Step) -> WireStep {
    let (targettype, targetvalue) = match step.target() {
        StepTarget::Section(_) | StepTarget::Module(_) | StepTarget::Header => {
            let selector = step.target().selector().unwrap_or_default();
            (TARGET_TYPE_SELECTOR.to_owned(), ensure_selector_prefix(&selector))
        }
        StepTarget::Block(name) => (TARGET_TYPE_BLOCK.to_owned(), name.clone()),
        StepTarget::Unattached => (TARGET_TYPE_UNATTACHED.to_owned(), String::new()),
    };

    WireStep {
        title: step.title().to_owned(),
        content: step.content().to_owned(),
        targettype,
        targetvalue,
        placement: step.placement().to_string(),
        orphan: encode_bool(step.orphan()),
        backdrop: encode_bool(step.backdrop()),
        reflex: encode_bool(step.reflex()),
    }
}

fn decode_target(targettype: &str, targetvalue: &str) -> Result<StepTarget, WireDecodeError> {
    match targettype {
        TARGET_TYPE_BLOCK => Ok(StepTarget::Block(targetvalue.to_owned())),
        TARGET_TYPE_UNATTACHED => Ok(StepTarget::Unattached),
        // Everything else is treated as a selector, matching the host's
        // default-to-selector behavior for unknown codes.
        _ => {
            if targetvalue.is_empty() {
                return Err(WireDecodeError::EmptySelector);
            }
            let selector = ensure_selector_prefix(targetvalue);
            let token = &selector[1..];
            if token == "page-header" {
                return Ok(StepTarget::Header);
            }
            let element_id = ElementId::new(token).map_err(|reason| {
                WireDecodeError::InvalidElementId { selector: selector.clone(), reason }
            })?;
            if token.starts_with("section-") {
                Ok(StepTarget::Section(element_id))
            } else if token.starts_with("module-") {
                Ok(StepTarget::Module(element_id))
            } else {
                Err(WireDecodeError::UnrecognizedSelector { selector })
            }
        }
    }
}

pub fn decode_step(wire: &WireStep) -> Result<Step, WireDecodeError> {
    let target = decode_target(&wire.targettype, &wire.targetvalue)?;
    // Records persisted without a placement default to bottom.
    let placement = if wire.placement.is_empty() {
        Placement::Bottom
    } else {
        wire.placement.parse::<Placement>()?
    };

    let mut step = Step::new(target, placement);
    step.set_title(wire.title.clone());
    step.set_content(wire.content.clone());
    step.set_orphan(decode_bool(&wire.orphan));
    step.set_backdrop(decode_bool(&wire.backdrop));
    step.set_reflex(decode_bool(&wire.reflex));
    Ok(step)
}

pub fn decode_steps(wire: &[WireStep]) -> Result<Vec<Step>, WireDecodeError> {
    wire.iter().map(decode_step).collect()
}

pub fn encode_tour(draft: &TourDraft) -> WireTour {
    WireTour {
        steps: draft.steps().iter().map(encode_step).collect(),
        name: draft.name().to_owned(),
        description: draft.description().to_owned(),
        pathmatch: draft.path_match().to_owned(),
        enabled: encode_enabled(draft.enabled()),
        filter_values: String::new(),
        sortorder: String::new(),
        custom: draft.is_sticky(),
        placementid: draft
            .sticky_placement()
            .map(|placement| placement.container_id().to_owned()),
    }
}

/// Pulls the course id out of a path match like `/course/view.php?id=7`.
pub fn course_id_from_path_match(path_match: &str) -> Option<CourseId> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"id=(\d+)").expect("course id pattern"));
    let captures = pattern.captures(path_match)?;
    let id = captures.get(1)?.as_str().parse::<i64>().ok()?;
    Some(CourseId::new(id))
}
