// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Tour drafts contain ordered steps with typed targets; the stringly wire
//! shape of the host transport lives in [`wire`] only.

pub mod ids;
pub mod step;
pub mod tour;
pub mod wire;

pub use ids::{CourseId, ElementId, Id, IdError, TourId};
pub use step::{ParsePlacementError, Placement, Step, StepTarget};
pub use tour::{Enabled, StickyPlacement, TourDraft};
pub use wire::{
    course_id_from_path_match, decode_enabled, decode_step, decode_steps, encode_step,
    encode_tour, ensure_selector_prefix, CustomTourPayload, WireDecodeError, WireStep, WireTour,
    CUSTOM_PAYLOAD_VERSION,
};
