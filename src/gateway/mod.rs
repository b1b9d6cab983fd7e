// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The persistence gateway RPC surface.
//!
//! The host exposes create/read/update/delete/toggle of tours over its RPC
//! transport; this module is the typed client-side contract. Two failure
//! shapes exist and are kept apart: a [`GatewayError`] is a transport-level
//! failure (the request never completed), while `success: false` inside an
//! otherwise-delivered response is an application-level rejection. Both are
//! terminal for the attempt; there is no retry policy.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{CourseId, TourId, WireTour};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SaveTourResponse {
    pub success: bool,
    pub tourid: i64,
    pub message: String,
}

/// A persisted tour as the gateway returns it: steps stay JSON-encoded, the
/// enabled flag is already resolved to a real boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TourRecord {
    pub id: i64,
    pub courseid: i64,
    pub name: String,
    pub description: String,
    pub steps: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTourResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateStepsResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StartTourResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub steps: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToggleTourResponse {
    pub success: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateFromCustomResponse {
    pub success: bool,
    pub tourid: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    Transport { message: String },
    NotFound { tour_id: TourId },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport failure: {message}"),
            Self::NotFound { tour_id } => write!(f, "tour {tour_id} not found"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// The RPC surface the editor and management panel round-trip through.
pub trait TourGateway {
    /// Creates a tour; sticky drafts are always inserted as custom records.
    fn save_tour(&self, tour: &WireTour) -> Result<SaveTourResponse, GatewayError>;

    fn get_tour(&self, tour_id: TourId) -> Result<TourRecord, GatewayError>;

    fn get_course_tours(
        &self,
        course_id: CourseId,
        enabled_only: bool,
    ) -> Result<Vec<TourRecord>, GatewayError>;

    fn delete_tour(&self, tour_id: TourId) -> Result<DeleteTourResponse, GatewayError>;

    fn update_steps(
        &self,
        tour_id: TourId,
        steps_json: &str,
    ) -> Result<UpdateStepsResponse, GatewayError>;

    fn start_tour(&self, tour_id: TourId) -> Result<StartTourResponse, GatewayError>;

    fn toggle_tour_enabled(
        &self,
        tour_id: TourId,
        enabled: bool,
    ) -> Result<ToggleTourResponse, GatewayError>;

    /// Materializes the first custom draft for the course into a playable
    /// tour and signals the caller to reload the page.
    fn create_tour_from_custom(
        &self,
        course_id: CourseId,
    ) -> Result<CreateFromCustomResponse, GatewayError>;
}
