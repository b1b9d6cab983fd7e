// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::gateway::TourRecord;
use crate::model::WireTour;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourSaveParams {
    pub tour: WireTour,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourReadParams {
    pub tourid: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourListParams {
    pub courseid: i64,
    /// Only return enabled tours. Defaults to false.
    pub enabledonly: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TourListResponse {
    pub tours: Vec<TourRecord>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourDeleteParams {
    pub tourid: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourUpdateStepsParams {
    pub tourid: i64,
    /// JSON-encoded steps array, `"null"` or `"[]"` for none.
    pub steps: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourStartParams {
    pub tourid: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourToggleParams {
    pub tourid: i64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TourCreateFromCustomParams {
    pub courseid: i64,
}
