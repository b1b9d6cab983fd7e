// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;

use crate::gateway::{
    CreateFromCustomResponse, DeleteTourResponse, GatewayError, SaveTourResponse,
    StartTourResponse, ToggleTourResponse, TourGateway, TourRecord, UpdateStepsResponse,
};
use crate::model::{CourseId, TourId};
use crate::store::TourFolder;

use super::types::*;

fn gateway_error(err: GatewayError) -> ErrorData {
    match err {
        GatewayError::NotFound { tour_id } => ErrorData::resource_not_found(
            "tour not found",
            Some(serde_json::json!({ "tourid": tour_id.get() })),
        ),
        GatewayError::Transport { message } => ErrorData::internal_error(message, None),
    }
}

#[derive(Clone)]
pub struct CiceroneMcp {
    // Folder access is serialized so concurrent tool calls cannot race the id
    // counter or interleave record writes.
    folder: Arc<Mutex<TourFolder>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CiceroneMcp {
    pub fn new(folder: TourFolder) -> Self {
        Self {
            folder: Arc::new(Mutex::new(folder)),
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Create a tour from an authored draft. Sticky drafts (`tour.custom`)
    /// are held back as custom records until `tour.create_from_custom`.
    #[tool(name = "tour.save")]
    async fn tour_save(
        &self,
        params: Parameters<TourSaveParams>,
    ) -> Result<Json<SaveTourResponse>, ErrorData> {
        let folder = self.folder.lock().await;
        let response = folder.save_tour(&params.0.tour).map_err(gateway_error)?;
        Ok(Json(response))
    }

    /// Read one persisted tour; steps come back JSON-encoded.
    #[tool(name = "tour.read")]
    async fn tour_read(
        &self,
        params: Parameters<TourReadParams>,
    ) -> Result<Json<TourRecord>, ErrorData> {
        let folder = self.folder.lock().await;
        let record =
            folder.get_tour(TourId::new(params.0.tourid)).map_err(gateway_error)?;
        Ok(Json(record))
    }

    /// List a course's tours, optionally only the enabled ones.
    #[tool(name = "tour.list")]
    async fn tour_list(
        &self,
        params: Parameters<TourListParams>,
    ) -> Result<Json<TourListResponse>, ErrorData> {
        let TourListParams { courseid, enabledonly } = params.0;
        let folder = self.folder.lock().await;
        let tours = folder
            .get_course_tours(CourseId::new(courseid), enabledonly.unwrap_or(false))
            .map_err(gateway_error)?;
        Ok(Json(TourListResponse { tours }))
    }

    #[tool(name = "tour.delete")]
    async fn tour_delete(
        &self,
        params: Parameters<TourDeleteParams>,
    ) -> Result<Json<DeleteTourResponse>, ErrorData> {
        let folder = self.folder.lock().await;
        let response =
            folder.delete_tour(TourId::new(params.0.tourid)).map_err(gateway_error)?;
        Ok(Json(response))
    }

    /// Replace a tour's step list wholesale.
    #[tool(name = "tour.update_steps")]
    async fn tour_update_steps(
        &self,
        params: Parameters<TourUpdateStepsParams>,
    ) -> Result<Json<UpdateStepsResponse>, ErrorData> {
        let TourUpdateStepsParams { tourid, steps } = params.0;
        let folder = self.folder.lock().await;
        let response =
            folder.update_steps(TourId::new(tourid), &steps).map_err(gateway_error)?;
        Ok(Json(response))
    }

    /// Fetch a tour in the shape the playback engine consumes.
    #[tool(name = "tour.start")]
    async fn tour_start(
        &self,
        params: Parameters<TourStartParams>,
    ) -> Result<Json<StartTourResponse>, ErrorData> {
        let folder = self.folder.lock().await;
        let response =
            folder.start_tour(TourId::new(params.0.tourid)).map_err(gateway_error)?;
        Ok(Json(response))
    }

    /// Enable or disable a tour; the response carries the authoritative
    /// value the caller must display.
    #[tool(name = "tour.toggle_enabled")]
    async fn tour_toggle_enabled(
        &self,
        params: Parameters<TourToggleParams>,
    ) -> Result<Json<ToggleTourResponse>, ErrorData> {
        let TourToggleParams { tourid, enabled } = params.0;
        let folder = self.folder.lock().await;
        let response = folder
            .toggle_tour_enabled(TourId::new(tourid), enabled)
            .map_err(gateway_error)?;
        Ok(Json(response))
    }

    /// Materialize the first custom draft of a course into a playable tour.
    #[tool(name = "tour.create_from_custom")]
    async fn tour_create_from_custom(
        &self,
        params: Parameters<TourCreateFromCustomParams>,
    ) -> Result<Json<CreateFromCustomResponse>, ErrorData> {
        let folder = self.folder.lock().await;
        let response = folder
            .create_tour_from_custom(CourseId::new(params.0.courseid))
            .map_err(gateway_error)?;
        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for CiceroneMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Cicerone course tour server (tools: tour.save, tour.read, tour.list, tour.delete, tour.update_steps, tour.start, tour.toggle_enabled, tour.create_from_custom)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
