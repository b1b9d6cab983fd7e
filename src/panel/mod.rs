// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The tour management panel.
//!
//! Each listed tour card is its own small machine. The enable toggle is not
//! optimistic: the displayed value only moves when the gateway reports the
//! authoritative state, and any failure forces it back to the pre-click
//! value. Delete requires an explicit confirmation and removes the card on
//! success only; the whole list is hidden once the last card is gone.

use crate::gateway::{DeleteTourResponse, GatewayError, ToggleTourResponse, TourRecord};
use crate::model::TourId;

/// An in-flight gateway round-trip scoped to one card. While present, the
/// card's affordances are held; everything else stays interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Toggle { requested: bool },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourCard {
    tour_id: TourId,
    name: String,
    description: String,
    enabled: bool,
    pending: Option<PendingAction>,
}

impl TourCard {
    pub fn tour_id(&self) -> TourId {
        self.tour_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The displayed checkbox value.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }
}

/// What a completed panel action should surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNotice {
    ToggleApplied { tour_id: TourId, enabled: bool },
    ToggleFailed { tour_id: TourId, message: String },
    Deleted { tour_id: TourId },
    DeleteFailed { tour_id: TourId, message: String },
    EditNotImplemented { tour_id: TourId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagementPanel {
    cards: Vec<TourCard>,
    confirm_delete: Option<TourId>,
}

impl ManagementPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the card list from a course listing.
    pub fn load(&mut self, records: &[TourRecord]) {
        self.cards = records
            .iter()
            .map(|record| TourCard {
                tour_id: TourId::new(record.id),
                name: record.name.clone(),
                description: record.description.clone(),
                enabled: record.enabled,
                pending: None,
            })
            .collect();
        self.confirm_delete = None;
    }

    pub fn cards(&self) -> &[TourCard] {
        &self.cards
    }

    pub fn card(&self, tour_id: TourId) -> Option<&TourCard> {
        self.cards.iter().find(|card| card.tour_id == tour_id)
    }

    /// The list container is hidden entirely once the last card is removed.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn confirming_delete(&self) -> Option<TourId> {
        self.confirm_delete
    }

    fn card_mut(&mut self, tour_id: TourId) -> Option<&mut TourCard> {
        self.cards.iter_mut().find(|card| card.tour_id == tour_id)
    }

    /// Starts a toggle round-trip. The checkbox is left at its pre-click
    /// value; the requested state is the opposite of what is displayed.
    /// Returns the value to send, or `None` when the card is unknown or
    /// already busy.
    pub fn begin_toggle(&mut self, tour_id: TourId) -> Option<bool> {
        let card = self.card_mut(tour_id)?;
        if card.pending.is_some() {
            return None;
        }
        let requested = !card.enabled;
        card.pending = Some(PendingAction::Toggle { requested });
        Some(requested)
    }

    /// Applies the gateway's answer to a toggle started with
    /// [`Self::begin_toggle`]. Only a successful response moves the
    /// checkbox, and only to the authoritative value it carries.
    pub fn complete_toggle(
        &mut self,
        tour_id: TourId,
        result: Result<ToggleTourResponse, GatewayError>,
    ) -> PanelNotice {
        let Some(card) = self.card_mut(tour_id) else {
            return PanelNotice::ToggleFailed {
                tour_id,
                message: "Error updating tour status. Please try again.".to_owned(),
            };
        };
        card.pending = None;

        match result {
            Ok(response) if response.success => {
                card.enabled = response.enabled;
                PanelNotice::ToggleApplied { tour_id, enabled: response.enabled }
            }
            Ok(_) => PanelNotice::ToggleFailed {
                tour_id,
                message: "Failed to update tour status. Please try again.".to_owned(),
            },
            Err(_) => PanelNotice::ToggleFailed {
                tour_id,
                message: "Error updating tour status. Please try again.".to_owned(),
            },
        }
    }

    /// First half of the delete flow: asks for confirmation.
    pub fn request_delete(&mut self, tour_id: TourId) {
        if self.card(tour_id).is_some() {
            self.confirm_delete = Some(tour_id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Second half: only a confirmed request starts the round-trip.
    pub fn begin_delete(&mut self, tour_id: TourId) -> bool {
        if self.confirm_delete != Some(tour_id) {
            return false;
        }
        self.confirm_delete = None;
        let Some(card) = self.card_mut(tour_id) else {
            return false;
        };
        if card.pending.is_some() {
            return false;
        }
        card.pending = Some(PendingAction::Delete);
        true
    }

    /// The card leaves the list on success only.
    pub fn complete_delete(
        &mut self,
        tour_id: TourId,
        result: Result<DeleteTourResponse, GatewayError>,
    ) -> PanelNotice {
        if let Some(card) = self.card_mut(tour_id) {
            card.pending = None;
        }

        match result {
            Ok(response) if response.success => {
                self.cards.retain(|card| card.tour_id != tour_id);
                PanelNotice::Deleted { tour_id }
            }
            Ok(_) => PanelNotice::DeleteFailed {
                tour_id,
                message: "Failed to delete tour. Please try again.".to_owned(),
            },
            Err(_) => PanelNotice::DeleteFailed {
                tour_id,
                message: "Error deleting tour. Please try again.".to_owned(),
            },
        }
    }

    /// Edit is a stub until the editor can be reopened from a fetched tour.
    pub fn edit(&self, tour_id: TourId) -> PanelNotice {
        PanelNotice::EditNotImplemented { tour_id }
    }
}
