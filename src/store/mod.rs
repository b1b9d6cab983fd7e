// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for tours on disk.
//!
//! The store module reads/writes the course folder format (meta file plus
//! per-record tour/custom files) used by both the TUI and the MCP server.

pub mod tour_folder;

pub use tour_folder::{StoreError, TourFolder, WriteDurability};
