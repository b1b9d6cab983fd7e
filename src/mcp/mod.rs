// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer serves the persistence gateway RPCs over the course folder,
//! so external integrations author and manage tours through the same store
//! the interactive shell uses.

mod server;
mod types;

pub use server::CiceroneMcp;
