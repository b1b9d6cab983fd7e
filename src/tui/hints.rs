// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Context-sensitive footer hints.

use crate::editor::EditorState;

use super::Focus;

/// `(key, label)` pairs for the footer, chosen by what can be pressed now.
pub(super) fn footer_hints(state: EditorState, focus: Focus) -> &'static [(&'static str, &'static str)] {
    match state {
        EditorState::EditingStep => &[
            ("Enter", "save step"),
            ("Esc", "cancel step"),
            ("Tab", "title/content"),
            ("^P", "placement"),
            ("^O", "orphan"),
            ("^B", "backdrop"),
            ("^R", "reflex"),
        ],
        EditorState::StickyPlacementSelection => &[
            ("↑↓", "move"),
            ("Enter", "select placement"),
            ("c", "cancel tour"),
            ("q", "quit"),
        ],
        EditorState::PickingTarget => &[
            ("↑↓", "move"),
            ("Enter", "pick element"),
            ("1-9", "edit step"),
            ("S", "save tour"),
            ("c", "cancel tour"),
        ],
        EditorState::Idle => match focus {
            Focus::Page => &[
                ("n", "new tour"),
                ("s", "sticky tour"),
                ("Enter", "click element"),
                ("Tab", "tours"),
                ("q", "quit"),
            ],
            Focus::Panel => &[
                ("↑↓", "move"),
                ("t", "toggle"),
                ("d", "delete"),
                ("e", "edit"),
                ("Tab", "page"),
                ("q", "quit"),
            ],
        },
    }
}
