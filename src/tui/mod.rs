// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive authoring shell (ratatui + crossterm) over a
//! rendered course page: element picking on the left, the tour editor and the
//! management panel on the right, a hint footer and a toast line. Gateway
//! round-trips run between the editor's/panel's begin and complete halves, so
//! only the issuing affordance is held while a request is out.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::editor::{ClickOutcome, EditorState, SaveOutcome, TourEditor};
use crate::gateway::TourGateway;
use crate::model::{CourseId, ElementId, TourId};
use crate::page::{CoursePage, PageElement};
use crate::panel::{ManagementPanel, PanelNotice, PendingAction};
use crate::render::{render_page_lines, render_preview};
use crate::store::TourFolder;

mod hints;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_TTL: Duration = Duration::from_secs(4);

/// A built-in sample course page; stands in for the host's rendered page.
pub fn demo_page(course_id: CourseId) -> CoursePage {
    fn eid(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    let mut page = CoursePage::new(course_id);
    page.push_element(PageElement::header(eid("page-header")));
    page.push_element(PageElement::section(eid("section-1"), "Introduction"));
    page.push_element(PageElement::module(eid("module-10"), "Welcome forum"));
    page.push_element(PageElement::module(eid("module-11"), "Course outline"));
    page.push_element(PageElement::section(eid("section-2"), "Week 1"));
    page.push_element(PageElement::module(eid("module-20"), "Reading assignment"));
    page.push_element(PageElement::module(eid("module-21"), "Quiz"));
    page.push_element(PageElement::section(eid("section-3"), "Week 2"));
    page.push_element(PageElement::module(eid("module-30"), "Group project"));
    page
}

/// Runs the interactive shell against a course folder.
pub fn run(folder: TourFolder, course_id: CourseId) -> Result<(), Box<dyn Error>> {
    run_with_page(folder, demo_page(course_id))
}

pub fn run_with_page(folder: TourFolder, page: CoursePage) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(folder, page);
    app.reload_tours();
    app.refresh_placements();

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Page,
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Content,
}

struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    folder: TourFolder,
    page: CoursePage,
    editor: TourEditor,
    panel: ManagementPanel,
    focus: Focus,
    form_field: FormField,
    page_cursor: usize,
    panel_state: ListState,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(folder: TourFolder, page: CoursePage) -> Self {
        let editor = TourEditor::new(page.course_id());
        Self {
            folder,
            page,
            editor,
            panel: ManagementPanel::new(),
            focus: Focus::Page,
            form_field: FormField::Title,
            page_cursor: 0,
            panel_state: ListState::default(),
            toast: None,
            should_quit: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn toast_line(&mut self) -> Option<String> {
        if let Some(toast) = &self.toast {
            if toast.expires_at <= Instant::now() {
                self.toast = None;
            }
        }
        self.toast.as_ref().map(|toast| toast.message.clone())
    }

    fn reload_tours(&mut self) {
        match self.folder.get_course_tours(self.page.course_id(), false) {
            Ok(records) => {
                self.panel.load(&records);
                if self.panel.is_empty() {
                    self.panel_state.select(None);
                } else {
                    self.panel_state.select(Some(0));
                }
            }
            Err(err) => self.set_toast(format!("Failed to load tours: {err}")),
        }
    }

    /// Surfaces start buttons for persisted custom tours on a fresh page.
    fn refresh_placements(&mut self) {
        match self.folder.custom_placements(self.page.course_id()) {
            Ok(placements) => self.editor.init_placements(&mut self.page, &placements),
            Err(err) => self.set_toast(format!("Failed to load placements: {err}")),
        }
    }

    fn selected_element_id(&self) -> Option<ElementId> {
        self.page.elements().get(self.page_cursor).map(|element| element.id().clone())
    }

    fn selected_card_id(&self) -> Option<TourId> {
        let index = self.panel_state.selected()?;
        self.panel.cards().get(index).map(|card| card.tour_id())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.editor.state() == EditorState::EditingStep {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Page => Focus::Panel,
                    Focus::Panel => Focus::Page,
                };
            }
            _ => match self.focus {
                Focus::Page => self.handle_page_key(key),
                Focus::Panel => self.handle_panel_key(key),
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('p') => self.editor.form_mut().cycle_placement(),
                KeyCode::Char('o') => self.editor.form_mut().toggle_orphan(),
                KeyCode::Char('b') => self.editor.form_mut().toggle_backdrop(),
                KeyCode::Char('r') => self.editor.form_mut().toggle_reflex(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.editor.cancel_step(&mut self.page);
                self.form_field = FormField::Title;
            }
            KeyCode::Enter => {
                self.editor.save_step(&mut self.page);
                self.form_field = FormField::Title;
            }
            KeyCode::Tab => {
                self.form_field = match self.form_field {
                    FormField::Title => FormField::Content,
                    FormField::Content => FormField::Title,
                };
            }
            KeyCode::Backspace => {
                let form = self.editor.form_mut();
                match self.form_field {
                    FormField::Title => {
                        form.title_mut().pop();
                    }
                    FormField::Content => {
                        form.content_mut().pop();
                    }
                }
            }
            KeyCode::Char(c) => {
                let form = self.editor.form_mut();
                match self.form_field {
                    FormField::Title => form.title_mut().push(c),
                    FormField::Content => form.content_mut().push(c),
                }
            }
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.page_cursor = self.page_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.page_cursor + 1 < self.page.elements().len() {
                    self.page_cursor += 1;
                }
            }
            KeyCode::Enter => self.click_selected_element(),
            KeyCode::Char('n') => self.editor.start_tour(&mut self.page),
            KeyCode::Char('s') => self.editor.start_sticky_tour(&mut self.page),
            KeyCode::Char('S') => self.save_tour(),
            KeyCode::Char('c') => self.editor.cancel_tour(&mut self.page),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.editor.edit_step(index);
            }
            _ => {}
        }
    }

    fn click_selected_element(&mut self) {
        let Some(id) = self.selected_element_id() else {
            return;
        };
        match self.editor.click(&mut self.page, &id) {
            ClickOutcome::StepEditorOpened => self.form_field = FormField::Title,
            ClickOutcome::PlacementRecorded => {
                self.set_toast(format!("Placement recorded: {id}"));
            }
            ClickOutcome::StartRequested { .. } => {
                // Materialization works on the course's first custom draft;
                // the button's tour id is informational only.
                self.materialize_custom_tour();
            }
            ClickOutcome::Ignored => {}
        }
    }

    fn materialize_custom_tour(&mut self) {
        match self.folder.create_tour_from_custom(self.page.course_id()) {
            Ok(response) if response.success => {
                self.set_toast(response.message);
                if response.reload.unwrap_or(false) {
                    // The host reloads the page here; re-derive the chrome.
                    self.page = demo_page(self.page.course_id());
                    self.page_cursor = 0;
                    self.refresh_placements();
                    self.reload_tours();
                }
            }
            Ok(response) => {
                self.set_toast(format!("Error saving tour: {}", response.message));
            }
            Err(err) => self.set_toast(format!("Error saving tour: {err}")),
        }
    }

    fn save_tour(&mut self) {
        let Some(wire) = self.editor.begin_save_tour() else {
            return;
        };
        let result = self.folder.save_tour(&wire);
        match self.editor.complete_save_tour(&mut self.page, result) {
            SaveOutcome::Saved { message, .. } => {
                self.set_toast(message);
                // The host re-renders the page after a save; re-derive the
                // chrome so stale placement buttons disappear.
                self.page = demo_page(self.page.course_id());
                self.page_cursor = 0;
                self.reload_tours();
                self.refresh_placements();
            }
            SaveOutcome::Rejected { message } => {
                self.set_toast(format!("Error saving tour: {message}"));
            }
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_panel_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_panel_cursor(1),
            KeyCode::Char('t') => self.toggle_selected_card(),
            KeyCode::Char('d') => {
                if let Some(tour_id) = self.selected_card_id() {
                    self.panel.request_delete(tour_id);
                }
            }
            KeyCode::Char('y') => self.confirm_pending_delete(),
            KeyCode::Char('n') | KeyCode::Esc => self.panel.cancel_delete(),
            KeyCode::Char('e') => {
                if let Some(tour_id) = self.selected_card_id() {
                    self.surface_notice(self.panel.edit(tour_id));
                }
            }
            _ => {}
        }
    }

    fn move_panel_cursor(&mut self, delta: i64) {
        let len = self.panel.cards().len();
        if len == 0 {
            self.panel_state.select(None);
            return;
        }
        let current = self.panel_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.panel_state.select(Some(next));
    }

    fn toggle_selected_card(&mut self) {
        let Some(tour_id) = self.selected_card_id() else {
            return;
        };
        let Some(requested) = self.panel.begin_toggle(tour_id) else {
            return;
        };
        let result = self.folder.toggle_tour_enabled(tour_id, requested);
        let notice = self.panel.complete_toggle(tour_id, result);
        self.surface_notice(notice);
    }

    fn confirm_pending_delete(&mut self) {
        let Some(tour_id) = self.panel.confirming_delete() else {
            return;
        };
        if !self.panel.begin_delete(tour_id) {
            return;
        }
        let result = self.folder.delete_tour(tour_id);
        let notice = self.panel.complete_delete(tour_id, result);
        self.surface_notice(notice);
    }

    fn surface_notice(&mut self, notice: PanelNotice) {
        match notice {
            PanelNotice::ToggleApplied { enabled, .. } => {
                self.set_toast(if enabled { "Tour enabled" } else { "Tour disabled" });
            }
            PanelNotice::ToggleFailed { message, .. }
            | PanelNotice::DeleteFailed { message, .. } => self.set_toast(message),
            PanelNotice::Deleted { .. } => {
                self.set_toast("Tour deleted");
                self.move_panel_cursor(0);
            }
            PanelNotice::EditNotImplemented { tour_id } => {
                self.set_toast(format!(
                    "Edit functionality will be implemented when backend is ready. Tour ID: {tour_id}"
                ));
            }
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_area);
    let page_area = panes[0];
    let sidebar_area = panes[1];

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(sidebar_area);
    let editor_area = sidebar[0];
    let panel_area = sidebar[1];

    draw_page(frame, app, page_area);
    draw_editor(frame, app, editor_area);
    draw_panel(frame, app, panel_area);
    draw_footer(frame, app, status_area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn draw_page(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let lines = render_page_lines(&app.page);
    let items: Vec<ListItem> =
        lines.iter().map(|line| ListItem::new(line.text.clone())).collect();

    let mut state = ListState::default();
    if !lines.is_empty() {
        state.select(Some(app.page_cursor.min(lines.len() - 1)));
    }

    let title = format!(" Course page (course {}) ", app.page.course_id());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(app.focus == Focus::Page)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut state);
}

fn flag_label(name: &str, value: bool) -> String {
    format!("{name}:{}", if value { "on" } else { "off" })
}

fn draw_editor(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match app.editor.state() {
        EditorState::Idle => {
            lines.push(Line::from("No tour in progress."));
            lines.push(Line::from("Press n to create a tour, s for a sticky tour."));
        }
        EditorState::StickyPlacementSelection => {
            lines.push(Line::from("Pick a placement:"));
            lines.push(Line::from("click a 'Select placement' button on a section or the header."));
        }
        EditorState::PickingTarget => {
            lines.push(Line::from(format!("Tour: {}", app.editor.draft().name())));
            if let Some(placement) = app.editor.draft().sticky_placement() {
                lines.push(Line::from(format!("Placement: {}", placement.container_id())));
            }
            lines.push(Line::from("Click a highlighted element to add a step."));
        }
        EditorState::EditingStep => {
            if let Some(indicator) = app.editor.indicator() {
                lines.push(Line::from(indicator.to_owned()));
            }
            let form = app.editor.form();
            let (title_marker, content_marker) = match app.form_field {
                FormField::Title => ("▸", " "),
                FormField::Content => (" ", "▸"),
            };
            lines.push(Line::from(format!("{title_marker} Title:   {}", form.title())));
            lines.push(Line::from(format!("{content_marker} Content: {}", form.content())));
            lines.push(Line::from(format!(
                "  Placement: {}  {}  {}  {}",
                form.placement(),
                flag_label("orphan", form.orphan()),
                flag_label("backdrop", form.backdrop()),
                flag_label("reflex", form.reflex()),
            )));
        }
    }

    let preview = render_preview(&app.editor.preview());
    if !preview.is_empty() {
        lines.push(Line::from(""));
        for row in preview.lines() {
            lines.push(Line::from(row.to_owned()));
        }
    }

    let title = if app.editor.save_in_flight() { " Tour editor — Saving… " } else { " Tour editor " };
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn draw_panel(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tours ")
        .border_style(border_style(app.focus == Focus::Panel));

    if app.panel.is_empty() {
        let paragraph = Paragraph::new(
            "No tours created yet. Press n on the page to get started.",
        )
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .panel
        .cards()
        .iter()
        .map(|card| {
            let checkbox = if card.enabled() { "[x]" } else { "[ ]" };
            let suffix = match card.pending() {
                Some(PendingAction::Toggle { .. }) => " …",
                Some(PendingAction::Delete) => " deleting…",
                None if app.panel.confirming_delete() == Some(card.tour_id()) => {
                    " delete? y/n"
                }
                None => "",
            };
            ListItem::new(format!("{checkbox} {} — {}{suffix}", card.tour_id(), card.name()))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.panel_state);
}

fn draw_footer(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    if let Some(message) = app.toast_line() {
        let paragraph =
            Paragraph::new(Line::from(message)).style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, area);
        return;
    }

    let spans = hints::footer_hints(app.editor.state(), app.focus)
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled((*key).to_owned(), Style::default().fg(FOOTER_KEY_COLOR)),
                Span::styled(format!(" {label}  "), Style::default().fg(FOOTER_LABEL_COLOR)),
            ]
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
