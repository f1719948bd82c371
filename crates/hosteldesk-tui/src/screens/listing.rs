//! Listing screen: the "List Your Hostel" form: basic info fields,
//! a bounded room-type list, facility toggles, photo attachments, and
//! the submit-for-review workflow.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;
use tracing::warn;

use hosteldesk_core::gateway::OwnerCommand;
use hosteldesk_core::{
    Facility, ListingField, ListingForm, ListingLimits, Notice, mime_for_extension,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{progress, sub_tabs};

/// Which form control holds the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    Field(ListingField),
    Room(usize, RoomField),
    Facility(usize),
    Photos,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoomField {
    Name,
    Price,
    Rooms,
}

/// Form sections. Only the section holding the cursor is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Basic,
    Rooms,
    Facilities,
    Finish,
}

impl Section {
    const LABELS: [&'static str; 4] = [
        "Basic Info",
        "Room Types",
        "Facilities",
        "Photos & Submit",
    ];

    fn index(self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Rooms => 1,
            Self::Facilities => 2,
            Self::Finish => 3,
        }
    }
}

pub struct ListingScreen {
    focused: bool,
    form: ListingForm,
    focus: FormFocus,
    facilities: Vec<Facility>,
    /// Path being typed for the next photo attachment, while open.
    photo_path: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ListingScreen {
    pub fn new(limits: ListingLimits) -> Self {
        Self {
            focused: false,
            form: ListingForm::new(limits),
            focus: FormFocus::Field(ListingField::Name),
            facilities: Facility::iter().collect(),
            photo_path: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn form(&self) -> &ListingForm {
        &self.form
    }

    // ── Focus ───────────────────────────────────────────────────────

    /// Tab order over every control the form currently has. Room-type
    /// slots come and go, so the order is rebuilt on each move.
    fn focus_order(&self) -> Vec<FormFocus> {
        let mut order: Vec<FormFocus> = ListingField::ALL
            .iter()
            .map(|field| FormFocus::Field(*field))
            .collect();
        for index in 0..self.form.room_types().len() {
            order.push(FormFocus::Room(index, RoomField::Name));
            order.push(FormFocus::Room(index, RoomField::Price));
            order.push(FormFocus::Room(index, RoomField::Rooms));
        }
        for index in 0..self.facilities.len() {
            order.push(FormFocus::Facility(index));
        }
        order.push(FormFocus::Photos);
        order.push(FormFocus::Submit);
        order
    }

    fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    fn section(&self) -> Section {
        match self.focus {
            FormFocus::Field(_) => Section::Basic,
            FormFocus::Room(..) => Section::Rooms,
            FormFocus::Facility(_) => Section::Facilities,
            FormFocus::Photos | FormFocus::Submit => Section::Finish,
        }
    }

    /// The text buffer under the cursor, when the cursor is on one.
    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::Field(field) => Some(self.form.value_mut(field)),
            FormFocus::Room(index, room_field) => {
                self.form.room_type_mut(index).map(|entry| match room_field {
                    RoomField::Name => &mut entry.name,
                    RoomField::Price => &mut entry.price,
                    RoomField::Rooms => &mut entry.rooms,
                })
            }
            _ => None,
        }
    }

    // ── Room types ──────────────────────────────────────────────────

    fn add_room(&mut self) -> Option<Action> {
        match self.form.add_room_type() {
            Ok(index) => {
                self.focus = FormFocus::Room(index, RoomField::Name);
                None
            }
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    fn remove_focused_room(&mut self) -> Option<Action> {
        let FormFocus::Room(index, _) = self.focus else {
            return None;
        };
        match self.form.remove_room_type(index) {
            Ok(()) => {
                let last = self.form.room_types().len().saturating_sub(1);
                self.focus = FormFocus::Room(index.min(last), RoomField::Name);
                None
            }
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    // ── Photos ──────────────────────────────────────────────────────

    /// Resolves a typed path into an attachment: the MIME type comes
    /// from the file extension and the size from the filesystem.
    fn attach_from_path(&mut self, path: &str) -> Option<Action> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        let file_name = std::path::Path::new(path)
            .file_name()
            .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_for_extension(&file_name);
        let size_bytes = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                return Some(Action::Notify(Notice::error(format!(
                    "Cannot read {path}: {err}"
                ))));
            }
        };
        match self.form.attach_photo(file_name, mime, size_bytes) {
            Ok(()) => None,
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    // ── Submit ──────────────────────────────────────────────────────

    fn request_submit(&mut self) -> Option<Action> {
        match self.form.begin_submit() {
            Ok(()) => Some(Action::Dispatch(OwnerCommand::SubmitListing)),
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        if area.height < 1 {
            return;
        }
        let pct = self.form.progress_percent();
        let bar_width = area.width.saturating_sub(28).clamp(10, 40);
        let (filled, empty) = progress::fmt_pct_bar(pct, bar_width);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  Profile Completion  ", Style::default().fg(theme::SLATE_LIGHT)),
                Span::styled(filled, Style::default().fg(theme::BRAND_GREEN)),
                Span::styled(empty, Style::default().fg(theme::SLATE_MID)),
                Span::styled(
                    format!(" {pct}%"),
                    Style::default()
                        .fg(theme::PAPER_WHITE)
                        .add_modifier(Modifier::BOLD),
                ),
            ])),
            area,
        );
    }

    #[allow(clippy::unused_self)]
    fn render_input_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        active: bool,
    ) {
        if area.height < 3 {
            return;
        }

        let label_area = Rect::new(area.x, area.y, area.width, 1);
        let label_style = if active {
            Style::default().fg(theme::BRAND_GREEN)
        } else {
            Style::default().fg(theme::SLATE_LIGHT)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {label}"), label_style)),
            label_area,
        );

        let border_color = if active {
            theme::BRAND_GREEN
        } else {
            theme::SLATE_MID
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        let text = if active {
            format!("{value}\u{2588}")
        } else {
            value.to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme::PAPER_WHITE))),
            inner,
        );
    }

    fn render_basic(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

        // Rows follow the tab order so the cursor walks top to bottom.
        self.render_field(frame, rows[0], ListingField::Name);
        let middle = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        self.render_field(frame, middle[0], ListingField::Address);
        self.render_field(frame, middle[1], ListingField::City);
        self.render_field(frame, rows[2], ListingField::Description);

        let contact = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        self.render_field(frame, contact[0], ListingField::ContactEmail);
        self.render_field(frame, contact[1], ListingField::ContactPhone);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: ListingField) {
        self.render_input_field(
            frame,
            area,
            field.label(),
            self.form.value(field),
            self.focus == FormFocus::Field(field),
        );
    }

    fn render_rooms(&self, frame: &mut Frame, area: Rect) {
        const ENTRY_HEIGHT: u16 = 5;

        let entries = self.form.room_types();
        let focused_entry = match self.focus {
            FormFocus::Room(index, _) => index,
            _ => 0,
        };
        let per_page = usize::from((area.height / ENTRY_HEIGHT).max(1));
        let first = (focused_entry / per_page) * per_page;

        let mut y = area.y;
        for (index, entry) in entries.iter().enumerate().skip(first).take(per_page) {
            if y >= area.bottom() {
                break;
            }
            let header_area = Rect::new(area.x, y, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" Room Type {} of {}", index + 1, entries.len()),
                    Style::default()
                        .fg(theme::PAPER_WHITE)
                        .add_modifier(Modifier::BOLD),
                )),
                header_area,
            );

            let row_height = (ENTRY_HEIGHT - 1).min(area.bottom().saturating_sub(y + 1));
            let row = Rect::new(area.x, y + 1, area.width, row_height);
            let cols = Layout::horizontal([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(row);
            self.render_input_field(
                frame,
                cols[0],
                "Room Name",
                &entry.name,
                self.focus == FormFocus::Room(index, RoomField::Name),
            );
            self.render_input_field(
                frame,
                cols[1],
                "Price (Rs/month)",
                &entry.price,
                self.focus == FormFocus::Room(index, RoomField::Price),
            );
            self.render_input_field(
                frame,
                cols[2],
                "Available Rooms",
                &entry.rooms,
                self.focus == FormFocus::Room(index, RoomField::Rooms),
            );
            y += ENTRY_HEIGHT;
        }
    }

    fn render_facilities(&self, frame: &mut Frame, area: Rect) {
        let half = self.facilities.len().div_ceil(2);
        let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        for (index, facility) in self.facilities.iter().enumerate() {
            let col = if index < half { cols[0] } else { cols[1] };
            let row = index % half;
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            if row >= col.height {
                continue;
            }
            let line_area = Rect::new(col.x, col.y + row, col.width, 1);
            self.render_toggle(
                frame,
                line_area,
                facility.label(),
                self.form.facility_checked(*facility),
                self.focus == FormFocus::Facility(index),
            );
        }
    }

    #[allow(clippy::unused_self)]
    fn render_toggle(&self, frame: &mut Frame, area: Rect, label: &str, value: bool, active: bool) {
        let marker = if value { "[\u{2713}]" } else { "[ ]" };
        let marker_style = if active {
            Style::default().fg(theme::BRAND_GREEN)
        } else if value {
            Style::default().fg(theme::SUCCESS_GREEN)
        } else {
            Style::default().fg(theme::SLATE_MID)
        };
        let label_style = if active {
            Style::default()
                .fg(theme::PAPER_WHITE)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::SLATE_LIGHT)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("  {marker} "), marker_style),
                Span::styled(label, label_style),
            ])),
            area,
        );
    }

    fn render_finish(&self, frame: &mut Frame, area: Rect) {
        let photos = self.form.photos();
        let list_height = u16::try_from(photos.len()).unwrap_or(u16::MAX).saturating_add(2);
        let path_height = if self.photo_path.is_some() { 4 } else { 0 };
        let rows = Layout::vertical([
            Constraint::Length(list_height.max(3)),
            Constraint::Length(path_height),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

        let photos_active = self.focus == FormFocus::Photos;
        let block = Block::default()
            .title(format!(" Photos ({}) ", photos.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if photos_active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(rows[0]);
        frame.render_widget(block, rows[0]);

        if photos.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " No photos attached yet",
                    Style::default().fg(theme::SLATE_MID),
                )),
                inner,
            );
        } else {
            let lines: Vec<Line> = photos
                .iter()
                .map(|photo| {
                    Line::from(vec![
                        Span::styled(" • ", Style::default().fg(theme::BRAND_GREEN)),
                        Span::styled(
                            photo.file_name.clone(),
                            Style::default().fg(theme::PAPER_WHITE),
                        ),
                        Span::styled(
                            format!("  {}", fmt_size(photo.size_bytes)),
                            Style::default().fg(theme::SLATE_LIGHT),
                        ),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), inner);
        }

        if let Some(path) = &self.photo_path {
            self.render_input_field(frame, rows[1], "Photo Path", path, true);
        }

        let submit_active = self.focus == FormFocus::Submit;
        let submit = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if submit_active {
                Style::default().fg(theme::BRAND_GREEN)
            } else {
                theme::border_default()
            });
        let submit_inner = submit.inner(rows[2]);
        frame.render_widget(submit, rows[2]);
        let submit_style = if submit_active {
            Style::default()
                .fg(theme::BRAND_GREEN)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::SLATE_LIGHT)
        };
        frame.render_widget(
            Paragraph::new(Span::styled("  Submit for Review", submit_style)),
            submit_inner,
        );
    }

    fn render_submitting(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = throbber_widgets_tui::Throbber::default()
            .label("  Submitting your hostel for review...")
            .style(Style::default().fg(theme::PAPER_WHITE))
            .throbber_style(Style::default().fg(theme::BRAND_GREEN));
        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "  Hang tight, this can take a moment.",
                Style::default().fg(theme::SLATE_MID),
            )),
            layout[2],
        );
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.form.is_submitting() {
            &[("Esc", "back")]
        } else if self.photo_path.is_some() {
            &[("Enter", "attach"), ("Esc", "cancel")]
        } else {
            match self.focus {
                FormFocus::Facility(_) => &[
                    ("Space", "toggle"),
                    ("Tab", "next"),
                    ("Enter", "submit"),
                    ("Esc", "back"),
                ],
                FormFocus::Photos => &[
                    ("Enter", "add photo"),
                    ("Backspace", "remove last"),
                    ("Tab", "next"),
                    ("Esc", "back"),
                ],
                FormFocus::Room(..) => &[
                    ("Ctrl+a", "add room"),
                    ("Ctrl+x", "remove room"),
                    ("Tab", "next"),
                    ("Enter", "submit"),
                ],
                _ => &[("Tab", "next"), ("Enter", "submit"), ("Esc", "back")],
            }
        };

        let mut spans = Vec::new();
        for (key, hint) in hints {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{hint}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for ListingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_submitting() {
            if key.code == KeyCode::Esc {
                return Ok(Some(Action::GoBack));
            }
            return Ok(None);
        }

        // Path entry owns the keyboard while it is open.
        if self.photo_path.is_some() {
            match key.code {
                KeyCode::Esc => {
                    self.photo_path = None;
                }
                KeyCode::Enter => {
                    if let Some(path) = self.photo_path.take() {
                        return Ok(self.attach_from_path(&path));
                    }
                }
                KeyCode::Backspace => {
                    if let Some(path) = self.photo_path.as_mut() {
                        path.pop();
                    }
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(path) = self.photo_path.as_mut() {
                        path.push(c);
                    }
                }
                _ => {}
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => return Ok(self.add_room()),
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => return Ok(self.remove_focused_room()),
            _ => {}
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Ok(None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Ok(None)
            }
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            KeyCode::Enter => {
                if self.focus == FormFocus::Photos {
                    self.photo_path = Some(String::new());
                    Ok(None)
                } else {
                    Ok(self.request_submit())
                }
            }
            KeyCode::Backspace => {
                if self.focus == FormFocus::Photos {
                    let count = self.form.photos().len();
                    if count > 0 {
                        self.form.remove_photo(count - 1);
                    }
                } else if let Some(input) = self.active_input_mut() {
                    input.pop();
                }
                Ok(None)
            }
            KeyCode::Char(' ') if matches!(self.focus, FormFocus::Facility(_)) => {
                if let FormFocus::Facility(index) = self.focus {
                    if let Some(facility) = self.facilities.get(index).copied() {
                        self.form.toggle_facility(facility);
                    }
                }
                Ok(None)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.active_input_mut() {
                    input.push(c);
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.form.is_submitting() {
                    self.throbber_state.calc_next();
                }
                Ok(None)
            }
            Action::SubmitListingDone { result } => {
                self.form.finish_submit();
                match result {
                    Ok(()) => Ok(Some(Action::Notify(Notice::success(
                        "Hostel submitted for review! You will be notified once approved.",
                    )))),
                    Err(err) => {
                        warn!(error = %err, "Listing submission failed");
                        Ok(Some(Action::Notify(Notice::error(err.clone()))))
                    }
                }
            }
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" List Your Hostel ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.form.is_submitting() {
            self.render_submitting(frame, inner);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_progress(frame, layout[0]);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(
                &Section::LABELS,
                self.section().index(),
            )),
            layout[1],
        );

        match self.section() {
            Section::Basic => self.render_basic(frame, layout[2]),
            Section::Rooms => self.render_rooms(frame, layout[2]),
            Section::Facilities => self.render_facilities(frame, layout[2]),
            Section::Finish => self.render_finish(frame, layout[2]),
        }

        self.render_key_hints(frame, layout[3]);
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "listing"
    }
}

/// Photo size for the attachment list (e.g., "2.4 MB", "640 KB").
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn fmt_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{} KB", bytes / 1_000)
    } else {
        format!("{bytes} B")
    }
}
