//! Bookings screen: the booking-request table with status tabs, the applied
//! search query, and the confirm-then-approve/reject workflow.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::warn;

use hosteldesk_core::gateway::OwnerCommand;
use hosteldesk_core::text::{escape_markup, format_currency, format_date};
use hosteldesk_core::{
    Booking, BookingBoard, BookingId, BookingStatus, CoreError, Notice, StatusFilter,
};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, sub_tabs};

pub struct BookingsScreen {
    focused: bool,
    board: BookingBoard,
    table_state: TableState,
}

impl BookingsScreen {
    pub fn new(bookings: Vec<Booking>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            focused: false,
            board: BookingBoard::new(bookings),
            table_state,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.board.visible().len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.board.visible().len();
        if len == 0 {
            return;
        }
        let next = self
            .selected_index()
            .saturating_add_signed(delta)
            .min(len - 1);
        self.table_state.select(Some(next));
    }

    fn selected_booking(&self) -> Option<&Booking> {
        self.board.visible().get(self.selected_index()).copied()
    }

    fn cycle_filter(&mut self) {
        let current = self.board.filter();
        let idx = StatusFilter::ALL
            .iter()
            .position(|f| *f == current)
            .unwrap_or(0);
        let next = StatusFilter::ALL[(idx + 1) % StatusFilter::ALL.len()];
        self.board.set_filter(next);
        self.table_state.select(Some(0));
    }

    /// Opens the confirm dialog for approve/reject. Rows that cannot be
    /// decided get the matching warning toast instead of a dialog.
    fn request_decision(&self, approve: bool) -> Option<Action> {
        let booking = self.selected_booking()?;
        if self.board.is_busy(booking.id) {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::RequestInFlight,
            )));
        }
        if booking.status != BookingStatus::Pending {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::AlreadyResolved {
                    status: booking.status,
                },
            )));
        }
        let confirm = if approve {
            ConfirmAction::ApproveBooking { id: booking.id }
        } else {
            ConfirmAction::RejectBooking { id: booking.id }
        };
        Some(Action::ShowConfirm(confirm.request()))
    }

    fn begin(&mut self, id: BookingId, command: OwnerCommand) -> Option<Action> {
        match self.board.begin(id) {
            Ok(()) => Some(Action::Dispatch(command)),
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    fn filter_index(&self) -> usize {
        StatusFilter::ALL
            .iter()
            .position(|f| *f == self.board.filter())
            .unwrap_or(0)
    }

    /// Test hook and dashboard seam: the underlying board.
    pub fn board(&self) -> &BookingBoard {
        &self.board
    }
}

impl Component for BookingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.board.visible().len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                Ok(None)
            }
            KeyCode::Char('f') => {
                self.cycle_filter();
                Ok(None)
            }
            KeyCode::Char('a') => Ok(self.request_decision(true)),
            KeyCode::Char('r') => Ok(self.request_decision(false)),
            KeyCode::Char('e') => Ok(Some(Action::Notify(Notice::success(
                "Preparing bookings export...",
            )))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Confirmed(ConfirmAction::ApproveBooking { id }) => {
                Ok(self.begin(*id, OwnerCommand::ApproveBooking { id: *id }))
            }
            Action::Confirmed(ConfirmAction::RejectBooking { id }) => {
                Ok(self.begin(*id, OwnerCommand::RejectBooking { id: *id }))
            }
            Action::ApproveDone { id, result } => match result {
                Ok(()) => {
                    if let Err(err) = self.board.finish_approve(*id) {
                        warn!(booking = %id, error = %err, "Approve completion dropped");
                    }
                    Ok(Some(Action::Notify(Notice::success(
                        "Booking approved successfully!",
                    ))))
                }
                Err(message) => {
                    self.board.release(*id);
                    Ok(Some(Action::Notify(Notice::error(message.clone()))))
                }
            },
            Action::RejectDone { id, result } => match result {
                Ok(()) => {
                    if let Err(err) = self.board.finish_reject(*id) {
                        warn!(booking = %id, error = %err, "Reject completion dropped");
                    }
                    Ok(Some(Action::Notify(Notice::warning("Booking rejected."))))
                }
                Err(message) => {
                    self.board.release(*id);
                    Ok(Some(Action::Notify(Notice::error(message.clone()))))
                }
            },
            Action::QueryApplied(query) => {
                self.board.apply_query(query.clone());
                self.table_state.select(Some(0));
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = self.board.visible();
        let total = self.board.len();
        let shown = visible.len();
        let query = self.board.query();

        let title = if query.is_empty() {
            format!(" Bookings ({shown}/{total}) ")
        } else {
            format!(" Bookings ({shown}/{total}) [\"{query}\"] ")
        };
        let block = Block::default()
            .title(title)
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

        let layout = Layout::vertical([
            Constraint::Length(1), // status tabs
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        // Status tab bar with live counts
        let counts = self.board.counts();
        let labels: Vec<String> = StatusFilter::ALL
            .iter()
            .map(|f| format!("{} ({})", f.label(), counts.for_filter(*f)))
            .collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let filter_line = sub_tabs::render_sub_tabs(&label_refs, self.filter_index());
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        if visible.is_empty() && !query.is_empty() {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::styled(
                    format!("  No results found for \"{}\"", escape_markup(query)),
                    Style::default().fg(theme::SLATE_LIGHT),
                ),
            ]);
            frame.render_widget(placeholder, layout[1]);
        } else {
            let header = Row::new(
                ["ID", "Guest", "Room Type", "Check-in", "Monthly Rent", "Status", "Payment"]
                    .map(|label| Cell::from(label).style(theme::table_header())),
            );

            let selected_idx = self.selected_index();
            let rows: Vec<Row> = visible
                .iter()
                .enumerate()
                .map(|(i, booking)| {
                    let prefix = if i == selected_idx { "▸" } else { " " };
                    let status_cell = if self.board.is_busy(booking.id) {
                        Cell::from(Line::from(vec![
                            badges::booking_status_span(booking.status),
                            Span::styled(" ⋯", Style::default().fg(theme::WARNING_AMBER)),
                        ]))
                    } else {
                        Cell::from(Line::from(badges::booking_status_span(booking.status)))
                    };
                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", booking.id))
                            .style(Style::default().fg(theme::SLATE_LIGHT)),
                        Cell::from(booking.guest.clone())
                            .style(Style::default().fg(theme::PAPER_WHITE)),
                        Cell::from(booking.room_type.clone()),
                        Cell::from(format_date(booking.check_in)),
                        Cell::from(format_currency(booking.monthly_rent))
                            .style(Style::default().fg(theme::PAPER_WHITE)),
                        status_cell,
                        Cell::from(Line::from(badges::payment_span(booking.payment))),
                    ])
                    .style(theme::table_row())
                })
                .collect();

            let widths = [
                Constraint::Length(9),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(13),
                Constraint::Length(12),
                Constraint::Length(13),
                Constraint::Length(9),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());

            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("approve  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reject  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("export  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Bookings"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hosteldesk_core::PaymentStatus;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn booking(id: u32, guest: &str, status: BookingStatus) -> Booking {
        Booking {
            id: BookingId(id),
            guest: guest.to_string(),
            room_type: "Single Room".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            monthly_rent: 15_000,
            status,
            payment: PaymentStatus::Paid,
            requested_at: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
        }
    }

    fn screen() -> BookingsScreen {
        BookingsScreen::new(vec![
            booking(1, "John Smith", BookingStatus::Pending),
            booking(2, "Anisha Gurung", BookingStatus::Approved),
            booking(3, "Tom Becker", BookingStatus::Pending),
        ])
    }

    fn press(screen: &mut BookingsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn approve_on_pending_row_opens_confirm_dialog() {
        let mut screen = screen();
        let action = press(&mut screen, KeyCode::Char('a'));
        match action {
            Some(Action::ShowConfirm(request)) => {
                assert_eq!(request.title, "Approve Booking");
                assert_eq!(
                    request.on_confirm,
                    ConfirmAction::ApproveBooking { id: BookingId(1) }
                );
            }
            other => panic!("expected ShowConfirm, got {other:?}"),
        }
    }

    #[test]
    fn approve_on_resolved_row_warns_without_dialog() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('j'));
        let action = press(&mut screen, KeyCode::Char('a'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Booking is already Approved");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn confirmed_approve_dispatches_and_marks_busy() {
        let mut screen = screen();
        let action = screen
            .update(&Action::Confirmed(ConfirmAction::ApproveBooking {
                id: BookingId(1),
            }))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::Dispatch(OwnerCommand::ApproveBooking {
                id: BookingId(1)
            }))
        ));
        assert!(screen.board().is_busy(BookingId(1)));

        // A second confirmed approve while in flight degrades to a warning
        let action = screen
            .update(&Action::Confirmed(ConfirmAction::ApproveBooking {
                id: BookingId(1),
            }))
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Request already in flight");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn approve_completion_posts_success_toast() {
        let mut screen = screen();
        screen
            .update(&Action::Confirmed(ConfirmAction::ApproveBooking {
                id: BookingId(1),
            }))
            .unwrap();
        let action = screen
            .update(&Action::ApproveDone {
                id: BookingId(1),
                result: Ok(()),
            })
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Booking approved successfully!");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert!(!screen.board().is_busy(BookingId(1)));
        assert_eq!(
            screen.board().get(BookingId(1)).unwrap().status,
            BookingStatus::Approved
        );
    }

    #[test]
    fn failed_completion_releases_the_busy_mark() {
        let mut screen = screen();
        screen
            .update(&Action::Confirmed(ConfirmAction::RejectBooking {
                id: BookingId(1),
            }))
            .unwrap();
        let action = screen
            .update(&Action::RejectDone {
                id: BookingId(1),
                result: Err("connection reset".to_string()),
            })
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "connection reset");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert!(!screen.board().is_busy(BookingId(1)));
        assert_eq!(
            screen.board().get(BookingId(1)).unwrap().status,
            BookingStatus::Pending
        );
    }

    #[test]
    fn applied_query_narrows_visible_rows_and_title() {
        let mut screen = screen();
        screen
            .update(&Action::QueryApplied("anisha".to_string()))
            .unwrap();
        assert_eq!(screen.board().visible().len(), 1);

        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Bookings (1/3)"));
        assert!(rendered.contains("Anisha Gurung"));
    }

    #[test]
    fn empty_result_set_renders_escaped_placeholder() {
        let mut screen = screen();
        screen
            .update(&Action::QueryApplied("<nobody>".to_string()))
            .unwrap();

        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("No results found for"));
        assert!(rendered.contains("&lt;nobody&gt;"));
    }
}
