//! Tenants screen: current occupants and the lease-termination workflow.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::warn;

use hosteldesk_core::gateway::OwnerCommand;
use hosteldesk_core::text::{format_currency, format_date};
use hosteldesk_core::{CoreError, LeaseStatus, Notice, Tenant, TenantRoster};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::badges;

pub struct TenantsScreen {
    focused: bool,
    roster: TenantRoster,
    table_state: TableState,
}

impl TenantsScreen {
    pub fn new(tenants: Vec<Tenant>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            focused: false,
            roster: TenantRoster::new(tenants),
            table_state,
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.roster.len();
        if len == 0 {
            return;
        }
        let next = self
            .selected_index()
            .saturating_add_signed(delta)
            .min(len - 1);
        self.table_state.select(Some(next));
    }

    fn selected_tenant(&self) -> Option<&Tenant> {
        self.roster.tenants().get(self.selected_index())
    }

    /// Opens the termination dialog, or warns when the lease cannot be
    /// terminated.
    fn request_terminate(&self) -> Option<Action> {
        let tenant = self.selected_tenant()?;
        if self.roster.is_busy(tenant.id) {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::RequestInFlight,
            )));
        }
        if tenant.lease == LeaseStatus::Ending {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::LeaseAlreadyEnding,
            )));
        }
        Some(Action::ShowConfirm(
            ConfirmAction::TerminateLease { id: tenant.id }.request(),
        ))
    }

    /// Test hook and dashboard seam: the underlying roster.
    pub fn roster(&self) -> &TenantRoster {
        &self.roster
    }
}

impl Component for TenantsScreen {
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
            KeyCode::Char('t') => Ok(self.request_terminate()),
            KeyCode::Char('p') => Ok(Some(Action::Notify(Notice::info(
                "Opening payment recording interface...",
            )))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Confirmed(ConfirmAction::TerminateLease { id }) => {
                match self.roster.begin_terminate(*id) {
                    Ok(()) => Ok(Some(Action::Dispatch(OwnerCommand::TerminateLease {
                        id: *id,
                    }))),
                    Err(err) => Ok(Some(Action::Notify(Notice::from_error(&err)))),
                }
            }
            Action::TerminateDone { id, result } => match result {
                Ok(()) => {
                    if let Err(err) = self.roster.finish_terminate(*id) {
                        warn!(tenant = %id, error = %err, "Terminate completion dropped");
                    }
                    Ok(Some(Action::Notify(Notice::info(
                        "Lease termination process started.",
                    ))))
                }
                Err(message) => {
                    self.roster.release(*id);
                    Ok(Some(Action::Notify(Notice::error(message.clone()))))
                }
            },
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let tenants = self.roster.tenants();
        let title = format!(
            " Tenants ({} active / {}) ",
            self.roster.active_count(),
            tenants.len()
        );
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
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let header = Row::new(
            ["ID", "Name", "Room", "Monthly Rent", "Lease Start", "Lease", "Last Payment"]
                .map(|label| Cell::from(label).style(theme::table_header())),
        );

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = tenants
            .iter()
            .enumerate()
            .map(|(i, tenant)| {
                let prefix = if i == selected_idx { "▸" } else { " " };
                let lease_cell = if self.roster.is_busy(tenant.id) {
                    Cell::from(Line::from(vec![
                        badges::lease_span(tenant.lease),
                        Span::styled(" ⋯", Style::default().fg(theme::WARNING_AMBER)),
                    ]))
                } else {
                    Cell::from(Line::from(badges::lease_span(tenant.lease)))
                };
                let last_payment = tenant
                    .last_payment
                    .map_or_else(|| "─".to_string(), format_date);
                Row::new(vec![
                    Cell::from(format!("{prefix}{}", tenant.id))
                        .style(Style::default().fg(theme::SLATE_LIGHT)),
                    Cell::from(tenant.name.clone()).style(Style::default().fg(theme::PAPER_WHITE)),
                    Cell::from(tenant.room.clone()),
                    Cell::from(format_currency(tenant.monthly_rent))
                        .style(Style::default().fg(theme::PAPER_WHITE)),
                    Cell::from(format_date(tenant.lease_start)),
                    lease_cell,
                    Cell::from(last_payment),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(9),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(13),
            Constraint::Length(10),
            Constraint::Length(13),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("terminate lease  ", theme::key_hint()),
            Span::styled("p ", theme::key_hint_key()),
            Span::styled("record payment", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Tenants"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use hosteldesk_core::TenantId;
    use pretty_assertions::assert_eq;

    fn tenant(id: u32, name: &str) -> Tenant {
        Tenant {
            id: TenantId(id),
            name: name.to_string(),
            room: "Room 101".to_string(),
            monthly_rent: 12_000,
            lease_start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            lease: LeaseStatus::Active,
            last_payment: None,
        }
    }

    fn press(screen: &mut TenantsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn terminate_opens_danger_dialog_for_active_lease() {
        let mut screen = TenantsScreen::new(vec![tenant(1, "Niraj Thapa")]);
        let action = press(&mut screen, KeyCode::Char('t'));
        match action {
            Some(Action::ShowConfirm(request)) => {
                assert_eq!(request.title, "Terminate Lease");
                assert_eq!(
                    request.style,
                    hosteldesk_core::confirm::ConfirmStyle::Danger
                );
            }
            other => panic!("expected ShowConfirm, got {other:?}"),
        }
    }

    #[test]
    fn terminate_completion_moves_lease_to_ending() {
        let mut screen = TenantsScreen::new(vec![tenant(1, "Niraj Thapa")]);
        screen
            .update(&Action::Confirmed(ConfirmAction::TerminateLease {
                id: TenantId(1),
            }))
            .unwrap();
        assert!(screen.roster().is_busy(TenantId(1)));

        let action = screen
            .update(&Action::TerminateDone {
                id: TenantId(1),
                result: Ok(()),
            })
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Lease termination process started.");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert_eq!(
            screen.roster().get(TenantId(1)).unwrap().lease,
            LeaseStatus::Ending
        );

        // The affordance is now gone for good
        let action = press(&mut screen, KeyCode::Char('t'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Lease is already ending");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn record_payment_posts_the_stub_notice() {
        let mut screen = TenantsScreen::new(vec![tenant(1, "Niraj Thapa")]);
        let action = press(&mut screen, KeyCode::Char('p'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Opening payment recording interface...");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }
}
