//! Dashboard screen: stat cards over a recent-activity feed.
//!
//! Layout:
//! ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐
//! │Bookings│ │Pending │ │Tenants │ │ Rating │ │Revenue │
//! └────────┘ └────────┘ └────────┘ └────────┘ └────────┘
//! ┌─ Recent Activity ──────────────────────────────────┐
//! │ 2m ago ● Booking from John Smith approved          │
//! └────────────────────────────────────────────────────┘
//!
//! The cards start from the seed dataset and stay current by observing
//! the same completion actions the owning screens handle.

use std::collections::HashMap;
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use hosteldesk_core::text::{format_currency, format_relative_time};
use hosteldesk_core::{BookingId, BookingStatus, LeaseStatus, ReviewId, Severity, TenantId};

use crate::action::Action;
use crate::component::Component;
use crate::seed::SeedData;
use crate::theme;

/// Oldest activity entries are dropped past this count.
const ACTIVITY_CAP: usize = 20;

struct ActivityEntry {
    at: DateTime<Utc>,
    severity: Severity,
    text: String,
}

pub struct DashboardScreen {
    focused: bool,
    total_bookings: usize,
    pending_approvals: usize,
    active_tenants: usize,
    average_rating: f64,
    monthly_revenue: u64,
    guest_names: HashMap<BookingId, String>,
    review_guests: HashMap<ReviewId, String>,
    tenant_names: HashMap<TenantId, String>,
    tenant_rents: HashMap<TenantId, u64>,
    activity: VecDeque<ActivityEntry>,
}

impl DashboardScreen {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn new(seed: &SeedData) -> Self {
        let pending_approvals = seed
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count();
        let active: Vec<_> = seed
            .tenants
            .iter()
            .filter(|t| t.lease == LeaseStatus::Active)
            .collect();
        let average_rating = if seed.reviews.is_empty() {
            0.0
        } else {
            let sum: u32 = seed.reviews.iter().map(|r| u32::from(r.rating)).sum();
            f64::from(sum) / seed.reviews.len() as f64
        };

        Self {
            focused: false,
            total_bookings: seed.bookings.len(),
            pending_approvals,
            active_tenants: active.len(),
            average_rating,
            monthly_revenue: active.iter().map(|t| t.monthly_rent).sum(),
            guest_names: seed
                .bookings
                .iter()
                .map(|b| (b.id, b.guest.clone()))
                .collect(),
            review_guests: seed
                .reviews
                .iter()
                .map(|r| (r.id, r.guest.clone()))
                .collect(),
            tenant_names: seed
                .tenants
                .iter()
                .map(|t| (t.id, t.name.clone()))
                .collect(),
            tenant_rents: seed
                .tenants
                .iter()
                .map(|t| (t.id, t.monthly_rent))
                .collect(),
            activity: VecDeque::new(),
        }
    }

    fn push_activity(&mut self, severity: Severity, text: String) {
        self.activity.push_front(ActivityEntry {
            at: Utc::now(),
            severity,
            text,
        });
        self.activity.truncate(ACTIVITY_CAP);
    }

    fn guest(&self, id: BookingId) -> String {
        self.guest_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "a guest".to_string())
    }

    fn reviewer(&self, id: ReviewId) -> String {
        self.review_guests
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "a guest".to_string())
    }

    fn tenant(&self, id: TenantId) -> String {
        self.tenant_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "a tenant".to_string())
    }

    #[allow(clippy::unused_self)]
    fn render_stat_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        color: Color,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(vec![
                Span::styled(" ◈ ", Style::default().fg(color)),
                Span::styled(
                    value.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("   {label}"),
                Style::default().fg(theme::SLATE_LIGHT),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Recent Activity ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.activity.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " No recent activity",
                    Style::default().fg(theme::SLATE_MID),
                )),
                inner,
            );
            return;
        }

        let now = Utc::now();
        let max_rows = usize::from(inner.height);
        let lines: Vec<Line> = self
            .activity
            .iter()
            .take(max_rows)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<12}", format_relative_time(entry.at, now)),
                        Style::default().fg(theme::SLATE_MID),
                    ),
                    Span::styled(
                        "● ",
                        Style::default().fg(theme::severity_color(entry.severity)),
                    ),
                    Span::styled(
                        entry.text.clone(),
                        Style::default().fg(theme::PAPER_WHITE),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ApproveDone { id, result } => match result {
                Ok(()) => {
                    self.pending_approvals = self.pending_approvals.saturating_sub(1);
                    let text = format!("Booking from {} approved", self.guest(*id));
                    self.push_activity(Severity::Success, text);
                }
                Err(err) => {
                    let text = format!("Booking approval failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            Action::RejectDone { id, result } => match result {
                Ok(()) => {
                    self.pending_approvals = self.pending_approvals.saturating_sub(1);
                    let text = format!("Booking from {} rejected", self.guest(*id));
                    self.push_activity(Severity::Warning, text);
                }
                Err(err) => {
                    let text = format!("Booking rejection failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            Action::ReplyDone { id, result, .. } => match result {
                Ok(()) => {
                    let text = format!("Replied to {}'s review", self.reviewer(*id));
                    self.push_activity(Severity::Info, text);
                }
                Err(err) => {
                    let text = format!("Review reply failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            Action::ReportDone { id, result } => match result {
                Ok(()) => {
                    let text = format!("Reported {}'s review", self.reviewer(*id));
                    self.push_activity(Severity::Warning, text);
                }
                Err(err) => {
                    let text = format!("Review report failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            Action::SubmitListingDone { result } => match result {
                Ok(()) => {
                    self.push_activity(
                        Severity::Success,
                        "Hostel listing submitted for review".to_string(),
                    );
                }
                Err(err) => {
                    let text = format!("Listing submission failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            Action::TerminateDone { id, result } => match result {
                Ok(()) => {
                    self.active_tenants = self.active_tenants.saturating_sub(1);
                    let rent = self.tenant_rents.get(id).copied().unwrap_or(0);
                    self.monthly_revenue = self.monthly_revenue.saturating_sub(rent);
                    let text = format!("Lease termination started for {}", self.tenant(*id));
                    self.push_activity(Severity::Warning, text);
                }
                Err(err) => {
                    let text = format!("Lease termination failed: {err}");
                    self.push_activity(Severity::Error, text);
                }
            },
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout =
            Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);
        let cards = Layout::horizontal([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(layout[0]);

        self.render_stat_card(
            frame,
            cards[0],
            "Total Bookings",
            &self.total_bookings.to_string(),
            theme::INFO_BLUE,
        );
        self.render_stat_card(
            frame,
            cards[1],
            "Pending Approvals",
            &self.pending_approvals.to_string(),
            theme::WARNING_AMBER,
        );
        self.render_stat_card(
            frame,
            cards[2],
            "Active Tenants",
            &self.active_tenants.to_string(),
            theme::SUCCESS_GREEN,
        );
        self.render_stat_card(
            frame,
            cards[3],
            "Average Rating",
            &format!("{:.1}★", self.average_rating),
            theme::STAR_GOLD,
        );
        self.render_stat_card(
            frame,
            cards[4],
            "Monthly Revenue",
            &format_currency(self.monthly_revenue),
            theme::BRAND_GREEN,
        );

        self.render_activity(frame, layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "dashboard"
    }
}
