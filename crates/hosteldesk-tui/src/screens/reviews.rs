//! Reviews screen: guest review cards with rating filter pills, the
//! single reply composer, and the report workflow.

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tracing::warn;

use hosteldesk_core::gateway::OwnerCommand;
use hosteldesk_core::text::format_relative_time;
use hosteldesk_core::{CoreError, Notice, RatingFilter, Review, ReviewBoard, ReviewId};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, sub_tabs};

pub struct ReviewsScreen {
    focused: bool,
    board: ReviewBoard,
    /// Index into the visible card list. Doubles as the scroll anchor:
    /// rendering starts at the selected card.
    selected: usize,
}

impl ReviewsScreen {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            focused: false,
            board: ReviewBoard::new(reviews),
            selected: 0,
        }
    }

    fn clamp_selected(&mut self) {
        let len = self.board.visible().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }

    fn selected_review(&self) -> Option<&Review> {
        self.board.visible().get(self.selected).copied()
    }

    fn cycle_filter(&mut self) -> Option<Action> {
        let current = self.board.filter();
        let idx = RatingFilter::ALL
            .iter()
            .position(|f| *f == current)
            .unwrap_or(0);
        let next = RatingFilter::ALL[(idx + 1) % RatingFilter::ALL.len()];
        self.board.set_filter(next);
        self.selected = 0;
        Some(Action::Notify(Notice::info("Filter applied")))
    }

    /// Opens or closes the composer for the selected review.
    fn toggle_composer(&mut self) -> Option<Action> {
        let review = self.selected_review()?;
        let id = review.id;
        match self.board.toggle_reply(id) {
            Ok(_) => None,
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    fn submit_reply(&mut self, id: ReviewId) -> Option<Action> {
        match self.board.begin_reply(id) {
            Ok(body) => Some(Action::Dispatch(OwnerCommand::PostReply { id, body })),
            Err(err) => Some(Action::Notify(Notice::from_error(&err))),
        }
    }

    /// Opens the report dialog, or warns when the review was already
    /// reported.
    fn request_report(&self) -> Option<Action> {
        let review = self.selected_review()?;
        if self.board.is_busy(review.id) {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::RequestInFlight,
            )));
        }
        if review.reported {
            return Some(Action::Notify(Notice::from_error(
                &CoreError::AlreadyReported,
            )));
        }
        Some(Action::ShowConfirm(
            ConfirmAction::ReportReview { id: review.id }.request(),
        ))
    }

    fn filter_index(&self) -> usize {
        RatingFilter::ALL
            .iter()
            .position(|f| *f == self.board.filter())
            .unwrap_or(0)
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, review: &Review, selected: bool) -> u16 {
        let now = Utc::now();
        let composer = self
            .board
            .composer()
            .filter(|(id, _)| *id == review.id)
            .map(|(_, draft)| draft.to_string());

        let mut lines: Vec<Line> = Vec::new();
        let mut header = vec![
            badges::rating_stars(review.rating),
            Span::raw("  "),
            Span::styled(
                review.guest.clone(),
                Style::default()
                    .fg(theme::PAPER_WHITE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {}", format_relative_time(review.posted_at, now)),
                Style::default().fg(theme::SLATE_MID),
            ),
        ];
        if review.reported {
            header.push(Span::styled(
                " · Reported",
                Style::default().fg(theme::ERROR_RED),
            ));
        }
        if self.board.is_busy(review.id) {
            header.push(Span::styled(
                " ⋯",
                Style::default().fg(theme::WARNING_AMBER),
            ));
        }
        lines.push(Line::from(header));
        lines.push(Line::styled(
            review.text.clone(),
            Style::default().fg(theme::SLATE_LIGHT),
        ));

        if let Some(reply) = &review.reply {
            lines.push(Line::from(vec![
                Span::styled("↳ Owner Response", theme::tab_active()),
                Span::styled(
                    format!(" · {}", format_relative_time(reply.posted_at, now)),
                    Style::default().fg(theme::SLATE_MID),
                ),
            ]));
            lines.push(Line::styled(
                format!("  {}", reply.text),
                Style::default().fg(theme::PAPER_WHITE),
            ));
        }

        if let Some(draft) = composer {
            lines.push(Line::from(vec![
                Span::styled("Reply: ", Style::default().fg(theme::BRAND_GREEN)),
                Span::styled(draft, Style::default().fg(theme::PAPER_WHITE)),
                Span::styled("█", Style::default().fg(theme::BRAND_GREEN)),
            ]));
        }

        // Borders plus a rough allowance for wrapped review text
        let text_overflow = u16::try_from(review.text.len() / usize::from(area.width.max(20)))
            .unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .saturating_add(text_overflow)
            .min(area.height);
        let card_area = Rect { height, ..area };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if selected {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

        height
    }

    /// Test hook and dashboard seam: the underlying board.
    pub fn board(&self) -> &ReviewBoard {
        &self.board
    }
}

impl Component for ReviewsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Composer consumes typing; only Esc and Enter are structural
        let composing = self.board.composer().map(|(id, _)| id);
        if let Some(id) = composing {
            return match key.code {
                KeyCode::Esc => {
                    let _ = self.board.toggle_reply(id);
                    Ok(None)
                }
                KeyCode::Enter => Ok(self.submit_reply(id)),
                KeyCode::Backspace => {
                    if let Some(draft) = self.board.draft_mut() {
                        draft.pop();
                    }
                    Ok(None)
                }
                KeyCode::Char(c) => {
                    if let Some(draft) = self.board.draft_mut() {
                        draft.push(c);
                    }
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = self.selected.saturating_add(1);
                self.clamp_selected();
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.board.visible().len();
                self.selected = len.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Char('R') | KeyCode::Enter => Ok(self.toggle_composer()),
            KeyCode::Char('x') => Ok(self.request_report()),
            KeyCode::Char('f') => Ok(self.cycle_filter()),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Confirmed(ConfirmAction::ReportReview { id }) => {
                match self.board.begin_report(*id) {
                    Ok(()) => Ok(Some(Action::Dispatch(OwnerCommand::ReportReview {
                        id: *id,
                    }))),
                    Err(err) => Ok(Some(Action::Notify(Notice::from_error(&err)))),
                }
            }
            Action::ReportDone { id, result } => match result {
                Ok(()) => {
                    if let Err(err) = self.board.finish_report(*id) {
                        warn!(review = %id, error = %err, "Report completion dropped");
                    }
                    Ok(Some(Action::Notify(Notice::info(
                        "Review reported. Our team will investigate and get back to you within 48 hours.",
                    ))))
                }
                Err(message) => {
                    self.board.release(*id);
                    Ok(Some(Action::Notify(Notice::error(message.clone()))))
                }
            },
            Action::ReplyDone { id, text, result } => match result {
                Ok(()) => {
                    if let Err(err) = self.board.finish_reply(*id, text, Utc::now()) {
                        warn!(review = %id, error = %err, "Reply completion dropped");
                    }
                    Ok(Some(Action::Notify(Notice::success(
                        "Reply posted successfully!",
                    ))))
                }
                Err(message) => {
                    self.board.release(*id);
                    Ok(Some(Action::Notify(Notice::error(message.clone()))))
                }
            },
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = self.board.visible();
        let total = self.board.reviews().len();
        let shown = visible.len();
        let average = self.board.average_rating();

        let title = format!(" Reviews ({shown}/{total}) · avg {average:.1}★ ");
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
            Constraint::Length(1), // rating pills
            Constraint::Min(1),    // cards
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let labels: Vec<&str> = RatingFilter::ALL.iter().map(RatingFilter::label).collect();
        let pills = sub_tabs::render_sub_tabs(&labels, self.filter_index());
        frame.render_widget(Paragraph::new(pills), layout[0]);

        // Cards are rendered from the selected one downward
        let mut remaining = layout[1];
        for (i, review) in visible.iter().enumerate().skip(self.selected) {
            if remaining.height < 3 {
                break;
            }
            let used = self.render_card(frame, remaining, review, i == self.selected);
            remaining.y = remaining.y.saturating_add(used);
            remaining.height = remaining.height.saturating_sub(used);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("review  ", theme::key_hint()),
            Span::styled("R/Enter ", theme::key_hint_key()),
            Span::styled("reply  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("report  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn captures_input(&self) -> bool {
        self.board.composer().is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Reviews"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn review(id: u32, guest: &str, rating: u8) -> Review {
        Review {
            id: ReviewId(id),
            guest: guest.to_string(),
            rating,
            text: "A pleasant stay overall.".to_string(),
            posted_at: Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap(),
            reply: None,
            reported: false,
        }
    }

    fn press(screen: &mut ReviewsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut ReviewsScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn empty_reply_is_refused_and_composer_stays_open() {
        let mut screen = ReviewsScreen::new(vec![review(1, "Sarah Kim", 5)]);
        press(&mut screen, KeyCode::Char('R'));
        assert!(screen.captures_input());

        type_text(&mut screen, "   ");
        let action = press(&mut screen, KeyCode::Enter);
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Please enter a reply before submitting.");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert!(screen.captures_input());
    }

    #[test]
    fn reply_flow_dispatches_trimmed_text_and_stores_escaped() {
        let mut screen = ReviewsScreen::new(vec![review(1, "Sarah Kim", 5)]);
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "  Thanks <3  ");

        let action = press(&mut screen, KeyCode::Enter);
        match action {
            Some(Action::Dispatch(OwnerCommand::PostReply { id, body })) => {
                assert_eq!(id, ReviewId(1));
                assert_eq!(body, "Thanks <3");
            }
            other => panic!("expected Dispatch, got {other:?}"),
        }

        let action = screen
            .update(&Action::ReplyDone {
                id: ReviewId(1),
                text: "Thanks <3".to_string(),
                result: Ok(()),
            })
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Reply posted successfully!");
            }
            other => panic!("expected Notify, got {other:?}"),
        }

        let stored = screen.board().get(ReviewId(1)).unwrap();
        assert_eq!(stored.reply.as_ref().unwrap().text, "Thanks &lt;3");
        assert!(!screen.captures_input());

        // The reply affordance is gone for good
        let action = press(&mut screen, KeyCode::Char('R'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Review already has an owner reply");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn report_flow_is_confirm_gated_and_permanent() {
        let mut screen = ReviewsScreen::new(vec![review(1, "Raj Patel", 2)]);
        let action = press(&mut screen, KeyCode::Char('x'));
        match action {
            Some(Action::ShowConfirm(request)) => {
                assert_eq!(request.title, "Report Review");
            }
            other => panic!("expected ShowConfirm, got {other:?}"),
        }

        screen
            .update(&Action::Confirmed(ConfirmAction::ReportReview {
                id: ReviewId(1),
            }))
            .unwrap();
        let action = screen
            .update(&Action::ReportDone {
                id: ReviewId(1),
                result: Ok(()),
            })
            .unwrap();
        match action {
            Some(Action::Notify(notice)) => {
                assert!(notice.message.starts_with("Review reported."));
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert!(screen.board().get(ReviewId(1)).unwrap().reported);

        let action = press(&mut screen, KeyCode::Char('x'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Review has already been reported");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn rating_filter_cycles_and_posts_filter_applied() {
        let mut screen = ReviewsScreen::new(vec![
            review(1, "Sarah Kim", 5),
            review(2, "Raj Patel", 2),
        ]);
        let action = press(&mut screen, KeyCode::Char('f'));
        match action {
            Some(Action::Notify(notice)) => {
                assert_eq!(notice.message, "Filter applied");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        assert_eq!(screen.board().filter(), RatingFilter::Five);
        assert_eq!(screen.board().visible().len(), 1);
    }

    #[test]
    fn old_reviews_render_with_absolute_dates() {
        let now = Utc::now();
        let mut old = review(1, "Sarah Kim", 5);
        old.posted_at = now - Duration::days(30);
        let screen = ReviewsScreen::new(vec![old]);

        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Sarah Kim"));
        assert!(rendered.contains("★★★★★"));
        assert!(!rendered.contains("ago"));
    }
}
