//! Application state, event loop, and action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use hosteldesk_config::UiConfig;
use hosteldesk_core::{
    ConfirmRequest, ConfirmSlot, ConfirmStyle, DebouncedQuery, Notice, NoticeSlot, OwnerCommand,
    StubGateway,
};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::seed::SeedData;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Navigation sidebar visibility.
    sidebar_visible: bool,
    /// Whether the search prompt owns the keyboard.
    search_active: bool,
    /// Debounced search query feeding the bookings table.
    search: DebouncedQuery,
    /// Single pending confirmation dialog.
    confirm: ConfirmSlot<ConfirmAction>,
    /// Single transient toast.
    notices: NoticeSlot,
    /// Simulated backend for owner commands.
    gateway: StubGateway,
    /// Action sender; components dispatch follow-ups through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver; the main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Create the App with all screens populated from the seed dataset.
    pub fn new(config: &UiConfig, seed: SeedData) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(seed, config.listing_limits())
                .into_iter()
                .collect();

        Self {
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            sidebar_visible: false,
            search_active: false,
            search: DebouncedQuery::new(config.search_delay()),
            confirm: ConfirmSlot::new(),
            notices: NoticeSlot::new(config.notice_lifetime()),
            gateway: StubGateway::new(),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Confirmation dialog captures all input
        if self.confirm.is_open() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // Ctrl chords work everywhere, including over capturing screens
        // and the search prompt
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => {
                return Ok(Some(Action::ToggleSidebar));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('k')) => return Ok(Some(Action::OpenSearch)),
            _ => {}
        }

        // The search prompt owns the keyboard while active
        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search.clear();
                    Ok(Some(Action::CloseSearch))
                }
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    let mut draft = self.search.draft().to_string();
                    draft.pop();
                    self.search.input(draft, Instant::now());
                    Ok(None)
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let mut draft = self.search.draft().to_string();
                    draft.push(c);
                    self.search.input(draft, Instant::now());
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // A screen in text-entry mode gets every remaining key
        if self
            .screens
            .get(&self.active_screen)
            .is_some_and(|screen| screen.captures_input())
        {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let n = c.to_digit(10).map_or(0, |d| u8::try_from(d).unwrap_or(0));
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc dismisses whatever is topmost, then goes back
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if self.notices.is_visible() {
                    return Ok(Some(Action::DismissNotice));
                }
                if self.sidebar_visible {
                    return Ok(Some(Action::ToggleSidebar));
                }
                return Ok(Some(Action::GoBack));
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!("terminal resized to {w}x{h}");
            }

            Action::SwitchScreen(target) => {
                self.sidebar_visible = false;
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::ToggleSidebar => {
                self.sidebar_visible = !self.sidebar_visible;
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search.clear();
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search.clear();
                self.action_tx.send(Action::QueryApplied(String::new()))?;
            }

            Action::SearchSubmit => {
                self.search.submit();
                self.search_active = false;
                self.action_tx
                    .send(Action::QueryApplied(self.search.applied().to_string()))?;
            }

            Action::Render => {}

            Action::Tick => {
                let now = Instant::now();
                self.notices.sweep(now);
                if self.search.poll(now) {
                    self.action_tx
                        .send(Action::QueryApplied(self.search.applied().to_string()))?;
                }
                // Screens animate on ticks (throbbers), so everyone gets one
                self.broadcast(action)?;
            }

            // Confirmation dialog management
            Action::ShowConfirm(request) => {
                self.confirm.open(request.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirmed) = self.confirm.confirm() {
                    self.action_tx.send(Action::Confirmed(confirmed))?;
                }
            }

            Action::ConfirmNo => {
                self.confirm.cancel();
            }

            // Owner commands run on a spawned task against the gateway
            Action::Dispatch(command) => {
                self.spawn_command(command.clone());
            }

            // Completions and applied queries go to ALL screens so the
            // owning screen settles state and the dashboard stays in sync
            Action::Confirmed(_)
            | Action::ApproveDone { .. }
            | Action::RejectDone { .. }
            | Action::ReplyDone { .. }
            | Action::SubmitListingDone { .. }
            | Action::ReportDone { .. }
            | Action::TerminateDone { .. }
            | Action::QueryApplied(_) => {
                self.broadcast(action)?;
            }

            // Notifications
            Action::Notify(notice) => {
                self.notices.post(notice.clone(), Instant::now());
            }

            Action::DismissNotice => {
                self.notices.dismiss();
            }
        }

        Ok(())
    }

    /// Send an action to every screen, forwarding any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Run an owner command on a spawned task. The matching completion
    /// action comes back through the channel once the gateway resolves.
    fn spawn_command(&self, command: OwnerCommand) {
        let gateway = self.gateway;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .execute(command.clone())
                .await
                .map_err(|e| e.to_string());
            let done = match command {
                OwnerCommand::ApproveBooking { id } => Action::ApproveDone { id, result },
                OwnerCommand::RejectBooking { id } => Action::RejectDone { id, result },
                OwnerCommand::PostReply { id, body } => Action::ReplyDone {
                    id,
                    text: body,
                    result,
                },
                OwnerCommand::SubmitListing => Action::SubmitListingDone { result },
                OwnerCommand::ReportReview { id } => Action::ReportDone { id, result },
                OwnerCommand::TerminateLease { id } => Action::TerminateDone { id, result },
            };
            let _ = tx.send(done);
        });
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let content_area = layout[0];
        let tab_area = layout[1];
        let status_area = layout[2];

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Render overlays on top (order matters: last = topmost)
        if self.sidebar_visible {
            self.render_sidebar(frame, content_area);
        }

        if let Some(notice) = self.notices.active() {
            self.render_notice(frame, area, notice);
        }

        if let Some(request) = self.confirm.pending() {
            self.render_confirm_dialog(frame, area, request);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing all screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let compact = area.width < 70;
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let label = if compact { id.label_short() } else { id.label() };
                Line::from(Span::styled(format!(" {} {} ", id.number(), label), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with the search prompt or key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::BRAND_GREEN)),
                Span::styled(self.search.draft(), Style::default().fg(theme::PAPER_WHITE)),
                Span::styled("█", Style::default().fg(theme::BRAND_GREEN)),
                Span::styled("  Esc cancel  Enter apply", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let brand = Span::styled(
            "◈ WorkNStay Owner",
            Style::default()
                .fg(theme::BRAND_GREEN)
                .add_modifier(Modifier::BOLD),
        );
        let hints = Span::styled(
            " │ ? help  / search  Ctrl+B menu  q quit",
            theme::key_hint(),
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), brand, hints])),
            area,
        );
    }

    /// Render the navigation sidebar over the left edge of the content.
    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let width = 24u16.min(area.width);
        let sidebar_area = Rect::new(area.x, area.y, width, area.height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            sidebar_area,
        );

        let block = Block::default()
            .title(" Menu ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(sidebar_area);
        frame.render_widget(block, sidebar_area);

        let mut lines = vec![Line::from("")];
        for id in ScreenId::ALL {
            let style = if id == self.active_screen {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}  ", id.number()), theme::key_hint_key()),
                Span::styled(id.label(), style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Esc close", theme::key_hint())));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self, clippy::too_many_lines)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 62u16.min(area.width.saturating_sub(4));
        let help_height = 24u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Navigation",
                Style::default().fg(theme::BRAND_GREEN),
            )),
            Line::from(Span::styled("  ─────────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  1-5       ", theme::key_hint_key()),
                Span::styled("Jump to screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Tab       ", theme::key_hint_key()),
                Span::styled("Next screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  j/k ↑/↓   ", theme::key_hint_key()),
                Span::styled("Move up/down", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  g/G       ", theme::key_hint_key()),
                Span::styled("Top / bottom", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Ctrl+d/u  ", theme::key_hint_key()),
                Span::styled("Page down / up", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Esc       ", theme::key_hint_key()),
                Span::styled("Back / close", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Actions",
                Style::default().fg(theme::BRAND_GREEN),
            )),
            Line::from(Span::styled("  ───────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  a/r       ", theme::key_hint_key()),
                Span::styled("Approve / reject     ", theme::key_hint()),
                Span::styled("f  ", theme::key_hint_key()),
                Span::styled("Cycle filter", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  R         ", theme::key_hint_key()),
                Span::styled("Reply to review      ", theme::key_hint()),
                Span::styled("x  ", theme::key_hint_key()),
                Span::styled("Report fake", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  t         ", theme::key_hint_key()),
                Span::styled("Terminate lease      ", theme::key_hint()),
                Span::styled("p  ", theme::key_hint_key()),
                Span::styled("Record payment", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  e         ", theme::key_hint_key()),
                Span::styled("Export bookings CSV", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Global",
                Style::default().fg(theme::BRAND_GREEN),
            )),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  /         ", theme::key_hint_key()),
                Span::styled("Search               ", theme::key_hint()),
                Span::styled("?  ", theme::key_hint_key()),
                Span::styled("This help", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Ctrl+B    ", theme::key_hint_key()),
                Span::styled("Menu sidebar         ", theme::key_hint()),
                Span::styled("q  ", theme::key_hint_key()),
                Span::styled("Quit", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "                          Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        request: &ConfirmRequest<ConfirmAction>,
    ) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 7u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let accent = match request.style {
            ConfirmStyle::Danger => theme::ERROR_RED,
            ConfirmStyle::Primary => theme::WARNING_AMBER,
        };

        let block = Block::default()
            .title(format!(" {} ", request.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let rows = Layout::vertical([Constraint::Min(2), Constraint::Length(1)]).split(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(
                request.message.clone(),
                Style::default().fg(theme::PAPER_WHITE),
            ))
            .wrap(Wrap { trim: true }),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])),
            rows[1],
        );
    }

    /// Render a notice toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let msg_len = u16::try_from(notice.message.len()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let color = theme::severity_color(notice.severity);
        let icon = theme::severity_icon(notice.severity);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(
                notice.message.clone(),
                Style::default().fg(theme::PAPER_WHITE),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&UiConfig::default(), SeedData::builtin())
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        format!("{:?}", terminal.backend().buffer())
    }

    #[test]
    fn number_keys_map_to_switch_screen_actions() {
        let mut app = app();
        let action = app.handle_key_event(key(KeyCode::Char('4'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchScreen(ScreenId::Reviews))
        ));
    }

    #[test]
    fn confirm_dialog_swallows_keys_until_answered() {
        let mut app = app();
        let request = ConfirmAction::ApproveBooking {
            id: hosteldesk_core::BookingId(1),
        }
        .request();
        app.process_action(&Action::ShowConfirm(request)).unwrap();

        // Screen keys no longer reach the screens
        let action = app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert!(action.is_none());

        let action = app.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(action, Some(Action::ConfirmYes)));

        app.process_action(&Action::ConfirmYes).unwrap();
        assert!(!app.confirm.is_open());
        // The accepted action is queued as a Confirmed broadcast
        let queued = app.action_rx.try_recv().unwrap();
        assert!(matches!(
            queued,
            Action::Confirmed(ConfirmAction::ApproveBooking { .. })
        ));
    }

    #[test]
    fn search_applies_after_submit_and_clears_on_close() {
        let mut app = app();
        app.process_action(&Action::OpenSearch).unwrap();
        assert!(app.search_active);

        for c in "john".chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        let action = app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SearchSubmit)));

        app.process_action(&Action::SearchSubmit).unwrap();
        assert!(!app.search_active);
        let queued = app.action_rx.try_recv().unwrap();
        let Action::QueryApplied(query) = queued else {
            panic!("expected an applied query, got {queued:?}");
        };
        assert_eq!(query, "john");
    }

    #[test]
    fn toast_survives_a_tick_inside_its_lifetime() {
        let mut app = app();
        app.process_action(&Action::Notify(Notice::success("Saved")))
            .unwrap();
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notices.is_visible());
    }

    #[test]
    fn toast_expires_once_its_lifetime_has_passed() {
        let config = UiConfig {
            notice_duration_ms: 0,
            ..UiConfig::default()
        };
        let mut app = App::new(&config, SeedData::builtin());
        app.process_action(&Action::Notify(Notice::success("Saved")))
            .unwrap();
        assert!(app.notices.is_visible());

        app.process_action(&Action::Tick).unwrap();
        assert!(!app.notices.is_visible());
    }

    #[test]
    fn full_frame_renders_tab_bar_and_status_line() {
        let mut app = app();
        app.init_screens().unwrap();
        let rendered = draw(&app);
        assert!(rendered.contains("Dashboard"));
        assert!(rendered.contains("Bookings"));
        assert!(rendered.contains("WorkNStay Owner"));
    }

    #[test]
    fn sidebar_toggles_and_esc_closes_it_first() {
        let mut app = app();
        app.process_action(&Action::ToggleSidebar).unwrap();
        assert!(app.sidebar_visible);

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::ToggleSidebar)));

        app.process_action(&Action::ToggleSidebar).unwrap();
        assert!(!app.sidebar_visible);
    }

    #[test]
    fn switching_screens_closes_the_sidebar() {
        let mut app = app();
        app.init_screens().unwrap();
        app.process_action(&Action::ToggleSidebar).unwrap();
        app.process_action(&Action::SwitchScreen(ScreenId::Bookings))
            .unwrap();
        assert!(!app.sidebar_visible);
        assert_eq!(app.active_screen, ScreenId::Bookings);
    }
}
