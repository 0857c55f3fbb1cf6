use std::mem;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::config::{AppConfig, Theme};
use crate::corpus::Corpus;
use crate::error::NavigationError;
use crate::models::ChapterId;

use super::helpers::{
    centered_rect, chapter_lines, drawer_rect, search_cursor_x, search_result_lines,
    surface_error, wrapped_rows,
};
use super::navigation::{DestinationKey, DrawerState, Navigator, SEARCH_TITLE};
use super::screens::{ChapterScreen, ConfirmInfo, InfoChoice, SearchScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header holding the destination title or the search field.
const HEADER_HEIGHT: u16 = 3;
/// Widest the drawer overlay gets.
const DRAWER_WIDTH: u16 = 36;
/// Lines moved by PageUp/PageDown in the chapter viewer.
const PAGE_LINES: isize = 10;
/// Rows moved by PageUp/PageDown in the search results.
const PAGE_ROWS: isize = 5;
const SEARCH_PROMPT: &str = "Search: ";
const SEARCH_PLACEHOLDER: &str = "Search...";

/// Screen currently mounted in the content area.
enum Screen {
    Search,
    Chapter(ChapterScreen),
}

/// Input modes layered on top of the current screen.
enum Mode {
    Normal,
    /// The search field has focus and receives printable keys.
    Searching,
    Drawer(DrawerState),
    ConfirmInfo(ConfirmInfo),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. The corpus is shared read-only; everything
/// else is owned here and replaced whole on each update.
pub struct App {
    corpus: Arc<Corpus>,
    navigator: Navigator,
    theme: Theme,
    info_url: String,
    current: DestinationKey,
    screen: Screen,
    mode: Mode,
    search: SearchScreen,
    status: Option<StatusMessage>,
}

impl App {
    /// Register every destination and mount the search screen.
    pub fn new(corpus: Arc<Corpus>, config: &AppConfig) -> Result<Self> {
        let navigator =
            Navigator::register(&corpus).context("failed to register destinations")?;
        let search = SearchScreen::new(&corpus);
        Ok(Self {
            corpus,
            navigator,
            theme: config.theme,
            info_url: config.info_url.clone(),
            current: DestinationKey::Search,
            screen: Screen::Search,
            mode: Mode::Normal,
            search,
            status: None,
        })
    }

    pub fn current_destination(&self) -> DestinationKey {
        self.current
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Switch the content area to `key`. Chapter destinations get a fresh
    /// viewer bound to that chapter.
    pub fn navigate(&mut self, key: DestinationKey) -> Result<(), NavigationError> {
        self.navigator.navigate(key)?;
        self.screen = match key {
            DestinationKey::Search => Screen::Search,
            DestinationKey::Chapter(id) => {
                debug_assert!(self.corpus.get(id).is_some());
                Screen::Chapter(ChapterScreen::new(id))
            }
        };
        self.current = key;
        info!(destination = %key, "navigated");
        Ok(())
    }

    /// Process one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching => self.handle_search(code)?,
            Mode::Drawer(drawer) => self.handle_drawer(code, drawer)?,
            Mode::ConfirmInfo(confirm) => self.handle_confirm_info(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('d') | KeyCode::Char('D') => {
                let selected = self.navigator.position(self.current).unwrap_or(0);
                return Ok(Mode::Drawer(DrawerState::new(selected)));
            }
            KeyCode::Char('?') => {
                self.clear_status();
                return Ok(Mode::ConfirmInfo(ConfirmInfo::new()));
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.clear_status();
                if !matches!(self.screen, Screen::Search) {
                    self.go_to(DestinationKey::Search);
                }
                return Ok(Mode::Searching);
            }
            _ => {}
        }

        match self.screen {
            Screen::Search => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                }
                KeyCode::Up => self.search.move_selection(-1),
                KeyCode::Down => self.search.move_selection(1),
                KeyCode::PageUp => self.search.move_selection(-PAGE_ROWS),
                KeyCode::PageDown => self.search.move_selection(PAGE_ROWS),
                KeyCode::Home => self.search.select_first(),
                KeyCode::End => self.search.select_last(),
                KeyCode::Enter => self.open_selected_result(),
                _ => {}
            },
            Screen::Chapter(ref mut viewer) => {
                let content_rows = self
                    .corpus
                    .get(viewer.chapter_id)
                    .map(|chapter| viewer.content_rows(chapter_lines(chapter, &self.theme)))
                    .unwrap_or(0);
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        self.clear_status();
                        self.go_to(DestinationKey::Search);
                    }
                    KeyCode::Up => viewer.scroll_by(-1, content_rows),
                    KeyCode::Down => viewer.scroll_by(1, content_rows),
                    KeyCode::PageUp => viewer.scroll_by(-PAGE_LINES, content_rows),
                    KeyCode::PageDown => viewer.scroll_by(PAGE_LINES, content_rows),
                    KeyCode::Home => viewer.scroll_to_top(),
                    KeyCode::End => viewer.scroll_to_bottom(content_rows),
                    KeyCode::Tab => {
                        self.clear_status();
                        self.open_relative_chapter(1);
                    }
                    KeyCode::BackTab => {
                        self.clear_status();
                        self.open_relative_chapter(-1);
                    }
                    _ => {}
                }
            }
        }

        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Enter => {
                self.open_selected_result();
                return Ok(Mode::Normal);
            }
            KeyCode::Up => self.search.move_selection(-1),
            KeyCode::Down => self.search.move_selection(1),
            KeyCode::PageUp => self.search.move_selection(-PAGE_ROWS),
            KeyCode::PageDown => self.search.move_selection(PAGE_ROWS),
            KeyCode::Home => self.search.select_first(),
            KeyCode::End => self.search.select_last(),
            KeyCode::Backspace => self.search.pop_char(&self.corpus),
            KeyCode::Char(ch) if !ch.is_control() => self.search.push_char(ch, &self.corpus),
            _ => {}
        }
        Ok(Mode::Searching)
    }

    fn handle_drawer(&mut self, code: KeyCode, mut drawer: DrawerState) -> Result<Mode> {
        let len = self.navigator.len();
        match code {
            KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('D') => Ok(Mode::Normal),
            KeyCode::Up => {
                drawer.move_selection(-1, len);
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::Down => {
                drawer.move_selection(1, len);
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::PageUp => {
                drawer.move_selection(-PAGE_ROWS, len);
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::PageDown => {
                drawer.move_selection(PAGE_ROWS, len);
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::Home => {
                drawer.selected = 0;
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::End => {
                drawer.selected = len.saturating_sub(1);
                Ok(Mode::Drawer(drawer))
            }
            KeyCode::Enter => {
                let key = self
                    .navigator
                    .destinations()
                    .get(drawer.selected)
                    .map(|destination| destination.key);
                if let Some(key) = key {
                    self.clear_status();
                    self.go_to(key);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::Drawer(drawer)),
        }
    }

    fn handle_confirm_info(&mut self, code: KeyCode, mut confirm: ConfirmInfo) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Ok(Mode::Normal),
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.open_info_page();
                Ok(Mode::Normal)
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                confirm.toggle();
                Ok(Mode::ConfirmInfo(confirm))
            }
            KeyCode::Enter => {
                if confirm.selection == InfoChoice::Yes {
                    self.open_info_page();
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmInfo(confirm)),
        }
    }

    /// Navigate and report failures in the footer instead of aborting.
    fn go_to(&mut self, key: DestinationKey) {
        if let Err(err) = self.navigate(key) {
            warn!(destination = %key, error = %err, "navigation failed");
            self.set_status(surface_error(&anyhow::Error::from(err)), StatusKind::Error);
        }
    }

    fn open_selected_result(&mut self) {
        match self.search.current_chapter() {
            Some(id) => self.go_to(DestinationKey::Chapter(id)),
            None => self.set_status("No chapter selected.", StatusKind::Error),
        }
    }

    /// Step to the neighbouring chapter in dataset order, wrapping around.
    fn open_relative_chapter(&mut self, offset: isize) {
        let current = match self.current {
            DestinationKey::Chapter(id) => id,
            DestinationKey::Search => return,
        };
        let len = self.corpus.len();
        if len == 0 {
            return;
        }
        let Some(position) = self.corpus.position(current) else {
            return;
        };
        let next = (position as isize + offset).rem_euclid(len as isize) as usize;
        let id: ChapterId = self.corpus.chapters()[next].id;
        self.go_to(DestinationKey::Chapter(id));
    }

    fn open_info_page(&mut self) {
        match open_link(&self.info_url) {
            Ok(()) => {
                let message = format!("Opened {}.", self.info_url);
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                warn!(url = %self.info_url, error = %err, "failed to open info page");
                self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let background = Block::default().style(
            Style::default()
                .bg(self.theme.background)
                .fg(self.theme.text),
        );
        frame.render_widget(background, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match &self.screen {
            Screen::Search => self.draw_search_results(frame, chunks[1]),
            Screen::Chapter(viewer) => self.draw_chapter(frame, chunks[1], viewer),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Drawer(drawer) => self.draw_drawer(frame, area, drawer),
            Mode::ConfirmInfo(confirm) => self.draw_confirm_info(frame, area, confirm),
            Mode::Searching | Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .navigator
            .navigate(self.current)
            .map(|destination| destination.header_title.clone())
            .unwrap_or_else(|_| SEARCH_TITLE.to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Line::from(" [?] ").alignment(Alignment::Right));
        let inner = block.inner(area);

        let content = match self.screen {
            Screen::Search => {
                let query = if self.search.query.is_empty() && !matches!(self.mode, Mode::Searching)
                {
                    Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
                } else {
                    Span::raw(self.search.query.clone())
                };
                Line::from(vec![Span::raw(SEARCH_PROMPT), query])
            }
            Screen::Chapter(_) => Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if matches!(self.mode, Mode::Searching) {
            let cursor_x = search_cursor_x(inner, SEARCH_PROMPT, &self.search.query);
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_search_results(&self, frame: &mut Frame, area: Rect) {
        if self.search.results.is_empty() {
            let message = Paragraph::new("No chapters match the search.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .search
            .results
            .iter()
            .filter_map(|id| self.corpus.get(*id))
            .map(|chapter| ListItem::new(search_result_lines(chapter)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border))
                    .title(format!("{} chapters", self.search.results.len())),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.highlight)
                    .fg(Color::White),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.search.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_chapter(&self, frame: &mut Frame, area: Rect, viewer: &ChapterScreen) {
        let Some(chapter) = self.corpus.get(viewer.chapter_id) else {
            let message = Paragraph::new("Chapter not found.").alignment(Alignment::Center);
            frame.render_widget(message, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(chapter.display_title());
        let inner = block.inner(area);
        viewer.viewport.set(inner);

        let lines = chapter_lines(chapter, &self.theme);
        let scroll = viewer
            .scroll
            .min(viewer.max_scroll(wrapped_rows(lines.clone(), inner.width)));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(self.theme.primary)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Drawer(_)) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (_, Mode::ConfirmInfo(_)) => Line::from(vec![
                Span::styled("[←→]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::Searching) => Line::from(vec![
                Span::raw("Type to filter   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Done"),
            ]),
            (Screen::Chapter(_), _) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Chapter   "),
                Span::styled("[d]", key_style),
                Span::raw(" Drawer   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[?]", key_style),
                Span::raw(" Info   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Search, _) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[d]", key_style),
                Span::raw(" Drawer   "),
                Span::styled("[?]", key_style),
                Span::raw(" Info   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_drawer(&self, frame: &mut Frame, area: Rect, drawer: &DrawerState) {
        let drawer_area = drawer_rect(DRAWER_WIDTH, area);
        frame.render_widget(Clear, drawer_area);

        let items: Vec<ListItem> = self
            .navigator
            .destinations()
            .iter()
            .map(|destination| {
                let style = if destination.key == self.current {
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(destination.label.clone(), style))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Chapters")
                    .style(Style::default().bg(self.theme.background).fg(self.theme.text)),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.highlight)
                    .fg(Color::White),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(drawer.selected));
        frame.render_stateful_widget(list, drawer_area, &mut list_state);
    }

    fn draw_confirm_info(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmInfo) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Need more information?")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut option_spans = Vec::new();
        for (idx, label) in confirm.labels().iter().enumerate() {
            if idx > 0 {
                option_spans.push(Span::raw("   "));
            }
            let style = if confirm.selected_index() == idx {
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            option_spans.push(Span::styled(*label, style));
        }

        let lines = vec![
            Line::from("Do you have any comment about the book?"),
            Line::from(""),
            Line::from(option_spans),
            Line::from(""),
            Line::from(Span::styled(
                "Use ←/→ to choose • Enter to confirm • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
