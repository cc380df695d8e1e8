use super::View;
use crate::app::AppCommand;
use crate::render::annotations::{describe_event, present};
use crate::render::map::MapRenderer;
use crate::render::standard_renderer::{team_color, StandardRenderer};
use crate::render::types::{CharDimensions, RenderConfig};
use crate::replay::{player::ReplayPlayer, ReplayData};
use common::{MapProjection, Team};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::cell::{Cell, RefCell};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LayoutMode {
    SingleColumn,
    TwoColumn,
}

impl LayoutMode {
    fn from_dimensions(width: u16, height: u16) -> Self {
        const MIN_WIDTH_FOR_TWO_COLUMN: u16 = 100;
        const ASPECT_RATIO_THRESHOLD: f32 = 1.8;

        let aspect_ratio = width as f32 / height.max(1) as f32;
        if width >= MIN_WIDTH_FOR_TWO_COLUMN && aspect_ratio >= ASPECT_RATIO_THRESHOLD {
            LayoutMode::TwoColumn
        } else {
            LayoutMode::SingleColumn
        }
    }
}

/// Terminal cells are roughly twice as tall as they are wide.
const CHAR_DIMS: CharDimensions = CharDimensions { horizontal: 2, vertical: 1 };

pub struct ReplayViewerState {
    player: ReplayPlayer,
    map: MapRenderer<StandardRenderer>,
    playback_accumulator: f32,
    event_log_scroll: u16,
    event_log_total_lines: Cell<u16>,
    event_log_visible_lines: Cell<u16>,
    event_log_scrollbar_state: RefCell<ScrollbarState>,
}

impl ReplayViewerState {
    pub fn new(replay_data: ReplayData, projection: MapProjection) -> Self {
        Self {
            player: ReplayPlayer::new(replay_data),
            map: MapRenderer::new(StandardRenderer::new(CHAR_DIMS), projection),
            playback_accumulator: 0.0,
            event_log_scroll: 0,
            event_log_total_lines: Cell::new(0),
            event_log_visible_lines: Cell::new(10),
            event_log_scrollbar_state: RefCell::new(ScrollbarState::default()),
        }
    }

    pub fn player(&self) -> &ReplayPlayer {
        &self.player
    }

    fn pause_and(&mut self, action: impl FnOnce(&mut ReplayPlayer)) {
        self.player.is_playing = false;
        self.playback_accumulator = 0.0;
        action(&mut self.player);
    }
}

impl View for ReplayViewerState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char(' ') => {
                self.player.toggle_play();
                self.playback_accumulator = 0.0;
            }
            KeyCode::Char('h') | KeyCode::Left => self.pause_and(|p| p.step_backward(5)),
            KeyCode::Char('l') | KeyCode::Right => self.pause_and(|p| p.step_forward(5)),
            KeyCode::Char('j') if shift => self.scroll_event_log_down(1),
            KeyCode::Char('k') if shift => self.scroll_event_log_up(1),
            KeyCode::Char('j') => self.pause_and(|p| p.step_forward(1)),
            KeyCode::Char('k') => self.pause_and(|p| p.step_backward(1)),
            KeyCode::Char('J') => self.scroll_event_log_down(1),
            KeyCode::Char('K') => self.scroll_event_log_up(1),
            KeyCode::Char('g') | KeyCode::Home => self.pause_and(ReplayPlayer::jump_to_start),
            KeyCode::Char('G') | KeyCode::End => self.pause_and(ReplayPlayer::jump_to_end),
            KeyCode::Char('+') | KeyCode::Char('=') => self.player.speed_up(),
            KeyCode::Char('-') => self.player.speed_down(),
            KeyCode::PageUp => self.scroll_event_log_up(5),
            KeyCode::PageDown => self.scroll_event_log_down(5),
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppCommand::BackToSelector),
            _ => {}
        }
        None
    }

    fn update(&mut self, dt: Duration) {
        if !self.player.is_playing {
            return;
        }

        self.playback_accumulator += dt.as_secs_f32() * self.player.play_speed();
        while self.playback_accumulator >= 1.0 {
            self.player.step_forward(1);
            self.playback_accumulator -= 1.0;

            if self.player.cursor.is_at_end() {
                self.player.is_playing = false;
                self.playback_accumulator = 0.0;
                break;
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        match LayoutMode::from_dimensions(frame.area().width, frame.area().height) {
            LayoutMode::SingleColumn => self.render_single_column(frame),
            LayoutMode::TwoColumn => self.render_two_column(frame),
        }
    }
}

impl ReplayViewerState {
    fn scroll_event_log_up(&mut self, lines: u16) {
        self.event_log_scroll = self.event_log_scroll.saturating_sub(lines);
        let mut scrollbar_state = self.event_log_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state.position(self.event_log_scroll as usize);
    }

    fn scroll_event_log_down(&mut self, lines: u16) {
        let max_scroll = self
            .event_log_total_lines
            .get()
            .saturating_sub(self.event_log_visible_lines.get());
        self.event_log_scroll = self.event_log_scroll.saturating_add(lines).min(max_scroll);
        let mut scrollbar_state = self.event_log_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state.position(self.event_log_scroll as usize);
    }

    fn render_single_column(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(20),    // Map
                Constraint::Length(10), // Event log
                Constraint::Length(3),  // Header
                Constraint::Length(4),  // Status
                Constraint::Length(4),  // Controls
            ])
            .split(frame.area());

        self.render_map(frame, chunks[0]);
        self.render_event_log(frame, chunks[1]);
        frame.render_widget(self.render_header(), chunks[2]);
        frame.render_widget(self.render_status(), chunks[3]);
        frame.render_widget(self.render_controls(), chunks[4]);
    }

    fn render_two_column(&self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(frame.area());

        self.render_map(frame, main_chunks[0]);

        let info_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(Self::info_column_constraints(main_chunks[1].height))
            .split(main_chunks[1]);

        self.render_event_log(frame, info_chunks[0]);
        frame.render_widget(self.render_header(), info_chunks[1]);
        frame.render_widget(self.render_status(), info_chunks[2]);
        frame.render_widget(self.render_controls(), info_chunks[3]);
    }

    fn info_column_constraints(available_height: u16) -> Vec<Constraint> {
        const HEADER_HEIGHT: u16 = 3;
        const STATUS_HEIGHT: u16 = 4;
        const CONTROLS_HEIGHT: u16 = 4;
        const MIN_EVENT_LOG_HEIGHT: u16 = 10;

        let fixed_height = HEADER_HEIGHT + STATUS_HEIGHT + CONTROLS_HEIGHT;
        if available_height > fixed_height + MIN_EVENT_LOG_HEIGHT {
            vec![
                Constraint::Min(MIN_EVENT_LOG_HEIGHT),
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(CONTROLS_HEIGHT),
            ]
        } else {
            vec![
                Constraint::Percentage(58),
                Constraint::Percentage(12),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
            ]
        }
    }

    fn render_header(&self) -> Paragraph<'_> {
        let title = format!(
            "{} | Minute {} | Snapshot {} / {} | Speed: {}x | {}",
            self.player.metadata.match_id,
            self.player.cursor.minute(),
            self.player.current_index(),
            self.player.max_index(),
            self.player.play_speed(),
            if self.player.is_playing { "▶ Playing" } else { "⏸ Paused" }
        );

        Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_map(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Map").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let side = (inner.width as usize / CHAR_DIMS.horizontal).min(inner.height as usize);
        let config = RenderConfig { width: side, height: side };

        let annotations = present(&self.player.cursor, &self.player.directory);
        let grid = self.map.render(&annotations, &config);

        let x_offset = inner.width.saturating_sub(grid.physical_width() as u16) / 2;
        let y_offset = inner.height.saturating_sub(grid.physical_height() as u16) / 2;

        let mut lines: Vec<Line> = (0..y_offset).map(|_| Line::from("")).collect();
        for (chars, styles) in grid.into_styled_lines() {
            let mut spans = Vec::with_capacity(chars.len() + 1);
            if x_offset > 0 {
                spans.push(Span::raw(" ".repeat(x_offset as usize)));
            }
            for (ch, style) in chars.into_iter().zip(styles) {
                spans.push(Span::styled(ch.to_string(), style));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status(&self) -> Paragraph<'_> {
        let registry = self.player.cursor.registry();
        let team_line = |team: Team| {
            let total = registry.iter().filter(|s| s.key().team == team).count();
            Span::styled(
                format!("{}: {} / {} structures", team, registry.alive_count_for(team), total),
                Style::default().fg(team_color(Some(team))),
            )
        };

        let lines = vec![
            Line::from(vec![team_line(Team::Blue), Span::raw("   "), team_line(Team::Red)]),
            Line::from(format!(
                "Participants on map: {} | Events this minute: {}",
                self.player.cursor.participant_frames().len(),
                self.player.cursor.current_snapshot().events.len()
            )),
        ];

        Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let lines = vec![
            Line::from("Space: Play/Pause | j/k: ±1 minute | h/l: ±5 minutes | g/G: Start/End | q: Back"),
            Line::from("+/-: Speed | Shift+J/K: Scroll event log | PageUp/Down: Scroll event log (5 lines)"),
        ];

        Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_event_log(&self, frame: &mut Frame, area: Rect) {
        let cursor = &self.player.cursor;
        let mut lines = Vec::new();
        let mut event_count = 0;

        // Newest snapshot first
        let seen = cursor.timeline().snapshots().get(..=cursor.index()).unwrap_or_default();
        for (index, snapshot) in seen.iter().enumerate().rev() {
            if snapshot.events.is_empty() {
                continue;
            }

            lines.push(Line::from(Span::styled(
                format!("=== Snapshot {} ({}s) ===", index, snapshot.timestamp / 1000),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            for event in &snapshot.events {
                event_count += 1;
                lines.push(Line::from(format!(
                    "{:>6}s  {}",
                    event.timestamp / 1000,
                    describe_event(event, &self.player.directory)
                )));
            }
            lines.push(Line::from(""));
        }

        let total_lines = lines.len().min(u16::MAX as usize) as u16;
        self.event_log_total_lines.set(total_lines);
        self.event_log_visible_lines.set(area.height.saturating_sub(2));

        let mut scrollbar_state = self.event_log_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state
            .content_length(total_lines as usize)
            .position(self.event_log_scroll as usize);

        let event_log = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!("Event Log ({} events)", event_count))
                    .borders(Borders::ALL),
            )
            .style(Style::default().fg(Color::White))
            .scroll((self.event_log_scroll, 0));
        frame.render_widget(event_log, area);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut *scrollbar_state,
        );
    }
}
