use super::View;
use crate::app::AppCommand;
use crate::replay::reader::ReplayReader;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub struct ReplaySelectorState {
    replay_dir: PathBuf,
    replay_files: Vec<PathBuf>,
    selected_index: usize,
    scroll_offset: usize,
}

impl ReplaySelectorState {
    pub fn new(replay_dir: PathBuf) -> Result<Self> {
        let replay_files = ReplayReader::list_replays(&replay_dir)?;
        Ok(Self {
            replay_dir,
            replay_files,
            selected_index: 0,
            scroll_offset: 0,
        })
    }

    pub fn replay_files(&self) -> &[PathBuf] {
        &self.replay_files
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;

            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            }
        }
    }

    fn move_selection_down(&mut self) {
        if self.selected_index < self.replay_files.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }
}

fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

fn format_age(modified: SystemTime) -> String {
    let Ok(age) = SystemTime::now().duration_since(modified) else {
        return "just now".to_string();
    };
    let age = age.as_secs();
    if age < 60 {
        "just now".to_string()
    } else if age < 3600 {
        format!("{}m ago", age / 60)
    } else if age < 86400 {
        format!("{}h ago", age / 3600)
    } else {
        format!("{}d ago", age / 86400)
    }
}

fn file_details(path: &Path) -> String {
    match path.metadata() {
        Ok(metadata) => {
            let modified = metadata
                .modified()
                .map(format_age)
                .unwrap_or_else(|_| "unknown".to_string());
            format!(" ({}, {})", format_size(metadata.len()), modified)
        }
        Err(_) => String::new(),
    }
}

impl View for ReplaySelectorState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
                None
            }
            KeyCode::Enter => self
                .replay_files
                .get(self.selected_index)
                .cloned()
                .map(AppCommand::OpenReplay),
            _ => None,
        }
    }

    fn update(&mut self, _dt: Duration) {}

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Rift Replay")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let list_area = chunks[1];
        let visible_height = (list_area.height.saturating_sub(2) as usize).max(1);

        let scroll_offset = if self.selected_index >= self.scroll_offset + visible_height {
            self.selected_index.saturating_sub(visible_height - 1)
        } else if self.selected_index < self.scroll_offset {
            self.selected_index
        } else {
            self.scroll_offset
        };

        let items: Vec<ListItem> = self
            .replay_files
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .map(|(i, path)| {
                // Show paths relative to the replay directory so nested matches stay distinguishable
                let name = path
                    .strip_prefix(&self.replay_dir)
                    .unwrap_or(path)
                    .display()
                    .to_string();

                let style = if i == self.selected_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(name, style),
                    Span::styled(file_details(path), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("Select Replay ({})", self.replay_dir.display()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, list_area);

        let help_text = if self.replay_files.is_empty() {
            "No replay files found. Press 'q' to quit."
        } else {
            "↑/k: Up | ↓/j: Down | Enter: Open | q: Quit"
        };

        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}
