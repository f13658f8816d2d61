use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use ditdah::engine::PracticeMode;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Practice(PracticeMode),
    Study,
    FlashCards,
    Reference,
    Statistics,
}

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
    pub title: &'static str,
    /// Shown under the title, e.g. the overall accuracy line.
    pub subtitle: String,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    label: PracticeMode::CharToMorse.label(),
                    description: "Key the code for a character with the paddle",
                    action: MenuAction::Practice(PracticeMode::CharToMorse),
                },
                MenuItem {
                    key: '2',
                    label: PracticeMode::MorseToChar.label(),
                    description: "Read a code and type its character",
                    action: MenuAction::Practice(PracticeMode::MorseToChar),
                },
                MenuItem {
                    key: '3',
                    label: PracticeMode::SoundToChar.label(),
                    description: "Copy a keyed code by ear (or by lamp)",
                    action: MenuAction::Practice(PracticeMode::SoundToChar),
                },
                MenuItem {
                    key: '4',
                    label: "Study",
                    description: "Flash cards and reference charts",
                    action: MenuAction::Study,
                },
                MenuItem {
                    key: 's',
                    label: "Statistics",
                    description: "Accuracy per mode, per day and per character",
                    action: MenuAction::Statistics,
                },
            ],
            selected: 0,
            theme,
            title: "ditdah Morse trainer",
            subtitle: String::new(),
        }
    }

    pub fn study(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    label: "Flash Cards",
                    description: "Flip through characters and codes",
                    action: MenuAction::FlashCards,
                },
                MenuItem {
                    key: '2',
                    label: "Reference Charts",
                    description: "Letters, numbers and punctuation at a glance",
                    action: MenuAction::Reference,
                },
            ],
            selected: 0,
            theme,
            title: "Study",
            subtitle: "[Esc] Back".to_string(),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|item| item.key == key).map(|item| item.action)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "-.. .. - -.. .- ....",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.title, Style::default().fg(colors.fg()))),
            Line::from(Span::styled(&*self.subtitle, Style::default().fg(colors.muted()))),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = if is_selected {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.muted()))),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}
