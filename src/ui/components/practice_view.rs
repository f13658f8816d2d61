use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use ditdah::engine::PracticeMode;
use ditdah::morse::code;
use ditdah::session::Practice;

use crate::app::{Feedback, FeedbackTone};
use crate::ui::theme::Theme;

/// The question card for the three scored modes.
pub struct PracticeView<'a> {
    pub practice: &'a Practice,
    pub feedback: Option<&'a Feedback>,
    /// Keying lamp state in sound mode, `None` elsewhere.
    pub lamp: Option<bool>,
    pub theme: &'a Theme,
}

impl<'a> PracticeView<'a> {
    pub fn new(
        practice: &'a Practice,
        feedback: Option<&'a Feedback>,
        lamp: Option<bool>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            practice,
            feedback,
            lamp,
            theme,
        }
    }

    fn prompt_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let big = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        match self.practice.mode {
            PracticeMode::CharToMorse => Line::from(Span::styled(self.practice.target.to_string(), big)),
            PracticeMode::MorseToChar => {
                Line::from(Span::styled(code::display_code(self.practice.code()), big))
            }
            PracticeMode::SoundToChar => {
                let lit = self.lamp.unwrap_or(false);
                let style = if lit {
                    Style::default().fg(colors.lamp_on())
                } else {
                    Style::default().fg(colors.bar_empty())
                };
                Line::from(Span::styled("██████", style))
            }
        }
    }

    fn entry_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        match self.practice.mode {
            PracticeMode::CharToMorse => {
                let entered: String = self
                    .practice
                    .entered
                    .iter()
                    .map(|s| s.glyph().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                let shown = if entered.is_empty() { "_".to_string() } else { entered };
                Line::from(Span::styled(shown, Style::default().fg(colors.fg())))
            }
            PracticeMode::MorseToChar | PracticeMode::SoundToChar => Line::from(Span::styled(
                "Type the character",
                Style::default().fg(colors.muted()),
            )),
        }
    }
}

impl Widget for PracticeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.practice.mode.label()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        Paragraph::new(self.prompt_line())
            .alignment(Alignment::Center)
            .render(layout[1], buf);
        Paragraph::new(self.entry_line())
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        if let Some(feedback) = self.feedback {
            let color = match feedback.tone {
                FeedbackTone::Positive => colors.success(),
                FeedbackTone::Negative => colors.error(),
                FeedbackTone::Neutral => colors.warning(),
            };
            Paragraph::new(Span::styled(
                feedback.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(layout[5], buf);
        }
    }
}
