use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph, Widget};

use ditdah::morse::CharClass;
use ditdah::session::FlashDeck;

use crate::ui::theme::Theme;

pub struct FlashCardView<'a> {
    pub deck: Option<&'a FlashDeck>,
    /// Shown instead of a card when the deck could not be built.
    pub error: Option<String>,
    pub classes: &'a [CharClass],
    pub theme: &'a Theme,
}

impl<'a> FlashCardView<'a> {
    pub fn new(
        deck: Option<&'a FlashDeck>,
        error: Option<String>,
        classes: &'a [CharClass],
        theme: &'a Theme,
    ) -> Self {
        Self {
            deck,
            error,
            classes,
            theme,
        }
    }

    fn selection_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let mut spans = Vec::new();
        for (key, label, class) in [
            ('a', "Letters", CharClass::Alphabet),
            ('d', "Digits", CharClass::Digits),
            ('p', "Punctuation", CharClass::Punctuation),
        ] {
            let on = self.classes.contains(&class);
            let mark = if on { "x" } else { " " };
            let style = if on {
                Style::default().fg(colors.accent())
            } else {
                Style::default().fg(colors.muted())
            };
            spans.push(Span::styled(format!("[{mark}] {label} ({key})  "), style));
        }
        Line::from(spans)
    }
}

impl Widget for FlashCardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = match self.deck {
            Some(deck) => format!(" Flash Cards: {} ", deck.mode.label()),
            None => " Flash Cards ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.selection_line())
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let Some(deck) = self.deck else {
            let message = self.error.unwrap_or_default();
            Paragraph::new(Span::styled(message, Style::default().fg(colors.error())))
                .alignment(Alignment::Center)
                .render(layout[2], buf);
            return;
        };

        Paragraph::new(Span::styled(
            deck.front(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let back = if deck.is_flipped() {
            Span::styled(deck.back(), Style::default().fg(colors.fg()))
        } else {
            Span::styled("[Space] to flip", Style::default().fg(colors.muted()))
        };
        Paragraph::new(back)
            .alignment(Alignment::Center)
            .render(layout[4], buf);

        let (position, total) = deck.position();
        Gauge::default()
            .gauge_style(Style::default().fg(colors.accent()).bg(colors.bar_empty()))
            .ratio(deck.progress().clamp(0.0, 1.0))
            .label(format!("{position} / {total}"))
            .render(layout[6], buf);
    }
}
